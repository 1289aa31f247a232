//! Digital signature contract and key types
//!
//! Verification returns a `bool`, never an error: a malformed public key,
//! signature, or cross-scheme key is simply an invalid signature.

use core::fmt;

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};

/// Contract for a digital signature scheme.
pub trait Signature: Send + Sync {
    /// Stable scheme name, unique per process after ASCII case folding.
    fn name(&self) -> &str;

    fn public_key_size(&self) -> usize;
    fn private_key_size(&self) -> usize;
    fn signature_size(&self) -> usize;

    /// Seed length consumed by [`Signature::derive_key_pair`].
    fn seed_size(&self) -> usize;

    /// Derives a key pair deterministically from `seed`.
    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)>;

    /// Generates a fresh key pair from the injected RNG.
    fn generate_key_pair(
        &'static self,
        rng: &mut dyn CryptoRngCore,
    ) -> Result<(PublicKey, PrivateKey)> {
        let mut seed = Zeroizing::new(vec![0u8; self.seed_size()]);
        rng.try_fill_bytes(&mut seed)
            .map_err(|_| Error::RandomGeneration {
                context: "sign generate_key_pair",
            })?;
        self.derive_key_pair(&seed)
    }

    /// Signs `message` under `private_key`.
    fn sign(&'static self, private_key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>>;

    /// Verifies `signature` over `message` under `public_key`.
    fn verify(&'static self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool;

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey>;
    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey>;
}

/// Public key of a signature scheme.
#[derive(Clone)]
pub struct PublicKey {
    scheme: &'static dyn Signature,
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn new(scheme: &'static dyn Signature, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != scheme.public_key_size() {
            return Err(Error::invalid_key_len(
                "sign public key",
                scheme.public_key_size(),
                bytes.len(),
            ));
        }
        Ok(Self { scheme, bytes })
    }

    pub fn scheme(&self) -> &'static dyn Signature {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn expect_scheme(&self, scheme: &dyn Signature, context: &'static str) -> Result<()> {
        if self.scheme.name() != scheme.name() {
            return Err(Error::type_mismatch(
                context,
                scheme.name(),
                self.scheme.name(),
            ));
        }
        Ok(())
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.scheme.name() == other.scheme.name()
            && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sign::PublicKey({}, {} bytes)",
            self.scheme.name(),
            self.bytes.len()
        )
    }
}

/// Private key of a signature scheme; wiped on drop or on
/// [`PrivateKey::reset`].
pub struct PrivateKey {
    scheme: &'static dyn Signature,
    bytes: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    pub fn new(scheme: &'static dyn Signature, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != scheme.private_key_size() {
            return Err(Error::invalid_key_len(
                "sign private key",
                scheme.private_key_size(),
                bytes.len(),
            ));
        }
        Ok(Self {
            scheme,
            bytes: Zeroizing::new(bytes),
        })
    }

    pub fn scheme(&self) -> &'static dyn Signature {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    pub fn reset(&mut self) {
        self.bytes.zeroize();
    }

    pub fn expect_scheme(&self, scheme: &dyn Signature, context: &'static str) -> Result<()> {
        if self.scheme.name() != scheme.name() {
            return Err(Error::type_mismatch(
                context,
                scheme.name(),
                self.scheme.name(),
            ));
        }
        Ok(())
    }
}

impl PartialEq for PrivateKey {
    fn eq(&self, other: &Self) -> bool {
        self.scheme.name() == other.scheme.name()
            && bool::from(self.bytes.ct_eq(&other.bytes))
    }
}

impl Eq for PrivateKey {}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "sign::PrivateKey({}, {} bytes)",
            self.scheme.name(),
            self.bytes.len()
        )
    }
}
