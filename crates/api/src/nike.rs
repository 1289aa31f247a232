//! Non-Interactive Key Exchange contract and key types
//!
//! A NIKE derives a shared secret from one party's private key and the
//! other's public key without interaction:
//! `derive_secret(sk_a, pk_b) == derive_secret(sk_b, pk_a)`.

use core::fmt;

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::secret::SharedSecret;

/// Contract for a Non-Interactive Key Exchange scheme.
pub trait Nike: Send + Sync {
    /// Stable scheme name, unique per process after ASCII case folding.
    fn name(&self) -> &str;

    fn public_key_size(&self) -> usize;
    fn private_key_size(&self) -> usize;
    fn shared_secret_size(&self) -> usize;

    /// Seed length consumed by [`Nike::derive_key_pair`]; also the keypair
    /// entropy requirement advertised to the NIKE-to-KEM adapter.
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
                context: "nike generate_key_pair",
            })?;
        self.derive_key_pair(&seed)
    }

    /// Recomputes the public key that corresponds to `private_key`.
    fn derive_public_key(&'static self, private_key: &PrivateKey) -> Result<PublicKey>;

    /// Computes the shared secret between `private_key` and `public_key`.
    fn derive_secret(
        &'static self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
    ) -> Result<SharedSecret>;

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey>;
    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey>;
}

/// Public key of a NIKE scheme.
#[derive(Clone)]
pub struct PublicKey {
    scheme: &'static dyn Nike,
    bytes: Vec<u8>,
}

impl PublicKey {
    pub fn new(scheme: &'static dyn Nike, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != scheme.public_key_size() {
            return Err(Error::invalid_key_len(
                "nike public key",
                scheme.public_key_size(),
                bytes.len(),
            ));
        }
        Ok(Self { scheme, bytes })
    }

    pub fn scheme(&self) -> &'static dyn Nike {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    pub fn expect_scheme(&self, scheme: &dyn Nike, context: &'static str) -> Result<()> {
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
            "nike::PublicKey({}, {} bytes)",
            self.scheme.name(),
            self.bytes.len()
        )
    }
}

/// Private key of a NIKE scheme; wiped on drop or on [`PrivateKey::reset`].
pub struct PrivateKey {
    scheme: &'static dyn Nike,
    bytes: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    pub fn new(scheme: &'static dyn Nike, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != scheme.private_key_size() {
            return Err(Error::invalid_key_len(
                "nike private key",
                scheme.private_key_size(),
                bytes.len(),
            ));
        }
        Ok(Self {
            scheme,
            bytes: Zeroizing::new(bytes),
        })
    }

    pub fn scheme(&self) -> &'static dyn Nike {
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

    pub fn expect_scheme(&self, scheme: &dyn Nike, context: &'static str) -> Result<()> {
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
            "nike::PrivateKey({}, {} bytes)",
            self.scheme.name(),
            self.bytes.len()
        )
    }
}
