//! Key Encapsulation Mechanism contract and key types
//!
//! A [`Kem`] is a stateless, process-lifetime scheme descriptor. Keys are
//! byte-backed: a key is its canonical wire encoding plus a back-reference
//! to the scheme that owns it, which is what makes polymorphic dispatch and
//! cross-scheme rejection possible.

use core::fmt;

use rand_core::CryptoRngCore;
use subtle::ConstantTimeEq;
use zeroize::{Zeroize, Zeroizing};

use crate::error::{Error, Result};
use crate::secret::SharedSecret;

/// Opaque KEM ciphertext of length `scheme.ciphertext_size()`.
pub type Ciphertext = Vec<u8>;

/// Contract for a Key Encapsulation Mechanism.
///
/// Implementations are immutable after construction and safe for concurrent
/// read-only use. Randomized operations draw from the injected RNG; the
/// deterministic variants are pure functions of their seed.
pub trait Kem: Send + Sync {
    /// Stable scheme name, unique per process after ASCII case folding.
    fn name(&self) -> &str;

    fn public_key_size(&self) -> usize;
    fn private_key_size(&self) -> usize;
    fn ciphertext_size(&self) -> usize;
    fn shared_secret_size(&self) -> usize;

    /// Seed length consumed by [`Kem::derive_key_pair`].
    fn seed_size(&self) -> usize;

    /// Seed length consumed by [`Kem::encapsulate_deterministically`].
    fn encapsulation_seed_size(&self) -> usize;

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
                context: "kem generate_key_pair",
            })?;
        self.derive_key_pair(&seed)
    }

    /// Encapsulates deterministically to `public_key` using `seed`.
    fn encapsulate_deterministically(
        &'static self,
        public_key: &PublicKey,
        seed: &[u8],
    ) -> Result<(Ciphertext, SharedSecret)>;

    /// Encapsulates to `public_key` with fresh randomness from the RNG.
    fn encapsulate(
        &'static self,
        rng: &mut dyn CryptoRngCore,
        public_key: &PublicKey,
    ) -> Result<(Ciphertext, SharedSecret)> {
        let mut seed = Zeroizing::new(vec![0u8; self.encapsulation_seed_size()]);
        rng.try_fill_bytes(&mut seed)
            .map_err(|_| Error::RandomGeneration {
                context: "kem encapsulate",
            })?;
        self.encapsulate_deterministically(public_key, &seed)
    }

    /// Recovers the shared secret from `ciphertext` under `private_key`.
    fn decapsulate(&'static self, private_key: &PrivateKey, ciphertext: &[u8])
        -> Result<SharedSecret>;

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey>;
    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey>;
}

/// Public key of a KEM scheme.
#[derive(Clone)]
pub struct PublicKey {
    scheme: &'static dyn Kem,
    bytes: Vec<u8>,
}

impl PublicKey {
    /// Wraps `bytes` as a public key of `scheme`.
    ///
    /// The length must equal `scheme.public_key_size()`; schemes validate
    /// any further structure in `public_key_from_bytes`.
    pub fn new(scheme: &'static dyn Kem, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != scheme.public_key_size() {
            return Err(Error::invalid_key_len(
                "kem public key",
                scheme.public_key_size(),
                bytes.len(),
            ));
        }
        Ok(Self { scheme, bytes })
    }

    /// The scheme this key belongs to.
    pub fn scheme(&self) -> &'static dyn Kem {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Rejects keys that belong to a scheme other than `scheme`.
    pub fn expect_scheme(&self, scheme: &dyn Kem, context: &'static str) -> Result<()> {
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
            "kem::PublicKey({}, {} bytes)",
            self.scheme.name(),
            self.bytes.len()
        )
    }
}

/// Private key of a KEM scheme.
///
/// The bytes are wiped on drop; [`PrivateKey::reset`] wipes them earlier,
/// after which any further use fails with `InvalidKey`.
pub struct PrivateKey {
    scheme: &'static dyn Kem,
    bytes: Zeroizing<Vec<u8>>,
}

impl PrivateKey {
    pub fn new(scheme: &'static dyn Kem, bytes: Vec<u8>) -> Result<Self> {
        if bytes.len() != scheme.private_key_size() {
            return Err(Error::invalid_key_len(
                "kem private key",
                scheme.private_key_size(),
                bytes.len(),
            ));
        }
        Ok(Self {
            scheme,
            bytes: Zeroizing::new(bytes),
        })
    }

    pub fn scheme(&self) -> &'static dyn Kem {
        self.scheme
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn to_bytes(&self) -> Vec<u8> {
        self.bytes.to_vec()
    }

    /// Wipes the key material in place.
    pub fn reset(&mut self) {
        self.bytes.zeroize();
    }

    /// Rejects keys that belong to a scheme other than `scheme`.
    pub fn expect_scheme(&self, scheme: &dyn Kem, context: &'static str) -> Result<()> {
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
            "kem::PrivateKey({}, {} bytes)",
            self.scheme.name(),
            self.bytes.len()
        )
    }
}
