//! X25519 Diffie-Hellman over Curve25519 (RFC 7748)
//!
//! Private keys are the 32 raw scalar bytes as fed to the primitive;
//! clamping happens inside `x25519-dalek`. Deterministic derivation expands
//! the seed through the Blake2b stream before it touches the scalar, so the
//! scheme never consumes a caller seed directly.

use x25519_dalek::{PublicKey as DalekPublicKey, StaticSecret};
use zeroize::Zeroize;

use pqmux_api::nike::{Nike, PrivateKey, PublicKey};
use pqmux_api::{xof, Error, Result, SharedSecret};

/// Size of a serialized public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of a serialized private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of the raw Diffie-Hellman output in bytes
pub const SHARED_SECRET_SIZE: usize = 32;
/// Keypair entropy requirement in bytes
pub const SEED_SIZE: usize = 32;

/// X25519 NIKE scheme
pub struct X25519;

static SCHEME: X25519 = X25519;

/// Returns the process-wide X25519 scheme descriptor.
pub fn scheme() -> &'static dyn Nike {
    &SCHEME
}

impl X25519 {
    fn secret(&self, private_key: &PrivateKey) -> Result<StaticSecret> {
        let mut bytes: [u8; PRIVATE_KEY_SIZE] = private_key
            .as_bytes()
            .try_into()
            .map_err(|_| Error::invalid_key_len("x25519", PRIVATE_KEY_SIZE, private_key.as_bytes().len()))?;
        let secret = StaticSecret::from(bytes);
        bytes.zeroize();
        Ok(secret)
    }

    fn public(&self, public_key: &PublicKey) -> Result<DalekPublicKey> {
        let bytes: [u8; PUBLIC_KEY_SIZE] = public_key
            .as_bytes()
            .try_into()
            .map_err(|_| Error::invalid_key_len("x25519", PUBLIC_KEY_SIZE, public_key.as_bytes().len()))?;
        Ok(DalekPublicKey::from(bytes))
    }
}

impl Nike for X25519 {
    fn name(&self) -> &str {
        "x25519"
    }

    fn public_key_size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }

    fn private_key_size(&self) -> usize {
        PRIVATE_KEY_SIZE
    }

    fn shared_secret_size(&self) -> usize {
        SHARED_SECRET_SIZE
    }

    fn seed_size(&self) -> usize {
        SEED_SIZE
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        if seed.len() != SEED_SIZE {
            return Err(Error::InvalidSeed {
                context: "x25519 derive_key_pair",
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }

        let expanded = xof::expand(seed, PRIVATE_KEY_SIZE);
        let mut scalar = [0u8; PRIVATE_KEY_SIZE];
        scalar.copy_from_slice(&expanded);
        let secret = StaticSecret::from(scalar);
        scalar.zeroize();
        let public = DalekPublicKey::from(&secret);

        Ok((
            PublicKey::new(self, public.as_bytes().to_vec())?,
            PrivateKey::new(self, secret.to_bytes().to_vec())?,
        ))
    }

    fn derive_public_key(&'static self, private_key: &PrivateKey) -> Result<PublicKey> {
        private_key.expect_scheme(self, "x25519 derive_public_key")?;
        let secret = self.secret(private_key)?;
        let public = DalekPublicKey::from(&secret);
        PublicKey::new(self, public.as_bytes().to_vec())
    }

    fn derive_secret(
        &'static self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
    ) -> Result<SharedSecret> {
        private_key.expect_scheme(self, "x25519 derive_secret")?;
        public_key.expect_scheme(self, "x25519 derive_secret")?;

        let secret = self.secret(private_key)?;
        let public = self.public(public_key)?;
        let shared = secret.diffie_hellman(&public);
        Ok(SharedSecret::new(shared.as_bytes().to_vec()))
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::invalid_key_len(
                "x25519 public key",
                PUBLIC_KEY_SIZE,
                bytes.len(),
            ));
        }
        PublicKey::new(self, bytes.to_vec())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::invalid_key_len(
                "x25519 private key",
                PRIVATE_KEY_SIZE,
                bytes.len(),
            ));
        }
        PrivateKey::new(self, bytes.to_vec())
    }
}
