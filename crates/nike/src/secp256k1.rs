//! secp256k1 ECDH
//!
//! Public keys use the compressed SEC1 point encoding (33 bytes); the shared
//! secret is the raw x-coordinate of the ECDH point. Deterministic
//! derivation feeds the scalar sampler from the Blake2b seed stream, which
//! also absorbs the primitive's rejection sampling.

use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::{ecdh, PublicKey as K256PublicKey, SecretKey};

use pqmux_api::nike::{Nike, PrivateKey, PublicKey};
use pqmux_api::xof::SeedXof;
use pqmux_api::{Error, Result, SharedSecret};

/// Size of a serialized public key in bytes (compressed SEC1 point)
pub const PUBLIC_KEY_SIZE: usize = 33;
/// Size of a serialized private key in bytes (scalar)
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of the raw ECDH output in bytes (x-coordinate)
pub const SHARED_SECRET_SIZE: usize = 32;
/// Keypair entropy requirement in bytes
pub const SEED_SIZE: usize = 32;

/// secp256k1 ECDH NIKE scheme
pub struct Secp256k1;

static SCHEME: Secp256k1 = Secp256k1;

/// Returns the process-wide secp256k1 scheme descriptor.
pub fn scheme() -> &'static dyn Nike {
    &SCHEME
}

impl Secp256k1 {
    fn secret(&self, private_key: &PrivateKey) -> Result<SecretKey> {
        SecretKey::from_slice(private_key.as_bytes())
            .map_err(|e| Error::invalid_key("secp256k1 private key", e.to_string()))
    }

    fn public(&self, public_key: &PublicKey) -> Result<K256PublicKey> {
        K256PublicKey::from_sec1_bytes(public_key.as_bytes())
            .map_err(|e| Error::invalid_key("secp256k1 public key", e.to_string()))
    }
}

impl Nike for Secp256k1 {
    fn name(&self) -> &str {
        "secp256k1"
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
                context: "secp256k1 derive_key_pair",
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }

        let mut stream = SeedXof::new(seed);
        let secret = SecretKey::random(&mut stream);
        let public = secret.public_key();

        Ok((
            PublicKey::new(self, public.to_encoded_point(true).as_bytes().to_vec())?,
            PrivateKey::new(self, secret.to_bytes().to_vec())?,
        ))
    }

    fn derive_public_key(&'static self, private_key: &PrivateKey) -> Result<PublicKey> {
        private_key.expect_scheme(self, "secp256k1 derive_public_key")?;
        let secret = self.secret(private_key)?;
        let public = secret.public_key();
        PublicKey::new(self, public.to_encoded_point(true).as_bytes().to_vec())
    }

    fn derive_secret(
        &'static self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
    ) -> Result<SharedSecret> {
        private_key.expect_scheme(self, "secp256k1 derive_secret")?;
        public_key.expect_scheme(self, "secp256k1 derive_secret")?;

        let secret = self.secret(private_key)?;
        let public = self.public(public_key)?;
        let shared = ecdh::diffie_hellman(secret.to_nonzero_scalar(), public.as_affine());
        Ok(SharedSecret::new(shared.raw_secret_bytes().to_vec()))
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::invalid_key_len(
                "secp256k1 public key",
                PUBLIC_KEY_SIZE,
                bytes.len(),
            ));
        }
        // Reject encodings that are not a point on the curve up front.
        K256PublicKey::from_sec1_bytes(bytes)
            .map_err(|e| Error::invalid_key("secp256k1 public key", e.to_string()))?;
        PublicKey::new(self, bytes.to_vec())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::invalid_key_len(
                "secp256k1 private key",
                PRIVATE_KEY_SIZE,
                bytes.len(),
            ));
        }
        SecretKey::from_slice(bytes)
            .map_err(|e| Error::invalid_key("secp256k1 private key", e.to_string()))?;
        PrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn derive_secret_is_symmetric() {
        let mut rng = OsRng;
        let (pk_a, sk_a) = scheme().generate_key_pair(&mut rng).unwrap();
        let (pk_b, sk_b) = scheme().generate_key_pair(&mut rng).unwrap();

        let ss_a = scheme().derive_secret(&sk_a, &pk_b).unwrap();
        let ss_b = scheme().derive_secret(&sk_b, &pk_a).unwrap();
        assert_eq!(ss_a, ss_b);
        assert_eq!(ss_a.len(), SHARED_SECRET_SIZE);
    }

    #[test]
    fn derive_key_pair_is_deterministic() {
        let seed = [7u8; SEED_SIZE];
        let (pk1, sk1) = scheme().derive_key_pair(&seed).unwrap();
        let (pk2, sk2) = scheme().derive_key_pair(&seed).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);
    }

    #[test]
    fn public_key_round_trip_keeps_compressed_encoding() {
        let (pk, sk) = scheme().generate_key_pair(&mut OsRng).unwrap();
        assert_eq!(pk.as_bytes().len(), PUBLIC_KEY_SIZE);
        let pk2 = scheme().public_key_from_bytes(pk.as_bytes()).unwrap();
        assert_eq!(pk, pk2);
        assert_eq!(scheme().derive_public_key(&sk).unwrap(), pk);
    }

    #[test]
    fn rejects_garbage_public_key() {
        // 33 bytes that are not a valid SEC1 point.
        let err = scheme().public_key_from_bytes(&[0xFFu8; PUBLIC_KEY_SIZE]).unwrap_err();
        assert!(matches!(err, Error::InvalidKey { .. }));
    }

    #[test]
    fn rejects_zero_private_key() {
        let err = scheme().private_key_from_bytes(&[0u8; PRIVATE_KEY_SIZE]).unwrap_err();
        assert!(matches!(err, Error::InvalidKey { .. }));
    }
}
