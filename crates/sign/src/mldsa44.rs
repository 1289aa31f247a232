//! ML-DSA-44 (FIPS 204)
//!
//! Wraps the `fips204` crate. Deterministic key derivation feeds the
//! primitive's keygen from the Blake2b seed stream (keygen consumes the
//! 32-byte ξ). Signing is hedged internally by the primitive. Signatures
//! use the empty context string.

use fips204::ml_dsa_44;
use fips204::traits::{SerDes, Signer, Verifier};

use pqmux_api::sign::{PrivateKey, PublicKey, Signature as SignatureScheme};
use pqmux_api::xof::SeedXof;
use pqmux_api::{Error, Result};

/// Size of a serialized public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 1312;
/// Size of a serialized private key in bytes
pub const PRIVATE_KEY_SIZE: usize = 2560;
/// Size of a signature in bytes
pub const SIGNATURE_SIZE: usize = 2420;
/// Keypair entropy requirement in bytes (ξ)
pub const SEED_SIZE: usize = 32;

/// ML-DSA-44 signature scheme
pub struct Mldsa44;

static SCHEME: Mldsa44 = Mldsa44;

/// Returns the process-wide ML-DSA-44 scheme descriptor.
pub fn scheme() -> &'static dyn SignatureScheme {
    &SCHEME
}

impl SignatureScheme for Mldsa44 {
    fn name(&self) -> &str {
        "mldsa44"
    }

    fn public_key_size(&self) -> usize {
        PUBLIC_KEY_SIZE
    }

    fn private_key_size(&self) -> usize {
        PRIVATE_KEY_SIZE
    }

    fn signature_size(&self) -> usize {
        SIGNATURE_SIZE
    }

    fn seed_size(&self) -> usize {
        SEED_SIZE
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        if seed.len() != SEED_SIZE {
            return Err(Error::InvalidSeed {
                context: "mldsa44 derive_key_pair",
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }

        let mut stream = SeedXof::new(seed);
        let (pk, sk) = ml_dsa_44::try_keygen_with_rng(&mut stream)
            .map_err(|e| Error::component("mldsa44 keygen", e))?;

        Ok((
            PublicKey::new(self, pk.into_bytes().to_vec())?,
            PrivateKey::new(self, sk.into_bytes().to_vec())?,
        ))
    }

    fn sign(&'static self, private_key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
        private_key.expect_scheme(self, "mldsa44 sign")?;
        let sk_bytes: [u8; PRIVATE_KEY_SIZE] = private_key.as_bytes().try_into().map_err(|_| {
            Error::invalid_key_len("mldsa44", PRIVATE_KEY_SIZE, private_key.as_bytes().len())
        })?;
        let sk = ml_dsa_44::PrivateKey::try_from_bytes(sk_bytes)
            .map_err(|e| Error::invalid_key("mldsa44 private key", e))?;
        let sig = sk
            .try_sign(message, &[])
            .map_err(|e| Error::component("mldsa44 sign", e))?;
        Ok(sig.to_vec())
    }

    fn verify(&'static self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        if public_key.scheme().name() != self.name() {
            return false;
        }
        let pk_bytes: [u8; PUBLIC_KEY_SIZE] = match public_key.as_bytes().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let pk = match ml_dsa_44::PublicKey::try_from_bytes(pk_bytes) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let sig_bytes: [u8; SIGNATURE_SIZE] = match signature.try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        pk.verify(message, &sig_bytes, &[])
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        let arr: [u8; PUBLIC_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::invalid_key_len("mldsa44 public key", PUBLIC_KEY_SIZE, bytes.len()))?;
        ml_dsa_44::PublicKey::try_from_bytes(arr)
            .map_err(|e| Error::invalid_key("mldsa44 public key", e))?;
        PublicKey::new(self, bytes.to_vec())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        let arr: [u8; PRIVATE_KEY_SIZE] = bytes
            .try_into()
            .map_err(|_| Error::invalid_key_len("mldsa44 private key", PRIVATE_KEY_SIZE, bytes.len()))?;
        ml_dsa_44::PrivateKey::try_from_bytes(arr)
            .map_err(|e| Error::invalid_key("mldsa44 private key", e))?;
        PrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn sign_and_verify_round_trip() {
        let (pk, sk) = scheme().generate_key_pair(&mut OsRng).unwrap();
        let sig = scheme().sign(&sk, b"attest this").unwrap();
        assert_eq!(sig.len(), SIGNATURE_SIZE);
        assert!(scheme().verify(&pk, b"attest this", &sig));
        assert!(!scheme().verify(&pk, b"attest that", &sig));
    }

    #[test]
    fn derive_key_pair_is_deterministic() {
        let seed = [9u8; SEED_SIZE];
        let (pk1, sk1) = scheme().derive_key_pair(&seed).unwrap();
        let (pk2, sk2) = scheme().derive_key_pair(&seed).unwrap();
        assert_eq!(pk1, pk2);
        assert_eq!(sk1, sk2);
        assert_eq!(pk1.as_bytes().len(), PUBLIC_KEY_SIZE);
        assert_eq!(sk1.as_bytes().len(), PRIVATE_KEY_SIZE);
    }

    #[test]
    fn tampered_signature_fails() {
        let (pk, sk) = scheme().derive_key_pair(&[1u8; SEED_SIZE]).unwrap();
        let mut sig = scheme().sign(&sk, b"msg").unwrap();
        sig[0] ^= 0x80;
        assert!(!scheme().verify(&pk, b"msg", &sig));
    }

    #[test]
    fn marshal_round_trip() {
        let (pk, sk) = scheme().derive_key_pair(&[2u8; SEED_SIZE]).unwrap();
        assert_eq!(scheme().public_key_from_bytes(pk.as_bytes()).unwrap(), pk);
        assert_eq!(scheme().private_key_from_bytes(sk.as_bytes()).unwrap(), sk);
    }
}
