//! Ed25519 (RFC 8032)
//!
//! The serialized private key is the 32-byte RFC 8032 seed, and
//! `derive_key_pair` consumes that seed directly: expansion to the signing
//! scalar happens inside the primitive, which keeps standard Ed25519
//! known-answer vectors applicable.

use ed25519_dalek::{Signer, SigningKey, Verifier, VerifyingKey};
use zeroize::Zeroize;

use pqmux_api::sign::{PrivateKey, PublicKey, Signature as SignatureScheme};
use pqmux_api::{Error, Result};

/// Size of a serialized public key in bytes
pub const PUBLIC_KEY_SIZE: usize = 32;
/// Size of a serialized private key in bytes (RFC 8032 seed)
pub const PRIVATE_KEY_SIZE: usize = 32;
/// Size of a signature in bytes
pub const SIGNATURE_SIZE: usize = 64;
/// Keypair entropy requirement in bytes
pub const SEED_SIZE: usize = 32;

/// Ed25519 signature scheme
pub struct Ed25519;

static SCHEME: Ed25519 = Ed25519;

/// Returns the process-wide Ed25519 scheme descriptor.
pub fn scheme() -> &'static dyn SignatureScheme {
    &SCHEME
}

impl Ed25519 {
    fn signing_key(&self, private_key: &PrivateKey) -> Result<SigningKey> {
        let mut bytes: [u8; PRIVATE_KEY_SIZE] = private_key
            .as_bytes()
            .try_into()
            .map_err(|_| Error::invalid_key_len("ed25519", PRIVATE_KEY_SIZE, private_key.as_bytes().len()))?;
        let signing = SigningKey::from_bytes(&bytes);
        bytes.zeroize();
        Ok(signing)
    }
}

impl SignatureScheme for Ed25519 {
    fn name(&self) -> &str {
        "ed25519"
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
                context: "ed25519 derive_key_pair",
                expected: SEED_SIZE,
                actual: seed.len(),
            });
        }

        let mut bytes = [0u8; SEED_SIZE];
        bytes.copy_from_slice(seed);
        let signing = SigningKey::from_bytes(&bytes);
        bytes.zeroize();
        let verifying = signing.verifying_key();

        Ok((
            PublicKey::new(self, verifying.to_bytes().to_vec())?,
            PrivateKey::new(self, signing.to_bytes().to_vec())?,
        ))
    }

    fn sign(&'static self, private_key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
        private_key.expect_scheme(self, "ed25519 sign")?;
        let signing = self.signing_key(private_key)?;
        Ok(signing.sign(message).to_bytes().to_vec())
    }

    fn verify(&'static self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        if public_key.scheme().name() != self.name() {
            return false;
        }
        let pk_bytes: [u8; PUBLIC_KEY_SIZE] = match public_key.as_bytes().try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let verifying = match VerifyingKey::from_bytes(&pk_bytes) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let sig_bytes: [u8; SIGNATURE_SIZE] = match signature.try_into() {
            Ok(bytes) => bytes,
            Err(_) => return false,
        };
        let sig = ed25519_dalek::Signature::from_bytes(&sig_bytes);
        verifying.verify(message, &sig).is_ok()
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != PUBLIC_KEY_SIZE {
            return Err(Error::invalid_key_len(
                "ed25519 public key",
                PUBLIC_KEY_SIZE,
                bytes.len(),
            ));
        }
        let mut arr = [0u8; PUBLIC_KEY_SIZE];
        arr.copy_from_slice(bytes);
        VerifyingKey::from_bytes(&arr)
            .map_err(|e| Error::invalid_key("ed25519 public key", e.to_string()))?;
        PublicKey::new(self, bytes.to_vec())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        if bytes.len() != PRIVATE_KEY_SIZE {
            return Err(Error::invalid_key_len(
                "ed25519 private key",
                PRIVATE_KEY_SIZE,
                bytes.len(),
            ));
        }
        PrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::OsRng;

    #[test]
    fn zero_seed_produces_known_public_key() {
        let (pk, _) = scheme().derive_key_pair(&[0u8; SEED_SIZE]).unwrap();
        let expected =
            hex::decode("3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29")
                .unwrap();
        assert_eq!(pk.as_bytes(), expected.as_slice());
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (pk, sk) = scheme().derive_key_pair(&[0u8; SEED_SIZE]).unwrap();
        let sig = scheme().sign(&sk, b"hello").unwrap();
        assert_eq!(sig.len(), SIGNATURE_SIZE);
        assert!(scheme().verify(&pk, b"hello", &sig));

        let mut tampered = sig.clone();
        *tampered.last_mut().unwrap() ^= 0x01;
        assert!(!scheme().verify(&pk, b"hello", &tampered));
    }

    #[test]
    fn verify_rejects_wrong_message_and_length() {
        let (pk, sk) = scheme().generate_key_pair(&mut OsRng).unwrap();
        let sig = scheme().sign(&sk, b"message").unwrap();
        assert!(!scheme().verify(&pk, b"other message", &sig));
        assert!(!scheme().verify(&pk, b"message", &sig[..SIGNATURE_SIZE - 1]));
    }

    #[test]
    fn rejects_wrong_key_lengths() {
        assert!(matches!(
            scheme().public_key_from_bytes(&[0u8; PUBLIC_KEY_SIZE + 1]),
            Err(Error::InvalidKey { .. })
        ));
        assert!(matches!(
            scheme().private_key_from_bytes(&[0u8; PRIVATE_KEY_SIZE - 1]),
            Err(Error::InvalidKey { .. })
        ));
    }
}
