//! Hybrid signature scheme
//!
//! Composes two signature schemes by signing the same message with both and
//! concatenating the results. Verification is AND: forging the hybrid
//! requires forging both components, so the composition stays EUF-CMA as
//! long as either component does.

use zeroize::Zeroizing;

use pqmux_api::sign::{PrivateKey, PublicKey, Signature};
use pqmux_api::{Error, Result};

/// A signature scheme composed of two component schemes in a fixed order.
///
/// Keys and signatures are the ordered concatenation of the component
/// encodings with no framing.
pub struct Hybrid {
    name: String,
    first: &'static dyn Signature,
    second: &'static dyn Signature,
}

impl Hybrid {
    /// Builds the hybrid of `first` and `second`, in that order.
    pub fn new(
        name: impl Into<String>,
        first: &'static dyn Signature,
        second: &'static dyn Signature,
    ) -> Self {
        Self {
            name: name.into(),
            first,
            second,
        }
    }
}

impl Signature for Hybrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.first.public_key_size() + self.second.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.first.private_key_size() + self.second.private_key_size()
    }

    fn signature_size(&self) -> usize {
        self.first.signature_size() + self.second.signature_size()
    }

    fn seed_size(&self) -> usize {
        self.first.seed_size() + self.second.seed_size()
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        if seed.len() != self.seed_size() {
            return Err(Error::InvalidSeed {
                context: "hybrid sign derive_key_pair",
                expected: self.seed_size(),
                actual: seed.len(),
            });
        }

        let (first_seed, second_seed) = seed.split_at(self.first.seed_size());
        let (pk1, sk1) = self.first.derive_key_pair(first_seed)?;
        let (pk2, sk2) = self.second.derive_key_pair(second_seed)?;

        let public = [pk1.as_bytes(), pk2.as_bytes()].concat();
        let private = Zeroizing::new([sk1.as_bytes(), sk2.as_bytes()].concat());

        Ok((
            PublicKey::new(self, public)?,
            PrivateKey::new(self, private.to_vec())?,
        ))
    }

    fn sign(&'static self, private_key: &PrivateKey, message: &[u8]) -> Result<Vec<u8>> {
        private_key.expect_scheme(self, "hybrid sign")?;

        let (first_key, second_key) = private_key.as_bytes().split_at(self.first.private_key_size());
        let sk1 = self.first.private_key_from_bytes(first_key)?;
        let sk2 = self.second.private_key_from_bytes(second_key)?;

        let sig1 = self.first.sign(&sk1, message)?;
        let sig2 = self.second.sign(&sk2, message)?;
        Ok([sig1, sig2].concat())
    }

    fn verify(&'static self, public_key: &PublicKey, message: &[u8], signature: &[u8]) -> bool {
        if public_key.scheme().name() != self.name() {
            return false;
        }
        if signature.len() != self.signature_size() {
            return false;
        }

        let (first_key, second_key) = public_key.as_bytes().split_at(self.first.public_key_size());
        let pk1 = match self.first.public_key_from_bytes(first_key) {
            Ok(key) => key,
            Err(_) => return false,
        };
        let pk2 = match self.second.public_key_from_bytes(second_key) {
            Ok(key) => key,
            Err(_) => return false,
        };

        let (sig1, sig2) = signature.split_at(self.first.signature_size());
        self.first.verify(&pk1, message, sig1) && self.second.verify(&pk2, message, sig2)
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != self.public_key_size() {
            return Err(Error::invalid_key_len(
                "hybrid sign public key",
                self.public_key_size(),
                bytes.len(),
            ));
        }
        let (first, second) = bytes.split_at(self.first.public_key_size());
        self.first.public_key_from_bytes(first)?;
        self.second.public_key_from_bytes(second)?;
        PublicKey::new(self, bytes.to_vec())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        if bytes.len() != self.private_key_size() {
            return Err(Error::invalid_key_len(
                "hybrid sign private key",
                self.private_key_size(),
                bytes.len(),
            ));
        }
        let (first, second) = bytes.split_at(self.first.private_key_size());
        self.first.private_key_from_bytes(first)?;
        self.second.private_key_from_bytes(second)?;
        PrivateKey::new(self, bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::LazyLock;

    use rand::rngs::OsRng;

    use pqmux_api::sign::Signature;
    use pqmux_sign::{ed25519, mldsa44};

    use super::Hybrid;

    static HYBRID: LazyLock<Hybrid> =
        LazyLock::new(|| Hybrid::new("ed25519-mldsa44", ed25519::scheme(), mldsa44::scheme()));

    fn hybrid() -> &'static dyn Signature {
        &*HYBRID
    }

    #[test]
    fn sizes_are_component_sums() {
        assert_eq!(hybrid().public_key_size(), 32 + 1312);
        assert_eq!(hybrid().private_key_size(), 32 + 2560);
        assert_eq!(hybrid().signature_size(), 64 + 2420);
    }

    #[test]
    fn sign_and_verify_round_trip() {
        let (pk, sk) = hybrid().generate_key_pair(&mut OsRng).unwrap();
        let sig = hybrid().sign(&sk, b"hybrid message").unwrap();
        assert_eq!(sig.len(), hybrid().signature_size());
        assert!(hybrid().verify(&pk, b"hybrid message", &sig));
        assert!(!hybrid().verify(&pk, b"another message", &sig));
    }

    #[test]
    fn tampering_either_component_breaks_verification() {
        let (pk, sk) = hybrid().derive_key_pair(&[7u8; 64]).unwrap();
        let sig = hybrid().sign(&sk, b"msg").unwrap();

        let mut first_tampered = sig.clone();
        first_tampered[0] ^= 0x01;
        assert!(!hybrid().verify(&pk, b"msg", &first_tampered));

        let mut second_tampered = sig.clone();
        let last = second_tampered.len() - 1;
        second_tampered[last] ^= 0x01;
        assert!(!hybrid().verify(&pk, b"msg", &second_tampered));
    }

    #[test]
    fn valid_first_half_with_random_second_half_fails() {
        let (pk, sk) = hybrid().derive_key_pair(&[8u8; 64]).unwrap();
        let sig = hybrid().sign(&sk, b"msg").unwrap();

        let mut forged = sig.clone();
        for byte in forged[ed25519::SIGNATURE_SIZE..].iter_mut() {
            *byte = 0xA5;
        }
        assert!(!hybrid().verify(&pk, b"msg", &forged));
    }

    #[test]
    fn wrong_length_signature_fails_fast() {
        let (pk, sk) = hybrid().derive_key_pair(&[9u8; 64]).unwrap();
        let sig = hybrid().sign(&sk, b"msg").unwrap();
        assert!(!hybrid().verify(&pk, b"msg", &sig[..sig.len() - 1]));
    }

    #[test]
    fn marshal_round_trip() {
        let (pk, sk) = hybrid().derive_key_pair(&[10u8; 64]).unwrap();
        assert_eq!(hybrid().public_key_from_bytes(pk.as_bytes()).unwrap(), pk);
        assert_eq!(hybrid().private_key_from_bytes(sk.as_bytes()).unwrap(), sk);
    }
}
