//! Hybrid NIKE scheme
//!
//! Composes two NIKEs. The derived secret hashes both component secrets
//! together with both parties' composite public keys; the two public keys
//! enter the PRF in lexicographic byte order so that both sides compute the
//! same transcript without knowing who is "first".

use zeroize::Zeroizing;

use pqmux_api::nike::{Nike, PrivateKey, PublicKey};
use pqmux_api::{prf, Error, Result, SharedSecret};

/// A NIKE composed of two component schemes in a fixed order.
///
/// Keys are the ordered concatenation of the component encodings. The
/// shared secret is `Blake2b256(ss₁ ∥ ss₂ ∥ A ∥ B)` where `(A, B)` are the
/// two composite public keys sorted lexicographically; its length is 32
/// regardless of the component output sizes.
pub struct Hybrid {
    name: String,
    first: &'static dyn Nike,
    second: &'static dyn Nike,
}

impl Hybrid {
    /// Size of the derived shared secret in bytes
    pub const SHARED_SECRET_SIZE: usize = prf::PRF_OUTPUT_SIZE;

    /// Builds the hybrid of `first` and `second`, in that order.
    pub fn new(
        name: impl Into<String>,
        first: &'static dyn Nike,
        second: &'static dyn Nike,
    ) -> Self {
        Self {
            name: name.into(),
            first,
            second,
        }
    }
}

impl Nike for Hybrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.first.public_key_size() + self.second.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.first.private_key_size() + self.second.private_key_size()
    }

    fn shared_secret_size(&self) -> usize {
        Self::SHARED_SECRET_SIZE
    }

    fn seed_size(&self) -> usize {
        self.first.seed_size() + self.second.seed_size()
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        if seed.len() != self.seed_size() {
            return Err(Error::InvalidSeed {
                context: "hybrid nike derive_key_pair",
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

    fn derive_public_key(&'static self, private_key: &PrivateKey) -> Result<PublicKey> {
        private_key.expect_scheme(self, "hybrid nike derive_public_key")?;

        let (first_key, second_key) = private_key.as_bytes().split_at(self.first.private_key_size());
        let sk1 = self.first.private_key_from_bytes(first_key)?;
        let sk2 = self.second.private_key_from_bytes(second_key)?;

        let pk1 = self.first.derive_public_key(&sk1)?;
        let pk2 = self.second.derive_public_key(&sk2)?;
        PublicKey::new(self, [pk1.as_bytes(), pk2.as_bytes()].concat())
    }

    fn derive_secret(
        &'static self,
        private_key: &PrivateKey,
        public_key: &PublicKey,
    ) -> Result<SharedSecret> {
        private_key.expect_scheme(self, "hybrid nike derive_secret")?;
        public_key.expect_scheme(self, "hybrid nike derive_secret")?;

        let (first_sk, second_sk) = private_key.as_bytes().split_at(self.first.private_key_size());
        let (first_pk, second_pk) = public_key.as_bytes().split_at(self.first.public_key_size());

        let sk1 = self.first.private_key_from_bytes(first_sk)?;
        let sk2 = self.second.private_key_from_bytes(second_sk)?;
        let pk1 = self.first.public_key_from_bytes(first_pk)?;
        let pk2 = self.second.public_key_from_bytes(second_pk)?;

        let ss1 = self.first.derive_secret(&sk1, &pk1)?;
        let ss2 = self.second.derive_secret(&sk2, &pk2)?;

        let local = self.derive_public_key(private_key)?;
        let (a, b) = if local.as_bytes() <= public_key.as_bytes() {
            (local.to_bytes(), public_key.to_bytes())
        } else {
            (public_key.to_bytes(), local.to_bytes())
        };

        let out = prf::prf256(&[ss1.as_bytes(), ss2.as_bytes(), &a, &b]);
        Ok(SharedSecret::new(out.to_vec()))
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != self.public_key_size() {
            return Err(Error::invalid_key_len(
                "hybrid nike public key",
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
                "hybrid nike private key",
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

    use pqmux_api::nike::Nike;
    use pqmux_nike::{secp256k1, x25519};

    use super::Hybrid;

    static HYBRID: LazyLock<Hybrid> = LazyLock::new(|| {
        Hybrid::new("x25519-secp256k1", x25519::scheme(), secp256k1::scheme())
    });

    fn hybrid() -> &'static dyn Nike {
        &*HYBRID
    }

    #[test]
    fn sizes_are_component_sums() {
        assert_eq!(hybrid().public_key_size(), 32 + 33);
        assert_eq!(hybrid().private_key_size(), 32 + 32);
        assert_eq!(hybrid().shared_secret_size(), 32);
    }

    #[test]
    fn derive_secret_is_symmetric() {
        // Lexicographic ordering of the transcript makes both directions
        // agree even though neither party knows who is "first".
        let mut rng = OsRng;
        let (pk_a, sk_a) = hybrid().generate_key_pair(&mut rng).unwrap();
        let (pk_b, sk_b) = hybrid().generate_key_pair(&mut rng).unwrap();

        let ss_a = hybrid().derive_secret(&sk_a, &pk_b).unwrap();
        let ss_b = hybrid().derive_secret(&sk_b, &pk_a).unwrap();
        assert_eq!(ss_a, ss_b);
        assert_eq!(ss_a.len(), 32);
    }

    #[test]
    fn secret_depends_on_both_components() {
        let (pk_a, sk_a) = hybrid().derive_key_pair(&[1u8; 64]).unwrap();
        let (pk_b, _) = hybrid().derive_key_pair(&[2u8; 64]).unwrap();
        let (pk_c, _) = hybrid().derive_key_pair(&[3u8; 64]).unwrap();

        let ss_ab = hybrid().derive_secret(&sk_a, &pk_b).unwrap();
        let ss_ac = hybrid().derive_secret(&sk_a, &pk_c).unwrap();
        assert_ne!(ss_ab, ss_ac);
        let _ = pk_a;
    }

    #[test]
    fn derive_public_key_matches_derivation() {
        let (pk, sk) = hybrid().derive_key_pair(&[4u8; 64]).unwrap();
        assert_eq!(hybrid().derive_public_key(&sk).unwrap(), pk);
    }

    #[test]
    fn marshal_round_trip() {
        let (pk, sk) = hybrid().derive_key_pair(&[5u8; 64]).unwrap();
        assert_eq!(hybrid().public_key_from_bytes(pk.as_bytes()).unwrap(), pk);
        assert_eq!(hybrid().private_key_from_bytes(sk.as_bytes()).unwrap(), sk);
    }
}
