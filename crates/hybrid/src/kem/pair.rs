//! Legacy two-KEM hybrid builder

use zeroize::Zeroizing;

use pqmux_api::kem::{Ciphertext, Kem, PrivateKey, PublicKey};
use pqmux_api::{prf, Error, Result, SharedSecret};

/// A KEM composed of exactly two component KEMs.
///
/// Layout and secret derivation are identical to a two-component
/// [`Combiner`](super::Combiner): concatenated keys and ciphertexts, shared
/// secret `Blake2b256(ss₁ ∥ ct) ⊕ Blake2b256(ss₂ ∥ ct)` over the full
/// ciphertext.
#[deprecated(note = "use the n-ary Combiner; this builder is retained for compatibility")]
pub struct PairHybrid {
    name: String,
    first: &'static dyn Kem,
    second: &'static dyn Kem,
}

#[allow(deprecated)]
impl PairHybrid {
    /// Size of the combined shared secret in bytes
    pub const SHARED_SECRET_SIZE: usize = prf::PRF_OUTPUT_SIZE;

    /// Builds the hybrid of `first` and `second`, in that order.
    pub fn new(name: impl Into<String>, first: &'static dyn Kem, second: &'static dyn Kem) -> Self {
        Self {
            name: name.into(),
            first,
            second,
        }
    }

    fn split_prf(
        &self,
        first_secret: &SharedSecret,
        second_secret: &SharedSecret,
        ciphertext: &[u8],
    ) -> SharedSecret {
        let mut acc = prf::prf256(&[first_secret.as_bytes(), ciphertext]);
        let branch = prf::prf256(&[second_secret.as_bytes(), ciphertext]);
        prf::xor_into(&mut acc, &branch);
        SharedSecret::new(acc.to_vec())
    }
}

#[allow(deprecated)]
impl Kem for PairHybrid {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.first.public_key_size() + self.second.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.first.private_key_size() + self.second.private_key_size()
    }

    fn ciphertext_size(&self) -> usize {
        self.first.ciphertext_size() + self.second.ciphertext_size()
    }

    fn shared_secret_size(&self) -> usize {
        Self::SHARED_SECRET_SIZE
    }

    fn seed_size(&self) -> usize {
        self.first.seed_size() + self.second.seed_size()
    }

    fn encapsulation_seed_size(&self) -> usize {
        self.first.encapsulation_seed_size() + self.second.encapsulation_seed_size()
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        if seed.len() != self.seed_size() {
            return Err(Error::InvalidSeed {
                context: "pair hybrid derive_key_pair",
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

    fn encapsulate_deterministically(
        &'static self,
        public_key: &PublicKey,
        seed: &[u8],
    ) -> Result<(Ciphertext, SharedSecret)> {
        public_key.expect_scheme(self, "pair hybrid encapsulate")?;
        if seed.len() != self.encapsulation_seed_size() {
            return Err(Error::InvalidSeed {
                context: "pair hybrid encapsulate",
                expected: self.encapsulation_seed_size(),
                actual: seed.len(),
            });
        }

        let (first_seed, second_seed) = seed.split_at(self.first.encapsulation_seed_size());
        let (first_key, second_key) = public_key.as_bytes().split_at(self.first.public_key_size());

        let pk1 = self.first.public_key_from_bytes(first_key)?;
        let pk2 = self.second.public_key_from_bytes(second_key)?;

        let (ct1, ss1) = self.first.encapsulate_deterministically(&pk1, first_seed)?;
        let (ct2, ss2) = self.second.encapsulate_deterministically(&pk2, second_seed)?;

        let ciphertext = [ct1.as_slice(), ct2.as_slice()].concat();
        let shared = self.split_prf(&ss1, &ss2, &ciphertext);
        Ok((ciphertext, shared))
    }

    fn decapsulate(
        &'static self,
        private_key: &PrivateKey,
        ciphertext: &[u8],
    ) -> Result<SharedSecret> {
        private_key.expect_scheme(self, "pair hybrid decapsulate")?;
        if ciphertext.len() != self.ciphertext_size() {
            return Err(Error::InvalidCiphertext {
                context: "pair hybrid decapsulate",
                expected: self.ciphertext_size(),
                actual: ciphertext.len(),
            });
        }

        let (first_key, second_key) = private_key.as_bytes().split_at(self.first.private_key_size());
        let (first_ct, second_ct) = ciphertext.split_at(self.first.ciphertext_size());

        let sk1 = self.first.private_key_from_bytes(first_key)?;
        let sk2 = self.second.private_key_from_bytes(second_key)?;

        let ss1 = self.first.decapsulate(&sk1, first_ct)?;
        let ss2 = self.second.decapsulate(&sk2, second_ct)?;

        Ok(self.split_prf(&ss1, &ss2, ciphertext))
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        if bytes.len() != self.public_key_size() {
            return Err(Error::invalid_key_len(
                "pair hybrid public key",
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
                "pair hybrid private key",
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
