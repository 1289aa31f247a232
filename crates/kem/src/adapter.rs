//! NIKE-to-KEM adapter (hashed ElGamal)
//!
//! Builds an IND-CCA2 KEM from any [`Nike`]: the ciphertext is an ephemeral
//! NIKE public key and the shared secret is
//! `Blake2b256(dh ∥ pk_recipient ∥ pk_ephemeral)`. Hashing both the
//! recipient and the ephemeral key alongside the raw Diffie-Hellman output
//! binds the secret to the full exchange; the recipient-then-ephemeral
//! ordering must match on both sides.

use pqmux_api::kem::{Ciphertext, Kem, PrivateKey, PublicKey};
use pqmux_api::nike::Nike;
use pqmux_api::{prf, Error, Result, SharedSecret};

/// Size of the derived shared secret in bytes
pub const SHARED_SECRET_SIZE: usize = prf::PRF_OUTPUT_SIZE;

/// KEM built from a NIKE via the hashed-ElGamal construction.
///
/// Keys are byte-identical to the underlying NIKE keys and the scheme
/// carries the NIKE's name.
pub struct NikeAdapter {
    nike: &'static dyn Nike,
}

impl NikeAdapter {
    /// Builds the KEM over `nike`.
    pub fn from_nike(nike: &'static dyn Nike) -> Self {
        Self { nike }
    }
}

impl Kem for NikeAdapter {
    fn name(&self) -> &str {
        self.nike.name()
    }

    fn public_key_size(&self) -> usize {
        self.nike.public_key_size()
    }

    fn private_key_size(&self) -> usize {
        self.nike.private_key_size()
    }

    fn ciphertext_size(&self) -> usize {
        self.nike.public_key_size()
    }

    fn shared_secret_size(&self) -> usize {
        SHARED_SECRET_SIZE
    }

    fn seed_size(&self) -> usize {
        self.nike.seed_size()
    }

    fn encapsulation_seed_size(&self) -> usize {
        self.nike.seed_size()
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        let (pk, sk) = self.nike.derive_key_pair(seed)?;
        Ok((
            PublicKey::new(self, pk.to_bytes())?,
            PrivateKey::new(self, sk.to_bytes())?,
        ))
    }

    fn encapsulate_deterministically(
        &'static self,
        public_key: &PublicKey,
        seed: &[u8],
    ) -> Result<(Ciphertext, SharedSecret)> {
        public_key.expect_scheme(self, "adapter encapsulate")?;
        if seed.len() != self.encapsulation_seed_size() {
            return Err(Error::InvalidSeed {
                context: "adapter encapsulate",
                expected: self.encapsulation_seed_size(),
                actual: seed.len(),
            });
        }

        let recipient = self.nike.public_key_from_bytes(public_key.as_bytes())?;
        let (ephemeral_pk, ephemeral_sk) = self.nike.derive_key_pair(seed)?;
        let raw = self.nike.derive_secret(&ephemeral_sk, &recipient)?;

        let ss = prf::prf256(&[raw.as_bytes(), recipient.as_bytes(), ephemeral_pk.as_bytes()]);
        Ok((ephemeral_pk.to_bytes(), SharedSecret::new(ss.to_vec())))
    }

    fn decapsulate(
        &'static self,
        private_key: &PrivateKey,
        ciphertext: &[u8],
    ) -> Result<SharedSecret> {
        private_key.expect_scheme(self, "adapter decapsulate")?;
        if ciphertext.len() != self.ciphertext_size() {
            return Err(Error::InvalidCiphertext {
                context: "adapter decapsulate",
                expected: self.ciphertext_size(),
                actual: ciphertext.len(),
            });
        }

        let nike_sk = self.nike.private_key_from_bytes(private_key.as_bytes())?;
        let ephemeral_pk = self.nike.public_key_from_bytes(ciphertext)?;
        let raw = self.nike.derive_secret(&nike_sk, &ephemeral_pk)?;
        let recipient_pk = self.nike.derive_public_key(&nike_sk)?;

        let ss = prf::prf256(&[
            raw.as_bytes(),
            recipient_pk.as_bytes(),
            ephemeral_pk.as_bytes(),
        ]);
        Ok(SharedSecret::new(ss.to_vec()))
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        // Delegate structural validation to the NIKE, then rewrap.
        let pk = self.nike.public_key_from_bytes(bytes)?;
        PublicKey::new(self, pk.to_bytes())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        let sk = self.nike.private_key_from_bytes(bytes)?;
        PrivateKey::new(self, sk.to_bytes())
    }
}
