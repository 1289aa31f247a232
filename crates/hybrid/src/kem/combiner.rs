//! N-ary split-PRF KEM combiner

use zeroize::Zeroizing;

use pqmux_api::kem::{Ciphertext, Kem, PrivateKey, PublicKey};
use pqmux_api::{prf, util, Error, Result, SharedSecret};

/// A KEM composed of N component KEMs in a fixed order.
///
/// Keys and ciphertexts are the ordered concatenation of the component
/// encodings with no framing. The shared secret is
/// `⊕ᵢ Blake2b256(ssᵢ ∥ CT)` where `CT` is the full concatenated
/// ciphertext: every PRF branch binds to the complete transcript, so an
/// adversary who breaks all but one component still cannot move the
/// surviving branch to a different ciphertext. Component order is part of
/// the scheme identity; reordering produces an incompatible scheme.
pub struct Combiner {
    name: String,
    schemes: Vec<&'static dyn Kem>,
}

impl Combiner {
    /// Size of the combined shared secret in bytes
    pub const SHARED_SECRET_SIZE: usize = prf::PRF_OUTPUT_SIZE;

    /// Builds a combiner over `schemes`, in order.
    ///
    /// # Panics
    ///
    /// Panics if `schemes` is empty.
    pub fn new(name: impl Into<String>, schemes: Vec<&'static dyn Kem>) -> Self {
        assert!(!schemes.is_empty(), "combiner requires at least one component");
        Self {
            name: name.into(),
            schemes,
        }
    }

    fn sum(&self, size: impl Fn(&'static dyn Kem) -> usize) -> usize {
        self.schemes.iter().map(|&s| size(s)).sum()
    }

    fn sizes(&self, size: impl Fn(&'static dyn Kem) -> usize) -> Vec<usize> {
        self.schemes.iter().map(|&s| size(s)).collect()
    }

    /// Mixes the per-component secrets with the full ciphertext:
    /// `⊕ᵢ Blake2b256(ssᵢ ∥ ct)`.
    fn split_prf(&self, secrets: &[SharedSecret], ciphertext: &[u8]) -> SharedSecret {
        let mut acc = [0u8; Self::SHARED_SECRET_SIZE];
        for secret in secrets {
            let branch = prf::prf256(&[secret.as_bytes(), ciphertext]);
            prf::xor_into(&mut acc, &branch);
        }
        SharedSecret::new(acc.to_vec())
    }
}

impl Kem for Combiner {
    fn name(&self) -> &str {
        &self.name
    }

    fn public_key_size(&self) -> usize {
        self.sum(|s| s.public_key_size())
    }

    fn private_key_size(&self) -> usize {
        self.sum(|s| s.private_key_size())
    }

    fn ciphertext_size(&self) -> usize {
        self.sum(|s| s.ciphertext_size())
    }

    fn shared_secret_size(&self) -> usize {
        Self::SHARED_SECRET_SIZE
    }

    fn seed_size(&self) -> usize {
        self.sum(|s| s.seed_size())
    }

    fn encapsulation_seed_size(&self) -> usize {
        self.sum(|s| s.encapsulation_seed_size())
    }

    fn derive_key_pair(&'static self, seed: &[u8]) -> Result<(PublicKey, PrivateKey)> {
        if seed.len() != self.seed_size() {
            return Err(Error::InvalidSeed {
                context: "combiner derive_key_pair",
                expected: self.seed_size(),
                actual: seed.len(),
            });
        }

        let frames = util::partition(seed, &self.sizes(|s| s.seed_size()))
            .ok_or(Error::InvalidSeed {
                context: "combiner derive_key_pair",
                expected: self.seed_size(),
                actual: seed.len(),
            })?;

        let mut public = Vec::with_capacity(self.public_key_size());
        let mut private = Zeroizing::new(Vec::with_capacity(self.private_key_size()));
        for (&scheme, frame) in self.schemes.iter().zip(frames) {
            let (pk, sk) = scheme.derive_key_pair(frame)?;
            public.extend_from_slice(pk.as_bytes());
            private.extend_from_slice(sk.as_bytes());
        }

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
        public_key.expect_scheme(self, "combiner encapsulate")?;
        if seed.len() != self.encapsulation_seed_size() {
            return Err(Error::InvalidSeed {
                context: "combiner encapsulate",
                expected: self.encapsulation_seed_size(),
                actual: seed.len(),
            });
        }

        let seed_frames = util::partition(seed, &self.sizes(|s| s.encapsulation_seed_size()))
            .ok_or(Error::InvalidSeed {
                context: "combiner encapsulate",
                expected: self.encapsulation_seed_size(),
                actual: seed.len(),
            })?;
        let key_frames = util::partition(public_key.as_bytes(), &self.sizes(|s| s.public_key_size()))
            .ok_or_else(|| {
                Error::invalid_key_len(
                    "combiner public key",
                    self.public_key_size(),
                    public_key.as_bytes().len(),
                )
            })?;

        let mut ciphertext = Vec::with_capacity(self.ciphertext_size());
        let mut secrets = Vec::with_capacity(self.schemes.len());
        for ((&scheme, key_frame), seed_frame) in
            self.schemes.iter().zip(key_frames).zip(seed_frames)
        {
            let component_pk = scheme.public_key_from_bytes(key_frame)?;
            let (ct, ss) = scheme.encapsulate_deterministically(&component_pk, seed_frame)?;
            ciphertext.extend_from_slice(&ct);
            secrets.push(ss);
        }

        let shared = self.split_prf(&secrets, &ciphertext);
        Ok((ciphertext, shared))
    }

    fn decapsulate(
        &'static self,
        private_key: &PrivateKey,
        ciphertext: &[u8],
    ) -> Result<SharedSecret> {
        private_key.expect_scheme(self, "combiner decapsulate")?;
        if ciphertext.len() != self.ciphertext_size() {
            return Err(Error::InvalidCiphertext {
                context: "combiner decapsulate",
                expected: self.ciphertext_size(),
                actual: ciphertext.len(),
            });
        }

        let key_frames =
            util::partition(private_key.as_bytes(), &self.sizes(|s| s.private_key_size()))
                .ok_or_else(|| {
                    Error::invalid_key_len(
                        "combiner private key",
                        self.private_key_size(),
                        private_key.as_bytes().len(),
                    )
                })?;
        let ct_frames = util::partition(ciphertext, &self.sizes(|s| s.ciphertext_size()))
            .ok_or(Error::InvalidCiphertext {
                context: "combiner decapsulate",
                expected: self.ciphertext_size(),
                actual: ciphertext.len(),
            })?;

        let mut secrets = Vec::with_capacity(self.schemes.len());
        for ((&scheme, key_frame), ct_frame) in
            self.schemes.iter().zip(key_frames).zip(ct_frames)
        {
            let component_sk = scheme.private_key_from_bytes(key_frame)?;
            secrets.push(scheme.decapsulate(&component_sk, ct_frame)?);
        }

        Ok(self.split_prf(&secrets, ciphertext))
    }

    fn public_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PublicKey> {
        let frames = util::partition(bytes, &self.sizes(|s| s.public_key_size()))
            .ok_or_else(|| {
                Error::invalid_key_len("combiner public key", self.public_key_size(), bytes.len())
            })?;
        for (&scheme, frame) in self.schemes.iter().zip(frames) {
            scheme.public_key_from_bytes(frame)?;
        }
        PublicKey::new(self, bytes.to_vec())
    }

    fn private_key_from_bytes(&'static self, bytes: &[u8]) -> Result<PrivateKey> {
        let frames = util::partition(bytes, &self.sizes(|s| s.private_key_size()))
            .ok_or_else(|| {
                Error::invalid_key_len("combiner private key", self.private_key_size(), bytes.len())
            })?;
        for (&scheme, frame) in self.schemes.iter().zip(frames) {
            scheme.private_key_from_bytes(frame)?;
        }
        PrivateKey::new(self, bytes.to_vec())
    }
}
