//! Blake2b seed expansion
//!
//! Deterministic key derivation and deterministic encapsulation expand a
//! single caller-supplied seed into however many bytes the underlying
//! primitive's keypair generator consumes. Expanding through a single stream
//! keyed on the whole seed means a biased subseed cannot selectively bias
//! one consumer of the stream.
//!
//! The `blake2` crate offers no extendable-output type, so the stream is
//! Blake2b-512 in counter mode: block `i` is
//! `Blake2b512(domain ∥ le64(i) ∥ seed)`.

use blake2::{Blake2b512, Digest};
use rand_core::{CryptoRng, RngCore};
use zeroize::Zeroizing;

const BLOCK_SIZE: usize = 64;
const DOMAIN: &[u8] = b"pqmux-seed-expand-v1";

/// Deterministic byte stream expanded from a seed.
///
/// Implements [`RngCore`] and [`CryptoRng`] so it can be fed directly to a
/// primitive's keypair or encapsulation routine in place of an OS RNG.
pub struct SeedXof {
    seed: Zeroizing<Vec<u8>>,
    counter: u64,
    block: Zeroizing<[u8; BLOCK_SIZE]>,
    used: usize,
}

impl SeedXof {
    pub fn new(seed: &[u8]) -> Self {
        Self {
            seed: Zeroizing::new(seed.to_vec()),
            counter: 0,
            block: Zeroizing::new([0u8; BLOCK_SIZE]),
            used: BLOCK_SIZE,
        }
    }

    fn refill(&mut self) {
        let mut hash = Blake2b512::new();
        hash.update(DOMAIN);
        hash.update(self.counter.to_le_bytes());
        hash.update(&self.seed);
        self.block.copy_from_slice(hash.finalize().as_slice());
        self.counter += 1;
        self.used = 0;
    }

    /// Fills `out` with the next bytes of the stream.
    pub fn fill(&mut self, out: &mut [u8]) {
        let mut filled = 0;
        while filled < out.len() {
            if self.used == BLOCK_SIZE {
                self.refill();
            }
            let take = (BLOCK_SIZE - self.used).min(out.len() - filled);
            out[filled..filled + take].copy_from_slice(&self.block[self.used..self.used + take]);
            self.used += take;
            filled += take;
        }
    }
}

impl RngCore for SeedXof {
    fn next_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        self.fill(&mut buf);
        u32::from_le_bytes(buf)
    }

    fn next_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        self.fill(&mut buf);
        u64::from_le_bytes(buf)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        self.fill(dest);
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand_core::Error> {
        self.fill(dest);
        Ok(())
    }
}

impl CryptoRng for SeedXof {}

/// Expands `seed` into `n` deterministic bytes.
pub fn expand(seed: &[u8], n: usize) -> Zeroizing<Vec<u8>> {
    let mut out = Zeroizing::new(vec![0u8; n]);
    SeedXof::new(seed).fill(&mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expansion_is_deterministic() {
        assert_eq!(&expand(b"seed", 96)[..], &expand(b"seed", 96)[..]);
    }

    #[test]
    fn distinct_seeds_give_distinct_streams() {
        assert_ne!(&expand(b"seed-a", 64)[..], &expand(b"seed-b", 64)[..]);
    }

    #[test]
    fn chunked_reads_match_one_shot_reads() {
        let mut xof = SeedXof::new(b"chunked");
        let mut first = [0u8; 40];
        let mut second = [0u8; 60];
        xof.fill(&mut first);
        xof.fill(&mut second);

        let whole = expand(b"chunked", 100);
        assert_eq!(&whole[..40], &first[..]);
        assert_eq!(&whole[40..], &second[..]);
    }

    #[test]
    fn prefix_of_longer_expansion_matches() {
        let short = expand(b"prefix", 32);
        let long = expand(b"prefix", 200);
        assert_eq!(&long[..32], &short[..]);
    }
}
