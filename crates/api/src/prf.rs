//! Blake2b-256 PRF used by the hybrid constructions
//!
//! Every composed scheme in this ecosystem derives its output secret through
//! Blake2b-256: the KEM combiner's split-PRF branches, the NIKE-to-KEM
//! adapter's key-binding hash, and the NIKE composer's secret derivation.

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};

/// Blake2b with a 256-bit output
pub type Blake2b256 = Blake2b<U32>;

/// Output size of the PRF in bytes
pub const PRF_OUTPUT_SIZE: usize = 32;

/// Computes `Blake2b256(parts[0] ∥ parts[1] ∥ …)`.
pub fn prf256(parts: &[&[u8]]) -> [u8; PRF_OUTPUT_SIZE] {
    let mut hash = Blake2b256::new();
    for part in parts {
        hash.update(part);
    }
    hash.finalize().into()
}

/// XORs `branch` into `acc` byte-wise.
pub fn xor_into(acc: &mut [u8; PRF_OUTPUT_SIZE], branch: &[u8; PRF_OUTPUT_SIZE]) {
    for (a, b) in acc.iter_mut().zip(branch.iter()) {
        *a ^= b;
    }
}
