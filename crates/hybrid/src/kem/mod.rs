//! Hybrid Key Encapsulation Mechanisms
//!
//! KEMs are combined by hashing shared secrets together with the full
//! concatenated ciphertext (the split-PRF construction of Giacon, Heuer,
//! and Poettering, <https://eprint.iacr.org/2018/024.pdf>): the combined
//! KEM stays IND-CCA2 as long as any one component does.

// Internal modules
mod combiner;
mod pair;

// Tests
#[cfg(test)]
mod tests;

// Re-export the hybrid KEM builders.
pub use combiner::Combiner;
#[allow(deprecated)]
pub use pair::PairHybrid;
