//! Hybrid constructions
//!
//! Composes schemes of one family into a single scheme of the same family:
//!
//! - [`kem::Combiner`]: the N-ary split-PRF KEM combiner, IND-CCA2 as long
//!   as any one component is IND-CCA2
//! - [`kem::PairHybrid`]: the legacy two-KEM builder retained for
//!   compatibility
//! - [`sign::Hybrid`]: pairwise signature composition with AND-verification
//! - [`nike::Hybrid`]: pairwise NIKE composition with a PRF-derived secret

pub mod kem;
pub mod nike;
pub mod sign;
