//! Scheme contracts and common types for the pqmux ecosystem
//!
//! This crate provides the API surface shared by every pqmux crate: the
//! object-safe [`nike::Nike`], [`kem::Kem`], and [`sign::Signature`] scheme
//! contracts, the byte-backed key types that carry a back-reference to their
//! owning scheme, the uniform [`Error`] type, and the Blake2b-based PRF and
//! seed-expansion helpers used by the hybrid constructions.
//!
//! Scheme descriptors are immutable, process-lifetime values: every scheme
//! method takes `&'static self`, and keys store a non-owning `&'static dyn`
//! reference to their scheme. Schemes therefore outlive all keys by
//! construction.

pub mod error;
pub mod kem;
pub mod nike;
pub mod prf;
pub mod secret;
pub mod sign;
pub mod util;
pub mod xof;

// Re-export commonly used items at the crate level for convenience
pub use error::{Error, Result};
pub use secret::SharedSecret;
