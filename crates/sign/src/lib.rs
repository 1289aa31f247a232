//! Digital signature schemes
//!
//! This crate binds Ed25519 and ML-DSA-44 to the
//! [`pqmux_api::sign::Signature`] contract. The pairwise composer lives in
//! `pqmux-hybrid`.

pub mod ed25519;
pub mod mldsa44;

// Re-exports
pub use ed25519::Ed25519;
pub use mldsa44::Mldsa44;
