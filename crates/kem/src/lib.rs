//! Key Encapsulation Mechanisms
//!
//! This crate binds ML-KEM-768 to the [`pqmux_api::kem::Kem`] contract and
//! provides the hashed-ElGamal [`adapter`] that turns any NIKE into an
//! IND-CCA2 KEM. The N-ary combiner lives in `pqmux-hybrid`.

pub mod adapter;
pub mod mlkem768;

// Re-exports
pub use adapter::NikeAdapter;
pub use mlkem768::Mlkem768;
