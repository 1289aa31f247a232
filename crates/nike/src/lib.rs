//! Non-Interactive Key Exchange schemes
//!
//! This crate binds concrete Diffie-Hellman-style primitives to the
//! [`pqmux_api::nike::Nike`] contract: X25519 and secp256k1 ECDH. Composed
//! NIKEs live in `pqmux-hybrid`.

pub mod secp256k1;
pub mod x25519;

// Re-exports
pub use secp256k1::Secp256k1;
pub use x25519::X25519;
