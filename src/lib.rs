//! # pqmux
//!
//! A hybrid post-quantum cryptography library built around combiner
//! machinery: generic NIKE / KEM / signature contracts, a
//! security-preserving N-ary KEM combiner (split-PRF construction), a
//! NIKE-to-KEM adapter (hashed ElGamal), and pairwise NIKE / signature
//! composers. Underlying primitives are consumed as black boxes.
//!
//! ## Crate structure
//!
//! This is a facade crate that re-exports functionality from the member
//! crates:
//!
//! - [`api`]: scheme contracts, key types, errors, PRF and seed expansion
//! - [`nike`]: X25519 and secp256k1 NIKE bindings
//! - [`kem`]: ML-KEM-768 binding and the NIKE-to-KEM adapter
//! - [`sign`]: Ed25519 and ML-DSA-44 bindings
//! - [`hybrid`]: KEM combiner and NIKE / signature composers
//! - [`schemes`]: process-wide scheme registries with by-name lookup
//!
//! ## Usage
//!
//! ```
//! use pqmux::prelude::*;
//! use pqmux::schemes;
//! use rand::rngs::OsRng;
//!
//! let scheme = schemes::kem::by_name("MLKEM768-X25519").unwrap();
//! let (pk, sk) = scheme.generate_key_pair(&mut OsRng).unwrap();
//! let (ct, ss_sender) = scheme.encapsulate(&mut OsRng, &pk).unwrap();
//! let ss_recipient = scheme.decapsulate(&sk, &ct).unwrap();
//! assert_eq!(ss_sender, ss_recipient);
//! ```

// Core re-exports
pub use pqmux_api as api;
pub use pqmux_hybrid as hybrid;
pub use pqmux_kem as kem;
pub use pqmux_nike as nike;
pub use pqmux_sign as sign;

pub mod schemes;

/// Common imports for pqmux users
pub mod prelude {
    // Re-export error types
    pub use crate::api::{Error, Result};

    // Re-export core traits and shared types
    pub use crate::api::kem::Kem;
    pub use crate::api::nike::Nike;
    pub use crate::api::sign::Signature;
    pub use crate::api::SharedSecret;
}
