//! KEM scheme registry

use std::collections::HashMap;
use std::sync::LazyLock;

use pqmux_api::kem::Kem;
use pqmux_hybrid::kem::Combiner;
use pqmux_kem::adapter::NikeAdapter;
use pqmux_kem::mlkem768;
use pqmux_nike::{secp256k1, x25519};

use super::fold;

// Classical KEM schemes, converted from NIKEs via the hashed-ElGamal
// construction. Every registered NIKE appears here under its own name,
// the composite included.
static X25519: LazyLock<NikeAdapter> =
    LazyLock::new(|| NikeAdapter::from_nike(x25519::scheme()));
static SECP256K1: LazyLock<NikeAdapter> =
    LazyLock::new(|| NikeAdapter::from_nike(secp256k1::scheme()));
static X25519_SECP256K1: LazyLock<NikeAdapter> =
    LazyLock::new(|| NikeAdapter::from_nike(super::nike::x25519_secp256k1()));

// Hybrid KEM schemes.
static MLKEM768_X25519: LazyLock<Combiner> = LazyLock::new(|| {
    Combiner::new("MLKEM768-X25519", vec![&*X25519, mlkem768::scheme()])
});

// Hybrid KEM scheme over two NIKE adapters and one lattice KEM.
static X25519_SECP256K1_MLKEM768: LazyLock<Combiner> = LazyLock::new(|| {
    Combiner::new(
        "x25519-secp256k1-mlkem768",
        vec![&*X25519, &*SECP256K1, mlkem768::scheme()],
    )
});

static ALL: LazyLock<Vec<&'static dyn Kem>> = LazyLock::new(|| {
    vec![
        &*X25519,
        &*SECP256K1,
        &*X25519_SECP256K1,
        mlkem768::scheme(),
        &*MLKEM768_X25519,
        &*X25519_SECP256K1_MLKEM768,
    ]
});

static BY_NAME: LazyLock<HashMap<String, &'static dyn Kem>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &scheme in ALL.iter() {
        let previous = map.insert(fold(scheme.name()), scheme);
        assert!(
            previous.is_none(),
            "duplicate KEM scheme name: {}",
            scheme.name()
        );
    }
    map
});

/// Returns the KEM scheme registered under `name`, case-insensitively.
pub fn by_name(name: &str) -> Option<&'static dyn Kem> {
    BY_NAME.get(&fold(name)).copied()
}

/// Returns all registered KEM schemes.
pub fn all() -> &'static [&'static dyn Kem] {
    &ALL
}
