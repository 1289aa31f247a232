//! NIKE scheme registry

use std::collections::HashMap;
use std::sync::LazyLock;

use pqmux_api::nike::Nike;
use pqmux_hybrid::nike::Hybrid;
use pqmux_nike::{secp256k1, x25519};

use super::fold;

// Hybrid NIKE scheme.
static X25519_SECP256K1: LazyLock<Hybrid> = LazyLock::new(|| {
    Hybrid::new("x25519-secp256k1", x25519::scheme(), secp256k1::scheme())
});

/// The composite NIKE, for registries that adapt every NIKE into a KEM.
pub(crate) fn x25519_secp256k1() -> &'static dyn Nike {
    &*X25519_SECP256K1
}

static ALL: LazyLock<Vec<&'static dyn Nike>> = LazyLock::new(|| {
    vec![
        x25519::scheme(),
        secp256k1::scheme(),
        &*X25519_SECP256K1,
    ]
});

static BY_NAME: LazyLock<HashMap<String, &'static dyn Nike>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &scheme in ALL.iter() {
        let previous = map.insert(fold(scheme.name()), scheme);
        assert!(
            previous.is_none(),
            "duplicate NIKE scheme name: {}",
            scheme.name()
        );
    }
    map
});

/// Returns the NIKE scheme registered under `name`, case-insensitively.
pub fn by_name(name: &str) -> Option<&'static dyn Nike> {
    BY_NAME.get(&fold(name)).copied()
}

/// Returns all registered NIKE schemes.
pub fn all() -> &'static [&'static dyn Nike] {
    &ALL
}
