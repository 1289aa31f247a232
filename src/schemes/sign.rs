//! Signature scheme registry

use std::collections::HashMap;
use std::sync::LazyLock;

use pqmux_api::sign::Signature;
use pqmux_hybrid::sign::Hybrid;
use pqmux_sign::{ed25519, mldsa44};

use super::fold;

// Hybrid signature scheme pairing a classical and a post-quantum component.
static ED25519_MLDSA44: LazyLock<Hybrid> = LazyLock::new(|| {
    Hybrid::new("ed25519-mldsa44", ed25519::scheme(), mldsa44::scheme())
});

static ALL: LazyLock<Vec<&'static dyn Signature>> = LazyLock::new(|| {
    vec![
        ed25519::scheme(),
        mldsa44::scheme(),
        &*ED25519_MLDSA44,
    ]
});

static BY_NAME: LazyLock<HashMap<String, &'static dyn Signature>> = LazyLock::new(|| {
    let mut map = HashMap::new();
    for &scheme in ALL.iter() {
        let previous = map.insert(fold(scheme.name()), scheme);
        assert!(
            previous.is_none(),
            "duplicate signature scheme name: {}",
            scheme.name()
        );
    }
    map
});

/// Returns the signature scheme registered under `name`, case-insensitively.
pub fn by_name(name: &str) -> Option<&'static dyn Signature> {
    BY_NAME.get(&fold(name)).copied()
}

/// Returns all registered signature schemes.
pub fn all() -> &'static [&'static dyn Signature] {
    &ALL
}
