//! Integration tests for the scheme registries

use pqmux::prelude::*;
use pqmux::schemes;

#[test]
fn lookup_is_case_insensitive() {
    let lower = schemes::sign::by_name("ed25519").unwrap();
    let upper = schemes::sign::by_name("ED25519").unwrap();
    let mixed = schemes::sign::by_name("Ed25519").unwrap();

    assert_eq!(lower.name(), upper.name());
    assert_eq!(lower.name(), mixed.name());
    assert!(std::ptr::eq(
        lower as *const dyn Signature as *const u8,
        upper as *const dyn Signature as *const u8,
    ));
}

#[test]
fn unknown_names_return_none() {
    assert!(schemes::kem::by_name("nosuch").is_none());
    assert!(schemes::nike::by_name("nosuch").is_none());
    assert!(schemes::sign::by_name("nosuch").is_none());
}

#[test]
fn every_enumerated_scheme_is_findable_by_its_own_name() {
    for scheme in schemes::kem::all() {
        let found = schemes::kem::by_name(scheme.name()).unwrap();
        assert_eq!(found.name(), scheme.name());
    }
    for scheme in schemes::nike::all() {
        let found = schemes::nike::by_name(scheme.name()).unwrap();
        assert_eq!(found.name(), scheme.name());
    }
    for scheme in schemes::sign::all() {
        let found = schemes::sign::by_name(scheme.name()).unwrap();
        assert_eq!(found.name(), scheme.name());
    }
}

#[test]
fn names_are_unique_after_case_folding() {
    let mut seen = std::collections::HashSet::new();
    for scheme in schemes::kem::all() {
        assert!(seen.insert(scheme.name().to_ascii_lowercase()), "{}", scheme.name());
    }

    seen.clear();
    for scheme in schemes::sign::all() {
        assert!(seen.insert(scheme.name().to_ascii_lowercase()), "{}", scheme.name());
    }

    seen.clear();
    for scheme in schemes::nike::all() {
        assert!(seen.insert(scheme.name().to_ascii_lowercase()), "{}", scheme.name());
    }
}

#[test]
fn expected_schemes_are_registered() {
    for name in [
        "x25519",
        "secp256k1",
        "x25519-secp256k1",
        "MLKEM768",
        "MLKEM768-X25519",
        "x25519-secp256k1-mlkem768",
    ] {
        assert!(schemes::kem::by_name(name).is_some(), "missing KEM {}", name);
    }
    for name in ["x25519", "secp256k1", "x25519-secp256k1"] {
        assert!(schemes::nike::by_name(name).is_some(), "missing NIKE {}", name);
    }
    for name in ["ed25519", "mldsa44", "ed25519-mldsa44"] {
        assert!(schemes::sign::by_name(name).is_some(), "missing signature scheme {}", name);
    }
}
