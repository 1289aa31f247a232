//! Process-wide scheme registries
//!
//! One registry per scheme family, built once into immutable statics from a
//! hard-coded list of primitive, adapted, and combined schemes. Lookup is
//! case-insensitive; enumeration returns every registered scheme. There is
//! no runtime registration, and a duplicate name (after ASCII case folding)
//! is an initialization panic.

pub mod kem;
pub mod nike;
pub mod sign;

fn fold(name: &str) -> String {
    name.to_ascii_lowercase()
}
