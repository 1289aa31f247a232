use std::sync::LazyLock;

use blake2::digest::consts::U32;
use blake2::{Blake2b, Digest};
use rand::rngs::OsRng;

use pqmux_api::kem::Kem;
use pqmux_api::Error;
use pqmux_kem::adapter::NikeAdapter;
use pqmux_kem::mlkem768;
use pqmux_nike::x25519;

#[allow(deprecated)]
use super::{Combiner, PairHybrid};

static X25519_KEM: LazyLock<NikeAdapter> =
    LazyLock::new(|| NikeAdapter::from_nike(x25519::scheme()));

static COMBINED: LazyLock<Combiner> = LazyLock::new(|| {
    Combiner::new("MLKEM768-X25519", vec![&*X25519_KEM, mlkem768::scheme()])
});

static REORDERED: LazyLock<Combiner> = LazyLock::new(|| {
    Combiner::new("X25519-MLKEM768-swapped", vec![mlkem768::scheme(), &*X25519_KEM])
});

#[allow(deprecated)]
static PAIRED: LazyLock<PairHybrid> = LazyLock::new(|| {
    PairHybrid::new("MLKEM768-X25519-pair", &*X25519_KEM, mlkem768::scheme())
});

fn combined() -> &'static dyn Kem {
    &*COMBINED
}

fn blake2b256(parts: &[&[u8]]) -> [u8; 32] {
    let mut hash = Blake2b::<U32>::new();
    for part in parts {
        hash.update(part);
    }
    hash.finalize().into()
}

#[test]
fn combiner_sizes_are_component_sums() {
    assert_eq!(combined().public_key_size(), 32 + 1184);
    assert_eq!(combined().private_key_size(), 32 + 2400);
    assert_eq!(combined().ciphertext_size(), 32 + 1088);
    assert_eq!(combined().seed_size(), 32 + 64);
    assert_eq!(combined().encapsulation_seed_size(), 32 + 32);
    assert_eq!(combined().shared_secret_size(), 32);
}

#[test]
fn combiner_round_trip() {
    let mut rng = OsRng;
    let (pk, sk) = combined().generate_key_pair(&mut rng).unwrap();
    let (ct, ss_sender) = combined().encapsulate(&mut rng, &pk).unwrap();
    let ss_recipient = combined().decapsulate(&sk, &ct).unwrap();

    assert_eq!(ss_sender, ss_recipient);
    assert_eq!(ct.len(), 1120);
}

#[test]
fn combined_secret_is_the_xor_of_prf_branches() {
    // ss = Blake2b256(ss_1 ∥ ct_1 ∥ ct_2) ⊕ Blake2b256(ss_2 ∥ ct_1 ∥ ct_2),
    // recomputed from the components with the same per-component seeds.
    let seed = [0x21u8; 96];
    let (pk, _) = combined().derive_key_pair(&seed).unwrap();
    let enc_seed = [0x42u8; 64];
    let (ct, ss) = combined()
        .encapsulate_deterministically(&pk, &enc_seed)
        .unwrap();

    let x25519_kem: &'static dyn Kem = &*X25519_KEM;
    let (pk1, _) = x25519_kem.derive_key_pair(&seed[..32]).unwrap();
    let (pk2, _) = mlkem768::scheme().derive_key_pair(&seed[32..]).unwrap();
    let (ct1, ss1) = x25519_kem
        .encapsulate_deterministically(&pk1, &enc_seed[..32])
        .unwrap();
    let (ct2, ss2) = mlkem768::scheme()
        .encapsulate_deterministically(&pk2, &enc_seed[32..])
        .unwrap();

    assert_eq!(ct, [ct1.as_slice(), ct2.as_slice()].concat());

    let branch1 = blake2b256(&[ss1.as_bytes(), &ct]);
    let branch2 = blake2b256(&[ss2.as_bytes(), &ct]);
    let expected: Vec<u8> = branch1.iter().zip(branch2.iter()).map(|(a, b)| a ^ b).collect();
    assert_eq!(ss.as_bytes(), expected.as_slice());
}

#[test]
fn flipping_any_ciphertext_byte_changes_the_secret() {
    let seed = [0x33u8; 96];
    let (pk, sk) = combined().derive_key_pair(&seed).unwrap();
    let (ct, ss) = combined()
        .encapsulate_deterministically(&pk, &[0x44u8; 64])
        .unwrap();

    // One byte from each component region.
    for &index in &[0usize, 31, 32, ct.len() - 1] {
        let mut mutated = ct.clone();
        mutated[index] ^= 0x01;
        let ss_mutated = combined().decapsulate(&sk, &mutated).unwrap();
        assert_ne!(ss, ss_mutated, "byte {} did not affect the secret", index);
    }
}

#[test]
fn component_order_is_part_of_the_scheme_identity() {
    let seed = [0x55u8; 96];
    let (pk, _) = combined().derive_key_pair(&seed).unwrap();
    let reordered: &'static dyn Kem = &*REORDERED;
    let (pk_swapped, _) = reordered.derive_key_pair(&seed).unwrap();

    // Same total sizes, incompatible encodings and schemes.
    assert_eq!(pk.as_bytes().len(), pk_swapped.as_bytes().len());
    assert_ne!(pk.as_bytes(), pk_swapped.as_bytes());

    let err = reordered
        .encapsulate_deterministically(&pk, &[0u8; 64])
        .unwrap_err();
    assert!(matches!(err, Error::TypeMismatch { .. }));
}

#[test]
fn combiner_rejects_bad_lengths() {
    let (pk, sk) = combined().derive_key_pair(&[0u8; 96]).unwrap();

    let err = combined().encapsulate_deterministically(&pk, &[0u8; 63]).unwrap_err();
    assert!(matches!(err, Error::InvalidSeed { .. }));

    let err = combined().decapsulate(&sk, &[0u8; 1119]).unwrap_err();
    assert!(matches!(err, Error::InvalidCiphertext { .. }));

    let err = combined().derive_key_pair(&[0u8; 95]).unwrap_err();
    assert!(matches!(err, Error::InvalidSeed { .. }));

    assert!(combined().public_key_from_bytes(&[0u8; 1215]).is_err());
    assert!(combined().public_key_from_bytes(&[0u8; 1217]).is_err());
}

#[test]
fn marshal_round_trip() {
    let (pk, sk) = combined().derive_key_pair(&[0x66u8; 96]).unwrap();
    let pk2 = combined().public_key_from_bytes(pk.as_bytes()).unwrap();
    let sk2 = combined().private_key_from_bytes(sk.as_bytes()).unwrap();
    assert_eq!(pk, pk2);
    assert_eq!(sk, sk2);
}

#[test]
fn pair_hybrid_matches_the_two_component_combiner() {
    // The legacy builder keeps the combiner's layout and secret derivation.
    let paired: &'static dyn Kem = &*PAIRED;
    let seed = [0x77u8; 96];
    let (pk_pair, sk_pair) = paired.derive_key_pair(&seed).unwrap();
    let (pk_comb, _) = combined().derive_key_pair(&seed).unwrap();
    assert_eq!(pk_pair.as_bytes(), pk_comb.as_bytes());

    let enc_seed = [0x88u8; 64];
    let (ct_pair, ss_pair) = paired
        .encapsulate_deterministically(&pk_pair, &enc_seed)
        .unwrap();
    let (ct_comb, ss_comb) = combined()
        .encapsulate_deterministically(&pk_comb, &enc_seed)
        .unwrap();

    assert_eq!(ct_pair, ct_comb);
    assert_eq!(ss_pair.as_bytes(), ss_comb.as_bytes());
    assert_eq!(paired.decapsulate(&sk_pair, &ct_pair).unwrap(), ss_pair);
}
