// Scheme-level tests: round trips, tampering, determinism, and the
// failure modes that must surface as errors rather than hangs.

use super::keygen;
use super::sign::generate_signature;
use super::store::{DirStore, KeyStore};
use super::*;
use crate::error::Error;

use codesig_api::SignatureScheme;
use codesig_params::{BchCodeSpec, KeyStrategy, SchemeConfig, WeightThreshold};

use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

const RNG_SEED: u64 = 0x5eed;

fn bch_config() -> SchemeConfig {
    // Both components are the (7, 4, 3) Hamming code built from the BCH
    // generator polynomial; the master code spans their 14 columns
    SchemeConfig::bch_pair(BchCodeSpec::new(3, 1))
}

fn message_for(sk: &TwoCodeSecretKey) -> Vec<u8> {
    vec![0x61u8; sk.signer_dimension()]
}

#[test]
fn sign_verify_round_trip() {
    let scheme = TwoCodeScheme::new(bch_config());
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED);

    let (pk, sk) = scheme.keypair(&mut rng).unwrap();
    let message = message_for(&sk);
    let sig = scheme.sign(&message, &sk, &mut rng).unwrap();

    assert_eq!(sig.row.cols(), pk.code_a.n);
    assert_eq!(sig.salt.len(), message.len());
    assert!(sig.row.row_weight(0) >= pk.code_a.d);
    assert!(scheme.verify(&message, &sig, &pk).unwrap());
}

#[test]
fn any_flipped_signature_bit_fails_verification() {
    let scheme = TwoCodeScheme::new(bch_config());
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 1);

    let (pk, sk) = scheme.keypair(&mut rng).unwrap();
    let message = message_for(&sk);
    let sig = scheme.sign(&message, &sk, &mut rng).unwrap();

    // Every column of the parity-bit H_A is nonzero, so each single-bit
    // flip shifts the right-hand side of the identity
    for bit in 0..pk.code_a.n {
        let mut tampered = sig.clone();
        tampered.row.set(0, bit, tampered.row.get(0, bit) ^ 1);
        assert!(
            !scheme.verify(&message, &tampered, &pk).unwrap(),
            "flip of bit {} went undetected",
            bit
        );
    }
}

#[test]
fn wrong_length_message_is_rejected_at_verify() {
    let scheme = TwoCodeScheme::new(bch_config());
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 2);

    let (pk, sk) = scheme.keypair(&mut rng).unwrap();
    let message = message_for(&sk);
    let sig = scheme.sign(&message, &sk, &mut rng).unwrap();

    let longer = vec![0x61u8; message.len() + 1];
    assert!(scheme.verify(&longer, &sig, &pk).is_err());
}

#[test]
fn signing_rejects_wrong_message_length() {
    let config = bch_config();
    let scheme = TwoCodeScheme::new(config);
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 3);

    let (_, sk) = scheme.keypair(&mut rng).unwrap();
    let short = vec![0u8; sk.signer_dimension() - 1];
    let err = generate_signature(scheme.config(), &sk, &short, &mut rng).unwrap_err();
    assert!(matches!(
        err,
        Error::DimensionMismatch {
            context: "message length",
            ..
        }
    ));
}

#[test]
fn infeasible_threshold_fails_before_the_loop() {
    let config = bch_config().with_threshold(WeightThreshold::Explicit(15));
    let scheme = TwoCodeScheme::new(config);
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 4);

    let (_, sk) = scheme.keypair(&mut rng).unwrap();
    let message = message_for(&sk);
    let err = generate_signature(scheme.config(), &sk, &message, &mut rng).unwrap_err();
    assert_eq!(err, Error::InfeasibleDistance { required: 15, n: 14 });
}

#[test]
fn exhausted_rejection_loop_is_an_error() {
    // Weight 14 needs an all-ones signature, which this combined code
    // never produces; the loop must give up at its configured bound
    let config = bch_config()
        .with_threshold(WeightThreshold::Explicit(14))
        .with_max_sign_attempts(5);
    let scheme = TwoCodeScheme::new(config);
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 5);

    let (_, sk) = scheme.keypair(&mut rng).unwrap();
    let message = message_for(&sk);
    let err = generate_signature(scheme.config(), &sk, &message, &mut rng).unwrap_err();
    assert_eq!(err, Error::ExceededAttempts { attempts: 5 });
}

#[test]
fn seed_derived_round_trip() {
    let config = bch_config()
        .with_strategy(KeyStrategy::SeedDerived)
        .with_threshold(WeightThreshold::Explicit(1));
    let scheme = TwoCodeScheme::new(config);
    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 6);

    let (pk, sk) = scheme.keypair(&mut rng).unwrap();
    assert!(sk.seeds().is_some());

    let message = message_for(&sk);
    let sig = scheme.sign(&message, &sk, &mut rng).unwrap();
    assert!(scheme.verify(&message, &sig, &pk).unwrap());
}

#[test]
fn seed_derived_keys_rebuild_identically_from_the_store() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::new(dir.path());
    let config = bch_config().with_strategy(KeyStrategy::SeedDerived);
    let scheme = TwoCodeScheme::new(config);

    let mut rng1 = ChaCha20Rng::seed_from_u64(RNG_SEED + 7);
    let (pk1, sk1) = scheme
        .keypair_with_store(Some(&store), false, &mut rng1)
        .unwrap();

    // A fresh RNG cannot matter: the persisted seeds drive everything
    let mut rng2 = ChaCha20Rng::seed_from_u64(RNG_SEED + 8);
    let (pk2, sk2) = scheme
        .keypair_with_store(Some(&store), false, &mut rng2)
        .unwrap();

    assert_eq!(pk1, pk2);
    assert_eq!(sk1.generators(), sk2.generators());
    assert_eq!(sk1.seeds(), sk2.seeds());
}

#[test]
fn regenerate_discards_persisted_seeds() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::new(dir.path());
    let config = bch_config().with_strategy(KeyStrategy::SeedDerived);
    let scheme = TwoCodeScheme::new(config);

    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 9);
    let (_, sk1) = scheme
        .keypair_with_store(Some(&store), false, &mut rng)
        .unwrap();
    let (_, sk2) = scheme
        .keypair_with_store(Some(&store), true, &mut rng)
        .unwrap();
    assert_ne!(sk1.seeds(), sk2.seeds());
}

#[test]
fn direct_keys_are_cached_as_matrices() {
    let dir = tempfile::tempdir().unwrap();
    let store = DirStore::new(dir.path());
    let config = bch_config();
    let scheme = TwoCodeScheme::new(config);

    let mut rng = ChaCha20Rng::seed_from_u64(RNG_SEED + 10);
    let (pk, sk) = scheme
        .keypair_with_store(Some(&store), false, &mut rng)
        .unwrap();
    assert!(sk.seeds().is_none());

    let name = super::store::matrix_file_name("H", &scheme.config().code_a);
    assert_eq!(store.load_matrix(&name).unwrap(), pk.h_a);
    assert_eq!(
        store.load_params().unwrap(),
        [
            scheme.config().code_a,
            scheme.config().code1,
            scheme.config().code2
        ]
    );
}

#[test]
fn keygen_seed_matrix_golden_shape() {
    // The seed stream is rows * cols * 4 bytes of ChaCha20 keyed by the
    // seed; the same seed must give the same matrix on every call
    let seed: [u8; codesig_params::SEED_SIZE] =
        hex::decode("000102030405060708090a0b0c0d0e0f101112131415161718191a1b1c1d1e1f")
            .unwrap()
            .try_into()
            .unwrap();
    let a = keygen::matrix_from_seed(4, 14, &seed);
    let b = keygen::matrix_from_seed(4, 14, &seed);
    assert_eq!(a, b);
    assert_eq!((a.rows(), a.cols()), (4, 14));
}
