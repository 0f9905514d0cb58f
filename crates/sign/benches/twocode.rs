use codesig_api::SignatureScheme;
use codesig_params::{BchCodeSpec, SchemeConfig};
use codesig_sign::TwoCodeScheme;
use criterion::{criterion_group, criterion_main, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn bench_twocode(c: &mut Criterion) {
    let scheme = TwoCodeScheme::new(SchemeConfig::bch_pair(BchCodeSpec::new(4, 1)));
    let mut rng = ChaCha20Rng::seed_from_u64(0xbe7c);

    c.bench_function("twocode keypair (m=4 t=1)", |b| {
        b.iter(|| scheme.keypair(&mut rng).unwrap())
    });

    let (pk, sk) = scheme.keypair(&mut rng).unwrap();
    let message = vec![0x61u8; sk.signer_dimension()];

    c.bench_function("twocode sign (m=4 t=1)", |b| {
        b.iter(|| scheme.sign(&message, &sk, &mut rng).unwrap())
    });

    let sig = scheme.sign(&message, &sk, &mut rng).unwrap();
    c.bench_function("twocode verify (m=4 t=1)", |b| {
        b.iter(|| scheme.verify(&message, &sig, &pk).unwrap())
    });
}

criterion_group!(benches, bench_twocode);
criterion_main!(benches);
