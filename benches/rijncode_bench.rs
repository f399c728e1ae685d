use criterion::{criterion_group, criterion_main, Criterion, Throughput};
use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;

use rijncode::{alphabet, BlockFlags, Direction, Rijndael, BLOCK_SIZE};

fn bench_single_block(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([1u8; 32]);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let cipher = Rijndael::new(&key, Direction::Encryption).expect("valid key");

    let mut group = c.benchmark_group("single_block");
    group.throughput(Throughput::Bytes(BLOCK_SIZE as u64));
    group.bench_function("encrypt_block", |b| {
        let mut block = [0u8; BLOCK_SIZE];
        rng.fill_bytes(&mut block);
        b.iter(|| {
            let input = block;
            cipher.process_and_xor_block(&input, None, &mut block);
        });
    });
    group.finish();
}

fn bench_bulk(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([2u8; 32]);
    let mut key = [0u8; 16];
    rng.fill_bytes(&mut key);
    let cipher = Rijndael::new(&key, Direction::Encryption).expect("valid key");

    let mut input = vec![0u8; 256 * BLOCK_SIZE];
    rng.fill_bytes(&mut input);
    let mut out = vec![0u8; input.len()];

    let mut group = c.benchmark_group("bulk");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("advanced_process_blocks", |b| {
        b.iter(|| {
            cipher.advanced_process_blocks(
                &input,
                None,
                &mut out,
                input.len(),
                BlockFlags::empty(),
            );
        });
    });
    group.bench_function("counter_keystream", |b| {
        let counter = [0u8; BLOCK_SIZE];
        let out_len = out.len();
        b.iter(|| {
            cipher.advanced_process_blocks(
                &counter,
                None,
                &mut out,
                out_len,
                BlockFlags::IN_BLOCK_IS_COUNTER,
            );
        });
    });
    group.finish();
}

fn bench_codec(c: &mut Criterion) {
    let mut rng = ChaCha20Rng::from_seed([3u8; 32]);
    let mut input = vec![0u8; 4096];
    rng.fill_bytes(&mut input);

    let mut group = c.benchmark_group("codec");
    group.throughput(Throughput::Bytes(input.len() as u64));
    group.bench_function("base64_encode", |b| {
        b.iter(|| {
            let mut encoder = alphabet::base64_encoder(Vec::new()).expect("valid preset");
            encoder.put(&input, true);
            encoder.into_inner()
        });
    });
    group.finish();
}

criterion_group!(benches, bench_single_block, bench_bulk, bench_codec);
criterion_main!(benches);
