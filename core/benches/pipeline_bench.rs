use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use parz_core::codec::registry;
use parz_core::pipeline::{run_compress_pipeline, PoolProfile};
use parz_core::Algorithm;

fn bench_compress(c: &mut Criterion) {
    // Mildly compressible input so codecs do real work.
    let data: Vec<u8> = (0..8 * 1024 * 1024usize)
        .map(|i| (i.wrapping_mul(2654435761) >> 16) as u8)
        .collect();

    let mut group = c.benchmark_group("compress_8mib");
    group.throughput(Throughput::Bytes(data.len() as u64));
    group.sample_size(10);

    for algo in [Algorithm::Gzip, Algorithm::Zstd] {
        group.bench_with_input(BenchmarkId::from_parameter(algo), &data, |b, data| {
            let profile = PoolProfile::dynamic().with_chunk_size(1024 * 1024);
            b.iter(|| {
                let mut out = Vec::new();
                run_compress_pipeline(&data[..], &mut out, registry::create(algo), &profile)
                    .expect("pipeline failed");
                out
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_compress);
criterion_main!(benches);
