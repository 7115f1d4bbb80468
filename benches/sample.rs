use adaptive_metropolis::{accept_prob, Sampler, SamplerSettings};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

fn normal_logp(x: f64) -> f64 {
    let diff = x - 3.;
    -diff * diff / 2.
}

fn settings() -> SamplerSettings {
    SamplerSettings {
        seed: 42,
        ..Default::default()
    }
}

pub fn adapt_and_sample(n: u64) -> f64 {
    let mut sampler =
        Sampler::with_settings(normal_logp, 3.5, settings()).expect("valid initial state");
    sampler
        .adapt(&[200, 200, 200])
        .and_then(|sampler| sampler.sample(n))
        .expect("sampling a normal target failed");
    sampler.summary().expect("samples were drawn").mean
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("accept_prob", |b| {
        b.iter(|| accept_prob(black_box(-1.5), black_box(-2.25)))
    });

    c.bench_function("adapt + sample normal 1000", |b| {
        b.iter(|| adapt_and_sample(black_box(1000)))
    });

    c.bench_function("adapt + sample normal 10000", |b| {
        b.iter(|| adapt_and_sample(black_box(10000)))
    });

    let mean = adapt_and_sample(1000);

    c.bench_function("sample normal 1000", |b| {
        b.iter_batched(
            || {
                let mut sampler = Sampler::with_settings(normal_logp, 3.5, settings())
                    .expect("valid initial state");
                sampler.adapt(&[200, 200, 200]).expect("adaptation failed");
                sampler
            },
            |mut sampler| {
                sampler.sample(1000).expect("sampling failed");
                sampler.summary().expect("samples were drawn").mean
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("seeded chain is reproducible", |b| {
        b.iter(|| assert_eq!(adapt_and_sample(black_box(1000)), mean))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
