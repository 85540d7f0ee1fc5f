use criterion::Criterion;
use gadaneat::{random::default_rng, Network};

fn bench_mutate(bench: &mut Criterion) {
    let mut rng = default_rng();
    let mut network = Network::default();
    for _ in 0..100 {
        network.edge_mutation(&mut rng).unwrap();
    }
    for _ in 0..20 {
        network.node_mutation(&mut rng).unwrap();
    }

    bench.bench_function("mutate-edge", |b| {
        b.iter(|| network.clone().edge_mutation(&mut rng).unwrap().edges().len())
    });

    bench.bench_function("mutate-node", |b| {
        b.iter(|| network.clone().node_mutation(&mut rng).unwrap().nodes().len())
    });
}

pub fn benches() {
    #[cfg(not(feature = "smol_bench"))]
    let mut criterion: criterion::Criterion<_> = Criterion::default()
        .sample_size(200)
        .significance_level(0.1);
    #[cfg(feature = "smol_bench")]
    let mut criterion: criterion::Criterion<_> = {
        use core::time::Duration;
        Criterion::default()
            .measurement_time(Duration::from_millis(1))
            .sample_size(10)
            .nresamples(1)
            .without_plots()
            .configure_from_args()
    };
    bench_mutate(&mut criterion);
}

fn main() {
    benches();
    criterion::Criterion::default()
        .configure_from_args()
        .final_summary();
}
