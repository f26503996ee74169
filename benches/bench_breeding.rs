use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use genpass::{
    evolution::{EvolutionOptions, FitnessEvaluator, InitStrategy},
    rng::RandomNumberGenerator,
    scorer::NeutralScorer,
    strategy::{BreedStrategy, OrdinaryStrategy},
};

fn bench_breeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("ordinary_breeding");
    for size in [100, 1000, 5000].iter() {
        for (label, threshold) in [("sequential", usize::MAX), ("parallel", 1)] {
            let options = EvolutionOptions::builder()
                .length_bounds(8, 36)
                .population_size(*size)
                .tournament_size(5)
                .parallel_threshold(threshold)
                .build()
                .unwrap();
            let strategy = OrdinaryStrategy::from_options(&options).unwrap();
            let mut rng = RandomNumberGenerator::from_seed(7);
            let population = InitStrategy::Random.initialize(&options, &mut rng).unwrap();
            let fitness = FitnessEvaluator::new(&options, NeutralScorer)
                .evaluate_population(&population)
                .unwrap();

            group.bench_with_input(BenchmarkId::new(label, size), size, |b, _| {
                b.iter(|| {
                    let result = strategy.breed(
                        black_box(&population[0]),
                        black_box(&population),
                        black_box(&fitness),
                        black_box(&mut rng),
                    );
                    assert!(result.is_ok());
                })
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_breeding);
criterion_main!(benches);
