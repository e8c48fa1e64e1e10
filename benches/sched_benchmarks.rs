use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};

use stagegraph::{DependencyBuilder, DependencyGraph, ResourceKey, Scheduler, System};

// ---------------------------------------------------------------------------
// Synthetic resource and unit types
// ---------------------------------------------------------------------------

struct SimState;

struct WriterUnit;
impl System for WriterUnit {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.writes::<SimState>();
    }
    fn update(&mut self, delta_time: f32) {
        black_box(delta_time);
    }
}

struct ReaderUnit;
impl System for ReaderUnit {
    fn declare_dependencies(&self, deps: &mut DependencyBuilder) {
        deps.reads::<SimState>();
    }
    fn update(&mut self, delta_time: f32) {
        black_box(delta_time);
    }
}

fn chain_key(chain: usize, depth: usize) -> ResourceKey {
    ResourceKey::tagged((chain * 1024 + depth) as u64, "link")
}

/// Builds `chains` independent writer→reader chains of `depth` nodes
/// each, a stand-in for a mid-sized frame pipeline.
fn chained_graph(chains: usize, depth: usize) -> DependencyGraph<usize> {
    let mut graph = DependencyGraph::new();
    for c in 0..chains {
        for d in 0..depth {
            let mut deps = DependencyBuilder::new();
            if d > 0 {
                deps.reads_key(chain_key(c, d - 1));
            }
            deps.writes_key(chain_key(c, d));
            graph.add_node(c * depth + d, "link", &deps).unwrap();
        }
    }
    graph
}

// ---------------------------------------------------------------------------
// Benches
// ---------------------------------------------------------------------------

fn bench_bake_chains(c: &mut Criterion) {
    c.bench_function("bake_8x8_chain_graph", |b| {
        b.iter_batched(
            || chained_graph(8, 8),
            |mut graph| black_box(graph.bake().unwrap()),
            BatchSize::SmallInput,
        );
    });
}

fn bench_register_100_units(c: &mut Criterion) {
    c.bench_function("register_100_units", |b| {
        b.iter_batched(
            Scheduler::new,
            |mut sched| {
                sched.register(WriterUnit).unwrap();
                for _ in 0..99 {
                    sched.register(ReaderUnit).unwrap();
                }
                black_box(sched.system_count())
            },
            BatchSize::SmallInput,
        );
    });
}

fn bench_execute_tick(c: &mut Criterion) {
    let mut sched = Scheduler::new();
    sched.register(WriterUnit).unwrap();
    for _ in 0..63 {
        sched.register(ReaderUnit).unwrap();
    }
    sched.bake().unwrap();

    c.bench_function("execute_64_unit_tick", |b| {
        b.iter(|| sched.execute(black_box(0.016)).unwrap());
    });
}

criterion_group!(
    benches,
    bench_bake_chains,
    bench_register_100_units,
    bench_execute_tick
);
criterion_main!(benches);
