use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use noop_graph::{
    Clazz, Controller, ControllerConfig, EdgeType, ElementId, Library, Method, NewEdgeOperation,
    NewElementOperation, Project, RootOperation,
};

/// Controller holding a project, one library and `classes` classes
fn seeded(classes: usize) -> (Controller, ElementId, Vec<ElementId>) {
    let mut controller = Controller::new();
    let project = Project::new("Noop", "com.google.noop", "Apache 2");
    let lang = Library::new("lang");
    let (p, l) = (project.id, lang.id);
    controller.apply(RootOperation::new(project)).unwrap();
    controller.apply(NewElementOperation::new(lang, p)).unwrap();

    let mut ids = Vec::with_capacity(classes);
    for i in 0..classes {
        let clazz = Clazz::new(format!("Class{}", i));
        ids.push(clazz.id);
        controller.apply(NewElementOperation::new(clazz, l)).unwrap();
    }
    (controller, l, ids)
}

/// Benchmark element creation throughput through the controller
fn bench_element_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("element_apply");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (controller, _, ids) = seeded(size);
                criterion::black_box((controller.last_sequence(), ids.len()));
            });
        });
    }
    group.finish();
}

/// Benchmark appending edges to a single source
fn bench_edge_apply(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_apply");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let (mut controller, _, ids) = seeded(1);
                let target = ids[0];
                for _ in 0..size {
                    controller
                        .apply(NewEdgeOperation::new(target, EdgeType::TypeOf, target))
                        .unwrap();
                }
                criterion::black_box(controller.get_edges(target, EdgeType::TypeOf).len());
            });
        });
    }
    group.finish();
}

/// Benchmark ordered edge lookup
fn bench_edge_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_lookup");

    for size in [100, 1000, 10_000].iter() {
        let (mut controller, _, ids) = seeded(*size);
        let method = Method::new("fanout");
        let m = method.id;
        let mut op = NewElementOperation::new(method, ids[0]);
        for id in &ids {
            op = op.with_edge(EdgeType::TypeOf, *id);
        }
        controller.apply(op).unwrap();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let edges = controller.get_edges(m, EdgeType::TypeOf);
                criterion::black_box(edges.last());
            });
        });
    }
    group.finish();
}

/// Benchmark rebuilding a graph from recorded history
fn bench_replay(c: &mut Criterion) {
    let mut group = c.benchmark_group("replay");
    group.sample_size(20);

    for size in [100, 1000, 10_000].iter() {
        let (controller, _, _) = seeded(*size);
        let history = controller.get_history().to_vec();

        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let rebuilt = Controller::replay(&history, ControllerConfig::default()).unwrap();
                criterion::black_box(rebuilt.store().len());
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_element_apply,
    bench_edge_apply,
    bench_edge_lookup,
    bench_replay
);
criterion_main!(benches);
