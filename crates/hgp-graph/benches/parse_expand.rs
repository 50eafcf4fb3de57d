use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hgp_core::rng::RngHandle;
use hgp_graph::{expand_cliques, gen_random_hypergraph, parse_hypergraph, write_hgr};

fn parse_expand_bench(c: &mut Criterion) {
    let mut rng = RngHandle::from_seed(42);
    let graph = gen_random_hypergraph(10_000, 12_000, 6, &mut rng).unwrap();
    let text = write_hgr(&graph);

    c.bench_function("parse_10k", |b| {
        b.iter(|| black_box(parse_hypergraph(black_box(&text)).unwrap()));
    });
    c.bench_function("expand_10k", |b| {
        b.iter(|| black_box(expand_cliques(black_box(&graph))));
    });
}

criterion_group!(benches, parse_expand_bench);
criterion_main!(benches);
