use hgp_core::rng::RngHandle;
use hgp_graph::{
    canonical_hash, gen_random_hypergraph, graph_from_bytes, graph_from_json, graph_to_bytes,
    graph_to_json, parse_hypergraph, write_hgr, Hyperedge, Hypergraph,
};
use proptest::prelude::*;

fn sample_graph() -> Hypergraph {
    Hypergraph::new(
        5,
        vec![
            Hyperedge::from_raw(&[1, 2, 3]),
            Hyperedge::from_raw(&[5, 4]),
            Hyperedge::from_raw(&[3, 4]),
            Hyperedge::from_raw(&[2]),
        ],
    )
    .unwrap()
}

#[test]
fn hand_built_graph_round_trips_through_text() {
    let graph = sample_graph();
    let text = write_hgr(&graph);
    assert_eq!(text, "5 4\n1 2 3\n5 4\n3 4\n2\n");
    let reparsed = parse_hypergraph(&text).unwrap();
    assert_eq!(reparsed, graph);
    assert_eq!(canonical_hash(&reparsed), canonical_hash(&graph));
}

#[test]
fn snapshots_restore_identical_graphs() {
    let graph = sample_graph();
    let json = graph_to_json(&graph).unwrap();
    assert_eq!(graph_from_json(&json).unwrap(), graph);
    let bytes = graph_to_bytes(&graph).unwrap();
    assert_eq!(graph_from_bytes(&bytes).unwrap(), graph);
}

#[test]
fn snapshot_restore_revalidates() {
    let json = r#"{ "node_count": 3, "hyperedges": [[1, 2], [2, 4]] }"#;
    let err = graph_from_json(json).unwrap_err();
    assert!(err.has_code(hgp_core::codes::NON_CONTIGUOUS_NODES));
    assert!(graph_from_json("not json")
        .unwrap_err()
        .has_code(hgp_core::codes::DESERIALIZE_JSON));
    assert!(graph_from_bytes(&[0xff])
        .unwrap_err()
        .has_code(hgp_core::codes::DESERIALIZE_BYTES));
}

#[test]
fn hash_depends_on_hyperedge_order() {
    let a = Hypergraph::new(
        3,
        vec![Hyperedge::from_raw(&[1, 2]), Hyperedge::from_raw(&[2, 3])],
    )
    .unwrap();
    let b = Hypergraph::new(
        3,
        vec![Hyperedge::from_raw(&[2, 3]), Hyperedge::from_raw(&[1, 2])],
    )
    .unwrap();
    assert_ne!(canonical_hash(&a), canonical_hash(&b));
    assert_eq!(canonical_hash(&a).len(), 64);
}

#[test]
fn generator_is_deterministic_per_seed() {
    let a = gen_random_hypergraph(30, 12, 5, &mut RngHandle::from_seed(9)).unwrap();
    let b = gen_random_hypergraph(30, 12, 5, &mut RngHandle::from_seed(9)).unwrap();
    assert_eq!(a, b);
    let err = gen_random_hypergraph(30, 2, 5, &mut RngHandle::from_seed(9)).unwrap_err();
    assert!(err.has_code(hgp_core::codes::INSUFFICIENT_CAPACITY));
    assert_eq!(err.info().context["capacity"], "10");
}

proptest! {
    #[test]
    fn random_graphs_round_trip_through_text(
        seed in any::<u64>(),
        nodes in 1usize..40,
        edges in 1usize..20,
        max_size in 1usize..8,
    ) {
        prop_assume!(edges * max_size.min(nodes) >= nodes);
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random_hypergraph(nodes, edges, max_size, &mut rng).unwrap();
        prop_assert_eq!(graph.node_count(), nodes);
        prop_assert_eq!(graph.edge_count(), edges);

        let reparsed = parse_hypergraph(&write_hgr(&graph)).unwrap();
        prop_assert_eq!(&reparsed, &graph);
        prop_assert_eq!(canonical_hash(&reparsed), canonical_hash(&graph));
    }
}
