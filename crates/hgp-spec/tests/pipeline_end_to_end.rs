use std::fs;

use hgp_core::errors::{codes, ErrorFamily};
use hgp_graph::{canonical_hash, parse_hypergraph, path_hypergraph};
use hgp_spec::{
    partition_file, partition_hypergraph, partition_with_solver, DenseSolver, PartitionConfig,
    SolverConfig, SolverKind,
};

fn checked_config() -> PartitionConfig {
    PartitionConfig {
        verify_invariants: true,
        ..PartitionConfig::default()
    }
}

fn labels(report: &hgp_spec::PartitionReport) -> Vec<u8> {
    report.partition.labels().iter().map(|p| p.label()).collect()
}

#[test]
fn path_of_four_splits_in_the_middle() {
    let graph = path_hypergraph(4).unwrap();
    let report = partition_hypergraph(&graph, &checked_config()).unwrap();

    assert_eq!(labels(&report), vec![0, 0, 1, 1]);
    assert!(report.eigenvalues[0].abs() < 1e-10);
    assert!((report.eigenvalues[1] - (2.0 - 2f64.sqrt())).abs() < 1e-10);
    assert!(report.fiedler.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(report.part_sizes, [2, 2]);
    assert_eq!(report.cut_size, 1);
    assert_eq!(report.max_degree, 2);
    assert_eq!(report.laplacian_nnz, 10);
    assert_eq!(report.graph_hash, canonical_hash(&graph));
}

#[test]
fn triangle_with_pendant_separates_the_pendant_side() {
    let graph = parse_hypergraph("4 3\n1 2 3\n2 3 1\n3 4 3\n").unwrap();
    let report = partition_hypergraph(&graph, &checked_config()).unwrap();
    assert!((report.eigenvalues[1] - 1.0).abs() < 1e-10);
    assert_eq!(labels(&report), vec![0, 0, 1, 1]);
    assert_eq!(report.cut_size, 2);
}

#[test]
fn bridged_cliques_split_along_the_bridge() {
    let graph =
        parse_hypergraph("20 3\n1 2 3 4 5 6 7 8 9 10\n11 12 13 14 15 16 17 18 19 20\n10 11\n")
            .unwrap();
    let config = PartitionConfig {
        solver: SolverConfig {
            ncv_multiplier: 3,
            ..SolverConfig::default()
        },
        verify_invariants: true,
        ..PartitionConfig::default()
    };
    let report = partition_hypergraph(&graph, &config).unwrap();
    assert_eq!(report.solver, "lanczos");
    let expected: Vec<u8> = (0..20).map(|i| u8::from(i >= 10)).collect();
    assert_eq!(labels(&report), expected);
    assert_eq!(report.cut_size, 1);
    assert_eq!(report.part_sizes, [10, 10]);
}

#[test]
fn long_path_with_lanczos_matches_dense_partition() {
    let graph = path_hypergraph(40).unwrap();
    let lanczos = partition_hypergraph(&graph, &checked_config()).unwrap();
    let dense = partition_with_solver(&graph, &checked_config(), &DenseSolver).unwrap();
    assert_eq!(lanczos.solver, "lanczos");
    assert_eq!(dense.solver, "dense");
    assert_eq!(lanczos.partition, dense.partition);
    assert_eq!(lanczos.part_sizes, [20, 20]);
    assert_eq!(lanczos.cut_size, 1);
    assert!((lanczos.eigenvalues[1] - dense.eigenvalues[1]).abs() < 1e-8);
}

#[test]
fn dense_kind_is_selectable_from_config() {
    let config = PartitionConfig {
        solver: SolverConfig {
            kind: SolverKind::Dense,
            ..SolverConfig::default()
        },
        ..PartitionConfig::default()
    };
    let report = partition_hypergraph(&path_hypergraph(6).unwrap(), &config).unwrap();
    assert_eq!(report.solver, "dense");
    assert_eq!(report.part_sizes, [3, 3]);
}

#[test]
fn repeated_runs_produce_identical_reports() {
    let graph = path_hypergraph(40).unwrap();
    let config = PartitionConfig::default();
    assert_eq!(
        partition_hypergraph(&graph, &config).unwrap(),
        partition_hypergraph(&graph, &config).unwrap()
    );
}

#[test]
fn single_node_cannot_produce_two_pairs() {
    let graph = parse_hypergraph("1 1\n1\n").unwrap();
    let err = partition_hypergraph(&graph, &PartitionConfig::default()).unwrap_err();
    assert_eq!(err.family(), ErrorFamily::Solver);
    assert!(err.has_code(codes::NOT_COMPUTED));
}

#[test]
fn invalid_config_is_rejected_before_any_work() {
    let config = PartitionConfig {
        solver: SolverConfig {
            max_restarts: 0,
            ..SolverConfig::default()
        },
        ..PartitionConfig::default()
    };
    let err = partition_hypergraph(&path_hypergraph(4).unwrap(), &config).unwrap_err();
    assert_eq!(err.family(), ErrorFamily::Config);
}

#[test]
fn partition_file_reads_and_reports() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("path.hgr");
    fs::write(&path, "4 3\n1 2\n2 3\n3 4\n").unwrap();
    let report = partition_file(&path, &PartitionConfig::default()).unwrap();
    assert_eq!(labels(&report), vec![0, 0, 1, 1]);

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["partition"], serde_json::json!([0, 0, 1, 1]));
    assert_eq!(json["cut_size"], 1);
}

#[test]
fn partition_file_reports_parse_and_io_failures() {
    let dir = tempfile::tempdir().unwrap();
    let missing = partition_file(dir.path().join("missing.hgr"), &PartitionConfig::default())
        .unwrap_err();
    assert_eq!(missing.family(), ErrorFamily::Io);
    assert!(missing.has_code(codes::READ_FAILED));

    let path = dir.path().join("gap.hgr");
    fs::write(&path, "3 1\n1 2 4\n").unwrap();
    let gap = partition_file(&path, &PartitionConfig::default()).unwrap_err();
    assert_eq!(gap.family(), ErrorFamily::Parse);
    assert!(gap.has_code(codes::NON_CONTIGUOUS_NODES));
}
