use hgp_core::rng::RngHandle;
use hgp_graph::{expand_cliques, gen_random_hypergraph, parse_hypergraph, path_hypergraph};
use hgp_spec::{LaplacianBuilder, LaplacianConfig, MatrixEntry, SparseMatrix};
use proptest::prelude::*;

#[test]
fn path_laplacian_has_expected_entries() {
    let adjacency = expand_cliques(&path_hypergraph(4).unwrap());
    let laplacian = LaplacianBuilder::default().build(&adjacency);

    assert_eq!(laplacian.dim(), 5);
    assert_eq!(laplacian.node_count(), 4);
    assert_eq!(laplacian.nnz(), 10);
    assert!(laplacian.matrix().row(0).is_empty());
    let degrees: Vec<f64> = (1..=4).map(|i| laplacian.degree(i)).collect();
    assert_eq!(degrees, vec![1.0, 2.0, 2.0, 1.0]);
    assert_eq!(laplacian.get(2, 1), -1.0);
    assert_eq!(laplacian.get(2, 3), -1.0);
    assert_eq!(laplacian.get(1, 3), 0.0);
    assert_eq!(laplacian.get(0, 0), 0.0);
    assert_eq!(
        laplacian.matrix().row(3),
        &[(2usize, -1.0), (3, 2.0), (4, -1.0)][..]
    );
    laplacian.check_zero_row_sums().unwrap();
    laplacian.check_symmetric().unwrap();
}

#[test]
fn overlapping_hyperedges_count_each_neighbour_once() {
    let graph = parse_hypergraph("4 3\n1 2 3\n2 3 1\n3 4 3\n").unwrap();
    let laplacian = LaplacianBuilder::default().build(&expand_cliques(&graph));
    let degrees: Vec<f64> = (1..=4).map(|i| laplacian.degree(i)).collect();
    assert_eq!(degrees, vec![2.0, 2.0, 3.0, 1.0]);
    assert_eq!(laplacian.get(3, 4), -1.0);
    assert_eq!(laplacian.get(1, 4), 0.0);
    laplacian.check_zero_row_sums().unwrap();
}

#[test]
fn small_preallocation_hint_does_not_change_the_matrix() {
    let graph = parse_hypergraph("5 1\n1 2 3 4 5\n").unwrap();
    let adjacency = expand_cliques(&graph);
    let tight = LaplacianBuilder::new(&LaplacianConfig {
        expected_max_degree: 1,
    })
    .build(&adjacency);
    assert_eq!(tight, LaplacianBuilder::default().build(&adjacency));
    assert_eq!(tight.degree(3), 4.0);
}

#[test]
fn rows_place_the_diagonal_between_lower_and_upper_neighbours() {
    let graph = parse_hypergraph("6 3\n6 3 1\n5 3 2\n4 3\n").unwrap();
    let adjacency = expand_cliques(&graph);
    for hint in [0, 2, 700] {
        let laplacian = LaplacianBuilder::new(&LaplacianConfig {
            expected_max_degree: hint,
        })
        .build(&adjacency);
        assert_eq!(
            laplacian.matrix().row(3),
            &[(1usize, -1.0), (2, -1.0), (3, 5.0), (4, -1.0), (5, -1.0), (6, -1.0)][..],
            "hint {hint}"
        );
        assert_eq!(laplacian.matrix().row(6), &[(1usize, -1.0), (3, -1.0), (6, 2.0)][..]);
        assert_eq!(laplacian.nnz(), 6 + 2 * 7);
    }
}

#[test]
fn constant_vector_lies_in_the_kernel() {
    let graph = parse_hypergraph("6 3\n1 2 3\n3 4\n4 5 6 1\n").unwrap();
    let interior = LaplacianBuilder::default()
        .build(&expand_cliques(&graph))
        .without_padding();
    assert_eq!(interior.dim(), 6);
    let ones = vec![1.0; 6];
    let mut out = vec![f64::NAN; 6];
    interior.mul_vec(&ones, &mut out);
    assert!(out.iter().all(|&v| v == 0.0));
}

#[test]
fn without_padding_shifts_indices_down() {
    let laplacian =
        LaplacianBuilder::default().build(&expand_cliques(&path_hypergraph(3).unwrap()));
    let interior = laplacian.without_padding();
    assert_eq!(interior.get(0, 0), 1.0);
    assert_eq!(interior.get(1, 1), 2.0);
    assert_eq!(interior.get(1, 0), -1.0);
    assert_eq!(interior.nnz(), laplacian.nnz());
    let dense = interior.to_dense();
    assert_eq!(dense[(2, 1)], -1.0);
    assert_eq!(dense[(0, 2)], 0.0);
}

#[test]
fn coordinate_entries_round_through_sparse_storage() {
    let entries = [
        MatrixEntry { row: 0, col: 0, value: 1.0 },
        MatrixEntry { row: 0, col: 1, value: -1.0 },
        MatrixEntry { row: 1, col: 0, value: -1.0 },
        MatrixEntry { row: 1, col: 1, value: 2.0 },
    ];
    let matrix = SparseMatrix::from_entries(2, &entries).unwrap();
    assert_eq!(matrix.row_sum(0), 0.0);
    assert_eq!(matrix.row_sum(1), 1.0);
    assert!(matrix.is_symmetric());
    assert_eq!(matrix.entries(), entries.to_vec());
}

#[test]
fn sparse_insert_checks_bounds_and_overwrites() {
    let mut matrix = SparseMatrix::zeros(2);
    let err = matrix.insert(2, 0, 1.0).unwrap_err();
    assert!(err.has_code(hgp_core::codes::INDEX_OUT_OF_BOUNDS));
    assert_eq!(err.info().context["row"], "2");
    matrix.insert(1, 0, 3.0).unwrap();
    matrix.insert(1, 0, 4.0).unwrap();
    assert_eq!(matrix.get(1, 0), 4.0);
    assert_eq!(matrix.nnz(), 1);
    assert!(!matrix.is_symmetric());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn random_laplacians_are_symmetric_with_zero_row_sums(
        seed in any::<u64>(),
        nodes in 1usize..40,
        edges in 1usize..30,
        max_size in 1usize..7,
    ) {
        prop_assume!(edges * max_size.min(nodes) >= nodes);
        let mut rng = RngHandle::from_seed(seed);
        let graph = gen_random_hypergraph(nodes, edges, max_size, &mut rng).unwrap();
        let adjacency = expand_cliques(&graph);
        let laplacian = LaplacianBuilder::default().build(&adjacency);

        prop_assert!(laplacian.check_zero_row_sums().is_ok());
        prop_assert!(laplacian.check_symmetric().is_ok());
        for (node, row) in adjacency.rows() {
            prop_assert_eq!(laplacian.degree(node.index()), row.len() as f64);
            let columns: Vec<usize> =
                laplacian.matrix().row(node.index()).iter().map(|&(col, _)| col).collect();
            prop_assert!(columns.windows(2).all(|pair| pair[0] < pair[1]));
        }
    }
}
