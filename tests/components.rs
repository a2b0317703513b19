//! End-to-end connected-component scenarios, driven through the public
//! dispatch facade and the loader rather than the internal engine
//! functions directly, so these tests exercise the same path the `concomp`
//! binary does.

use concomp::csc::CscView;
use concomp::dispatch::{count_components, Variant};
use concomp::loader::{self, LoadedMatrix};
use concomp::substrate::Parallelism;

fn all_configs_agree(view: &CscView, expected: i64) {
    for &variant in &[Variant::Propagation, Variant::UnionFind] {
        for &parallelism in Parallelism::ALL.iter() {
            assert_eq!(
                count_components(view, 4, variant, parallelism),
                expected,
                "variant={variant} parallelism={parallelism}"
            );
        }
    }
}

#[test]
fn empty_graph_is_all_singletons() {
    let col_ptr = [0u64; 6];
    let row_idx: [u32; 0] = [];
    let view = CscView::new(5, 5, 0, &col_ptr, &row_idx).unwrap();
    all_configs_agree(&view, 5);
}

#[test]
fn triangle_is_one_component() {
    let col_ptr = [0u64, 2, 4, 6];
    let row_idx = [1u32, 2, 0, 2, 0, 1];
    let view = CscView::new(3, 3, 6, &col_ptr, &row_idx).unwrap();
    all_configs_agree(&view, 1);
}

#[test]
fn two_disjoint_edges() {
    let col_ptr = [0u64, 1, 2, 3, 4];
    let row_idx = [1u32, 0, 3, 2];
    let view = CscView::new(4, 4, 4, &col_ptr, &row_idx).unwrap();
    all_configs_agree(&view, 2);
}

#[test]
fn path_of_six_vertices_is_one_component() {
    let col_ptr = [0u64, 1, 3, 5, 7, 9, 10];
    let row_idx = [1u32, 0, 2, 1, 3, 2, 4, 3, 5, 4];
    let view = CscView::new(6, 6, 10, &col_ptr, &row_idx).unwrap();
    all_configs_agree(&view, 1);
}

#[test]
fn star_on_five_leaves_is_one_component() {
    let mut col_ptr = vec![0u64];
    let mut row_idx = vec![];
    row_idx.extend([1u32, 2, 3, 4, 5]);
    col_ptr.push(row_idx.len() as u64);
    for _ in 1..=5 {
        row_idx.push(0);
        col_ptr.push(row_idx.len() as u64);
    }
    let view = CscView::new(6, 6, row_idx.len(), &col_ptr, &row_idx).unwrap();
    all_configs_agree(&view, 1);
}

#[test]
fn three_pairs_and_two_singletons() {
    let mut col_ptr = vec![0u64];
    let mut row_idx: Vec<u32> = vec![];
    let pairs = [(0u32, 1u32), (2, 3), (4, 5)];
    for c in 0..8u32 {
        for &(a, b) in &pairs {
            if c == a {
                row_idx.push(b);
            } else if c == b {
                row_idx.push(a);
            }
        }
        col_ptr.push(row_idx.len() as u64);
    }
    let view = CscView::new(8, 8, row_idx.len(), &col_ptr, &row_idx).unwrap();
    all_configs_agree(&view, 5);
}

#[test]
fn round_trip_through_the_binary_loader() {
    let matrix = LoadedMatrix {
        nrows: 6,
        ncols: 6,
        nnz: 10,
        col_ptr: vec![0, 1, 3, 5, 7, 9, 10],
        row_idx: vec![1, 0, 2, 1, 3, 2, 4, 3, 5, 4],
    };
    let path = std::env::temp_dir().join("concomp-components-test.bin");
    loader::write_binary(&path, &matrix).unwrap();
    let loaded = loader::load(&path).unwrap();
    let view = loaded.view();
    all_configs_agree(&view, 1);
    let _ = std::fs::remove_file(&path);
}

#[test]
fn round_trip_through_the_matrix_market_loader() {
    let contents = "%%MatrixMarket matrix coordinate pattern symmetric\n\
                     3 3 6\n\
                     2 1\n\
                     3 1\n\
                     1 2\n\
                     3 2\n\
                     1 3\n\
                     2 3\n";
    let path = std::env::temp_dir().join("concomp-components-test.mtx");
    std::fs::write(&path, contents).unwrap();
    let loaded = loader::load(&path).unwrap();
    let view = loaded.view();
    all_configs_agree(&view, 1);
    let _ = std::fs::remove_file(&path);
}
