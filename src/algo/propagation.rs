/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Iterative label-propagation engine.

Each iteration traverses every stored edge and pushes the smaller of its two
endpoint labels onto the larger endpoint via a relaxed atomic store. A
shared convergence flag, reset at the top of each iteration and set by any
worker that performed an update, drives the outer `while` loop. Termination
follows from a sum-of-labels argument: every update strictly decreases the
sum, which is bounded below by the sum of per-component minima.

Grounded on the outer convergence loop and `AtomicBool`/`AtomicUsize`
shared-state pattern of the teacher's layered label propagation
(`src/algo/llp/mod.rs` in the original checkout), generalized from LLP's
entropy-maximizing neighbor-label rule to a simple min-label rule.
*/

use std::sync::atomic::{AtomicBool, Ordering};

use crate::bitmap::count_unique_labels;
use crate::csc::CscView;
use crate::label::LabelArray;
use crate::substrate::Substrate;

/// Runs label propagation to convergence and returns the number of
/// connected components, or `None` on label-array allocation failure.
pub fn count_components(
    view: &CscView,
    substrate: &dyn Substrate,
    chunk_size: usize,
) -> Option<usize> {
    let n = view.num_vertices();
    if n == 0 {
        return Some(0);
    }

    let labels = LabelArray::identity(n)?;
    let changed = AtomicBool::new(true);

    while changed.load(Ordering::Relaxed) {
        changed.store(false, Ordering::Relaxed);

        substrate.parallel_for(view.ncols(), chunk_size, &|begin, end| {
            let mut local_changed = false;

            for c in begin..end {
                for &r in view.column(c) {
                    let r = r as usize;
                    if r >= view.nrows() {
                        // The propagation path assumes in-range row
                        // indices; skip defensively rather than panicking
                        // on malformed input.
                        continue;
                    }

                    let lc = labels.load(c);
                    let lr = labels.load(r);
                    if lc != lr {
                        let min_label = lc.min(lr);
                        if lc > lr {
                            labels.store(c, min_label);
                        } else {
                            labels.store(r, min_label);
                        }
                        local_changed = true;
                    }
                }
            }

            if local_changed {
                changed.store(true, Ordering::Relaxed);
            }
        });
    }

    let snapshot = labels.into_vec();
    Some(count_unique_labels(&snapshot))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::substrate::Parallelism;

    fn run(view: &CscView, parallelism: Parallelism) -> usize {
        let substrate = parallelism.build(4);
        count_components(view, substrate.as_ref(), 4096).unwrap()
    }

    #[test]
    fn empty_graph_is_all_singletons() {
        let col_ptr = [0u64; 6];
        let row_idx: [u32; 0] = [];
        let view = CscView::new(5, 5, 0, &col_ptr, &row_idx).unwrap();
        for &p in Parallelism::ALL.iter() {
            assert_eq!(run(&view, p), 5);
        }
    }

    #[test]
    fn triangle_is_one_component() {
        let col_ptr = [0u64, 2, 4, 6];
        let row_idx = [1u32, 2, 0, 2, 0, 1];
        let view = CscView::new(3, 3, 6, &col_ptr, &row_idx).unwrap();
        for &p in Parallelism::ALL.iter() {
            assert_eq!(run(&view, p), 1);
        }
    }

    #[test]
    fn two_disjoint_edges() {
        let col_ptr = [0u64, 1, 2, 3, 4];
        let row_idx = [1u32, 0, 3, 2];
        let view = CscView::new(4, 4, 4, &col_ptr, &row_idx).unwrap();
        for &p in Parallelism::ALL.iter() {
            assert_eq!(run(&view, p), 2);
        }
    }

    #[test]
    fn path_of_six_vertices_is_one_component() {
        let col_ptr = [0u64, 1, 3, 5, 7, 9, 10];
        let row_idx = [1u32, 0, 2, 1, 3, 2, 4, 3, 5, 4];
        let view = CscView::new(6, 6, 10, &col_ptr, &row_idx).unwrap();
        for &p in Parallelism::ALL.iter() {
            assert_eq!(run(&view, p), 1);
        }
    }

    #[test]
    fn star_on_five_leaves_is_one_component() {
        // Vertex 0 connected to 1..=5, symmetric.
        let mut col_ptr = vec![0u64];
        let mut row_idx = vec![];
        // Column 0: rows 1..=5
        row_idx.extend([1u32, 2, 3, 4, 5]);
        col_ptr.push(row_idx.len() as u64);
        // Columns 1..=5: row 0 each.
        for _ in 1..=5 {
            row_idx.push(0);
            col_ptr.push(row_idx.len() as u64);
        }
        let view = CscView::new(6, 6, row_idx.len(), &col_ptr, &row_idx).unwrap();
        for &p in Parallelism::ALL.iter() {
            assert_eq!(run(&view, p), 1);
        }
    }

    #[test]
    fn three_pairs_and_two_singletons() {
        // nrows = ncols = 8, edges (0-1)(2-3)(4-5), symmetric.
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
        for &p in Parallelism::ALL.iter() {
            assert_eq!(run(&view, p), 5);
        }
    }

    #[test]
    fn canonical_labels_equal_min_vertex_in_component() {
        let col_ptr = [0u64, 1, 3, 5, 7, 9, 10];
        let row_idx = [1u32, 0, 2, 1, 3, 2, 4, 3, 5, 4];
        let view = CscView::new(6, 6, 10, &col_ptr, &row_idx).unwrap();
        let substrate = Parallelism::Sequential.build(1);
        let n = view.num_vertices();
        let labels = LabelArray::identity(n).unwrap();
        let changed = AtomicBool::new(true);
        while changed.load(Ordering::Relaxed) {
            changed.store(false, Ordering::Relaxed);
            substrate.parallel_for(view.ncols(), 4096, &|begin, end| {
                let mut local_changed = false;
                for c in begin..end {
                    for &r in view.column(c) {
                        let r = r as usize;
                        let lc = labels.load(c);
                        let lr = labels.load(r);
                        if lc != lr {
                            let m = lc.min(lr);
                            if lc > lr {
                                labels.store(c, m);
                            } else {
                                labels.store(r, m);
                            }
                            local_changed = true;
                        }
                    }
                }
                if local_changed {
                    changed.store(true, Ordering::Relaxed);
                }
            });
        }
        for v in 0..n {
            assert_eq!(labels.load(v), 0);
        }
    }
}
