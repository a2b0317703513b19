/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
The single entry point callers use to run a connected-components count:
selects an algorithm family and a parallel substrate, builds the substrate,
runs it, and maps the result onto the engine's sentinel return-value
contract.

This boundary never throws: allocation failure inside either engine, or an
invalid `thread_count`, is folded into the `-1` sentinel rather than a
`Result`. Everything above this module (loader, CLI, report) deals in
`Result`/`ConcompError`; everything below it deals in `Option`.
*/

use crate::algo::{propagation, union_find};
use crate::csc::CscView;
pub use crate::substrate::Parallelism;
use crate::substrate::DEFAULT_CHUNK_SIZE;

/// Which algorithm family to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Iterative min-label propagation.
    Propagation,
    /// Lock-free union-find with Rem's algorithm.
    UnionFind,
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Variant::Propagation => "propagation",
            Variant::UnionFind => "union-find",
        };
        f.write_str(name)
    }
}

/// Counts connected components in `view` using `variant` over `parallelism`
/// with `thread_count` workers.
///
/// Returns `0` for an empty graph (`nrows() == 0`, the degenerate case), the
/// component count on success, or `-1` if either engine reports
/// allocation failure. `thread_count` is clamped to at least `1`; substrates
/// that do not use a thread count (`Parallelism::Sequential`) ignore it.
pub fn count_components(
    view: &CscView,
    thread_count: usize,
    variant: Variant,
    parallelism: Parallelism,
) -> i64 {
    if view.nrows() == 0 {
        return 0;
    }

    let thread_count = thread_count.max(1);
    let substrate = parallelism.build(thread_count);

    let result = match variant {
        Variant::Propagation => propagation::count_components(view, substrate.as_ref(), DEFAULT_CHUNK_SIZE),
        Variant::UnionFind => union_find::count_components(view, substrate.as_ref(), DEFAULT_CHUNK_SIZE),
    };

    match result {
        Some(count) => count as i64,
        None => -1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_graph_returns_zero_regardless_of_variant() {
        let col_ptr = [0u64];
        let row_idx: [u32; 0] = [];
        let view = CscView::new(0, 0, 0, &col_ptr, &row_idx).unwrap();
        for &variant in &[Variant::Propagation, Variant::UnionFind] {
            for &p in Parallelism::ALL.iter() {
                assert_eq!(count_components(&view, 4, variant, p), 0);
            }
        }
    }

    #[test]
    fn both_variants_agree_on_a_small_graph() {
        let col_ptr = [0u64, 1, 3, 5, 7, 9, 10];
        let row_idx = [1u32, 0, 2, 1, 3, 2, 4, 3, 5, 4];
        let view = CscView::new(6, 6, 10, &col_ptr, &row_idx).unwrap();
        for &p in Parallelism::ALL.iter() {
            let a = count_components(&view, 4, Variant::Propagation, p);
            let b = count_components(&view, 4, Variant::UnionFind, p);
            assert_eq!(a, 1);
            assert_eq!(b, 1);
        }
    }

    #[test]
    fn zero_thread_count_is_clamped_not_rejected() {
        let col_ptr = [0u64, 1, 2];
        let row_idx = [1u32, 0];
        let view = CscView::new(2, 2, 2, &col_ptr, &row_idx).unwrap();
        assert_eq!(
            count_components(&view, 0, Variant::Propagation, Parallelism::ThreadPool),
            1
        );
    }
}
