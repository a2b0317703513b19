/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Lock-free union-find engine.

Three parallel phases over a shared label array: union every stored edge
with Rem's algorithm, flatten every vertex with path compression, then
count roots with a parallel reduction. Out-of-range row indices
(`row_idx[j] >= nrows`) are silently skipped, which permits rectangular CSC
inputs where the vertex universe is determined by `nrows`.

Grounded on `neo4j-labs/graph`'s `DisjointSetStruct::compress` (`(0..len)
.into_par_iter().for_each(|id| self.find(id))`) for the flatten phase's
parallel-over-vertices shape, generalized to the crate's own [`Substrate`]
abstraction instead of a direct rayon dependency.
*/

use crate::csc::CscView;
use crate::dsu::{find_compress, union_rem};
use crate::label::LabelArray;
use crate::substrate::Substrate;

/// Runs union-find to completion and returns the number of connected
/// components, or `None` on label-array allocation failure.
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

    // Union phase: parallel over columns, dynamic scheduling (edge counts
    // are highly skewed on scale-free graphs).
    substrate.parallel_for(view.ncols(), chunk_size, &|begin, end| {
        for c in begin..end {
            for &r in view.column(c) {
                let r = r as usize;
                if r >= view.nrows() {
                    continue;
                }
                union_rem(&labels, r as u32, c as u32);
            }
        }
    });

    // Flatten phase: parallel over vertices.
    substrate.parallel_for(n, chunk_size, &|begin, end| {
        for v in begin..end {
            find_compress(&labels, v as u32);
        }
    });

    // Count phase: parallel reduction over roots.
    let count = substrate.parallel_reduce_sum(n, chunk_size, &|begin, end| {
        let mut local = 0usize;
        for v in begin..end {
            if labels.load(v) == v as u32 {
                local += 1;
            }
        }
        local
    });

    Some(count)
}
