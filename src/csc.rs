/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
The sparse incidence view: an immutable, read-only window over a graph's
adjacency pattern in compressed-sparse-column (CSC) form.

This is the engine's only input type. It is never mutated and never owned
by the engine: callers (the loader, tests, benchmarks) construct one and
hand it to [`crate::dispatch::count_components`] by reference.
*/

/// A read-only compressed-sparse-column view of a 0/1 incidence pattern.
///
/// `col_ptr[c]..col_ptr[c + 1]` indexes the rows with a nonzero in column
/// `c`. The pattern is assumed symmetric (an undirected graph): every
/// stored `(row_idx[k], c)` is treated as an edge between vertices
/// `row_idx[k]` and `c`. The view does not symmetrize or validate symmetry;
/// correctness of the undirected interpretation is the caller's
/// responsibility.
///
/// The vertex identifier space is `[0, nrows)`. Row indices are guarded
/// against `nrows` by the algorithms that consume this view rather than by
/// the view itself, so that rectangular CSC inputs (`nrows != ncols`) can be
/// tolerated by the callers that permit it (see [`crate::algo::union_find`]).
#[derive(Debug)]
pub struct CscView<'a> {
    nrows: usize,
    ncols: usize,
    nnz: usize,
    col_ptr: &'a [u64],
    row_idx: &'a [u32],
}

impl<'a> CscView<'a> {
    /// Builds a view over the given arrays without copying them.
    ///
    /// Only cheap, non-exhaustive shape checks are performed here (array
    /// lengths match `ncols`/`nnz`); content invariants such as
    /// monotonicity of `col_ptr` or range-correctness of `row_idx` are the
    /// caller's responsibility: the engine does not validate them and
    /// tolerates violations other than a length mismatch.
    pub fn new(
        nrows: usize,
        ncols: usize,
        nnz: usize,
        col_ptr: &'a [u64],
        row_idx: &'a [u32],
    ) -> Option<Self> {
        if col_ptr.len() != ncols + 1 || row_idx.len() != nnz {
            return None;
        }
        Some(Self {
            nrows,
            ncols,
            nnz,
            col_ptr,
            row_idx,
        })
    }

    /// Number of rows, i.e. the size of the vertex universe used by the
    /// union-find path's bounds check.
    #[inline(always)]
    pub fn nrows(&self) -> usize {
        self.nrows
    }

    /// Number of columns.
    #[inline(always)]
    pub fn ncols(&self) -> usize {
        self.ncols
    }

    /// Number of stored entries (`row_idx.len()`).
    #[inline(always)]
    pub fn nnz(&self) -> usize {
        self.nnz
    }

    /// The column-pointer array, length `ncols + 1`.
    #[inline(always)]
    pub fn col_ptr(&self) -> &[u64] {
        self.col_ptr
    }

    /// The row-index array, length `nnz`.
    #[inline(always)]
    pub fn row_idx(&self) -> &[u32] {
        self.row_idx
    }

    /// Returns the stored row indices for column `c`.
    #[inline(always)]
    pub fn column(&self, c: usize) -> &[u32] {
        let start = self.col_ptr[c] as usize;
        let end = self.col_ptr[c + 1] as usize;
        &self.row_idx[start..end]
    }

    /// The vertex universe size used to size the label array: `max(nrows,
    /// ncols)`.
    #[inline(always)]
    pub fn num_vertices(&self) -> usize {
        self.nrows.max(self.ncols)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_mismatched_lengths() {
        let col_ptr = [0u64, 1, 2];
        let row_idx = [0u32];
        assert!(CscView::new(2, 2, 2, &col_ptr, &row_idx).is_none());
    }

    #[test]
    fn column_slicing() {
        let col_ptr = [0u64, 2, 4, 6];
        let row_idx = [1u32, 2, 0, 2, 0, 1];
        let view = CscView::new(3, 3, 6, &col_ptr, &row_idx).unwrap();
        assert_eq!(view.column(0), &[1, 2]);
        assert_eq!(view.column(1), &[0, 2]);
        assert_eq!(view.column(2), &[0, 1]);
    }
}
