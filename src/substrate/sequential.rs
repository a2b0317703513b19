/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
//! Trivial in-caller-loop substrate, the single-threaded baseline.

use super::Substrate;

/// The sequential substrate: runs the whole interval as one chunk on the
/// calling thread.
pub struct Sequential;

impl Substrate for Sequential {
    fn num_threads(&self) -> usize {
        1
    }

    fn parallel_for(&self, len: usize, _chunk_size: usize, f: &(dyn Fn(usize, usize) + Sync)) {
        f(0, len);
    }

    fn parallel_reduce_sum(
        &self,
        len: usize,
        _chunk_size: usize,
        f: &(dyn Fn(usize, usize) -> usize + Sync),
    ) -> usize {
        f(0, len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn runs_whole_range_as_one_chunk() {
        Sequential.parallel_for(100, 10, &|begin, end| {
            assert_eq!((begin, end), (0, 100));
        });
    }
}
