/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
//! Recursive fork-join substrate backed by a dedicated rayon thread pool.
//!
//! Unlike [`super::work_stealing::WorkStealing`], which steals work chunks
//! from a flat queue, this substrate recursively halves the interval with
//! `rayon::join` until chunks reach `chunk_size`, so a parent task only
//! completes after both of its children have: the textbook fork-join
//! discipline rather than work-stealing's queue semantics. Grounded on the
//! same `rayon::ThreadPoolBuilder` usage as `WorkStealing`.

use super::Substrate;

/// A fork-join substrate backed by a dedicated `rayon::ThreadPool`.
pub struct ForkJoinPool {
    pool: rayon::ThreadPool,
}

impl ForkJoinPool {
    /// Builds a fork-join substrate with `threads` rayon workers.
    pub fn new(threads: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .expect("failed to build rayon thread pool");
        Self { pool }
    }
}

fn fork_join_for(begin: usize, end: usize, chunk_size: usize, f: &(dyn Fn(usize, usize) + Sync)) {
    if end - begin <= chunk_size {
        f(begin, end);
        return;
    }
    let mid = begin + (end - begin) / 2;
    rayon::join(
        || fork_join_for(begin, mid, chunk_size, f),
        || fork_join_for(mid, end, chunk_size, f),
    );
}

fn fork_join_sum(
    begin: usize,
    end: usize,
    chunk_size: usize,
    f: &(dyn Fn(usize, usize) -> usize + Sync),
) -> usize {
    if end - begin <= chunk_size {
        return f(begin, end);
    }
    let mid = begin + (end - begin) / 2;
    let (left, right) = rayon::join(
        || fork_join_sum(begin, mid, chunk_size, f),
        || fork_join_sum(mid, end, chunk_size, f),
    );
    left + right
}

impl Substrate for ForkJoinPool {
    fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn parallel_for(&self, len: usize, chunk_size: usize, f: &(dyn Fn(usize, usize) + Sync)) {
        if len == 0 {
            return;
        }
        let chunk_size = chunk_size.max(1);
        self.pool.install(|| fork_join_for(0, len, chunk_size, f));
    }

    fn parallel_reduce_sum(
        &self,
        len: usize,
        chunk_size: usize,
        f: &(dyn Fn(usize, usize) -> usize + Sync),
    ) -> usize {
        if len == 0 {
            return 0;
        }
        let chunk_size = chunk_size.max(1);
        self.pool.install(|| fork_join_sum(0, len, chunk_size, f))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_interval() {
        let substrate = ForkJoinPool::new(4);
        let hits = std::sync::Mutex::new(vec![0u32; 513]);
        substrate.parallel_for(513, 32, &|begin, end| {
            let mut hits = hits.lock().unwrap();
            for i in begin..end {
                hits[i] += 1;
            }
        });
        assert!(hits.lock().unwrap().iter().all(|&c| c == 1));
    }

    #[test]
    fn reduces_correctly() {
        let substrate = ForkJoinPool::new(4);
        let sum = substrate.parallel_reduce_sum(10_000, 64, &|begin, end| end - begin);
        assert_eq!(sum, 10_000);
    }
}
