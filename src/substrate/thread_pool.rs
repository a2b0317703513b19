/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
//! Explicit worker threads pulling fixed-size chunks from an atomic
//! fetch-add dispenser.
//!
//! Grounded on the scoped-thread worker pool in
//! `maneatingape/advent-of-code-rust`'s `util::thread` module: a shared
//! counter is fetch-added by each worker to claim the next chunk, with
//! `std::thread::scope` providing the join barrier instead of a
//! long-lived pool.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::Substrate;

/// A worker-pool substrate backed by `std::thread::scope`.
///
/// Unlike a long-lived thread pool, each call to [`Substrate::parallel_for`]
/// or [`Substrate::parallel_reduce_sum`] spawns `threads` scoped workers
/// that race on a single [`AtomicUsize`] chunk dispenser and rejoin before
/// returning, so the scope exit is the only blocking point the engine sees
/// (a phase join).
pub struct ThreadPool {
    threads: usize,
}

impl ThreadPool {
    /// Builds a thread-pool substrate with `threads` workers (at least 1).
    pub fn new(threads: usize) -> Self {
        Self {
            threads: threads.max(1),
        }
    }
}

impl Substrate for ThreadPool {
    fn num_threads(&self) -> usize {
        self.threads
    }

    fn parallel_for(&self, len: usize, chunk_size: usize, f: &(dyn Fn(usize, usize) + Sync)) {
        if len == 0 {
            return;
        }
        let chunk_size = chunk_size.max(1);
        let next = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..self.threads {
                scope.spawn(|| loop {
                    let begin = next.fetch_add(chunk_size, Ordering::Relaxed);
                    if begin >= len {
                        break;
                    }
                    let end = (begin + chunk_size).min(len);
                    f(begin, end);
                });
            }
        });
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
        let next = AtomicUsize::new(0);
        let total = AtomicUsize::new(0);

        thread::scope(|scope| {
            for _ in 0..self.threads {
                scope.spawn(|| {
                    let mut local = 0usize;
                    loop {
                        let begin = next.fetch_add(chunk_size, Ordering::Relaxed);
                        if begin >= len {
                            break;
                        }
                        let end = (begin + chunk_size).min(len);
                        local += f(begin, end);
                    }
                    total.fetch_add(local, Ordering::Relaxed);
                });
            }
        });

        total.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_interval_with_small_chunks() {
        let pool = ThreadPool::new(4);
        let hits = std::sync::Mutex::new(vec![0u32; 37]);
        pool.parallel_for(37, 3, &|begin, end| {
            let mut hits = hits.lock().unwrap();
            for i in begin..end {
                hits[i] += 1;
            }
        });
        assert!(hits.lock().unwrap().iter().all(|&c| c == 1));
    }

    #[test]
    fn single_thread_is_equivalent_to_sequential() {
        let pool = ThreadPool::new(1);
        let sum = pool.parallel_reduce_sum(1000, 4096, &|begin, end| end - begin);
        assert_eq!(sum, 1000);
    }
}
