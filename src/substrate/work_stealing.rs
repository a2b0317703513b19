/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
//! Rayon-backed work-stealing parallel-for.
//!
//! Grounded on the teacher's use of `rayon::ThreadPoolBuilder` plus
//! `par_chunks_mut`/`par_apply` in `src/algo/llp/mod.rs`: a dedicated pool
//! is built once per substrate instance and `install`ed for each call so
//! that rayon's global pool (and its default thread count) is never
//! touched.

use rayon::prelude::*;

use super::Substrate;

/// A work-stealing substrate backed by a dedicated `rayon::ThreadPool`.
pub struct WorkStealing {
    pool: rayon::ThreadPool,
}

impl WorkStealing {
    /// Builds a work-stealing substrate with `threads` rayon workers.
    pub fn new(threads: usize) -> Self {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .build()
            .expect("failed to build rayon thread pool");
        Self { pool }
    }
}

impl Substrate for WorkStealing {
    fn num_threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    fn parallel_for(&self, len: usize, chunk_size: usize, f: &(dyn Fn(usize, usize) + Sync)) {
        if len == 0 {
            return;
        }
        let chunk_size = chunk_size.max(1);
        self.pool.install(|| {
            (0..len)
                .step_by(chunk_size)
                .par_bridge()
                .for_each(|begin| {
                    let end = (begin + chunk_size).min(len);
                    f(begin, end);
                });
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
        self.pool.install(|| {
            (0..len)
                .step_by(chunk_size)
                .par_bridge()
                .map(|begin| {
                    let end = (begin + chunk_size).min(len);
                    f(begin, end)
                })
                .sum()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_interval() {
        let substrate = WorkStealing::new(4);
        let hits = std::sync::Mutex::new(vec![0u32; 257]);
        substrate.parallel_for(257, 16, &|begin, end| {
            let mut hits = hits.lock().unwrap();
            for i in begin..end {
                hits[i] += 1;
            }
        });
        assert!(hits.lock().unwrap().iter().all(|&c| c == 1));
    }
}
