/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
The parallel execution substrate.

Exposes two abstractions to the engines: a parallel-for over a half-open
integer interval with caller-supplied chunk size, and a parallel reduction
(sum of non-negative integers) over the same interval. Four substrate kinds
are provided, selected by [`Parallelism`]:

- [`Sequential`](sequential::Sequential): a trivial in-caller loop.
- [`ThreadPool`](thread_pool::ThreadPool): explicit worker threads pulling
  fixed-size chunks from an atomic fetch-add dispenser.
- [`WorkStealing`](work_stealing::WorkStealing): a rayon parallel-for.
- [`ForkJoinPool`](fork_join::ForkJoinPool): a dedicated rayon thread pool
  driving a recursive fork-join split.

Every implementation guarantees that each index in the interval is visited
exactly once before the call returns, and that stores performed by a worker
happen-before the return (the substrate provides the join barrier; the
engines rely on it instead of per-iteration synchronization).
*/

pub mod fork_join;
pub mod sequential;
pub mod thread_pool;
pub mod work_stealing;

/// Default chunk size for dynamic scheduling: an experimentally tuned
/// constant. Small chunks inflate dispatcher contention; large chunks cause
/// tail imbalance on power-law graphs.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

/// Which parallel execution substrate to use for a given engine call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Parallelism {
    /// Single-threaded baseline.
    Sequential,
    /// Rayon-backed work-stealing parallel-for.
    WorkStealing,
    /// Explicit worker threads pulling chunks from an atomic dispenser.
    ThreadPool,
    /// Dedicated rayon thread pool driving a recursive fork-join split.
    ForkJoinPool,
}

impl Parallelism {
    /// All substrate kinds, in a stable order used for benchmark sweeps.
    pub const ALL: [Parallelism; 4] = [
        Parallelism::Sequential,
        Parallelism::WorkStealing,
        Parallelism::ThreadPool,
        Parallelism::ForkJoinPool,
    ];
}

impl std::fmt::Display for Parallelism {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Parallelism::Sequential => "sequential",
            Parallelism::WorkStealing => "work-stealing",
            Parallelism::ThreadPool => "thread-pool",
            Parallelism::ForkJoinPool => "fork-join",
        };
        f.write_str(name)
    }
}

/// A parallel execution substrate over a half-open integer interval.
///
/// `f` and the reduction body are passed as trait objects rather than
/// generics so that [`Parallelism::build`] can return a single boxed
/// substrate regardless of which concrete implementation was selected.
pub trait Substrate {
    /// Number of worker threads this substrate is configured to use.
    fn num_threads(&self) -> usize;

    /// Calls `f(chunk_begin, chunk_end)` for every chunk covering
    /// `0..len`, in chunks of approximately `chunk_size`. Every index in
    /// `0..len` is visited exactly once before this call returns.
    fn parallel_for(&self, len: usize, chunk_size: usize, f: &(dyn Fn(usize, usize) + Sync));

    /// Sums `f(chunk_begin, chunk_end)` over every chunk covering `0..len`.
    fn parallel_reduce_sum(
        &self,
        len: usize,
        chunk_size: usize,
        f: &(dyn Fn(usize, usize) -> usize + Sync),
    ) -> usize;
}

impl Parallelism {
    /// Builds the concrete substrate for this selection with `threads`
    /// worker threads (ignored by [`Parallelism::Sequential`]).
    pub fn build(self, threads: usize) -> Box<dyn Substrate> {
        match self {
            Parallelism::Sequential => Box::new(sequential::Sequential),
            Parallelism::WorkStealing => Box::new(work_stealing::WorkStealing::new(threads)),
            Parallelism::ThreadPool => Box::new(thread_pool::ThreadPool::new(threads)),
            Parallelism::ForkJoinPool => Box::new(fork_join::ForkJoinPool::new(threads)),
        }
    }
}
