/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
The mutable per-vertex label array shared by both algorithm families.

Two interpretations are layered onto the same storage, never mixed within a
single engine run:

- *Propagation*: `label[v]` is the current component tag of `v`.
- *Disjoint-set*: `label[v]` is the parent pointer of `v`.

Both interpretations start from the identity assignment `label[v] = v` and
are accessed through relaxed atomics so that concurrent workers can read and
update labels without locking. This module only provides the storage and
the primitive atomic accessors; the monotonicity invariants that make
lock-free access safe belong to the algorithms built on top of it.
*/

// Under `--cfg loom`, loom's shadow atomics replace std's so the exhaustive
// interleaving tests in `tests/concurrency.rs` can drive the real
// `find_compress`/`union_rem` implementations instead of a reimplementation.
#[cfg(loom)]
use loom::sync::atomic::{AtomicU32, Ordering};
#[cfg(not(loom))]
use std::sync::atomic::{AtomicU32, Ordering};

/// A length-`n` array of `u32` vertex labels, accessed with relaxed atomics.
///
/// `u32` bounds the vertex universe to `u32::MAX`, the reference width for
/// both the propagation tag and the disjoint-set parent pointer.
pub struct LabelArray {
    labels: Box<[AtomicU32]>,
}

impl LabelArray {
    /// Allocates a label array of `len` elements, all initialized to their
    /// own index (`label[v] = v`), the shared starting point for both
    /// interpretations.
    ///
    /// Returns `None` if `len` does not fit in a `u32`, or if the
    /// allocation itself fails: the two exhaustion paths the engine must
    /// detect.
    pub fn identity(len: usize) -> Option<Self> {
        if len > u32::MAX as usize {
            return None;
        }
        let labels: Vec<AtomicU32> = (0..len).map(|v| AtomicU32::new(v as u32)).collect();
        Some(Self {
            labels: labels.into_boxed_slice(),
        })
    }

    /// Number of vertices this array holds labels for.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether this array holds no vertices.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Racy plain-semantics read: relaxed load. Safe to call concurrently
    /// with writers; the observed value is always some valid ancestor/tag
    /// under the monotonicity invariant the callers maintain.
    #[inline(always)]
    pub fn load(&self, v: usize) -> u32 {
        self.labels[v].load(Ordering::Relaxed)
    }

    /// Relaxed store, used by the propagation engine's per-edge updates and
    /// by the disjoint-set fast paths.
    #[inline(always)]
    pub fn store(&self, v: usize, value: u32) {
        self.labels[v].store(value, Ordering::Relaxed);
    }

    /// Release store, used by `union_rem`'s bounded-retry fallback to
    /// publish a link after exhausting the CAS budget.
    #[inline(always)]
    pub fn store_release(&self, v: usize, value: u32) {
        self.labels[v].store(value, Ordering::Release);
    }

    /// Relaxed compare-exchange, the fast path of `union_rem`.
    #[inline(always)]
    pub fn compare_exchange(&self, v: usize, current: u32, new: u32) -> Result<u32, u32> {
        self.labels[v].compare_exchange_weak(current, new, Ordering::Relaxed, Ordering::Relaxed)
    }

    /// Consumes the array into a plain `Vec<u32>` snapshot, used by the
    /// counting phase and by tests that want to inspect final labels.
    pub fn into_vec(self) -> Vec<u32> {
        self.labels
            .into_vec()
            .into_iter()
            .map(|a| a.into_inner())
            .collect()
    }
}
