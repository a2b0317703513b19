/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Lock-free disjoint-set primitives: `find_compress` and `union_rem`.

Grounded on the CAS-based path-halving `find`/`union` pair in
`neo4j-labs/graph`'s `DisjointSetStruct` (`dss.rs` in the example pack) and
on the canonical-ordering argument in `rust-gds`'s
`HugeAtomicDisjointSetStruct`, adapted into a two-pass path-compressing
`find_compress` and Rem's bounded-retry `union_rem`.

Both functions operate on a shared [`LabelArray`] and never allocate or
fail; the worst case under contention is extra retries, never an error.
*/

use crate::label::LabelArray;

/// Bounded retry budget for `union_rem`'s CAS fast path.
const UNION_REM_RETRIES: u32 = 10;

/// Two-pass find with path compression.
///
/// First pass walks parent pointers until a fixed point (`label[r] == r`)
/// is reached. Second pass walks `x` again, redirecting every intermediate
/// node directly to the root with a plain relaxed store, skipping the
/// store when the current value already matches (guards against redundant
/// writes and against looping forever if another worker already
/// re-pointed `x`).
///
/// The returned root may be stale the instant this function returns, since
/// another thread may re-union it concurrently. Callers that need to act on
/// root equality (e.g. union) must re-`find` rather than reuse a cached
/// root.
pub fn find_compress(labels: &LabelArray, x: u32) -> u32 {
    let mut root = x;
    loop {
        let parent = labels.load(root as usize);
        if parent == root {
            break;
        }
        root = parent;
    }

    let mut cur = x;
    while cur != root {
        let next = labels.load(cur as usize);
        if next == root {
            break;
        }
        labels.store(cur as usize, root);
        cur = next;
    }

    root
}

/// Rem's algorithm: CAS-based union with canonical ordering (the smaller
/// root always absorbs the larger one) and a bounded retry budget.
///
/// Canonical ordering is a correctness requirement, not a tie-break: it
/// guarantees every link strictly decreases the linked node's label, which
/// forbids cycles regardless of CAS interleaving.
///
/// After [`UNION_REM_RETRIES`] failed CAS attempts, falls back to a single
/// unconditional release store (see the Open Question decision in
/// DESIGN.md: the plain fallback, not an unbounded CAS loop).
pub fn union_rem(labels: &LabelArray, a: u32, b: u32) {
    let mut a = a;
    let mut b = b;

    for _ in 0..UNION_REM_RETRIES {
        let root_a = find_compress(labels, a);
        let root_b = find_compress(labels, b);
        if root_a == root_b {
            return;
        }

        let (small, large) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };

        match labels.compare_exchange(large as usize, large, small) {
            Ok(_) => return,
            Err(observed) => {
                // Retry with the freshly observed parent of the node we
                // failed to redirect.
                a = small;
                b = observed;
            }
        }
    }

    let root_a = find_compress(labels, a);
    let root_b = find_compress(labels, b);
    if root_a != root_b {
        let (small, large) = if root_a < root_b {
            (root_a, root_b)
        } else {
            (root_b, root_a)
        };
        labels.store_release(large as usize, small);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_on_identity_is_self() {
        let labels = LabelArray::identity(4).unwrap();
        for v in 0..4 {
            assert_eq!(find_compress(&labels, v), v);
        }
    }

    #[test]
    fn union_links_smaller_root_wins() {
        let labels = LabelArray::identity(5).unwrap();
        union_rem(&labels, 4, 2);
        assert_eq!(find_compress(&labels, 4), 2);
        assert_eq!(find_compress(&labels, 2), 2);
    }

    #[test]
    fn union_chain_collapses_to_min() {
        let labels = LabelArray::identity(6).unwrap();
        union_rem(&labels, 5, 4);
        union_rem(&labels, 4, 3);
        union_rem(&labels, 3, 2);
        union_rem(&labels, 2, 1);
        union_rem(&labels, 1, 0);
        for v in 0..6 {
            assert_eq!(find_compress(&labels, v), 0);
        }
    }

    #[test]
    fn find_compress_flattens_path() {
        let labels = LabelArray::identity(4).unwrap();
        // Build a non-flat chain by hand: 3 -> 2 -> 1 -> 0.
        labels.store(3, 2);
        labels.store(2, 1);
        labels.store(1, 0);
        assert_eq!(find_compress(&labels, 3), 0);
        // After find_compress, 3 should point directly at the root.
        assert_eq!(labels.load(3), 0);
    }

    #[test]
    fn concurrent_union_converges_to_single_root() {
        use std::sync::{Arc, Barrier};
        use std::thread;

        let labels = Arc::new(LabelArray::identity(1000).unwrap());
        let barrier = Arc::new(Barrier::new(2));

        let worker = |labels: Arc<LabelArray>, barrier: Arc<Barrier>, lo: u32, hi: u32| {
            barrier.wait();
            for i in lo..hi {
                union_rem(&labels, i, i + 1);
            }
        };

        let t1 = {
            let labels = Arc::clone(&labels);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || worker(labels, barrier, 0, 500))
        };
        let t2 = {
            let labels = Arc::clone(&labels);
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || worker(labels, barrier, 500, 999))
        };

        t1.join().unwrap();
        t2.join().unwrap();

        for i in 0..500 {
            assert_eq!(find_compress(&labels, i), find_compress(&labels, i + 1));
        }
        for i in 500..999 {
            assert_eq!(find_compress(&labels, i), find_compress(&labels, i + 1));
        }
    }
}
