/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
//! # `concomp`
//!
//! A concurrent connected-components engine for undirected graphs supplied
//! as a sparse binary adjacency matrix in compressed-sparse-column (CSC)
//! form, plus a benchmarking driver that runs the same counting problem
//! through several parallel strategies and reports timing statistics.
//!
//! The engine implements two algorithmic families, iterative label
//! propagation ([`algo::propagation`]) and lock-free union-find using Rem's
//! heuristic ([`algo::union_find`]), each instantiated over a shared
//! parallelism substrate ([`substrate`]): sequential, work-stealing,
//! fork-join thread pools, or explicit worker threads driven by an atomic
//! chunk dispenser.

// the code must be safe: CAS-based concurrency is expressed with
// std::sync::atomic, never with raw pointers.
#![deny(clippy::todo)]
#![deny(unsafe_code)]
#![deny(clippy::panic)]
#![deny(clippy::panicking_unwrap)]

#![deny(unstable_features)]
#![deny(unconditional_recursion)]
#![deny(clippy::empty_loop)]
#![deny(unreachable_code)]
#![deny(unreachable_patterns)]
#![deny(unused_macro_rules)]

#![deny(missing_docs)]
#![deny(clippy::missing_safety_doc)]

pub mod algo;
pub mod bitmap;
#[cfg(feature = "cli")]
pub mod cli;
pub mod csc;
pub mod dispatch;
pub mod dsu;
pub mod error;
pub mod label;
pub mod loader;
pub mod report;
pub mod stats;
pub mod substrate;
pub mod sysinfo_report;

/// Re-exports of the types most callers need.
pub mod prelude {
    pub use crate::csc::CscView;
    pub use crate::dispatch::{count_components, Parallelism, Variant};
    pub use crate::error::ConcompError;
    pub use crate::label::LabelArray;
}
