/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Command-line argument parsing for the `concomp` binary.

Grounded on `vigna-webgraph-rs/cli/src/sccs.rs`'s flat `clap::Parser` struct
with `#[arg(short, long)]` fields and a `default_value_t` thread-count flag.
*/

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::dispatch::Variant;
use crate::error::ConcompError;
use crate::substrate::Parallelism;

/// Which algorithm variant(s) to run, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VariantArg {
    /// Iterative min-label propagation.
    Propagation,
    /// Lock-free union-find with Rem's algorithm.
    UnionFind,
    /// Run both and compare.
    Both,
}

impl VariantArg {
    /// The concrete [`Variant`] values this selection expands to.
    pub fn variants(self) -> &'static [Variant] {
        match self {
            VariantArg::Propagation => &[Variant::Propagation],
            VariantArg::UnionFind => &[Variant::UnionFind],
            VariantArg::Both => &[Variant::Propagation, Variant::UnionFind],
        }
    }
}

/// Which parallel substrate(s) to run, as selected on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParallelismArg {
    /// Single-threaded baseline only.
    Sequential,
    /// Rayon work-stealing only.
    WorkStealing,
    /// Explicit thread pool with an atomic chunk dispenser, only.
    ThreadPool,
    /// Rayon-backed recursive fork-join, only.
    ForkJoin,
    /// All four substrates, sequential first as the speedup baseline.
    All,
}

impl ParallelismArg {
    /// The concrete [`Parallelism`] values this selection expands to.
    pub fn substrates(self) -> &'static [Parallelism] {
        match self {
            ParallelismArg::Sequential => &[Parallelism::Sequential],
            ParallelismArg::WorkStealing => &[Parallelism::WorkStealing],
            ParallelismArg::ThreadPool => &[Parallelism::ThreadPool],
            ParallelismArg::ForkJoin => &[Parallelism::ForkJoinPool],
            ParallelismArg::All => &Parallelism::ALL,
        }
    }
}

/// Benchmarks connected-components counting across algorithm variants and
/// parallel substrates over a sparse adjacency matrix.
///
/// Noteworthy environment variables:
///
/// - RUST_LOG: configuration for env_logger
///   <https://docs.rs/env_logger/latest/env_logger/>
#[derive(Parser, Debug)]
#[command(name = "concomp", version)]
pub struct Cli {
    /// Path to the input matrix: either the crate's native binary
    /// container or a MatrixMarket coordinate text file.
    pub matrix: PathBuf,

    /// Number of worker threads. Defaults to the number of logical CPUs
    /// detected on the host, falling back to 8 if detection fails.
    #[arg(short = 't', long)]
    pub threads: Option<usize>,

    /// Number of trials to run per (variant, parallelism) configuration.
    /// Trials beyond the first are used only to check inter-trial
    /// consistency; mismatches exit with code 2.
    #[arg(short = 'n', long, default_value_t = 1)]
    pub trials: usize,

    /// Which algorithm variant(s) to benchmark.
    #[arg(short = 'v', long, value_enum, default_value_t = VariantArg::Both)]
    pub variant: VariantArg,

    /// Which parallel substrate(s) to benchmark.
    #[arg(short = 'p', long, value_enum, default_value_t = ParallelismArg::All)]
    pub parallelism: ParallelismArg,

    /// Emit the report as JSON instead of the default plain-text table.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    /// Resolves the effective thread count: the `-t` flag if given, else
    /// the detected logical CPU count, else a fallback of 8 when detection
    /// reports zero.
    pub fn resolved_threads(&self) -> usize {
        self.threads.unwrap_or_else(|| {
            let detected = num_cpus::get();
            if detected == 0 {
                8
            } else {
                detected
            }
        })
    }

    /// Validates argument combinations that `clap`'s declarative
    /// constraints cannot express: `trials` must be at least 1, and the
    /// matrix path must be non-empty.
    pub fn validate(&self) -> Result<(), ConcompError> {
        if self.trials == 0 {
            return Err(ConcompError::InvalidArgument(
                "trials must be at least 1".to_string(),
            ));
        }
        if self.matrix.as_os_str().is_empty() {
            return Err(ConcompError::InvalidArgument(
                "matrix path must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_trials_is_rejected() {
        let cli = Cli {
            matrix: PathBuf::from("graph.mtx"),
            threads: None,
            trials: 0,
            variant: VariantArg::Both,
            parallelism: ParallelismArg::All,
            json: false,
        };
        assert!(cli.validate().is_err());
    }

    #[test]
    fn both_variant_expands_to_two_variants() {
        assert_eq!(VariantArg::Both.variants().len(), 2);
    }

    #[test]
    fn all_parallelism_expands_to_four_substrates() {
        assert_eq!(ParallelismArg::All.substrates().len(), 4);
    }
}
