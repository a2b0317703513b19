/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Error types for the ambient layers around the engine (loader, CLI, report
generation).

The engine itself ([`crate::dispatch::count_components`]) never returns a
`Result`: per the engine's error-handling contract, failures are reported
through a sentinel return value. This module's [`ConcompError`] is only used
by the collaborators that sit outside that boundary.
*/

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced by the loader, CLI, and reporting layers.
#[derive(Debug, Error)]
pub enum ConcompError {
    /// The matrix file could not be opened or read.
    #[error("failed to read matrix file {path:?}: {source}")]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The matrix container was malformed.
    #[error("malformed matrix container {path:?}: {reason}")]
    MalformedMatrix {
        /// Path of the offending file.
        path: PathBuf,
        /// Human-readable description of the problem.
        reason: String,
    },

    /// Two trials of the same configuration disagreed on the component
    /// count, indicating a concurrency bug in the engine under test.
    #[error(
        "inter-trial mismatch for variant={variant:?} parallelism={parallelism:?}: trial {first_trial} found {first_count} components, trial {mismatched_trial} found {mismatched_count}"
    )]
    InterTrialMismatch {
        /// Algorithm variant under test.
        variant: String,
        /// Parallelism substrate under test.
        parallelism: String,
        /// Index of the first trial in the mismatching pair.
        first_trial: usize,
        /// Component count observed in the first trial.
        first_count: i64,
        /// Index of the later, disagreeing trial.
        mismatched_trial: usize,
        /// Component count observed in the disagreeing trial.
        mismatched_count: i64,
    },

    /// The engine returned its allocation-failure sentinel.
    #[error("engine reported allocation failure for variant={variant:?} parallelism={parallelism:?}")]
    EngineAllocationFailure {
        /// Algorithm variant under test.
        variant: String,
        /// Parallelism substrate under test.
        parallelism: String,
    },

    /// The CLI was invoked with an argument combination that has no valid
    /// interpretation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}
