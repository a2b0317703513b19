/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
The driver's JSON/text report structures.

`Report` is the root object serialized with `serde_json` under `--json`;
[`Report::render_text`] renders the same data as the plain-text table that
is the driver's default (non-JSON) output.
*/

use serde::Serialize;

use crate::dispatch::Variant;
use crate::stats::Metrics;
use crate::substrate::Parallelism;
use crate::sysinfo_report::SystemInfo;

/// Shape information about the matrix a sweep was run against.
#[derive(Debug, Clone, Serialize)]
pub struct MatrixInfo {
    /// Source path, as given on the command line.
    pub path: String,
    /// Row count.
    pub nrows: usize,
    /// Column count.
    pub ncols: usize,
    /// Stored entry count.
    pub nnz: usize,
}

/// Parameters the benchmark sweep was invoked with.
#[derive(Debug, Clone, Serialize)]
pub struct BenchmarkInfo {
    /// Number of trials run per `(variant, parallelism)` configuration.
    pub trials: usize,
    /// Thread count requested.
    pub threads: usize,
}

/// One `(variant, parallelism)` configuration's aggregated result.
#[derive(Debug, Clone, Serialize)]
pub struct ResultEntry {
    /// Algorithm family.
    pub variant: String,
    /// Parallel execution substrate.
    pub parallelism: String,
    /// Connected-component count (agreed across all trials).
    pub component_count: i64,
    /// Wall-clock timing statistics across trials.
    pub timing: Metrics,
    /// Edges processed per second, from the mean trial time.
    pub throughput_edges_per_sec: f64,
    /// Resident-memory sample taken around the trial sweep, bytes.
    pub peak_memory_bytes: u64,
    /// Sequential-baseline mean time divided by this configuration's mean
    /// time, for the same variant. `1.0` for the sequential baseline
    /// itself.
    pub speedup: f64,
    /// `speedup / threads`. `1.0` for the sequential baseline (one
    /// effective thread).
    pub efficiency: f64,
}

/// The complete report for one driver invocation.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Host system snapshot.
    pub sys_info: SystemInfo,
    /// Input matrix shape.
    pub matrix_info: MatrixInfo,
    /// Sweep parameters.
    pub benchmark_info: BenchmarkInfo,
    /// One entry per `(variant, parallelism)` configuration run.
    pub results: Vec<ResultEntry>,
}

impl Report {
    /// Serializes the report as pretty-printed JSON.
    pub fn render_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Renders the report as a plain-text table, the driver's default
    /// output mode.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!(
            "matrix: {} ({} x {}, {} nonzeros)\n",
            self.matrix_info.path, self.matrix_info.nrows, self.matrix_info.ncols, self.matrix_info.nnz
        ));
        out.push_str(&format!(
            "trials: {}  threads: {}\n",
            self.benchmark_info.trials, self.benchmark_info.threads
        ));
        out.push_str(&format!(
            "{:<12} {:<14} {:>10} {:>12} {:>12} {:>10} {:>10}\n",
            "variant", "parallelism", "components", "mean_ns", "throughput", "speedup", "efficiency"
        ));
        for r in &self.results {
            out.push_str(&format!(
                "{:<12} {:<14} {:>10} {:>12.0} {:>12.0} {:>10.2} {:>10.2}\n",
                r.variant,
                r.parallelism,
                r.component_count,
                r.timing.mean,
                r.throughput_edges_per_sec,
                r.speedup,
                r.efficiency
            ));
        }
        out
    }
}

/// Computes `speedup`/`efficiency` for a configuration given its mean time
/// and thread count, against the sequential baseline's mean time for the
/// same variant.
pub fn speedup_efficiency(baseline_mean_ns: f64, this_mean_ns: f64, threads: usize) -> (f64, f64) {
    if this_mean_ns <= 0.0 {
        return (0.0, 0.0);
    }
    let speedup = baseline_mean_ns / this_mean_ns;
    let efficiency = speedup / threads.max(1) as f64;
    (speedup, efficiency)
}

/// Canonical variant/parallelism name pair used as a result entry's label.
pub fn label(variant: Variant, parallelism: Parallelism) -> (String, String) {
    (variant.to_string(), parallelism.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speedup_of_sequential_baseline_against_itself_is_one() {
        let (speedup, efficiency) = speedup_efficiency(1000.0, 1000.0, 1);
        assert_eq!(speedup, 1.0);
        assert_eq!(efficiency, 1.0);
    }

    #[test]
    fn speedup_scales_with_improvement() {
        let (speedup, efficiency) = speedup_efficiency(1000.0, 250.0, 4);
        assert_eq!(speedup, 4.0);
        assert_eq!(efficiency, 1.0);
    }

    #[test]
    fn text_rendering_includes_matrix_shape() {
        let report = Report {
            sys_info: SystemInfo {
                cpu_brand: "test-cpu".into(),
                logical_cpus: 4,
                total_memory_bytes: 0,
                os: None,
            },
            matrix_info: MatrixInfo {
                path: "graph.mtx".into(),
                nrows: 6,
                ncols: 6,
                nnz: 10,
            },
            benchmark_info: BenchmarkInfo { trials: 1, threads: 4 },
            results: vec![],
        };
        assert!(report.render_text().contains("graph.mtx"));
    }
}
