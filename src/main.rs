/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
The `concomp` driver binary: parses CLI arguments, loads a matrix, runs a
sweep across algorithm variants and parallel substrates, checks inter-trial
consistency, and prints a text or JSON report.

Grounded on `vigna-webgraph-rs/cli/src/main.rs`'s `env_logger::init()` then
dispatch structure, generalized inline here since this driver has a single
flat command rather than a subcommand tree.
*/

use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use concomp::cli::Cli;
use concomp::dispatch::count_components;
use concomp::error::ConcompError;
use concomp::loader::load;
use concomp::report::{label, speedup_efficiency, BenchmarkInfo, MatrixInfo, Report, ResultEntry};
use concomp::stats::MetricsStream;
use concomp::substrate::Parallelism;
use concomp::sysinfo_report::{current_process_memory_bytes, SystemInfo};

/// Exit code for a successful run.
const EXIT_OK: u8 = 0;
/// Exit code for an argument or I/O failure.
const EXIT_USAGE_OR_IO: u8 = 1;
/// Exit code for an inter-trial mismatch, the signal that the engine under
/// test has a concurrency bug.
const EXIT_MISMATCH: u8 = 2;

fn main() -> ExitCode {
    env_logger::init();

    match run() {
        Ok(()) => ExitCode::from(EXIT_OK),
        Err(err) => {
            eprintln!("error: {err:#}");
            let is_mismatch = err
                .downcast_ref::<ConcompError>()
                .map(|e| matches!(e, ConcompError::InterTrialMismatch { .. }))
                .unwrap_or(false);
            if is_mismatch {
                ExitCode::from(EXIT_MISMATCH)
            } else {
                ExitCode::from(EXIT_USAGE_OR_IO)
            }
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    cli.validate().context("invalid arguments")?;

    let threads = cli.resolved_threads();
    log::info!("loading matrix from {}", cli.matrix.display());
    let matrix = load(&cli.matrix).with_context(|| format!("loading {}", cli.matrix.display()))?;
    let view = matrix.view();
    log::info!(
        "matrix loaded: {} x {}, {} nonzeros",
        view.nrows(),
        view.ncols(),
        view.nnz()
    );

    let sys_info = SystemInfo::collect();
    let mut results = Vec::new();
    let mut sequential_mean_by_variant = std::collections::HashMap::new();

    for &variant in cli.variant.variants() {
        for &parallelism in cli.parallelism.substrates() {
            log::debug!("running variant={variant} parallelism={parallelism} trials={}", cli.trials);

            let mem_before = current_process_memory_bytes();
            let mut timing = MetricsStream::new();
            let mut agreed_count: Option<i64> = None;

            for trial in 0..cli.trials {
                let start = Instant::now();
                let count = count_components(&view, threads, variant, parallelism);
                let elapsed = start.elapsed().as_nanos() as f64;

                if count < 0 {
                    return Err(ConcompError::EngineAllocationFailure {
                        variant: variant.to_string(),
                        parallelism: parallelism.to_string(),
                    }
                    .into());
                }

                match agreed_count {
                    None => agreed_count = Some(count),
                    Some(first) if first != count => {
                        return Err(ConcompError::InterTrialMismatch {
                            variant: variant.to_string(),
                            parallelism: parallelism.to_string(),
                            first_trial: 0,
                            first_count: first,
                            mismatched_trial: trial,
                            mismatched_count: count,
                        }
                        .into());
                    }
                    Some(_) => {}
                }

                timing.update(elapsed);
            }

            let mem_after = current_process_memory_bytes();
            let metrics = timing.finalize();

            let baseline_mean = *sequential_mean_by_variant
                .entry(variant)
                .or_insert(metrics.mean);
            let is_baseline = parallelism == Parallelism::Sequential;
            let (speedup, efficiency) = if is_baseline {
                (1.0, 1.0)
            } else {
                speedup_efficiency(baseline_mean, metrics.mean, threads)
            };

            let (variant_label, parallelism_label) = label(variant, parallelism);
            results.push(ResultEntry {
                variant: variant_label,
                parallelism: parallelism_label,
                component_count: agreed_count.unwrap_or(0),
                timing: metrics,
                throughput_edges_per_sec: concomp::stats::edges_per_second(view.nnz(), metrics.mean),
                peak_memory_bytes: mem_before.max(mem_after),
                speedup,
                efficiency,
            });
        }
    }

    let report = Report {
        sys_info,
        matrix_info: MatrixInfo {
            path: cli.matrix.display().to_string(),
            nrows: view.nrows(),
            ncols: view.ncols(),
            nnz: view.nnz(),
        },
        benchmark_info: BenchmarkInfo {
            trials: cli.trials,
            threads,
        },
        results,
    };

    if cli.json {
        println!("{}", report.render_json().context("serializing report")?);
    } else {
        print!("{}", report.render_text());
    }

    Ok(())
}
