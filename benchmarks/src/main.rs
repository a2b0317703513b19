//! Micro-benchmark harness for `concomp`'s engine entry points.
//!
//! Directly adapted from the teacher's `benchmarks/src/main.rs`:
//! `MetricsStream`-style calibration, core pinning to suppress scheduler
//! noise, and a warmup-then-measure loop are kept, but rebound to measure
//! [`concomp::dispatch::count_components`] on synthetic symmetric CSC
//! graphs instead of bit-codec read/write calls.

use std::time::Instant;

use concomp::dispatch::{count_components, Variant};
use concomp::loader::LoadedMatrix;
use concomp::substrate::Parallelism;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// How many warmup trials to run before measuring, to let caches and the
/// branch predictor settle.
const WARMUP_ITERS: usize = 2;
/// How many measured trials to run per configuration.
const BENCH_ITERS: usize = 10;

/// Pin the process to one core to avoid context switching and cache
/// flushes, which would otherwise show up as measurement noise.
#[cfg(target_os = "linux")]
fn pin_to_core(core_id: usize) {
    unsafe {
        let mut cpu_set = core::mem::MaybeUninit::zeroed().assume_init();
        libc::CPU_ZERO(&mut cpu_set);
        libc::CPU_SET(core_id, &mut cpu_set);
        let res = libc::sched_setaffinity(
            libc::getpid(),
            core::mem::size_of::<libc::cpu_set_t>(),
            &cpu_set as *const libc::cpu_set_t,
        );
        assert_ne!(res, -1);
    }
}

#[cfg(not(target_os = "linux"))]
fn pin_to_core(_core_id: usize) {}

/// Builds a symmetric Erdos-Renyi-style CSC graph on `nodes` vertices with
/// independent edge probability `edge_prob`, the same generator shape as
/// the teacher's `ErdosRenyi` usage in its own `src/main.rs`.
fn gen_random_csc(nodes: usize, edge_prob: f64, seed: u64) -> LoadedMatrix {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut columns: Vec<Vec<u32>> = vec![Vec::new(); nodes];

    for u in 0..nodes {
        for v in (u + 1)..nodes {
            if rng.gen::<f64>() < edge_prob {
                columns[u].push(v as u32);
                columns[v].push(u as u32);
            }
        }
    }

    let mut col_ptr = Vec::with_capacity(nodes + 1);
    let mut row_idx = Vec::new();
    col_ptr.push(0u64);
    for mut rows in columns {
        rows.sort_unstable();
        row_idx.extend(rows);
        col_ptr.push(row_idx.len() as u64);
    }

    LoadedMatrix {
        nrows: nodes,
        ncols: nodes,
        nnz: row_idx.len(),
        col_ptr,
        row_idx,
    }
}

fn bench_configuration(matrix: &LoadedMatrix, variant: Variant, parallelism: Parallelism, threads: usize) {
    let view = matrix.view();

    for _ in 0..WARMUP_ITERS {
        count_components(&view, threads, variant, parallelism);
    }

    let mut nanos = Vec::with_capacity(BENCH_ITERS);
    for _ in 0..BENCH_ITERS {
        let start = Instant::now();
        let count = count_components(&view, threads, variant, parallelism);
        let elapsed = start.elapsed().as_nanos();
        assert!(count >= 0, "engine reported allocation failure");
        nanos.push(elapsed as f64);
    }

    let mean = nanos.iter().sum::<f64>() / nanos.len() as f64;
    let min = nanos.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = nanos.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    println!(
        "{variant},{parallelism},threads={threads},nodes={},nnz={},mean_ns={mean:.0},min_ns={min:.0},max_ns={max:.0}",
        matrix.nrows, matrix.nnz,
    );
}

pub fn main() {
    pin_to_core(0);

    let sizes = [(10_000usize, 8.0), (50_000, 6.0)];
    let threads = num_cpus::get().max(1);

    println!("variant,parallelism,threads,nodes,nnz,mean_ns,min_ns,max_ns");

    for (nodes, avg_degree) in sizes {
        let edge_prob = avg_degree / nodes as f64;
        let matrix = gen_random_csc(nodes, edge_prob, 42);

        for &variant in &[Variant::Propagation, Variant::UnionFind] {
            for &parallelism in Parallelism::ALL.iter() {
                bench_configuration(&matrix, variant, parallelism, threads);
            }
        }
    }
}
