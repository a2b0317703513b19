/*
 * SPDX-FileCopyrightText: 2024 The concomp Authors
 *
 * SPDX-License-Identifier: Apache-2.0 OR LGPL-2.1-or-later
 */
/*!
Timing statistics for trial sweeps: mean, min, max, standard deviation via
Welford's online algorithm, plus a median, which the driver needs because
trial counts default to a handful of runs and all samples fit comfortably
in memory.

Grounded on the teacher's `benchmarks/src/main.rs` `MetricsStream`/`Metrics`
pair; the `samples` field and [`MetricsStream::median`] method are additions
the teacher's micro-benchmark driver does not need (it never materializes
the full sample vector, only the running moments).
*/

/// Accumulates timing samples (in nanoseconds) and produces summary
/// statistics on [`MetricsStream::finalize`].
#[derive(Debug, Default)]
pub struct MetricsStream {
    min: f64,
    max: f64,
    avg: f64,
    m2: f64,
    count: usize,
    samples: Vec<f64>,
}

/// Summary statistics for a completed trial sweep.
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct Metrics {
    /// Fastest trial, nanoseconds.
    pub min: f64,
    /// Slowest trial, nanoseconds.
    pub max: f64,
    /// Arithmetic mean, nanoseconds.
    pub mean: f64,
    /// Median, nanoseconds.
    pub median: f64,
    /// Sample standard deviation (Bessel-corrected), nanoseconds. `0.0`
    /// when fewer than two samples were ingested.
    pub stddev: f64,
}

impl MetricsStream {
    /// A fresh, empty accumulator.
    pub fn new() -> Self {
        Self {
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
            avg: 0.0,
            m2: 0.0,
            count: 0,
            samples: Vec::new(),
        }
    }

    /// Ingests one timing sample, in nanoseconds.
    pub fn update(&mut self, value: f64) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);

        self.count += 1;
        let delta = value - self.avg;
        self.avg += delta / self.count as f64;
        let delta2 = value - self.avg;
        self.m2 += delta * delta2;

        self.samples.push(value);
    }

    /// Number of samples ingested so far.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Consumes the accumulator, producing final [`Metrics`].
    ///
    /// With a single sample, `stddev` is `0.0` and `min`/`max`/`mean`/
    /// `median` all equal that sample, rather than panicking as the
    /// teacher's `finalize` does on `count < 2`: a one-trial sweep is the
    /// common case here, not an error.
    pub fn finalize(mut self) -> Metrics {
        if self.count == 0 {
            return Metrics {
                min: 0.0,
                max: 0.0,
                mean: 0.0,
                median: 0.0,
                stddev: 0.0,
            };
        }

        let stddev = if self.count < 2 {
            0.0
        } else {
            (self.m2 / (self.count - 1) as f64).sqrt()
        };

        self.samples.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let mid = self.samples.len() / 2;
        let median = if self.samples.len() % 2 == 0 {
            (self.samples[mid - 1] + self.samples[mid]) / 2.0
        } else {
            self.samples[mid]
        };

        Metrics {
            min: self.min,
            max: self.max,
            mean: self.avg,
            median,
            stddev,
        }
    }
}

/// Throughput in edges processed per second, given a trial's mean time in
/// nanoseconds and the matrix's edge count (`nnz`, counting each stored
/// entry once).
pub fn edges_per_second(nnz: usize, mean_nanos: f64) -> f64 {
    if mean_nanos <= 0.0 {
        return 0.0;
    }
    nnz as f64 / (mean_nanos / 1_000_000_000.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_sample_does_not_panic() {
        let mut s = MetricsStream::new();
        s.update(10.0);
        let m = s.finalize();
        assert_eq!(m.min, 10.0);
        assert_eq!(m.max, 10.0);
        assert_eq!(m.mean, 10.0);
        assert_eq!(m.median, 10.0);
        assert_eq!(m.stddev, 0.0);
    }

    #[test]
    fn mean_and_median_on_known_data() {
        let mut s = MetricsStream::new();
        for v in [1.0, 2.0, 3.0, 4.0] {
            s.update(v);
        }
        let m = s.finalize();
        assert_eq!(m.mean, 2.5);
        assert_eq!(m.median, 2.5);
        assert_eq!(m.min, 1.0);
        assert_eq!(m.max, 4.0);
    }

    #[test]
    fn throughput_is_zero_for_nonpositive_time() {
        assert_eq!(edges_per_second(100, 0.0), 0.0);
    }
}
