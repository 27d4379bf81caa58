//! Statistical aggregation of raw probe timings
//!
//! Converts a batch of per-probe durations into mean/percentile summaries in
//! two views: latency in milliseconds and throughput in requests per second.

use crate::error::{AppError, Result};
use crate::models::RunResult;
use serde::{Deserialize, Serialize};

/// Mean and the three reported percentiles for one view of a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    /// Arithmetic mean
    pub mean: f64,
    /// 90th percentile (ordinal sense preserved under `reverse`)
    pub p90: f64,
    /// Median
    pub p50: f64,
    /// 10th percentile
    pub p10: f64,
}

/// Both views derived from one batch of raw durations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Latencies in milliseconds
    pub milliseconds: Summary,
    /// Throughput in requests per second (each sample floored to a whole
    /// request count before summarizing)
    pub requests_per_sec: Summary,
    /// Number of samples in the batch
    pub sample_count: usize,
}

/// Interpolated percentile over an ascending-sorted slice.
///
/// Linear interpolation between closest ranks, matching numpy's default
/// `percentile` method. The slice must be non-empty and sorted.
pub fn percentile(sorted_values: &[f64], p: f64) -> f64 {
    let index = (p / 100.0) * (sorted_values.len() as f64 - 1.0);
    let lower_index = index.floor() as usize;
    let upper_index = index.ceil() as usize;

    if lower_index == upper_index {
        sorted_values[lower_index]
    } else {
        let lower_value = sorted_values[lower_index];
        let upper_value = sorted_values[upper_index];
        let weight = index - lower_index as f64;
        lower_value + weight * (upper_value - lower_value)
    }
}

/// Summarize a batch of samples into mean and p90/p50/p10.
///
/// With `reverse` set, each percentile index `p` is computed as `100 - p`.
/// Throughput is the reciprocal of latency, so "the throughput 90% of
/// samples exceed" is the latency 10th percentile; flipping the index keeps
/// the ordinal meaning of the labels identical across both views.
///
/// An empty batch has no percentiles and is rejected.
pub fn summarize(data: &[f64], reverse: bool) -> Result<Summary> {
    if data.is_empty() {
        return Err(AppError::statistics(
            "cannot summarize an empty result set",
        ));
    }

    let mut sorted: Vec<f64> = data.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    let index = |p: f64| if reverse { 100.0 - p } else { p };
    let mean = sorted.iter().sum::<f64>() / sorted.len() as f64;

    Ok(Summary {
        mean,
        p90: percentile(&sorted, index(90.0)),
        p50: percentile(&sorted, index(50.0)),
        p10: percentile(&sorted, index(10.0)),
    })
}

/// Build both report views from raw per-probe durations in seconds.
pub fn report(results: &RunResult) -> Result<RunReport> {
    let milliseconds: Vec<f64> = results.iter().map(|&d| d * 1e3).collect();
    // Throughput is reported as whole requests per second.
    let requests_per_sec: Vec<f64> = results.iter().map(|&d| (1.0 / d).floor()).collect();

    Ok(RunReport {
        milliseconds: summarize(&milliseconds, false)?,
        requests_per_sec: summarize(&requests_per_sec, true)?,
        sample_count: results.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percentile_interpolation() {
        let values = vec![1.0, 2.0, 3.0, 4.0];
        assert_eq!(percentile(&values, 0.0), 1.0);
        assert_eq!(percentile(&values, 100.0), 4.0);
        assert_eq!(percentile(&values, 50.0), 2.5);
        // numpy: percentile([1,2,3,4], 25) == 1.75
        assert_eq!(percentile(&values, 25.0), 1.75);
    }

    #[test]
    fn test_percentile_single_value() {
        let values = vec![42.0];
        assert_eq!(percentile(&values, 10.0), 42.0);
        assert_eq!(percentile(&values, 90.0), 42.0);
    }

    #[test]
    fn test_percentile_handles_ties() {
        let values = vec![5.0, 5.0, 5.0, 5.0, 9.0];
        assert_eq!(percentile(&values, 50.0), 5.0);
        assert_eq!(percentile(&values, 10.0), 5.0);
    }

    #[test]
    fn test_summarize_monotonic() {
        let data = vec![0.9, 0.1, 0.5, 0.3, 0.7, 0.2, 0.8, 0.4, 0.6, 1.0];
        let summary = summarize(&data, false).unwrap();
        assert!(summary.p10 <= summary.p50);
        assert!(summary.p50 <= summary.p90);
    }

    #[test]
    fn test_summarize_reverse_flips_ordering() {
        let data = vec![10.0, 20.0, 30.0, 40.0, 50.0];
        let forward = summarize(&data, false).unwrap();
        let reversed = summarize(&data, true).unwrap();

        // reverse=true asks for 100-p, so p90 reads from the low tail.
        assert_eq!(reversed.p90, forward.p10);
        assert_eq!(reversed.p10, forward.p90);
        assert_eq!(reversed.p50, forward.p50);
        assert_eq!(reversed.mean, forward.mean);
    }

    #[test]
    fn test_summarize_rejects_empty() {
        let err = summarize(&[], false).unwrap_err();
        assert_eq!(err.category(), "STATS");
    }

    #[test]
    fn test_report_views() {
        // 10ms and 40ms probes.
        let results = vec![0.010, 0.040];
        let report = report(&results).unwrap();

        assert_eq!(report.sample_count, 2);
        assert_eq!(report.milliseconds.mean, 25.0);
        // 1/0.010 = 100 req/s, 1/0.040 = 25 req/s.
        assert_eq!(report.requests_per_sec.mean, 62.5);
        // Throughput p90 is the slow tail's reciprocal side.
        assert!(report.requests_per_sec.p90 <= report.requests_per_sec.p10);
    }

    #[test]
    fn test_report_floors_throughput() {
        // 1/0.3 = 3.33... -> 3 req/s
        let results = vec![0.3];
        let report = report(&results).unwrap();
        assert_eq!(report.requests_per_sec.mean, 3.0);
    }

    #[test]
    fn test_report_rejects_empty() {
        assert!(report(&Vec::new()).is_err());
    }
}
