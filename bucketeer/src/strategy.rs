//! Construction of bucket ranges for each bucketing strategy.

use crate::{Bucket, BucketOption, Kind};
use core::ops::Range;
use log::debug;

const INF: f64 = f64::INFINITY;
const NEG_INF: f64 = f64::NEG_INFINITY;

/// The buckets produced by a strategy, before values are assigned.
#[derive(Debug, PartialEq)]
pub(crate) enum Layout {
    /// Buckets with ranges whose counts come from assigning each value.
    Assign(Vec<Bucket>),
    /// Buckets whose counts are already final and must not be reordered.
    Counted(Vec<Bucket>),
}

/// Build the buckets for `option` over `values`, which must be sorted
/// ascending. The option is expected to have been validated.
pub(crate) fn layout(values: &[f64], option: &BucketOption) -> Layout {
    match option {
        BucketOption::Fixed { thresholds } => fixed(thresholds),
        BucketOption::Percentiles { percentiles } => self::percentiles(values, percentiles),
        BucketOption::Uniform { count } => uniform(values, *count),
    }
}

/// Turns ascending upper bounds into adjacent ranges, the first of which is
/// unbounded below.
fn partition(uppers: &[f64]) -> Vec<Range<f64>> {
    let mut lower = NEG_INF;
    uppers
        .iter()
        .map(|upper| {
            let range = lower..*upper;
            lower = *upper;
            range
        })
        .collect()
}

fn fixed(thresholds: &[f64]) -> Layout {
    let mut thresholds = thresholds.to_vec();
    if thresholds.last() != Some(&INF) {
        thresholds.push(INF);
    }

    let buckets = partition(&thresholds)
        .into_iter()
        .zip(thresholds.iter())
        .map(|(range, threshold)| Bucket::empty(Kind::Fixed(*threshold), Some(range)))
        .collect();

    Layout::Assign(buckets)
}

fn percentiles(values: &[f64], percentiles: &[f64]) -> Layout {
    let mut percentiles = percentiles.to_vec();
    percentiles.sort_by(f64::total_cmp);

    if values.is_empty() {
        return Layout::Counted(
            percentiles
                .into_iter()
                .map(|p| Bucket::empty(Kind::Percentile(p), None))
                .collect(),
        );
    }

    // the final bucket always ends at 1.0, so it never contributes a split
    if percentiles.last() == Some(&1.0) {
        percentiles.pop();
    }

    // order statistics by truncation, no interpolation between neighbours
    let n = values.len();
    let mut splits: Vec<usize> = percentiles
        .iter()
        .map(|p| ((n as f64 * p) as usize).min(n - 1))
        .collect();
    splits.dedup();

    let thresholds: Vec<f64> = splits.iter().map(|i| values[*i]).collect();

    percentiles.push(1.0);

    if percentiles.len() > thresholds.len() + 1 {
        debug!(
            "{} values cannot be split into {} percentile buckets, using a single bucket",
            n,
            percentiles.len()
        );

        // every split sits on the smallest value, leaving all values in the
        // final bucket
        let last = percentiles.len() - 1;
        let mut uppers = vec![values[0]; last];
        uppers.push(INF);

        let buckets = partition(&uppers)
            .into_iter()
            .zip(percentiles)
            .enumerate()
            .map(|(i, (range, p))| {
                let count = if i == last { n as u64 } else { 0 };
                Bucket::new(Kind::Percentile(p), Some(range), count)
            })
            .collect();

        return Layout::Counted(buckets);
    }

    let mut uppers = thresholds;
    uppers.push(INF);

    let buckets = partition(&uppers)
        .into_iter()
        .zip(percentiles)
        .map(|(range, p)| Bucket::empty(Kind::Percentile(p), Some(range)))
        .collect();

    Layout::Assign(buckets)
}

fn uniform(values: &[f64], count: usize) -> Layout {
    if values.is_empty() {
        // keep the requested shape even though there is nothing to bound
        return Layout::Counted(
            (0..count)
                .map(|i| Bucket::empty(Kind::Uniform(i), None))
                .collect(),
        );
    }

    if count <= 1 {
        return Layout::Assign(vec![Bucket::empty(Kind::Uniform(0), Some(NEG_INF..INF))]);
    }

    // infinite values are absorbed by the outermost buckets, so only the
    // finite extremes determine the width
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let min = finite.next().unwrap_or(0.0);
    let max = finite.last().unwrap_or(min);

    let ranges: Vec<Range<f64>> = if min == max {
        // unit width buckets with the middle one starting at the only value,
        // the outermost ones stretch to reach any infinite values
        let middle = (count / 2) as f64;
        let open_below = values.first() == Some(&NEG_INF);
        let open_above = values.last() == Some(&INF);
        (0..count)
            .map(|i| {
                let lower = min + (i as f64 - middle);
                let upper = lower + 1.0;
                let lower = if i == 0 && open_below { NEG_INF } else { lower };
                let upper = if i == count - 1 && open_above { INF } else { upper };
                lower..upper
            })
            .collect()
    } else {
        let width = (max - min) / count as f64;
        (0..count)
            .map(|i| {
                let lower = min + i as f64 * width;
                let upper = min + (i + 1) as f64 * width;
                if i == 0 {
                    NEG_INF..upper
                } else if i == count - 1 {
                    lower..INF
                } else {
                    lower..upper
                }
            })
            .collect()
    };

    let buckets = ranges
        .into_iter()
        .enumerate()
        .map(|(i, range)| Bucket::empty(Kind::Uniform(i), Some(range)))
        .collect();

    Layout::Assign(buckets)
}
