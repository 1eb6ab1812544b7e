//! The bucketing engine, which runs the bucketing strategies over values
//! drawn from a dataset through the value cache.

use crate::strategy::{self, Layout};
use crate::{Bucket, BucketOption, DataSet, Error, ValueCache};
use log::{error, warn};

/// Computes buckets over the values of a dataset's metrics.
///
/// Values are extracted and sorted once per metric and then reused for every
/// subsequent request. Replacing the dataset with [`Bucketeer::set_data`]
/// clears them. Mutating it through [`Bucketeer::data_mut`] does not, call
/// [`Bucketeer::invalidate`] afterwards.
pub struct Bucketeer<D: DataSet> {
    data: D,
    cache: ValueCache<D::Metric>,
}

/// The sorted values of a single metric.
#[derive(Clone, Debug, PartialEq)]
pub struct Analysis {
    values: Vec<f64>,
}

impl Analysis {
    /// The values in ascending order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn min(&self) -> Option<f64> {
        self.values.first().copied()
    }

    pub fn max(&self) -> Option<f64> {
        self.values.last().copied()
    }
}

impl<D: DataSet> Bucketeer<D> {
    pub fn new(data: D) -> Self {
        Self {
            data,
            cache: ValueCache::new(),
        }
    }

    /// Returns a reference to the dataset.
    pub fn data(&self) -> &D {
        &self.data
    }

    /// Returns a mutable reference to the dataset. Cached values are kept, so
    /// [`Bucketeer::invalidate`] must be called after changing the dataset.
    pub fn data_mut(&mut self) -> &mut D {
        &mut self.data
    }

    /// Replace the dataset and drop all cached values.
    pub fn set_data(&mut self, data: D) {
        self.data = data;
        self.cache.invalidate();
    }

    /// Consume the bucketeer and return the dataset.
    pub fn into_data(self) -> D {
        self.data
    }

    /// Drop all cached values.
    pub fn invalidate(&mut self) {
        self.cache.invalidate();
    }

    /// Returns the values of `metric` in ascending order. Items without a
    /// value for the metric are skipped.
    pub fn values(&mut self, metric: &D::Metric) -> &[f64] {
        self.cache.values(&self.data, metric)
    }

    pub fn analyze(&mut self, metric: &D::Metric) -> Analysis {
        Analysis {
            values: self.values(metric).to_vec(),
        }
    }

    /// Split the values of `metric` into buckets and count the values in
    /// each. See [`bucket_values`].
    pub fn buckets(
        &mut self,
        metric: &D::Metric,
        option: &BucketOption,
    ) -> Result<Vec<Bucket>, Error> {
        bucket_values(self.cache.values(&self.data, metric), option)
    }
}

/// Split already sorted values into buckets and count the values in each.
///
/// The returned buckets are ordered by their lower bound and their counts sum
/// to the number of values. If there are no values, uniform and percentile
/// bucketing still return the requested number of buckets but without ranges.
///
/// An error is returned if the option is invalid. See
/// [`BucketOption::validate`].
pub fn bucket_values(values: &[f64], option: &BucketOption) -> Result<Vec<Bucket>, Error> {
    option.validate()?;
    Ok(assign(values, strategy::layout(values, option)))
}

fn assign(values: &[f64], layout: Layout) -> Vec<Bucket> {
    let mut buckets = match layout {
        Layout::Counted(buckets) => return buckets,
        Layout::Assign(buckets) => buckets,
    };

    let mut unmatched = 0;
    for value in values {
        if let Some(bucket) = buckets.iter_mut().find(|b| b.contains(*value)) {
            bucket.count += 1;
        } else if let Some(last) = buckets.last_mut() {
            last.count += 1;
            unmatched += 1;
        }
    }

    if unmatched > 0 {
        warn!(
            "{} values matched no bucket and were counted in the last one",
            unmatched
        );
    }

    let total: u64 = buckets.iter().map(|b| b.count).sum();
    debug_assert_eq!(total, values.len() as u64, "bucket counts do not sum to value count");
    if total != values.len() as u64 {
        error!(
            "bucket counts sum to {} but there are {} values",
            total,
            values.len()
        );
    }

    buckets.sort_by(Bucket::cmp_by_lower);
    buckets
}
