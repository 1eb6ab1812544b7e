//! This crate splits the values of a dataset's metric into buckets and counts
//! how many values fall into each.
//!
//! A [`DataSet`] exposes items and a way to extract a numeric value for a
//! metric from each item. A [`Bucketeer`] owns the dataset and caches the
//! sorted values per metric. It produces buckets using one of three
//! strategies selected by a [`BucketOption`]:
//!
//! * fixed: caller supplied thresholds
//! * percentiles: cut points at order statistics of the values
//! * uniform: equal width buckets between the smallest and largest value
//!
//! The resulting buckets are ordered by their lower bound and their counts
//! add up to the number of values.
//!
//! With the `serde-serialize` feature (enabled by default) a [`Bucket`] can
//! be persisted. The persisted form keeps the kind and count of the bucket,
//! its range is written without any infinite bounds.

mod bucket;
mod cache;
mod dataset;
mod engine;
mod errors;
mod option;
#[cfg(feature = "serde-serialize")]
mod persist;
mod strategy;

pub use bucket::{Bucket, Kind};
pub use cache::ValueCache;
pub use dataset::DataSet;
pub use engine::{bucket_values, Analysis, Bucketeer};
pub use errors::Error;
pub use option::BucketOption;
