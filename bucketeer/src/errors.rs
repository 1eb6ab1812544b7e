use thiserror::Error;

/// Errors returned when a bucketing request is rejected.
#[non_exhaustive]
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    #[error("invalid percentile, must be in range 0.0..=1.0")]
    InvalidPercentile,
    #[error("uniform bucketing requires at least one bucket")]
    InvalidBucketCount,
    #[error("fixed thresholds must not be NaN")]
    InvalidThreshold,
    #[error("fixed thresholds must be in ascending order")]
    UnsortedThresholds,
}
