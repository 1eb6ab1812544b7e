//! The bucketing strategies a caller can ask for.

use crate::Error;

#[cfg(feature = "schemars")]
use schemars::JsonSchema;
#[cfg(feature = "serde-serialize")]
use serde::{Deserialize, Serialize};

/// Selects how the values are split into buckets.
///
/// When serialized, the variant is carried in a `type` field, for example
/// `{"type": "uniform", "count": 5}`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[cfg_attr(
    feature = "serde-serialize",
    serde(tag = "type", rename_all = "snake_case")
)]
#[cfg_attr(feature = "schemars", derive(JsonSchema))]
pub enum BucketOption {
    /// One bucket below each threshold plus one bucket above the last. The
    /// thresholds must be ascending. A trailing `+inf` threshold is implied.
    Fixed { thresholds: Vec<f64> },
    /// One bucket ending at each percentile plus a final bucket for the rest.
    /// Percentiles are fractions in the inclusive range `0.0..=1.0`.
    Percentiles { percentiles: Vec<f64> },
    /// `count` buckets of equal width between the smallest and largest value.
    Uniform { count: usize },
}

impl BucketOption {
    pub fn fixed(thresholds: impl Into<Vec<f64>>) -> Self {
        Self::Fixed {
            thresholds: thresholds.into(),
        }
    }

    pub fn percentiles(percentiles: impl Into<Vec<f64>>) -> Self {
        Self::Percentiles {
            percentiles: percentiles.into(),
        }
    }

    pub fn uniform(count: usize) -> Self {
        Self::Uniform { count }
    }

    /// Checks that the parameters describe a well-formed partition.
    ///
    /// # Constraints:
    /// * fixed thresholds must not be NaN and must be in ascending order
    /// * percentiles must be in the range `0.0..=1.0`
    /// * uniform bucketing needs at least one bucket
    pub fn validate(&self) -> Result<(), Error> {
        match self {
            Self::Fixed { thresholds } => {
                if thresholds.iter().any(|t| t.is_nan()) {
                    return Err(Error::InvalidThreshold);
                }
                if thresholds.windows(2).any(|w| w[0] > w[1]) {
                    return Err(Error::UnsortedThresholds);
                }
            }
            Self::Percentiles { percentiles } => {
                if !percentiles.iter().all(|p| (0.0..=1.0).contains(p)) {
                    return Err(Error::InvalidPercentile);
                }
            }
            Self::Uniform { count } => {
                if *count == 0 {
                    return Err(Error::InvalidBucketCount);
                }
            }
        }
        Ok(())
    }
}
