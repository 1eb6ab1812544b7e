//! Buckets represent a half-open range of values and a count of the values
//! that fall into that range.

use core::cmp::Ordering;
use core::ops::Range;

/// Identifies a bucket within the parameterization of its bucketing strategy.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Kind {
    /// A fixed bucket, identified by its (exclusive) upper threshold.
    Fixed(f64),
    /// A percentile bucket, identified by the percentile in `0.0..=1.0` at
    /// which it ends.
    Percentile(f64),
    /// A uniform bucket, identified by its position.
    Uniform(usize),
}

/// A bucket is one interval of a partition of the real line together with the
/// number of values that fell into it.
#[derive(Clone, Debug, PartialEq)]
pub struct Bucket {
    pub(crate) kind: Kind,
    pub(crate) range: Option<Range<f64>>,
    pub(crate) count: u64,
}

impl Bucket {
    /// Construct a bucket. This is mostly useful when re-deriving ranges for
    /// buckets that were decoded from their persisted form.
    pub fn new(kind: Kind, range: Option<Range<f64>>, count: u64) -> Self {
        Self { kind, range, count }
    }

    pub(crate) fn empty(kind: Kind, range: Option<Range<f64>>) -> Self {
        Self::new(kind, range, 0)
    }

    /// Returns which bucket this is.
    pub fn kind(&self) -> Kind {
        self.kind
    }

    /// Returns the half-open range for the bucket. There is no range for
    /// buckets that were produced without any values to derive bounds from.
    pub fn range(&self) -> Option<Range<f64>> {
        self.range.clone()
    }

    /// Returns the number of values within the bucket's range.
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Returns the inclusive lower bound for the bucket.
    pub fn lower(&self) -> Option<f64> {
        self.range.as_ref().map(|r| r.start)
    }

    /// Returns the exclusive upper bound for the bucket.
    pub fn upper(&self) -> Option<f64> {
        self.range.as_ref().map(|r| r.end)
    }

    /// Returns true if the value belongs in this bucket.
    ///
    /// This is half-open containment, except that an infinite value is also
    /// contained by a bucket that is unbounded on that side. So `+inf` falls
    /// into a bucket ending at `+inf` and `-inf` into one starting at `-inf`.
    pub fn contains(&self, value: f64) -> bool {
        match &self.range {
            Some(range) => {
                range.contains(&value)
                    || (value == f64::INFINITY && range.end == f64::INFINITY)
                    || (value == f64::NEG_INFINITY && range.start == f64::NEG_INFINITY)
            }
            None => false,
        }
    }

    /// Orders buckets by their lower bound. A bucket without a range is never
    /// less than another bucket.
    pub fn cmp_by_lower(&self, other: &Bucket) -> Ordering {
        match (self.lower(), other.lower()) {
            (Some(a), Some(b)) => a.total_cmp(&b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
