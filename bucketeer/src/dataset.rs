//! The collection of items that values are extracted from.

use core::hash::Hash;

/// A source of items together with the metrics that can be extracted from
/// them.
///
/// `value` must be pure: for a fixed dataset it has to return the same result
/// every time it is called for the same item and metric. Returning `None`
/// means the item does not contribute to that metric. Values must never be
/// NaN.
pub trait DataSet {
    type Item;
    type Metric: Eq + Hash + Clone;

    /// The items in the dataset. Order does not affect bucketing results.
    fn items(&self) -> &[Self::Item];

    /// Extract the value of `metric` for `item`, if the item has one.
    fn value(&self, item: &Self::Item, metric: &Self::Metric) -> Option<f64>;
}
