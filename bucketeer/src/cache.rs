//! Memoized extraction of sorted metric values from a dataset.

use crate::DataSet;
use core::hash::Hash;
use log::trace;
use std::collections::HashMap;

/// Holds the sorted values for each metric that has been requested so far.
///
/// The cache never looks at the dataset to decide whether an entry is stale.
/// Whoever owns the dataset must call [`ValueCache::invalidate`] after
/// replacing or mutating it.
#[derive(Debug)]
pub struct ValueCache<M> {
    values: HashMap<M, Vec<f64>>,
}

impl<M> Default for ValueCache<M> {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
        }
    }
}

impl<M: Eq + Hash + Clone> ValueCache<M> {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the ascending values of `metric` across all items of `data`,
    /// extracting and sorting them on first use.
    pub fn values<D>(&mut self, data: &D, metric: &M) -> &[f64]
    where
        D: DataSet<Metric = M>,
    {
        if !self.values.contains_key(metric) {
            let values = extract(data, metric);
            trace!("cached {} values for metric", values.len());
            self.values.insert(metric.clone(), values);
        }

        self.values.get(metric).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Returns true if values for `metric` are currently cached.
    pub fn contains(&self, metric: &M) -> bool {
        self.values.contains_key(metric)
    }

    /// Drop every cached entry.
    pub fn invalidate(&mut self) {
        if !self.values.is_empty() {
            trace!("invalidating {} cached metrics", self.values.len());
        }
        self.values.clear();
    }
}

fn extract<D: DataSet>(data: &D, metric: &D::Metric) -> Vec<f64> {
    let mut values: Vec<f64> = data
        .items()
        .iter()
        .filter_map(|item| data.value(item, metric))
        .collect();
    values.sort_by(f64::total_cmp);
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counting {
        items: Vec<(Option<f64>, Option<f64>)>,
        calls: Cell<usize>,
    }

    impl DataSet for Counting {
        type Item = (Option<f64>, Option<f64>);
        type Metric = u8;

        fn items(&self) -> &[Self::Item] {
            &self.items
        }

        fn value(&self, item: &Self::Item, metric: &u8) -> Option<f64> {
            self.calls.set(self.calls.get() + 1);
            match metric {
                0 => item.0,
                _ => item.1,
            }
        }
    }

    fn data() -> Counting {
        Counting {
            items: vec![
                (Some(3.0), None),
                (Some(-1.0), Some(7.0)),
                (None, Some(2.0)),
                (Some(3.0), Some(f64::INFINITY)),
            ],
            calls: Cell::new(0),
        }
    }

    #[test]
    fn sorted_and_filtered() {
        let data = data();
        let mut cache = ValueCache::new();

        assert_eq!(cache.values(&data, &0), &[-1.0, 3.0, 3.0]);
        assert_eq!(cache.values(&data, &1), &[2.0, 7.0, f64::INFINITY]);
    }

    #[test]
    // repeated requests for a metric only extract once
    fn memoized() {
        let data = data();
        let mut cache = ValueCache::new();

        cache.values(&data, &0);
        assert_eq!(data.calls.get(), 4);
        cache.values(&data, &0);
        assert_eq!(data.calls.get(), 4);

        assert!(cache.contains(&0));
        assert!(!cache.contains(&1));
    }

    #[test]
    fn invalidate() {
        let mut data = data();
        let mut cache = ValueCache::new();

        assert_eq!(cache.values(&data, &0).len(), 3);

        // in-place mutation is invisible until invalidated
        data.items.push((Some(0.0), None));
        assert_eq!(cache.values(&data, &0).len(), 3);

        cache.invalidate();
        assert!(!cache.contains(&0));
        assert_eq!(cache.values(&data, &0), &[-1.0, 0.0, 3.0, 3.0]);
    }

    #[test]
    fn empty() {
        let data = Counting {
            items: Vec::new(),
            calls: Cell::new(0),
        };
        let mut cache = ValueCache::new();
        assert!(cache.values(&data, &0).is_empty());
    }
}
