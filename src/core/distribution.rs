/// Weighted distribution — occurrence counts addressable by integer index.

use std::borrow::Borrow;
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DistributionError {
    #[error("index {index} out of range for distribution with total {total}")]
    IndexOutOfRange { index: usize, total: usize },
}

/// Counts of distinct items, laid out on a line of `total()` integer slots.
///
/// Items occupy contiguous blocks of slots in their `Ord` order, each block as
/// wide as the item's count. Sampling picks a slot, so a stream of integers
/// reproduces a stream of items exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightedDistribution<T: Ord> {
    counts: BTreeMap<T, usize>,
    total: usize,
}

impl<T: Ord> Default for WeightedDistribution<T> {
    fn default() -> Self {
        Self {
            counts: BTreeMap::new(),
            total: 0,
        }
    }
}

impl<T: Ord> WeightedDistribution<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one occurrence of `item`.
    pub fn record(&mut self, item: T) {
        *self.counts.entry(item).or_insert(0) += 1;
        self.total += 1;
    }

    /// Sum of all recorded counts.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// The item whose block contains `index`.
    pub fn pick(&self, index: usize) -> Result<&T, DistributionError> {
        let mut remaining = index;
        for (item, &count) in &self.counts {
            if remaining < count {
                return Ok(item);
            }
            remaining -= count;
        }
        Err(DistributionError::IndexOutOfRange {
            index,
            total: self.total,
        })
    }

    /// First index of `item`'s block, or `None` if it was never recorded.
    pub fn index_of<Q>(&self, item: &Q) -> Option<usize>
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        if !self.counts.contains_key(item) {
            return None;
        }
        let mut offset = 0;
        for (key, &count) in &self.counts {
            if Borrow::<Q>::borrow(key) == item {
                return Some(offset);
            }
            offset += count;
        }
        None
    }

    /// Recorded count of `item`, 0 if absent.
    pub fn count<Q>(&self, item: &Q) -> usize
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.get(item).copied().unwrap_or(0)
    }

    pub fn contains<Q>(&self, item: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.counts.contains_key(item)
    }

    /// Distinct items in pick order.
    pub fn keys(&self) -> impl Iterator<Item = &T> + '_ {
        self.counts.keys()
    }

    /// `(item, count)` pairs in pick order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, usize)> + '_ {
        self.counts.iter().map(|(item, &count)| (item, count))
    }
}

impl<T: Ord + fmt::Display> fmt::Display for WeightedDistribution<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (item, count) in self.iter() {
            write!(f, " \"{}\":{}", item, count)?;
        }
        write!(f, " }}")
    }
}
