use std::{
    collections::{HashMap, hash_map},
    hash::Hash,
};

/// Occurrence counts for the distinct values of a categorical dataset.
///
/// The table discovers its categories from the data: every distinct input
/// value becomes a key, and the counts always sum to the number of values
/// observed. Iteration order of [`iter`](Self::iter) is unspecified; use
/// [`sorted_by_count`](Self::sorted_by_count) or
/// [`sorted_by_key`](Self::sorted_by_key) when a stable order matters.
///
/// # Examples
///
/// ```
/// use coursepoll_stats::frequency::FrequencyTable;
///
/// let table = FrequencyTable::from_values(["a", "b", "a", "c", "a"]);
/// assert_eq!(table.get(&"a"), 3);
/// assert_eq!(table.get(&"z"), 0);
/// assert_eq!(table.total(), 5);
/// assert_eq!(table.sorted_by_count()[0], ("a", 3));
/// ```
#[derive(Debug, Clone)]
pub struct FrequencyTable<K> {
    counts: HashMap<K, u64>,
    total: u64,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            counts: HashMap::new(),
            total: 0,
        }
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash,
{
    /// Counts every value of `values` exactly once.
    #[must_use]
    pub fn from_values<I>(values: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut table = Self::default();
        for value in values {
            table.record(value);
        }
        table
    }

    /// Records a single occurrence of `value`.
    pub fn record(&mut self, value: K) {
        *self.counts.entry(value).or_insert(0) += 1;
        self.total += 1;
    }

    /// Returns the count of `value`, or 0 if it was never observed.
    #[must_use]
    pub fn get(&self, value: &K) -> u64 {
        self.counts.get(value).copied().unwrap_or(0)
    }

    /// Returns the total number of recorded values.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Returns the number of distinct values.
    #[must_use]
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Iterates over `(value, count)` pairs in unspecified order.
    pub fn iter(&self) -> hash_map::Iter<'_, K, u64> {
        self.counts.iter()
    }

    /// Returns the share of `value` among all recorded values, in `[0, 1]`.
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn share(&self, value: &K) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.get(value) as f64 / self.total as f64
    }
}

impl<K> FrequencyTable<K>
where
    K: Eq + Hash + Ord + Clone,
{
    /// Returns `(value, count)` pairs ordered by count (descending), ties
    /// broken by value (ascending).
    #[must_use]
    pub fn sorted_by_count(&self) -> Vec<(K, u64)> {
        let mut entries = self.entries();
        entries.sort_by(|(ak, ac), (bk, bc)| bc.cmp(ac).then_with(|| ak.cmp(bk)));
        entries
    }

    /// Returns `(value, count)` pairs ordered by value.
    #[must_use]
    pub fn sorted_by_key(&self) -> Vec<(K, u64)> {
        let mut entries = self.entries();
        entries.sort_by(|(ak, _), (bk, _)| ak.cmp(bk));
        entries
    }

    fn entries(&self) -> Vec<(K, u64)> {
        self.counts.iter().map(|(k, c)| (k.clone(), *c)).collect()
    }
}

impl<K> FromIterator<K> for FrequencyTable<K>
where
    K: Eq + Hash,
{
    fn from_iter<T: IntoIterator<Item = K>>(iter: T) -> Self {
        Self::from_values(iter)
    }
}

impl<'a, K> IntoIterator for &'a FrequencyTable<K> {
    type Item = (&'a K, &'a u64);
    type IntoIter = hash_map::Iter<'a, K, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.iter()
    }
}
