use std::fmt;

/// Occupancy summary of a [`crate::index::HashedIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct BucketStats {
    /// Number of buckets.
    pub buckets: usize,
    /// Number of indexed records.
    pub records: usize,
    /// Number of buckets without any record.
    pub empty: usize,
    /// Shortest chain length over all buckets.
    pub min: usize,
    /// Longest chain length over all buckets.
    pub max: usize,
    /// Mean chain length over all buckets.
    pub mean: f64,
}

impl BucketStats {
    /// Summarizes a sequence of chain lengths.
    pub(crate) fn from_chain_lengths(lengths: impl ExactSizeIterator<Item = usize>) -> Self {
        let buckets = lengths.len();
        let mut stats = Self {
            buckets,
            records: 0,
            empty: 0,
            min: usize::MAX,
            max: 0,
            mean: 0.0,
        };

        for length in lengths {
            stats.records += length;
            stats.min = stats.min.min(length);
            stats.max = stats.max.max(length);
            if length == 0 {
                stats.empty += 1;
            }
        }

        if buckets == 0 {
            stats.min = 0;
        } else {
            stats.mean = stats.records as f64 / buckets as f64;
        }

        stats
    }
}

impl fmt::Display for BucketStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} records in {} buckets ({} empty), chain length min {} max {} mean {:.2}",
            self.records, self.buckets, self.empty, self.min, self.max, self.mean
        )
    }
}
