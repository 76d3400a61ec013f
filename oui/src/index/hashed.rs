//! Bucket-and-chain index over the vendor table.
//!
//! Each bucket holds the table positions of the records whose OUI hashes to it, ordered by
//! prefix. A lookup selects the bucket of the query, finds the first chain entry with the
//! query's OUI, then walks forward while the shared prefix length with the query does not
//! drop below its running peak. The walk stops at the first drop.
//!
//! Chains are sorted by prefix, so every record that is a prefix of the query sits in the
//! non-decreasing part of the walk. The first drop can only cut off entries that sort
//! after the query.

use tracing::debug;

use crate::encoder::{bucket_hash, is_prefix_of, oui_part, shared_prefix_len};
use crate::index::BucketStats;
use crate::table::VendorTable;

/// Outcome of a chain scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainLookup {
    /// Table position of the longest record prefix of the query.
    Match(usize),
    /// The bucket has records but none of them is a prefix of the query.
    NoMatch,
    /// The query hashes to a bucket without records.
    EmptyBucket,
}

/// Hash buckets holding table positions in ascending prefix order.
#[derive(Debug, Clone)]
pub struct HashedIndex {
    buckets: Vec<Vec<usize>>,
}

impl HashedIndex {
    /// Partitions `table` into `bucket_count` buckets.
    ///
    /// Each record is inserted after every chain entry whose prefix sorts at or before its
    /// own, so chains stay sorted and equal prefixes keep table order.
    pub fn build(table: &VendorTable, bucket_count: usize) -> Self {
        let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); bucket_count];

        for (position, record) in table.iter().enumerate() {
            let chain = &mut buckets[bucket_hash(&record.prefix, bucket_count)];
            let insert_at = chain.partition_point(|&other| table[other].prefix <= record.prefix);
            chain.insert(insert_at, position);
        }

        debug!(bucket_count, records = table.len(), "hashed index built");

        Self { buckets }
    }

    /// Returns the number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Returns the bucket selected by a canonical query or prefix.
    pub fn bucket_of(&self, canonical: &str) -> usize {
        bucket_hash(canonical, self.buckets.len())
    }

    /// Returns the chain of table positions stored in `bucket`.
    pub fn chain(&self, bucket: usize) -> &[usize] {
        &self.buckets[bucket]
    }

    /// Looks up the longest record prefix of a canonical `query`.
    pub fn lookup(&self, table: &VendorTable, query: &str) -> ChainLookup {
        let chain = self.chain(self.bucket_of(query));
        if chain.is_empty() {
            return ChainLookup::EmptyBucket;
        }

        let oui = oui_part(query);
        let Some(start) = chain
            .iter()
            .position(|&position| oui_part(&table[position].prefix) == oui)
        else {
            return ChainLookup::NoMatch;
        };

        let mut peak = 0;
        let mut best: Option<usize> = None;
        for &position in &chain[start..] {
            let prefix = &table[position].prefix;
            let shared = shared_prefix_len(prefix, query);
            if shared < peak {
                break;
            }
            peak = shared;

            if is_prefix_of(prefix, query)
                && best.is_none_or(|best| prefix.len() > table[best].prefix.len())
            {
                best = Some(position);
            }
        }

        best.map_or(ChainLookup::NoMatch, ChainLookup::Match)
    }

    /// Summarizes chain lengths over all buckets.
    pub fn stats(&self) -> BucketStats {
        BucketStats::from_chain_lengths(self.buckets.iter().map(Vec::len))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::FOLD_BUCKETS;
    use crate::index::linear;
    use crate::table::VendorRecord;

    fn table(rows: &[(&str, &str)]) -> VendorTable {
        VendorTable::from_records(
            rows.iter()
                .map(|(prefix, vendor)| VendorRecord::new(prefix, *vendor).unwrap())
                .collect(),
        )
    }

    fn vendor_of<'a>(table: &'a VendorTable, lookup: ChainLookup) -> Option<&'a str> {
        match lookup {
            ChainLookup::Match(position) => Some(&table[position].vendor),
            _ => None,
        }
    }

    #[test]
    fn chains_are_sorted_and_stable() {
        let table = table(&[
            ("AA:BB:CC:00:00", "Sub"),
            ("AA:BB:CC", "First"),
            ("AA:BB:CC", "Second"),
            ("AA:BB:CC:0", "Block"),
        ]);
        let index = HashedIndex::build(&table, FOLD_BUCKETS);

        let chain = index.chain(index.bucket_of("AA:BB:CC"));
        let vendors: Vec<&str> = chain.iter().map(|&p| table[p].vendor.as_str()).collect();
        assert_eq!(vendors, ["First", "Second", "Block", "Sub"]);
    }

    #[test]
    fn worked_example_resolves_longest_prefix() {
        let table = table(&[("AA:BB:CC", "Acme"), ("AA:BB:CC:00:00", "Acme Sub")]);
        let index = HashedIndex::build(&table, FOLD_BUCKETS);

        let lookup = index.lookup(&table, "AA:BB:CC:01:02:03");
        assert_eq!(vendor_of(&table, lookup), Some("Acme"));

        let lookup = index.lookup(&table, "AA:BB:CC:00:00:01");
        assert_eq!(vendor_of(&table, lookup), Some("Acme Sub"));
    }

    #[test]
    fn empty_bucket_is_distinguished_from_no_match() {
        let table = table(&[("AA:BB:CC:00:00", "Acme Sub")]);
        let index = HashedIndex::build(&table, FOLD_BUCKETS);

        assert_eq!(index.lookup(&table, "AA:BB:CC:01:02:03"), ChainLookup::NoMatch);
        // "AB:BA:CC" folds to 0 while the only record folds elsewhere.
        assert_eq!(index.bucket_of("AB:BA:CC"), 0);
        assert_eq!(index.lookup(&table, "AB:BA:CC:00:00:00"), ChainLookup::EmptyBucket);
    }

    #[test]
    fn shared_bucket_without_oui_match_is_no_match() {
        // Both OUIs fold to 0.
        let table = table(&[("AB:BA:CC", "Acme")]);
        let index = HashedIndex::build(&table, FOLD_BUCKETS);

        assert_eq!(index.bucket_of("00:00:00"), index.bucket_of("AB:BA:CC"));
        assert_eq!(index.lookup(&table, "00:00:00:01:02:03"), ChainLookup::NoMatch);
    }

    #[test]
    fn agrees_with_linear_scan() {
        let table = table(&[
            ("00:1B:C5", "Base"),
            ("00:1B:C5:0", "Block"),
            ("00:1B:C5:00:0", "Small"),
            ("00:1B:C5:00:1", "Small Two"),
            ("00:1B:C5:01:F", "Small Three"),
            ("00:1B:C6", "Neighbor"),
            ("70:B3:D5:0", "MA-M"),
        ]);

        for bucket_count in [FOLD_BUCKETS, FOLD_BUCKETS * 16] {
            let index = HashedIndex::build(&table, bucket_count);
            for query in [
                "00:1B:C5:00:01:02",
                "00:1B:C5:00:11:02",
                "00:1B:C5:01:F1:02",
                "00:1B:C5:01:E1:02",
                "00:1B:C5:F0:00:00",
                "00:1B:C6:00:00:00",
                "70:B3:D5:01:00:00",
                "70:B3:D5:F1:00:00",
            ] {
                let expected = linear::scan(&table, query);
                let actual = match index.lookup(&table, query) {
                    ChainLookup::Match(position) => Some(position),
                    _ => None,
                };
                assert_eq!(actual, expected, "query {query} with {bucket_count} buckets");
            }
        }
    }

    #[test]
    fn stats_count_every_record_once() {
        let table = table(&[("AA:BB:CC", "Acme"), ("AA:BB:CC:0", "Block"), ("11:22:33", "Other")]);
        let index = HashedIndex::build(&table, FOLD_BUCKETS);
        let stats = index.stats();

        assert_eq!(stats.buckets, FOLD_BUCKETS);
        assert_eq!(stats.records, 3);
        assert_eq!(stats.max, 2);
        assert_eq!(stats.empty, FOLD_BUCKETS - 2);
    }
}
