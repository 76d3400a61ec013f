//! Binary search over the sorted vendor table.
//!
//! Records of different block sizes can share an OUI, so a hit only locates the
//! neighborhood of the answer. The search lands on the lowest record with the query's OUI,
//! then widens outward from the hit over every record with the same OUI and keeps the
//! longest prefix of the query. Ties keep the first record met in the order hit,
//! backwards, forwards, which is the lowest table position.

use std::cmp::Ordering;

use crate::encoder::{is_prefix_of, numeric_key, oui_part};
use crate::table::{VendorRecord, VendorTable};

/// Finds the longest prefix of `query` by comparing OUI strings.
pub fn binary_search(table: &VendorTable, query: &str) -> Option<usize> {
    let oui = oui_part(query);
    search_with(table, query, |record| oui_part(&record.prefix).cmp(oui))
}

/// Finds the longest prefix of `query` by comparing numeric keys.
///
/// Always agrees with [`binary_search`]: the key orders like the OUI string.
pub fn binary_search_by_key(table: &VendorTable, query: &str) -> Option<usize> {
    let key = numeric_key(query);
    search_with(table, query, |record| record.numeric_key.cmp(&key))
}

fn search_with<F>(table: &VendorTable, query: &str, mut compare: F) -> Option<usize>
where
    F: FnMut(&VendorRecord) -> Ordering,
{
    let records = table.records();
    let hit = records.partition_point(|record| compare(record) == Ordering::Less);
    if records.get(hit).is_none_or(|record| compare(record) != Ordering::Equal) {
        return None;
    }

    widen(table, hit, query)
}

fn widen(table: &VendorTable, hit: usize, query: &str) -> Option<usize> {
    let oui = oui_part(query);
    let same_oui = |position: &usize| oui_part(&table[*position].prefix) == oui;

    let backwards = (0..hit).rev().take_while(same_oui);
    let forwards = (hit + 1..table.len()).take_while(same_oui);

    let mut best: Option<usize> = None;
    for position in std::iter::once(hit).chain(backwards).chain(forwards) {
        let prefix = &table[position].prefix;
        if is_prefix_of(prefix, query)
            && best.is_none_or(|best| prefix.len() > table[best].prefix.len())
        {
            best = Some(position);
        }
    }

    best
}
