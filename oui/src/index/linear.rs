use crate::encoder::is_prefix_of;
use crate::table::VendorTable;

/// Scans every record and returns the longest prefix of `query`.
///
/// Equal-length ties keep the first record in table order.
pub fn scan(table: &VendorTable, query: &str) -> Option<usize> {
    let mut best: Option<usize> = None;

    for (position, record) in table.iter().enumerate() {
        if !is_prefix_of(&record.prefix, query) {
            continue;
        }

        if best.is_none_or(|best| record.prefix.len() > table[best].prefix.len()) {
            best = Some(position);
        }
    }

    best
}
