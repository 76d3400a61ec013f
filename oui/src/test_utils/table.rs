use std::collections::HashSet;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::seq::index::sample;
use rand::{Rng, SeedableRng};

use crate::encoder::MAC_STR_LEN;
use crate::table::{VendorRecord, VendorTable};

/// Maximum number of sibling blocks generated under one OUI.
const MAX_SIBLINGS: usize = 4;

/// Generates `count` records whose prefixes are pairwise non-prefixing.
///
/// Every OUI is used by a single block kind: one `MA-L` prefix (`XX:XX:XX`), up to
/// [`MAX_SIBLINGS`] `MA-M` prefixes (`XX:XX:XX:X`) or up to [`MAX_SIBLINGS`] `MA-S`
/// prefixes (`XX:XX:XX:XX:X`) with distinct extensions. Vendor names are unique. The
/// output is fully determined by `seed`.
pub fn synthetic_records(count: usize, seed: u64) -> Vec<VendorRecord> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut used_ouis = HashSet::new();
    let mut records = Vec::with_capacity(count);

    while records.len() < count {
        let oui: u32 = rng.gen_range(0..1 << 24);
        if !used_ouis.insert(oui) {
            continue;
        }

        let base = format!(
            "{:02X}:{:02X}:{:02X}",
            oui >> 16,
            (oui >> 8) & 0xFF,
            oui & 0xFF
        );
        let siblings = rng.gen_range(1..=MAX_SIBLINGS);

        let prefixes: Vec<String> = match rng.gen_range(0..3) {
            0 => vec![base],
            1 => sample(&mut rng, 16, siblings)
                .into_iter()
                .map(|nibble| format!("{base}:{nibble:X}"))
                .collect(),
            _ => sample(&mut rng, 1 << 12, siblings)
                .into_iter()
                .map(|extension| format!("{base}:{:02X}:{:X}", extension >> 4, extension & 0xF))
                .collect(),
        };

        for prefix in prefixes {
            let vendor = format!("Vendor {:05}", records.len());
            records.push(VendorRecord::from_canonical(prefix, vendor));
        }
    }

    records.truncate(count);
    records
}

/// Builds a sorted table of [`synthetic_records`].
pub fn synthetic_table(count: usize, seed: u64) -> Arc<VendorTable> {
    Arc::new(VendorTable::from_records(synthetic_records(count, seed)))
}

/// Builds the two-record table `AA:BB:CC -> Acme`, `AA:BB:CC:00:00 -> Acme Sub`.
pub fn worked_example_table() -> Arc<VendorTable> {
    Arc::new(VendorTable::from_records(vec![
        VendorRecord::from_canonical("AA:BB:CC".to_string(), "Acme".to_string()),
        VendorRecord::from_canonical("AA:BB:CC:00:00".to_string(), "Acme Sub".to_string()),
    ]))
}

/// Completes a canonical prefix to a full address with random hex digits.
pub fn random_completion<R: Rng>(rng: &mut R, prefix: &str) -> String {
    const HEX_DIGITS: &[u8; 16] = b"0123456789ABCDEF";

    let mut mac = String::with_capacity(MAC_STR_LEN);
    mac.push_str(prefix);
    for position in prefix.len()..MAC_STR_LEN {
        if position % 3 == 2 {
            mac.push(':');
        } else {
            mac.push(HEX_DIGITS[rng.gen_range(0..16)] as char);
        }
    }

    mac
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::{is_canonical, is_prefix_of};

    #[test]
    fn synthetic_records_never_cover_each_other() {
        let records = synthetic_records(500, 7);
        assert_eq!(records.len(), 500);

        let table = VendorTable::from_records(records);
        for pair in table.records().windows(2) {
            assert!(is_canonical(&pair[0].prefix));
            assert!(!is_prefix_of(&pair[0].prefix, &pair[1].prefix));
        }
    }

    #[test]
    fn synthetic_records_are_deterministic() {
        assert_eq!(synthetic_records(50, 42), synthetic_records(50, 42));
    }

    #[test]
    fn random_completion_is_covered_by_prefix() {
        let mut rng = StdRng::seed_from_u64(1);
        let mac = random_completion(&mut rng, "70:B3:D5:0");

        assert_eq!(mac.len(), MAC_STR_LEN);
        assert!(is_canonical(&mac));
        assert!(is_prefix_of("70:B3:D5:0", &mac));
    }
}
