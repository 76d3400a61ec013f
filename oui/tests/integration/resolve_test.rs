use std::sync::Arc;

use oui::encoder::{FOLD_BUCKETS, bucket_hash, format_mac};
use oui::resolver::{Resolution, UNKNOWN_BUCKET_VENDOR, UNKNOWN_VENDOR, VendorIndex};
use oui::table::{VendorRecord, VendorTable};
use oui::test_utils::table::{random_completion, synthetic_table, worked_example_table};
use oui::{IndexConfig, ResolveStrategy};
use oui_telemetry::tracing::init_test_tracing;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn index_of(table: Arc<VendorTable>) -> VendorIndex {
    VendorIndex::from_table(table, IndexConfig::default()).unwrap()
}

#[test]
fn worked_example() {
    init_test_tracing();

    let index = index_of(worked_example_table());
    for strategy in ResolveStrategy::ALL {
        assert_eq!(index.resolve_with(strategy, "AA:BB:CC:01:02:03"), "Acme");
        assert_eq!(index.resolve_with(strategy, "AA:BB:CC:00:00:01"), "Acme Sub");
    }
}

#[test]
fn longest_prefix_wins_over_every_shorter_cover() {
    init_test_tracing();

    let table = VendorTable::from_records(vec![
        VendorRecord::new("70:B3:D5", "Large").unwrap(),
        VendorRecord::new("70:B3:D5:0", "Medium").unwrap(),
        VendorRecord::new("70:B3:D5:01:2", "Small").unwrap(),
        VendorRecord::new("70:B3:D5:01:23:4", "Tiny").unwrap(),
    ]);
    let index = index_of(Arc::new(table));

    for strategy in ResolveStrategy::ALL {
        assert_eq!(index.resolve_with(strategy, "70:B3:D5:01:23:45"), "Tiny");
        assert_eq!(index.resolve_with(strategy, "70:B3:D5:01:22:45"), "Small");
        assert_eq!(index.resolve_with(strategy, "70:B3:D5:02:22:45"), "Medium");
        assert_eq!(index.resolve_with(strategy, "70:B3:D5:12:22:45"), "Large");
    }
}

#[test]
fn resolution_is_case_insensitive_and_idempotent() {
    init_test_tracing();

    let index = index_of(worked_example_table());
    for strategy in ResolveStrategy::ALL {
        let upper = index.resolve_with(strategy, "AA:BB:CC:01:02:03");
        let lower = index.resolve_with(strategy, "aa:bb:cc:01:02:03");
        assert_eq!(upper, lower);

        for _ in 0..10 {
            assert_eq!(index.resolve_with(strategy, "aa:bb:cc:01:02:03"), upper);
        }
    }
}

#[test]
fn unknown_sentinels_are_distinguished() {
    init_test_tracing();

    let table = synthetic_table(200, 3);
    let index = index_of(table.clone());

    let occupied: Vec<usize> = table
        .iter()
        .map(|record| bucket_hash(&record.prefix, FOLD_BUCKETS))
        .collect();

    // A query in an occupied bucket whose OUI no record uses.
    let no_match = (0u32..1 << 24)
        .map(|oui| format_mac([(oui >> 16) as u8, (oui >> 8) as u8, oui as u8, 0, 0, 0]))
        .find(|mac| {
            occupied.contains(&bucket_hash(mac, FOLD_BUCKETS))
                && table.iter().all(|record| record.prefix[..8] != mac[..8])
        })
        .unwrap();
    assert_eq!(index.resolve(&no_match), UNKNOWN_VENDOR);
    assert_eq!(index.lookup(&no_match), Resolution::Unknown);

    // A query in a bucket no record hashes to.
    let empty_bucket = (0u32..1 << 24)
        .map(|oui| format_mac([(oui >> 16) as u8, (oui >> 8) as u8, oui as u8, 0, 0, 0]))
        .find(|mac| !occupied.contains(&bucket_hash(mac, FOLD_BUCKETS)))
        .unwrap();
    assert_eq!(index.resolve(&empty_bucket), UNKNOWN_BUCKET_VENDOR);
    assert_eq!(index.lookup(&empty_bucket), Resolution::UnknownNoBucket);

    // Only the hashed strategy knows about buckets.
    for strategy in [ResolveStrategy::Linear, ResolveStrategy::Binary] {
        assert_eq!(index.resolve_with(strategy, &empty_bucket), UNKNOWN_VENDOR);
    }
}

#[test]
fn strategies_agree_on_random_queries() {
    init_test_tracing();

    let table = synthetic_table(1_000, 5);
    let index = index_of(table.clone());
    let mut rng = StdRng::seed_from_u64(99);

    for _ in 0..2_000 {
        // Half the queries extend a known prefix, half are arbitrary addresses.
        let query = if rng.gen_bool(0.5) {
            let record = &table[rng.gen_range(0..table.len())];
            random_completion(&mut rng, &record.prefix)
        } else {
            format_mac(rng.r#gen())
        };

        let expected = index.resolve_with(ResolveStrategy::Linear, &query);
        assert_eq!(index.resolve_with(ResolveStrategy::Binary, &query), expected, "{query}");

        let hashed = index.resolve_with(ResolveStrategy::Hashed, &query);
        if expected == UNKNOWN_VENDOR {
            assert!(hashed == UNKNOWN_VENDOR || hashed == UNKNOWN_BUCKET_VENDOR, "{query}");
        } else {
            assert_eq!(hashed, expected, "{query}");
        }
    }
}

#[test]
fn larger_bucket_counts_resolve_identically() {
    init_test_tracing();

    let table = synthetic_table(1_000, 8);
    let small = index_of(table.clone());
    let large = VendorIndex::from_table(
        table.clone(),
        IndexConfig::default().with_bucket_count(FOLD_BUCKETS * 16),
    )
    .unwrap();

    for record in table.iter() {
        assert_eq!(small.resolve(&record.prefix), large.resolve(&record.prefix));
        assert_eq!(large.resolve(&record.prefix), record.vendor);
    }
}

#[test]
fn raw_bytes_resolve_like_strings() {
    init_test_tracing();

    let index = index_of(worked_example_table());
    assert_eq!(index.resolve_bytes([0xaa, 0xbb, 0xcc, 0x00, 0x00, 0x01]), "Acme Sub");
    assert_eq!(index.resolve_bytes([0xaa, 0xbb, 0xcc, 0x01, 0x02, 0x03]), "Acme");
}
