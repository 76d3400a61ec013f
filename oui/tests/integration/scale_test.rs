use oui::resolver::VendorIndex;
use oui::test_utils::table::{random_completion, synthetic_table};
use oui::verify::verify;
use oui::{IndexConfig, ResolveStrategy};
use oui_telemetry::tracing::init_test_tracing;
use rand::SeedableRng;
use rand::rngs::StdRng;

const RECORDS: usize = 5_000;

#[test]
fn every_record_resolves_to_itself_at_scale() {
    init_test_tracing();

    let table = synthetic_table(RECORDS, 2024);
    let index = VendorIndex::from_table(table.clone(), IndexConfig::default()).unwrap();
    let mut rng = StdRng::seed_from_u64(2024);

    assert_eq!(index.table().len(), RECORDS);
    for record in table.iter() {
        let query = random_completion(&mut rng, &record.prefix);
        for strategy in ResolveStrategy::ALL {
            assert_eq!(
                index.resolve_with(strategy, &record.prefix),
                record.vendor,
                "{strategy} on {}",
                record.prefix
            );
            assert_eq!(
                index.resolve_with(strategy, &query),
                record.vendor,
                "{strategy} on {query}"
            );
        }
    }
}

#[test]
fn verification_is_clean_on_non_prefixing_table() {
    init_test_tracing();

    let index = VendorIndex::from_table(synthetic_table(RECORDS, 77), IndexConfig::default())
        .unwrap();
    let report = verify(&index);

    assert_eq!(report.records, RECORDS);
    assert_eq!(report.total_mismatches(), 0, "{report}");
    for strategy in &report.strategies {
        assert_eq!(strategy.checked, RECORDS * 2);
    }
}

#[test]
fn bucket_stats_account_for_every_record() {
    init_test_tracing();

    let index = VendorIndex::from_table(synthetic_table(RECORDS, 13), IndexConfig::default())
        .unwrap();
    let stats = index.hashed().stats();

    assert_eq!(stats.buckets, IndexConfig::DEFAULT_BUCKET_COUNT);
    assert_eq!(stats.records, RECORDS);
    assert!(stats.max >= 1);
    assert!(stats.empty < stats.buckets);
    assert!((stats.mean - RECORDS as f64 / stats.buckets as f64).abs() < f64::EPSILON);
}
