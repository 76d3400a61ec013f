use std::sync::Arc;
use std::thread;

use oui::resolver::VendorIndex;
use oui::test_utils::table::synthetic_table;
use oui::{IndexConfig, ResolveStrategy};
use oui_telemetry::tracing::init_test_tracing;

#[test]
fn concurrent_lookups_match_single_threaded_results() {
    init_test_tracing();

    let table = synthetic_table(2_000, 31);
    let index = Arc::new(VendorIndex::from_table(table.clone(), IndexConfig::default()).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|worker| {
            let index = index.clone();
            let table = table.clone();
            thread::spawn(move || {
                let strategy = ResolveStrategy::ALL[worker % ResolveStrategy::ALL.len()];
                let mut resolved = 0usize;
                for record in table.iter().skip(worker).step_by(3) {
                    assert_eq!(index.resolve_with(strategy, &record.prefix), record.vendor);
                    resolved += 1;
                }
                resolved
            })
        })
        .collect();

    let resolved: usize = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .sum();
    assert!(resolved > 0);
}
