use oui::error::ErrorKind;
use oui::resolver::VendorIndex;
use oui::test_utils::file::{TempVendorFile, VENDOR_FILE_HEADER};
use oui::test_utils::table::synthetic_records;
use oui::{IndexConfig, ResolveStrategy};
use oui_telemetry::tracing::init_test_tracing;

#[test]
fn build_from_file_resolves_every_strategy() {
    init_test_tracing();

    let file = TempVendorFile::with_contents(&format!(
        "{VENDOR_FILE_HEADER}\n\
         AA:BB:CC,Acme,false,MA-L,2015/01/01\n\
         aa:bb:cc:00:00,\"Acme Sub, Inc.\",false,MA-S,2019/07/04\r\n\
         \n\
         00:1B:C5:00:0,Converging Systems Inc.,false,MA-S,\n"
    ));

    let index = VendorIndex::build(file.path(), IndexConfig::default()).unwrap();
    assert_eq!(index.table().len(), 3);

    for strategy in ResolveStrategy::ALL {
        assert_eq!(index.resolve_with(strategy, "AA:BB:CC:01:02:03"), "Acme");
        assert_eq!(
            index.resolve_with(strategy, "aa:bb:cc:00:00:01"),
            "Acme Sub, Inc."
        );
        assert_eq!(
            index.resolve_with(strategy, "00:1B:C5:00:0A:BC"),
            "Converging Systems Inc."
        );
    }
}

#[test]
fn build_round_trips_synthetic_table() {
    init_test_tracing();

    let records = synthetic_records(300, 11);
    let file = TempVendorFile::with_records(&records);
    let index = VendorIndex::build(file.path(), IndexConfig::default()).unwrap();

    assert_eq!(index.table().len(), records.len());
    for record in &records {
        assert_eq!(index.resolve(&record.prefix), record.vendor);
    }
}

#[test]
fn format_error_reports_first_bad_line() {
    init_test_tracing();

    let file = TempVendorFile::with_contents(&format!(
        "{VENDOR_FILE_HEADER}\n\
         AA:BB:CC,Acme,false,MA-L,\n\
         \n\
         AA:BB:CD,\"Unterminated,false,MA-L,\n\
         no delimiter at all\n"
    ));

    let err = VendorIndex::build(file.path(), IndexConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VendorFileFormat);
    assert_eq!(err.line(), Some(4));
}

#[test]
fn missing_delimiter_is_format_error() {
    init_test_tracing();

    let file = TempVendorFile::with_contents(&format!(
        "{VENDOR_FILE_HEADER}\nAA:BB:CC Acme\n"
    ));

    let err = VendorIndex::build(file.path(), IndexConfig::default()).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::VendorFileFormat);
    assert_eq!(err.line(), Some(2));
}

#[test]
fn missing_file_is_io_error() {
    init_test_tracing();

    let path = std::env::temp_dir().join(format!("oui-missing-{}.csv", uuid::Uuid::new_v4()));
    let err = VendorIndex::build(&path, IndexConfig::default()).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::IoError);
    assert_eq!(err.line(), None);
}

#[test]
fn invalid_bucket_count_fails_before_reading() {
    init_test_tracing();

    let path = std::env::temp_dir().join(format!("oui-missing-{}.csv", uuid::Uuid::new_v4()));
    let config = IndexConfig::default().with_bucket_count(3000);
    let err = VendorIndex::build(&path, config).unwrap_err();

    assert_eq!(err.kind(), ErrorKind::ConfigError);
}
