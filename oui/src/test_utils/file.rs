use std::fs;
use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::table::VendorRecord;

/// Header line written at the top of generated vendor files.
pub const VENDOR_FILE_HEADER: &str = "Mac Prefix,Vendor Name,Private,Block Type,Last Update";

/// Temporary vendor file removed on drop.
#[derive(Debug)]
pub struct TempVendorFile {
    path: PathBuf,
}

impl TempVendorFile {
    /// Writes `contents` verbatim to a uniquely named file in the system temp directory.
    pub fn with_contents(contents: &str) -> Self {
        let path = std::env::temp_dir().join(format!("oui-vendors-{}.csv", Uuid::new_v4()));
        fs::write(&path, contents).expect("failed to write temporary vendor file");

        Self { path }
    }

    /// Writes `records` as a vendor file with a header line.
    pub fn with_records(records: &[VendorRecord]) -> Self {
        let mut contents = String::from(VENDOR_FILE_HEADER);
        contents.push('\n');
        for record in records {
            contents.push_str(&vendor_file_line(record));
            contents.push('\n');
        }

        Self::with_contents(&contents)
    }

    /// Returns the path of the file.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempVendorFile {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.path);
    }
}

/// Renders a record as a vendor file row, quoting the vendor when needed.
pub fn vendor_file_line(record: &VendorRecord) -> String {
    let vendor = if record.vendor.contains([',', '"']) {
        format!("\"{}\"", record.vendor.replace('"', "\"\""))
    } else {
        record.vendor.clone()
    };

    let private = record.private.map(|private| private.to_string()).unwrap_or_default();
    let block_type = record.block_type.as_deref().unwrap_or_default();
    let last_updated = record.last_updated.as_deref().unwrap_or_default();

    format!(
        "{},{vendor},{private},{block_type},{last_updated}",
        record.prefix
    )
}
