//! Vendor records and the sorted table that owns them.

use std::ops::Index;

use crate::bail;
use crate::encoder::{canonicalize, numeric_key};
use crate::error::{ErrorKind, OuiResult};

/// One assigned prefix block and the vendor it belongs to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VendorRecord {
    /// Canonical prefix of the block (`AA:BB:CC`, `70:B3:D5:0`, ...).
    pub prefix: String,
    /// Vendor name, with any CSV quoting removed.
    pub vendor: String,
    /// 24-bit OUI key of the prefix; see [`crate::encoder::numeric_key`].
    pub numeric_key: u32,
    /// Whether the assignment is marked private, when the file says so.
    pub private: Option<bool>,
    /// Block type (`MA-L`, `MA-M`, `MA-S`, ...), when present.
    pub block_type: Option<String>,
    /// Last update date as written in the file, when present.
    pub last_updated: Option<String>,
}

impl VendorRecord {
    /// Creates a record from a prefix in any accepted spelling.
    ///
    /// The prefix is normalized to canonical form. Fails with [`ErrorKind::InvalidData`]
    /// when it cannot be.
    pub fn new(prefix: &str, vendor: impl Into<String>) -> OuiResult<Self> {
        let Some(prefix) = canonicalize(prefix) else {
            bail!(
                ErrorKind::InvalidData,
                "Vendor prefix is not hex-and-colon",
                format!("prefix `{prefix}` is not a canonical address prefix")
            );
        };

        Ok(Self::from_canonical(prefix, vendor.into()))
    }

    /// Creates a record from a prefix already known to be canonical.
    pub(crate) fn from_canonical(prefix: String, vendor: String) -> Self {
        Self {
            numeric_key: numeric_key(&prefix),
            prefix,
            vendor,
            private: None,
            block_type: None,
            last_updated: None,
        }
    }

    /// Sets the optional assignment details carried by IEEE exports.
    pub fn with_details(
        mut self,
        private: Option<bool>,
        block_type: Option<String>,
        last_updated: Option<String>,
    ) -> Self {
        self.private = private;
        self.block_type = block_type;
        self.last_updated = last_updated;
        self
    }

    /// Number of address bits covered by the prefix.
    pub fn prefix_bits(&self) -> usize {
        self.prefix.bytes().filter(u8::is_ascii_hexdigit).count() * 4
    }
}

/// Immutable vendor table sorted ascending by prefix.
///
/// Records with equal prefixes keep their input order. The table doubles as the sorted
/// index: binary search runs directly over it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorTable {
    records: Vec<VendorRecord>,
}

impl VendorTable {
    /// Sorts `records` by prefix (stable) and wraps them in a table.
    pub fn from_records(mut records: Vec<VendorRecord>) -> Self {
        records.sort_by(|a, b| a.prefix.cmp(&b.prefix));
        Self { records }
    }

    /// Returns the number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns true if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns the records in prefix order.
    pub fn records(&self) -> &[VendorRecord] {
        &self.records
    }

    /// Returns the record at `index`, if any.
    pub fn get(&self, index: usize) -> Option<&VendorRecord> {
        self.records.get(index)
    }

    /// Returns an iterator over the records in prefix order.
    pub fn iter(&self) -> impl Iterator<Item = &VendorRecord> {
        self.records.iter()
    }

    /// Returns the prefix of the first record (in prefix order) assigned to `vendor`.
    pub fn prefix_of_vendor(&self, vendor: &str) -> Option<&str> {
        self.records
            .iter()
            .find(|record| record.vendor == vendor)
            .map(|record| record.prefix.as_str())
    }
}

impl Index<usize> for VendorTable {
    type Output = VendorRecord;

    fn index(&self, index: usize) -> &Self::Output {
        &self.records[index]
    }
}
