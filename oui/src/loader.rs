//! Vendor assignment file parsing.
//!
//! The file is a CSV export with one header line followed by rows of the form
//! `prefix,vendor[,private,block_type,last_updated]`. The vendor may be double-quoted to
//! embed commas, with `""` standing for a literal quote, and the closing quote must be
//! followed by a `,`. Rows are read as raw bytes and fields that are not valid UTF-8 are
//! decoded lossily. Loading is fail-fast: the first malformed row aborts the load with an
//! [`ErrorKind::VendorFileFormat`] error carrying its 1-based line number.

use std::borrow::Cow;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use csv::{ByteRecord, ReaderBuilder};
use tracing::{debug, info};

use crate::bail;
use crate::encoder::is_canonical;
use crate::error::{ErrorKind, OuiError, OuiResult};
use crate::oui_error;
use crate::table::{VendorRecord, VendorTable};

const FIELD_SEPARATOR: u8 = b',';
const QUOTE: u8 = b'"';

/// Loads and sorts the vendor table stored at `path`.
pub fn load_vendor_table(path: impl AsRef<Path>) -> OuiResult<VendorTable> {
    let path = path.as_ref();
    info!(path = %path.display(), "loading vendor table");

    let file = File::open(path).map_err(|err| {
        oui_error!(
            ErrorKind::IoError,
            "Vendor file could not be opened",
            format!("failed to open {}: {err}", path.display()),
            source: err
        )
    })?;

    load_vendor_table_from_reader(BufReader::new(file))
}

/// Loads and sorts a vendor table from any buffered reader.
///
/// The first line is a header and is skipped without validation. Blank lines are skipped.
pub fn load_vendor_table_from_reader<R: BufRead>(mut reader: R) -> OuiResult<VendorTable> {
    let mut records = Vec::new();
    let mut line = Vec::new();
    let mut line_number = 0;

    loop {
        line.clear();
        let read = reader
            .read_until(b'\n', &mut line)
            .map_err(|err| OuiError::from(err).with_line(line_number + 1))?;
        if read == 0 {
            break;
        }
        line_number += 1;

        let row = strip_line_terminator(&line);
        if line_number == 1 {
            debug!(header = %String::from_utf8_lossy(row), "skipping vendor file header");
            continue;
        }

        if row.iter().all(u8::is_ascii_whitespace) {
            continue;
        }

        let record = parse_line(row).map_err(|err| err.with_line(line_number))?;
        records.push(record);
    }

    info!(records = records.len(), "parsed vendor file, sorting by prefix");
    let table = VendorTable::from_records(records);
    debug!("vendor table sorted");

    Ok(table)
}

/// Parses a single data row into a [`VendorRecord`].
pub fn parse_line(line: impl AsRef<[u8]>) -> OuiResult<VendorRecord> {
    let line = line.as_ref();
    let fields = split_fields(line)?;

    if fields.len() < 2 {
        bail!(
            ErrorKind::VendorFileFormat,
            "Missing field delimiter",
            "expected `,` after the prefix"
        );
    }

    let raw_prefix = String::from_utf8_lossy(&fields[0]);
    let prefix = raw_prefix.trim().to_ascii_uppercase();
    if !is_canonical(&prefix) {
        bail!(
            ErrorKind::VendorFileFormat,
            "Vendor prefix is not hex-and-colon",
            format!("prefix `{}` is not a canonical address prefix", raw_prefix.trim())
        );
    }

    // A canonical prefix holds no comma, so the vendor starts after the first one.
    let vendor_start = line
        .iter()
        .position(|&byte| byte == FIELD_SEPARATOR)
        .map_or(line.len(), |separator| separator + 1);
    let quoted = line.get(vendor_start) == Some(&QUOTE);
    if quoted {
        check_closing_quote(line, vendor_start, &fields[1])?;
    }

    if fields.len() < 3 {
        bail!(
            ErrorKind::VendorFileFormat,
            "Missing field delimiter",
            "expected `,` after the vendor name"
        );
    }

    let vendor = String::from_utf8_lossy(&fields[1]);
    let vendor = if quoted {
        vendor.into_owned()
    } else {
        vendor.trim().to_string()
    };

    let mut extra = fields.iter().skip(2).map(String::from_utf8_lossy);
    let private = extra.next().and_then(|field| parse_private(field.trim()));
    let block_type = extra.next().and_then(non_empty);
    let last_updated = extra.next().and_then(non_empty);

    Ok(VendorRecord::from_canonical(prefix, vendor).with_details(private, block_type, last_updated))
}

/// Splits one row into its fields.
fn split_fields(line: &[u8]) -> OuiResult<ByteRecord> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .buffer_capacity(line.len() + 1)
        .from_reader(line);

    let mut fields = ByteRecord::new();
    reader.read_byte_record(&mut fields).map_err(|err| {
        oui_error!(
            ErrorKind::VendorFileFormat,
            "Row is not valid CSV",
            err.to_string(),
            source: err
        )
    })?;

    Ok(fields)
}

/// Checks that the quoted vendor starting at `vendor_start` is closed and followed by `,`.
///
/// `vendor` is the unescaped field, so the raw closing quote sits after the field bytes
/// plus one byte per escaped quote.
fn check_closing_quote(line: &[u8], vendor_start: usize, vendor: &[u8]) -> OuiResult<()> {
    let escaped = vendor.iter().filter(|&&byte| byte == QUOTE).count();
    let closing = vendor_start + 1 + vendor.len() + escaped;

    match (line.get(closing), line.get(closing + 1)) {
        (Some(&QUOTE), Some(&FIELD_SEPARATOR)) => Ok(()),
        (Some(_), _) => bail!(
            ErrorKind::VendorFileFormat,
            "Closing quote not followed by field delimiter",
            format!("unexpected content after closing quote at offset {closing}")
        ),
        (None, _) => bail!(
            ErrorKind::VendorFileFormat,
            "Missing closing quote",
            "quoted vendor name is not terminated"
        ),
    }
}

fn strip_line_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

fn parse_private(field: &str) -> Option<bool> {
    match field.to_ascii_lowercase().as_str() {
        "true" | "yes" | "1" => Some(true),
        "false" | "no" | "0" => Some(false),
        _ => None,
    }
}

fn non_empty(field: Cow<'_, str>) -> Option<String> {
    let field = field.trim();
    (!field.is_empty()).then(|| field.to_string())
}
