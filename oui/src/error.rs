//! Error types and result definitions for vendor table operations.
//!
//! [`OuiError`] carries a classification ([`ErrorKind`]), a static description, optional
//! dynamic detail, an optional source, the vendor file line that caused it (for format
//! errors), and the callsite location and backtrace captured at construction.
//!
//! Only building an index can fail. Resolution never produces an [`OuiError`]: "no match"
//! is an ordinary result.

use std::backtrace::Backtrace;
use std::borrow::Cow;
use std::error;
use std::fmt;
use std::panic::Location;
use std::sync::Arc;

use oui_config::shared::ValidationError;

/// Convenient result type for vendor table operations.
pub type OuiResult<T> = Result<T, OuiError>;

/// Payload of a single [`OuiError`].
#[derive(Debug, Clone)]
struct ErrorPayload {
    kind: ErrorKind,
    description: Cow<'static, str>,
    detail: Option<Cow<'static, str>>,
    source: Option<Arc<dyn error::Error + Send + Sync>>,
    line: Option<usize>,
    location: &'static Location<'static>,
    backtrace: Arc<Backtrace>,
}

/// Main error type for loading vendor tables and building indices.
#[derive(Debug, Clone)]
pub struct OuiError {
    payload: Box<ErrorPayload>,
}

/// Categories of errors raised while building a vendor index.
#[derive(PartialEq, Eq, Copy, Clone, Debug, Hash)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The vendor file could not be opened or read.
    IoError,
    /// A row of the vendor file is malformed. The error carries the 1-based line number.
    VendorFileFormat,
    /// A value handed to the engine is not well formed (for example a non-canonical prefix).
    InvalidData,
    /// Index settings are invalid.
    ConfigError,
}

impl OuiError {
    /// Returns the [`ErrorKind`] of this error.
    pub fn kind(&self) -> ErrorKind {
        self.payload.kind
    }

    /// Returns the static description of this error.
    pub fn description(&self) -> &str {
        &self.payload.description
    }

    /// Returns the detailed error information if available.
    pub fn detail(&self) -> Option<&str> {
        self.payload.detail.as_deref()
    }

    /// Returns the 1-based vendor file line this error refers to, if any.
    pub fn line(&self) -> Option<usize> {
        self.payload.line
    }

    /// Returns the captured backtrace for this error.
    pub fn backtrace(&self) -> &Backtrace {
        self.payload.backtrace.as_ref()
    }

    /// Returns the captured callsite location for this error.
    pub fn location(&self) -> &'static Location<'static> {
        self.payload.location
    }

    /// Attaches an originating [`error::Error`] to this error and returns the modified instance.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: error::Error + Send + Sync + 'static,
    {
        self.payload.source = Some(Arc::new(source));
        self
    }

    /// Attaches the 1-based vendor file line number and returns the modified instance.
    pub fn with_line(mut self, line: usize) -> Self {
        self.payload.line = Some(line);
        self
    }

    /// Creates an [`OuiError`] from its components.
    #[track_caller]
    fn from_components(
        kind: ErrorKind,
        description: Cow<'static, str>,
        detail: Option<Cow<'static, str>>,
        source: Option<Arc<dyn error::Error + Send + Sync>>,
    ) -> Self {
        OuiError {
            payload: Box::new(ErrorPayload {
                kind,
                description,
                detail,
                source,
                line: None,
                location: Location::caller(),
                backtrace: Arc::new(Backtrace::capture()),
            }),
        }
    }
}

impl PartialEq for OuiError {
    fn eq(&self, other: &OuiError) -> bool {
        self.payload.kind == other.payload.kind && self.payload.line == other.payload.line
    }
}

impl fmt::Display for OuiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> Result<(), fmt::Error> {
        let payload = &self.payload;
        write!(f, "[{:?}] {}", payload.kind, payload.description)?;
        if let Some(line) = payload.line {
            write!(f, " (line {line})")?;
        }
        write!(
            f,
            " @ {}:{}:{}",
            payload.location.file(),
            payload.location.line(),
            payload.location.column()
        )?;

        write_detail(payload.detail.as_deref(), f, 1)?;
        write_backtrace(payload.backtrace.as_ref(), f, 1)?;

        Ok(())
    }
}

impl error::Error for OuiError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        self.payload
            .source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn error::Error + 'static))
    }
}

/// Writes the captured backtrace with indentation.
fn write_backtrace(
    backtrace: &Backtrace,
    f: &mut fmt::Formatter<'_>,
    indent: usize,
) -> fmt::Result {
    let indent_str = "  ".repeat(indent);

    let rendered_backtrace = format!("{backtrace}");
    if !rendered_backtrace.trim().is_empty() {
        write!(f, "\n{indent_str}Backtrace:")?;
        for line in rendered_backtrace.lines() {
            if line.trim().is_empty() {
                write!(f, "\n{indent_str}  ")?;
            } else {
                write!(f, "\n{indent_str}  {line}")?;
            }
        }
    }

    Ok(())
}

/// Writes the detail block with indentation.
fn write_detail(detail: Option<&str>, f: &mut fmt::Formatter<'_>, indent: usize) -> fmt::Result {
    if let Some(detail) = detail {
        let indent_str = "  ".repeat(indent);
        if detail.trim().is_empty() {
            write!(f, "\n{indent_str}Detail: <empty>")?;
        } else {
            write!(f, "\n{indent_str}Detail:")?;
            for line in detail.lines() {
                write!(f, "\n{indent_str}  {line}")?;
            }
        }
    }

    Ok(())
}

/// Creates an [`OuiError`] from an error kind and static description.
impl From<(ErrorKind, &'static str)> for OuiError {
    #[track_caller]
    fn from((kind, desc): (ErrorKind, &'static str)) -> OuiError {
        OuiError::from_components(kind, Cow::Borrowed(desc), None, None)
    }
}

/// Creates an [`OuiError`] from an error kind, static description, and dynamic detail.
impl<D> From<(ErrorKind, &'static str, D)> for OuiError
where
    D: Into<Cow<'static, str>>,
{
    #[track_caller]
    fn from((kind, desc, detail): (ErrorKind, &'static str, D)) -> OuiError {
        OuiError::from_components(kind, Cow::Borrowed(desc), Some(detail.into()), None)
    }
}

/// Converts [`std::io::Error`] to [`OuiError`] with [`ErrorKind::IoError`].
impl From<std::io::Error> for OuiError {
    #[track_caller]
    fn from(err: std::io::Error) -> OuiError {
        let detail = err.to_string();
        OuiError::from_components(
            ErrorKind::IoError,
            Cow::Borrowed("I/O operation failed"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

/// Converts [`ValidationError`] to [`OuiError`] with [`ErrorKind::ConfigError`].
impl From<ValidationError> for OuiError {
    #[track_caller]
    fn from(err: ValidationError) -> OuiError {
        let detail = err.to_string();
        OuiError::from_components(
            ErrorKind::ConfigError,
            Cow::Borrowed("Invalid index configuration"),
            Some(Cow::Owned(detail)),
            Some(Arc::new(err)),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{bail, oui_error};

    fn failing_parse() -> OuiResult<()> {
        bail!(
            ErrorKind::VendorFileFormat,
            "Missing field delimiter",
            "expected `,` after the prefix"
        );
    }

    #[test]
    fn display_includes_kind_line_and_detail() {
        let err = oui_error!(
            ErrorKind::VendorFileFormat,
            "Missing field delimiter",
            "no comma"
        )
        .with_line(7);

        let rendered = err.to_string();
        assert!(rendered.starts_with("[VendorFileFormat] Missing field delimiter (line 7) @ "));
        assert!(rendered.contains("Detail:\n    no comma"));
        assert_eq!(err.line(), Some(7));
    }

    #[test]
    fn bail_returns_error_with_detail() {
        let err = failing_parse().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::VendorFileFormat);
        assert_eq!(err.detail(), Some("expected `,` after the prefix"));
        assert_eq!(err.line(), None);
    }

    #[test]
    fn io_errors_keep_their_source() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err = OuiError::from(io_err);

        assert_eq!(err.kind(), ErrorKind::IoError);
        assert_eq!(err.detail(), Some("no such file"));
        assert!(error::Error::source(&err).is_some());
    }

    #[test]
    fn validation_errors_map_to_config_kind() {
        let err = OuiError::from(ValidationError::InvalidFieldValue {
            field: "index.bucket_count".to_string(),
            constraint: "must be a power of two".to_string(),
        });

        assert_eq!(err.kind(), ErrorKind::ConfigError);
        assert!(err.detail().unwrap().contains("index.bucket_count"));
    }

    #[test]
    fn location_points_at_construction_site() {
        let err = oui_error!(ErrorKind::InvalidData, "Bad prefix");
        assert!(err.location().file().ends_with("error.rs"));
    }
}
