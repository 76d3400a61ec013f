use std::backtrace::Backtrace;
use std::error::Error;
use std::fmt;

use oui::error::OuiError;

/// Returns whether terminal output should include backtraces.
fn should_render_backtrace() -> bool {
    matches!(
        std::env::var("RUST_BACKTRACE").as_deref(),
        Ok("1") | Ok("full")
    )
}

/// Result type for lookup binary operations.
pub type LookupResult<T> = Result<T, LookupError>;

/// Captured backtrace wrapper for error variants without their own.
pub struct CapturedBacktrace(Backtrace);

impl CapturedBacktrace {
    /// Captures a new backtrace for an error variant.
    fn capture() -> Self {
        Self(Backtrace::capture())
    }
}

impl fmt::Debug for CapturedBacktrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error type for the lookup binary.
///
/// Wraps [`OuiError`] for vendor table errors and adds variants for configuration and
/// terminal I/O.
#[derive(Debug)]
pub enum LookupError {
    /// Vendor table loading or index construction error.
    Oui(OuiError),
    /// Configuration, logging or metrics setup error.
    Config(Box<dyn Error + Send + Sync>, CapturedBacktrace),
    /// I/O error.
    Io(std::io::Error, CapturedBacktrace),
}

impl LookupError {
    /// Returns a short category label for this error.
    pub fn category(&self) -> &'static str {
        match self {
            LookupError::Oui(_) => "vendor table error",
            LookupError::Config(_, _) => "configuration error",
            LookupError::Io(_, _) => "i/o error",
        }
    }

    /// Returns the backtrace for this error.
    pub fn backtrace(&self) -> &Backtrace {
        match self {
            LookupError::Oui(err) => err.backtrace(),
            LookupError::Config(_, cb) => &cb.0,
            LookupError::Io(_, cb) => &cb.0,
        }
    }

    /// Creates a configuration error from any error type.
    pub fn config<E: Error + Send + Sync + 'static>(err: E) -> Self {
        LookupError::Config(Box::new(err), CapturedBacktrace::capture())
    }

    /// Returns a user-oriented report for terminal output.
    pub fn render_report(&self) -> String {
        let mut out = String::new();
        out.push_str("oui-lookup failed\n");
        out.push_str(&format!("category: {}\n", self.category()));
        out.push_str(&format!("error: {}\n", self.summary()));

        let mut source = Error::source(self);
        let mut idx = 1usize;
        while let Some(err) = source {
            out.push_str(&format!("cause {idx}: {err}\n"));
            source = err.source();
            idx += 1;
        }

        if should_render_backtrace() {
            out.push_str("backtrace:\n");
            out.push_str(&self.backtrace().to_string());
            if !out.ends_with('\n') {
                out.push('\n');
            }
        }

        out
    }

    /// One-line description without the detail and backtrace blocks of [`OuiError`].
    fn summary(&self) -> String {
        match self {
            LookupError::Oui(err) => {
                let mut summary = err.description().to_string();
                if let Some(line) = err.line() {
                    summary.push_str(&format!(" (line {line})"));
                }
                if let Some(detail) = err.detail() {
                    summary.push_str(&format!(": {detail}"));
                }
                summary
            }
            other => other.to_string(),
        }
    }
}

impl fmt::Display for LookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupError::Oui(err) => write!(f, "{err}"),
            LookupError::Config(source, _) => write!(f, "configuration error: {source}"),
            LookupError::Io(source, _) => write!(f, "i/o error: {source}"),
        }
    }
}

impl Error for LookupError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LookupError::Oui(err) => err.source(),
            LookupError::Config(source, _) => Some(source.as_ref()),
            LookupError::Io(source, _) => Some(source),
        }
    }
}

impl From<std::io::Error> for LookupError {
    fn from(err: std::io::Error) -> Self {
        LookupError::Io(err, CapturedBacktrace::capture())
    }
}

impl From<OuiError> for LookupError {
    fn from(err: OuiError) -> Self {
        LookupError::Oui(err)
    }
}
