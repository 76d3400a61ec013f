//! Macros for building and returning [`crate::error::OuiError`] values.

/// Creates an [`crate::error::OuiError`] from error kind and description.
///
/// Accepts an optional dynamic detail, converted with [`ToString`], and an optional source
/// error.
#[macro_export]
macro_rules! oui_error {
    ($kind:expr, $desc:expr) => {
        $crate::error::OuiError::from(($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        $crate::error::OuiError::from(($kind, $desc)).with_source($source)
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        $crate::error::OuiError::from(($kind, $desc, $detail.to_string()))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        $crate::error::OuiError::from(($kind, $desc, $detail.to_string())).with_source($source)
    };
}

/// Creates and returns an [`crate::error::OuiError`] from the current function.
///
/// Supports the same optional detail and source arguments as [`oui_error!`].
#[macro_export]
macro_rules! bail {
    ($kind:expr, $desc:expr) => {
        return ::core::result::Result::Err($crate::oui_error!($kind, $desc))
    };
    ($kind:expr, $desc:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::oui_error!($kind, $desc, source: $source))
    };
    ($kind:expr, $desc:expr, $detail:expr) => {
        return ::core::result::Result::Err($crate::oui_error!($kind, $desc, $detail))
    };
    ($kind:expr, $desc:expr, $detail:expr, source: $source:expr) => {
        return ::core::result::Result::Err($crate::oui_error!(
            $kind,
            $desc,
            $detail,
            source: $source
        ))
    };
}
