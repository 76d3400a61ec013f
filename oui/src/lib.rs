//! Hardware address vendor resolution.
//!
//! Loads an IEEE-style vendor assignment file into a sorted [`table::VendorTable`], builds
//! a hashed index over it, and resolves addresses to the vendor holding the longest
//! matching prefix. See [`resolver::VendorIndex`] for the entry point.

pub mod encoder;
pub mod error;
pub mod index;
pub mod loader;
mod macros;
pub mod metrics;
pub mod resolver;
pub mod table;
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
pub mod verify;

pub use oui_config::shared::{IndexConfig, ResolveStrategy};
