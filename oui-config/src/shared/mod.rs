//! Shared configuration types for the lookup engine and its binaries.

mod base;
mod index;
mod lookup;

pub use base::ValidationError;
pub use index::{IndexConfig, ResolveStrategy};
pub use lookup::{LookupConfig, MetricsConfig};
