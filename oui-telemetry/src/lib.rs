//! Logging and metrics setup shared by the OUI lookup binaries and tests.

pub mod metrics;
pub mod tracing;
