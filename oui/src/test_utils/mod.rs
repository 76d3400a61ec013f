//! Utilities for testing vendor tables and indices.
//!
//! [`table`] generates synthetic vendor tables whose prefixes never cover each other, so
//! every record has exactly one correct answer. [`file`] writes tables to uniquely named
//! temporary vendor files for tests that go through the loader.

pub mod file;
pub mod table;
