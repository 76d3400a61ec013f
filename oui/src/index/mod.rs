//! Lookup indices over a [`crate::table::VendorTable`].
//!
//! The sorted index is the table itself: [`sorted`] runs binary search directly over the
//! records. The hashed index ([`hashed::HashedIndex`]) partitions record positions into
//! buckets keyed by the OUI fold. [`linear`] scans the whole table and serves as the
//! correctness oracle for the other two.
//!
//! Every search returns the position of the winning record in the table. Queries must
//! already be in canonical form; normalization belongs to the resolver.

pub mod hashed;
pub mod linear;
pub mod sorted;
mod stats;

pub use hashed::{ChainLookup, HashedIndex};
pub use stats::BucketStats;
