//! # Memory Management
//!
//! Fixed-capacity storage for scene records.
//!
//! ## Design Philosophy
//!
//! Every slot is allocated once, when the array is created. Afterwards:
//! - Appends never allocate
//! - Clearing resets the length and keeps the slots
//! - A record's index is its identity until the next clear

mod array;

pub use array::{CapacityError, FixedArray};
