//! # OVERLAY Core
//!
//! Primitives shared by the blueprint compiler and the frame driver:
//! - Geometry value types (`Rect`, `Point2`)
//! - A capacity-bounded, index-addressed store (`FixedArray`)
//! - The name hash behind class and behavior identity
//!
//! ## Storage Rules
//!
//! 1. **Indices are identity** - a record's position in its array never changes
//!    for the lifetime of a compiled scene
//! 2. **Capacity is fixed** - running out of slots is a reported error, not a panic
//! 3. **Clearing keeps memory** - a reload resets lengths and reuses storage
//!
//! ## Example
//!
//! ```rust
//! use overlay_core::{FixedArray, Rect};
//!
//! let mut areas: FixedArray<Rect, 4> = FixedArray::new();
//! let (index, _) = areas.add(Rect::new(0.0, 0.0, 200.0, 100.0)).unwrap();
//! assert_eq!(index, 0);
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod geometry;
pub mod hash;
pub mod memory;

pub use geometry::{Point2, Rect};
pub use hash::fnv1a_32;
pub use memory::{CapacityError, FixedArray};
