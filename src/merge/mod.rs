//! Sparse layered merge of settings shapes.
//!
//! Sources are ordered from lowest to highest precedence. For every field the
//! last source holding a non-sentinel value wins, so a higher tier only
//! replaces what it explicitly sets.
//!
//! ## Pieces
//! - [`Sentinel`] - the "unset" value of each field type
//! - [`FieldTable`] - a shape's ordered field descriptors and the merge walk
//! - [`ShapeRegistry`] - tables built and validated once at startup
//! - [`select`] - pick one variant from a discriminator-tagged set

mod field;
mod registry;
mod sentinel;
mod variant;

pub use field::{FieldDescriptor, FieldKind, FieldTable, FieldTableBuilder, Shape};
pub use registry::ShapeRegistry;
pub use sentinel::Sentinel;
pub use variant::{Discriminated, select};
