//! Dense tensor implementation and operations
//!
//! The type lives in `types`; each sibling module adds one family of operations.

pub mod types;

mod algebra;
mod comparison;
mod creation;
mod elementwise;
mod indexing;
mod reductions;
mod shape_ops;

pub mod densend_traits;

pub use types::DenseND;
