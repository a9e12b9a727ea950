//! Nested, typed, in-memory data frames.
//!
//! A [`frame::DataFrame`] is an immutable, ordered list of named columns
//! sharing one row count. Columns hold typed nullable cells, nested child
//! frames sharing the parent row count (group columns), or independent
//! per-row tables (frame columns). Operations never mutate; each returns
//! a new frame that shares unchanged columns with its input.
//!
//! Columns are addressed declaratively through the [`select`] DSL, whose
//! expressions resolve lazily against a frame's nested schema. Grouping
//! and joining match rows on key tuples that may descend through nested
//! groups.

// modules
pub mod column;   // value, group and frame columns, and paths through them
pub mod display;  // fixed-width table rendering
pub mod error;    // the crate error enum and Result alias
pub mod frame;    // the DataFrame itself and row views
pub mod group;    // hash-grouping and per-group aggregation
pub mod io;       // csv and json adapters
pub mod join;     // the hash join engine
pub mod ops;      // select/remove/insert/update, sort, concat, pivot
pub mod schema;   // structural schema snapshots
pub mod select;   // the column selection DSL
pub mod value;    // the dynamically-typed cell currency

#[macro_use]
mod macros;

pub mod prelude;

// re-exports
pub use column::{Column, ColumnPath};
pub use error::{FrameError, Result};
pub use frame::DataFrame;
pub use group::GroupedDataFrame;
pub use join::JoinType;
pub use select::ColumnSet;
pub use value::Value;
