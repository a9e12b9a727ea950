//! Frame operators: selection, removal, insertion, update, sorting,
//! concatenation, and pivoting. Each operator returns a new frame and
//! shares untouched columns with its input.

// modules
pub mod assemble;
pub mod concat;
pub mod pivot;
pub mod select;
pub mod sort;

pub use sort::SortColumn;
