//! Re-exports to support `use canopy::prelude::*;`

/*-----------------------------------------------------------------------
cell values and types
---------------------------------------------------------------------- */
pub use crate::value::{TypeDescriptor, Value, ValueType, NA_STRING};
/*-----------------------------------------------------------------------
columns, paths and frames
---------------------------------------------------------------------- */
pub use crate::column::{Column, ColumnKind, ColumnPath, ColumnWithPath};
pub use crate::frame::{DataFrame, Row};
pub use crate::schema::{ColumnSchema, DataFrameSchema};
/*-----------------------------------------------------------------------
the column selection DSL
---------------------------------------------------------------------- */
pub use crate::select::{
    all, all_dfs, at, col, col_at, cols, cols_of, cols_range, ColumnSet, ResolveContext,
    UnresolvedPolicy,
};
/*-----------------------------------------------------------------------
grouping and joining
---------------------------------------------------------------------- */
pub use crate::group::{AggregateBuilder, GroupedDataFrame, GROUPS_COLUMN};
pub use crate::join::{match_on, JoinKey, JoinType};
pub use crate::ops::SortColumn;
/*-----------------------------------------------------------------------
errors
---------------------------------------------------------------------- */
pub use crate::error::{FrameError, Result};
/*-----------------------------------------------------------------------
re-export macros flagged with #[macro_export]
macro export always happens in the crate root, so we re-export them here
---------------------------------------------------------------------- */
pub use crate::{df, path};
