//! Columns are the unit of data ownership. A column is one of three kinds:
//! a value column of typed cells, a group column holding nested child
//! columns that share the parent row count, or a frame column whose cells
//! are whole data frames with independent shapes.
//!
//! Columns are immutable once built. Frames hold them behind `Arc`, so
//! structural transforms clone pointers, not data.

// dependencies
use std::fmt;
use std::sync::Arc;
use paste::paste;
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::value::{TypeDescriptor, Value, ValueType};

// modules
pub mod data;
pub mod path;

pub use data::ColumnData;
pub use path::ColumnPath;

/// The three structural kinds of column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    Value,
    Group,
    Frame,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Value => write!(f, "value"),
            ColumnKind::Group => write!(f, "group"),
            ColumnKind::Frame => write!(f, "frame"),
        }
    }
}

/* -----------------------------------------------------------------------------
the three column variants
----------------------------------------------------------------------------- */

/// A flat column of typed, nullable cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValueColumn {
    pub name: String,
    pub data: ColumnData,
}

/// A named group of child columns; the children share the parent's row count.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupColumn {
    pub name: String,
    pub frame: DataFrame,
}

/// A column whose cells are data frames, each with its own shape.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameColumn {
    pub name: String,
    pub frames: Vec<Option<DataFrame>>,
}

/// A column of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    Value(ValueColumn),
    Group(GroupColumn),
    Frame(FrameColumn),
}

impl Column {
    /* -----------------------------------------------------------------------------
    constructors
    ----------------------------------------------------------------------------- */
    /// A value column with its base type inferred from the first non-null
    /// cell; an all-null input defaults to `Str`.
    pub fn of<V: Into<Value>>(name: &str, values: Vec<V>) -> Result<Column> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Ok(Column::Value(ValueColumn {
            name: name.to_string(),
            data: ColumnData::from_values_inferred(values)?,
        }))
    }

    /// A value column with an explicit base type; every cell is checked.
    pub fn with_type<V: Into<Value>>(name: &str, base: ValueType, values: Vec<V>) -> Result<Column> {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();
        Ok(Column::Value(ValueColumn {
            name: name.to_string(),
            data: ColumnData::from_values(base, values)?,
        }))
    }

    /// A value column built directly from typed storage.
    pub fn from_data(name: &str, data: ColumnData) -> Column {
        Column::Value(ValueColumn { name: name.to_string(), data })
    }

    /// A group column wrapping the given child frame.
    pub fn group(name: &str, frame: DataFrame) -> Column {
        Column::Group(GroupColumn { name: name.to_string(), frame })
    }

    /// A frame column from per-row nested frames.
    pub fn frames(name: &str, frames: Vec<Option<DataFrame>>) -> Column {
        Column::Frame(FrameColumn { name: name.to_string(), frames })
    }

    /// An all-null value column of `len` rows.
    pub fn nulls(name: &str, base: ValueType, len: usize) -> Column {
        Column::from_data(name, ColumnData::nulls(base, len))
    }

    /* -----------------------------------------------------------------------------
    accessors
    ----------------------------------------------------------------------------- */
    pub fn name(&self) -> &str {
        match self {
            Column::Value(c) => &c.name,
            Column::Group(c) => &c.name,
            Column::Frame(c) => &c.name,
        }
    }

    pub fn kind(&self) -> ColumnKind {
        match self {
            Column::Value(_) => ColumnKind::Value,
            Column::Group(_) => ColumnKind::Group,
            Column::Frame(_) => ColumnKind::Frame,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Column::Value(c) => c.data.len(),
            Column::Group(c) => c.frame.n_row(),
            Column::Frame(c) => c.frames.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The value type of a value column, with nullability reflecting the
    /// nulls actually present in the data.
    pub fn dtype(&self) -> Result<TypeDescriptor> {
        match self {
            Column::Value(c) => Ok(TypeDescriptor {
                base: c.data.base_type(),
                nullable: c.data.has_nulls(),
            }),
            other => Err(FrameError::KindMismatch {
                expected: ColumnKind::Value,
                found: other.kind(),
                path: ColumnPath::of(other.name()),
            }),
        }
    }

    /// The same column under a new name.
    pub fn renamed(&self, name: &str) -> Column {
        let mut col = self.clone();
        match &mut col {
            Column::Value(c) => c.name = name.to_string(),
            Column::Group(c) => c.name = name.to_string(),
            Column::Frame(c) => c.name = name.to_string(),
        }
        col
    }

    /// The boxed cell at `row` of a value column.
    pub fn value_at(&self, row: usize) -> Result<Value> {
        match self {
            Column::Value(c) => Ok(c.data.value(row)),
            other => Err(FrameError::KindMismatch {
                expected: ColumnKind::Value,
                found: other.kind(),
                path: ColumnPath::of(other.name()),
            }),
        }
    }

    pub fn as_value(&self) -> Result<&ValueColumn> {
        match self {
            Column::Value(c) => Ok(c),
            other => Err(FrameError::KindMismatch {
                expected: ColumnKind::Value,
                found: other.kind(),
                path: ColumnPath::of(other.name()),
            }),
        }
    }

    pub fn as_group(&self) -> Result<&GroupColumn> {
        match self {
            Column::Group(c) => Ok(c),
            other => Err(FrameError::KindMismatch {
                expected: ColumnKind::Group,
                found: other.kind(),
                path: ColumnPath::of(other.name()),
            }),
        }
    }

    pub fn as_frame(&self) -> Result<&FrameColumn> {
        match self {
            Column::Frame(c) => Ok(c),
            other => Err(FrameError::KindMismatch {
                expected: ColumnKind::Frame,
                found: other.kind(),
                path: ColumnPath::of(other.name()),
            }),
        }
    }

    /* -----------------------------------------------------------------------------
    row-wise transforms
    ----------------------------------------------------------------------------- */
    /// Copy the rows at the given indices, in order, recursing into nested
    /// structure.
    pub fn take_rows(&self, rows: &[usize]) -> Result<Column> {
        Ok(match self {
            Column::Value(c) => Column::Value(ValueColumn {
                name: c.name.clone(),
                data: c.data.take_rows(rows),
            }),
            Column::Group(c) => Column::Group(GroupColumn {
                name: c.name.clone(),
                frame: c.frame.take_rows(rows)?,
            }),
            Column::Frame(c) => Column::Frame(FrameColumn {
                name: c.name.clone(),
                frames: rows.iter().map(|&i| c.frames[i].clone()).collect(),
            }),
        })
    }
}

/* -----------------------------------------------------------------------------
typed accessors on value columns
----------------------------------------------------------------------------- */
macro_rules! impl_column_typed {
    ($($fn_:ident, $variant:ident, $type_:ty);*) => {
        impl ValueColumn {
            $( paste! {
                #[doc = "The typed cells of an `" $variant "` column."]
                pub fn [<$fn_ s>](&self) -> Result<&Vec<Option<$type_>>> {
                    match &self.data {
                        ColumnData::$variant(v) => Ok(v),
                        other => Err(FrameError::SchemaMismatch(format!(
                            "column '{}' holds {} data, not {}",
                            self.name,
                            other.base_type(),
                            ValueType::$variant
                        ))),
                    }
                }
            } )*
        }
    };
}
impl_column_typed!(
    int,   Int,   i64;
    float, Float, f64;
    bool,  Bool,  bool;
    str,   Str,   String
);

/* -----------------------------------------------------------------------------
a resolved column together with its location in the tree
----------------------------------------------------------------------------- */

/// A column paired with the full path where it was found (or where it
/// should be placed).
#[derive(Debug, Clone)]
pub struct ColumnWithPath {
    pub col: Arc<Column>,
    pub path: ColumnPath,
}

impl ColumnWithPath {
    pub fn new(col: Arc<Column>, path: ColumnPath) -> Self {
        ColumnWithPath { col, path }
    }

    pub fn name(&self) -> &str {
        self.col.name()
    }

    /// The same column renamed in place, keeping its parent location.
    pub fn renamed(&self, name: &str) -> ColumnWithPath {
        ColumnWithPath {
            col: Arc::new(self.col.renamed(name)),
            path: self.path.renamed(name),
        }
    }
}
