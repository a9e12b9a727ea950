//! The data frame: an ordered list of named columns with a shared row
//! count. Columns are held behind `Arc`, so frames are cheap to clone and
//! transforms share unchanged columns with their input.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnPath, ColumnWithPath};
use crate::error::{FrameError, Result};

// modules
pub mod row;

pub use row::Row;

/// An immutable, typed, column-ordered table.
#[derive(Debug, Clone, Default)]
pub struct DataFrame {
    columns: Vec<Arc<Column>>,
    n_row: usize,
}

impl DataFrame {
    /* -----------------------------------------------------------------------------
    constructors
    ----------------------------------------------------------------------------- */
    /// A frame with no columns and no rows.
    pub fn empty() -> DataFrame {
        DataFrame { columns: Vec::new(), n_row: 0 }
    }

    /// A frame with no columns but a known row count, as produced by
    /// selecting nothing from a non-empty frame.
    pub fn empty_with_rows(n_row: usize) -> DataFrame {
        DataFrame { columns: Vec::new(), n_row }
    }

    /// Build a frame from columns, checking that sibling names are unique
    /// and all lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<DataFrame> {
        DataFrame::from_arcs(columns.into_iter().map(Arc::new).collect())
    }

    pub fn from_arcs(columns: Vec<Arc<Column>>) -> Result<DataFrame> {
        let n_row = columns.first().map(|c| c.len()).unwrap_or(0);
        for col in &columns {
            if col.len() != n_row {
                return Err(FrameError::ShapeMismatch(format!(
                    "column '{}' has {} rows, expected {}",
                    col.name(),
                    col.len(),
                    n_row
                )));
            }
            if columns.iter().filter(|c| c.name() == col.name()).count() > 1 {
                return Err(FrameError::DuplicateName(col.name().to_string()));
            }
        }
        Ok(DataFrame { columns, n_row })
    }

    /* -----------------------------------------------------------------------------
    shape accessors
    ----------------------------------------------------------------------------- */
    pub fn n_row(&self) -> usize {
        self.n_row
    }

    pub fn n_col(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.n_row == 0
    }

    pub fn columns(&self) -> &[Arc<Column>] {
        &self.columns
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name()).collect()
    }

    /* -----------------------------------------------------------------------------
    column access
    ----------------------------------------------------------------------------- */
    /// The top-level column with the given name, if present.
    pub fn try_column(&self, name: &str) -> Option<&Arc<Column>> {
        self.columns.iter().find(|c| c.name() == name)
    }

    /// The top-level column with the given name.
    pub fn column(&self, name: &str) -> Result<&Arc<Column>> {
        self.try_column(name)
            .ok_or_else(|| FrameError::ColumnNotFound(ColumnPath::of(name)))
    }

    /// The position of a top-level column, if present.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name() == name)
    }

    /// Walk a path through nested groups to the column it names.
    pub fn column_at(&self, path: &ColumnPath) -> Result<Arc<Column>> {
        let mut segments = path.iter();
        let first = segments
            .next()
            .ok_or_else(|| FrameError::ColumnNotFound(path.clone()))?;
        let mut col = Arc::clone(
            self.try_column(first)
                .ok_or_else(|| FrameError::ColumnNotFound(path.clone()))?,
        );
        for segment in segments {
            let group = col
                .as_group()
                .map_err(|_| FrameError::ColumnNotFound(path.clone()))?;
            col = Arc::clone(
                group
                    .frame
                    .try_column(segment)
                    .ok_or_else(|| FrameError::ColumnNotFound(path.clone()))?,
            );
        }
        Ok(col)
    }

    /// Whether a path resolves to a column in this frame.
    pub fn has_column(&self, path: &ColumnPath) -> bool {
        self.column_at(path).is_ok()
    }

    /// Every column in the tree paired with its full path, parents before
    /// children, in depth-first order.
    pub fn flatten(&self) -> Vec<ColumnWithPath> {
        fn walk(frame: &DataFrame, prefix: &ColumnPath, out: &mut Vec<ColumnWithPath>) {
            for col in &frame.columns {
                let path = prefix.child(col.name());
                out.push(ColumnWithPath::new(Arc::clone(col), path.clone()));
                if let Column::Group(g) = col.as_ref() {
                    walk(&g.frame, &path, out);
                }
            }
        }
        let mut out = Vec::new();
        walk(self, &ColumnPath::new(), &mut out);
        out
    }

    /// The full paths of all leaf (non-group) columns, depth-first.
    pub fn leaf_paths(&self) -> Vec<ColumnPath> {
        self.flatten()
            .into_iter()
            .filter(|c| !matches!(c.col.as_ref(), Column::Group(_)))
            .map(|c| c.path)
            .collect()
    }

    /* -----------------------------------------------------------------------------
    row access
    ----------------------------------------------------------------------------- */
    /// A lightweight view of one row.
    pub fn row(&self, index: usize) -> Result<Row<'_>> {
        if index >= self.n_row {
            return Err(FrameError::ShapeMismatch(format!(
                "row index {index} out of bounds for a frame with {} rows",
                self.n_row
            )));
        }
        Ok(Row::new(self, index))
    }

    pub fn rows(&self) -> impl Iterator<Item = Row<'_>> {
        (0..self.n_row).map(|i| Row::new(self, i))
    }

    /* -----------------------------------------------------------------------------
    row-wise transforms
    ----------------------------------------------------------------------------- */
    /// A new frame holding the rows at the given indices, in order.
    /// Indices may repeat.
    pub fn take_rows(&self, rows: &[usize]) -> Result<DataFrame> {
        let columns = self
            .columns
            .iter()
            .map(|c| c.take_rows(rows).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        Ok(DataFrame { columns, n_row: rows.len() })
    }

    /// The rows in `[from, to)`, clamped to the frame's extent.
    pub fn slice_rows(&self, from: usize, to: usize) -> Result<DataFrame> {
        let to = to.min(self.n_row);
        let from = from.min(to);
        self.take_rows(&(from..to).collect::<Vec<_>>())
    }

    pub fn head(&self, n: usize) -> Result<DataFrame> {
        self.slice_rows(0, n)
    }

    pub fn tail(&self, n: usize) -> Result<DataFrame> {
        self.slice_rows(self.n_row.saturating_sub(n), self.n_row)
    }

    /// The rows for which the predicate holds.
    pub fn filter_rows<F>(&self, predicate: F) -> Result<DataFrame>
    where
        F: Fn(&Row<'_>) -> Result<bool>,
    {
        let mut keep = Vec::new();
        for i in 0..self.n_row {
            if predicate(&Row::new(self, i))? {
                keep.push(i);
            }
        }
        self.take_rows(&keep)
    }

    /* -----------------------------------------------------------------------------
    column-wise transforms
    ----------------------------------------------------------------------------- */
    /// This frame with one more column appended at the end.
    pub fn with_column(&self, col: Column) -> Result<DataFrame> {
        if self.n_row > 0 && col.len() != self.n_row {
            return Err(FrameError::ShapeMismatch(format!(
                "column '{}' has {} rows, expected {}",
                col.name(),
                col.len(),
                self.n_row
            )));
        }
        let mut columns = self.columns.clone();
        columns.push(Arc::new(col));
        DataFrame::from_arcs(columns)
    }

    /// This frame with the column at `index` replaced.
    pub(crate) fn replace_at(&self, index: usize, col: Arc<Column>) -> Result<DataFrame> {
        let mut columns = self.columns.clone();
        columns[index] = col;
        DataFrame::from_arcs(columns)
    }

    /// This frame with a top-level column renamed.
    pub fn rename(&self, from: &str, to: &str) -> Result<DataFrame> {
        let index = self
            .column_index(from)
            .ok_or_else(|| FrameError::ColumnNotFound(ColumnPath::of(from)))?;
        if from != to && self.try_column(to).is_some() {
            return Err(FrameError::DuplicateName(to.to_string()));
        }
        self.replace_at(index, Arc::new(self.columns[index].renamed(to)))
    }
}

// Structural equality: same columns in the same order with equal data.
impl PartialEq for DataFrame {
    fn eq(&self, other: &Self) -> bool {
        self.n_row == other.n_row
            && self.columns.len() == other.columns.len()
            && self
                .columns
                .iter()
                .zip(other.columns.iter())
                .all(|(a, b)| a.as_ref() == b.as_ref())
    }
}
