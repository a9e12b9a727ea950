//! A borrowed view of one frame row.

// dependencies
use crate::column::ColumnPath;
use crate::error::Result;
use crate::frame::DataFrame;
use crate::value::Value;

/// One row of a frame, addressed lazily by column name or path.
#[derive(Debug, Clone, Copy)]
pub struct Row<'a> {
    frame: &'a DataFrame,
    index: usize,
}

impl<'a> Row<'a> {
    pub(crate) fn new(frame: &'a DataFrame, index: usize) -> Self {
        Row { frame, index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn frame(&self) -> &'a DataFrame {
        self.frame
    }

    /// The cell of a top-level value column in this row.
    pub fn get(&self, name: &str) -> Result<Value> {
        self.frame.column(name)?.value_at(self.index)
    }

    /// The cell of a (possibly nested) value column in this row.
    pub fn get_at(&self, path: &ColumnPath) -> Result<Value> {
        self.frame.column_at(path)?.value_at(self.index)
    }
}
