//! Row-wise concatenation with schema union.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnData, FrameColumn, GroupColumn, ValueColumn};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;

impl DataFrame {
    /// This frame's rows followed by another's. Columns are matched by
    /// name; a column present on one side only is null-filled on the
    /// other. Same-name columns must agree in kind, and value columns in
    /// base type.
    pub fn concat(&self, other: &DataFrame) -> Result<DataFrame> {
        let mut columns = Vec::new();
        for col in self.columns() {
            let merged = match other.try_column(col.name()) {
                Some(right) => concat_columns(col, right)?,
                None => pad_column(col, other.n_row(), false)?,
            };
            columns.push(Arc::new(merged));
        }
        for right in other.columns() {
            if self.try_column(right.name()).is_none() {
                columns.push(Arc::new(pad_column(right, self.n_row(), true)?));
            }
        }
        if columns.is_empty() {
            return Ok(DataFrame::empty_with_rows(self.n_row() + other.n_row()));
        }
        DataFrame::from_arcs(columns)
    }
}

fn concat_columns(left: &Column, right: &Column) -> Result<Column> {
    match (left, right) {
        (Column::Value(a), Column::Value(b)) => {
            let mut data = a.data.clone();
            data.extend(&b.data).map_err(|_| {
                FrameError::SchemaMismatch(format!(
                    "column '{}' holds {} data on one side and {} on the other",
                    a.name,
                    a.data.base_type(),
                    b.data.base_type()
                ))
            })?;
            Ok(Column::Value(ValueColumn { name: a.name.clone(), data }))
        }
        (Column::Group(a), Column::Group(b)) => Ok(Column::Group(GroupColumn {
            name: a.name.clone(),
            frame: a.frame.concat(&b.frame)?,
        })),
        (Column::Frame(a), Column::Frame(b)) => {
            let mut frames = a.frames.clone();
            frames.extend(b.frames.iter().cloned());
            Ok(Column::Frame(FrameColumn { name: a.name.clone(), frames }))
        }
        (a, b) => Err(FrameError::SchemaMismatch(format!(
            "column '{}' is a {} column on one side and a {} column on the other",
            a.name(),
            a.kind(),
            b.kind()
        ))),
    }
}

// Null-fill a column for the side that lacks it, before or after its rows.
fn pad_column(col: &Column, extra: usize, at_front: bool) -> Result<Column> {
    Ok(match col {
        Column::Value(c) => {
            let nulls = ColumnData::nulls(c.data.base_type(), extra);
            let data = if at_front {
                let mut data = nulls;
                data.extend(&c.data)?;
                data
            } else {
                let mut data = c.data.clone();
                data.extend(&nulls)?;
                data
            };
            Column::Value(ValueColumn { name: c.name.clone(), data })
        }
        Column::Group(g) => {
            let padded = g
                .frame
                .columns()
                .iter()
                .map(|child| pad_column(child, extra, at_front).map(Arc::new))
                .collect::<Result<Vec<_>>>()?;
            let frame = if padded.is_empty() {
                DataFrame::empty_with_rows(g.frame.n_row() + extra)
            } else {
                DataFrame::from_arcs(padded)?
            };
            Column::Group(GroupColumn { name: g.name.clone(), frame })
        }
        Column::Frame(c) => {
            let mut frames = Vec::with_capacity(c.frames.len() + extra);
            if at_front {
                frames.resize(extra, None);
                frames.extend(c.frames.iter().cloned());
            } else {
                frames.extend(c.frames.iter().cloned());
                frames.resize(c.frames.len() + extra, None);
            }
            Column::Frame(FrameColumn { name: c.name.clone(), frames })
        }
    })
}
