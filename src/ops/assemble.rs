//! Rebuilding frames from resolved (path, column) pairs, and inserting
//! columns at nested paths. Both preserve hierarchy: pairs sharing a path
//! prefix are re-grouped under that prefix, and insertion creates the
//! intermediate groups a path names.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnPath, GroupColumn};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;

enum Bucket {
    Leaf(Arc<Column>),
    Nested(Vec<(ColumnPath, Arc<Column>)>),
}

/// Build a frame from ordered (path, column) pairs, re-grouping columns
/// that share a path prefix. Pair order is output order; a path that is
/// both a leaf and a prefix of another is a name collision.
pub(crate) fn assemble(
    entries: Vec<(ColumnPath, Arc<Column>)>,
    n_row: usize,
) -> Result<DataFrame> {
    let mut buckets: Vec<(String, Bucket)> = Vec::new();
    for (path, col) in entries {
        let segments = path.segments();
        let head = segments[0].clone();
        let slot = buckets.iter().position(|(name, _)| *name == head);
        if segments.len() == 1 {
            match slot {
                None => buckets.push((head, Bucket::Leaf(col))),
                Some(_) => return Err(FrameError::DuplicateName(head)),
            }
        } else {
            let tail = ColumnPath::from(segments[1..].to_vec());
            match slot {
                None => buckets.push((head, Bucket::Nested(vec![(tail, col)]))),
                Some(i) => match &mut buckets[i].1 {
                    Bucket::Nested(sub) => sub.push((tail, col)),
                    Bucket::Leaf(_) => return Err(FrameError::DuplicateName(head)),
                },
            }
        }
    }
    let mut columns = Vec::with_capacity(buckets.len());
    for (name, bucket) in buckets {
        columns.push(match bucket {
            Bucket::Leaf(col) if col.name() == name => col,
            Bucket::Leaf(col) => Arc::new(col.renamed(&name)),
            Bucket::Nested(sub) => Arc::new(Column::group(&name, assemble(sub, n_row)?)),
        });
    }
    if columns.is_empty() {
        return Ok(DataFrame::empty_with_rows(n_row));
    }
    DataFrame::from_arcs(columns)
}

impl DataFrame {
    /// This frame with a column inserted at the given path, creating the
    /// intermediate group columns the path names. The path's last segment
    /// becomes the column's name.
    pub fn insert(&self, path: impl Into<ColumnPath>, col: Column) -> Result<DataFrame> {
        self.insert_arc(&path.into(), Arc::new(col))
    }

    pub(crate) fn insert_arc(&self, path: &ColumnPath, col: Arc<Column>) -> Result<DataFrame> {
        let segments = path.segments();
        let Some(head) = segments.first() else {
            return Err(FrameError::SchemaMismatch(
                "cannot insert a column at an empty path".to_string(),
            ));
        };
        if (self.n_col() > 0 || self.n_row() > 0) && col.len() != self.n_row() {
            return Err(FrameError::ShapeMismatch(format!(
                "column '{}' has {} rows, expected {}",
                col.name(),
                col.len(),
                self.n_row()
            )));
        }
        if segments.len() == 1 {
            if self.try_column(head).is_some() {
                return Err(FrameError::DuplicateName(head.clone()));
            }
            let col = if col.name() == head { col } else { Arc::new(col.renamed(head)) };
            let mut columns = self.columns().to_vec();
            columns.push(col);
            return DataFrame::from_arcs(columns);
        }
        let tail = ColumnPath::from(segments[1..].to_vec());
        match self.column_index(head) {
            Some(index) => {
                let group = self.columns()[index].as_group().map_err(|_| {
                    FrameError::SchemaMismatch(format!(
                        "cannot insert under '{head}': not a group column"
                    ))
                })?;
                let inner = group.frame.insert_arc(&tail, col)?;
                self.replace_at(
                    index,
                    Arc::new(Column::Group(GroupColumn {
                        name: group.name.clone(),
                        frame: inner,
                    })),
                )
            }
            None => {
                let inner = DataFrame::empty_with_rows(self.n_row()).insert_arc(&tail, col)?;
                let mut columns = self.columns().to_vec();
                columns.push(Arc::new(Column::group(head, inner)));
                DataFrame::from_arcs(columns)
            }
        }
    }

    /// This frame with the existing column at `path` replaced.
    pub(crate) fn with_column_at(&self, path: &ColumnPath, col: Arc<Column>) -> Result<DataFrame> {
        let segments = path.segments();
        let Some(head) = segments.first() else {
            return Err(FrameError::ColumnNotFound(path.clone()));
        };
        let index = self
            .column_index(head)
            .ok_or_else(|| FrameError::ColumnNotFound(path.clone()))?;
        if segments.len() == 1 {
            let col = if col.name() == head { col } else { Arc::new(col.renamed(head)) };
            return self.replace_at(index, col);
        }
        let tail = ColumnPath::from(segments[1..].to_vec());
        let group = self.columns()[index]
            .as_group()
            .map_err(|_| FrameError::ColumnNotFound(path.clone()))?;
        let inner = group.frame.with_column_at(&tail, col)?;
        self.replace_at(
            index,
            Arc::new(Column::Group(GroupColumn { name: group.name.clone(), frame: inner })),
        )
    }
}
