//! Hash-grouping of rows by key columns, and the grouped frame that
//! results. Key tuples use `Value` equality, so floats key by bit pattern
//! and nulls group together.

// dependencies
use std::collections::HashMap;
use std::sync::Arc;
use crate::column::{Column, ColumnPath, ColumnWithPath};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::ops::assemble::assemble;
use crate::select::ColumnSet;
use crate::value::Value;

// modules
pub mod aggregate;

pub use aggregate::AggregateBuilder;

/// The name of the frame column holding per-group sub-frames.
pub const GROUPS_COLUMN: &str = "groups";

/* -----------------------------------------------------------------------------
key extraction
----------------------------------------------------------------------------- */

/// The leaf value columns a set of key references expands to. Group keys
/// contribute all their leaf descendants; frame columns cannot key.
pub(crate) struct KeyColumns {
    cols: Vec<Arc<Column>>,
}

impl KeyColumns {
    pub fn expand(resolved: &[ColumnWithPath]) -> Result<KeyColumns> {
        let mut cols = Vec::new();
        for cwp in resolved {
            expand_key(&cwp.col, &cwp.path, &mut cols)?;
        }
        Ok(KeyColumns { cols })
    }

    pub fn from_paths(frame: &DataFrame, paths: &[ColumnPath]) -> Result<KeyColumns> {
        let resolved = paths
            .iter()
            .map(|p| frame.column_at(p).map(|col| ColumnWithPath::new(col, p.clone())))
            .collect::<Result<Vec<_>>>()?;
        KeyColumns::expand(&resolved)
    }

    /// The key tuple of one row.
    pub fn key(&self, row: usize) -> Result<Vec<Value>> {
        self.cols.iter().map(|c| c.value_at(row)).collect()
    }
}

fn expand_key(col: &Arc<Column>, path: &ColumnPath, cols: &mut Vec<Arc<Column>>) -> Result<()> {
    match col.as_ref() {
        Column::Value(_) => {
            cols.push(Arc::clone(col));
            Ok(())
        }
        Column::Group(g) => {
            for child in g.frame.columns() {
                expand_key(child, &path.child(child.name()), cols)?;
            }
            Ok(())
        }
        Column::Frame(_) => Err(FrameError::Unsupported(format!(
            "frame column '{path}' cannot be used as a key"
        ))),
    }
}

/// Partition row indices by key tuple, distinct keys in first-seen order,
/// row order preserved within each partition.
pub(crate) fn partition_rows(keys: &KeyColumns, n_row: usize) -> Result<Vec<Vec<usize>>> {
    let mut seen: HashMap<Vec<Value>, usize> = HashMap::new();
    let mut partitions: Vec<Vec<usize>> = Vec::new();
    for row in 0..n_row {
        let key = keys.key(row)?;
        match seen.get(&key).copied() {
            Some(slot) => partitions[slot].push(row),
            None => {
                seen.insert(key, partitions.len());
                partitions.push(vec![row]);
            }
        }
    }
    Ok(partitions)
}

/* -----------------------------------------------------------------------------
grouped frames
----------------------------------------------------------------------------- */

/// A frame partitioned by key: one keys row and one sub-frame per
/// distinct key, index-aligned.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedDataFrame {
    keys: DataFrame,
    groups: Vec<DataFrame>,
}

impl GroupedDataFrame {
    /// One row per distinct key, at the keys' original paths, in
    /// first-seen order.
    pub fn keys(&self) -> &DataFrame {
        &self.keys
    }

    pub fn groups(&self) -> &[DataFrame] {
        &self.groups
    }

    pub fn n_groups(&self) -> usize {
        self.groups.len()
    }

    pub fn group(&self, index: usize) -> Result<&DataFrame> {
        self.groups.get(index).ok_or_else(|| {
            FrameError::ShapeMismatch(format!(
                "group index {index} out of bounds for {} groups",
                self.groups.len()
            ))
        })
    }

    /// The keys frame with the sub-frames attached as a frame column
    /// named `groups`.
    pub fn to_frame(&self) -> Result<DataFrame> {
        self.keys.with_column(Column::frames(
            GROUPS_COLUMN,
            self.groups.iter().cloned().map(Some).collect(),
        ))
    }

    /// All group rows concatenated back into one frame, group order then
    /// row order.
    pub fn ungroup(&self) -> Result<DataFrame> {
        let mut iter = self.groups.iter();
        let Some(first) = iter.next() else {
            return Ok(DataFrame::empty());
        };
        let mut out = first.clone();
        for group in iter {
            out = out.concat(group)?;
        }
        Ok(out)
    }
}

impl DataFrame {
    /// Partition rows by the resolved key columns. Distinct keys keep
    /// first-seen order; rows keep their order within each group. Group
    /// keys match by their full set of leaf descendants.
    pub fn group_by(&self, set: &ColumnSet) -> Result<GroupedDataFrame> {
        let resolved = self.resolve_strict(set)?;
        let keys = KeyColumns::expand(&resolved)?;
        let partitions = partition_rows(&keys, self.n_row())?;
        let firsts: Vec<usize> = partitions.iter().map(|p| p[0]).collect();
        let keys_frame = assemble(
            resolved.into_iter().map(|c| (c.path, c.col)).collect(),
            self.n_row(),
        )?
        .take_rows(&firsts)?;
        let groups = partitions
            .iter()
            .map(|rows| self.take_rows(rows))
            .collect::<Result<Vec<_>>>()?;
        Ok(GroupedDataFrame { keys: keys_frame, groups })
    }

    /// The frame with duplicate rows removed, first occurrence kept. Rows
    /// compare over all leaf columns.
    pub fn distinct(&self) -> Result<DataFrame> {
        let keys = KeyColumns::from_paths(self, &self.leaf_paths())?;
        let partitions = partition_rows(&keys, self.n_row())?;
        let firsts: Vec<usize> = partitions.iter().map(|p| p[0]).collect();
        self.take_rows(&firsts)
    }
}
