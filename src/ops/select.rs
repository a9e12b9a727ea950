//! Projection and removal driven by the column selection DSL.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnData, ColumnPath, ColumnWithPath, GroupColumn, ValueColumn};
use crate::error::Result;
use crate::frame::DataFrame;
use crate::ops::assemble::assemble;
use crate::select::{ColumnSet, UnresolvedPolicy};
use crate::value::Value;

impl DataFrame {
    /* -----------------------------------------------------------------------------
    select
    ----------------------------------------------------------------------------- */
    /// The frame holding only the resolved columns, in resolution order,
    /// with nesting preserved: columns sharing a group-path prefix are
    /// re-grouped at that prefix.
    pub fn select(&self, set: &ColumnSet) -> Result<DataFrame> {
        self.select_with(set, UnresolvedPolicy::Fail)
    }

    pub fn select_with(&self, set: &ColumnSet, policy: UnresolvedPolicy) -> Result<DataFrame> {
        let resolved = self.resolve(set, policy)?;
        assemble(
            resolved.into_iter().map(|c| (c.path, c.col)).collect(),
            self.n_row(),
        )
    }

    /* -----------------------------------------------------------------------------
    remove
    ----------------------------------------------------------------------------- */
    /// The frame without the resolved columns, plus the removed references
    /// with their original paths, in resolution order. Groups emptied by
    /// the removal are pruned.
    pub fn remove(&self, set: &ColumnSet) -> Result<(DataFrame, Vec<ColumnWithPath>)> {
        let removed = self.resolve_strict(set)?;
        let paths: Vec<ColumnPath> = removed.iter().map(|c| c.path.clone()).collect();
        let kept = remove_paths(self, &paths, &ColumnPath::new())?;
        Ok((kept, removed))
    }

    /* -----------------------------------------------------------------------------
    update
    ----------------------------------------------------------------------------- */
    /// The frame with the resolved value columns' cells mapped through `f`.
    /// The updated columns' types are re-inferred from the mapped cells.
    pub fn update<F>(&self, set: &ColumnSet, f: F) -> Result<DataFrame>
    where
        F: Fn(Value) -> Value,
    {
        let resolved = self.resolve_strict(set)?;
        let mut out = self.clone();
        for cwp in resolved {
            let value_col = cwp.col.as_value()?;
            let mapped: Vec<Value> = value_col.data.values().map(&f).collect();
            let updated = Column::Value(ValueColumn {
                name: value_col.name.clone(),
                data: ColumnData::from_values_inferred(mapped)?,
            });
            out = out.with_column_at(&cwp.path, Arc::new(updated))?;
        }
        Ok(out)
    }
}

// Rebuild a frame without the given full paths, pruning groups left empty.
fn remove_paths(
    frame: &DataFrame,
    paths: &[ColumnPath],
    prefix: &ColumnPath,
) -> Result<DataFrame> {
    let mut columns = Vec::new();
    for col in frame.columns() {
        let path = prefix.child(col.name());
        if paths.contains(&path) {
            continue;
        }
        let touches_descendant = paths
            .iter()
            .any(|p| p.starts_with(&path) && p.len() > path.len());
        match col.as_ref() {
            Column::Group(g) if touches_descendant => {
                let inner = remove_paths(&g.frame, paths, &path)?;
                if inner.n_col() > 0 {
                    columns.push(Arc::new(Column::Group(GroupColumn {
                        name: g.name.clone(),
                        frame: inner,
                    })));
                }
            }
            _ => columns.push(Arc::clone(col)),
        }
    }
    if columns.is_empty() {
        return Ok(DataFrame::empty_with_rows(frame.n_row()));
    }
    DataFrame::from_arcs(columns)
}
