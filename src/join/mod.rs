//! The join engine: hash joins between two frames over nested-column
//! keys, with left/right/inner/outer/exclude semantics.
//!
//! Joins run in three phases: key expansion (group keys expand to their
//! common leaf descendants), a hash index over the right frame's key
//! tuples, and a single left-to-right probe pass that emits output row
//! slots. Output columns are then rebuilt from the slots, so every
//! column's nullability reflects the values actually written.

// dependencies
use std::collections::HashMap;
use std::sync::Arc;
use crate::column::{Column, ColumnData, ColumnPath, ColumnWithPath};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::ops::assemble::assemble;
use crate::select::{col, ColumnSet};
use crate::value::Value;

/// Which rows survive a join and which side may fill with nulls.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinType {
    Left,
    Right,
    Inner,
    Outer,
    /// Anti-join: left rows with no right match, left columns only.
    Exclude,
}

impl JoinType {
    /// Whether unmatched right rows are appended with null left columns.
    fn allow_left_nulls(self) -> bool {
        matches!(self, JoinType::Right | JoinType::Outer)
    }

    /// Whether unmatched left rows are kept with null right columns.
    fn allow_right_nulls(self) -> bool {
        matches!(self, JoinType::Left | JoinType::Outer | JoinType::Exclude)
    }
}

/// One join key: a column reference per side. A single reference pairs
/// the same path on both sides.
#[derive(Debug, Clone)]
pub struct JoinKey {
    pub left: ColumnSet,
    pub right: ColumnSet,
}

/// Pair an explicit left reference with an explicit right one.
pub fn match_on(left: ColumnSet, right: ColumnSet) -> JoinKey {
    JoinKey { left, right }
}

impl From<ColumnSet> for JoinKey {
    fn from(set: ColumnSet) -> Self {
        JoinKey { left: set.clone(), right: set }
    }
}

impl From<&str> for JoinKey {
    fn from(name: &str) -> Self {
        JoinKey { left: col(name), right: col(name) }
    }
}

impl DataFrame {
    /* -----------------------------------------------------------------------------
    public join surface
    ----------------------------------------------------------------------------- */
    /// Join with another frame. An empty key list defaults to the
    /// top-level column names the two frames share, in this frame's
    /// order. `add_new_columns` controls whether the right frame's
    /// non-key columns are carried into the output.
    pub fn join(
        &self,
        other: &DataFrame,
        join_type: JoinType,
        add_new_columns: bool,
        keys: &[JoinKey],
    ) -> Result<DataFrame> {
        let default_keys;
        let keys = if keys.is_empty() {
            default_keys = self.default_join_keys(other)?;
            &default_keys
        } else {
            keys
        };
        join_impl(self, other, join_type, add_new_columns, keys)
    }

    pub fn inner_join(&self, other: &DataFrame, keys: &[JoinKey]) -> Result<DataFrame> {
        self.join(other, JoinType::Inner, true, keys)
    }

    pub fn left_join(&self, other: &DataFrame, keys: &[JoinKey]) -> Result<DataFrame> {
        self.join(other, JoinType::Left, true, keys)
    }

    pub fn right_join(&self, other: &DataFrame, keys: &[JoinKey]) -> Result<DataFrame> {
        self.join(other, JoinType::Right, true, keys)
    }

    pub fn outer_join(&self, other: &DataFrame, keys: &[JoinKey]) -> Result<DataFrame> {
        self.join(other, JoinType::Outer, true, keys)
    }

    /// Keep the left rows that have a right match, without projecting
    /// right columns.
    pub fn filter_join(&self, other: &DataFrame, keys: &[JoinKey]) -> Result<DataFrame> {
        self.join(other, JoinType::Inner, false, keys)
    }

    /// Keep the left rows that have no right match.
    pub fn exclude_join(&self, other: &DataFrame, keys: &[JoinKey]) -> Result<DataFrame> {
        self.join(other, JoinType::Exclude, false, keys)
    }

    fn default_join_keys(&self, other: &DataFrame) -> Result<Vec<JoinKey>> {
        let shared: Vec<JoinKey> = self
            .column_names()
            .into_iter()
            .filter(|name| other.try_column(name).is_some())
            .map(JoinKey::from)
            .collect();
        if shared.is_empty() {
            return Err(FrameError::SchemaMismatch(
                "no join keys: the frames share no top-level column names".to_string(),
            ));
        }
        Ok(shared)
    }
}

/* -----------------------------------------------------------------------------
key expansion
----------------------------------------------------------------------------- */

// Aligned (left path, right path) leaf pairs with their columns.
struct ExpandedKeys {
    left_paths: Vec<ColumnPath>,
    right_paths: Vec<ColumnPath>,
    left_cols: Vec<Arc<Column>>,
    right_cols: Vec<Arc<Column>>,
}

impl ExpandedKeys {
    fn left_key(&self, row: usize) -> Result<Vec<Value>> {
        self.left_cols.iter().map(|c| c.value_at(row)).collect()
    }

    fn right_key(&self, row: usize) -> Result<Vec<Value>> {
        self.right_cols.iter().map(|c| c.value_at(row)).collect()
    }

    /// The right key column paired with a left key path, if any.
    fn right_for_left(&self, left_path: &ColumnPath) -> Option<&Arc<Column>> {
        self.left_paths
            .iter()
            .position(|p| p == left_path)
            .map(|i| &self.right_cols[i])
    }
}

fn expand_keys(left: &DataFrame, right: &DataFrame, keys: &[JoinKey]) -> Result<ExpandedKeys> {
    let mut expanded = ExpandedKeys {
        left_paths: Vec::new(),
        right_paths: Vec::new(),
        left_cols: Vec::new(),
        right_cols: Vec::new(),
    };
    for key in keys {
        let left_refs = left.resolve_strict(&key.left)?;
        let right_refs = right.resolve_strict(&key.right)?;
        if left_refs.len() != right_refs.len() {
            return Err(FrameError::SchemaMismatch(format!(
                "join key resolves to {} columns on the left and {} on the right",
                left_refs.len(),
                right_refs.len()
            )));
        }
        for (l, r) in left_refs.into_iter().zip(right_refs) {
            expand_pair(&l, &r, &mut expanded)?;
        }
    }
    Ok(expanded)
}

fn expand_pair(left: &ColumnWithPath, right: &ColumnWithPath, out: &mut ExpandedKeys) -> Result<()> {
    match (left.col.as_ref(), right.col.as_ref()) {
        (Column::Value(_), Column::Value(_)) => {
            out.left_paths.push(left.path.clone());
            out.right_paths.push(right.path.clone());
            out.left_cols.push(Arc::clone(&left.col));
            out.right_cols.push(Arc::clone(&right.col));
            Ok(())
        }
        (Column::Group(lg), Column::Group(rg)) => {
            // match on the intersection of leaf descendants, by their path
            // relative to the group; one-sided leaves do not participate
            let left_leaves = lg.frame.leaf_paths();
            let right_leaves = rg.frame.leaf_paths();
            let shared: Vec<&ColumnPath> = left_leaves
                .iter()
                .filter(|p| right_leaves.contains(p))
                .collect();
            if shared.is_empty() {
                return Err(FrameError::SchemaMismatch(format!(
                    "group keys '{}' and '{}' share no leaf columns",
                    left.path, right.path
                )));
            }
            for rel in shared {
                let left_path = left.path.join(rel);
                let right_path = right.path.join(rel);
                let left_col = lg.frame.column_at(rel)?;
                let right_col = rg.frame.column_at(rel)?;
                if !matches!(left_col.as_ref(), Column::Value(_))
                    || !matches!(right_col.as_ref(), Column::Value(_))
                {
                    return Err(FrameError::Unsupported(format!(
                        "frame column '{left_path}' cannot be used as a join key"
                    )));
                }
                out.left_paths.push(left_path);
                out.right_paths.push(right_path);
                out.left_cols.push(left_col);
                out.right_cols.push(right_col);
            }
            Ok(())
        }
        (Column::Frame(_), _) | (_, Column::Frame(_)) => Err(FrameError::Unsupported(format!(
            "frame column '{}' cannot be used as a join key",
            left.path
        ))),
        (l, r) => Err(FrameError::KindMismatch {
            expected: l.kind(),
            found: r.kind(),
            path: right.path.clone(),
        }),
    }
}

/* -----------------------------------------------------------------------------
probe and emit
----------------------------------------------------------------------------- */

// One output row: its left source row, its right source row, or both.
type RowSlot = (Option<usize>, Option<usize>);

fn join_impl(
    left: &DataFrame,
    right: &DataFrame,
    join_type: JoinType,
    add_new_columns: bool,
    keys: &[JoinKey],
) -> Result<DataFrame> {
    let keys = expand_keys(left, right, keys)?;

    // hash index over the right frame's key tuples, N-to-M preserved
    let mut index: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
    for row in 0..right.n_row() {
        index.entry(keys.right_key(row)?).or_default().push(row);
    }

    let mut slots: Vec<RowSlot> = Vec::new();
    let mut right_matched = vec![false; right.n_row()];
    for row in 0..left.n_row() {
        match index.get(&keys.left_key(row)?) {
            Some(matches) => {
                for &r in matches {
                    right_matched[r] = true;
                }
                // an exclude join drops matched left rows entirely
                if join_type != JoinType::Exclude {
                    for &r in matches {
                        slots.push((Some(row), Some(r)));
                    }
                }
            }
            None if join_type.allow_right_nulls() => slots.push((Some(row), None)),
            None => {}
        }
    }
    if join_type.allow_left_nulls() {
        for (row, matched) in right_matched.iter().enumerate() {
            if !matched {
                slots.push((None, Some(row)));
            }
        }
    }

    emit(left, right, &keys, add_new_columns && join_type != JoinType::Exclude, &slots)
}

fn emit(
    left: &DataFrame,
    right: &DataFrame,
    keys: &ExpandedKeys,
    add_right_columns: bool,
    slots: &[RowSlot],
) -> Result<DataFrame> {
    let mut entries: Vec<(ColumnPath, Arc<Column>)> = Vec::new();

    // left columns, by full leaf path; for rows with no left source, key
    // slots fill from the paired right key column
    for path in left.leaf_paths() {
        let source = left.column_at(&path)?;
        let built = build_left_column(&source, keys.right_for_left(&path), slots)?;
        entries.push((path, Arc::new(built)));
    }

    if add_right_columns {
        for path in right.leaf_paths() {
            if keys.right_paths.contains(&path) {
                continue;
            }
            let out_path = unique_path(&path, &entries);
            let source = right.column_at(&path)?;
            let built = build_output_column(&source, slots, |slot| Ok(slot.1))?;
            entries.push((out_path, Arc::new(built)));
        }
    }

    assemble(entries, slots.len())
}

// Rename a right path whose full path collides with an already-planned
// output path.
fn unique_path(path: &ColumnPath, entries: &[(ColumnPath, Arc<Column>)]) -> ColumnPath {
    let occupied = |p: &ColumnPath| entries.iter().any(|(e, _)| e == p);
    if !occupied(path) {
        return path.clone();
    }
    let mut n = 1;
    loop {
        let candidate = path.renamed(format!("{}_{n}", path.name()));
        if !occupied(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

// Build one output column by reading the source column at each slot's
// mapped row; slots mapping to no row become nulls (or null frames).
fn build_output_column<F>(source: &Arc<Column>, slots: &[RowSlot], pick: F) -> Result<Column>
where
    F: Fn(&RowSlot) -> Result<Option<usize>>,
{
    match source.as_ref() {
        Column::Frame(f) => {
            let frames = slots
                .iter()
                .map(|slot| Ok(pick(slot)?.and_then(|row| f.frames[row].clone())))
                .collect::<Result<Vec<_>>>()?;
            Ok(Column::frames(source.name(), frames))
        }
        Column::Value(v) => {
            let values = slots
                .iter()
                .map(|slot| {
                    Ok(match pick(slot)? {
                        Some(row) => v.data.value(row),
                        None => Value::Null,
                    })
                })
                .collect::<Result<Vec<Value>>>()?;
            Ok(Column::from_data(
                source.name(),
                ColumnData::from_values(v.data.base_type(), values)?,
            ))
        }
        Column::Group(_) => Err(FrameError::KindMismatch {
            expected: crate::column::ColumnKind::Value,
            found: crate::column::ColumnKind::Group,
            path: ColumnPath::of(source.name()),
        }),
    }
}

// Build a left output column: left rows read from the source; right-only
// rows read from the paired right key column when the path is a key slot,
// and fill with nulls otherwise.
fn build_left_column(
    source: &Arc<Column>,
    right_key: Option<&Arc<Column>>,
    slots: &[RowSlot],
) -> Result<Column> {
    match source.as_ref() {
        Column::Frame(f) => {
            let frames = slots
                .iter()
                .map(|slot| slot.0.and_then(|row| f.frames[row].clone()))
                .collect();
            Ok(Column::frames(source.name(), frames))
        }
        Column::Value(v) => {
            let values = slots
                .iter()
                .map(|slot| {
                    Ok(match (slot, right_key) {
                        ((Some(l), _), _) => v.data.value(*l),
                        ((None, Some(r)), Some(key)) => key.value_at(*r)?,
                        _ => Value::Null,
                    })
                })
                .collect::<Result<Vec<Value>>>()?;
            Ok(Column::from_data(
                source.name(),
                ColumnData::from_values(v.data.base_type(), values)?,
            ))
        }
        Column::Group(_) => Err(FrameError::KindMismatch {
            expected: crate::column::ColumnKind::Value,
            found: crate::column::ColumnKind::Group,
            path: ColumnPath::of(source.name()),
        }),
    }
}
