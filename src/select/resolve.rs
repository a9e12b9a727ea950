//! Resolution of column set expressions against a concrete frame.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnPath, ColumnWithPath};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::select::ColumnSet;
use crate::value::ValueType;

/// What resolution does with a name or path that matches nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnresolvedPolicy {
    /// Fail with `ColumnNotFound`.
    #[default]
    Fail,
    /// Omit the missing column from the result.
    Skip,
    /// Stand in an all-null placeholder column at the requested path.
    Create,
}

/// The frame a set is resolved against, plus the missing-column policy.
#[derive(Clone, Copy)]
pub struct ResolveContext<'a> {
    pub frame: &'a DataFrame,
    pub policy: UnresolvedPolicy,
}

impl<'a> ResolveContext<'a> {
    pub fn new(frame: &'a DataFrame, policy: UnresolvedPolicy) -> Self {
        ResolveContext { frame, policy }
    }

    /// Handle a path that matched nothing, per the policy.
    fn unresolved(&self, path: &ColumnPath) -> Result<Option<ColumnWithPath>> {
        match self.policy {
            UnresolvedPolicy::Fail => Err(FrameError::ColumnNotFound(path.clone())),
            UnresolvedPolicy::Skip => Ok(None),
            UnresolvedPolicy::Create => Ok(Some(ColumnWithPath::new(
                Arc::new(Column::nulls(path.name(), ValueType::Str, self.frame.n_row())),
                path.clone(),
            ))),
        }
    }

    fn lookup(&self, path: &ColumnPath) -> Result<Option<ColumnWithPath>> {
        match self.frame.column_at(path) {
            Ok(col) => Ok(Some(ColumnWithPath::new(col, path.clone()))),
            Err(FrameError::ColumnNotFound(_)) => self.unresolved(path),
            Err(e) => Err(e),
        }
    }
}

impl ColumnSet {
    /// Resolve this set to concrete column references, in deterministic
    /// order: schema order for siblings, parents before children for
    /// recursive descent.
    pub fn resolve(&self, ctx: &ResolveContext<'_>) -> Result<Vec<ColumnWithPath>> {
        let mut out = Vec::new();
        match self {
            ColumnSet::Name(name) => {
                out.extend(ctx.lookup(&ColumnPath::of(name))?);
            }
            ColumnSet::Names(names) => {
                for name in names {
                    out.extend(ctx.lookup(&ColumnPath::of(name))?);
                }
            }
            ColumnSet::Path(path) => {
                out.extend(ctx.lookup(path)?);
            }
            ColumnSet::Index(index) => {
                out.extend(index_at(ctx, *index)?);
            }
            ColumnSet::IndexRange(range) => {
                for index in range.clone() {
                    out.extend(index_at(ctx, index)?);
                }
            }
            ColumnSet::All => {
                out.extend(direct_children(ctx.frame, &ColumnPath::new()));
            }
            ColumnSet::AllDfs { include_groups } => {
                walk_frame(ctx.frame, &ColumnPath::new(), *include_groups, &mut out);
            }
            ColumnSet::ColsOf(dtype) => {
                for cwp in direct_children(ctx.frame, &ColumnPath::new()) {
                    if let Column::Value(_) = cwp.col.as_ref() {
                        if dtype.accepts(&cwp.col.dtype()?) {
                            out.push(cwp);
                        }
                    }
                }
            }
            ColumnSet::Children(inner) => {
                for cwp in inner.resolve(ctx)? {
                    if let Column::Group(g) = cwp.col.as_ref() {
                        out.extend(direct_children(&g.frame, &cwp.path));
                    }
                }
            }
            ColumnSet::Filter(inner, pred) => {
                out.extend(inner.resolve(ctx)?.into_iter().filter(|c| pred(c)));
            }
            ColumnSet::Dfs(inner, pred) => {
                for cwp in inner.resolve(ctx)? {
                    let mut descendants = Vec::new();
                    if let Column::Group(g) = cwp.col.as_ref() {
                        walk_frame(&g.frame, &cwp.path, true, &mut descendants);
                    }
                    out.extend(descendants.into_iter().filter(|c| pred(c)));
                }
            }
            ColumnSet::First(inner) => {
                let resolved = inner.resolve(ctx)?;
                let first = resolved.into_iter().next().ok_or(FrameError::EmptyMatch)?;
                out.push(first);
            }
            ColumnSet::Last(inner) => {
                let resolved = inner.resolve(ctx)?;
                let last = resolved.into_iter().next_back().ok_or(FrameError::EmptyMatch)?;
                out.push(last);
            }
            ColumnSet::Single(inner) => {
                let mut resolved = inner.resolve(ctx)?;
                match resolved.len() {
                    0 => return Err(FrameError::EmptyMatch),
                    1 => out.push(resolved.remove(0)),
                    n => return Err(FrameError::AmbiguousMatch(n)),
                }
            }
            ColumnSet::And(a, b) => {
                out.extend(a.resolve(ctx)?);
                out.extend(b.resolve(ctx)?);
            }
            ColumnSet::Except(kept, removed) => {
                let excluded: Vec<ColumnPath> =
                    removed.resolve(ctx)?.into_iter().map(|c| c.path).collect();
                for cwp in kept.resolve(ctx)? {
                    except_tree(cwp, &excluded, &mut out);
                }
            }
            ColumnSet::Distinct(inner) => {
                let mut seen: Vec<ColumnPath> = Vec::new();
                for cwp in inner.resolve(ctx)? {
                    if !seen.contains(&cwp.path) {
                        seen.push(cwp.path.clone());
                        out.push(cwp);
                    }
                }
            }
            ColumnSet::Span(start, end) => {
                out.extend(span(ctx, start, end)?);
            }
            ColumnSet::Named(inner, name) => {
                out.extend(inner.resolve(ctx)?.iter().map(|c| c.renamed(name)));
            }
            ColumnSet::Kind(inner, expected) => {
                for cwp in inner.resolve(ctx)? {
                    let found = cwp.col.kind();
                    if found != *expected {
                        return Err(FrameError::KindMismatch {
                            expected: *expected,
                            found,
                            path: cwp.path,
                        });
                    }
                    out.push(cwp);
                }
            }
        }
        Ok(out)
    }
}

/* -----------------------------------------------------------------------------
resolution helpers
----------------------------------------------------------------------------- */

fn direct_children(frame: &DataFrame, prefix: &ColumnPath) -> Vec<ColumnWithPath> {
    frame
        .columns()
        .iter()
        .map(|col| ColumnWithPath::new(Arc::clone(col), prefix.child(col.name())))
        .collect()
}

// Depth-first, parent before children, siblings in declared order.
fn walk_frame(
    frame: &DataFrame,
    prefix: &ColumnPath,
    include_groups: bool,
    out: &mut Vec<ColumnWithPath>,
) {
    for col in frame.columns() {
        let path = prefix.child(col.name());
        match col.as_ref() {
            Column::Group(g) => {
                if include_groups {
                    out.push(ColumnWithPath::new(Arc::clone(col), path.clone()));
                }
                walk_frame(&g.frame, &path, include_groups, out);
            }
            _ => out.push(ColumnWithPath::new(Arc::clone(col), path)),
        }
    }
}

fn index_at(ctx: &ResolveContext<'_>, index: usize) -> Result<Option<ColumnWithPath>> {
    match ctx.frame.columns().get(index) {
        Some(col) => Ok(Some(ColumnWithPath::new(
            Arc::clone(col),
            ColumnPath::of(col.name()),
        ))),
        None if ctx.policy == UnresolvedPolicy::Skip => Ok(None),
        None => Err(FrameError::ShapeMismatch(format!(
            "column index {index} out of range for a frame with {} columns",
            ctx.frame.n_col()
        ))),
    }
}

// Tree-aware exclusion: an excluded column disappears; a group with
// excluded descendants dissolves into its surviving children.
fn except_tree(cwp: ColumnWithPath, excluded: &[ColumnPath], out: &mut Vec<ColumnWithPath>) {
    if excluded.contains(&cwp.path) {
        return;
    }
    let has_excluded_descendant = excluded
        .iter()
        .any(|e| e.starts_with(&cwp.path) && e.len() > cwp.path.len());
    match cwp.col.as_ref() {
        Column::Group(g) if has_excluded_descendant => {
            for child in direct_children(&g.frame, &cwp.path) {
                except_tree(child, excluded, out);
            }
        }
        _ => out.push(cwp),
    }
}

fn span(
    ctx: &ResolveContext<'_>,
    start: &ColumnSet,
    end: &ColumnSet,
) -> Result<Vec<ColumnWithPath>> {
    let start = single(start.resolve(ctx)?)?;
    let end = single(end.resolve(ctx)?)?;
    let parent = start.path.parent().unwrap_or_default();
    if end.path.parent().unwrap_or_default() != parent {
        return Err(FrameError::SchemaMismatch(format!(
            "span endpoints '{}' and '{}' have different parents",
            start.path, end.path
        )));
    }
    let siblings = if parent.is_empty() {
        ctx.frame.clone()
    } else {
        ctx.frame.column_at(&parent)?.as_group()?.frame.clone()
    };
    let from = siblings
        .column_index(start.path.name())
        .ok_or_else(|| FrameError::ColumnNotFound(start.path.clone()))?;
    let to = siblings
        .column_index(end.path.name())
        .ok_or_else(|| FrameError::ColumnNotFound(end.path.clone()))?;
    let (lo, hi) = (from.min(to), from.max(to));
    Ok(siblings.columns()[lo..=hi]
        .iter()
        .map(|col| ColumnWithPath::new(Arc::clone(col), parent.child(col.name())))
        .collect())
}

fn single(mut resolved: Vec<ColumnWithPath>) -> Result<ColumnWithPath> {
    match resolved.len() {
        0 => Err(FrameError::EmptyMatch),
        1 => Ok(resolved.remove(0)),
        n => Err(FrameError::AmbiguousMatch(n)),
    }
}

impl DataFrame {
    /// Resolve a column set against this frame with the given policy.
    pub fn resolve(&self, set: &ColumnSet, policy: UnresolvedPolicy) -> Result<Vec<ColumnWithPath>> {
        set.resolve(&ResolveContext::new(self, policy))
    }

    /// Resolve with the `Fail` policy.
    pub fn resolve_strict(&self, set: &ColumnSet) -> Result<Vec<ColumnWithPath>> {
        self.resolve(set, UnresolvedPolicy::Fail)
    }

    /// Resolve to exactly one column with the `Fail` policy.
    pub fn resolve_one(&self, set: &ColumnSet) -> Result<ColumnWithPath> {
        single(self.resolve_strict(set)?)
    }
}
