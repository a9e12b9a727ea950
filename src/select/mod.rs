//! The column selection DSL. A `ColumnSet` is a lazily-evaluated
//! expression tree describing which columns an operation targets; nothing
//! is looked up until the set is resolved against a concrete frame.
//!
//! Sets are built from the free functions below (`col`, `cols`, `at`,
//! `all`, `all_dfs`, `cols_of`, ...) and refined with combinator methods
//! (`and`, `except`, `filter`, `dfs`, `first`, `span`, ...). Resolution
//! yields `ColumnWithPath` references in a deterministic order: schema
//! order for siblings, parent before children for recursive descent.

// dependencies
use std::ops::Range;
use std::sync::Arc;
use crate::column::{ColumnKind, ColumnPath, ColumnWithPath};
use crate::value::TypeDescriptor;

// modules
mod resolve;

pub use resolve::{ResolveContext, UnresolvedPolicy};

/// A predicate over a resolved column reference.
pub type ColumnPredicate = Arc<dyn Fn(&ColumnWithPath) -> bool>;

/// A lazily-resolved column set expression.
#[derive(Clone)]
pub enum ColumnSet {
    /// One direct child of the root, by name.
    Name(String),
    /// Several direct children of the root, by name, in the given order.
    Names(Vec<String>),
    /// One column anywhere in the tree, by full path.
    Path(ColumnPath),
    /// One direct child of the root, by position.
    Index(usize),
    /// Direct children of the root in a positional range.
    IndexRange(Range<usize>),
    /// All direct children of the root.
    All,
    /// All descendants of the root, depth-first, parents before
    /// children. Group nodes themselves are emitted only when
    /// `include_groups` is set.
    AllDfs { include_groups: bool },
    /// Direct children of the root whose value type the descriptor
    /// accepts.
    ColsOf(TypeDescriptor),
    /// Direct children of every group column the inner set resolves to.
    Children(Box<ColumnSet>),
    /// The inner set's elements that satisfy the predicate.
    Filter(Box<ColumnSet>, ColumnPredicate),
    /// Descendants of the inner set's elements that satisfy the
    /// predicate, depth-first.
    Dfs(Box<ColumnSet>, ColumnPredicate),
    /// The first element of the inner set.
    First(Box<ColumnSet>),
    /// The last element of the inner set.
    Last(Box<ColumnSet>),
    /// The inner set's only element.
    Single(Box<ColumnSet>),
    /// Concatenation of two sets.
    And(Box<ColumnSet>, Box<ColumnSet>),
    /// Tree-aware difference: excepting a nested column dissolves its
    /// enclosing groups into the surviving siblings.
    Except(Box<ColumnSet>, Box<ColumnSet>),
    /// The inner set with duplicate paths removed, first occurrence kept.
    Distinct(Box<ColumnSet>),
    /// The closed sibling range between two columns sharing a parent.
    Span(Box<ColumnSet>, Box<ColumnSet>),
    /// The inner set with every element renamed.
    Named(Box<ColumnSet>, String),
    /// The inner set with every element's kind asserted.
    Kind(Box<ColumnSet>, ColumnKind),
}

/* -----------------------------------------------------------------------------
entry points
----------------------------------------------------------------------------- */

/// One top-level column by name.
pub fn col(name: impl Into<String>) -> ColumnSet {
    ColumnSet::Name(name.into())
}

/// Several top-level columns by name.
pub fn cols<I, S>(names: I) -> ColumnSet
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ColumnSet::Names(names.into_iter().map(Into::into).collect())
}

/// One column anywhere in the tree, by full path.
pub fn at(path: impl Into<ColumnPath>) -> ColumnSet {
    ColumnSet::Path(path.into())
}

/// One top-level column by position.
pub fn col_at(index: usize) -> ColumnSet {
    ColumnSet::Index(index)
}

/// Top-level columns in a positional range.
pub fn cols_range(range: Range<usize>) -> ColumnSet {
    ColumnSet::IndexRange(range)
}

/// All top-level columns.
pub fn all() -> ColumnSet {
    ColumnSet::All
}

/// All descendant columns, depth-first, optionally including the group
/// nodes themselves.
pub fn all_dfs(include_groups: bool) -> ColumnSet {
    ColumnSet::AllDfs { include_groups }
}

/// Top-level value columns whose type the descriptor accepts. A nullable
/// descriptor accepts columns with or without nulls; a non-nullable one
/// rejects columns holding any actual null.
pub fn cols_of(dtype: TypeDescriptor) -> ColumnSet {
    ColumnSet::ColsOf(dtype)
}

/* -----------------------------------------------------------------------------
combinators
----------------------------------------------------------------------------- */

impl ColumnSet {
    /// Concatenate another set after this one.
    pub fn and(self, other: ColumnSet) -> ColumnSet {
        ColumnSet::And(Box::new(self), Box::new(other))
    }

    /// Remove another set's columns, dissolving groups whose descendants
    /// are removed into their surviving children.
    pub fn except(self, other: ColumnSet) -> ColumnSet {
        ColumnSet::Except(Box::new(self), Box::new(other))
    }

    /// Keep the elements satisfying the predicate.
    pub fn filter<F>(self, pred: F) -> ColumnSet
    where
        F: Fn(&ColumnWithPath) -> bool + 'static,
    {
        ColumnSet::Filter(Box::new(self), Arc::new(pred))
    }

    /// Descend into all descendants of this set's elements, keeping those
    /// satisfying the predicate.
    pub fn dfs<F>(self, pred: F) -> ColumnSet
    where
        F: Fn(&ColumnWithPath) -> bool + 'static,
    {
        ColumnSet::Dfs(Box::new(self), Arc::new(pred))
    }

    /// The direct children of this set's group columns.
    pub fn children(self) -> ColumnSet {
        ColumnSet::Children(Box::new(self))
    }

    /// The first element; resolving an empty set fails with `EmptyMatch`.
    pub fn first(self) -> ColumnSet {
        ColumnSet::First(Box::new(self))
    }

    /// The last element; resolving an empty set fails with `EmptyMatch`.
    pub fn last(self) -> ColumnSet {
        ColumnSet::Last(Box::new(self))
    }

    /// The only element; more than one fails with `AmbiguousMatch`.
    pub fn single(self) -> ColumnSet {
        ColumnSet::Single(Box::new(self))
    }

    /// Drop duplicate paths, keeping the first occurrence.
    pub fn distinct(self) -> ColumnSet {
        ColumnSet::Distinct(Box::new(self))
    }

    /// The closed sibling range from this set's single column to
    /// another's; endpoints with different parents fail to resolve.
    pub fn span(self, end: ColumnSet) -> ColumnSet {
        ColumnSet::Span(Box::new(self), Box::new(end))
    }

    /// Rename the resolved columns.
    pub fn named(self, name: impl Into<String>) -> ColumnSet {
        ColumnSet::Named(Box::new(self), name.into())
    }

    /// Assert the resolved columns are value columns.
    pub fn as_value(self) -> ColumnSet {
        ColumnSet::Kind(Box::new(self), ColumnKind::Value)
    }

    /// Assert the resolved columns are group columns.
    pub fn as_group(self) -> ColumnSet {
        ColumnSet::Kind(Box::new(self), ColumnKind::Group)
    }

    /// Assert the resolved columns are frame columns.
    pub fn as_frame(self) -> ColumnSet {
        ColumnSet::Kind(Box::new(self), ColumnKind::Frame)
    }
}

impl std::fmt::Debug for ColumnSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnSet::Name(n) => write!(f, "col({n:?})"),
            ColumnSet::Names(n) => write!(f, "cols({n:?})"),
            ColumnSet::Path(p) => write!(f, "at({p})"),
            ColumnSet::Index(i) => write!(f, "col_at({i})"),
            ColumnSet::IndexRange(r) => write!(f, "cols_range({r:?})"),
            ColumnSet::All => write!(f, "all()"),
            ColumnSet::AllDfs { include_groups } => write!(f, "all_dfs({include_groups})"),
            ColumnSet::ColsOf(t) => write!(f, "cols_of({t})"),
            ColumnSet::Children(s) => write!(f, "{s:?}.children()"),
            ColumnSet::Filter(s, _) => write!(f, "{s:?}.filter(..)"),
            ColumnSet::Dfs(s, _) => write!(f, "{s:?}.dfs(..)"),
            ColumnSet::First(s) => write!(f, "{s:?}.first()"),
            ColumnSet::Last(s) => write!(f, "{s:?}.last()"),
            ColumnSet::Single(s) => write!(f, "{s:?}.single()"),
            ColumnSet::And(a, b) => write!(f, "{a:?}.and({b:?})"),
            ColumnSet::Except(a, b) => write!(f, "{a:?}.except({b:?})"),
            ColumnSet::Distinct(s) => write!(f, "{s:?}.distinct()"),
            ColumnSet::Span(a, b) => write!(f, "{a:?}.span({b:?})"),
            ColumnSet::Named(s, n) => write!(f, "{s:?}.named({n:?})"),
            ColumnSet::Kind(s, k) => write!(f, "{s:?}.as_{k}()"),
        }
    }
}
