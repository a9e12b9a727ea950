//! `value` defines the dynamically-typed cell currency used by the
//! resolution, grouping and join engines.
//!
//! Columns store their data as one typed `Vec<Option<T>>` per base type
//! (see [`crate::column::data`]); `Value` is the boxed form a cell takes
//! when it crosses an untyped boundary, e.g. as a component of a join key
//! tuple or while a join output column is being assembled.

// dependencies
use std::fmt::{self, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::cmp::Ordering;
use paste::paste;
use serde::{Deserialize, Serialize};
use crate::error::{FrameError, Result};

/// String rendering of a null cell, following R's convention.
pub const NA_STRING: &str = "NA";

/* -----------------------------------------------------------------------------
base types and type descriptors
----------------------------------------------------------------------------- */
/// The closed set of scalar base types a value column can hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ValueType {
    Int,
    Float,
    Bool,
    Str,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            ValueType::Int => write!(f, "i64"),
            ValueType::Float => write!(f, "f64"),
            ValueType::Bool => write!(f, "bool"),
            ValueType::Str => write!(f, "str"),
        }
    }
}

/// A base type plus a nullability flag.
///
/// Nullability is value-level throughout the crate: a column reports
/// `nullable = true` iff at least one null is actually present in its
/// data, regardless of how the column was declared or constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeDescriptor {
    pub base: ValueType,
    pub nullable: bool,
}

impl TypeDescriptor {
    pub fn new(base: ValueType, nullable: bool) -> Self {
        Self { base, nullable }
    }
    /// Whether a column with this descriptor satisfies a `cols_of` target.
    ///
    /// A nullable target accepts columns with or without nulls; a
    /// non-nullable target rejects any column that actually contains one.
    pub fn accepts(&self, col: &TypeDescriptor) -> bool {
        self.base == col.base && (self.nullable || !col.nullable)
    }
}

impl Display for TypeDescriptor {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.nullable {
            write!(f, "{}?", self.base)
        } else {
            write!(f, "{}", self.base)
        }
    }
}

/* -----------------------------------------------------------------------------
Value cell type
----------------------------------------------------------------------------- */
/// A single dynamically-typed cell value.
#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
}

impl Value {
    /// The base type of this value, or None for nulls.
    pub fn value_type(&self) -> Option<ValueType> {
        match self {
            Value::Null => None,
            Value::Int(_) => Some(ValueType::Int),
            Value::Float(_) => Some(ValueType::Float),
            Value::Bool(_) => Some(ValueType::Bool),
            Value::Str(_) => Some(ValueType::Str),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// String rendering of a cell, with nulls shown as `NA`.
    pub fn cell_string(&self) -> String {
        match self {
            Value::Null => NA_STRING.to_string(),
            Value::Int(v) => v.to_string(),
            Value::Float(v) => v.to_string(),
            Value::Bool(v) => v.to_string(),
            Value::Str(v) => v.clone(),
        }
    }

    /// Total ordering used by sorting: nulls first (unless the sort
    /// descriptor says otherwise), then natural order within a base type.
    /// Values of different base types never meet in a well-formed sort.
    pub fn compare(&self, other: &Value) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) => Ordering::Equal,
            (Value::Null, _) => Ordering::Less,
            (_, Value::Null) => Ordering::Greater,
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::Float(a), Value::Float(b)) => a.total_cmp(b),
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Str(a), Value::Str(b)) => a.cmp(b),
            // mixed base types: order by discriminant so the comparator
            // stays total even on malformed input
            (a, b) => a.rank().cmp(&b.rank()),
        }
    }

    fn rank(&self) -> u8 {
        match self {
            Value::Null => 0,
            Value::Int(_) => 1,
            Value::Float(_) => 2,
            Value::Bool(_) => 3,
            Value::Str(_) => 4,
        }
    }

    /// Require this value to be of `base` type or null.
    pub(crate) fn check_base(&self, base: ValueType) -> Result<()> {
        match self.value_type() {
            None => Ok(()),
            Some(t) if t == base => Ok(()),
            Some(t) => Err(FrameError::SchemaMismatch(format!(
                "expected a {base} value, found {t}"
            ))),
        }
    }
}

// Key equality is structural with floats compared by bit pattern, so NaN
// groups with NaN and key tuples remain hashable.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a.to_bits() == b.to_bits(),
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        std::mem::discriminant(self).hash(state);
        match self {
            Value::Null => {}
            Value::Int(v) => v.hash(state),
            Value::Float(v) => v.to_bits().hash(state),
            Value::Bool(v) => v.hash(state),
            Value::Str(v) => v.hash(state),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}", self.cell_string())
    }
}

/* -----------------------------------------------------------------------------
conversions into and out of Value
----------------------------------------------------------------------------- */
macro_rules! impl_value_primitive {
    ($variant:ident, $prim:ty, $as:ident) => {
        impl From<$prim> for Value {
            fn from(v: $prim) -> Self {
                Value::$variant(v)
            }
        }
        impl From<Option<$prim>> for Value {
            fn from(v: Option<$prim>) -> Self {
                v.map(Value::$variant).unwrap_or(Value::Null)
            }
        }
        paste! {
            impl Value {
                /// Typed view of the cell; None for nulls and other base types.
                pub fn [<as_ $as>](&self) -> Option<$prim> {
                    match self {
                        Value::$variant(v) => Some(v.clone()),
                        _ => None,
                    }
                }
            }
        }
    };
}

impl_value_primitive!(Int, i64, int);
impl_value_primitive!(Float, f64, float);
impl_value_primitive!(Bool, bool, bool);
impl_value_primitive!(Str, String, str);

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int(v as i64)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_string())
    }
}

impl From<Option<&str>> for Value {
    fn from(v: Option<&str>) -> Self {
        v.map(Value::from).unwrap_or(Value::Null)
    }
}

impl From<Option<i32>> for Value {
    fn from(v: Option<i32>) -> Self {
        v.map(Value::from).unwrap_or(Value::Null)
    }
}

impl From<()> for Value {
    fn from(_: ()) -> Self {
        Value::Null
    }
}
