//! Typed storage behind value columns: one `Vec<Option<T>>` per base type.
//!
//! Operations on column data all start from a `match` on the storage
//! variant to dispatch to the correct typed vector. The match happens once
//! per column per operation, so the overhead is negligible.

// dependencies
use crate::error::{FrameError, Result};
use crate::value::{Value, ValueType};

/// The typed row data of a value column.
#[derive(Debug, Clone)]
pub enum ColumnData {
    Int(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Bool(Vec<Option<bool>>),
    Str(Vec<Option<String>>),
}

impl ColumnData {
    /* -----------------------------------------------------------------------------
    constructors
    ----------------------------------------------------------------------------- */
    /// An all-null column of `len` rows with the given base type.
    pub fn nulls(base: ValueType, len: usize) -> Self {
        match base {
            ValueType::Int => ColumnData::Int(vec![None; len]),
            ValueType::Float => ColumnData::Float(vec![None; len]),
            ValueType::Bool => ColumnData::Bool(vec![None; len]),
            ValueType::Str => ColumnData::Str(vec![None; len]),
        }
    }

    /// Build typed storage from boxed cells, checking every cell against
    /// the expected base type.
    pub fn from_values(base: ValueType, values: Vec<Value>) -> Result<Self> {
        for v in &values {
            v.check_base(base)?;
        }
        Ok(match base {
            ValueType::Int => ColumnData::Int(values.into_iter().map(|v| v.as_int()).collect()),
            ValueType::Float => {
                ColumnData::Float(values.into_iter().map(|v| v.as_float()).collect())
            }
            ValueType::Bool => ColumnData::Bool(values.into_iter().map(|v| v.as_bool()).collect()),
            ValueType::Str => ColumnData::Str(values.into_iter().map(|v| v.as_str()).collect()),
        })
    }

    /// Infer the base type from the first non-null cell and build typed
    /// storage; an all-null input defaults to `Str`.
    pub fn from_values_inferred(values: Vec<Value>) -> Result<Self> {
        let base = values
            .iter()
            .find_map(|v| v.value_type())
            .unwrap_or(ValueType::Str);
        Self::from_values(base, values)
    }

    /* -----------------------------------------------------------------------------
    shape and type accessors
    ----------------------------------------------------------------------------- */
    pub fn base_type(&self) -> ValueType {
        match self {
            ColumnData::Int(_) => ValueType::Int,
            ColumnData::Float(_) => ValueType::Float,
            ColumnData::Bool(_) => ValueType::Bool,
            ColumnData::Str(_) => ValueType::Str,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ColumnData::Int(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Bool(v) => v.len(),
            ColumnData::Str(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whether any null is actually present in the data.
    pub fn has_nulls(&self) -> bool {
        match self {
            ColumnData::Int(v) => v.iter().any(Option::is_none),
            ColumnData::Float(v) => v.iter().any(Option::is_none),
            ColumnData::Bool(v) => v.iter().any(Option::is_none),
            ColumnData::Str(v) => v.iter().any(Option::is_none),
        }
    }

    /* -----------------------------------------------------------------------------
    cell access
    ----------------------------------------------------------------------------- */
    /// The boxed cell at `row`.
    pub fn value(&self, row: usize) -> Value {
        match self {
            ColumnData::Int(v) => v[row].map(Value::Int).unwrap_or(Value::Null),
            ColumnData::Float(v) => v[row].map(Value::Float).unwrap_or(Value::Null),
            ColumnData::Bool(v) => v[row].map(Value::Bool).unwrap_or(Value::Null),
            ColumnData::Str(v) => v[row].clone().map(Value::Str).unwrap_or(Value::Null),
        }
    }

    pub fn values(&self) -> impl Iterator<Item = Value> + '_ {
        (0..self.len()).map(|i| self.value(i))
    }

    /* -----------------------------------------------------------------------------
    row-wise transforms
    ----------------------------------------------------------------------------- */
    /// Copy the cells at the given row indices, in order.
    pub fn take_rows(&self, rows: &[usize]) -> Self {
        match self {
            ColumnData::Int(v) => ColumnData::Int(rows.iter().map(|&i| v[i]).collect()),
            ColumnData::Float(v) => ColumnData::Float(rows.iter().map(|&i| v[i]).collect()),
            ColumnData::Bool(v) => ColumnData::Bool(rows.iter().map(|&i| v[i]).collect()),
            ColumnData::Str(v) => ColumnData::Str(rows.iter().map(|&i| v[i].clone()).collect()),
        }
    }

    /// Append another column's rows; base types must match.
    pub fn extend(&mut self, other: &ColumnData) -> Result<()> {
        match (self, other) {
            (ColumnData::Int(a), ColumnData::Int(b)) => a.extend(b.iter().cloned()),
            (ColumnData::Float(a), ColumnData::Float(b)) => a.extend(b.iter().cloned()),
            (ColumnData::Bool(a), ColumnData::Bool(b)) => a.extend(b.iter().cloned()),
            (ColumnData::Str(a), ColumnData::Str(b)) => a.extend(b.iter().cloned()),
            (a, b) => {
                return Err(FrameError::SchemaMismatch(format!(
                    "cannot concatenate {} data onto {}",
                    b.base_type(),
                    a.base_type()
                )));
            }
        }
        Ok(())
    }
}

// Structural equality with floats compared by bit pattern, consistent with
// Value's key equality.
impl PartialEq for ColumnData {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ColumnData::Int(a), ColumnData::Int(b)) => a == b,
            (ColumnData::Bool(a), ColumnData::Bool(b)) => a == b,
            (ColumnData::Str(a), ColumnData::Str(b)) => a == b,
            (ColumnData::Float(a), ColumnData::Float(b)) => {
                a.len() == b.len()
                    && a.iter()
                        .zip(b.iter())
                        .all(|(x, y)| x.map(f64::to_bits) == y.map(f64::to_bits))
            }
            _ => false,
        }
    }
}

impl Eq for ColumnData {}
