//! Per-group aggregation: a body runs once per group, yields named
//! values or frames into a builder, and the yields splice back into the
//! keys frame as new columns.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnData, ColumnPath};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::group::GroupedDataFrame;
use crate::value::{Value, ValueType};

/// The column name given to a body's bare return value when it yields
/// nothing explicitly.
pub const DEFAULT_AGGREGATE_COLUMN: &str = "aggregated";

enum AggregateCell {
    Value(Value),
    Frame(DataFrame),
}

struct NamedValue {
    path: ColumnPath,
    cell: AggregateCell,
    default: Option<Value>,
}

/// Collects the named results of one group's aggregation body.
#[derive(Default)]
pub struct AggregateBuilder {
    entries: Vec<NamedValue>,
}

impl AggregateBuilder {
    /// Yield one value under a name or nested path.
    pub fn yield_value(&mut self, path: impl Into<ColumnPath>, value: impl Into<Value>) {
        self.entries.push(NamedValue {
            path: path.into(),
            cell: AggregateCell::Value(value.into()),
            default: None,
        });
    }

    /// Yield one value with a fallback used for groups that never yield
    /// under this path.
    pub fn yield_with_default(
        &mut self,
        path: impl Into<ColumnPath>,
        value: impl Into<Value>,
        default: impl Into<Value>,
    ) {
        self.entries.push(NamedValue {
            path: path.into(),
            cell: AggregateCell::Value(value.into()),
            default: Some(default.into()),
        });
    }

    /// Yield a whole frame as one cell of a frame column.
    pub fn yield_frame(&mut self, path: impl Into<ColumnPath>, frame: DataFrame) {
        self.entries.push(NamedValue {
            path: path.into(),
            cell: AggregateCell::Frame(frame),
            default: None,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GroupedDataFrame {
    /// Run `body` once per group and attach its yields to the keys frame
    /// as new columns, one output row per group. A body that yields
    /// nothing contributes its return value under `aggregated`. Yield
    /// paths absent in some groups fill with the yield's default, or null.
    pub fn aggregate<F>(&self, body: F) -> Result<DataFrame>
    where
        F: Fn(&DataFrame, &mut AggregateBuilder) -> Result<Option<Value>>,
    {
        // first-yield order across groups is the output column order
        let mut order: Vec<ColumnPath> = Vec::new();
        let mut defaults: Vec<Option<Value>> = Vec::new();
        let mut per_group: Vec<Vec<NamedValue>> = Vec::with_capacity(self.n_groups());
        for group in self.groups() {
            let mut builder = AggregateBuilder::default();
            let returned = body(group, &mut builder)?;
            if builder.is_empty() {
                if let Some(value) = returned {
                    builder.yield_value(DEFAULT_AGGREGATE_COLUMN, value);
                }
            }
            for entry in &builder.entries {
                match order.iter().position(|p| *p == entry.path) {
                    Some(slot) => {
                        if defaults[slot].is_none() {
                            defaults[slot] = entry.default.clone();
                        }
                    }
                    None => {
                        order.push(entry.path.clone());
                        defaults.push(entry.default.clone());
                    }
                }
            }
            per_group.push(builder.entries);
        }

        let mut out = self.keys().clone();
        for (slot, path) in order.iter().enumerate() {
            let column = build_column(path, &per_group, &defaults[slot])?;
            out = out.insert_arc(path, Arc::new(column))?;
        }
        Ok(out)
    }

    /* -----------------------------------------------------------------------------
    common aggregations
    ----------------------------------------------------------------------------- */
    /// Group sizes as an `Int` column.
    pub fn count(&self, into: &str) -> Result<DataFrame> {
        let into = into.to_string();
        self.aggregate(|group, builder| {
            builder.yield_value(into.as_str(), group.n_row() as i64);
            Ok(None)
        })
    }

    /// Per-group minimum of a value column, nulls ignored.
    pub fn min_of(&self, column: &str, into: &str) -> Result<DataFrame> {
        self.fold_values(column, into, |values| {
            values.into_iter().min_by(|a, b| a.compare(b)).unwrap_or(Value::Null)
        })
    }

    /// Per-group maximum of a value column, nulls ignored.
    pub fn max_of(&self, column: &str, into: &str) -> Result<DataFrame> {
        self.fold_values(column, into, |values| {
            values.into_iter().max_by(|a, b| a.compare(b)).unwrap_or(Value::Null)
        })
    }

    /// Per-group sum of a numeric column, nulls ignored. Int columns sum
    /// to `Int`, float columns to `Float`.
    pub fn sum_of(&self, column: &str, into: &str) -> Result<DataFrame> {
        let column_name = column.to_string();
        let into = into.to_string();
        self.aggregate(move |group, builder| {
            let col = group.column(&column_name)?.as_value()?.clone();
            let sum = match col.data {
                ColumnData::Int(v) => Value::Int(v.iter().flatten().sum()),
                ColumnData::Float(v) => Value::Float(v.iter().flatten().sum()),
                _ => {
                    return Err(FrameError::Unsupported(format!(
                        "cannot sum {} column '{column_name}'",
                        col.data.base_type()
                    )));
                }
            };
            builder.yield_value(into.as_str(), sum);
            Ok(None)
        })
    }

    /// Per-group mean of a numeric column as `Float`, nulls ignored; an
    /// all-null group yields null.
    pub fn mean_of(&self, column: &str, into: &str) -> Result<DataFrame> {
        let column_name = column.to_string();
        let into = into.to_string();
        self.aggregate(move |group, builder| {
            let col = group.column(&column_name)?.as_value()?.clone();
            let numbers: Vec<f64> = match col.data {
                ColumnData::Int(v) => v.iter().flatten().map(|&x| x as f64).collect(),
                ColumnData::Float(v) => v.iter().flatten().copied().collect(),
                _ => {
                    return Err(FrameError::Unsupported(format!(
                        "cannot average {} column '{column_name}'",
                        col.data.base_type()
                    )));
                }
            };
            let mean = if numbers.is_empty() {
                Value::Null
            } else {
                Value::Float(numbers.iter().sum::<f64>() / numbers.len() as f64)
            };
            builder.yield_value(into.as_str(), mean);
            Ok(None)
        })
    }

    fn fold_values<F>(&self, column: &str, into: &str, fold: F) -> Result<DataFrame>
    where
        F: Fn(Vec<Value>) -> Value,
    {
        let column_name = column.to_string();
        let into = into.to_string();
        self.aggregate(move |group, builder| {
            let col = group.column(&column_name)?.as_value()?;
            let values: Vec<Value> = col.data.values().filter(|v| !v.is_null()).collect();
            builder.yield_value(into.as_str(), fold(values));
            Ok(None)
        })
    }
}

// One output column from the per-group yields at `path`: a frame column
// if any group yielded a frame, else a value column with its type
// inferred from the yielded cells.
fn build_column(
    path: &ColumnPath,
    per_group: &[Vec<NamedValue>],
    default: &Option<Value>,
) -> Result<Column> {
    let cells: Vec<Option<&AggregateCell>> = per_group
        .iter()
        .map(|entries| entries.iter().find(|e| e.path == *path).map(|e| &e.cell))
        .collect();
    let any_frame = cells
        .iter()
        .any(|c| matches!(c, Some(AggregateCell::Frame(_))));
    if any_frame {
        let frames = cells
            .into_iter()
            .map(|cell| match cell {
                Some(AggregateCell::Frame(f)) => Ok(Some(f.clone())),
                Some(AggregateCell::Value(_)) => Err(FrameError::SchemaMismatch(format!(
                    "aggregation '{path}' yields frames in some groups and values in others"
                ))),
                None => Ok(None),
            })
            .collect::<Result<Vec<_>>>()?;
        return Ok(Column::frames(path.name(), frames));
    }
    let values: Vec<Value> = cells
        .into_iter()
        .map(|cell| match cell {
            Some(AggregateCell::Value(v)) => v.clone(),
            Some(AggregateCell::Frame(_)) | None => {
                default.clone().unwrap_or(Value::Null)
            }
        })
        .collect();
    let base = values
        .iter()
        .find_map(|v| v.value_type())
        .unwrap_or(ValueType::Str);
    Ok(Column::from_data(path.name(), ColumnData::from_values(base, values)?))
}
