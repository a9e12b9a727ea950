//! Row-major JSON serialization. This is the adapter that round-trips
//! hierarchical frames: group cells become nested objects, frame cells
//! arrays of objects.

// dependencies
use std::io::{Read, Write};
use serde_json::{json, Map, Value as Json};
use crate::column::{Column, ColumnData};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::value::Value;

impl DataFrame {
    /* -----------------------------------------------------------------------------
    writing
    ----------------------------------------------------------------------------- */
    /// The frame as a JSON array of row objects.
    pub fn to_json(&self) -> Result<Json> {
        let rows = (0..self.n_row())
            .map(|row| row_to_json(self, row))
            .collect::<Result<Vec<_>>>()?;
        Ok(Json::Array(rows))
    }

    pub fn write_json<W: Write>(&self, writer: W) -> Result<()> {
        serde_json::to_writer_pretty(writer, &self.to_json()?)?;
        Ok(())
    }

    /* -----------------------------------------------------------------------------
    reading
    ----------------------------------------------------------------------------- */
    /// Rebuild a frame from a JSON array of row objects. Objects nest as
    /// group columns, arrays of objects as frame columns; a key missing
    /// from a row reads as null. Numeric columns mixing integers and
    /// floats widen to `Float`.
    pub fn from_json(value: &Json) -> Result<DataFrame> {
        let Json::Array(rows) = value else {
            return Err(FrameError::SchemaMismatch(
                "expected a json array of row objects".to_string(),
            ));
        };
        let objects = rows
            .iter()
            .map(|row| {
                row.as_object().ok_or_else(|| {
                    FrameError::SchemaMismatch("expected a json row object".to_string())
                })
            })
            .collect::<Result<Vec<_>>>()?;
        frame_from_objects(&objects)
    }

    pub fn read_json<R: Read>(reader: R) -> Result<DataFrame> {
        let value: Json = serde_json::from_reader(reader)?;
        DataFrame::from_json(&value)
    }
}

fn row_to_json(frame: &DataFrame, row: usize) -> Result<Json> {
    let mut object = Map::new();
    for col in frame.columns() {
        let cell = match col.as_ref() {
            Column::Value(v) => match v.data.value(row) {
                Value::Null => Json::Null,
                Value::Int(x) => json!(x),
                Value::Float(x) => json!(x),
                Value::Bool(x) => json!(x),
                Value::Str(x) => json!(x),
            },
            Column::Group(g) => row_to_json(&g.frame, row)?,
            Column::Frame(f) => match &f.frames[row] {
                Some(df) => df.to_json()?,
                None => Json::Null,
            },
        };
        object.insert(col.name().to_string(), cell);
    }
    Ok(Json::Object(object))
}

// What a key holds across all rows decides its column kind.
enum KeyKind {
    Value,
    Group,
    Frame,
}

fn frame_from_objects(rows: &[&Map<String, Json>]) -> Result<DataFrame> {
    // union of keys in first-seen order
    let mut keys: Vec<&String> = Vec::new();
    for row in rows {
        for key in row.keys() {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    let mut columns = Vec::with_capacity(keys.len());
    for key in keys {
        let mut kind = KeyKind::Value;
        for row in rows {
            match row.get(key) {
                Some(Json::Object(_)) => {
                    kind = KeyKind::Group;
                    break;
                }
                Some(Json::Array(_)) => kind = KeyKind::Frame,
                _ => {}
            }
        }
        columns.push(build_column(key, &kind, rows)?);
    }
    if columns.is_empty() {
        return Ok(DataFrame::empty_with_rows(rows.len()));
    }
    DataFrame::new(columns)
}

fn build_column(key: &str, kind: &KeyKind, rows: &[&Map<String, Json>]) -> Result<Column> {
    match kind {
        KeyKind::Value => {
            let mut values = rows
                .iter()
                .map(|row| cell_from_json(key, row.get(key)))
                .collect::<Result<Vec<_>>>()?;
            if values.iter().any(|v| matches!(v, Value::Float(_))) {
                for v in &mut values {
                    if let Value::Int(x) = v {
                        *v = Value::Float(*x as f64);
                    }
                }
            }
            Ok(Column::Value(crate::column::ValueColumn {
                name: key.to_string(),
                data: ColumnData::from_values_inferred(values)?,
            }))
        }
        KeyKind::Group => {
            let empty = Map::new();
            let nested: Vec<&Map<String, Json>> = rows
                .iter()
                .map(|row| match row.get(key) {
                    Some(Json::Object(object)) => Ok(object),
                    None | Some(Json::Null) => Ok(&empty),
                    Some(_) => Err(FrameError::SchemaMismatch(format!(
                        "key '{key}' mixes objects and scalar values"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Column::group(key, frame_from_objects(&nested)?))
        }
        KeyKind::Frame => {
            let frames = rows
                .iter()
                .map(|row| match row.get(key) {
                    Some(array @ Json::Array(_)) => DataFrame::from_json(array).map(Some),
                    None | Some(Json::Null) => Ok(None),
                    Some(_) => Err(FrameError::SchemaMismatch(format!(
                        "key '{key}' mixes arrays and scalar values"
                    ))),
                })
                .collect::<Result<Vec<_>>>()?;
            Ok(Column::frames(key, frames))
        }
    }
}

fn cell_from_json(key: &str, cell: Option<&Json>) -> Result<Value> {
    Ok(match cell {
        None | Some(Json::Null) => Value::Null,
        Some(Json::Bool(x)) => Value::Bool(*x),
        Some(Json::Number(n)) => match n.as_i64() {
            Some(x) => Value::Int(x),
            None => Value::Float(n.as_f64().ok_or_else(|| {
                FrameError::SchemaMismatch(format!("non-finite number under key '{key}'"))
            })?),
        },
        Some(Json::String(x)) => Value::Str(x.clone()),
        Some(other) => {
            return Err(FrameError::SchemaMismatch(format!(
                "unexpected json {other} under key '{key}'"
            )));
        }
    })
}
