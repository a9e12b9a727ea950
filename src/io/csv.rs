//! CSV reading and writing for flat frames.

// dependencies
use std::fs::File;
use std::io::{Read, Write};
use csv::{ReaderBuilder, WriterBuilder};
use flate2::{read::GzDecoder, write::GzEncoder, Compression};
use crate::column::{Column, ColumnData};
use crate::error::{FrameError, Result};
use crate::frame::DataFrame;
use crate::value::{Value, ValueType, NA_STRING};

impl DataFrame {
    /* -----------------------------------------------------------------------------
    reading
    ----------------------------------------------------------------------------- */
    /// Read a headered CSV stream, inferring each column's type from its
    /// cells: `Int`, then `Float`, then `Bool`, falling back to `Str`.
    /// Empty cells and `NA` read as null.
    pub fn read_csv<R: Read>(reader: R) -> Result<DataFrame> {
        let (header, cells) = read_cells(reader)?;
        let columns = header
            .iter()
            .enumerate()
            .map(|(i, name)| infer_column(name, cells.iter().map(|row| row[i].as_str())))
            .collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    /// Read a headered CSV stream against an explicit flat schema. The
    /// header must match the schema's names in order.
    pub fn read_csv_with_schema<R: Read>(
        reader: R,
        schema: &[(String, ValueType)],
    ) -> Result<DataFrame> {
        let (header, cells) = read_cells(reader)?;
        let names: Vec<&str> = schema.iter().map(|(n, _)| n.as_str()).collect();
        if header != names {
            return Err(FrameError::SchemaMismatch(format!(
                "csv header {header:?} does not match the expected columns {names:?}"
            )));
        }
        let columns = schema
            .iter()
            .enumerate()
            .map(|(i, (name, base))| {
                let values = cells
                    .iter()
                    .map(|row| parse_cell(&row[i], *base))
                    .collect::<Result<Vec<_>>>()?;
                Ok(Column::from_data(name, ColumnData::from_values(*base, values)?))
            })
            .collect::<Result<Vec<_>>>()?;
        DataFrame::new(columns)
    }

    /// Read a CSV file, decompressing transparently when the path ends
    /// in `.gz`.
    pub fn read_csv_path(path: &str) -> Result<DataFrame> {
        let file = File::open(path)?;
        if path.ends_with(".gz") {
            DataFrame::read_csv(GzDecoder::new(file))
        } else {
            DataFrame::read_csv(file)
        }
    }

    /* -----------------------------------------------------------------------------
    writing
    ----------------------------------------------------------------------------- */
    /// Write the frame as headered CSV. Nulls write as `NA`. Frames with
    /// group or frame columns do not flatten to CSV.
    pub fn write_csv<W: Write>(&self, writer: W) -> Result<()> {
        let flat = self
            .columns()
            .iter()
            .map(|col| match col.as_ref() {
                Column::Value(v) => Ok(v),
                other => Err(FrameError::Unsupported(format!(
                    "cannot write {} column '{}' as csv",
                    other.kind(),
                    other.name()
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        let mut writer = WriterBuilder::new().from_writer(writer);
        writer.write_record(flat.iter().map(|v| v.name.as_str()))?;
        for row in 0..self.n_row() {
            writer.write_record(flat.iter().map(|v| v.data.value(row).cell_string()))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Write a CSV file, compressing when the path ends in `.gz`.
    pub fn write_csv_path(&self, path: &str) -> Result<()> {
        let file = File::create(path)?;
        if path.ends_with(".gz") {
            self.write_csv(GzEncoder::new(file, Compression::default()))
        } else {
            self.write_csv(file)
        }
    }
}

fn read_cells<R: Read>(reader: R) -> Result<(Vec<String>, Vec<Vec<String>>)> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_reader(reader);
    let header = reader
        .headers()?
        .iter()
        .map(|s| s.to_string())
        .collect::<Vec<_>>();
    let mut cells = Vec::new();
    for record in reader.records() {
        let record = record?;
        cells.push(record.iter().map(|s| s.to_string()).collect::<Vec<_>>());
    }
    Ok((header, cells))
}

fn is_null(cell: &str) -> bool {
    cell.is_empty() || cell == NA_STRING
}

fn parse_cell(cell: &str, base: ValueType) -> Result<Value> {
    if is_null(cell) {
        return Ok(Value::Null);
    }
    match base {
        ValueType::Int => cell.parse::<i64>().map(Value::Int).map_err(|_| bad_cell(cell, base)),
        ValueType::Float => cell.parse::<f64>().map(Value::Float).map_err(|_| bad_cell(cell, base)),
        ValueType::Bool => match cell {
            "true" | "TRUE" => Ok(Value::Bool(true)),
            "false" | "FALSE" => Ok(Value::Bool(false)),
            _ => Err(bad_cell(cell, base)),
        },
        ValueType::Str => Ok(Value::Str(cell.to_string())),
    }
}

fn bad_cell(cell: &str, base: ValueType) -> FrameError {
    FrameError::SchemaMismatch(format!("cannot parse '{cell}' as {base}"))
}

fn infer_column<'a>(name: &str, cells: impl Iterator<Item = &'a str> + Clone) -> Result<Column> {
    for base in [ValueType::Int, ValueType::Float, ValueType::Bool] {
        let parsed: Option<Vec<Value>> = cells
            .clone()
            .map(|cell| parse_cell(cell, base).ok())
            .collect();
        if let Some(values) = parsed {
            return Ok(Column::from_data(name, ColumnData::from_values(base, values)?));
        }
    }
    let values = cells
        .map(|cell| parse_cell(cell, ValueType::Str))
        .collect::<Result<Vec<_>>>()?;
    Ok(Column::from_data(name, ColumnData::from_values(ValueType::Str, values)?))
}
