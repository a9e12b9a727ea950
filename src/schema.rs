//! Structural snapshots of a frame: column names, kinds, and value types,
//! recursing through nested groups. Schemas support equality checks before
//! row-wise concatenation and a readable tree rendering.

// dependencies
use std::fmt;
use serde::{Deserialize, Serialize};
use crate::column::Column;
use crate::frame::DataFrame;
use crate::value::TypeDescriptor;

/// The schema of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnSchema {
    /// A value column and its type, nullability reflecting actual nulls.
    Value(TypeDescriptor),
    /// A group column and the schema of its children.
    Group(DataFrameSchema),
    /// A frame column and the schema of its first non-null cell, if any.
    Frame(Option<DataFrameSchema>),
}

/// The ordered column schemas of a frame.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataFrameSchema {
    pub columns: Vec<(String, ColumnSchema)>,
}

impl DataFrameSchema {
    pub fn of(frame: &DataFrame) -> DataFrameSchema {
        let columns = frame
            .columns()
            .iter()
            .map(|col| {
                let schema = match col.as_ref() {
                    Column::Value(c) => ColumnSchema::Value(TypeDescriptor::new(
                        c.data.base_type(),
                        c.data.has_nulls(),
                    )),
                    Column::Group(g) => ColumnSchema::Group(DataFrameSchema::of(&g.frame)),
                    Column::Frame(f) => ColumnSchema::Frame(
                        f.frames
                            .iter()
                            .flatten()
                            .next()
                            .map(DataFrameSchema::of),
                    ),
                };
                (col.name().to_string(), schema)
            })
            .collect();
        DataFrameSchema { columns }
    }

    fn render(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        for (name, schema) in &self.columns {
            let pad = "    ".repeat(depth);
            match schema {
                ColumnSchema::Value(dtype) => writeln!(f, "{pad}{name}: {dtype}")?,
                ColumnSchema::Group(inner) => {
                    writeln!(f, "{pad}{name}:")?;
                    inner.render(f, depth + 1)?;
                }
                ColumnSchema::Frame(Some(inner)) => {
                    writeln!(f, "{pad}{name}: [frames]")?;
                    inner.render(f, depth + 1)?;
                }
                ColumnSchema::Frame(None) => writeln!(f, "{pad}{name}: [frames]")?,
            }
        }
        Ok(())
    }
}

impl fmt::Display for DataFrameSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(f, 0)
    }
}

impl DataFrame {
    /// The structural schema of this frame.
    pub fn schema(&self) -> DataFrameSchema {
        DataFrameSchema::of(self)
    }
}
