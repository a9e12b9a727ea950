//! Long-to-wide reshaping: spread a key column's distinct values into
//! new columns holding a value column's cells.

// dependencies
use std::sync::Arc;
use crate::column::{Column, ColumnData};
use crate::error::Result;
use crate::frame::DataFrame;
use crate::group::{partition_rows, KeyColumns};
use crate::value::Value;

impl DataFrame {
    /// One output row per distinct combination of the remaining columns;
    /// one new column per distinct `key` cell (named by its text form, in
    /// first-seen order), holding the `value` cells. A combination
    /// without a given key fills with null; a combination with repeated
    /// keys keeps the first value.
    pub fn pivot(&self, key: &str, value: &str) -> Result<DataFrame> {
        let key_col = self.column(key)?.as_value()?;
        let value_col = self.column(value)?.as_value()?;

        let rest: Vec<Arc<Column>> = self
            .columns()
            .iter()
            .filter(|c| c.name() != key && c.name() != value)
            .cloned()
            .collect();

        let partitions = if rest.is_empty() {
            if self.n_row() == 0 { Vec::new() } else { vec![(0..self.n_row()).collect()] }
        } else {
            let rest_frame = DataFrame::from_arcs(rest.clone())?;
            let keys = KeyColumns::from_paths(&rest_frame, &rest_frame.leaf_paths())?;
            partition_rows(&keys, self.n_row())?
        };
        let firsts: Vec<usize> = partitions.iter().map(|p| p[0]).collect();

        // distinct key cells in first-seen order become the new columns
        let mut spread: Vec<String> = Vec::new();
        for row in 0..self.n_row() {
            let name = key_col.data.value(row).cell_string();
            if !spread.contains(&name) {
                spread.push(name);
            }
        }

        let mut columns: Vec<Arc<Column>> = rest
            .iter()
            .map(|c| c.take_rows(&firsts).map(Arc::new))
            .collect::<Result<Vec<_>>>()?;
        for name in &spread {
            let cells: Vec<Value> = partitions
                .iter()
                .map(|rows| {
                    rows.iter()
                        .find(|&&r| key_col.data.value(r).cell_string() == *name)
                        .map(|&r| value_col.data.value(r))
                        .unwrap_or(Value::Null)
                })
                .collect();
            columns.push(Arc::new(Column::from_data(
                name,
                ColumnData::from_values(value_col.data.base_type(), cells)?,
            )));
        }
        if columns.is_empty() {
            return Ok(DataFrame::empty_with_rows(firsts.len()));
        }
        DataFrame::from_arcs(columns)
    }
}
