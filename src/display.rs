//! Fixed-width table rendering for frames.

// dependencies
use std::fmt;
use num_format::{Locale, ToFormattedString};
use crate::column::Column;
use crate::frame::DataFrame;

// caps keep wide or long frames readable
const MAX_ROWS: usize = 30;
const MAX_CELL_WIDTH: usize = 24;
const ELLIPSIS: &str = "...";

impl fmt::Display for DataFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leaves = self.flatten_leaves();
        if leaves.is_empty() {
            return write!(
                f,
                "{} rows x 0 columns",
                self.n_row().to_formatted_string(&Locale::en)
            );
        }
        let shown = self.n_row().min(MAX_ROWS);

        let mut widths = Vec::with_capacity(leaves.len());
        let mut table: Vec<Vec<String>> = Vec::with_capacity(leaves.len());
        for (header, col) in &leaves {
            let mut cells = Vec::with_capacity(shown + 1);
            cells.push(header.clone());
            for row in 0..shown {
                cells.push(clip(&cell_text(col, row)));
            }
            let width = cells.iter().map(String::len).max().unwrap_or(0);
            widths.push(width);
            table.push(cells);
        }

        for line in 0..=shown {
            for (i, cells) in table.iter().enumerate() {
                if i > 0 {
                    write!(f, "  ")?;
                }
                write!(f, "{:<width$}", cells[line], width = widths[i])?;
            }
            writeln!(f)?;
        }
        if self.n_row() > shown {
            writeln!(f, "{ELLIPSIS}")?;
        }
        write!(
            f,
            "{} rows x {} columns",
            self.n_row().to_formatted_string(&Locale::en),
            self.n_col().to_formatted_string(&Locale::en)
        )
    }
}

impl DataFrame {
    // leaf columns with slash-joined headers carrying type annotations
    fn flatten_leaves(&self) -> Vec<(String, std::sync::Arc<Column>)> {
        self.flatten()
            .into_iter()
            .filter(|c| !matches!(c.col.as_ref(), Column::Group(_)))
            .map(|c| {
                let annotation = match c.col.as_ref() {
                    Column::Value(v) => format!("<{}>", type_text(v)),
                    _ => "<frames>".to_string(),
                };
                (format!("{} {annotation}", c.path), c.col)
            })
            .collect()
    }
}

fn type_text(v: &crate::column::ValueColumn) -> String {
    crate::value::TypeDescriptor::new(v.data.base_type(), v.data.has_nulls()).to_string()
}

fn cell_text(col: &Column, row: usize) -> String {
    match col {
        Column::Value(v) => v.data.value(row).cell_string(),
        Column::Frame(fc) => match &fc.frames[row] {
            Some(df) => format!("[{} x {}]", df.n_row(), df.n_col()),
            None => crate::value::NA_STRING.to_string(),
        },
        Column::Group(_) => String::new(),
    }
}

fn clip(text: &str) -> String {
    if text.chars().count() <= MAX_CELL_WIDTH {
        text.to_string()
    } else {
        let kept: String = text.chars().take(MAX_CELL_WIDTH - ELLIPSIS.len()).collect();
        format!("{kept}{ELLIPSIS}")
    }
}
