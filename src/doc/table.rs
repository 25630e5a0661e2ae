use std::cmp::Ordering;

use super::{Cell, Column};
use crate::error::{Error, Result};

/// Sink for tabular data: declare columns, `begin`, append rows, `end`.
pub trait TableBuilder {
    fn add_column(&mut self, column: Column) -> Result<()>;
    fn begin(&mut self) -> Result<()>;
    fn add_row(&mut self, row: Vec<Cell>) -> Result<()>;
    fn end(&mut self) -> Result<()>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum TableState {
    #[default]
    Declaring,
    Open,
    Closed,
}

/// In-memory table, the default [`TableBuilder`].
#[derive(Debug, Clone, Default)]
pub struct Table {
    name: Option<String>,
    csv_name: Option<String>,
    sort_column: Option<usize>,
    columns: Vec<Column>,
    rows: Vec<Vec<Cell>>,
    state: TableState,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_table_name(&mut self, name: &str) {
        self.name = Some(name.to_string());
    }

    /// Marks the table for CSV export under `name`.
    pub fn set_csv_output(&mut self, name: &str) {
        self.csv_name = Some(name.to_string());
    }

    /// Column the rows are ordered by when rendered. Only allowed while
    /// columns are still being declared; `begin` checks the range.
    pub fn set_sort_column(&mut self, index: usize) -> Result<()> {
        if self.state != TableState::Declaring {
            return Err(Error::Table(format!(
                "sort column {} set after begin",
                index
            )));
        }
        self.sort_column = Some(index);
        Ok(())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn csv_name(&self) -> Option<&str> {
        self.csv_name.as_deref()
    }

    pub fn sort_column(&self) -> Option<usize> {
        self.sort_column
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn is_finished(&self) -> bool {
        self.state == TableState::Closed
    }

    /// Rows ordered by the sort column: numbers largest first, text
    /// alphabetically. Ties keep insertion order.
    pub fn sorted_rows(&self) -> Vec<&Vec<Cell>> {
        let mut rows: Vec<&Vec<Cell>> = self.rows.iter().collect();
        if let Some(col) = self.sort_column {
            rows.sort_by(|a, b| match (a.get(col), b.get(col)) {
                (Some(x), Some(y)) => compare_cells(x, y),
                _ => Ordering::Equal,
            });
        }
        rows
    }
}

fn compare_cells(a: &Cell, b: &Cell) -> Ordering {
    match (a.numeric(), b.numeric()) {
        (Some(x), Some(y)) => y.cmp(&x),
        _ => a.text().cmp(&b.text()),
    }
}

impl TableBuilder for Table {
    fn add_column(&mut self, column: Column) -> Result<()> {
        if self.state != TableState::Declaring {
            return Err(Error::Table(format!(
                "column '{}' declared after begin",
                column.name
            )));
        }
        self.columns.push(column);
        Ok(())
    }

    fn begin(&mut self) -> Result<()> {
        if self.state != TableState::Declaring {
            return Err(Error::Table("begin called twice".to_string()));
        }
        if let Some(col) = self.sort_column {
            if col >= self.columns.len() {
                return Err(Error::Table(format!("sort column {} out of range", col)));
            }
        }
        self.state = TableState::Open;
        Ok(())
    }

    fn add_row(&mut self, row: Vec<Cell>) -> Result<()> {
        if self.state != TableState::Open {
            return Err(Error::Table("row added outside begin/end".to_string()));
        }
        if row.len() != self.columns.len() {
            return Err(Error::Table(format!(
                "row has {} cells, table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    fn end(&mut self) -> Result<()> {
        if self.state != TableState::Open {
            return Err(Error::Table("end called without begin".to_string()));
        }
        self.state = TableState::Closed;
        Ok(())
    }
}
