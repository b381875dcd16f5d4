//! Basic exploration of a freshly loaded table.

use comfy_table::{Cell, Table};
use getset::Getters;
use polars::prelude::*;
use serde::Serialize;

/// Shape, schema and missing-value counts of a table.
#[derive(Debug, Clone, Getters, Serialize)]
#[getset(get = "pub")]
pub struct DatasetOverview {
    rows: usize,
    columns: Vec<ColumnProfile>,
    /// The first five rows, rendered by polars.
    #[serde(skip)]
    head: String,
}

/// Name, dtype and null count of a single column.
#[derive(Debug, Clone, Getters, Serialize)]
#[getset(get = "pub")]
pub struct ColumnProfile {
    name: String,
    dtype: String,
    null_count: usize,
}

impl DatasetOverview {
    pub fn from_frame(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|c| ColumnProfile {
                name: c.name().to_string(),
                dtype: c.dtype().to_string(),
                null_count: c.null_count(),
            })
            .collect();
        Self {
            rows: df.height(),
            columns,
            head: df.head(Some(5)).to_string(),
        }
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn total_nulls(&self) -> usize {
        self.columns.iter().map(|c| c.null_count).sum()
    }

    /// Prints the overview to the console.
    pub fn summary(&self) {
        println!("\n=== DATA EXPLORATION ===");
        println!("Dataset shape: ({}, {})", self.rows, self.width());
        println!("\nColumns: {:?}", self.column_names());

        let mut table = Table::new();
        table.set_header(vec!["Column", "Type", "Missing"]);
        for column in &self.columns {
            table.add_row(vec![
                Cell::new(&column.name),
                Cell::new(&column.dtype),
                Cell::new(column.null_count),
            ]);
        }
        println!("{}", table);
        println!("Total missing values: {}", self.total_nulls());

        println!("\nFirst 5 rows:");
        println!("{}", self.head);
    }
}
