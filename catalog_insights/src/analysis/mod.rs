//! Filter, group and aggregate queries over the cleaned table.
//!
//! Every query is independent and stateless: it borrows the table, runs a
//! relational-style polars query and returns owned result frames. Rows whose
//! grouping key is null do not form a partition.

use comfy_table::{Cell, Table};
use getset::Getters;
use polars::prelude::*;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::explore::DatasetOverview;
use crate::record::columns;
use crate::CatalogError;

mod aggregate;
mod crosstab;
mod filter;
mod group;

pub use crate::analysis::aggregate::{aggregation_tasks, Aggregates};
pub use crate::analysis::crosstab::CrossTab;
pub use crate::analysis::filter::{filtering_tasks, FilteredSubsets};
pub use crate::analysis::group::{grouping_tasks, GroupedCounts};

/// Counts rows per distinct combination of `keys`, ordered by the keys.
///
/// The result has the key columns followed by an `Int64` `count` column.
pub fn count_by(df: &DataFrame, keys: &[&str]) -> Result<DataFrame, CatalogError> {
    let key_exprs: Vec<Expr> = keys.iter().map(|k| col(*k)).collect();
    let not_null = keys
        .iter()
        .map(|k| col(*k).is_not_null())
        .reduce(|acc, e| acc.and(e))
        .unwrap_or_else(|| lit(true));

    let counts = df
        .clone()
        .lazy()
        .filter(not_null)
        .group_by(key_exprs.clone())
        .agg([len().cast(DataType::Int64).alias(columns::COUNT)])
        .sort_by_exprs(key_exprs, SortMultipleOptions::default())
        .collect()?;
    Ok(counts)
}

/// Orders a single-key count frame by count descending, breaking ties by key.
pub fn sort_by_count_desc(counts: DataFrame, key: &str) -> Result<DataFrame, CatalogError> {
    let sorted = counts
        .lazy()
        .sort_by_exprs(
            [col(columns::COUNT), col(key)],
            SortMultipleOptions::default().with_order_descending_multi([true, false]),
        )
        .collect()?;
    Ok(sorted)
}

/// Adds the `year_added` column (the year of `date_added`).
///
/// Expects a cleaned table, where `date_added` is already a `Date`.
pub fn with_year_added(df: &DataFrame) -> Result<DataFrame, CatalogError> {
    let out = df
        .clone()
        .lazy()
        .with_column(
            col(columns::DATE_ADDED)
                .dt()
                .year()
                .alias(columns::YEAR_ADDED),
        )
        .collect()?;
    Ok(out)
}

/// Sum of the `count` column of a grouped frame.
pub fn count_total(counts: &DataFrame) -> Result<i64, CatalogError> {
    Ok(counts.column(columns::COUNT)?.i64()?.sum().unwrap_or(0))
}

/// Reads a single-key count frame as `(key, count)` pairs, keys rendered as text.
pub fn count_pairs(counts: &DataFrame, key: &str) -> Result<Vec<(String, i64)>, CatalogError> {
    let keys = counts.column(key)?.cast(&DataType::String)?;
    let values = counts.column(columns::COUNT)?.i64()?;
    let pairs = keys
        .str()?
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(k, v)| Some((k?.to_string(), v?)))
        .collect();
    Ok(pairs)
}

/// Renders any small result frame as a console table.
pub(crate) fn frame_table(df: &DataFrame) -> Result<Table, CatalogError> {
    let mut rendered: Vec<Vec<String>> = Vec::with_capacity(df.width());
    for column in df.get_columns() {
        let cells: Vec<String> = match column.dtype() {
            DataType::Float64 => column
                .f64()?
                .into_iter()
                .map(|v| v.map(|v| format!("{:.2}", v)).unwrap_or_default())
                .collect(),
            _ => column
                .cast(&DataType::String)?
                .str()?
                .into_iter()
                .map(|v| v.unwrap_or_default().to_string())
                .collect(),
        };
        rendered.push(cells);
    }

    let mut table = Table::new();
    table.set_header(df.get_column_names().iter().map(|n| n.to_string()));
    for row in 0..df.height() {
        table.add_row(rendered.iter().map(|cells| Cell::new(&cells[row])));
    }
    Ok(table)
}

/// One `(key, count)` entry of a serialized count series.
#[derive(Debug, Clone, PartialEq, Getters, Serialize)]
#[getset(get = "pub")]
pub struct KeyCount {
    key: String,
    count: i64,
}

/// A serializable digest of every query result.
#[derive(Debug, Clone, Getters, Serialize)]
#[getset(get = "pub")]
pub struct AnalysisSummary {
    /// Schema and missing values of the cleaned table.
    overview: DatasetOverview,
    rows: usize,
    recent_movies: usize,
    multi_season_shows: usize,
    us_content: usize,
    type_counts: BTreeMap<String, i64>,
    rating_counts: Vec<KeyCount>,
    country_counts: Vec<KeyCount>,
    avg_release_year_by_type: BTreeMap<String, f64>,
    yearly_additions: Vec<KeyCount>,
    rating_by_type: CrossTab,
}

impl AnalysisSummary {
    pub fn new(
        df: &DataFrame,
        filtered: &FilteredSubsets,
        grouped: &GroupedCounts,
        aggregates: &Aggregates,
    ) -> Result<Self, CatalogError> {
        let key_counts = |counts: &DataFrame, key: &str| -> Result<Vec<KeyCount>, CatalogError> {
            Ok(count_pairs(counts, key)?
                .into_iter()
                .map(|(key, count)| KeyCount { key, count })
                .collect())
        };

        Ok(Self {
            overview: DatasetOverview::from_frame(df),
            rows: df.height(),
            recent_movies: filtered.recent_movies().height(),
            multi_season_shows: filtered.multi_season_shows().height(),
            us_content: filtered.us_content().height(),
            type_counts: count_pairs(grouped.type_counts(), columns::TYPE)?
                .into_iter()
                .collect(),
            rating_counts: key_counts(grouped.rating_counts(), columns::RATING)?,
            country_counts: key_counts(grouped.country_counts(), columns::COUNTRY)?,
            avg_release_year_by_type: aggregates.mean_release_years()?.into_iter().collect(),
            yearly_additions: key_counts(aggregates.yearly_additions(), columns::YEAR_ADDED)?,
            rating_by_type: aggregates.rating_by_type().clone(),
        })
    }

    /// Exports the summary to a JSON string.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
