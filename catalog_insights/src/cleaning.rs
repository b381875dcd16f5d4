//! Missing-value filling and type coercion.
//!
//! Cleaning never fails on bad data: unparseable dates and years become
//! nulls. Running it on an already-cleaned frame changes nothing.

use polars::prelude::*;
use tracing::{debug, info};

use crate::config::{DATE_FORMAT, UNKNOWN};
use crate::record::columns;
use crate::CatalogError;

/// Text columns whose nulls are replaced with [`UNKNOWN`].
pub const FILLED_COLUMNS: [&str; 4] = [
    columns::DIRECTOR,
    columns::CAST,
    columns::COUNTRY,
    columns::RATING,
];

/// Cleans the table: fills missing text fields, parses `date_added` into a
/// `Date` column and coerces `release_year` to `Int64`.
pub fn clean(df: DataFrame) -> Result<DataFrame, CatalogError> {
    println!("\n=== DATA CLEANING ===");
    println!("Handling missing values...");

    let mut exprs: Vec<Expr> = FILLED_COLUMNS
        .iter()
        .filter(|name| dtype_of(&df, name) == Some(DataType::String))
        .map(|name| col(*name).fill_null(lit(UNKNOWN)))
        .collect();

    let dates_before = match dtype_of(&df, columns::DATE_ADDED) {
        Some(DataType::Date) | None => None,
        Some(dtype) => {
            exprs.push(parse_dates(dtype));
            Some(null_count(&df, columns::DATE_ADDED))
        }
    };
    match dtype_of(&df, columns::RELEASE_YEAR) {
        Some(DataType::Int64) | None => {}
        Some(dtype) => exprs.push(coerce_release_year(dtype)),
    }

    let df = if exprs.is_empty() {
        df
    } else {
        df.lazy().with_columns(exprs).collect()?
    };

    if let Some(before) = dates_before {
        let unparsed = null_count(&df, columns::DATE_ADDED).saturating_sub(before);
        if unparsed > 0 {
            debug!(unparsed, "date_added values coerced to null");
        }
    }

    info!(rows = df.height(), "data cleaning completed");
    println!("Data cleaning completed!");
    Ok(df)
}

fn dtype_of(df: &DataFrame, name: &str) -> Option<DataType> {
    df.column(name).ok().map(|c| c.dtype().clone())
}

fn null_count(df: &DataFrame, name: &str) -> usize {
    df.column(name).map(|c| c.null_count()).unwrap_or(0)
}

/// `date_added` text such as `" September 25, 2021"` to `Date`; values that
/// do not match [`DATE_FORMAT`] become null.
fn parse_dates(dtype: DataType) -> Expr {
    let text = match dtype {
        DataType::String => col(columns::DATE_ADDED),
        _ => col(columns::DATE_ADDED).cast(DataType::String),
    };
    text.str().strip_chars(lit(NULL)).str().to_date(StrptimeOptions {
        format: Some(DATE_FORMAT.into()),
        strict: false,
        ..Default::default()
    })
}

/// `release_year` to `Int64`. The cast is non-strict, so text that is not a
/// number becomes null.
fn coerce_release_year(dtype: DataType) -> Expr {
    match dtype {
        DataType::String => col(columns::RELEASE_YEAR)
            .str()
            .strip_chars(lit(NULL))
            .cast(DataType::Int64),
        _ => col(columns::RELEASE_YEAR).cast(DataType::Int64),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_with_leading_space() {
        let df = df!("date_added" => &[Some(" September 25, 2021"), Some("2021-09-25"), None])
            .unwrap();
        let cleaned = clean(df).unwrap();
        let dates = cleaned.column("date_added").unwrap();
        assert_eq!(dates.dtype(), &DataType::Date);
        // 2021-09-25 is day 18_895 of the Unix epoch.
        assert_eq!(dates.date().unwrap().get(0), Some(18_895));
        assert_eq!(dates.null_count(), 2);
    }

    #[test]
    fn test_numeric_years_are_cast() {
        let df = df!("release_year" => &[2015i32, 2020]).unwrap();
        let cleaned = clean(df).unwrap();
        let years = cleaned.column("release_year").unwrap();
        assert_eq!(years.dtype(), &DataType::Int64);
        assert_eq!(years.i64().unwrap().get(1), Some(2020));
    }
}
