use polars::prelude::*;
use serde::Serialize;

use crate::record::columns;
use crate::CatalogError;

/// A two-way count table: one row per value of the row key, one column per
/// value of the column key. Combinations that never occur count as zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossTab {
    row_key: String,
    col_key: String,
    rows: Vec<String>,
    cols: Vec<String>,
    counts: Vec<Vec<i64>>,
}

impl CrossTab {
    /// Unstacks a long-format count frame (`row_key`, `col_key`, `count`).
    /// Row and column labels come out sorted.
    pub fn from_counts(
        counts: &DataFrame,
        row_key: &str,
        col_key: &str,
    ) -> Result<Self, CatalogError> {
        let row_values = counts.column(row_key)?.cast(&DataType::String)?;
        let col_values = counts.column(col_key)?.cast(&DataType::String)?;
        let values = counts.column(columns::COUNT)?.i64()?;

        let triples: Vec<(&str, &str, i64)> = row_values
            .str()?
            .into_iter()
            .zip(col_values.str()?.into_iter())
            .zip(values.into_iter())
            .filter_map(|((r, c), n)| Some((r?, c?, n?)))
            .collect();

        let mut rows: Vec<String> = triples.iter().map(|(r, _, _)| r.to_string()).collect();
        rows.sort();
        rows.dedup();
        let mut cols: Vec<String> = triples.iter().map(|(_, c, _)| c.to_string()).collect();
        cols.sort();
        cols.dedup();

        let mut matrix = vec![vec![0i64; cols.len()]; rows.len()];
        for (r, c, n) in triples {
            let (Ok(i), Ok(j)) = (
                rows.binary_search_by(|v| v.as_str().cmp(r)),
                cols.binary_search_by(|v| v.as_str().cmp(c)),
            ) else {
                continue;
            };
            matrix[i][j] += n;
        }

        Ok(Self {
            row_key: row_key.to_string(),
            col_key: col_key.to_string(),
            rows,
            cols,
            counts: matrix,
        })
    }

    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    pub fn cols(&self) -> &[String] {
        &self.cols
    }

    pub fn counts(&self) -> &[Vec<i64>] {
        &self.counts
    }

    pub fn get(&self, row: &str, col: &str) -> Option<i64> {
        let i = self.rows.iter().position(|r| r == row)?;
        let j = self.cols.iter().position(|c| c == col)?;
        Some(self.counts[i][j])
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() || self.cols.is_empty()
    }

    pub fn total(&self) -> i64 {
        self.counts.iter().flatten().sum()
    }

    pub fn max(&self) -> i64 {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    /// Wide layout: the row key column followed by one `Int64` column per label.
    pub fn to_dataframe(&self) -> Result<DataFrame, CatalogError> {
        let mut cols: Vec<Column> = Vec::with_capacity(self.cols.len() + 1);
        cols.push(Column::new(self.row_key.as_str().into(), &self.rows));
        for (j, label) in self.cols.iter().enumerate() {
            let values: Vec<i64> = self.counts.iter().map(|row| row[j]).collect();
            cols.push(Column::new(label.as_str().into(), values));
        }
        Ok(DataFrame::new(cols)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_counts() -> DataFrame {
        df!(
            "type" => &["Movie", "Movie", "TV Show"],
            "rating" => &["PG", "R", "PG"],
            "count" => &[3i64, 1, 2]
        )
        .unwrap()
    }

    #[test]
    fn test_unstack_fills_missing_with_zero() {
        let tab = CrossTab::from_counts(&long_counts(), "type", "rating").unwrap();
        assert_eq!(tab.rows(), &["Movie".to_string(), "TV Show".to_string()]);
        assert_eq!(tab.cols(), &["PG".to_string(), "R".to_string()]);
        assert_eq!(tab.get("TV Show", "R"), Some(0));
        assert_eq!(tab.get("Movie", "PG"), Some(3));
        assert_eq!(tab.total(), 6);
        assert_eq!(tab.max(), 3);
    }

    #[test]
    fn test_wide_frame() {
        let tab = CrossTab::from_counts(&long_counts(), "type", "rating").unwrap();
        let wide = tab.to_dataframe().unwrap();
        assert_eq!(wide.shape(), (2, 3));
        let r = wide.column("R").unwrap().i64().unwrap();
        assert_eq!(r.get(0), Some(1));
        assert_eq!(r.get(1), Some(0));
    }
}
