use getset::Getters;
use polars::prelude::*;
use tracing::info;

use crate::analysis::{count_by, frame_table, with_year_added, CrossTab};
use crate::record::columns;
use crate::CatalogError;

/// Name of the mean column in [`Aggregates::avg_year_by_type`].
pub const MEAN_RELEASE_YEAR: &str = "mean_release_year";

/// Results of [`aggregation_tasks`].
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct Aggregates {
    /// Mean release year per content kind.
    avg_year_by_type: DataFrame,
    /// Titles added to the catalog per calendar year.
    yearly_additions: DataFrame,
    /// Kind × rating count matrix.
    rating_by_type: CrossTab,
}

impl Aggregates {
    /// The per-kind mean release years as `(kind, mean)` pairs.
    pub fn mean_release_years(&self) -> Result<Vec<(String, f64)>, CatalogError> {
        let kinds = self.avg_year_by_type.column(columns::TYPE)?.str()?;
        let means = self.avg_year_by_type.column(MEAN_RELEASE_YEAR)?.f64()?;
        Ok(kinds
            .into_iter()
            .zip(means.into_iter())
            .filter_map(|(k, m)| Some((k?.to_string(), m?)))
            .collect())
    }

    pub fn summary(&self) -> Result<(), CatalogError> {
        println!("\n=== AGGREGATION TASKS ===");
        println!(
            "Average release year by type:\n{}",
            frame_table(&self.avg_year_by_type)?
        );
        println!(
            "\nContent added by year:\n{}",
            frame_table(&self.yearly_additions)?
        );
        println!(
            "\nRating distribution by type:\n{}",
            frame_table(&self.rating_by_type.to_dataframe()?)?
        );
        Ok(())
    }
}

/// Mean release year by kind, additions per year and the rating distribution
/// per kind.
pub fn aggregation_tasks(df: &DataFrame) -> Result<Aggregates, CatalogError> {
    let avg_year_by_type = df
        .clone()
        .lazy()
        .filter(col(columns::TYPE).is_not_null())
        .group_by([col(columns::TYPE)])
        .agg([col(columns::RELEASE_YEAR)
            .cast(DataType::Float64)
            .mean()
            .alias(MEAN_RELEASE_YEAR)])
        .sort([columns::TYPE], SortMultipleOptions::default())
        .collect()?;

    let yearly_additions = count_by(&with_year_added(df)?, &[columns::YEAR_ADDED])?;

    let by_type_and_rating = count_by(df, &[columns::TYPE, columns::RATING])?;
    let rating_by_type =
        CrossTab::from_counts(&by_type_and_rating, columns::TYPE, columns::RATING)?;

    info!(
        kinds = avg_year_by_type.height(),
        years_added = yearly_additions.height(),
        ratings = rating_by_type.cols().len(),
        "aggregation tasks completed"
    );

    Ok(Aggregates {
        avg_year_by_type,
        yearly_additions,
        rating_by_type,
    })
}
