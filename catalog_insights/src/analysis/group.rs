use getset::Getters;
use polars::prelude::*;
use tracing::info;

use crate::analysis::{count_by, count_total, frame_table, sort_by_count_desc};
use crate::config::TOP_COUNTRIES;
use crate::record::columns;
use crate::CatalogError;

/// Count series produced by [`grouping_tasks`]. Each frame holds the key
/// column and a `count` column.
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct GroupedCounts {
    /// Titles per content kind, ordered by kind.
    type_counts: DataFrame,
    /// Titles per rating, most frequent first.
    rating_counts: DataFrame,
    /// Titles per release year, ordered by year.
    yearly_content: DataFrame,
    /// The ten most frequent countries.
    country_counts: DataFrame,
}

impl GroupedCounts {
    pub fn summary(&self) -> Result<(), CatalogError> {
        println!("\n=== GROUPING AND AGGREGATION ===");
        println!("Content by type:\n{}", frame_table(&self.type_counts)?);
        println!("\nContent by rating:\n{}", frame_table(&self.rating_counts)?);

        let last_ten = self.yearly_content.tail(Some(10));
        println!(
            "\nContent by release year (last 10 years):\n{}",
            frame_table(&last_ten)?
        );
        println!(
            "\nContent by country (top {}):\n{}",
            TOP_COUNTRIES,
            frame_table(&self.country_counts)?
        );
        Ok(())
    }
}

/// Groups by kind, rating, release year and country and counts each partition.
pub fn grouping_tasks(df: &DataFrame) -> Result<GroupedCounts, CatalogError> {
    let type_counts = count_by(df, &[columns::TYPE])?;
    let rating_counts = sort_by_count_desc(count_by(df, &[columns::RATING])?, columns::RATING)?;
    let yearly_content = count_by(df, &[columns::RELEASE_YEAR])?;
    let country_counts = sort_by_count_desc(count_by(df, &[columns::COUNTRY])?, columns::COUNTRY)?
        .head(Some(TOP_COUNTRIES as usize));

    info!(
        kinds = type_counts.height(),
        titles = count_total(&type_counts)?,
        ratings = rating_counts.height(),
        release_years = yearly_content.height(),
        "grouping tasks completed"
    );

    Ok(GroupedCounts {
        type_counts,
        rating_counts,
        yearly_content,
        country_counts,
    })
}
