use getset::Getters;
use polars::prelude::*;
use tracing::info;

use crate::config::{RECENT_RELEASE_AFTER, US_COUNTRY};
use crate::record::{columns, ContentKind, Duration};
use crate::CatalogError;

/// The three row subsets selected by [`filtering_tasks`].
#[derive(Debug, Clone, Getters)]
#[getset(get = "pub")]
pub struct FilteredSubsets {
    /// Movies released after 2010.
    recent_movies: DataFrame,
    /// Series running for more than one season.
    multi_season_shows: DataFrame,
    /// Titles whose country list mentions the United States.
    us_content: DataFrame,
}

impl FilteredSubsets {
    pub fn summary(&self) {
        println!("\n=== FILTERING TASKS ===");
        println!(
            "Movies released after {}: {}",
            RECENT_RELEASE_AFTER,
            self.recent_movies.height()
        );
        println!(
            "TV Shows with multiple seasons: {}",
            self.multi_season_shows.height()
        );
        println!("US content: {}", self.us_content.height());
    }
}

/// Selects recent movies, multi-season shows and US content.
pub fn filtering_tasks(df: &DataFrame) -> Result<FilteredSubsets, CatalogError> {
    let recent_movies = df
        .clone()
        .lazy()
        .filter(
            col(columns::TYPE)
                .eq(lit(ContentKind::Movie.as_str()))
                .and(col(columns::RELEASE_YEAR).gt(lit(RECENT_RELEASE_AFTER))),
        )
        .collect()?;

    let kinds = df.column(columns::TYPE)?.str()?;
    let durations = df.column(columns::DURATION)?.str()?;
    let multi_season_mask: BooleanChunked = kinds
        .into_iter()
        .zip(durations.into_iter())
        .map(|(kind, duration)| {
            kind == Some(ContentKind::TvShow.as_str())
                && duration
                    .and_then(Duration::parse)
                    .and_then(|d| d.seasons())
                    .is_some_and(|n| n > 1)
        })
        .collect();
    let multi_season_shows = df.filter(&multi_season_mask)?;

    let us_mask: BooleanChunked = df
        .column(columns::COUNTRY)?
        .str()?
        .into_iter()
        .map(|country| country.is_some_and(|c| c.contains(US_COUNTRY)))
        .collect();
    let us_content = df.filter(&us_mask)?;

    info!(
        recent_movies = recent_movies.height(),
        multi_season_shows = multi_season_shows.height(),
        us_content = us_content.height(),
        "filtering tasks completed"
    );

    Ok(FilteredSubsets {
        recent_movies,
        multi_season_shows,
        us_content,
    })
}
