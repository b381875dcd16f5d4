//! Writing the derived tables back out as CSV.

use polars::prelude::DataFrame;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::analysis::{filtering_tasks, grouping_tasks};
use crate::config::{
    COUNTRY_COUNTS_FILE, MULTI_SEASON_FILE, RATING_COUNTS_FILE, RECENT_MOVIES_FILE,
    TYPE_COUNTS_FILE, US_CONTENT_FILE, YEARLY_CONTENT_FILE,
};
use crate::generator::write_frame;
use crate::CatalogError;

/// Recomputes the filtered subsets and grouped counts of `df` and writes each
/// to its fixed file name under `out_dir`. Returns the paths written, in order.
pub fn save_processed_data(df: &DataFrame, out_dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    println!("\n=== SAVING PROCESSED DATA ===");
    fs::create_dir_all(out_dir)?;

    let filtered = filtering_tasks(df)?;
    let grouped = grouping_tasks(df)?;

    let outputs: [(&str, &DataFrame); 7] = [
        (RECENT_MOVIES_FILE, filtered.recent_movies()),
        (MULTI_SEASON_FILE, filtered.multi_season_shows()),
        (US_CONTENT_FILE, filtered.us_content()),
        (TYPE_COUNTS_FILE, grouped.type_counts()),
        (RATING_COUNTS_FILE, grouped.rating_counts()),
        (YEARLY_CONTENT_FILE, grouped.yearly_content()),
        (COUNTRY_COUNTS_FILE, grouped.country_counts()),
    ];

    let mut written = Vec::with_capacity(outputs.len());
    for (file_name, frame) in outputs {
        let path = out_dir.join(file_name);
        write_frame(&mut frame.clone(), &path)?;
        info!(rows = frame.height(), path = %path.display(), "table saved");
        written.push(path);
    }

    println!("Processed data saved successfully!");
    Ok(written)
}
