//! Fixed file names, the fallback dataset URL and the pipeline configuration.

use std::path::{Path, PathBuf};

/// File the generator writes and every later stage reads.
pub const DATASET_FILE: &str = "netflix_titles.csv";

/// Fallback source used when no local dataset exists.
pub const DATASET_URL: &str =
    "https://raw.githubusercontent.com/krishnaik06/Netflix-Data-Analysis/master/netflix_titles.csv";

/// Number of records produced by the generator unless told otherwise.
pub const DEFAULT_ROWS: usize = 100;

/// Sentinel written into missing text fields during cleaning.
pub const UNKNOWN: &str = "Unknown";

/// Format of the `date_added` column, e.g. `"September 25, 2021"`.
pub const DATE_FORMAT: &str = "%B %d, %Y";

pub const RECENT_RELEASE_AFTER: i64 = 2010;
pub const US_COUNTRY: &str = "United States";
pub const TOP_COUNTRIES: u32 = 10;
pub const HISTOGRAM_BINS: usize = 30;

/// Output file names for the filtered subsets.
pub const RECENT_MOVIES_FILE: &str = "recent_movies.csv";
pub const MULTI_SEASON_FILE: &str = "multi_season_shows.csv";
pub const US_CONTENT_FILE: &str = "us_content.csv";

/// Output file names for the grouped counts.
pub const TYPE_COUNTS_FILE: &str = "type_counts.csv";
pub const RATING_COUNTS_FILE: &str = "rating_counts.csv";
pub const YEARLY_CONTENT_FILE: &str = "yearly_content.csv";
pub const COUNTRY_COUNTS_FILE: &str = "country_counts.csv";

/// Where each stage reads from and writes to.
///
/// `Default` reproduces the fixed literals: everything lives in the current
/// directory and the fallback dataset is fetched when the file is missing.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    dataset_path: PathBuf,
    output_dir: PathBuf,
    dataset_url: String,
    offline: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from(DATASET_FILE),
            output_dir: PathBuf::from("."),
            dataset_url: DATASET_URL.to_string(),
            offline: false,
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dataset CSV path.
    pub fn dataset_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.dataset_path = path.into();
        self
    }

    /// Sets the directory derived CSVs and charts are written to.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// Overrides the fallback dataset URL.
    pub fn dataset_url(mut self, url: &str) -> Self {
        self.dataset_url = url.to_string();
        self
    }

    /// Disables the network fetch of the fallback dataset.
    pub fn offline(mut self, offline: bool) -> Self {
        self.offline = offline;
        self
    }

    pub fn dataset(&self) -> &Path {
        &self.dataset_path
    }

    pub fn out_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn url(&self) -> &str {
        &self.dataset_url
    }

    pub fn is_offline(&self) -> bool {
        self.offline
    }

    /// Resolves a fixed output file name inside the output directory.
    pub fn output_path(&self, file_name: &str) -> PathBuf {
        self.output_dir.join(file_name)
    }
}
