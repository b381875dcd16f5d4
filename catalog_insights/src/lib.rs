//! Descriptive statistics and charts over a streaming-catalog titles dataset.
//!
//! The crate is a short sequential pipeline: a synthetic dataset is generated
//! (or fetched), loaded into a polars `DataFrame`, cleaned, queried with a
//! handful of filter/group/aggregate operations, written back out as CSV files
//! and finally rendered as eight PNG charts.
//!
//! # Example
//!
//! ```ignore
//! use catalog_insights::{analysis, cleaning, SampleGenerator};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let records = SampleGenerator::new(100).seed(7).generate();
//!     let df = SampleGenerator::to_dataframe(&records)?;
//!     let df = cleaning::clean(df)?;
//!
//!     let grouped = analysis::grouping_tasks(&df)?;
//!     grouped.summary()?;
//!     Ok(())
//! }
//! ```

use plotters::drawing::DrawingAreaErrorKind;
use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

pub mod analysis;
pub mod charts;
pub mod cleaning;
pub mod config;
pub mod explore;
pub mod generator;
pub mod loader;
pub mod persist;
pub mod pipeline;
pub mod record;

pub use crate::analysis::{
    aggregation_tasks, filtering_tasks, grouping_tasks, Aggregates, AnalysisSummary, CrossTab,
    FilteredSubsets, GroupedCounts,
};
pub use crate::charts::{render_all, ChartData, ChartKind, RenderReport};
pub use crate::config::PipelineConfig;
pub use crate::explore::DatasetOverview;
pub use crate::generator::SampleGenerator;
pub use crate::loader::{download_dataset, load_dataset, FetchOutcome};
pub use crate::persist::save_processed_data;
pub use crate::pipeline::{Analyzer, Visualizer};
pub use crate::record::{ContentKind, ContentRecord, Duration};

/// Error type for the `catalog_insights` library.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Wraps a `PolarsError`.
    #[error("Polars error: {0}")]
    Polars(#[from] PolarsError),
    /// Wraps a filesystem error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The remote dataset could not be fetched.
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),
    /// The dataset file does not exist on disk.
    #[error("Dataset file not found: {}", .0.display())]
    DatasetMissing(PathBuf),
    /// A drawing backend failed while rendering a chart.
    #[error("Chart error: {0}")]
    Chart(String),
    /// The summary table behind a chart has no rows to plot.
    #[error("Nothing to plot for {0}")]
    EmptyChart(&'static str),
    /// A value could not be interpreted (e.g. an unknown content kind).
    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for CatalogError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        CatalogError::Chart(err.to_string())
    }
}
