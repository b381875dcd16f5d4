//! The two end-to-end stages: analysis and visualization.

use polars::prelude::DataFrame;
use tracing::{info, warn};

use crate::analysis::{aggregation_tasks, filtering_tasks, grouping_tasks, AnalysisSummary};
use crate::charts::{render_all, ChartKind, RenderReport};
use crate::cleaning::clean;
use crate::config::PipelineConfig;
use crate::explore::DatasetOverview;
use crate::loader::{download_dataset, load_dataset, FetchOutcome};
use crate::persist::save_processed_data;
use crate::CatalogError;

/// Loads `config`'s dataset, mapping a missing file to `None`.
fn load_or_report(config: &PipelineConfig, hint: &str) -> Result<Option<DataFrame>, CatalogError> {
    match load_dataset(config.dataset()) {
        Ok(df) => Ok(Some(df)),
        Err(CatalogError::DatasetMissing(path)) => {
            warn!(path = %path.display(), "no dataset to work on");
            println!("{}", hint);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Runs every descriptive query over the dataset and saves the derived tables.
#[derive(Debug, Clone, Default)]
pub struct Analyzer {
    config: PipelineConfig,
}

impl Analyzer {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Fetches the dataset unless it is on disk or the config is offline.
    pub fn download_dataset(&self) -> Option<FetchOutcome> {
        if self.config.is_offline() {
            info!("offline mode, skipping dataset download");
            return None;
        }
        Some(download_dataset(self.config.dataset(), self.config.url()))
    }

    /// Loads the dataset, or `None` (after telling the user) when it is absent.
    pub fn load_data(&self) -> Result<Option<DataFrame>, CatalogError> {
        let loaded = load_or_report(
            &self.config,
            "Dataset file not found. Please run download_dataset() first.",
        )?;
        if let Some(df) = &loaded {
            println!("Dataset loaded successfully! Shape: {:?}", df.shape());
        }
        Ok(loaded)
    }

    /// Download → load → explore → clean → filter → group → aggregate → save.
    ///
    /// Returns `Ok(None)` when no dataset could be loaded; nothing is written
    /// in that case.
    pub fn run_analysis(&self) -> Result<Option<AnalysisSummary>, CatalogError> {
        println!("=== NETFLIX DATA ANALYSIS ===");

        self.download_dataset();
        let Some(raw) = self.load_data()? else {
            return Ok(None);
        };

        DatasetOverview::from_frame(&raw).summary();
        let df = clean(raw)?;

        let filtered = filtering_tasks(&df)?;
        filtered.summary();
        let grouped = grouping_tasks(&df)?;
        grouped.summary()?;
        let aggregates = aggregation_tasks(&df)?;
        aggregates.summary()?;

        let written = save_processed_data(&df, self.config.out_dir())?;
        info!(files = written.len(), "analysis finished");

        println!("\n=== DATA ANALYSIS COMPLETED ===");
        println!("All analysis tasks completed successfully!");
        println!("Check the generated CSV files for processed data.");

        Ok(Some(AnalysisSummary::new(
            &df,
            &filtered,
            &grouped,
            &aggregates,
        )?))
    }
}

/// Draws the eight standard charts from the dataset.
#[derive(Debug, Clone, Default)]
pub struct Visualizer {
    config: PipelineConfig,
}

impl Visualizer {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Loads and cleans the dataset, or `None` when it is absent.
    pub fn load_data(&self) -> Result<Option<DataFrame>, CatalogError> {
        let Some(raw) = load_or_report(
            &self.config,
            "Please run the analysis first to generate the dataset.",
        )?
        else {
            return Ok(None);
        };
        let df = clean(raw)?;
        println!("Data loaded successfully!");
        Ok(Some(df))
    }

    /// Renders every chart into the output directory and lists the files.
    ///
    /// A chart that fails to render is logged and left out; the rest are
    /// still produced. Returns `Ok(None)` when there is no dataset.
    pub fn create_all_visualizations(&self) -> Result<Option<RenderReport>, CatalogError> {
        let Some(df) = self.load_data()? else {
            return Ok(None);
        };

        println!("=== CREATING ALL DATA VISUALIZATIONS ===");
        let report = render_all(&df, self.config.out_dir())?;

        println!("\n=== ALL VISUALIZATIONS COMPLETED ===");
        println!(
            "Charts have been saved as PNG files in {}",
            self.config.out_dir().display()
        );
        println!("Generated files:");
        for path in &report.written {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            println!("- {}", name);
        }
        if !report.is_complete() {
            warn!(
                failed = report.failed.len(),
                expected = ChartKind::ALL.len(),
                "some charts were not produced"
            );
        }
        Ok(Some(report))
    }
}
