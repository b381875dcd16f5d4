//! The eight standard charts.
//!
//! Each chart is produced in two steps: [`ChartData::prepare`] reshapes a
//! grouped count or mean table into the series the chart needs, then
//! [`render`] draws that series to a PNG with plotters.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use polars::prelude::DataFrame;
use tracing::{error, info};

use crate::CatalogError;

mod data;
mod render;

pub use crate::charts::data::{histogram_bins, Bin, ChartData, ScatterPoint};
pub use crate::charts::render::render;

/// One of the eight chart types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChartKind {
    Line,
    Area,
    Bar,
    Histogram,
    Scatter,
    Pie,
    Heatmap,
    Box,
}

impl ChartKind {
    pub const ALL: [ChartKind; 8] = [
        ChartKind::Line,
        ChartKind::Area,
        ChartKind::Bar,
        ChartKind::Histogram,
        ChartKind::Scatter,
        ChartKind::Pie,
        ChartKind::Heatmap,
        ChartKind::Box,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ChartKind::Line => "Line Chart",
            ChartKind::Area => "Area Chart",
            ChartKind::Bar => "Bar Chart",
            ChartKind::Histogram => "Histogram",
            ChartKind::Scatter => "Scatter Plot",
            ChartKind::Pie => "Pie Chart",
            ChartKind::Heatmap => "Heatmap",
            ChartKind::Box => "Box Plot",
        }
    }

    /// Fixed output file name.
    pub fn file_name(&self) -> &'static str {
        match self {
            ChartKind::Line => "line_chart_content_over_time.png",
            ChartKind::Area => "area_chart_content_type_distribution.png",
            ChartKind::Bar => "bar_chart_content_by_rating.png",
            ChartKind::Histogram => "histogram_release_year_distribution.png",
            ChartKind::Scatter => "scatter_plot_release_vs_added.png",
            ChartKind::Pie => "pie_chart_content_type_distribution.png",
            ChartKind::Heatmap => "heatmap_rating_by_type.png",
            ChartKind::Box => "box_plot_release_year_by_type.png",
        }
    }

    /// Caption drawn above the chart.
    pub fn title(&self) -> &'static str {
        match self {
            ChartKind::Line => "Netflix Content Added Over Time",
            ChartKind::Area => "Netflix Content Type Distribution Over Time",
            ChartKind::Bar => "Netflix Content by Rating",
            ChartKind::Histogram => "Distribution of Netflix Content Release Years",
            ChartKind::Scatter => "Release Year vs Year Added to Netflix",
            ChartKind::Pie => "Netflix Content Type Distribution",
            ChartKind::Heatmap => "Rating Distribution by Content Type",
            ChartKind::Box => "Release Year Distribution by Content Type",
        }
    }

    fn subject(&self) -> &'static str {
        match self {
            ChartKind::Line => "Content Added Over Time",
            ChartKind::Area => "Content Type Distribution Over Time",
            ChartKind::Bar => "Content by Rating",
            ChartKind::Histogram => "Release Year Distribution",
            ChartKind::Scatter => "Release Year vs Year Added",
            ChartKind::Pie => "Content Type Distribution",
            ChartKind::Heatmap => "Rating Distribution by Type",
            ChartKind::Box => "Release Year by Content Type",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Outcome of [`render_all`].
#[derive(Debug, Default)]
pub struct RenderReport {
    pub written: Vec<PathBuf>,
    pub failed: Vec<(ChartKind, String)>,
}

impl RenderReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Prepares and renders one chart into `out_dir`, returning the file written.
pub fn render_chart(
    kind: ChartKind,
    df: &DataFrame,
    out_dir: &Path,
) -> Result<PathBuf, CatalogError> {
    let data = ChartData::prepare(kind, df)?;
    let path = out_dir.join(kind.file_name());
    render(&data, &path)?;
    Ok(path)
}

/// Renders every chart. A chart that fails is logged and skipped; the others
/// are still drawn.
pub fn render_all(df: &DataFrame, out_dir: &Path) -> Result<RenderReport, CatalogError> {
    fs::create_dir_all(out_dir)?;

    let mut report = RenderReport::default();
    for kind in ChartKind::ALL {
        println!("Creating {}: {}", kind.name(), kind.subject());
        match render_chart(kind, df, out_dir) {
            Ok(path) => {
                info!(chart = %kind, path = %path.display(), "chart saved");
                report.written.push(path);
            }
            Err(e) => {
                error!(chart = %kind, "chart failed: {}", e);
                report.failed.push((kind, e.to_string()));
            }
        }
    }
    Ok(report)
}
