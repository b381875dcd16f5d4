use polars::prelude::*;
use std::collections::BTreeMap;

use crate::analysis::{count_by, count_pairs, sort_by_count_desc, with_year_added, CrossTab};
use crate::charts::ChartKind;
use crate::config::HISTOGRAM_BINS;
use crate::record::{columns, ContentKind};
use crate::CatalogError;

/// One equal-width histogram bin, `[start, end)` (the last bin is closed).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bin {
    pub start: f64,
    pub end: f64,
    pub count: usize,
}

/// A title placed by release year against the year it was added.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScatterPoint {
    pub release_year: i64,
    pub year_added: i32,
    pub kind: Option<ContentKind>,
}

/// The small summary table behind each chart.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    /// Titles added per year.
    Line { points: Vec<(i32, i64)> },
    /// Titles added per year, one series per content kind.
    Area {
        years: Vec<i32>,
        series: Vec<(String, Vec<i64>)>,
    },
    /// Titles per rating, most frequent first.
    Bar { bars: Vec<(String, i64)> },
    Histogram { bins: Vec<Bin> },
    Scatter { points: Vec<ScatterPoint> },
    /// Titles per content kind.
    Pie { slices: Vec<(String, i64)> },
    Heatmap { table: CrossTab },
    /// Release years per content kind.
    Box { groups: Vec<(String, Vec<f64>)> },
}

impl ChartData {
    /// Derives the summary table for `kind` from the cleaned table.
    ///
    /// Fails with [`CatalogError::EmptyChart`] when nothing would be drawn.
    pub fn prepare(kind: ChartKind, df: &DataFrame) -> Result<ChartData, CatalogError> {
        let data = match kind {
            ChartKind::Line => ChartData::Line {
                points: yearly_additions(df)?,
            },
            ChartKind::Area => area_by_type(df)?,
            ChartKind::Bar => ChartData::Bar {
                bars: count_pairs(
                    &sort_by_count_desc(count_by(df, &[columns::RATING])?, columns::RATING)?,
                    columns::RATING,
                )?,
            },
            ChartKind::Histogram => ChartData::Histogram {
                bins: histogram_bins(&release_years(df)?, HISTOGRAM_BINS),
            },
            ChartKind::Scatter => ChartData::Scatter {
                points: scatter_points(df)?,
            },
            ChartKind::Pie => ChartData::Pie {
                slices: count_pairs(&count_by(df, &[columns::TYPE])?, columns::TYPE)?,
            },
            ChartKind::Heatmap => ChartData::Heatmap {
                table: CrossTab::from_counts(
                    &count_by(df, &[columns::TYPE, columns::RATING])?,
                    columns::TYPE,
                    columns::RATING,
                )?,
            },
            ChartKind::Box => ChartData::Box {
                groups: release_years_by_type(df)?,
            },
        };

        if data.is_empty() {
            return Err(CatalogError::EmptyChart(kind.name()));
        }
        Ok(data)
    }

    pub fn kind(&self) -> ChartKind {
        match self {
            ChartData::Line { .. } => ChartKind::Line,
            ChartData::Area { .. } => ChartKind::Area,
            ChartData::Bar { .. } => ChartKind::Bar,
            ChartData::Histogram { .. } => ChartKind::Histogram,
            ChartData::Scatter { .. } => ChartKind::Scatter,
            ChartData::Pie { .. } => ChartKind::Pie,
            ChartData::Heatmap { .. } => ChartKind::Heatmap,
            ChartData::Box { .. } => ChartKind::Box,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Line { points } => points.is_empty(),
            ChartData::Area { years, series } => years.is_empty() || series.is_empty(),
            ChartData::Bar { bars } => bars.is_empty(),
            ChartData::Histogram { bins } => bins.is_empty(),
            ChartData::Scatter { points } => points.is_empty(),
            ChartData::Pie { slices } => slices.iter().all(|(_, n)| *n == 0),
            ChartData::Heatmap { table } => table.is_empty(),
            ChartData::Box { groups } => groups.is_empty(),
        }
    }
}

fn yearly_additions(df: &DataFrame) -> Result<Vec<(i32, i64)>, CatalogError> {
    let counts = count_by(&with_year_added(df)?, &[columns::YEAR_ADDED])?;
    let years = counts.column(columns::YEAR_ADDED)?.cast(&DataType::Int32)?;
    let values = counts.column(columns::COUNT)?.i64()?;
    Ok(years
        .i32()?
        .into_iter()
        .zip(values.into_iter())
        .filter_map(|(y, n)| Some((y?, n?)))
        .collect())
}

fn area_by_type(df: &DataFrame) -> Result<ChartData, CatalogError> {
    let counts = count_by(&with_year_added(df)?, &[columns::YEAR_ADDED, columns::TYPE])?;
    let table = CrossTab::from_counts(&counts, columns::YEAR_ADDED, columns::TYPE)?;

    // Rows are years rendered as text; keep only the ones that parse back.
    let mut rows: Vec<(i32, &Vec<i64>)> = table
        .rows()
        .iter()
        .zip(table.counts())
        .filter_map(|(year, counts)| Some((year.parse::<i32>().ok()?, counts)))
        .collect();
    rows.sort_by_key(|(year, _)| *year);

    let years = rows.iter().map(|(year, _)| *year).collect();
    let series = table
        .cols()
        .iter()
        .enumerate()
        .map(|(j, kind)| (kind.clone(), rows.iter().map(|(_, counts)| counts[j]).collect()))
        .collect();
    Ok(ChartData::Area { years, series })
}

fn release_years(df: &DataFrame) -> Result<Vec<f64>, CatalogError> {
    let years = df.column(columns::RELEASE_YEAR)?.cast(&DataType::Float64)?;
    Ok(years.f64()?.into_iter().flatten().collect())
}

fn scatter_points(df: &DataFrame) -> Result<Vec<ScatterPoint>, CatalogError> {
    let df = with_year_added(df)?;
    let release = df.column(columns::RELEASE_YEAR)?.cast(&DataType::Int64)?;
    let added = df.column(columns::YEAR_ADDED)?.cast(&DataType::Int32)?;
    let kinds = df.column(columns::TYPE)?.str()?;

    Ok(release
        .i64()?
        .into_iter()
        .zip(added.i32()?.into_iter())
        .zip(kinds.into_iter())
        .filter_map(|((release_year, year_added), kind)| {
            Some(ScatterPoint {
                release_year: release_year?,
                year_added: year_added?,
                kind: kind.and_then(|k| k.parse().ok()),
            })
        })
        .collect())
}

fn release_years_by_type(df: &DataFrame) -> Result<Vec<(String, Vec<f64>)>, CatalogError> {
    let kinds = df.column(columns::TYPE)?.str()?;
    let years = df.column(columns::RELEASE_YEAR)?.cast(&DataType::Float64)?;

    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for (kind, year) in kinds.into_iter().zip(years.f64()?.into_iter()) {
        if let (Some(kind), Some(year)) = (kind, year) {
            groups.entry(kind.to_string()).or_default().push(year);
        }
    }
    Ok(groups.into_iter().collect())
}

/// Splits `values` into `n` equal-width bins spanning `[min, max]`.
///
/// A single distinct value is centred in a unit-wide range. The bin counts
/// always sum to `values.len()` (non-finite values are ignored).
pub fn histogram_bins(values: &[f64], n: usize) -> Vec<Bin> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.is_empty() || n == 0 {
        return Vec::new();
    }

    let mut lo = finite.iter().copied().fold(f64::INFINITY, f64::min);
    let mut hi = finite.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    if lo == hi {
        lo -= 0.5;
        hi += 0.5;
    }
    let width = (hi - lo) / n as f64;

    let mut bins: Vec<Bin> = (0..n)
        .map(|i| Bin {
            start: lo + width * i as f64,
            end: if i + 1 == n { hi } else { lo + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for v in finite {
        let idx = (((v - lo) / width).floor() as usize).min(n - 1);
        bins[idx].count += 1;
    }
    bins
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bins_cover_all_values() {
        let values: Vec<f64> = (2010..=2024).map(|y| y as f64).collect();
        let bins = histogram_bins(&values, 30);
        assert_eq!(bins.len(), 30);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), values.len());
        assert_eq!(bins[0].start, 2010.0);
        assert_eq!(bins[29].end, 2024.0);
        // The maximum lands in the closed last bin.
        assert_eq!(bins[29].count, 1);
    }

    #[test]
    fn test_single_value() {
        let bins = histogram_bins(&[2020.0, 2020.0], 4);
        assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 2);
        assert_eq!(bins[0].start, 2019.5);
        assert_eq!(bins[3].end, 2020.5);
    }

    #[test]
    fn test_empty() {
        assert!(histogram_bins(&[], 30).is_empty());
        assert!(histogram_bins(&[f64::NAN], 30).is_empty());
    }
}
