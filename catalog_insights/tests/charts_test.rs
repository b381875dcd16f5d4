use catalog_insights::cleaning::clean;
use catalog_insights::{render_all, CatalogError, ChartData, ChartKind, SampleGenerator};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashSet;

fn cleaned(rows: usize) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let records = SampleGenerator::new(rows)
        .seed(21)
        .reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .generate();
    Ok(clean(SampleGenerator::to_dataframe(&records)?)?)
}

#[test]
fn test_file_names() {
    let names: HashSet<&str> = ChartKind::ALL.iter().map(|k| k.file_name()).collect();
    assert_eq!(names.len(), 8);
    assert!(names.iter().all(|n| n.ends_with(".png")));
    assert_eq!(
        ChartKind::Heatmap.file_name(),
        "heatmap_rating_by_type.png"
    );
}

#[test]
fn test_every_chart_has_data() -> Result<(), Box<dyn std::error::Error>> {
    let df = cleaned(100)?;

    for kind in ChartKind::ALL {
        let data = ChartData::prepare(kind, &df)?;
        assert_eq!(data.kind(), kind);
        assert!(!data.is_empty(), "{} is empty", kind);

        match data {
            ChartData::Line { points } => {
                assert_eq!(points.iter().map(|p| p.1).sum::<i64>(), 100);
                assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
            }
            ChartData::Area { years, series } => {
                assert_eq!(series.len(), 2);
                assert!(series.iter().all(|(_, counts)| counts.len() == years.len()));
                let total: i64 = series.iter().flat_map(|(_, c)| c.iter()).sum();
                assert_eq!(total, 100);
            }
            ChartData::Bar { bars } => {
                assert!(bars.windows(2).all(|w| w[0].1 >= w[1].1));
                assert_eq!(bars.iter().map(|b| b.1).sum::<i64>(), 100);
            }
            ChartData::Histogram { bins } => {
                assert_eq!(bins.len(), 30);
                assert_eq!(bins.iter().map(|b| b.count).sum::<usize>(), 100);
            }
            ChartData::Scatter { points } => {
                assert_eq!(points.len(), 100);
                assert!(points.iter().all(|p| p.kind.is_some()));
            }
            ChartData::Pie { slices } => {
                assert_eq!(slices.len(), 2);
                assert_eq!(slices.iter().map(|s| s.1).sum::<i64>(), 100);
            }
            ChartData::Heatmap { table } => {
                assert_eq!(table.rows().len(), 2);
                assert_eq!(table.total(), 100);
            }
            ChartData::Box { groups } => {
                let labels: Vec<&str> = groups.iter().map(|(l, _)| l.as_str()).collect();
                assert_eq!(labels, vec!["Movie", "TV Show"]);
                assert_eq!(groups.iter().map(|(_, v)| v.len()).sum::<usize>(), 100);
            }
        }
    }
    Ok(())
}

#[test]
fn test_empty_table_has_nothing_to_plot() -> Result<(), Box<dyn std::error::Error>> {
    let empty = cleaned(10)?.head(Some(0));

    for kind in [ChartKind::Bar, ChartKind::Histogram, ChartKind::Pie] {
        let err = ChartData::prepare(kind, &empty).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyChart(_)), "{}: {}", kind, err);
    }
    Ok(())
}

#[test]
fn test_render_all_writes_every_png() -> Result<(), Box<dyn std::error::Error>> {
    let df = cleaned(100)?;
    let dir = tempfile::tempdir()?;

    let report = render_all(&df, dir.path())?;
    assert!(report.is_complete(), "failed: {:?}", report.failed);
    assert_eq!(report.written.len(), ChartKind::ALL.len());

    for kind in ChartKind::ALL {
        let path = dir.path().join(kind.file_name());
        assert!(report.written.contains(&path), "{} missing", kind);
        assert!(std::fs::metadata(&path)?.len() > 0, "{} is empty", kind);
    }
    Ok(())
}

#[test]
fn test_failing_chart_does_not_stop_the_rest() -> Result<(), Box<dyn std::error::Error>> {
    let mut df = cleaned(100)?;
    let rows = df.height();
    df.with_column(Series::full_null("date_added".into(), rows, &DataType::Date))?;
    let dir = tempfile::tempdir()?;

    let report = render_all(&df, dir.path())?;

    let failed: Vec<ChartKind> = report.failed.iter().map(|(kind, _)| *kind).collect();
    assert_eq!(
        failed,
        vec![ChartKind::Line, ChartKind::Area, ChartKind::Scatter]
    );
    assert_eq!(report.written.len(), ChartKind::ALL.len() - failed.len());
    for kind in ChartKind::ALL {
        let path = dir.path().join(kind.file_name());
        assert_eq!(path.is_file(), !failed.contains(&kind), "{}", kind);
    }
    Ok(())
}
