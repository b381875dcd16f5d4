//! Drawing the prepared chart data with plotters.

use plotters::coord::ranged1d::SegmentValue;
use plotters::data::Quartiles;
use plotters::element::{Boxplot, Pie};
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::Path;

use crate::analysis::CrossTab;
use crate::charts::data::{Bin, ChartData, ScatterPoint};
use crate::charts::ChartKind;
use crate::record::ContentKind;
use crate::CatalogError;

const WIDE: (u32, u32) = (1200, 600);
const SQUARE: (u32, u32) = (1000, 800);
const FONT: &str = "sans-serif";
const CAPTION_SIZE: u32 = 28;
const AXIS_DESC_SIZE: u32 = 18;

/// Qualitative palette for categorical series.
const PALETTE: [RGBColor; 10] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(140, 86, 75),
    RGBColor(227, 119, 194),
    RGBColor(127, 127, 127),
    RGBColor(188, 189, 34),
    RGBColor(23, 190, 207),
];

const MOVIE_COLOR: RGBColor = RGBColor(31, 119, 180);
const SHOW_COLOR: RGBColor = RGBColor(214, 39, 40);
const OTHER_COLOR: RGBColor = RGBColor(127, 127, 127);

/// Stops of the yellow-orange-red scale used by the heatmap.
const HEAT_STOPS: [(u8, u8, u8); 3] = [(255, 255, 204), (253, 141, 60), (189, 0, 38)];

fn palette(i: usize) -> RGBColor {
    PALETTE[i % PALETTE.len()]
}

fn kind_color(kind: Option<ContentKind>) -> RGBColor {
    match kind {
        Some(ContentKind::Movie) => MOVIE_COLOR,
        Some(ContentKind::TvShow) => SHOW_COLOR,
        None => OTHER_COLOR,
    }
}

/// Linear interpolation along [`HEAT_STOPS`], `t` clamped to `[0, 1]`.
fn heat_color(t: f64) -> RGBColor {
    let t = t.clamp(0.0, 1.0) * (HEAT_STOPS.len() - 1) as f64;
    let i = (t.floor() as usize).min(HEAT_STOPS.len() - 2);
    let f = t - i as f64;
    let (a, b) = (HEAT_STOPS[i], HEAT_STOPS[i + 1]);
    let mix = |x: u8, y: u8| (x as f64 + (y as f64 - x as f64) * f).round() as u8;
    RGBColor(mix(a.0, b.0), mix(a.1, b.1), mix(a.2, b.2))
}

/// Pads the top of a count axis so the tallest mark is not clipped.
fn count_ceiling(max: i64) -> f64 {
    (max.max(1) as f64) * 1.15
}

fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

/// Draws `data` to a PNG at `path`.
pub fn render(data: &ChartData, path: &Path) -> Result<(), CatalogError> {
    if data.is_empty() {
        return Err(CatalogError::EmptyChart(data.kind().name()));
    }
    match data {
        ChartData::Line { points } => draw_line(points, path),
        ChartData::Area { years, series } => draw_area(years, series, path),
        ChartData::Bar { bars } => draw_bar(bars, path),
        ChartData::Histogram { bins } => draw_histogram(bins, path),
        ChartData::Scatter { points } => draw_scatter(points, path),
        ChartData::Pie { slices } => draw_pie(slices, path),
        ChartData::Heatmap { table } => draw_heatmap(table, path),
        ChartData::Box { groups } => draw_box(groups, path),
    }
}

fn draw_line(points: &[(i32, i64)], path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = points.iter().map(|p| p.0).min().unwrap_or(0);
    let x_max = points.iter().map(|p| p.0).max().unwrap_or(0);
    let y_max = count_ceiling(points.iter().map(|p| p.1).max().unwrap_or(0));

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Line.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min - 1..x_max + 1, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Titles Added")
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(LineSeries::new(
        points.iter().map(|&(x, y)| (x, y as f64)),
        MOVIE_COLOR.stroke_width(2),
    ))?;
    chart.draw_series(
        points
            .iter()
            .map(|&(x, y)| Circle::new((x, y as f64), 5, MOVIE_COLOR.filled())),
    )?;

    root.present()?;
    Ok(())
}

fn draw_area(
    years: &[i32],
    series: &[(String, Vec<i64>)],
    path: &Path,
) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    // Running totals, so layer k sits on top of layers 0..k.
    let mut stacked: Vec<Vec<i64>> = Vec::with_capacity(series.len());
    for (_, counts) in series {
        let layer = match stacked.last() {
            Some(below) => below.iter().zip(counts).map(|(b, c)| b + c).collect(),
            None => counts.clone(),
        };
        stacked.push(layer);
    }

    let x_min = years.iter().copied().min().unwrap_or(0);
    let x_max = years.iter().copied().max().unwrap_or(0);
    let y_max = count_ceiling(
        stacked
            .last()
            .and_then(|top| top.iter().copied().max())
            .unwrap_or(0),
    );

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Area.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max.max(x_min + 1), 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Year")
        .y_desc("Number of Titles")
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    // Topmost layer first so each lower layer paints over the one above it.
    for (k, ((name, _), layer)) in series.iter().zip(&stacked).enumerate().rev() {
        let color = palette(k);
        chart
            .draw_series(
                AreaSeries::new(
                    years.iter().zip(layer).map(|(&x, &y)| (x, y as f64)),
                    0.0,
                    color.mix(0.7).filled(),
                )
                .border_style(color.stroke_width(1)),
            )?
            .label(name.as_str())
            .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 16, y + 6)], color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::UpperLeft)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_bar(bars: &[(String, i64)], path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    let labels: Vec<String> = bars.iter().map(|(label, _)| label.clone()).collect();
    let max = bars.iter().map(|(_, n)| *n).max().unwrap_or(0);
    let y_max = count_ceiling(max);
    let n = bars.len() as i32;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Bar.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d((0..n).into_segmented(), 0f64..y_max)?;

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(bars.len())
        .x_label_formatter(&|v| segment_label(&labels, v))
        .x_desc("Rating")
        .y_desc("Number of Titles")
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
        let x = i as i32;
        let mut bar = Rectangle::new(
            [
                (SegmentValue::Exact(x), 0.0),
                (SegmentValue::Exact(x + 1), *count as f64),
            ],
            palette(i).filled(),
        );
        bar.set_margin(0, 0, 8, 8);
        bar
    }))?;

    let label_style = TextStyle::from((FONT, 16).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    let pad = max as f64 * 0.01;
    chart.draw_series(bars.iter().enumerate().map(|(i, (_, count))| {
        Text::new(
            count.to_string(),
            (SegmentValue::CenterOf(i as i32), *count as f64 + pad),
            label_style.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_histogram(bins: &[Bin], path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    let x_min = bins.first().map(|b| b.start).unwrap_or(0.0);
    let x_max = bins.last().map(|b| b.end).unwrap_or(1.0);
    let y_max = count_ceiling(bins.iter().map(|b| b.count as i64).max().unwrap_or(0));

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Histogram.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, 0f64..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Release Year")
        .y_desc("Frequency")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(bins.iter().map(|b| {
        Rectangle::new(
            [(b.start, 0.0), (b.end, b.count as f64)],
            MOVIE_COLOR.mix(0.7).filled(),
        )
    }))?;
    chart.draw_series(bins.iter().filter(|b| b.count > 0).map(|b| {
        Rectangle::new([(b.start, 0.0), (b.end, b.count as f64)], BLACK.stroke_width(1))
    }))?;

    root.present()?;
    Ok(())
}

fn draw_scatter(points: &[ScatterPoint], path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    let span = |values: Vec<f64>| -> (f64, f64) {
        let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        (lo - 1.0, hi + 1.0)
    };
    let (x_lo, x_hi) = span(points.iter().map(|p| p.release_year as f64).collect());
    let (y_lo, y_hi) = span(points.iter().map(|p| p.year_added as f64).collect());

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Scatter.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc("Release Year")
        .y_desc("Year Added to Netflix")
        .x_label_formatter(&|x| format!("{:.0}", x))
        .y_label_formatter(&|y| format!("{:.0}", y))
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    let others = points.iter().filter(|p| p.kind.is_none());
    chart.draw_series(others.map(|p| {
        Circle::new(
            (p.release_year as f64, p.year_added as f64),
            4,
            OTHER_COLOR.mix(0.6).filled(),
        )
    }))?;

    for kind in ContentKind::ALL {
        let color = kind_color(Some(kind));
        chart
            .draw_series(points.iter().filter(|p| p.kind == Some(kind)).map(|p| {
                Circle::new(
                    (p.release_year as f64, p.year_added as f64),
                    4,
                    color.mix(0.6).filled(),
                )
            }))?
            .label(kind.as_str())
            .legend(move |(x, y)| Circle::new((x + 8, y), 5, color.filled()));
    }

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

fn draw_pie(slices: &[(String, i64)], path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, SQUARE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(ChartKind::Pie.title(), (FONT, CAPTION_SIZE))?;

    let (width, height) = root.dim_in_pixel();
    let center = (width as i32 / 2, height as i32 / 2);
    let radius = width.min(height) as f64 * 0.35;

    let sizes: Vec<f64> = slices.iter().map(|(_, n)| *n as f64).collect();
    let labels: Vec<&str> = slices.iter().map(|(label, _)| label.as_str()).collect();
    let colors: Vec<RGBColor> = slices
        .iter()
        .enumerate()
        .map(|(i, (label, _))| match label.parse::<ContentKind>() {
            Ok(kind) => kind_color(Some(kind)),
            Err(_) => palette(i + 2),
        })
        .collect();

    let mut pie = Pie::new(&center, &radius, &sizes, &colors, &labels);
    pie.start_angle(90.0);
    pie.label_style((FONT, 22).into_font().color(&BLACK));
    pie.percentages((FONT, 20).into_font().color(&WHITE));
    root.draw(&pie)?;

    root.present()?;
    Ok(())
}

fn draw_heatmap(table: &CrossTab, path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    let rows = table.rows().to_vec();
    let cols = table.cols().to_vec();
    let max = table.max().max(1) as f64;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Heatmap.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(90)
        .build_cartesian_2d(
            (0..cols.len() as i32).into_segmented(),
            (0..rows.len() as i32).into_segmented(),
        )?;

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(cols.len())
        .y_labels(rows.len())
        .x_label_formatter(&|v| segment_label(&cols, v))
        .y_label_formatter(&|v| segment_label(&rows, v))
        .x_desc("Rating")
        .y_desc("Content Type")
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .draw()?;

    let cells: Vec<(i32, i32, i64)> = table
        .counts()
        .iter()
        .enumerate()
        .flat_map(|(i, row)| {
            row.iter()
                .enumerate()
                .map(move |(j, n)| (i as i32, j as i32, *n))
        })
        .collect();

    chart.draw_series(cells.iter().map(|&(i, j, n)| {
        Rectangle::new(
            [
                (SegmentValue::Exact(j), SegmentValue::Exact(i)),
                (SegmentValue::Exact(j + 1), SegmentValue::Exact(i + 1)),
            ],
            heat_color(n as f64 / max).filled(),
        )
    }))?;

    let annotation = TextStyle::from((FONT, 18).into_font())
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Center));
    chart.draw_series(cells.iter().map(|&(i, j, n)| {
        Text::new(
            n.to_string(),
            (SegmentValue::CenterOf(j), SegmentValue::CenterOf(i)),
            annotation.clone(),
        )
    }))?;

    root.present()?;
    Ok(())
}

fn draw_box(groups: &[(String, Vec<f64>)], path: &Path) -> Result<(), CatalogError> {
    let root = BitMapBackend::new(path, WIDE).into_drawing_area();
    root.fill(&WHITE)?;

    let groups: Vec<&(String, Vec<f64>)> = groups.iter().filter(|(_, v)| !v.is_empty()).collect();
    let labels: Vec<String> = groups.iter().map(|(label, _)| label.clone()).collect();
    let quartiles: Vec<Quartiles> = groups.iter().map(|(_, v)| Quartiles::new(v)).collect();

    let all = groups.iter().flat_map(|(_, v)| v.iter().copied());
    let lo = all.clone().fold(f64::INFINITY, f64::min) as f32;
    let hi = all.fold(f64::NEG_INFINITY, f64::max) as f32;

    let mut chart = ChartBuilder::on(&root)
        .caption(ChartKind::Box.title(), (FONT, CAPTION_SIZE))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(60)
        .build_cartesian_2d(labels[..].into_segmented(), lo - 1.0..hi + 1.0)?;

    chart
        .configure_mesh()
        .x_desc("Content Type")
        .y_desc("Release Year")
        .y_label_formatter(&|y| format!("{:.0}", y))
        .axis_desc_style((FONT, AXIS_DESC_SIZE))
        .light_line_style(BLACK.mix(0.05))
        .draw()?;

    chart.draw_series(labels.iter().zip(&quartiles).map(|(label, q)| {
        let color = label
            .parse::<ContentKind>()
            .map(|k| kind_color(Some(k)))
            .unwrap_or(OTHER_COLOR);
        Boxplot::new_vertical(SegmentValue::CenterOf(label), q)
            .width(60)
            .whisker_width(0.5)
            .style(color.stroke_width(2))
    }))?;

    root.present()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heat_color_endpoints() {
        assert_eq!(heat_color(0.0), RGBColor(255, 255, 204));
        assert_eq!(heat_color(0.5), RGBColor(253, 141, 60));
        assert_eq!(heat_color(1.0), RGBColor(189, 0, 38));
        assert_eq!(heat_color(7.0), heat_color(1.0));
    }

    #[test]
    fn test_segment_label() {
        let labels = vec!["PG".to_string(), "R".to_string()];
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(1)), "R");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(5)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::Last), "");
    }
}
