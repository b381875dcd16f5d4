use catalog_insights::analysis::{count_by, count_pairs, count_total, with_year_added};
use catalog_insights::cleaning::clean;
use catalog_insights::{
    aggregation_tasks, filtering_tasks, grouping_tasks, AnalysisSummary, SampleGenerator,
};
use chrono::NaiveDate;
use polars::prelude::*;
use serde_json::Value;

fn catalog() -> Result<DataFrame, Box<dyn std::error::Error>> {
    let df = df!(
        "type" => &["Movie", "Movie", "TV Show", "TV Show", "Movie"],
        "country" => &[
            Some("United States"),
            Some("Spain"),
            Some("United States, Canada"),
            Some("Japan"),
            None,
        ],
        "date_added" => &[
            "March 04, 2021",
            "July 19, 2022",
            "January 02, 2022",
            "October 10, 2023",
            "May 30, 2022",
        ],
        "release_year" => &[2015i64, 2010, 2020, 2012, 2022],
        "rating" => &[Some("PG"), Some("R"), Some("PG"), Some("TV-MA"), Some("R")],
        "duration" => &["90 min", "100 min", "1 Season", "3 Seasons", "120 min"]
    )?;
    Ok(clean(df)?)
}

fn generated(rows: usize) -> Result<DataFrame, Box<dyn std::error::Error>> {
    let records = SampleGenerator::new(rows)
        .seed(11)
        .reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .generate();
    Ok(clean(SampleGenerator::to_dataframe(&records)?)?)
}

#[test]
fn test_filters() -> Result<(), Box<dyn std::error::Error>> {
    let subsets = filtering_tasks(&catalog()?)?;

    let recent = subsets.recent_movies().column("release_year")?.i64()?;
    assert_eq!(recent.into_iter().flatten().collect::<Vec<_>>(), vec![2015, 2022]);

    let shows = subsets.multi_season_shows().column("duration")?.str()?;
    assert_eq!(shows.into_iter().flatten().collect::<Vec<_>>(), vec!["3 Seasons"]);

    // "Unknown" (the filled null) does not mention the United States.
    assert_eq!(subsets.us_content().height(), 2);
    Ok(())
}

#[test]
fn test_grouping_orders() -> Result<(), Box<dyn std::error::Error>> {
    let grouped = grouping_tasks(&catalog()?)?;

    assert_eq!(
        count_pairs(grouped.type_counts(), "type")?,
        vec![("Movie".to_string(), 3), ("TV Show".to_string(), 2)]
    );
    // Ties on count fall back to the key.
    assert_eq!(
        count_pairs(grouped.rating_counts(), "rating")?,
        vec![
            ("PG".to_string(), 2),
            ("R".to_string(), 2),
            ("TV-MA".to_string(), 1)
        ]
    );
    let years: Vec<i64> = grouped
        .yearly_content()
        .column("release_year")?
        .i64()?
        .into_iter()
        .flatten()
        .collect();
    assert_eq!(years, vec![2010, 2012, 2015, 2020, 2022]);
    Ok(())
}

#[test]
fn test_generated_type_counts_sum_to_rows() -> Result<(), Box<dyn std::error::Error>> {
    let grouped = grouping_tasks(&generated(100)?)?;

    assert_eq!(grouped.type_counts().height(), 2);
    assert_eq!(count_total(grouped.type_counts())?, 100);

    let countries = count_pairs(grouped.country_counts(), "country")?;
    assert!(countries.len() <= 10);
    assert!(countries.windows(2).all(|w| w[0].1 >= w[1].1));
    Ok(())
}

#[test]
fn test_null_keys_are_dropped() -> Result<(), Box<dyn std::error::Error>> {
    let df = df!(
        "rating" => &[Some("PG"), None, Some("PG"), None]
    )?;
    let counts = count_by(&df, &["rating"])?;
    assert_eq!(count_pairs(&counts, "rating")?, vec![("PG".to_string(), 2)]);
    Ok(())
}

#[test]
fn test_aggregates() -> Result<(), Box<dyn std::error::Error>> {
    let df = catalog()?;
    let aggregates = aggregation_tasks(&df)?;

    let means = aggregates.mean_release_years()?;
    assert_eq!(means.len(), 2);
    assert_eq!(means[0].0, "Movie");
    assert!((means[0].1 - (2015.0 + 2010.0 + 2022.0) / 3.0).abs() < 1e-9);
    assert_eq!(means[1], ("TV Show".to_string(), 2016.0));

    assert_eq!(
        count_pairs(aggregates.yearly_additions(), "year_added")?,
        vec![
            ("2021".to_string(), 1),
            ("2022".to_string(), 3),
            ("2023".to_string(), 1)
        ]
    );

    let tab = aggregates.rating_by_type();
    assert_eq!(tab.total(), df.height() as i64);
    assert_eq!(tab.get("TV Show", "R"), Some(0));
    assert_eq!(tab.get("Movie", "R"), Some(2));
    Ok(())
}

#[test]
fn test_year_added_column() -> Result<(), Box<dyn std::error::Error>> {
    let df = with_year_added(&catalog()?)?;
    let years = df.column("year_added")?.cast(&DataType::Int64)?;
    assert_eq!(years.i64()?.get(0), Some(2021));
    Ok(())
}

#[test]
fn test_summary_json() -> Result<(), Box<dyn std::error::Error>> {
    let df = catalog()?;
    let summary = AnalysisSummary::new(
        &df,
        &filtering_tasks(&df)?,
        &grouping_tasks(&df)?,
        &aggregation_tasks(&df)?,
    )?;

    let json: Value = serde_json::from_str(&summary.to_json()?)?;
    assert_eq!(json["rows"], 5);
    assert_eq!(json["recent_movies"], 2);
    assert_eq!(json["type_counts"]["TV Show"], 2);
    assert_eq!(json["rating_counts"][0]["key"], "PG");

    assert_eq!(json["overview"]["rows"], 5);
    assert_eq!(json["overview"]["columns"].as_array().map(|c| c.len()), Some(6));
    assert_eq!(summary.overview().total_nulls(), 0);
    assert_eq!(json["rating_by_type"]["rows"][1], "TV Show");
    assert_eq!(json["rating_by_type"]["counts"][0][1], 2);
    Ok(())
}
