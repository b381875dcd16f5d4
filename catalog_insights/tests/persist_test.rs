use catalog_insights::analysis::count_total;
use catalog_insights::cleaning::clean;
use catalog_insights::{load_dataset, save_processed_data, SampleGenerator};
use chrono::NaiveDate;

#[test]
fn test_saves_every_table() -> Result<(), Box<dyn std::error::Error>> {
    let records = SampleGenerator::new(100)
        .seed(5)
        .reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        .generate();
    let df = clean(SampleGenerator::to_dataframe(&records)?)?;

    let dir = tempfile::tempdir()?;
    let out_dir = dir.path().join("processed");
    let written = save_processed_data(&df, &out_dir)?;

    let names: Vec<String> = written
        .iter()
        .filter_map(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .collect();
    assert_eq!(
        names,
        vec![
            "recent_movies.csv",
            "multi_season_shows.csv",
            "us_content.csv",
            "type_counts.csv",
            "rating_counts.csv",
            "yearly_content.csv",
            "country_counts.csv",
        ]
    );
    assert!(written.iter().all(|p| p.is_file()));

    let type_counts = load_dataset(&out_dir.join("type_counts.csv"))?;
    let names: Vec<&str> = type_counts
        .get_column_names()
        .iter()
        .map(|n| n.as_str())
        .collect();
    assert_eq!(names, vec!["type", "count"]);
    assert_eq!(count_total(&type_counts)?, 100);
    Ok(())
}
