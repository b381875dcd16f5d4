use catalog_insights::config::DATE_FORMAT;
use catalog_insights::generator::RATINGS;
use catalog_insights::record::COLUMNS;
use catalog_insights::{load_dataset, ContentKind, Duration, SampleGenerator};
use chrono::NaiveDate;
use std::collections::HashSet;

fn generator() -> SampleGenerator {
    SampleGenerator::new(100)
        .seed(42)
        .reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
}

#[test]
fn test_frame_has_declared_columns() -> Result<(), Box<dyn std::error::Error>> {
    let records = generator().generate();
    let df = SampleGenerator::to_dataframe(&records)?;

    assert_eq!(df.shape(), (100, COLUMNS.len()));
    let names: Vec<&str> = df.get_column_names().iter().map(|n| n.as_str()).collect();
    assert_eq!(names, COLUMNS.to_vec());
    Ok(())
}

#[test]
fn test_duration_follows_kind() {
    for record in generator().generate() {
        let text = record.duration.to_string();
        match record.kind {
            ContentKind::Movie => {
                let Duration::Minutes(n) = record.duration else {
                    panic!("movie {} has a season count", record.show_id);
                };
                assert!((80..=180).contains(&n));
                assert_eq!(text, format!("{} min", n));
            }
            ContentKind::TvShow => {
                let Duration::Seasons(n) = record.duration else {
                    panic!("series {} has a running time", record.show_id);
                };
                assert!((1..=5).contains(&n));
                if n == 1 {
                    assert_eq!(text, "1 Season");
                } else {
                    assert_eq!(text, format!("{} Seasons", n));
                }
            }
        }
    }
}

#[test]
fn test_field_ranges() -> Result<(), Box<dyn std::error::Error>> {
    let reference = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let records = generator().generate();

    let ids: HashSet<&str> = records.iter().map(|r| r.show_id.as_str()).collect();
    assert_eq!(ids.len(), records.len());
    assert_eq!(records[0].show_id, "s1");
    assert_eq!(records[99].show_id, "s100");

    for record in &records {
        assert!((2010..=2024).contains(&record.release_year));

        let added = NaiveDate::parse_from_str(&record.date_added, DATE_FORMAT)?;
        let days_back = (reference - added).num_days();
        assert!((1..=1000).contains(&days_back), "{} days back", days_back);

        assert!(RATINGS.contains(&record.rating.as_str()));
        assert!(record.listed_in.starts_with("Action, Adventure, "));
        assert!(record.cast.starts_with("Actor "));
        assert!(record
            .description
            .contains(&record.kind.as_str().to_lowercase()));
    }
    Ok(())
}

#[test]
fn test_seed_is_reproducible() {
    assert_eq!(generator().generate(), generator().generate());
    let other = SampleGenerator::new(100)
        .seed(43)
        .reference_date(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
    assert_ne!(generator().generate(), other.generate());
}

#[test]
fn test_csv_loads_back() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("titles.csv");

    let written = generator().write_csv(&path)?;
    let loaded = load_dataset(&path)?;

    assert_eq!(loaded.shape(), written.shape());
    let kinds = loaded.column("type")?.str()?;
    assert!(kinds
        .into_iter()
        .all(|k| matches!(k, Some("Movie") | Some("TV Show"))));
    Ok(())
}
