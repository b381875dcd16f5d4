//! Synthetic record generator.
//!
//! Every field of every record is an independent uniform choice. The
//! generator is seeded through `rand::rngs::StdRng`, so a fixed seed and a
//! fixed reference date reproduce the same dataset.

use chrono::{Local, NaiveDate, TimeDelta};
use polars::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;
use tracing::info;

use crate::config::{DATE_FORMAT, DEFAULT_ROWS};
use crate::record::{columns, ContentKind, ContentRecord, Duration};
use crate::CatalogError;

const TITLES: [&str; 30] = [
    "Stranger Things",
    "The Crown",
    "Money Heist",
    "Dark",
    "Ozark",
    "The Witcher",
    "Bridgerton",
    "Squid Game",
    "Wednesday",
    "Wednesday",
    "The Queen's Gambit",
    "Tiger King",
    "Outer Banks",
    "Emily in Paris",
    "Cobra Kai",
    "The Umbrella Academy",
    "You",
    "Sex Education",
    "The Good Place",
    "Black Mirror",
    "Narcos",
    "House of Cards",
    "Orange is the New Black",
    "13 Reasons Why",
    "Riverdale",
    "The Haunting of Hill House",
    "Russian Doll",
    "Dead to Me",
    "Grace and Frankie",
    "Unbreakable Kimmy Schmidt",
];

const DIRECTORS: [&str; 30] = [
    "Duffer Brothers",
    "Peter Morgan",
    "Álex Pina",
    "Baran bo Odar",
    "Jason Bateman",
    "Lauren Schmidt",
    "Chris Van Dusen",
    "Hwang Dong-hyuk",
    "Tim Burton",
    "Scott Frank",
    "Eric Goode",
    "Josh Pate",
    "Darren Star",
    "Jon Hurwitz",
    "Steve Blackman",
    "Greg Berlanti",
    "Sera Gamble",
    "Laurie Nunn",
    "Michael Schur",
    "Charlie Brooker",
    "Carlo Bernard",
    "Beau Willimon",
    "Jenji Kohan",
    "Brian Yorkey",
    "Roberto Aguirre-Sacasa",
    "Mike Flanagan",
    "Leslye Headland",
    "Liz Feldman",
    "Marta Kauffman",
    "Tina Fey",
];

const COUNTRIES: [&str; 20] = [
    "United States",
    "United Kingdom",
    "Spain",
    "Germany",
    "South Korea",
    "Canada",
    "France",
    "Italy",
    "Brazil",
    "Mexico",
    "India",
    "Japan",
    "Australia",
    "Netherlands",
    "Sweden",
    "Norway",
    "Denmark",
    "Poland",
    "Czech Republic",
    "Hungary",
];

pub const RATINGS: [&str; 9] = [
    "TV-MA", "TV-14", "TV-PG", "TV-Y7", "TV-Y", "R", "PG-13", "PG", "G",
];

const GENRES: [&str; 4] = ["Drama", "Comedy", "Thriller", "Romance"];
const ADJECTIVES: [&str; 4] = ["compelling", "entertaining", "gripping", "funny"];
const TOPICS: [&str; 4] = ["love", "adventure", "mystery", "friendship"];

/// Configures and runs the synthetic record generator.
#[derive(Debug, Clone)]
pub struct SampleGenerator {
    rows: usize,
    seed: Option<u64>,
    reference_date: NaiveDate,
}

impl Default for SampleGenerator {
    fn default() -> Self {
        Self::new(DEFAULT_ROWS)
    }
}

impl SampleGenerator {
    /// Creates a generator producing `rows` records, dated relative to today.
    pub fn new(rows: usize) -> Self {
        Self {
            rows,
            seed: None,
            reference_date: Local::now().date_naive(),
        }
    }

    /// Fixes the random seed. Without a seed the generator draws from OS entropy.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the date `date_added` values are counted back from.
    pub fn reference_date(mut self, date: NaiveDate) -> Self {
        self.reference_date = date;
        self
    }

    /// Produces the records.
    pub fn generate(&self) -> Vec<ContentRecord> {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        (0..self.rows)
            .map(|i| self.generate_record(i, &mut rng))
            .collect()
    }

    fn generate_record(&self, index: usize, rng: &mut StdRng) -> ContentRecord {
        let title = pick(rng, &TITLES);
        let kind = ContentKind::ALL[rng.gen_range(0..ContentKind::ALL.len())];

        let duration = match kind {
            ContentKind::Movie => Duration::Minutes(rng.gen_range(80..=180)),
            ContentKind::TvShow => Duration::Seasons(rng.gen_range(1..=5)),
        };

        let release_year = rng.gen_range(2010..=2024);
        let date_added = self.reference_date - TimeDelta::days(rng.gen_range(1..=1000));

        ContentRecord {
            show_id: format!("s{}", index + 1),
            kind,
            title: title.to_string(),
            director: pick(rng, &DIRECTORS).to_string(),
            cast: format!(
                "Actor {}, Actor {}",
                rng.gen_range(1..=10),
                rng.gen_range(11..=20)
            ),
            country: pick(rng, &COUNTRIES).to_string(),
            date_added: date_added.format(DATE_FORMAT).to_string(),
            release_year,
            rating: pick(rng, &RATINGS).to_string(),
            duration,
            listed_in: format!("Action, Adventure, {}", pick(rng, &GENRES)),
            description: format!(
                "A {} {} about {}.",
                pick(rng, &ADJECTIVES),
                kind.as_str().to_lowercase(),
                pick(rng, &TOPICS)
            ),
        }
    }

    /// Lays the records out as a `DataFrame` with exactly the declared columns.
    pub fn to_dataframe(records: &[ContentRecord]) -> Result<DataFrame, CatalogError> {
        let kinds: Vec<&str> = records.iter().map(|r| r.kind.as_str()).collect();
        let release_years: Vec<i64> = records.iter().map(|r| r.release_year).collect();
        let durations: Vec<String> = records.iter().map(|r| r.duration.to_string()).collect();

        let df = df!(
            columns::SHOW_ID => text_column(records, |r| r.show_id.as_str()),
            columns::TYPE => kinds,
            columns::TITLE => text_column(records, |r| r.title.as_str()),
            columns::DIRECTOR => text_column(records, |r| r.director.as_str()),
            columns::CAST => text_column(records, |r| r.cast.as_str()),
            columns::COUNTRY => text_column(records, |r| r.country.as_str()),
            columns::DATE_ADDED => text_column(records, |r| r.date_added.as_str()),
            columns::RELEASE_YEAR => release_years,
            columns::RATING => text_column(records, |r| r.rating.as_str()),
            columns::DURATION => durations,
            columns::LISTED_IN => text_column(records, |r| r.listed_in.as_str()),
            columns::DESCRIPTION => text_column(records, |r| r.description.as_str())
        )?;
        Ok(df)
    }

    /// Generates the dataset and serializes it to `path` as CSV.
    pub fn write_csv(&self, path: &Path) -> Result<DataFrame, CatalogError> {
        let records = self.generate();
        let mut df = Self::to_dataframe(&records)?;
        write_frame(&mut df, path)?;

        info!(rows = df.height(), path = %path.display(), "sample dataset created");
        println!("Sample Netflix dataset created with {} records!", df.height());
        println!("Dataset saved as '{}'", path.display());
        Ok(df)
    }
}

fn text_column<'a, F>(records: &'a [ContentRecord], field: F) -> Vec<&'a str>
where
    F: Fn(&'a ContentRecord) -> &'a str,
{
    records.iter().map(field).collect()
}

fn pick<'a>(rng: &mut StdRng, values: &[&'a str]) -> &'a str {
    values[rng.gen_range(0..values.len())]
}

/// Writes a frame as CSV with a header row, creating parent directories.
pub(crate) fn write_frame(df: &mut DataFrame, path: &Path) -> Result<(), CatalogError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    CsvWriter::new(&mut writer).include_header(true).finish(df)?;
    Ok(())
}
