//! The content record: one row describing a single movie or series.

use std::fmt;
use std::str::FromStr;

use crate::CatalogError;

/// Column names of the dataset.
pub mod columns {
    pub const SHOW_ID: &str = "show_id";
    pub const TYPE: &str = "type";
    pub const TITLE: &str = "title";
    pub const DIRECTOR: &str = "director";
    pub const CAST: &str = "cast";
    pub const COUNTRY: &str = "country";
    pub const DATE_ADDED: &str = "date_added";
    pub const RELEASE_YEAR: &str = "release_year";
    pub const RATING: &str = "rating";
    pub const DURATION: &str = "duration";
    pub const LISTED_IN: &str = "listed_in";
    pub const DESCRIPTION: &str = "description";

    /// Derived from `date_added` during analysis; never persisted by the generator.
    pub const YEAR_ADDED: &str = "year_added";
    /// Name of the count column produced by every grouping.
    pub const COUNT: &str = "count";
}

/// The declared column set, in file order.
pub const COLUMNS: [&str; 12] = [
    columns::SHOW_ID,
    columns::TYPE,
    columns::TITLE,
    columns::DIRECTOR,
    columns::CAST,
    columns::COUNTRY,
    columns::DATE_ADDED,
    columns::RELEASE_YEAR,
    columns::RATING,
    columns::DURATION,
    columns::LISTED_IN,
    columns::DESCRIPTION,
];

/// The two kinds of title in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ContentKind {
    Movie,
    TvShow,
}

impl ContentKind {
    pub const ALL: [ContentKind; 2] = [ContentKind::Movie, ContentKind::TvShow];

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Movie => "Movie",
            ContentKind::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Movie" => Ok(ContentKind::Movie),
            "TV Show" => Ok(ContentKind::TvShow),
            other => Err(CatalogError::InvalidValue(format!(
                "unknown content kind '{}'",
                other
            ))),
        }
    }
}

/// Running time of a title: minutes for movies, seasons for series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Duration {
    Minutes(u32),
    Seasons(u32),
}

impl Duration {
    /// Parses `"<n> min"`, `"1 Season"` or `"<n> Seasons"`.
    pub fn parse(s: &str) -> Option<Duration> {
        let (number, unit) = s.trim().split_once(' ')?;
        let n: u32 = number.parse().ok()?;
        match unit.trim() {
            "min" => Some(Duration::Minutes(n)),
            "Season" | "Seasons" => Some(Duration::Seasons(n)),
            _ => None,
        }
    }

    pub fn seasons(&self) -> Option<u32> {
        match self {
            Duration::Seasons(n) => Some(*n),
            Duration::Minutes(_) => None,
        }
    }
}

impl fmt::Display for Duration {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Duration::Minutes(n) => write!(f, "{} min", n),
            Duration::Seasons(1) => f.write_str("1 Season"),
            Duration::Seasons(n) => write!(f, "{} Seasons", n),
        }
    }
}

/// One row of the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentRecord {
    pub show_id: String,
    pub kind: ContentKind,
    pub title: String,
    pub director: String,
    pub cast: String,
    pub country: String,
    pub date_added: String,
    pub release_year: i64,
    pub rating: String,
    pub duration: Duration,
    pub listed_in: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_season_pluralization() {
        assert_eq!(Duration::Seasons(1).to_string(), "1 Season");
        assert_eq!(Duration::Seasons(2).to_string(), "2 Seasons");
        assert_eq!(Duration::Minutes(95).to_string(), "95 min");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(Duration::parse("1 Season"), Some(Duration::Seasons(1)));
        assert_eq!(Duration::parse(" 4 Seasons "), Some(Duration::Seasons(4)));
        assert_eq!(Duration::parse("123 min"), Some(Duration::Minutes(123)));
        assert_eq!(Duration::parse("Seasons"), None);
        assert_eq!(Duration::parse("12 hours"), None);
    }

    #[test]
    fn test_kind_round_trip() {
        for kind in ContentKind::ALL {
            assert_eq!(kind.as_str().parse::<ContentKind>().unwrap(), kind);
        }
        assert!("Documentary".parse::<ContentKind>().is_err());
    }
}
