//! Fetching and loading the dataset.

use polars::prelude::*;
use std::fs;
use std::path::Path;
use tracing::{error, info, warn};

use crate::CatalogError;

/// What happened when the dataset was requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The file was already on disk; nothing was fetched.
    AlreadyPresent,
    /// The file was fetched and written; holds the number of bytes.
    Downloaded(usize),
    /// The fetch failed. The reason has been logged and the user told to
    /// obtain the data manually.
    Failed(String),
}

/// Fetches the dataset from `url` into `path` unless the file already exists.
///
/// One blocking GET, no retry. A failed fetch is never an error: it is logged
/// and reported as [`FetchOutcome::Failed`] so the caller can carry on.
pub fn download_dataset(path: &Path, url: &str) -> FetchOutcome {
    if path.exists() {
        println!("Dataset already exists!");
        info!(path = %path.display(), "dataset already present");
        return FetchOutcome::AlreadyPresent;
    }

    println!("Downloading Netflix dataset...");
    match fetch(url).and_then(|bytes| {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &bytes)?;
        Ok(bytes.len())
    }) {
        Ok(len) => {
            println!("Dataset downloaded successfully!");
            info!(bytes = len, path = %path.display(), "dataset downloaded");
            FetchOutcome::Downloaded(len)
        }
        Err(e) => {
            error!(url, "error downloading dataset: {}", e);
            println!("Error downloading dataset: {}", e);
            println!("Please download the dataset manually from Kaggle");
            FetchOutcome::Failed(e.to_string())
        }
    }
}

fn fetch(url: &str) -> Result<Vec<u8>, CatalogError> {
    let response = ureq::get(url).call()?;
    let bytes = response.into_body().read_to_vec()?;
    Ok(bytes)
}

/// Reads the dataset CSV into a `DataFrame`. Empty fields load as nulls.
pub fn load_dataset(path: &Path) -> Result<DataFrame, CatalogError> {
    if !path.is_file() {
        warn!(path = %path.display(), "dataset file not found");
        return Err(CatalogError::DatasetMissing(path.to_path_buf()));
    }
    let df = LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()?
        .collect()?;
    info!(rows = df.height(), columns = df.width(), "dataset loaded");
    Ok(df)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_existing_file_is_not_fetched() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");
        fs::write(&path, "show_id,type\ns1,Movie\n").unwrap();

        // The URL is never contacted when the file is present.
        let outcome = download_dataset(&path, "http://127.0.0.1:9/unreachable.csv");
        assert_eq!(outcome, FetchOutcome::AlreadyPresent);
    }

    #[test]
    fn test_failed_fetch_is_not_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("titles.csv");

        let outcome = download_dataset(&path, "http://127.0.0.1:9/unreachable.csv");
        assert!(matches!(outcome, FetchOutcome::Failed(_)));
        assert!(!path.exists());
    }

    #[test]
    fn test_missing_file() {
        let err = load_dataset(Path::new("does/not/exist.csv")).unwrap_err();
        assert!(matches!(err, CatalogError::DatasetMissing(_)));
    }
}
