use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::domain::card::CardProduct;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("could not read catalog file `{path}`: {source}")]
    Read { path: PathBuf, source: std::io::Error },
    #[error("could not parse catalog file `{path}`: {source}")]
    Parse { path: PathBuf, source: serde_json::Error },
}

/// Reads the catalog from disk. Callers load a fresh snapshot per
/// recommendation request; nothing is cached between calls.
pub fn load_from_path(path: &Path) -> Result<Vec<CardProduct>, CatalogError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| CatalogError::Read { path: path.to_path_buf(), source })?;

    serde_json::from_str(&raw)
        .map_err(|source| CatalogError::Parse { path: path.to_path_buf(), source })
}
