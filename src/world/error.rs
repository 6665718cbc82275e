//! Error types for world data loading.

use thiserror::Error;

/// Errors that can occur when loading level, enemy, item or config data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },

    /// Level has no rows or only empty rows.
    #[error("Level '{0}' has an empty tile grid")]
    EmptyGrid(String),

    /// A level referenced by name is not registered.
    #[error("Unknown level '{0}'")]
    UnknownLevel(String),
}

/// Read a RON file into `T`, mapping every failure onto [`DataLoadError`].
pub fn read_ron_file<T: serde::de::DeserializeOwned>(
    path: &std::path::Path,
) -> Result<T, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = std::fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })
}
