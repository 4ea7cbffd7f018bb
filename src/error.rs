use std::path::PathBuf;
use thiserror::Error;

/// The main error type for scenewalk operations.
///
/// Every variant is fatal for the traversal that produced it. Records that
/// are merely skipped (predicate miss, unreadable frame) never surface here.
#[derive(Debug, Error)]
pub enum ScenewalkError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid scene structure at {path}: {message}")]
    MissingStructure { path: PathBuf, message: String },

    #[error("Failed to parse CVAT XML from {path}: {message}")]
    CvatXmlParse { path: PathBuf, message: String },

    #[error("Failed to parse tag JSON from {path}: {source}")]
    TagJsonParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed while listing dataset at {path}: {message}")]
    DatasetTraversal { path: PathBuf, message: String },

    #[error("Dataset path is not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Invalid picture size '{0}': expected WIDTHxHEIGHT with positive integers")]
    InvalidPictureSize(String),

    #[error("Failed to write image to {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to initialize logging: {0}")]
    Logging(String),
}

impl ScenewalkError {
    /// True for errors caused by an unexpected dataset layout.
    pub fn is_missing_structure(&self) -> bool {
        matches!(self, ScenewalkError::MissingStructure { .. })
    }

    /// True for malformed annotation content (XML or JSON).
    pub fn is_parse_failure(&self) -> bool {
        matches!(
            self,
            ScenewalkError::CvatXmlParse { .. } | ScenewalkError::TagJsonParse { .. }
        )
    }
}
