use std::path::PathBuf;
use thiserror::Error;

/// The main error type for slidebox operations.
///
/// Only failures that make a requested output impossible live here. A cell
/// with no content or an edge that could not be cleared is recorded in the
/// returned data instead.
#[derive(Debug, Error)]
pub enum SlideboxError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse manifest JSON from {path}: {source}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse manifest YAML from {path}: {source}")]
    ManifestYamlParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to write manifest JSON to {path}: {source}")]
    ManifestWrite {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read image {path}: {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to write image {path}: {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Page {page} is out of range (deck has {count} slide(s))")]
    PageOutOfRange { page: usize, count: usize },

    #[error("Failed to render slide {page}: {message}")]
    RenderFailure { page: usize, message: String },

    #[error("Invalid slide geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid grid layout: {0}")]
    InvalidLayout(String),

    #[error("Invalid color: {0}")]
    InvalidColor(String),

    #[error("Failed to serialize report: {0}")]
    ReportSerialize(#[source] serde_json::Error),

    #[error("{failed} of {total} slide(s) failed")]
    BatchIncomplete { failed: usize, total: usize },
}
