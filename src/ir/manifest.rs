//! Deck manifests: the serialized shape metadata for a whole presentation.
//!
//! Parsing the presentation file itself is someone else's job; whatever
//! extracts the shapes writes them out in this format (JSON, or YAML when the
//! file ends in `.yaml`/`.yml`) and slidebox reads it back.
//!
//! ```json
//! {
//!   "slide_width": 9144000,
//!   "slide_height": 6858000,
//!   "source": "deck.pptx",
//!   "slides": [
//!     {
//!       "layout": "1x2",
//!       "shapes": [
//!         {
//!           "id": 2,
//!           "kind": { "type": "text_box" },
//!           "bounds": { "x1": 457200, "y1": 228600, "x2": 3000000, "y2": 600000 },
//!           "text": "1. 질병"
//!         }
//!       ]
//!     }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use super::geometry::SlideGeometry;
use super::layout::GridLayout;
use super::shape::ShapeDescriptor;
use crate::error::SlideboxError;

/// English Metric Units per inch, the native unit of PPTX geometry.
pub const EMU_PER_INCH: i64 = 914_400;

/// Shape metadata for every slide of a deck.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeckManifest {
    /// Slide width in native units.
    pub slide_width: i64,

    /// Slide height in native units.
    pub slide_height: i64,

    /// Path of the original presentation, used when slides have to be rendered.
    ///
    /// Relative paths are resolved against the manifest's directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<PathBuf>,

    /// Slides in deck order.
    #[serde(default)]
    pub slides: Vec<SlideManifest>,
}

/// Shape metadata for one slide.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SlideManifest {
    /// Declared grid layout; inferred from the shapes when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub layout: Option<GridLayout>,

    /// Shapes on the slide, in z-order.
    #[serde(default)]
    pub shapes: Vec<ShapeDescriptor>,
}

impl DeckManifest {
    /// Number of slides in the deck.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Looks up a slide by its 1-based page number.
    pub fn slide(&self, page: usize) -> Result<&SlideManifest, SlideboxError> {
        page.checked_sub(1)
            .and_then(|idx| self.slides.get(idx))
            .ok_or(SlideboxError::PageOutOfRange {
                page,
                count: self.slides.len(),
            })
    }

    /// Builds the geometry for a raster of the given size.
    pub fn geometry(&self, image_width: u32, image_height: u32) -> Result<SlideGeometry, SlideboxError> {
        SlideGeometry::new(self.slide_width, self.slide_height, image_width, image_height)
    }

    /// Builds the geometry the slides would have if rendered at `dpi`,
    /// assuming EMU slide units. For work that needs no raster.
    pub fn geometry_at_dpi(&self, dpi: u32) -> Result<SlideGeometry, SlideboxError> {
        let pixels = |units: i64| {
            let px = (i128::from(units.max(0)) * i128::from(dpi) / i128::from(EMU_PER_INCH)).max(1);
            u32::try_from(px).unwrap_or(u32::MAX)
        };
        self.geometry(pixels(self.slide_width), pixels(self.slide_height))
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|e| e.to_str()),
        Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml")
    )
}

/// Reads a deck manifest from a JSON or YAML file.
///
/// A relative `source` path is rewritten to be relative to the current
/// directory, so callers can open it directly.
///
/// # Errors
/// Returns an error if the file cannot be read or parsed.
pub fn read_manifest(path: &Path) -> Result<DeckManifest, SlideboxError> {
    let file = File::open(path).map_err(SlideboxError::Io)?;
    let reader = BufReader::new(file);

    let mut manifest: DeckManifest = if is_yaml(path) {
        serde_yaml::from_reader(reader).map_err(|source| SlideboxError::ManifestYamlParse {
            path: path.to_path_buf(),
            source,
        })?
    } else {
        serde_json::from_reader(reader).map_err(|source| SlideboxError::ManifestParse {
            path: path.to_path_buf(),
            source,
        })?
    };

    if let (Some(source), Some(parent)) = (manifest.source.as_ref(), path.parent()) {
        if source.is_relative() {
            manifest.source = Some(parent.join(source));
        }
    }

    Ok(manifest)
}

/// Writes a deck manifest as pretty-printed JSON.
///
/// # Errors
/// Returns an error if the file cannot be written.
pub fn write_manifest(path: &Path, manifest: &DeckManifest) -> Result<(), SlideboxError> {
    let file = File::create(path).map_err(SlideboxError::Io)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, manifest).map_err(|source| SlideboxError::ManifestWrite {
        path: path.to_path_buf(),
        source,
    })
}

/// Parses a manifest from a JSON string.
///
/// Useful for testing without file I/O.
pub fn from_manifest_str(json: &str) -> Result<DeckManifest, serde_json::Error> {
    serde_json::from_str(json)
}

/// Parses a manifest from JSON bytes.
pub fn from_manifest_slice(bytes: &[u8]) -> Result<DeckManifest, serde_json::Error> {
    serde_json::from_slice(bytes)
}

/// Parses a manifest from YAML bytes.
///
/// Only needed by the fuzz targets; files go through [`read_manifest`].
#[cfg(feature = "fuzzing")]
pub fn from_manifest_yaml_slice(bytes: &[u8]) -> Result<DeckManifest, serde_yaml::Error> {
    serde_yaml::from_slice(bytes)
}

/// Serializes a manifest to a pretty JSON string.
pub fn to_manifest_string(manifest: &DeckManifest) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(manifest)
}
