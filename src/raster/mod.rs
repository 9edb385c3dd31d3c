//! Slide rasters and where they come from.
//!
//! Rendering a presentation is done by external tools. This module only
//! defines the seam ([`RasterSource`]) plus two implementations: one that
//! reads pre-rendered `slide-<n>.png` files from a directory and one that runs
//! LibreOffice and `pdftoppm` to produce them.
//!
//! It also owns the single definition of what a "content pixel" is, which the
//! detector and the adjuster both use.

mod render;

pub use render::{ExternalRenderer, RendererConfig, DEFAULT_DPI};

use image::{Rgb, RgbImage};
use log::debug;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::SlideboxError;
use crate::ir::Region;

/// Default per-channel value at or above which a pixel counts as background.
pub const DEFAULT_BACKGROUND_THRESHOLD: u8 = 250;

/// Something that can produce the raster for a 1-based slide number.
///
/// Implementations may block (rendering is slow); the rest of the pipeline is
/// pure and never calls back into the source.
pub trait RasterSource {
    /// Highest slide number the source can render, if it knows. Lower
    /// numbers may still be missing.
    fn last_page(&self) -> Option<usize> {
        None
    }

    /// Returns the RGB raster of slide `page` (1-based).
    fn render(&self, page: usize) -> Result<RgbImage, SlideboxError>;
}

/// Returns true if any channel of `pixel` is below `threshold`.
#[inline]
pub fn is_content(pixel: &Rgb<u8>, threshold: u8) -> bool {
    pixel.0.iter().any(|&c| c < threshold)
}

/// Returns true if any pixel inside `region` is a content pixel.
///
/// The region is clamped to the image first; an area entirely outside the
/// image contains no content.
pub fn region_has_content(raster: &RgbImage, region: &Region, threshold: u8) -> bool {
    let Some(r) = region.clamp_to_image(raster.width(), raster.height()) else {
        return false;
    };
    (r.y1..r.y2).any(|y| {
        (r.x1..r.x2).any(|x| is_content(raster.get_pixel(x as u32, y as u32), threshold))
    })
}

/// Parses the page number out of a `slide-<n>.png` file name.
///
/// `pdftoppm` zero-pads the number to the width of the page count, so
/// `slide-7.png`, `slide-07.png` and `slide-007.png` all mean page 7.
pub fn page_number_from_file_name(path: &Path) -> Option<usize> {
    let is_png = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("png"));
    if !is_png {
        return None;
    }
    let stem = path.file_stem()?.to_str()?;
    let (_, number) = stem.rsplit_once('-')?;
    number.parse().ok()
}

/// Loads pre-rendered slides named `slide-<n>.png` from a directory.
#[derive(Clone, Debug)]
pub struct ImageDirSource {
    dir: PathBuf,
    pages: BTreeMap<usize, PathBuf>,
}

impl ImageDirSource {
    /// Indexes the slide images found directly inside `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, SlideboxError> {
        let dir = dir.into();
        let mut pages = BTreeMap::new();

        for entry in WalkDir::new(&dir).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| SlideboxError::Io(e.into()))?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Some(page) = page_number_from_file_name(entry.path()) {
                pages.insert(page, entry.into_path());
            }
        }

        debug!("indexed {} slide image(s) in {}", pages.len(), dir.display());
        Ok(Self { dir, pages })
    }

    /// Directory the images were read from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the image for `page`, if present.
    pub fn path_for(&self, page: usize) -> Option<&Path> {
        self.pages.get(&page).map(PathBuf::as_path)
    }
}

impl RasterSource for ImageDirSource {
    fn last_page(&self) -> Option<usize> {
        self.pages.keys().next_back().copied()
    }

    fn render(&self, page: usize) -> Result<RgbImage, SlideboxError> {
        let path = self.path_for(page).ok_or_else(|| SlideboxError::RenderFailure {
            page,
            message: format!("no slide-{}.png in {}", page, self.dir.display()),
        })?;
        load_rgb(path)
    }
}

/// Reads an image file and converts it to 8-bit RGB.
pub fn load_rgb(path: &Path) -> Result<RgbImage, SlideboxError> {
    let img = image::open(path).map_err(|source| SlideboxError::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(img.to_rgb8())
}
