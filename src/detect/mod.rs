//! Finding the ink inside a region of a slide raster.
//!
//! A pixel is background when every channel is at or above the background
//! threshold; anything else is content. The detector reports the tightest
//! rectangle around the content pixels of a region, or nothing if the region
//! is blank.
//!
//! In [`DetectMode::Edges`] a pixel is also content when the Sobel gradient
//! of the grayscale region is strong there, and specks narrower than two
//! pixels are opened away before the bounds are taken.

use image::{GrayImage, Luma, RgbImage};
use imageproc::gradients::sobel_gradients;
use imageproc::morphology::{grayscale_dilate, grayscale_erode, Mask};
use log::debug;

use crate::ir::Region;
use crate::raster::{is_content, DEFAULT_BACKGROUND_THRESHOLD};

/// Default Sobel gradient magnitude above which a pixel is an edge.
pub const DEFAULT_EDGE_THRESHOLD: u16 = 28;

/// How content pixels are told apart from background.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum DetectMode {
    /// Per-channel background threshold only.
    #[default]
    Threshold,
    /// Threshold or strong gradient, with specks removed.
    Edges,
}

/// Options for content detection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DetectOptions {
    /// Per-channel value at or above which a pixel is background.
    pub background_threshold: u8,
    pub mode: DetectMode,
    /// Gradient magnitude above which a pixel counts as an edge
    /// ([`DetectMode::Edges`] only).
    pub edge_threshold: u16,
}

impl Default for DetectOptions {
    fn default() -> Self {
        Self {
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
            mode: DetectMode::default(),
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
        }
    }
}

/// Returns the tight bounds of the content pixels inside `region`.
///
/// The region is clamped to the image before scanning. The result is in
/// image coordinates with an exclusive max corner, so a single content pixel
/// at `(px, py)` yields `(px, py, px + 1, py + 1)`. Returns `None` when the
/// region holds only background (or lies outside the image).
///
/// Cost is one pass over the region's pixels, plus a gradient and an opening
/// pass in [`DetectMode::Edges`].
pub fn detect(raster: &RgbImage, region: &Region, opts: &DetectOptions) -> Option<Region> {
    let area = region.clamp_to_image(raster.width(), raster.height())?;
    let threshold = opts.background_threshold;

    let bounds = match opts.mode {
        DetectMode::Threshold => tight_bounds(&area, |x, y| {
            is_content(raster.get_pixel(x as u32, y as u32), threshold)
        }),
        DetectMode::Edges => {
            let mask = edge_mask(raster, &area, opts);
            tight_bounds(&area, |x, y| {
                mask.get_pixel((x - area.x1) as u32, (y - area.y1) as u32)[0] != 0
            })
        }
    };

    match bounds {
        Some(bounds) => debug!("content in {} spans {}", area, bounds),
        None => debug!("no content in {}", area),
    }
    bounds
}

/// Tightest rectangle around the points of `area` for which `hit` holds.
fn tight_bounds(area: &Region, hit: impl Fn(i64, i64) -> bool) -> Option<Region> {
    let mut min_x = i64::MAX;
    let mut min_y = i64::MAX;
    let mut max_x = i64::MIN;
    let mut max_y = i64::MIN;

    for y in area.y1..area.y2 {
        let mut row_min = None;
        let mut row_max = None;
        for x in area.x1..area.x2 {
            if hit(x, y) {
                row_min.get_or_insert(x);
                row_max = Some(x);
            }
        }
        if let (Some(lo), Some(hi)) = (row_min, row_max) {
            min_x = min_x.min(lo);
            max_x = max_x.max(hi);
            min_y = min_y.min(y);
            max_y = y;
        }
    }

    (max_y != i64::MIN).then(|| Region::new(min_x, min_y, max_x + 1, max_y + 1))
}

/// Content mask of `area` (which must lie inside the image): 255 where a
/// pixel is ink or sits on a strong gradient, after a 2x2 opening.
fn edge_mask(raster: &RgbImage, area: &Region, opts: &DetectOptions) -> GrayImage {
    let (width, height) = (area.width() as u32, area.height() as u32);
    let crop =
        image::imageops::crop_imm(raster, area.x1 as u32, area.y1 as u32, width, height).to_image();
    let gradients = sobel_gradients(&image::imageops::grayscale(&crop));

    let mask = GrayImage::from_fn(width, height, |x, y| {
        let ink = is_content(crop.get_pixel(x, y), opts.background_threshold);
        let edge = gradients.get_pixel(x, y)[0] > opts.edge_threshold;
        Luma([if ink || edge { 255 } else { 0 }])
    });

    // imageproc applies mask offsets unreflected in both operations, so the
    // dilation mask is the mirror image of the erosion mask.
    let square = GrayImage::from_pixel(2, 2, Luma([255]));
    let eroded = grayscale_erode(&mask, &Mask::from_image(&square, 0, 0));
    grayscale_dilate(&eroded, &Mask::from_image(&square, 1, 1))
}

/// Grows detected bounds by `margin` without leaving the searched region.
///
/// A detected edge is never reported beyond the region it was found in:
/// `(max(s.x1, d.x1 - m), max(s.y1, d.y1 - m), min(s.x2, d.x2 + m), min(s.y2, d.y2 + m))`.
pub fn clamp_to_search(detected: &Region, search: &Region, margin: i64) -> Region {
    Region::new(
        search.x1.max(detected.x1 - margin),
        search.y1.max(detected.y1 - margin),
        search.x2.min(detected.x2 + margin),
        search.y2.min(detected.y2 + margin),
    )
}
