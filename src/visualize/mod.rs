//! Putting the pipeline together: from a slide raster to boxes on it.
//!
//! For each slide the visualizer
//!
//! 1. classifies the shapes (for reporting, and to infer a layout when none
//!    is declared),
//! 2. takes the image minus a header and footer band as the content area,
//! 3. partitions it into grid cells,
//! 4. detects the content of each cell, grown by a margin that never leaves
//!    the cell,
//! 5. moves each box's edges off the content,
//!
//! and returns one [`OverlayBox`] per cell that holds content.
//!
//! In [`BoxMode::Single`] the grid is skipped: one box is drawn around the
//! frames of all content shapes (template decoration left out), projected
//! onto the raster, padded, and then moved off the ink the same way.
//!
//! # Example
//!
//! ```
//! use image::{Rgb, RgbImage};
//! use slidebox::ir::{GridLayout, Region, SlideGeometry};
//! use slidebox::visualize::visualize;
//!
//! let mut raster = RgbImage::from_pixel(1500, 1125, Rgb([255, 255, 255]));
//! for y in 200..400 {
//!     for x in 100..600 {
//!         raster.put_pixel(x, y, Rgb([0, 0, 0]));
//!     }
//! }
//! let geometry = SlideGeometry::new(9_144_000, 6_858_000, 1500, 1125).unwrap();
//!
//! let result = visualize(&raster, &geometry, &[], Some(GridLayout::ONE_BY_ONE)).unwrap();
//! assert_eq!(result.boxes.len(), 1);
//! assert_eq!(result.boxes[0].detected, Region::new(100, 200, 600, 400));
//! assert_eq!(result.boxes[0].rect, Region::new(85, 185, 615, 415));
//! ```

mod color;
mod report;

pub use color::OverlayColor;
pub use report::{OverlayBox, Visualization};

use image::RgbImage;
use imageproc::drawing::draw_hollow_rect_mut;
use imageproc::rect::Rect as DrawRect;
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;

use crate::adjust::{adjust, AdjustOptions, AdjustedBox};
use crate::classify::{ExclusionReport, MasterElementClassifier};
use crate::detect::{clamp_to_search, detect, DetectOptions};
use crate::error::SlideboxError;
use crate::grid::{infer_layout, partition_cells, GridOptions};
use crate::ir::{GridLayout, Region, ShapeDescriptor, SlideGeometry};

/// Default share of the image height reserved for the header band, in percent.
pub const DEFAULT_HEADER_PERCENT: u32 = 8;
/// Default share of the image height reserved for the footer band, in percent.
pub const DEFAULT_FOOTER_PERCENT: u32 = 8;
/// Default margin added around detected content, in pixels.
pub const DEFAULT_MARGIN: u32 = 15;
/// Default padding around the projected shape frames in single-box mode, in pixels.
pub const DEFAULT_SHAPE_PADDING: u32 = 10;

/// How boxes are placed on a slide.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BoxMode {
    /// One box per grid cell that holds ink.
    #[default]
    Grid,
    /// One box around every content shape of the slide.
    Single,
}

/// Options for the whole pipeline.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisualizeOptions {
    pub mode: BoxMode,
    pub header_percent: u32,
    pub footer_percent: u32,
    pub grid: GridOptions,
    pub detect: DetectOptions,
    /// Pixels added around detected content before adjustment.
    pub margin: u32,
    /// Pixels added around the shape frames in [`BoxMode::Single`].
    pub shape_padding: u32,
    /// Edge adjustment; its line width is also the drawn line width.
    pub adjust: AdjustOptions,
    pub color: OverlayColor,
}

impl Default for VisualizeOptions {
    fn default() -> Self {
        Self {
            mode: BoxMode::default(),
            header_percent: DEFAULT_HEADER_PERCENT,
            footer_percent: DEFAULT_FOOTER_PERCENT,
            grid: GridOptions::default(),
            detect: DetectOptions::default(),
            margin: DEFAULT_MARGIN,
            shape_padding: DEFAULT_SHAPE_PADDING,
            adjust: AdjustOptions::default(),
            color: OverlayColor::default(),
        }
    }
}

/// The part of a `width` x `height` image left once the header and footer
/// bands are removed. Spans the full width.
pub fn content_area(width: u32, height: u32, header_percent: u32, footer_percent: u32) -> Region {
    let height = i64::from(height);
    let top = height * i64::from(header_percent) / 100;
    let bottom = height - height * i64::from(footer_percent) / 100;
    Region::new(0, top, i64::from(width), bottom)
}

/// Computes layout boxes for slides.
#[derive(Clone, Debug, Default)]
pub struct LayoutVisualizer {
    classifier: MasterElementClassifier,
    options: VisualizeOptions,
}

impl LayoutVisualizer {
    pub fn new(options: VisualizeOptions) -> Self {
        Self {
            classifier: MasterElementClassifier::new(),
            options,
        }
    }

    pub fn options(&self) -> &VisualizeOptions {
        &self.options
    }

    pub fn classifier(&self) -> &MasterElementClassifier {
        &self.classifier
    }

    /// Computes the boxes for one slide.
    ///
    /// When `layout` is `None` it is inferred from the slide's content shapes.
    /// In [`BoxMode::Single`] the layout is not used.
    ///
    /// # Errors
    /// Returns [`SlideboxError::InvalidLayout`] if the content area is too
    /// small for the layout. A cell without content is not an error; it is
    /// listed in [`Visualization::empty_cells`].
    pub fn visualize(
        &self,
        raster: &RgbImage,
        geometry: &SlideGeometry,
        shapes: &[ShapeDescriptor],
        layout: Option<GridLayout>,
    ) -> Result<Visualization, SlideboxError> {
        let opts = &self.options;
        let exclusions = self.classifier.classify_slide(shapes, geometry);
        if opts.mode == BoxMode::Single {
            return Ok(self.single_box(raster, geometry, shapes, exclusions));
        }

        let (layout, layout_inferred) = match layout {
            Some(layout) => (layout, false),
            None => {
                let content = self.classifier.content_shapes(shapes, geometry);
                (infer_layout(&content, geometry), true)
            }
        };

        let area = content_area(
            raster.width(),
            raster.height(),
            opts.header_percent,
            opts.footer_percent,
        );
        let cells = partition_cells(&area, layout, &opts.grid)?;
        let max_adjust = i64::from(opts.adjust.max_adjust);

        let mut boxes = Vec::with_capacity(cells.len());
        let mut empty_cells = Vec::new();
        for cell in &cells {
            let Some(detected) = detect(raster, &cell.region, &opts.detect) else {
                debug!("cell {} at {}: no content", cell.index, cell.region);
                empty_cells.push(cell.index);
                continue;
            };

            let grown = clamp_to_search(&detected, &cell.region, i64::from(opts.margin));
            let limit = cell
                .region
                .expand(max_adjust)
                .intersect(&cell.territory)
                .unwrap_or(cell.region);
            let adjusted = adjust(raster, &grown, &limit, &opts.adjust);
            boxes.push(self.overlay(cell.index, detected, adjusted));
        }

        debug!(
            "layout {}: {} box(es), {} empty cell(s), {} shape(s) excluded",
            layout,
            boxes.len(),
            empty_cells.len(),
            exclusions.excluded_count()
        );

        Ok(Visualization {
            mode: BoxMode::Grid,
            layout,
            layout_inferred,
            boxes,
            empty_cells,
            exclusions,
        })
    }

    /// One box around the union of the content shapes' frames.
    ///
    /// Only shapes that carry content count, so rules and empty frames do not
    /// stretch the box. A slide without such shapes, or whose shapes all lie
    /// off the raster, gets no box and reports its single cell as empty.
    fn single_box(
        &self,
        raster: &RgbImage,
        geometry: &SlideGeometry,
        shapes: &[ShapeDescriptor],
        exclusions: ExclusionReport,
    ) -> Visualization {
        let opts = &self.options;
        let image = Region::image_bounds(raster.width(), raster.height());

        let frames = self
            .classifier
            .content_shapes(shapes, geometry)
            .into_iter()
            .filter(|shape| shape.carries_content())
            .map(|shape| shape.bounds)
            .reduce(|a, b| a.union(&b));
        let projected = frames.and_then(|frames| geometry.to_pixels(&frames).intersect(&image));

        let mut result = Visualization {
            mode: BoxMode::Single,
            layout: GridLayout::ONE_BY_ONE,
            layout_inferred: false,
            boxes: Vec::new(),
            empty_cells: Vec::new(),
            exclusions,
        };
        let Some(detected) = projected else {
            debug!("no content shapes on the slide");
            result.empty_cells.push(0);
            return result;
        };

        // Keep the centred stroke on the image.
        let half_line = i64::from(opts.adjust.line_width / 2);
        let frame = image.expand(-half_line).intersect(&image).unwrap_or(image);
        let padded = detected
            .expand(i64::from(opts.shape_padding))
            .intersect(&frame)
            .unwrap_or(detected);
        let adjusted = adjust(raster, &padded, &frame, &opts.adjust);

        debug!("content shapes span {}, boxed as {}", detected, adjusted.rect);
        result.boxes.push(self.overlay(0, detected, adjusted));
        result
    }

    fn overlay(&self, cell: usize, detected: Region, adjusted: AdjustedBox) -> OverlayBox {
        let opts = &self.options;
        if !adjusted.exhausted.is_empty() {
            warn!(
                "cell {}: could not clear {:?} edge(s) of {} within {} px",
                cell, adjusted.exhausted, adjusted.rect, opts.adjust.max_adjust
            );
        }
        OverlayBox {
            cell,
            rect: adjusted.rect,
            detected,
            color: opts.color,
            line_width: opts.adjust.line_width,
            exhausted: adjusted.exhausted,
        }
    }

    /// Computes the boxes for one slide and returns a copy of the raster with
    /// the boxes drawn on it.
    pub fn annotate(
        &self,
        raster: &RgbImage,
        geometry: &SlideGeometry,
        shapes: &[ShapeDescriptor],
        layout: Option<GridLayout>,
    ) -> Result<(RgbImage, Visualization), SlideboxError> {
        let result = self.visualize(raster, geometry, shapes, layout)?;
        let mut annotated = raster.clone();
        draw_boxes(&mut annotated, &result.boxes);
        Ok((annotated, result))
    }
}

/// Computes the boxes for one slide with default options.
pub fn visualize(
    raster: &RgbImage,
    geometry: &SlideGeometry,
    shapes: &[ShapeDescriptor],
    layout: Option<GridLayout>,
) -> Result<Visualization, SlideboxError> {
    LayoutVisualizer::default().visualize(raster, geometry, shapes, layout)
}

/// Draws box borders onto `image`.
///
/// The stroke is centred on the box edge: `line_width / 2` pixels outside and
/// the rest inside, so it stays within the band the adjuster kept clear.
pub fn draw_boxes(image: &mut RgbImage, boxes: &[OverlayBox]) {
    for overlay in boxes {
        let line_width = i64::from(overlay.line_width);
        let outer = overlay.rect.expand(line_width / 2);
        for t in 0..line_width {
            let w = outer.width() - 2 * t;
            let h = outer.height() - 2 * t;
            if w <= 0 || h <= 0 {
                break;
            }
            let rect = DrawRect::at((outer.x1 + t) as i32, (outer.y1 + t) as i32)
                .of_size(w as u32, h as u32);
            draw_hollow_rect_mut(image, rect, overlay.color.rgb());
        }
    }
}

/// Writes an annotated slide as PNG.
pub fn save_png(image: &RgbImage, path: &Path) -> Result<(), SlideboxError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save_with_format(path, image::ImageFormat::Png)
        .map_err(|source| SlideboxError::ImageWrite {
            path: path.to_path_buf(),
            source,
        })
}
