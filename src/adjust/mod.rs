//! Moving box edges off the content they would be drawn over.
//!
//! A box drawn tight around detected content paints its border straight onto
//! the content's outermost pixels. The adjuster pushes each edge outward, one
//! pixel at a time, until a band of `line_width + 2` pixels straddling the
//! edge holds no content, giving up after `max_adjust` pixels.
//!
//! Edges are handled one after another (top, bottom, left, right). The left
//! and right bands span the already-adjusted vertical extent, but the top and
//! bottom bands are not re-checked once the sides have moved, so a corner may
//! still touch content when two edges both had to move.

use image::RgbImage;
use log::{debug, warn};
use serde::Serialize;
use std::fmt;

use crate::ir::Region;
use crate::raster::{region_has_content, DEFAULT_BACKGROUND_THRESHOLD};

/// Default maximum number of pixels an edge may move.
pub const DEFAULT_MAX_ADJUST: u32 = 20;
/// Default border line width in pixels.
pub const DEFAULT_LINE_WIDTH: u32 = 4;

/// One side of a box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Edge {
    Top,
    Bottom,
    Left,
    Right,
}

impl Edge {
    /// All edges in adjustment order.
    pub const ALL: [Edge; 4] = [Edge::Top, Edge::Bottom, Edge::Left, Edge::Right];
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Edge::Top => "top",
            Edge::Bottom => "bottom",
            Edge::Left => "left",
            Edge::Right => "right",
        };
        f.write_str(name)
    }
}

/// Options for edge adjustment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdjustOptions {
    /// Width of the border that will be drawn.
    pub line_width: u32,
    /// Maximum distance, in pixels, an edge may move.
    pub max_adjust: u32,
    /// Per-channel value at or above which a pixel is background.
    pub background_threshold: u8,
}

impl Default for AdjustOptions {
    fn default() -> Self {
        Self {
            line_width: DEFAULT_LINE_WIDTH,
            max_adjust: DEFAULT_MAX_ADJUST,
            background_threshold: DEFAULT_BACKGROUND_THRESHOLD,
        }
    }
}

impl AdjustOptions {
    /// Thickness of the band checked around an edge.
    #[inline]
    pub fn band_width(&self) -> i64 {
        i64::from(self.line_width) + 2
    }
}

/// The outcome of adjusting one box.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AdjustedBox {
    /// The adjusted rectangle.
    pub rect: Region,
    /// Edges that could not be cleared and sit at their outermost allowed position.
    pub exhausted: Vec<Edge>,
}

/// The band of pixels checked for an edge at position `pos`.
///
/// For horizontal edges `pos` is a y coordinate and `span` the box's x range;
/// for vertical edges the other way around.
pub fn edge_band(edge: Edge, pos: i64, span: (i64, i64), band_width: i64) -> Region {
    let lo = pos - band_width / 2;
    let hi = lo + band_width;
    match edge {
        Edge::Top | Edge::Bottom => Region::new(span.0, lo, span.1, hi),
        Edge::Left | Edge::Right => Region::new(lo, span.0, hi, span.1),
    }
}

/// Walks an edge from `start` in direction `dir` until `is_clear` holds.
///
/// Returns the settled position and whether it is clear. The edge never moves
/// past `stop` nor more than `max_adjust` pixels.
fn settle(
    start: i64,
    dir: i64,
    stop: i64,
    max_adjust: i64,
    mut is_clear: impl FnMut(i64) -> bool,
) -> (i64, bool) {
    for offset in 0..=max_adjust {
        let pos = start + dir * offset;
        if (pos - stop) * dir > 0 {
            return (stop, false);
        }
        if is_clear(pos) {
            return (pos, true);
        }
    }
    let last = start + dir * max_adjust;
    if (last - stop) * dir > 0 {
        (stop, false)
    } else {
        (last, false)
    }
}

/// Pushes each edge of `rect` outward until its border band is free of content.
///
/// `limit` bounds how far the box may grow (typically the originating search
/// region expanded by `max_adjust`); the result is additionally kept inside
/// the image and within `max_adjust` of the original edges. Edges that never
/// clear end at their outermost allowed position and are listed in
/// [`AdjustedBox::exhausted`]; this is not an error.
pub fn adjust(
    raster: &RgbImage,
    rect: &Region,
    limit: &Region,
    opts: &AdjustOptions,
) -> AdjustedBox {
    let max_adjust = i64::from(opts.max_adjust);
    let band_width = opts.band_width();
    let threshold = opts.background_threshold;

    let bounds = Region::image_bounds(raster.width(), raster.height())
        .intersect(limit)
        .and_then(|b| b.intersect(&rect.expand(max_adjust)));
    let Some((bounds, start)) = bounds.and_then(|b| rect.intersect(&b).map(|r| (b, r))) else {
        warn!("box {} lies outside its limit {}; left unadjusted", rect, limit);
        return AdjustedBox {
            rect: *rect,
            exhausted: Edge::ALL.to_vec(),
        };
    };

    let clear = |edge: Edge, pos: i64, span: (i64, i64)| {
        !region_has_content(raster, &edge_band(edge, pos, span, band_width), threshold)
    };

    let mut exhausted = Vec::new();
    let (x1, x2) = (start.x1, start.x2);

    let (y1, ok) = settle(start.y1, -1, bounds.y1, max_adjust, |pos| {
        clear(Edge::Top, pos, (x1, x2))
    });
    if !ok {
        exhausted.push(Edge::Top);
    }

    let (y2, ok) = settle(start.y2, 1, bounds.y2, max_adjust, |pos| {
        clear(Edge::Bottom, pos, (x1, x2))
    });
    if !ok {
        exhausted.push(Edge::Bottom);
    }

    let (x1, ok) = settle(start.x1, -1, bounds.x1, max_adjust, |pos| {
        clear(Edge::Left, pos, (y1, y2))
    });
    if !ok {
        exhausted.push(Edge::Left);
    }

    let (x2, ok) = settle(start.x2, 1, bounds.x2, max_adjust, |pos| {
        clear(Edge::Right, pos, (y1, y2))
    });
    if !ok {
        exhausted.push(Edge::Right);
    }

    let adjusted = Region::new(x1, y1, x2, y2);
    if exhausted.is_empty() {
        debug!("adjusted {} -> {}", rect, adjusted);
    } else {
        debug!(
            "adjusted {} -> {} (exhausted: {:?})",
            rect, adjusted, exhausted
        );
    }

    AdjustedBox {
        rect: adjusted,
        exhausted,
    }
}
