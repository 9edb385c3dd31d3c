//! Splitting a slide's content area into per-cell search regions.
//!
//! The content area is inset by a fixed padding on every side, then each axis
//! is cut into equal slices separated by a fixed gap. Cells come back in
//! row-major order. No two cells touch, and the cells, gaps and padding
//! together cover the content area exactly.

mod infer;

pub use infer::infer_layout;

use serde::Serialize;

use crate::error::SlideboxError;
use crate::ir::{GridLayout, Region};

/// Default inset from the content area's edges, in pixels.
pub const DEFAULT_PADDING: u32 = 15;
/// Default spacing between neighbouring cells, in pixels.
pub const DEFAULT_GAP: u32 = 10;

/// Options for grid partitioning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridOptions {
    /// Pixels between neighbouring cells.
    pub gap: u32,
    /// Pixels removed from every side of the content area.
    pub padding: u32,
}

impl Default for GridOptions {
    fn default() -> Self {
        Self {
            gap: DEFAULT_GAP,
            padding: DEFAULT_PADDING,
        }
    }
}

/// One cell of a partitioned content area.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct GridCell {
    /// Position in row-major order.
    pub index: usize,
    pub row: u32,
    pub col: u32,
    /// The search region: the cell proper, inside padding and gaps.
    pub region: Region,
    /// The part of the content area that belongs to this cell: the region
    /// grown to the midpoints of the neighbouring gaps and, on the outside,
    /// to the content area's edge. Territories tile the content area.
    pub territory: Region,
}

/// A slice of one axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Span {
    lo: i64,
    hi: i64,
    territory_lo: i64,
    territory_hi: i64,
}

fn split_axis(start: i64, end: i64, n: u32, gap: i64, padding: i64) -> Option<Vec<Span>> {
    let n = i64::from(n);
    let inner_lo = start + padding;
    let usable = end - padding - inner_lo - (n - 1) * gap;
    if usable < n {
        return None;
    }

    let spans = (0..n)
        .map(|k| {
            let offset = inner_lo + k * gap;
            let lo = offset + k * usable / n;
            let hi = offset + (k + 1) * usable / n;
            Span {
                lo,
                hi,
                territory_lo: if k == 0 { start } else { lo - (gap - gap / 2) },
                territory_hi: if k == n - 1 { end } else { hi + gap / 2 },
            }
        })
        .collect();
    Some(spans)
}

/// Splits `content_area` into the cells of `layout`.
///
/// # Errors
/// Returns [`SlideboxError::InvalidLayout`] if the area is too small to give
/// every cell at least one pixel on each axis.
pub fn partition_cells(
    content_area: &Region,
    layout: GridLayout,
    opts: &GridOptions,
) -> Result<Vec<GridCell>, SlideboxError> {
    let gap = i64::from(opts.gap);
    let padding = i64::from(opts.padding);
    let too_small = || {
        SlideboxError::InvalidLayout(format!(
            "{} does not fit in {} with padding {} and gap {}",
            layout, content_area, opts.padding, opts.gap
        ))
    };

    let cols = split_axis(content_area.x1, content_area.x2, layout.cols(), gap, padding)
        .ok_or_else(too_small)?;
    let rows = split_axis(content_area.y1, content_area.y2, layout.rows(), gap, padding)
        .ok_or_else(too_small)?;

    let mut cells = Vec::with_capacity(layout.cell_count());
    for (r, row) in rows.iter().enumerate() {
        for (c, col) in cols.iter().enumerate() {
            cells.push(GridCell {
                index: cells.len(),
                row: r as u32,
                col: c as u32,
                region: Region::new(col.lo, row.lo, col.hi, row.hi),
                territory: Region::new(
                    col.territory_lo,
                    row.territory_lo,
                    col.territory_hi,
                    row.territory_hi,
                ),
            });
        }
    }
    Ok(cells)
}

/// Splits `content_area` into the search regions of `layout`, in row-major order.
pub fn partition(
    content_area: &Region,
    layout: GridLayout,
    gap: u32,
    padding: u32,
) -> Result<Vec<Region>, SlideboxError> {
    let cells = partition_cells(content_area, layout, &GridOptions { gap, padding })?;
    Ok(cells.into_iter().map(|cell| cell.region).collect())
}
