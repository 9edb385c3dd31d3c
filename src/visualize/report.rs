//! Visualization result types and their text rendering.

use serde::Serialize;
use std::fmt;

use super::color::OverlayColor;
use super::BoxMode;
use crate::adjust::Edge;
use crate::classify::ExclusionReport;
use crate::ir::{GridLayout, Region};

/// One box to draw over a slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OverlayBox {
    /// Row-major index of the grid cell the box came from.
    pub cell: usize,
    /// The final, adjusted rectangle.
    pub rect: Region,
    /// The tight content bounds found in the cell.
    pub detected: Region,
    pub color: OverlayColor,
    pub line_width: u32,
    /// Edges that still touch content after the maximum adjustment.
    pub exhausted: Vec<Edge>,
}

impl OverlayBox {
    pub fn is_exhausted(&self) -> bool {
        !self.exhausted.is_empty()
    }
}

impl fmt::Display for OverlayBox {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cell {}: {} (detected {})",
            self.cell, self.rect, self.detected
        )?;
        if self.is_exhausted() {
            let edges: Vec<String> = self.exhausted.iter().map(Edge::to_string).collect();
            write!(f, " [EXHAUSTED: {}]", edges.join(", "))?;
        }
        Ok(())
    }
}

/// Everything computed for one slide.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Visualization {
    /// How the boxes were placed.
    pub mode: BoxMode,
    /// The layout the slide was partitioned with (`1x1` in single-box mode).
    pub layout: GridLayout,
    /// True when the layout was inferred rather than declared.
    pub layout_inferred: bool,
    /// Boxes in cell order, one per cell that held content.
    pub boxes: Vec<OverlayBox>,
    /// Cells in which no content was found.
    pub empty_cells: Vec<usize>,
    pub exclusions: ExclusionReport,
}

impl Visualization {
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Number of boxes with at least one exhausted edge.
    pub fn exhausted_count(&self) -> usize {
        self.boxes.iter().filter(|b| b.is_exhausted()).count()
    }
}

impl fmt::Display for Visualization {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.mode {
            BoxMode::Single => write!(f, "Single box")?,
            BoxMode::Grid => {
                write!(f, "Layout {}", self.layout)?;
                if self.layout_inferred {
                    write!(f, " (inferred)")?;
                }
            }
        }
        writeln!(
            f,
            ": {} box(es), {} empty cell(s)",
            self.box_count(),
            self.empty_cells.len()
        )?;

        for overlay in &self.boxes {
            writeln!(f, "  {}", overlay)?;
        }
        for cell in &self.empty_cells {
            writeln!(f, "  cell {}: no content", cell)?;
        }

        write!(f, "{}", self.exclusions)
    }
}
