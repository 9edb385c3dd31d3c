//! Exclusion report types.
//!
//! The classifier's verdicts do not feed the box geometry; they are kept so
//! the CLI and debugging output can show which shapes were treated as
//! template decoration and why.

use serde::Serialize;
use std::fmt;

use crate::ir::{Native, Rect, ShapeId};

/// Why a shape was recognised as recurring template decoration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MasterCategory {
    /// A numbered section title such as "1. 질병" near the top of the slide.
    SectionBanner,
    /// A full-width hairline under the header.
    HeaderDivider,
    /// A small mark in the top-right corner ("Confidential" and the like).
    Watermark,
    /// A small element in the bottom-right corner.
    Logo,
    /// A slide number placeholder or anything else in the bottom band.
    PageNumber,
    /// A footer or date placeholder.
    FooterOrDate,
}

impl fmt::Display for MasterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MasterCategory::SectionBanner => "section banner",
            MasterCategory::HeaderDivider => "header divider",
            MasterCategory::Watermark => "watermark",
            MasterCategory::Logo => "logo",
            MasterCategory::PageNumber => "page number",
            MasterCategory::FooterOrDate => "footer/date",
        };
        f.write_str(name)
    }
}

/// One excluded shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Exclusion {
    pub shape_id: ShapeId,
    pub category: MasterCategory,
    pub bounds: Rect<Native>,
}

impl fmt::Display for Exclusion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "shape {} at {}: {}",
            self.shape_id, self.bounds, self.category
        )
    }
}

/// The classification of every shape on a slide.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ExclusionReport {
    /// Shapes recognised as template decoration, in slide order.
    pub excluded: Vec<Exclusion>,

    /// Shapes treated as slide content, in slide order.
    pub content: Vec<ShapeId>,
}

impl ExclusionReport {
    /// Creates a new empty report.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn excluded_count(&self) -> usize {
        self.excluded.len()
    }

    pub fn content_count(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the given shape was excluded.
    pub fn is_excluded(&self, id: ShapeId) -> bool {
        self.excluded.iter().any(|e| e.shape_id == id)
    }

    /// Number of exclusions in the given category.
    pub fn count_of(&self, category: MasterCategory) -> usize {
        self.excluded
            .iter()
            .filter(|e| e.category == category)
            .count()
    }
}

impl fmt::Display for ExclusionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} content shape(s), {} template element(s) excluded",
            self.content_count(),
            self.excluded_count()
        )?;

        for exclusion in &self.excluded {
            writeln!(f, "  [EXCLUDED] {}", exclusion)?;
        }

        Ok(())
    }
}
