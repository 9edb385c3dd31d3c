//! Recognising recurring template decoration.
//!
//! Slide masters stamp the same banners, watermarks, logos, page numbers and
//! footers onto every slide. None of that is content. The classifier looks at
//! a shape's position (as a fraction of the slide), its text and its declared
//! kind and decides whether it is one of those decorations.
//!
//! Rules are independent and OR-combined: the first one that matches names the
//! category, and a shape no rule matches is content.

mod report;

pub use report::{Exclusion, ExclusionReport, MasterCategory};

use log::debug;
use regex::Regex;

use crate::ir::{PlaceholderKind, ShapeDescriptor, ShapeKind, SlideGeometry};

/// Shapes whose top lies within this top percentage of the slide are in the header band.
const HEADER_BAND_PERCENT: i64 = 12;
/// Shapes whose top lies within this bottom percentage of the slide are in the footer band.
const FOOTER_BAND_PERCENT: i64 = 8;
/// Shapes whose left edge lies within this right percentage of the slide start in the right band.
const RIGHT_BAND_PERCENT: i64 = 15;
const DIVIDER_MIN_WIDTH_PERCENT: i64 = 80;
const DIVIDER_MAX_HEIGHT_PERCENT: i64 = 1;
const WATERMARK_MAX_WIDTH_PERCENT: i64 = 20;

/// "digits, period, optional space, letters": `1. 질병`, `2.제품`, `3. Overview`.
const SECTION_TITLE_PATTERN: &str = r"^\d+\.\s*\p{L}+$";

/// A shape measured against its slide.
struct ShapeFrame<'a> {
    shape: &'a ShapeDescriptor,
    geometry: &'a SlideGeometry,
    section_title: &'a Regex,
}

impl ShapeFrame<'_> {
    fn in_header_band(&self) -> bool {
        self.shape.bounds.y1 <= self.geometry.percent_of_height(HEADER_BAND_PERCENT)
    }

    fn in_footer_band(&self) -> bool {
        self.shape.bounds.y1 >= self.geometry.percent_of_height(100 - FOOTER_BAND_PERCENT)
    }

    /// The whole shape lies in the right band, judged by its left edge.
    fn starts_in_right_band(&self) -> bool {
        self.shape.bounds.x1 >= self.geometry.percent_of_width(100 - RIGHT_BAND_PERCENT)
    }

    fn at_least_wide(&self, percent: i64) -> bool {
        self.shape.bounds.width() >= self.geometry.percent_of_width(percent)
    }

    fn is_placeholder(&self, kind: PlaceholderKind) -> bool {
        self.shape.kind == ShapeKind::Placeholder(kind)
    }
}

type Predicate = fn(&ShapeFrame<'_>) -> bool;

fn is_section_banner(f: &ShapeFrame<'_>) -> bool {
    f.in_header_band()
        && f
            .shape
            .trimmed_text()
            .is_some_and(|text| f.section_title.is_match(text))
}

fn is_header_divider(f: &ShapeFrame<'_>) -> bool {
    f.in_header_band()
        && f.at_least_wide(DIVIDER_MIN_WIDTH_PERCENT)
        && f.shape.bounds.height() < f.geometry.percent_of_height(DIVIDER_MAX_HEIGHT_PERCENT)
}

fn is_watermark(f: &ShapeFrame<'_>) -> bool {
    f.in_header_band()
        && f.starts_in_right_band()
        && !f.at_least_wide(WATERMARK_MAX_WIDTH_PERCENT)
}

fn is_logo(f: &ShapeFrame<'_>) -> bool {
    f.in_footer_band() && f.starts_in_right_band()
}

fn is_page_number(f: &ShapeFrame<'_>) -> bool {
    f.in_footer_band() || f.is_placeholder(PlaceholderKind::PageNumber)
}

fn is_footer_or_date(f: &ShapeFrame<'_>) -> bool {
    f.is_placeholder(PlaceholderKind::Footer) || f.is_placeholder(PlaceholderKind::Date)
}

/// The rule table, evaluated in order.
const RULES: [(MasterCategory, Predicate); 6] = [
    (MasterCategory::SectionBanner, is_section_banner),
    (MasterCategory::HeaderDivider, is_header_divider),
    (MasterCategory::Watermark, is_watermark),
    (MasterCategory::Logo, is_logo),
    (MasterCategory::PageNumber, is_page_number),
    (MasterCategory::FooterOrDate, is_footer_or_date),
];

/// Decides which shapes are template decoration.
///
/// Holds no per-slide state; one instance can classify any number of slides,
/// from any number of threads.
#[derive(Clone, Debug)]
pub struct MasterElementClassifier {
    section_title: Regex,
}

impl Default for MasterElementClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MasterElementClassifier {
    pub fn new() -> Self {
        Self {
            section_title: Regex::new(SECTION_TITLE_PATTERN)
                .expect("section title pattern is a valid regex"),
        }
    }

    /// Returns the category of template decoration `shape` belongs to, or
    /// `None` if it is content.
    pub fn classify(
        &self,
        shape: &ShapeDescriptor,
        geometry: &SlideGeometry,
    ) -> Option<MasterCategory> {
        let frame = ShapeFrame {
            shape,
            geometry,
            section_title: &self.section_title,
        };
        RULES
            .iter()
            .find(|(_, matches)| matches(&frame))
            .map(|(category, _)| *category)
    }

    /// Returns true if `shape` should be left out of content consideration.
    pub fn is_excluded(&self, shape: &ShapeDescriptor, geometry: &SlideGeometry) -> bool {
        self.classify(shape, geometry).is_some()
    }

    /// Classifies every shape on a slide.
    pub fn classify_slide(
        &self,
        shapes: &[ShapeDescriptor],
        geometry: &SlideGeometry,
    ) -> ExclusionReport {
        let mut report = ExclusionReport::new();

        for shape in shapes {
            match self.classify(shape, geometry) {
                Some(category) => {
                    debug!("shape {} excluded as {}", shape.id, category);
                    report.excluded.push(Exclusion {
                        shape_id: shape.id,
                        category,
                        bounds: shape.bounds,
                    });
                }
                None => report.content.push(shape.id),
            }
        }

        report
    }

    /// Returns the shapes that are content, in slide order.
    pub fn content_shapes<'a>(
        &self,
        shapes: &'a [ShapeDescriptor],
        geometry: &SlideGeometry,
    ) -> Vec<&'a ShapeDescriptor> {
        shapes
            .iter()
            .filter(|shape| !self.is_excluded(shape, geometry))
            .collect()
    }
}
