//! Shape descriptors: the per-slide shape metadata the classifier reads.

use serde::{Deserialize, Serialize};

use super::ids::ShapeId;
use super::rect::Rect;
use super::space::Native;

/// Which placeholder slot a placeholder shape fills in its layout.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaceholderKind {
    SectionTitle,
    Logo,
    PageNumber,
    Footer,
    Date,
}

/// The kind of a shape as declared by the deck.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "placeholder", rename_all = "snake_case")]
pub enum ShapeKind {
    Picture,
    TextBox,
    Placeholder(PlaceholderKind),
    Line,
    /// Tables, groups and drawn shapes.
    Other,
}

impl ShapeKind {
    /// Returns the placeholder slot, if this is a placeholder.
    pub fn placeholder(&self) -> Option<PlaceholderKind> {
        match self {
            ShapeKind::Placeholder(kind) => Some(*kind),
            _ => None,
        }
    }
}

/// One shape on a slide, in native units.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeDescriptor {
    /// Identifier of the shape within its slide.
    pub id: ShapeId,

    /// Declared shape kind.
    pub kind: ShapeKind,

    /// Frame of the shape in native units.
    pub bounds: Rect<Native>,

    /// Text extracted from the shape, if it carries any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

impl ShapeDescriptor {
    /// Creates a shape without text.
    pub fn new(id: impl Into<ShapeId>, kind: ShapeKind, bounds: Rect<Native>) -> Self {
        Self {
            id: id.into(),
            kind,
            bounds,
            text: None,
        }
    }

    /// Sets the shape's text.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Returns the text with surrounding whitespace removed, if any.
    pub fn trimmed_text(&self) -> Option<&str> {
        self.text.as_deref().map(str::trim)
    }

    /// Returns true if the shape puts something readable on the slide:
    /// pictures and tables always do, lines never do, and text frames only
    /// when they hold non-blank text.
    pub fn carries_content(&self) -> bool {
        match self.kind {
            ShapeKind::Picture | ShapeKind::Other => true,
            ShapeKind::Line => false,
            ShapeKind::TextBox | ShapeKind::Placeholder(_) => {
                self.trimmed_text().is_some_and(|text| !text.is_empty())
            }
        }
    }
}
