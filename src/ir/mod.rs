//! Intermediate Representation (IR) for slidebox.
//!
//! This module defines the data every stage of the pipeline passes around:
//! slide geometry, the shapes declared on a slide, declared grid layouts and
//! rectangles in either native document units or raster pixels.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: Rectangles carry a marker type for their coordinate
//!    space, so native shape frames cannot be scanned as pixel regions
//!    without going through [`SlideGeometry`].
//!
//! 2. **Canonical Format**: All rectangles are XYXY with an exclusive
//!    max corner and integer coordinates.
//!
//! 3. **Permissive Construction**: Shape frames may be degenerate (lines have
//!    zero height); consumers check [`Rect::is_empty`] rather than the IR
//!    refusing to represent them.
//!
//! # Example
//!
//! ```
//! use slidebox::ir::{Rect, ShapeDescriptor, ShapeKind, SlideGeometry};
//!
//! let geometry = SlideGeometry::new(9_144_000, 6_858_000, 1500, 1125).unwrap();
//! let shape = ShapeDescriptor::new(2u64, ShapeKind::TextBox, Rect::from_xywh(0, 0, 914_400, 457_200))
//!     .with_text("1. 질병");
//! let pixels = geometry.to_pixels(&shape.bounds);
//! assert_eq!(pixels.x2, 150);
//! ```

mod geometry;
mod ids;
mod layout;
pub mod manifest;
mod rect;
mod shape;
mod space;

// Re-export core types for convenient access
pub use geometry::SlideGeometry;
pub use ids::ShapeId;
pub use layout::GridLayout;
pub use manifest::{DeckManifest, SlideManifest};
pub use rect::Rect;
pub use shape::{PlaceholderKind, ShapeDescriptor, ShapeKind};
pub use space::{Native, Pixel};

/// A rectangle in raster pixel coordinates.
pub type Region = Rect<Pixel>;
