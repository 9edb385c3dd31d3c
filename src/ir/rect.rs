//! Axis-aligned rectangles in canonical XYXY format.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

use super::space::Pixel;

/// An axis-aligned rectangle in XYXY format `(x1, y1, x2, y2)`.
///
/// `x1`/`y1` are inclusive and `x2`/`y2` exclusive, so a single pixel at
/// `(px, py)` is the rectangle `(px, py, px + 1, py + 1)`.
///
/// The `TSpace` parameter should be either [`Pixel`](super::Pixel) or
/// [`Native`](super::Native), so a shape's document-unit bounds can never be
/// handed to code that scans raster pixels without going through
/// [`SlideGeometry`](super::SlideGeometry).
///
/// Note: the constructor does NOT enforce `x1 < x2`. Shape metadata coming
/// from a deck may be degenerate (zero-height lines, negative offsets), and
/// it is up to the caller to check [`Rect::is_empty`] before scanning.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rect<TSpace> {
    pub x1: i64,
    pub y1: i64,
    pub x2: i64,
    pub y2: i64,
    _space: PhantomData<TSpace>,
}

impl<TSpace> Rect<TSpace> {
    /// Creates a new rectangle from explicit corner coordinates.
    #[inline]
    pub fn new(x1: i64, y1: i64, x2: i64, y2: i64) -> Self {
        Self {
            x1,
            y1,
            x2,
            y2,
            _space: PhantomData,
        }
    }

    /// Creates a rectangle from its top-left corner and size.
    ///
    /// This is how presentation formats store shape frames.
    #[inline]
    pub fn from_xywh(x: i64, y: i64, width: i64, height: i64) -> Self {
        Self::new(x, y, x.saturating_add(width), y.saturating_add(height))
    }

    /// Returns the width. May be negative if the rectangle is malformed;
    /// saturates at the `i64` range.
    #[inline]
    pub fn width(&self) -> i64 {
        self.x2.saturating_sub(self.x1)
    }

    /// Returns the height. May be negative if the rectangle is malformed;
    /// saturates at the `i64` range.
    #[inline]
    pub fn height(&self) -> i64 {
        self.y2.saturating_sub(self.y1)
    }

    #[inline]
    pub fn area(&self) -> i64 {
        self.width().saturating_mul(self.height())
    }

    /// Returns true if the rectangle is properly ordered (min <= max for both axes).
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.x1 <= self.x2 && self.y1 <= self.y2
    }

    /// Returns true if the rectangle covers no area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x2 <= self.x1 || self.y2 <= self.y1
    }

    /// Returns true if `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Self) -> bool {
        other.x1 >= self.x1 && other.y1 >= self.y1 && other.x2 <= self.x2 && other.y2 <= self.y2
    }

    /// Returns true if the two rectangles share at least one unit of area.
    pub fn overlaps(&self, other: &Self) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }

    /// Returns the common area of two rectangles, or `None` if they do not overlap.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let out = Self::new(
            self.x1.max(other.x1),
            self.y1.max(other.y1),
            self.x2.min(other.x2),
            self.y2.min(other.y2),
        );
        (!out.is_empty()).then_some(out)
    }

    /// Smallest rectangle covering both.
    #[inline]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.x1.min(other.x1),
            self.y1.min(other.y1),
            self.x2.max(other.x2),
            self.y2.max(other.y2),
        )
    }

    /// Grows the rectangle by `amount` on every side. Negative values shrink it.
    #[inline]
    pub fn expand(&self, amount: i64) -> Self {
        Self::new(
            self.x1.saturating_sub(amount),
            self.y1.saturating_sub(amount),
            self.x2.saturating_add(amount),
            self.y2.saturating_add(amount),
        )
    }

    /// Returns the coordinates as an `(x1, y1, x2, y2)` tuple.
    #[inline]
    pub fn to_xyxy(&self) -> (i64, i64, i64, i64) {
        (self.x1, self.y1, self.x2, self.y2)
    }
}

impl Rect<Pixel> {
    /// The full area of an image of the given size.
    pub fn image_bounds(width: u32, height: u32) -> Self {
        Self::new(0, 0, i64::from(width), i64::from(height))
    }

    /// Clamps the rectangle into `[0, width) x [0, height)`.
    ///
    /// Returns `None` if nothing of the rectangle is left inside the image.
    pub fn clamp_to_image(&self, width: u32, height: u32) -> Option<Self> {
        self.intersect(&Self::image_bounds(width, height))
    }
}

impl<TSpace> fmt::Debug for Rect<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rect")
            .field("x1", &self.x1)
            .field("y1", &self.y1)
            .field("x2", &self.x2)
            .field("y2", &self.y2)
            .finish()
    }
}

impl<TSpace> fmt::Display for Rect<TSpace> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {}, {})", self.x1, self.y1, self.x2, self.y2)
    }
}

impl<TSpace> Default for Rect<TSpace> {
    fn default() -> Self {
        Self::new(0, 0, 0, 0)
    }
}

// Custom serde implementation to avoid TSpace: Serialize/Deserialize bounds
impl<TSpace> Serialize for Rect<TSpace> {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeStruct;
        let mut state = serializer.serialize_struct("Rect", 4)?;
        state.serialize_field("x1", &self.x1)?;
        state.serialize_field("y1", &self.y1)?;
        state.serialize_field("x2", &self.x2)?;
        state.serialize_field("y2", &self.y2)?;
        state.end()
    }
}

impl<'de, TSpace> Deserialize<'de> for Rect<TSpace> {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct RectData {
            x1: i64,
            y1: i64,
            x2: i64,
            y2: i64,
        }
        let data = RectData::deserialize(deserializer)?;
        Ok(Rect::new(data.x1, data.y1, data.x2, data.y2))
    }
}
