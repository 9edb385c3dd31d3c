//! Mapping between a slide's native coordinate system and its raster.

use serde::Serialize;

use super::rect::Rect;
use super::space::{Native, Pixel};
use crate::error::SlideboxError;

/// Size of a slide in native units together with the size of its raster.
///
/// A constructed value always has positive dimensions, so both scale factors
/// are strictly positive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SlideGeometry {
    slide_width: i64,
    slide_height: i64,
    image_width: u32,
    image_height: u32,
}

impl SlideGeometry {
    /// Creates a geometry, rejecting zero or negative sizes.
    pub fn new(
        slide_width: i64,
        slide_height: i64,
        image_width: u32,
        image_height: u32,
    ) -> Result<Self, SlideboxError> {
        if slide_width <= 0 || slide_height <= 0 {
            return Err(SlideboxError::InvalidGeometry(format!(
                "slide size {}x{} must be positive",
                slide_width, slide_height
            )));
        }
        if image_width == 0 || image_height == 0 {
            return Err(SlideboxError::InvalidGeometry(format!(
                "image size {}x{} must be positive",
                image_width, image_height
            )));
        }
        Ok(Self {
            slide_width,
            slide_height,
            image_width,
            image_height,
        })
    }

    #[inline]
    pub fn slide_width(&self) -> i64 {
        self.slide_width
    }

    #[inline]
    pub fn slide_height(&self) -> i64 {
        self.slide_height
    }

    #[inline]
    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    #[inline]
    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    /// Pixels per native unit along x.
    #[inline]
    pub fn scale_x(&self) -> f64 {
        f64::from(self.image_width) / self.slide_width as f64
    }

    /// Pixels per native unit along y.
    #[inline]
    pub fn scale_y(&self) -> f64 {
        f64::from(self.image_height) / self.slide_height as f64
    }

    /// `percent` percent of the slide width, floored, in native units.
    #[inline]
    pub fn percent_of_width(&self, percent: i64) -> i64 {
        percent_of(self.slide_width, percent)
    }

    /// `percent` percent of the slide height, floored, in native units.
    #[inline]
    pub fn percent_of_height(&self, percent: i64) -> i64 {
        percent_of(self.slide_height, percent)
    }

    /// Projects a native rectangle onto the raster.
    ///
    /// Each coordinate is floored, using exact integer arithmetic so the same
    /// shape always lands on the same pixels. The result is not clamped;
    /// shapes hanging off the slide stay off the image. Coordinates too large
    /// for the raster saturate at the `i64` range.
    pub fn to_pixels(&self, rect: &Rect<Native>) -> Rect<Pixel> {
        let px = |v: i64| scale_floor(v, self.image_width, self.slide_width);
        let py = |v: i64| scale_floor(v, self.image_height, self.slide_height);
        Rect::new(px(rect.x1), py(rect.y1), px(rect.x2), py(rect.y2))
    }
}

fn scale_floor(value: i64, pixels: u32, units: i64) -> i64 {
    saturate((i128::from(value) * i128::from(pixels)).div_euclid(i128::from(units)))
}

fn percent_of(value: i64, percent: i64) -> i64 {
    saturate((i128::from(value) * i128::from(percent)).div_euclid(100))
}

fn saturate(value: i128) -> i64 {
    value.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64
}
