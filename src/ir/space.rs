//! Coordinate space marker types.
//!
//! These are zero-sized types (ZSTs) used as type parameters to distinguish
//! between different coordinate systems at compile time.

use std::fmt;

/// Marker type for raster pixel coordinates.
///
/// (0, 0) is the top-left pixel of the rendered slide image; x grows to the
/// right and y grows downwards.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pixel {}

/// Marker type for native document units.
///
/// These are the units the presentation format stores shape positions in
/// (for PPTX, English Metric Units where 914400 equals one inch). They share
/// the pixel space's orientation but not its scale.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub enum Native {}

impl fmt::Debug for Pixel {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}

impl fmt::Debug for Native {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {}
    }
}
