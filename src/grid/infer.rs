//! Guessing a slide's layout when the manifest does not declare one.
//!
//! Only one- and two-column layouts are ever inferred: a slide is two columns
//! when its body content sits on both halves and the two halves do not simply
//! mirror each other (tables of contents and card grids are symmetric and
//! read as one block).
//!
//! Only shapes that carry content vote: pictures, tables and text frames
//! with text. Rules, connectors and empty frames do not.

use log::debug;

use crate::ir::{GridLayout, ShapeDescriptor, SlideGeometry};

/// Shapes starting in this top percentage of the slide are headings, not body.
const HEADING_BAND_PERCENT: i64 = 15;
/// Shapes starting at or below this percentage of the slide height are footers.
const FOOTER_LINE_PERCENT: i64 = 90;
/// Two tops closer than this percentage of the slide height form a pair.
const PAIR_TOLERANCE_PERCENT: i64 = 8;
/// Minimum shapes per side before a layout can count as symmetric.
const SYMMETRY_MIN_ITEMS: usize = 3;
/// Largest difference in shape count between the sides of a symmetric layout.
const SYMMETRY_MAX_COUNT_DIFF: usize = 2;

/// Infers the layout of a slide from its content shapes.
///
/// `content` should already have template decoration removed (see
/// [`MasterElementClassifier::content_shapes`](crate::classify::MasterElementClassifier::content_shapes)).
pub fn infer_layout(content: &[&ShapeDescriptor], geometry: &SlideGeometry) -> GridLayout {
    let heading_limit = geometry.percent_of_height(HEADING_BAND_PERCENT);
    let footer_line = geometry.percent_of_height(FOOTER_LINE_PERCENT);
    let mid_x = i128::from(geometry.slide_width() / 2);

    let (left, right): (Vec<&ShapeDescriptor>, Vec<&ShapeDescriptor>) = content
        .iter()
        .copied()
        .filter(|shape| shape.carries_content())
        .filter(|shape| shape.bounds.y1 > heading_limit && shape.bounds.y1 < footer_line)
        .partition(|shape| center_x(shape) < mid_x);

    let layout = if !left.is_empty()
        && !right.is_empty()
        && !is_symmetric(&left, &right, geometry.percent_of_height(PAIR_TOLERANCE_PERCENT))
    {
        GridLayout::ONE_BY_TWO
    } else {
        GridLayout::ONE_BY_ONE
    };

    debug!(
        "inferred {} from {} left / {} right body shape(s)",
        layout,
        left.len(),
        right.len()
    );
    layout
}

/// Left edge plus half the width, floored.
fn center_x(shape: &ShapeDescriptor) -> i128 {
    let (x1, x2) = (i128::from(shape.bounds.x1), i128::from(shape.bounds.x2));
    x1 + (x2 - x1).div_euclid(2)
}

/// Left and right halves mirror each other: enough shapes on both sides, similar
/// counts, and at least 70% of the smaller side pairs up with a shape whose top
/// is less than `tolerance` away on the other side.
fn is_symmetric(left: &[&ShapeDescriptor], right: &[&ShapeDescriptor], tolerance: i64) -> bool {
    if left.len() < SYMMETRY_MIN_ITEMS || right.len() < SYMMETRY_MIN_ITEMS {
        return false;
    }
    if left.len().abs_diff(right.len()) > SYMMETRY_MAX_COUNT_DIFF {
        return false;
    }

    let mut left_tops: Vec<i64> = left.iter().map(|s| s.bounds.y1).collect();
    let mut right_tops: Vec<i64> = right.iter().map(|s| s.bounds.y1).collect();
    left_tops.sort_unstable();
    right_tops.sort_unstable();

    let tolerance = tolerance.unsigned_abs();
    let mut used = vec![false; right_tops.len()];
    let mut pairs = 0usize;
    for lt in &left_tops {
        let partner = right_tops
            .iter()
            .enumerate()
            .find(|(i, rt)| !used[*i] && lt.abs_diff(**rt) < tolerance);
        if let Some((i, _)) = partner {
            used[i] = true;
            pairs += 1;
        }
    }

    let smaller = left_tops.len().min(right_tops.len());
    pairs * 10 >= smaller * 7
}
