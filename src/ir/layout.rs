//! Declared grid layouts.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::SlideboxError;

/// The arrangement of content cells on a slide, as `rows x cols`.
///
/// Written as `"1x2"` (one row, two side-by-side cells) in manifests and on
/// the command line. Both counts are at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct GridLayout {
    rows: u32,
    cols: u32,
}

impl GridLayout {
    pub const ONE_BY_ONE: Self = Self { rows: 1, cols: 1 };
    pub const ONE_BY_TWO: Self = Self { rows: 1, cols: 2 };
    pub const TWO_BY_ONE: Self = Self { rows: 2, cols: 1 };
    pub const TWO_BY_TWO: Self = Self { rows: 2, cols: 2 };

    /// Creates a layout, rejecting zero rows or columns.
    pub fn new(rows: u32, cols: u32) -> Result<Self, SlideboxError> {
        if rows == 0 || cols == 0 {
            return Err(SlideboxError::InvalidLayout(format!(
                "{}x{} (rows and columns must be at least 1)",
                rows, cols
            )));
        }
        Ok(Self { rows, cols })
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> u32 {
        self.cols
    }

    /// Number of cells, in row-major order.
    #[inline]
    pub fn cell_count(&self) -> usize {
        self.rows as usize * self.cols as usize
    }
}

impl Default for GridLayout {
    fn default() -> Self {
        Self::ONE_BY_ONE
    }
}

impl fmt::Display for GridLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

impl FromStr for GridLayout {
    type Err = SlideboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SlideboxError::InvalidLayout(format!("'{}' (expected ROWSxCOLS, e.g. 1x2)", s));
        let (rows, cols) = s
            .trim()
            .split_once(['x', 'X'])
            .ok_or_else(invalid)?;
        let rows: u32 = rows.trim().parse().map_err(|_| invalid())?;
        let cols: u32 = cols.trim().parse().map_err(|_| invalid())?;
        Self::new(rows, cols)
    }
}

impl TryFrom<String> for GridLayout {
    type Error = SlideboxError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GridLayout> for String {
    fn from(layout: GridLayout) -> Self {
        layout.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_layouts() {
        assert_eq!("1x1".parse::<GridLayout>().unwrap(), GridLayout::ONE_BY_ONE);
        assert_eq!("1x2".parse::<GridLayout>().unwrap(), GridLayout::ONE_BY_TWO);
        assert_eq!(" 2X2 ".parse::<GridLayout>().unwrap(), GridLayout::TWO_BY_TWO);
        assert_eq!("3x4".parse::<GridLayout>().unwrap().cell_count(), 12);
    }

    #[test]
    fn test_rejects_bad_layouts() {
        assert!("0x2".parse::<GridLayout>().is_err());
        assert!("2".parse::<GridLayout>().is_err());
        assert!("axb".parse::<GridLayout>().is_err());
        assert!(GridLayout::new(1, 0).is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&GridLayout::TWO_BY_ONE).unwrap();
        assert_eq!(json, "\"2x1\"");
        let back: GridLayout = serde_json::from_str("\"1x2\"").unwrap();
        assert_eq!(back, GridLayout::ONE_BY_TWO);
        assert!(serde_json::from_str::<GridLayout>("\"0x0\"").is_err());
    }
}
