//! Core utilities shared by the greenscreen filters.
//!
//! This module provides:
//! - The [`ColorKey`] colour triple produced by the histogram quantizer
//! - Input validation for BGR images
//! - Coordinate wrapping used to tile a background

use ndarray::ArrayView3;
use serde::{Deserialize, Serialize};

use crate::error::{FilterError, Result};

/// Number of colour channels in a BGR image.
pub const BGR_CHANNELS: usize = 3;

/// A reference colour in BGR order.
///
/// When produced by the histogram quantizer this is the lower bound of the
/// winning bucket, not necessarily a colour present in the image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ColorKey {
    pub blue: u8,
    pub green: u8,
    pub red: u8,
}

impl ColorKey {
    pub const fn new(blue: u8, green: u8, red: u8) -> Self {
        Self { blue, green, red }
    }

    /// Channels as an array in BGR order.
    #[inline]
    pub fn to_array(self) -> [u8; 3] {
        [self.blue, self.green, self.red]
    }

    /// True if every channel of `pixel` differs from the key by strictly less than `threshold`.
    #[inline]
    pub fn within(self, pixel: [u8; 3], threshold: i32) -> bool {
        let key = self.to_array();
        (0..BGR_CHANNELS).all(|c| (pixel[c] as i32 - key[c] as i32).abs() < threshold)
    }
}

impl From<[u8; 3]> for ColorKey {
    fn from(bgr: [u8; 3]) -> Self {
        Self::new(bgr[0], bgr[1], bgr[2])
    }
}

/// Check that `image` is a non-empty (rows, cols, 3) array.
pub fn validate_bgr(image: &ArrayView3<u8>, parameter: &str) -> Result<()> {
    let (height, width, channels) = image.dim();
    if height == 0 || width == 0 {
        return Err(FilterError::invalid(
            parameter,
            format!("image must be non-empty, got {}x{}", width, height),
        ));
    }
    if channels != BGR_CHANNELS {
        return Err(FilterError::invalid(
            parameter,
            format!("expected {} channels, got {}", BGR_CHANNELS, channels),
        ));
    }
    Ok(())
}

/// Check that a replacement tolerance is non-negative.
pub fn validate_threshold(threshold: i32) -> Result<()> {
    if threshold < 0 {
        return Err(FilterError::invalid(
            "threshold",
            format!("must be non-negative, got {}", threshold),
        ));
    }
    Ok(())
}

/// Read the BGR pixel at (y, x).
#[inline]
pub fn pixel_at(image: &ArrayView3<u8>, y: usize, x: usize) -> [u8; 3] {
    [image[[y, x, 0]], image[[y, x, 1]], image[[y, x, 2]]]
}

/// Wrap a foreground coordinate into a background of size `len` (tiling).
#[inline]
pub fn tile_coord(coord: usize, len: usize) -> usize {
    coord % len
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array3;

    #[test]
    fn test_within_is_strict() {
        let key = ColorKey::new(10, 20, 30);
        assert!(key.within([10, 20, 30], 1));
        assert!(!key.within([11, 20, 30], 1));
        assert!(key.within([14, 16, 34], 5));
        assert!(!key.within([15, 20, 30], 5));
        assert!(!key.within([10, 20, 30], 0));
    }

    #[test]
    fn test_validate_bgr() {
        let ok = Array3::<u8>::zeros((2, 3, 3));
        assert!(validate_bgr(&ok.view(), "image").is_ok());

        let empty = Array3::<u8>::zeros((0, 3, 3));
        assert!(validate_bgr(&empty.view(), "image").is_err());

        let rgba = Array3::<u8>::zeros((2, 2, 4));
        let err = validate_bgr(&rgba.view(), "image").unwrap_err();
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_validate_threshold() {
        assert!(validate_threshold(0).is_ok());
        assert!(validate_threshold(300).is_ok());
        let err = validate_threshold(-1).unwrap_err();
        assert!(err.is_invalid_argument());
        assert!(err.to_string().contains("threshold"));
    }

    #[test]
    fn test_tile_coord_wraps() {
        assert_eq!(tile_coord(0, 3), 0);
        assert_eq!(tile_coord(4, 3), 1);
        assert_eq!(tile_coord(2, 10), 2);
    }
}
