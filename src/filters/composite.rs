//! Threshold compositing ("green screen").
//!
//! Every foreground pixel whose blue, green and red channels are all strictly
//! closer than `threshold` to a key colour is replaced with the background pixel at
//! `(row % bg_rows, col % bg_cols)`. A smaller background therefore repeats across
//! the foreground, and a larger one is cropped to its top-left corner.
//!
//! Decisions are independent per pixel: hard replacement, no blending.

use ndarray::{Array2, Array3, ArrayView3};
use rayon::prelude::*;

use super::core::{
    pixel_at, tile_coord, validate_bgr, validate_threshold, ColorKey, BGR_CHANNELS,
};
use crate::error::{FilterError, Result};

/// Overlay result with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct OverlayResult {
    /// Composited BGR image, same shape as the foreground
    pub image: Array3<u8>,
    /// Number of pixels taken from the background
    pub replaced: usize,
}

fn validate_inputs(
    foreground: &ArrayView3<u8>,
    background: &ArrayView3<u8>,
    threshold: i32,
) -> Result<()> {
    validate_bgr(foreground, "foreground")?;
    validate_bgr(background, "background")?;
    validate_threshold(threshold)
}

/// Replace key-coloured foreground pixels with the tiled background.
///
/// # Arguments
/// * `foreground` - BGR image (height, width, 3); never modified
/// * `background` - BGR image of any non-empty size
/// * `key` - Colour to replace
/// * `threshold` - Per-channel tolerance; a channel matches when `|fg - key| < threshold`
///
/// # Returns
/// A new image with the foreground's dimensions
pub fn overlay_background(
    foreground: ArrayView3<u8>,
    background: ArrayView3<u8>,
    key: ColorKey,
    threshold: i32,
) -> Result<Array3<u8>> {
    overlay_background_detailed(foreground, background, key, threshold).map(|r| r.image)
}

/// Same as [`overlay_background`], also reporting how many pixels were replaced.
pub fn overlay_background_detailed(
    foreground: ArrayView3<u8>,
    background: ArrayView3<u8>,
    key: ColorKey,
    threshold: i32,
) -> Result<OverlayResult> {
    validate_inputs(&foreground, &background, threshold)?;

    let (height, width, _) = foreground.dim();
    let (bg_height, bg_width, _) = background.dim();
    if bg_height > height || bg_width > width {
        log::warn!(
            "background {}x{} is larger than foreground {}x{}; it will be cropped",
            bg_width,
            bg_height,
            width,
            height
        );
    }
    if threshold > 255 {
        log::warn!("threshold {} exceeds 255; every pixel will be replaced", threshold);
    }

    let row_len = width * BGR_CHANNELS;
    let mut data = vec![0u8; height * row_len];

    // Rows are disjoint, so each worker owns its slice of the output
    let replaced: usize = data
        .par_chunks_mut(row_len)
        .enumerate()
        .map(|(y, row)| {
            let by = tile_coord(y, bg_height);
            let mut count = 0usize;
            for x in 0..width {
                let mut pixel = pixel_at(&foreground, y, x);
                if key.within(pixel, threshold) {
                    pixel = pixel_at(&background, by, tile_coord(x, bg_width));
                    count += 1;
                }
                row[x * BGR_CHANNELS..(x + 1) * BGR_CHANNELS].copy_from_slice(&pixel);
            }
            count
        })
        .sum();

    let image = Array3::from_shape_vec((height, width, BGR_CHANNELS), data)
        .map_err(|e| FilterError::invalid("foreground", e.to_string()))?;

    log::debug!(
        "overlay {}x{} key={:?} threshold={}: replaced {} pixels",
        width,
        height,
        key,
        threshold,
        replaced
    );

    Ok(OverlayResult { image, replaced })
}

/// Selection mask of the pixels [`overlay_background`] would replace.
///
/// # Returns
/// (height, width) mask, 255 = within tolerance of `key`, 0 otherwise
pub fn key_mask(foreground: ArrayView3<u8>, key: ColorKey, threshold: i32) -> Result<Array2<u8>> {
    validate_bgr(&foreground, "foreground")?;
    validate_threshold(threshold)?;

    let (height, width, _) = foreground.dim();
    Ok(Array2::from_shape_fn((height, width), |(y, x)| {
        if key.within(pixel_at(&foreground, y, x), threshold) {
            255
        } else {
            0
        }
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filters::histogram::most_common_color;

    fn filled(height: usize, width: usize, bgr: [u8; 3]) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 3));
        for y in 0..height {
            for x in 0..width {
                for c in 0..3 {
                    img[[y, x, c]] = bgr[c];
                }
            }
        }
        img
    }

    fn gradient(height: usize, width: usize) -> Array3<u8> {
        let mut img = Array3::<u8>::zeros((height, width, 3));
        for y in 0..height {
            for x in 0..width {
                img[[y, x, 0]] = (x * 10) as u8;
                img[[y, x, 1]] = (y * 10) as u8;
                img[[y, x, 2]] = ((x + y) * 5) as u8;
            }
        }
        img
    }

    #[test]
    fn test_black_on_white_scenario() {
        let fg = filled(2, 2, [0, 0, 0]);
        let bg = filled(1, 1, [255, 255, 255]);

        let key = most_common_color(fg.view(), 4).unwrap();
        let result = overlay_background_detailed(fg.view(), bg.view(), key, 10).unwrap();

        assert_eq!(result.replaced, 4);
        assert_eq!(result.image, filled(2, 2, [255, 255, 255]));
    }

    #[test]
    fn test_zero_threshold_is_identity() {
        let fg = gradient(6, 6);
        let bg = filled(2, 2, [1, 2, 3]);
        let key = ColorKey::new(0, 0, 0); // matches fg[0, 0] exactly

        let result = overlay_background_detailed(fg.view(), bg.view(), key, 0).unwrap();
        assert_eq!(result.replaced, 0);
        assert_eq!(result.image, fg);
    }

    #[test]
    fn test_threshold_one_replaces_exact_matches_only() {
        let mut fg = filled(2, 3, [100, 100, 100]);
        fg[[1, 2, 0]] = 101;
        let bg = filled(1, 1, [7, 8, 9]);

        let result =
            overlay_background_detailed(fg.view(), bg.view(), ColorKey::new(100, 100, 100), 1)
                .unwrap();

        assert_eq!(result.replaced, 5);
        assert_eq!(pixel_at(&result.image.view(), 0, 0), [7, 8, 9]);
        assert_eq!(pixel_at(&result.image.view(), 1, 2), [101, 100, 100]);
    }

    #[test]
    fn test_large_threshold_replaces_everything() {
        let fg = gradient(4, 5);
        let bg = filled(1, 1, [42, 43, 44]);

        let out = overlay_background(fg.view(), bg.view(), ColorKey::new(255, 0, 128), 256).unwrap();
        assert_eq!(out, filled(4, 5, [42, 43, 44]));
    }

    #[test]
    fn test_all_channels_must_match() {
        // Blue and green within tolerance, red not
        let fg = filled(1, 1, [12, 12, 60]);
        let bg = filled(1, 1, [255, 255, 255]);

        let out = overlay_background(fg.view(), bg.view(), ColorKey::new(10, 10, 10), 5).unwrap();
        assert_eq!(out, fg);
    }

    #[test]
    fn test_background_tiles() {
        let fg = filled(3, 5, [0, 0, 0]);
        let mut bg = Array3::<u8>::zeros((2, 2, 3));
        bg[[0, 0, 0]] = 1;
        bg[[0, 1, 0]] = 2;
        bg[[1, 0, 0]] = 3;
        bg[[1, 1, 0]] = 4;

        let out = overlay_background(fg.view(), bg.view(), ColorKey::new(0, 0, 0), 1).unwrap();

        for y in 0..3 {
            for x in 0..5 {
                assert_eq!(out[[y, x, 0]], bg[[y % 2, x % 2, 0]], "at ({}, {})", y, x);
            }
        }
    }

    #[test]
    fn test_larger_background_is_cropped() {
        let fg = filled(2, 2, [0, 0, 0]);
        let bg = gradient(5, 5);

        let out = overlay_background(fg.view(), bg.view(), ColorKey::new(0, 0, 0), 1).unwrap();
        for y in 0..2 {
            for x in 0..2 {
                assert_eq!(pixel_at(&out.view(), y, x), pixel_at(&bg.view(), y, x));
            }
        }
    }

    #[test]
    fn test_foreground_not_mutated_and_deterministic() {
        let fg = gradient(8, 8);
        let before = fg.clone();
        let bg = filled(3, 3, [9, 9, 9]);
        let key = ColorKey::new(20, 20, 20);

        let a = overlay_background(fg.view(), bg.view(), key, 30).unwrap();
        let b = overlay_background(fg.view(), bg.view(), key, 30).unwrap();
        assert_eq!(a, b);
        assert_eq!(fg, before);
    }

    #[test]
    fn test_invalid_arguments() {
        let fg = filled(2, 2, [0, 0, 0]);
        let bg = filled(1, 1, [0, 0, 0]);
        let empty = Array3::<u8>::zeros((0, 3, 3));
        let key = ColorKey::default();

        assert!(overlay_background(fg.view(), empty.view(), key, 10)
            .unwrap_err()
            .is_invalid_argument());
        assert!(overlay_background(empty.view(), bg.view(), key, 10)
            .unwrap_err()
            .is_invalid_argument());
        assert!(overlay_background(fg.view(), bg.view(), key, -1)
            .unwrap_err()
            .is_invalid_argument());
        assert!(key_mask(fg.view(), key, -1).unwrap_err().is_invalid_argument());
    }

    #[test]
    fn test_key_mask_matches_overlay() {
        let fg = gradient(5, 5);
        let bg = filled(1, 1, [255, 255, 255]);
        let key = ColorKey::new(20, 20, 20);

        let mask = key_mask(fg.view(), key, 15).unwrap();
        let result = overlay_background_detailed(fg.view(), bg.view(), key, 15).unwrap();

        let selected = mask.iter().filter(|&&v| v == 255).count();
        assert_eq!(selected, result.replaced);
        assert!(selected > 0);
    }
}
