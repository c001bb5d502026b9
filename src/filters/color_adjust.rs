//! Pixel-wise colour adjustments: Invert and ScaleAbs.
//!
//! These don't require spatial context and accept images with 1, 3, or 4 channels:
//! - **Grayscale**: (height, width, 1)
//! - **BGR**: (height, width, 3)
//! - **BGRA**: (height, width, 4), alpha preserved unchanged

use ndarray::{Array3, ArrayView3};

// ============================================================================
// Invert
// ============================================================================

/// Invert image colours (bitwise NOT of every colour channel).
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
///
/// # Returns
/// Colour-inverted image (alpha preserved if present)
pub fn invert_u8(input: ArrayView3<u8>) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                output[[y, x, c]] = !input[[y, x, c]];
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    output
}

// ============================================================================
// Scale Abs
// ============================================================================

/// Linear scale with absolute value and saturation: `clamp(|alpha * v + beta|, 0, 255)`.
///
/// An `alpha` above 1.0 brightens the image; `beta` shifts it.
///
/// # Arguments
/// * `input` - Image with 1, 3, or 4 channels (height, width, channels)
/// * `alpha` - Multiplier
/// * `beta` - Offset added after scaling
///
/// # Returns
/// Scaled image with same channel count (alpha preserved if present)
pub fn scale_abs_u8(input: ArrayView3<u8>, alpha: f32, beta: f32) -> Array3<u8> {
    let (height, width, channels) = input.dim();
    let mut output = Array3::<u8>::zeros((height, width, channels));

    let color_channels = if channels == 4 { 3 } else { channels };

    for y in 0..height {
        for x in 0..width {
            for c in 0..color_channels {
                let v = (input[[y, x, c]] as f32 * alpha + beta).abs();
                output[[y, x, c]] = v.round().clamp(0.0, 255.0) as u8;
            }
            if channels == 4 {
                output[[y, x, 3]] = input[[y, x, 3]];
            }
        }
    }
    output
}
