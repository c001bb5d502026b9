//! WebAssembly exports for the greenscreen filters.
//!
//! These functions are exposed to JavaScript via wasm-bindgen. Images travel as
//! flat BGR byte arrays (length = width * height * 3).

use ndarray::Array3;
use wasm_bindgen::prelude::*;

use crate::error::FilterError;
use crate::filters::color_adjust::invert_u8;
use crate::filters::composite::overlay_background;
use crate::filters::core::{ColorKey, BGR_CHANNELS};
use crate::filters::histogram::most_common_color;

fn to_js(err: FilterError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn bgr_array(data: &[u8], width: usize, height: usize) -> Result<Array3<u8>, JsValue> {
    Array3::from_shape_vec((height, width, BGR_CHANNELS), data.to_vec())
        .map_err(|e| JsValue::from_str(&format!("Invalid dimensions: {}", e)))
}

// ============================================================================
// Histogram Quantizer
// ============================================================================

/// Most common colour of a BGR image.
///
/// # Returns
/// Three bytes `[blue, green, red]`
#[wasm_bindgen]
pub fn most_common_color_wasm(
    data: &[u8],
    width: usize,
    height: usize,
    buckets: usize,
) -> Result<Vec<u8>, JsValue> {
    let image = bgr_array(data, width, height)?;
    let key = most_common_color(image.view(), buckets).map_err(to_js)?;
    Ok(key.to_array().to_vec())
}

// ============================================================================
// Threshold Compositor
// ============================================================================

/// Replace pixels within `threshold` of the key colour with the tiled background.
///
/// # Returns
/// Flat BGR bytes with the foreground's dimensions
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn overlay_background_wasm(
    foreground: &[u8],
    width: usize,
    height: usize,
    background: &[u8],
    bg_width: usize,
    bg_height: usize,
    key: &[u8],
    threshold: i32,
) -> Result<Vec<u8>, JsValue> {
    if key.len() != BGR_CHANNELS {
        return Err(JsValue::from_str("key must have 3 bytes (blue, green, red)"));
    }
    let fg = bgr_array(foreground, width, height)?;
    let bg = bgr_array(background, bg_width, bg_height)?;
    let key = ColorKey::new(key[0], key[1], key[2]);

    let result = overlay_background(fg.view(), bg.view(), key, threshold).map_err(to_js)?;
    Ok(result.into_raw_vec_and_offset().0)
}

// ============================================================================
// Additional Effects
// ============================================================================

#[wasm_bindgen]
pub fn invert_wasm(data: &[u8], width: usize, height: usize) -> Result<Vec<u8>, JsValue> {
    let image = bgr_array(data, width, height)?;
    Ok(invert_u8(image.view()).into_raw_vec_and_offset().0)
}
