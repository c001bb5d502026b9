//! Image source/sink: load and save BGR arrays.
//!
//! Decoding and encoding go through the `image` crate. It works in RGB order, so
//! channels are swapped at this boundary and everything else in the crate sees
//! (height, width, 3) arrays in BGR order. The output format is picked from the
//! file extension.

use image::{ImageReader, RgbImage};
use ndarray::{Array3, ArrayView3};
use std::path::Path;

use crate::error::{FilterError, Result};
use crate::filters::core::{validate_bgr, BGR_CHANNELS};

/// Load an image from disk as a BGR array.
///
/// Grayscale and alpha images are converted to 3-channel colour.
pub fn load_bgr(path: &Path) -> Result<Array3<u8>> {
    let load_err = |message: String| FilterError::ImageLoad {
        path: path.to_path_buf(),
        message,
    };

    let reader = ImageReader::open(path).map_err(|e| load_err(e.to_string()))?;
    let reader = reader
        .with_guessed_format()
        .map_err(|e| load_err(e.to_string()))?;
    let decoded = reader.decode().map_err(|e| load_err(e.to_string()))?;

    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    log::debug!("loaded {} ({}x{})", path.display(), width, height);

    rgb_to_bgr(&rgb.into_raw(), width as usize, height as usize)
        .map_err(|e| load_err(e.to_string()))
}

/// Save a BGR array to disk.
pub fn save_bgr(image: ArrayView3<u8>, path: &Path) -> Result<()> {
    validate_bgr(&image, "image")?;
    let (height, width, _) = image.dim();

    let mut raw = Vec::with_capacity(height * width * BGR_CHANNELS);
    for y in 0..height {
        for x in 0..width {
            raw.push(image[[y, x, 2]]);
            raw.push(image[[y, x, 1]]);
            raw.push(image[[y, x, 0]]);
        }
    }

    let save_err = |message: String| FilterError::ImageSave {
        path: path.to_path_buf(),
        message,
    };

    let rgb = RgbImage::from_raw(width as u32, height as u32, raw)
        .ok_or_else(|| save_err("buffer does not match dimensions".to_string()))?;
    rgb.save(path).map_err(|e| save_err(e.to_string()))?;

    log::debug!("saved {} ({}x{})", path.display(), width, height);
    Ok(())
}

/// Convert an interleaved RGB byte buffer to a BGR array.
fn rgb_to_bgr(rgb: &[u8], width: usize, height: usize) -> Result<Array3<u8>> {
    if rgb.len() != width * height * BGR_CHANNELS {
        return Err(FilterError::invalid(
            "rgb",
            format!(
                "buffer length {} does not match {}x{}x{}",
                rgb.len(),
                width,
                height,
                BGR_CHANNELS
            ),
        ));
    }
    Ok(Array3::from_shape_fn((height, width, BGR_CHANNELS), |(y, x, c)| {
        rgb[(y * width + x) * BGR_CHANNELS + (BGR_CHANNELS - 1 - c)]
    }))
}
