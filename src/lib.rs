//! Greenscreen Rust Extensions
//!
//! Colour-histogram background replacement implemented in Rust, with
//! Python bindings via PyO3 and WASM bindings for JavaScript.
//!
//! ## Image Format
//! Images are `(height, width, 3)` u8 arrays in BGR channel order.
//!
//! ## Pipeline
//! 1. [`most_common_color`] bins the foreground into a `buckets³` histogram and
//!    returns the fullest bucket's lower-bound colour.
//! 2. [`overlay_background`] replaces every foreground pixel within `threshold` of
//!    that colour (per channel) with the tiled background.
//!
//! ```no_run
//! use greenscreen_rust::{io, most_common_color, overlay_background};
//! use std::path::Path;
//!
//! let fg = io::load_bgr(Path::new("foreground.jpg"))?;
//! let bg = io::load_bgr(Path::new("background.jpg"))?;
//! let key = most_common_color(fg.view(), 4)?;
//! let out = overlay_background(fg.view(), bg.view(), key, 60)?;
//! io::save_bgr(out.view(), Path::new("overlay.jpg"))?;
//! # Ok::<(), greenscreen_rust::FilterError>(())
//! ```

pub mod config;
pub mod error;
pub mod filters;
pub mod io;
pub mod params;

#[cfg(feature = "wasm")]
pub mod wasm;

pub use config::GreenScreenConfig;
pub use error::{FilterError, Result};
pub use filters::composite::{key_mask, overlay_background, overlay_background_detailed, OverlayResult};
pub use filters::core::ColorKey;
pub use filters::histogram::{most_common_color, ColorHistogram};
pub use params::{KeyingParams, ParameterKind};

// Python bindings (only when python feature is enabled)
#[cfg(feature = "python")]
mod python {
    use numpy::{IntoPyArray, PyArray2, PyArray3, PyReadonlyArray3};
    use pyo3::exceptions::PyValueError;
    use pyo3::prelude::*;

    use crate::error::FilterError;
    use crate::filters::color_adjust::{invert_u8, scale_abs_u8};
    use crate::filters::composite;
    use crate::filters::core::ColorKey;
    use crate::filters::histogram::{self, ColorHistogram};
    use crate::filters::transform;

    impl From<FilterError> for PyErr {
        fn from(err: FilterError) -> PyErr {
            PyValueError::new_err(err.to_string())
        }
    }

    // ========================================================================
    // Histogram Quantizer
    // ========================================================================

    /// Most common colour of a BGR u8 image as a (b, g, r) tuple.
    #[pyfunction]
    #[pyo3(signature = (image, buckets=4))]
    pub fn most_common_color<'py>(
        image: PyReadonlyArray3<'py, u8>,
        buckets: usize,
    ) -> PyResult<(u8, u8, u8)> {
        let key = histogram::most_common_color(image.as_array(), buckets)?;
        Ok((key.blue, key.green, key.red))
    }

    /// Full `buckets³` histogram, indexed [blue, green, red].
    #[pyfunction]
    #[pyo3(signature = (image, buckets=4))]
    pub fn color_histogram<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        buckets: usize,
    ) -> PyResult<Bound<'py, PyArray3<u32>>> {
        let hist = ColorHistogram::compute(image.as_array(), buckets)?;
        let n = hist.buckets();
        let counts = ndarray::Array3::from_shape_fn((n, n, n), |(b, g, r)| hist.count(b, g, r));
        Ok(counts.into_pyarray(py))
    }

    // ========================================================================
    // Threshold Compositor
    // ========================================================================

    /// Replace pixels within `threshold` of `key` (b, g, r) with the tiled background.
    #[pyfunction]
    #[pyo3(signature = (foreground, background, key, threshold=60))]
    pub fn overlay_background<'py>(
        py: Python<'py>,
        foreground: PyReadonlyArray3<'py, u8>,
        background: PyReadonlyArray3<'py, u8>,
        key: (u8, u8, u8),
        threshold: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let key = ColorKey::new(key.0, key.1, key.2);
        let result = composite::overlay_background(
            foreground.as_array(),
            background.as_array(),
            key,
            threshold,
        )?;
        Ok(result.into_pyarray(py))
    }

    /// Mask (255/0) of the pixels `overlay_background` would replace.
    #[pyfunction]
    #[pyo3(signature = (foreground, key, threshold=60))]
    pub fn key_mask<'py>(
        py: Python<'py>,
        foreground: PyReadonlyArray3<'py, u8>,
        key: (u8, u8, u8),
        threshold: i32,
    ) -> PyResult<Bound<'py, PyArray2<u8>>> {
        let key = ColorKey::new(key.0, key.1, key.2);
        let mask = composite::key_mask(foreground.as_array(), key, threshold)?;
        Ok(mask.into_pyarray(py))
    }

    /// Histogram key followed by overlay, in one call.
    #[pyfunction]
    #[pyo3(signature = (foreground, background, buckets=4, threshold=60))]
    pub fn green_screen<'py>(
        py: Python<'py>,
        foreground: PyReadonlyArray3<'py, u8>,
        background: PyReadonlyArray3<'py, u8>,
        buckets: usize,
        threshold: i32,
    ) -> PyResult<Bound<'py, PyArray3<u8>>> {
        let fg = foreground.as_array();
        let key = histogram::most_common_color(fg, buckets)?;
        let result = composite::overlay_background(fg, background.as_array(), key, threshold)?;
        Ok(result.into_pyarray(py))
    }

    // ========================================================================
    // Additional Effects
    // ========================================================================

    #[pyfunction]
    pub fn invert<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        invert_u8(image.as_array()).into_pyarray(py)
    }

    #[pyfunction]
    #[pyo3(signature = (image, alpha=1.0, beta=0.0))]
    pub fn scale_abs<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
        alpha: f32,
        beta: f32,
    ) -> Bound<'py, PyArray3<u8>> {
        scale_abs_u8(image.as_array(), alpha, beta).into_pyarray(py)
    }

    #[pyfunction]
    pub fn flip_vertical<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        transform::flip_vertical(image.as_array()).into_pyarray(py)
    }

    #[pyfunction]
    pub fn rotate_180<'py>(
        py: Python<'py>,
        image: PyReadonlyArray3<'py, u8>,
    ) -> Bound<'py, PyArray3<u8>> {
        transform::rotate_180(image.as_array()).into_pyarray(py)
    }

    /// Greenscreen Rust extension module
    #[pymodule]
    pub fn greenscreen_rust(m: &Bound<'_, PyModule>) -> PyResult<()> {
        // Histogram quantizer
        m.add_function(wrap_pyfunction!(most_common_color, m)?)?;
        m.add_function(wrap_pyfunction!(color_histogram, m)?)?;

        // Threshold compositor
        m.add_function(wrap_pyfunction!(overlay_background, m)?)?;
        m.add_function(wrap_pyfunction!(key_mask, m)?)?;
        m.add_function(wrap_pyfunction!(green_screen, m)?)?;

        // Additional effects
        m.add_function(wrap_pyfunction!(invert, m)?)?;
        m.add_function(wrap_pyfunction!(scale_abs, m)?)?;
        m.add_function(wrap_pyfunction!(flip_vertical, m)?)?;
        m.add_function(wrap_pyfunction!(rotate_180, m)?)?;

        Ok(())
    }
}

#[cfg(feature = "python")]
pub use python::greenscreen_rust;
