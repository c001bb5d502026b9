//! Filter modules for the greenscreen effect and its companions.
//!
//! ## Supported Formats
//!
//! | Format | Shape | Type | Used by |
//! |--------|-------|------|---------|
//! | BGR8 | (H, W, 3) | u8 | histogram, composite |
//! | Grayscale8 | (H, W, 1) | u8 | color_adjust, transform |
//! | BGRA8 | (H, W, 4) | u8 | color_adjust, transform |
//!
//! Channel order follows the BGR convention: index 0 is blue, 2 is red.
//!
//! ## Architecture
//!
//! - **Borrowed in, owned out** - inputs are `ArrayView3`, results are fresh `Array3`
//! - **Validated** - keying filters return `Result` and reject empty or mis-shaped input
//! - **Thread-safe** - row loops run on rayon's pool where it pays off
//!
//! ## Filter Categories
//!
//! - **Quantization**: color histogram, most common color
//! - **Compositing**: threshold overlay, key mask
//! - **Pixel-wise**: invert, scale_abs
//! - **Geometric**: flips, 180 degree rotation

pub mod core;
pub mod histogram;
pub mod composite;
pub mod color_adjust;
pub mod transform;
