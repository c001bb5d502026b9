//! Coarse 3-D colour histogram and most-common-colour lookup.
//!
//! Each channel's 256 levels are split into `buckets` ranges of width
//! `256 / buckets`. Every pixel increments the bucket `(b, g, r)` it falls into,
//! and the fullest bucket's lower bound is reported as the dominant colour.
//!
//! When `buckets` does not divide 256 the top intensities would index one past the
//! last bucket; they are clamped into bucket `buckets - 1`.

use ndarray::{Array3, ArrayView3};
use rayon::prelude::*;
use std::ops::Range;

use super::core::{validate_bgr, ColorKey};
use crate::error::{FilterError, Result};

/// Maximum number of buckets per channel (one bucket per intensity level).
pub const MAX_BUCKETS: usize = 256;

/// A `buckets × buckets × buckets` pixel count indexed `(blue, green, red)`.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorHistogram {
    buckets: usize,
    bucket_width: usize,
    counts: Array3<u32>,
}

impl ColorHistogram {
    /// Bin every pixel of a BGR image.
    ///
    /// # Arguments
    /// * `image` - BGR image (height, width, 3)
    /// * `buckets` - Buckets per channel (1-256)
    ///
    /// # Errors
    /// `InvalidArgument` if the image is empty or not 3-channel, or `buckets` is out of range.
    pub fn compute(image: ArrayView3<u8>, buckets: usize) -> Result<Self> {
        validate_bgr(&image, "image")?;
        if buckets == 0 || buckets > MAX_BUCKETS {
            return Err(FilterError::invalid(
                "buckets",
                format!("must be in 1..={}, got {}", MAX_BUCKETS, buckets),
            ));
        }

        let (height, width, _) = image.dim();
        let bucket_width = MAX_BUCKETS / buckets;
        let cells = buckets * buckets * buckets;
        let index = |v: u8| (v as usize / bucket_width).min(buckets - 1);

        let bin_rows = |rows: Range<usize>| {
            let mut acc = vec![0u32; cells];
            for y in rows {
                for x in 0..width {
                    let b = index(image[[y, x, 0]]);
                    let g = index(image[[y, x, 1]]);
                    let r = index(image[[y, x, 2]]);
                    acc[(b * buckets + g) * buckets + r] += 1;
                }
            }
            acc
        };

        let chunks = partial_histograms(height, width, cells, rayon::current_num_threads());
        let flat = if chunks == 1 {
            bin_rows(0..height)
        } else {
            // One partial histogram per row band, summed afterwards
            let band = height.div_ceil(chunks);
            (0..chunks)
                .into_par_iter()
                .map(|i| bin_rows(i * band..((i + 1) * band).min(height)))
                .reduce_with(|mut a, b| {
                    for (dst, src) in a.iter_mut().zip(b) {
                        *dst += src;
                    }
                    a
                })
                .unwrap_or_else(|| vec![0u32; cells])
        };

        let counts = Array3::from_shape_vec((buckets, buckets, buckets), flat)
            .map_err(|e| FilterError::invalid("buckets", e.to_string()))?;

        Ok(Self {
            buckets,
            bucket_width,
            counts,
        })
    }

    pub fn buckets(&self) -> usize {
        self.buckets
    }

    pub fn bucket_width(&self) -> usize {
        self.bucket_width
    }

    /// Pixel count of bucket `(b, g, r)`. Out-of-range indices count as zero.
    pub fn count(&self, b: usize, g: usize, r: usize) -> u32 {
        self.counts.get([b, g, r]).copied().unwrap_or(0)
    }

    /// Sum of all bucket counts; equals the number of pixels binned.
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|&c| c as u64).sum()
    }

    /// Indices of the fullest bucket.
    ///
    /// Scans blue, then green, then red in ascending order; only a strictly
    /// greater count replaces the current best, so ties keep the earliest bucket.
    pub fn max_bucket(&self) -> (usize, usize, usize) {
        let mut best = (0, 0, 0);
        let mut max = 0u32;
        for b in 0..self.buckets {
            for g in 0..self.buckets {
                for r in 0..self.buckets {
                    let count = self.counts[[b, g, r]];
                    if count > max {
                        max = count;
                        best = (b, g, r);
                    }
                }
            }
        }
        best
    }

    /// Lower-bound colour of bucket `(b, g, r)`.
    pub fn bucket_color(&self, b: usize, g: usize, r: usize) -> ColorKey {
        let level = |i: usize| (i.min(self.buckets - 1) * self.bucket_width) as u8;
        ColorKey::new(level(b), level(g), level(r))
    }

    /// Lower-bound colour of the fullest bucket.
    pub fn most_common(&self) -> ColorKey {
        let (b, g, r) = self.max_bucket();
        self.bucket_color(b, g, r)
    }
}

/// Number of partial histograms to bin in parallel.
///
/// At most one per thread and one per row, and never more than fit in the
/// pixel count, so the extra memory stays within `O(rows * cols)` even at
/// 256 buckets. Returns 1 when a single sequential pass is the better choice.
fn partial_histograms(height: usize, width: usize, cells: usize, threads: usize) -> usize {
    let by_size = (height * width) / cells.max(1);
    threads.min(by_size).min(height).max(1)
}

/// Find the most common colour of a BGR image using a `buckets³` histogram.
///
/// # Arguments
/// * `image` - BGR image (height, width, 3)
/// * `buckets` - Buckets per channel (1-256)
///
/// # Returns
/// The winning bucket's lower bound, each channel a multiple of `256 / buckets`
pub fn most_common_color(image: ArrayView3<u8>, buckets: usize) -> Result<ColorKey> {
    let hist = ColorHistogram::compute(image, buckets)?;
    let key = hist.most_common();
    log::debug!(
        "most common color over {} pixels with {} buckets: {:?}",
        hist.total(),
        buckets,
        key
    );
    Ok(key)
}
