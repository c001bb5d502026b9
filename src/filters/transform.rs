//! Geometric flips. Work on any channel count.

use ndarray::{s, Array3, ArrayView3};

/// Flip top-to-bottom (around the horizontal axis).
pub fn flip_vertical(input: ArrayView3<u8>) -> Array3<u8> {
    input.slice(s![..;-1, .., ..]).to_owned()
}

/// Flip left-to-right (around the vertical axis).
pub fn flip_horizontal(input: ArrayView3<u8>) -> Array3<u8> {
    input.slice(s![.., ..;-1, ..]).to_owned()
}

/// Rotate by 180 degrees (both flips).
pub fn rotate_180(input: ArrayView3<u8>) -> Array3<u8> {
    input.slice(s![..;-1, ..;-1, ..]).to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(height: usize, width: usize) -> Array3<u8> {
        Array3::from_shape_fn((height, width, 1), |(y, x, _)| (y * width + x) as u8)
    }

    #[test]
    fn test_flip_vertical() {
        let img = numbered(3, 2);
        let out = flip_vertical(img.view());
        assert_eq!(out[[0, 0, 0]], 4);
        assert_eq!(out[[2, 1, 0]], 1);
    }

    #[test]
    fn test_flip_horizontal() {
        let img = numbered(2, 3);
        let out = flip_horizontal(img.view());
        assert_eq!(out[[0, 0, 0]], 2);
        assert_eq!(out[[1, 2, 0]], 3);
    }

    #[test]
    fn test_rotate_180() {
        let img = numbered(2, 3);
        let out = rotate_180(img.view());
        assert_eq!(out[[0, 0, 0]], 5);
        assert_eq!(out[[1, 2, 0]], 0);
        assert_eq!(rotate_180(out.view()), img);
    }

    #[test]
    fn test_channels_not_reordered() {
        let mut img = Array3::<u8>::zeros((1, 2, 3));
        img[[0, 0, 0]] = 1;
        img[[0, 0, 2]] = 3;
        let out = flip_horizontal(img.view());
        assert_eq!(out[[0, 1, 0]], 1);
        assert_eq!(out[[0, 1, 2]], 3);
    }
}
