//! Conversion of drawn or uploaded images into network input.
//!
//! Output values stay in the dataset's raw `[0, 255]` range. Scale them the
//! same way the training samples were scaled before predicting.

use ::image::imageops::{self, FilterType};
use ::image::GrayImage;

use super::PredictError;

/// Converts a raw 8-bit luma buffer (e.g. a drawing canvas) into a pixel
/// vector of `target_width * target_height` values.
///
/// With `invert` set, dark-on-light strokes become light-on-dark, matching
/// MNIST's white digits on black.
pub fn bitmap_to_pixels(
    luma: Vec<u8>,
    width: u32,
    height: u32,
    target_width: u32,
    target_height: u32,
    invert: bool,
) -> Result<Vec<f64>, PredictError> {
    let len = luma.len();
    let img = GrayImage::from_raw(width, height, luma)
        .ok_or(PredictError::InvalidBitmap { width, height, len })?;
    Ok(gray_to_pixels(img, target_width, target_height, invert))
}

/// Decodes PNG/JPEG/BMP/GIF bytes, converts to grayscale and resizes.
pub fn image_bytes_to_pixels(
    bytes: &[u8],
    target_width: u32,
    target_height: u32,
    invert: bool,
) -> Result<Vec<f64>, PredictError> {
    let img = ::image::load_from_memory(bytes).map_err(|e| PredictError::Decode(e.to_string()))?;
    Ok(gray_to_pixels(img.to_luma8(), target_width, target_height, invert))
}

fn gray_to_pixels(img: GrayImage, target_width: u32, target_height: u32, invert: bool) -> Vec<f64> {
    let img = if img.dimensions() == (target_width, target_height) {
        img
    } else {
        imageops::resize(&img, target_width, target_height, FilterType::Triangle)
    };

    img.pixels()
        .map(|p| {
            let v = p.0[0];
            (if invert { 255 - v } else { v }) as f64
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{DynamicImage, ImageOutputFormat};
    use std::io::Cursor;

    #[test]
    fn bitmap_keeps_raw_range_and_inverts() {
        let pixels = bitmap_to_pixels(vec![0, 255, 10, 200], 2, 2, 2, 2, false).unwrap();
        assert_eq!(pixels, vec![0.0, 255.0, 10.0, 200.0]);
        let inverted = bitmap_to_pixels(vec![0, 255, 10, 200], 2, 2, 2, 2, true).unwrap();
        assert_eq!(inverted, vec![255.0, 0.0, 245.0, 55.0]);
    }

    #[test]
    fn bitmap_is_resized_to_target_grid() {
        let pixels = bitmap_to_pixels(vec![255; 56 * 56], 56, 56, 28, 28, false).unwrap();
        assert_eq!(pixels.len(), 28 * 28);
        assert!(pixels.iter().all(|&p| p > 250.0));
    }

    #[test]
    fn bitmap_with_wrong_buffer_is_rejected() {
        assert!(matches!(
            bitmap_to_pixels(vec![0; 3], 2, 2, 2, 2, false),
            Err(PredictError::InvalidBitmap { width: 2, height: 2, len: 3 })
        ));
    }

    #[test]
    fn decodes_png_bytes() {
        let img = GrayImage::from_raw(2, 1, vec![30, 60]).unwrap();
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        assert_eq!(image_bytes_to_pixels(&buf, 2, 1, false).unwrap(), vec![30.0, 60.0]);
        assert!(matches!(image_bytes_to_pixels(&[1, 2, 3], 2, 1, false), Err(PredictError::Decode(_))));
    }
}
