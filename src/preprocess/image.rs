//! Image preprocessing for the waste classifier.
//!
//! These functions decode image bytes (PNG/JPEG/BMP/GIF), stretch them to the
//! model's fixed 224×224 input size, and normalize pixel values into the
//! range the loaded model was trained with.

use crate::error::PipelineError;

/// Model input width in pixels.
pub const INPUT_WIDTH: u32 = 224;
/// Model input height in pixels.
pub const INPUT_HEIGHT: u32 = 224;
/// Flat length of one normalized RGB input: width × height × 3 channels.
pub const INPUT_PIXELS: usize = (INPUT_WIDTH * INPUT_HEIGHT * 3) as usize;

/// Pixel scaling convention of the loaded model.
///
/// The serving models use plain [0, 1] scaling; the transfer-learning models
/// expect MobileNet-style [-1, 1] inputs. Which one applies is a property of
/// the model artifact, not of the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Normalization {
    /// `v / 255.0` — pixel values scaled into [0, 1].
    #[default]
    ZeroToOne,
    /// `v / 127.5 - 1.0` — MobileNet-family preprocessing into [-1, 1].
    MobileNet,
}

impl Normalization {
    fn apply(self, channel: u8) -> f32 {
        match self {
            Normalization::ZeroToOne => channel as f32 / 255.0,
            Normalization::MobileNet => channel as f32 / 127.5 - 1.0,
        }
    }
}

/// Decodes image bytes, stretches to 224×224 (aspect ratio is ignored,
/// matching the model's training-time resize), converts to RGB, and
/// normalizes each channel.
///
/// Returns a flat row-major `Vec<f32>` of length `INPUT_PIXELS`, flattened
/// as R, G, B, ... Alpha, grayscale, and palette sources are converted to
/// three-channel RGB before flattening.
pub fn image_bytes_to_rgb_input(
    bytes: &[u8],
    normalization: Normalization,
) -> Result<Vec<f32>, PipelineError> {
    let img = image::load_from_memory(bytes)?;
    let resized = img.resize_exact(INPUT_WIDTH, INPUT_HEIGHT, image::imageops::FilterType::Lanczos3);
    let rgb = resized.to_rgb8();
    Ok(rgb
        .pixels()
        .flat_map(|p| p.0.iter().map(move |&c| normalization.apply(c)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageBuffer, Luma, Rgb, Rgba};
    use std::io::Cursor;

    fn png_bytes(img: DynamicImage) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), image::ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn black_image_normalizes_to_all_zeros() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([0u8, 0, 0])));
        let input = image_bytes_to_rgb_input(&png_bytes(img), Normalization::ZeroToOne).unwrap();
        assert_eq!(input.len(), INPUT_PIXELS);
        assert!(input.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn white_image_normalizes_to_all_ones() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(8, 8, Rgb([255u8, 255, 255])));
        let input = image_bytes_to_rgb_input(&png_bytes(img), Normalization::ZeroToOne).unwrap();
        assert!(input.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn mobilenet_scaling_covers_minus_one_to_one() {
        let black = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([0u8, 0, 0])));
        let input = image_bytes_to_rgb_input(&png_bytes(black), Normalization::MobileNet).unwrap();
        assert!(input.iter().all(|&v| v == -1.0));

        let white = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(4, 4, Rgb([255u8, 255, 255])));
        let input = image_bytes_to_rgb_input(&png_bytes(white), Normalization::MobileNet).unwrap();
        assert!(input.iter().all(|&v| v == 1.0));
    }

    #[test]
    fn alpha_and_grayscale_sources_convert_to_rgb() {
        let rgba = DynamicImage::ImageRgba8(ImageBuffer::from_pixel(5, 3, Rgba([10u8, 20, 30, 128])));
        let input = image_bytes_to_rgb_input(&png_bytes(rgba), Normalization::ZeroToOne).unwrap();
        assert_eq!(input.len(), INPUT_PIXELS);

        let gray = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(3, 5, Luma([200u8])));
        let input = image_bytes_to_rgb_input(&png_bytes(gray), Normalization::ZeroToOne).unwrap();
        assert_eq!(input.len(), INPUT_PIXELS);
        // Grayscale expands to equal R, G, B channels.
        assert_eq!(input[0], input[1]);
        assert_eq!(input[1], input[2]);
    }

    #[test]
    fn non_square_sources_are_stretched_not_cropped() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_pixel(100, 10, Rgb([50u8, 50, 50])));
        let input = image_bytes_to_rgb_input(&png_bytes(img), Normalization::ZeroToOne).unwrap();
        assert_eq!(input.len(), INPUT_PIXELS);
    }

    #[test]
    fn garbage_bytes_fail_with_decode_error() {
        let err = image_bytes_to_rgb_input(b"definitely not an image", Normalization::ZeroToOne)
            .unwrap_err();
        assert!(matches!(err, PipelineError::Decode(_)));
    }
}
