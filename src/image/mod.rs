//! Image-insert payload preparation.
//!
//! The insert-image dialog hands the editor an [`ImagePayload`] whose `src`
//! is either a URL the user typed or a data URL produced from an uploaded
//! file. Uploads are downscaled client-side before they ever reach the
//! document: oversized inputs are rejected, large images are resized to
//! fit the 1920×1080 envelope, and the result is re-encoded as JPEG.

use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use thiserror::Error;

/// Maximum accepted upload size in bytes (10 MiB).
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Maximum width for landscape images.
const MAX_WIDTH: u32 = 1920;
/// Maximum height for portrait images.
const MAX_HEIGHT: u32 = 1080;
/// JPEG re-encode quality.
const JPEG_QUALITY: u8 = 80;

/// What the insert-image dialog produces: alt text plus a source that is
/// either a URL or a base64 JPEG data URL.
///
/// The codec round-trips this as `![alt](src)`.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ImagePayload {
    pub alt_text: String,
    pub src: String,
}

/// Image preparation failures, surfaced to the user inline; nothing is
/// inserted on error.
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image is {0} bytes; the limit is {MAX_UPLOAD_BYTES}")]
    TooLarge(usize),
    #[error("could not decode image")]
    Decode(#[source] image::ImageError),
    #[error("could not encode image")]
    Encode(#[source] image::ImageError),
}

/// Downscale and re-encode an uploaded image, returning a JPEG data URL.
///
/// # Errors
///
/// Returns [`ImageError`] when the input exceeds [`MAX_UPLOAD_BYTES`] or
/// cannot be decoded/encoded.
pub fn prepare_upload(bytes: &[u8]) -> Result<String, ImageError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(ImageError::TooLarge(bytes.len()));
    }

    let decoded = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    let (width, height) = scaled_dimensions(decoded.width(), decoded.height());
    let resized = if (width, height) == (decoded.width(), decoded.height()) {
        decoded
    } else {
        decoded.resize_exact(width, height, FilterType::CatmullRom)
    };

    // JPEG has no alpha channel; flatten before encoding.
    let rgb = DynamicImage::ImageRgb8(resized.to_rgb8());
    let mut encoded = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut encoded, JPEG_QUALITY);
    rgb.write_with_encoder(encoder)
        .map_err(ImageError::Encode)?;

    let payload = base64::engine::general_purpose::STANDARD.encode(&encoded);
    Ok(format!("data:image/jpeg;base64,{payload}"))
}

/// The downscaled dimensions for an image, preserving aspect ratio.
///
/// Landscape images clamp width to 1920; portrait (and square) images
/// clamp height to 1080. Images already inside the envelope are untouched
/// (never upscaled).
fn scaled_dimensions(width: u32, height: u32) -> (u32, u32) {
    if width > height {
        if width > MAX_WIDTH {
            let scaled = (f64::from(height) * f64::from(MAX_WIDTH) / f64::from(width)).round();
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            // Scaled height is positive and no larger than the original.
            return (MAX_WIDTH, (scaled as u32).max(1));
        }
    } else if height > MAX_HEIGHT {
        let scaled = (f64::from(width) * f64::from(MAX_HEIGHT) / f64::from(height)).round();
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        // Scaled width is positive and no larger than the original.
        return ((scaled as u32).max(1), MAX_HEIGHT);
    }
    (width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40]));
        let mut buf = std::io::Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .expect("encode test png");
        buf.into_inner()
    }

    #[test]
    fn test_small_image_keeps_dimensions() {
        assert_eq!(scaled_dimensions(640, 480), (640, 480));
    }

    #[test]
    fn test_wide_image_clamps_width() {
        assert_eq!(scaled_dimensions(3840, 2160), (1920, 1080));
        assert_eq!(scaled_dimensions(4000, 1000), (1920, 480));
    }

    #[test]
    fn test_landscape_clamp_may_exceed_max_height() {
        // The rule clamps only the dominant axis, as the dialog does.
        assert_eq!(scaled_dimensions(2000, 1500), (1920, 1440));
    }

    #[test]
    fn test_tall_image_clamps_height() {
        assert_eq!(scaled_dimensions(1000, 4000), (270, 1080));
    }

    #[test]
    fn test_square_image_clamps_height() {
        assert_eq!(scaled_dimensions(2000, 2000), (1080, 1080));
    }

    #[test]
    fn test_prepare_upload_emits_jpeg_data_url() {
        let url = prepare_upload(&png_bytes(8, 8)).expect("prepare");
        assert!(url.starts_with("data:image/jpeg;base64,"));
        // The payload must decode back to a JPEG.
        let b64 = url.strip_prefix("data:image/jpeg;base64,").expect("prefix");
        let jpeg = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .expect("valid base64");
        let decoded = image::load_from_memory(&jpeg).expect("decodes");
        assert_eq!((decoded.width(), decoded.height()), (8, 8));
    }

    #[test]
    fn test_prepare_upload_downscales_large_images() {
        let url = prepare_upload(&png_bytes(2400, 600)).expect("prepare");
        let b64 = url.strip_prefix("data:image/jpeg;base64,").expect("prefix");
        let jpeg = base64::engine::general_purpose::STANDARD
            .decode(b64)
            .expect("valid base64");
        let decoded = image::load_from_memory(&jpeg).expect("decodes");
        assert_eq!((decoded.width(), decoded.height()), (1920, 480));
    }

    #[test]
    fn test_oversized_input_is_rejected() {
        let bytes = vec![0_u8; MAX_UPLOAD_BYTES + 1];
        assert!(matches!(
            prepare_upload(&bytes),
            Err(ImageError::TooLarge(_))
        ));
    }

    #[test]
    fn test_undecodable_input_is_rejected() {
        assert!(matches!(
            prepare_upload(b"not an image"),
            Err(ImageError::Decode(_))
        ));
    }
}
