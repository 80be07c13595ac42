//! Image file loading for the sampling pipeline
//!
//! The sampler itself never touches the filesystem; this module is the
//! adapter that turns a photo on disk into a [`PixelBuffer`](crate::PixelBuffer).
//!
//! ## Supported Formats
//!
//! Via the `image` crate: JPEG, PNG, GIF (first frame), WebP, TIFF, BMP.
//!
//! ## Analysis canvas
//!
//! Captures are optionally resized to a square analysis canvas before
//! sampling, so the center patch covers the same share of every photo
//! regardless of the camera resolution.

use std::path::Path;

use image::{imageops::FilterType, DynamicImage, ImageReader, RgbaImage};
use tracing::debug;

use crate::error::{MatchError, Result};

/// Lowercase file extensions accepted by [`load_image`]
pub const SUPPORTED_EXTENSIONS: &[&str] =
    &["jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp"];

/// Check if a file extension is supported, ignoring case
pub fn is_supported_extension(ext: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&ext.to_lowercase().as_str())
}

/// Load an image from disk as RGBA
///
/// When `analysis_size` is set the image is stretched onto a square canvas
/// of that side, the way the capture screen draws a photo before sampling.
///
/// # Errors
///
/// Returns `MatchError::ImageLoadError` if the file cannot be opened, has an
/// unsupported extension, or fails to decode.
///
/// # Example
///
/// ```rust,no_run
/// use shade_match::image_loader::load_image;
/// use std::path::Path;
///
/// let image = load_image(Path::new("photo.jpg"), Some(300))?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), shade_match::MatchError>(())
/// ```
pub fn load_image(path: &Path, analysis_size: Option<u32>) -> Result<RgbaImage> {
    let supported = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(is_supported_extension);
    if !supported {
        return Err(MatchError::ImageLoadError {
            message: format!("Unknown image format for file: {}", path.display()),
            source: None,
        });
    }

    let reader = ImageReader::open(path).map_err(|e| {
        MatchError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img: DynamicImage = reader.decode().map_err(|e| {
        MatchError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    debug!(
        path = %path.display(),
        width = img.width(),
        height = img.height(),
        "decoded image"
    );

    Ok(fit_to_canvas(img, analysis_size))
}

/// Stretch `img` onto a `size` x `size` canvas, or convert as-is when `None`
pub fn fit_to_canvas(img: DynamicImage, size: Option<u32>) -> RgbaImage {
    match size {
        Some(side) if (img.width(), img.height()) != (side, side) => {
            img.resize_exact(side, side, FilterType::Triangle).to_rgba8()
        }
        _ => img.to_rgba8(),
    }
}
