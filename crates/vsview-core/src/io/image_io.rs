use std::path::Path;

use image::{ImageFormat, RgbImage};

use crate::error::{Result, ViewerError};
use crate::frame::{PixelBuffer, PixelLayout};

/// Repack a converted buffer into an `image` RGB8 buffer.
pub fn to_rgb_image(pixels: &PixelBuffer) -> Result<RgbImage> {
    let data = match pixels.layout() {
        PixelLayout::Rgb24 => pixels.as_bytes().to_vec(),
        PixelLayout::Bgr24 => pixels
            .as_bytes()
            .chunks_exact(3)
            .flat_map(|px| [px[2], px[1], px[0]])
            .collect(),
    };
    RgbImage::from_raw(pixels.width(), pixels.height(), data).ok_or(
        ViewerError::InvalidDimensions {
            width: pixels.width(),
            height: pixels.height(),
        },
    )
}

/// Save as 8-bit RGB, choosing the format from the file extension (PNG by default).
pub fn save_pixels(pixels: &PixelBuffer, path: &Path) -> Result<()> {
    let img = to_rgb_image(pixels)?;
    let format = match path.extension().and_then(|e| e.to_str()) {
        Some("tiff" | "tif") => ImageFormat::Tiff,
        Some("jpg" | "jpeg") => ImageFormat::Jpeg,
        _ => ImageFormat::Png,
    };
    img.save_with_format(path, format)?;
    Ok(())
}
