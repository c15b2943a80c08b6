use image::imageops::FilterType;
use image::DynamicImage;
use tracing::debug;

/// Bound the longer image dimension to `max_dimension` pixels.
///
/// Downscale only: an image that already fits comes back untouched, and no
/// input is ever upscaled. Both axes shrink by the same integer ratio
/// (`dim * max_dimension / longest`, truncating), which keeps the aspect
/// ratio intact up to a pixel. Lanczos resampling keeps glyph edges legible
/// at OCR time.
pub fn bound_size(img: DynamicImage, max_dimension: u32) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    let longest = width.max(height);
    if longest <= max_dimension {
        return img;
    }
    let new_width = scale_dim(width, max_dimension, longest);
    let new_height = scale_dim(height, max_dimension, longest);
    debug!(width, height, new_width, new_height, "downscaling before OCR");
    img.resize_exact(new_width, new_height, FilterType::Lanczos3)
}

fn scale_dim(dim: u32, max_dimension: u32, longest: u32) -> u32 {
    ((dim as u64 * max_dimension as u64) / longest as u64).max(1) as u32
}
