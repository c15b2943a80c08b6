use image::DynamicImage;
use std::io::Cursor;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("failed to decode image: {0}")]
    Image(#[from] image::ImageError),
}

/// Decode raw upload bytes and rotate the raster so its visual top matches
/// pixel-row order, per the EXIF orientation tag.
///
/// Orientation handling is best-effort: missing or unreadable metadata
/// leaves the decode untouched. Decode failure is the only fatal error.
pub fn load_upright(data: &[u8]) -> Result<DynamicImage, DecodeError> {
    let img = image::load_from_memory(data)?;
    match read_orientation(data) {
        Some(tag) => Ok(apply_orientation(img, tag)),
        None => Ok(img),
    }
}

/// Pull the orientation tag (1–8) out of the container's EXIF block, if any.
fn read_orientation(data: &[u8]) -> Option<u32> {
    let exif = match exif::Reader::new().read_from_container(&mut Cursor::new(data)) {
        Ok(exif) => exif,
        Err(err) => {
            debug!("no usable EXIF block, keeping image as decoded: {err}");
            return None;
        }
    };
    exif.get_field(exif::Tag::Orientation, exif::In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
}

/// Undo the capture rotation encoded by EXIF orientation values 2–8.
/// Value 1 (already upright) and anything out of range pass through.
fn apply_orientation(img: DynamicImage, tag: u32) -> DynamicImage {
    match tag {
        2 => img.fliph(),
        3 => img.rotate180(),
        4 => img.flipv(),
        5 => img.rotate90().fliph(),
        6 => img.rotate90(),
        7 => img.rotate270().fliph(),
        8 => img.rotate270(),
        _ => img,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, GrayImage, ImageBuffer, Luma};

    fn tiny_png(width: u32, height: u32) -> Vec<u8> {
        let img: GrayImage = ImageBuffer::from_fn(width, height, |_, _| Luma([200u8]));
        let mut buf = Vec::new();
        DynamicImage::ImageLuma8(img)
            .write_to(&mut std::io::Cursor::new(&mut buf), image::ImageFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn plain_png_decodes_unrotated() {
        let img = load_upright(&tiny_png(6, 4)).unwrap();
        assert_eq!((img.width(), img.height()), (6, 4));
    }

    #[test]
    fn corrupt_bytes_are_a_decode_error() {
        assert!(load_upright(b"definitely not an image").is_err());
    }

    #[test]
    fn empty_bytes_are_a_decode_error() {
        assert!(load_upright(b"").is_err());
    }

    #[test]
    fn rotated_tags_swap_dimensions() {
        let img: GrayImage = ImageBuffer::from_fn(6, 4, |_, _| Luma([0u8]));
        for tag in [5, 6, 7, 8] {
            let out = apply_orientation(DynamicImage::ImageLuma8(img.clone()), tag);
            assert_eq!((out.width(), out.height()), (4, 6), "tag {tag}");
        }
    }

    #[test]
    fn flipped_and_upright_tags_keep_dimensions() {
        let img: GrayImage = ImageBuffer::from_fn(6, 4, |_, _| Luma([0u8]));
        for tag in [1, 2, 3, 4] {
            let out = apply_orientation(DynamicImage::ImageLuma8(img.clone()), tag);
            assert_eq!((out.width(), out.height()), (6, 4), "tag {tag}");
        }
    }

    #[test]
    fn rotate_180_restores_flipped_pixels() {
        // One dark pixel in the top-left corner.
        let img: GrayImage = ImageBuffer::from_fn(4, 4, |x, y| {
            if x == 0 && y == 0 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        let out = apply_orientation(DynamicImage::ImageLuma8(img), 3).to_luma8();
        assert_eq!(out.get_pixel(3, 3)[0], 0);
        assert_eq!(out.get_pixel(0, 0)[0], 255);
    }
}
