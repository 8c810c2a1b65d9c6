use image::imageops::FilterType;
use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgb, RgbImage, Rgba};
use std::io::Cursor;
use thiserror::Error;

/// Longest edge handed to the OCR engine.
const MAX_EDGE: u32 = 2800;

#[derive(Debug, Error)]
pub enum PreprocessError {
    #[error("Failed to load image: {0}")]
    Load(#[from] image::ImageError),
    #[error("Failed to encode processed image: {0}")]
    Encode(String),
}

/// Decode PNG/JPEG bytes, normalize for OCR and re-encode as PNG.
pub fn prepare_for_ocr(data: &[u8]) -> Result<Vec<u8>, PreprocessError> {
    let img = image::load_from_memory(data)?;
    let page = flatten_onto_white(fit_within(img, MAX_EDGE));
    encode_as_png(DynamicImage::ImageLuma8(stretch_contrast(page.to_luma8())))
}

fn fit_within(img: DynamicImage, edge: u32) -> DynamicImage {
    if img.width() <= edge && img.height() <= edge {
        return img;
    }
    img.resize(edge, edge, FilterType::Lanczos3)
}

/// Composite over a white page. Transparent regions of a scan or screenshot
/// read as paper, whatever colour is stored beneath them.
fn flatten_onto_white(img: DynamicImage) -> DynamicImage {
    if !img.color().has_alpha() {
        return img;
    }
    let rgba = img.to_rgba8();
    let flat: RgbImage = ImageBuffer::from_fn(rgba.width(), rgba.height(), |x, y| {
        let Rgba([r, g, b, a]) = *rgba.get_pixel(x, y);
        let a = u32::from(a);
        let over_white = |c: u8| ((u32::from(c) * a + 255 * (255 - a)) / 255) as u8;
        Rgb([over_white(r), over_white(g), over_white(b)])
    });
    DynamicImage::ImageRgb8(flat)
}

/// Map the darkest ink to 0 and the brightest paper to 255.
fn stretch_contrast(gray: GrayImage) -> GrayImage {
    let (lo, hi) = gray
        .pixels()
        .fold((u8::MAX, u8::MIN), |(lo, hi), Luma([p])| (lo.min(*p), hi.max(*p)));
    if hi <= lo {
        return gray;
    }

    let range = u32::from(hi - lo);
    let mut out = gray;
    for Luma([p]) in out.pixels_mut() {
        *p = (u32::from(*p - lo) * 255 / range) as u8;
    }
    out
}

fn encode_as_png(img: DynamicImage) -> Result<Vec<u8>, PreprocessError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .map_err(|e| PreprocessError::Encode(e.to_string()))?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};

    fn encode(img: DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut buf = Vec::new();
        img.write_to(&mut Cursor::new(&mut buf), format).unwrap();
        buf
    }

    #[test]
    fn uniform_image_is_left_alone() {
        let img: GrayImage = ImageBuffer::from_fn(10, 10, |_, _| Luma([128u8]));
        let result = stretch_contrast(img);
        assert_eq!((result.width(), result.height()), (10, 10));
        assert!(result.pixels().all(|p| p[0] == 128));
    }

    #[test]
    fn low_contrast_scan_is_stretched() {
        let img: GrayImage = ImageBuffer::from_fn(100, 1, |x, _| Luma([100 + (x as u8) / 2]));
        let gray = stretch_contrast(img);
        assert_eq!(gray.pixels().map(|p| p[0]).min(), Some(0));
        assert_eq!(gray.pixels().map(|p| p[0]).max(), Some(255));
    }

    #[test]
    fn alpha_channel_is_dropped() {
        let img: RgbaImage = ImageBuffer::from_fn(4, 4, |x, _| {
            Rgba([if x < 2 { 0 } else { 255 }, 0, 0, 10])
        });
        let out = prepare_for_ocr(&encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)).unwrap();
        let decoded = image::load_from_memory(&out).unwrap();
        assert!(!decoded.color().has_alpha());
        assert!(!decoded.color().has_color());
    }

    #[test]
    fn transparent_pixels_become_paper() {
        // Left half is fully transparent but stores black underneath.
        let img: RgbaImage = ImageBuffer::from_fn(4, 1, |x, _| {
            if x < 2 {
                Rgba([0, 0, 0, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        let out = prepare_for_ocr(&encode(DynamicImage::ImageRgba8(img), ImageFormat::Png)).unwrap();
        let gray = image::load_from_memory(&out).unwrap().to_luma8();
        let row: Vec<u8> = gray.pixels().map(|p| p[0]).collect();
        assert_eq!(row, [255, 255, 0, 0]);
    }

    #[test]
    fn opaque_image_is_not_flattened() {
        let img = DynamicImage::ImageLuma8(ImageBuffer::from_fn(2, 2, |_, _| Luma([7u8])));
        assert_eq!(flatten_onto_white(img.clone()), img);
    }

    #[test]
    fn jpeg_input_comes_out_as_png() {
        let img = DynamicImage::ImageRgb8(ImageBuffer::from_fn(8, 8, |x, y| {
            image::Rgb([(x * 30) as u8, (y * 30) as u8, 90])
        }));
        let out = prepare_for_ocr(&encode(img, ImageFormat::Jpeg)).unwrap();
        assert_eq!(&out[..4], b"\x89PNG");
    }

    #[test]
    fn oversized_page_is_downscaled() {
        let img: GrayImage = ImageBuffer::from_fn(3000, 1500, |_, _| Luma([200u8]));
        let result = fit_within(DynamicImage::ImageLuma8(img), MAX_EDGE);
        assert_eq!((result.width(), result.height()), (MAX_EDGE, MAX_EDGE / 2));
    }

    #[test]
    fn undecodable_bytes_fail_to_load() {
        assert!(matches!(
            prepare_for_ocr(b"not an image"),
            Err(PreprocessError::Load(_))
        ));
    }
}
