use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageError, ImageFormat, Rgba, RgbImage, RgbaImage, imageops};

use super::{LogoAsset, LogoColorSpace};

const JPEG_QUALITY: u8 = 90;

/// Turns raw logo bytes into an opaque JPEG.
///
/// Transparent sources are composited over white first. Opaque gray or RGB
/// JPEGs are passed through untouched; CMYK/YCCK JPEGs are converted to RGB.
/// Returns `None` when the bytes cannot be decoded or re-encoded.
pub fn normalize_logo(bytes: &[u8]) -> Option<LogoAsset> {
    match try_normalize(bytes) {
        Ok(asset) => Some(asset),
        Err(e) => {
            tracing::warn!(error = %e, "Logo could not be normalized, rendering without logo");
            None
        }
    }
}

fn try_normalize(bytes: &[u8]) -> Result<LogoAsset, ImageError> {
    let format = image::guess_format(bytes)?;
    let decoded = image::load_from_memory_with_format(bytes, format)?;
    let (width, height) = (decoded.width(), decoded.height());
    let color = decoded.color();

    if color.has_alpha() {
        let flattened = DynamicImage::ImageRgb8(flatten_onto_white(&decoded));
        return Ok(LogoAsset {
            bytes: encode_jpeg(&flattened)?,
            width,
            height,
            color_space: LogoColorSpace::Rgb,
        });
    }

    let color_space = if color.has_color() {
        LogoColorSpace::Rgb
    } else {
        LogoColorSpace::Gray
    };

    if format == ImageFormat::Jpeg && jpeg_components(bytes) == Some(color_space.components()) {
        return Ok(LogoAsset {
            bytes: bytes.to_vec(),
            width,
            height,
            color_space,
        });
    }

    let opaque = match color_space {
        LogoColorSpace::Rgb => DynamicImage::ImageRgb8(decoded.to_rgb8()),
        LogoColorSpace::Gray => DynamicImage::ImageLuma8(decoded.to_luma8()),
    };

    Ok(LogoAsset {
        bytes: encode_jpeg(&opaque)?,
        width,
        height,
        color_space,
    })
}

/// Number of color components declared by the first SOF segment.
fn jpeg_components(bytes: &[u8]) -> Option<u8> {
    let mut pos = 2;
    if bytes.get(..2)? != [0xFF, 0xD8] {
        return None;
    }

    loop {
        if *bytes.get(pos)? != 0xFF {
            return None;
        }
        while *bytes.get(pos)? == 0xFF {
            pos += 1;
        }
        let marker = *bytes.get(pos)?;
        pos += 1;

        match marker {
            // RSTn and TEM carry no length
            0xD0..=0xD7 | 0x01 => continue,
            0xD9 | 0xDA => return None,
            0xC0..=0xCF if !matches!(marker, 0xC4 | 0xC8 | 0xCC) => {
                // length(2) precision(1) height(2) width(2) components(1)
                return bytes.get(pos + 7).copied();
            }
            _ => {
                let len = u16::from_be_bytes([*bytes.get(pos)?, *bytes.get(pos + 1)?]) as usize;
                pos += len;
            }
        }
    }
}

fn flatten_onto_white(image: &DynamicImage) -> RgbImage {
    let mut canvas = RgbaImage::from_pixel(image.width(), image.height(), Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut canvas, &image.to_rgba8(), 0, 0);
    DynamicImage::ImageRgba8(canvas).to_rgb8()
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, ImageError> {
    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    image.write_with_encoder(encoder)?;
    Ok(out)
}
