//! Optional logo lookup and preparation for embedding.

pub mod logo;
pub mod normalize;

pub use logo::{LOGO_CANDIDATES, find_logo, load_logo};
pub use normalize::normalize_logo;

/// PDF color space of an embedded logo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoColorSpace {
    Rgb,
    Gray,
}

impl LogoColorSpace {
    pub fn pdf_name(&self) -> &'static str {
        match self {
            LogoColorSpace::Rgb => "DeviceRGB",
            LogoColorSpace::Gray => "DeviceGray",
        }
    }

    /// Components per pixel in the embedded JPEG.
    pub fn components(&self) -> u8 {
        match self {
            LogoColorSpace::Rgb => 3,
            LogoColorSpace::Gray => 1,
        }
    }
}

/// An opaque JPEG ready to be embedded with `DCTDecode`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoAsset {
    pub bytes: Vec<u8>,
    pub width: u32,
    pub height: u32,
    pub color_space: LogoColorSpace,
}
