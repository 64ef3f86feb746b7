//! Source image representation and working-resolution fitting.

use image::{RgbaImage, imageops};

/// Maximum working width. Larger inputs are downscaled before upload.
pub const WORKING_MAX_WIDTH: u32 = 1400;
/// Maximum working height. Larger inputs are downscaled before upload.
pub const WORKING_MAX_HEIGHT: u32 = 900;

/// Errors raised when constructing a [`SourceImage`] from raw data.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ImageError {
    #[error("image has zero width or height")]
    Empty,
    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },
}

/// A fully decoded RGBA8 pixel grid, row-major, top row first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// Pixel data, one `[r, g, b, a]` per pixel.
    pub pixels: Vec<[u8; 4]>,
}

impl SourceImage {
    /// Build from a tightly packed RGBA8 byte buffer.
    pub fn from_rgba8(width: u32, height: u32, bytes: &[u8]) -> Result<Self, ImageError> {
        if width == 0 || height == 0 {
            return Err(ImageError::Empty);
        }
        let expected = width as usize * height as usize * 4;
        if bytes.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }
        let pixels = bytes
            .chunks_exact(4)
            .map(|p| [p[0], p[1], p[2], p[3]])
            .collect();
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Fill a `width × height` image with one color.
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        Self {
            width,
            height,
            pixels: vec![rgba; width as usize * height as usize],
        }
    }

    /// Check that the dimensions are non-zero and agree with the pixel count.
    pub fn validate(&self) -> Result<(), ImageError> {
        if self.width == 0 || self.height == 0 {
            return Err(ImageError::Empty);
        }
        let expected = self.width as usize * self.height as usize;
        if self.pixels.len() != expected {
            return Err(ImageError::BufferSizeMismatch {
                expected: expected * 4,
                actual: self.pixels.len() * 4,
            });
        }
        Ok(())
    }

    /// Pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Tightly packed RGBA8 bytes, ready for texture upload.
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Downscale to fit within [`WORKING_MAX_WIDTH`] × [`WORKING_MAX_HEIGHT`],
    /// preserving aspect ratio. Images already inside the bound are cloned.
    pub fn to_working_resolution(&self) -> Self {
        let (w, h) = fit_within(
            self.width,
            self.height,
            WORKING_MAX_WIDTH,
            WORKING_MAX_HEIGHT,
        );
        if (w, h) == (self.width, self.height) {
            return self.clone();
        }
        tracing::debug!(
            from_width = self.width,
            from_height = self.height,
            to_width = w,
            to_height = h,
            "downscaling source to working resolution"
        );
        let rgba = self.to_rgba_image();
        let resized = imageops::resize(&rgba, w, h, imageops::FilterType::Triangle);
        Self::from(resized)
    }

    /// Copy into an `image::RgbaImage`.
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut img = RgbaImage::new(self.width, self.height);
        for (dst, src) in img.pixels_mut().zip(self.pixels.iter()) {
            dst.0 = *src;
        }
        img
    }
}

impl From<RgbaImage> for SourceImage {
    fn from(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.pixels().map(|p| p.0).collect();
        Self {
            width,
            height,
            pixels,
        }
    }
}

/// Aspect-preserving fit: clamp to `max_w` first, then to `max_h`.
///
/// Never upscales and never returns a zero dimension.
pub fn fit_within(width: u32, height: u32, max_w: u32, max_h: u32) -> (u32, u32) {
    let mut w = width as f64;
    let mut h = height as f64;
    if w > max_w as f64 {
        h = h * max_w as f64 / w;
        w = max_w as f64;
    }
    if h > max_h as f64 {
        w = w * max_h as f64 / h;
        h = max_h as f64;
    }
    ((w.round() as u32).max(1), (h.round() as u32).max(1))
}
