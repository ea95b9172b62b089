//! QR code rendering.
//!
//! Rendering sits behind [`QrRenderer`] so the rest of the system treats it
//! as `render(text) -> image bytes` and nothing more. The PNG implementation
//! draws the module matrix at a fixed scale with a quiet zone around it.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

/// Failure while producing an image from text.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("qr encoding failed: {0}")]
    Encode(#[from] qrcode::types::QrError),
    #[error("png encoding failed: {0}")]
    Png(#[from] image::ImageError),
}

/// Renders arbitrary text to image bytes.
pub trait QrRenderer: Send + Sync {
    fn render(&self, text: &str) -> Result<Vec<u8>, RenderError>;
}

/// PNG renderer drawing each module as a `scale`-pixel square.
pub struct PngQrRenderer {
    /// Pixels per module.
    scale: u32,
    /// Light border width, in modules.
    quiet_zone: u32,
}

impl PngQrRenderer {
    pub fn new() -> Self {
        Self {
            scale: 10,
            quiet_zone: 4,
        }
    }
}

impl Default for PngQrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl QrRenderer for PngQrRenderer {
    fn render(&self, text: &str) -> Result<Vec<u8>, RenderError> {
        let code = QrCode::new(text.as_bytes())?;
        let width = code.width();
        let colors = code.to_colors();

        let side = (width as u32 + 2 * self.quiet_zone) * self.scale;
        let mut image = GrayImage::from_pixel(side, side, Luma([u8::MAX]));

        for (index, color) in colors.iter().enumerate() {
            if *color != Color::Dark {
                continue;
            }

            let module_x = (index % width) as u32 + self.quiet_zone;
            let module_y = (index / width) as u32 + self.quiet_zone;

            for dy in 0..self.scale {
                for dx in 0..self.scale {
                    image.put_pixel(
                        module_x * self.scale + dx,
                        module_y * self.scale + dy,
                        Luma([0]),
                    );
                }
            }
        }

        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;

        Ok(bytes.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

    #[test]
    fn renders_png_bytes() {
        let renderer = PngQrRenderer::new();
        let bytes = renderer.render("http://localhost:3000/promo").unwrap();

        assert!(bytes.len() > PNG_MAGIC.len());
        assert_eq!(&bytes[..8], &PNG_MAGIC);
    }

    #[test]
    fn different_payloads_render_differently() {
        let renderer = PngQrRenderer::new();
        let a = renderer.render("http://localhost:3000/a").unwrap();
        let b = renderer.render("http://localhost:3000/b").unwrap();

        assert_ne!(a, b);
    }
}
