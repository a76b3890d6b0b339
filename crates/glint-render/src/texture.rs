//! Texture contract and decoding.

use crate::error::RenderResult;

/// A GPU-resident texture.
pub trait Texture: Send + Sync {
    /// The backend's handle, `0` until uploaded.
    fn gl_name(&self) -> u32;
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// Decoded RGBA8 pixels ready for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA8, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

impl TextureData {
    /// Decode any image format the `image` crate recognizes.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }
}

impl std::fmt::Debug for TextureData {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureData")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_decode_png() {
        let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]));
        let mut png = Vec::new();
        img.write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .unwrap();

        let data = TextureData::decode(&png).unwrap();
        assert_eq!((data.width, data.height), (3, 2));
        assert_eq!(data.pixels.len(), 3 * 2 * 4);
        assert_eq!(&data.pixels[..4], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(TextureData::decode(b"not an image").is_err());
    }
}
