//! Image loading utilities for texture data
//!
//! Decodes PNG files into CPU-side RGBA buffers ready for upload, and applies
//! color-key transparency before the buffer reaches the GPU.

use std::path::Path;
use crate::assets::AssetError;
use crate::render::Color;

/// Bytes per RGBA pixel
pub const RGBA_CHANNELS: u8 = 4;

/// Loaded image data ready for GPU upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Raw RGBA pixel data, tightly packed rows
    pub data: Vec<u8>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Number of color channels (always 4 for RGBA)
    pub channels: u8,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref)
            .map_err(|e| AssetError::LoadFailed(format!("{}: {}", path_ref.display(), e)))?;

        // Convert to RGBA8 format (standard for GPU upload)
        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self {
            data: rgba_img.into_raw(),
            width,
            height,
            channels: RGBA_CHANNELS,
        })
    }

    /// Create a solid color image
    #[cfg(test)]
    pub(crate) fn solid_color(width: u32, height: u32, color: Color) -> Self {
        let pixel_count = (width * height) as usize;
        let mut data = Vec::with_capacity(pixel_count * RGBA_CHANNELS as usize);

        for _ in 0..pixel_count {
            data.extend_from_slice(&[color.r, color.g, color.b, color.a]);
        }

        Self {
            data,
            width,
            height,
            channels: RGBA_CHANNELS,
        }
    }

    /// Make every opaque pixel whose RGB equals `key` fully transparent
    ///
    /// Only pixels with alpha 255 match, like an SDL color key mapped with
    /// `SDL_MapRGB`; the key's own alpha is ignored. Returns the number of
    /// pixels keyed out.
    pub fn apply_color_key(&mut self, key: Color) -> usize {
        let mut keyed = 0;
        for pixel in self.data.chunks_exact_mut(RGBA_CHANNELS as usize) {
            if pixel[0] == key.r && pixel[1] == key.g && pixel[2] == key.b && pixel[3] == 0xFF {
                pixel[3] = 0;
                keyed += 1;
            }
        }
        keyed
    }

    /// Color of the pixel at (`x`, `y`), if in bounds
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = ((y * self.width + x) as usize) * RGBA_CHANNELS as usize;
        let p = self.data.get(offset..offset + RGBA_CHANNELS as usize)?;
        Some(Color::rgba(p[0], p[1], p[2], p[3]))
    }

    /// Bytes per row
    pub fn pitch(&self) -> usize {
        self.width as usize * self.channels as usize
    }
}

/// Image decoding subsystem
///
/// Decoding itself is stateless; initialization verifies that the formats the
/// application needs were compiled into the `image` crate, the same way a
/// native image library reports which codecs it could bring up.
#[derive(Debug)]
pub struct ImageDecoder {
    formats: Vec<image::ImageFormat>,
}

impl ImageDecoder {
    /// Bring up decoding for PNG
    pub fn init() -> Result<Self, AssetError> {
        Self::with_formats(&[image::ImageFormat::Png])
    }

    /// Bring up decoding for the given formats
    pub fn with_formats(formats: &[image::ImageFormat]) -> Result<Self, AssetError> {
        if let Some(missing) = formats.iter().find(|format| !format.reading_enabled()) {
            return Err(AssetError::UnsupportedFormat(format!("{:?} decoding is not available", missing)));
        }
        log::debug!("Image decoding initialized for {:?}", formats);
        Ok(Self { formats: formats.to_vec() })
    }

    /// Formats this decoder was initialized with
    pub fn formats(&self) -> &[image::ImageFormat] {
        &self.formats
    }

    /// Decode the image at `path` and key out `color_key`
    pub fn decode_keyed(&self, path: &Path, color_key: Color) -> Result<ImageData, AssetError> {
        let mut image = ImageData::from_file(path)?;
        let keyed = image.apply_color_key(color_key);
        log::debug!("Color key {:?} cleared {} pixel(s) in {:?}", color_key, keyed, path);
        Ok(image)
    }
}

impl Drop for ImageDecoder {
    fn drop(&mut self) {
        log::debug!("Image decoding shut down");
    }
}
