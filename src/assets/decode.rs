use std::{io::Cursor, path::Path, sync::Arc};

use anyhow::Context;
use base64::Engine as _;

use crate::foundation::{
    error::{DrapeError, DrapeResult},
    math::{premultiply_rgba8_in_place, unpremultiply_rgba8_in_place},
};

const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Decoded image held as premultiplied RGBA8, cheap to clone.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PreparedImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Pixel bytes in row-major premultiplied RGBA8.
    pub rgba8_premul: Arc<Vec<u8>>,
}

impl PreparedImage {
    pub fn from_rgba_image(rgba: image::RgbaImage) -> Self {
        let (width, height) = rgba.dimensions();
        let mut rgba8_premul = rgba.into_raw();
        premultiply_rgba8_in_place(&mut rgba8_premul);
        Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        }
    }

    /// Build from premultiplied bytes, checking the buffer length.
    pub fn from_premul_parts(width: u32, height: u32, rgba8_premul: Vec<u8>) -> DrapeResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| DrapeError::validation("image size overflow"))?;
        if rgba8_premul.len() != expected {
            return Err(DrapeError::validation(format!(
                "expected {expected} premultiplied bytes for {width}x{height}, got {}",
                rgba8_premul.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(rgba8_premul),
        })
    }

    /// Straight-alpha copy of the pixels.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let mut raw = self.rgba8_premul.as_ref().clone();
        unpremultiply_rgba8_in_place(&mut raw);
        // Length is checked on construction.
        image::RgbaImage::from_raw(self.width, self.height, raw)
            .unwrap_or_else(|| image::RgbaImage::new(self.width, self.height))
    }

    pub fn to_png_bytes(&self) -> DrapeResult<Vec<u8>> {
        encode_png(&self.to_rgba_image())
    }

    pub fn to_data_uri(&self) -> DrapeResult<String> {
        Ok(png_data_uri(&self.to_png_bytes()?))
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Some([px[0], px[1], px[2], px[3]])
    }
}

impl serde::Serialize for PreparedImage {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let uri = self.to_data_uri().map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&uri)
    }
}

impl<'de> serde::Deserialize<'de> for PreparedImage {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let uri = String::deserialize(deserializer)?;
        decode_data_uri(&uri).map_err(serde::de::Error::custom)
    }
}

/// Decode an encoded upload (PNG, JPEG, ...) into a straight-alpha RGBA buffer.
pub fn decode_rgba(bytes: &[u8]) -> DrapeResult<image::RgbaImage> {
    let dyn_img = image::load_from_memory(bytes)
        .map_err(|e| DrapeError::decode(format!("decode image from memory: {e}")))?;
    Ok(dyn_img.to_rgba8())
}

/// Decode encoded image bytes and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> DrapeResult<PreparedImage> {
    Ok(PreparedImage::from_rgba_image(decode_rgba(bytes)?))
}

/// Decode a `data:image/...;base64,` URI.
pub fn decode_data_uri(uri: &str) -> DrapeResult<PreparedImage> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| DrapeError::decode("data uri must start with 'data:'"))?;
    let (meta, payload) = rest
        .split_once(',')
        .ok_or_else(|| DrapeError::decode("data uri has no payload separator"))?;
    if !meta.starts_with("image/") || !meta.ends_with(";base64") {
        return Err(DrapeError::decode(format!(
            "unsupported data uri media type '{meta}'"
        )));
    }
    let bytes = base64::engine::general_purpose::STANDARD
        .decode(payload.trim())
        .map_err(|e| DrapeError::decode(format!("data uri base64 payload: {e}")))?;
    decode_image(&bytes)
}

pub fn load_image_file(path: &Path) -> DrapeResult<PreparedImage> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    decode_image(&bytes)
}

pub fn encode_png(rgba: &image::RgbaImage) -> DrapeResult<Vec<u8>> {
    let mut buf = Vec::new();
    rgba.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

pub fn png_data_uri(png: &[u8]) -> String {
    let mut out = String::from(PNG_DATA_URI_PREFIX);
    base64::engine::general_purpose::STANDARD.encode_string(png, &mut out);
    out
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
