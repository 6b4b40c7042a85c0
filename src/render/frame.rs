use std::path::Path;

use anyhow::Context;

use crate::{assets::decode::PreparedImage, foundation::error::DrapeResult};

/// Flattened raster produced by the compositor. Read-only: there is no layer stack behind it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    image: PreparedImage,
}

impl Snapshot {
    pub(crate) fn new(image: PreparedImage) -> Self {
        Self { image }
    }

    pub fn width(&self) -> u32 {
        self.image.width
    }

    pub fn height(&self) -> u32 {
        self.image.height
    }

    /// Row-major premultiplied RGBA8.
    pub fn premul_bytes(&self) -> &[u8] {
        self.image.rgba8_premul.as_slice()
    }

    /// Premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.image.pixel(x, y)
    }

    pub fn to_rgba_image(&self) -> image::RgbaImage {
        self.image.to_rgba_image()
    }

    pub fn to_png(&self) -> DrapeResult<Vec<u8>> {
        self.image.to_png_bytes()
    }

    pub fn to_data_uri(&self) -> DrapeResult<String> {
        self.image.to_data_uri()
    }

    pub fn save_png(&self, path: &Path) -> DrapeResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create output dir '{}'", parent.display()))?;
        }
        let png = self.to_png()?;
        std::fs::write(path, png).with_context(|| format!("write png '{}'", path.display()))?;
        Ok(())
    }
}
