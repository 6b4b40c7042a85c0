use crate::foundation::error::{DrapeError, DrapeResult};

/// Label preferred when the model reports several segments.
pub const PERSON_LABEL: &str = "person";

/// Foreground confidence per pixel, row-major, values in `0.0..=1.0`.
#[derive(Clone, Debug, PartialEq)]
pub struct SegmentationMask {
    width: u32,
    height: u32,
    values: Vec<f32>,
}

impl SegmentationMask {
    pub fn new(width: u32, height: u32, values: Vec<f32>) -> DrapeResult<Self> {
        if values.len() != width as usize * height as usize {
            return Err(DrapeError::segmentation(format!(
                "mask has {} values for {width}x{height}",
                values.len()
            )));
        }
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Same value for every pixel.
    pub fn filled(width: u32, height: u32, value: f32) -> Self {
        Self {
            width,
            height,
            values: vec![value; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f32) -> Self {
        let mut values = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                values.push(f(x, y));
            }
        }
        Self {
            width,
            height,
            values,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn values(&self) -> &[f32] {
        &self.values
    }
}

/// One segment reported by the model.
#[derive(Clone, Debug, PartialEq)]
pub struct LabeledMask {
    pub label: String,
    pub mask: SegmentationMask,
}

/// The `person` segment if present, otherwise the first one.
pub fn select_mask(segments: &[LabeledMask]) -> DrapeResult<&SegmentationMask> {
    segments
        .iter()
        .find(|s| s.label == PERSON_LABEL)
        .or_else(|| segments.first())
        .map(|s| &s.mask)
        .ok_or_else(|| DrapeError::segmentation("segmentation returned no masks"))
}

/// Target size for an image whose long side must not exceed `max_dim`. Aspect is preserved.
pub fn fit_dimensions(width: u32, height: u32, max_dim: u32) -> (u32, u32) {
    if width <= max_dim && height <= max_dim {
        return (width, height);
    }
    let (w, h) = (f64::from(width), f64::from(height));
    let m = f64::from(max_dim);
    if width > height {
        (max_dim, ((h * m) / w).round().max(1.0) as u32)
    } else {
        (((w * m) / h).round().max(1.0) as u32, max_dim)
    }
}

/// Downscale `image` to fit in `max_dim`; smaller images pass through untouched.
pub fn fit_within(image: image::RgbaImage, max_dim: u32) -> image::RgbaImage {
    let (w, h) = image.dimensions();
    let (tw, th) = fit_dimensions(w, h, max_dim);
    if (tw, th) == (w, h) {
        return image;
    }
    image::imageops::resize(&image, tw, th, image::imageops::FilterType::Triangle)
}

/// Copy of `image` whose alpha is 255 where the mask exceeds `threshold`, else 0.
///
/// Color channels are kept as they were.
pub fn apply_mask(
    image: &image::RgbaImage,
    mask: &SegmentationMask,
    threshold: f32,
) -> DrapeResult<image::RgbaImage> {
    if (mask.width, mask.height) != image.dimensions() {
        return Err(DrapeError::segmentation(format!(
            "mask is {}x{} but image is {}x{}",
            mask.width,
            mask.height,
            image.width(),
            image.height()
        )));
    }
    let mut out = image.clone();
    for (px, &v) in out.pixels_mut().zip(mask.values.iter()) {
        px.0[3] = if v > threshold { 255 } else { 0 };
    }
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/unit/segment/mask.rs"]
mod tests;
