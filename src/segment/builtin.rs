//! Offline segmenters, for the CLI and for hosts without a model.

use crate::{
    foundation::error::DrapeResult,
    segment::{
        Segmenter,
        mask::{LabeledMask, SegmentationMask},
    },
};

/// Keeps every pixel.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughSegmenter;

#[async_trait::async_trait(?Send)]
impl Segmenter for PassthroughSegmenter {
    async fn segment(&self, image: &image::RgbaImage) -> DrapeResult<Vec<LabeledMask>> {
        Ok(vec![LabeledMask {
            label: "foreground".to_string(),
            mask: SegmentationMask::filled(image.width(), image.height(), 1.0),
        }])
    }
}

/// Treats the color found in the four corners as a flat backdrop and masks it out.
///
/// A pixel is background when every RGB channel is within `tolerance` of the corner average.
#[derive(Clone, Copy, Debug)]
pub struct BackdropKeySegmenter {
    pub tolerance: u8,
}

impl Default for BackdropKeySegmenter {
    fn default() -> Self {
        Self { tolerance: 24 }
    }
}

impl BackdropKeySegmenter {
    fn backdrop(image: &image::RgbaImage) -> [u8; 3] {
        let (w, h) = image.dimensions();
        let corners = [(0, 0), (w - 1, 0), (0, h - 1), (w - 1, h - 1)];
        let mut sum = [0u32; 3];
        for (x, y) in corners {
            let px = image.get_pixel(x, y).0;
            for c in 0..3 {
                sum[c] += u32::from(px[c]);
            }
        }
        sum.map(|s| (s / 4) as u8)
    }
}

#[async_trait::async_trait(?Send)]
impl Segmenter for BackdropKeySegmenter {
    async fn segment(&self, image: &image::RgbaImage) -> DrapeResult<Vec<LabeledMask>> {
        let (w, h) = image.dimensions();
        if w == 0 || h == 0 {
            return Ok(vec![LabeledMask {
                label: "foreground".to_string(),
                mask: SegmentationMask::filled(w, h, 0.0),
            }]);
        }
        let key = Self::backdrop(image);
        let tol = self.tolerance;
        let mask = SegmentationMask::from_fn(w, h, |x, y| {
            let px = image.get_pixel(x, y).0;
            let is_backdrop = (0..3).all(|c| px[c].abs_diff(key[c]) <= tol);
            if is_backdrop { 0.0 } else { 1.0 }
        });
        Ok(vec![LabeledMask {
            label: "foreground".to_string(),
            mask,
        }])
    }
}
