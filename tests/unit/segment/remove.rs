use std::cell::Cell;

use futures::executor::block_on;

use super::*;
use crate::{
    foundation::error::DrapeError,
    segment::mask::SegmentationMask,
};

/// Records the input size and keeps the left half.
#[derive(Default)]
struct LeftHalf {
    seen: Cell<(u32, u32)>,
}

#[async_trait::async_trait(?Send)]
impl Segmenter for LeftHalf {
    async fn segment(&self, image: &image::RgbaImage) -> DrapeResult<Vec<LabeledMask>> {
        let (w, h) = image.dimensions();
        self.seen.set((w, h));
        Ok(vec![LabeledMask {
            label: "person".to_string(),
            mask: SegmentationMask::from_fn(w, h, |x, _| if x < w / 2 { 1.0 } else { 0.0 }),
        }])
    }
}

struct Offline;

#[async_trait::async_trait(?Send)]
impl Segmenter for Offline {
    async fn segment(&self, _image: &image::RgbaImage) -> DrapeResult<Vec<LabeledMask>> {
        Err(DrapeError::segmentation("model download failed"))
    }
}

#[test]
fn cutout_is_made_at_the_downscaled_size() {
    let cfg = DrapeConfig {
        max_segment_dim: 8,
        ..DrapeConfig::default()
    };
    let seg = LeftHalf::default();
    let img = image::RgbaImage::from_pixel(16, 4, image::Rgba([0, 0, 255, 255]));

    let out = block_on(remove_background(&seg, img, &cfg)).unwrap();

    assert_eq!(seg.seen.get(), (8, 2));
    assert_eq!((out.width, out.height), (8, 2));
    assert_eq!(out.pixel(0, 0), Some([0, 0, 255, 255]));
    assert_eq!(out.pixel(7, 1), Some([0, 0, 0, 0]));
}

#[test]
fn service_errors_surface_unchanged() {
    let img = image::RgbaImage::new(2, 2);
    let err = block_on(remove_background(&Offline, img, &DrapeConfig::default())).unwrap_err();
    assert!(matches!(err, DrapeError::Segmentation(m) if m.contains("model download")));
}
