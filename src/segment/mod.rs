//! Background removal around an external segmentation model.
//!
//! The model is reached through [`Segmenter`]; this module only prepares its input and applies
//! the returned mask. A call is a single attempt: failures surface to the caller unchanged.

pub(crate) mod builtin;
pub(crate) mod gate;
pub(crate) mod mask;

use crate::{
    assets::decode::PreparedImage,
    config::DrapeConfig,
    foundation::error::DrapeResult,
    segment::mask::{LabeledMask, apply_mask, fit_within, select_mask},
};

/// Opaque segmentation service.
///
/// Futures are not `Send`; they run on the session's cooperative executor.
#[async_trait::async_trait(?Send)]
pub trait Segmenter {
    /// Per-pixel foreground masks for `image`, one per detected label.
    async fn segment(&self, image: &image::RgbaImage) -> DrapeResult<Vec<LabeledMask>>;
}

/// Downscale, segment, and cut out the selected mask.
#[tracing::instrument(skip_all, fields(width = image.width(), height = image.height()))]
pub async fn remove_background(
    segmenter: &dyn Segmenter,
    image: image::RgbaImage,
    config: &DrapeConfig,
) -> DrapeResult<PreparedImage> {
    let input = fit_within(image, config.max_segment_dim);
    tracing::debug!(
        width = input.width(),
        height = input.height(),
        "segmentation input prepared"
    );

    let segments = segmenter.segment(&input).await?;
    let mask = select_mask(&segments)?;
    let cut = apply_mask(&input, mask, config.mask_threshold)?;
    Ok(PreparedImage::from_rgba_image(cut))
}

#[cfg(test)]
#[path = "../../tests/unit/segment/remove.rs"]
mod tests;
