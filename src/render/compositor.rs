use std::cell::OnceCell;

use crate::{
    assets::decode::PreparedImage,
    config::DrapeConfig,
    foundation::{
        core::{Affine, Canvas, Size, Vec2},
        error::DrapeResult,
    },
    layer::{content::LayerContent, kind::LayerKind, store::Layer, store::LayerStore},
    render::{
        cpu::CpuCanvas,
        frame::Snapshot,
        layout::{PreviewLayout, contain},
        text::{TEXT_BASE_FONT_PX, TextRasterizer, preview_font_px},
        transform_stack::TransformStack,
    },
};

/// Draws layer stacks onto a base image.
///
/// `flatten` produces the capture snapshot; `render_preview` rasterizes the on-screen layout.
/// The text rasterizer (system font scan) is created on first use.
#[derive(Debug)]
pub struct Compositor {
    overlay_opacity: f32,
    text: OnceCell<TextRasterizer>,
}

impl Compositor {
    pub fn new(config: &DrapeConfig) -> Self {
        Self {
            overlay_opacity: config.overlay_opacity,
            text: OnceCell::new(),
        }
    }

    pub fn with_text_rasterizer(config: &DrapeConfig, text: TextRasterizer) -> Self {
        Self {
            overlay_opacity: config.overlay_opacity,
            text: OnceCell::from(text),
        }
    }

    pub fn overlay_opacity(&self) -> f32 {
        self.overlay_opacity
    }

    fn text(&self) -> &TextRasterizer {
        self.text.get_or_init(TextRasterizer::with_system_fonts)
    }

    /// Pixels for a layer's content at `font_px` (text only); `None` when there is nothing to draw.
    fn layer_raster(&self, layer: &Layer, font_px: f64) -> DrapeResult<Option<PreparedImage>> {
        if !layer.has_content() {
            return Ok(None);
        }
        match layer.content() {
            LayerContent::Empty => Ok(None),
            LayerContent::Image(img) => Ok(Some(img.clone())),
            LayerContent::Text(t) => self.text().rasterize(t, font_px).map(Some),
        }
    }

    /// Flatten `layers` over `base` into a snapshot the size of `base`.
    ///
    /// Per layer with content, starting from a saved identity:
    /// 1. translate to the canvas center plus `((x-50)/100 * W, (y-50)/100 * H)`
    /// 2. rotate by `rotation` (radians)
    /// 3. scale by `scale / 100`
    /// 4. draw the overlay centered on the origin at the fixed overlay opacity
    ///
    /// then restore, so no layer inherits another's transform.
    #[tracing::instrument(skip_all, fields(width = base.width, height = base.height))]
    pub fn flatten<'a>(
        &self,
        base: &PreparedImage,
        layers: impl IntoIterator<Item = &'a Layer>,
    ) -> DrapeResult<Snapshot> {
        let canvas = Canvas {
            width: base.width,
            height: base.height,
        };
        let size = canvas.size();
        let mut surface = CpuCanvas::new(canvas.width, canvas.height)?;
        surface.draw_image(base, Affine::IDENTITY, 1.0)?;

        let mut ordered: Vec<&Layer> = layers.into_iter().collect();
        ordered.sort_by_key(|l| l.kind().z_index());

        let mut stack = TransformStack::new();
        for layer in ordered {
            let Some(overlay) = self.layer_raster(layer, TEXT_BASE_FONT_PX)? else {
                continue;
            };
            let t = layer.transform();

            stack.save();
            let center = Vec2::new(size.width / 2.0, size.height / 2.0);
            stack.translate(center + t.position.center_offset(size));
            stack.rotate(t.rotation_rad());
            stack.scale(t.scale_factor());
            let centered = stack.current()
                * Affine::translate(Vec2::new(
                    -f64::from(overlay.width) / 2.0,
                    -f64::from(overlay.height) / 2.0,
                ));
            surface.draw_image(&overlay, centered, self.overlay_opacity)?;
            stack.restore();

            tracing::debug!(layer = %layer.kind(), "flattened layer");
        }

        surface.finish()
    }

    /// Rasterize the preview: base fitted into `container`, layers placed by [`PreviewLayout`].
    #[tracing::instrument(skip_all)]
    pub fn render_preview(
        &self,
        base: &PreparedImage,
        store: &LayerStore,
        container: Size,
    ) -> DrapeResult<Snapshot> {
        let width = container.width.round().max(1.0) as u32;
        let height = container.height.round().max(1.0) as u32;
        let mut surface = CpuCanvas::new(width, height)?;

        let base_size = Size::new(f64::from(base.width), f64::from(base.height));
        surface.draw_image(base, contain(base_size, container), 1.0)?;

        let layout = PreviewLayout::compute(store, container);
        for placed in &layout.layers {
            let layer = store.layer(placed.kind)?;
            let font_px = preview_font_px(layer.transform().scale);
            let Some(raster) = self.layer_raster(layer, font_px)? else {
                continue;
            };
            let raster_size = Size::new(f64::from(raster.width), f64::from(raster.height));
            let transform = placed.to_affine() * contain(raster_size, placed.size);
            let opacity = match placed.kind {
                LayerKind::Garment => self.overlay_opacity,
                _ => 1.0,
            };
            surface.draw_image(&raster, transform, opacity)?;
        }

        surface.finish()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/compositor.rs"]
mod tests;
