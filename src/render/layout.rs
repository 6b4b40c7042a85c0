//! On-screen placement of layers inside the preview container.
//!
//! Each layer box is centered on its position, rotated about its own center, and stacked by
//! z-index. The same boxes drive pointer hit-testing and the preview raster.

use crate::{
    foundation::core::{Affine, Point, Size, Vec2},
    layer::{content::LayerContent, kind::LayerKind, store::LayerStore},
    render::text::{estimate_text_box, preview_font_px},
};

/// A layer box in container coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacedLayer {
    pub kind: LayerKind,
    pub center: Point,
    pub size: Size,
    pub rotation_deg: f64,
    pub z_index: i32,
}

impl PlacedLayer {
    /// Local box space `(0,0)..(w,h)` to container space.
    ///
    /// `T(center) * R(rotation) * T(-w/2, -h/2)`: the CSS `translate(-50%,-50%) rotate()` pair.
    pub fn to_affine(&self) -> Affine {
        Affine::translate(self.center.to_vec2())
            * Affine::rotate(self.rotation_deg.to_radians())
            * Affine::translate(Vec2::new(-self.size.width / 2.0, -self.size.height / 2.0))
    }

    pub fn contains(&self, p: Point) -> bool {
        if self.size.width <= 0.0 || self.size.height <= 0.0 {
            return false;
        }
        let local = self.to_affine().inverse() * p;
        (0.0..=self.size.width).contains(&local.x) && (0.0..=self.size.height).contains(&local.y)
    }
}

/// Boxes for every layer with content, bottom to top.
#[derive(Clone, Debug, PartialEq)]
pub struct PreviewLayout {
    pub container: Size,
    pub layers: Vec<PlacedLayer>,
}

impl PreviewLayout {
    pub fn compute(store: &LayerStore, container: Size) -> Self {
        let mut layers: Vec<PlacedLayer> = store
            .layers()
            .filter(|l| l.has_content())
            .map(|l| {
                let t = l.transform();
                let size = box_size(l.kind(), l.content(), t.scale, container);
                PlacedLayer {
                    kind: l.kind(),
                    center: t.position.to_point(container),
                    size,
                    rotation_deg: t.rotation,
                    z_index: l.kind().z_index(),
                }
            })
            .collect();
        layers.sort_by_key(|p| p.z_index);
        Self { container, layers }
    }

    pub fn get(&self, kind: LayerKind) -> Option<&PlacedLayer> {
        self.layers.iter().find(|p| p.kind == kind)
    }

    /// Topmost layer under `p` (container coordinates).
    pub fn hit_test(&self, p: Point) -> Option<LayerKind> {
        self.layers
            .iter()
            .rev()
            .find(|placed| placed.contains(p))
            .map(|placed| placed.kind)
    }
}

fn box_size(kind: LayerKind, content: &LayerContent, scale: f64, container: Size) -> Size {
    match kind {
        LayerKind::Image | LayerKind::Logo => Size::new(
            container.width * scale / 200.0,
            container.height * scale / 200.0,
        ),
        LayerKind::Text => {
            let text = content.as_text().map(|t| t.text.as_str()).unwrap_or_default();
            estimate_text_box(text, preview_font_px(scale))
        }
        LayerKind::Garment => {
            let w = container.width * scale / 100.0;
            let h = match content.as_image() {
                Some(img) if img.width > 0 => w * f64::from(img.height) / f64::from(img.width),
                _ => w,
            };
            Size::new(w, h)
        }
    }
}

/// `object-fit: contain` of `src` inside a `dst` box at the origin.
pub fn contain(src: Size, dst: Size) -> Affine {
    if src.width <= 0.0 || src.height <= 0.0 {
        return Affine::IDENTITY;
    }
    let s = (dst.width / src.width).min(dst.height / src.height);
    let off = Vec2::new(
        (dst.width - src.width * s) / 2.0,
        (dst.height - src.height * s) / 2.0,
    );
    Affine::translate(off) * Affine::scale(s)
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
