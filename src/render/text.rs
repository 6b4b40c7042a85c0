use std::sync::Arc;

use anyhow::Context;

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::Size,
        error::{DrapeError, DrapeResult},
    },
    layer::content::TextContent,
};

/// Font size of a text layer at scale 100; the preview uses `scale / 4` px.
pub const TEXT_BASE_FONT_PX: f64 = 25.0;

const ADVANCE_EM: f64 = 0.6;
const LINE_EM: f64 = 1.3;

pub fn preview_font_px(scale: f64) -> f64 {
    scale / 4.0
}

/// Box used for a single line of text. Glyph metrics are not consulted, so layout stays pure.
pub fn estimate_text_box(text: &str, font_px: f64) -> Size {
    let chars = text.chars().count().max(1) as f64;
    Size::new(
        (chars * font_px * ADVANCE_EM + font_px * 0.5).ceil(),
        (font_px * LINE_EM).ceil(),
    )
}

/// Renders text layers through an SVG `<text>` element.
#[derive(Clone)]
pub struct TextRasterizer {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl TextRasterizer {
    pub fn with_system_fonts() -> Self {
        let mut db = usvg::fontdb::Database::new();
        db.load_system_fonts();
        tracing::debug!(faces = db.faces().count(), "loaded system fonts");
        Self {
            fontdb: Arc::new(db),
        }
    }

    pub fn with_fontdb(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    pub fn rasterize(&self, content: &TextContent, font_px: f64) -> DrapeResult<PreparedImage> {
        let size = estimate_text_box(&content.text, font_px);
        let (w, h) = (size.width as u32, size.height as u32);
        if w == 0 || h == 0 {
            return Err(DrapeError::render("text raster has zero size"));
        }

        let svg = text_svg(content, font_px, size)?;
        let opts = usvg::Options {
            fontdb: self.fontdb.clone(),
            ..Default::default()
        };
        let tree = usvg::Tree::from_data(svg.as_bytes(), &opts).context("parse text svg")?;

        let mut pixmap = resvg::tiny_skia::Pixmap::new(w, h)
            .ok_or_else(|| DrapeError::render("failed to allocate text pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::identity(),
            &mut pixmap.as_mut(),
        );
        PreparedImage::from_premul_parts(w, h, pixmap.data().to_vec())
    }
}

impl std::fmt::Debug for TextRasterizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextRasterizer")
            .field("faces", &self.fontdb.faces().count())
            .finish()
    }
}

pub(crate) fn text_svg(content: &TextContent, font_px: f64, size: Size) -> DrapeResult<String> {
    let color = content.hex_color()?;
    let opaque = crate::assets::color::HexColor { a: 255, ..color };
    Ok(format!(
        concat!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}">"#,
            r#"<text x="{cx}" y="{baseline}" text-anchor="middle" font-family="{family}" "#,
            r#"font-size="{px}" fill="{fill}" fill-opacity="{opacity}">{text}</text></svg>"#
        ),
        w = size.width,
        h = size.height,
        cx = size.width / 2.0,
        baseline = size.height / 2.0 + font_px * 0.35,
        family = escape_xml(&content.font_family),
        px = font_px,
        fill = opaque.to_hex(),
        opacity = color.opacity(),
        text = escape_xml(&content.text),
    ))
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
