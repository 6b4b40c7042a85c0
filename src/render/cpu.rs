use std::sync::Arc;

use crate::{
    assets::decode::PreparedImage,
    foundation::{
        core::Affine,
        error::{DrapeError, DrapeResult},
    },
    render::frame::Snapshot,
};

/// Offscreen CPU surface. Images are drawn as transformed rectangles filled with an image paint.
pub(crate) struct CpuCanvas {
    width: u16,
    height: u16,
    ctx: vello_cpu::RenderContext,
}

impl CpuCanvas {
    pub(crate) fn new(width: u32, height: u32) -> DrapeResult<Self> {
        if width == 0 || height == 0 {
            return Err(DrapeError::render("canvas must be at least 1x1"));
        }
        let width_u16: u16 = width
            .try_into()
            .map_err(|_| DrapeError::render("canvas width exceeds u16"))?;
        let height_u16: u16 = height
            .try_into()
            .map_err(|_| DrapeError::render("canvas height exceeds u16"))?;
        Ok(Self {
            width: width_u16,
            height: height_u16,
            ctx: vello_cpu::RenderContext::new(width_u16, height_u16),
        })
    }

    /// Draw `image` with `transform` mapping its pixel space `(0,0)..(w,h)` onto the canvas.
    pub(crate) fn draw_image(
        &mut self,
        image: &PreparedImage,
        transform: Affine,
        opacity: f32,
    ) -> DrapeResult<()> {
        if image.width == 0 || image.height == 0 || opacity <= 0.0 {
            return Ok(());
        }
        let pixmap = image_premul_bytes_to_pixmap(
            image.rgba8_premul.as_slice(),
            image.width,
            image.height,
        )?;
        let paint = vello_cpu::Image {
            image: vello_cpu::ImageSource::Pixmap(Arc::new(pixmap)),
            sampler: vello_cpu::peniko::ImageSampler::default(),
        };

        self.ctx
            .set_paint_transform(vello_cpu::kurbo::Affine::IDENTITY);
        self.ctx.set_transform(affine_to_cpu(transform));
        self.ctx.set_paint(paint);

        let opacity = opacity.min(1.0);
        if opacity < 1.0 {
            self.ctx.push_opacity_layer(opacity);
        }
        self.ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
            0.0,
            0.0,
            f64::from(image.width),
            f64::from(image.height),
        ));
        if opacity < 1.0 {
            self.ctx.pop_layer();
        }
        Ok(())
    }

    pub(crate) fn finish(mut self) -> DrapeResult<Snapshot> {
        let mut pixmap = vello_cpu::Pixmap::new(self.width, self.height);
        self.ctx.flush();
        self.ctx.render_to_pixmap(&mut pixmap);
        let image = PreparedImage::from_premul_parts(
            u32::from(self.width),
            u32::from(self.height),
            pixmap.data_as_u8_slice().to_vec(),
        )?;
        Ok(Snapshot::new(image))
    }
}

fn affine_to_cpu(a: Affine) -> vello_cpu::kurbo::Affine {
    vello_cpu::kurbo::Affine::new(a.as_coeffs())
}

fn image_premul_bytes_to_pixmap(
    rgba8_premul: &[u8],
    width: u32,
    height: u32,
) -> DrapeResult<vello_cpu::Pixmap> {
    let w: u16 = width
        .try_into()
        .map_err(|_| DrapeError::render("image width exceeds u16"))?;
    let h: u16 = height
        .try_into()
        .map_err(|_| DrapeError::render("image height exceeds u16"))?;
    if rgba8_premul.len() != width as usize * height as usize * 4 {
        return Err(DrapeError::render("prepared image byte length mismatch"));
    }

    let mut may_have_opacities = false;
    let mut pixels = Vec::with_capacity(width as usize * height as usize);
    for px in rgba8_premul.chunks_exact(4) {
        let a = px[3];
        may_have_opacities |= a != 255;
        pixels.push(vello_cpu::peniko::color::PremulRgba8 {
            r: px[0],
            g: px[1],
            b: px[2],
            a,
        });
    }

    Ok(vello_cpu::Pixmap::from_parts_with_opacity(
        pixels,
        w,
        h,
        may_have_opacities,
    ))
}
