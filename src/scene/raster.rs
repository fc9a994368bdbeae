use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{MorphError, MorphResult};

/// Rasterized frame, straight (non-premultiplied) RGBA8.
#[derive(Clone, Debug)]
pub struct FrameRgba {
    /// Width in physical pixels.
    pub width: u32,
    /// Height in physical pixels.
    pub height: u32,
    /// Row-major RGBA bytes.
    pub data: Vec<u8>,
}

/// Rasterize an SVG document with system fonts available for labels.
pub fn rasterize(svg: &str) -> MorphResult<FrameRgba> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    let opts = usvg::Options {
        fontdb: std::sync::Arc::new(db),
        ..Default::default()
    };
    let tree = usvg::Tree::from_str(svg, &opts).context("parse scene svg")?;

    let size = tree.size().to_int_size();
    let mut pixmap = resvg::tiny_skia::Pixmap::new(size.width(), size.height())
        .ok_or_else(|| MorphError::render("failed to allocate scene pixmap"))?;
    pixmap.fill(resvg::tiny_skia::Color::WHITE);
    resvg::render(
        &tree,
        resvg::tiny_skia::Transform::identity(),
        &mut pixmap.as_mut(),
    );

    let mut data = pixmap.take();
    demultiply_rgba8_in_place(&mut data);
    Ok(FrameRgba {
        width: size.width(),
        height: size.height(),
        data,
    })
}

/// Rasterize `svg` and write it to `path` as PNG.
pub fn render_png(svg: &str, path: &Path) -> MorphResult<()> {
    let frame = rasterize(svg)?;
    image::save_buffer_with_format(
        path,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", path.display()))?;
    Ok(())
}

fn demultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = (((*c as u16) * 255 + a / 2) / a).min(255) as u8;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/raster.rs"]
mod tests;
