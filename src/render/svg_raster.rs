use std::{io::Cursor, path::Path};

use anyhow::Context as _;

use crate::{
    foundation::error::{TrayglyphError, TrayglyphResult},
    render::SvgRasterizer,
};

/// In-process rasterizer built on `usvg` + `resvg`.
#[derive(Clone, Copy, Debug, Default)]
pub struct ResvgRasterizer;

impl SvgRasterizer for ResvgRasterizer {
    fn name(&self) -> &str {
        "resvg"
    }

    fn rasterize(&self, svg: &Path, size: u32) -> TrayglyphResult<Vec<u8>> {
        let bytes =
            std::fs::read(svg).with_context(|| format!("read svg '{}'", svg.display()))?;

        let mut opts = usvg::Options {
            resources_dir: svg.parent().map(Path::to_path_buf),
            ..usvg::Options::default()
        };
        opts.fontdb_mut().load_system_fonts();

        let tree = parse_svg(&bytes, &opts)?;
        let rgba = rasterize_tree_to_rgba8(&tree, size, size)?;
        encode_png(rgba, size, size)
    }
}

pub fn parse_svg(bytes: &[u8], opts: &usvg::Options<'_>) -> TrayglyphResult<usvg::Tree> {
    usvg::Tree::from_data(bytes, opts)
        .map_err(|e| TrayglyphError::rasterize(format!("parse svg tree: {e}")))
}

/// Render `tree` stretched to exactly `width`x`height`, the way `rsvg-convert -w -h` does.
///
/// Returns straight (non-premultiplied) RGBA8, row-major, tightly packed.
pub fn rasterize_tree_to_rgba8(
    tree: &usvg::Tree,
    width: u32,
    height: u32,
) -> TrayglyphResult<Vec<u8>> {
    let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
        .ok_or_else(|| TrayglyphError::rasterize("failed to allocate svg pixmap"))?;

    let svg_w = tree.size().width();
    let svg_h = tree.size().height();
    if !(svg_w.is_finite() && svg_h.is_finite()) || svg_w <= 0.0 || svg_h <= 0.0 {
        return Err(TrayglyphError::rasterize("svg has invalid width/height"));
    }

    let xform =
        resvg::tiny_skia::Transform::from_scale(width as f32 / svg_w, height as f32 / svg_h);
    resvg::render(tree, xform, &mut pixmap.as_mut());

    let mut out = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        out.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(out)
}

fn encode_png(rgba: Vec<u8>, width: u32, height: u32) -> TrayglyphResult<Vec<u8>> {
    let img = image::RgbaImage::from_raw(width, height, rgba)
        .ok_or_else(|| TrayglyphError::rasterize("rgba buffer size mismatch"))?;

    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode rendered svg as png")?;
    Ok(buf)
}
