use std::path::Path;

use crate::foundation::error::{TrayglyphError, TrayglyphResult};

pub mod rsvg_convert;
#[cfg(feature = "resvg")]
pub mod svg_raster;

pub use rsvg_convert::RsvgConvert;
#[cfg(feature = "resvg")]
pub use svg_raster::ResvgRasterizer;

/// One way of turning an SVG file into encoded PNG bytes.
pub trait SvgRasterizer {
    /// Short label used in logs and in `RendererUnavailable` diagnostics.
    fn name(&self) -> &str;

    /// Render `svg` into a `size`x`size` PNG byte stream.
    fn rasterize(&self, svg: &Path, size: u32) -> TrayglyphResult<Vec<u8>>;
}

/// Candidates in priority order: the `rsvg-convert` binary, then in-process `resvg`.
pub fn default_rasterizers() -> Vec<Box<dyn SvgRasterizer>> {
    let mut out: Vec<Box<dyn SvgRasterizer>> = vec![Box::new(RsvgConvert::default())];
    #[cfg(feature = "resvg")]
    out.push(Box::new(ResvgRasterizer));
    out
}

/// Try each rasterizer in order; the first success wins.
///
/// Any failure (missing binary, non-zero exit, parse error) falls through to the next
/// candidate. Returns the PNG bytes together with the name of the rasterizer that produced them.
pub fn render_svg_to_png(
    rasterizers: &[Box<dyn SvgRasterizer>],
    svg: &Path,
    size: u32,
) -> TrayglyphResult<(Vec<u8>, String)> {
    let mut attempts = Vec::with_capacity(rasterizers.len());

    for r in rasterizers {
        match r.rasterize(svg, size) {
            Ok(bytes) => {
                tracing::debug!(rasterizer = r.name(), bytes = bytes.len(), "rendered svg");
                return Ok((bytes, r.name().to_string()));
            }
            Err(e) => {
                tracing::warn!(rasterizer = r.name(), error = %e, "rasterizer failed, falling back");
                attempts.push(format!("{}: {e}", r.name()));
            }
        }
    }

    if attempts.is_empty() {
        attempts.push("no rasterizers configured".to_string());
    }
    Err(TrayglyphError::RendererUnavailable { attempts })
}
