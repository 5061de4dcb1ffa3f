use std::path::PathBuf;

use crate::{
    foundation::core::IconConfig,
    foundation::error::{TrayglyphError, TrayglyphResult},
    mask::{MaskStats, decode_png_rgba, mask_near_black},
    render::{SvgRasterizer, render_svg_to_png},
    write::write_png,
};

/// Result of a successful [`run`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconOutput {
    pub path: PathBuf,
    /// Name of the rasterizer that produced the pixels.
    pub rasterizer: String,
    pub width: u32,
    pub height: u32,
    pub stats: MaskStats,
}

/// Convert the configured SVG into a masked tray PNG.
///
/// Stages run strictly in order: check input, render, mask, write. The first failure aborts the
/// run, and the output file is only touched once every earlier stage has succeeded.
#[tracing::instrument(skip(rasterizers), fields(svg = %cfg.svg_path.display()))]
pub fn run(
    cfg: &IconConfig,
    rasterizers: &[Box<dyn SvgRasterizer>],
) -> TrayglyphResult<IconOutput> {
    cfg.validate()?;
    if !cfg.svg_path.is_file() {
        return Err(TrayglyphError::missing_input(&cfg.svg_path));
    }

    let (png, rasterizer) = render_svg_to_png(rasterizers, &cfg.svg_path, cfg.size)?;

    let mut img = decode_png_rgba(&png)?;
    let stats = mask_near_black(&mut img, cfg.threshold);

    let path = write_png(&img, &cfg.out_path)?;
    tracing::info!(path = %path.display(), rasterizer = %rasterizer, "wrote tray icon");

    Ok(IconOutput {
        path,
        rasterizer,
        width: img.width(),
        height: img.height(),
        stats,
    })
}
