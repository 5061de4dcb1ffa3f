#![forbid(unsafe_code)]

//! Turn an SVG into a tray/menubar PNG whose near-black pixels are fully transparent.
//!
//! The pipeline is [`run`]: render the SVG (external `rsvg-convert` first, in-process `resvg`
//! as fallback), zero the alpha of every pixel darker than the threshold, then write the PNG.

pub mod foundation {
    pub mod core;
    pub mod error;
}
pub mod mask;
pub mod pipeline;
pub mod render;
pub mod write;

pub use foundation::core::{
    BLACK_THRESHOLD, DEFAULT_OUTPUT_RELATIVE, DEFAULT_SVG_RELATIVE, ICON_SIZE, IconConfig,
    MAX_ICON_SIZE,
};
pub use foundation::error::{TrayglyphError, TrayglyphResult};
pub use mask::{MaskStats, decode_png_rgba, is_near_black, mask_near_black};
pub use pipeline::{IconOutput, run};
#[cfg(feature = "resvg")]
pub use render::ResvgRasterizer;
pub use render::{RsvgConvert, SvgRasterizer, default_rasterizers, render_svg_to_png};
pub use write::{ensure_parent_dir, write_png};
