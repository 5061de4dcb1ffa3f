use std::path::{Path, PathBuf};

use crate::foundation::error::{TrayglyphError, TrayglyphResult};

/// Edge length of the square output icon, in pixels.
///
/// Rendered larger than the menubar needs so the OS downscale stays sharp.
pub const ICON_SIZE: u32 = 128;

/// Pixels whose r, g and b are all `<=` this value become fully transparent.
///
/// Set above zero so anti-aliased dark edges around the glyph vanish too.
pub const BLACK_THRESHOLD: u8 = 40;

/// Upper bound on `IconConfig::size`.
pub const MAX_ICON_SIZE: u32 = 4096;

/// Source SVG location relative to the project root.
pub const DEFAULT_SVG_RELATIVE: &str = "src-tauri/icons/tray.svg";

/// Output PNG location relative to the project root.
pub const DEFAULT_OUTPUT_RELATIVE: &str = "src-tauri/resources/tray.png";

/// Everything a single conversion run needs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IconConfig {
    pub svg_path: PathBuf,
    pub out_path: PathBuf,
    /// Square edge length in pixels.
    pub size: u32,
    /// Inclusive near-black cutoff applied per channel.
    pub threshold: u8,
}

impl IconConfig {
    /// Default paths resolved against `root`, with the compiled-in size and threshold.
    pub fn for_root(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            svg_path: root.join(DEFAULT_SVG_RELATIVE),
            out_path: root.join(DEFAULT_OUTPUT_RELATIVE),
            size: ICON_SIZE,
            threshold: BLACK_THRESHOLD,
        }
    }

    pub fn validate(&self) -> TrayglyphResult<()> {
        if self.size == 0 {
            return Err(TrayglyphError::validation("icon size must be non-zero"));
        }
        if self.size > MAX_ICON_SIZE {
            return Err(TrayglyphError::validation(format!(
                "icon size too large: {} (max {MAX_ICON_SIZE})",
                self.size
            )));
        }
        Ok(())
    }
}

impl Default for IconConfig {
    fn default() -> Self {
        Self::for_root(".")
    }
}
