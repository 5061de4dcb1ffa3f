use std::{
    ffi::OsString,
    path::Path,
    process::{Command, Stdio},
};

use crate::{
    foundation::error::{TrayglyphError, TrayglyphResult},
    render::SvgRasterizer,
};

/// Rasterizes through the librsvg `rsvg-convert` command-line tool.
///
/// The tool writes the PNG to stdout. A missing binary and a non-zero exit are both reported as
/// errors so the caller can fall back to the next rasterizer.
#[derive(Clone, Debug)]
pub struct RsvgConvert {
    program: OsString,
}

impl RsvgConvert {
    pub const PROGRAM: &'static str = "rsvg-convert";

    /// Use a different executable name or path.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for RsvgConvert {
    fn default() -> Self {
        Self::with_program(Self::PROGRAM)
    }
}

impl SvgRasterizer for RsvgConvert {
    fn name(&self) -> &str {
        Self::PROGRAM
    }

    fn rasterize(&self, svg: &Path, size: u32) -> TrayglyphResult<Vec<u8>> {
        let size_arg = size.to_string();
        let output = Command::new(&self.program)
            .args(["-w", size_arg.as_str(), "-h", size_arg.as_str()])
            .arg(svg)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| {
                TrayglyphError::rasterize(format!(
                    "failed to spawn {} (is it installed and on PATH?): {e}",
                    self.program.to_string_lossy()
                ))
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(TrayglyphError::rasterize(format!(
                "{} exited with status {}: {}",
                self.program.to_string_lossy(),
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.is_empty() {
            return Err(TrayglyphError::rasterize(format!(
                "{} produced no output",
                self.program.to_string_lossy()
            )));
        }

        Ok(output.stdout)
    }
}
