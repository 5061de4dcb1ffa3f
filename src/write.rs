use std::{
    io::{Cursor, Write as _},
    path::{Path, PathBuf},
};

use anyhow::Context as _;

use crate::foundation::error::TrayglyphResult;

pub fn ensure_parent_dir(path: &Path) -> TrayglyphResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create output directory '{}'", parent.display()))?;
    }
    Ok(())
}

/// Encode `img` as PNG and write it to `dest`, replacing any existing file.
///
/// Encoding happens before the filesystem is touched, and the bytes land in a sibling temp file
/// that is renamed over `dest`, so `dest` is either the complete new PNG or left as it was.
pub fn write_png(img: &image::RgbaImage, dest: &Path) -> TrayglyphResult<PathBuf> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode masked icon as png")?;

    ensure_parent_dir(dest)?;
    let dir = dest
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut tmp = tempfile::NamedTempFile::new_in(dir)
        .with_context(|| format!("create temp file in '{}'", dir.display()))?;
    tmp.write_all(&buf)
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("write png '{}'", tmp.path().display()))?;
    tmp.persist(dest)
        .map_err(|e| e.error)
        .with_context(|| format!("replace png '{}'", dest.display()))?;

    Ok(dest.to_path_buf())
}
