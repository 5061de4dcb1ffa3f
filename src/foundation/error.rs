use std::path::PathBuf;

pub type TrayglyphResult<T> = Result<T, TrayglyphError>;

#[derive(thiserror::Error, Debug)]
pub enum TrayglyphError {
    #[error("missing input svg '{}'", .path.display())]
    MissingInput { path: PathBuf },

    #[error(
        "no svg rasterizer available ({}); need one of: rsvg-convert (brew install librsvg / apt install librsvg2-bin) or a build with the `resvg` feature (cargo install trayglyph --features resvg)",
        .attempts.join("; ")
    )]
    RendererUnavailable { attempts: Vec<String> },

    #[error("rasterize error: {0}")]
    Rasterize(String),

    #[error("image decode error: {0}")]
    ImageDecode(String),

    #[error("png decoder unavailable: {0} (rebuild with the `image` crate's `png` feature)")]
    DecoderUnavailable(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TrayglyphError {
    pub fn missing_input(path: impl Into<PathBuf>) -> Self {
        Self::MissingInput { path: path.into() }
    }

    pub fn rasterize(msg: impl Into<String>) -> Self {
        Self::Rasterize(msg.into())
    }

    pub fn image_decode(msg: impl Into<String>) -> Self {
        Self::ImageDecode(msg.into())
    }

    pub fn decoder_unavailable(msg: impl Into<String>) -> Self {
        Self::DecoderUnavailable(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_are_stable() {
        assert!(
            TrayglyphError::image_decode("x")
                .to_string()
                .contains("image decode error:")
        );
        assert!(
            TrayglyphError::rasterize("x")
                .to_string()
                .contains("rasterize error:")
        );
        assert!(
            TrayglyphError::validation("x")
                .to_string()
                .contains("validation error:")
        );
        assert!(
            TrayglyphError::missing_input("icons/tray.svg")
                .to_string()
                .contains("icons/tray.svg")
        );
    }

    #[test]
    fn renderer_unavailable_names_both_remedies() {
        let err = TrayglyphError::RendererUnavailable {
            attempts: vec![
                "rsvg-convert: not found".to_string(),
                "resvg: parse failed".to_string(),
            ],
        };
        let msg = err.to_string();
        assert!(msg.contains("librsvg"));
        assert!(msg.contains("`resvg` feature"));
        assert!(msg.contains("rsvg-convert: not found; resvg: parse failed"));
    }

    #[test]
    fn other_preserves_source() {
        let base = std::io::Error::other("boom");
        let err = TrayglyphError::Other(anyhow::Error::new(base));
        assert!(err.to_string().contains("boom"));
    }
}
