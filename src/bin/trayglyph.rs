use std::{path::PathBuf, process::ExitCode};

use clap::Parser;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "trayglyph",
    version,
    about = "Render tray.svg into a tray PNG with near-black pixels made transparent"
)]
struct Cli {
    /// Project root the default svg/png locations are resolved against.
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Source SVG (default: <root>/src-tauri/icons/tray.svg).
    #[arg(long)]
    svg: Option<PathBuf>,

    /// Output PNG (default: <root>/src-tauri/resources/tray.png).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Square edge length in pixels.
    #[arg(long, default_value_t = trayglyph::ICON_SIZE)]
    size: u32,

    /// Pixels with r, g and b all at or below this value become transparent.
    #[arg(long, default_value_t = trayglyph::BLACK_THRESHOLD)]
    threshold: u8,

    /// Skip `rsvg-convert` and rasterize in-process only.
    #[arg(long)]
    no_external: bool,
}

impl Cli {
    fn config(&self) -> trayglyph::IconConfig {
        let mut cfg = trayglyph::IconConfig::for_root(&self.root);
        if let Some(svg) = &self.svg {
            cfg.svg_path = svg.clone();
        }
        if let Some(out) = &self.out {
            cfg.out_path = out.clone();
        }
        cfg.size = self.size;
        cfg.threshold = self.threshold;
        cfg
    }

    fn rasterizers(&self) -> Vec<Box<dyn trayglyph::SvgRasterizer>> {
        let mut list = trayglyph::default_rasterizers();
        if self.no_external {
            list.retain(|r| r.name() != trayglyph::RsvgConvert::PROGRAM);
        }
        list
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match trayglyph::run(&cli.config(), &cli.rasterizers()) {
        Ok(out) => {
            let shown = std::path::absolute(&out.path).unwrap_or(out.path);
            println!("Wrote {}", shown.display());
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
