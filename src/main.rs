#![windows_subsystem = "windows"]

mod app;

use clap::Parser;
use squaire::document::MapDocument;
use squaire::{OptionsPatch, Squaire};
use std::path::PathBuf;
use std::process;

/// Widest map the exporter will draw, in pixels.
const MAX_WIDTH: f32 = 16384.0;

fn parse_width(s: &str) -> Result<f32, String> {
    let width: f32 = s.parse().map_err(|e| format!("{e}"))?;
    if !width.is_finite() || !(0.0..=MAX_WIDTH).contains(&width) {
        return Err(format!("expected a width between 0 and {MAX_WIDTH} pixels"));
    }
    Ok(width)
}

#[derive(Parser)]
#[command(name = "squaire")]
#[command(about = "View or export a grid cartogram", long_about = None)]
struct Args {
    /// Map document (JSON with "data" and "options")
    document: Option<PathBuf>,

    /// Container width in pixels for exports
    #[arg(long, default_value = "940", value_parser = parse_width)]
    width: f32,

    /// Attribute used to color the boxes, overriding the document
    #[arg(long)]
    index: Option<String>,

    /// Write the map as SVG and exit
    #[arg(long)]
    export_svg: Option<PathBuf>,

    /// Write the map as PNG and exit
    #[arg(long)]
    export_png: Option<PathBuf>,
}

fn export(args: &Args) -> squaire::Result<()> {
    let doc = match &args.document {
        Some(path) => MapDocument::load(path)?,
        None => MapDocument::default(),
    };
    let mut map = Squaire::new(doc.data.clone(), &doc.patch()?, args.width)?;
    if let Some(index) = &args.index {
        map.update(None, Some(&doc.index_patch(index)))?;
    }
    if let Some(path) = &args.export_svg {
        std::fs::write(path, squaire::svg::render(&map))?;
        tracing::info!(path = %path.display(), "wrote SVG");
    }
    if let Some(path) = &args.export_png {
        squaire::raster::save(&map, path)?;
    }
    Ok(())
}

fn main() -> eframe::Result<()> {
    squaire::logging::init_logging();
    let args = Args::parse();

    if args.export_svg.is_some() || args.export_png.is_some() {
        if let Err(e) = export(&args) {
            tracing::error!("{e}");
            process::exit(1);
        }
        return Ok(());
    }

    let vp = eframe::egui::ViewportBuilder::default()
        .with_title("Squaire")
        .with_min_inner_size([320.0, 240.0])
        .with_inner_size([1024.0, 700.0]);

    let options = eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    };

    let document = args.document.clone();
    let index = args.index.clone();
    eframe::run_native(
        "Squaire",
        options,
        Box::new(move |cc| {
            let mut app = app::SquaireApp::new(cc);
            match document {
                Some(path) => app.open(path, index.as_deref()),
                None => app.show_default(&OptionsPatch::default()),
            }
            Ok(Box::new(app))
        }),
    )
}
