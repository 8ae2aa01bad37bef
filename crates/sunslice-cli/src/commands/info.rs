use std::path::PathBuf;

use anyhow::Result;
use clap::Args;
use sunslice_core::path::SlicePath;
use sunslice_core::pipeline::load_sequence;
use sunslice_core::sample::project_anchors;

use crate::progress::BarReporter;

#[derive(Args)]
pub struct InfoArgs {
    /// Slice config file (TOML)
    pub config: PathBuf,
}

pub fn run(args: &InfoArgs) -> Result<()> {
    let config = super::read_config(&args.config)?;
    let reporter = BarReporter::new()?;
    let sequence = load_sequence(&config, &reporter)?;
    reporter.finish();

    let (h, w) = sequence.shape();
    let times = sequence.timestamps();
    let span_s = match (times.first(), times.last()) {
        (Some(first), Some(last)) => last.saturating_sub(*first) as f64 / 1e6,
        _ => 0.0,
    };

    println!("Frames:      {}", sequence.len());
    println!("Dimensions:  {}x{}", w, h);
    println!("Time span:   {:.1} s", span_s);
    println!("Colormap:    {}", sequence.colormap().unwrap_or("-"));

    let path = SlicePath::from_arcsec(&config.path.anchors, config.path.observer.clone())?;
    println!("Anchors:     {}", path.len());
    println!("Path length: {:.2} arcsec", path.length_arcsec());
    println!("Sampling:    {}", config.sampling);

    if let Some(first) = sequence.get(0) {
        println!("Anchor pixels in frame 0 (row, col):");
        for (anchor, px) in path.anchors().iter().zip(project_anchors(first, &path)?) {
            let inside = px.checked_index(h, w).is_some();
            println!(
                "  ({:>9.2}\", {:>9.2}\") -> ({}, {}){}",
                anchor.tx,
                anchor.ty,
                px.row,
                px.col,
                if inside { "" } else { "  outside raster" }
            );
        }
    }

    Ok(())
}
