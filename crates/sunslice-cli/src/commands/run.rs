use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use sunslice_core::pipeline::run_slice_reported;
use sunslice_core::process::SmoothingWindow;
use tracing::warn;

use crate::output::{write_axes, write_diagram, AxesFile, Scaling};
use crate::progress::BarReporter;
use crate::summary::{print_config_summary, print_slice_summary};

#[derive(Args)]
pub struct RunArgs {
    /// Slice config file (TOML)
    pub config: PathBuf,

    /// Output diagram path (overrides the config)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Also write timestamps and distances as JSON
    #[arg(long)]
    pub axes: Option<PathBuf>,

    /// Also write the running-difference diagram to this path
    #[arg(long)]
    pub difference: Option<PathBuf>,

    /// Spatial boxcar width (odd, > 1; overrides the config)
    #[arg(long)]
    pub smooth_space: Option<usize>,

    /// Temporal boxcar width (odd, > 1); requires --smooth-space
    #[arg(long)]
    pub smooth_time: Option<usize>,
}

pub fn run(args: &RunArgs) -> Result<()> {
    let mut config = super::read_config(&args.config)?;
    if let Some(ref output) = args.output {
        config.output = output.clone();
    }
    if args.smooth_space.is_some() || args.smooth_time.is_some() {
        config.smoothing = Some(SmoothingWindow {
            time: args.smooth_time,
            space: args.smooth_space,
        });
    }

    print_config_summary(&config);

    let reporter = Arc::new(BarReporter::new()?);
    let result = run_slice_reported(&config, None, reporter.clone())?;
    reporter.finish();

    let slice = &result.slice;
    for warning in slice.warnings() {
        warn!("{warning}");
    }
    print_slice_summary(slice);

    // Smoothed output replaces the raw diagram; the axes follow it.
    let (intensity, distance) = match result.smoothed {
        Some(ref smoothed) => (&smoothed.intensity, &smoothed.distance),
        None => (slice.intensity(), slice.distance()),
    };
    write_diagram(intensity, Scaling::MinMax, &config.output)?;
    println!("Diagram saved to {}", config.output.display());

    if let Some(ref path) = args.difference {
        write_diagram(&slice.running_difference(), Scaling::Symmetric, path)?;
        println!("Running difference saved to {}", path.display());
    }

    if let Some(ref path) = args.axes {
        let axes = AxesFile {
            times_us: slice.times(),
            distance_arcsec: distance.values(),
            colormap: slice.colormap(),
            warnings: slice.warnings(),
        };
        write_axes(&axes, path)?;
        println!("Axes saved to {}", path.display());
    }

    Ok(())
}
