use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use sunslice_core::pipeline::config::{FrameSource, PathConfig, SliceConfig};
use sunslice_core::process::SmoothingWindow;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write config to a file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Print or save a complete example SliceConfig as TOML.
pub fn run(args: &ConfigArgs) -> Result<()> {
    let config = SliceConfig {
        smoothing: Some(SmoothingWindow::space(3)),
        path: PathConfig {
            anchors: vec![[-120.0, 40.0], [-60.0, 80.0], [0.0, 90.0]],
            ..Default::default()
        },
        frames: (0..3)
            .map(|i| FrameSource {
                path: PathBuf::from(format!("frames/frame_{i:04}.png")),
                timestamp_us: i * 12_000_000,
                projection: None,
            })
            .collect(),
        ..Default::default()
    };
    let toml_str = toml::to_string_pretty(&config)?;

    if let Some(ref path) = args.output {
        std::fs::write(path, &toml_str)
            .with_context(|| format!("Failed to write config to {}", path.display()))?;
        println!("Default config saved to {}", path.display());
    } else {
        print!("{}", toml_str);
    }

    Ok(())
}
