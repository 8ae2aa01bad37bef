use anyhow::{bail, Result};
use clap::{Args, ValueEnum};
use sunslice_core::sample::{bresenham_line, dda_line};

#[derive(Clone, ValueEnum)]
pub enum LineAlgorithmArg {
    Bresenham,
    Dda,
}

#[derive(Args)]
pub struct LineArgs {
    #[arg(allow_hyphen_values = true)]
    pub x0: i64,
    #[arg(allow_hyphen_values = true)]
    pub y0: i64,
    #[arg(allow_hyphen_values = true)]
    pub x1: i64,
    #[arg(allow_hyphen_values = true)]
    pub y1: i64,

    /// Rasterization algorithm
    #[arg(long, value_enum, default_value = "bresenham")]
    pub algorithm: LineAlgorithmArg,
}

/// Longest line the command will print.
const MAX_LINE_PIXELS: u64 = 1_000_000;

pub fn run(args: &LineArgs) -> Result<()> {
    let steps = args.x0.abs_diff(args.x1).max(args.y0.abs_diff(args.y1));
    if steps >= MAX_LINE_PIXELS {
        bail!("Line spans {steps} pixels; the limit is {MAX_LINE_PIXELS}");
    }

    let points = match args.algorithm {
        LineAlgorithmArg::Bresenham => bresenham_line(args.x0, args.y0, args.x1, args.y1),
        LineAlgorithmArg::Dda => dda_line(args.x0, args.y0, args.x1, args.y1),
    };

    println!("{} pixels", points.len());
    for (x, y) in points {
        println!("{x}\t{y}");
    }
    Ok(())
}
