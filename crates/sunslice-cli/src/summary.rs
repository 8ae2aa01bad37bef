use console::Style;
use sunslice_core::pipeline::config::SliceConfig;
use sunslice_core::slice::TimeDistanceSlice;

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
    warning: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
            warning: Style::new().yellow(),
        }
    }
}

pub fn print_config_summary(config: &SliceConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Sunslice"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(8)));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(config.frames.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Colormap"),
        s.value.apply_to(&config.colormap)
    );
    println!();

    println!("  {}", s.header.apply_to("Path"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Anchors"),
        s.value.apply_to(config.path.anchors.len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Sampling"),
        s.method.apply_to(config.sampling)
    );
    match config.smoothing {
        Some(ref window) => println!(
            "    {:<12}{}",
            s.label.apply_to("Smoothing"),
            s.method.apply_to(window)
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Smoothing"),
            s.disabled.apply_to("disabled")
        ),
    }
    println!();
}

pub fn print_slice_summary(slice: &TimeDistanceSlice) {
    let s = Styles::new();

    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{} x {}",
        s.label.apply_to("Shape"),
        s.value.apply_to(slice.frame_count()),
        s.value.apply_to(slice.curve_len())
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Length"),
        s.value.apply_to(format!("{:.2} arcsec", slice.distance().total()))
    );
    if let (Some(first), Some(last)) = (slice.times().first(), slice.times().last()) {
        let span_s = last.saturating_sub(*first) as f64 / 1e6;
        println!(
            "    {:<12}{}",
            s.label.apply_to("Time span"),
            s.value.apply_to(format!("{span_s:.1} s"))
        );
    }
    if slice.warnings().is_empty() {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Warnings"),
            s.disabled.apply_to("none")
        );
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Warnings"),
            s.warning.apply_to(slice.warnings().len())
        );
    }
    println!();
}
