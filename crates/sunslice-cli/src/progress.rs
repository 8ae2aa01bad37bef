use std::sync::atomic::{AtomicUsize, Ordering};

use indicatif::{ProgressBar, ProgressStyle};
use sunslice_core::pipeline::{ProgressReporter, SliceStage};

/// Drives an indicatif bar from slice progress callbacks.
pub struct BarReporter {
    bar: ProgressBar,
    high_water: AtomicUsize,
}

impl BarReporter {
    pub fn new() -> anyhow::Result<Self> {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("{msg:24} [{bar:40}] {pos}/{len}")?
                .progress_chars("=> "),
        );
        Ok(Self {
            bar,
            high_water: AtomicUsize::new(0),
        })
    }

    pub fn finish(&self) {
        self.bar.finish_with_message("Done");
    }
}

impl ProgressReporter for BarReporter {
    fn begin_stage(&self, stage: SliceStage, total_items: Option<usize>) {
        self.high_water.store(0, Ordering::Relaxed);
        self.bar.set_message(stage.to_string());
        self.bar.set_length(total_items.unwrap_or(1) as u64);
        self.bar.set_position(0);
    }

    fn advance(&self, items_done: usize) {
        // Workers report in any order; never move the bar backwards.
        let prev = self.high_water.fetch_max(items_done, Ordering::Relaxed);
        if items_done > prev {
            self.bar.set_position(items_done as u64);
        }
    }

    fn finish_stage(&self) {
        if let Some(len) = self.bar.length() {
            self.bar.set_position(len);
        }
    }
}
