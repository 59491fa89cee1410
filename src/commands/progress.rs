//! Coverage tracking for the skeletonize command, with an optional bar

use indicatif::{ProgressBar, ProgressStyle};
use teasar_core::skeleton::{CoverageCounter, ProgressObserver};

/// Totals covered vertices for the report and mirrors them on a progress
/// bar when one is requested
pub struct CommandProgress {
    counter: CoverageCounter,
    bar: Option<ProgressBar>,
}

impl CommandProgress {
    pub fn new(show_bar: bool) -> Self {
        Self {
            counter: CoverageCounter::new(),
            bar: show_bar.then(new_bar),
        }
    }

    pub fn counter(&self) -> &CoverageCounter {
        &self.counter
    }

    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_and_clear();
        }
    }
}

fn new_bar() -> ProgressBar {
    let bar = ProgressBar::new(0);
    let style = ProgressStyle::with_template(
        "  {spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} vertices ({per_sec}) ETA {eta}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("=>-");
    bar.set_style(style);
    bar
}

impl ProgressObserver for CommandProgress {
    fn component_started(&self, label: usize, to_cover: usize) {
        self.counter.component_started(label, to_cover);
        if let Some(bar) = &self.bar {
            bar.inc_length(to_cover as u64);
        }
    }

    fn vertices_covered(&self, label: usize, newly: usize, remaining: usize) {
        self.counter.vertices_covered(label, newly, remaining);
        if let Some(bar) = &self.bar {
            bar.inc(newly as u64);
        }
    }

    fn component_finished(&self, label: usize, paths: usize) {
        self.counter.component_finished(label, paths);
        if let Some(bar) = &self.bar {
            bar.set_message(format!("component {} done ({} paths)", label, paths));
        }
    }
}
