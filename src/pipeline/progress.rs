// file: src/pipeline/progress.rs
// description: progress reporting for trend scoring and end-of-run summary
// reference: uses indicatif for progress bars

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::info;

pub struct ScoringProgress {
    bar: ProgressBar,
    start_time: Instant,
}

impl ScoringProgress {
    pub fn new(total_places: usize, colored: bool) -> Self {
        Self {
            bar: create_progress_bar(total_places as u64, colored),
            start_time: Instant::now(),
        }
    }

    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            start_time: Instant::now(),
        }
    }

    pub fn record(&self, place: &str, score: u8) {
        self.bar.set_message(format!("{} → {}", place, score));
        self.bar.inc(1);
    }

    pub fn finish(&self, scored: usize) {
        self.bar
            .finish_with_message(format!("{} places scored", scored));
    }

    pub fn abandon(&self, scored: usize) {
        self.bar
            .abandon_with_message(format!("interrupted after {} places", scored));
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

fn progress_template(colored: bool) -> &'static str {
    if colored {
        "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} {msg}"
    } else {
        "{spinner} [{elapsed_precise}] [{bar:30}] {pos}/{len} {msg}"
    }
}

fn create_progress_bar(total: u64, colored: bool) -> ProgressBar {
    let bar = ProgressBar::new(total);

    let style = ProgressStyle::default_bar()
        .template(progress_template(colored))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=>-");

    bar.set_style(style);
    bar.enable_steady_tick(Duration::from_millis(120));
    bar
}

/// What a single generation run produced.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
    pub place: String,
    pub keywords: Vec<String>,
    pub historical_events: usize,
    pub current_images: usize,
    pub historical_images: usize,
    pub output: Option<PathBuf>,
    pub duration_secs: f64,
}

impl RunSummary {
    pub fn log(&self) {
        info!("{}", "Run summary".bold());
        info!("  Place: {}", self.place);
        info!("  Keywords: {}", self.keywords.join(", "));
        info!("  Historical events: {}", self.historical_events);
        info!(
            "  Images: {} current, {} historical",
            self.current_images, self.historical_images
        );
        match &self.output {
            Some(path) => info!("  Output: {}", path.display()),
            None => info!("  Output: none"),
        }
        info!("  Duration: {:.2}s", self.duration_secs);
    }
}
