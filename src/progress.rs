//! Feed loading progress on stderr
//!
//! Loading a feed has two phases: the search pages are walked to collect
//! package ids (indeterminate, shown as a spinner), then one registration
//! index is fetched per id (shown as a bar naming the last package loaded).

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const LISTING_TEMPLATE: &str = "{spinner:.cyan} Listing packages of {msg}";
const FETCHING_TEMPLATE: &str =
    "{spinner:.cyan} Fetching registrations [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}";

/// Progress of a feed load
pub struct Progress {
    /// Disabled in quiet mode
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl Progress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    pub fn disabled() -> Self {
        Self::new(false)
    }

    /// Spinner while the package ids of `feed_name` are enumerated
    pub fn listing(&mut self, feed_name: &str) {
        self.clear();
        if !self.enabled {
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template(LISTING_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(feed_name.to_string());
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.bar = Some(spinner);
    }

    /// Bar over the `total` registrations about to be fetched
    pub fn fetching(&mut self, total: usize) {
        self.clear();
        if !self.enabled {
            return;
        }

        let bar = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template(FETCHING_TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        bar.set_style(style.progress_chars("█▓░"));
        bar.enable_steady_tick(Duration::from_millis(100));
        self.bar = Some(bar);
    }

    /// One registration is done, whatever its outcome
    pub fn fetched(&self, package_id: &str) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
            bar.set_message(package_id.to_string());
        }
    }

    /// Registrations handled so far in the current phase
    pub fn position(&self) -> u64 {
        self.bar.as_ref().map_or(0, ProgressBar::position)
    }

    /// Remove whatever is on screen
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }
}
