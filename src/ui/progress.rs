//! Progress indicators with CI fallback

use super::context::UiContext;
use console::style;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const TICK_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ ";

/// A task spinner with CI fallback
pub struct TaskSpinner {
    spinner: Option<ProgressBar>,
    interactive: bool,
}

impl TaskSpinner {
    /// Create a new spinner (shows on `start` in interactive mode)
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: None,
            interactive: ctx.use_fancy_output(),
        }
    }

    /// Start the spinner with a message
    pub fn start(&mut self, message: &str) {
        if self.interactive {
            let spinner = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
            let template = ProgressStyle::default_spinner()
                .template("{spinner:.cyan}  {msg}")
                .map(|s| s.tick_chars(TICK_CHARS));
            if let Ok(template) = template {
                spinner.set_style(template);
            }
            spinner.set_message(message.to_string());
            spinner.enable_steady_tick(Duration::from_millis(120));
            self.spinner = Some(spinner);
        } else {
            println!("{} {}", style("...").dim(), message);
        }
    }

    /// Update the spinner message
    pub fn message(&mut self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
        // No output in plain mode for message updates
    }

    /// Stop with success message
    pub fn stop(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
            println!("{}  {}", style("◇").green(), message);
        } else {
            println!("{} {}", style("[OK]").green(), message);
        }
    }

    /// Stop with warning message
    pub fn stop_warn(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
            println!("{}  {}", style("▲").yellow(), message);
        } else {
            println!("{} {}", style("[WARN]").yellow(), message);
        }
    }
}

/// Progress bar for the per-requirement wheel builds.
///
/// Shows an indicatif bar in interactive mode, one line per build in CI.
pub struct WheelProgress {
    bar: Option<ProgressBar>,
}

impl WheelProgress {
    /// Create a progress indicator for `total` wheel builds
    pub fn new(ctx: &UiContext, total: usize) -> Self {
        let bar = if ctx.use_fancy_output() {
            let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stdout());
            let template = ProgressStyle::default_bar()
                .template("  {spinner:.cyan} Getting wheels  {bar:20.cyan/dim} {pos}/{len} {msg:.dim}")
                .map(|s| s.tick_chars(TICK_CHARS).progress_chars("━╸─"));
            if let Ok(template) = template {
                bar.set_style(template);
            }
            bar.enable_steady_tick(Duration::from_millis(120));
            Some(bar)
        } else {
            println!("{} Getting wheels ({})...", style("...").dim(), total);
            None
        };
        Self { bar }
    }

    /// Record one finished build
    pub fn on_built(&self, requirement: &str, ok: bool) {
        if let Some(ref bar) = self.bar {
            bar.inc(1);
            bar.set_message(truncate(requirement, 40));
        } else {
            let mark = if ok {
                style("[OK]").green()
            } else {
                style("[FAIL]").red()
            };
            println!("  {} {}", mark, requirement);
        }
    }

    /// Finish and clear the progress bar
    pub fn finish(&self) {
        if let Some(ref bar) = self.bar {
            bar.disable_steady_tick();
            bar.finish_and_clear();
        }
    }
}

/// Shorten long requirement strings for the bar message
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", kept)
}
