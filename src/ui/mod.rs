//! UI module for consistent CLI output
//!
//! Draws `console`-styled step lines and `indicatif` spinners in a terminal,
//! with automatic fallback to plain line-oriented output in CI or when piped.
//! All of it, spinners included, is written to stdout.
//!
//! # Example
//!
//! ```rust,ignore
//! use camp::ui::{self, UiContext, TaskSpinner};
//!
//! let ctx = UiContext::detect();
//!
//! ui::intro(&ctx, "camp up");
//!
//! let mut spinner = TaskSpinner::new(&ctx);
//! spinner.start("Creating virtualenvs...");
//! // ... do work ...
//! spinner.stop("Virtualenvs ready");
//!
//! ui::outro_success(&ctx, "Workspace is up");
//! ```

mod context;
mod output;
mod progress;

pub use context::UiContext;
pub use output::{
    intro, item, outro_error, outro_success, output_block, remark, section, step_error_detail,
    step_ok, step_ok_detail, step_warn, step_warn_hint,
};
pub use progress::{TaskSpinner, WheelProgress};
