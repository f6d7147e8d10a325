//! Output functions for consistent CLI formatting
//!
//! Every line goes to stdout in both modes, including captured child-process
//! stderr, so failure headers and the output under them never interleave
//! across streams.

use super::context::UiContext;
use console::{style, StyledObject};

/// Glyphs drawn at the start of a line in interactive mode
const BAR: &str = "│";
const OPEN: &str = "┌";
const CLOSE: &str = "└";
const OK: &str = "◇";
const WARN: &str = "▲";
const FAIL: &str = "■";
const INFO: &str = "●";

/// Severity of a step line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Level {
    Ok,
    Warn,
    Fail,
    Info,
}

impl Level {
    fn glyph(self) -> StyledObject<&'static str> {
        match self {
            Self::Ok => style(OK).green(),
            Self::Warn => style(WARN).yellow(),
            Self::Fail => style(FAIL).red(),
            Self::Info => style(INFO).cyan(),
        }
    }

    fn tag(self) -> StyledObject<&'static str> {
        match self {
            Self::Ok => style("[OK]").green(),
            Self::Warn => style("[WARN]").yellow(),
            Self::Fail => style("[FAIL]").red(),
            Self::Info => style("[INFO]").cyan(),
        }
    }
}

/// Format one step line for the given mode
fn step_line(ctx: &UiContext, level: Level, message: &str) -> String {
    if ctx.use_fancy_output() {
        format!("{}  {}", level.glyph(), message)
    } else {
        format!("  {} {}", level.tag(), message)
    }
}

/// Display intro banner
pub fn intro(ctx: &UiContext, title: &str) {
    if ctx.use_fancy_output() {
        println!("{}  {}", style(OPEN).dim(), style(title).cyan().bold());
        println!("{}", style(BAR).dim());
    } else {
        println!("{}", style(title).cyan().bold());
        println!();
    }
}

/// Display success outro
pub fn outro_success(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!("{}", style(BAR).dim());
        println!("{}  {}", style(CLOSE).dim(), style(message).green().bold());
    } else {
        println!();
        println!("{} {}", style("[OK]").green(), message);
    }
}

/// Display error outro
pub fn outro_error(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!("{}", style(BAR).dim());
        println!("{}  {}", style(CLOSE).dim(), style(message).red().bold());
    } else {
        println!();
        println!("{} {}", style("[ERROR]").red(), message);
    }
}

/// Display a section header
pub fn section(ctx: &UiContext, title: &str) {
    println!();
    println!("{}", step_line(ctx, Level::Info, &style(title).bold().to_string()));
}

/// Display an indented list item, e.g. a package path
pub fn item(ctx: &UiContext, text: &str) {
    if ctx.use_fancy_output() {
        println!("    {}", style(text).cyan());
    } else {
        println!("    {}", text);
    }
}

/// Display a success step
pub fn step_ok(ctx: &UiContext, message: &str) {
    println!("{}", step_line(ctx, Level::Ok, message));
}

/// Display a success step with detail
pub fn step_ok_detail(ctx: &UiContext, message: &str, detail: &str) {
    let text = format!("{} ({})", message, style(detail).dim());
    println!("{}", step_line(ctx, Level::Ok, &text));
}

/// Display a warning step
pub fn step_warn(ctx: &UiContext, message: &str) {
    println!("{}", step_line(ctx, Level::Warn, message));
}

/// Display a warning step with hint
pub fn step_warn_hint(ctx: &UiContext, message: &str, hint: &str) {
    let text = format!("{} - {}", message, style(hint).dim());
    println!("{}", step_line(ctx, Level::Warn, &text));
}

/// Display an error step with detail
pub fn step_error_detail(ctx: &UiContext, message: &str, detail: &str) {
    let text = format!("{}: {}", message, style(detail).red());
    println!("{}", step_line(ctx, Level::Fail, &text));
}

/// Display a remark/hint
pub fn remark(ctx: &UiContext, message: &str) {
    if ctx.use_fancy_output() {
        println!("{}  {}", style(BAR).dim(), style(message).dim());
    } else {
        println!("  {}", style(message).dim());
    }
}

/// Print captured command output verbatim, indented under the current step
pub fn output_block(ctx: &UiContext, text: &str) {
    for line in text.lines() {
        if ctx.use_fancy_output() {
            println!("      {}", style(line).dim());
        } else {
            println!("      {}", line);
        }
    }
}
