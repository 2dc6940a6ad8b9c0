//! Colored terminal output for lineagemap commands.
//!
//! Diagnostics (`error:`, `warning:`, `hint:`) go to stderr so that
//! `lineagemap build` output can be piped; progress lines go to stdout.

use colored::{ColoredString, Colorize};
use crossterm::style::Color;
use std::fmt::Display;
use std::io::{self, IsTerminal, Write};
use std::path::Path;
use termimad::{MadSkin, StyledChar};

fn diagnostic(tag: ColoredString, msg: &str) {
    eprintln!("{} {}", tag, msg);
}

pub fn error(msg: &str) {
    diagnostic("error:".red().bold(), msg);
}

pub fn warning(msg: &str) {
    diagnostic("warning:".yellow().bold(), msg);
}

pub fn hint(msg: &str) {
    diagnostic("hint:".dimmed(), &msg.dimmed().to_string());
}

pub fn success(msg: &str) {
    println!("{} {}", "✓".green().bold(), msg);
}

pub fn status(msg: &str) {
    println!("{} {}", "→".blue(), msg);
}

/// Announce that watch mode picked up a new version of the input file.
pub fn input_reloaded(input: &Path) {
    println!("{} {}", "reloaded:".yellow(), path(input));
}

pub fn path(p: &Path) -> String {
    p.display().to_string().bright_white().to_string()
}

pub fn url(u: &str) -> String {
    u.bright_blue().underline().to_string()
}

/// Indented `label: value` line used for graph counts.
pub fn metric(label: &str, value: impl Display) -> String {
    format!("  {}: {}", label.dimmed(), value.to_string().cyan())
}

/// Write a markdown report, rendered through termimad on a terminal and
/// verbatim otherwise.
pub fn render_markdown(markdown: &str, output: &mut dyn Write) -> io::Result<()> {
    if io::stdout().is_terminal() {
        write!(output, "{}", report_skin().term_text(markdown))
    } else {
        write!(output, "{}", markdown)
    }
}

fn report_skin() -> MadSkin {
    let mut skin = MadSkin::default();
    // group headings stand out, node ids read as code
    skin.set_headers_fg(Color::Cyan);
    skin.bold.set_fg(Color::White);
    skin.inline_code.set_fg(Color::Green);
    skin.code_block.set_fg(Color::Green);
    skin.bullet = StyledChar::from_fg_char(Color::Blue, '•');
    skin.horizontal_rule = StyledChar::from_fg_char(Color::DarkGrey, '─');
    skin
}
