//! Shared CLI output helpers.
//!
//! Color scheme (respects NO_COLOR):
//! - Green: success, checkmarks
//! - Red: errors
//! - Yellow: warnings
//! - Cyan: paths, commands, hints
//! - Bold: headers, important values
//! - Dimmed: secondary info
//!
//! Results go to stdout; warnings, hints and errors go to stderr so stdout
//! stays pipeable (`envsnap key export > key.txt`).

use std::fmt::Display;

use console::style;

/// Turn styling off when NO_COLOR is set. Non-terminals are already plain.
pub fn init() {
    if std::env::var_os("NO_COLOR").is_some() {
        console::set_colors_enabled(false);
        console::set_colors_enabled_stderr(false);
    }
}

/// Print a success message with checkmark (green).
///
/// Example: `✓ encrypted .env to secrets.envsnap`
pub fn success(msg: &str) {
    println!("{} {}", style("✓").green(), msg);
}

/// Print an error message to stderr (red).
pub fn error(msg: &str) {
    eprintln!("{} {}", style("✗").red().for_stderr(), msg);
}

/// Print a warning message to stderr (yellow).
pub fn warn(msg: &str) {
    eprintln!("{} {}", style("⚠").yellow().for_stderr(), msg);
}

/// Print a hint message to stderr (cyan).
///
/// Example: `→ run: envsnap init`
pub fn hint(msg: &str) {
    eprintln!(
        "{} {}",
        style("→").cyan().for_stderr(),
        style(msg).cyan().for_stderr()
    );
}

/// Print a bold section header.
pub fn header(title: &str) {
    println!("{}", style(title).bold());
}

/// Print a key-value pair (label dimmed, value bold).
///
/// Example: `  version:  3`
pub fn kv(label: &str, value: impl Display) {
    println!("  {}  {}", style(label).dim(), style(value).bold());
}

/// Format a path in cyan for inline use.
pub fn path(p: impl Display) -> String {
    style(p).cyan().to_string()
}

/// Format a command in green for inline use.
pub fn cmd(c: &str) -> String {
    style(c).green().to_string()
}

/// Print a dimmed/secondary message.
pub fn dimmed(msg: &str) {
    println!("{}", style(msg).dim());
}
