//! Console output primitives.
//!
//! All styling lives here so command handlers stay plain. Color and
//! animation switch off when stdout is not a terminal.

use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use nestforge_engine::naming::pluralize;

/// Terminal color palette
pub mod colors {
    use console::Color;

    pub const CYAN: Color = Color::Color256(45);
    pub const GREEN: Color = Color::Color256(77);
    pub const AMBER: Color = Color::Color256(214);
    pub const DIM: Color = Color::Color256(244);
}

/// Output symbols
pub mod symbols {
    pub const DIAMOND: &str = "\u{25C6}"; // ◆
    pub const DIAMOND_OUTLINE: &str = "\u{25C7}"; // ◇
    pub const TRIANGLE: &str = "\u{25B8}"; // ▸
    pub const DOT: &str = "\u{00B7}"; // ·
}

/// Disables styling when stdout is piped.
pub fn init() {
    if !atty::is(atty::Stream::Stdout) {
        console::set_colors_enabled(false);
    }
}

/// Print the name-and-version header line.
pub fn header(version: &str) {
    println!(
        "  {} {} {}",
        style(symbols::DIAMOND).fg(colors::CYAN),
        style("nestforge").fg(colors::CYAN).bold(),
        style(version).dim()
    );
    println!();
}

/// Print a success message.
pub fn success(msg: &str) {
    println!("  {} {}", style(symbols::DIAMOND).fg(colors::GREEN), msg);
}

/// Print an info message.
pub fn info(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        msg
    );
}

/// Print a warning line.
pub fn warn(msg: &str) {
    println!(
        "  {} {}",
        style(symbols::TRIANGLE).fg(colors::AMBER),
        style(msg).fg(colors::AMBER)
    );
}

/// Print a dim/secondary message.
pub fn dim(msg: &str) {
    println!("  {}", style(msg).fg(colors::DIM));
}

/// One line per entity in a report listing.
pub fn entity_line(name: &str, artifacts: usize, warnings: usize) {
    let note = if warnings > 0 {
        format!("   {}", style(counted(warnings, "warning")).fg(colors::AMBER))
    } else {
        String::new()
    };
    println!(
        "  {}   {:12} {}{}",
        style(symbols::TRIANGLE).fg(colors::CYAN),
        style(name).bold(),
        counted(artifacts, "artifact"),
        note
    );
}

/// One path line in an artifact listing.
pub fn artifact_line(path: &str) {
    println!(
        "    {} {}",
        style(symbols::DOT).fg(colors::DIM),
        style(path).fg(colors::DIM)
    );
}

/// Print timing information.
pub fn timing(label: &str, duration_ms: u128) {
    println!(
        "  {} {} in {}ms",
        style(symbols::DIAMOND_OUTLINE).fg(colors::CYAN),
        label,
        duration_ms
    );
}

/// Create a spinner; hidden on non-terminal stdout.
pub fn spinner(msg: &str) -> ProgressBar {
    if !atty::is(atty::Stream::Stdout) {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_chars("\u{25C7}\u{25C6}\u{25C7}\u{25C6}") // ◇◆◇◆
            .template("  {spinner:.cyan} {msg}")
            .unwrap(),
    );
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(120));
    pb
}

/// Counted noun: "1 artifact", "3 artifacts", "2 entities".
pub fn counted(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {}", pluralize(noun))
    }
}
