//! Small helpers shared by the binary and printers.

use owo_colors::OwoColorize;

/// Colors are disabled for machine outputs and when `NO_COLOR` is set.
pub fn use_colors(output: &str) -> bool {
    output == "human" && std::env::var_os("NO_COLOR").is_none()
}

fn stderr_colors() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if stderr_colors() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if stderr_colors() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if stderr_colors() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}
