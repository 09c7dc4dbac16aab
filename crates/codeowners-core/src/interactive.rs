// Interactive prompts and CLI output helpers

use anyhow::Result;
use inquire::Confirm;
use owo_colors::OwoColorize;
use std::io::IsTerminal;

/// Check if we should prompt the user
pub fn is_interactive() -> bool {
    // Never be interactive in test environment or CI
    if is_test_env() || is_ci() {
        return false;
    }

    std::io::stdin().is_terminal()
}

fn is_ci() -> bool {
    std::env::var("CI").is_ok()
        || std::env::var("GITHUB_ACTIONS").is_ok()
        || std::env::var("GITLAB_CI").is_ok()
        || std::env::var("CIRCLECI").is_ok()
}

/// Compile-time test flag, the CODEOWNERS_TEST variable, or a test harness thread name
fn is_test_env() -> bool {
    if cfg!(test) {
        return true;
    }

    if std::env::var("CODEOWNERS_TEST").is_ok() {
        return true;
    }

    // The test harness names threads after the test function
    if let Some(name) = std::thread::current().name() {
        if name.contains("test_") {
            return true;
        }
    }

    false
}

pub fn prompt_confirm(message: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new(message).with_default(default).prompt()?)
}

pub fn print_success(text: &str) {
    println!("{} {}", "✓".bright_green(), text.green());
}

pub fn print_info(text: &str) {
    println!("{} {}", "→".bright_blue(), text.bright_blue());
}

pub fn print_warning(text: &str) {
    println!("{} {}", "▸ ".bright_yellow(), text.yellow());
}

/// Print an added line, diff style
pub fn print_added(text: &str) {
    println!("  {} {}", "+".green(), text.bright_white());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_not_interactive_in_tests() {
        assert!(!is_interactive(), "is_interactive() should return false during tests");
    }
}
