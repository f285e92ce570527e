//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static SAVE: Emoji<'_, '_> = Emoji("💾 ", "");
pub static DICE: Emoji<'_, '_> = Emoji("🎲 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    println!();
    println!(
        "    {} {}",
        style("oncolens").magenta().bold(),
        style(format!("v{}", version)).dim()
    );
    println!(
        "    {}",
        style("Leak-free preprocessing and SHAP summaries").dim()
    );
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the preparation configuration card
pub fn print_prepare_config(
    input: &Path,
    target: &str,
    output: &Path,
    test_fraction: f64,
    seed: u64,
) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!("    │ {:<53}│", style("⚙️  Configuration").cyan().bold());
    println!("    ├{}┤", line);
    println!("    │  {}Input:  {:<41}│", FOLDER, truncate_path(input, 40));
    println!("    │  {}Target: {:<41}│", TARGET, truncate_string(target, 40));
    println!("    │  {}Output: {:<41}│", SAVE, truncate_path(output, 40));
    println!("    ├{}┤", line);
    println!(
        "    │  {}Eval fraction: {:<7} seed: {:<17}│",
        DICE,
        format!("{:.2}", test_fraction),
        seed
    );
    println!("    └{}┘", line);
    println!();
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {}{}", INFO, message);
}

/// Print the final completion message
pub fn print_completion(message: &str) {
    println!();
    println!("    {}{}", ROCKET, style(message).green().bold());
    println!();
}

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

fn truncate_string(s: &str, max_len: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= max_len {
        s.to_string()
    } else {
        let tail: String = chars[chars.len() - (max_len - 3)..].iter().collect();
        format!("...{}", tail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("diagnosis", 20), "diagnosis");
        assert_eq!(truncate_string("abcdefghij", 8), "...fghij");
    }
}
