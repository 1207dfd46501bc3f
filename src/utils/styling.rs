//! Terminal styling utilities

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::Thresholds;

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static MODEL: Emoji<'_, '_> = Emoji("🧠 ", "");
pub static COINS: Emoji<'_, '_> = Emoji("💰 ", "");
pub static CART: Emoji<'_, '_> = Emoji("🛒 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
     ██████╗██╗   ██╗███████╗████████╗███████╗███████╗ ██████╗
    ██╔════╝██║   ██║██╔════╝╚══██╔══╝██╔════╝██╔════╝██╔════╝
    ██║     ██║   ██║███████╗   ██║   ███████╗█████╗  ██║  ███╗
    ██║     ██║   ██║╚════██║   ██║   ╚════██║██╔══╝  ██║   ██║
    ╚██████╗╚██████╔╝███████║   ██║   ███████║███████╗╚██████╔╝
     ╚═════╝ ╚═════╝ ╚══════╝   ╚═╝   ╚══════╝╚══════╝ ╚═════╝
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Predict web purchases, segment customers").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print the run configuration card
pub fn print_config(artifacts: &Path, model: &str, input: Option<&Path>, thresholds: Option<&Thresholds>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Artifacts: {:<36}│",
        FOLDER,
        truncate_path(artifacts, 35)
    );
    println!(
        "    │  {} Model:     {:<36}│",
        MODEL,
        truncate_string(model, 35)
    );
    if let Some(input) = input {
        println!(
            "    │  {} Upload:    {:<36}│",
            FOLDER,
            truncate_path(input, 35)
        );
    }
    println!("    ├{}┤", line);
    match thresholds {
        Some(t) => {
            println!(
                "    │  {} Income threshold:   {:<27}│",
                COINS,
                style(format!("{:.2}", t.income)).yellow()
            );
            println!(
                "    │  {} Purchase threshold: {:<27}│",
                CART,
                style(format!("{:.2}", t.purchase)).yellow()
            );
        }
        None => {
            println!(
                "    │  {} Thresholds:         {:<27}│",
                COINS,
                style("batch medians").yellow()
            );
        }
    }
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
    println!("    {} {}", INFO, message);
}

/// Print an error message to stderr
pub fn print_error(message: &str) {
    eprintln!("    {} {}", style("✗").red().bold(), style(message).red());
}

/// Print the final completion message
pub fn print_completion(message: &str) {
    println!();
    println!("    {} {}", ROCKET, style(message).green().bold());
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

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
