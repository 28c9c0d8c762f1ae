use colored::*;
use std::path::Path;

use crate::benchmark::RunSummary;

/// Returns the compact sqlbench banner
pub fn get_compact_logo() -> String {
    let logo = r#"
  ____  ___  _     ____  _____ _   _  ____ _   _
 / ___|/ _ \| |   | __ )| ____| \ | |/ ___| | | |
 \___ \ | | | |   |  _ \|  _| |  \| | |   | |_| |
  ___) | |_| | |___| |_) | |___| |\  | |___|  _  |
 |____/ \__\_\_____|____/|_____|_| \_|\____|_| |_|
    "#;

    logo.to_string()
}

/// Returns a colored version of the compact banner
pub fn get_compact_colored_logo() -> ColoredString {
    get_compact_logo().bright_cyan()
}

/// Display version information with the banner
pub fn display_version() {
    println!("{}", get_compact_colored_logo());
    println!("sqlbench version {}", env!("CARGO_PKG_VERSION"));
    println!("{}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Print the outcome of a benchmark run
pub fn display_summary(summary: &RunSummary, output_file: &Path) {
    println!("\n--- {} ---", "Benchmark Summary".green());
    println!("  {}: {}", "Correct".green(), summary.correct);
    println!("  {}: {}", "Wrong".red(), summary.wrong);
    if summary.skipped > 0 {
        println!("  {}: {}", "Skipped".yellow(), summary.skipped);
    }
    match summary.accuracy() {
        Some(accuracy) => println!("  Accuracy: {}", format!("{:.1}%", accuracy * 100.0).bold()),
        None => println!("  Accuracy: n/a"),
    }
    println!(
        "{} results saved to {}",
        summary.total(),
        output_file.display()
    );
}

/// Print the verdict of the compare command
pub fn display_comparison(equivalent: bool) {
    if equivalent {
        println!("{}", "EQUIVALENT".green().bold());
    } else {
        println!("{}", "NOT EQUIVALENT".red().bold());
    }
}
