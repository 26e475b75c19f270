//! Console headers for sections and demos.

use colored::Colorize;

pub fn set_color(enabled: bool) {
    if enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

pub fn banner(title: &str) {
    println!("{}", title.bold().underline());
}

pub fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").bold().cyan());
}

pub fn demo(title: &str) {
    println!("\n{}", format!("--- {title} ---").yellow());
}

/// Prints a multi-line block, one `println!` per line.
pub fn block(text: &str) {
    for line in text.lines() {
        println!("{line}");
    }
}
