//! Terminal output helpers shared by the commands

use console::style;

const LABEL_WIDTH: usize = 14;

#[derive(Debug, Default)]
pub struct Output;

impl Output {
    pub fn new() -> Self {
        Self
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", style("✓").green(), message);
    }

    /// Skipped or degraded input; collection continues
    pub fn warning(&self, message: &str) {
        println!("{} {}", style("⚠").yellow(), message);
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", style("ℹ").blue(), message);
    }

    pub fn section(&self, title: &str) {
        println!("\n{}", style(title).bold());
        println!("{}", style("─".repeat(40)).dim());
    }

    /// Aligned `label: value` row inside a section
    pub fn field(&self, label: &str, value: impl std::fmt::Display) {
        println!(
            "  {:<width$} {}",
            format!("{}:", label),
            value,
            width = LABEL_WIDTH
        );
    }

    /// Module row with a dimmed note when it has nothing configured
    pub fn module_row(&self, module: &str, tasks: &[String]) {
        if tasks.is_empty() {
            println!("  {:<24} {}", module, style("not configured").dim());
        } else {
            println!("  {:<24} {}", module, style(tasks.join(", ")).cyan());
        }
    }
}
