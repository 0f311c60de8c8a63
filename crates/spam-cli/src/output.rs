//! Output formatting utilities

use colored::Colorize;
use comment_spam::data::Label;
use serde::Serialize;

/// Print a section header
pub(crate) fn section(title: &str) {
    println!("\n{}", format!("=== {title} ===").cyan().bold());
}

/// Print a key-value pair
pub(crate) fn kv(key: &str, value: impl std::fmt::Display) {
    println!("  {}: {}", key.white().bold(), value);
}

/// Colored label text
pub(crate) fn label(label: Label) -> String {
    match label {
        Label::Spam => label.to_string().red().bold().to_string(),
        Label::Ham => label.to_string().green().to_string(),
    }
}

/// Print a value as pretty JSON on stdout
pub(crate) fn json<T: Serialize>(value: &T) -> crate::error::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
