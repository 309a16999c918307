use colored::Colorize;
use std::fmt;

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Section,
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "INFO",
        MessageKind::Success => "SUCCESS",
        MessageKind::Warning => "WARNING",
        MessageKind::Error => "ERROR",
        MessageKind::Section => "",
    }
}

/// Renders a message with its label and colour.
pub fn render(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let base = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        _ => format!("{}: {}", label(kind), text),
    };
    match kind {
        MessageKind::Success => base.bright_green().to_string(),
        MessageKind::Warning => base.bright_yellow().to_string(),
        MessageKind::Error => base.bright_red().to_string(),
        MessageKind::Section => base.bold().to_string(),
        MessageKind::Info => base,
    }
}

pub fn info(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Info, message));
}

pub fn success(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Success, message));
}

pub fn warning(message: impl fmt::Display) {
    println!("{}", render(MessageKind::Warning, message));
}

pub fn error(message: impl fmt::Display) {
    eprintln!("{}", render(MessageKind::Error, message));
}

pub fn section(title: impl fmt::Display) {
    println!("\n{}", render(MessageKind::Section, title));
}

/// Prints an aligned `label: value` row.
pub fn row(label: impl fmt::Display, value: impl fmt::Display) {
    println!("  {:<10} {}", label.to_string(), value);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_labels_messages() {
        colored::control::set_override(false);
        assert_eq!(render(MessageKind::Warning, "slow"), "WARNING: slow");
        assert_eq!(render(MessageKind::Section, " Plan "), "=== Plan ===");
        colored::control::unset_override();
    }
}
