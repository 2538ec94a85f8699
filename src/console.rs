//! Console output for the command-line client.
//!
//! Colors are used only on a terminal and when `NO_COLOR` is unset.

use crate::tag::Tag;
use crate::work::WorkKind;
use std::io::{self, IsTerminal};

/// ANSI style codes for terminal formatting.
#[derive(Debug, Clone, Copy)]
pub enum Style {
    Bold,
    Dim,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
}

impl Style {
    fn code(self) -> &'static str {
        match self {
            Style::Bold => "1",
            Style::Dim => "2",
            Style::Red => "31",
            Style::Green => "32",
            Style::Yellow => "33",
            Style::Blue => "34",
            Style::Magenta => "35",
            Style::Cyan => "36",
        }
    }
}

const RESET: &str = "\x1b[0m";

/// Console output handler with color support detection.
#[derive(Debug)]
pub struct Console {
    colors_enabled: bool,
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

impl Console {
    pub fn new() -> Self {
        let colors_enabled = std::env::var("NO_COLOR").is_err() && io::stdout().is_terminal();

        Self { colors_enabled }
    }

    /// Creates a Console with colors explicitly enabled or disabled.
    pub fn with_colors(enabled: bool) -> Self {
        Self {
            colors_enabled: enabled,
        }
    }

    /// Applies ANSI styles to text if colors are enabled.
    pub fn style(&self, text: &str, styles: &[Style]) -> String {
        if !self.colors_enabled || styles.is_empty() {
            return text.to_string();
        }

        let codes: Vec<&str> = styles.iter().map(|s| s.code()).collect();
        format!("\x1b[{}m{}{}", codes.join(";"), text, RESET)
    }

    fn label(&self, label: &str, color: Style) -> String {
        format!("[{}]", self.style(label, &[color, Style::Bold]))
    }

    pub fn info(&self, message: &str) {
        println!("{} {}", self.label("INFO", Style::Blue), message);
    }

    pub fn success(&self, message: &str) {
        println!("{} {}", self.label("OK", Style::Green), message);
    }

    pub fn warning(&self, message: &str) {
        println!("{} {}", self.label("WARN", Style::Yellow), message);
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", self.label("ERROR", Style::Red), message);
    }

    pub fn step(&self, message: &str) {
        println!("{} {}", self.label("STEP", Style::Cyan), message);
    }

    /// Prints a section header in magenta bold.
    pub fn section(&self, message: &str) {
        println!();
        println!("{}", self.style(message, &[Style::Magenta, Style::Bold]));
    }

    /// Formats a work kind; unresolved works show as `?`.
    pub fn kind(&self, kind: Option<WorkKind>) -> String {
        match kind {
            Some(WorkKind::Illust) => self.style("illust", &[Style::Green]),
            Some(WorkKind::Manga) => self.style("manga", &[Style::Yellow]),
            Some(WorkKind::Ugoira) => self.style("ugoira", &[Style::Magenta]),
            None => self.style("?", &[Style::Dim]),
        }
    }

    /// Formats tags as `#tag` separated by spaces.
    pub fn tags(&self, tags: &[Tag]) -> String {
        if tags.is_empty() {
            return self.style("(no tags)", &[Style::Dim]);
        }

        tags.iter()
            .map(|tag| self.style(&format!("#{}", tag.text()), &[Style::Cyan]))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_style_disabled() {
        let console = Console::with_colors(false);
        assert_eq!(console.style("hello", &[Style::Red]), "hello");
    }

    #[test]
    fn test_multiple_styles() {
        let console = Console::with_colors(true);
        let styled = console.style("hello", &[Style::Bold, Style::Red]);
        assert!(styled.starts_with("\x1b[1;31m"));
        assert!(styled.ends_with(RESET));
    }

    #[test]
    fn test_kind() {
        let console = Console::with_colors(false);
        assert_eq!(console.kind(Some(WorkKind::Manga)), "manga");
        assert_eq!(console.kind(None), "?");
    }

    #[test]
    fn test_tags() {
        let console = Console::with_colors(false);
        let tags = vec![Tag::new("sky"), Tag::new("オリジナル")];
        assert_eq!(console.tags(&tags), "#sky #オリジナル");
        assert_eq!(console.tags(&[]), "(no tags)");
    }
}
