use colored::Colorize;

use apidoc_common::{Warning, Warnings};

/// Renders run warnings for the terminal.
pub struct Reporter {
    color: bool,
}

impl Reporter {
    pub fn new(color: bool) -> Self {
        Reporter { color }
    }

    /// One line per warning followed by a count. Empty when there is nothing
    /// to report.
    pub fn render(&self, warnings: &Warnings) -> String {
        if warnings.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        for warning in warnings {
            out.push_str(&self.format_warning(warning));
            out.push('\n');
        }
        out.push_str(&self.format_summary(warnings.len()));
        out
    }

    pub fn format_warning(&self, warning: &Warning) -> String {
        let label = self.format_label();
        let kind = format!("[{}]", warning.kind);
        let kind = if self.color {
            kind.bright_blue().to_string()
        } else {
            kind
        };

        if warning.subject.is_empty() {
            format!("{} {}: {}", label, kind, warning.message)
        } else {
            format!("{} {} {}: {}", label, kind, warning.subject, warning.message)
        }
    }

    fn format_label(&self) -> String {
        if self.color {
            "warning".yellow().bold().to_string()
        } else {
            "warning".to_string()
        }
    }

    fn format_summary(&self, count: usize) -> String {
        let noun = if count == 1 { "warning" } else { "warnings" };
        let summary = format!("Found {} {}.", count, noun);
        if self.color {
            summary.bold().to_string()
        } else {
            summary
        }
    }
}
