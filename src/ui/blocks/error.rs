use std::path::PathBuf;

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

/// Lines of tool stderr shown inside an error panel
const MAX_STDERR_LINES: usize = 12;

#[derive(Debug, Clone)]
pub struct ErrorBlock {
    message: String,
    file: Option<PathBuf>,
    stderr: Vec<String>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            file: None,
            stderr: Vec::new(),
            fix: None,
        }
    }

    pub fn with_file(mut self, file: impl Into<PathBuf>) -> Self {
        self.file = Some(file.into());
        self
    }

    /// Keep the tail of a tool's stderr; that is where Terraform puts the cause
    pub fn with_stderr(mut self, stderr: &str) -> Self {
        let lines: Vec<&str> = stderr.lines().filter(|l| !l.trim().is_empty()).collect();
        let skip = lines.len().saturating_sub(MAX_STDERR_LINES);
        self.stderr = lines[skip..].iter().map(|l| l.to_string()).collect();
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error("ERROR").bold().render(supports_color)
        );
        let mut panel = Panel::with_title(title).style(PanelStyle::Error);

        if let Some(file) = &self.file {
            panel.add_line(file.display().to_string());
        }
        panel.add_empty();
        panel.add_line(self.message.clone());

        if !self.stderr.is_empty() {
            panel.add_empty();
            for line in &self.stderr {
                panel.add_line(ColoredText::dim(line.as_str()).render(supports_color));
            }
        }

        if let Some(fix) = &self.fix {
            panel.add_empty();
            panel.add_line(format!("FIX: {}", fix));
        }

        panel.render(supports_color, supports_unicode)
    }
}
