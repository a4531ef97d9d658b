use std::borrow::Cow;

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStyle {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl PanelStyle {
    fn color(self) -> crossterm::style::Color {
        match self {
            PanelStyle::Info => theme::colors::INFO,
            PanelStyle::Success => theme::colors::SUCCESS,
            PanelStyle::Warning => theme::colors::WARNING,
            PanelStyle::Error => theme::colors::ERROR,
        }
    }
}

struct Borders {
    top_left: &'static str,
    top_right: &'static str,
    bottom_left: &'static str,
    bottom_right: &'static str,
    horizontal: &'static str,
    vertical: &'static str,
}

impl Borders {
    fn for_terminal(supports_unicode: bool) -> Self {
        if supports_unicode {
            use theme::borders as b;
            Self {
                top_left: b::TOP_LEFT,
                top_right: b::TOP_RIGHT,
                bottom_left: b::BOTTOM_LEFT,
                bottom_right: b::BOTTOM_RIGHT,
                horizontal: b::HORIZONTAL,
                vertical: b::VERTICAL,
            }
        } else {
            use theme::borders_ascii as b;
            Self {
                top_left: b::TOP_LEFT,
                top_right: b::TOP_RIGHT,
                bottom_left: b::BOTTOM_LEFT,
                bottom_right: b::BOTTOM_RIGHT,
                horizontal: b::HORIZONTAL,
                vertical: b::VERTICAL,
            }
        }
    }
}

/// Bordered block sized to its widest line
#[derive(Debug, Default, Clone)]
pub struct Panel {
    title: Option<String>,
    content: Vec<String>,
    style: PanelStyle,
}

impl Panel {
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    pub fn style(mut self, style: PanelStyle) -> Self {
        self.style = style;
        self
    }

    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        self.content.extend(line.lines().map(str::to_string));
    }

    pub fn add_empty(&mut self) {
        self.content.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let lines: Vec<&str> = self
            .title
            .iter()
            .chain(self.content.iter())
            .map(String::as_str)
            .collect();
        let inner_width = lines
            .iter()
            .map(|l| visible_width(l))
            .max()
            .unwrap_or(0)
            .saturating_add(2)
            .max(2);

        let b = Borders::for_terminal(supports_unicode);
        let paint = |s: &str| -> String {
            if supports_color {
                format!("{}", s.with(self.style.color()))
            } else {
                s.to_string()
            }
        };

        let mut out = String::new();
        let rule = b.horizontal.repeat(inner_width);
        out.push_str(&paint(&format!("{}{}{}", b.top_left, rule, b.top_right)));
        out.push('\n');
        for line in lines {
            let pad = inner_width - 1 - visible_width(line);
            out.push_str(&paint(b.vertical));
            out.push(' ');
            out.push_str(line);
            out.push_str(&" ".repeat(pad));
            out.push_str(&paint(b.vertical));
            out.push('\n');
        }
        out.push_str(&paint(&format!("{}{}{}", b.bottom_left, rule, b.bottom_right)));
        out.push('\n');
        out
    }
}

fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

/// Drop CSI escape sequences so colored text measures correctly
fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        if matches!(chars.peek(), Some('[') | Some(']')) {
            chars.next();
        }
        for next in chars.by_ref() {
            if next.is_ascii_alphabetic() {
                break;
            }
        }
    }
    Cow::Owned(out)
}
