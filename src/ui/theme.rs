use crossterm::style::Color;
use dialoguer::theme::Theme;
use std::fmt;

/// Design tokens for the DeployML CLI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons and borders must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const PROGRESS: &str = "●";
    pub const PENDING: &str = "○";
    pub const ARROW: &str = "↳";
    pub const QUESTION: &str = "?";

    // Command identifiers (used in headers).
    pub const DEPLOY: &str = "🚀";
    pub const DESTROY: &str = "🗑";
    pub const DOCTOR: &str = "🔍";
    pub const STATUS: &str = "📡";
    pub const INIT: &str = "⚙";
    pub const GENERATE: &str = "📝";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const PROGRESS: &str = "[..]";
    pub const PENDING: &str = "[ ]";
    pub const ARROW: &str = "[>]";
    pub const QUESTION: &str = "[?]";

    pub const DEPLOY: &str = "[DEPLOY]";
    pub const DESTROY: &str = "[DESTROY]";
    pub const DOCTOR: &str = "[DOCTOR]";
    pub const STATUS: &str = "[STATUS]";
    pub const INIT: &str = "[INIT]";
    pub const GENERATE: &str = "[GENERATE]";
}

pub mod borders {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
}

pub mod borders_ascii {
    pub const TOP_LEFT: &str = "+";
    pub const TOP_RIGHT: &str = "+";
    pub const BOTTOM_LEFT: &str = "+";
    pub const BOTTOM_RIGHT: &str = "+";
    pub const HORIZONTAL: &str = "-";
    pub const VERTICAL: &str = "|";
}

// ----------------------------------------------------------------------------
// DeploymlTheme - dialoguer theme for confirmation and input prompts
// ----------------------------------------------------------------------------

/// Prompt theme that prefixes questions with the `?` token and, in ASCII
/// mode, avoids the Unicode glyphs `ColorfulTheme` draws.
pub struct DeploymlTheme {
    unicode: bool,
    inner: dialoguer::theme::ColorfulTheme,
}

impl DeploymlTheme {
    pub fn new(unicode: bool) -> Self {
        Self {
            unicode,
            inner: dialoguer::theme::ColorfulTheme::default(),
        }
    }

    pub fn question_icon(&self) -> &'static str {
        if self.unicode {
            icons::QUESTION
        } else {
            icons_ascii::QUESTION
        }
    }

    fn answer_icon(&self) -> &'static str {
        if self.unicode {
            icons::ARROW
        } else {
            icons_ascii::ARROW
        }
    }
}

impl Theme for DeploymlTheme {
    fn format_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        write!(f, "{} {}", self.question_icon(), prompt)
    }

    fn format_error(&self, f: &mut dyn fmt::Write, err: &str) -> fmt::Result {
        self.inner.format_error(f, err)
    }

    // The default answer is always "no"; the hint shows it capitalized.
    fn format_confirm_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<bool>,
    ) -> fmt::Result {
        let hint = match default {
            Some(true) => "[Y/n]",
            Some(false) => "[y/N]",
            None => "[y/n]",
        };
        write!(f, "{} {} {} ", self.question_icon(), prompt, hint)
    }

    fn format_confirm_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        selection: Option<bool>,
    ) -> fmt::Result {
        let answer = match selection {
            Some(true) => "yes",
            Some(false) => "no",
            None => "",
        };
        write!(
            f,
            "{} {} {} {}",
            self.question_icon(),
            prompt,
            self.answer_icon(),
            answer
        )
    }

    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        default: Option<&str>,
    ) -> fmt::Result {
        match default {
            Some(default) if !default.is_empty() => {
                write!(f, "{} {} ({}) ", self.question_icon(), prompt, default)
            }
            _ => write!(f, "{} {} ", self.question_icon(), prompt),
        }
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.question_icon(),
            prompt,
            self.answer_icon(),
            sel
        )
    }

    fn format_select_prompt(&self, f: &mut dyn fmt::Write, prompt: &str) -> fmt::Result {
        self.format_prompt(f, prompt)
    }

    fn format_select_prompt_item(
        &self,
        f: &mut dyn fmt::Write,
        text: &str,
        active: bool,
    ) -> fmt::Result {
        if self.unicode {
            return self.inner.format_select_prompt_item(f, text, active);
        }
        if active {
            write!(f, "> {}", text)
        } else {
            write!(f, "  {}", text)
        }
    }
}
