use deployml::config::{AnimationMode, ColorMode, OutputConfig};
use deployml::presentation::ColorWhen;

use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};

/// Output decisions for one command run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
    pub animation: bool,
}

impl UiContext {
    pub fn new(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        cli_no_animation: bool,
        output: &OutputConfig,
    ) -> Self {
        let caps = detect_capabilities();
        Self::from_caps(json, verbose, cli_color, cli_no_animation, output, caps)
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        cli_color: Option<ColorWhen>,
        cli_no_animation: bool,
        output: &OutputConfig,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = output.unicode && caps.supports_unicode;

        let color = match cli_color {
            Some(ColorWhen::Never) => false,
            Some(ColorWhen::Always) => true,
            Some(ColorWhen::Auto) | None => match output.color {
                ColorMode::Never => false,
                ColorMode::Always => true,
                ColorMode::Auto => caps.supports_color && !caps.is_ci,
            },
        };

        let animation = if json || cli_no_animation || caps.is_ci {
            false
        } else {
            match output.animation {
                AnimationMode::Never | AnimationMode::Minimal => false,
                AnimationMode::Always | AnimationMode::Auto => caps.is_tty,
            }
        };

        Self {
            json,
            verbose,
            caps,
            color,
            unicode,
            animation,
        }
    }

    /// Prompts are only possible with a terminal on stdin and no NDJSON stream
    pub fn interactive(&self) -> bool {
        use is_terminal::IsTerminal;
        !self.json && std::io::stdin().is_terminal()
    }
}
