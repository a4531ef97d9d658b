use deployml::domain::ports::Confirmer;
use dialoguer::{Confirm, Input, Select};

use crate::ui::theme::DeploymlTheme;

/// Interactive yes/no prompt; the default answer is "no"
pub struct DialoguerConfirmer {
    theme: DeploymlTheme,
}

impl DialoguerConfirmer {
    pub fn new(unicode: bool) -> Self {
        Self {
            theme: DeploymlTheme::new(unicode),
        }
    }
}

impl Confirmer for DialoguerConfirmer {
    fn confirm(&self, prompt: &str) -> std::io::Result<bool> {
        Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()
            .map_err(std::io::Error::other)
    }
}

/// Free-text prompt with a default shown in parentheses
pub fn ask(unicode: bool, prompt: &str, default: Option<&str>) -> std::io::Result<String> {
    let theme = DeploymlTheme::new(unicode);
    let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
    match default {
        Some(default) => input = input.default(default.to_string()),
        None => input = input.allow_empty(false),
    }
    input.interact_text().map_err(std::io::Error::other)
}

/// Pick one of `items`; returns its index
pub fn select(unicode: bool, prompt: &str, items: &[&str], default: usize) -> std::io::Result<usize> {
    let theme = DeploymlTheme::new(unicode);
    Select::with_theme(&theme)
        .with_prompt(prompt)
        .items(items)
        .default(default)
        .interact()
        .map_err(std::io::Error::other)
}
