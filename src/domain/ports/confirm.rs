//! Explicit user confirmation

/// Answers a yes/no question; the default answer must be "no"
pub trait Confirmer {
    fn confirm(&self, prompt: &str) -> std::io::Result<bool>;
}

/// Answers every question with a fixed value (`--yes`, non-interactive runs)
pub struct FixedAnswer(pub bool);

impl Confirmer for FixedAnswer {
    fn confirm(&self, _prompt: &str) -> std::io::Result<bool> {
        Ok(self.0)
    }
}
