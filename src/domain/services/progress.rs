//! Apply progress: percentage from elapsed time and stage messages

use std::time::Duration;

use crate::domain::entities::ToolBinding;

pub const PREPARING_MESSAGE: &str = "Preparing your cloud environment...";
pub const WRAPPING_UP_MESSAGE: &str = "Wrapping up the deployment for you...";
pub const DONE_MESSAGE: &str = "All done! Reviewing the results...";

/// Percentage held back until the process actually exits
pub const MAX_RUNNING_PERCENT: u8 = 95;

/// `min(95, elapsed / estimated * 100)`
pub fn percent_complete(elapsed: Duration, estimated: Duration) -> u8 {
    let estimated = estimated.as_millis().max(1);
    let pct = elapsed.as_millis().saturating_mul(100) / estimated;
    u8::try_from(pct.min(u128::from(MAX_RUNNING_PERCENT))).unwrap_or(MAX_RUNNING_PERCENT)
}

/// `experiment_tracking` -> `Experiment Tracking`
pub fn title_case(raw: &str) -> String {
    raw.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first
                    .to_uppercase()
                    .chain(chars.flat_map(char::to_lowercase))
                    .collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Ordered messages shown while apply runs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageMessages {
    messages: Vec<String>,
}

impl StageMessages {
    pub fn for_stack(stack: &[ToolBinding]) -> Self {
        let mut messages = Vec::with_capacity(stack.len() + 3);
        messages.push(PREPARING_MESSAGE.to_string());
        messages.extend(stack.iter().map(|binding| {
            format!(
                "Deploying {} ({})...",
                title_case(&binding.tool),
                title_case(&binding.stage)
            )
        }));
        messages.push(WRAPPING_UP_MESSAGE.to_string());
        messages.push(DONE_MESSAGE.to_string());
        Self { messages }
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Message for a running percentage. The final message is never
    /// returned here; it belongs to completion.
    pub fn message_for(&self, percent: u8) -> &str {
        let n = self.messages.len();
        if n < 2 {
            return self.messages.first().map(String::as_str).unwrap_or("");
        }
        let index = (usize::from(percent) * (n - 1) / 100).min(n - 2);
        &self.messages[index]
    }

    pub fn final_message(&self) -> &str {
        self.messages.last().map(String::as_str).unwrap_or(DONE_MESSAGE)
    }
}
