use std::time::{Duration, Instant};

/// Percentage bar for a step whose length is only estimated
#[derive(Debug, Clone)]
pub struct ProgressBar {
    percent: u8,
    width: u16,
    message: String,
    started: Instant,
    estimate: Option<Duration>,
}

impl ProgressBar {
    pub fn new(estimate: Option<Duration>) -> Self {
        Self {
            percent: 0,
            width: 24,
            message: String::new(),
            started: Instant::now(),
            estimate,
        }
    }

    pub fn set_width(&mut self, width: u16) {
        self.width = width.max(1);
    }

    pub fn set(&mut self, percent: u8, message: impl Into<String>) {
        self.percent = percent.min(100);
        self.message = message.into();
    }

    pub fn percent(&self) -> u8 {
        self.percent
    }

    pub fn render(&self, supports_unicode: bool) -> String {
        let width = usize::from(self.width);
        let filled = (usize::from(self.percent) * width + 50) / 100;
        let empty = width - filled.min(width);
        let (full, rest) = if supports_unicode { ("━", "─") } else { ("=", "-") };

        let mut out = format!(
            "{}{}  {:>3}%",
            full.repeat(filled.min(width)),
            rest.repeat(empty),
            self.percent
        );
        out.push_str(&format!("  {}", format_elapsed(self.started.elapsed())));
        if let Some(estimate) = self.estimate {
            out.push_str(&format!(" / ~{}", format_elapsed(estimate)));
        }
        if !self.message.is_empty() {
            out.push_str("  ");
            out.push_str(&self.message);
        }
        out
    }
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        return format!("{}s", secs);
    }
    format!("{}m{:02}s", secs / 60, secs % 60)
}
