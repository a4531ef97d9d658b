//! Terminal rendering of lifecycle events
//!
//! With animation, running steps and apply progress redraw in place through
//! a `LiveRegion`. Without it every line is printed once and progress is
//! reported only when its stage message changes.

use std::cell::RefCell;
use std::io::{self, Write};
use std::time::Duration;

use deployml::domain::ports::{LifecycleEvent, LifecycleEventSink};
use deployml::domain::value_objects::LifecycleStep;

use crate::ui::context::UiContext;
use crate::ui::live_region::LiveRegion;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::progress::ProgressBar;

fn step_label(step: LifecycleStep) -> String {
    format!("terraform {}", step.name())
}

#[derive(Default)]
struct SinkState {
    region: LiveRegion,
    estimate: Option<Duration>,
    bar: Option<ProgressBar>,
    last_message: Option<String>,
}

pub struct TerminalEventSink<W: Write> {
    ui: UiContext,
    out: RefCell<W>,
    state: RefCell<SinkState>,
}

impl TerminalEventSink<io::Stdout> {
    pub fn stdout(ui: UiContext) -> Self {
        Self::with_writer(ui, io::stdout())
    }
}

impl<W: Write> TerminalEventSink<W> {
    pub fn with_writer(ui: UiContext, out: W) -> Self {
        Self {
            ui,
            out: RefCell::new(out),
            state: RefCell::new(SinkState::default()),
        }
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out.into_inner()
    }

    fn icon(&self, icon: Icon) -> String {
        icon.colored(self.ui.color, self.ui.unicode)
    }

    fn line(&self, icon: Icon, text: &str) -> String {
        format!("{} {}", self.icon(icon), text)
    }

    /// Print a permanent line, replacing any live content
    fn print(&self, state: &mut SinkState, text: &str) {
        let mut out = self.out.borrow_mut();
        let result = if state.region.is_active() {
            state.region.finish(&mut *out, text)
        } else {
            writeln!(out, "{}", text).and_then(|_| out.flush())
        };
        if let Err(e) = result {
            tracing::debug!("terminal write failed: {e}");
        }
    }

    fn live(&self, state: &mut SinkState, text: &str) {
        let mut out = self.out.borrow_mut();
        if let Err(e) = state.region.update(&mut *out, text) {
            tracing::debug!("terminal write failed: {e}");
        }
    }

    fn handle(&self, state: &mut SinkState, event: LifecycleEvent) {
        match event {
            LifecycleEvent::WorkspacePrepared { path, modules } => {
                let text = format!("Workspace ready at {} ({} modules)", path.display(), modules);
                self.print(state, &self.line(Icon::Success, &text));
            }
            LifecycleEvent::BucketGenerated { bucket, attempts } => {
                let mut text = format!("Generated artifact bucket name: {bucket}");
                if attempts > 1 {
                    text.push_str(&format!(" ({attempts} attempts)"));
                }
                self.print(state, &self.line(Icon::Success, &text));
            }
            LifecycleEvent::Rendered { fingerprint } => {
                let short = fingerprint.trim_start_matches("sha256:");
                let short = &short[..short.len().min(12)];
                let text = format!(
                    "Rendered Terraform files {}",
                    ColoredText::dim(format!("({short})")).render(self.ui.color)
                );
                self.print(state, &self.line(Icon::Success, &text));
            }
            LifecycleEvent::StepStarted { step } => {
                if step == LifecycleStep::Apply {
                    let mut bar = ProgressBar::new(state.estimate);
                    bar.set_width(self.ui.caps.width.saturating_sub(60).clamp(10, 30));
                    state.bar = Some(bar);
                    state.last_message = None;
                    return;
                }
                let text = self.line(Icon::Progress, &format!("Running {}...", step_label(step)));
                if self.ui.animation {
                    self.live(state, &text);
                } else if self.ui.verbose > 0 {
                    self.print(state, &text);
                }
            }
            LifecycleEvent::StepFinished { step, success } => {
                state.bar = None;
                let icon = if success { Icon::Success } else { Icon::Error };
                self.print(state, &self.line(icon, &step_label(step)));
            }
            LifecycleEvent::Estimated { estimate } => {
                state.estimate = Some(estimate.duration());
                let text = format!("Estimated {} time: {}", estimate.operation, estimate);
                self.print(state, &self.line(Icon::Arrow, &text));
            }
            LifecycleEvent::Progress { percent, message } => {
                if self.ui.animation {
                    let mut bar = state.bar.take().unwrap_or_else(|| ProgressBar::new(state.estimate));
                    bar.set(percent, message);
                    let text = bar.render(self.ui.unicode);
                    state.bar = Some(bar);
                    self.live(state, &text);
                } else if state.last_message.as_deref() != Some(message.as_str()) {
                    let text = self.line(Icon::Progress, &format!("{:>3}% {}", percent, message));
                    self.print(state, &text);
                    state.last_message = Some(message);
                }
            }
            LifecycleEvent::CleanupAttempted { target, success } => {
                let (icon, text) = if success {
                    (Icon::Success, format!("Removed {target}"))
                } else {
                    (Icon::Warning, format!("Could not remove {target} (continuing)"))
                };
                self.print(state, &self.line(icon, &text));
            }
            LifecycleEvent::Cancelled => {
                self.print(state, &self.line(Icon::Warning, "Cancelled. Nothing was changed."));
            }
        }
    }
}

impl<W: Write> LifecycleEventSink for TerminalEventSink<W> {
    fn on_event(&self, event: LifecycleEvent) {
        let mut state = self.state.borrow_mut();
        self.handle(&mut state, event);
    }
}
