//! JSON Event Sink
//!
//! Outputs lifecycle events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::json;

use crate::domain::ports::{LifecycleEvent, LifecycleEventSink};
use crate::domain::value_objects::EstimateBasis;

/// Event sink that writes one JSON object per line
pub struct JsonEventSink {
    command: &'static str,
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Sink for `command` writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

fn basis_label(basis: EstimateBasis) -> &'static str {
    match basis {
        EstimateBasis::NoChanges => "no_changes",
        EstimateBasis::ManagedDatabase { .. } => "managed_database",
        EstimateBasis::ResourceCount { .. } => "resource_count",
    }
}

impl LifecycleEventSink for JsonEventSink {
    fn on_event(&self, event: LifecycleEvent) {
        let command = self.command;
        let json = match event {
            LifecycleEvent::WorkspacePrepared { path, modules } => json!({
                "event": "workspace_prepared",
                "command": command,
                "path": path.display().to_string(),
                "modules": modules,
            }),

            LifecycleEvent::BucketGenerated { bucket, attempts } => json!({
                "event": "bucket_generated",
                "command": command,
                "bucket": bucket,
                "attempts": attempts,
            }),

            LifecycleEvent::Rendered { fingerprint } => json!({
                "event": "rendered",
                "command": command,
                "fingerprint": fingerprint,
            }),

            LifecycleEvent::StepStarted { step } => json!({
                "event": "step_start",
                "command": command,
                "step": step.name(),
            }),

            LifecycleEvent::StepFinished { step, success } => json!({
                "event": "step_complete",
                "command": command,
                "step": step.name(),
                "success": success,
            }),

            LifecycleEvent::Estimated { estimate } => json!({
                "event": "estimate",
                "command": command,
                "operation": estimate.operation.as_str(),
                "minutes": estimate.minutes,
                "basis": basis_label(estimate.basis),
                "display": estimate.to_string(),
            }),

            LifecycleEvent::Progress { percent, message } => json!({
                "event": "progress",
                "command": command,
                "percent": percent,
                "message": message,
            }),

            LifecycleEvent::CleanupAttempted { target, success } => json!({
                "event": "cleanup",
                "command": command,
                "target": target,
                "success": success,
            }),

            LifecycleEvent::Cancelled => json!({
                "event": "cancelled",
                "command": command,
            }),
        };

        self.write_event(json);
    }
}
