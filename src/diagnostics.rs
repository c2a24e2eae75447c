// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::logger::{LogLevel, LogSink};
use crate::value::Value;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Kind of diagnostic raised by an accessor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum EventKind {
    /// Nothing could be resolved at the path.
    DataMissing,
    /// A value was resolved but its type differs from the default's.
    TypeMismatch,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::DataMissing => "dataMissing",
            EventKind::TypeMismatch => "typeMismatch",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticEvent {
    pub kind: EventKind,
    pub path: String,
    pub default: String,
}

impl DiagnosticEvent {
    pub fn new(kind: EventKind, path: &str, default: &Value) -> Self {
        Self {
            kind,
            path: path.to_string(),
            default: render_default(default),
        }
    }
}

// Strings are shown without quotes; everything else as compact json.
fn render_default(value: &Value) -> String {
    match value {
        Value::String(s) => s.to_string(),
        Value::Undefined => "undefined".to_string(),
        v => v.to_string(),
    }
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "event: {}, path: {}, default: {}",
            self.kind, self.path, self.default
        )
    }
}

/// Per-session event counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticStats {
    pub data_missing: usize,
    pub type_mismatch: usize,
}

impl DiagnosticStats {
    pub fn total(&self) -> usize {
        self.data_missing + self.type_mismatch
    }

    pub fn record(&mut self, kind: EventKind) {
        match kind {
            EventKind::DataMissing => self.data_missing += 1,
            EventKind::TypeMismatch => self.type_mismatch += 1,
        }
    }

    pub fn summary(&self) -> String {
        format!(
            "Warnings: {}, dataMissing: {}, typeMismatch: {}",
            self.total(),
            self.data_missing,
            self.type_mismatch
        )
    }
}

#[derive(Debug, Default)]
struct Session {
    stats: DiagnosticStats,
    lines: Vec<String>,
}

/// Receives diagnostic events from accessors.
///
/// Three states:
/// * disabled: no sink, events are dropped.
/// * immediate: every event is sent to the sink as it happens.
/// * session: events are counted and buffered until flushed.
///
/// Each instance owns its own state, so separate sessions never interfere.
#[derive(Debug, Default)]
pub struct Diagnostics {
    sink: Option<LogSink>,
    session: Option<Session>,
    level: LogLevel,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Severity used for session summaries and log dumps.
    pub fn set_level(&mut self, level: LogLevel) {
        self.level = level;
    }

    pub fn level(&self) -> LogLevel {
        self.level
    }

    /// Forward events to `sink` as they happen. `None` disables diagnostics.
    ///
    /// Any buffered session is discarded.
    pub fn set_logger(&mut self, sink: Option<LogSink>) {
        self.sink = sink;
        self.session = None;
    }

    /// Begin a buffered session, resetting counters and buffered lines.
    /// `None` disables diagnostics.
    pub fn start_logging(&mut self, sink: Option<LogSink>) {
        self.session = sink.as_ref().map(|_| Session::default());
        self.sink = sink;
    }

    /// Flush the session and disable diagnostics.
    pub fn end_logging(&mut self) {
        self.flush_logs(false);
        self.session = None;
        self.sink = None;
    }

    /// Emit the summary line, then (unless `summary_only`) the buffered
    /// lines joined by newlines, and clear the session. The session stays
    /// active. Does nothing without a session or when nothing was recorded.
    pub fn flush_logs(&mut self, summary_only: bool) {
        let (Some(sink), Some(session)) = (self.sink.as_mut(), self.session.as_mut()) else {
            return;
        };
        if session.lines.is_empty() {
            return;
        }

        let session = std::mem::take(session);
        sink.emit(self.level, &session.stats.summary());
        if !summary_only {
            sink.emit(self.level, &session.lines.join("\n"));
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    pub fn in_session(&self) -> bool {
        self.session.is_some()
    }

    pub fn record(&mut self, event: &DiagnosticEvent, level: LogLevel) {
        match (&mut self.session, &mut self.sink) {
            (Some(session), _) => {
                session.stats.record(event.kind);
                session.lines.push(event.to_string());
            }
            (None, Some(sink)) => sink.emit(level, &event.to_string()),
            (None, None) => (),
        }
    }

    /// Counters of the current session.
    pub fn stats(&self) -> DiagnosticStats {
        self.session
            .as_ref()
            .map(|s| s.stats)
            .unwrap_or_default()
    }

    /// Lines buffered in the current session.
    pub fn lines(&self) -> &[String] {
        self.session
            .as_ref()
            .map(|s| s.lines.as_slice())
            .unwrap_or(&[])
    }
}
