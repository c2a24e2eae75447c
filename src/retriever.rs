// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::claw::claw;
use crate::diagnostics::{DiagnosticEvent, Diagnostics, EventKind};
use crate::logger::{LogLevel, LogSink};
use crate::options::RetrieverOptions;
use crate::path::{describe, AsPath, BracketRewrite};
use crate::resolve::{exists, resolve, AccessResult};
use crate::value::Value;

/// Defaulted accessors plus the diagnostics they report to.
///
/// Accessors never fail. `get` and `has` are silent; `need` reports
/// missing data and type mismatches to the configured sink.
#[derive(Debug, Default)]
pub struct Retriever {
    options: RetrieverOptions,
    diagnostics: Diagnostics,
}

impl Retriever {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: RetrieverOptions) -> Self {
        let mut diagnostics = Diagnostics::new();
        diagnostics.set_level(options.level);
        Self {
            options,
            diagnostics,
        }
    }

    pub fn options(&self) -> &RetrieverOptions {
        &self.options
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Forward every event to `sink` immediately. `None` disables diagnostics.
    pub fn set_logger(&mut self, sink: Option<LogSink>) {
        self.diagnostics.set_logger(sink);
    }

    /// Start a buffered session on `sink`. `None` disables diagnostics.
    pub fn start_logging(&mut self, sink: Option<LogSink>) {
        self.diagnostics.start_logging(sink);
    }

    /// Emit the session summary and log, then disable diagnostics.
    pub fn end_logging(&mut self) {
        self.diagnostics.end_logging();
    }

    /// Emit the session summary (and the log unless `summary_only`) and
    /// start counting afresh.
    pub fn flush_logs(&mut self, summary_only: bool) {
        self.diagnostics.flush_logs(summary_only);
    }

    /// Value at `path`, or the effective default. Never reports.
    pub fn get(&self, root: &Value, path: impl AsPath, default: Option<&Value>) -> Value {
        let path = path.to_path(self.options.brackets);
        resolve(claw(root, &path), default).value
    }

    /// Like [`Retriever::get`], reporting events when `warn` is set.
    pub fn get_with(
        &mut self,
        root: &Value,
        path: impl AsPath,
        default: Option<&Value>,
        warn: bool,
    ) -> Value {
        self.access(root, path, default, warn).value
    }

    /// Value at `path`, or the effective default. Reports events.
    pub fn need(&mut self, root: &Value, path: impl AsPath, default: Option<&Value>) -> Value {
        self.access(root, path, default, true).value
    }

    /// Like [`Retriever::need`] with an explicit severity for this call.
    ///
    /// The severity only applies to immediate sinks. Inside a session, lines
    /// are buffered and flushed at the retriever's configured level.
    pub fn need_at(
        &mut self,
        root: &Value,
        path: impl AsPath,
        default: Option<&Value>,
        level: LogLevel,
    ) -> Value {
        self.access_at(root, path, default, Some(level)).value
    }

    /// Full outcome of one lookup.
    pub fn access(
        &mut self,
        root: &Value,
        path: impl AsPath,
        default: Option<&Value>,
        warn: bool,
    ) -> AccessResult {
        let level = warn.then_some(self.options.level);
        self.access_at(root, path, default, level)
    }

    fn access_at(
        &mut self,
        root: &Value,
        path: impl AsPath,
        default: Option<&Value>,
        level: Option<LogLevel>,
    ) -> AccessResult {
        let keys = path.to_path(self.options.brackets);
        let result = resolve(claw(root, &keys), default);

        if let (Some(kind), Some(level)) = (result.event, level) {
            if self.diagnostics.is_enabled() {
                let event =
                    DiagnosticEvent::new(kind, &describe(&path, &keys), &result.value);
                self.diagnostics.record(&event, level);
            }
        }
        result
    }

    /// Whether `path` resolves to something other than `null`. Never reports.
    pub fn has(&self, root: &Value, path: impl AsPath) -> bool {
        let path = path.to_path(self.options.brackets);
        exists(claw(root, &path))
    }

    /// Like [`Retriever::has`], reporting missing data when `warn` is set.
    pub fn has_with(&mut self, root: &Value, path: impl AsPath, warn: bool) -> bool {
        let keys = path.to_path(self.options.brackets);
        let found = exists(claw(root, &keys));

        if !found && warn && self.diagnostics.is_enabled() {
            let event = DiagnosticEvent::new(
                EventKind::DataMissing,
                &describe(&path, &keys),
                &Value::Bool(false),
            );
            self.diagnostics.record(&event, self.options.level);
        }
        found
    }
}

/// Value at `path` in `root`, or the effective default.
pub fn get(root: &Value, path: impl AsPath, default: Option<&Value>) -> Value {
    let path = path.to_path(BracketRewrite::All);
    resolve(claw(root, &path), default).value
}

/// Whether `path` resolves to something other than `null` in `root`.
pub fn has(root: &Value, path: impl AsPath) -> bool {
    let path = path.to_path(BracketRewrite::All);
    exists(claw(root, &path))
}
