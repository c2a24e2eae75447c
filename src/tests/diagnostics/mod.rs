// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::*;

use std::sync::{Arc, Mutex};

type Lines = Arc<Mutex<Vec<(LogLevel, String)>>>;

fn recording_sink() -> (LogSink, Lines) {
    let lines: Lines = Arc::new(Mutex::new(vec![]));
    let captured = lines.clone();
    let sink = LogSink::callback(move |level, message| {
        captured
            .lock()
            .expect("poisoned")
            .push((level, message.to_string()));
    });
    (sink, lines)
}

fn taken(lines: &Lines) -> Vec<(LogLevel, String)> {
    std::mem::take(&mut *lines.lock().expect("poisoned"))
}

fn event(kind: EventKind, path: &str, default: Value) -> DiagnosticEvent {
    DiagnosticEvent::new(kind, path, &default)
}

#[test]
fn event_rendering() {
    let e = event(EventKind::DataMissing, "a.b[0]", Value::from("x"));
    assert_eq!(e.to_string(), "event: dataMissing, path: a.b[0], default: x");

    let e = event(EventKind::TypeMismatch, "a", Value::new_array());
    assert_eq!(e.to_string(), "event: typeMismatch, path: a, default: []");

    let e = event(EventKind::TypeMismatch, "a", Value::empty_sentinel());
    assert_eq!(e.default, r#"{"__isEmpty":true}"#);
}

#[test]
fn disabled_is_a_no_op() {
    let mut d = Diagnostics::new();
    assert!(!d.is_enabled());
    d.record(&event(EventKind::DataMissing, "a", Value::Null), LogLevel::Warn);
    d.flush_logs(false);
    d.end_logging();
    assert_eq!(d.stats(), DiagnosticStats::default());
    assert!(d.lines().is_empty());
}

#[test]
fn immediate_forwarding() {
    let (sink, lines) = recording_sink();
    let mut d = Diagnostics::new();
    d.set_logger(Some(sink));
    assert!(d.is_enabled());
    assert!(!d.in_session());

    d.record(&event(EventKind::DataMissing, "a", Value::from(1)), LogLevel::Info);
    assert_eq!(
        taken(&lines),
        [(
            LogLevel::Info,
            "event: dataMissing, path: a, default: 1".to_string()
        )]
    );

    // Nothing is buffered in this mode.
    assert_eq!(d.stats().total(), 0);
    d.flush_logs(false);
    assert!(taken(&lines).is_empty());

    d.set_logger(None);
    d.record(&event(EventKind::DataMissing, "a", Value::from(1)), LogLevel::Info);
    assert!(taken(&lines).is_empty());
}

#[test]
fn session_summary_then_log() {
    let (sink, lines) = recording_sink();
    let mut d = Diagnostics::new();
    d.start_logging(Some(sink));
    assert!(d.in_session());

    d.record(&event(EventKind::DataMissing, "x", Value::from("")), LogLevel::Warn);
    d.record(&event(EventKind::TypeMismatch, "a", Value::from("")), LogLevel::Warn);
    d.record(&event(EventKind::DataMissing, "y", Value::from(0)), LogLevel::Warn);

    // Buffered until the session ends.
    assert!(taken(&lines).is_empty());
    assert_eq!(
        d.stats(),
        DiagnosticStats {
            data_missing: 2,
            type_mismatch: 1
        }
    );
    assert_eq!(d.lines().len(), 3);

    d.end_logging();
    let out = taken(&lines);
    assert_eq!(out.len(), 2);
    assert_eq!(out[0].1, "Warnings: 3, dataMissing: 2, typeMismatch: 1");
    assert_eq!(
        out[1].1,
        "event: dataMissing, path: x, default: \n\
         event: typeMismatch, path: a, default: \n\
         event: dataMissing, path: y, default: 0"
    );
    assert!(out.iter().all(|(level, _)| *level == LogLevel::Warn));

    // Ending disables diagnostics.
    assert!(!d.is_enabled());
    d.record(&event(EventKind::DataMissing, "z", Value::Null), LogLevel::Warn);
    d.end_logging();
    assert!(taken(&lines).is_empty());
}

#[test]
fn flush_keeps_the_session() {
    let (sink, lines) = recording_sink();
    let mut d = Diagnostics::new();
    d.set_level(LogLevel::Error);
    d.start_logging(Some(sink));

    d.record(&event(EventKind::TypeMismatch, "a", Value::from(1)), LogLevel::Warn);
    d.flush_logs(true);
    assert_eq!(
        taken(&lines),
        [(
            LogLevel::Error,
            "Warnings: 1, dataMissing: 0, typeMismatch: 1".to_string()
        )]
    );
    assert!(d.in_session());
    assert_eq!(d.stats().total(), 0);

    // Flushing an empty buffer emits nothing.
    d.flush_logs(false);
    assert!(taken(&lines).is_empty());

    d.record(&event(EventKind::DataMissing, "b", Value::from(1)), LogLevel::Warn);
    d.flush_logs(false);
    assert_eq!(taken(&lines).len(), 2);
}

#[test]
fn start_resets_the_session() {
    let (sink, lines) = recording_sink();
    let mut d = Diagnostics::new();
    d.start_logging(Some(sink));
    d.record(&event(EventKind::DataMissing, "a", Value::Null), LogLevel::Warn);

    let (sink2, lines2) = recording_sink();
    d.start_logging(Some(sink2));
    assert_eq!(d.stats().total(), 0);

    d.record(&event(EventKind::TypeMismatch, "b", Value::Null), LogLevel::Warn);
    d.end_logging();
    assert!(taken(&lines).is_empty());
    let out = taken(&lines2);
    assert_eq!(out[0].1, "Warnings: 1, dataMissing: 0, typeMismatch: 1");
}

#[test]
fn start_without_sink_disables() {
    let mut d = Diagnostics::new();
    d.start_logging(None);
    assert!(!d.is_enabled());
    assert!(!d.in_session());
}

#[derive(Default)]
struct WarnOnly {
    seen: Arc<Mutex<Vec<String>>>,
}

impl Logger for WarnOnly {
    fn warn(&mut self, message: &str) {
        self.seen.lock().expect("poisoned").push(message.to_string());
    }
}

#[test]
fn method_sink_dispatches_by_severity() {
    let logger = WarnOnly::default();
    let seen = logger.seen.clone();
    let mut sink = LogSink::methods(logger);

    sink.emit(LogLevel::Warn, "one");
    // Severities the logger does not implement are dropped.
    sink.emit(LogLevel::Info, "two");
    sink.emit(LogLevel::Error, "three");

    assert_eq!(*seen.lock().expect("poisoned"), ["one"]);
}

#[test]
fn log_level_names() {
    assert_eq!("WARN".parse::<LogLevel>(), Ok(LogLevel::Warn));
    assert_eq!("debug".parse::<LogLevel>(), Ok(LogLevel::Debug));
    assert_eq!(" log ".parse::<LogLevel>(), Ok(LogLevel::Log));
    assert_eq!(
        "loud".parse::<LogLevel>(),
        Err(OptionsError::UnknownLevel("loud".to_string()))
    );
}
