// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::sync::{Arc, Mutex};

use anyhow::Result;
use retriever::*;

#[derive(Clone, Default)]
struct MockLogger {
    warnings: Arc<Mutex<Vec<String>>>,
    infos: Arc<Mutex<Vec<String>>>,
}

impl MockLogger {
    fn warnings(&self) -> Vec<String> {
        self.warnings.lock().expect("poisoned").clone()
    }

    fn infos(&self) -> Vec<String> {
        self.infos.lock().expect("poisoned").clone()
    }
}

impl Logger for MockLogger {
    fn warn(&mut self, message: &str) {
        self.warnings.lock().expect("poisoned").push(message.to_string());
    }

    fn info(&mut self, message: &str) {
        self.infos.lock().expect("poisoned").push(message.to_string());
    }
}

fn basic_object() -> Result<Value> {
    Value::from_json_str(r#"{ "a": { "b": { "c": 0, "d": null, "f": false } } }"#)
}

#[derive(Clone, Copy)]
enum Accessor {
    Need,
    Get,
    Has,
}

fn call(r: &mut Retriever, accessor: Accessor, root: &Value, lookup: &str) {
    match accessor {
        Accessor::Need => {
            r.need(root, lookup, Some(&Value::from("")));
        }
        Accessor::Get => {
            r.get_with(root, lookup, Some(&Value::from("")), true);
        }
        Accessor::Has => {
            r.has_with(root, lookup, true);
        }
    }
}

#[test]
fn session_logs_summary_then_events() -> Result<()> {
    let root = basic_object()?;
    let scenarios = [
        ("missingKey", EventKind::DataMissing),
        ("a", EventKind::TypeMismatch),
    ];

    for accessor in [Accessor::Need, Accessor::Get, Accessor::Has] {
        for (lookup, kind) in scenarios {
            // has() only ever reports missing data.
            if matches!(accessor, Accessor::Has) && kind == EventKind::TypeMismatch {
                continue;
            }

            let logger = MockLogger::default();
            let mut r = Retriever::new();
            r.start_logging(Some(LogSink::methods(logger.clone())));
            call(&mut r, accessor, &root, lookup);
            r.end_logging();

            let warnings = logger.warnings();
            assert_eq!(warnings.len(), 2);
            assert!(warnings[0].contains(&format!("{kind}: 1")));
            assert!(warnings[1].contains(kind.as_str()));
        }
    }
    Ok(())
}

#[test]
fn silent_accessors_do_not_log() -> Result<()> {
    let root = basic_object()?;
    let logger = MockLogger::default();
    let mut r = Retriever::new();
    r.start_logging(Some(LogSink::methods(logger.clone())));

    r.get(&root, "missingKey", None);
    r.get_with(&root, "missingKey", None, false);
    r.has(&root, "missingKey");
    r.has_with(&root, "missingKey", false);
    assert_eq!(r.diagnostics().stats().total(), 0);

    r.end_logging();
    assert!(logger.warnings().is_empty());
    Ok(())
}

#[test]
fn no_logger_is_valid() -> Result<()> {
    let root = basic_object()?;
    let mut r = Retriever::new();
    assert_eq!(r.need(&root, "missingKey", None), Value::from(""));
    assert!(!r.has_with(&root, "missingKey", true));
    r.flush_logs(false);
    r.end_logging();

    r.start_logging(None);
    assert_eq!(r.need(&root, "a", Some(&Value::from(1))), Value::from(1));
    r.end_logging();
    Ok(())
}

#[test]
fn immediate_logger_receives_each_event() -> Result<()> {
    let root = basic_object()?;
    let logger = MockLogger::default();
    let mut r = Retriever::new();
    r.set_logger(Some(LogSink::methods(logger.clone())));

    r.need(&root, "a.b.x", Some(&Value::from(5)));
    r.need(&root, "a.b.c", Some(&Value::from("s")));
    r.need(&root, "a.b.c", Some(&Value::from(1)));
    assert!(!r.has_with(&root, "a.b.d", true));

    assert_eq!(
        logger.warnings(),
        [
            "event: dataMissing, path: a.b.x, default: 5",
            "event: typeMismatch, path: a.b.c, default: s",
            "event: dataMissing, path: a.b.d, default: false",
        ]
    );
    Ok(())
}

#[test]
fn severity_follows_options_and_overrides() -> Result<()> {
    let root = basic_object()?;
    let logger = MockLogger::default();
    let mut r = Retriever::with_options(RetrieverOptions {
        level: LogLevel::Info,
        ..Default::default()
    });
    r.set_logger(Some(LogSink::methods(logger.clone())));

    r.need(&root, "x", None);
    r.need_at(&root, "y", None, LogLevel::Warn);
    // The mock has no debug method, so this one is dropped.
    r.need_at(&root, "z", None, LogLevel::Debug);

    assert_eq!(logger.infos(), ["event: dataMissing, path: x, default: "]);
    assert_eq!(logger.warnings(), ["event: dataMissing, path: y, default: "]);
    Ok(())
}

#[test]
fn callback_sink() -> Result<()> {
    let root = basic_object()?;
    let seen = Arc::new(Mutex::new(vec![]));
    let captured = seen.clone();

    let mut r = Retriever::new();
    r.start_logging(Some(LogSink::callback(move |level, message| {
        captured
            .lock()
            .expect("poisoned")
            .push(format!("{level}: {message}"));
    })));
    r.need(&root, "a.b.d", Some(&Value::new_object()));
    r.flush_logs(true);

    assert_eq!(
        *seen.lock().expect("poisoned"),
        ["warn: Warnings: 1, dataMissing: 0, typeMismatch: 1"]
    );
    Ok(())
}

#[test]
fn separate_retrievers_keep_separate_sessions() -> Result<()> {
    let root = basic_object()?;
    let first_logger = MockLogger::default();
    let second_logger = MockLogger::default();

    let mut first = Retriever::new();
    let mut second = Retriever::new();
    first.start_logging(Some(LogSink::methods(first_logger.clone())));
    first.need(&root, "x", None);
    second.start_logging(Some(LogSink::methods(second_logger.clone())));
    second.need(&root, "a", Some(&Value::from(1)));
    first.need(&root, "y", None);

    first.end_logging();
    second.end_logging();

    assert_eq!(
        first_logger.warnings()[0],
        "Warnings: 2, dataMissing: 2, typeMismatch: 0"
    );
    assert_eq!(
        second_logger.warnings()[0],
        "Warnings: 1, dataMissing: 0, typeMismatch: 1"
    );
    Ok(())
}

#[test]
fn log_facade() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let root = basic_object()?;
    let mut r = Retriever::new();
    r.start_logging(Some(LogSink::facade()));
    assert_eq!(r.need(&root, "a.b.missing", Some(&Value::from(2))), Value::from(2));
    assert_eq!(r.diagnostics().stats().data_missing, 1);
    r.end_logging();
    assert!(!r.diagnostics().is_enabled());
    Ok(())
}

#[test]
fn events_keep_the_callers_expression() -> Result<()> {
    let root = Value::from_json_str(r#"{ "a": { "b": [ { "c": 1 } ] } }"#)?;
    let logger = MockLogger::default();
    let mut r = Retriever::new();
    r.set_logger(Some(LogSink::methods(logger.clone())));

    r.need(&root, "a.b[0].x", Some(&Value::from(0)));
    r.need(&root, "a.b[0].x".to_string(), Some(&Value::from(0)));
    r.need(&root, ["a", "b", "0", "x"], Some(&Value::from(0)));
    r.need(&root, &Path::parse("a.b[0].x"), Some(&Value::from(0)));
    assert!(!r.has_with(&root, "a.b[1]", true));

    assert_eq!(
        logger.warnings(),
        [
            "event: dataMissing, path: a.b[0].x, default: 0",
            "event: dataMissing, path: a.b[0].x, default: 0",
            "event: dataMissing, path: a.b.0.x, default: 0",
            "event: dataMissing, path: a.b.0.x, default: 0",
            "event: dataMissing, path: a.b[1], default: false",
        ]
    );
    Ok(())
}

#[test]
fn session_lines_use_the_configured_level() -> Result<()> {
    let root = basic_object()?;
    let seen = Arc::new(Mutex::new(vec![]));
    let captured = seen.clone();

    let mut r = Retriever::with_options(RetrieverOptions {
        level: LogLevel::Info,
        ..Default::default()
    });
    r.start_logging(Some(LogSink::callback(move |level, _| {
        captured.lock().expect("poisoned").push(level);
    })));
    r.need_at(&root, "x", None, LogLevel::Error);
    r.end_logging();

    // Per call severities do not survive buffering.
    assert_eq!(*seen.lock().expect("poisoned"), [LogLevel::Info, LogLevel::Info]);
    Ok(())
}
