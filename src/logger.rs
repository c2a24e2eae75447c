// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::options::OptionsError;

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

/// Severity used when an event is handed to a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Log,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Log => "log",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = OptionsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "log" => Ok(LogLevel::Log),
            _ => Err(OptionsError::UnknownLevel(s.to_string())),
        }
    }
}

/// A logger exposing one method per severity.
///
/// Every method defaults to doing nothing, so an implementation only
/// overrides the severities it cares about. Messages sent to a severity that
/// is not overridden are dropped.
pub trait Logger {
    fn error(&mut self, _message: &str) {}
    fn warn(&mut self, _message: &str) {}
    fn info(&mut self, _message: &str) {}
    fn debug(&mut self, _message: &str) {}
    fn log(&mut self, _message: &str) {}
}

/// Forwards to the `log` crate under the `retriever` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogFacade;

impl Logger for LogFacade {
    fn error(&mut self, message: &str) {
        log::error!(target: "retriever", "{message}");
    }

    fn warn(&mut self, message: &str) {
        log::warn!(target: "retriever", "{message}");
    }

    fn info(&mut self, message: &str) {
        log::info!(target: "retriever", "{message}");
    }

    fn debug(&mut self, message: &str) {
        log::debug!(target: "retriever", "{message}");
    }

    fn log(&mut self, message: &str) {
        log::info!(target: "retriever", "{message}");
    }
}

type Callback = Box<dyn FnMut(LogLevel, &str) + Send>;

/// Where diagnostic output goes.
pub enum LogSink {
    /// Dispatch to the method matching the severity.
    Methods(Box<dyn Logger + Send>),

    /// Hand every message to one function.
    Callback(Callback),
}

impl LogSink {
    pub fn methods(logger: impl Logger + Send + 'static) -> Self {
        LogSink::Methods(Box::new(logger))
    }

    pub fn callback(f: impl FnMut(LogLevel, &str) + Send + 'static) -> Self {
        LogSink::Callback(Box::new(f))
    }

    /// A sink backed by the `log` crate.
    pub fn facade() -> Self {
        Self::methods(LogFacade)
    }

    pub fn emit(&mut self, level: LogLevel, message: &str) {
        match self {
            LogSink::Methods(logger) => match level {
                LogLevel::Error => logger.error(message),
                LogLevel::Warn => logger.warn(message),
                LogLevel::Info => logger.info(message),
                LogLevel::Debug => logger.debug(message),
                LogLevel::Log => logger.log(message),
            },
            LogSink::Callback(f) => f(level, message),
        }
    }
}

impl fmt::Debug for LogSink {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LogSink::Methods(_) => f.write_str("LogSink::Methods"),
            LogSink::Callback(_) => f.write_str("LogSink::Callback"),
        }
    }
}
