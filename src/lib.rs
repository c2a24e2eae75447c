// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Safe, defaulted access into nested data.
//!
//! A path such as `a.b[0].c` is normalized into keys, the keys are walked
//! through a [`Value`] without ever failing, and the resolved value is checked
//! against the type of a caller supplied default. Missing data and type
//! mismatches are reported as diagnostic events instead of errors.

#[cfg(feature = "arc")]
use std::sync::Arc as Rc;

#[cfg(not(feature = "arc"))]
use std::rc::Rc;

mod claw;
mod diagnostics;
mod logger;
mod number;
mod options;
mod path;
mod resolve;
mod retriever;
mod typing;
mod value;

pub use claw::claw;
pub use diagnostics::{DiagnosticEvent, DiagnosticStats, Diagnostics, EventKind};
pub use logger::{LogFacade, LogLevel, LogSink, Logger};
pub use number::Number;
pub use options::{OptionsError, RetrieverOptions};
pub use path::{AsPath, BracketRewrite, Path};
pub use resolve::{effective_default, resolve, AccessResult};
pub use retriever::{get, has, Retriever};
pub use typing::TypeTag;
pub use value::{Object, Value, EMPTY_SENTINEL_KEY};
