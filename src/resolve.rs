// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::diagnostics::EventKind;
use crate::typing::TypeTag;
use crate::value::Value;

use serde::Serialize;

/// Outcome of a single accessor call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessResult {
    pub value: Value,
    pub type_tag: TypeTag,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<EventKind>,
}

/// The default that is actually returned when substitution happens.
///
/// An omitted (or `Undefined`) default becomes the empty string. An object
/// default without own fields becomes `{"__isEmpty": true}`; inherited fields
/// do not count.
pub fn effective_default(default: Option<&Value>) -> Value {
    match default {
        None | Some(Value::Undefined) => Value::from(""),
        Some(Value::Object(o)) if o.is_empty() => Value::empty_sentinel(),
        Some(v) => v.clone(),
    }
}

fn effective_default_tag(default: Option<&Value>) -> TypeTag {
    match default {
        None | Some(Value::Undefined) => TypeTag::String,
        Some(v) => v.type_tag(),
    }
}

/// Decide the final value for a traversal result.
///
/// `raw` is `None` when traversal found nothing. A present value is returned
/// as is when its tag equals the effective default's tag; otherwise the
/// effective default is returned with `TypeMismatch`. An absent (or
/// `Undefined`) value yields the effective default with `DataMissing`.
///
/// `Null` is an ordinary present value tagged `null`: it only matches a `null`
/// default and is a type mismatch against anything else.
pub fn resolve(raw: Option<&Value>, default: Option<&Value>) -> AccessResult {
    let default_tag = effective_default_tag(default);

    match raw {
        Some(Value::Undefined) | None => AccessResult {
            value: effective_default(default),
            type_tag: default_tag,
            event: Some(EventKind::DataMissing),
        },
        Some(v) if v.type_tag() == default_tag => AccessResult {
            value: v.clone(),
            type_tag: default_tag,
            event: None,
        },
        Some(_) => AccessResult {
            value: effective_default(default),
            type_tag: default_tag,
            event: Some(EventKind::TypeMismatch),
        },
    }
}

/// Whether a traversal result counts as existing: present and not `null`.
pub fn exists(raw: Option<&Value>) -> bool {
    !matches!(raw, None | Some(Value::Null) | Some(Value::Undefined))
}
