// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::value::Value;

use core::fmt;

use serde::{Deserialize, Serialize};

/// Structural type of a value.
///
/// Arrays are never reported as `Object`, and `Null` is never reported as
/// `Object`. Two values "match" when their tags are equal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeTag {
    Array,
    Null,
    Object,
    String,
    Number,
    Boolean,
    Undefined,
}

impl TypeTag {
    pub fn of(value: &Value) -> TypeTag {
        match value {
            Value::Array(_) => TypeTag::Array,
            Value::Null => TypeTag::Null,
            Value::Object(_) => TypeTag::Object,
            Value::String(_) => TypeTag::String,
            Value::Number(_) => TypeTag::Number,
            Value::Bool(_) => TypeTag::Boolean,
            Value::Undefined => TypeTag::Undefined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TypeTag::Array => "array",
            TypeTag::Null => "null",
            TypeTag::Object => "object",
            TypeTag::String => "string",
            TypeTag::Number => "number",
            TypeTag::Boolean => "boolean",
            TypeTag::Undefined => "undefined",
        }
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Value {
    pub fn type_tag(&self) -> TypeTag {
        TypeTag::of(self)
    }
}
