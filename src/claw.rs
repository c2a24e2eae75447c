// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::path::Path;
use crate::value::{array_index, Value};

/// Walk `root` along `path`, one key at a time.
///
/// Returns `None` as soon as a hop cannot be made: the current value is not an
/// object or array, the key is not present, an array key is not an in-range
/// canonical decimal index (no sign, no leading zeros), or the child is
/// `Undefined`. Remaining keys are not visited. An empty path resolves to
/// `root` itself.
///
/// A slot holding `Undefined` is reported exactly like a missing key. Both end
/// up classified as `undefined`, which the default policy treats as missing
/// data, so callers never need to tell the two apart.
pub fn claw<'a>(root: &'a Value, path: &Path) -> Option<&'a Value> {
    let mut current = match root {
        Value::Undefined => return None,
        v => v,
    };

    for key in path.iter() {
        let child = match current {
            Value::Object(o) => o.get(key),
            Value::Array(a) => array_index(key).and_then(|idx| a.get(idx)),
            _ => None,
        };
        current = match child {
            Some(Value::Undefined) | None => return None,
            Some(v) => v,
        };
    }

    Some(current)
}
