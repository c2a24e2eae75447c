// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::borrow::Cow;
use std::mem;

use core::fmt;

use serde::{Deserialize, Serialize};

/// How bracketed array indices in a path expression are spliced into keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BracketRewrite {
    /// Every `[N]` group becomes its own key.
    #[default]
    All,

    /// Only the first `[N]` group in the expression is spliced. Later groups
    /// stay embedded in their key, which usually makes the lookup miss.
    FirstOnly,
}

/// An ordered sequence of access keys.
///
/// Keys are plain strings; a key made of decimal digits also addresses an
/// array element.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Path {
    keys: Vec<String>,
}

impl Path {
    pub fn new(keys: Vec<String>) -> Self {
        Self { keys }
    }

    /// Normalize a dotted/bracketed expression, splicing every index group.
    pub fn parse(expr: &str) -> Self {
        Self::parse_with(expr, BracketRewrite::All)
    }

    /// Normalize a dotted/bracketed expression.
    ///
    /// The expression is split on `.`. Within a segment, `[N]` (N a
    /// non-negative decimal integer) ends the current key and starts a new
    /// one holding `N`, so `a.b[0].c` becomes `a`, `b`, `0`, `c`. Any other
    /// bracket content is kept verbatim. Empty segments are kept as empty keys,
    /// except that an index group opening the expression does not produce a
    /// leading empty key.
    pub fn parse_with(expr: &str, rewrite: BracketRewrite) -> Self {
        let mut budget = match rewrite {
            BracketRewrite::All => usize::MAX,
            BracketRewrite::FirstOnly => 1,
        };
        let mut keys = vec![];
        for segment in expr.split('.') {
            split_segment(segment, &mut budget, &mut keys);
        }
        Self { keys }
    }

    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keys.iter().map(String::as_str)
    }
}

fn split_segment(segment: &str, budget: &mut usize, keys: &mut Vec<String>) {
    let mut current = String::new();
    let mut rest = segment;

    while *budget > 0 {
        let Some(open) = rest.find('[') else {
            break;
        };
        let after = &rest[open + 1..];
        let digits = after.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 && after.as_bytes().get(digits) == Some(&b']') {
            current.push_str(&rest[..open]);
            if !(keys.is_empty() && current.is_empty()) {
                keys.push(mem::take(&mut current));
            }
            current.push_str(&after[..digits]);
            *budget -= 1;
            rest = &after[digits + 1..];
        } else {
            current.push_str(&rest[..=open]);
            rest = after;
        }
    }

    current.push_str(rest);
    keys.push(current);
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.keys.join("."))
    }
}

impl From<Vec<String>> for Path {
    fn from(keys: Vec<String>) -> Self {
        Self::new(keys)
    }
}

impl From<&str> for Path {
    fn from(expr: &str) -> Self {
        Self::parse(expr)
    }
}

/// Anything that can name a location: an expression string or a key sequence.
///
/// Key sequences pass through unchanged; strings are normalized.
pub trait AsPath {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path>;

    /// The expression as the caller wrote it, for string inputs.
    fn expr(&self) -> Option<&str> {
        None
    }
}

/// How a location is shown in diagnostics: the caller's own expression when
/// there is one, otherwise the keys joined by `.`.
pub(crate) fn describe(path: &impl AsPath, keys: &Path) -> String {
    match path.expr() {
        Some(expr) => expr.to_string(),
        None => keys.to_string(),
    }
}

impl<T: AsPath + ?Sized> AsPath for &T {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path> {
        (**self).to_path(rewrite)
    }

    fn expr(&self) -> Option<&str> {
        (**self).expr()
    }
}

impl AsPath for Path {
    fn to_path(&self, _rewrite: BracketRewrite) -> Cow<'_, Path> {
        Cow::Borrowed(self)
    }
}

impl AsPath for str {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path> {
        Cow::Owned(Path::parse_with(self, rewrite))
    }

    fn expr(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsPath for String {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path> {
        self.as_str().to_path(rewrite)
    }

    fn expr(&self) -> Option<&str> {
        Some(self)
    }
}

impl AsPath for [&str] {
    fn to_path(&self, _rewrite: BracketRewrite) -> Cow<'_, Path> {
        Cow::Owned(Path::new(self.iter().map(|k| k.to_string()).collect()))
    }
}

impl AsPath for [String] {
    fn to_path(&self, _rewrite: BracketRewrite) -> Cow<'_, Path> {
        Cow::Owned(Path::new(self.to_vec()))
    }
}

impl<const N: usize> AsPath for [&str; N] {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path> {
        self.as_slice().to_path(rewrite)
    }
}

impl AsPath for Vec<&str> {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path> {
        self.as_slice().to_path(rewrite)
    }
}

impl AsPath for Vec<String> {
    fn to_path(&self, rewrite: BracketRewrite) -> Cow<'_, Path> {
        self.as_slice().to_path(rewrite)
    }
}
