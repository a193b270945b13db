//! Expression builder.
//!
//! All target-language text is assembled here. The resolver, the argument
//! encoder and the tag emitter only ever combine [`Code`] values through these
//! functions, so the output syntax can change without touching them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::literal;

/// A fragment of emitted JavaScript.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Code(String);

impl Code {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<Code> for String {
    fn from(code: Code) -> Self {
        code.0
    }
}

/// Syntax used for deferred expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Flavor {
    /// `function () { return x; }`
    #[default]
    Es5,
    /// `() => x`
    Arrow,
}

fn join(items: impl IntoIterator<Item = Code>) -> String {
    items
        .into_iter()
        .map(Code::into_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// `callee(a, b, ...)`
pub fn call(callee: impl fmt::Display, args: impl IntoIterator<Item = Code>) -> Code {
    Code(format!("{callee}({})", join(args)))
}

/// `[a, b, ...]`
pub fn array(items: impl IntoIterator<Item = Code>) -> Code {
    Code(format!("[{}]", join(items)))
}

/// `{key: value, ...}`, keys in the given order.
pub fn object_literal<'k>(entries: impl IntoIterator<Item = (&'k str, Code)>) -> Code {
    let parts: Vec<String> = entries
        .into_iter()
        .map(|(key, value)| format!("{}: {value}", literal::object_key(key)))
        .collect();
    Code(format!("{{{}}}", parts.join(", ")))
}

/// A zero-argument closure returning `body`; evaluation is deferred until
/// the runtime invokes it.
pub fn thunk(flavor: Flavor, body: Code) -> Code {
    match flavor {
        Flavor::Es5 => Code(format!("function () {{ return {body}; }}")),
        // An arrow body starting with `{` would parse as a block.
        Flavor::Arrow if body.0.starts_with('{') => Code(format!("() => ({body})")),
        Flavor::Arrow => Code(format!("() => {body}")),
    }
}

/// A content block. Always a `function` so the runtime can bind `this`.
pub fn block_function(receiver: &str, body: Code) -> Code {
    Code(format!(
        "function () {{ var {receiver} = this; return {body}; }}"
    ))
}

/// `(expr)`
pub fn parenthesize(code: Code) -> Code {
    Code(format!("({code})"))
}
