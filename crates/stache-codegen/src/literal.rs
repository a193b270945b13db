//! Literal encoder: primitive values and property names as JavaScript text.

use crate::emit::Code;
use crate::error::{CodegenError, CodegenResult};

/// Largest integer a JS number represents exactly (2^53).
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

const RESERVED_WORDS: &[&str] = &[
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "implements", "import", "in", "instanceof", "interface", "let", "new", "null", "package",
    "private", "protected", "public", "return", "static", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// A double-quoted string literal.
///
/// JSON escaping plus U+2028/U+2029, which JSON allows raw but older
/// JavaScript engines treat as line terminators.
pub fn string(s: &str) -> Code {
    let json = serde_json::Value::String(s.to_owned()).to_string();
    Code::new(json.replace('\u{2028}', "\\u2028").replace('\u{2029}', "\\u2029"))
}

/// A numeric literal. Integral values print without a fraction.
pub fn number(n: f64) -> CodegenResult<Code> {
    if !n.is_finite() {
        return Err(CodegenError::NonFiniteNumber { value: n });
    }
    if n.fract() == 0.0 && n.abs() <= MAX_SAFE_INTEGER {
        return Ok(Code::new((n as i64).to_string()));
    }
    serde_json::Number::from_f64(n)
        .map(|num| Code::new(num.to_string()))
        .ok_or(CodegenError::NonFiniteNumber { value: n })
}

pub fn boolean(b: bool) -> Code {
    Code::new(if b { "true" } else { "false" })
}

pub fn null() -> Code {
    Code::new("null")
}

/// Whether `name` can be written as a bare property key.
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first.is_ascii_alphabetic() || first == '_' || first == '$')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// An object literal key: bare when possible, quoted otherwise.
pub fn object_key(name: &str) -> String {
    if is_identifier(name) && !RESERVED_WORDS.contains(&name) {
        name.to_owned()
    } else {
        string(name).into_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_escaping() {
        assert_eq!(string("name").as_str(), r#""name""#);
        assert_eq!(string("a\"b\n").as_str(), r#""a\"b\n""#);
        assert_eq!(string("x\u{2028}y").as_str(), r#""x\u2028y""#);
        assert_eq!(string("</script>").as_str(), r#""</script>""#);
    }

    #[test]
    fn test_numbers() {
        assert_eq!(number(1.0).unwrap().as_str(), "1");
        assert_eq!(number(-3.0).unwrap().as_str(), "-3");
        assert_eq!(number(-0.0).unwrap().as_str(), "0");
        assert_eq!(number(2.5).unwrap().as_str(), "2.5");
        assert!(matches!(
            number(f64::NAN),
            Err(CodegenError::NonFiniteNumber { .. })
        ));
        assert!(number(f64::INFINITY).is_err());
    }

    #[test]
    fn test_object_keys() {
        assert_eq!(object_key("title"), "title");
        assert_eq!(object_key("$el"), "$el");
        assert_eq!(object_key("data-id"), r#""data-id""#);
        assert_eq!(object_key("9lives"), r#""9lives""#);
        assert_eq!(object_key("class"), r#""class""#);
        assert_eq!(object_key(""), r#""""#);
    }
}
