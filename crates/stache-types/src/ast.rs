//! Tag tree types handed over by the template parser.
//!
//! The tree is produced once, consumed once by code generation and never
//! mutated. Every type here is serde-serializable so a parser living in
//! another process can hand the tree over as JSON.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::Span;

// ══════════════════════════════════════════════════════════════════════════════
// Paths
// ══════════════════════════════════════════════════════════════════════════════

/// Why a segment list is not a valid [`Path`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PathError {
    #[error("path must have at least one segment")]
    Empty,
    #[error("path `{0}` contains an empty segment")]
    EmptySegment(String),
}

/// A dotted identifier path such as `foo.bar`, never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Path(Vec<String>);

impl Path {
    /// Build a path from its segments.
    pub fn new<I, S>(segments: I) -> Result<Self, PathError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<String> = segments.into_iter().map(Into::into).collect();
        if segments.is_empty() {
            return Err(PathError::Empty);
        }
        if segments.iter().any(String::is_empty) {
            return Err(PathError::EmptySegment(segments.join(".")));
        }
        Ok(Self(segments))
    }

    /// Split `foo.bar.baz` on dots.
    pub fn parse(dotted: &str) -> Result<Self, PathError> {
        Self::new(dotted.split('.'))
    }

    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// The first segment; always present.
    pub fn head(&self) -> &str {
        &self.0[0]
    }

    /// Every segment after the first.
    pub fn tail(&self) -> &[String] {
        &self.0[1..]
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; provided for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn is_dotted(&self) -> bool {
        self.0.len() > 1
    }
}

impl TryFrom<Vec<String>> for Path {
    type Error = PathError;

    fn try_from(segments: Vec<String>) -> Result<Self, Self::Error> {
        Self::new(segments)
    }
}

impl From<Path> for Vec<String> {
    fn from(path: Path) -> Self {
        path.0
    }
}

impl FromStr for Path {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.join("."))
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Arguments
// ══════════════════════════════════════════════════════════════════════════════

/// Discriminant of an [`ArgValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgType {
    String,
    Number,
    Boolean,
    Null,
    Path,
}

/// The value of a tag argument: a literal or a path to look up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArgValue {
    String(String),
    Number(f64),
    Boolean(bool),
    Null,
    Path(Path),
}

impl ArgValue {
    pub fn arg_type(&self) -> ArgType {
        match self {
            Self::String(_) => ArgType::String,
            Self::Number(_) => ArgType::Number,
            Self::Boolean(_) => ArgType::Boolean,
            Self::Null => ArgType::Null,
            Self::Path(_) => ArgType::Path,
        }
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s:?}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
            Self::Path(p) => write!(f, "{p}"),
        }
    }
}

/// One tag argument. `keyword` is set for `name=value` arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub value: ArgValue,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
}

impl Argument {
    pub fn positional(value: ArgValue) -> Self {
        Self {
            value,
            keyword: None,
        }
    }

    pub fn string(s: impl Into<String>) -> Self {
        Self::positional(ArgValue::String(s.into()))
    }

    pub fn number(n: f64) -> Self {
        Self::positional(ArgValue::Number(n))
    }

    pub fn boolean(b: bool) -> Self {
        Self::positional(ArgValue::Boolean(b))
    }

    pub fn null() -> Self {
        Self::positional(ArgValue::Null)
    }

    pub fn path(path: Path) -> Self {
        Self::positional(ArgValue::Path(path))
    }

    /// Turn this argument into a keyword argument.
    pub fn keyword(mut self, name: impl Into<String>) -> Self {
        self.keyword = Some(name.into());
        self
    }

    pub fn arg_type(&self) -> ArgType {
        self.value.arg_type()
    }

    pub fn is_keyword(&self) -> bool {
        self.keyword.is_some()
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.keyword {
            Some(name) => write!(f, "{name}={}", self.value),
            None => write!(f, "{}", self.value),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Template Tags
// ══════════════════════════════════════════════════════════════════════════════

/// What kind of template tag this is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    /// `{{foo}}`, HTML-escaped.
    Interpolate,
    /// `{{{foo}}}`, inserted unescaped.
    InterpolateRaw,
    /// `{{> foo}}`
    Inclusion,
    /// `{{#foo}} ... {{/foo}}`
    BlockOpen,
}

/// Where in the markup a tag occurs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagPosition {
    /// Normal element content.
    #[default]
    InContent,
    /// Inside a start tag's attribute list: `<div {{attrs}}>`.
    InStartTag,
    /// Inside a quoted attribute value: `<div class="{{cls}}">`.
    InAttributeValue,
}

/// One parsed template tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateTag {
    pub kind: TagKind,
    #[serde(default)]
    pub position: TagPosition,
    pub path: Path,
    #[serde(default)]
    pub args: Vec<Argument>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub else_content: Option<Vec<Node>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl TemplateTag {
    pub fn new(kind: TagKind, path: Path) -> Self {
        Self {
            kind,
            position: TagPosition::InContent,
            path,
            args: Vec::new(),
            content: None,
            else_content: None,
            span: None,
        }
    }

    pub fn with_args(mut self, args: Vec<Argument>) -> Self {
        self.args = args;
        self
    }

    pub fn with_content(mut self, content: Vec<Node>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn with_else(mut self, else_content: Vec<Node>) -> Self {
        self.else_content = Some(else_content);
        self
    }

    pub fn at(mut self, position: TagPosition) -> Self {
        self.position = position;
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }
}

/// Renders the tag roughly as it was written, for diagnostics.
impl fmt::Display for TemplateTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (open, sigil, close) = match self.kind {
            TagKind::Interpolate => ("{{", "", "}}"),
            TagKind::InterpolateRaw => ("{{{", "", "}}}"),
            TagKind::Inclusion => ("{{", "> ", "}}"),
            TagKind::BlockOpen => ("{{", "#", "}}"),
        };
        write!(f, "{open}{sigil}{}", self.path)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        f.write_str(close)
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Content
// ══════════════════════════════════════════════════════════════════════════════

/// A node of a content tree: the body of a template or of a block tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Node {
    Text(String),
    Comment(String),
    Tag(TemplateTag),
    Element(Element),
}

/// An HTML element whose attributes or children may contain tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default)]
    pub attrs: Vec<Attribute>,
    /// Tags written directly in the start tag, e.g. `<input {{attrs}}>`.
    #[serde(default)]
    pub dynamic_attrs: Vec<TemplateTag>,
    #[serde(default)]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attrs: Vec::new(),
            dynamic_attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: Vec<Node>) -> Self {
        self.attrs.push(Attribute {
            name: name.into(),
            value,
        });
        self
    }

    pub fn dynamic_attr(mut self, tag: TemplateTag) -> Self {
        self.dynamic_attrs.push(tag);
        self
    }

    pub fn child(mut self, node: Node) -> Self {
        self.children.push(node);
        self
    }
}

/// A static attribute; its value is text interleaved with tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: String,
    #[serde(default)]
    pub value: Vec<Node>,
}
