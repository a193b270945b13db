//! The Runtime API surface the generated code calls into.
//!
//! Names are configurable through [`RuntimeSymbols`]; the arity and argument
//! roles of each primitive are fixed by the emitters.

use serde::{Deserialize, Serialize};

/// Block helpers with dedicated runtime primitives.
pub const BUILTIN_BLOCK_HELPERS: [BuiltinHelper; 4] = [
    BuiltinHelper::If,
    BuiltinHelper::Unless,
    BuiltinHelper::With,
    BuiltinHelper::Each,
];

/// Prefix of the special paths (`UI.contentBlock`, ...).
pub const SPECIAL_NAMESPACE: &str = "UI";

/// A built-in block helper. These names are reserved: they never go through
/// generic lookup and cannot name a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinHelper {
    If,
    Unless,
    With,
    Each,
}

impl BuiltinHelper {
    pub fn from_name(name: &str) -> Option<Self> {
        BUILTIN_BLOCK_HELPERS
            .into_iter()
            .find(|helper| helper.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::Unless => "unless",
            Self::With => "with",
            Self::Each => "each",
        }
    }

    /// The runtime primitive called as `symbol(data, content[, else])`.
    pub fn symbol(self, symbols: &RuntimeSymbols) -> &str {
        match self {
            Self::If => &symbols.if_block,
            Self::Unless => &symbols.unless_block,
            Self::With => &symbols.with_block,
            Self::Each => &symbols.each_block,
        }
    }
}

/// Second segment of a `UI.*` path that bypasses generic lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialPath {
    /// The content block the enclosing template was invoked with.
    ContentBlock,
    /// The else block the enclosing template was invoked with.
    ElseBlock,
    /// The global dynamic-template lookup.
    Dynamic,
}

impl SpecialPath {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "contentBlock" => Some(Self::ContentBlock),
            "elseBlock" => Some(Self::ElseBlock),
            "dynamic" => Some(Self::Dynamic),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::ContentBlock => "contentBlock",
            Self::ElseBlock => "elseBlock",
            Self::Dynamic => "dynamic",
        }
    }

    /// The fixed reference emitted for this path. Block references are
    /// fields of the receiver bound in the enclosing content block.
    pub fn reference(self, symbols: &RuntimeSymbols) -> String {
        match self {
            Self::ContentBlock => format!("{}.{}", symbols.receiver, symbols.content_block),
            Self::ElseBlock => format!("{}.{}", symbols.receiver, symbols.else_block),
            Self::Dynamic => symbols.dynamic.clone(),
        }
    }
}

/// A reserved name can't be used as a template name.
pub fn is_reserved_name(name: &str) -> bool {
    BuiltinHelper::from_name(name).is_some()
}

/// Names of the runtime primitives.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeSymbols {
    /// `lookup(name, receiver)`: helpers, then data contexts.
    pub lookup: String,
    /// `lookupTemplate(name, receiver)`: also searches templates.
    pub lookup_template: String,
    /// `dot(value, "seg", ...)`: reactive field traversal.
    pub dot: String,
    /// `call(value)`: invokes `value` if it is a function.
    pub call: String,
    pub mustache: String,
    pub attr_mustache: String,
    pub data_mustache: String,
    pub make_raw: String,
    /// `kw({...})`: marks the keyword-argument bundle.
    pub kw: String,
    /// `Isolate(thunk)`: confines the thunk's reactive dependencies.
    pub isolate: String,
    /// `Var(thunk)`: reactive attribute binding.
    pub attr_var: String,
    /// `TemplateWith(dataThunk, thunk)`
    pub template_with: String,
    /// `include(component[, content[, else]])`
    pub include: String,
    pub if_block: String,
    pub unless_block: String,
    pub with_block: String,
    pub each_block: String,
    /// Receiver field holding the invocation's content block.
    pub content_block: String,
    /// Receiver field holding the invocation's else block.
    pub else_block: String,
    pub dynamic: String,
    /// Local variable bound to `this` in every content block.
    pub receiver: String,
    /// Namespace of the markup constructors (`HTML.DIV`, ...).
    pub html: String,
}

impl Default for RuntimeSymbols {
    fn default() -> Self {
        Self {
            lookup: "Blaze.lookup".into(),
            lookup_template: "Blaze.lookupTemplate".into(),
            dot: "Spacebars.dot".into(),
            call: "Spacebars.call".into(),
            mustache: "Spacebars.mustache".into(),
            attr_mustache: "Spacebars.attrMustache".into(),
            data_mustache: "Spacebars.dataMustache".into(),
            make_raw: "Spacebars.makeRaw".into(),
            kw: "Spacebars.kw".into(),
            isolate: "Blaze.Isolate".into(),
            attr_var: "Blaze.Var".into(),
            template_with: "Spacebars.TemplateWith".into(),
            include: "Spacebars.include2".into(),
            if_block: "Blaze.If".into(),
            unless_block: "Blaze.Unless".into(),
            with_block: "Spacebars.With2".into(),
            each_block: "Spacebars.Each".into(),
            content_block: "__contentBlock".into(),
            else_block: "__elseBlock".into(),
            dynamic: "Template.__dynamic".into(),
            receiver: "self".into(),
            html: "HTML".into(),
        }
    }
}
