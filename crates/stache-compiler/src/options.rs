//! Compile options, loadable from JSON.

use serde::{Deserialize, Serialize};
use stache_codegen::{CodegenOptions, TemplateKind};
use stache_types::{ErrorCode, Result, StacheError};

/// Options for one compile call.
///
/// ```json
/// { "kind": "template", "flavor": "arrow", "symbols": { "lookup": "R.lookup" } }
/// ```
///
/// Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompileOptions {
    pub kind: TemplateKind,
    #[serde(flatten)]
    pub codegen: CodegenOptions,
}

impl CompileOptions {
    /// Options for a `<template>` render function.
    pub fn template() -> Self {
        Self {
            kind: TemplateKind::Template,
            ..Self::default()
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| {
            StacheError::new(
                "<options>",
                ErrorCode::INVALID_OPTIONS,
                format!("Invalid compile options: {e}"),
                json,
            )
        })
    }
}
