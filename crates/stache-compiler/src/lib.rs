//! Stache compiler: orchestrates one code generation pass.
//!
//! ```text
//! Parser (external) → tag tree JSON → stache-codegen → JavaScript
//! ```
//!
//! The pass is fail-fast: the first error aborts it and is reported as a
//! structured [`StacheError`], located with the span the parser attached to
//! the offending tag when there is one.

mod diagnostic;
mod options;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use stache_codegen::CodeGen;
use stache_types::ast::Node;
use stache_types::{ErrorCode, Result, StacheError};
use tracing::{debug, warn};

pub use diagnostic::to_stache_error;
pub use options::CompileOptions;
pub use stache_codegen::is_reserved_name;

/// Result of a compile call, serializable for tooling.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompileResult {
    pub success: bool,
    /// Generated JavaScript (`None` on failure).
    pub code: Option<String>,
    /// Hex SHA-256 of `code`, for build caches.
    pub code_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<StacheError>,
}

/// Compile a parsed content tree to JavaScript.
pub fn compile(content: &[Node], name: &str, options: &CompileOptions) -> Result<String> {
    debug!(template = name, kind = ?options.kind, "compiling template");
    CodeGen::new(&options.codegen)
        .code_gen_template(content, options.kind)
        .map(|code| code.into_string())
        .map_err(|err| {
            warn!(template = name, error = %err, "code generation failed");
            to_stache_error(name, &err)
        })
}

/// Parse a JSON content tree and compile it.
pub fn compile_source(json: &str, name: &str, options: &CompileOptions) -> Result<String> {
    let content = parse_tree(json, name)?;
    compile(&content, name, options)
}

/// Compile a JSON content tree, reporting success or failure as a value.
pub fn compile_to_result(json: &str, name: &str, options: &CompileOptions) -> CompileResult {
    match compile_source(json, name, options) {
        Ok(code) => CompileResult {
            success: true,
            code_hash: Some(code_hash(&code)),
            code: Some(code),
            error: None,
        },
        Err(error) => CompileResult {
            success: false,
            code: None,
            code_hash: None,
            error: Some(error),
        },
    }
}

/// Decode the content tree handed over by the parser.
pub fn parse_tree(json: &str, name: &str) -> Result<Vec<Node>> {
    serde_json::from_str(json).map_err(|e| {
        StacheError::new(
            name,
            ErrorCode::INVALID_INPUT,
            format!("Invalid template tree: {e}"),
            snippet(json, e.line(), e.column()),
        )
    })
}

/// Hex-encoded SHA-256 of the generated code.
pub fn code_hash(code: &str) -> String {
    Sha256::digest(code.as_bytes())
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// The JSON text around a decode error, for the diagnostic payload.
fn snippet(json: &str, line: usize, column: usize) -> String {
    let Some(text) = json.lines().nth(line.saturating_sub(1)) else {
        return String::new();
    };
    let start = column.saturating_sub(20);
    text.chars().skip(start).take(40).collect()
}
