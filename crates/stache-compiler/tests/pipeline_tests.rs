//! End-to-end pipeline tests.
//!
//! Tests verify the full pass: tag tree JSON → decode → codegen → JavaScript,
//! plus structured diagnostics for every failure class.

use stache_compiler::{
    compile, compile_source, compile_to_result, is_reserved_name, CompileOptions, CompileResult,
};
use stache_types::ast::{Node, Path, TagKind, TemplateTag};
use stache_types::{ErrorCategory, ErrorCode, Span};

// ══════════════════════════════════════════════════════════════════════════════
// Canonical trees
// ══════════════════════════════════════════════════════════════════════════════

/// `<h1>{{title}}</h1>{{#each items}}{{> row}}{{else}}Empty{{/each}}`
const LIST: &str = r#"[
  {"type": "element", "value": {
    "name": "h1",
    "children": [{"type": "tag", "value": {"kind": "interpolate", "path": ["title"]}}]
  }},
  {"type": "tag", "value": {
    "kind": "block_open",
    "path": ["each"],
    "args": [{"value": {"path": ["items"]}}],
    "content": [{"type": "tag", "value": {"kind": "inclusion", "path": ["row"]}}],
    "else_content": [{"type": "text", "value": "Empty"}]
  }}
]"#;

const LIST_JS: &str = concat!(
    r#"(function () { var self = this; return [HTML.H1(Blaze.Isolate(function () { return Spacebars.mustache(Blaze.lookup("title", self)); })), "#,
    r#"Spacebars.Each(function () { return Spacebars.call(Blaze.lookup("items", self)); }, "#,
    r#"function () { var self = this; return Spacebars.include2(Blaze.lookupTemplate("row", self)); }, "#,
    r#"function () { var self = this; return "Empty"; })]; })"#,
);

/// `<p>{{#if}}x{{/if}}</p>` with the parser's span on the `if` tag.
const MISSING_ARG: &str = r#"[
  {"type": "element", "value": {
    "name": "p",
    "children": [{"type": "tag", "value": {
      "kind": "block_open",
      "path": ["if"],
      "content": [{"type": "text", "value": "x"}],
      "span": {"line": 2, "column": 4, "end_line": 2, "end_column": 11}
    }}]
  }}
]"#;

fn compile_json(json: &str) -> String {
    compile_source(json, "test.html", &CompileOptions::template())
        .unwrap_or_else(|e| panic!("compile failed: {e}"))
}

// ══════════════════════════════════════════════════════════════════════════════
// Successful compilation
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_list_template_compiles() {
    assert_eq!(compile_json(LIST), LIST_JS);
}

#[test]
fn test_fragment_kind_is_bare_expression() {
    let json = r#"[{"type": "text", "value": "hi"}]"#;
    let code = compile_source(json, "frag", &CompileOptions::default()).unwrap();
    assert_eq!(code, r#""hi""#);
}

#[test]
fn test_options_json_applies_to_pass() {
    let options =
        CompileOptions::from_json(r#"{"kind":"fragment","flavor":"arrow"}"#).unwrap();
    let json = r#"[{"type": "tag", "value": {"kind": "interpolate", "path": ["name"]}}]"#;
    assert_eq!(
        compile_source(json, "t", &options).unwrap(),
        r#"Blaze.Isolate(() => Spacebars.mustache(Blaze.lookup("name", self)))"#
    );
}

#[test]
fn test_compile_in_memory_tree() {
    let content = vec![Node::Tag(TemplateTag::new(
        TagKind::Inclusion,
        Path::parse("UI.dynamic").unwrap(),
    ))];
    let code = compile(&content, "dyn", &CompileOptions::default()).unwrap();
    assert_eq!(
        code,
        "Spacebars.include2(function () { return Spacebars.call(Template.__dynamic); })"
    );
}

#[test]
fn test_compile_to_result_success() {
    let result = compile_to_result(LIST, "list.html", &CompileOptions::template());
    assert!(result.success);
    assert_eq!(result.code.as_deref(), Some(LIST_JS));
    assert_eq!(
        result.code_hash.as_deref(),
        Some(stache_compiler::code_hash(LIST_JS).as_str())
    );
    assert!(result.error.is_none());

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"success\":true"));
    assert!(!json.contains("\"error\""));
}

#[test]
fn test_reserved_names() {
    for name in ["if", "unless", "with", "each"] {
        assert!(is_reserved_name(name));
    }
    assert!(!is_reserved_name("list"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Failures
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_missing_argument_diagnostic_has_span() {
    let err = compile_source(MISSING_ARG, "page.html", &CompileOptions::template()).unwrap_err();
    assert_eq!(err.code, ErrorCode::MISSING_ARGUMENT);
    assert_eq!(err.category, ErrorCategory::Structure);
    assert_eq!(err.message, "#if requires an argument");
    assert_eq!(err.offending, "{{#if}}");
    assert_eq!(err.span, Some(Span::new(2, 4, 2, 11)));
    assert_eq!(
        err.to_string(),
        "page.html:2:4: E200 [structure] #if requires an argument"
    );
}

#[test]
fn test_compile_to_result_failure() {
    let result: CompileResult = compile_to_result(MISSING_ARG, "page.html", &CompileOptions::default());
    assert!(!result.success);
    assert!(result.code.is_none());
    assert!(result.code_hash.is_none());
    let error = result.error.as_ref().expect("error present");
    assert_eq!(error.code, ErrorCode::MISSING_ARGUMENT);

    let json = serde_json::to_string(&result).unwrap();
    assert!(json.contains("\"success\":false"));
    assert!(json.contains("\"line\":2"));
}

#[test]
fn test_special_path_third_segment_diagnostic() {
    let json = r#"[{"type": "tag", "value": {"kind": "inclusion", "path": ["UI", "contentBlock", "x"]}}]"#;
    let err = compile_source(json, "t", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::DOTTED_BUILTIN);
    assert_eq!(err.offending, "UI.contentBlock.x");
    assert_eq!(err.span, None);
}

#[test]
fn test_reserved_path_argument_diagnostic() {
    let json = r#"[{"type": "tag", "value": {
        "kind": "interpolate",
        "path": ["fmt"],
        "args": [{"value": {"path": ["each", "x"]}}],
        "span": {"line": 1, "column": 1, "end_line": 1, "end_column": 15}
    }}]"#;
    let err = compile_source(json, "t", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::RESERVED_HELPER);
    assert_eq!(err.offending, "each.x");
    assert_eq!(err.span, Some(Span::new(1, 1, 1, 15)));
    assert!(err.suggestion.is_some());
}

#[test]
fn test_diagnostic_points_at_failing_tag_not_earlier_match() {
    let json = r#"[
      {"type": "tag", "value": {
        "kind": "block_open", "path": ["if"],
        "args": [{"value": {"path": ["a"]}}],
        "content": [{"type": "text", "value": "a"}],
        "span": {"line": 1, "column": 1, "end_line": 1, "end_column": 10}
      }},
      {"type": "tag", "value": {
        "kind": "interpolate", "path": ["foo"],
        "args": [{"value": {"path": ["if"]}}],
        "span": {"line": 5, "column": 3, "end_line": 5, "end_column": 13}
      }}
    ]"#;
    let err = compile_source(json, "t", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::RESERVED_HELPER);
    assert_eq!(err.offending, "if");
    assert_eq!(err.span, Some(Span::new(5, 3, 5, 13)));
}

#[test]
fn test_custom_receiver_content_block() {
    let options = CompileOptions::from_json(
        r#"{"kind":"template","symbols":{"receiver":"view"}}"#,
    )
    .unwrap();
    let json = r#"[{"type": "tag", "value": {"kind": "inclusion", "path": ["UI", "contentBlock"]}}]"#;
    assert_eq!(
        compile_source(json, "t", &options).unwrap(),
        "(function () { var view = this; return Spacebars.include2(function () { return Spacebars.call(view.__contentBlock); }); })"
    );
}

#[test]
fn test_invalid_json_input() {
    let err = compile_source(r#"[{"type": "tag"}"#, "broken", &CompileOptions::default())
        .unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_INPUT);
    assert_eq!(err.category, ErrorCategory::Input);
    assert_eq!(err.template, "broken");
}

#[test]
fn test_empty_path_is_invalid_input() {
    let json = r#"[{"type": "tag", "value": {"kind": "interpolate", "path": []}}]"#;
    let err = compile_source(json, "t", &CompileOptions::default()).unwrap_err();
    assert_eq!(err.code, ErrorCode::INVALID_INPUT);
    assert!(err.message.contains("at least one segment"));
}

// ══════════════════════════════════════════════════════════════════════════════
// Determinism
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_pipeline_determinism_100_iterations() {
    let first = compile_to_result(LIST, "list.html", &CompileOptions::template());
    let first_json = serde_json::to_string(&first).unwrap();
    for i in 0..100 {
        let result = compile_to_result(LIST, "list.html", &CompileOptions::template());
        let json = serde_json::to_string(&result).unwrap();
        assert_eq!(first_json, json, "Determinism failure at iteration {i}");
    }
}
