//! Content trees: template bodies and the nested blocks of block tags.
//!
//! A content block compiles to `function () { var self = this; return BODY; }`
//! where BODY is `null`, the code of a single node, or an array of node codes
//! in document order.

use serde::{Deserialize, Serialize};
use stache_types::ast::{Attribute, Element, Node, TagPosition};
use tracing::debug;

use crate::emit::{self, Code};
use crate::error::CodegenResult;
use crate::generator::CodeGen;
use crate::literal;
use crate::tag::unexpected_tag;

/// How the top-level content of a pass is wrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    /// The bare body expression.
    #[default]
    Fragment,
    /// A `<template>` render function.
    Template,
    /// The `<body>` render function.
    Body,
}

impl CodeGen<'_> {
    /// Generate code for a whole template.
    pub fn code_gen_template(&self, content: &[Node], kind: TemplateKind) -> CodegenResult<Code> {
        debug!(nodes = content.len(), ?kind, "generating template code");
        let body = self.code_gen_nodes(content)?;
        Ok(match kind {
            TemplateKind::Fragment => body,
            TemplateKind::Template | TemplateKind::Body => {
                emit::parenthesize(emit::block_function(&self.symbols().receiver, body))
            }
        })
    }

    /// Generate a content block for the body or else-body of a block tag.
    pub fn code_gen_block(&self, content: &[Node]) -> CodegenResult<Code> {
        let body = self.code_gen_nodes(content)?;
        Ok(emit::block_function(&self.symbols().receiver, body))
    }

    fn code_gen_nodes(&self, nodes: &[Node]) -> CodegenResult<Code> {
        let mut codes = nodes
            .iter()
            .map(|node| self.code_gen_node(node))
            .collect::<CodegenResult<Vec<_>>>()?;
        Ok(match codes.len() {
            0 => literal::null(),
            1 => codes.swap_remove(0),
            _ => emit::array(codes),
        })
    }

    fn code_gen_node(&self, node: &Node) -> CodegenResult<Code> {
        match node {
            Node::Text(text) => Ok(literal::string(text)),
            Node::Comment(text) => Ok(emit::call(
                format!("{}.Comment", self.symbols().html),
                [literal::string(text)],
            )),
            Node::Tag(tag) => self.code_gen_template_tag(tag),
            Node::Element(element) => self.code_gen_element(element),
        }
    }

    /// `HTML.DIV(attrs?, children...)`
    fn code_gen_element(&self, element: &Element) -> CodegenResult<Code> {
        let html = &self.symbols().html;
        let mut args = Vec::with_capacity(element.children.len() + 1);

        if !element.attrs.is_empty() || !element.dynamic_attrs.is_empty() {
            let attrs = self.code_gen_attrs(&element.attrs)?;
            if element.dynamic_attrs.is_empty() {
                args.push(attrs);
            } else {
                let mut attrs_args = vec![attrs];
                for tag in &element.dynamic_attrs {
                    if tag.position != TagPosition::InStartTag {
                        return Err(unexpected_tag(tag).at(tag.span));
                    }
                    attrs_args.push(self.code_gen_template_tag(tag)?);
                }
                args.push(emit::call(format!("{html}.Attrs"), attrs_args));
            }
        }

        for child in &element.children {
            args.push(self.code_gen_node(child)?);
        }

        let constructor = if is_simple_tag_name(&element.name) {
            format!("{html}.{}", element.name.to_ascii_uppercase())
        } else {
            format!("{html}.getTag({})", literal::string(&element.name))
        };
        Ok(emit::call(constructor, args))
    }

    fn code_gen_attrs(&self, attrs: &[Attribute]) -> CodegenResult<Code> {
        let mut entries = Vec::with_capacity(attrs.len());
        for attr in attrs {
            let value = if attr.value.is_empty() {
                literal::string("")
            } else {
                self.code_gen_nodes(&attr.value)?
            };
            entries.push((attr.name.as_str(), value));
        }
        Ok(emit::object_literal(entries))
    }
}

/// `div`, `h1`: names with a constructor of their own.
fn is_simple_tag_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_lowercase())
        && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit())
}
