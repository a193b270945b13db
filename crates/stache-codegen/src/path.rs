//! Path resolution.
//!
//! Resolution order, first match wins:
//! 1. a built-in block helper name is an error
//! 2. `UI.contentBlock`, `UI.elseBlock`, `UI.dynamic` are fixed references
//! 3. generic lookup of the first segment (`lookup` or `lookupTemplate`)
//! 4. remaining segments through `dot`
//!
//! The lookup primitive itself implements the precedence between helpers,
//! data contexts and templates; this module only picks the primitive.
//! No call is generated for the resolved value even if it is a function.

use stache_types::ast::Path;
use tracing::trace;

use crate::emit::{self, Code};
use crate::error::{CodegenError, CodegenResult};
use crate::generator::CodeGen;
use crate::literal;
use crate::runtime::{BuiltinHelper, SpecialPath, SPECIAL_NAMESPACE};

/// Options for [`CodeGen::code_gen_path`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LookupOptions {
    /// Also search templates (after helpers, before the data context).
    /// Used for `{{> foo}}` and `{{#foo}}`; ignored for dotted paths.
    pub lookup_template: bool,
}

impl LookupOptions {
    pub fn template() -> Self {
        Self {
            lookup_template: true,
        }
    }
}

impl CodeGen<'_> {
    /// Resolve `path` to an expression. For dotted paths the result may be
    /// reactive.
    pub fn code_gen_path(&self, path: &Path, opts: LookupOptions) -> CodegenResult<Code> {
        if let Some(helper) = BuiltinHelper::from_name(path.head()) {
            return Err(CodegenError::ReservedHelper {
                helper: helper.name().to_owned(),
                path: path.to_string(),
            });
        }

        if let Some(special) = special_path(path) {
            if path.len() > 2 {
                return Err(CodegenError::DottedBuiltin {
                    prefix: format!("{SPECIAL_NAMESPACE}.{}", special.name()),
                    path: path.to_string(),
                });
            }
            trace!(%path, "special path");
            return Ok(Code::new(special.reference(self.symbols())));
        }

        let symbols = self.symbols();
        let lookup = if opts.lookup_template && !path.is_dotted() {
            &symbols.lookup_template
        } else {
            &symbols.lookup
        };
        let code = emit::call(
            lookup,
            [literal::string(path.head()), Code::new(&symbols.receiver)],
        );

        if !path.is_dotted() {
            return Ok(code);
        }
        let segments = path.tail().iter().map(|segment| literal::string(segment));
        Ok(emit::call(&symbols.dot, std::iter::once(code).chain(segments)))
    }
}

fn special_path(path: &Path) -> Option<SpecialPath> {
    match path.segments() {
        [namespace, name, ..] if namespace == SPECIAL_NAMESPACE => SpecialPath::from_name(name),
        _ => None,
    }
}
