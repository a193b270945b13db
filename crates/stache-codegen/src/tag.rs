//! Template tag emission.
//!
//! ```text
//! {{foo}}          Blaze.Isolate(function () { return Spacebars.mustache(...); })
//! {{{foo}}}        Blaze.Isolate(function () { return Spacebars.makeRaw(Spacebars.mustache(...)); })
//! <a {{foo}}>      Blaze.Var(function () { return Spacebars.attrMustache(...); })
//! {{#if x}}        Blaze.If(dataThunk, contentBlock[, elseBlock])
//! {{> foo}}        Spacebars.include2(component[, contentBlock[, elseBlock]])
//! {{#foo x}}       Spacebars.TemplateWith(dataThunk, function () { return Spacebars.include2(...); })
//! ```

use stache_types::ast::{ArgType, Argument, TagKind, TagPosition, TemplateTag};
use tracing::trace;

use crate::args::MustacheKind;
use crate::emit::{self, Code};
use crate::error::{CodegenError, CodegenResult};
use crate::generator::CodeGen;
use crate::literal;
use crate::path::LookupOptions;
use crate::runtime::BuiltinHelper;

impl CodeGen<'_> {
    /// Emit the code for one template tag, recursing into its content.
    ///
    /// A failure is located at this tag's span unless a nested tag with a
    /// span already claimed it.
    pub fn code_gen_template_tag(&self, tag: &TemplateTag) -> CodegenResult<Code> {
        trace!(%tag, kind = ?tag.kind, position = ?tag.position, "template tag");
        self.code_gen_tag_kind(tag).map_err(|err| err.at(tag.span))
    }

    fn code_gen_tag_kind(&self, tag: &TemplateTag) -> CodegenResult<Code> {
        if tag.else_content.is_some() && tag.content.is_none() {
            return Err(CodegenError::ElseWithoutContent {
                tag: tag.to_string(),
            });
        }

        let symbols = self.symbols();

        if tag.position == TagPosition::InStartTag {
            // Only `{{foo}}` can produce attributes: `<div {{attrs}}>`.
            if tag.kind != TagKind::Interpolate {
                return Err(unexpected_tag(tag));
            }
            let mustache = self.code_gen_mustache(&tag.path, &tag.args, MustacheKind::Attr)?;
            return Ok(emit::call(
                &symbols.attr_var,
                [emit::thunk(self.flavor(), mustache)],
            ));
        }

        match tag.kind {
            TagKind::Interpolate => {
                let mustache =
                    self.code_gen_mustache(&tag.path, &tag.args, MustacheKind::Mustache)?;
                Ok(emit::call(
                    &symbols.isolate,
                    [emit::thunk(self.flavor(), mustache)],
                ))
            }
            TagKind::InterpolateRaw => {
                let mustache =
                    self.code_gen_mustache(&tag.path, &tag.args, MustacheKind::Mustache)?;
                let raw = emit::call(&symbols.make_raw, [mustache]);
                Ok(emit::call(&symbols.isolate, [emit::thunk(self.flavor(), raw)]))
            }
            TagKind::BlockOpen => match BuiltinHelper::from_name(tag.path.head()) {
                Some(helper) => self.code_gen_builtin_block(tag, helper),
                None => self.code_gen_inclusion(tag),
            },
            // `{{> if}}` fails in path resolution.
            TagKind::Inclusion => self.code_gen_inclusion(tag),
        }
    }

    /// `if`, `unless`, `with`, `each`.
    fn code_gen_builtin_block(&self, tag: &TemplateTag, helper: BuiltinHelper) -> CodegenResult<Code> {
        if tag.path.is_dotted() {
            return Err(CodegenError::DottedBuiltin {
                prefix: helper.name().to_owned(),
                path: tag.path.to_string(),
            });
        }
        if tag.args.is_empty() {
            return Err(CodegenError::MissingArgument {
                helper: helper.name().to_owned(),
                tag: tag.to_string(),
            });
        }
        check_data_args(tag)?;

        let data = self
            .code_gen_inclusion_data_func(&tag.args)?
            .unwrap_or_else(literal::null);
        let content = match &tag.content {
            Some(content) => self.code_gen_block(content)?,
            None => literal::null(),
        };

        let mut call_args = vec![data, content];
        if let Some(else_content) = &tag.else_content {
            call_args.push(self.code_gen_block(else_content)?);
        }
        Ok(emit::call(helper.symbol(self.symbols()), call_args))
    }

    /// Inclusions and non-built-in block tags.
    fn code_gen_inclusion(&self, tag: &TemplateTag) -> CodegenResult<Code> {
        let symbols = self.symbols();

        let mut component = self.code_gen_path(&tag.path, LookupOptions::template())?;
        if tag.path.is_dotted() {
            // A dotted lookup is reactive; defer it.
            component = emit::thunk(self.flavor(), emit::call(&symbols.call, [component]));
        }

        check_data_args(tag)?;
        let data = self.code_gen_inclusion_data_func(&tag.args)?;

        let mut include_args = vec![component];
        if let Some(content) = &tag.content {
            include_args.push(self.code_gen_block(content)?);
            if let Some(else_content) = &tag.else_content {
                include_args.push(self.code_gen_block(else_content)?);
            }
        }
        let include = emit::call(&symbols.include, include_args);

        // The data context wraps the whole inclusion, so when `foo` in
        // `{{#foo bar}}` is a helper it runs with `bar` as `this`, as if
        // written `{{#with bar}}{{#foo}}`.
        Ok(match data {
            Some(data) => emit::call(
                &symbols.template_with,
                [data, emit::thunk(self.flavor(), include)],
            ),
            None => include,
        })
    }
}

/// Argument shapes the data thunk cannot express.
fn check_data_args(tag: &TemplateTag) -> CodegenResult<()> {
    let Some(first) = tag.args.first() else {
        return Ok(());
    };
    if first.is_keyword() {
        if !tag.args.iter().all(Argument::is_keyword) {
            return Err(CodegenError::PositionalAfterKeyword {
                tag: tag.to_string(),
            });
        }
    } else if first.arg_type() != ArgType::Path && tag.args.len() > 1 {
        return Err(CodegenError::LiteralDataWithArguments {
            tag: tag.to_string(),
        });
    }
    Ok(())
}

pub(crate) fn unexpected_tag(tag: &TemplateTag) -> CodegenError {
    CodegenError::UnexpectedTag {
        kind: format!("{:?}", tag.kind),
        position: format!("{:?}", tag.position),
        tag: tag.to_string(),
    }
}
