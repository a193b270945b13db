//! Argument encoding.
//!
//! Positional arguments become call arguments in order. Keyword arguments are
//! collected into one object literal wrapped in the `kw` marker and passed
//! last, wherever they appeared in the tag.

use std::iter;

use stache_types::ast::{ArgValue, Argument, Path};

use crate::emit::{self, Code};
use crate::error::CodegenResult;
use crate::generator::CodeGen;
use crate::literal;
use crate::path::LookupOptions;
use crate::runtime::RuntimeSymbols;

/// Which mustache primitive evaluates a tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MustacheKind {
    /// Content interpolation.
    Mustache,
    /// Dynamic attributes in a start tag.
    Attr,
    /// Data context of a block or inclusion with several positional args.
    Data,
}

impl MustacheKind {
    fn symbol(self, symbols: &RuntimeSymbols) -> &str {
        match self {
            Self::Mustache => &symbols.mustache,
            Self::Attr => &symbols.attr_mustache,
            Self::Data => &symbols.data_mustache,
        }
    }
}

impl CodeGen<'_> {
    /// Encode one argument value, ignoring its keyword.
    ///
    /// Paths are resolved without template lookup and are not invoked; the
    /// result may be reactive and is not wrapped in a closure.
    pub fn code_gen_arg_value(&self, arg: &Argument) -> CodegenResult<Code> {
        match &arg.value {
            ArgValue::String(s) => Ok(literal::string(s)),
            ArgValue::Number(n) => literal::number(*n),
            ArgValue::Boolean(b) => Ok(literal::boolean(*b)),
            ArgValue::Null => Ok(literal::null()),
            ArgValue::Path(path) => self.code_gen_path(path, LookupOptions::default()),
        }
    }

    /// Encode a tag's argument list, or `None` when there are no arguments.
    pub fn code_gen_mustache_args(&self, args: &[Argument]) -> CodegenResult<Option<Vec<Code>>> {
        if args.is_empty() {
            return Ok(None);
        }

        let mut positional = Vec::with_capacity(args.len());
        let mut keywords = Vec::new();
        for arg in args {
            let code = self.code_gen_arg_value(arg)?;
            match &arg.keyword {
                Some(name) => insert_keyword(&mut keywords, name, code),
                None => positional.push(code),
            }
        }

        if !keywords.is_empty() {
            positional.push(emit::call(
                &self.symbols().kw,
                [emit::object_literal(keywords)],
            ));
        }
        Ok(Some(positional))
    }

    /// `mustache(name, args...)` with the given primitive. Has no closures of
    /// its own; callers wrap it for fine-grained reactivity.
    pub fn code_gen_mustache(
        &self,
        path: &Path,
        args: &[Argument],
        kind: MustacheKind,
    ) -> CodegenResult<Code> {
        let name = self.code_gen_path(path, LookupOptions::default())?;
        let args = self.code_gen_mustache_args(args)?.unwrap_or_default();
        Ok(emit::call(
            kind.symbol(self.symbols()),
            iter::once(name).chain(args),
        ))
    }

    /// The data thunk for a block or inclusion, or `None` without arguments.
    ///
    /// - keyword arguments only: `{x: call(...), ...}`
    /// - literal first argument: the literal (the tag emitter has already
    ///   rejected extra arguments)
    /// - one path: `call(path)`, invoking it if it is a function
    /// - a path and more arguments: `dataMustache(path, rest...)`
    pub fn code_gen_inclusion_data_func(&self, args: &[Argument]) -> CodegenResult<Option<Code>> {
        let Some(first) = args.first() else {
            return Ok(None);
        };
        let call = &self.symbols().call;

        let body = if args.iter().all(Argument::is_keyword) {
            let mut props = Vec::with_capacity(args.len());
            for arg in args {
                let value = emit::call(call, [self.code_gen_arg_value(arg)?]);
                insert_keyword(&mut props, arg.keyword.as_deref().unwrap_or_default(), value);
            }
            emit::object_literal(props)
        } else {
            match (&first.value, args.len()) {
                (ArgValue::Path(path), 1) => emit::call(
                    call,
                    [self.code_gen_path(path, LookupOptions::default())?],
                ),
                (ArgValue::Path(path), _) => {
                    self.code_gen_mustache(path, &args[1..], MustacheKind::Data)?
                }
                _ => self.code_gen_arg_value(first)?,
            }
        };

        Ok(Some(emit::thunk(self.flavor(), body)))
    }
}

/// A repeated keyword keeps its first position and its last value.
fn insert_keyword<'a>(entries: &mut Vec<(&'a str, Code)>, name: &'a str, code: Code) {
    match entries.iter_mut().find(|(key, _)| *key == name) {
        Some(entry) => entry.1 = code,
        None => entries.push((name, code)),
    }
}
