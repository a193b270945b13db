//! Code generator state and options.

use serde::{Deserialize, Serialize};

use crate::emit::Flavor;
use crate::runtime::RuntimeSymbols;

/// Options for one generation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodegenOptions {
    pub flavor: Flavor,
    pub symbols: RuntimeSymbols,
}

/// The code generator.
///
/// Holds no per-pass state: every `code_gen_*` method is a pure function of
/// its input and the options. The methods are split by concern across
/// [`crate::path`], [`crate::args`], [`crate::tag`] and [`crate::block`].
#[derive(Debug, Clone, Copy)]
pub struct CodeGen<'a> {
    pub(crate) options: &'a CodegenOptions,
}

impl<'a> CodeGen<'a> {
    pub fn new(options: &'a CodegenOptions) -> Self {
        Self { options }
    }

    pub(crate) fn symbols(&self) -> &'a RuntimeSymbols {
        &self.options.symbols
    }

    pub(crate) fn flavor(&self) -> Flavor {
        self.options.flavor
    }
}
