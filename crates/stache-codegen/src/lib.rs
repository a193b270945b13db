//! Stache code generator: compiles a template tag tree to JavaScript.
//!
//! # Architecture
//!
//! [`CodeGen`] walks a parsed content tree depth-first, in document order,
//! and emits one JavaScript expression per node. Template tags go through
//! three stages:
//!
//! - [`path`]: resolves a dotted path to a lookup expression
//!   (`Blaze.lookup("foo", self)`, `Spacebars.dot(..., "bar")`, or a fixed
//!   special reference such as `self.__contentBlock`)
//! - [`args`]: encodes arguments, the keyword bundle, and the data thunk
//!   passed to blocks and inclusions
//! - [`tag`]: dispatches on tag position and kind and composes the runtime
//!   calls, recursing into nested content through [`block`]
//!
//! Every emitter returns [`Code`] built with the [`emit`] helpers. The first
//! error aborts the whole pass; there is no partial output.
//!
//! ```
//! use stache_codegen::{CodeGen, CodegenOptions};
//! use stache_types::ast::{Path, TagKind, TemplateTag};
//!
//! let options = CodegenOptions::default();
//! let tag = TemplateTag::new(TagKind::Interpolate, Path::parse("name").unwrap());
//! let code = CodeGen::new(&options).code_gen_template_tag(&tag).unwrap();
//! assert_eq!(
//!     code.as_str(),
//!     r#"Blaze.Isolate(function () { return Spacebars.mustache(Blaze.lookup("name", self)); })"#
//! );
//! ```

pub mod args;
pub mod block;
pub mod emit;
pub mod error;
pub mod generator;
pub mod literal;
pub mod path;
pub mod runtime;
pub mod tag;

pub use args::MustacheKind;
pub use block::TemplateKind;
pub use emit::{Code, Flavor};
pub use error::{CodegenError, CodegenResult};
pub use generator::{CodeGen, CodegenOptions};
pub use path::LookupOptions;
pub use runtime::{is_reserved_name, RuntimeSymbols};
