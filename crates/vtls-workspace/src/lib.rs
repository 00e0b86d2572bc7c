//! Document model for the template intelligence bridge.
//!
//! A single-file component is represented as a [`VueDocument`]: the source
//! text document plus the artifacts the upstream compiler derives from it
//! (embedded template document, generated typed document, source maps,
//! lightweight script ASTs, and the template-data snapshot). The bridge never
//! produces these artifacts itself; it only consumes them.

mod document;
pub mod markers;
pub mod paths;
mod script;
mod sfc;
mod source_map;
mod store;
mod vue_document;

pub use document::LanguageId;
pub use document::TextDocument;
pub use script::ImportStatement;
pub use script::ObjectLiteral;
pub use script::ScriptAst;
pub use script::ScriptExportDefault;
pub use sfc::CompileMessage;
pub use sfc::CompiledTemplate;
pub use sfc::GeneratedDocument;
pub use sfc::SfcBlock;
pub use sfc::SfcDescriptor;
pub use sfc::TemplateData;
pub use source_map::Mapping;
pub use source_map::SourceMap;
pub use store::DocumentStore;
pub use vue_document::VueDocument;
