//! Documented schema extraction for TypeScript-style type declarations.
//!
//! Feed a parsed [`ast::SourceFile`] (declarations plus comments with byte
//! spans) to [`extract`] and get a [`SchemaSet`]: one `declaration` node per
//! interface or type alias, with doc comments attached positionally and their
//! `@tags` decoded into [`schema::Annotations`].
pub mod annotations;
pub mod ast;
pub mod cli;
pub mod comments;
pub mod emit;
pub mod error;
pub mod extract;
pub mod flatten;
pub mod jq_exec;
pub mod path_de;
pub mod resolve;
pub mod schema;
pub mod table;
pub mod translate;

pub use error::ExtractError;
pub use extract::{SchemaSet, extract, extract_parts};
pub use schema::{AnnotationValue, SchemaKind, SchemaNode};
