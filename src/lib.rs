//! An ECMAScript 5 source-to-syntax-tree frontend: lexer, recursive-descent
//! parser, and an ESTree-shaped JSON serializer, plus a thin native sandbox
//! (`host`) standing in for the embedded-script host primitives of the
//! reference implementation this crate's grammar handling is grounded on.
//!
//! The one entry point most callers want is [`api::parse_to_json`].

pub mod api;
pub mod arena;
pub mod ast;
pub mod builder;
pub mod charclass;
pub mod error;
pub mod host;
pub mod interner;
pub mod keywords;
pub mod lexer;
pub mod parser;
pub mod serializer;
pub mod stringbuf;
pub mod token;

pub use api::{parse_to_ast, parse_to_json, OutputStyle};
pub use error::{ParseError, ParseErrorKind};
