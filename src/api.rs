//! Parsing API: pure functions with no I/O, process exits, or CLI concerns,
//! split the way `api.rs`/`process` surfaces are split elsewhere in this
//! style of codebase, leaving I/O entirely to the CLI binary.

use crate::error::ParseError;
use crate::parser::Parser;
use crate::serializer::Serializer;
use crate::stringbuf::StringBuf;

/// Output shape requested from [`parse_to_json`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStyle {
    /// 4-space indented JSON, matching the reference dumper's readability.
    Pretty,
    /// Single-line JSON, for piping into other tools.
    Compact,
}

/// Parses `source` and serializes the resulting AST as an ESTree-shaped
/// JSON document. This is the one entry point both the CLI and library
/// consumers should use. It owns the full pipeline (lex, parse, serialize)
/// so no caller needs to juggle `StringBuf`/`Parser`/`Serializer` directly.
pub fn parse_to_json(source: &str, style: OutputStyle) -> Result<String, ParseError> {
    let (root, arena) = parse_to_ast(source)?;
    let serializer = Serializer::new(&arena);
    Ok(serializer.to_json_string(root, style == OutputStyle::Compact))
}

/// Parses `source` and hands back the raw arena and root node id, for
/// callers that want to walk the tree themselves instead of going straight
/// to JSON.
pub fn parse_to_ast(
    source: &str,
) -> Result<(crate::arena::NodeId, crate::arena::Arena), ParseError> {
    let buf = StringBuf::from_source(source);
    let parser = Parser::new(&buf)?;
    let (root, builder) = parser.parse_program()?;
    Ok((root, builder.into_arena()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_a_trivial_program() {
        let json = parse_to_json("var x = 1;", OutputStyle::Compact).unwrap();
        assert!(json.contains("VariableDeclaration"));
    }

    #[test]
    fn reports_lexical_errors_with_a_line_number() {
        let err = parse_to_json("'unterminated", OutputStyle::Compact).unwrap_err();
        assert_eq!(err.line, 1);
    }
}
