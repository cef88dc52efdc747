//! Table-driven lexer coverage across token kinds and operator precedence,
//! using `rstest` fixtures to table each per-token test case.

use es5ast::lexer::Lexer;
use es5ast::stringbuf::StringBuf;
use es5ast::token::TokenKind;
use rstest::rstest;

#[rstest]
#[case("{", TokenKind::LBrace)]
#[case("}", TokenKind::RBrace)]
#[case("(", TokenKind::LParen)]
#[case(")", TokenKind::RParen)]
#[case("[", TokenKind::LBracket)]
#[case("]", TokenKind::RBracket)]
#[case(";", TokenKind::Semicolon)]
#[case(",", TokenKind::Comma)]
#[case(".", TokenKind::Dot)]
#[case("=", TokenKind::Assign)]
#[case("+=", TokenKind::PlusAssign)]
#[case("-=", TokenKind::MinusAssign)]
#[case("*=", TokenKind::StarAssign)]
#[case("/=", TokenKind::SlashAssign)]
#[case("%=", TokenKind::PercentAssign)]
#[case("<<=", TokenKind::LeftShiftAssign)]
#[case(">>=", TokenKind::RightShiftAssign)]
#[case(">>>=", TokenKind::UnsignedRightShiftAssign)]
#[case("+", TokenKind::Plus)]
#[case("-", TokenKind::Minus)]
#[case("++", TokenKind::PlusPlus)]
#[case("--", TokenKind::MinusMinus)]
#[case("<<", TokenKind::LeftShift)]
#[case(">>", TokenKind::RightShift)]
#[case(">>>", TokenKind::UnsignedRightShift)]
#[case("<=", TokenKind::LessEquals)]
#[case(">=", TokenKind::GreaterEquals)]
#[case("==", TokenKind::Equals)]
#[case("!=", TokenKind::NotEquals)]
#[case("===", TokenKind::StrictEquals)]
#[case("!==", TokenKind::StrictNotEquals)]
#[case("&&", TokenKind::AmpAmp)]
#[case("||", TokenKind::PipePipe)]
#[case("instanceof", TokenKind::InstanceOf)]
#[case("typeof", TokenKind::Typeof)]
#[case("function", TokenKind::Function)]
#[case("var", TokenKind::Var)]
#[case("null", TokenKind::NullLiteral)]
#[case("true", TokenKind::TrueLiteral)]
#[case("false", TokenKind::FalseLiteral)]
fn scans_each_punctuator_and_keyword_to_its_kind(#[case] text: &str, #[case] expected: TokenKind) {
    let buf = StringBuf::from_source(text);
    let mut lexer = Lexer::new(&buf);
    let token = lexer.next_token(true).unwrap();
    assert_eq!(token.kind, expected, "scanning {text:?}");
}

#[rstest]
#[case("0", 0.0)]
#[case("0x1F", 31.0)]
#[case("0X10", 16.0)]
#[case("3.14", 3.14)]
#[case("1e3", 1000.0)]
#[case("1E-1", 0.1)]
#[case(".5", 0.5)]
fn scans_numeric_literals_to_their_value(#[case] text: &str, #[case] expected: f64) {
    let buf = StringBuf::from_source(text);
    let mut lexer = Lexer::new(&buf);
    let token = lexer.next_token(true).unwrap();
    assert_eq!(token.kind, TokenKind::NumericLiteral);
    assert_eq!(token.number, expected, "scanning {text:?}");
}
