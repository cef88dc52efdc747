//! Hand-rolled scanner over a `StringBuf`, producing one `Token` per call.
//!
//! Division vs. regex-literal disambiguation is pushed to the caller: a
//! single `/` is grammatically ambiguous between `Divide` and the start of
//! a `RegexLiteral` and only the parser knows, from the preceding token,
//! which reading is syntactically reachable. `next_token` takes a
//! `regex_allowed` flag for exactly this reason.

use crate::ast::Position;
use crate::charclass::*;
use crate::error::ParseError;
use crate::keywords;
use crate::stringbuf::StringBuf;
use crate::token::{Token, TokenKind};

pub struct Lexer<'a> {
    buf: &'a StringBuf,
    pos: usize,
    line: u32,
    line_start: usize,
}

type LexResult<T> = Result<T, ParseError>;

impl<'a> Lexer<'a> {
    pub fn new(buf: &'a StringBuf) -> Self {
        Self {
            buf,
            pos: 0,
            line: 1,
            line_start: 0,
        }
    }

    fn position(&self) -> Position {
        Position::new(self.line, (self.pos - self.line_start) as u32, self.pos as u32)
    }

    fn peek(&self) -> Option<u16> {
        self.buf.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<u16> {
        self.buf.get(self.pos + offset)
    }

    fn advance(&mut self) -> Option<u16> {
        let c = self.buf.get(self.pos)?;
        self.pos += 1;
        if is_line_terminator(c) {
            // A CRLF pair is a single line break.
            if c == 0x000D && self.peek() == Some(0x000A) {
                self.pos += 1;
            }
            self.line += 1;
            self.line_start = self.pos;
        }
        Some(c)
    }

    fn error(&self) -> ParseError {
        ParseError::lexical(self.line)
    }

    /// Skips whitespace, line terminators, and comments, reporting whether
    /// any line terminator was crossed (drives ASI).
    fn skip_trivia(&mut self) -> LexResult<bool> {
        let mut saw_newline = false;
        loop {
            match self.peek() {
                Some(c) if is_line_terminator(c) => {
                    saw_newline = true;
                    self.advance();
                }
                Some(c) if is_ascii_whitespace(c) => {
                    self.advance();
                }
                Some(0x002F) if self.peek_at(1) == Some(0x002F) => {
                    // line comment
                    self.advance();
                    self.advance();
                    while let Some(c) = self.peek() {
                        if is_line_terminator(c) {
                            break;
                        }
                        self.advance();
                    }
                }
                Some(0x002F) if self.peek_at(1) == Some(0x002A) => {
                    // block comment
                    self.advance();
                    self.advance();
                    let mut closed = false;
                    while let Some(c) = self.advance() {
                        if is_line_terminator(c) {
                            saw_newline = true;
                        }
                        if c == 0x002A && self.peek() == Some(0x002F) {
                            self.advance();
                            closed = true;
                            break;
                        }
                    }
                    if !closed {
                        return Err(self.error());
                    }
                }
                _ => break,
            }
        }
        Ok(saw_newline)
    }

    pub fn next_token(&mut self, regex_allowed: bool) -> LexResult<Token> {
        let preceded_by_line_terminator = self.skip_trivia()?;
        let start = self.position();

        let kind = match self.peek() {
            None => TokenKind::Eof,
            Some(c) if is_ascii_digit(c) => {
                return self.scan_number(start, preceded_by_line_terminator)
            }
            Some(0x002E) if is_ascii_digit(self.peek_at(1).unwrap_or(0)) => {
                return self.scan_number(start, preceded_by_line_terminator)
            }
            Some(c) if is_identifier_start(c) => {
                return self.scan_identifier(start, preceded_by_line_terminator)
            }
            Some(0x0027) | Some(0x0022) => {
                return self.scan_string(start, preceded_by_line_terminator)
            }
            Some(0x002F) if regex_allowed => {
                return self.scan_regex(start, preceded_by_line_terminator)
            }
            Some(_) => return self.scan_punctuator(start, preceded_by_line_terminator),
        };

        let end = self.position();
        let mut token = Token::new(kind, start, end);
        token.preceded_by_line_terminator = preceded_by_line_terminator;
        Ok(token)
    }

    fn finish(&self, kind: TokenKind, start: Position, preceded: bool) -> Token {
        let end = self.position();
        let mut token = Token::new(kind, start, end);
        token.preceded_by_line_terminator = preceded;
        token
    }

    fn scan_identifier(&mut self, start: Position, preceded: bool) -> LexResult<Token> {
        let begin = self.pos;
        while let Some(c) = self.peek() {
            if is_identifier_part(c) {
                self.advance();
            } else {
                break;
            }
        }
        let text = StringBuf::to_string_lossy(self.buf.slice(begin, self.pos));
        let kind = keywords::lookup(&text).unwrap_or(TokenKind::Identifier);
        let mut token = self.finish(kind, start, preceded);
        token.text = Some(text);
        Ok(token)
    }

    fn scan_number(&mut self, start: Position, preceded: bool) -> LexResult<Token> {
        let begin = self.pos;
        if self.peek() == Some(0x0030) && matches!(self.peek_at(1), Some(0x0078) | Some(0x0058)) {
            // hex literal
            self.advance();
            self.advance();
            let digits_start = self.pos;
            while let Some(c) = self.peek() {
                if is_hex_digit(c) {
                    self.advance();
                } else {
                    break;
                }
            }
            if self.pos == digits_start {
                return Err(self.error());
            }
            let text = StringBuf::to_string_lossy(self.buf.slice(digits_start, self.pos));
            let value = u64::from_str_radix(&text, 16).map(|v| v as f64).unwrap_or(f64::INFINITY);
            let mut token = self.finish(TokenKind::NumericLiteral, start, preceded);
            token.number = value;
            return self.reject_trailing_identifier_part(token);
        }

        while let Some(c) = self.peek() {
            if is_ascii_digit(c) {
                self.advance();
            } else {
                break;
            }
        }
        if self.peek() == Some(0x002E) {
            self.advance();
            while let Some(c) = self.peek() {
                if is_ascii_digit(c) {
                    self.advance();
                } else {
                    break;
                }
            }
        }
        if matches!(self.peek(), Some(0x0065) | Some(0x0045)) {
            let mark = self.pos;
            self.advance();
            if matches!(self.peek(), Some(0x002B) | Some(0x002D)) {
                self.advance();
            }
            if self.peek().map(is_ascii_digit).unwrap_or(false) {
                while let Some(c) = self.peek() {
                    if is_ascii_digit(c) {
                        self.advance();
                    } else {
                        break;
                    }
                }
            } else {
                self.pos = mark;
            }
        }
        let text = StringBuf::to_string_lossy(self.buf.slice(begin, self.pos));
        let value: f64 = text.parse().unwrap_or(f64::INFINITY);
        let mut token = self.finish(TokenKind::NumericLiteral, start, preceded);
        token.number = value;
        self.reject_trailing_identifier_part(token)
    }

    fn reject_trailing_identifier_part(&mut self, token: Token) -> LexResult<Token> {
        if self.peek().map(is_identifier_start).unwrap_or(false) {
            return Err(self.error());
        }
        Ok(token)
    }

    fn scan_string(&mut self, start: Position, preceded: bool) -> LexResult<Token> {
        let quote = self.advance().unwrap();
        let mut value = String::new();
        loop {
            match self.peek() {
                None => return Err(self.error()),
                Some(c) if c == quote => {
                    self.advance();
                    break;
                }
                Some(c) if is_line_terminator(c) => return Err(self.error()),
                Some(0x005C) => {
                    self.advance();
                    self.scan_escape_sequence(&mut value)?;
                }
                Some(_) => {
                    let c = self.advance().unwrap();
                    push_code_unit(&mut value, c);
                }
            }
        }
        let mut token = self.finish(TokenKind::StringLiteral, start, preceded);
        token.string_value = Some(value);
        Ok(token)
    }

    fn scan_escape_sequence(&mut self, out: &mut String) -> LexResult<()> {
        match self.peek() {
            None => Err(self.error()),
            Some(c) if is_line_terminator(c) => {
                // Line continuation: backslash-newline contributes nothing.
                self.advance();
                Ok(())
            }
            Some(0x0062) => {
                self.advance();
                out.push('\u{0008}');
                Ok(())
            }
            Some(0x0066) => {
                self.advance();
                out.push('\u{000C}');
                Ok(())
            }
            Some(0x006E) => {
                self.advance();
                out.push('\n');
                Ok(())
            }
            Some(0x0072) => {
                self.advance();
                out.push('\r');
                Ok(())
            }
            Some(0x0074) => {
                self.advance();
                out.push('\t');
                Ok(())
            }
            Some(0x0076) => {
                self.advance();
                out.push('\u{000B}');
                Ok(())
            }
            Some(0x0030) if !self.peek_at(1).map(is_ascii_digit).unwrap_or(false) => {
                self.advance();
                out.push('\u{0000}');
                Ok(())
            }
            Some(0x0078) => {
                self.advance();
                let value = self.read_hex_digits(2)?;
                push_code_unit(out, value as u16);
                Ok(())
            }
            Some(0x0075) => {
                self.advance();
                let value = self.read_hex_digits(4)?;
                push_code_unit(out, value as u16);
                Ok(())
            }
            Some(c) => {
                self.advance();
                push_code_unit(out, c);
                Ok(())
            }
        }
    }

    fn read_hex_digits(&mut self, count: usize) -> LexResult<u32> {
        let mut value = 0u32;
        for _ in 0..count {
            let c = self.peek().ok_or_else(|| self.error())?;
            let digit = hex_value(c).ok_or_else(|| self.error())?;
            value = value * 16 + digit;
            self.advance();
        }
        Ok(value)
    }

    fn scan_regex(&mut self, start: Position, preceded: bool) -> LexResult<Token> {
        let begin = self.pos;
        self.advance(); // leading '/'
        let mut in_class = false;
        loop {
            match self.peek() {
                None => return Err(self.error()),
                Some(c) if is_line_terminator(c) => return Err(self.error()),
                Some(0x005C) => {
                    self.advance();
                    if self.peek().is_none() {
                        return Err(self.error());
                    }
                    self.advance();
                }
                Some(0x005B) => {
                    in_class = true;
                    self.advance();
                }
                Some(0x005D) if in_class => {
                    in_class = false;
                    self.advance();
                }
                Some(0x002F) if !in_class => {
                    self.advance();
                    break;
                }
                Some(_) => {
                    self.advance();
                }
            }
        }
        let pattern_end = self.pos - 1;
        let flags_start = self.pos;
        while let Some(c) = self.peek() {
            if is_identifier_part(c) {
                self.advance();
            } else {
                break;
            }
        }
        let pattern = StringBuf::to_string_lossy(self.buf.slice(begin + 1, pattern_end));
        let flags = StringBuf::to_string_lossy(self.buf.slice(flags_start, self.pos));
        let mut token = self.finish(TokenKind::RegexLiteral, start, preceded);
        token.regex_pattern = Some(pattern);
        token.regex_flags = Some(flags);
        Ok(token)
    }

    fn scan_punctuator(&mut self, start: Position, preceded: bool) -> LexResult<Token> {
        macro_rules! two {
            ($second:expr, $if_match:expr, $otherwise:expr) => {{
                self.advance();
                if self.peek() == Some($second) {
                    self.advance();
                    $if_match
                } else {
                    $otherwise
                }
            }};
        }

        let kind = match self.advance().unwrap() {
            0x007B => TokenKind::LBrace,
            0x007D => TokenKind::RBrace,
            0x0028 => TokenKind::LParen,
            0x0029 => TokenKind::RParen,
            0x005B => TokenKind::LBracket,
            0x005D => TokenKind::RBracket,
            0x003B => TokenKind::Semicolon,
            0x002C => TokenKind::Comma,
            0x003A => TokenKind::Colon,
            0x003F => TokenKind::Question,
            0x007E => TokenKind::Tilde,
            0x002E => TokenKind::Dot,
            0x002B => {
                if self.peek() == Some(0x002B) {
                    self.advance();
                    TokenKind::PlusPlus
                } else if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::PlusAssign
                } else {
                    TokenKind::Plus
                }
            }
            0x002D => {
                if self.peek() == Some(0x002D) {
                    self.advance();
                    TokenKind::MinusMinus
                } else if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::MinusAssign
                } else {
                    TokenKind::Minus
                }
            }
            0x002A => {
                if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::StarAssign
                } else {
                    TokenKind::Star
                }
            }
            0x002F => {
                if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::SlashAssign
                } else {
                    TokenKind::Slash
                }
            }
            0x0025 => {
                if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::PercentAssign
                } else {
                    TokenKind::Percent
                }
            }
            0x0026 => {
                if self.peek() == Some(0x0026) {
                    self.advance();
                    TokenKind::AmpAmp
                } else if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::AmpAssign
                } else {
                    TokenKind::Amp
                }
            }
            0x007C => {
                if self.peek() == Some(0x007C) {
                    self.advance();
                    TokenKind::PipePipe
                } else if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::PipeAssign
                } else {
                    TokenKind::Pipe
                }
            }
            0x005E => {
                if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::CaretAssign
                } else {
                    TokenKind::Caret
                }
            }
            0x0021 => {
                if self.peek() == Some(0x003D) {
                    self.advance();
                    if self.peek() == Some(0x003D) {
                        self.advance();
                        TokenKind::StrictNotEquals
                    } else {
                        TokenKind::NotEquals
                    }
                } else {
                    TokenKind::Bang
                }
            }
            0x003D => {
                if self.peek() == Some(0x003D) {
                    self.advance();
                    if self.peek() == Some(0x003D) {
                        self.advance();
                        TokenKind::StrictEquals
                    } else {
                        TokenKind::Equals
                    }
                } else {
                    TokenKind::Assign
                }
            }
            0x003C => {
                if self.peek() == Some(0x003C) {
                    two!(0x003D, TokenKind::LeftShiftAssign, TokenKind::LeftShift)
                } else if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::LessEquals
                } else {
                    TokenKind::Less
                }
            }
            0x003E => {
                if self.peek() == Some(0x003E) {
                    self.advance();
                    if self.peek() == Some(0x003E) {
                        two!(0x003D, TokenKind::UnsignedRightShiftAssign, TokenKind::UnsignedRightShift)
                    } else if self.peek() == Some(0x003D) {
                        self.advance();
                        TokenKind::RightShiftAssign
                    } else {
                        TokenKind::RightShift
                    }
                } else if self.peek() == Some(0x003D) {
                    self.advance();
                    TokenKind::GreaterEquals
                } else {
                    TokenKind::Greater
                }
            }
            _ => return Err(self.error()),
        };
        Ok(self.finish(kind, start, preceded))
    }
}

fn push_code_unit(out: &mut String, unit: u16) {
    match char::from_u32(unit as u32) {
        Some(c) if unit < 0xD800 || unit > 0xDFFF => out.push(c),
        _ => out.push(char::REPLACEMENT_CHARACTER),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex_all(source: &str) -> Vec<TokenKind> {
        let buf = StringBuf::from_source(source);
        let mut lexer = Lexer::new(&buf);
        let mut kinds = Vec::new();
        loop {
            let token = lexer.next_token(true).expect("lex ok");
            if token.kind == TokenKind::Eof {
                break;
            }
            kinds.push(token.kind);
        }
        kinds
    }

    #[test]
    fn lexes_var_declaration() {
        assert_eq!(
            lex_all("var x = 1;"),
            vec![
                TokenKind::Var,
                TokenKind::Identifier,
                TokenKind::Assign,
                TokenKind::NumericLiteral,
                TokenKind::Semicolon,
            ]
        );
    }

    #[test]
    fn lexes_hex_numbers() {
        let buf = StringBuf::from_source("0xFF");
        let mut lexer = Lexer::new(&buf);
        let token = lexer.next_token(true).unwrap();
        assert_eq!(token.kind, TokenKind::NumericLiteral);
        assert_eq!(token.number, 255.0);
    }

    #[test]
    fn lexes_string_escapes() {
        let buf = StringBuf::from_source(r#"'a\nb'"#);
        let mut lexer = Lexer::new(&buf);
        let token = lexer.next_token(true).unwrap();
        assert_eq!(token.string_value.as_deref(), Some("a\nb"));
    }

    #[test]
    fn distinguishes_divide_from_regex_by_caller_hint() {
        let buf = StringBuf::from_source("/ab/g");
        let mut lexer = Lexer::new(&buf);
        let token = lexer.next_token(true).unwrap();
        assert_eq!(token.kind, TokenKind::RegexLiteral);
        assert_eq!(token.regex_pattern.as_deref(), Some("ab"));
        assert_eq!(token.regex_flags.as_deref(), Some("g"));
    }

    #[test]
    fn division_when_regex_not_allowed() {
        let buf = StringBuf::from_source("/ 2");
        let mut lexer = Lexer::new(&buf);
        let token = lexer.next_token(false).unwrap();
        assert_eq!(token.kind, TokenKind::Slash);
    }

    #[test]
    fn tracks_line_terminator_for_asi() {
        let buf = StringBuf::from_source("a\nb");
        let mut lexer = Lexer::new(&buf);
        let a = lexer.next_token(true).unwrap();
        let b = lexer.next_token(true).unwrap();
        assert!(!a.preceded_by_line_terminator);
        assert!(b.preceded_by_line_terminator);
    }

    #[test]
    fn unterminated_block_comment_is_a_lex_error() {
        let buf = StringBuf::from_source("/* unterminated");
        let mut lexer = Lexer::new(&buf);
        assert!(lexer.next_token(true).is_err());
    }
}
