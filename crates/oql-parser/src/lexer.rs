//! Lexer for the OQL object-query dialect.
//!
//! Converts query text into a stream of tokens. Every token keeps its
//! verbatim source slice, so the classification here never destroys
//! information the renderer needs. Uses memchr for accelerated quote
//! scanning. Tracks line/column for error reporting.
//!
//! Keywords are recognized case-insensitively but stay usable as
//! identifiers: the lexer only records the *candidate* kind, and the parser
//! decides per grammar position which reading wins.

use memchr::memchr;

use oql_ast::{Span, Token, TokenKind};

/// A malformed character sequence: unterminated literal, invalid escape,
/// unexpected character.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{col}: {reason}")]
pub struct LexError {
    pub span: Span,
    pub line: u32,
    pub col: u32,
    pub reason: String,
}

/// Query lexer producing a token stream from source text.
pub struct Lexer<'a> {
    /// The source bytes (UTF-8).
    src: &'a [u8],
    /// Current byte offset into src.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub fn new(source: &'a str) -> Self {
        Self {
            src: source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Tokenize the entire input. The final token is always `Eof`.
    pub fn tokenize(source: &'a str) -> Result<Vec<Token>, LexError> {
        let mut lexer = Self::new(source);
        let mut tokens = Vec::new();
        loop {
            let tok = lexer.next_token()?;
            let is_eof = tok.kind == TokenKind::Eof;
            tokens.push(tok);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    /// Produce the next token.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;

        if self.pos >= self.src.len() {
            return Ok(self.token(TokenKind::Eof, start, start_line, start_col));
        }

        let ch = self.src[self.pos];
        let kind = match ch {
            b'\'' => self.lex_string(b'\'', TokenKind::StrLit)?,
            b'"' => self.lex_string(b'"', TokenKind::JavaStrLit)?,
            b'X' | b'x' if self.peek_at(1) == Some(b'\'') => self.lex_binary()?,
            b'{' => self.lex_brace_literal()?,
            b'0'..=b'9' => self.lex_number()?,
            b'.' if self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) => self.lex_number()?,
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' => self.lex_identifier(),
            b'?' => self.lex_positional_param(),
            b':' => self.lex_colon(),
            b'+' => {
                self.advance();
                TokenKind::Plus
            }
            b'-' => {
                self.advance();
                TokenKind::Minus
            }
            b'*' => {
                self.advance();
                TokenKind::Star
            }
            b'/' => {
                self.advance();
                TokenKind::Slash
            }
            b'%' => {
                self.advance();
                TokenKind::Percent
            }
            b'|' => {
                if self.peek_at(1) == Some(b'|') {
                    self.advance();
                    self.advance();
                    TokenKind::PipePipe
                } else {
                    return Err(self.err_here("unexpected character '|'"));
                }
            }
            b'=' => {
                self.advance();
                TokenKind::Eq
            }
            b'!' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance();
                    self.advance();
                    TokenKind::BangEq
                } else {
                    return Err(self.err_here("unexpected character '!'"));
                }
            }
            b'^' => {
                if self.peek_at(1) == Some(b'=') {
                    self.advance();
                    self.advance();
                    TokenKind::CaretEq
                } else {
                    return Err(self.err_here("unexpected character '^'"));
                }
            }
            b'<' => {
                self.advance();
                match self.peek() {
                    Some(b'=') => {
                        self.advance();
                        TokenKind::LtEq
                    }
                    Some(b'>') => {
                        self.advance();
                        TokenKind::LtGt
                    }
                    _ => TokenKind::Lt,
                }
            }
            b'>' => {
                self.advance();
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                }
            }
            b'.' => {
                self.advance();
                TokenKind::Dot
            }
            b',' => {
                self.advance();
                TokenKind::Comma
            }
            b'(' => {
                self.advance();
                TokenKind::LeftParen
            }
            b')' => {
                self.advance();
                TokenKind::RightParen
            }
            b'[' => {
                self.advance();
                TokenKind::LeftBracket
            }
            b']' => {
                self.advance();
                TokenKind::RightBracket
            }
            other => {
                return Err(self.err_here(format!("unexpected character '{}'", other as char)));
            }
        };

        Ok(self.token(kind, start, start_line, start_col))
    }

    // -----------------------------------------------------------------------
    // Cursor helpers
    // -----------------------------------------------------------------------

    fn peek(&self) -> Option<u8> {
        self.src.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.src.get(self.pos + offset).copied()
    }

    fn advance(&mut self) {
        if let Some(b) = self.peek() {
            if b == b'\n' {
                self.line += 1;
                self.col = 1;
            } else {
                self.col += 1;
            }
            self.pos += 1;
        }
    }

    fn advance_n(&mut self, n: usize) {
        for _ in 0..n {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            if b == b' ' || b == b'\t' || b == b'\r' || b == b'\n' {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn token(&self, kind: TokenKind, start: usize, line: u32, col: u32) -> Token {
        Token {
            kind,
            text: String::from_utf8_lossy(&self.src[start..self.pos]).into_owned(),
            span: Span::new(start as u32, self.pos as u32),
            line,
            col,
        }
    }

    fn err_here(&self, reason: impl Into<String>) -> LexError {
        LexError {
            span: Span::new(self.pos as u32, self.pos as u32),
            line: self.line,
            col: self.col,
            reason: reason.into(),
        }
    }

    fn err_at(&self, start: usize, line: u32, col: u32, reason: impl Into<String>) -> LexError {
        LexError {
            span: Span::new(start as u32, self.pos as u32),
            line,
            col,
            reason: reason.into(),
        }
    }

    // -----------------------------------------------------------------------
    // Literals
    // -----------------------------------------------------------------------

    /// Lex a quoted literal with doubled-quote escaping. The token text keeps
    /// the quotes and escapes verbatim.
    fn lex_string(&mut self, quote: u8, kind: TokenKind) -> Result<TokenKind, LexError> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        self.advance(); // opening quote

        loop {
            let remaining = &self.src[self.pos..];
            match memchr(quote, remaining) {
                Some(offset) => {
                    self.advance_n(offset + 1);
                    // Doubled quote is an escape, keep scanning.
                    if self.peek() == Some(quote) {
                        self.advance();
                    } else {
                        return Ok(kind);
                    }
                }
                None => {
                    self.advance_n(remaining.len());
                    return Err(self.err_at(
                        start,
                        start_line,
                        start_col,
                        "unterminated string literal",
                    ));
                }
            }
        }
    }

    /// Lex a binary literal `X'CAFE'` / `x'cafe'`.
    fn lex_binary(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        self.advance(); // X
        self.advance(); // '

        let remaining = &self.src[self.pos..];
        match memchr(b'\'', remaining) {
            Some(offset) => {
                let hex = &self.src[self.pos..self.pos + offset];
                self.advance_n(offset + 1);
                if hex.iter().all(u8::is_ascii_hexdigit) {
                    Ok(TokenKind::BinaryLit)
                } else {
                    Err(self.err_at(
                        start,
                        start_line,
                        start_col,
                        "invalid hex digit in binary literal",
                    ))
                }
            }
            None => {
                self.advance_n(remaining.len());
                Err(self.err_at(start, start_line, start_col, "unterminated binary literal"))
            }
        }
    }

    /// Lex a `{...}` literal: JDBC date/time/timestamp escapes and the
    /// byte-list binary form. Content is preserved verbatim and not
    /// validated against any date grammar.
    fn lex_brace_literal(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;

        let remaining = &self.src[self.pos..];
        let Some(offset) = memchr(b'}', remaining) else {
            self.advance_n(remaining.len());
            return Err(self.err_at(start, start_line, start_col, "unterminated brace literal"));
        };
        let content = &self.src[self.pos + 1..self.pos + offset];
        self.advance_n(offset + 1);

        let trimmed: &[u8] = match content.iter().position(|b| !b.is_ascii_whitespace()) {
            Some(i) => &content[i..],
            None => &[],
        };
        if trimmed.len() >= 2 && trimmed[0].eq_ignore_ascii_case(&b't') && trimmed[1].eq_ignore_ascii_case(&b's') {
            Ok(TokenKind::JdbcTimestampLit)
        } else if trimmed.len() >= 2 && trimmed[0].eq_ignore_ascii_case(&b'd') && trimmed[1] == b'\'' {
            Ok(TokenKind::JdbcDateLit)
        } else if trimmed.len() >= 2 && trimmed[0].eq_ignore_ascii_case(&b't') && trimmed[1] == b'\'' {
            Ok(TokenKind::JdbcTimeLit)
        } else if trimmed.len() >= 2 && trimmed[0] == b'0' && trimmed[1].eq_ignore_ascii_case(&b'x') {
            Ok(TokenKind::BraceBinaryLit)
        } else {
            Err(self.err_at(start, start_line, start_col, "unrecognized brace literal"))
        }
    }

    /// True if the bytes at `pos` spell a bare date: `NNNN-NN-NN`.
    fn date_ahead(&self) -> bool {
        let b = &self.src[self.pos..];
        b.len() >= 10
            && b[..4].iter().all(u8::is_ascii_digit)
            && b[4] == b'-'
            && b[5..7].iter().all(u8::is_ascii_digit)
            && b[7] == b'-'
            && b[8..10].iter().all(u8::is_ascii_digit)
            && !b.get(10).is_some_and(|c| c.is_ascii_alphanumeric())
    }

    /// Length of a bare time `N[N]:NN:NN` with optional `±N[:NN]` zone
    /// suffix at `pos`, or `None`.
    fn time_ahead(&self) -> Option<usize> {
        let b = &self.src[self.pos..];
        let mut i = 0;
        while i < 2 && b.get(i).is_some_and(u8::is_ascii_digit) {
            i += 1;
        }
        if i == 0 || b.get(i) != Some(&b':') {
            return None;
        }
        i += 1;
        let minutes = b.get(i..i + 2)?;
        if !minutes.iter().all(u8::is_ascii_digit) || b.get(i + 2) != Some(&b':') {
            return None;
        }
        i += 3;
        let seconds = b.get(i..i + 2)?;
        if !seconds.iter().all(u8::is_ascii_digit) {
            return None;
        }
        i += 2;
        // Zone offset: +1, -1:00, +1:01
        if b.get(i) == Some(&b'+') || b.get(i) == Some(&b'-') {
            let mut j = i + 1;
            while j < i + 3 && b.get(j).is_some_and(u8::is_ascii_digit) {
                j += 1;
            }
            if j > i + 1 {
                i = j;
                if b.get(i) == Some(&b':')
                    && b.get(i + 1..i + 3).is_some_and(|m| m.iter().all(u8::is_ascii_digit))
                {
                    i += 3;
                }
            }
        }
        Some(i)
    }

    /// Lex a number, date, or time. Numbers support underscores as digit
    /// separators, exponents, and the `L`/`F`/`D`/`BI`/`BD` suffixes.
    fn lex_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;

        if self.date_ahead() {
            self.advance_n(10);
            return Ok(TokenKind::DateLit);
        }
        if let Some(len) = self.time_ahead() {
            self.advance_n(len);
            return Ok(TokenKind::TimeLit);
        }

        // Hex integer
        if self.src[self.pos] == b'0' && self.peek_at(1).is_some_and(|c| c == b'x' || c == b'X') {
            self.advance_n(2);
            let digits_start = self.pos;
            while self.peek().is_some_and(|c| c.is_ascii_hexdigit()) {
                self.advance();
            }
            if self.pos == digits_start {
                return Err(self.err_at(start, start_line, start_col, "empty hex literal"));
            }
            return Ok(TokenKind::HexIntLit);
        }

        let mut is_float = self.src[self.pos] == b'.';

        while self.peek().is_some_and(|c| c.is_ascii_digit() || c == b'_') {
            self.advance();
        }
        if self.peek() == Some(b'.') && self.peek_at(1).is_some_and(|c| c.is_ascii_digit()) {
            is_float = true;
            self.advance();
            while self.peek().is_some_and(|c| c.is_ascii_digit() || c == b'_') {
                self.advance();
            }
        }
        // Exponent: 1e+2, 3.14e32 — only when digits follow, so a trailing
        // `e` stays available as a suffix/identifier error below.
        if self.peek().is_some_and(|c| c == b'e' || c == b'E') {
            let mut j = 1;
            if self.peek_at(1).is_some_and(|c| c == b'+' || c == b'-') {
                j = 2;
            }
            if self.peek_at(j).is_some_and(|c| c.is_ascii_digit()) {
                is_float = true;
                self.advance_n(j);
                while self.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.advance();
                }
            }
        }

        // Type suffix
        let suffix_start = self.pos;
        while self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
            self.advance();
        }
        let suffix = String::from_utf8_lossy(&self.src[suffix_start..self.pos]).to_ascii_uppercase();
        match suffix.as_str() {
            "" => {
                if is_float {
                    Ok(TokenKind::DoubleLit)
                } else {
                    Ok(TokenKind::IntLit)
                }
            }
            "L" => Ok(TokenKind::LongLit),
            "BI" => Ok(TokenKind::BigIntLit),
            "F" => Ok(TokenKind::FloatLit),
            "D" => Ok(TokenKind::DoubleLit),
            "BD" => Ok(TokenKind::BigDecimalLit),
            _ => Err(self.err_at(
                start,
                start_line,
                start_col,
                format!("invalid numeric suffix '{suffix}'"),
            )),
        }
    }

    /// Lex an identifier or keyword candidate.
    fn lex_identifier(&mut self) -> TokenKind {
        let start = self.pos;
        self.advance();
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'$')
        {
            self.advance();
        }
        let text = String::from_utf8_lossy(&self.src[start..self.pos]);
        TokenKind::lookup_keyword(&text).unwrap_or(TokenKind::Ident)
    }

    /// Lex `?` or `?1`.
    fn lex_positional_param(&mut self) -> TokenKind {
        self.advance();
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        TokenKind::PositionalParam
    }

    /// Lex `:name`, or a bare `:` (slice separator).
    fn lex_colon(&mut self) -> TokenKind {
        self.advance();
        if self
            .peek()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_' || c == b'$')
        {
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_' || c == b'$')
            {
                self.advance();
            }
            TokenKind::NamedParam
        } else {
            TokenKind::Colon
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        Lexer::tokenize(src).expect("lexing should succeed")
    }

    fn kinds(src: &str) -> Vec<TokenKind> {
        lex(src).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn keywords_fold_case_but_keep_text() {
        let tokens = lex("SeLeCt foo");
        assert_eq!(tokens[0].kind, TokenKind::KwSelect);
        assert_eq!(tokens[0].text, "SeLeCt");
        assert_eq!(tokens[1].kind, TokenKind::Ident);
        assert_eq!(tokens[1].text, "foo");
    }

    #[test]
    fn number_suffixes() {
        assert_eq!(
            kinds("1 1L 1_000 1bi 1.1f 2.2d 2.2bd 100.5 1e+2 1e+2F 3.14e32D"),
            vec![
                TokenKind::IntLit,
                TokenKind::LongLit,
                TokenKind::IntLit,
                TokenKind::BigIntLit,
                TokenKind::FloatLit,
                TokenKind::DoubleLit,
                TokenKind::BigDecimalLit,
                TokenKind::DoubleLit,
                TokenKind::DoubleLit,
                TokenKind::FloatLit,
                TokenKind::DoubleLit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn underscored_literal_keeps_text() {
        let tokens = lex("1_000L");
        assert_eq!(tokens[0].kind, TokenKind::LongLit);
        assert_eq!(tokens[0].text, "1_000L");
    }

    #[test]
    fn string_with_doubled_quote() {
        let tokens = lex("'Joe''s'");
        assert_eq!(tokens[0].kind, TokenKind::StrLit);
        assert_eq!(tokens[0].text, "'Joe''s'");
    }

    #[test]
    fn double_quoted_string() {
        let tokens = lex("\"cost overrun\"");
        assert_eq!(tokens[0].kind, TokenKind::JavaStrLit);
    }

    #[test]
    fn parameters() {
        let tokens = lex("? ?1 :name :type");
        assert_eq!(tokens[0].kind, TokenKind::PositionalParam);
        assert_eq!(tokens[0].text, "?");
        assert_eq!(tokens[1].kind, TokenKind::PositionalParam);
        assert_eq!(tokens[1].text, "?1");
        assert_eq!(tokens[2].kind, TokenKind::NamedParam);
        assert_eq!(tokens[2].text, ":name");
        // A parameter named like a keyword is still a parameter.
        assert_eq!(tokens[3].kind, TokenKind::NamedParam);
        assert_eq!(tokens[3].text, ":type");
    }

    #[test]
    fn brace_literals() {
        assert_eq!(kinds("{d'2012-01-03'}")[0], TokenKind::JdbcDateLit);
        assert_eq!(kinds("{t'09:00:00'}")[0], TokenKind::JdbcTimeLit);
        assert_eq!(kinds("{ts'2012-01-03 09:00:00'}")[0], TokenKind::JdbcTimestampLit);
        // Lexically valid even when the content is not date-parseable.
        assert_eq!(kinds("{ts'something weird'}")[0], TokenKind::JdbcTimestampLit);
        assert_eq!(kinds("{ts2012-01-03 09:00:00+1:00}")[0], TokenKind::JdbcTimestampLit);
        assert_eq!(kinds("{0xDE, 0xAD, 0xBE, 0xEF}")[0], TokenKind::BraceBinaryLit);
    }

    #[test]
    fn brace_literal_keeps_content_verbatim() {
        let tokens = lex("{ts2012-01-03 09:00:00+1}");
        assert_eq!(tokens[0].text, "{ts2012-01-03 09:00:00+1}");
    }

    #[test]
    fn binary_literals() {
        assert_eq!(kinds("X'DEADBEEF'")[0], TokenKind::BinaryLit);
        let tokens = lex("x'deadbeef'");
        assert_eq!(tokens[0].kind, TokenKind::BinaryLit);
        assert_eq!(tokens[0].text, "x'deadbeef'");
    }

    #[test]
    fn bare_date_and_time() {
        assert_eq!(
            kinds("2012-01-03 09:00:00+1:01"),
            vec![TokenKind::DateLit, TokenKind::TimeLit, TokenKind::Eof]
        );
        let tokens = lex("09:00:00-1:00");
        assert_eq!(tokens[0].text, "09:00:00-1:00");
    }

    #[test]
    fn slice_colon_is_not_a_time() {
        assert_eq!(
            kinds("[0:1]"),
            vec![
                TokenKind::LeftBracket,
                TokenKind::IntLit,
                TokenKind::Colon,
                TokenKind::IntLit,
                TokenKind::RightBracket,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn operators() {
        assert_eq!(
            kinds("= != <> ^= < <= > >= || + - * / %"),
            vec![
                TokenKind::Eq,
                TokenKind::BangEq,
                TokenKind::LtGt,
                TokenKind::CaretEq,
                TokenKind::Lt,
                TokenKind::LtEq,
                TokenKind::Gt,
                TokenKind::GtEq,
                TokenKind::PipePipe,
                TokenKind::Plus,
                TokenKind::Minus,
                TokenKind::Star,
                TokenKind::Slash,
                TokenKind::Percent,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn line_and_column_tracking() {
        let tokens = lex("select\n  name");
        assert_eq!(tokens[0].line, 1);
        assert_eq!(tokens[0].col, 1);
        assert_eq!(tokens[1].line, 2);
        assert_eq!(tokens[1].col, 3);
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::tokenize("select 'oops").unwrap_err();
        assert!(err.reason.contains("unterminated"));
        assert_eq!(err.line, 1);
    }

    #[test]
    fn unterminated_brace_literal_is_an_error() {
        let err = Lexer::tokenize("{ts'2012").unwrap_err();
        assert!(err.reason.contains("unterminated"));
    }

    #[test]
    fn invalid_numeric_suffix_is_an_error() {
        let err = Lexer::tokenize("select 1q").unwrap_err();
        assert!(err.reason.contains("suffix"));
    }

    #[test]
    fn invalid_hex_in_binary_literal_is_an_error() {
        let err = Lexer::tokenize("X'NOPE'").unwrap_err();
        assert!(err.reason.contains("hex"));
    }
}
