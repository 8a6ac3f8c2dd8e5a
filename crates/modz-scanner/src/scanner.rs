//! Scanner state machine.
//!
//! The scanner produces one token per `scan()` call and never looks at the
//! grammar. Tokens whose meaning depends on parser context (`/` vs. a regular
//! expression, `}` vs. a template continuation, `>` vs. `>>`) are produced in
//! their simplest form and re-scanned on request.

use std::sync::Arc;

use bitflags::bitflags;
use memchr::{memchr, memmem};

use crate::char_codes::{
    is_binary_digit, is_identifier_part, is_identifier_start, is_line_break, is_octal_digit,
    is_white_space_single_line,
};
use crate::syntax_kind::{SyntaxKind, text_to_keyword};

bitflags! {
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct TokenFlags: u16 {
        const PRECEDING_LINE_BREAK = 1 << 0;
        const UNTERMINATED = 1 << 1;
        const EXTENDED_ESCAPE = 1 << 2;
        const SCIENTIFIC = 1 << 3;
        const HEX_SPECIFIER = 1 << 4;
        const OCTAL_SPECIFIER = 1 << 5;
        const BINARY_SPECIFIER = 1 << 6;
        const CONTAINS_SEPARATOR = 1 << 7;
    }
}

/// A lexical error the scanner recovered from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScannerDiagnostic {
    pub pos: usize,
    pub length: usize,
    pub message: &'static str,
}

/// Saved scanner position for speculative parsing.
#[derive(Clone, Debug)]
pub struct ScannerSnapshot {
    pos: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    token_value: String,
    token_flags: TokenFlags,
    diagnostic_count: usize,
}

pub struct ScannerState {
    text: Arc<str>,
    pos: usize,
    end: usize,
    full_start_pos: usize,
    token_start: usize,
    token: SyntaxKind,
    /// Cooked value for strings and templates, raw text for everything else.
    token_value: String,
    token_flags: TokenFlags,
    diagnostics: Vec<ScannerDiagnostic>,
}

impl ScannerState {
    pub fn new(text: Arc<str>) -> ScannerState {
        let end = text.len();
        ScannerState {
            text,
            pos: 0,
            end,
            full_start_pos: 0,
            token_start: 0,
            token: SyntaxKind::Unknown,
            token_value: String::new(),
            token_flags: TokenFlags::empty(),
            diagnostics: Vec::new(),
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn get_text(&self) -> &Arc<str> {
        &self.text
    }

    /// Start of the current token, after leading trivia.
    #[inline]
    pub fn get_token_pos(&self) -> u32 {
        self.token_start as u32
    }

    /// One past the last byte of the current token.
    #[inline]
    pub fn get_token_end(&self) -> u32 {
        self.pos as u32
    }

    /// Start of the current token including leading trivia.
    #[inline]
    pub fn get_token_full_start(&self) -> u32 {
        self.full_start_pos as u32
    }

    #[inline]
    pub fn get_token_value(&self) -> &str {
        &self.token_value
    }

    /// Raw source text of the current token.
    pub fn get_token_text(&self) -> &str {
        self.text.get(self.token_start..self.pos).unwrap_or_default()
    }

    #[inline]
    pub fn has_preceding_line_break(&self) -> bool {
        self.token_flags.contains(TokenFlags::PRECEDING_LINE_BREAK)
    }

    #[inline]
    pub fn is_unterminated(&self) -> bool {
        self.token_flags.contains(TokenFlags::UNTERMINATED)
    }

    /// Errors in comments and numeric literals scanned so far.
    pub fn get_scanner_diagnostics(&self) -> &[ScannerDiagnostic] {
        &self.diagnostics
    }

    pub fn save_state(&self) -> ScannerSnapshot {
        ScannerSnapshot {
            pos: self.pos,
            full_start_pos: self.full_start_pos,
            token_start: self.token_start,
            token: self.token,
            token_value: self.token_value.clone(),
            token_flags: self.token_flags,
            diagnostic_count: self.diagnostics.len(),
        }
    }

    pub fn restore_state(&mut self, snapshot: ScannerSnapshot) {
        self.pos = snapshot.pos;
        self.full_start_pos = snapshot.full_start_pos;
        self.token_start = snapshot.token_start;
        self.token = snapshot.token;
        self.token_value = snapshot.token_value;
        self.token_flags = snapshot.token_flags;
        self.diagnostics.truncate(snapshot.diagnostic_count);
    }

    // =========================================================================
    // Character helpers
    // =========================================================================

    #[inline]
    fn byte_at(&self, pos: usize) -> u8 {
        self.text.as_bytes().get(pos).copied().unwrap_or(0)
    }

    #[inline]
    fn char_at(&self, pos: usize) -> Option<char> {
        self.text.get(pos..).and_then(|rest| rest.chars().next())
    }

    fn finish(&mut self, kind: SyntaxKind) -> SyntaxKind {
        self.token = kind;
        kind
    }

    fn punct(&mut self, kind: SyntaxKind, len: usize) -> SyntaxKind {
        self.pos += len;
        self.finish(kind)
    }

    fn error(&mut self, pos: usize, length: usize, message: &'static str) {
        // Re-scanning a token must not report it twice.
        if self.diagnostics.iter().rev().any(|diag| diag.pos == pos) {
            return;
        }
        self.diagnostics.push(ScannerDiagnostic { pos, length, message });
    }

    // =========================================================================
    // Main scan loop
    // =========================================================================

    pub fn scan(&mut self) -> SyntaxKind {
        self.full_start_pos = self.pos;
        self.token_flags = TokenFlags::empty();
        self.token_value.clear();

        loop {
            self.token_start = self.pos;
            let Some(ch) = self.char_at(self.pos) else {
                return self.finish(SyntaxKind::EndOfFileToken);
            };

            if is_line_break(ch) {
                self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
                self.pos += ch.len_utf8();
                continue;
            }
            if is_white_space_single_line(ch) {
                self.pos += ch.len_utf8();
                continue;
            }

            let next = self.byte_at(self.pos + 1);
            return match ch {
                '#' if self.pos == 0 && next == b'!' => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if next == b'/' => {
                    self.skip_line_comment();
                    continue;
                }
                '/' if next == b'*' => {
                    self.skip_block_comment();
                    continue;
                }
                '/' if next == b'=' => self.punct(SyntaxKind::SlashEqualsToken, 2),
                '/' => self.punct(SyntaxKind::SlashToken, 1),
                '"' | '\'' => self.scan_string(ch),
                '`' => {
                    self.pos += 1;
                    self.scan_template(true)
                }
                '0'..='9' => self.scan_number(),
                '.' if next.is_ascii_digit() => self.scan_number(),
                '.' if next == b'.' && self.byte_at(self.pos + 2) == b'.' => {
                    self.punct(SyntaxKind::DotDotDotToken, 3)
                }
                '.' => self.punct(SyntaxKind::DotToken, 1),
                '?' => self.scan_question(next),
                '!' => match (next, self.byte_at(self.pos + 2)) {
                    (b'=', b'=') => self.punct(SyntaxKind::ExclamationEqualsEqualsToken, 3),
                    (b'=', _) => self.punct(SyntaxKind::ExclamationEqualsToken, 2),
                    _ => self.punct(SyntaxKind::ExclamationToken, 1),
                },
                '=' => match (next, self.byte_at(self.pos + 2)) {
                    (b'=', b'=') => self.punct(SyntaxKind::EqualsEqualsEqualsToken, 3),
                    (b'=', _) => self.punct(SyntaxKind::EqualsEqualsToken, 2),
                    (b'>', _) => self.punct(SyntaxKind::EqualsGreaterThanToken, 2),
                    _ => self.punct(SyntaxKind::EqualsToken, 1),
                },
                '<' => match (next, self.byte_at(self.pos + 2)) {
                    (b'<', b'=') => self.punct(SyntaxKind::LessThanLessThanEqualsToken, 3),
                    (b'<', _) => self.punct(SyntaxKind::LessThanLessThanToken, 2),
                    (b'=', _) => self.punct(SyntaxKind::LessThanEqualsToken, 2),
                    _ => self.punct(SyntaxKind::LessThanToken, 1),
                },
                // `>>`, `>=` and friends come from re_scan_greater_token
                '>' => self.punct(SyntaxKind::GreaterThanToken, 1),
                '+' => match next {
                    b'+' => self.punct(SyntaxKind::PlusPlusToken, 2),
                    b'=' => self.punct(SyntaxKind::PlusEqualsToken, 2),
                    _ => self.punct(SyntaxKind::PlusToken, 1),
                },
                '-' => match next {
                    b'-' => self.punct(SyntaxKind::MinusMinusToken, 2),
                    b'=' => self.punct(SyntaxKind::MinusEqualsToken, 2),
                    _ => self.punct(SyntaxKind::MinusToken, 1),
                },
                '*' => match (next, self.byte_at(self.pos + 2)) {
                    (b'*', b'=') => self.punct(SyntaxKind::AsteriskAsteriskEqualsToken, 3),
                    (b'*', _) => self.punct(SyntaxKind::AsteriskAsteriskToken, 2),
                    (b'=', _) => self.punct(SyntaxKind::AsteriskEqualsToken, 2),
                    _ => self.punct(SyntaxKind::AsteriskToken, 1),
                },
                '%' => match next {
                    b'=' => self.punct(SyntaxKind::PercentEqualsToken, 2),
                    _ => self.punct(SyntaxKind::PercentToken, 1),
                },
                '&' => match (next, self.byte_at(self.pos + 2)) {
                    (b'&', b'=') => self.punct(SyntaxKind::AmpersandAmpersandEqualsToken, 3),
                    (b'&', _) => self.punct(SyntaxKind::AmpersandAmpersandToken, 2),
                    (b'=', _) => self.punct(SyntaxKind::AmpersandEqualsToken, 2),
                    _ => self.punct(SyntaxKind::AmpersandToken, 1),
                },
                '|' => match (next, self.byte_at(self.pos + 2)) {
                    (b'|', b'=') => self.punct(SyntaxKind::BarBarEqualsToken, 3),
                    (b'|', _) => self.punct(SyntaxKind::BarBarToken, 2),
                    (b'=', _) => self.punct(SyntaxKind::BarEqualsToken, 2),
                    _ => self.punct(SyntaxKind::BarToken, 1),
                },
                '^' => match next {
                    b'=' => self.punct(SyntaxKind::CaretEqualsToken, 2),
                    _ => self.punct(SyntaxKind::CaretToken, 1),
                },
                '~' => self.punct(SyntaxKind::TildeToken, 1),
                '(' => self.punct(SyntaxKind::OpenParenToken, 1),
                ')' => self.punct(SyntaxKind::CloseParenToken, 1),
                '[' => self.punct(SyntaxKind::OpenBracketToken, 1),
                ']' => self.punct(SyntaxKind::CloseBracketToken, 1),
                '{' => self.punct(SyntaxKind::OpenBraceToken, 1),
                '}' => self.punct(SyntaxKind::CloseBraceToken, 1),
                ';' => self.punct(SyntaxKind::SemicolonToken, 1),
                ',' => self.punct(SyntaxKind::CommaToken, 1),
                ':' => self.punct(SyntaxKind::ColonToken, 1),
                '@' => self.punct(SyntaxKind::AtToken, 1),
                '#' => {
                    self.pos += 1;
                    if self.char_at(self.pos).is_some_and(is_identifier_start) {
                        self.scan_identifier_rest();
                        self.token_value = self.get_token_text().to_string();
                        self.finish(SyntaxKind::PrivateIdentifier)
                    } else {
                        self.finish(SyntaxKind::Unknown)
                    }
                }
                c if is_identifier_start(c) || c == '\\' => self.scan_identifier(),
                c => {
                    self.pos += c.len_utf8();
                    self.finish(SyntaxKind::Unknown)
                }
            };
        }
    }

    fn scan_question(&mut self, next: u8) -> SyntaxKind {
        match (next, self.byte_at(self.pos + 2)) {
            (b'?', b'=') => self.punct(SyntaxKind::QuestionQuestionEqualsToken, 3),
            (b'?', _) => self.punct(SyntaxKind::QuestionQuestionToken, 2),
            // `a?.5:b` is a conditional, not an optional chain
            (b'.', d) if !d.is_ascii_digit() => self.punct(SyntaxKind::QuestionDotToken, 2),
            _ => self.punct(SyntaxKind::QuestionToken, 1),
        }
    }

    // =========================================================================
    // Trivia
    // =========================================================================

    fn skip_line_comment(&mut self) {
        let rest = &self.text.as_bytes()[self.pos..];
        self.pos = match memchr(b'\n', rest) {
            Some(offset) => self.pos + offset,
            None => self.end,
        };
    }

    fn skip_block_comment(&mut self) {
        let body_start = self.pos + 2;
        let rest = &self.text.as_bytes()[body_start.min(self.end)..];
        let (body_end, next_pos) = match memmem::find(rest, b"*/") {
            Some(offset) => (body_start + offset, body_start + offset + 2),
            None => {
                self.error(self.end, 0, "'*/' expected.");
                (self.end, self.end)
            }
        };
        let body = &self.text[body_start.min(body_end)..body_end];
        if body.chars().any(is_line_break) {
            self.token_flags |= TokenFlags::PRECEDING_LINE_BREAK;
        }
        self.pos = next_pos;
    }

    // =========================================================================
    // Identifiers
    // =========================================================================

    fn scan_identifier_rest(&mut self) {
        while let Some(ch) = self.char_at(self.pos) {
            if is_identifier_part(ch) {
                self.pos += ch.len_utf8();
            } else if ch == '\\' && self.byte_at(self.pos + 1) == b'u' {
                self.token_flags |= TokenFlags::EXTENDED_ESCAPE;
                self.pos += 2;
                self.skip_unicode_escape_body();
            } else {
                break;
            }
        }
    }

    fn skip_unicode_escape_body(&mut self) {
        if self.byte_at(self.pos) == b'{' {
            while self.pos < self.end && self.byte_at(self.pos) != b'}' {
                self.pos += 1;
            }
            self.pos = (self.pos + 1).min(self.end);
        } else {
            self.pos = (self.pos + 4).min(self.end);
        }
    }

    fn scan_identifier(&mut self) -> SyntaxKind {
        if self.byte_at(self.pos) == b'\\' {
            self.pos += 1;
            if self.byte_at(self.pos) != b'u' {
                return self.finish(SyntaxKind::Unknown);
            }
            self.pos += 1;
            self.token_flags |= TokenFlags::EXTENDED_ESCAPE;
            self.skip_unicode_escape_body();
        } else if let Some(ch) = self.char_at(self.pos) {
            self.pos += ch.len_utf8();
        }
        self.scan_identifier_rest();

        let text = self.get_token_text().to_string();
        // Escaped keywords are plain identifiers.
        let kind = if self.token_flags.contains(TokenFlags::EXTENDED_ESCAPE) {
            SyntaxKind::Identifier
        } else {
            text_to_keyword(&text).unwrap_or(SyntaxKind::Identifier)
        };
        self.token_value = text;
        self.finish(kind)
    }

    // =========================================================================
    // Numbers
    // =========================================================================

    /// Scan a run of digits and `_` separators. Returns the number of digits.
    fn scan_digits(&mut self, is_digit: impl Fn(char) -> bool) -> usize {
        let start = self.pos;
        let mut digits = 0;
        let mut separator_allowed = false;
        while let Some(ch) = self.char_at(self.pos) {
            if is_digit(ch) {
                digits += 1;
                separator_allowed = true;
            } else if ch == '_' {
                self.token_flags |= TokenFlags::CONTAINS_SEPARATOR;
                if separator_allowed {
                    separator_allowed = false;
                } else if self.pos > start && self.byte_at(self.pos - 1) == b'_' {
                    self.error(self.pos, 1, "Multiple consecutive numeric separators are not permitted.");
                } else {
                    self.error(self.pos, 1, "Numeric separators are not allowed here.");
                }
            } else {
                break;
            }
            self.pos += 1;
        }
        if self.pos > start && self.byte_at(self.pos - 1) == b'_' {
            self.error(self.pos - 1, 1, "Numeric separators are not allowed here.");
        }
        digits
    }

    fn scan_number(&mut self) -> SyntaxKind {
        let first = self.byte_at(self.pos);
        let second = self.byte_at(self.pos + 1).to_ascii_lowercase();
        if first == b'0' && matches!(second, b'x' | b'o' | b'b') {
            self.pos += 2;
            let digits_start = self.pos;
            let (digits, expected) = match second {
                b'x' => {
                    self.token_flags |= TokenFlags::HEX_SPECIFIER;
                    (self.scan_digits(|c| c.is_ascii_hexdigit()), "Hexadecimal digit expected.")
                }
                b'o' => {
                    self.token_flags |= TokenFlags::OCTAL_SPECIFIER;
                    (self.scan_digits(is_octal_digit), "Octal digit expected.")
                }
                _ => {
                    self.token_flags |= TokenFlags::BINARY_SPECIFIER;
                    (self.scan_digits(is_binary_digit), "Binary digit expected.")
                }
            };
            if digits == 0 {
                self.error(digits_start, 0, expected);
            }
        } else {
            self.scan_digits(|c| c.is_ascii_digit());
            if self.byte_at(self.pos) == b'.' {
                self.pos += 1;
                self.scan_digits(|c| c.is_ascii_digit());
            }
            if matches!(self.byte_at(self.pos), b'e' | b'E') {
                let sign = self.byte_at(self.pos + 1);
                let digit_at = if matches!(sign, b'+' | b'-') {
                    self.pos + 2
                } else {
                    self.pos + 1
                };
                if self.byte_at(digit_at).is_ascii_digit() {
                    self.token_flags |= TokenFlags::SCIENTIFIC;
                    self.pos = digit_at;
                    self.scan_digits(|c| c.is_ascii_digit());
                }
            }
        }

        let kind = if self.byte_at(self.pos) == b'n' {
            self.pos += 1;
            SyntaxKind::BigIntLiteral
        } else {
            SyntaxKind::NumericLiteral
        };
        self.token_value = self.get_token_text().to_string();
        self.finish(kind)
    }

    // =========================================================================
    // Strings and templates
    // =========================================================================

    fn scan_string(&mut self, quote: char) -> SyntaxKind {
        self.pos += 1;
        let mut value = String::new();
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            };
            if ch == quote {
                self.pos += 1;
                break;
            }
            if ch == '\\' {
                self.scan_escape_sequence(&mut value);
                continue;
            }
            if ch == '\n' || ch == '\r' {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            value.push(ch);
            self.pos += ch.len_utf8();
        }
        self.token_value = value;
        self.finish(SyntaxKind::StringLiteral)
    }

    /// Scan template characters up to the closing backtick or the next `${`.
    /// `self.pos` must be just past the opening backtick or `}`.
    fn scan_template(&mut self, starts_with_backtick: bool) -> SyntaxKind {
        let mut value = String::new();
        let kind = loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break if starts_with_backtick {
                    SyntaxKind::NoSubstitutionTemplateLiteral
                } else {
                    SyntaxKind::TemplateTail
                };
            };
            match ch {
                '`' => {
                    self.pos += 1;
                    break if starts_with_backtick {
                        SyntaxKind::NoSubstitutionTemplateLiteral
                    } else {
                        SyntaxKind::TemplateTail
                    };
                }
                '$' if self.byte_at(self.pos + 1) == b'{' => {
                    self.pos += 2;
                    break if starts_with_backtick {
                        SyntaxKind::TemplateHead
                    } else {
                        SyntaxKind::TemplateMiddle
                    };
                }
                '\\' => self.scan_escape_sequence(&mut value),
                '\r' => {
                    // CRLF and lone CR are normalized to LF in cooked text.
                    self.pos += 1;
                    if self.byte_at(self.pos) == b'\n' {
                        self.pos += 1;
                    }
                    value.push('\n');
                }
                _ => {
                    value.push(ch);
                    self.pos += ch.len_utf8();
                }
            }
        };
        self.token_value = value;
        self.finish(kind)
    }

    fn scan_hex_value(&mut self, digits: usize) -> Option<u32> {
        let text = self.text.get(self.pos..self.pos + digits)?;
        let value = u32::from_str_radix(text, 16).ok()?;
        self.pos += digits;
        Some(value)
    }

    /// Cook one escape sequence starting at a backslash.
    fn scan_escape_sequence(&mut self, out: &mut String) {
        self.pos += 1;
        let Some(ch) = self.char_at(self.pos) else {
            self.token_flags |= TokenFlags::UNTERMINATED;
            return;
        };
        self.pos += ch.len_utf8();
        match ch {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{0008}'),
            'f' => out.push('\u{000C}'),
            'v' => out.push('\u{000B}'),
            '0' if !self.byte_at(self.pos).is_ascii_digit() => out.push('\0'),
            'x' => match self.scan_hex_value(2).and_then(char::from_u32) {
                Some(c) => out.push(c),
                None => out.push('x'),
            },
            'u' => {
                let code = if self.byte_at(self.pos) == b'{' {
                    self.token_flags |= TokenFlags::EXTENDED_ESCAPE;
                    let start = self.pos + 1;
                    let close = self.text[start.min(self.end)..]
                        .find('}')
                        .map(|offset| start + offset);
                    close.and_then(|close| {
                        let code = u32::from_str_radix(&self.text[start..close], 16).ok();
                        self.pos = close + 1;
                        code
                    })
                } else {
                    self.scan_hex_value(4)
                };
                match code.and_then(char::from_u32) {
                    Some(c) => out.push(c),
                    None => out.push('\u{FFFD}'),
                }
            }
            // Line continuation
            '\r' => {
                if self.byte_at(self.pos) == b'\n' {
                    self.pos += 1;
                }
            }
            '\n' | '\u{2028}' | '\u{2029}' => {}
            other => out.push(other),
        }
    }

    // =========================================================================
    // Context-dependent re-scans
    // =========================================================================

    /// Re-scan a `>` token as `>>`, `>>>`, `>=`, `>>=` or `>>>=`.
    pub fn re_scan_greater_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::GreaterThanToken {
            return self.token;
        }
        let kind = match (
            self.byte_at(self.pos),
            self.byte_at(self.pos + 1),
            self.byte_at(self.pos + 2),
        ) {
            (b'>', b'>', b'=') => {
                self.pos += 3;
                SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
            }
            (b'>', b'>', _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanGreaterThanToken
            }
            (b'>', b'=', _) => {
                self.pos += 2;
                SyntaxKind::GreaterThanGreaterThanEqualsToken
            }
            (b'>', _, _) => {
                self.pos += 1;
                SyntaxKind::GreaterThanGreaterThanToken
            }
            (b'=', _, _) => {
                self.pos += 1;
                SyntaxKind::GreaterThanEqualsToken
            }
            _ => SyntaxKind::GreaterThanToken,
        };
        self.finish(kind)
    }

    /// Re-scan a `/` or `/=` token as a regular expression literal.
    pub fn re_scan_slash_token(&mut self) -> SyntaxKind {
        if !matches!(
            self.token,
            SyntaxKind::SlashToken | SyntaxKind::SlashEqualsToken
        ) {
            return self.token;
        }
        self.pos = self.token_start + 1;
        let mut in_class = false;
        loop {
            let Some(ch) = self.char_at(self.pos) else {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            };
            if is_line_break(ch) {
                self.token_flags |= TokenFlags::UNTERMINATED;
                break;
            }
            self.pos += ch.len_utf8();
            match ch {
                '\\' => {
                    if let Some(escaped) = self.char_at(self.pos)
                        && !is_line_break(escaped)
                    {
                        self.pos += escaped.len_utf8();
                    }
                }
                '[' => in_class = true,
                ']' => in_class = false,
                '/' if !in_class => break,
                _ => {}
            }
        }
        if !self.is_unterminated() {
            while let Some(ch) = self.char_at(self.pos) {
                if !is_identifier_part(ch) {
                    break;
                }
                self.pos += ch.len_utf8();
            }
        }
        self.token_value = self.get_token_text().to_string();
        self.finish(SyntaxKind::RegularExpressionLiteral)
    }

    /// Re-scan a `}` token as a template middle or tail.
    pub fn re_scan_template_token(&mut self) -> SyntaxKind {
        if self.token != SyntaxKind::CloseBraceToken {
            return self.token;
        }
        self.pos = self.token_start + 1;
        self.scan_template(false)
    }
}

/// Decode the numeric value of a numeric literal's source text.
///
/// Handles separators, hex/octal/binary prefixes, legacy octal and
/// exponents. Returns `None` for malformed text.
pub fn numeric_literal_value(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|&c| c != '_').collect();
    let lower = cleaned.to_ascii_lowercase();
    let radix_value = |digits: &str, radix: u32| -> Option<f64> {
        if digits.is_empty() {
            return None;
        }
        digits.chars().try_fold(0f64, |acc, c| {
            c.to_digit(radix).map(|d| acc * f64::from(radix) + f64::from(d))
        })
    };
    if let Some(hex) = lower.strip_prefix("0x") {
        return radix_value(hex, 16);
    }
    if let Some(octal) = lower.strip_prefix("0o") {
        return radix_value(octal, 8);
    }
    if let Some(binary) = lower.strip_prefix("0b") {
        return radix_value(binary, 2);
    }
    if lower.len() > 1
        && lower.starts_with('0')
        && lower.chars().all(|c| c.is_ascii_digit())
        && lower.chars().all(is_octal_digit)
    {
        return radix_value(&lower[1..], 8);
    }
    lower.parse::<f64>().ok()
}

#[cfg(test)]
#[path = "../tests/scanner_tests.rs"]
mod tests;
