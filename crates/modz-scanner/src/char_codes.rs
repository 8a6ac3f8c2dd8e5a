//! Character classification used by the scanner.

#[inline]
pub fn is_line_break(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Whitespace that is not a line terminator.
#[inline]
pub fn is_white_space_single_line(ch: char) -> bool {
    matches!(
        ch,
        ' ' | '\t' | '\u{000B}' | '\u{000C}' | '\u{00A0}' | '\u{FEFF}' | '\u{1680}' | '\u{202F}'
            | '\u{205F}' | '\u{3000}'
    ) || ('\u{2000}'..='\u{200A}').contains(&ch)
}

#[inline]
pub fn is_identifier_start(ch: char) -> bool {
    ch == '$' || ch == '_' || ch.is_ascii_alphabetic() || (!ch.is_ascii() && ch.is_alphabetic())
}

#[inline]
pub fn is_identifier_part(ch: char) -> bool {
    is_identifier_start(ch)
        || ch.is_ascii_digit()
        || ch == '\u{200C}'
        || ch == '\u{200D}'
        || (!ch.is_ascii() && ch.is_alphanumeric())
}

#[inline]
pub fn is_octal_digit(ch: char) -> bool {
    matches!(ch, '0'..='7')
}

#[inline]
pub fn is_binary_digit(ch: char) -> bool {
    ch == '0' || ch == '1'
}
