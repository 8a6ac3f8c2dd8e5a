use super::*;

fn scan_all(text: &str) -> Vec<(SyntaxKind, String)> {
    let mut scanner = ScannerState::new(Arc::from(text));
    let mut tokens = Vec::new();
    loop {
        let kind = scanner.scan();
        if kind == SyntaxKind::EndOfFileToken {
            break;
        }
        tokens.push((kind, scanner.get_token_text().to_string()));
    }
    tokens
}

fn kinds(text: &str) -> Vec<SyntaxKind> {
    scan_all(text).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn scans_member_access_with_arithmetic() {
    assert_eq!(
        kinds("myArray[myArray.length - 1]"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::OpenBracketToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotToken,
            SyntaxKind::Identifier,
            SyntaxKind::MinusToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::CloseBracketToken,
        ]
    );
}

#[test]
fn scans_multi_char_operators() {
    assert_eq!(
        kinds("a !== b ?? c ??= d ** e?.f ... =>"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::ExclamationEqualsEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionQuestionEqualsToken,
            SyntaxKind::Identifier,
            SyntaxKind::AsteriskAsteriskToken,
            SyntaxKind::Identifier,
            SyntaxKind::QuestionDotToken,
            SyntaxKind::Identifier,
            SyntaxKind::DotDotDotToken,
            SyntaxKind::EqualsGreaterThanToken,
        ]
    );
}

#[test]
fn question_dot_before_digit_is_conditional() {
    assert_eq!(
        kinds("a?.5:b"),
        vec![
            SyntaxKind::Identifier,
            SyntaxKind::QuestionToken,
            SyntaxKind::NumericLiteral,
            SyntaxKind::ColonToken,
            SyntaxKind::Identifier,
        ]
    );
}

#[test]
fn keywords_and_contextual_keywords() {
    assert_eq!(
        kinds("const let of undefined"),
        vec![
            SyntaxKind::ConstKeyword,
            SyntaxKind::LetKeyword,
            SyntaxKind::OfKeyword,
            SyntaxKind::UndefinedKeyword,
        ]
    );
    assert!(SyntaxKind::LetKeyword.is_contextual_keyword());
    assert!(!SyntaxKind::ConstKeyword.is_contextual_keyword());
    assert!(SyntaxKind::ConstKeyword.is_reserved_word());
}

#[test]
fn string_value_is_cooked() {
    let mut scanner = ScannerState::new(Arc::from(r#""a\nb\x41B\u{43}""#));
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert_eq!(scanner.get_token_value(), "a\nbABC");
    assert!(!scanner.is_unterminated());
}

#[test]
fn unterminated_string_is_flagged() {
    let mut scanner = ScannerState::new(Arc::from("'abc\nx"));
    assert_eq!(scanner.scan(), SyntaxKind::StringLiteral);
    assert!(scanner.is_unterminated());
}

#[test]
fn comments_set_preceding_line_break() {
    let mut scanner = ScannerState::new(Arc::from("a /* x\n y */ b // c\nd"));
    scanner.scan();
    assert!(!scanner.has_preceding_line_break());
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.get_token_text(), "b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert!(scanner.has_preceding_line_break());
    assert_eq!(scanner.get_token_text(), "d");
}

#[test]
fn token_pos_excludes_trivia() {
    let mut scanner = ScannerState::new(Arc::from("  /* c */ foo"));
    scanner.scan();
    assert_eq!(scanner.get_token_full_start(), 0);
    assert_eq!(scanner.get_token_pos(), 10);
    assert_eq!(scanner.get_token_end(), 13);
}

#[test]
fn re_scan_slash_produces_regex() {
    let mut scanner = ScannerState::new(Arc::from("/a[/]b\\//gi.test(x)"));
    assert_eq!(scanner.scan(), SyntaxKind::SlashToken);
    assert_eq!(
        scanner.re_scan_slash_token(),
        SyntaxKind::RegularExpressionLiteral
    );
    assert_eq!(scanner.get_token_text(), "/a[/]b\\//gi");
    assert_eq!(scanner.scan(), SyntaxKind::DotToken);
}

#[test]
fn template_head_middle_tail() {
    let mut scanner = ScannerState::new(Arc::from("`a${x}b${y}c`"));
    assert_eq!(scanner.scan(), SyntaxKind::TemplateHead);
    assert_eq!(scanner.get_token_value(), "a");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateMiddle);
    assert_eq!(scanner.get_token_value(), "b");
    assert_eq!(scanner.scan(), SyntaxKind::Identifier);
    assert_eq!(scanner.scan(), SyntaxKind::CloseBraceToken);
    assert_eq!(scanner.re_scan_template_token(), SyntaxKind::TemplateTail);
    assert_eq!(scanner.get_token_value(), "c");
    assert_eq!(scanner.scan(), SyntaxKind::EndOfFileToken);
}

#[test]
fn re_scan_greater_token_combines() {
    let mut scanner = ScannerState::new(Arc::from("a >>>= b"));
    scanner.scan();
    assert_eq!(scanner.scan(), SyntaxKind::GreaterThanToken);
    assert_eq!(
        scanner.re_scan_greater_token(),
        SyntaxKind::GreaterThanGreaterThanGreaterThanEqualsToken
    );
    assert_eq!(scanner.get_token_text(), ">>>=");
}

#[test]
fn save_and_restore_state() {
    let mut scanner = ScannerState::new(Arc::from("a b c"));
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    scanner.scan();
    assert_eq!(scanner.get_token_text(), "c");
    scanner.restore_state(snapshot);
    assert_eq!(scanner.get_token_text(), "a");
    scanner.scan();
    assert_eq!(scanner.get_token_text(), "b");
}

#[test]
fn numeric_values() {
    assert_eq!(numeric_literal_value("1"), Some(1.0));
    assert_eq!(numeric_literal_value("1_000"), Some(1000.0));
    assert_eq!(numeric_literal_value("0x1F"), Some(31.0));
    assert_eq!(numeric_literal_value("0b101"), Some(5.0));
    assert_eq!(numeric_literal_value("0o17"), Some(15.0));
    assert_eq!(numeric_literal_value("017"), Some(15.0));
    assert_eq!(numeric_literal_value("1e3"), Some(1000.0));
    assert_eq!(numeric_literal_value(".5"), Some(0.5));
    assert_eq!(numeric_literal_value("1.0"), Some(1.0));
}

#[test]
fn from_u16_round_trips() {
    for kind in [
        SyntaxKind::Unknown,
        SyntaxKind::Identifier,
        SyntaxKind::QuestionQuestionEqualsToken,
        SyntaxKind::UnknownKeyword,
    ] {
        assert_eq!(SyntaxKind::from_u16(kind as u16), Some(kind));
    }
    assert_eq!(SyntaxKind::from_u16(SyntaxKind::LAST_TOKEN as u16 + 1), None);
}

fn scanner_errors(text: &str) -> Vec<(usize, &'static str)> {
    let mut scanner = ScannerState::new(Arc::from(text));
    while scanner.scan() != SyntaxKind::EndOfFileToken {}
    scanner
        .get_scanner_diagnostics()
        .iter()
        .map(|diag| (diag.pos, diag.message))
        .collect()
}

#[test]
fn unterminated_block_comment_is_reported() {
    assert_eq!(scanner_errors("a /* b"), [(6, "'*/' expected.")]);
    assert!(scanner_errors("a /* b */ c").is_empty());
}

#[test]
fn radix_prefix_needs_digits() {
    assert_eq!(scanner_errors("0x;"), [(2, "Hexadecimal digit expected.")]);
    assert_eq!(scanner_errors("0o"), [(2, "Octal digit expected.")]);
    assert_eq!(scanner_errors("0B;"), [(2, "Binary digit expected.")]);
    assert!(scanner_errors("0x1f 0o7 0b1").is_empty());
}

#[test]
fn misplaced_numeric_separators_are_reported() {
    assert_eq!(
        scanner_errors("1__0"),
        [(2, "Multiple consecutive numeric separators are not permitted.")]
    );
    assert_eq!(scanner_errors("10_"), [(2, "Numeric separators are not allowed here.")]);
    assert_eq!(scanner_errors("0x_1"), [(2, "Numeric separators are not allowed here.")]);
    assert_eq!(scanner_errors("1._5"), [(2, "Numeric separators are not allowed here.")]);
    assert!(scanner_errors("1_000_000 0b1010_0101 1.5_0e1_0").is_empty());
}

#[test]
fn restoring_a_snapshot_drops_later_errors() {
    let mut scanner = ScannerState::new(Arc::from("a 0x"));
    scanner.scan();
    let snapshot = scanner.save_state();
    scanner.scan();
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
    scanner.restore_state(snapshot);
    assert!(scanner.get_scanner_diagnostics().is_empty());
    scanner.scan();
    assert_eq!(scanner.get_scanner_diagnostics().len(), 1);
}
