use super::*;

#[test]
fn position_of_first_byte_is_one_one() {
    let text = "const a = 1;\nconst b = 2;\n";
    let map = LineMap::new(text);
    assert_eq!(map.position_of(text, 0), Position { line: 1, column: 1 });
}

#[test]
fn position_of_second_line() {
    let text = "const a = 1;\nconst b = 2;\n";
    let map = LineMap::new(text);
    let offset = text.find('b').unwrap() as u32;
    assert_eq!(map.position_of(text, offset), Position { line: 2, column: 7 });
}

#[test]
fn columns_count_chars_not_bytes() {
    let text = "const é = x;";
    let map = LineMap::new(text);
    let offset = text.find('=').unwrap() as u32;
    assert_eq!(map.position_of(text, offset).column, 9);
}

#[test]
fn offset_past_end_clamps() {
    let text = "a\nb";
    let map = LineMap::new(text);
    assert_eq!(map.line_count(), 2);
    assert_eq!(map.position_of(text, 99), Position { line: 2, column: 2 });
}

#[test]
fn span_slice_and_overlap() {
    let text = "myArray.at(-1)";
    let span = crate::Span::new(0, 7);
    assert_eq!(span.slice(text), "myArray");
    assert!(span.overlaps(crate::Span::new(6, 9)));
    assert!(!span.overlaps(crate::Span::new(7, 9)));
    assert!(crate::Span::new(0, 14).contains(span));
    assert_eq!(crate::Span::new(3, 99).slice(text), "");
}
