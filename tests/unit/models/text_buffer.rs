use super::*;

#[test]
fn test_text_buffer_basic() {
    let mut buffer = TextBuffer::from_text("hello\nworld");

    assert_eq!(buffer.len_lines(), 2);
    assert_eq!(buffer.cursor(), (0, 0));

    buffer.set_cursor(1, 2);
    assert_eq!(buffer.cursor(), (1, 2));
}

#[test]
fn test_set_cursor_clamps_out_of_range() {
    let mut buffer = TextBuffer::from_text("ab\ncdef");

    buffer.set_cursor(9, 9);
    assert_eq!(buffer.cursor(), (1, 4));

    buffer.set_cursor(0, 9);
    assert_eq!(buffer.cursor(), (0, 2));
}

#[test]
fn test_pos_to_char_and_back() {
    let buffer = TextBuffer::from_text("hello\nworld");

    assert_eq!(buffer.pos_to_char((0, 0)), 0);
    assert_eq!(buffer.pos_to_char((1, 0)), 6);
    assert_eq!(buffer.char_to_pos(6), (1, 0));
    assert_eq!(buffer.char_to_pos(8), (1, 2));
    assert_eq!(buffer.char_to_pos(100), (1, 5));
}

#[test]
fn test_char_to_pos_counts_graphemes() {
    let buffer = TextBuffer::from_text("e\u{301}x");
    // "e" + combining acute is one grapheme made of two chars.
    assert_eq!(buffer.char_to_pos(2), (0, 1));
    assert_eq!(buffer.pos_to_char((0, 1)), 2);
}

#[test]
fn test_insert_at_moves_cursor_to_end_of_text() {
    let mut buffer = TextBuffer::from_text("fn main() {\n}\n");
    buffer.set_cursor(1, 0);
    let offset = buffer.cursor_char_offset();

    let end = buffer.insert_at(offset, "    let x = 1;\n");

    assert_eq!(buffer.text(), "fn main() {\n    let x = 1;\n}\n");
    assert_eq!(end, offset + 15);
    assert_eq!(buffer.cursor(), (2, 0));
    assert!(buffer.selections().is_empty());
}

#[test]
fn test_replace_selections_mirrors_typing() {
    let mut buffer = TextBuffer::from_text("a {{x}} b {{x}}");
    buffer.set_selections(vec![
        Selection::new((0, 2), (0, 7)),
        Selection::new((0, 10), (0, 15)),
    ]);

    buffer.replace_selections("v");
    assert_eq!(buffer.text(), "a v b v");
    assert_eq!(
        buffer.selections(),
        &[Selection::caret((0, 3)), Selection::caret((0, 7))]
    );

    buffer.replace_selections("al");
    assert_eq!(buffer.text(), "a val b val");
    assert_eq!(buffer.cursor(), (0, 11));
}

#[test]
fn test_replace_single_selection_collapses_to_caret() {
    let mut buffer = TextBuffer::from_text("x = {{value}};");
    buffer.set_selections(vec![Selection::new((0, 4), (0, 13))]);

    buffer.replace_selections("42");

    assert_eq!(buffer.text(), "x = 42;");
    assert!(buffer.selections().is_empty());
    assert_eq!(buffer.cursor(), (0, 6));
}

#[test]
fn test_replace_without_selection_inserts_at_cursor() {
    let mut buffer = TextBuffer::from_text("ac");
    buffer.set_cursor(0, 1);

    buffer.replace_selections("b");

    assert_eq!(buffer.text(), "abc");
    assert_eq!(buffer.cursor(), (0, 2));
}

#[test]
fn test_delete_backward_joins_lines() {
    let mut buffer = TextBuffer::from_text("ab\ncd");
    buffer.set_cursor(1, 0);

    buffer.delete_backward();

    assert_eq!(buffer.text(), "abcd");
    assert_eq!(buffer.cursor(), (0, 2));
}

#[test]
fn test_delete_backward_removes_single_emoji_grapheme() {
    let mut buffer = TextBuffer::from_text("a👍🏽");
    buffer.set_cursor(0, 2);

    buffer.delete_backward();

    assert_eq!(buffer.text(), "a");
    assert_eq!(buffer.cursor(), (0, 1));
}

#[test]
fn test_delete_backward_at_origin_is_noop() {
    let mut buffer = TextBuffer::from_text("abc");

    buffer.delete_backward();

    assert_eq!(buffer.text(), "abc");
    assert_eq!(buffer.cursor(), (0, 0));
}

#[test]
fn test_delete_backward_on_every_caret() {
    let mut buffer = TextBuffer::from_text("ab ab");
    buffer.set_selections(vec![Selection::caret((0, 2)), Selection::caret((0, 5))]);

    buffer.delete_backward();

    assert_eq!(buffer.text(), "a a");
    assert_eq!(
        buffer.selections(),
        &[Selection::caret((0, 1)), Selection::caret((0, 3))]
    );
}

#[test]
fn test_cursor_movement_wraps_lines() {
    let mut buffer = TextBuffer::from_text("ab\ncd");
    buffer.set_cursor(0, 2);

    buffer.move_right();
    assert_eq!(buffer.cursor(), (1, 0));

    buffer.move_left();
    assert_eq!(buffer.cursor(), (0, 2));

    buffer.move_down();
    buffer.move_line_end();
    assert_eq!(buffer.cursor(), (1, 2));

    buffer.move_line_start();
    buffer.move_up();
    assert_eq!(buffer.cursor(), (0, 0));
}

#[test]
fn test_write_to_streams_rope() {
    let buffer = TextBuffer::from_text("line one\nline two\n");
    let mut out = Vec::new();
    buffer.write_to(&mut out).unwrap();
    assert_eq!(out, b"line one\nline two\n");
}
