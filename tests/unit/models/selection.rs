use super::*;

#[test]
fn test_selection_range() {
    let sel = Selection::caret((1, 5));
    assert_eq!(sel.range(), ((1, 5), (1, 5)));

    let sel = Selection::new((2, 3), (5, 7));
    assert_eq!(sel.range(), ((2, 3), (5, 7)));

    let sel = Selection::new((5, 7), (2, 3));
    assert_eq!(sel.range(), ((2, 3), (5, 7)));
}

#[test]
fn test_selection_is_empty() {
    assert!(Selection::caret((0, 0)).is_empty());
    assert!(!Selection::new((0, 0), (0, 1)).is_empty());
}

#[test]
fn test_selection_contains_is_half_open() {
    let sel = Selection::new((0, 2), (0, 9));
    assert!(sel.contains((0, 2)));
    assert!(sel.contains((0, 8)));
    assert!(!sel.contains((0, 9)));
    assert!(!sel.contains((0, 1)));
}

#[test]
fn test_reversed_selection_orders_range() {
    let sel = Selection::new((3, 4), (1, 0));
    assert_eq!(sel.anchor(), (3, 4));
    assert_eq!(sel.cursor(), (1, 0));
    assert_eq!(sel.range(), ((1, 0), (3, 4)));
}
