use masked_input::{MaskedInput, Selection};

#[test]
fn test_undo_redo() {
    let mut m = MaskedInput::with_pattern("11/11").expect("mask");
    assert!(m.input('1'));
    assert!(m.input('2'));
    assert_eq!(m.value(), "12/__");
    assert_eq!(m.selection(), Selection::caret(3));

    // a run of typing is one undo step
    assert!(m.undo());
    assert_eq!(m.value(), "__/__");
    assert_eq!(m.selection(), Selection::caret(0));
    assert!(!m.undo());

    // redo returns exactly to the pre-undo state
    assert!(m.redo());
    assert_eq!(m.value(), "12/__");
    assert_eq!(m.selection(), Selection::caret(3));
    assert!(!m.redo());
}

#[test]
fn test_undo_immediately_redo() {
    let mut m = MaskedInput::with_pattern("1111").expect("mask");
    for c in ['1', '2', '3'] {
        assert!(m.input(c));
    }
    let value = m.value();
    let selection = m.selection();

    assert!(m.undo());
    assert!(m.redo());
    assert_eq!(m.value(), value);
    assert_eq!(m.selection(), selection);
}

#[test]
fn test_coalescing_breaks_on_caret_move() {
    let mut m = MaskedInput::with_pattern("11/11").expect("mask");
    assert!(m.input('1'));
    assert!(m.input('2'));
    // moving the caret starts a new undo entry
    m.set_selection(1u32);
    assert!(m.input('9'));
    assert_eq!(m.value(), "19/__");

    assert!(m.undo());
    assert_eq!(m.value(), "12/__");
    assert_eq!(m.selection(), Selection::caret(1));
    assert!(m.undo());
    assert_eq!(m.value(), "__/__");
    assert!(!m.undo());

    assert!(m.redo());
    assert_eq!(m.value(), "12/__");
    assert!(m.redo());
    assert_eq!(m.value(), "19/__");
    assert!(!m.redo());
}

#[test]
fn test_backspace_coalescing() {
    let mut m = MaskedInput::with_pattern("11/11").expect("mask");
    assert!(m.input('1'));
    assert!(m.input('2'));
    assert!(m.backspace());
    assert!(m.backspace());
    assert!(m.backspace());
    assert_eq!(m.value(), "__/__");
    assert_eq!(m.selection(), Selection::caret(0));

    // the backspace run undoes as one step
    assert!(m.undo());
    assert_eq!(m.value(), "12/__");
    assert_eq!(m.selection(), Selection::caret(3));
    assert!(m.undo());
    assert_eq!(m.value(), "__/__");
    assert_eq!(m.selection(), Selection::caret(0));
}

#[test]
fn test_range_edit_new_entry() {
    let mut m = MaskedInput::with_pattern("1111").expect("mask");
    for c in ['1', '2', '3', '4'] {
        assert!(m.input(c));
    }
    m.set_selection(Selection::new(1, 3));
    assert!(m.input('9'));
    assert_eq!(m.value(), "19_4");

    // the range replacement is its own step
    assert!(m.undo());
    assert_eq!(m.value(), "1234");
    assert_eq!(m.selection(), Selection::new(1, 3));
    assert!(m.undo());
    assert_eq!(m.value(), "____");
}

#[test]
fn test_edit_after_undo_discards_redo() {
    let mut m = MaskedInput::with_pattern("1111").expect("mask");
    assert!(m.input('1'));
    assert!(m.input('2'));
    m.set_selection(1u32);
    assert!(m.input('3'));
    assert_eq!(m.value(), "13__");

    assert!(m.undo());
    assert_eq!(m.value(), "12__");
    assert_eq!(m.selection(), Selection::caret(1));

    // a new edit here forks history, the redo state is gone
    assert!(m.input('7'));
    assert_eq!(m.value(), "17__");
    assert!(!m.redo());

    assert!(m.undo());
    assert_eq!(m.value(), "12__");
    assert!(m.redo());
    assert_eq!(m.value(), "17__");
}

#[test]
fn test_undo_nothing() {
    let mut m = MaskedInput::with_pattern("1111").expect("mask");
    assert!(!m.undo());
    assert!(!m.redo());
    assert_eq!(m.value(), "____");
}

#[test]
fn test_undo_revealing() {
    let mut m = masked_input::MaskedInput::new(masked_input::MaskOptions {
        pattern: "11/11".into(),
        revealing: true,
        ..Default::default()
    })
    .expect("mask");

    assert!(m.input('1'));
    assert!(m.input('2'));
    assert!(m.input('3'));
    assert_eq!(m.value(), "12/3");

    assert!(m.undo());
    assert_eq!(m.value(), "");
    assert!(m.redo());
    assert_eq!(m.value(), "12/3");
}
