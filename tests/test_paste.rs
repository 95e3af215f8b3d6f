use masked_input::{MaskOptions, MaskedInput, Selection};

#[test]
fn test_paste() {
    let mut m = MaskedInput::with_pattern("11-11").expect("mask");
    assert!(m.paste("1234"));
    assert_eq!(m.value(), "12-34");
    assert_eq!(m.selection(), Selection::caret(5));
}

#[test]
fn test_paste_with_separator() {
    let mut m = MaskedInput::with_pattern("11-11").expect("mask");
    // the mask's own separator may appear in the pasted text
    assert!(m.paste("12-34"));
    assert_eq!(m.value(), "12-34");
}

#[test]
fn test_paste_rejected() {
    let mut m = MaskedInput::with_pattern("11-11").expect("mask");
    assert!(m.input('9'));
    let value = m.value();
    let raw = m.raw_value();
    let selection = m.selection();

    // atomic: invalid content rolls everything back
    assert!(!m.paste("2x4"));
    assert_eq!(m.value(), value);
    assert_eq!(m.raw_value(), raw);
    assert_eq!(m.selection(), selection);

    // the undo history is rolled back too
    assert!(m.undo());
    assert_eq!(m.value(), "__-__");
    assert!(m.redo());
    assert_eq!(m.value(), value);
}

#[test]
fn test_paste_static_prefix() {
    let mut m = MaskedInput::with_pattern("+11-11").expect("mask");
    // selection before the first editable position: the paste must
    // bring the static prefix with it
    assert!(m.paste("+12-34"));
    assert_eq!(m.value(), "+12-34");

    let mut m = MaskedInput::with_pattern("+11-11").expect("mask");
    assert!(!m.paste("12-34"));
    assert_eq!(m.value(), "+__-__");
    assert_eq!(m.selection(), Selection::caret(0));
}

#[test]
fn test_paste_into_selection() {
    let mut m = MaskedInput::new(MaskOptions {
        pattern: "1111".into(),
        value: "1234".into(),
        ..Default::default()
    })
    .expect("mask");

    m.set_selection(Selection::new(0, 4));
    assert!(m.paste("98"));
    assert_eq!(m.value(), "98__");
    assert_eq!(m.selection(), Selection::caret(2));
}

#[test]
fn test_paste_overflow_stops() {
    let mut m = MaskedInput::with_pattern("11").expect("mask");
    // consumption stops once the caret is past the last editable
    // position, the surplus is ignored
    assert!(m.paste("1234"));
    assert_eq!(m.value(), "12");
}

#[test]
fn test_paste_transforms() {
    let mut m = MaskedInput::with_pattern("AA-11").expect("mask");
    assert!(m.paste("ab-12"));
    assert_eq!(m.value(), "AB-12");
    assert_eq!(m.raw_value(), "AB12");
}

#[test]
fn test_paste_undoes_as_unit_per_entry() {
    let mut m = MaskedInput::with_pattern("11-11").expect("mask");
    assert!(m.paste("1234"));
    assert_eq!(m.value(), "12-34");

    // pasting types the chars as one coalesced run
    assert!(m.undo());
    assert_eq!(m.value(), "__-__");
    assert!(m.redo());
    assert_eq!(m.value(), "12-34");
}
