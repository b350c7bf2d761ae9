use crate::pattern::{Atom, AtomKind, CaseMatching, Normalization, Pattern};

#[test]
fn negation_strips_the_bang_prefix() {
    let atom = Atom::parse("!foo", CaseMatching::Smart, Normalization::Smart);
    assert!(atom.negative);
    assert_eq!(atom.kind, AtomKind::Substring);
    assert_eq!(atom.needle.to_string(), "foo");

    let atom = Atom::parse("!^foo", CaseMatching::Smart, Normalization::Smart);
    assert!(atom.negative);
    assert_eq!(atom.kind, AtomKind::Prefix);

    let atom = Atom::parse("!foo$", CaseMatching::Smart, Normalization::Smart);
    assert!(atom.negative);
    assert_eq!(atom.kind, AtomKind::Postfix);

    let atom = Atom::parse("!^foo$", CaseMatching::Smart, Normalization::Smart);
    assert!(atom.negative);
    assert_eq!(atom.kind, AtomKind::Exact);
}

#[test]
fn leading_trailing_punctuation_selects_atom_kind() {
    let cases = [
        ("foo", AtomKind::Fuzzy, "foo"),
        ("'foo", AtomKind::Substring, "foo"),
        ("^foo", AtomKind::Prefix, "foo"),
        ("foo$", AtomKind::Postfix, "foo"),
        ("^foo$", AtomKind::Exact, "foo"),
    ];
    for (raw, kind, needle) in cases {
        let atom = Atom::parse(raw, CaseMatching::Smart, Normalization::Smart);
        assert!(!atom.negative, "{raw} should not be negative");
        assert_eq!(atom.kind, kind, "{raw}");
        assert_eq!(atom.needle.to_string(), needle, "{raw}");
    }
}

#[test]
fn smart_case_folds_unless_atom_has_uppercase() {
    let atom = Atom::parse("foo", CaseMatching::Smart, Normalization::Smart);
    assert!(atom.ignore_case);
    let atom = Atom::parse("Foo", CaseMatching::Smart, Normalization::Smart);
    assert!(!atom.ignore_case);
    assert_eq!(atom.needle.to_string(), "Foo");

    let atom = Atom::parse("Foo", CaseMatching::Ignore, Normalization::Smart);
    assert!(atom.ignore_case);
    assert_eq!(atom.needle.to_string(), "foo");

    let atom = Atom::parse("Foo", CaseMatching::Respect, Normalization::Smart);
    assert!(!atom.ignore_case);
    assert_eq!(atom.needle.to_string(), "Foo");
}

#[test]
fn smart_case_treats_non_cased_scripts_as_lowercase() {
    let atom = Atom::parse("你xx", CaseMatching::Smart, Normalization::Smart);
    assert!(atom.ignore_case);
    let atom = Atom::parse("Ⲽxx", CaseMatching::Smart, Normalization::Smart);
    assert!(!atom.ignore_case);
}

#[test]
fn smart_normalization_folds_unless_atom_has_diacritic() {
    // a pure-ASCII needle never carries a diacritic to protect, so it is
    // never a candidate for normalize-folding in the first place
    let atom = Atom::parse("cafe", CaseMatching::Smart, Normalization::Smart);
    assert!(!atom.normalize);

    let atom = Atom::parse("café", CaseMatching::Smart, Normalization::Smart);
    assert!(!atom.normalize);
    assert_eq!(atom.needle.to_string(), "café");

    let atom = Atom::parse("café", CaseMatching::Smart, Normalization::Always);
    assert!(atom.normalize);
    let atom = Atom::parse("café", CaseMatching::Smart, Normalization::Never);
    assert!(!atom.normalize);
}

#[test]
fn escapes_only_affect_whitespace_and_modifier_chars() {
    let atom = Atom::parse("foo\\ bar", CaseMatching::Smart, Normalization::Smart);
    assert_eq!(atom.needle.to_string(), "foo bar");
    assert_eq!(atom.kind, AtomKind::Fuzzy);

    let atom = Atom::parse("\\!foo", CaseMatching::Smart, Normalization::Smart);
    assert_eq!(atom.needle.to_string(), "!foo");
    assert_eq!(atom.kind, AtomKind::Fuzzy);

    let atom = Atom::parse("\\^foo\\$", CaseMatching::Smart, Normalization::Smart);
    assert_eq!(atom.needle.to_string(), "^foo$");
    assert_eq!(atom.kind, AtomKind::Fuzzy);

    let atom = Atom::parse("^foo\\$", CaseMatching::Smart, Normalization::Smart);
    assert_eq!(atom.needle.to_string(), "foo$");
    assert_eq!(atom.kind, AtomKind::Prefix);
}

#[test]
fn space_splits_pattern_into_atoms() {
    let pattern = Pattern::parse(CaseMatching::Ignore, Normalization::Smart, "a b");
    assert_eq!(
        pattern.atoms,
        vec![
            Atom::parse("a", CaseMatching::Ignore, Normalization::Smart),
            Atom::parse("b", CaseMatching::Ignore, Normalization::Smart),
        ]
    );

    let pattern = Pattern::parse(CaseMatching::Ignore, Normalization::Smart, "  a   b");
    assert_eq!(
        pattern.atoms,
        vec![
            Atom::parse("a", CaseMatching::Ignore, Normalization::Smart),
            Atom::parse("b", CaseMatching::Ignore, Normalization::Smart),
        ]
    );
}

#[test]
fn escaped_space_stays_inside_one_atom() {
    let pattern = Pattern::parse(CaseMatching::Ignore, Normalization::Smart, "foo\\ bar baz");
    assert_eq!(
        pattern.atoms,
        vec![
            Atom::parse("foo\\ bar", CaseMatching::Ignore, Normalization::Smart),
            Atom::parse("baz", CaseMatching::Ignore, Normalization::Smart),
        ]
    );
}

#[test]
fn empty_words_are_dropped() {
    let pattern = Pattern::parse(CaseMatching::Ignore, Normalization::Smart, "a  b");
    assert_eq!(pattern.atoms.len(), 2);
}
