use super::{Location, SourceFile, Span};

#[test]
fn line_ranges_split_on_every_terminator() {
    let text = "Hello\nworld\r\n!\rtes";
    assert_eq!(super::line_ranges(text), vec![0..6, 6..13, 13..15, 15..18]);
}

#[test]
fn mapped_file_roundtrip() {
    const TEXT: &str = "class Foo {}";
    let source_file = SourceFile::temp(TEXT).unwrap();

    assert_eq!(source_file.content(), TEXT);
    assert_eq!(source_file.line_count(), 1);
    assert_eq!(source_file.line(1), Some(TEXT));
    assert_eq!(source_file.line(2), None);
}

#[test]
fn empty_file_maps_to_empty_content() {
    let source_file = SourceFile::temp("").unwrap();
    assert_eq!(source_file.content(), "");
    assert_eq!(source_file.line_count(), 1);
}

#[test]
fn location_lookup() {
    let source_file = SourceFile::temp("ab\ncd\n").unwrap();

    assert_eq!(
        source_file.location(0),
        Some(Location { line: 1, column: 1 })
    );
    assert_eq!(
        source_file.location(1),
        Some(Location { line: 1, column: 2 })
    );
    assert_eq!(
        source_file.location(3),
        Some(Location { line: 2, column: 1 })
    );
    assert_eq!(
        source_file.location(4),
        Some(Location { line: 2, column: 2 })
    );

    // past the end of the text
    assert_eq!(source_file.location(7), None);
}

#[test]
fn span_str_and_join() {
    let source_file = SourceFile::temp("while (true)").unwrap();

    let first = Span::new(source_file.clone(), 0, 5).unwrap();
    let second = Span::new(source_file.clone(), 7, 11).unwrap();

    assert_eq!(first.str(), "while");
    assert_eq!(second.str(), "true");

    let joined = first.join(&second).unwrap();
    assert_eq!(joined.str(), "while (true");

    // joins are ordered
    assert!(second.join(&first).is_none());
}

#[test]
fn span_endpoints_must_lie_on_boundaries() {
    let source_file = SourceFile::temp("aé").unwrap();

    assert!(Span::new(source_file.clone(), 0, 2).is_none());
    assert!(Span::new(source_file.clone(), 0, 3).is_some());
    assert!(Span::new(source_file.clone(), 2, 1).is_none());
    assert!(Span::new(source_file, 0, 4).is_none());
}
