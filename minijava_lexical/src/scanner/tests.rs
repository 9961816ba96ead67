use minijava_base::{diagnostic::Storage, source_file::SourceFile};
use strum::IntoEnumIterator;

use super::{transition, Action, Error, Scanner, State};
use crate::{
    error,
    token::{KeywordKind, OperatorKind, PunctuationKind, Token},
};

fn scan(source: &str) -> Vec<Token> {
    let source_file = SourceFile::temp(source).unwrap();
    let storage: Storage<error::Error> = Storage::new();
    let tokens = Scanner::new(&source_file).scan(&storage).unwrap();

    assert!(storage.as_vec().is_empty());

    tokens
}

fn scan_err(source: &str) -> (Error, error::Error) {
    let source_file = SourceFile::temp(source).unwrap();
    let storage: Storage<error::Error> = Storage::new();
    let error = Scanner::new(&source_file).scan(&storage).unwrap_err();
    let mut diagnostics = storage.into_vec();

    assert_eq!(diagnostics.len(), 1);

    (error, diagnostics.pop().unwrap())
}

#[test]
fn produces_no_tokens_for_blank_sources() {
    assert!(scan("").is_empty());
    assert!(scan(" \t\r\n  \n").is_empty());
}

#[test]
fn lexes_every_keyword() {
    for kind in KeywordKind::iter() {
        let tokens = scan(kind.as_str());

        assert_eq!(tokens.len(), 1, "{kind:?}");

        let keyword = tokens[0].as_keyword().unwrap();
        assert_eq!(keyword.keyword, kind);
        assert_eq!(keyword.span.str(), kind.as_str());
    }
}

#[test]
fn keyword_lookup_is_case_sensitive() {
    assert!(scan("Boolean")[0].is_identifier());
    assert!(scan("string")[0].is_identifier());
    assert!(scan("String")[0].is_keyword());
}

#[test]
fn keywords_do_not_end_at_a_longer_word() {
    let tokens = scan("classfoo");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "classfoo");
}

#[test]
fn lexes_single_character_tokens() {
    let operators = [
        ("<", OperatorKind::LessThan),
        ("+", OperatorKind::Plus),
        ("-", OperatorKind::Minus),
        ("*", OperatorKind::Times),
    ];

    for (source, operator) in operators {
        let tokens = scan(source);

        assert_eq!(tokens.len(), 1, "{source}");
        assert_eq!(tokens[0].as_operator().unwrap().operator, operator);
    }

    for kind in PunctuationKind::iter() {
        let source = kind.as_char().to_string();
        let tokens = scan(&source);

        assert_eq!(tokens.len(), 1, "{source}");
        assert_eq!(tokens[0].as_punctuation().unwrap().punctuation, kind);
    }
}

#[test]
fn lexes_the_and_operator() {
    let tokens = scan("&&");

    assert_eq!(tokens.len(), 1);

    let operator = tokens[0].as_operator().unwrap();
    assert_eq!(operator.operator, OperatorKind::And);
    assert_eq!(operator.span.str(), "&&");

    let tokens = scan("a&&b");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "a");
    assert_eq!(tokens[1].as_operator().unwrap().operator, OperatorKind::And);
    assert_eq!(tokens[2].as_identifier().unwrap().span.str(), "b");
}

#[test]
fn munches_lexemes_maximally() {
    let tokens = scan("123abc");

    assert_eq!(tokens.len(), 2);

    let literal = tokens[0].as_integer_literal().unwrap();
    assert_eq!(literal.value, 123);
    assert_eq!(literal.span.str(), "123");
    assert_eq!(tokens[1].as_identifier().unwrap().span.str(), "abc");
}

#[test]
fn minus_is_never_folded_into_a_literal() {
    let tokens = scan("-5");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].as_operator().unwrap().operator, OperatorKind::Minus);
    assert_eq!(tokens[1].as_integer_literal().unwrap().value, 5);
}

#[test]
fn identifiers_continue_with_digits_and_underscores() {
    let tokens = scan("x_1y");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "x_1y");
}

#[test]
fn end_of_source_finalizes_pending_lexemes() {
    let tokens = scan("abc");
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "abc");

    let tokens = scan("42");
    let literal = tokens[0].as_integer_literal().unwrap();
    assert_eq!(literal.value, 42);
    assert_eq!(literal.span.str(), "42");
}

#[test]
fn integer_literals_cover_the_whole_64_bit_range() {
    let tokens = scan("18446744073709551615");
    assert_eq!(tokens[0].as_integer_literal().unwrap().value, u64::MAX);

    let (error, diagnostic) = scan_err("18446744073709551616");
    assert_eq!(error, Error::IntegerLiteralOverflow);
    assert_eq!(
        diagnostic.as_integer_literal_overflow().unwrap().span.str(),
        "18446744073709551616"
    );
}

#[test]
fn rejects_characters_that_start_no_token() {
    for (source, offending) in [("@", "@"), ("_x", "_"), ("#", "#"), ("λ1", "λ")] {
        let (error, diagnostic) = scan_err(source);

        assert_eq!(error, Error::UnexpectedCharacter, "{source}");

        let span = &diagnostic.as_unexpected_character().unwrap().span;
        assert_eq!(span.str(), offending);
        assert_eq!(span.start(), 0);
    }
}

#[test]
fn rejects_a_lone_ampersand() {
    for source in ["&", "&x", "a & b"] {
        let (error, diagnostic) = scan_err(source);

        assert_eq!(error, Error::MalformedOperator, "{source}");
        assert_eq!(diagnostic.as_malformed_operator().unwrap().span.str(), "&");
    }
}

#[test]
fn rejects_a_slash_that_opens_no_comment() {
    for source in ["/", "/x", "1/2"] {
        let (error, diagnostic) = scan_err(source);

        assert_eq!(error, Error::MalformedOperator, "{source}");
        assert_eq!(diagnostic.as_malformed_operator().unwrap().span.str(), "/");
    }
}

#[test]
fn discards_line_comments() {
    assert!(scan("// nothing here").is_empty());

    let tokens = scan("x // trailing\ny");

    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "x");
    assert_eq!(tokens[1].as_identifier().unwrap().span.str(), "y");

    // a carriage return alone does not end a line comment
    let tokens = scan("//a\rb\nc");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "c");
}

#[test]
fn discards_block_comments() {
    assert!(scan("/**/").is_empty());
    assert!(scan("/* spanning\nseveral\nlines */").is_empty());

    let tokens = scan("/* a /* b */ c */x");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "x");
}

#[test]
fn nested_block_comments_are_counted_not_first_match_wins() {
    // with first-`*/`-wins the `c` would become an identifier
    let tokens = scan("/* a /* b */ c */ x");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "x");
}

#[test]
fn fails_on_unterminated_block_comments() {
    for source in ["/*", "/* unterminated", "/* a /* b */ still open"] {
        let (error, diagnostic) = scan_err(source);

        assert_eq!(error, Error::UnexpectedEndOfInput, "{source}");
        assert_eq!(
            diagnostic.as_unterminated_block_comment().unwrap().span.str(),
            "/*"
        );
    }
}

#[test]
fn star_runs_do_not_stack_as_closers() {
    // the star before `*/` takes its place: `**/` leaves the comment open
    let (error, _) = scan_err("/* x **/ y");
    assert_eq!(error, Error::UnexpectedEndOfInput);

    // while `***/` closes it, the middle star re-arming the closer
    let tokens = scan("/* x ***/ y");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "y");
}

#[test]
fn slash_pairs_inside_block_comments_do_not_nest() {
    // the `*` of `//*` follows a dead `/`, so no nested comment opens
    let tokens = scan("/*//*/x");

    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].as_identifier().unwrap().span.str(), "x");
}

#[test]
fn lexes_a_class_declaration() {
    let tokens = scan("class Foo { int x; }");

    assert_eq!(tokens.len(), 7);
    assert_eq!(tokens[0].as_keyword().unwrap().keyword, KeywordKind::Class);
    assert_eq!(tokens[1].as_identifier().unwrap().span.str(), "Foo");
    assert_eq!(
        tokens[2].as_punctuation().unwrap().punctuation,
        PunctuationKind::LeftBrace
    );
    assert_eq!(tokens[3].as_keyword().unwrap().keyword, KeywordKind::Int);
    assert_eq!(tokens[4].as_identifier().unwrap().span.str(), "x");
    assert_eq!(
        tokens[5].as_punctuation().unwrap().punctuation,
        PunctuationKind::Semicolon
    );
    assert_eq!(
        tokens[6].as_punctuation().unwrap().punctuation,
        PunctuationKind::RightBrace
    );
}

#[test]
fn transition_tracks_comment_nesting_depth() {
    assert_eq!(
        transition(State::InBlockComment { depth: 1 }, '/'),
        Action::Advance(State::SawSlashInBlockComment { depth: 1 })
    );
    assert_eq!(
        transition(State::SawSlashInBlockComment { depth: 1 }, '*'),
        Action::Advance(State::InBlockComment { depth: 2 })
    );
    assert_eq!(
        transition(State::SawStarInBlockComment { depth: 2 }, '/'),
        Action::Advance(State::InBlockComment { depth: 1 })
    );
    assert_eq!(
        transition(State::SawStarInBlockComment { depth: 1 }, '/'),
        Action::Advance(State::Start)
    );
    assert_eq!(
        transition(State::SawStarInBlockComment { depth: 1 }, '*'),
        Action::Advance(State::InBlockComment { depth: 1 })
    );
}
