//! Contains the [`Scanner`] state machine that groups the characters of a
//! source file into tokens.

use std::sync::Arc;

use enum_as_inner::EnumAsInner;
use minijava_base::{
    diagnostic::Handler,
    source_file::{self, ByteIndex, SourceFile, Span},
};
use thiserror::Error;

use crate::{
    error,
    token::{IntegerLiteral, Operator, OperatorKind, Punctuation, PunctuationKind, Token},
};

/// Is an error returned when the scanner rejects the source code.
///
/// The variants only classify the failure; the rich diagnostic describing it
/// is reported to the [`Handler`] the scan was invoked with. The scan aborts
/// at the first error and returns no partial token list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error("found a character that cannot start any token")]
    UnexpectedCharacter,

    #[error("found a `&` not followed by `&`, or a `/` not followed by `/` or `*`")]
    MalformedOperator,

    #[error("the source code ended before a block comment was closed")]
    UnexpectedEndOfInput,

    #[error("found an integer literal that does not fit in 64 bits")]
    IntegerLiteralOverflow,
}

/// Is the set of states the scanner's automaton can be in between characters.
///
/// Block comments nest; the nesting depth is carried in the comment states so
/// that the transition function stays a pure function of state and character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum State {
    /// Between tokens; dispatches on the class of the next character.
    Start,

    /// Accumulating letters, digits, and underscores after an initial letter.
    InIdentifier,

    /// Accumulating decimal digits.
    InIntegerLiteral,

    /// Saw a `&` and expects the second one completing the `&&` operator.
    SawAmpersand,

    /// Saw a `/` and expects the `/` or `*` opening a comment; the language
    /// has no division operator.
    SawSlash,

    /// Inside a `//` comment, discarding characters up to and including the
    /// next line feed.
    InLineComment,

    /// Inside a `/* */` comment, discarding characters.
    InBlockComment {
        /// The number of block comment openers that are not yet closed.
        depth: usize,
    },

    /// Saw a `*` inside a block comment that closes one level when followed
    /// by `/`.
    SawStarInBlockComment {
        /// The number of block comment openers that are not yet closed.
        depth: usize,
    },

    /// Saw a `/` inside a block comment that opens a nested comment when
    /// followed by `*`.
    SawSlashInBlockComment {
        /// The number of block comment openers that are not yet closed.
        depth: usize,
    },
}

/// Is the outcome of feeding one character to the transition function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner)]
pub enum Action {
    /// Consumes the character and continues in the given state.
    Advance(State),

    /// Consumes the character and completes an operator token.
    EmitOperator(OperatorKind),

    /// Consumes the character and completes a punctuation token.
    EmitPunctuation(PunctuationKind),

    /// Leaves the character unconsumed, completes the pending identifier or
    /// integer literal, and re-dispatches the same character from
    /// [`State::Start`].
    Finish,

    /// Rejects the character, aborting the scan.
    Reject(Error),
}

fn dispatch(character: char) -> Action {
    if character.is_whitespace() {
        return Action::Advance(State::Start);
    }

    if character.is_ascii_alphabetic() {
        return Action::Advance(State::InIdentifier);
    }

    if character.is_ascii_digit() {
        return Action::Advance(State::InIntegerLiteral);
    }

    if let Some(operator) = OperatorKind::from_char(character) {
        return Action::EmitOperator(operator);
    }

    if let Some(punctuation) = PunctuationKind::from_char(character) {
        return Action::EmitPunctuation(punctuation);
    }

    match character {
        '&' => Action::Advance(State::SawAmpersand),
        '/' => Action::Advance(State::SawSlash),
        _ => Action::Reject(Error::UnexpectedCharacter),
    }
}

/// Advances the automaton by one character.
///
/// Maximal munch falls out of [`Action::Finish`]: identifiers and integer
/// literals keep extending until a non-continuing character shows up, and
/// that character is then re-examined from [`State::Start`] without the
/// source ever being re-read.
#[must_use]
pub fn transition(state: State, character: char) -> Action {
    match state {
        State::Start => dispatch(character),

        State::InIdentifier => {
            if character.is_ascii_alphanumeric() || character == '_' {
                Action::Advance(State::InIdentifier)
            } else {
                Action::Finish
            }
        }

        State::InIntegerLiteral => {
            if character.is_ascii_digit() {
                Action::Advance(State::InIntegerLiteral)
            } else {
                Action::Finish
            }
        }

        State::SawAmpersand => {
            if character == '&' {
                Action::EmitOperator(OperatorKind::And)
            } else {
                Action::Reject(Error::MalformedOperator)
            }
        }

        State::SawSlash => match character {
            '/' => Action::Advance(State::InLineComment),
            '*' => Action::Advance(State::InBlockComment { depth: 1 }),
            _ => Action::Reject(Error::MalformedOperator),
        },

        State::InLineComment => {
            if character == '\n' {
                Action::Advance(State::Start)
            } else {
                Action::Advance(State::InLineComment)
            }
        }

        State::InBlockComment { depth } => match character {
            '*' => Action::Advance(State::SawStarInBlockComment { depth }),
            '/' => Action::Advance(State::SawSlashInBlockComment { depth }),
            _ => Action::Advance(State::InBlockComment { depth }),
        },

        // a `*` here loses closer candidacy: `**/` leaves the comment open,
        // `***/` closes it
        State::SawStarInBlockComment { depth } => {
            if character == '/' {
                if depth == 1 {
                    Action::Advance(State::Start)
                } else {
                    Action::Advance(State::InBlockComment { depth: depth - 1 })
                }
            } else {
                Action::Advance(State::InBlockComment { depth })
            }
        }

        State::SawSlashInBlockComment { depth } => {
            if character == '*' {
                Action::Advance(State::InBlockComment { depth: depth + 1 })
            } else {
                Action::Advance(State::InBlockComment { depth })
            }
        }
    }
}

/// Is the character-by-character state machine that groups the characters of
/// a source file into tokens.
///
/// The scanner reads every character exactly once. One-character lookahead is
/// achieved by peeking: a character that terminates a pending lexeme is not
/// consumed along with it but re-dispatched from [`State::Start`] on the next
/// iteration.
#[derive(Debug)]
pub struct Scanner<'a> {
    iterator: source_file::Iterator<'a>,
    state: State,
    token_start: ByteIndex,
    tokens: Vec<Token>,
}

impl<'a> Scanner<'a> {
    /// Creates a new scanner reading from the beginning of the given source
    /// file.
    #[must_use]
    pub fn new(source_file: &'a Arc<SourceFile>) -> Self {
        Self {
            iterator: source_file.iter(),
            state: State::Start,
            token_start: 0,
            tokens: Vec::new(),
        }
    }

    /// Runs the automaton over the whole source file and returns the raw
    /// token sequence, with reserved words already resolved and whitespace
    /// and comments discarded.
    ///
    /// # Errors
    /// Returns the first [`Error`] the automaton rejected the source code
    /// with; the rich diagnostic describing it is reported to `handler`.
    pub fn scan(mut self, handler: &dyn Handler<error::Error>) -> Result<Vec<Token>, Error> {
        while let Some((index, character)) = self.iterator.peek() {
            if matches!(self.state, State::Start) {
                self.token_start = index;
            }

            match transition(self.state, character) {
                Action::Advance(state) => {
                    self.state = state;
                    self.iterator.next();
                }

                Action::EmitOperator(operator) => {
                    self.iterator.next();
                    let span = self.span_to(index + character.len_utf8());
                    self.tokens.push(Operator { span, operator }.into());
                    self.state = State::Start;
                }

                Action::EmitPunctuation(punctuation) => {
                    self.iterator.next();
                    let span = self.span_to(index + character.len_utf8());
                    self.tokens.push(Punctuation { span, punctuation }.into());
                    self.state = State::Start;
                }

                Action::Finish => {
                    let span = self.span_to(index);
                    self.complete_lexeme(span, handler)?;
                    self.state = State::Start;
                }

                Action::Reject(error) => {
                    self.report(error, index, character, handler);
                    return Err(error);
                }
            }
        }

        self.finish(handler)
    }

    /// Creates a span from the start of the pending lexeme to the given end.
    fn span_to(&self, end: ByteIndex) -> Span {
        Span::new(self.iterator.source_file().clone(), self.token_start, end).unwrap()
    }

    fn complete_lexeme(
        &mut self,
        span: Span,
        handler: &dyn Handler<error::Error>,
    ) -> Result<(), Error> {
        match self.state {
            State::InIdentifier => {
                self.tokens.push(Token::identifier_or_keyword(span));
                Ok(())
            }

            State::InIntegerLiteral => match span.str().parse::<u64>() {
                Ok(value) => {
                    self.tokens.push(IntegerLiteral { span, value }.into());
                    Ok(())
                }
                Err(_) => {
                    handler.receive(error::IntegerLiteralOverflow { span }.into());
                    Err(Error::IntegerLiteralOverflow)
                }
            },

            _ => unreachable!("only identifier and integer literal lexemes are finished this way"),
        }
    }

    fn finish(mut self, handler: &dyn Handler<error::Error>) -> Result<Vec<Token>, Error> {
        match self.state {
            // the end of the source code legally ends a line comment
            State::Start | State::InLineComment => Ok(self.tokens),

            State::InIdentifier | State::InIntegerLiteral => {
                let span =
                    Span::to_end(self.iterator.source_file().clone(), self.token_start).unwrap();
                self.complete_lexeme(span, handler)?;

                Ok(self.tokens)
            }

            State::SawAmpersand | State::SawSlash => {
                handler.receive(
                    error::MalformedOperator {
                        span: self.span_to(self.token_start + 1),
                    }
                    .into(),
                );

                Err(Error::MalformedOperator)
            }

            State::InBlockComment { .. }
            | State::SawStarInBlockComment { .. }
            | State::SawSlashInBlockComment { .. } => {
                handler.receive(
                    error::UnterminatedBlockComment {
                        span: self.span_to(self.token_start + 2),
                    }
                    .into(),
                );

                Err(Error::UnexpectedEndOfInput)
            }
        }
    }

    fn report(
        &self,
        error: Error,
        index: ByteIndex,
        character: char,
        handler: &dyn Handler<error::Error>,
    ) {
        match error {
            Error::UnexpectedCharacter => handler.receive(
                error::UnexpectedCharacter {
                    span: Span::new(
                        self.iterator.source_file().clone(),
                        index,
                        index + character.len_utf8(),
                    )
                    .unwrap(),
                }
                .into(),
            ),

            Error::MalformedOperator => handler.receive(
                error::MalformedOperator {
                    span: self.span_to(self.token_start + 1),
                }
                .into(),
            ),

            Error::UnexpectedEndOfInput | Error::IntegerLiteralOverflow => {
                unreachable!("the transition function rejects with no other error")
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests;
