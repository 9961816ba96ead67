//! Contains all kinds of lexical errors that can occur while tokenizing the
//! source code.

use std::fmt::Display;

use derive_more::From;
use enum_as_inner::EnumAsInner;
use getset::Getters;
use minijava_base::{
    log::{Message, Severity, SourceCodeDisplay},
    source_file::Span,
};

/// The source code contains a character that cannot start any token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters)]
pub struct UnexpectedCharacter {
    /// The span of the offending character.
    pub span: Span,
}

impl Display for UnexpectedCharacter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(
                Severity::Error,
                format_args!("found an unexpected character `{}`", self.span.str())
            ),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// The source code contains a `&` or `/` that is not followed by the
/// character completing its operator or comment opener.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters)]
pub struct MalformedOperator {
    /// The span of the lone `&` or `/`.
    pub span: Span,
}

impl Display for MalformedOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let help = if self.span.str() == "&" {
            "`&` must be followed by another `&` to form the `&&` operator"
        } else {
            "`/` must be followed by `/` or `*` to start a comment"
        };

        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an incomplete operator"),
            SourceCodeDisplay::new(&self.span, Some(help))
        )
    }
}

/// The source code contains an unclosed `/*` comment.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters)]
pub struct UnterminatedBlockComment {
    /// The span of the unclosed `/*` that starts the comment.
    pub span: Span,
}

impl Display for UnterminatedBlockComment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an unclosed `/*` comment"),
            SourceCodeDisplay::new(&self.span, Option::<i32>::None)
        )
    }
}

/// The source code contains an integer literal whose value does not fit in
/// 64 bits.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Getters)]
pub struct IntegerLiteralOverflow {
    /// The span of the whole literal.
    pub span: Span,
}

impl Display for IntegerLiteralOverflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}\n{}",
            Message::new(Severity::Error, "found an integer literal that is too large"),
            SourceCodeDisplay::new(&self.span, Some("the value must fit in a 64-bit integer"))
        )
    }
}

/// Is an enumeration containing all kinds of lexical errors that can occur
/// while tokenizing the source code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Error {
    UnexpectedCharacter(UnexpectedCharacter),
    MalformedOperator(MalformedOperator),
    UnterminatedBlockComment(UnterminatedBlockComment),
    IntegerLiteralOverflow(IntegerLiteralOverflow),
}

impl Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnexpectedCharacter(err) => write!(f, "{err}"),
            Self::MalformedOperator(err) => write!(f, "{err}"),
            Self::UnterminatedBlockComment(err) => write!(f, "{err}"),
            Self::IntegerLiteralOverflow(err) => write!(f, "{err}"),
        }
    }
}
