//! Is a module containing the [`Token`] type and all of its related types.

use std::{collections::HashMap, fmt::Display, str::FromStr};

use derive_more::From;
use enum_as_inner::EnumAsInner;
use lazy_static::lazy_static;
use minijava_base::source_file::{SourceElement, Span};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;
use thiserror::Error;

/// Is an enumeration of the reserved words of the MiniJava programming
/// language.
///
/// Reserved words are recognized case-sensitively and without regard to
/// context; `length` is the [`KeywordKind::Length`] keyword even in positions
/// where Java would accept it as a plain name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum KeywordKind {
    Boolean,
    Class,
    Else,
    Extends,
    False,
    If,
    Int,
    Length,
    Main,
    New,
    Public,
    Return,
    Static,
    String,
    This,
    True,
    Void,
    While,
}

impl Display for KeywordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Boolean => "Boolean",
            Self::Class => "Class",
            Self::Else => "Else",
            Self::Extends => "Extends",
            Self::False => "False",
            Self::If => "If",
            Self::Int => "Int",
            Self::Length => "Length",
            Self::Main => "Main",
            Self::New => "New",
            Self::Public => "Public",
            Self::Return => "Return",
            Self::Static => "Static",
            Self::String => "String",
            Self::This => "This",
            Self::True => "True",
            Self::Void => "Void",
            Self::While => "While",
        })
    }
}

/// Is an error that is returned when a string cannot be parsed into a
/// [`KeywordKind`] in the [`FromStr`] trait implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Error)]
#[error("invalid string representation of keyword.")]
pub struct KeywordParseError;

impl FromStr for KeywordKind {
    type Err = KeywordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        lazy_static! {
            static ref STRING_KEYWORD_MAP: HashMap<&'static str, KeywordKind> = {
                let mut map = HashMap::new();

                for keyword in KeywordKind::iter() {
                    map.insert(keyword.as_str(), keyword);
                }

                map
            };
        }
        STRING_KEYWORD_MAP.get(s).copied().ok_or(KeywordParseError)
    }
}

impl KeywordKind {
    /// Gets the keyword as it is spelled in the source code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Class => "class",
            Self::Else => "else",
            Self::Extends => "extends",
            Self::False => "false",
            Self::If => "if",
            Self::Int => "int",
            Self::Length => "length",
            Self::Main => "main",
            Self::New => "new",
            Self::Public => "public",
            Self::Return => "return",
            Self::Static => "static",
            Self::String => "String",
            Self::This => "this",
            Self::True => "true",
            Self::Void => "void",
            Self::While => "while",
        }
    }
}

/// Is an enumeration of the binary operators of the MiniJava programming
/// language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum OperatorKind {
    And,
    LessThan,
    Plus,
    Minus,
    Times,
}

impl OperatorKind {
    /// Gets the operator as it is spelled in the source code.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::And => "&&",
            Self::LessThan => "<",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Times => "*",
        }
    }

    /// Resolves the operators spelled with a single character.
    ///
    /// [`OperatorKind::And`] is never returned here; its `&&` spelling is the
    /// only multi-character operator in the language.
    #[must_use]
    pub fn from_char(character: char) -> Option<Self> {
        match character {
            '<' => Some(Self::LessThan),
            '+' => Some(Self::Plus),
            '-' => Some(Self::Minus),
            '*' => Some(Self::Times),
            _ => None,
        }
    }
}

impl Display for OperatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::And => "And",
            Self::LessThan => "LessThan",
            Self::Plus => "Plus",
            Self::Minus => "Minus",
            Self::Times => "Times",
        })
    }
}

/// Is an enumeration of the single-character punctuation tokens of the
/// MiniJava programming language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, EnumIter)]
#[allow(missing_docs)]
pub enum PunctuationKind {
    LeftBrace,
    RightBrace,
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    Semicolon,
    Comma,
    Equals,
    Dot,
    Bang,
}

impl PunctuationKind {
    /// Gets the character the punctuation is written as in the source code.
    #[must_use]
    pub fn as_char(self) -> char {
        match self {
            Self::LeftBrace => '{',
            Self::RightBrace => '}',
            Self::LeftParen => '(',
            Self::RightParen => ')',
            Self::LeftBracket => '[',
            Self::RightBracket => ']',
            Self::Semicolon => ';',
            Self::Comma => ',',
            Self::Equals => '=',
            Self::Dot => '.',
            Self::Bang => '!',
        }
    }

    /// Resolves the punctuation written as the given character.
    #[must_use]
    pub fn from_char(character: char) -> Option<Self> {
        match character {
            '{' => Some(Self::LeftBrace),
            '}' => Some(Self::RightBrace),
            '(' => Some(Self::LeftParen),
            ')' => Some(Self::RightParen),
            '[' => Some(Self::LeftBracket),
            ']' => Some(Self::RightBracket),
            ';' => Some(Self::Semicolon),
            ',' => Some(Self::Comma),
            '=' => Some(Self::Equals),
            '.' => Some(Self::Dot),
            '!' => Some(Self::Bang),
            _ => None,
        }
    }
}

impl Display for PunctuationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::LeftBrace => "LeftBrace",
            Self::RightBrace => "RightBrace",
            Self::LeftParen => "LeftParen",
            Self::RightParen => "RightParen",
            Self::LeftBracket => "LeftBracket",
            Self::RightBracket => "RightBracket",
            Self::Semicolon => "Semicolon",
            Self::Comma => "Comma",
            Self::Equals => "Equals",
            Self::Dot => "Dot",
            Self::Bang => "Bang",
        })
    }
}

/// Is an enumeration containing all kinds of tokens in the MiniJava
/// programming language.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, EnumAsInner, From)]
#[allow(missing_docs)]
pub enum Token {
    Identifier(Identifier),
    Keyword(Keyword),
    IntegerLiteral(IntegerLiteral),
    Operator(Operator),
    Punctuation(Punctuation),
    SystemOutPrintln(SystemOutPrintln),
}

impl Token {
    /// Returns the span of the token.
    #[must_use]
    pub fn span(&self) -> &Span {
        match self {
            Self::Identifier(token) => &token.span,
            Self::Keyword(token) => &token.span,
            Self::IntegerLiteral(token) => &token.span,
            Self::Operator(token) => &token.span,
            Self::Punctuation(token) => &token.span,
            Self::SystemOutPrintln(token) => &token.span,
        }
    }

    /// Creates an identifier or keyword token out of a completed
    /// identifier-shaped lexeme.
    ///
    /// The lexeme is matched against the reserved word table; reserved
    /// spellings become [`Keyword`] tokens and every other lexeme becomes an
    /// [`Identifier`].
    #[must_use]
    pub fn identifier_or_keyword(span: Span) -> Self {
        match KeywordKind::from_str(span.str()) {
            Ok(keyword) => Keyword { span, keyword }.into(),
            Err(_) => Identifier { span }.into(),
        }
    }
}

impl SourceElement for Token {
    fn span(&self) -> Span {
        match self {
            Self::Identifier(token) => token.span(),
            Self::Keyword(token) => token.span(),
            Self::IntegerLiteral(token) => token.span(),
            Self::Operator(token) => token.span(),
            Self::Punctuation(token) => token.span(),
            Self::SystemOutPrintln(token) => token.span(),
        }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Identifier(token) => write!(f, "Identifier({})", token.span.str()),
            Self::Keyword(token) => Display::fmt(&token.keyword, f),
            Self::IntegerLiteral(token) => write!(f, "IntegerLiteral({})", token.value),
            Self::Operator(token) => Display::fmt(&token.operator, f),
            Self::Punctuation(token) => Display::fmt(&token.punctuation, f),
            Self::SystemOutPrintln(_) => f.write_str("SystemOutPrintln"),
        }
    }
}

/// Represents a lexeme that names a class, method, field, or variable.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Identifier {
    /// Is the span that makes up the token.
    pub span: Span,
}

impl SourceElement for Identifier {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a lexeme whose spelling is reserved by the language.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Keyword {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the [`KeywordKind`] that the token represents.
    pub keyword: KeywordKind,
}

impl SourceElement for Keyword {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a maximal run of decimal digits along with its decoded value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IntegerLiteral {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the decoded value of the literal.
    ///
    /// The value is always non-negative; a leading `-` is lexed as a separate
    /// [`OperatorKind::Minus`] token, never folded into the literal.
    pub value: u64,
}

impl SourceElement for IntegerLiteral {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a binary operator lexeme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Operator {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the [`OperatorKind`] that the token represents.
    pub operator: OperatorKind,
}

impl SourceElement for Operator {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a single punctuation character lexeme.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Punctuation {
    /// Is the span that makes up the token.
    pub span: Span,

    /// Is the [`PunctuationKind`] that the token represents.
    pub punctuation: PunctuationKind,
}

impl SourceElement for Punctuation {
    fn span(&self) -> Span { self.span.clone() }
}

/// Represents a fused `System.out.println` member chain.
///
/// The scanner never produces this token. It only appears after the token
/// stream rewriting pass has replaced the five tokens
/// `Identifier(System) Dot Identifier(out) Dot Identifier(println)` with a
/// single token covering them all.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SystemOutPrintln {
    /// Is the span covering the whole member chain.
    pub span: Span,
}

impl SourceElement for SystemOutPrintln {
    fn span(&self) -> Span { self.span.clone() }
}
