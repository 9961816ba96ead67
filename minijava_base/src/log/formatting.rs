//! Contains the ANSI escape codes used to style the diagnostic output.

use std::fmt::Display;

/// Represents a text style that can be applied to a displayable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Style {
    Bold,
    Underline,
}

impl Style {
    /// Wraps the given displayable object with the escape code of this style.
    pub fn with<T>(self, display: T) -> Painted<T> {
        Painted {
            code: match self {
                Self::Bold => "\x1B[1m",
                Self::Underline => "\x1B[4m",
            },
            display,
        }
    }
}

/// Represents a foreground color that can be applied to a displayable object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
}

impl Color {
    /// Wraps the given displayable object with the escape code of this color.
    pub fn with<T>(self, display: T) -> Painted<T> {
        Painted {
            code: match self {
                Self::Black => "\x1B[30m",
                Self::Red => "\x1B[31m",
                Self::Green => "\x1B[32m",
                Self::Yellow => "\x1B[33m",
                Self::Blue => "\x1B[34m",
                Self::Magenta => "\x1B[35m",
                Self::Cyan => "\x1B[36m",
                Self::White => "\x1B[37m",
            },
            display,
        }
    }
}

/// Is a struct implementing [`Display`] that prints its content wrapped in an
/// ANSI escape code followed by a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Painted<T> {
    /// The ANSI escape code applied to the content.
    pub code: &'static str,

    /// The displayable content.
    pub display: T,
}

impl<T: Display> Display for Painted<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}\x1B[0m", self.code, self.display)
    }
}
