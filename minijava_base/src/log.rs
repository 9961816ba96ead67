//! Provides the types used to format log messages printed to the console.

use std::fmt::Display;

use derive_new::new;
use formatting::{Color, Style};

use crate::source_file::Span;

pub mod formatting;

/// Represents the severity of a log message to be printed to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
pub enum Severity {
    Error,
    Info,
    Warning,
}

/// Is a struct implementing [`Display`] that prints a log message behind a
/// colored severity header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct Message<T> {
    /// The severity of the log message.
    pub severity: Severity,

    /// The message to be displayed.
    pub display: T,
}

impl<T: Display> Display for Message<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let header = Style::Bold.with(match self.severity {
            Severity::Error => Color::Red.with("[error]:"),
            Severity::Info => Color::Green.with("[info]:"),
            Severity::Warning => Color::Yellow.with("[warning]:"),
        });

        write!(f, "{header} {}", Style::Bold.with(&self.display))
    }
}

fn digit_count(mut number: usize) -> usize {
    let mut digits = 0;

    while number > 0 {
        number /= 10;
        digits += 1;
    }

    digits
}

/// Writes the line-number gutter of one output row.
///
/// Passing [`None`] writes an empty gutter that still lines up with the
/// numbered rows.
fn write_gutter(
    f: &mut std::fmt::Formatter<'_>,
    width: usize,
    line_number: Option<usize>,
) -> std::fmt::Result {
    let digits = line_number.map_or(0, digit_count);

    if let Some(number) = line_number {
        write!(f, "{}", Style::Bold.with(Color::Cyan.with(number)))?;
    }

    for _ in digits..=width {
        write!(f, " ")?;
    }

    write!(f, "{}", Style::Bold.with(Color::Cyan.with("┃")))
}

/// Writes a single character of a quoted source line, expanding tabs and
/// dropping line terminators.
fn write_character(
    f: &mut std::fmt::Formatter<'_>,
    character: char,
    underline: bool,
) -> std::fmt::Result {
    if character == '\t' {
        write!(f, "    ")
    } else if character == '\n' || character == '\r' {
        Ok(())
    } else if underline {
        write!(
            f,
            "{}",
            Style::Underline.with(Style::Bold.with(Color::Red.with(character)))
        )
    } else {
        write!(f, "{character}")
    }
}

/// Is a struct implementing [`Display`] that quotes the line of source code a
/// span lies on, underlining the characters the span covers.
///
/// Every diagnostic the lexer produces points at a lexeme sitting on a single
/// line; a span that runs past its first line is underlined up to the end of
/// that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, new)]
pub struct SourceCodeDisplay<'a, T> {
    /// The span of the source code to be printed.
    pub span: &'a Span,

    /// The help message printed below the underlined span, if any.
    pub help_display: Option<T>,
}

impl<T: Display> Display for SourceCodeDisplay<'_, T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let start_location = self.span.start_location();
        let line_number = start_location.line;

        // one past the last underlined column; spans ending at the end of the
        // file or on a later line underline the rest of the line
        let end_column = self
            .span
            .end_location()
            .filter(|end| end.line == line_number)
            .map_or(usize::MAX, |end| end.column);

        // the line after the span is quoted below, so its number decides the
        // gutter width
        let gutter_width = digit_count(line_number + 1);

        for _ in 0..gutter_width {
            write!(f, " ")?;
        }

        writeln!(
            f,
            "{} {}",
            Style::Bold.with(Color::Cyan.with("-->")),
            format_args!(
                "{}:{}:{}",
                self.span.source_file().path().display(),
                line_number,
                start_location.column
            )
        )?;

        write_gutter(f, gutter_width, None)?;
        writeln!(f)?;

        if let Some(line) = self.span.source_file().line(line_number - 1) {
            write_gutter(f, gutter_width, Some(line_number - 1))?;
            write!(f, " ")?;

            for character in line.chars() {
                write_character(f, character, false)?;
            }

            writeln!(f)?;
        }

        write_gutter(f, gutter_width, Some(line_number))?;
        write!(f, " ")?;

        let line = self.span.source_file().line(line_number).unwrap();

        for (index, character) in line.chars().enumerate() {
            let column = index + 1;

            write_character(
                f,
                character,
                column >= start_location.column && column < end_column,
            )?;
        }

        writeln!(f)?;

        if let Some(help_display) = &self.help_display {
            write_gutter(f, gutter_width, None)?;
            write!(f, " ")?;

            for (index, character) in line.chars().enumerate() {
                if index + 1 >= start_location.column {
                    break;
                }

                write!(f, "{}", if character == '\t' { "    " } else { " " })?;
            }

            writeln!(f, "{}: {help_display}", Style::Bold.with("help"))?;
        }

        if let Some(line) = self.span.source_file().line(line_number + 1) {
            write_gutter(f, gutter_width, Some(line_number + 1))?;
            write!(f, " ")?;

            for character in line.chars() {
                write_character(f, character, false)?;
            }

            writeln!(f)?;
        }

        write_gutter(f, gutter_width, None)?;
        writeln!(f)
    }
}
