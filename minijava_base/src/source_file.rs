//! Contains the code related to the source code input: memory-mapped source
//! files, byte spans, and a peekable character iterator for the scanner.

use std::{
    cmp::Ordering,
    fmt::{Debug, Display},
    fs::File,
    io::Read,
    iter::Peekable,
    ops::Range,
    path::PathBuf,
    str::CharIndices,
    sync::Arc,
};

use getset::{CopyGetters, Getters};
use memmap::MmapOptions;
use ouroboros::self_referencing;
use thiserror::Error;

/// Represents an error that occurs when loading or creating a source file.
#[derive(Debug, Error)]
#[allow(missing_docs)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Utf8(#[from] std::str::Utf8Error),
}

/// Represents a single source file given to the lexer.
///
/// The text is memory-mapped and borrowed as string slices everywhere else,
/// so a `SourceFile` is always handed around behind an [`Arc`].
#[derive(Getters)]
pub struct SourceFile {
    text: MappedText,

    /// Gets the path the source file was loaded from.
    #[get = "pub"]
    path: PathBuf,

    /// Byte ranges of the lines of the text, in order, covering all of it.
    lines: Vec<Range<usize>>,
}

impl Debug for SourceFile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SourceFile")
            .field("path", &self.path)
            .field("lines", &self.lines)
            .finish()
    }
}

#[self_referencing]
struct MappedText {
    file: File,
    map: Option<memmap::Mmap>,

    #[borrows(map)]
    text: &'this str,
}

impl MappedText {
    fn create(file: File) -> Result<Self, Error> {
        // mapping a zero-length file fails on some platforms
        let map = if file.metadata()?.len() == 0 {
            None
        } else {
            Some(unsafe { MmapOptions::new().map(&file)? })
        };

        MappedTextTryBuilder {
            file,
            map,
            text_builder: |map| {
                map.as_ref()
                    .map_or(Ok(""), |map| std::str::from_utf8(map).map_err(Error::from))
            },
        }
        .try_build()
    }

    fn get(&self) -> &str { self.borrow_text() }
}

impl SourceFile {
    fn new(path: PathBuf, text: MappedText) -> Arc<Self> {
        let lines = line_ranges(text.get());
        Arc::new(Self { text, path, lines })
    }

    /// Gets the full text of the source file.
    #[must_use]
    pub fn content(&self) -> &str { self.text.get() }

    /// Gets the line of the source file at the given line number, including
    /// its terminator.
    ///
    /// The line number starts at 1.
    #[must_use]
    pub fn line(&self, line: usize) -> Option<&str> {
        line.checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(|range| &self.content()[range.clone()])
    }

    /// Gets the number of lines in the source file.
    #[must_use]
    pub fn line_count(&self) -> usize { self.lines.len() }

    /// Gets a peekable [`Iterator`] over the characters of the source file.
    #[must_use]
    pub fn iter<'a>(self: &'a Arc<Self>) -> Iterator<'a> {
        Iterator {
            source_file: self,
            characters: self.content().char_indices().peekable(),
        }
    }

    /// Memory-maps the given file as a source file.
    ///
    /// # Errors
    /// - [`Error::Io`]: the file could not be inspected or mapped.
    /// - [`Error::Utf8`]: the mapped bytes are not valid UTF-8.
    pub fn load(file: File, path: PathBuf) -> Result<Arc<Self>, Error> {
        Ok(Self::new(path, MappedText::create(file)?))
    }

    /// Writes the given displayable object to a temporary file and loads it
    /// back as a source file.
    ///
    /// # Errors
    /// - [`Error::Io`]: the temporary file could not be created, written, or
    ///   mapped.
    /// - [`Error::Utf8`]: the mapped bytes are not valid UTF-8.
    pub fn temp(display: impl Display) -> Result<Arc<Self>, Error> {
        use std::io::Write;

        let mut file = tempfile::Builder::new()
            .prefix("minijava")
            .suffix(".java")
            .tempfile()?;
        write!(file.as_file_mut(), "{display}")?;

        let path = file.path().to_owned();
        Self::load(file.into_file(), path)
    }

    /// Reads the whole of standard input and loads it as a source file.
    ///
    /// The text is spooled through a temporary file so that a pipe can be
    /// memory-mapped like any other source.
    ///
    /// # Errors
    /// - [`Error::Io`]: standard input could not be read or the spool file
    ///   could not be created.
    /// - [`Error::Utf8`]: the input is not valid UTF-8.
    pub fn stdin() -> Result<Arc<Self>, Error> {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text)?;
        Self::temp(text)
    }

    /// Gets the [`Location`] of the given byte index.
    ///
    /// Returns [`None`] if the index is past the end of the text or not a
    /// character boundary.
    #[must_use]
    pub fn location(&self, byte_index: ByteIndex) -> Option<Location> {
        if !self.content().is_char_boundary(byte_index) {
            return None;
        }

        // the line table is sorted, so the line number is a binary search
        let line = self
            .lines
            .binary_search_by(|range| {
                if range.contains(&byte_index) {
                    Ordering::Equal
                } else if byte_index < range.start {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            })
            .ok()?;

        let line_start = self.lines[line].start;
        let column = self
            .line(line + 1)?
            .char_indices()
            .take_while(|(offset, _)| line_start + offset < byte_index)
            .count()
            + 1;

        Some(Location {
            line: line + 1,
            column,
        })
    }
}

/// Is an unsigned integer representing a byte offset into a source file.
pub type ByteIndex = usize;

/// Is a line/column position in a source file, both starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Location {
    /// The line number of the location (starts at 1).
    pub line: usize,

    /// The column number of the location (starts at 1).
    pub column: usize,
}

/// Represents a range of characters in a source file.
///
/// A span is the lexeme representation used throughout the lexer: instead of
/// accumulating characters into strings, tokens remember the byte range they
/// cover and borrow their text from the mapped file on demand.
#[derive(Clone, Getters, CopyGetters)]
pub struct Span {
    /// Gets the start byte index of the span.
    #[get_copy = "pub"]
    start: ByteIndex,

    /// Gets the end byte index of the span (exclusive).
    #[get_copy = "pub"]
    end: ByteIndex,

    /// Gets the source file that the span is located in.
    #[get = "pub"]
    source_file: Arc<SourceFile>,
}

impl Debug for Span {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Span")
            .field("start", &self.start)
            .field("end", &self.end)
            .field("content", &self.str())
            .finish()
    }
}

impl PartialEq for Span {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.source_file, &other.source_file)
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for Span {}

impl PartialOrd for Span {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> { Some(self.cmp(other)) }
}

impl Ord for Span {
    fn cmp(&self, other: &Self) -> Ordering {
        let self_file = Arc::as_ptr(&self.source_file) as usize;
        let other_file = Arc::as_ptr(&other.source_file) as usize;

        self_file
            .cmp(&other_file)
            .then_with(|| self.start.cmp(&other.start))
            .then_with(|| self.end.cmp(&other.end))
    }
}

impl std::hash::Hash for Span {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.start.hash(state);
        self.end.hash(state);
        Arc::as_ptr(&self.source_file).hash(state);
    }
}

impl Span {
    /// Creates a span covering `start..end` in the given source file.
    ///
    /// Returns [`None`] unless both endpoints are character boundaries with
    /// `start <= end`.
    #[must_use]
    pub fn new(source_file: Arc<SourceFile>, start: ByteIndex, end: ByteIndex) -> Option<Self> {
        if start > end
            || !source_file.content().is_char_boundary(start)
            || !source_file.content().is_char_boundary(end)
        {
            return None;
        }

        Some(Self {
            start,
            end,
            source_file,
        })
    }

    /// Creates a span from the given start byte index to the end of the
    /// source file.
    #[must_use]
    pub fn to_end(source_file: Arc<SourceFile>, start: ByteIndex) -> Option<Self> {
        if !source_file.content().is_char_boundary(start) {
            return None;
        }

        Some(Self {
            start,
            end: source_file.content().len(),
            source_file,
        })
    }

    /// Gets the slice of source text that the span covers.
    #[must_use]
    pub fn str(&self) -> &str { &self.source_file.content()[self.start..self.end] }

    /// Gets the starting [`Location`] of the span.
    #[must_use]
    pub fn start_location(&self) -> Location { self.source_file.location(self.start).unwrap() }

    /// Gets the ending [`Location`] of the span.
    ///
    /// Returns [`None`] if the span ends at the end of the source file.
    #[must_use]
    pub fn end_location(&self) -> Option<Location> { self.source_file.location(self.end) }

    /// Creates a span stretching from the start of this span to the end of
    /// the given one.
    ///
    /// Returns [`None`] if the two spans come from different source files or
    /// appear in the wrong order.
    #[must_use]
    pub fn join(&self, end: &Self) -> Option<Self> {
        if !Arc::ptr_eq(&self.source_file, &end.source_file) || self.start > end.end {
            return None;
        }

        Some(Self {
            start: self.start,
            end: end.end,
            source_file: self.source_file.clone(),
        })
    }
}

/// Represents an element that is located within a source file.
pub trait SourceElement {
    /// Gets the span location of the element.
    fn span(&self) -> Span;
}

/// Is an iterator over `(byte index, character)` pairs of a source file that
/// can be peeked at without consuming.
#[derive(Debug, Clone, CopyGetters)]
pub struct Iterator<'a> {
    /// Gets the source file that the iterator is iterating over.
    #[get_copy = "pub"]
    source_file: &'a Arc<SourceFile>,
    characters: Peekable<CharIndices<'a>>,
}

impl<'a> Iterator<'a> {
    /// Peeks at the next character in the source file.
    pub fn peek(&mut self) -> Option<(ByteIndex, char)> { self.characters.peek().copied() }
}

impl<'a> std::iter::Iterator for Iterator<'a> {
    type Item = (ByteIndex, char);

    fn next(&mut self) -> Option<Self::Item> { self.characters.next() }
}

fn line_ranges(text: &str) -> Vec<Range<usize>> {
    let bytes = text.as_bytes();
    let mut ranges = Vec::new();
    let mut line_start = 0;
    let mut index = 0;

    // `\n` and `\r` are ASCII, so walking bytes never splits a UTF-8 sequence
    while index < bytes.len() {
        match bytes[index] {
            b'\n' => {
                ranges.push(line_start..index + 1);
                index += 1;
                line_start = index;
            }
            b'\r' => {
                let end = if bytes.get(index + 1) == Some(&b'\n') {
                    index + 2
                } else {
                    index + 1
                };
                ranges.push(line_start..end);
                index = end;
                line_start = end;
            }
            _ => index += 1,
        }
    }

    ranges.push(line_start..text.len());
    ranges
}

#[cfg(test)]
mod tests;
