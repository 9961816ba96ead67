//! Contains the [`TokenStream`] struct and its related types.

use std::{ops::Index, sync::Arc};

use derive_more::Deref;
use minijava_base::{
    diagnostic::Handler,
    source_file::{SourceFile, Span},
};

use crate::{
    error,
    scanner::{self, Scanner},
    token::{PunctuationKind, SystemOutPrintln, Token},
};

/// Is the final output of the lexical analysis phase, a flat list of tokens.
///
/// This struct is meant to be consumed by the next stage of the compilation
/// process. The five-token `System.out.println` member chain never appears in
/// it; the rewriting pass has already collapsed every occurrence into a
/// single [`SystemOutPrintln`] token.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Deref)]
pub struct TokenStream {
    #[deref]
    tokens: Vec<Token>,
}

impl TokenStream {
    /// Tokenizes the given source file.
    ///
    /// The source file is scanned into a raw token sequence, which is then
    /// rewritten so that every `Identifier(System) Dot Identifier(out) Dot
    /// Identifier(println)` chain becomes one token.
    ///
    /// # Errors
    /// Returns the first lexical error the scanner rejected the source code
    /// with; the rich diagnostic describing it is reported to `handler`.
    pub fn tokenize(
        source_file: &Arc<SourceFile>,
        handler: &dyn Handler<error::Error>,
    ) -> Result<Self, scanner::Error> {
        Scanner::new(source_file).scan(handler).map(|tokens| Self {
            tokens: Self::fuse_println(tokens),
        })
    }

    /// Replaces every five-token `System.out.println` chain with a single
    /// [`SystemOutPrintln`] token.
    ///
    /// A single forward pass: at each position the next five tokens are
    /// tested, and a match advances past its replacement so that consumed
    /// positions are never re-examined. Occurrences cannot overlap.
    fn fuse_println(tokens: Vec<Token>) -> Vec<Token> {
        let mut fused = Vec::with_capacity(tokens.len());
        let mut index = 0;

        while index < tokens.len() {
            if let Some(span) = Self::println_span(&tokens[index..]) {
                fused.push(SystemOutPrintln { span }.into());
                index += 5;
            } else {
                fused.push(tokens[index].clone());
                index += 1;
            }
        }

        fused
    }

    /// Returns the joined span of the `System.out.println` chain starting the
    /// given tokens, if they start with one.
    fn println_span(tokens: &[Token]) -> Option<Span> {
        let [system, first_dot, out, second_dot, println, ..] = tokens else {
            return None;
        };

        let (system, out, println) = (
            system.as_identifier()?,
            out.as_identifier()?,
            println.as_identifier()?,
        );

        if system.span.str() != "System" || out.span.str() != "out" || println.span.str() != "println"
        {
            return None;
        }

        if !(Self::is_dot(first_dot) && Self::is_dot(second_dot)) {
            return None;
        }

        system.span.join(&println.span)
    }

    fn is_dot(token: &Token) -> bool {
        token
            .as_punctuation()
            .map_or(false, |punctuation| {
                punctuation.punctuation == PunctuationKind::Dot
            })
    }

    /// Dissolves this struct into its list of tokens.
    #[must_use]
    pub fn dissolve(self) -> Vec<Token> { self.tokens }
}

impl Index<usize> for TokenStream {
    type Output = Token;

    fn index(&self, index: usize) -> &Self::Output { &self.tokens[index] }
}
