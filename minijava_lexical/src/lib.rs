//! This crate implements the lexical analysis phase of the MiniJava compiler
//! front end. This phase is responsible for turning the characters of a
//! source file into a flat stream of classified tokens.
//!
//! The final output of this phase is a [`token_stream::TokenStream`],
//! representing the list of tokens of a source file with every
//! `System.out.println` member chain already fused into a single token.

#![deny(
    missing_debug_implementations,
    missing_copy_implementations,
    missing_docs,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    clippy::missing_errors_doc
)]
#![allow(clippy::missing_panics_doc, clippy::missing_const_for_fn)]

pub mod error;
pub mod scanner;
pub mod token;
pub mod token_stream;
