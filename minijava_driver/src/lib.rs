use std::{cell::Cell, fmt::Display, fs::File, path::PathBuf, process::ExitCode, sync::Arc};

pub use clap::Parser;
use minijava_base::{
    diagnostic::Handler,
    log::Severity,
    source_file::{self, SourceFile},
};
use minijava_lexical::token_stream::TokenStream;

/// The arguments to the program.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, clap::Parser)]
#[clap(name = "minijava", about = "MiniJava lexical analyzer.")]
pub struct Argument {
    /// The input file to lex; standard input is read when this is omitted.
    pub file: Option<PathBuf>,
}

/// A struct that implements [`Handler`] but prints all the message to the standard error stream.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Printer {
    printed: Cell<bool>,
}

impl Printer {
    /// Creates a new [`Printer`].
    fn new() -> Self {
        Self {
            printed: Cell::new(false),
        }
    }

    fn has_printed(&self) -> bool { self.printed.get() }
}

impl<E: Display> Handler<E> for Printer {
    fn receive(&self, error: E) {
        eprintln!("{}", error);
        self.printed.set(true);
    }
}

/// Runs the lexer with the given arguments.
pub fn run(argument: Argument) -> ExitCode {
    let source_file = match open(&argument) {
        Ok(source_file) => source_file,
        Err(error) => {
            let msg = minijava_base::log::Message::new(
                Severity::Error,
                match &argument.file {
                    Some(path) => format!("{}: {error}", path.display()),
                    None => format!("standard input: {error}"),
                },
            );

            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let printer = Printer::new();

    // token stream
    let token_stream = match TokenStream::tokenize(&source_file, &printer) {
        Ok(token_stream) => token_stream,
        Err(error) => {
            // the printer has usually already shown the rich diagnostic
            if !printer.has_printed() {
                let msg = minijava_base::log::Message::new(Severity::Error, error);

                eprintln!("{msg}");
            }

            return ExitCode::FAILURE;
        }
    };

    // one token per line
    for token in token_stream.iter() {
        println!("{token}");
    }

    ExitCode::SUCCESS
}

/// Opens the source named by the arguments, falling back to standard input.
fn open(argument: &Argument) -> Result<Arc<SourceFile>, source_file::Error> {
    match &argument.file {
        Some(path) => SourceFile::load(File::open(path)?, path.clone()),
        None => SourceFile::stdin(),
    }
}
