use std::process::ExitCode;

use minijava_driver::{Argument, Parser};

fn main() -> ExitCode {
    let argument = Argument::parse();
    minijava_driver::run(argument)
}
