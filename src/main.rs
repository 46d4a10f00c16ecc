use std::process::ExitCode;

use clap::Parser;
use tpot::cli::{Arguments, ExitStatus};

fn main() -> ExitCode {
    let args = Arguments::parse();

    match tpot::cli::run_cli(args) {
        Ok(()) => ExitStatus::Success.into(),
        Err(err) => {
            eprintln!("ERROR: {}", err);
            ExitStatus::Error.into()
        }
    }
}
