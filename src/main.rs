//! Gleaner CLI: copy files matching a name pattern and extension.

use clap::Parser;
use clap::error::ErrorKind;
use gleaner::engine::arg_parser::Cli;
use gleaner::engine::handle_run;
use std::process::ExitCode;
use std::time::Instant;

fn main() -> ExitCode {
    let start_time = Instant::now();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => ExitCode::SUCCESS,
                _ => ExitCode::FAILURE,
            };
        }
    };
    if let Err(err) = handle_run(&cli) {
        eprintln!("gleaner: {:#}", err);
        return ExitCode::FAILURE;
    }
    log::debug!("Total time: {:?}", start_time.elapsed());
    ExitCode::SUCCESS
}
