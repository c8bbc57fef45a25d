use std::process::ExitCode;

use clap::Parser;

use trove_cli::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match trove_cli::run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
