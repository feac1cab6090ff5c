//! launchkit - manage launchd services from the command line

use std::process::ExitCode;

use clap::Parser;

use launchkit::cli::Cli;
use launchkit::logging;
use launchkit::output::json::format_error;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let json = cli.json;

    match cli.run().await {
        Ok(code) => code,
        Err(e) => {
            match format_error(&e) {
                Ok(out) if json => println!("{out}"),
                _ => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}
