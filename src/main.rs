use clap::Parser;
use std::process::ExitCode;
use tracing::debug;
use volctrl::audio::open_system_backend;
use volctrl::cli::USAGE;
use volctrl::{commands, logging, Cli, Error};

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // --help and --version come through here too
            return if e.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    logging::init(cli.verbose);

    let stdout = std::io::stdout();
    match commands::execute(&cli, open_system_backend, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            debug!(error = ?e, "command failed");
            eprintln!("Error: {e}");
            if let Error::Usage(usage) = &e {
                if usage.shows_usage() {
                    eprint!("{USAGE}");
                }
            }
            ExitCode::FAILURE
        }
    }
}
