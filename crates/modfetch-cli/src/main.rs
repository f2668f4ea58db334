use clap::Parser;
use modfetch_core::logging;

mod cli;

use crate::cli::Cli;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.log_file {
        if let Err(err) = logging::init_logging(cli.verbose) {
            logging::init_logging_stderr(cli.verbose);
            tracing::warn!("file logging unavailable ({:#}), logging to stderr", err);
        }
    } else {
        logging::init_logging_stderr(cli.verbose);
    }

    if let Err(err) = cli.run().await {
        eprintln!("modfetch error: {:#}", err);
        std::process::exit(1);
    }
}
