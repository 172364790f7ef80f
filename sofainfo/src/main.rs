//! sofainfo - Print the contents of AES69 (SOFA) files.
//!
//! Reports whether a file is a valid SOFA file and a valid
//! FreeFieldDirectivityTF file, then prints its attributes, dimensions,
//! positions, frequency axis and transfer-function data.

mod cli;
mod commands;
mod output;

use anyhow::Result;
use clap::Parser;

use cli::Args;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    init_logging(args.verbose, args.quiet);

    if let Err(e) = run(args) {
        output::print_error(&e);
        std::process::exit(1);
    }
}

/// Route library logs to stderr; `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool, quiet: bool) {
    let default = match (verbose, quiet) {
        (true, _) => "debug",
        (false, true) => "error",
        (false, false) => "warn",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default))
        .format_timestamp(None)
        .init();
}

/// Main dispatch function.
fn run(args: Args) -> Result<()> {
    args.validate().map_err(|e| anyhow::anyhow!("{}", e))?;

    if args.check {
        commands::check::run(&args)
    } else {
        commands::info::run(&args)
    }
}
