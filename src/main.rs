use clap::Parser;
use sharppy_converter::cli::{self, Args};
use std::process;

fn main() {
    // Parse command line arguments; clap exits non-zero on missing flags
    let args = Args::parse();

    if let Err(error) = cli::setup_logging(&args) {
        eprintln!("Error: {:#}", error);
        process::exit(1);
    }

    match cli::run(&args) {
        Ok(_stats) => {
            // Success - the summary has already been reported
            process::exit(0);
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
