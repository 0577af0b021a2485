//! Docstree CLI Binary
//!
//! Command-line interface for browsing a Drive hierarchy as a tree.

use clap::Parser;
use docstree::config::ConfigLoader;
use docstree::logging::init_logging;
use docstree::tooling::cli::{Cli, CliContext};
use std::process;

fn main() {
    let cli = Cli::parse();

    // Logging comes up before the context so config errors are still reported.
    let logging = ConfigLoader::resolve(cli.config.as_deref())
        .map(|config| config.logging)
        .unwrap_or_default()
        .with_overrides(
            cli.verbose,
            cli.log_level.as_deref(),
            cli.log_format.as_deref(),
            cli.log_output.as_deref(),
            cli.log_file.clone(),
        );
    if let Err(e) = init_logging(Some(&logging)) {
        eprintln!("Warning: logging disabled: {}", e);
    }

    let context = match CliContext::new(cli.config.clone(), cli.records.clone()) {
        Ok(ctx) => ctx,
        Err(e) => {
            eprintln!("Error initializing docstree: {}", e);
            process::exit(1);
        }
    };

    match context.execute(&cli.command) {
        Ok(output) => {
            println!("{}", output.trim_end());
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_auth() {
                eprintln!("Run `docstree sign-in` to authenticate.");
            }
            process::exit(1);
        }
    }
}
