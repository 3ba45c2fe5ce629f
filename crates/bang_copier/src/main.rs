//! `bang`: copy '!'-marked files from a folder to configured destinations.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use bang_copier_log::{SpecTraceOptions, init_tracing};
use clap::Parser;

mod app;
mod cli;
mod error;
mod render;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    if cli.no_color {
        colored::control::set_override(false);
    }
    init_tracing(SpecTraceOptions {
        verbose: cli.verbose,
        ansi: !cli.no_color && io::stderr().is_terminal(),
    });

    let renderer = render::select_renderer(cli.plain);
    match app::run(&cli, renderer.as_ref()) {
        Ok(n_code) => ExitCode::from(n_code),
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::from(e.exit_code())
        }
    }
}
