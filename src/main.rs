use std::process::ExitCode;

use color_eyre::Result;
use pagespeed::cli::args::Args;
use pagespeed::cli::commands;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    pagespeed::logging::init();

    let invocation = match Args::parse_invocation(std::env::args_os()) {
        Ok(invocation) => invocation,
        Err(err) => return Ok(commands::handle_parse_error(&err)),
    };

    commands::run(invocation)
}
