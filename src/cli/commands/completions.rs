//! Completions command - print shell completion scripts

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::CampResult;
use clap::CommandFactory;
use clap_complete::generate;
use std::io;

/// Execute the completions command
pub fn execute(args: CompletionsArgs) -> CampResult<()> {
    let mut command = Cli::command();
    generate(args.shell, &mut command, "camp", &mut io::stdout());
    Ok(())
}
