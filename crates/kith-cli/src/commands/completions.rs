//! Shell completions

use clap::{Args, CommandFactory};
use clap_complete::{generate, Shell};

use crate::Cli;

#[derive(Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

pub fn run(args: &CompletionsArgs) -> anyhow::Result<()> {
    let mut cmd = Cli::command();
    tracing::debug!("Generating {} completions", args.shell);
    generate(args.shell, &mut cmd, "kith", &mut std::io::stdout());
    Ok(())
}
