//! Shell completions generation.
//!
//! The `degreeplan completions` command prints a completion script for the
//! requested shell.

use std::io::Write;

use clap::CommandFactory;

use crate::cli::args::{Cli, CompletionsArgs};
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

const BIN_NAME: &str = "degreeplan";

/// The completions command implementation.
pub struct CompletionsCommand {
    args: CompletionsArgs,
}

impl CompletionsCommand {
    /// Create a new completions command.
    pub fn new(args: CompletionsArgs) -> Self {
        Self { args }
    }

    /// Generate the completion script.
    pub fn script(&self) -> Vec<u8> {
        let mut cmd = Cli::command();
        let mut buf = Vec::new();
        clap_complete::generate(self.args.shell, &mut cmd, BIN_NAME, &mut buf);
        buf
    }
}

impl Command for CompletionsCommand {
    // Written straight to stdout: the script must not pass through UI
    // styling or output-mode filtering.
    fn execute(&self, _ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(&self.script())?;
        stdout.flush()?;
        Ok(CommandResult::success())
    }
}
