//! The built-in commands.
pub mod make_infinite_source;

use crate::command::context::CommandContext;
use crate::command::error::CommandError;

/// A command that can be registered with the dispatcher.
pub trait CommandHandler {
    /// Returns the names of the command. The first one is the primary name.
    fn names(&self) -> &'static [&'static str];

    /// Returns the description of the command.
    fn description(&self) -> &'static str;

    /// Runs the command. The returned flag is command specific.
    fn handle(
        &self,
        command_args: &[&str],
        context: &mut CommandContext<'_>,
    ) -> Result<bool, CommandError>;
}
