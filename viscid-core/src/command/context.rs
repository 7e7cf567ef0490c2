//! This module contains the command context.

use crate::command::sender::CommandSender;
use crate::fluid::InfiniteSources;
use crate::grid::BlockGrid;

/// Everything a command handler may look at or change.
pub struct CommandContext<'a> {
    /// The sender of the command.
    pub sender: CommandSender,
    /// The world the command runs in.
    pub grid: &'a dyn BlockGrid,
    /// The infinite-source flags of the running simulation.
    pub sources: &'a mut InfiniteSources,
}

impl<'a> CommandContext<'a> {
    /// Creates a new command context.
    #[must_use]
    pub fn new(
        sender: CommandSender,
        grid: &'a dyn BlockGrid,
        sources: &'a mut InfiniteSources,
    ) -> Self {
        Self {
            sender,
            grid,
            sources,
        }
    }
}
