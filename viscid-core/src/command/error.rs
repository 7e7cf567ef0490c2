//! Errors returned by command handlers.

use thiserror::Error;
use viscid_utils::BlockPos;

/// Why a command could not be carried out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    /// The command line was blank.
    #[error("empty command")]
    EmptyCommand,
    /// No handler is registered under the name.
    #[error("command {0} does not exist")]
    UnknownCommand(String),
    /// The command needs a player but was sent from the console.
    #[error("this command can only be used by players")]
    NotAPlayer,
    /// The sender is not looking at any block within reach.
    #[error("no block in range")]
    NoTarget,
    /// The targeted block is not a liquid.
    #[error("block at {0} is not a liquid")]
    NotALiquid(BlockPos),
}
