//! This module contains everything needed for commands (e.g., parsing, execution, and sender handling).
pub mod commands;
pub mod context;
pub mod error;
pub mod sender;

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::command::commands::{CommandHandler, make_infinite_source::MakeInfiniteSourceCommand};
use crate::command::context::CommandContext;
use crate::command::error::CommandError;

/// A struct that parses and dispatches commands to their appropriate handlers.
pub struct CommandDispatcher {
    /// A map of command names to their handlers.
    handlers: FxHashMap<&'static str, Arc<dyn CommandHandler>>,
}

impl CommandDispatcher {
    /// Creates a new command dispatcher with no handlers.
    #[must_use]
    pub fn new() -> Self {
        Self {
            handlers: FxHashMap::default(),
        }
    }

    /// Executes a command, logging any failure.
    ///
    /// Returns whether the command succeeded.
    pub fn handle_command(&self, context: &mut CommandContext<'_>, command: &str) -> bool {
        match self.execute(context, command) {
            Ok(_) => true,
            Err(error @ CommandError::UnknownCommand(_)) => {
                log::warn!("{error}");
                false
            }
            Err(error) => {
                log::info!("Command \"{command}\" failed: {error}");
                false
            }
        }
    }

    /// Executes a command.
    pub fn execute(
        &self,
        context: &mut CommandContext<'_>,
        command: &str,
    ) -> Result<bool, CommandError> {
        let (name, command_args) = Self::split_command(command)?;
        let handler = self
            .handlers
            .get(name.to_lowercase().as_str())
            .ok_or_else(|| CommandError::UnknownCommand(name.to_owned()))?;

        handler.handle(&command_args, context)
    }

    /// Parses a command string into its name and arguments.
    fn split_command(command: &str) -> Result<(&str, Vec<&str>), CommandError> {
        let command = command.trim();
        let command = command.strip_prefix('/').unwrap_or(command);

        let mut parts = command.split_whitespace();
        let name = parts.next().ok_or(CommandError::EmptyCommand)?;
        Ok((name, parts.collect()))
    }

    /// Registers a command handler under all of its names.
    pub fn register(&mut self, handler: impl CommandHandler + 'static) {
        let handler: Arc<dyn CommandHandler> = Arc::new(handler);
        if let Some(primary) = handler.names().first() {
            log::debug!("Registered /{primary}: {}", handler.description());
        }

        for &name in handler.names() {
            if self.handlers.insert(name, Arc::clone(&handler)).is_some() {
                log::warn!("Command {name} is already registered");
            }
        }
    }

    /// Checks whether a name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }
}

impl Default for CommandDispatcher {
    fn default() -> Self {
        let mut dispatcher = Self::new();
        dispatcher.register(MakeInfiniteSourceCommand);
        dispatcher
    }
}
