//! Handler for the "makeinfinitesource" command.
use viscid_registry::{MATERIALS, is_liquid};

use crate::command::commands::CommandHandler;
use crate::command::context::CommandContext;
use crate::command::error::CommandError;
use crate::grid::target_block;

/// How far the sender can reach, in blocks.
pub const REACH: f64 = 10.0;

/// Toggles the infinite flag of the liquid block the sender is looking at.
///
/// Returns the new state of the flag.
pub struct MakeInfiniteSourceCommand;

impl CommandHandler for MakeInfiniteSourceCommand {
    fn names(&self) -> &'static [&'static str] {
        &["makeinfinitesource", "mis"]
    }

    fn description(&self) -> &'static str {
        "Toggles whether the targeted liquid block is an infinite source."
    }

    fn handle(
        &self,
        _command_args: &[&str],
        context: &mut CommandContext<'_>,
    ) -> Result<bool, CommandError> {
        let (eye, look) = context.sender.view_ray().ok_or(CommandError::NotAPlayer)?;
        let target = target_block(context.grid, eye, look, REACH).ok_or(CommandError::NoTarget)?;

        let material = context.grid.material_at(target);
        if !is_liquid(material, false) {
            return Err(CommandError::NotALiquid(target));
        }

        let infinite = context.sources.toggle(target);
        log::info!(
            "{} at {target} is {} an infinite source",
            MATERIALS.name_of(material),
            if infinite { "now" } else { "no longer" }
        );
        Ok(infinite)
    }
}
