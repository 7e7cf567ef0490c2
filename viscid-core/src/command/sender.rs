//! Who sent a command.

use viscid_utils::math::Vector3;

/// The origin of a command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CommandSender {
    /// A player, with their eye position and view direction.
    Player {
        /// The eye position.
        eye: Vector3<f64>,
        /// The view direction. Need not be normalized.
        look: Vector3<f64>,
    },
    /// The server console.
    Console,
}

impl CommandSender {
    /// Returns the view ray of a player sender.
    #[must_use]
    pub fn view_ray(&self) -> Option<(Vector3<f64>, Vector3<f64>)> {
        match *self {
            Self::Player { eye, look } => Some((eye, look)),
            Self::Console => None,
        }
    }
}
