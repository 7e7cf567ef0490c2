//! Small vector math helpers.

/// A generic three component vector.
pub mod vector3;

pub use vector3::Vector3;
