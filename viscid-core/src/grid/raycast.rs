//! Voxel traversal along a view ray.

use viscid_utils::BlockPos;
use viscid_utils::math::Vector3;

use super::BlockGrid;

/// Per-axis traversal state: the next boundary crossing, the spacing between
/// crossings and the step direction.
fn axis_setup(origin: f64, cell: i32, direction: f64) -> (f64, f64, i32) {
    if direction > 0.0 {
        ((f64::from(cell) + 1.0 - origin) / direction, 1.0 / direction, 1)
    } else if direction < 0.0 {
        ((origin - f64::from(cell)) / -direction, -1.0 / direction, -1)
    } else {
        (f64::INFINITY, f64::INFINITY, 0)
    }
}

/// Returns the first non-air block hit by a ray from `eye` along `look`.
///
/// The ray stops after `max_distance` blocks. The cell containing the eye is
/// checked first. Returns `None` for a zero look vector or when only air is hit.
#[must_use]
pub fn target_block<G: BlockGrid + ?Sized>(
    grid: &G,
    eye: Vector3<f64>,
    look: Vector3<f64>,
    max_distance: f64,
) -> Option<BlockPos> {
    let direction = look.normalize()?;
    let mut cell = eye.floor();

    let (mut next_x, delta_x, step_x) = axis_setup(eye.x, cell.x, direction.x);
    let (mut next_y, delta_y, step_y) = axis_setup(eye.y, cell.y, direction.y);
    let (mut next_z, delta_z, step_z) = axis_setup(eye.z, cell.z, direction.z);

    let mut travelled = 0.0;
    while travelled <= max_distance {
        let pos = BlockPos(cell);
        if !grid.material_at(pos).is_air() {
            return Some(pos);
        }

        if next_x <= next_y && next_x <= next_z {
            travelled = next_x;
            next_x += delta_x;
            cell.x += step_x;
        } else if next_y <= next_z {
            travelled = next_y;
            next_y += delta_y;
            cell.y += step_y;
        } else {
            travelled = next_z;
            next_z += delta_z;
            cell.z += step_z;
        }
    }

    None
}
