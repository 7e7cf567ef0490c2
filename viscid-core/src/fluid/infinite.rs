//! Cells whose level never changes.

use rustc_hash::FxHashSet;
use viscid_utils::BlockPos;

/// Tracks infinite liquid sources by position.
///
/// A flagged cell absorbs every level change, so it can emit liquid forever
/// and swallows anything that flows into it.
#[derive(Debug, Default)]
pub struct InfiniteSources {
    sources: FxHashSet<BlockPos>,
}

impl InfiniteSources {
    /// Creates an empty tracker.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets or clears the flag for a position.
    pub fn set_infinite(&mut self, pos: BlockPos, value: bool) {
        if value {
            self.sources.insert(pos);
        } else {
            self.sources.remove(&pos);
        }
    }

    /// Flips the flag for a position and returns the new value.
    pub fn toggle(&mut self, pos: BlockPos) -> bool {
        let value = !self.is_infinite(pos);
        self.set_infinite(pos, value);
        value
    }

    /// Returns `true` if the position is flagged.
    #[must_use]
    pub fn is_infinite(&self, pos: BlockPos) -> bool {
        self.sources.contains(&pos)
    }

    /// Clears the flag of a vacated position. Returns whether it was set.
    pub fn forget(&mut self, pos: BlockPos) -> bool {
        self.sources.remove(&pos)
    }

    /// Number of flagged positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns `true` if nothing is flagged.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }
}
