//! The set of liquid cells waiting for flow processing.

use std::collections::VecDeque;
use std::mem;

use rustc_hash::FxHashMap;
use viscid_registry::{is_liquid, same_liquid};
use viscid_utils::{BlockPos, Direction};

use crate::grid::BlockGrid;

/// FIFO queue of cell positions with set semantics.
///
/// This struct provides:
/// - Insertion order processing
/// - Deduplication so a position is queued at most once
///
/// A pass takes the whole queue with [`ActiveSet::snapshot_and_clear`]; anything
/// added while the pass runs lands in the next pass.
///
/// Removal only drops the membership entry. Each queue slot carries the
/// insertion sequence it was pushed with, and slots whose sequence no longer
/// matches the membership entry are skipped when the snapshot is taken.
#[derive(Debug, Default)]
pub struct ActiveSet {
    queue: VecDeque<(BlockPos, u64)>,
    members: FxHashMap<BlockPos, u64>,
    next_seq: u64,
}

impl ActiveSet {
    /// Creates an empty active set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a liquid cell together with its same-liquid neighbours at the same
    /// elevation or above.
    ///
    /// Air and solid blocks are ignored, as are positions already queued. Lower
    /// neighbours are left alone, they get queued when liquid actually reaches them.
    ///
    /// Returns `true` if `pos` itself was newly queued.
    pub fn add<G: BlockGrid + ?Sized>(&mut self, grid: &G, pos: BlockPos) -> bool {
        let material = grid.material_at(pos);
        if !is_liquid(material, false) || !self.insert(pos) {
            return false;
        }

        for direction in Direction::ALL {
            let neighbor = grid.neighbor(pos, direction);
            if neighbor.y() < pos.y() {
                continue;
            }
            let neighbor_material = grid.material_at(neighbor);
            if is_liquid(neighbor_material, false) && same_liquid(material, neighbor_material) {
                self.insert(neighbor);
            }
        }

        true
    }

    /// Queues a position without any grid checks.
    ///
    /// Returns `true` if the position was not queued yet.
    pub fn insert(&mut self, pos: BlockPos) -> bool {
        if self.members.contains_key(&pos) {
            return false;
        }
        let seq = self.next_seq;
        self.next_seq += 1;
        self.members.insert(pos, seq);
        self.queue.push_back((pos, seq));
        true
    }

    /// Drops a position from the set.
    ///
    /// Its queue slot is left behind and skipped by the next snapshot.
    pub fn remove(&mut self, pos: BlockPos) -> bool {
        self.members.remove(&pos).is_some()
    }

    /// Takes the current contents in insertion order and leaves the set empty.
    #[must_use]
    pub fn snapshot_and_clear(&mut self) -> Vec<BlockPos> {
        let members = mem::take(&mut self.members);
        mem::take(&mut self.queue)
            .into_iter()
            .filter(|(pos, seq)| members.get(pos) == Some(seq))
            .map(|(pos, _)| pos)
            .collect()
    }

    /// Checks if a position is queued.
    #[must_use]
    pub fn contains(&self, pos: BlockPos) -> bool {
        self.members.contains_key(&pos)
    }

    /// Returns the number of queued positions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Returns `true` if nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
