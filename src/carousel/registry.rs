use crate::error::{LoopviewError, Result};
use crate::item::Item;
use tracing::debug;

/// Where a rendered slot's content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    /// Duplicate of a tail item, placed before the originals
    TailClone,
    Original,
    /// Duplicate of a head item, placed after the originals
    HeadClone,
}

/// One rendered position in the track.
///
/// Clones share content with their source item but carry their own slot
/// identity, so visual state can be applied to a clone independently of
/// the original it duplicates.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlot {
    /// Position in the rendered sequence
    pub slot: usize,
    /// Index of the source item among the originals
    pub source: usize,
    pub kind: SlotKind,
    pub item: Item,
}

/// The renderable sequence: `clone_count` duplicates of the tail, the
/// originals, then `clone_count` duplicates of the head. The clone buffer
/// is what lets navigation wrap around without a visible jump.
#[derive(Debug, Clone)]
pub struct RenderedSequence {
    slots: Vec<RenderedSlot>,
    original_count: usize,
    clone_count: usize,
    visible_count: usize,
}

/// Clone buffer depth for a given visible item count
pub fn clone_count_for(visible_count: usize) -> usize {
    visible_count / 2 + 3
}

impl RenderedSequence {
    /// Build the rendered sequence for the given items and visible count.
    ///
    /// Deterministic: identical inputs produce an identical clone
    /// arrangement. Clone source indices wrap modulo the item count, so a
    /// clone buffer deeper than the item list is legal.
    pub fn build(items: &[Item], visible_count: usize) -> Result<Self> {
        if items.is_empty() {
            return Err(LoopviewError::EmptyItemList);
        }

        let n = items.len();
        let clone_count = clone_count_for(visible_count);
        let mut slots = Vec::with_capacity(n + 2 * clone_count);

        // Tail clones, nearest-to-start clone adjacent to the head item
        for j in 0..clone_count {
            let source =
                (n as isize - clone_count as isize + j as isize).rem_euclid(n as isize) as usize;
            slots.push(RenderedSlot {
                slot: slots.len(),
                source,
                kind: SlotKind::TailClone,
                item: items[source].clone(),
            });
        }

        for (source, item) in items.iter().enumerate() {
            slots.push(RenderedSlot {
                slot: slots.len(),
                source,
                kind: SlotKind::Original,
                item: item.clone(),
            });
        }

        for j in 0..clone_count {
            let source = j % n;
            slots.push(RenderedSlot {
                slot: slots.len(),
                source,
                kind: SlotKind::HeadClone,
                item: items[source].clone(),
            });
        }

        debug!(
            "Built rendered sequence: {} originals, {} clones per side, {} slots",
            n,
            clone_count,
            slots.len()
        );

        Ok(Self {
            slots,
            original_count: n,
            clone_count,
            visible_count,
        })
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, slot: usize) -> Option<&RenderedSlot> {
        self.slots.get(slot)
    }

    pub fn slots(&self) -> &[RenderedSlot] {
        &self.slots
    }

    pub fn original_count(&self) -> usize {
        self.original_count
    }

    pub fn clone_count(&self) -> usize {
        self.clone_count
    }

    pub fn visible_count(&self) -> usize {
        self.visible_count
    }

    /// Rendered index of the first original item; also the initial
    /// `current_index` after a build.
    pub fn home_index(&self) -> usize {
        self.clone_count
    }

    /// Source item index for a rendered slot, if the slot exists
    pub fn source_of(&self, slot: usize) -> Option<usize> {
        self.slots.get(slot).map(|s| s.source)
    }
}
