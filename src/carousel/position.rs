use serde::{Deserialize, Serialize};

/// Visual emphasis assigned to a rendered slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlotEmphasis {
    /// Aligned to the container midpoint; the carousel's selected item
    Center,
    /// Within `side_count` positions of the center
    Adjacent,
    None,
}

/// Track translation that centers `current_index` in the container,
/// regardless of container size.
pub fn translation(current_index: usize, item_width: f64, container_width: f64) -> f64 {
    let offset = (container_width - item_width) / 2.0;
    -(current_index as f64 * item_width) + offset
}

/// Number of slots on each side of the center that receive the adjacent
/// emphasis. Single-item mode still emphasizes one neighbor per side so the
/// peeking items read as navigable.
pub fn side_count(visible_count: usize) -> usize {
    if visible_count == 1 {
        1
    } else {
        visible_count / 2
    }
}

/// Assign emphasis per slot: exactly one center, up to `side_count`
/// adjacent on each side, clamped at the sequence bounds. Wraparound is
/// never applied here; the index correction handles that separately.
pub fn classify(current_index: usize, visible_count: usize, len: usize) -> Vec<SlotEmphasis> {
    let side = side_count(visible_count);
    let mut assignments = vec![SlotEmphasis::None; len];

    if current_index >= len {
        return assignments;
    }

    assignments[current_index] = SlotEmphasis::Center;

    let lo = current_index.saturating_sub(side);
    let hi = (current_index + side).min(len.saturating_sub(1));
    for slot in lo..=hi {
        if slot != current_index {
            assignments[slot] = SlotEmphasis::Adjacent;
        }
    }

    assignments
}

/// Rendered extent of one item.
///
/// In single-item mode the item reserves a fixed `peek_inset` margin on
/// each side so the neighbors stay partially visible as an affordance;
/// otherwise each item takes an equal fraction of the container.
pub fn item_extent(visible_count: usize, container_width: f64, peek_inset: f64) -> f64 {
    if visible_count == 1 {
        (container_width - 2.0 * peek_inset).max(0.0)
    } else {
        container_width / visible_count as f64
    }
}
