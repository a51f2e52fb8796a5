use crate::events::Direction;

/// Live drag bookkeeping: present only while a drag is active
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragState {
    /// Pointer x coordinate captured at gesture start
    pub origin_x: f64,
}

impl DragState {
    pub fn new(origin_x: f64) -> Self {
        Self { origin_x }
    }

    /// Signed drag distance: positive when the pointer moved left of the
    /// origin, which pulls the next item toward the center.
    pub fn delta(&self, pointer_x: f64) -> f64 {
        self.origin_x - pointer_x
    }
}

/// What a released drag resolves to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    /// Exactly one discrete move in the sign-correct direction
    Commit(Direction),
    /// Below the threshold: return to the unchanged index's position
    SnapBack,
}

/// Resolve a finished drag. The threshold is strict: a delta equal to it
/// snaps back.
pub fn resolve(delta: f64, threshold: f64) -> DragOutcome {
    if delta.abs() > threshold {
        if delta > 0.0 {
            DragOutcome::Commit(Direction::Next)
        } else {
            DragOutcome::Commit(Direction::Prev)
        }
    } else {
        DragOutcome::SnapBack
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delta_sign() {
        let drag = DragState::new(200.0);
        assert_eq!(drag.delta(140.0), 60.0);
        assert_eq!(drag.delta(260.0), -60.0);
    }

    #[test]
    fn test_resolve_threshold_is_strict() {
        assert_eq!(resolve(49.0, 50.0), DragOutcome::SnapBack);
        assert_eq!(resolve(50.0, 50.0), DragOutcome::SnapBack);
        assert_eq!(resolve(51.0, 50.0), DragOutcome::Commit(Direction::Next));
        assert_eq!(resolve(-49.0, 50.0), DragOutcome::SnapBack);
        assert_eq!(resolve(-51.0, 50.0), DragOutcome::Commit(Direction::Prev));
    }
}
