use tracing::debug;

/// Navigation state. A discrete move holds `Moving` until the rendering
/// surface reports the translation transition complete; further discrete
/// moves are rejected (held, not queued) in the meantime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavState {
    Idle,
    Moving,
}

/// The `{Idle, Moving}` transition table. All state changes go through
/// these methods; nothing else mutates the flag.
#[derive(Debug)]
pub struct NavMachine {
    state: NavState,
}

impl NavMachine {
    pub fn new() -> Self {
        Self {
            state: NavState::Idle,
        }
    }

    pub fn state(&self) -> NavState {
        self.state
    }

    pub fn is_moving(&self) -> bool {
        self.state == NavState::Moving
    }

    /// `Idle -> Moving`. Returns false (and stays put) when a move is
    /// already in flight.
    pub fn try_begin_move(&mut self) -> bool {
        match self.state {
            NavState::Idle => {
                self.state = NavState::Moving;
                true
            }
            NavState::Moving => {
                debug!("Move rejected: a move is already in flight");
                false
            }
        }
    }

    /// `Moving -> Idle`, after the wraparound check has run. A completion
    /// signal arriving while idle is a defensive no-op.
    pub fn complete_move(&mut self) -> bool {
        match self.state {
            NavState::Moving => {
                self.state = NavState::Idle;
                true
            }
            NavState::Idle => {
                debug!("Transition-complete signal with no move in flight, ignoring");
                false
            }
        }
    }
}

impl Default for NavMachine {
    fn default() -> Self {
        Self::new()
    }
}

/// Wraparound correction: when a move lands in the clone buffer, relocate
/// the index to the equivalent position among the originals. Returns the
/// corrected index, or `None` when the index is already in the canonical
/// band `[clone_count, clone_count + original_count)`.
pub fn wraparound(index: usize, original_count: usize, clone_count: usize) -> Option<usize> {
    if index >= original_count + clone_count {
        Some(index - original_count)
    } else if index < clone_count {
        Some(index + original_count)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_serialization() {
        let mut nav = NavMachine::new();
        assert!(nav.try_begin_move());
        // Second request while in flight is rejected, not queued
        assert!(!nav.try_begin_move());
        assert!(nav.is_moving());

        assert!(nav.complete_move());
        assert_eq!(nav.state(), NavState::Idle);
        assert!(nav.try_begin_move());
    }

    #[test]
    fn test_spurious_completion_is_ignored() {
        let mut nav = NavMachine::new();
        assert!(!nav.complete_move());
        assert_eq!(nav.state(), NavState::Idle);
    }

    #[test]
    fn test_wraparound_overshoot() {
        // 5 originals, 4 clones per side: canonical band is [4, 9)
        assert_eq!(wraparound(9, 5, 4), Some(4));
        assert_eq!(wraparound(11, 5, 4), Some(6));
    }

    #[test]
    fn test_wraparound_undershoot() {
        assert_eq!(wraparound(3, 5, 4), Some(8));
        assert_eq!(wraparound(0, 5, 4), Some(5));
    }

    #[test]
    fn test_wraparound_in_band_untouched() {
        for index in 4..9 {
            assert_eq!(wraparound(index, 5, 4), None);
        }
    }
}
