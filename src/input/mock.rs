use crate::events::CarouselInput;
use crate::runtime::CarouselRuntime;
use std::sync::Arc;
use tracing::debug;

/// Scripted pointer input for testing and demos without real hardware
pub struct MockPointerInput {
    runtime: Arc<CarouselRuntime>,
}

impl MockPointerInput {
    pub fn new(runtime: Arc<CarouselRuntime>) -> Self {
        Self { runtime }
    }

    /// Replay a drag gesture across the given x coordinates
    pub async fn drag(&self, path: &[f64]) {
        let Some((&start, rest)) = path.split_first() else {
            return;
        };
        let Some((&end, moves)) = rest.split_last() else {
            return;
        };

        debug!("Mock drag from {} to {}", start, end);
        self.runtime.handle(CarouselInput::DragStart { x: start }).await;
        for &x in moves {
            self.runtime.handle(CarouselInput::DragMove { x }).await;
        }
        self.runtime.handle(CarouselInput::DragEnd { x: end }).await;
    }

    /// Click a rendered slot
    pub async fn click(&self, slot: usize) {
        debug!("Mock click on slot {}", slot);
        self.runtime.handle(CarouselInput::Click { slot }).await;
    }
}
