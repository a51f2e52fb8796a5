pub mod engine;
pub mod gesture;
pub mod nav;
pub mod position;
pub mod registry;

pub use engine::{CarouselEngine, Effect};
pub use gesture::{DragOutcome, DragState};
pub use nav::{NavMachine, NavState};
pub use position::SlotEmphasis;
pub use registry::{RenderedSequence, RenderedSlot, SlotKind};

#[cfg(test)]
mod tests;
