pub mod carousel;
pub mod config;
pub mod error;
pub mod events;
pub mod input;
pub mod item;
pub mod runtime;

pub use carousel::{
    CarouselEngine, DragOutcome, DragState, Effect, NavMachine, NavState, RenderedSequence,
    RenderedSlot, SlotEmphasis, SlotKind,
};
pub use config::LoopviewConfig;
pub use error::{LoopviewError, Result};
pub use events::{
    CarouselEvent, CarouselInput, Direction, EventBus, EventBusError, TransitionProperty,
};
pub use input::{KeyboardInputHandler, MockPointerInput};
pub use item::{Item, NO_IMAGE_MARKER, PLACEHOLDER_IMAGE};
pub use runtime::CarouselRuntime;
