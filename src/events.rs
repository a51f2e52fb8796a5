use crate::carousel::position::SlotEmphasis;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::broadcast;
use tracing::{debug, error, info};

/// Direction of a discrete carousel move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
}

impl Direction {
    /// Signed index step for this direction
    pub fn step(&self) -> isize {
        match self {
            Direction::Next => 1,
            Direction::Prev => -1,
        }
    }
}

/// Visual property reported by a transition-completion signal. Only the
/// track translation matters to the engine; everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionProperty {
    Translation,
    Opacity,
    Other,
}

/// Tagged input events consumed by the carousel engine. Every interaction
/// source (pointer, touch, keyboard, timer, rendering surface) is routed
/// through this one type so the engine can be driven deterministically.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CarouselInput {
    /// A rendered slot was clicked
    Click { slot: usize },
    /// The center item's link control was activated (click or Enter/Space)
    Activate,
    /// An arrow key was pressed while the carousel holds focus
    KeyPress { direction: Direction },
    /// A directional control was pressed down
    StartHold { direction: Direction },
    /// The directional control was released or the pointer left it
    StopHold,
    /// One tick of the auto-advance timer while a hold is engaged
    HoldTick,
    /// A drag began at the given pointer x coordinate
    DragStart { x: f64 },
    /// The pointer moved to x during an active drag
    DragMove { x: f64 },
    /// The drag ended at x
    DragEnd { x: f64 },
    /// The rendering surface finished a transition on the given property
    TransitionComplete { property: TransitionProperty },
    /// The viewport or container changed size (already debounced upstream)
    Resize {
        viewport_width: f64,
        container_width: f64,
    },
}

/// Events published by the carousel for its rendering collaborators
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CarouselEvent {
    /// The track translation changed
    TrackMoved { offset_px: f64, animate: bool },
    /// Per-slot visual emphasis was reassigned
    EmphasisChanged { assignments: Vec<SlotEmphasis> },
    /// Per-slot extent changed (breakpoint crossing)
    SizingChanged { item_width_px: f64 },
    /// The rendered sequence was rebuilt
    SequenceRebuilt { len: usize, visible_count: usize },
    /// An item's external link should be opened in a new browsing context
    LinkActivated { item_id: String, url: String },
    /// A component error occurred
    ComponentError { component: String, error: String },
}

impl CarouselEvent {
    /// Get a human-readable description of the event
    pub fn description(&self) -> String {
        match self {
            CarouselEvent::TrackMoved { offset_px, animate } => {
                format!(
                    "Track moved to {:.1}px ({})",
                    offset_px,
                    if *animate { "animated" } else { "instant" }
                )
            }
            CarouselEvent::EmphasisChanged { assignments } => {
                format!("Emphasis reassigned across {} slots", assignments.len())
            }
            CarouselEvent::SizingChanged { item_width_px } => {
                format!("Item width changed to {:.1}px", item_width_px)
            }
            CarouselEvent::SequenceRebuilt { len, visible_count } => {
                format!("Sequence rebuilt: {} slots, {} visible", len, visible_count)
            }
            CarouselEvent::LinkActivated { item_id, url } => {
                format!("Link activated for {}: {}", item_id, url)
            }
            CarouselEvent::ComponentError { component, error } => {
                format!("Error in {}: {}", component, error)
            }
        }
    }

    /// Get the event type as a string for filtering
    pub fn event_type(&self) -> &'static str {
        match self {
            CarouselEvent::TrackMoved { .. } => "track_moved",
            CarouselEvent::EmphasisChanged { .. } => "emphasis_changed",
            CarouselEvent::SizingChanged { .. } => "sizing_changed",
            CarouselEvent::SequenceRebuilt { .. } => "sequence_rebuilt",
            CarouselEvent::LinkActivated { .. } => "link_activated",
            CarouselEvent::ComponentError { .. } => "component_error",
        }
    }
}

#[derive(Error, Debug)]
pub enum EventBusError {
    #[error("No active subscribers")]
    NoSubscribers,
}

/// Async event bus for renderer coordination using broadcast channels
pub struct EventBus {
    sender: broadcast::Sender<CarouselEvent>,
}

impl EventBus {
    /// Create a new event bus with the specified channel capacity
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Subscribe to events and get a receiver
    pub fn subscribe(&self) -> broadcast::Receiver<CarouselEvent> {
        self.sender.subscribe()
    }

    /// Publish an event to all subscribers
    pub async fn publish(&self, event: CarouselEvent) -> Result<usize, EventBusError> {
        match &event {
            CarouselEvent::LinkActivated { item_id, url } => {
                info!("Opening link for {}: {}", item_id, url);
            }
            CarouselEvent::SequenceRebuilt { len, visible_count } => {
                info!("Sequence rebuilt: {} slots, {} visible", len, visible_count);
            }
            CarouselEvent::ComponentError { component, error } => {
                error!("Component error in {}: {}", component, error);
            }
            _ => {
                debug!("Publishing event: {}", event.description());
            }
        }

        self.sender
            .send(event)
            .map_err(|_| EventBusError::NoSubscribers)
    }

    /// Number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.sender.receiver_count()
    }
}
