use crate::config::LoopviewConfig;
use crate::error::Result;
use crate::events::{CarouselInput, Direction, TransitionProperty};
use crate::item::Item;
use tracing::{debug, warn};

use super::gesture::{self, DragOutcome, DragState};
use super::nav::{self, NavMachine, NavState};
use super::position::{self, SlotEmphasis};
use super::registry::RenderedSequence;

/// Side effects the engine asks its collaborators to perform. The engine
/// itself never touches a rendering surface or a timer; it only describes
/// what should happen, which keeps every input sequence unit-testable.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Apply this translation to the track
    Track { offset_px: f64, animate: bool },
    /// Apply this emphasis assignment per rendered slot
    Emphasis { assignments: Vec<SlotEmphasis> },
    /// Apply this extent to every rendered slot
    Sizing { item_width_px: f64 },
    /// The rendered sequence was replaced; re-render everything
    Rebuilt { len: usize, visible_count: usize },
    /// Open the item's external link in a new browsing context
    OpenLink { item_id: String, url: String },
    /// Arm the repeating hold timer in the given direction
    ArmHold { direction: Direction },
    /// Cancel the hold timer
    CancelHold,
}

/// The carousel engine: owns all mutable carousel state and advances it
/// through a single dispatch entry point over tagged input events.
///
/// The index lives on a logically circular sequence padded with a clone
/// buffer at each end; the wraparound correction after each completed move
/// keeps it inside the canonical band of original items.
pub struct CarouselEngine {
    config: LoopviewConfig,
    items: Vec<Item>,
    sequence: RenderedSequence,
    container_width: f64,
    current_index: usize,
    item_width: f64,
    nav: NavMachine,
    hold: Option<Direction>,
    drag: Option<DragState>,
}

impl CarouselEngine {
    /// Build an engine for the given items and initial geometry. Fails only
    /// when `items` is empty, in which case nothing is rendered.
    pub fn new(
        items: Vec<Item>,
        config: LoopviewConfig,
        viewport_width: f64,
        container_width: f64,
    ) -> Result<Self> {
        let visible_count = config.visible_count(viewport_width);
        let sequence = RenderedSequence::build(&items, visible_count)?;
        let item_width =
            position::item_extent(visible_count, container_width, config.layout.peek_inset_px);
        let current_index = sequence.home_index();

        debug!(
            "Carousel engine created: {} items, {} visible, initial index {}",
            items.len(),
            visible_count,
            current_index
        );

        Ok(Self {
            config,
            items,
            sequence,
            container_width,
            current_index,
            item_width,
            nav: NavMachine::new(),
            hold: None,
            drag: None,
        })
    }

    /// Effects that bring a fresh rendering surface in sync with the engine
    pub fn bootstrap(&self) -> Vec<Effect> {
        vec![
            Effect::Rebuilt {
                len: self.sequence.len(),
                visible_count: self.sequence.visible_count(),
            },
            Effect::Sizing {
                item_width_px: self.item_width,
            },
            self.track_effect(false),
            self.emphasis_effect(),
        ]
    }

    /// Single entry point: route one tagged input event through the state
    /// machine and return the effects it produced.
    pub fn dispatch(&mut self, input: CarouselInput) -> Vec<Effect> {
        match input {
            CarouselInput::Click { slot } => self.on_click(slot),
            CarouselInput::Activate => self.open_link(self.current_index),
            CarouselInput::KeyPress { direction } => self.move_by(direction.step()),
            CarouselInput::StartHold { direction } => self.on_start_hold(direction),
            CarouselInput::StopHold => self.on_stop_hold(),
            CarouselInput::HoldTick => self.on_hold_tick(),
            CarouselInput::DragStart { x } => self.on_drag_start(x),
            CarouselInput::DragMove { x } => self.on_drag_move(x),
            CarouselInput::DragEnd { x } => self.on_drag_end(x),
            CarouselInput::TransitionComplete { property } => {
                self.on_transition_complete(property)
            }
            CarouselInput::Resize {
                viewport_width,
                container_width,
            } => self.on_resize(viewport_width, container_width),
        }
    }

    fn on_click(&mut self, slot: usize) -> Vec<Effect> {
        if self.drag.is_some() {
            debug!("Click ignored during an active drag");
            return Vec::new();
        }
        if slot >= self.sequence.len() {
            warn!(
                "Click on slot {} outside the sequence (len {})",
                slot,
                self.sequence.len()
            );
            return Vec::new();
        }
        if slot == self.current_index {
            return self.open_link(slot);
        }
        // One transition covering the whole distance, not one step at a time
        self.move_by(slot as isize - self.current_index as isize)
    }

    fn on_start_hold(&mut self, direction: Direction) -> Vec<Effect> {
        let mut effects = Vec::new();

        // Hold and drag are mutually exclusive
        if self.drag.take().is_some() {
            debug!("Hold engaged during a drag; abandoning the drag");
            effects.push(self.track_effect(true));
        }

        effects.extend(self.move_by(direction.step()));
        self.hold = Some(direction);
        effects.push(Effect::ArmHold { direction });
        effects
    }

    fn on_stop_hold(&mut self) -> Vec<Effect> {
        if self.hold.take().is_some() {
            vec![Effect::CancelHold]
        } else {
            Vec::new()
        }
    }

    fn on_hold_tick(&mut self) -> Vec<Effect> {
        match self.hold {
            Some(direction) => self.move_by(direction.step()),
            None => {
                debug!("Hold tick with no hold engaged, ignoring");
                Vec::new()
            }
        }
    }

    fn on_drag_start(&mut self, x: f64) -> Vec<Effect> {
        // Gesture start disengages a hold unconditionally, even when the
        // drag itself cannot begin
        let mut effects = Vec::new();
        if self.hold.take().is_some() {
            effects.push(Effect::CancelHold);
        }

        if self.nav.is_moving() {
            debug!("Drag start rejected: a discrete move is in flight");
            return effects;
        }
        if self.drag.is_some() {
            debug!("Drag start while already dragging, ignoring");
            return effects;
        }

        self.drag = Some(DragState::new(x));
        effects
    }

    fn on_drag_move(&mut self, x: f64) -> Vec<Effect> {
        let Some(drag) = self.drag else {
            debug!("Drag move with no drag in progress, ignoring");
            return Vec::new();
        };

        // Pure visual preview: the index is not touched until release
        let delta = drag.delta(x);
        let offset = position::translation(self.current_index, self.item_width, self.container_width)
            - delta;
        vec![Effect::Track {
            offset_px: offset,
            animate: false,
        }]
    }

    fn on_drag_end(&mut self, x: f64) -> Vec<Effect> {
        let Some(drag) = self.drag.take() else {
            debug!("Drag end with no drag in progress, ignoring");
            return Vec::new();
        };

        let delta = drag.delta(x);
        match gesture::resolve(delta, self.config.gesture.drag_threshold_px) {
            DragOutcome::Commit(direction) => self.move_by(direction.step()),
            DragOutcome::SnapBack => vec![self.track_effect(true)],
        }
    }

    fn on_transition_complete(&mut self, property: TransitionProperty) -> Vec<Effect> {
        if property != TransitionProperty::Translation {
            debug!("Ignoring transition-complete for {:?}", property);
            return Vec::new();
        }
        if !self.nav.complete_move() {
            return Vec::new();
        }

        let corrected = nav::wraparound(
            self.current_index,
            self.sequence.original_count(),
            self.sequence.clone_count(),
        );
        if let Some(index) = corrected {
            debug!(
                "Wraparound correction: {} -> {}",
                self.current_index, index
            );
            self.current_index = index;
            // Instant re-render; animation resumes on the next move
            return vec![self.track_effect(false), self.emphasis_effect()];
        }
        Vec::new()
    }

    fn on_resize(&mut self, viewport_width: f64, container_width: f64) -> Vec<Effect> {
        let visible_count = self.config.visible_count(viewport_width);
        self.container_width = container_width;

        if visible_count != self.sequence.visible_count() {
            return self.rebuild(visible_count);
        }

        // Same breakpoint tier: re-measure only
        self.item_width = position::item_extent(
            visible_count,
            container_width,
            self.config.layout.peek_inset_px,
        );
        vec![
            Effect::Sizing {
                item_width_px: self.item_width,
            },
            self.track_effect(false),
        ]
    }

    /// Atomic teardown and rebuild on a breakpoint crossing. The centered
    /// original item is preserved; any in-flight move, hold or drag is
    /// discarded so a stale width/index pair is never rendered.
    fn rebuild(&mut self, visible_count: usize) -> Vec<Effect> {
        let logical = self.sequence.source_of(self.current_index).unwrap_or(0);

        let sequence = match RenderedSequence::build(&self.items, visible_count) {
            Ok(sequence) => sequence,
            Err(e) => {
                warn!("Sequence rebuild failed: {}", e);
                return Vec::new();
            }
        };

        let mut effects = Vec::new();
        if self.hold.take().is_some() {
            effects.push(Effect::CancelHold);
        }
        self.drag = None;
        self.nav = NavMachine::new();

        self.current_index = sequence.home_index() + logical;
        self.item_width = position::item_extent(
            visible_count,
            self.container_width,
            self.config.layout.peek_inset_px,
        );
        self.sequence = sequence;

        effects.push(Effect::Rebuilt {
            len: self.sequence.len(),
            visible_count,
        });
        effects.push(Effect::Sizing {
            item_width_px: self.item_width,
        });
        effects.push(self.track_effect(false));
        effects.push(self.emphasis_effect());
        effects
    }

    /// One serialized discrete move of `steps` positions. Rejected (held,
    /// not queued) while a move is in flight.
    fn move_by(&mut self, steps: isize) -> Vec<Effect> {
        if steps == 0 {
            return Vec::new();
        }

        let target = self.current_index as isize + steps;
        if target < 0 || target as usize >= self.sequence.len() {
            warn!(
                "Move of {} steps from index {} leaves the sequence, ignoring",
                steps, self.current_index
            );
            return Vec::new();
        }

        if !self.nav.try_begin_move() {
            return Vec::new();
        }

        if self.item_width == 0.0 {
            debug!("Item width is zero; the transform is a no-op until the next measurement");
        }

        self.current_index = target as usize;
        vec![self.track_effect(true), self.emphasis_effect()]
    }

    fn open_link(&self, slot: usize) -> Vec<Effect> {
        match self.sequence.get(slot) {
            Some(rendered) => vec![Effect::OpenLink {
                item_id: rendered.item.id.clone(),
                url: rendered.item.link.clone(),
            }],
            None => {
                warn!("Link activation for missing slot {}", slot);
                Vec::new()
            }
        }
    }

    fn track_effect(&self, animate: bool) -> Effect {
        Effect::Track {
            offset_px: position::translation(
                self.current_index,
                self.item_width,
                self.container_width,
            ),
            animate,
        }
    }

    fn emphasis_effect(&self) -> Effect {
        Effect::Emphasis {
            assignments: position::classify(
                self.current_index,
                self.sequence.visible_count(),
                self.sequence.len(),
            ),
        }
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn item_width(&self) -> f64 {
        self.item_width
    }

    pub fn sequence(&self) -> &RenderedSequence {
        &self.sequence
    }

    pub fn nav_state(&self) -> NavState {
        self.nav.state()
    }

    pub fn hold_direction(&self) -> Option<Direction> {
        self.hold
    }

    pub fn drag_active(&self) -> bool {
        self.drag.is_some()
    }
}
