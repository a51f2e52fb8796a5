use crate::carousel::{CarouselEngine, Effect};
use crate::config::LoopviewConfig;
use crate::error::{LoopviewError, Result};
use crate::events::{CarouselEvent, CarouselInput, Direction, EventBus};
use crate::item::Item;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Async shell around the carousel engine.
///
/// The engine itself is synchronous and deterministic; this wrapper owns
/// the two timers the engine cannot (the repeating hold-advance timer and
/// the resize debounce), feeds their ticks back in as inputs, and
/// translates engine effects into bus events for the renderer.
pub struct CarouselRuntime {
    engine: Arc<Mutex<CarouselEngine>>,
    event_bus: Arc<EventBus>,
    hold_interval: Duration,
    resize_debounce: Duration,
    hold_timer: Arc<Mutex<Option<CancellationToken>>>,
    resize_timer: Mutex<Option<CancellationToken>>,
}

impl CarouselRuntime {
    pub fn new(
        items: Vec<Item>,
        config: &LoopviewConfig,
        event_bus: Arc<EventBus>,
        viewport_width: f64,
        container_width: f64,
    ) -> Result<Self> {
        let engine = CarouselEngine::new(
            items,
            config.clone(),
            viewport_width,
            container_width,
        )?;

        Ok(Self {
            engine: Arc::new(Mutex::new(engine)),
            event_bus,
            hold_interval: Duration::from_millis(config.gesture.hold_interval_ms),
            resize_debounce: Duration::from_millis(config.system.resize_debounce_ms),
            hold_timer: Arc::new(Mutex::new(None)),
            resize_timer: Mutex::new(None),
        })
    }

    /// Publish the effects that bring a fresh rendering surface in sync
    pub async fn start(&self) -> Result<()> {
        info!("Starting carousel runtime");
        if self.event_bus.subscriber_count() == 0 {
            return Err(LoopviewError::component(
                "carousel_runtime",
                "no renderer subscribed to the event bus",
            ));
        }
        let effects = self.engine.lock().bootstrap();
        publish_effects(&self.event_bus, &effects).await;
        Ok(())
    }

    /// Route one input event through the engine and carry out its effects
    pub async fn handle(&self, input: CarouselInput) {
        let effects = self.engine.lock().dispatch(input);
        for effect in &effects {
            match effect {
                Effect::ArmHold { direction } => self.arm_hold(*direction),
                Effect::CancelHold => self.cancel_hold(),
                _ => {}
            }
        }
        publish_effects(&self.event_bus, &effects).await;
    }

    /// Register a raw resize notification. Rapid-fire notifications are
    /// coalesced: the engine only sees a resize after a quiet period,
    /// since rebuilding the sequence is too expensive to run per pixel.
    pub fn notify_resize(&self, viewport_width: f64, container_width: f64) {
        let token = CancellationToken::new();
        if let Some(previous) = self.resize_timer.lock().replace(token.clone()) {
            previous.cancel();
        }

        let engine = Arc::clone(&self.engine);
        let event_bus = Arc::clone(&self.event_bus);
        let hold_timer = Arc::clone(&self.hold_timer);
        let delay = self.resize_debounce;

        tokio::spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {
                    debug!("Resize coalesced into a newer notification");
                }
                _ = sleep(delay) => {
                    let effects = engine.lock().dispatch(CarouselInput::Resize {
                        viewport_width,
                        container_width,
                    });
                    // A rebuild discards any engaged hold
                    if effects.contains(&Effect::CancelHold) {
                        if let Some(timer) = hold_timer.lock().take() {
                            timer.cancel();
                        }
                    }
                    publish_effects(&event_bus, &effects).await;
                }
            }
        });
    }

    fn arm_hold(&self, direction: Direction) {
        let token = CancellationToken::new();
        if let Some(previous) = self.hold_timer.lock().replace(token.clone()) {
            previous.cancel();
        }

        debug!("Arming hold timer towards {:?}", direction);
        let engine = Arc::clone(&self.engine);
        let event_bus = Arc::clone(&self.event_bus);
        let period = self.hold_interval;

        tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = token.cancelled() => {
                        debug!("Hold timer cancelled");
                        break;
                    }
                    _ = sleep(period) => {
                        // Ticks never arm or cancel timers, so plain
                        // publishing covers everything they produce
                        let effects = engine.lock().dispatch(CarouselInput::HoldTick);
                        publish_effects(&event_bus, &effects).await;
                    }
                }
            }
        });
    }

    fn cancel_hold(&self) {
        if let Some(timer) = self.hold_timer.lock().take() {
            timer.cancel();
        }
    }

    /// Cancel all outstanding timers
    pub fn shutdown(&self) {
        info!("Shutting down carousel runtime");
        self.cancel_hold();
        if let Some(timer) = self.resize_timer.lock().take() {
            timer.cancel();
        }
    }

    /// Rendered index currently centered (test and diagnostic hook)
    pub fn current_index(&self) -> usize {
        self.engine.lock().current_index()
    }
}

impl Drop for CarouselRuntime {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Translate engine effects into bus events. Timer effects are handled by
/// the runtime itself and skipped here.
async fn publish_effects(event_bus: &EventBus, effects: &[Effect]) {
    for effect in effects {
        let event = match effect {
            Effect::Track { offset_px, animate } => CarouselEvent::TrackMoved {
                offset_px: *offset_px,
                animate: *animate,
            },
            Effect::Emphasis { assignments } => CarouselEvent::EmphasisChanged {
                assignments: assignments.clone(),
            },
            Effect::Sizing { item_width_px } => CarouselEvent::SizingChanged {
                item_width_px: *item_width_px,
            },
            Effect::Rebuilt { len, visible_count } => CarouselEvent::SequenceRebuilt {
                len: *len,
                visible_count: *visible_count,
            },
            Effect::OpenLink { item_id, url } => CarouselEvent::LinkActivated {
                item_id: item_id.clone(),
                url: url.clone(),
            },
            Effect::ArmHold { .. } | Effect::CancelHold => continue,
        };

        if let Err(e) = event_bus.publish(event).await {
            warn!("Failed to publish carousel event: {}", e);
        }
    }
}
