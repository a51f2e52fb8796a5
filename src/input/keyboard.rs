use crate::error::Result;
use crate::events::{CarouselEvent, CarouselInput, Direction, EventBus};
use crate::runtime::CarouselRuntime;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Keyboard driver for the carousel: arrow keys move, Enter/Space activates
/// the centered item's link, `q`/Esc quits.
///
/// Raw-mode key events carry no release information, so arrows map to
/// single discrete moves rather than a hold. The default scroll behavior a
/// browser would attach to the arrows does not exist here; the raw-mode
/// capture is this layer's equivalent of suppressing it.
pub struct KeyboardInputHandler {
    runtime: Arc<CarouselRuntime>,
    event_bus: Arc<EventBus>,
    cancellation_token: CancellationToken,
}

impl KeyboardInputHandler {
    pub fn new(runtime: Arc<CarouselRuntime>, event_bus: Arc<EventBus>) -> Self {
        Self {
            runtime,
            event_bus,
            cancellation_token: CancellationToken::new(),
        }
    }

    /// Token cancelled when the user quits
    pub fn done(&self) -> CancellationToken {
        self.cancellation_token.clone()
    }

    /// Start listening for keyboard input
    pub async fn start(&self) -> Result<()> {
        info!("Starting keyboard input handler - arrows navigate, Enter opens, q quits");

        let runtime = Arc::clone(&self.runtime);
        let event_bus = Arc::clone(&self.event_bus);
        let cancellation_token = self.cancellation_token.clone();
        let runtime_handle = Handle::current();

        // Spawn a blocking task to handle keyboard input
        task::spawn_blocking(move || {
            if let Err(e) = enable_raw_mode() {
                error!("Failed to enable raw mode for keyboard input: {}", e);
                return;
            }

            info!("Raw mode enabled - keyboard handler active");

            loop {
                if cancellation_token.is_cancelled() {
                    debug!("Keyboard input handler stopping");
                    break;
                }

                match event::poll(Duration::from_millis(100)) {
                    Ok(true) => {
                        if let Ok(Event::Key(key_event)) = event::read() {
                            // Only handle key press events (not release)
                            if key_event.kind != KeyEventKind::Press {
                                continue;
                            }

                            let input = match key_event.code {
                                KeyCode::Left => Some(CarouselInput::KeyPress {
                                    direction: Direction::Prev,
                                }),
                                KeyCode::Right => Some(CarouselInput::KeyPress {
                                    direction: Direction::Next,
                                }),
                                KeyCode::Enter | KeyCode::Char(' ') => {
                                    Some(CarouselInput::Activate)
                                }
                                KeyCode::Char('q') | KeyCode::Esc => {
                                    info!("Quit key pressed");
                                    cancellation_token.cancel();
                                    break;
                                }
                                _ => {
                                    debug!("Key pressed: {:?}", key_event.code);
                                    None
                                }
                            };

                            if let Some(input) = input {
                                let runtime_clone = Arc::clone(&runtime);
                                runtime_handle.spawn(async move {
                                    runtime_clone.handle(input).await;
                                });
                            }
                        }
                    }
                    Ok(false) => {
                        // No event available, continue polling
                    }
                    Err(e) => {
                        warn!("Error polling for keyboard events: {}", e);

                        let event_bus_clone = Arc::clone(&event_bus);
                        let error = e.to_string();
                        runtime_handle.spawn(async move {
                            let _ = event_bus_clone
                                .publish(CarouselEvent::ComponentError {
                                    component: "keyboard_input".to_string(),
                                    error,
                                })
                                .await;
                        });
                    }
                }
            }

            if let Err(e) = disable_raw_mode() {
                error!("Failed to disable raw mode: {}", e);
            } else {
                debug!("Raw mode disabled");
            }

            debug!("Keyboard input handler task exited");
        });

        Ok(())
    }

    /// Stop the keyboard input handler
    pub async fn stop(&self) -> Result<()> {
        info!("Stopping keyboard input handler");
        self.cancellation_token.cancel();

        // Give the task a moment to clean up and disable raw mode
        tokio::time::sleep(Duration::from_millis(200)).await;

        // Ensure raw mode is disabled even if the task didn't clean up properly
        let _ = disable_raw_mode();

        Ok(())
    }
}
