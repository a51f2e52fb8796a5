use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoopviewConfig {
    pub layout: LayoutConfig,
    pub gesture: GestureConfig,
    pub system: SystemConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LayoutConfig {
    /// Viewport width below which a single item is shown
    #[serde(default = "default_narrow_breakpoint")]
    pub narrow_breakpoint_px: f64,

    /// Viewport width at or above which the wide item count applies
    #[serde(default = "default_wide_breakpoint")]
    pub wide_breakpoint_px: f64,

    /// Visible item count below the narrow breakpoint
    #[serde(default = "default_narrow_visible")]
    pub narrow_visible: usize,

    /// Visible item count between the breakpoints
    #[serde(default = "default_medium_visible")]
    pub medium_visible: usize,

    /// Visible item count at or above the wide breakpoint
    #[serde(default = "default_wide_visible")]
    pub wide_visible: usize,

    /// Fixed side margin reserved in single-item mode so neighbors peek in
    #[serde(default = "default_peek_inset")]
    pub peek_inset_px: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GestureConfig {
    /// Minimum drag distance that commits a move on release
    #[serde(default = "default_drag_threshold")]
    pub drag_threshold_px: f64,

    /// Period of the auto-advance timer while a directional hold is engaged
    #[serde(default = "default_hold_interval")]
    pub hold_interval_ms: u64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemConfig {
    /// Quiet period before a resize triggers a sequence rebuild
    #[serde(default = "default_resize_debounce")]
    pub resize_debounce_ms: u64,

    /// Event bus capacity
    #[serde(default = "default_event_bus_capacity")]
    pub event_bus_capacity: usize,
}

impl LoopviewConfig {
    /// Load configuration from default sources (file + environment variables)
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from_file("loopview.toml")
    }

    /// Load configuration from a specific file path
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path_str = path.as_ref().to_string_lossy();
        debug!("Loading configuration from: {}", path_str);

        let settings = Config::builder()
            // Start with default values
            .set_default("layout.narrow_breakpoint_px", default_narrow_breakpoint())?
            .set_default("layout.wide_breakpoint_px", default_wide_breakpoint())?
            .set_default("layout.narrow_visible", default_narrow_visible() as i64)?
            .set_default("layout.medium_visible", default_medium_visible() as i64)?
            .set_default("layout.wide_visible", default_wide_visible() as i64)?
            .set_default("layout.peek_inset_px", default_peek_inset())?
            .set_default("gesture.drag_threshold_px", default_drag_threshold())?
            .set_default("gesture.hold_interval_ms", default_hold_interval() as i64)?
            .set_default("system.resize_debounce_ms", default_resize_debounce() as i64)?
            .set_default(
                "system.event_bus_capacity",
                default_event_bus_capacity() as i64,
            )?
            // Add configuration file (optional)
            .add_source(File::with_name(&path_str).required(false))
            // Add environment variables with LOOPVIEW_ prefix
            .add_source(Environment::with_prefix("LOOPVIEW").separator("_"))
            .build()?;

        let config: LoopviewConfig = settings.try_deserialize()?;

        info!("Configuration loaded successfully");
        debug!("Final configuration: {:#?}", config);

        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.layout.narrow_breakpoint_px <= 0.0 {
            return Err(ConfigError::Message(
                "Narrow breakpoint must be greater than 0".to_string(),
            ));
        }

        if self.layout.wide_breakpoint_px <= self.layout.narrow_breakpoint_px {
            return Err(ConfigError::Message(
                "Wide breakpoint must be greater than the narrow breakpoint".to_string(),
            ));
        }

        for (name, count) in [
            ("narrow_visible", self.layout.narrow_visible),
            ("medium_visible", self.layout.medium_visible),
            ("wide_visible", self.layout.wide_visible),
        ] {
            if count == 0 {
                return Err(ConfigError::Message(format!(
                    "Layout {} must be greater than 0",
                    name
                )));
            }
        }

        if self.layout.peek_inset_px < 0.0 {
            return Err(ConfigError::Message(
                "Peek inset must not be negative".to_string(),
            ));
        }

        if self.gesture.drag_threshold_px <= 0.0 {
            return Err(ConfigError::Message(
                "Drag threshold must be greater than 0".to_string(),
            ));
        }

        if self.gesture.hold_interval_ms == 0 {
            return Err(ConfigError::Message(
                "Hold interval must be greater than 0".to_string(),
            ));
        }

        if self.system.event_bus_capacity == 0 {
            return Err(ConfigError::Message(
                "Event bus capacity must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }

    /// Visible item count for a viewport width, per the breakpoint tiers
    pub fn visible_count(&self, viewport_width: f64) -> usize {
        if viewport_width < self.layout.narrow_breakpoint_px {
            self.layout.narrow_visible
        } else if viewport_width >= self.layout.wide_breakpoint_px {
            self.layout.wide_visible
        } else {
            self.layout.medium_visible
        }
    }
}

impl Default for LoopviewConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig {
                narrow_breakpoint_px: default_narrow_breakpoint(),
                wide_breakpoint_px: default_wide_breakpoint(),
                narrow_visible: default_narrow_visible(),
                medium_visible: default_medium_visible(),
                wide_visible: default_wide_visible(),
                peek_inset_px: default_peek_inset(),
            },
            gesture: GestureConfig {
                drag_threshold_px: default_drag_threshold(),
                hold_interval_ms: default_hold_interval(),
            },
            system: SystemConfig {
                resize_debounce_ms: default_resize_debounce(),
                event_bus_capacity: default_event_bus_capacity(),
            },
        }
    }
}

// Default value functions
fn default_narrow_breakpoint() -> f64 {
    768.0
}
fn default_wide_breakpoint() -> f64 {
    1440.0
}
fn default_narrow_visible() -> usize {
    1
}
fn default_medium_visible() -> usize {
    3
}
fn default_wide_visible() -> usize {
    5
}
// Tuned empirically for a phone-width viewport
fn default_peek_inset() -> f64 {
    32.0
}

fn default_drag_threshold() -> f64 {
    50.0
}
fn default_hold_interval() -> u64 {
    500
}

fn default_resize_debounce() -> u64 {
    300
}
fn default_event_bus_capacity() -> usize {
    100
}
