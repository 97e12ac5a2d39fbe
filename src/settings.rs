//! Game settings and tuning
//!
//! Defaults reproduce the classic game. A JSON override can be kept in
//! LocalStorage; it is validated before use so a bad value fails at startup
//! rather than mid-rally.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::state::{Field, Tuning};

/// Colors and line style used by the renderer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    /// Fill used to clear the field; `None` leaves the canvas transparent
    pub background: Option<String>,
    pub net: String,
    /// Dash/gap lengths for the center line
    pub net_dash: [f32; 2],
    pub paddle: String,
    pub ball: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: None,
            net: "#888".to_string(),
            net_dash: [10.0, 15.0],
            paddle: "#fff".to_string(),
            ball: "#fff".to_string(),
        }
    }
}

/// Why a set of settings was rejected
#[derive(Debug)]
pub enum SettingsError {
    /// The JSON could not be parsed
    Parse(serde_json::Error),
    /// A value is outside what the game can run with
    Invalid(String),
}

impl fmt::Display for SettingsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingsError::Parse(e) => write!(f, "malformed settings: {e}"),
            SettingsError::Invalid(reason) => write!(f, "invalid settings: {reason}"),
        }
    }
}

impl std::error::Error for SettingsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SettingsError::Parse(e) => Some(e),
            SettingsError::Invalid(_) => None,
        }
    }
}

impl From<serde_json::Error> for SettingsError {
    fn from(e: serde_json::Error) -> Self {
        SettingsError::Parse(e)
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Paddles ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    /// Gap between each paddle and its side wall
    pub paddle_inset: f32,
    /// Key-driven movement per tick
    pub player_speed: f32,
    pub opponent_speed: f32,
    pub opponent_dead_zone: f32,

    // === Ball ===
    pub ball_radius: f32,
    pub serve_speed: f32,
    pub serve_spread: f32,
    /// Vertical speed after a hit on the very edge of a paddle
    pub deflection: f32,

    // === Input ===
    pub input_capacity: usize,

    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            field_width: FIELD_WIDTH,
            field_height: FIELD_HEIGHT,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_inset: PADDLE_INSET,
            player_speed: PLAYER_SPEED,
            opponent_speed: OPPONENT_SPEED,
            opponent_dead_zone: OPPONENT_DEAD_ZONE,

            ball_radius: BALL_RADIUS,
            serve_speed: SERVE_SPEED,
            serve_spread: SERVE_SPREAD,
            deflection: DEFLECTION,

            input_capacity: INPUT_MAILBOX_CAPACITY,

            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Parse and validate a JSON settings document
    ///
    /// Missing keys take their default value.
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Same settings on a field of a different size (e.g. the canvas size)
    pub fn with_field_size(mut self, width: f32, height: f32) -> Self {
        self.field_width = width;
        self.field_height = height;
        self
    }

    pub fn field(&self) -> Field {
        Field::new(self.field_width, self.field_height)
    }

    pub fn tuning(&self) -> Tuning {
        Tuning {
            opponent_dead_zone: self.opponent_dead_zone,
            deflection: self.deflection,
            serve_speed: self.serve_speed,
            serve_spread: self.serve_spread,
        }
    }

    /// Check the settings describe a playable game
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = [
            ("field_width", self.field_width),
            ("field_height", self.field_height),
            ("paddle_width", self.paddle_width),
            ("paddle_height", self.paddle_height),
            ("ball_radius", self.ball_radius),
            ("serve_speed", self.serve_speed),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be > 0, got {value}")));
            }
        }

        let non_negative = [
            ("paddle_inset", self.paddle_inset),
            ("player_speed", self.player_speed),
            ("opponent_speed", self.opponent_speed),
            ("opponent_dead_zone", self.opponent_dead_zone),
            ("serve_spread", self.serve_spread),
            ("deflection", self.deflection),
        ];
        for (name, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(SettingsError::Invalid(format!("{name} must be >= 0, got {value}")));
            }
        }

        if self.paddle_height > self.field_height {
            return Err(SettingsError::Invalid(format!(
                "paddle_height {} exceeds field_height {}",
                self.paddle_height, self.field_height
            )));
        }
        if 2.0 * (self.paddle_inset + self.paddle_width) >= self.field_width {
            return Err(SettingsError::Invalid(
                "paddles overlap horizontally; widen the field or shrink the inset".to_string(),
            ));
        }
        if 2.0 * self.ball_radius >= self.field_height {
            return Err(SettingsError::Invalid(format!(
                "ball diameter {} does not fit field_height {}",
                2.0 * self.ball_radius,
                self.field_height
            )));
        }
        if self.opponent_speed > self.player_speed {
            return Err(SettingsError::Invalid(format!(
                "opponent_speed {} must not exceed player_speed {}",
                self.opponent_speed, self.player_speed
            )));
        }
        if self.input_capacity == 0 {
            return Err(SettingsError::Invalid("input_capacity must be > 0".to_string()));
        }
        Ok(())
    }

    /// LocalStorage key
    #[cfg(target_arch = "wasm32")]
    const STORAGE_KEY: &'static str = "classic_pong_settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {e}"),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "field_width": 1024, "serve_speed": 6 }"#).unwrap();
        assert_eq!(settings.field_width, 1024.0);
        assert_eq!(settings.serve_speed, 6.0);
        assert_eq!(settings.field_height, FIELD_HEIGHT);
        assert_eq!(settings.palette, Palette::default());
    }

    #[test]
    fn test_round_trip_json() {
        let mut settings = Settings::default();
        settings.palette.background = Some("#000".to_string());
        let json = serde_json::to_string(&settings).unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    #[cfg(not(target_arch = "wasm32"))]
    fn test_native_load_uses_defaults() {
        assert_eq!(Settings::load(), Settings::default());
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ not json").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_rejects_fast_opponent() {
        let err = Settings::from_json(r#"{ "opponent_speed": 9 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid(_)));
        assert!(err.to_string().contains("opponent_speed"));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let tall = Settings {
            paddle_height: 600.0,
            ..Default::default()
        };
        assert!(tall.validate().is_err());

        let narrow = Settings::default().with_field_size(60.0, 500.0);
        assert!(narrow.validate().is_err());

        let negative = Settings {
            ball_radius: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let nan = Settings {
            opponent_dead_zone: f32::NAN,
            ..Default::default()
        };
        assert!(nan.validate().is_err());
    }

    #[test]
    fn test_tuning_view() {
        let settings = Settings {
            deflection: 7.0,
            ..Default::default()
        };
        let tuning = settings.tuning();
        assert_eq!(tuning.deflection, 7.0);
        assert_eq!(tuning.serve_speed, SERVE_SPEED);
        assert_eq!(settings.field(), Field::new(FIELD_WIDTH, FIELD_HEIGHT));
    }
}
