use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::app::Viewport;
use crate::geometry::{Rect, Vec2};

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("viewport must be non-empty, got {width}x{height}")]
    EmptyViewport { width: u32, height: u32 },
    #[error("viewport {width}x{height} does not fit in screen coordinates")]
    ViewportTooLarge { width: u32, height: u32 },
    #[error("camera move speed must be finite and non-negative, got {0}")]
    InvalidMoveSpeed(f32),
}

/// Placement and camera settings for one battlefield widget.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BattlefieldConfig {
    pub widget_x: i32,
    pub widget_y: i32,
    pub viewport_width: u32,
    pub viewport_height: u32,
    pub move_speed_px_per_second: f32,
    pub initial_camera: Vec2,
}

impl Default for BattlefieldConfig {
    fn default() -> Self {
        Self {
            widget_x: 0,
            widget_y: 42,
            viewport_width: 800,
            viewport_height: 600,
            move_speed_px_per_second: 480.0,
            initial_camera: Vec2::ZERO,
        }
    }
}

impl BattlefieldConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.viewport_width == 0 || self.viewport_height == 0 {
            return Err(ConfigError::EmptyViewport {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        if i32::try_from(self.viewport_width).is_err()
            || i32::try_from(self.viewport_height).is_err()
        {
            return Err(ConfigError::ViewportTooLarge {
                width: self.viewport_width,
                height: self.viewport_height,
            });
        }
        let speed = self.move_speed_px_per_second;
        if !speed.is_finite() || speed < 0.0 {
            return Err(ConfigError::InvalidMoveSpeed(speed));
        }
        Ok(())
    }

    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.viewport_width,
            height: self.viewport_height,
        }
    }

    /// Widget bounds in screen space.
    pub fn widget_rect(&self) -> Rect {
        let viewport = self.viewport();
        Rect::new(
            self.widget_x,
            self.widget_y,
            viewport.width_px(),
            viewport.height_px(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert_eq!(BattlefieldConfig::default().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_viewport() {
        let config = BattlefieldConfig {
            viewport_height: 0,
            ..BattlefieldConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyViewport {
                width: 800,
                height: 0
            })
        );
    }

    #[test]
    fn rejects_non_finite_speed() {
        let config = BattlefieldConfig {
            move_speed_px_per_second: f32::INFINITY,
            ..BattlefieldConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidMoveSpeed(_))
        ));
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: BattlefieldConfig =
            serde_json::from_str(r#"{ "viewport_width": 1024, "initial_camera": { "x": 64.0, "y": 32.0 } }"#)
                .expect("parse");
        assert_eq!(config.viewport_width, 1024);
        assert_eq!(config.viewport_height, 600);
        assert_eq!(config.initial_camera, Vec2::new(64.0, 32.0));
        assert_eq!(config.widget_rect(), Rect::new(0, 42, 1024, 600));
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let parsed = serde_json::from_str::<BattlefieldConfig>(r#"{ "zoom": 2.0 }"#);
        assert!(parsed.is_err());
    }
}
