// src/config/config_types.rs
//
// Config types for the app. Every field carries a default so a partial
// laserclock.toml, or none at all, still yields a usable config.

use serde::Deserialize;

use super::ConfigError;
use crate::models::MAX_POINTS;

/// Smallest accepted segment length. Below this a single stroke can ask for
/// millions of interpolation steps, most of them dropped by a full buffer.
pub const MIN_DIVIDER: f32 = 1.0;

/// Largest accepted digit width. A digit is already wider than the whole
/// device range at this size.
pub const MAX_SIZE: i32 = 4096;

/// Upper bound for `dwell` and `hidden_dwell`: one corner cannot hold more
/// repeats than a frame has points.
pub const MAX_DWELL: u32 = MAX_POINTS as u32;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub size: i32,
    pub xpos: i32,
    pub ypos: i32,
    pub color: i32,
    // Vectors are split into segments no longer than this, which keeps the
    // drawing time per unit length (and so the brightness) uniform and keeps
    // galvo non-linearity out of long strokes. Too low and a frame holds too
    // many points; too high and the image flickers.
    pub divider: f32,
    pub dwell: u32,
    pub hidden_dwell: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 250,
            xpos: 0,
            ypos: 2000,
            color: 1,
            divider: 50.0,
            dwell: 10,
            hidden_dwell: 15,
        }
    }
}

impl RenderConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.divider.is_finite() || self.divider < MIN_DIVIDER {
            return Err(ConfigError::Invalid(format!(
                "divider must be at least {}, got {}",
                MIN_DIVIDER, self.divider
            )));
        }
        if self.size <= 0 || self.size > MAX_SIZE {
            return Err(ConfigError::Invalid(format!(
                "size must be in 1..={}, got {}",
                MAX_SIZE, self.size
            )));
        }
        if self.dwell > MAX_DWELL || self.hidden_dwell > MAX_DWELL {
            return Err(ConfigError::Invalid(format!(
                "dwell and hidden_dwell must be at most {}, got {} and {}",
                MAX_DWELL, self.dwell, self.hidden_dwell
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Osc,
    Dump,
    Preview,
}

impl DeviceKind {
    pub fn parse(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "osc" => Some(DeviceKind::Osc),
            "dump" => Some(DeviceKind::Dump),
            "preview" => Some(DeviceKind::Preview),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DeviceConfig {
    pub kind: DeviceKind,
    pub points_per_second: u32,
    pub ready_timeout_ms: u64,
    pub osc_host: String,
    pub osc_port: u16,
    pub frame_flags: u8,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            kind: DeviceKind::Osc,
            points_per_second: 30000,
            ready_timeout_ms: 1000,
            osc_host: "127.0.0.1".to_string(),
            osc_port: 9000,
            frame_flags: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dump_directory: String,
    pub frame_limit: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dump_directory: "frames".to_string(),
            frame_limit: 60,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct OscConfig {
    /// Port to accept `/clock/...` commands on. No port, no listener.
    pub rx_port: Option<u16>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_defaults() {
        let render = RenderConfig::default();
        assert_eq!(render.size, 250);
        assert_eq!(render.dwell, 10);
        assert_eq!(render.hidden_dwell, 15);
        assert_eq!(render.xpos, 0);
        assert_eq!(render.ypos, 2000);
        assert_eq!(render.color, 1);
        assert_eq!(render.divider, 50.0);
        assert!(render.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_divider_and_size() {
        let mut render = RenderConfig {
            divider: 0.0,
            ..RenderConfig::default()
        };
        assert!(render.validate().is_err());

        render.divider = f32::NAN;
        assert!(render.validate().is_err());

        render.divider = 50.0;
        render.size = 0;
        assert!(render.validate().is_err());
    }

    #[test]
    fn test_validate_bounds() {
        let tiny_divider = RenderConfig {
            divider: 0.00001,
            ..RenderConfig::default()
        };
        assert!(tiny_divider.validate().is_err());

        let huge_size = RenderConfig {
            size: 300_000_000,
            ..RenderConfig::default()
        };
        assert!(huge_size.validate().is_err());

        let long_dwell = RenderConfig {
            hidden_dwell: u32::MAX,
            ..RenderConfig::default()
        };
        assert!(long_dwell.validate().is_err());

        let edges = RenderConfig {
            divider: MIN_DIVIDER,
            size: MAX_SIZE,
            dwell: MAX_DWELL,
            hidden_dwell: MAX_DWELL,
            ..RenderConfig::default()
        };
        assert!(edges.validate().is_ok());
    }

    #[test]
    fn test_device_kind_parse() {
        assert_eq!(DeviceKind::parse("OSC"), Some(DeviceKind::Osc));
        assert_eq!(DeviceKind::parse("dump"), Some(DeviceKind::Dump));
        assert_eq!(DeviceKind::parse("helios"), None);
    }
}
