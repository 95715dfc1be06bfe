// src/render/mod.rs
// The vector path rendering module: strokes, glyphs and whole frames

pub mod frame_composer;
pub mod glyph_renderer;
pub mod path_renderer;

pub use frame_composer::{Frame, FrameComposer};
pub use glyph_renderer::{draw_circle, draw_digit, draw_square, Glyph};
pub use path_renderer::PathRenderer;

use crate::config::RenderConfig;

/// `base + delta`, computed wide and saturated back into `i32`. Anchors and
/// sizes come straight from the config, so glyph geometry must not overflow;
/// anything far outside device range is clamped by the point buffer anyway.
pub(crate) fn offset(base: i32, delta: i64) -> i32 {
    (base as i64 + delta).clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// The per-frame constants the path renderer needs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderParams {
    pub divider: f32,
    pub dwell: u32,
    pub hidden_dwell: u32,
}

impl Default for RenderParams {
    fn default() -> Self {
        Self::from(&RenderConfig::default())
    }
}

impl From<&RenderConfig> for RenderParams {
    fn from(config: &RenderConfig) -> Self {
        Self {
            divider: config.divider,
            dwell: config.dwell,
            hidden_dwell: config.hidden_dwell,
        }
    }
}
