// src/render/frame_composer.rs
// Lays out HH:MM:SS as six digits and two colon marks for one frame

use log::debug;
use serde::Serialize;

use super::glyph_renderer::Glyph;
use super::{offset, PathRenderer, RenderParams};
use crate::config::RenderConfig;
use crate::models::{BeamPoint, LaserColor, TimeOfDay};
use crate::services::Clock;

/// One complete scan path, handed to the device as a unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub time: TimeOfDay,
    pub points: Vec<BeamPoint>,
    /// Some geometry was dropped because the point buffer filled up.
    pub truncated: bool,
    /// Number of points that had to be clamped into device range.
    pub clipped: usize,
}

impl Frame {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

pub struct FrameComposer {
    renderer: PathRenderer,
}

impl Default for FrameComposer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameComposer {
    pub fn new() -> Self {
        Self {
            renderer: PathRenderer::new(RenderParams::default()),
        }
    }

    pub fn with_renderer(renderer: PathRenderer) -> Self {
        Self { renderer }
    }

    /// Builds the frame for `time`. The renderer is reset first, so nothing
    /// from a previous frame leaks into this one.
    pub fn compose(&mut self, config: &RenderConfig, time: TimeOfDay) -> Frame {
        let renderer = &mut self.renderer;
        renderer.reset(RenderParams::from(config));

        let color = LaserColor::from_code(config.color);
        let size = config.size;

        for (slot, digit) in time.digits().into_iter().enumerate() {
            let x = offset(config.xpos, 2 * slot as i64 * size as i64);
            Glyph::Digit(digit).draw(renderer, x, config.ypos, color, size);
        }

        // colon marks sit between the hour/minute and minute/second pairs
        let marker_size = size / 10;
        for column in [3.5, 7.5] {
            let x = offset(config.xpos, (column * size as f64) as i64);
            let y = offset(config.ypos, -((size / 2) as i64));
            Glyph::Square.draw(renderer, x, y, color, marker_size);
            Glyph::Square.draw(renderer, x, offset(y, -(size as i64)), color, marker_size);
        }

        let buffer = renderer.buffer();
        debug!(
            "Composed {} with {} points ({} clipped, truncated: {})",
            time,
            buffer.len(),
            buffer.clip_count(),
            buffer.is_truncated()
        );

        Frame {
            time,
            points: buffer.points().to_vec(),
            truncated: buffer.is_truncated(),
            clipped: buffer.clip_count(),
        }
    }

    pub fn compose_now(&mut self, config: &RenderConfig, clock: &dyn Clock) -> Frame {
        self.compose(config, clock.now())
    }

    pub fn renderer(&self) -> &PathRenderer {
        &self.renderer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PointBuffer;
    use crate::services::FixedClock;

    fn time(h: u8, m: u8, s: u8) -> TimeOfDay {
        TimeOfDay::new(h, m, s).unwrap()
    }

    #[test]
    fn test_first_point_is_blank_start_of_first_digit() {
        let mut composer = FrameComposer::new();
        let frame = composer.compose(&RenderConfig::default(), time(0, 0, 0));

        let first = frame.points[0];
        assert_eq!((first.x, first.y), (0, 2000));
        assert!(first.is_blank());
        assert!(!frame.truncated);
        assert_eq!(frame.clipped, 0);
    }

    #[test]
    fn test_compose_is_deterministic() {
        let config = RenderConfig::default();
        let mut composer = FrameComposer::new();
        let a = composer.compose(&config, time(12, 34, 56));
        let _ = composer.compose(&config, time(1, 1, 1));
        let b = composer.compose(&config, time(12, 34, 56));
        assert_eq!(a, b);

        let c = FrameComposer::new().compose(&config, time(12, 34, 56));
        assert_eq!(a.points, c.points);
    }

    #[test]
    fn test_colon_marks_end_the_frame() {
        let mut composer = FrameComposer::new();
        composer.compose(&RenderConfig::default(), time(10, 20, 30));

        // last square: centre (1875, 1625), side 25, offset 12
        assert_eq!(composer.renderer().cursor(), (1863, 1613));
    }

    #[test]
    fn test_digit_slots_follow_time() {
        let config = RenderConfig {
            dwell: 0,
            hidden_dwell: 1,
            ..RenderConfig::default()
        };
        let mut composer = FrameComposer::new();
        let frame = composer.compose(&config, time(11, 11, 11));

        // with dwell 0 the only blank points are the jumps; digit 1 jumps twice
        let starts: Vec<u16> = frame
            .points
            .iter()
            .filter(|p| p.is_blank())
            .map(|p| p.x)
            .collect();
        assert_eq!(
            starts[..12].to_vec(),
            vec![250, 250, 750, 750, 1250, 1250, 1750, 1750, 2250, 2250, 2750, 2750]
        );
    }

    #[test]
    fn test_oversized_readout_is_clipped() {
        let config = RenderConfig {
            size: 400,
            ..RenderConfig::default()
        };
        let frame = FrameComposer::new().compose(&config, time(23, 59, 59));
        assert!(frame.clipped > 0);
        assert!(frame.points.iter().all(|p| p.x <= 4095 && p.y <= 4095));
    }

    #[test]
    fn test_extreme_anchor_is_clipped_not_wrapped() {
        let config = RenderConfig {
            xpos: i32::MAX - 10,
            ..RenderConfig::default()
        };
        let frame = FrameComposer::new().compose(&config, time(23, 59, 59));

        assert!(frame.clipped > 0);
        // far right stays far right: nothing wraps round to x = 0
        assert!(frame.points.iter().all(|p| p.x == 4095 && p.y <= 4095));
    }

    #[test]
    fn test_extreme_negative_anchor() {
        let config = RenderConfig {
            xpos: i32::MIN + 10,
            ypos: i32::MIN + 10,
            size: 4096,
            ..RenderConfig::default()
        };
        let frame = FrameComposer::new().compose(&config, time(8, 8, 8));

        assert!(frame.clipped > 0);
        assert!(frame.points.iter().all(|p| p.y == 0 && p.x <= 4095));
    }

    #[test]
    fn test_small_buffer_truncates() {
        let renderer =
            PathRenderer::with_buffer(RenderParams::default(), PointBuffer::with_capacity(100));
        let mut composer = FrameComposer::with_renderer(renderer);
        let frame = composer.compose(&RenderConfig::default(), time(8, 8, 8));

        assert!(frame.truncated);
        assert_eq!(frame.len(), 100);
    }

    #[test]
    fn test_compose_now_reads_clock() {
        let clock = FixedClock::new(time(7, 6, 5));
        let frame = FrameComposer::new().compose_now(&RenderConfig::default(), &clock);
        assert_eq!(frame.time, time(7, 6, 5));
    }
}
