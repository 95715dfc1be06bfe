// src/render/path_renderer.rs
// Turns "move/draw to (x, y)" commands into evenly spaced beam points

use super::RenderParams;
use crate::models::{BeamPoint, Emit, LaserColor, PointBuffer};

/// Pen state plus the frame's point buffer.
///
/// There is no pen-up state: a stroke drawn with `LaserColor::Blank` is a jump.
/// The cursor always follows the requested target, even when the emitted
/// points were clipped or dropped for capacity, so later strokes of a glyph
/// keep their geometry.
#[derive(Debug, Clone)]
pub struct PathRenderer {
    buffer: PointBuffer,
    params: RenderParams,
    x_start: i32,
    y_start: i32,
}

impl PathRenderer {
    pub fn new(params: RenderParams) -> Self {
        Self::with_buffer(params, PointBuffer::new())
    }

    pub fn with_buffer(params: RenderParams, buffer: PointBuffer) -> Self {
        Self {
            buffer,
            params,
            x_start: 0,
            y_start: 0,
        }
    }

    /// Clears the buffer and returns the pen to the origin.
    pub fn reset(&mut self, params: RenderParams) {
        self.buffer.reset();
        self.params = params;
        self.x_start = 0;
        self.y_start = 0;
    }

    /// Draws from the cursor to `(x, y)`.
    ///
    /// Visible strokes are cut into `ceil(length / divider)` equal steps, one
    /// point per step, the last landing on the target. Blanked strokes emit no
    /// steps. Either way the target is then repeated `dwell` (visible) or
    /// `hidden_dwell` (blank) times so the galvos settle.
    ///
    /// Returns the status of the last emission, or `None` if nothing was emitted.
    pub fn line_to(&mut self, x: i32, y: i32, color: LaserColor) -> Option<Emit> {
        let mut status = None;
        // i64 so a jump across the whole i32 range cannot overflow
        let x_length = (x as i64 - self.x_start as i64) as f32;
        let y_length = (y as i64 - self.y_start as i64) as f32;
        let vector_length = (x_length * x_length + y_length * y_length).sqrt();

        if !color.is_blank() {
            let num_segments = (vector_length / self.params.divider).ceil() as i32;
            let x_step = x_length / num_segments as f32;
            let y_step = y_length / num_segments as f32;

            for i in 1..=num_segments {
                let (px, py) = if i == num_segments {
                    (x, y)
                } else {
                    (
                        (self.x_start as f32 + x_step * i as f32) as i32,
                        (self.y_start as f32 + y_step * i as f32) as i32,
                    )
                };
                status = Some(self.buffer.emit(px, py, color));
            }
        }

        let dwell = if color.is_blank() {
            self.params.hidden_dwell
        } else {
            self.params.dwell
        };
        for _ in 0..dwell {
            status = Some(self.buffer.emit(x, y, color));
        }

        self.x_start = x;
        self.y_start = y;
        status
    }

    pub fn cursor(&self) -> (i32, i32) {
        (self.x_start, self.y_start)
    }

    pub fn params(&self) -> &RenderParams {
        &self.params
    }

    pub fn buffer(&self) -> &PointBuffer {
        &self.buffer
    }

    pub fn points(&self) -> &[BeamPoint] {
        self.buffer.points()
    }

    pub fn into_buffer(self) -> PointBuffer {
        self.buffer
    }
}
