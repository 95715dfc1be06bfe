// src/models/point_buffer.rs
//
// Capacity-bounded scan path for a single frame. Insertion order is the order
// the beam visits the points.

use log::warn;

use super::beam_point::{clamp_coord, BeamPoint, FULL_INTENSITY};
use super::laser_color::LaserColor;

pub const MAX_POINTS: usize = 10000;

/// Outcome of a single emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emit {
    Stored(usize),
    Full,
}

impl Emit {
    pub fn is_full(self) -> bool {
        self == Emit::Full
    }
}

#[derive(Debug, Clone)]
pub struct PointBuffer {
    points: Vec<BeamPoint>,
    capacity: usize,
    clip_count: usize,
    dropped_count: usize,
}

impl Default for PointBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl PointBuffer {
    pub fn new() -> Self {
        Self::with_capacity(MAX_POINTS)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            points: Vec::with_capacity(capacity),
            capacity,
            clip_count: 0,
            dropped_count: 0,
        }
    }

    /// Clamps `(x, y)` into device range and appends it.
    /// Once the buffer is at capacity every call returns `Emit::Full` and
    /// leaves the stored points untouched.
    pub fn emit(&mut self, x: i32, y: i32, color: LaserColor) -> Emit {
        if self.points.len() >= self.capacity {
            self.dropped_count += 1;
            return Emit::Full;
        }

        let (px, x_clipped) = clamp_coord(x);
        let (py, y_clipped) = clamp_coord(y);
        if x_clipped || y_clipped {
            // one log line per frame, every event is counted
            if self.clip_count == 0 {
                warn!(
                    "Clipping at ({}, {})! Reduce size and/or adjust x/y position.",
                    x, y
                );
            }
            self.clip_count += 1;
        }

        let (r, g, b) = color.rgb();
        self.points.push(BeamPoint {
            x: px,
            y: py,
            r,
            g,
            b,
            i: FULL_INTENSITY,
        });
        Emit::Stored(self.points.len() - 1)
    }

    pub fn reset(&mut self) {
        self.points.clear();
        self.clip_count = 0;
        self.dropped_count = 0;
    }

    pub fn points(&self) -> &[BeamPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// True once any emission was rejected for capacity since the last reset.
    pub fn is_truncated(&self) -> bool {
        self.dropped_count > 0
    }

    pub fn clip_count(&self) -> usize {
        self.clip_count
    }

    pub fn dropped_count(&self) -> usize {
        self.dropped_count
    }
}
