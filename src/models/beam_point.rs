// src/models/beam_point.rs
//
// One sample of the projector scan path, in the device's native format

use serde::{Deserialize, Serialize};

/// Largest coordinate the DAC accepts on either axis (12 bit).
pub const COORD_MAX: i32 = 4095;

/// Intensity written with every point. Blanking is carried by r=g=b=0.
pub const FULL_INTENSITY: u8 = 0xFF;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BeamPoint {
    pub x: u16,
    pub y: u16,
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub i: u8,
}

impl BeamPoint {
    pub fn is_blank(&self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }

    /// Packs the point little-endian: x, y as u16 then r, g, b, i.
    pub fn to_bytes(&self) -> [u8; 8] {
        let [x0, x1] = self.x.to_le_bytes();
        let [y0, y1] = self.y.to_le_bytes();
        [x0, x1, y0, y1, self.r, self.g, self.b, self.i]
    }
}

/// Clamps a coordinate into `[0, COORD_MAX]`, reporting whether it had to move.
pub fn clamp_coord(value: i32) -> (u16, bool) {
    let clamped = value.clamp(0, COORD_MAX);
    (clamped as u16, clamped != value)
}
