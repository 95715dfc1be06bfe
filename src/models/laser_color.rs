// src/models/laser_color.rs
//
// The fixed beam palette. Color codes come from the config file and the command line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LaserColor {
    Blank,
    Red,
    Green,
    Blue,
    Yellow,
    Magenta,
    Cyan,
    White,
}

impl LaserColor {
    /// Maps a palette code to a color. 0 is blank, 1 through 7 are the palette,
    /// anything else falls back to white.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => LaserColor::Blank,
            1 => LaserColor::Red,
            2 => LaserColor::Green,
            3 => LaserColor::Blue,
            4 => LaserColor::Yellow,
            5 => LaserColor::Magenta,
            6 => LaserColor::Cyan,
            _ => LaserColor::White,
        }
    }

    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            LaserColor::Blank => (0, 0, 0),
            LaserColor::Red => (255, 0, 0),
            LaserColor::Green => (0, 255, 0),
            LaserColor::Blue => (0, 0, 255),
            LaserColor::Yellow => (255, 255, 0),
            LaserColor::Magenta => (255, 0, 255),
            LaserColor::Cyan => (0, 255, 255),
            LaserColor::White => (255, 255, 255),
        }
    }

    pub fn is_blank(self) -> bool {
        self == LaserColor::Blank
    }
}
