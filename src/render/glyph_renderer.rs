// src/render/glyph_renderer.rs
// Seven-segment style digits and the auxiliary marker shapes, traced as
// sequences of PathRenderer strokes.
//
// Digits live in a box `size` wide and `2 * size` tall. The anchor (x, y) is
// the top-left corner; device y decreases downward, so the box spans
// (x, y) to (x + size, y - 2 * size).

use super::{offset, PathRenderer};
use crate::models::LaserColor;

/// One stroke of a digit, in units of `size` relative to the anchor.
/// `dy` counts down from the anchor, so the device y is `y - dy * size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    pub dx: i32,
    pub dy: i32,
    pub visible: bool,
}

const fn jump(dx: i32, dy: i32) -> Stroke {
    Stroke {
        dx,
        dy,
        visible: false,
    }
}

const fn line(dx: i32, dy: i32) -> Stroke {
    Stroke {
        dx,
        dy,
        visible: true,
    }
}

const ZERO: &[Stroke] = &[jump(0, 0), line(1, 0), line(1, 2), line(0, 2), line(0, 0)];
// the repeated jump is an extra dwell that sharpens the start of the stroke
const ONE: &[Stroke] = &[jump(1, 0), jump(1, 0), line(1, 2)];
const TWO: &[Stroke] = &[
    jump(0, 0),
    line(1, 0),
    line(1, 1),
    line(0, 1),
    line(0, 2),
    line(1, 2),
];
const THREE: &[Stroke] = &[
    jump(0, 0),
    line(1, 0),
    line(1, 2),
    line(0, 2),
    jump(0, 1),
    line(1, 1),
];
const FOUR: &[Stroke] = &[jump(0, 0), line(0, 1), line(1, 1), jump(1, 0), line(1, 2)];
const FIVE: &[Stroke] = &[
    jump(1, 0),
    line(0, 0),
    line(0, 1),
    line(1, 1),
    line(1, 2),
    line(0, 2),
];
const SIX: &[Stroke] = &[
    jump(1, 0),
    line(0, 0),
    line(0, 2),
    line(1, 2),
    line(1, 1),
    line(0, 1),
];
const SEVEN: &[Stroke] = &[jump(0, 0), line(1, 0), line(1, 2)];
const EIGHT: &[Stroke] = &[
    jump(0, 0),
    line(1, 0),
    line(1, 2),
    line(0, 2),
    line(0, 0),
    jump(0, 1),
    line(1, 1),
];
const NINE: &[Stroke] = &[jump(1, 2), line(1, 0), line(0, 0), line(0, 1), line(1, 1)];

const DIGITS: [&[Stroke]; 10] = [ZERO, ONE, TWO, THREE, FOUR, FIVE, SIX, SEVEN, EIGHT, NINE];

/// Shapes the frame composer knows how to place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Glyph {
    Digit(u8),
    Square,
}

impl Glyph {
    pub fn draw(self, renderer: &mut PathRenderer, x: i32, y: i32, color: LaserColor, size: i32) {
        match self {
            Glyph::Digit(n) => draw_digit(renderer, n, x, y, color, size),
            Glyph::Square => draw_square(renderer, x, y, color, size),
        }
    }
}

/// The stroke table for digit `n`, or `None` outside 0..=9.
pub fn digit_strokes(n: u8) -> Option<&'static [Stroke]> {
    DIGITS.get(n as usize).copied()
}

/// Traces digit `n`. Values outside 0..=9 draw nothing.
pub fn draw_digit(renderer: &mut PathRenderer, n: u8, x: i32, y: i32, color: LaserColor, size: i32) {
    let Some(strokes) = digit_strokes(n) else {
        return;
    };

    for stroke in strokes {
        let pen = if stroke.visible {
            color
        } else {
            LaserColor::Blank
        };
        renderer.line_to(
            offset(x, stroke.dx as i64 * size as i64),
            offset(y, -(stroke.dy as i64 * size as i64)),
            pen,
        );
    }
}

/// Traces a square of side `size` centred on (x, y), starting from a blanked
/// jump to its first corner.
pub fn draw_square(renderer: &mut PathRenderer, x: i32, y: i32, color: LaserColor, size: i32) {
    let half = (size / 2) as i64;
    let left = offset(x, -half);
    let top = offset(y, -half);
    let right = offset(left, size as i64);
    let bottom = offset(top, size as i64);

    renderer.line_to(left, top, LaserColor::Blank);
    renderer.line_to(right, top, color);
    renderer.line_to(right, bottom, color);
    renderer.line_to(left, bottom, color);
    renderer.line_to(left, top, color);
}

/// Traces a circle by sampling the arc every `step_degrees`, starting half a
/// step before 0° and sweeping past 360° so the outline closes.
/// A non-positive or non-finite step draws nothing.
pub fn draw_circle(
    renderer: &mut PathRenderer,
    x: i32,
    y: i32,
    color: LaserColor,
    radius: f32,
    step_degrees: f32,
) {
    if !step_degrees.is_finite() || step_degrees <= 0.0 {
        return;
    }

    renderer.line_to((x as f32 + radius) as i32, y, LaserColor::Blank);

    let mut theta = -0.5 * step_degrees;
    while theta < 360.0 + 0.5 * step_degrees {
        let radians = theta.to_radians();
        let xf = radius * radians.cos();
        let yf = radius * radians.sin();
        renderer.line_to(offset(x, xf as i64), offset(y, yf as i64), color);
        theta += step_degrees;
    }
}
