// src/views/preview.rs
//
// A window that stands in for the projector: it composes the same frames the
// device would receive and draws the lit part of the scan path.

use log::error;
use nannou::prelude::*;

use crate::config::{Config, RenderConfig};
use crate::models::{BeamPoint, COORD_MAX};
use crate::render::{Frame as LaserFrame, FrameComposer};
use crate::services::{Clock, SystemClock};

const WINDOW_SIZE: u32 = 800;
const BEAM_WEIGHT: f32 = 2.0;

struct Model {
    composer: FrameComposer,
    render: RenderConfig,
    clock: SystemClock,
    frame: LaserFrame,
}

pub fn run() {
    nannou::app(model).update(update).run();
}

fn model(app: &App) -> Model {
    // main has already reported config errors before getting here
    let render = Config::from_env_args()
        .map(|config| config.render)
        .unwrap_or_default();

    app.new_window()
        .title("laserclock preview")
        .size(WINDOW_SIZE, WINDOW_SIZE)
        .view(view)
        .build()
        .expect("Failed to build preview window");

    let clock = SystemClock;
    let mut composer = FrameComposer::new();
    let frame = composer.compose(&render, clock.now());

    Model {
        composer,
        render,
        clock,
        frame,
    }
}

fn update(_app: &App, model: &mut Model, _update: Update) {
    let now = model.clock.now();
    if now != model.frame.time {
        model.frame = model.composer.compose(&model.render, now);
    }
}

// device space is [0, 4095] on both axes with y pointing up, like nannou
fn to_window(point: &BeamPoint, win: Rect) -> Point2 {
    let max = COORD_MAX as f32;
    pt2(
        map_range(point.x as f32, 0.0, max, win.left(), win.right()),
        map_range(point.y as f32, 0.0, max, win.bottom(), win.top()),
    )
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    draw.background().color(BLACK);
    let win = app.window_rect();

    // a segment is lit when the point it travels to is lit
    for pair in model.frame.points.windows(2) {
        let (from, to) = (&pair[0], &pair[1]);
        if to.is_blank() {
            continue;
        }
        draw.line()
            .start(to_window(from, win))
            .end(to_window(to, win))
            .color(rgb(
                to.r as f32 / 255.0,
                to.g as f32 / 255.0,
                to.b as f32 / 255.0,
            ))
            .stroke_weight(BEAM_WEIGHT);
    }

    if let Err(e) = draw.to_frame(app, &frame) {
        error!("Failed to draw preview frame: {:?}", e);
    }
}
