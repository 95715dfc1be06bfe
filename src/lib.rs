// src/lib.rs
//
// Renders the wall-clock time as a vector scan path for a galvo laser
// projector, emulating a six digit seven-segment readout.

pub mod config;
pub mod controllers;
pub mod models;
pub mod render;
pub mod services;
#[cfg(feature = "preview")]
pub mod views;
