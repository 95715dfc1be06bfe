// src/views/mod.rs

pub mod preview;

pub use preview::run as run_preview;
