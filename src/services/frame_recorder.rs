// src/services/frame_recorder.rs
// FrameRecorder writes the frames sent to a device out as JSON files, one per
// distinct frame, so a scan path can be inspected or replayed offline.
// Retransmissions of an unchanged frame are skipped.

use log::{debug, info};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::BeamPoint;

#[derive(Debug, Error)]
pub enum RecordError {
    #[error("frame recorder I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode frame: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
pub struct FrameRecord<'a> {
    pub frame_number: u32,
    pub points_per_second: u32,
    pub flags: u8,
    pub point_count: usize,
    pub points: &'a [BeamPoint],
}

pub struct FrameRecorder {
    output_dir: PathBuf,
    frame_limit: u32,
    frame_number: u32,
    last_points: Vec<BeamPoint>,
    limit_reported: bool,
}

impl FrameRecorder {
    pub fn new(output_dir: &Path, frame_limit: u32) -> Result<Self, RecordError> {
        fs::create_dir_all(output_dir)?;
        info!(
            "Recording up to {} frames to {}",
            frame_limit,
            output_dir.display()
        );

        Ok(Self {
            output_dir: output_dir.to_path_buf(),
            frame_limit,
            frame_number: 0,
            last_points: Vec::new(),
            limit_reported: false,
        })
    }

    /// Writes the frame if it differs from the previous one and the limit has
    /// not been reached. Returns the path written, if any.
    pub fn record(
        &mut self,
        points_per_second: u32,
        flags: u8,
        points: &[BeamPoint],
    ) -> Result<Option<PathBuf>, RecordError> {
        if self.frame_number > 0 && self.last_points == points {
            return Ok(None);
        }

        if self.is_full() {
            if !self.limit_reported {
                info!("Frame limit of {} reached, no longer recording", self.frame_limit);
                self.limit_reported = true;
            }
            return Ok(None);
        }

        let path = self
            .output_dir
            .join(format!("frame_{:05}.json", self.frame_number));
        let record = FrameRecord {
            frame_number: self.frame_number,
            points_per_second,
            flags,
            point_count: points.len(),
            points,
        };

        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer(&mut writer, &record)?;
        writer.flush()?;
        debug!("Wrote {} points to {}", points.len(), path.display());

        self.frame_number += 1;
        self.last_points.clear();
        self.last_points.extend_from_slice(points);
        Ok(Some(path))
    }

    pub fn frames_written(&self) -> u32 {
        self.frame_number
    }

    pub fn is_full(&self) -> bool {
        self.frame_number >= self.frame_limit
    }
}
