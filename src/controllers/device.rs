// src/controllers/device.rs
// The projector DAC as seen by the projection loop

use log::debug;
use std::fmt;
use std::ops::BitOr;
use std::thread;
use std::time::{Duration, Instant};
use thiserror::Error;

use crate::models::BeamPoint;
use crate::services::RecordError;

const POLL_INTERVAL: Duration = Duration::from_micros(500);

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("no laser DAC found")]
    NoDevices,
    #[error("device {index} not ready after {waited:?}")]
    NotReady { index: usize, waited: Duration },
    #[error("communication with device {index} failed")]
    Communication { index: usize },
    #[error("no device with index {0}")]
    InvalidIndex(usize),
    #[error("device has not been opened")]
    NotOpen,
    #[error("device I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("OSC send failed: {0}")]
    Osc(String),
    #[error(transparent)]
    Record(#[from] RecordError),
}

impl DeviceError {
    /// Errors the projection loop can ride out by trying again.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, DeviceError::NotReady { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceStatus {
    Ready,
    Busy,
    Failed,
}

/// Options for `write_frame`, as understood by the DAC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FrameFlags(u8);

impl FrameFlags {
    pub const NONE: FrameFlags = FrameFlags(0);
    /// Start output at once instead of after the frame currently playing.
    pub const START_IMMEDIATELY: FrameFlags = FrameFlags(1 << 0);
    /// Play the frame once instead of repeating it until the next one arrives.
    pub const SINGLE_MODE: FrameFlags = FrameFlags(1 << 1);

    pub fn from_bits(bits: u8) -> Self {
        // bits 2-7 are reserved
        FrameFlags(bits & 0b11)
    }

    pub fn bits(self) -> u8 {
        self.0
    }

    pub fn contains(self, other: FrameFlags) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for FrameFlags {
    type Output = FrameFlags;

    fn bitor(self, rhs: FrameFlags) -> FrameFlags {
        FrameFlags(self.0 | rhs.0)
    }
}

impl fmt::Display for FrameFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#04x}", self.0)
    }
}

pub trait LaserDevice {
    /// Connects to every attached DAC and returns how many were found.
    fn open_devices(&mut self) -> Result<usize, DeviceError>;

    fn status(&mut self, index: usize) -> Result<DeviceStatus, DeviceError>;

    fn write_frame(
        &mut self,
        index: usize,
        points_per_second: u32,
        flags: FrameFlags,
        points: &[BeamPoint],
    ) -> Result<(), DeviceError>;

    /// Stops and blanks the output.
    fn stop(&mut self, _index: usize) -> Result<(), DeviceError> {
        Ok(())
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        Ok(())
    }

    fn name(&self, index: usize) -> String;
}

/// Polls `status` until the device is ready, giving up after `timeout`.
pub fn wait_until_ready(
    device: &mut dyn LaserDevice,
    index: usize,
    timeout: Duration,
) -> Result<(), DeviceError> {
    let started = Instant::now();
    loop {
        match device.status(index)? {
            DeviceStatus::Ready => return Ok(()),
            DeviceStatus::Failed => return Err(DeviceError::Communication { index }),
            DeviceStatus::Busy => {}
        }

        let waited = started.elapsed();
        if waited >= timeout {
            debug!("Device {} still busy after {:?}", index, waited);
            return Err(DeviceError::NotReady { index, waited });
        }
        thread::sleep(POLL_INTERVAL.min(timeout - waited));
    }
}

/// Emulates a DAC that is busy while it scans out the last frame it was given.
#[derive(Debug, Clone, Default)]
pub struct ScanTimer {
    busy_until: Option<Instant>,
}

impl ScanTimer {
    pub fn start(&mut self, point_count: usize, points_per_second: u32) {
        let seconds = point_count as f64 / points_per_second.max(1) as f64;
        self.busy_until = Some(Instant::now() + Duration::from_secs_f64(seconds));
    }

    pub fn is_busy(&self) -> bool {
        self.busy_until
            .map_or(false, |until| Instant::now() < until)
    }

    pub fn clear(&mut self) {
        self.busy_until = None;
    }
}
