// src/controllers/dump_device.rs
// A device that records frames to disk instead of projecting them

use std::path::Path;

use super::device::{DeviceError, DeviceStatus, FrameFlags, LaserDevice, ScanTimer};
use crate::models::BeamPoint;
use crate::services::FrameRecorder;

pub struct DumpDevice {
    recorder: FrameRecorder,
    scan: ScanTimer,
}

impl DumpDevice {
    pub fn new(output_dir: &Path, frame_limit: u32) -> Result<Self, DeviceError> {
        Ok(Self {
            recorder: FrameRecorder::new(output_dir, frame_limit)?,
            scan: ScanTimer::default(),
        })
    }
}

impl LaserDevice for DumpDevice {
    fn open_devices(&mut self) -> Result<usize, DeviceError> {
        Ok(1)
    }

    fn status(&mut self, index: usize) -> Result<DeviceStatus, DeviceError> {
        if index != 0 {
            return Err(DeviceError::InvalidIndex(index));
        }
        Ok(if self.scan.is_busy() {
            DeviceStatus::Busy
        } else {
            DeviceStatus::Ready
        })
    }

    fn write_frame(
        &mut self,
        index: usize,
        points_per_second: u32,
        flags: FrameFlags,
        points: &[BeamPoint],
    ) -> Result<(), DeviceError> {
        if index != 0 {
            return Err(DeviceError::InvalidIndex(index));
        }
        self.recorder.record(points_per_second, flags.bits(), points)?;
        self.scan.start(points.len(), points_per_second);
        Ok(())
    }

    fn name(&self, _index: usize) -> String {
        "frame dump".to_string()
    }
}
