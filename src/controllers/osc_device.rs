// src/controllers/osc_device.rs
// Streams frames over OSC to a networked laser bridge

use log::info;
use nannou_osc as osc;

use super::device::{DeviceError, DeviceStatus, FrameFlags, LaserDevice, ScanTimer};
use crate::models::BeamPoint;

pub const FRAME_ADDR: &str = "/laser/frame";
pub const STOP_ADDR: &str = "/laser/stop";

/// Builds the `/laser/frame` message: points per second, flags, and the
/// points packed 8 bytes each into a blob.
pub fn frame_message(
    points_per_second: u32,
    flags: FrameFlags,
    points: &[BeamPoint],
) -> (String, Vec<osc::Type>) {
    let blob: Vec<u8> = points.iter().flat_map(|p| p.to_bytes()).collect();
    let args = vec![
        osc::Type::Int(points_per_second as i32),
        osc::Type::Int(flags.bits() as i32),
        osc::Type::Blob(blob),
    ];
    (FRAME_ADDR.to_string(), args)
}

/// A single OSC target, presented as device 0. It reports busy for as long
/// as the bridge needs to scan out the previous frame.
pub struct OscDevice {
    sender: Option<osc::Sender>,
    target_addr: String,
    target_port: u16,
    scan: ScanTimer,
}

impl OscDevice {
    pub fn new(target_addr: &str, target_port: u16) -> Self {
        Self {
            sender: None,
            target_addr: target_addr.to_string(),
            target_port,
            scan: ScanTimer::default(),
        }
    }

    fn check_index(index: usize) -> Result<(), DeviceError> {
        if index == 0 {
            Ok(())
        } else {
            Err(DeviceError::InvalidIndex(index))
        }
    }

    fn send(&self, packet: (String, Vec<osc::Type>)) -> Result<(), DeviceError> {
        let sender = self.sender.as_ref().ok_or(DeviceError::NotOpen)?;
        sender
            .send(packet, (self.target_addr.as_str(), self.target_port))
            .map(|_| ())
            .map_err(|e| DeviceError::Osc(e.to_string()))
    }
}

impl LaserDevice for OscDevice {
    fn open_devices(&mut self) -> Result<usize, DeviceError> {
        self.sender = Some(osc::sender()?);
        info!(
            "Sending frames to {}:{}",
            self.target_addr, self.target_port
        );
        Ok(1)
    }

    fn status(&mut self, index: usize) -> Result<DeviceStatus, DeviceError> {
        Self::check_index(index)?;
        if self.sender.is_none() {
            return Err(DeviceError::NotOpen);
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
        Self::check_index(index)?;
        self.send(frame_message(points_per_second, flags, points))?;
        self.scan.start(points.len(), points_per_second);
        Ok(())
    }

    fn stop(&mut self, index: usize) -> Result<(), DeviceError> {
        Self::check_index(index)?;
        self.scan.clear();
        self.send((STOP_ADDR.to_string(), Vec::new()))
    }

    fn close(&mut self) -> Result<(), DeviceError> {
        self.sender = None;
        Ok(())
    }

    fn name(&self, index: usize) -> String {
        format!("osc://{}:{}/{}", self.target_addr, self.target_port, index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FULL_INTENSITY;

    #[test]
    fn test_frame_message_layout() {
        let points = [
            BeamPoint {
                x: 1,
                y: 2,
                r: 255,
                g: 0,
                b: 0,
                i: FULL_INTENSITY,
            },
            BeamPoint {
                x: 4095,
                y: 0,
                r: 0,
                g: 0,
                b: 0,
                i: FULL_INTENSITY,
            },
        ];
        let (addr, args) = frame_message(30000, FrameFlags::SINGLE_MODE, &points);

        assert_eq!(addr, FRAME_ADDR);
        assert_eq!(args[0], osc::Type::Int(30000));
        assert_eq!(args[1], osc::Type::Int(2));
        match &args[2] {
            osc::Type::Blob(bytes) => {
                assert_eq!(bytes.len(), 16);
                assert_eq!(&bytes[..8], &points[0].to_bytes());
                assert_eq!(&bytes[8..10], &[0xFF, 0x0F]);
            }
            other => panic!("expected blob, got {:?}", other),
        }
    }

    #[test]
    fn test_unopened_device() {
        let mut device = OscDevice::new("127.0.0.1", 9000);
        assert!(matches!(device.status(0), Err(DeviceError::NotOpen)));
        assert!(matches!(device.status(1), Err(DeviceError::InvalidIndex(1))));
        assert!(matches!(
            device.write_frame(0, 30000, FrameFlags::NONE, &[]),
            Err(DeviceError::NotOpen)
        ));
        assert_eq!(device.name(0), "osc://127.0.0.1:9000/0");
    }
}
