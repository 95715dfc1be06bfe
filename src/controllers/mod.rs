pub mod device;
pub mod dump_device;
pub mod osc_controller;
pub mod osc_device;
pub mod projector;

pub use device::{wait_until_ready, DeviceError, DeviceStatus, FrameFlags, LaserDevice};
pub use dump_device::DumpDevice;
pub use osc_controller::{OscCommand, OscController};
pub use osc_device::OscDevice;
pub use projector::{Projector, ProjectorStats};
