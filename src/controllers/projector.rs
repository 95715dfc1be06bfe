// src/controllers/projector.rs
// The projection loop: compose a frame when the second changes and keep
// re-sending it to the device until the next second comes round.

use log::{error, info, warn};
use std::time::Duration;

use super::device::{wait_until_ready, DeviceError, FrameFlags, LaserDevice};
use super::osc_controller::{apply_commands, OscController};
use crate::config::{DeviceConfig, RenderConfig};
use crate::render::{Frame, FrameComposer};
use crate::services::Clock;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectorStats {
    pub frames_composed: u64,
    pub transmissions: u64,
    pub ready_timeouts: u64,
}

pub struct Projector {
    device: Box<dyn LaserDevice>,
    clock: Box<dyn Clock>,
    composer: FrameComposer,
    controller: Option<OscController>,
    render: RenderConfig,
    device_index: usize,
    points_per_second: u32,
    flags: FrameFlags,
    ready_timeout: Duration,
    stats: ProjectorStats,
}

impl Projector {
    pub fn new(
        device: Box<dyn LaserDevice>,
        clock: Box<dyn Clock>,
        render: RenderConfig,
        device_config: &DeviceConfig,
    ) -> Self {
        Self {
            device,
            clock,
            composer: FrameComposer::new(),
            controller: None,
            render,
            device_index: 0,
            points_per_second: device_config.points_per_second,
            flags: FrameFlags::from_bits(device_config.frame_flags),
            ready_timeout: Duration::from_millis(device_config.ready_timeout_ms),
            stats: ProjectorStats::default(),
        }
    }

    pub fn with_controller(mut self, controller: OscController) -> Self {
        self.controller = Some(controller);
        self
    }

    /// Projects until `keep_running` returns false. It is asked before every
    /// transmission with the frame about to be sent.
    ///
    /// Finding no device is fatal. A device that stays busy past the ready
    /// timeout is logged and retried; a device reporting failure ends the loop.
    /// The device is stopped and closed however the loop ends.
    pub fn run_until<F>(&mut self, mut keep_running: F) -> Result<ProjectorStats, DeviceError>
    where
        F: FnMut(&Frame) -> bool,
    {
        let count = self.device.open_devices()?;
        if count < 1 {
            return Err(DeviceError::NoDevices);
        }
        info!(
            "Found {} device(s), projecting on {}",
            count,
            self.device.name(self.device_index)
        );

        let result = self.project(&mut keep_running);

        if let Err(e) = self.device.stop(self.device_index) {
            warn!("Failed to stop device: {}", e);
        }
        if let Err(e) = self.device.close() {
            warn!("Failed to close device: {}", e);
        }

        result.map(|_| self.stats)
    }

    fn project<F>(&mut self, keep_running: &mut F) -> Result<(), DeviceError>
    where
        F: FnMut(&Frame) -> bool,
    {
        loop {
            if let Some(controller) = self.controller.as_mut() {
                controller.process_messages();
                apply_commands(&mut self.render, controller.take_commands());
            }

            let shown = self.clock.now();
            let frame = self.composer.compose(&self.render, shown);
            self.stats.frames_composed += 1;
            info!("now: {} ({} points)", shown, frame.len());
            if frame.truncated {
                warn!(
                    "Frame truncated at {} points. Increase divider or reduce dwell.",
                    frame.len()
                );
            }

            loop {
                if !keep_running(&frame) {
                    return Ok(());
                }
                self.transmit(&frame)?;
                if self.clock.now() != shown {
                    break;
                }
            }
        }
    }

    fn transmit(&mut self, frame: &Frame) -> Result<(), DeviceError> {
        match wait_until_ready(self.device.as_mut(), self.device_index, self.ready_timeout) {
            Ok(()) => {}
            Err(e) if e.is_recoverable() => {
                warn!("{}", e);
                self.stats.ready_timeouts += 1;
                return Ok(());
            }
            Err(e) => {
                error!("{}", e);
                return Err(e);
            }
        }

        self.device.write_frame(
            self.device_index,
            self.points_per_second,
            self.flags,
            &frame.points,
        )?;
        self.stats.transmissions += 1;
        Ok(())
    }

    pub fn stats(&self) -> ProjectorStats {
        self.stats
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::device::DeviceStatus;
    use crate::models::{BeamPoint, TimeOfDay};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    #[derive(Default)]
    struct Log {
        writes: Vec<(u32, u8, Vec<BeamPoint>)>,
        stopped: bool,
        closed: bool,
    }

    struct FakeDevice {
        count: usize,
        statuses: Vec<DeviceStatus>,
        polls: usize,
        log: Rc<RefCell<Log>>,
    }

    impl FakeDevice {
        fn boxed(count: usize, statuses: Vec<DeviceStatus>) -> (Box<Self>, Rc<RefCell<Log>>) {
            let log = Rc::new(RefCell::new(Log::default()));
            let device = FakeDevice {
                count,
                statuses,
                polls: 0,
                log: log.clone(),
            };
            (Box::new(device), log)
        }
    }

    impl LaserDevice for FakeDevice {
        fn open_devices(&mut self) -> Result<usize, DeviceError> {
            Ok(self.count)
        }

        fn status(&mut self, _index: usize) -> Result<DeviceStatus, DeviceError> {
            let status = self
                .statuses
                .get(self.polls)
                .copied()
                .unwrap_or(DeviceStatus::Ready);
            self.polls += 1;
            Ok(status)
        }

        fn write_frame(
            &mut self,
            _index: usize,
            points_per_second: u32,
            flags: FrameFlags,
            points: &[BeamPoint],
        ) -> Result<(), DeviceError> {
            self.log
                .borrow_mut()
                .writes
                .push((points_per_second, flags.bits(), points.to_vec()));
            Ok(())
        }

        fn stop(&mut self, _index: usize) -> Result<(), DeviceError> {
            self.log.borrow_mut().stopped = true;
            Ok(())
        }

        fn close(&mut self) -> Result<(), DeviceError> {
            self.log.borrow_mut().closed = true;
            Ok(())
        }

        fn name(&self, _index: usize) -> String {
            "fake".to_string()
        }
    }

    /// Advances one second every `reads_per_second` reads.
    struct TickingClock {
        reads: Cell<u32>,
        reads_per_second: u32,
    }

    impl Clock for TickingClock {
        fn now(&self) -> TimeOfDay {
            let reads = self.reads.get();
            self.reads.set(reads + 1);
            let second = (reads / self.reads_per_second) % 60;
            TimeOfDay::new(12, 0, second as u8).unwrap()
        }
    }

    fn ticking(reads_per_second: u32) -> Box<TickingClock> {
        Box::new(TickingClock {
            reads: Cell::new(0),
            reads_per_second,
        })
    }

    fn device_config() -> DeviceConfig {
        DeviceConfig {
            ready_timeout_ms: 5,
            frame_flags: 0b01,
            ..DeviceConfig::default()
        }
    }

    #[test]
    fn test_no_devices_is_fatal() {
        let (device, log) = FakeDevice::boxed(0, vec![]);
        let mut projector =
            Projector::new(device, ticking(4), RenderConfig::default(), &device_config());

        let result = projector.run_until(|_| true);
        assert!(matches!(result, Err(DeviceError::NoDevices)));
        assert!(log.borrow().writes.is_empty());
    }

    #[test]
    fn test_resends_frame_until_second_changes() {
        let (device, log) = FakeDevice::boxed(1, vec![]);
        let mut projector =
            Projector::new(device, ticking(4), RenderConfig::default(), &device_config());

        let mut shown = Vec::new();
        let stats = projector
            .run_until(|frame| {
                shown.push(frame.time.second);
                shown.len() < 7
            })
            .unwrap();

        // reads 0 (compose) 1 2 3 stay on second 0, read 4 moves on
        assert_eq!(stats.frames_composed, 2);
        assert_eq!(stats.transmissions, 6);
        assert_eq!(shown, vec![0, 0, 0, 0, 1, 1, 1]);

        let log = log.borrow();
        assert!(log.stopped);
        assert!(log.closed);
        assert_eq!(log.writes[0].0, 30000);
        assert_eq!(log.writes[0].1, 0b01);
        assert_eq!(log.writes[0].2, log.writes[3].2);
        assert_ne!(log.writes[3].2, log.writes[4].2);
    }

    #[test]
    fn test_ready_timeout_is_recoverable() {
        let (device, log) = FakeDevice::boxed(1, vec![DeviceStatus::Busy; 10_000]);
        let mut projector =
            Projector::new(device, ticking(1000), RenderConfig::default(), &device_config());

        let mut calls = 0;
        let stats = projector
            .run_until(|_| {
                calls += 1;
                calls <= 2
            })
            .unwrap();

        assert!(stats.ready_timeouts >= 1);
        assert!(stats.ready_timeouts + stats.transmissions == 2);
        assert!(log.borrow().stopped);
    }

    #[test]
    fn test_device_failure_ends_loop() {
        let (device, log) = FakeDevice::boxed(1, vec![DeviceStatus::Failed]);
        let mut projector =
            Projector::new(device, ticking(1000), RenderConfig::default(), &device_config());

        let result = projector.run_until(|_| true);
        assert!(matches!(result, Err(DeviceError::Communication { index: 0 })));
        assert!(log.borrow().closed);
    }
}
