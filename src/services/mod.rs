pub mod clock;
pub mod frame_recorder;

pub use clock::{Clock, FixedClock, SystemClock};
pub use frame_recorder::{FrameRecord, FrameRecorder, RecordError};
