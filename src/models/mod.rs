pub mod beam_point;
pub mod laser_color;
pub mod point_buffer;
pub mod time_of_day;

pub use beam_point::{BeamPoint, COORD_MAX, FULL_INTENSITY};
pub use laser_color::LaserColor;
pub use point_buffer::{Emit, PointBuffer, MAX_POINTS};
pub use time_of_day::TimeOfDay;
