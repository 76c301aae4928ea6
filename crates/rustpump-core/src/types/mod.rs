pub mod family;
pub mod insulin;
pub mod stroke_table;
pub mod time_of_day;

pub use family::{DeviceFamily, Generation};
pub use insulin::{Insulin, MAX_BOLUS};
pub use stroke_table::StrokeTable;
pub use time_of_day::{half_hours, TimeOfDay};
