mod entity;
mod reading;
mod sensor_type;
mod status;

pub use entity::{ACCURACY_DECAY_PER_DAY, Sensor};
pub use reading::SensorReading;
pub use sensor_type::SensorType;
pub use status::SensorStatus;
