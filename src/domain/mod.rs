pub mod advisory;
pub mod types;

pub use advisory::Advisory;
pub use types::{
    DeviceState, IdealTargets, OutsideConditions, RoomScalars, SensorReading, TimeOfDay,
    WindDirection,
};
