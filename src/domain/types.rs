//! # Core Domain Types
//!
//! Shared value types for the room-climate simulation: per-point sensor
//! readings, room-wide scalars, device states, outside conditions and
//! ideal targets. All numeric fields are kept inside fixed clamp ranges
//! by the simulation; nothing here is persisted.

use serde::{Deserialize, Serialize};
use std::fmt;
use strum_macros::{Display, EnumIter, EnumString};

/// Clamp range for indoor temperature in °C
pub const TEMPERATURE_RANGE_C: (f64, f64) = (-10.0, 50.0);
/// Clamp range for room CO2 in ppm
pub const CO2_RANGE_PPM: (f64, f64) = (400.0, 5000.0);
/// Clamp range for relative humidity in %
pub const HUMIDITY_RANGE_PCT: (f64, f64) = (10.0, 90.0);
/// Clamp range for normalized light level
pub const LIGHT_RANGE: (f64, f64) = (0.01, 1.0);

/// Clamp a value into an inclusive range
pub fn clamp(value: f64, range: (f64, f64)) -> f64 {
    value.max(range.0).min(range.1)
}

/// One monitored point in the room
///
/// Temperature is the only spatially resolved field; CO2, humidity and
/// light are room-wide scalars mirrored into each reading for consumers
/// that want a per-sensor shape.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorReading {
    /// Temperature at this point in °C
    pub temperature: f64,
    /// Room CO2 in ppm (room-wide)
    pub co2: f64,
    /// Relative humidity in % (room-wide)
    pub humidity: f64,
    /// Normalized light level [0, 1] (room-wide)
    pub light_level: f64,
}

/// Room-wide scalar conditions
///
/// Stored once per room and fanned out into per-point records only at
/// snapshot time; no sensor carries an independent copy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomScalars {
    /// Room CO2 in ppm
    pub co2: f64,
    /// Relative humidity in %
    pub humidity: f64,
    /// Normalized light level [0, 1]
    pub light_level: f64,
}

/// User-controlled device state
///
/// Read by the simulation tick every step; lives as long as the process.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceState {
    /// Heater on/off
    pub heater_on: bool,
    /// Heater power fraction [0, 1]
    pub heater_power: f64,
    /// Air conditioning on/off
    pub ac_on: bool,
    /// Window openness fraction [0, 1]
    pub window_openness: f64,
    /// Ceiling lights on/off
    pub lights_on: bool,
    /// Number of occupants in the room
    pub occupant_count: u32,
}

impl Default for DeviceState {
    fn default() -> Self {
        Self {
            heater_on: false,
            heater_power: 0.5,
            ac_on: false,
            window_openness: 0.0,
            lights_on: false,
            occupant_count: 1,
        }
    }
}

/// 8-point compass direction for simulated wind
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum WindDirection {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

/// Coarse day/night phase driving the daylight baseline
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum TimeOfDay {
    Day,
    Night,
}

impl TimeOfDay {
    pub fn is_day(&self) -> bool {
        matches!(self, TimeOfDay::Day)
    }
}

/// Exogenous weather-like inputs
///
/// Refreshed by the weather provider on demand; read-only input to the
/// simulation via the window-openness coupling term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OutsideConditions {
    /// Outside temperature in °C
    pub temperature: f64,
    /// Outside relative humidity in %
    pub humidity: f64,
    /// Wind speed in m/s
    pub wind_speed: f64,
    /// Wind direction
    pub wind_direction: WindDirection,
    /// Day/night phase
    pub time_of_day: TimeOfDay,
}

impl Default for OutsideConditions {
    fn default() -> Self {
        Self {
            temperature: 15.0,
            humidity: 60.0,
            wind_speed: 2.5,
            wind_direction: WindDirection::NW,
            time_of_day: TimeOfDay::Day,
        }
    }
}

impl fmt::Display for OutsideConditions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:.1}°C, {:.0}% Hum, Wind {:.1}m/s {} ({})",
            self.temperature, self.humidity, self.wind_speed, self.wind_direction, self.time_of_day
        )
    }
}

/// User-configured setpoints
///
/// Compared against simulated aggregates to produce advisory text; never
/// enforced automatically.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IdealTargets {
    /// Target temperature in °C
    pub temperature: f64,
    /// Target humidity in %
    pub humidity: f64,
    /// Target CO2 in ppm
    pub co2: f64,
    /// Target light level [0, 1]
    pub light_level: f64,
}

impl Default for IdealTargets {
    fn default() -> Self {
        Self {
            temperature: 22.0,
            humidity: 50.0,
            co2: 600.0,
            light_level: 0.7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(clamp(-20.0, TEMPERATURE_RANGE_C), -10.0);
        assert_eq!(clamp(60.0, TEMPERATURE_RANGE_C), 50.0);
        assert_eq!(clamp(21.5, TEMPERATURE_RANGE_C), 21.5);
        assert_eq!(clamp(0.0, CO2_RANGE_PPM), 400.0);
        assert_eq!(clamp(0.0, LIGHT_RANGE), 0.01);
    }

    #[test]
    fn test_wind_direction_round_trip() {
        assert_eq!(WindDirection::NE.to_string(), "NE");
        assert_eq!(WindDirection::from_str("SW").unwrap(), WindDirection::SW);
    }

    #[test]
    fn test_default_devices_are_idle() {
        let devices = DeviceState::default();
        assert!(!devices.heater_on);
        assert!(!devices.ac_on);
        assert_eq!(devices.window_openness, 0.0);
    }
}
