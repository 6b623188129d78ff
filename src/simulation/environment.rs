//! # Room Environment Orchestrator
//!
//! Owns the pieces the climate reducer needs between ticks: the per-point
//! state, the device state the user controls, and the outside conditions
//! the weather provider delivers. One timer loop drives `tick`; everything
//! else mutates through setters so there is exactly one writer per field.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::climate::{self, ClimateConfig, ClimateState};
use crate::domain::{DeviceState, OutsideConditions, RoomScalars, SensorReading};

/// Room environment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// Climate reducer coefficients
    pub climate: ClimateConfig,
    /// Device state at startup
    pub initial_devices: DeviceState,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            climate: ClimateConfig::default(),
            initial_devices: DeviceState::default(),
        }
    }
}

impl RoomConfig {
    /// Set the number of monitored points
    pub fn with_point_count(mut self, count: usize) -> Self {
        self.climate = self.climate.with_point_count(count);
        self
    }

    /// Set the startup device state
    pub fn with_devices(mut self, devices: DeviceState) -> Self {
        self.initial_devices = devices;
        self
    }
}

/// Serializable aggregate of the whole room at one instant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSnapshot {
    /// Per-point readings with room scalars fanned out
    pub sensors: Vec<SensorReading>,
    /// Cross-point average temperature in °C
    pub average_temperature: f64,
    /// Room-wide CO2 / humidity / light
    pub scalars: RoomScalars,
    /// Current device state
    pub devices: DeviceState,
    /// Current outside conditions
    pub outside: OutsideConditions,
    /// Ticks elapsed since startup or last re-baseline
    pub tick_count: u64,
    /// Snapshot timestamp
    pub timestamp: DateTime<Utc>,
}

/// Simulated room driven by a single timer loop
pub struct RoomEnvironment {
    config: RoomConfig,
    state: ClimateState,
    devices: DeviceState,
    outside: OutsideConditions,
    tick_count: u64,
}

impl RoomEnvironment {
    pub fn new(config: RoomConfig) -> Self {
        let outside = OutsideConditions::default();
        let state = ClimateState::baseline(
            &config.climate,
            &outside,
            config.initial_devices.window_openness,
        );
        let devices = config.initial_devices;
        Self {
            config,
            state,
            devices,
            outside,
            tick_count: 0,
        }
    }

    pub fn devices(&self) -> DeviceState {
        self.devices
    }

    pub fn outside(&self) -> OutsideConditions {
        self.outside
    }

    pub fn average_temperature(&self) -> f64 {
        self.state.average_temperature()
    }

    pub fn scalars(&self) -> RoomScalars {
        self.state.scalars
    }

    /// Replace the device state
    ///
    /// Window openness feeds the next tick directly; no re-baseline happens
    /// on device changes.
    pub fn set_devices(&mut self, devices: DeviceState) {
        self.devices = devices;
    }

    /// Install fresh outside conditions and re-baseline the indoor state
    ///
    /// Any outside change (weather refresh, day/night flip) restarts the
    /// indoor transient from the new equilibrium.
    pub fn apply_weather(&mut self, outside: OutsideConditions) {
        self.outside = outside;
        self.state = ClimateState::baseline(
            &self.config.climate,
            &self.outside,
            self.devices.window_openness,
        );
        self.tick_count = 0;
    }

    /// Advance the simulation by one tick
    pub fn tick(&mut self) {
        self.state = climate::step(&self.config.climate, &self.state, &self.devices, &self.outside);
        self.tick_count += 1;
    }

    /// Current complete room snapshot
    pub fn snapshot(&self) -> RoomSnapshot {
        RoomSnapshot {
            sensors: self.state.sensor_readings(),
            average_temperature: self.state.average_temperature(),
            scalars: self.state.scalars,
            devices: self.devices,
            outside: self.outside,
            tick_count: self.tick_count,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{TimeOfDay, WindDirection};

    #[test]
    fn test_environment_initialization() {
        let room = RoomEnvironment::new(RoomConfig::default());
        let snapshot = room.snapshot();

        assert_eq!(snapshot.sensors.len(), 3);
        assert_eq!(snapshot.tick_count, 0);
        assert_eq!(snapshot.scalars.co2, 400.0);
    }

    #[test]
    fn test_tick_advances_count() {
        let mut room = RoomEnvironment::new(RoomConfig::default());
        room.tick();
        room.tick();
        assert_eq!(room.snapshot().tick_count, 2);
    }

    #[test]
    fn test_apply_weather_rebaselines() {
        let mut room = RoomEnvironment::new(RoomConfig::default());
        let mut devices = room.devices();
        devices.occupant_count = 5;
        room.set_devices(devices);
        for _ in 0..50 {
            room.tick();
        }
        assert!(room.scalars().co2 > 400.0);

        let outside = OutsideConditions {
            temperature: 12.0,
            humidity: 70.0,
            wind_speed: 3.0,
            wind_direction: WindDirection::E,
            time_of_day: TimeOfDay::Day,
        };
        room.apply_weather(outside);

        let snapshot = room.snapshot();
        assert_eq!(snapshot.tick_count, 0);
        assert_eq!(snapshot.scalars.co2, 400.0);
        assert!((snapshot.average_temperature - 12.0).abs() < f64::EPSILON);
        assert!((snapshot.scalars.humidity - 70.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_bounds_hold_under_extreme_devices() {
        let mut room = RoomEnvironment::new(RoomConfig::default());
        room.set_devices(DeviceState {
            heater_on: true,
            heater_power: 1.0,
            ac_on: false,
            window_openness: 0.0,
            lights_on: true,
            occupant_count: 50,
        });

        for _ in 0..2000 {
            room.tick();
        }

        let snapshot = room.snapshot();
        assert!(snapshot.sensors.iter().all(|s| s.temperature <= 50.0));
        assert!(snapshot.scalars.co2 <= 5000.0);
        assert!(snapshot.scalars.humidity <= 90.0);
        assert!(snapshot.scalars.light_level <= 1.0);
    }
}
