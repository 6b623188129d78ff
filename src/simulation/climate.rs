//! # Room Climate Reducer
//!
//! The per-tick state transition for simulated indoor climate. Given the
//! current per-point state, device state and outside conditions, `step`
//! produces the next state. The reducer is pure: no clock, no RNG, no
//! shared state, which keeps it testable without any runtime attached.
//!
//! Temperature is resolved per monitored point and smoothed toward the
//! cross-point average; CO2, humidity and light are room-wide scalars
//! (see `RoomScalars`). All outputs are clamped, never rejected: the only
//! failure policy in this module is clamp-don't-crash.

use serde::{Deserialize, Serialize};

use crate::domain::types::{
    clamp, CO2_RANGE_PPM, HUMIDITY_RANGE_PCT, LIGHT_RANGE, TEMPERATURE_RANGE_C,
};
use crate::domain::{DeviceState, OutsideConditions, RoomScalars, SensorReading};

/// Climate reducer coefficients
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Number of monitored points in the room
    pub point_count: usize,
    /// Sensible heat emitted per occupant in watts
    pub heat_per_person_watts: f64,
    /// Conversion from occupant watts to °C per tick
    pub occupant_heat_factor: f64,
    /// Temperature gained per tick at full heater power in °C
    pub heater_gain_c: f64,
    /// Temperature removed per tick while the AC runs in °C
    pub ac_cooling_c: f64,
    /// Fraction of the indoor/outdoor temperature gap mixed in per tick
    /// at full window openness
    pub window_mixing_rate: f64,
    /// Weight kept on a point's own temperature when blending with the
    /// cross-point average (the remainder goes to the average)
    pub spatial_blend: f64,
    /// CO2 exhaled per occupant in percent-volume per hour
    pub co2_per_person_per_hour: f64,
    /// Conversion from percent-volume per second to ppm per tick
    pub co2_ppm_scale: f64,
    /// Fraction of the above-baseline CO2 purged per tick at full
    /// window openness
    pub co2_purge_rate: f64,
    /// Fraction of the indoor/outdoor humidity gap mixed in per tick at
    /// full window openness
    pub humidity_mixing_rate: f64,
    /// Humidity added per occupant per tick with the window closed, in %
    pub humidity_per_person: f64,
    /// Light level added while the ceiling lights are on
    pub lights_boost: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        Self {
            point_count: 3,
            heat_per_person_watts: 80.0,
            occupant_heat_factor: 0.000_05,
            heater_gain_c: 0.2,
            ac_cooling_c: 0.15,
            window_mixing_rate: 0.05,
            spatial_blend: 0.95,
            co2_per_person_per_hour: 0.02,
            co2_ppm_scale: 100_000.0,
            co2_purge_rate: 0.15,
            humidity_mixing_rate: 0.05,
            humidity_per_person: 0.01,
            lights_boost: 0.5,
        }
    }
}

impl ClimateConfig {
    /// Set the number of monitored points
    pub fn with_point_count(mut self, count: usize) -> Self {
        self.point_count = count.max(1);
        self
    }
}

/// Complete climate state between ticks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateState {
    /// Per-point temperatures in °C
    pub point_temperatures: Vec<f64>,
    /// Room-wide CO2 / humidity / light
    pub scalars: RoomScalars,
}

impl ClimateState {
    /// Derive a fresh baseline from the current outside conditions
    ///
    /// Used at startup, after a weather refresh, and as the recovery path
    /// when the per-point vector is malformed.
    pub fn baseline(config: &ClimateConfig, outside: &OutsideConditions, window_openness: f64) -> Self {
        Self {
            point_temperatures: vec![outside.temperature; config.point_count],
            scalars: RoomScalars {
                co2: CO2_RANGE_PPM.0,
                humidity: clamp(outside.humidity, HUMIDITY_RANGE_PCT),
                light_level: daylight_baseline(outside, window_openness),
            },
        }
    }

    /// Average temperature across all points
    pub fn average_temperature(&self) -> f64 {
        if self.point_temperatures.is_empty() {
            return 0.0;
        }
        self.point_temperatures.iter().sum::<f64>() / self.point_temperatures.len() as f64
    }

    /// Fan the room scalars out into per-point sensor readings
    pub fn sensor_readings(&self) -> Vec<SensorReading> {
        self.point_temperatures
            .iter()
            .map(|&temperature| SensorReading {
                temperature,
                co2: self.scalars.co2,
                humidity: self.scalars.humidity,
                light_level: self.scalars.light_level,
            })
            .collect()
    }
}

/// Daylight light-level baseline before the lamp boost
fn daylight_baseline(outside: &OutsideConditions, window_openness: f64) -> f64 {
    let raw = if outside.time_of_day.is_day() {
        0.5 + window_openness * 0.5
    } else {
        0.05 + window_openness * 0.1
    };
    clamp(raw, LIGHT_RANGE)
}

/// Advance the climate by one tick
///
/// If the per-point vector does not match the configured point count the
/// state is replaced with a baseline derived from the outside conditions
/// before stepping; the tick itself always succeeds.
pub fn step(
    config: &ClimateConfig,
    state: &ClimateState,
    devices: &DeviceState,
    outside: &OutsideConditions,
) -> ClimateState {
    let state = if state.point_temperatures.len() == config.point_count {
        state.clone()
    } else {
        tracing::warn!(
            got = state.point_temperatures.len(),
            expected = config.point_count,
            "per-point state malformed, resetting to baseline"
        );
        ClimateState::baseline(config, outside, devices.window_openness)
    };

    let previous_average = state.average_temperature();
    let occupant_heat = devices.occupant_count as f64
        * config.heat_per_person_watts
        * config.occupant_heat_factor
        / config.point_count as f64;
    let heater_gain = if devices.heater_on {
        devices.heater_power * config.heater_gain_c
    } else {
        0.0
    };
    let ac_loss = if devices.ac_on { config.ac_cooling_c } else { 0.0 };

    let point_temperatures = state
        .point_temperatures
        .iter()
        .map(|&t| {
            let mut next = t + occupant_heat + heater_gain - ac_loss;
            next += (outside.temperature - next) * devices.window_openness * config.window_mixing_rate;
            next = next * config.spatial_blend + previous_average * (1.0 - config.spatial_blend);
            clamp(next, TEMPERATURE_RANGE_C)
        })
        .collect();

    let mut co2 = state.scalars.co2;
    co2 += devices.occupant_count as f64 * config.co2_per_person_per_hour / 3600.0
        * config.co2_ppm_scale;
    co2 -= (co2 - CO2_RANGE_PPM.0) * devices.window_openness * config.co2_purge_rate;
    let co2 = clamp(co2, CO2_RANGE_PPM);

    let mut humidity = state.scalars.humidity;
    humidity += (outside.humidity - humidity) * devices.window_openness * config.humidity_mixing_rate;
    humidity += devices.occupant_count as f64
        * config.humidity_per_person
        * (1.0 - devices.window_openness);
    let humidity = clamp(humidity, HUMIDITY_RANGE_PCT);

    let mut light_level = daylight_baseline(outside, devices.window_openness);
    if devices.lights_on {
        light_level += config.lights_boost;
    }
    let light_level = clamp(light_level, LIGHT_RANGE);

    ClimateState {
        point_temperatures,
        scalars: RoomScalars {
            co2,
            humidity,
            light_level,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TimeOfDay;

    fn quiet_devices() -> DeviceState {
        DeviceState {
            heater_on: false,
            heater_power: 0.5,
            ac_on: false,
            window_openness: 0.0,
            lights_on: false,
            occupant_count: 0,
        }
    }

    #[test]
    fn test_baseline_matches_outside() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let state = ClimateState::baseline(&config, &outside, 0.0);

        assert_eq!(state.point_temperatures.len(), 3);
        assert!(state
            .point_temperatures
            .iter()
            .all(|&t| (t - outside.temperature).abs() < f64::EPSILON));
        assert_eq!(state.scalars.co2, 400.0);
        assert_eq!(state.scalars.humidity, outside.humidity);
    }

    #[test]
    fn test_zero_input_is_stable() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let devices = quiet_devices();

        let mut state = ClimateState::baseline(&config, &outside, 0.0);
        let initial_avg = state.average_temperature();

        for _ in 0..100 {
            state = step(&config, &state, &devices, &outside);
        }

        assert!((state.average_temperature() - initial_avg).abs() < 1e-6);
        assert!((state.scalars.co2 - 400.0).abs() < 1e-6);
        assert!((state.scalars.humidity - outside.humidity).abs() < 1e-6);
    }

    #[test]
    fn test_heater_raises_temperature() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let mut devices = quiet_devices();
        devices.heater_on = true;
        devices.heater_power = 1.0;

        let state = ClimateState::baseline(&config, &outside, 0.0);
        let next = step(&config, &state, &devices, &outside);

        assert!(next.average_temperature() > state.average_temperature());
    }

    #[test]
    fn test_ac_lowers_temperature() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let mut devices = quiet_devices();
        devices.ac_on = true;

        let state = ClimateState::baseline(&config, &outside, 0.0);
        let next = step(&config, &state, &devices, &outside);

        assert!(next.average_temperature() < state.average_temperature());
    }

    #[test]
    fn test_open_window_pulls_toward_outside() {
        let config = ClimateConfig::default();
        let mut outside = OutsideConditions::default();
        outside.temperature = 5.0;
        let mut devices = quiet_devices();
        devices.window_openness = 1.0;

        let mut state = ClimateState::baseline(&config, &outside, 1.0);
        state.point_temperatures = vec![25.0; 3];

        let next = step(&config, &state, &devices, &outside);
        assert!(next.average_temperature() < 25.0);
    }

    #[test]
    fn test_co2_accumulates_monotonically_with_window_closed() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let mut devices = quiet_devices();
        devices.occupant_count = 4;

        let mut state = ClimateState::baseline(&config, &outside, 0.0);
        let mut previous = state.scalars.co2;
        for _ in 0..3000 {
            state = step(&config, &state, &devices, &outside);
            assert!(state.scalars.co2 >= previous);
            previous = state.scalars.co2;
        }
        assert_eq!(state.scalars.co2, 5000.0);
    }

    #[test]
    fn test_co2_decays_toward_baseline_with_window_open() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let mut devices = quiet_devices();
        devices.window_openness = 1.0;

        let mut state = ClimateState::baseline(&config, &outside, 1.0);
        state.scalars.co2 = 3000.0;

        for _ in 0..200 {
            state = step(&config, &state, &devices, &outside);
        }
        assert!(state.scalars.co2 < 410.0);
        assert!(state.scalars.co2 >= 400.0);
    }

    #[test]
    fn test_lights_boost_light_level() {
        let config = ClimateConfig::default();
        let mut outside = OutsideConditions::default();
        outside.time_of_day = TimeOfDay::Night;
        let mut devices = quiet_devices();

        let state = ClimateState::baseline(&config, &outside, 0.0);
        let dark = step(&config, &state, &devices, &outside);
        devices.lights_on = true;
        let lit = step(&config, &state, &devices, &outside);

        assert!((dark.scalars.light_level - 0.05).abs() < 1e-9);
        assert!((lit.scalars.light_level - 0.55).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_state_resets_to_baseline() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let devices = quiet_devices();

        let malformed = ClimateState {
            point_temperatures: vec![21.0],
            scalars: RoomScalars {
                co2: 1234.0,
                humidity: 55.0,
                light_level: 0.4,
            },
        };

        let next = step(&config, &malformed, &devices, &outside);
        assert_eq!(next.point_temperatures.len(), config.point_count);
        // CO2 restarts from the 400 ppm baseline, not the stale value
        assert!(next.scalars.co2 < 500.0);
    }

    #[test]
    fn test_sensor_readings_share_room_scalars() {
        let config = ClimateConfig::default();
        let outside = OutsideConditions::default();
        let state = ClimateState::baseline(&config, &outside, 0.0);
        let readings = state.sensor_readings();

        assert_eq!(readings.len(), 3);
        assert!(readings.windows(2).all(|w| w[0].co2 == w[1].co2
            && w[0].humidity == w[1].humidity
            && w[0].light_level == w[1].light_level));
    }
}
