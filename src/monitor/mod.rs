//! # Status Evaluator
//!
//! Compares simulated room aggregates against the user-configured ideal
//! targets on a slow cadence and produces advisory strings. The evaluation
//! itself is a pure function of a snapshot, the targets and the clock; the
//! evaluator only keeps the heater-on transition timestamp and the last
//! emitted list for the replace-if-changed guard.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Advisory, DeviceState, IdealTargets};
use crate::simulation::RoomSnapshot;

/// Evaluator thresholds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitorConfig {
    /// How long the heater may run against a cold room before alerting, in ms
    pub heater_cold_room_threshold_ms: i64,
    /// Window openness below which the window counts as closed
    pub closed_window_threshold: f64,
    /// Gap below ideal temperature that still counts as "cold" for the
    /// heater alert, in °C
    pub heater_cold_gap_c: f64,
    /// Half-width of the acceptable temperature band around ideal, in °C
    pub temperature_band_c: f64,
    /// CO2 margin above ideal before the elevated note, in ppm
    pub co2_margin_ppm: f64,
    /// Light-level margin below ideal before the daylight suggestion
    pub light_margin: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            heater_cold_room_threshold_ms: 15_000,
            closed_window_threshold: 0.1,
            heater_cold_gap_c: 3.0,
            temperature_band_c: 2.0,
            co2_margin_ppm: 200.0,
            light_margin: 0.2,
        }
    }
}

const NOMINAL: &str = "System nominal.";

/// Stateful wrapper around the pure evaluation
pub struct StatusEvaluator {
    config: MonitorConfig,
    heater_on_since: Option<DateTime<Utc>>,
    last: Vec<Advisory>,
}

impl StatusEvaluator {
    pub fn new(config: MonitorConfig) -> Self {
        Self {
            config,
            heater_on_since: None,
            last: Vec::new(),
        }
    }

    /// Track the heater off→on transition
    ///
    /// The timer starts when the heater turns on and resets when it turns
    /// off; it is independent of the simulation tick.
    pub fn observe_devices(&mut self, devices: &DeviceState, now: DateTime<Utc>) {
        if devices.heater_on {
            if self.heater_on_since.is_none() {
                self.heater_on_since = Some(now);
            }
        } else {
            self.heater_on_since = None;
        }
    }

    /// How long the heater has been continuously on
    pub fn heater_on_duration(&self, now: DateTime<Utc>) -> Option<Duration> {
        self.heater_on_since.map(|since| now - since)
    }

    /// Last advisory list emitted through `check`
    pub fn current(&self) -> &[Advisory] {
        &self.last
    }

    /// Compute the advisory list for a snapshot
    pub fn evaluate(
        &self,
        snapshot: &RoomSnapshot,
        targets: &IdealTargets,
        now: DateTime<Utc>,
    ) -> Vec<Advisory> {
        let mut advisories = Vec::new();

        let mut status = String::from(NOMINAL);
        if snapshot.average_temperature > targets.temperature + self.config.temperature_band_c {
            status = "Room is warmer than ideal.".to_string();
        } else if snapshot.average_temperature
            < targets.temperature - self.config.temperature_band_c
        {
            status = "Room is colder than ideal.".to_string();
        }
        if snapshot.scalars.co2 > targets.co2 + self.config.co2_margin_ppm {
            status.push_str(" CO2 levels are elevated.");
        }
        if snapshot.scalars.light_level < targets.light_level - self.config.light_margin
            && snapshot.outside.time_of_day.is_day()
            && !snapshot.devices.lights_on
        {
            status.push_str(" Consider turning on lights or opening window for more daylight.");
        }
        if status != NOMINAL {
            advisories.push(Advisory::Status(status));
        }

        if snapshot.devices.heater_on
            && snapshot.devices.window_openness < self.config.closed_window_threshold
        {
            if let Some(on_for) = self.heater_on_duration(now) {
                let cold = snapshot.average_temperature
                    < targets.temperature - self.config.heater_cold_gap_c;
                if on_for.num_milliseconds() > self.config.heater_cold_room_threshold_ms && cold {
                    advisories.push(Advisory::Alert(format!(
                        "Heater on for {}s, window closed, but room is still cold ({:.1}°C)! \
                         Check insulation or heater power.",
                        on_for.num_seconds(),
                        snapshot.average_temperature,
                    )));
                }
            }
        }

        advisories
    }

    /// Evaluate and return the new list only if it differs from the last one
    ///
    /// The caller swaps its published list only on `Some`, so unchanged
    /// results never trigger downstream updates.
    pub fn check(
        &mut self,
        snapshot: &RoomSnapshot,
        targets: &IdealTargets,
        now: DateTime<Utc>,
    ) -> Option<Vec<Advisory>> {
        self.observe_devices(&snapshot.devices, now);
        let advisories = self.evaluate(snapshot, targets, now);
        if advisories != self.last {
            self.last = advisories.clone();
            Some(advisories)
        } else {
            None
        }
    }
}
