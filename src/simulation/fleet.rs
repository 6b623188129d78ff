//! # Mock Building Fleet
//!
//! In-memory room / sensor-inventory / alert records backing the dashboard
//! views. Values start from a fixed seed set and get perturbed by small
//! randomized deltas on a slow timer, so the UI shows movement without any
//! real ingestion behind it. Nothing here survives a restart.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// Derived room condition bucket shown on the dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoomStatus {
    Optimal,
    Warning,
    Critical,
}

/// Qualitative air-quality label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum AirQuality {
    Excellent,
    Good,
    Fair,
    Poor,
}

/// One monitored room on the building dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomRecord {
    pub id: String,
    pub name: String,
    /// Temperature in °C, perturbed within [15, 30]
    pub temperature: f64,
    pub occupancy: u32,
    pub max_occupancy: u32,
    /// Relative humidity in %
    pub humidity: f64,
    pub air_quality: AirQuality,
    /// Energy draw in kW, floored at 0.5
    pub energy_usage_kw: f64,
    pub status: RoomStatus,
    /// Efficiency score in %
    pub efficiency_pct: u32,
}

/// Connectivity state of an inventory item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SensorStatus {
    Online,
    Offline,
    Warning,
    Maintenance,
}

/// One physical sensor in the building inventory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensorRecord {
    pub id: String,
    pub name: String,
    pub kind: String,
    pub location: String,
    pub status: SensorStatus,
    /// Battery charge in %, None for mains-powered units
    pub battery_percent: Option<u32>,
    /// Signal strength in %
    pub signal_strength: u32,
}

/// Severity bucket of a seeded alert
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum AlertSeverity {
    Low,
    Medium,
    High,
}

/// Static dashboard alert entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: String,
    pub severity: AlertSeverity,
    pub title: String,
    pub message: String,
    pub room: String,
}

/// Fleet perturbation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FleetConfig {
    /// Std deviation of the per-tick temperature jitter in °C
    pub temperature_jitter_c: f64,
    /// Half-width of the per-tick energy jitter in kW
    pub energy_jitter_kw: f64,
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            temperature_jitter_c: 0.1,
            energy_jitter_kw: 0.05,
            random_seed: None,
        }
    }
}

impl FleetConfig {
    /// Set the random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}

/// Aggregates shown in the dashboard quick-stats row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub room_count: usize,
    pub total_energy_kw: f64,
    pub total_occupancy: u32,
    pub average_temperature: f64,
    pub average_efficiency_pct: f64,
    pub online_sensors: usize,
    pub total_sensors: usize,
    pub low_battery_sensors: usize,
    pub alert_count: usize,
}

/// Mock data store with a perturbation tick
pub struct FleetSimulator {
    config: FleetConfig,
    temperature_jitter: Normal<f64>,
    rooms: Vec<RoomRecord>,
    sensors: Vec<SensorRecord>,
    alerts: Vec<AlertRecord>,
    rng: StdRng,
}

impl FleetSimulator {
    pub fn new(config: FleetConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        // Sanitized so Normal::new cannot reject the std dev
        let std_dev = if config.temperature_jitter_c.is_finite() && config.temperature_jitter_c > 0.0
        {
            config.temperature_jitter_c
        } else {
            0.1
        };
        let temperature_jitter = Normal::new(0.0, std_dev).expect("finite positive std dev");
        Self {
            config,
            temperature_jitter,
            rooms: seed_rooms(),
            sensors: seed_sensors(),
            alerts: seed_alerts(),
            rng,
        }
    }

    pub fn rooms(&self) -> &[RoomRecord] {
        &self.rooms
    }

    pub fn sensors(&self) -> &[SensorRecord] {
        &self.sensors
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn room(&self, id: &str) -> Option<&RoomRecord> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Perturb every room by a small randomized delta
    pub fn tick(&mut self) {
        for room in &mut self.rooms {
            let delta_t = self.temperature_jitter.sample(&mut self.rng);
            room.temperature = (room.temperature + delta_t).clamp(15.0, 30.0);

            let delta: i64 = self.rng.gen_range(-1..=1);
            room.occupancy = (room.occupancy as i64 + delta)
                .clamp(0, room.max_occupancy as i64) as u32;

            let energy_delta = self
                .rng
                .gen_range(-self.config.energy_jitter_kw..=self.config.energy_jitter_kw);
            room.energy_usage_kw = (room.energy_usage_kw + energy_delta).max(0.5);
        }
    }

    /// Aggregate the fleet for the quick-stats row
    pub fn summary(&self) -> FleetSummary {
        let room_count = self.rooms.len().max(1);
        FleetSummary {
            room_count: self.rooms.len(),
            total_energy_kw: self.rooms.iter().map(|r| r.energy_usage_kw).sum(),
            total_occupancy: self.rooms.iter().map(|r| r.occupancy).sum(),
            average_temperature: self.rooms.iter().map(|r| r.temperature).sum::<f64>()
                / room_count as f64,
            average_efficiency_pct: self.rooms.iter().map(|r| r.efficiency_pct as f64).sum::<f64>()
                / room_count as f64,
            online_sensors: self
                .sensors
                .iter()
                .filter(|s| s.status == SensorStatus::Online)
                .count(),
            total_sensors: self.sensors.len(),
            low_battery_sensors: self
                .sensors
                .iter()
                .filter(|s| s.battery_percent.map(|b| b < 30).unwrap_or(false))
                .count(),
            alert_count: self.alerts.len(),
        }
    }
}

fn seed_rooms() -> Vec<RoomRecord> {
    vec![
        RoomRecord {
            id: "room-001".into(),
            name: "Conference Room Alpha".into(),
            temperature: 22.5,
            occupancy: 8,
            max_occupancy: 12,
            humidity: 45.0,
            air_quality: AirQuality::Excellent,
            energy_usage_kw: 2.3,
            status: RoomStatus::Optimal,
            efficiency_pct: 94,
        },
        RoomRecord {
            id: "room-002".into(),
            name: "Innovation Lab Beta".into(),
            temperature: 24.1,
            occupancy: 15,
            max_occupancy: 20,
            humidity: 52.0,
            air_quality: AirQuality::Good,
            energy_usage_kw: 3.1,
            status: RoomStatus::Warning,
            efficiency_pct: 78,
        },
        RoomRecord {
            id: "room-003".into(),
            name: "Research Center Gamma".into(),
            temperature: 19.8,
            occupancy: 3,
            max_occupancy: 8,
            humidity: 38.0,
            air_quality: AirQuality::Excellent,
            energy_usage_kw: 4.2,
            status: RoomStatus::Optimal,
            efficiency_pct: 91,
        },
        RoomRecord {
            id: "room-004".into(),
            name: "Data Center Core".into(),
            temperature: 18.2,
            occupancy: 1,
            max_occupancy: 4,
            humidity: 35.0,
            air_quality: AirQuality::Good,
            energy_usage_kw: 8.7,
            status: RoomStatus::Critical,
            efficiency_pct: 67,
        },
        RoomRecord {
            id: "room-005".into(),
            name: "Executive Lounge".into(),
            temperature: 23.0,
            occupancy: 5,
            max_occupancy: 15,
            humidity: 48.0,
            air_quality: AirQuality::Excellent,
            energy_usage_kw: 1.8,
            status: RoomStatus::Optimal,
            efficiency_pct: 96,
        },
        RoomRecord {
            id: "room-006".into(),
            name: "Training Center Delta".into(),
            temperature: 25.3,
            occupancy: 22,
            max_occupancy: 25,
            humidity: 58.0,
            air_quality: AirQuality::Fair,
            energy_usage_kw: 5.4,
            status: RoomStatus::Warning,
            efficiency_pct: 72,
        },
    ]
}

fn seed_sensors() -> Vec<SensorRecord> {
    vec![
        SensorRecord {
            id: "sensor-001".into(),
            name: "Temp Sensor A1".into(),
            kind: "temperature".into(),
            location: "Conference Room Alpha".into(),
            status: SensorStatus::Online,
            battery_percent: Some(87),
            signal_strength: 95,
        },
        SensorRecord {
            id: "sensor-002".into(),
            name: "Occupancy Sensor B2".into(),
            kind: "occupancy".into(),
            location: "Innovation Lab Beta".into(),
            status: SensorStatus::Online,
            battery_percent: Some(64),
            signal_strength: 88,
        },
        SensorRecord {
            id: "sensor-003".into(),
            name: "CO2 Sensor C1".into(),
            kind: "air-quality".into(),
            location: "Research Center Gamma".into(),
            status: SensorStatus::Offline,
            battery_percent: Some(12),
            signal_strength: 0,
        },
        SensorRecord {
            id: "sensor-004".into(),
            name: "Humidity Sensor D3".into(),
            kind: "humidity".into(),
            location: "Data Center Core".into(),
            status: SensorStatus::Online,
            battery_percent: None,
            signal_strength: 99,
        },
        SensorRecord {
            id: "sensor-005".into(),
            name: "Energy Meter E1".into(),
            kind: "energy".into(),
            location: "Executive Lounge".into(),
            status: SensorStatus::Online,
            battery_percent: None,
            signal_strength: 92,
        },
        SensorRecord {
            id: "sensor-006".into(),
            name: "Temp Sensor F2".into(),
            kind: "temperature".into(),
            location: "Training Center Delta".into(),
            status: SensorStatus::Warning,
            battery_percent: Some(28),
            signal_strength: 61,
        },
    ]
}

fn seed_alerts() -> Vec<AlertRecord> {
    vec![
        AlertRecord {
            id: "alert-001".into(),
            severity: AlertSeverity::High,
            title: "Temperature Critical".into(),
            message: "Data Center Core temperature approaching critical threshold".into(),
            room: "Data Center Core".into(),
        },
        AlertRecord {
            id: "alert-002".into(),
            severity: AlertSeverity::Medium,
            title: "High Occupancy".into(),
            message: "Training Center Delta at 88% capacity".into(),
            room: "Training Center Delta".into(),
        },
        AlertRecord {
            id: "alert-003".into(),
            severity: AlertSeverity::Low,
            title: "Maintenance Scheduled".into(),
            message: "HVAC system maintenance scheduled for Conference Room Alpha".into(),
            room: "Conference Room Alpha".into(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_data_shape() {
        let fleet = FleetSimulator::new(FleetConfig::default().with_random_seed(42));
        assert_eq!(fleet.rooms().len(), 6);
        assert_eq!(fleet.sensors().len(), 6);
        assert_eq!(fleet.alerts().len(), 3);
        assert!(fleet.room("room-004").is_some());
        assert!(fleet.room("room-999").is_none());
    }

    #[test]
    fn test_perturbation_respects_bounds() {
        let mut fleet = FleetSimulator::new(FleetConfig::default().with_random_seed(7));
        for _ in 0..1000 {
            fleet.tick();
            for room in fleet.rooms() {
                assert!((15.0..=30.0).contains(&room.temperature));
                assert!(room.occupancy <= room.max_occupancy);
                assert!(room.energy_usage_kw >= 0.5);
            }
        }
    }

    #[test]
    fn test_summary_aggregates() {
        let fleet = FleetSimulator::new(FleetConfig::default().with_random_seed(42));
        let summary = fleet.summary();

        assert_eq!(summary.room_count, 6);
        assert_eq!(summary.total_occupancy, 54);
        assert!((summary.total_energy_kw - 25.5).abs() < 1e-9);
        assert_eq!(summary.online_sensors, 4);
        assert_eq!(summary.low_battery_sensors, 2);
        assert_eq!(summary.alert_count, 3);
    }

    #[test]
    fn test_seeded_fleet_is_reproducible() {
        let mut a = FleetSimulator::new(FleetConfig::default().with_random_seed(9));
        let mut b = FleetSimulator::new(FleetConfig::default().with_random_seed(9));
        for _ in 0..10 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.rooms(), b.rooms());
    }
}
