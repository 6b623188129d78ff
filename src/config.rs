use anyhow::Result;
use figment::{providers::{Env, Format, Toml}, Figment};
use serde::Deserialize;
use std::net::SocketAddr;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub simulation: SimulationConfig,
    pub weather: WeatherSectionConfig,
    pub monitor: MonitorSectionConfig,
    pub targets: TargetsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub enable_cors: bool,
    pub request_timeout_secs: u64,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SimulationConfig {
    /// Climate tick cadence in milliseconds
    pub tick_ms: u64,
    /// Mock-fleet perturbation cadence in milliseconds
    pub fleet_tick_ms: u64,
    /// Monitored points per room
    pub point_count: usize,
    /// Seed for all randomized components (omit for entropy)
    pub random_seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeatherSectionConfig {
    /// Simulated fetch latency in milliseconds
    pub fetch_delay_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorSectionConfig {
    /// Anomaly-check cadence in milliseconds
    pub check_ms: u64,
    /// Heater-against-cold-room alert threshold in milliseconds
    pub heater_cold_room_threshold_ms: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TargetsConfig {
    pub temperature: f64,
    pub humidity: f64,
    pub co2: f64,
    pub light_level: f64,
}

impl Config {
    pub fn load() -> Result<Self> {
        let figment = Figment::new()
            .merge(Toml::file("config/default.toml"))
            .merge(Env::prefixed("FCM__").split("__"));
        Ok(figment.extract()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_toml_parses() {
        let cfg: Config = Figment::new()
            .merge(Toml::string(include_str!("../config/default.toml")))
            .extract()
            .expect("default config parses");

        assert_eq!(cfg.simulation.tick_ms, 1000);
        assert_eq!(cfg.monitor.check_ms, 5000);
        assert_eq!(cfg.simulation.point_count, 3);
        assert!(cfg.server.socket_addr().is_ok());
    }
}
