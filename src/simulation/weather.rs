//! # Simulated Weather Provider
//!
//! Stands in for a real weather service. The fetch waits a configured
//! delay, then samples fresh outside conditions from fixed uniform ranges.
//! By construction the operation cannot fail, so the trait still returns
//! `OutsideConditions` directly rather than a `Result`.

use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::IntoEnumIterator;
use tokio::sync::Mutex;

use crate::domain::{OutsideConditions, TimeOfDay, WindDirection};

/// Source of outside conditions
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Fetch fresh outside conditions, preserving the given day/night phase
    async fn fetch(&self, time_of_day: TimeOfDay) -> OutsideConditions;
}

/// Simulated weather sampler configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// Simulated fetch latency in milliseconds
    pub fetch_delay_ms: u64,
    /// Sampled temperature range in °C
    pub temperature_range: (f64, f64),
    /// Sampled humidity range in %
    pub humidity_range: (f64, f64),
    /// Sampled wind speed range in m/s
    pub wind_speed_range: (f64, f64),
    /// Random seed for reproducibility (None = random)
    pub random_seed: Option<u64>,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            fetch_delay_ms: 500,
            temperature_range: (10.0, 25.0),
            humidity_range: (40.0, 80.0),
            wind_speed_range: (1.0, 6.0),
            random_seed: None,
        }
    }
}

impl WeatherConfig {
    /// Set the random seed
    pub fn with_random_seed(mut self, seed: u64) -> Self {
        self.random_seed = Some(seed);
        self
    }
}

/// Pseudo-random outside-conditions source
pub struct SimulatedWeatherProvider {
    config: WeatherConfig,
    rng: Mutex<StdRng>,
}

impl SimulatedWeatherProvider {
    pub fn new(config: WeatherConfig) -> Self {
        let rng = match config.random_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            rng: Mutex::new(rng),
        }
    }

    /// Sample conditions without the fetch delay
    pub async fn sample(&self, time_of_day: TimeOfDay) -> OutsideConditions {
        let mut rng = self.rng.lock().await;
        let directions: Vec<WindDirection> = WindDirection::iter().collect();
        let direction = directions[rng.gen_range(0..directions.len())];

        OutsideConditions {
            temperature: rng
                .gen_range(self.config.temperature_range.0..=self.config.temperature_range.1),
            humidity: rng.gen_range(self.config.humidity_range.0..=self.config.humidity_range.1),
            wind_speed: rng
                .gen_range(self.config.wind_speed_range.0..=self.config.wind_speed_range.1),
            wind_direction: direction,
            time_of_day,
        }
    }
}

#[async_trait]
impl WeatherProvider for SimulatedWeatherProvider {
    async fn fetch(&self, time_of_day: TimeOfDay) -> OutsideConditions {
        if self.config.fetch_delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.config.fetch_delay_ms)).await;
        }
        let conditions = self.sample(time_of_day).await;
        tracing::info!(%conditions, "weather updated");
        conditions
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn instant_config(seed: u64) -> WeatherConfig {
        WeatherConfig {
            fetch_delay_ms: 0,
            ..WeatherConfig::default().with_random_seed(seed)
        }
    }

    #[tokio::test]
    async fn test_sampled_values_stay_in_range() {
        let provider = SimulatedWeatherProvider::new(instant_config(42));

        for _ in 0..200 {
            let c = provider.sample(TimeOfDay::Day).await;
            assert!((10.0..=25.0).contains(&c.temperature));
            assert!((40.0..=80.0).contains(&c.humidity));
            assert!((1.0..=6.0).contains(&c.wind_speed));
            assert_eq!(c.time_of_day, TimeOfDay::Day);
        }
    }

    #[tokio::test]
    async fn test_seeded_provider_is_reproducible() {
        let a = SimulatedWeatherProvider::new(instant_config(7));
        let b = SimulatedWeatherProvider::new(instant_config(7));

        let ca = a.fetch(TimeOfDay::Night).await;
        let cb = b.fetch(TimeOfDay::Night).await;
        assert_eq!(ca, cb);
    }

    #[tokio::test]
    async fn test_all_compass_directions_reachable() {
        let provider = SimulatedWeatherProvider::new(instant_config(1));
        let mut seen = std::collections::HashSet::new();
        for _ in 0..500 {
            seen.insert(provider.sample(TimeOfDay::Day).await.wind_direction);
        }
        assert_eq!(seen.len(), 8);
    }
}
