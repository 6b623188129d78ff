//! # Simulation Module
//!
//! Everything that generates data in this service lives here: there is no
//! real sensor ingestion behind the dashboard.
//!
//! ## Components
//!
//! - **Climate**: pure per-tick reducer for indoor temperature, CO2,
//!   humidity and light under device and weather influence
//! - **Environment**: room orchestrator owning climate state, device state
//!   and outside conditions, driven by a single timer loop
//! - **Weather**: simulated outside-conditions provider with a fixed fetch
//!   delay and seedable sampling
//! - **Fleet**: mock building rooms / sensor inventory / alerts, perturbed
//!   by small randomized deltas on a slow timer
//!
//! ## Usage
//!
//! ```rust
//! use facility_climate_monitor::simulation::{RoomConfig, RoomEnvironment};
//!
//! let mut room = RoomEnvironment::new(RoomConfig::default().with_point_count(3));
//!
//! // Advance the simulation by one tick
//! room.tick();
//!
//! let snapshot = room.snapshot();
//! assert_eq!(snapshot.sensors.len(), 3);
//! ```

pub mod climate;
pub mod environment;
pub mod fleet;
pub mod weather;

pub use climate::{ClimateConfig, ClimateState};
pub use environment::{RoomConfig, RoomEnvironment, RoomSnapshot};
pub use fleet::{
    AlertRecord, FleetConfig, FleetSimulator, FleetSummary, RoomRecord, RoomStatus, SensorRecord,
    SensorStatus,
};
pub use weather::{SimulatedWeatherProvider, WeatherConfig, WeatherProvider};
