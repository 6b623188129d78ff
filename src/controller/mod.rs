//! # Room Controller
//!
//! Holds the shared application state and drives the three periodic loops:
//! the fast climate tick, the slower anomaly check, and the mock-fleet
//! perturbation. Each loop takes the write lock once per iteration, so a
//! tick always sees and replaces a consistent state.

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::config::Config;
use crate::domain::{Advisory, DeviceState, IdealTargets, OutsideConditions, TimeOfDay};
use crate::monitor::{MonitorConfig, StatusEvaluator};
use crate::simulation::{
    AlertRecord, FleetConfig, FleetSimulator, FleetSummary, RoomConfig, RoomEnvironment,
    RoomRecord, RoomSnapshot, SensorRecord, SimulatedWeatherProvider, WeatherConfig,
    WeatherProvider,
};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub controller: Arc<RoomController>,
}

impl AppState {
    pub async fn new(cfg: Config) -> Result<Self> {
        let room_config =
            RoomConfig::default().with_point_count(cfg.simulation.point_count.max(1));

        let mut weather_config = WeatherConfig {
            fetch_delay_ms: cfg.weather.fetch_delay_ms,
            ..WeatherConfig::default()
        };
        let mut fleet_config = FleetConfig::default();
        if let Some(seed) = cfg.simulation.random_seed {
            weather_config = weather_config.with_random_seed(seed);
            fleet_config = fleet_config.with_random_seed(seed + 1);
        }

        let monitor_config = MonitorConfig {
            heater_cold_room_threshold_ms: cfg.monitor.heater_cold_room_threshold_ms,
            ..MonitorConfig::default()
        };

        let targets = IdealTargets {
            temperature: cfg.targets.temperature,
            humidity: cfg.targets.humidity,
            co2: cfg.targets.co2,
            light_level: cfg.targets.light_level,
        };

        let controller = Arc::new(RoomController {
            room: RwLock::new(RoomEnvironment::new(room_config)),
            evaluator: RwLock::new(StatusEvaluator::new(monitor_config)),
            targets: RwLock::new(targets),
            advisories: RwLock::new(Vec::new()),
            fleet: RwLock::new(FleetSimulator::new(fleet_config)),
            weather: Arc::new(SimulatedWeatherProvider::new(weather_config)),
        });

        // Initial weather fetch before any tick runs
        controller.refresh_weather().await;

        Ok(Self { cfg, controller })
    }
}

pub struct RoomController {
    room: RwLock<RoomEnvironment>,
    evaluator: RwLock<StatusEvaluator>,
    targets: RwLock<IdealTargets>,
    advisories: RwLock<Vec<Advisory>>,
    fleet: RwLock<FleetSimulator>,
    weather: Arc<dyn WeatherProvider>,
}

impl RoomController {
    pub async fn snapshot(&self) -> RoomSnapshot {
        self.room.read().await.snapshot()
    }

    pub async fn advisories(&self) -> Vec<Advisory> {
        self.advisories.read().await.clone()
    }

    pub async fn devices(&self) -> DeviceState {
        self.room.read().await.devices()
    }

    /// Apply a device change from the UI
    ///
    /// The heater transition is observed immediately so the alert timer
    /// starts at the change, not at the next anomaly tick.
    pub async fn set_devices(&self, devices: DeviceState) {
        self.room.write().await.set_devices(devices);
        self.evaluator
            .write()
            .await
            .observe_devices(&devices, Utc::now());
        debug!(?devices, "device state updated");
    }

    pub async fn targets(&self) -> IdealTargets {
        *self.targets.read().await
    }

    pub async fn set_targets(&self, targets: IdealTargets) {
        *self.targets.write().await = targets;
        debug!(?targets, "ideal targets updated");
    }

    pub async fn outside(&self) -> OutsideConditions {
        self.room.read().await.outside()
    }

    /// Run the simulated weather fetch and install the result
    pub async fn refresh_weather(&self) -> OutsideConditions {
        let time_of_day = self.room.read().await.outside().time_of_day;
        let conditions = self.weather.fetch(time_of_day).await;
        self.room.write().await.apply_weather(conditions);
        conditions
    }

    /// Flip the day/night phase, re-baselining like any outside change
    pub async fn set_time_of_day(&self, time_of_day: TimeOfDay) -> OutsideConditions {
        let mut room = self.room.write().await;
        let conditions = OutsideConditions {
            time_of_day,
            ..room.outside()
        };
        room.apply_weather(conditions);
        conditions
    }

    pub async fn fleet_rooms(&self) -> Vec<RoomRecord> {
        self.fleet.read().await.rooms().to_vec()
    }

    pub async fn fleet_room(&self, id: &str) -> Option<RoomRecord> {
        self.fleet.read().await.room(id).cloned()
    }

    pub async fn fleet_sensors(&self) -> Vec<SensorRecord> {
        self.fleet.read().await.sensors().to_vec()
    }

    pub async fn fleet_alerts(&self) -> Vec<AlertRecord> {
        self.fleet.read().await.alerts().to_vec()
    }

    pub async fn fleet_summary(&self) -> FleetSummary {
        self.fleet.read().await.summary()
    }

    /// Fast loop: advance the climate reducer
    pub async fn run_simulation(&self, tick_ms: u64) -> Result<()> {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(tick_ms.max(1)));
        loop {
            interval.tick().await;
            self.room.write().await.tick();
        }
    }

    /// Slow loop: evaluate advisories, replacing the list only on change
    pub async fn run_monitor(&self, check_ms: u64) -> Result<()> {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(check_ms.max(1)));
        loop {
            interval.tick().await;
            let snapshot = self.room.read().await.snapshot();
            let targets = *self.targets.read().await;
            let changed = self
                .evaluator
                .write()
                .await
                .check(&snapshot, &targets, Utc::now());
            if let Some(advisories) = changed {
                for advisory in &advisories {
                    info!(%advisory, "advisory raised");
                }
                *self.advisories.write().await = advisories;
            }
        }
    }

    /// Slow loop: perturb the mock fleet records
    pub async fn run_fleet(&self, tick_ms: u64) -> Result<()> {
        let mut interval =
            tokio::time::interval(std::time::Duration::from_millis(tick_ms.max(1)));
        loop {
            interval.tick().await;
            self.fleet.write().await.tick();
        }
    }
}

pub fn spawn_controller_tasks(state: AppState, cfg: Config) {
    let controller = state.controller.clone();
    let tick_ms = cfg.simulation.tick_ms;
    tokio::spawn(async move {
        if let Err(e) = controller.run_simulation(tick_ms).await {
            warn!(error=%e, "simulation loop stopped");
        }
    });

    let controller = state.controller.clone();
    let check_ms = cfg.monitor.check_ms;
    tokio::spawn(async move {
        if let Err(e) = controller.run_monitor(check_ms).await {
            warn!(error=%e, "monitor loop stopped");
        }
    });

    let controller = state.controller.clone();
    let fleet_tick_ms = cfg.simulation.fleet_tick_ms;
    tokio::spawn(async move {
        if let Err(e) = controller.run_fleet(fleet_tick_ms).await {
            warn!(error=%e, "fleet loop stopped");
        }
    });
}
