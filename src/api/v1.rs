use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    controller::AppState,
    domain::{DeviceState, IdealTargets, OutsideConditions, TimeOfDay},
    simulation::{AlertRecord, FleetSummary, RoomRecord, RoomSnapshot, SensorRecord},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/status", get(get_status))
        .route("/advisories", get(get_advisories))
        .route("/devices", get(get_devices).put(set_devices))
        .route("/targets", get(get_targets).put(set_targets))
        .route("/weather", get(get_weather))
        .route("/weather/refresh", post(refresh_weather))
        .route("/weather/time-of-day", put(set_time_of_day))
        .route("/rooms", get(list_rooms))
        .route("/rooms/summary", get(room_summary))
        .route("/rooms/:id", get(get_room))
        .route("/sensors", get(list_sensors))
        .route("/alerts", get(list_fleet_alerts))
        .route("/healthz", get(healthz))
        .with_state(state)
}

pub async fn healthz() -> impl IntoResponse {
    StatusCode::OK
}

/// Full monitoring view: simulated room plus current advisories
#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub room: RoomSnapshot,
    pub targets: IdealTargets,
    pub advisories: Vec<String>,
}

pub async fn get_status(State(st): State<AppState>) -> ApiResponse<SystemStatus> {
    let room = st.controller.snapshot().await;
    let targets = st.controller.targets().await;
    let advisories = st
        .controller
        .advisories()
        .await
        .iter()
        .map(|a| a.to_string())
        .collect();
    ApiResponse::success(SystemStatus {
        room,
        targets,
        advisories,
    })
}

pub async fn get_advisories(State(st): State<AppState>) -> ApiResponse<Vec<String>> {
    let advisories = st
        .controller
        .advisories()
        .await
        .iter()
        .map(|a| a.to_string())
        .collect();
    ApiResponse::success(advisories)
}

pub async fn get_devices(State(st): State<AppState>) -> ApiResponse<DeviceState> {
    ApiResponse::success(st.controller.devices().await)
}

/// Device update from the dashboard controls
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateDevicesRequest {
    pub heater_on: bool,
    #[validate(range(min = 0.0, max = 1.0))]
    pub heater_power: f64,
    pub ac_on: bool,
    #[validate(range(min = 0.0, max = 1.0))]
    pub window_openness: f64,
    pub lights_on: bool,
    #[validate(range(max = 100))]
    pub occupant_count: u32,
}

pub async fn set_devices(
    State(st): State<AppState>,
    Json(req): Json<UpdateDevicesRequest>,
) -> Result<ApiResponse<DeviceState>, ApiError> {
    req.validate()?;
    let devices = DeviceState {
        heater_on: req.heater_on,
        heater_power: req.heater_power,
        ac_on: req.ac_on,
        window_openness: req.window_openness,
        lights_on: req.lights_on,
        occupant_count: req.occupant_count,
    };
    st.controller.set_devices(devices).await;
    Ok(ApiResponse::success(devices))
}

pub async fn get_targets(State(st): State<AppState>) -> ApiResponse<IdealTargets> {
    ApiResponse::success(st.controller.targets().await)
}

/// Setpoint update from the rules panel
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateTargetsRequest {
    #[validate(range(min = 10.0, max = 35.0))]
    pub temperature: f64,
    #[validate(range(min = 10.0, max = 90.0))]
    pub humidity: f64,
    #[validate(range(min = 400.0, max = 5000.0))]
    pub co2: f64,
    #[validate(range(min = 0.0, max = 1.0))]
    pub light_level: f64,
}

pub async fn set_targets(
    State(st): State<AppState>,
    Json(req): Json<UpdateTargetsRequest>,
) -> Result<ApiResponse<IdealTargets>, ApiError> {
    req.validate()?;
    let targets = IdealTargets {
        temperature: req.temperature,
        humidity: req.humidity,
        co2: req.co2,
        light_level: req.light_level,
    };
    st.controller.set_targets(targets).await;
    Ok(ApiResponse::success(targets))
}

pub async fn get_weather(State(st): State<AppState>) -> ApiResponse<OutsideConditions> {
    ApiResponse::success(st.controller.outside().await)
}

pub async fn refresh_weather(State(st): State<AppState>) -> ApiResponse<OutsideConditions> {
    ApiResponse::success(st.controller.refresh_weather().await)
}

#[derive(Debug, Deserialize)]
pub struct TimeOfDayRequest {
    pub time_of_day: TimeOfDay,
}

pub async fn set_time_of_day(
    State(st): State<AppState>,
    Json(req): Json<TimeOfDayRequest>,
) -> ApiResponse<OutsideConditions> {
    ApiResponse::success(st.controller.set_time_of_day(req.time_of_day).await)
}

pub async fn list_rooms(State(st): State<AppState>) -> ApiResponse<Vec<RoomRecord>> {
    ApiResponse::success(st.controller.fleet_rooms().await)
}

pub async fn room_summary(State(st): State<AppState>) -> ApiResponse<FleetSummary> {
    ApiResponse::success(st.controller.fleet_summary().await)
}

pub async fn get_room(
    State(st): State<AppState>,
    Path(id): Path<String>,
) -> Result<ApiResponse<RoomRecord>, ApiError> {
    st.controller
        .fleet_room(&id)
        .await
        .map(ApiResponse::success)
        .ok_or_else(|| ApiError::NotFound(format!("room {id}")))
}

pub async fn list_sensors(State(st): State<AppState>) -> ApiResponse<Vec<SensorRecord>> {
    ApiResponse::success(st.controller.fleet_sensors().await)
}

pub async fn list_fleet_alerts(State(st): State<AppState>) -> ApiResponse<Vec<AlertRecord>> {
    ApiResponse::success(st.controller.fleet_alerts().await)
}
