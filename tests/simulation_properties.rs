//! Property and scenario tests for the climate reducer and the status
//! evaluator, exercised without any runtime or HTTP layer attached.

use chrono::{Duration, Utc};
use proptest::prelude::*;
use rstest::rstest;

use facility_climate_monitor::domain::{
    DeviceState, IdealTargets, OutsideConditions, TimeOfDay, WindDirection,
};
use facility_climate_monitor::monitor::{MonitorConfig, StatusEvaluator};
use facility_climate_monitor::simulation::{
    climate, ClimateConfig, ClimateState, RoomConfig, RoomEnvironment, SimulatedWeatherProvider,
    WeatherConfig, WeatherProvider,
};

fn outside(temperature: f64, humidity: f64, time_of_day: TimeOfDay) -> OutsideConditions {
    OutsideConditions {
        temperature,
        humidity,
        wind_speed: 2.0,
        wind_direction: WindDirection::W,
        time_of_day,
    }
}

proptest! {
    /// All clamp bounds hold after many ticks regardless of the
    /// device-state combination.
    #[test]
    fn prop_bounds_hold_for_any_devices(
        heater_on in any::<bool>(),
        heater_power in 0.0f64..=1.0,
        ac_on in any::<bool>(),
        window_openness in 0.0f64..=1.0,
        lights_on in any::<bool>(),
        occupant_count in 0u32..=60,
        outside_t in -10.0f64..=40.0,
        outside_h in 0.0f64..=100.0,
        ticks in 1usize..=300,
    ) {
        let config = ClimateConfig::default();
        let devices = DeviceState {
            heater_on, heater_power, ac_on, window_openness, lights_on, occupant_count,
        };
        let out = outside(outside_t, outside_h, TimeOfDay::Day);
        let mut state = ClimateState::baseline(&config, &out, window_openness);

        for _ in 0..ticks {
            state = climate::step(&config, &state, &devices, &out);
            for &t in &state.point_temperatures {
                prop_assert!((-10.0..=50.0).contains(&t));
            }
            prop_assert!((400.0..=5000.0).contains(&state.scalars.co2));
            prop_assert!((10.0..=90.0).contains(&state.scalars.humidity));
            prop_assert!((0.01..=1.0).contains(&state.scalars.light_level));
        }
    }

    /// With the window closed and occupants present, CO2 never decreases
    /// until it saturates at the ceiling.
    #[test]
    fn prop_co2_monotonic_with_window_closed(occupants in 1u32..=30) {
        let config = ClimateConfig::default();
        let devices = DeviceState {
            occupant_count: occupants,
            window_openness: 0.0,
            ..DeviceState::default()
        };
        let out = outside(15.0, 60.0, TimeOfDay::Day);
        let mut state = ClimateState::baseline(&config, &out, 0.0);
        let mut previous = state.scalars.co2;

        for _ in 0..500 {
            state = climate::step(&config, &state, &devices, &out);
            prop_assert!(state.scalars.co2 >= previous);
            previous = state.scalars.co2;
        }
    }
}

#[test]
fn zero_input_state_asymptotes() {
    let config = RoomConfig::default();
    let mut room = RoomEnvironment::new(config);
    room.set_devices(DeviceState {
        heater_on: false,
        heater_power: 0.0,
        ac_on: false,
        window_openness: 0.0,
        lights_on: false,
        occupant_count: 0,
    });

    for _ in 0..100 {
        room.tick();
    }
    let settled = room.snapshot();

    for _ in 0..10 {
        room.tick();
    }
    let later = room.snapshot();

    assert!((later.average_temperature - settled.average_temperature).abs() < 1e-9);
    assert!((later.scalars.co2 - settled.scalars.co2).abs() < 1e-9);
    assert!((later.scalars.humidity - settled.scalars.humidity).abs() < 1e-9);
}

#[test]
fn heater_alert_scenario() {
    let mut evaluator = StatusEvaluator::new(MonitorConfig::default());
    let targets = IdealTargets::default(); // ideal temperature 22

    let mut room = RoomEnvironment::new(RoomConfig::default());
    room.apply_weather(outside(18.0, 60.0, TimeOfDay::Day));
    let mut devices = room.devices();
    devices.heater_on = true;
    devices.window_openness = 0.0;
    devices.lights_on = true;
    room.set_devices(devices);

    let start = Utc::now();
    evaluator.observe_devices(&devices, start);

    // Before the threshold: no alert yet
    let early = evaluator.evaluate(&room.snapshot(), &targets, start + Duration::seconds(10));
    assert!(!early.iter().any(|a| a.is_alert()));

    // Past the 15 s threshold with the room still more than 3°C cold
    let snapshot = room.snapshot();
    assert!(snapshot.average_temperature < targets.temperature - 3.0);
    let advisories = evaluator.evaluate(&snapshot, &targets, start + Duration::seconds(16));
    let alert = advisories
        .iter()
        .find(|a| a.is_alert())
        .expect("heater alert raised");
    assert!(alert.to_string().starts_with("ALERT:"));
}

#[rstest]
#[case::in_band_temperature(22.5)]
#[case::upper_edge(23.9)]
#[case::lower_edge(20.1)]
fn status_suppressed_when_everything_in_band(#[case] temperature: f64) {
    let evaluator = StatusEvaluator::new(MonitorConfig::default());
    let targets = IdealTargets::default();

    let mut room = RoomEnvironment::new(RoomConfig::default());
    room.apply_weather(outside(temperature, 50.0, TimeOfDay::Day));
    let mut devices = room.devices();
    devices.lights_on = true;
    room.set_devices(devices);

    let advisories = evaluator.evaluate(&room.snapshot(), &targets, Utc::now());
    assert!(advisories.is_empty(), "unexpected advisories: {advisories:?}");
}

#[tokio::test]
async fn weather_refresh_scenario() {
    let provider = SimulatedWeatherProvider::new(WeatherConfig {
        fetch_delay_ms: 0,
        ..WeatherConfig::default()
    });

    for _ in 0..50 {
        let conditions = provider.fetch(TimeOfDay::Day).await;
        assert!((10.0..=25.0).contains(&conditions.temperature));
        assert!((40.0..=80.0).contains(&conditions.humidity));
        assert!((1.0..=6.0).contains(&conditions.wind_speed));
    }
}
