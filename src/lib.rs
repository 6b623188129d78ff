//! # Facility Climate Monitor
//!
//! A single-binary service that simulates the indoor climate of a facility
//! room (per-point temperature, room-wide CO2 / humidity / light), evaluates
//! the simulated state against user-configured ideal targets, and serves a
//! mock building fleet for dashboard consumption. All data is generated
//! in-process; nothing is persisted.

pub mod api;
pub mod config;
pub mod controller;
pub mod domain;
pub mod monitor;
pub mod simulation;
pub mod telemetry;
