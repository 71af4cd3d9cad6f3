//! Polling coordinator and entity projection for the Guntalink bridge.
//!
//! The [`PollCoordinator`] owns the schedule: one timer, one cycle in flight
//! at a time, one published [`Snapshot`](guntalink_core::Snapshot) replaced
//! atomically on success and retained on failure. Consumers read the
//! snapshot, subscribe to replacements, or force a refresh that coalesces
//! with any cycle already running.
//!
//! [`entity`] turns a snapshot into typed sensor entities for whatever
//! front end consumes the bridge.

pub mod coordinator;
pub mod entity;

pub use coordinator::{DeviceStatus, PollCoordinator};
pub use entity::{project_entities, SensorEntity};
