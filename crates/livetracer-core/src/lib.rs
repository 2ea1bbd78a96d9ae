//! Core abstractions for livetracer-rs.
//!
//! This crate provides the pure-data subsystems of the telemetry visualizer:
//! - [`axis`]: per-axis plot bounding-volume configuration
//! - [`mapper`]: data-space ↔ visual-space coordinate mapping
//! - [`telemetry`]: the latest-state snapshot store and axis key mapping
//! - [`trail`]: the bounded, aging, segmentable motion trail buffer
//!
//! Everything here is rendering-agnostic; the presentation layer consumes
//! these types without this crate knowing about any 3D engine.

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Window arithmetic intentionally truncates
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_precision_loss)]

pub mod axis;
pub mod error;
pub mod mapper;
pub mod telemetry;
pub mod trail;

pub use axis::{Axis, AxisConfig, AxisSettings, AxisUpdate};
pub use error::{Result, TracerError};
pub use mapper::{is_inside, map_to_data, map_to_visual};
pub use telemetry::{
    SnapshotStore, SubscriptionId, TelemetryMapping, TelemetrySnapshot, TelemetryValue,
};
pub use trail::{
    TemporalUnit, TrailEngine, TrailMarker, TrailMode, TrailPoint, DUPLICATE_EPSILON,
    MAX_TRAIL_POINTS,
};

// Re-export glam types for convenience
pub use glam::DVec3;
