//! LiveTracer: the coordinate-mapping and trail-management core of a
//! browser-based 3D robot telemetry visualizer.
//!
//! The rendering engine, UI, and transport are external collaborators; this
//! workspace holds the pure-data logic they drive:
//!
//! - telemetry snapshot store with subscribe/notify
//! - per-axis plot configuration and data↔visual coordinate mapping
//! - the geometry scene graph (entities, groups, import/export)
//! - parametric surface tessellation from user formula strings
//! - the bounded, aging, segmentable motion trail
//!
//! # Example
//!
//! ```
//! use livetracer_rs::*;
//!
//! let mut session = Session::new();
//! session.axes.set_axis(
//!     Axis::X,
//!     AxisUpdate { min: Some(-10.0), max: Some(10.0), size: Some(10.0), ..Default::default() },
//! );
//! session.mapping.assign(Axis::X, Some("x".to_string()));
//!
//! session.telemetry.set_state(
//!     [("x".to_string(), TelemetryValue::Number(10.0))].into_iter().collect(),
//! );
//! let visual = session.tick(0.0);
//! assert_eq!(visual.x, 5.0);
//! ```

pub mod session;

pub use session::Session;

pub use livetracer_core::axis::{Axis, AxisConfig, AxisSettings, AxisUpdate};
pub use livetracer_core::error::{Result, TracerError};
pub use livetracer_core::mapper::{is_inside, map_to_data, map_to_visual};
pub use livetracer_core::telemetry::{
    SnapshotStore, SubscriptionId, TelemetryMapping, TelemetrySnapshot, TelemetryValue,
};
pub use livetracer_core::trail::{
    TemporalUnit, TrailEngine, TrailMarker, TrailMode, TrailPoint, DUPLICATE_EPSILON,
    MAX_TRAIL_POINTS,
};
pub use livetracer_scene::{
    export_json, export_scene, import_document, import_json, import_trajectories, tessellate,
    CoordinateSpace, EntityId, EntitySpec, GeometryData, GeometryDocument, GeometryEntity,
    GeometryGroup, GeometryNode, GroupId, ImportReport, LineStyle, Placement, PointShape,
    SceneGraph, SurfaceEquation, SurfaceMesh, UvDomain, RESOLUTION,
};

// Re-export glam types for convenience
pub use glam::DVec3;

/// Initializes env_logger for binaries and examples embedding the core.
///
/// Safe to call more than once; later calls are no-ops.
pub fn init_logging() {
    let _ = env_logger::try_init();
}
