//! Geometry scene graph for livetracer-rs.
//!
//! This crate stores user-authored and recorded geometry:
//! - [`entity`]: typed geometry payloads (points, lines, Béziers, surfaces)
//! - [`group`] / [`scene`]: the arena-style entity/group hierarchy
//! - [`parametric`]: safe expression evaluation and surface tessellation
//! - [`io`]: export/import of parent-free tree snapshots
//! - [`trajectory`]: best-effort legacy trajectory import

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]
// Grid index arithmetic fits in u32 by construction
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]

pub mod entity;
pub mod group;
pub mod io;
pub mod parametric;
pub mod scene;
pub mod trajectory;

pub use entity::{
    CoordinateSpace, EntityId, EntitySpec, GeometryData, GeometryEntity, GroupId, LineStyle,
    PointShape, SurfaceEquation, UvDomain, DEFAULT_COLOR,
};
pub use group::GeometryGroup;
pub use io::{
    export_json, export_scene, import_document, import_json, serialize_entity, serialize_group,
    EntityPayload, GeometryDocument, GeometryNode, ImportReport, FORMAT_VERSION,
};
pub use parametric::{tessellate, Expr, SurfaceMesh, RESOLUTION};
pub use scene::{Placement, SceneGraph};
pub use trajectory::import_trajectories;
