//! Legacy trajectory import.
//!
//! Best-effort reader for the external path-planner format: named
//! trajectories made of 2D control points whose Bézier handles are polar
//! offsets from the point. Each control point becomes a point entity and
//! each consecutive pair becomes a cubic Bézier whose inner controls are
//! derived from the outgoing handle of the first point and the incoming
//! handle of the second.

use serde::Deserialize;

use livetracer_core::error::{Result, TracerError};

use crate::entity::{EntitySpec, GeometryData, GroupId, LineStyle, PointShape, DEFAULT_COLOR};
use crate::scene::SceneGraph;

const POINT_RADIUS: f64 = 0.5;
const SEGMENT_THICKNESS: f64 = 0.1;

#[derive(Debug, Deserialize)]
struct TrajectoryFile {
    trajectories: Vec<Trajectory>,
}

#[derive(Debug, Deserialize)]
struct Trajectory {
    #[serde(rename = "_name", default)]
    name: Option<String>,
    #[serde(rename = "_isVisible", default = "default_visible")]
    visible: bool,
    #[serde(rename = "_color", default)]
    color: Option<String>,
    #[serde(rename = "_controlPoints", default)]
    control_points: Vec<ControlPoint>,
}

#[derive(Debug, Deserialize)]
struct ControlPoint {
    #[serde(rename = "_x", default)]
    x: f64,
    #[serde(rename = "_y", default)]
    y: f64,
    #[serde(rename = "_name", default)]
    name: Option<String>,
    #[serde(rename = "_handleIn", default)]
    handle_in: Option<PolarHandle>,
    #[serde(rename = "_handleOut", default)]
    handle_out: Option<PolarHandle>,
}

fn default_visible() -> bool {
    true
}

#[derive(Debug, Default, Clone, Copy, Deserialize)]
struct PolarHandle {
    #[serde(rename = "_r", default)]
    r: f64,
    #[serde(rename = "_theta", default)]
    theta: f64,
}

impl ControlPoint {
    fn position(&self) -> [f64; 3] {
        [self.x, self.y, 0.0]
    }

    /// Offsets the base point by a polar handle: `(x + r·cos θ, y + r·sin θ)`.
    fn offset_by(&self, handle: Option<PolarHandle>) -> [f64; 3] {
        let handle = handle.unwrap_or_default();
        [
            self.x + handle.r * handle.theta.cos(),
            self.y + handle.r * handle.theta.sin(),
            0.0,
        ]
    }
}

/// Imports a legacy trajectory file into a new group under the root.
///
/// Returns the id of the created import group. A payload that fails to
/// parse aborts with zero side effects on the scene.
pub fn import_trajectories(scene: &mut SceneGraph, json: &str) -> Result<GroupId> {
    let file: TrajectoryFile =
        serde_json::from_str(json).map_err(|e| TracerError::MalformedImport(e.to_string()))?;

    let import_group = scene.add_group("imported trajectories", None, true);
    for (index, trajectory) in file.trajectories.iter().enumerate() {
        let name = trajectory
            .name
            .clone()
            .unwrap_or_else(|| format!("trajectory {}", index + 1));
        let color = trajectory
            .color
            .clone()
            .unwrap_or_else(|| DEFAULT_COLOR.to_string());
        let group = scene.add_group(name, Some(&import_group), trajectory.visible);

        for (i, point) in trajectory.control_points.iter().enumerate() {
            let point_name = point
                .name
                .clone()
                .unwrap_or_else(|| format!("control point {}", i + 1));
            scene.add_entity(
                EntitySpec::new(
                    point_name,
                    GeometryData::Point {
                        position: point.position(),
                        radius: POINT_RADIUS,
                        shape: PointShape::Sphere,
                    },
                )
                .parent(group.clone())
                .color(color.clone()),
            );
        }

        for (i, pair) in trajectory.control_points.windows(2).enumerate() {
            let (from, to) = (&pair[0], &pair[1]);
            scene.add_entity(
                EntitySpec::new(
                    format!("segment {}", i + 1),
                    GeometryData::CubicBezier {
                        start: from.position(),
                        control1: from.offset_by(from.handle_out),
                        control2: to.offset_by(to.handle_in),
                        end: to.position(),
                        thickness: SEGMENT_THICKNESS,
                        style: LineStyle::Solid,
                    },
                )
                .parent(group.clone())
                .color(color.clone()),
            );
        }
    }
    log::info!("imported {} trajector(ies)", file.trajectories.len());
    Ok(import_group)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_points_become_points_and_beziers() {
        let json = r##"{
            "trajectories": [{
                "_name": "auto path",
                "_isVisible": true,
                "_color": "#00ff00",
                "_controlPoints": [
                    {"_x": 0.0, "_y": 0.0},
                    {"_x": 10.0, "_y": 5.0},
                    {"_x": 20.0, "_y": 0.0}
                ]
            }]
        }"##;
        let mut scene = SceneGraph::new();
        let import_group = import_trajectories(&mut scene, json).unwrap();

        let children = scene.group(&import_group).unwrap().children_groups();
        assert_eq!(children.len(), 1);
        let path_group = scene.group(&children[0]).unwrap();
        assert_eq!(path_group.name, "auto path");
        assert_eq!(path_group.children_entities().len(), 5);

        let points = scene
            .entities()
            .filter(|e| matches!(e.data, GeometryData::Point { .. }))
            .count();
        let beziers = scene
            .entities()
            .filter(|e| matches!(e.data, GeometryData::CubicBezier { .. }))
            .count();
        assert_eq!(points, 3);
        assert_eq!(beziers, 2);
    }

    #[test]
    fn test_missing_handles_default_to_zero_offset() {
        let json = r#"{
            "trajectories": [{
                "_controlPoints": [
                    {"_x": 1.0, "_y": 2.0},
                    {"_x": 3.0, "_y": 4.0}
                ]
            }]
        }"#;
        let mut scene = SceneGraph::new();
        import_trajectories(&mut scene, json).unwrap();

        let bezier = scene
            .entities()
            .find(|e| matches!(e.data, GeometryData::CubicBezier { .. }))
            .unwrap();
        let GeometryData::CubicBezier {
            start,
            control1,
            control2,
            end,
            ..
        } = bezier.data
        else {
            unreachable!()
        };
        // zero-length handles collapse the controls onto the endpoints
        assert_eq!(control1, start);
        assert_eq!(control2, end);
    }

    #[test]
    fn test_polar_handles_offset_controls() {
        let json = r#"{
            "trajectories": [{
                "_controlPoints": [
                    {"_x": 0.0, "_y": 0.0, "_handleOut": {"_r": 2.0, "_theta": 0.0}},
                    {"_x": 10.0, "_y": 0.0, "_handleIn": {"_r": 3.0, "_theta": 3.141592653589793}}
                ]
            }]
        }"#;
        let mut scene = SceneGraph::new();
        import_trajectories(&mut scene, json).unwrap();

        let bezier = scene
            .entities()
            .find(|e| matches!(e.data, GeometryData::CubicBezier { .. }))
            .unwrap();
        let GeometryData::CubicBezier {
            control1, control2, ..
        } = bezier.data
        else {
            unreachable!()
        };
        assert!((control1[0] - 2.0).abs() < 1e-12);
        assert!((control2[0] - 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_malformed_file_leaves_scene_untouched() {
        let mut scene = SceneGraph::new();
        assert!(import_trajectories(&mut scene, "{\"nope\": []}").is_err());
        assert!(scene.is_empty());
    }
}
