//! Per-application session state.
//!
//! A [`Session`] wires the pure-data subsystems together: the telemetry
//! store feeds the coordinate mapper, whose output feeds the trail engine
//! and the live robot position; record actions drop geometry into the scene
//! graph. One `Session` is constructed per application run and passed by
//! reference to consumers; nothing here is global.
//!
//! The host runtime drives [`Session::tick`] from its render loop. Within a
//! tick the engine sees the latest telemetry only; intermediate updates
//! between ticks are dropped (last-write-wins).

use glam::DVec3;

use livetracer_core::axis::AxisConfig;
use livetracer_core::mapper::{is_inside, map_to_visual};
use livetracer_core::telemetry::{SnapshotStore, TelemetryMapping};
use livetracer_core::trail::TrailEngine;
use livetracer_scene::entity::{EntitySpec, GeometryData, GroupId, LineStyle, PointShape};
use livetracer_scene::scene::SceneGraph;

/// All mutable state of one visualizer session.
#[derive(Debug, Default)]
pub struct Session {
    pub telemetry: SnapshotStore,
    pub mapping: TelemetryMapping,
    pub axes: AxisConfig,
    pub scene: SceneGraph,
    pub trail: TrailEngine,
}

impl Session {
    /// Creates a session with default axes, an empty scene, and an empty
    /// trail.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The robot's current data-space position, sampled from telemetry
    /// through the axis mapping.
    #[must_use]
    pub fn robot_data_position(&self) -> DVec3 {
        self.mapping.sample(&self.telemetry)
    }

    /// The robot's current visual-space position.
    #[must_use]
    pub fn robot_visual_position(&self) -> DVec3 {
        map_to_visual(self.robot_data_position(), &self.axes)
    }

    /// Whether the robot is currently inside the plot bounding volume.
    #[must_use]
    pub fn robot_inside_graph(&self) -> bool {
        is_inside(self.robot_data_position(), &self.axes)
    }

    /// Runs one cooperative tick at elapsed time `now`: samples the latest
    /// telemetry, maps it, offers the point to the trail, and returns the
    /// visual position for rendering.
    pub fn tick(&mut self, now: f64) -> DVec3 {
        let visual = self.robot_visual_position();
        self.trail.push(visual, now);
        self.trail.apply_retention(now);
        visual
    }

    /// Records the robot's current position as a point entity in the scene.
    pub fn record_position(&mut self, name: impl Into<String>) -> livetracer_scene::EntityId {
        let visual = self.robot_visual_position();
        self.scene.add_entity(EntitySpec::new(
            name,
            GeometryData::Point {
                position: visual.to_array(),
                radius: 0.02,
                shape: PointShape::Sphere,
            },
        ))
    }

    /// Records the current trail as line entities inside a new group, one
    /// polyline segment per unbroken trail run.
    pub fn record_trail(&mut self, name: impl Into<String>) -> GroupId {
        let group = self.scene.add_group(name, None, true);
        for segment in self.trail.segments() {
            for pair in segment.windows(2) {
                self.scene.add_entity(
                    EntitySpec::new(
                        "trail segment",
                        GeometryData::Line {
                            start: pair[0].pos.to_array(),
                            end: pair[1].pos.to_array(),
                            thickness: 0.01,
                            style: LineStyle::Solid,
                            dash_size: None,
                            gap_size: None,
                        },
                    )
                    .parent(group.clone()),
                );
            }
        }
        group
    }

    /// Clears telemetry, trail, and scene back to a fresh session.
    pub fn reset(&mut self) {
        self.telemetry.clear();
        self.trail.clear();
        self.scene.clear();
        log::info!("session reset");
    }
}
