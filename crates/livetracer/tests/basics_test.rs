//! Basic integration tests for livetracer-rs.

use livetracer_rs::*;

fn volume_axes() -> AxisConfig {
    let mut axes = AxisConfig::new();
    for axis in Axis::ALL {
        axes.set_axis(
            axis,
            AxisUpdate {
                min: Some(-10.0),
                max: Some(10.0),
                size: Some(10.0),
                ..AxisUpdate::default()
            },
        );
    }
    axes
}

#[test]
fn test_mapper_scenarios() {
    let axes = volume_axes();
    // x = 0 -> vx = 0; x = 10 -> vx = 5; x = -10 -> vx = -5
    assert_eq!(map_to_visual(DVec3::new(0.0, 0.0, 0.0), &axes).x, 0.0);
    assert_eq!(map_to_visual(DVec3::new(10.0, 0.0, 0.0), &axes).x, 5.0);
    assert_eq!(map_to_visual(DVec3::new(-10.0, 0.0, 0.0), &axes).x, -5.0);
}

#[test]
fn test_mapper_round_trip() {
    let axes = volume_axes();
    let data = DVec3::new(1.5, -9.0, 4.25);
    let back = map_to_data(map_to_visual(data, &axes), &axes);
    assert!((back - data).abs().max_element() < 1e-9);
}

#[test]
fn test_live_position_flows_into_trail() {
    let mut session = Session::new();
    session.axes = volume_axes();
    session.mapping.assign(Axis::X, Some("pose_x".to_string()));
    session.mapping.assign(Axis::Y, Some("pose_y".to_string()));

    for i in 0..4 {
        session.telemetry.set_state(
            [
                ("pose_x".to_string(), TelemetryValue::Number(f64::from(i))),
                ("pose_y".to_string(), TelemetryValue::Number(1.0)),
            ]
            .into_iter()
            .collect(),
        );
        session.tick(f64::from(i) * 0.05);
    }
    assert_eq!(session.trail.point_count(), 4);
    assert!(session.robot_inside_graph());
}

#[test]
fn test_temporary_trail_honors_window() {
    let mut session = Session::new();
    session.axes = volume_axes();
    session.mapping.assign(Axis::X, Some("x".to_string()));
    session.trail.set_mode(TrailMode::Temporary);
    session.trail.set_unit(TemporalUnit::Updates);
    session.trail.set_temp_length(3.0);

    for i in 0..10 {
        session.telemetry.set_state(
            [("x".to_string(), TelemetryValue::Number(f64::from(i)))]
                .into_iter()
                .collect(),
        );
        session.tick(f64::from(i));
    }
    assert!(session.trail.point_count() <= 3);
}

#[test]
fn test_parametric_surface_mesh_counts() {
    let axes = volume_axes();
    let equation = SurfaceEquation::Components {
        x: "u".to_string(),
        y: "v".to_string(),
        z: "0".to_string(),
    };
    let mesh = tessellate(&equation, &UvDomain::default(), &axes).unwrap();
    assert_eq!(mesh.positions.len(), 51 * 51);
    assert_eq!(mesh.indices.len(), 50 * 50 * 2);
    // flat surface: every vertex sits at the mapped height of data z = 0
    let expected = map_to_visual(DVec3::new(0.0, 0.0, 0.0), &axes).y;
    assert!(mesh.positions.iter().all(|p| p.y == expected));
}

#[test]
fn test_scene_lifecycle_and_reparent() {
    let mut scene = SceneGraph::new();
    let top = scene.add_group("run", None, true);
    let nested = scene.add_group("markers", Some(&top), true);
    let entity = scene.add_entity(
        EntitySpec::new(
            "start",
            GeometryData::Point {
                position: [0.0, 0.0, 0.0],
                radius: 0.5,
                shape: PointShape::Sphere,
            },
        )
        .parent(nested.clone()),
    );

    // a group can never become its own descendant
    assert!(scene.reparent_group(&top, Some(&nested)).is_err());

    scene.remove_group_promote(&nested).unwrap();
    assert_eq!(scene.entity(&entity).unwrap().parent, Some(top.clone()));

    scene.remove_group_cascade(&top).unwrap();
    assert!(scene.is_empty());
}

#[test]
fn test_export_import_round_trip() {
    let mut scene = SceneGraph::new();
    let group = scene.add_group("authored", None, true);
    scene.add_entity(
        EntitySpec::new(
            "ray",
            GeometryData::Line {
                start: [0.0, 0.0, 0.0],
                end: [1.0, 2.0, 3.0],
                thickness: 0.1,
                style: LineStyle::Solid,
                dash_size: None,
                gap_size: None,
            },
        )
        .parent(group),
    );

    let json = export_json(&scene).unwrap();
    let mut restored = SceneGraph::new();
    let report = import_json(&mut restored, &json).unwrap();
    assert_eq!(report.groups, 1);
    assert_eq!(report.entities, 1);
    assert_eq!(restored.num_entities(), 1);
}

#[test]
fn test_trajectory_import_shape() {
    let json = r##"{
        "trajectories": [{
            "_name": "auto",
            "_isVisible": true,
            "_color": "#ffaa00",
            "_controlPoints": [
                {"_x": 0.0, "_y": 0.0},
                {"_x": 5.0, "_y": 5.0},
                {"_x": 10.0, "_y": 0.0}
            ]
        }]
    }"##;
    let mut scene = SceneGraph::new();
    import_trajectories(&mut scene, json).unwrap();

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
