//! Coordinate mapping between data space and visual space.
//!
//! Data space is the robot's native telemetry coordinate system; visual space
//! is the normalized, axis-size-scaled system used for rendering, centered at
//! the origin. The axis permutation is fixed: logical X feeds visual X,
//! logical Z feeds visual Y (height), and logical Y feeds visual Z (depth).
//! This reflects a Z-up data / Y-up visual convention and must never be
//! changed; swapping Y and Z silently breaks the world model.

use glam::DVec3;

use crate::axis::{AxisConfig, AxisSettings};

/// Maps one data-space value onto its visual axis.
///
/// A degenerate range (`max == min`) collapses to the axis center, `0.0`.
/// Finite input never produces NaN or infinity.
#[must_use]
pub fn map_axis_to_visual(value: f64, axis: &AxisSettings) -> f64 {
    let range = axis.max - axis.min;
    if range == 0.0 {
        return 0.0;
    }
    let visual = ((value - axis.min) / range - 0.5) * axis.size;
    if visual.is_finite() {
        visual
    } else {
        0.0
    }
}

/// Inverse of [`map_axis_to_visual`].
///
/// A zero `size` is treated as 1 to avoid dividing by zero; for
/// non-degenerate axes the round trip is exact to within ~1e-9.
#[must_use]
pub fn map_axis_to_data(visual: f64, axis: &AxisSettings) -> f64 {
    let size = if axis.size == 0.0 { 1.0 } else { axis.size };
    let pct = visual / size + 0.5;
    axis.min + pct * (axis.max - axis.min)
}

/// Maps a data-space point into visual space.
///
/// Applies the fixed axis permutation: `(x, y, z)` in data space becomes
/// `(x', z', y')` in visual space, each component scaled by its own axis
/// settings.
#[must_use]
pub fn map_to_visual(data: DVec3, config: &AxisConfig) -> DVec3 {
    DVec3::new(
        map_axis_to_visual(data.x, &config.x),
        map_axis_to_visual(data.z, &config.z),
        map_axis_to_visual(data.y, &config.y),
    )
}

/// Maps a visual-space point back into data space.
///
/// Exact algebraic inverse of [`map_to_visual`] for non-degenerate axes.
#[must_use]
pub fn map_to_data(visual: DVec3, config: &AxisConfig) -> DVec3 {
    DVec3::new(
        map_axis_to_data(visual.x, &config.x),
        map_axis_to_data(visual.z, &config.y),
        map_axis_to_data(visual.y, &config.z),
    )
}

/// Returns true iff each logical component of `data` lies within its axis
/// `[min, max]` range, inclusive.
#[must_use]
pub fn is_inside(data: DVec3, config: &AxisConfig) -> bool {
    in_range(data.x, &config.x) && in_range(data.y, &config.y) && in_range(data.z, &config.z)
}

fn in_range(value: f64, axis: &AxisSettings) -> bool {
    let (lo, hi) = if axis.min <= axis.max {
        (axis.min, axis.max)
    } else {
        (axis.max, axis.min)
    };
    value >= lo && value <= hi
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisConfig;
    use proptest::prelude::*;

    fn symmetric_config() -> AxisConfig {
        let axis = AxisSettings {
            min: -10.0,
            max: 10.0,
            size: 10.0,
            step: 1.0,
        };
        AxisConfig {
            x: axis,
            y: axis,
            z: axis,
        }
    }

    #[test]
    fn test_center_maps_to_origin() {
        let config = symmetric_config();
        assert_eq!(map_axis_to_visual(0.0, &config.x), 0.0);
    }

    #[test]
    fn test_bounds_map_to_half_size() {
        let config = symmetric_config();
        assert_eq!(map_axis_to_visual(10.0, &config.x), 5.0);
        assert_eq!(map_axis_to_visual(-10.0, &config.x), -5.0);
    }

    #[test]
    fn test_degenerate_range_collapses_to_zero() {
        let axis = AxisSettings {
            min: 3.0,
            max: 3.0,
            size: 10.0,
            step: 0.0,
        };
        assert_eq!(map_axis_to_visual(3.0, &axis), 0.0);
        assert_eq!(map_axis_to_visual(1e9, &axis), 0.0);
    }

    #[test]
    fn test_zero_size_collapses_to_zero() {
        let axis = AxisSettings {
            min: -1.0,
            max: 1.0,
            size: 0.0,
            step: 0.0,
        };
        assert_eq!(map_axis_to_visual(0.7, &axis), 0.0);
    }

    #[test]
    fn test_zero_size_inverse_has_no_nan() {
        let axis = AxisSettings {
            min: -1.0,
            max: 1.0,
            size: 0.0,
            step: 0.0,
        };
        assert!(map_axis_to_data(0.5, &axis).is_finite());
    }

    #[test]
    fn test_axis_permutation() {
        // Distinct sizes per axis so a swapped permutation is detectable.
        let config = AxisConfig {
            x: AxisSettings {
                min: -1.0,
                max: 1.0,
                size: 2.0,
                step: 0.0,
            },
            y: AxisSettings {
                min: -1.0,
                max: 1.0,
                size: 4.0,
                step: 0.0,
            },
            z: AxisSettings {
                min: -1.0,
                max: 1.0,
                size: 8.0,
                step: 0.0,
            },
        };
        let visual = map_to_visual(DVec3::new(1.0, 1.0, 1.0), &config);
        // data x -> visual x, data z -> visual y (height), data y -> visual z
        assert_eq!(visual, DVec3::new(1.0, 4.0, 2.0));
    }

    #[test]
    fn test_round_trip_point() {
        let config = symmetric_config();
        let data = DVec3::new(3.25, -7.5, 9.125);
        let back = map_to_data(map_to_visual(data, &config), &config);
        assert!((back - data).abs().max_element() < 1e-9);
    }

    #[test]
    fn test_inverted_range_still_maps() {
        let axis = AxisSettings {
            min: 10.0,
            max: -10.0,
            size: 10.0,
            step: 0.0,
        };
        // min maps to -0.5 * size even when the range is inverted
        assert_eq!(map_axis_to_visual(10.0, &axis), -5.0);
        assert_eq!(map_axis_to_visual(-10.0, &axis), 5.0);
    }

    #[test]
    fn test_is_inside() {
        let config = symmetric_config();
        assert!(is_inside(DVec3::new(0.0, 0.0, 0.0), &config));
        assert!(is_inside(DVec3::new(10.0, -10.0, 10.0), &config));
        assert!(!is_inside(DVec3::new(10.1, 0.0, 0.0), &config));
        assert!(!is_inside(DVec3::new(0.0, 0.0, -11.0), &config));
    }

    #[test]
    fn test_is_inside_inverted_range() {
        let mut config = symmetric_config();
        config.x.min = 10.0;
        config.x.max = -10.0;
        assert!(is_inside(DVec3::new(5.0, 0.0, 0.0), &config));
    }

    proptest! {
        #[test]
        fn prop_round_trip_within_epsilon(
            t in 0.0..=1.0f64,
            min in -500.0..500.0f64,
            span in 0.001..1_000.0f64,
            size in 0.001..100.0f64,
        ) {
            let axis = AxisSettings { min, max: min + span, size, step: 0.0 };
            let value = min + t * span;
            let back = map_axis_to_data(map_axis_to_visual(value, &axis), &axis);
            prop_assert!((back - value).abs() < 1e-9 * value.abs().max(1.0));
        }

        #[test]
        fn prop_never_non_finite(
            value in proptest::num::f64::NORMAL,
            min in -1e6..1e6f64,
            max in -1e6..1e6f64,
            size in -1e3..1e3f64,
        ) {
            let axis = AxisSettings { min, max, size, step: 0.0 };
            prop_assert!(map_axis_to_visual(value, &axis).is_finite());
        }
    }
}
