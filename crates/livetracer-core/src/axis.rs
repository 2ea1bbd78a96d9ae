//! Per-axis plot configuration.
//!
//! The three axes define the bounding volume of the plot: each carries a data
//! range `[min, max]`, a visual `size`, and a grid `step`. The configuration
//! layer performs no cross-field validation; an inverted range (`min > max`)
//! is legal here and must be tolerated by the coordinate mapper.

use serde::{Deserialize, Serialize};

/// One of the three logical plot axes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// All axes, in x/y/z order.
    pub const ALL: [Axis; 3] = [Axis::X, Axis::Y, Axis::Z];
}

/// Settings for a single plot axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AxisSettings {
    /// Lower bound of the data range fed into this axis.
    pub min: f64,
    /// Upper bound of the data range fed into this axis.
    pub max: f64,
    /// Extent of the axis in visual units.
    pub size: f64,
    /// Grid line spacing in data units. Never negative.
    pub step: f64,
}

impl Default for AxisSettings {
    fn default() -> Self {
        Self {
            min: -1.0,
            max: 1.0,
            size: 1.0,
            step: 0.0,
        }
    }
}

/// A partial update to [`AxisSettings`], merged field-by-field.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct AxisUpdate {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub size: Option<f64>,
    pub step: Option<f64>,
}

/// The full three-axis configuration of the plot volume.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    pub x: AxisSettings,
    pub y: AxisSettings,
    pub z: AxisSettings,
}

impl AxisConfig {
    /// Creates a configuration with all axes at their defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the settings for a logical axis.
    #[must_use]
    pub fn get(&self, axis: Axis) -> &AxisSettings {
        match axis {
            Axis::X => &self.x,
            Axis::Y => &self.y,
            Axis::Z => &self.z,
        }
    }

    /// Merges a partial update into the named axis.
    ///
    /// `step` is clamped to `>= 0` on write. No other validation happens at
    /// this layer; consumers must handle degenerate ranges.
    pub fn set_axis(&mut self, axis: Axis, update: AxisUpdate) {
        let settings = match axis {
            Axis::X => &mut self.x,
            Axis::Y => &mut self.y,
            Axis::Z => &mut self.z,
        };
        if let Some(min) = update.min {
            settings.min = min;
        }
        if let Some(max) = update.max {
            settings.max = max;
        }
        if let Some(size) = update.size {
            settings.size = size;
        }
        if let Some(step) = update.step {
            settings.step = step.max(0.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let config = AxisConfig::new();
        assert_eq!(config.get(Axis::X).min, -1.0);
        assert_eq!(config.get(Axis::X).max, 1.0);
        assert_eq!(config.get(Axis::Y).step, 0.0);
    }

    #[test]
    fn test_partial_merge() {
        let mut config = AxisConfig::new();
        config.set_axis(
            Axis::Y,
            AxisUpdate {
                min: Some(-10.0),
                max: Some(10.0),
                ..AxisUpdate::default()
            },
        );
        assert_eq!(config.y.min, -10.0);
        assert_eq!(config.y.max, 10.0);
        // untouched fields keep their previous values
        assert_eq!(config.y.size, 1.0);
    }

    #[test]
    fn test_step_clamped_to_zero() {
        let mut config = AxisConfig::new();
        config.set_axis(
            Axis::Z,
            AxisUpdate {
                step: Some(-3.0),
                ..AxisUpdate::default()
            },
        );
        assert_eq!(config.z.step, 0.0);
    }

    #[test]
    fn test_inverted_range_accepted() {
        let mut config = AxisConfig::new();
        config.set_axis(
            Axis::X,
            AxisUpdate {
                min: Some(5.0),
                max: Some(-5.0),
                ..AxisUpdate::default()
            },
        );
        assert!(config.x.min > config.x.max);
    }
}
