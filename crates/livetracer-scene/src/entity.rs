//! Geometry entity types.
//!
//! An entity is one piece of user-authored or recorded geometry: a point
//! marker, a line, a cubic Bézier, a parametric surface, or a plane. The
//! payload is a tagged union keyed by the geometry type, so every consumer
//! matches exhaustively instead of poking at untyped fields.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default entity color (hex, as stored in exports).
pub const DEFAULT_COLOR: &str = "#2979ff";

/// Unique identifier of a geometry entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(String);

impl EntityId {
    /// Generates a fresh unique id.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Unique identifier of a geometry group.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupId(String);

impl GroupId {
    /// Generates a fresh unique id.
    #[must_use]
    pub fn fresh() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for GroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Marker shape for point entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointShape {
    Sphere,
    Box,
    Cone,
}

/// Stroke style for line-like entities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    Solid,
    Dashed,
}

/// Which coordinate system an entity's payload is expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateSpace {
    /// Plot space: normalized, axis-size-scaled, origin-centered.
    #[default]
    Plot,
    /// World space: raw scene units, bypassing the coordinate mapper.
    World,
}

/// A parametric surface equation.
///
/// Either a legacy height-field expression `z = f(x, y)` or a full component
/// triple in `u, v`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SurfaceEquation {
    Components { x: String, y: String, z: String },
    Legacy(String),
}

/// Sampling domain of a parametric surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UvDomain {
    pub u: [f64; 2],
    pub v: [f64; 2],
}

impl Default for UvDomain {
    fn default() -> Self {
        Self {
            u: [0.0, 1.0],
            v: [0.0, 1.0],
        }
    }
}

/// Type-specific geometry payload.
///
/// Serializes with the export format's shape: a `type` tag next to a `data`
/// object holding the variant fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "kebab-case")]
pub enum GeometryData {
    Point {
        position: [f64; 3],
        radius: f64,
        shape: PointShape,
    },
    #[serde(rename_all = "camelCase")]
    Line {
        start: [f64; 3],
        end: [f64; 3],
        thickness: f64,
        style: LineStyle,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        dash_size: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        gap_size: Option<f64>,
    },
    CubicBezier {
        start: [f64; 3],
        control1: [f64; 3],
        control2: [f64; 3],
        end: [f64; 3],
        thickness: f64,
        style: LineStyle,
    },
    Parametric {
        equation: SurfaceEquation,
        domain: UvDomain,
    },
    Plane {
        center: [f64; 3],
        normal: [f64; 3],
        width: f64,
        height: f64,
    },
}

impl GeometryData {
    /// Returns the wire name of this payload's type tag.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryData::Point { .. } => "point",
            GeometryData::Line { .. } => "line",
            GeometryData::CubicBezier { .. } => "cubic-bezier",
            GeometryData::Parametric { .. } => "parametric",
            GeometryData::Plane { .. } => "plane",
        }
    }
}

/// A geometry entity as stored in the scene graph.
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryEntity {
    pub id: EntityId,
    pub parent: Option<GroupId>,
    pub name: String,
    pub visible: bool,
    pub color: String,
    /// Opacity in `[0, 1]`, clamped on construction.
    pub opacity: f64,
    pub coordinate_space: CoordinateSpace,
    /// Whether to keep rendering when the payload leaves the plot bounds.
    pub visible_outside_graph: bool,
    pub data: GeometryData,
}

/// Input for creating an entity, with the documented defaults pre-filled:
/// visible, opacity 1, plot space, rendered outside the graph bounds.
#[derive(Debug, Clone, PartialEq)]
pub struct EntitySpec {
    pub name: String,
    pub parent: Option<GroupId>,
    pub visible: bool,
    pub color: String,
    pub opacity: f64,
    pub coordinate_space: CoordinateSpace,
    pub visible_outside_graph: bool,
    pub data: GeometryData,
}

impl EntitySpec {
    /// Creates a spec with default presentation attributes.
    #[must_use]
    pub fn new(name: impl Into<String>, data: GeometryData) -> Self {
        Self {
            name: name.into(),
            parent: None,
            visible: true,
            color: DEFAULT_COLOR.to_string(),
            opacity: 1.0,
            coordinate_space: CoordinateSpace::Plot,
            visible_outside_graph: true,
            data,
        }
    }

    /// Sets the parent group.
    #[must_use]
    pub fn parent(mut self, parent: GroupId) -> Self {
        self.parent = Some(parent);
        self
    }

    /// Sets the display color.
    #[must_use]
    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = color.into();
        self
    }

    /// Sets the opacity (clamped to `[0, 1]` when the entity is built).
    #[must_use]
    pub fn opacity(mut self, opacity: f64) -> Self {
        self.opacity = opacity;
        self
    }

    /// Sets initial visibility.
    #[must_use]
    pub fn visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Sets the coordinate space of the payload.
    #[must_use]
    pub fn coordinate_space(mut self, space: CoordinateSpace) -> Self {
        self.coordinate_space = space;
        self
    }

    pub(crate) fn build(self, id: EntityId, parent: Option<GroupId>) -> GeometryEntity {
        GeometryEntity {
            id,
            parent,
            name: self.name,
            visible: self.visible,
            color: self.color,
            opacity: self.opacity.clamp(0.0, 1.0),
            coordinate_space: self.coordinate_space,
            visible_outside_graph: self.visible_outside_graph,
            data: self.data,
        }
    }
}
