//! Uniform-grid tessellation of parametric surfaces.

use glam::DVec3;
use livetracer_core::axis::AxisConfig;
use livetracer_core::error::Result;
use livetracer_core::mapper::map_to_visual;

use crate::entity::{SurfaceEquation, UvDomain};
use crate::parametric::expr::{Expr, Var};

/// Grid resolution: `(RESOLUTION + 1)²` samples per surface.
pub const RESOLUTION: usize = 50;

/// A triangulated surface mesh in visual space.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceMesh {
    pub positions: Vec<DVec3>,
    pub indices: Vec<[u32; 3]>,
}

/// Samples `equation` over `domain` on a uniform grid and triangulates it.
///
/// Every data-space sample is mapped through the coordinate mapper. A sample
/// whose evaluation is non-finite (divide by zero, log of a negative, ...)
/// contributes `0` for that component; pathological input never aborts the
/// surface. An equation that fails to parse is malformed input and returns
/// an error before any sampling happens.
pub fn tessellate(
    equation: &SurfaceEquation,
    domain: &UvDomain,
    axes: &AxisConfig,
) -> Result<SurfaceMesh> {
    let (x_expr, y_expr, z_expr) = parse_equation(equation)?;

    let n = RESOLUTION;
    let side = n + 1;
    let mut positions = Vec::with_capacity(side * side);
    for i in 0..side {
        let u = lerp(domain.u, i as f64 / n as f64);
        for j in 0..side {
            let v = lerp(domain.v, j as f64 / n as f64);
            let data = DVec3::new(
                finite_or_zero(x_expr.eval(u, v)),
                finite_or_zero(y_expr.eval(u, v)),
                finite_or_zero(z_expr.eval(u, v)),
            );
            positions.push(map_to_visual(data, axes));
        }
    }

    let mut indices = Vec::with_capacity(n * n * 2);
    for i in 0..n {
        for j in 0..n {
            let a = (i * side + j) as u32;
            let b = a + 1;
            let d = a + side as u32;
            let c = d + 1;
            indices.push([a, b, d]);
            indices.push([b, c, d]);
        }
    }

    Ok(SurfaceMesh { positions, indices })
}

fn parse_equation(equation: &SurfaceEquation) -> Result<(Expr, Expr, Expr)> {
    match equation {
        SurfaceEquation::Components { x, y, z } => {
            Ok((Expr::parse(x)?, Expr::parse(y)?, Expr::parse(z)?))
        }
        SurfaceEquation::Legacy(expr) => {
            // height field z = f(x, y): the grid spans the x/y plane directly
            let trimmed = expr.trim();
            let body = trimmed
                .strip_prefix('z')
                .map(str::trim_start)
                .and_then(|rest| rest.strip_prefix('='))
                .unwrap_or(trimmed);
            Ok((
                Expr::Var(Var::U),
                Expr::Var(Var::V),
                Expr::parse(body)?,
            ))
        }
    }
}

fn lerp(range: [f64; 2], t: f64) -> f64 {
    range[0] + (range[1] - range[0]) * t
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use livetracer_core::axis::AxisSettings;
    use livetracer_core::mapper::map_axis_to_visual;

    fn flat_equation() -> SurfaceEquation {
        SurfaceEquation::Components {
            x: "u".to_string(),
            y: "v".to_string(),
            z: "0".to_string(),
        }
    }

    #[test]
    fn test_grid_dimensions() {
        let mesh = tessellate(&flat_equation(), &UvDomain::default(), &AxisConfig::new()).unwrap();
        assert_eq!(mesh.positions.len(), 51 * 51);
        assert_eq!(mesh.indices.len(), 50 * 50 * 2);
    }

    #[test]
    fn test_flat_surface_maps_to_plane() {
        let axes = AxisConfig::new();
        let mesh = tessellate(&flat_equation(), &UvDomain::default(), &axes).unwrap();
        // data z = 0 feeds visual y (height); must match the mapper exactly
        let expected_height = map_axis_to_visual(0.0, &axes.z);
        for position in &mesh.positions {
            assert_eq!(position.y, expected_height);
        }
    }

    #[test]
    fn test_triangle_indices_in_bounds() {
        let mesh = tessellate(&flat_equation(), &UvDomain::default(), &AxisConfig::new()).unwrap();
        let count = mesh.positions.len() as u32;
        for tri in &mesh.indices {
            assert!(tri.iter().all(|&i| i < count));
        }
        // first cell triangulation: (a,b,d) and (b,c,d)
        assert_eq!(mesh.indices[0], [0, 1, 51]);
        assert_eq!(mesh.indices[1], [1, 52, 51]);
    }

    #[test]
    fn test_legacy_height_field() {
        let axes = AxisConfig::new();
        let equation = SurfaceEquation::Legacy("z=x*y".to_string());
        let domain = UvDomain {
            u: [0.0, 2.0],
            v: [0.0, 2.0],
        };
        let mesh = tessellate(&equation, &domain, &axes).unwrap();
        // last sample: u = v = 2, so data (2, 2, 4)
        let expected = livetracer_core::mapper::map_to_visual(DVec3::new(2.0, 2.0, 4.0), &axes);
        assert_eq!(*mesh.positions.last().unwrap(), expected);
    }

    #[test]
    fn test_singular_samples_substituted_with_zero() {
        let axes = AxisConfig {
            x: AxisSettings::default(),
            y: AxisSettings::default(),
            z: AxisSettings::default(),
        };
        let equation = SurfaceEquation::Components {
            x: "u".to_string(),
            y: "v".to_string(),
            z: "1 / (u - 0.5)".to_string(),
        };
        let mesh = tessellate(&equation, &UvDomain::default(), &axes).unwrap();
        assert_eq!(mesh.positions.len(), 51 * 51);
        assert!(mesh.positions.iter().all(|p| p.is_finite()));
    }

    #[test]
    fn test_unparsable_equation_is_an_error() {
        let equation = SurfaceEquation::Legacy("z=1 +".to_string());
        assert!(tessellate(&equation, &UvDomain::default(), &AxisConfig::new()).is_err());
    }
}
