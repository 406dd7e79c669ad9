use std::f64::consts::TAU;

use thiserror::Error;

use crate::geometry::mesh::{GridMesh, Polyline, linspace};

/// The cone is a fixed unit right circular cone.
pub const BASE_RADIUS: f64 = 1.0;
pub const HEIGHT: f64 = 1.0;

pub const SHELL_ANGULAR_SAMPLES: usize = 50;
pub const SHELL_AXIAL_SAMPLES: usize = 50;
pub const LIQUID_AXIAL_SAMPLES: usize = 25;
pub const OUTLINE_SAMPLES: usize = 100;

/// Current user input, rebuilt from the controls on every recompute.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FillState {
    pub fill_fraction: f64,
    pub flipped: bool,
}

#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("fill fraction must lie strictly inside (0, 1), got {0}")]
    FillFractionOutOfRange(f64),
}

/// The three geometric artifacts of one recompute.
pub struct ConeGeometry {
    pub shell: GridMesh,
    pub liquid: GridMesh,
    pub surface_outline: Polyline,
}

/// Height of the liquid's top surface in the unflipped parameterization.
///
/// Tip down fills apex-up, so the height enclosing a volume fraction f
/// satisfies h^3 = 1 - (1 - f)^3. Tip up instead uses the linear complement
/// of the fraction; the two branches deliberately do not agree on enclosed
/// volume.
pub fn fill_level(state: FillState) -> f64 {
    let fill_height = HEIGHT - state.fill_fraction;
    if state.flipped {
        fill_height
    } else {
        (1.0 - fill_height.powi(3)).cbrt()
    }
}

/// Builds the cone shell, liquid volume, and liquid surface outline for the
/// given input. Pure and deterministic: equal inputs give identical arrays.
pub fn build_geometry(state: FillState) -> Result<ConeGeometry, GeometryError> {
    if !(state.fill_fraction > 0.0 && state.fill_fraction < 1.0) {
        return Err(GeometryError::FillFractionOutOfRange(state.fill_fraction));
    }

    let level = fill_level(state);

    let mut shell = sample_cone(SHELL_AXIAL_SAMPLES, HEIGHT);
    let mut liquid = sample_cone(LIQUID_AXIAL_SAMPLES, level);

    if state.flipped {
        shell.flip_heights();
        liquid.flip_heights();
    }

    let surface_outline = Polyline::circle(OUTLINE_SAMPLES, level, level);

    Ok(ConeGeometry {
        shell,
        liquid,
        surface_outline,
    })
}

/// Samples the upright cone surface up to `z_top`: theta over a full turn,
/// z linearly spaced, radius tapering from 0 at the apex to the base radius
/// at full height.
fn sample_cone(axial_samples: usize, z_top: f64) -> GridMesh {
    let thetas = linspace(0.0, TAU, SHELL_ANGULAR_SAMPLES);
    let levels = linspace(0.0, z_top, axial_samples);

    let mut grid = GridMesh::with_capacity(axial_samples, SHELL_ANGULAR_SAMPLES);
    for &z in &levels {
        let r = (z / HEIGHT) * BASE_RADIUS;
        for &theta in &thetas {
            grid.push(r * theta.cos(), r * theta.sin(), z);
        }
    }
    grid
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(fill_fraction: f64, flipped: bool) -> FillState {
        FillState {
            fill_fraction,
            flipped,
        }
    }

    #[test]
    fn test_shell_taper_law() {
        for flipped in [false, true] {
            let geo = build_geometry(state(0.33, flipped)).unwrap();
            let shell = &geo.shell;
            assert_eq!(shell.rows, SHELL_AXIAL_SAMPLES);
            assert_eq!(shell.cols, SHELL_ANGULAR_SAMPLES);
            for row in 0..shell.rows {
                for col in 0..shell.cols {
                    let [x, y, z] = shell.point(row, col);
                    // Radius at each sample matches the taper in the
                    // unflipped parameterization.
                    let unflipped_z = if flipped { 1.0 - z } else { z };
                    let expected_r = (unflipped_z / HEIGHT) * BASE_RADIUS;
                    let r = (x * x + y * y).sqrt();
                    assert!((r - expected_r).abs() < 1e-10);
                }
            }
        }
    }

    #[test]
    fn test_shell_radius_monotonic_in_axial_sample() {
        let geo = build_geometry(state(0.5, false)).unwrap();
        for row in 1..geo.shell.rows {
            let [x0, y0, _] = geo.shell.point(row - 1, 0);
            let [x1, y1, _] = geo.shell.point(row, 0);
            let r0 = (x0 * x0 + y0 * y0).sqrt();
            let r1 = (x1 * x1 + y1 * y1).sqrt();
            assert!(r1 >= r0);
        }
    }

    #[test]
    fn test_tip_down_fill_level_known_values() {
        // h = (1 - (1 - f)^3)^(1/3)
        assert!((fill_level(state(0.01, false)) - 0.309_690).abs() < 1e-5);
        assert!((fill_level(state(0.5, false)) - 0.956_466).abs() < 1e-5);
        assert!((fill_level(state(0.99, false)) - 0.999_999_7).abs() < 1e-6);
    }

    #[test]
    fn test_tip_down_fill_level_monotonic() {
        let mut prev = 0.0;
        for i in 1..99 {
            let f = i as f64 / 100.0;
            let level = fill_level(state(f, false));
            assert!(level > prev);
            prev = level;
        }
    }

    #[test]
    fn test_tip_up_fill_level_is_linear_complement() {
        assert!((fill_level(state(0.33, true)) - 0.67).abs() < 1e-10);
        let mut prev = 1.0;
        for i in 1..99 {
            let f = i as f64 / 100.0;
            let level = fill_level(state(f, true));
            assert!(level < prev);
            prev = level;
        }
    }

    #[test]
    fn test_liquid_extent_per_orientation() {
        let tip_down = build_geometry(state(0.33, false)).unwrap();
        let max_z = tip_down.liquid.zs.iter().cloned().fold(0.0, f64::max);
        assert!((max_z - fill_level(state(0.33, false))).abs() < 1e-10);
        let min_z = tip_down.liquid.zs.iter().cloned().fold(1.0, f64::min);
        assert!(min_z.abs() < 1e-10);

        // Flipped: sampled over [0, 1 - f], then reflected to [f, 1].
        let tip_up = build_geometry(state(0.33, true)).unwrap();
        let max_z = tip_up.liquid.zs.iter().cloned().fold(0.0, f64::max);
        let min_z = tip_up.liquid.zs.iter().cloned().fold(1.0, f64::min);
        assert!((max_z - 1.0).abs() < 1e-10);
        assert!((min_z - 0.33).abs() < 1e-10);
        assert_eq!(tip_up.liquid.rows, LIQUID_AXIAL_SAMPLES);
        assert_eq!(tip_up.liquid.cols, SHELL_ANGULAR_SAMPLES);
    }

    #[test]
    fn test_outline_flipped() {
        let geo = build_geometry(state(0.33, true)).unwrap();
        let ring = &geo.surface_outline;
        assert_eq!(ring.points.len(), OUTLINE_SAMPLES);
        for [x, y, z] in &ring.points {
            let r = (x * x + y * y).sqrt();
            assert!((r - 0.67).abs() < 1e-10);
            assert!((z - 0.67).abs() < 1e-10);
        }
    }

    #[test]
    fn test_outline_tip_down_sits_at_fill_level() {
        let f = 0.5;
        let geo = build_geometry(state(f, false)).unwrap();
        let level = fill_level(state(f, false));
        for [x, y, z] in &geo.surface_outline.points {
            let r = (x * x + y * y).sqrt();
            assert!((r - level).abs() < 1e-10);
            assert!((z - level).abs() < 1e-10);
        }
    }

    #[test]
    fn test_engine_is_deterministic() {
        let a = build_geometry(state(0.42, true)).unwrap();
        let b = build_geometry(state(0.42, true)).unwrap();
        assert_eq!(a.shell, b.shell);
        assert_eq!(a.liquid, b.liquid);
        assert_eq!(a.surface_outline, b.surface_outline);
    }

    #[test]
    fn test_out_of_range_fill_fraction_rejected() {
        for bad in [0.0, 1.0, -0.2, 1.5, f64::NAN] {
            assert!(build_geometry(state(bad, false)).is_err());
        }
        assert!(build_geometry(state(0.01, false)).is_ok());
        assert!(build_geometry(state(0.99, true)).is_ok());
    }
}
