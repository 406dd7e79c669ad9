pub mod cone;
pub mod mesh;
pub mod presentation;

pub use cone::{ConeGeometry, FillState, GeometryError, build_geometry, fill_level};
pub use mesh::{GridMesh, Polyline, TriangleMesh};
pub use presentation::{LAYOUT, Presentation, build_presentation};

/// Everything one user interaction produces: geometry plus how to draw it.
pub struct SceneArtifacts {
    pub geometry: ConeGeometry,
    pub presentation: Presentation,
}

/// Composes the two pure halves of the engine. Invoked by the UI host on
/// every input change; no state survives between calls.
pub fn compute_scene(fill_fraction: f64, flipped: bool) -> Result<SceneArtifacts, GeometryError> {
    let geometry = build_geometry(FillState {
        fill_fraction,
        flipped,
    })?;
    Ok(SceneArtifacts {
        geometry,
        presentation: build_presentation(flipped),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_scene_composes_both_halves() {
        let scene = compute_scene(0.33, true).unwrap();
        assert_eq!(scene.geometry.surface_outline.points.len(), 100);
        assert!(scene.presentation.cone_opacity > scene.presentation.liquid_opacity);
    }

    #[test]
    fn test_compute_scene_rejects_contract_violation() {
        assert!(compute_scene(1.0, false).is_err());
    }
}
