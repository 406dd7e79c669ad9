use crate::renderer::CameraMode;

/// Control-panel state. The fill slider and orientation checkbox mirror the
/// engine's input contract: fraction in [0.01, 0.99] step 0.01, tip-up on
/// by default.
pub struct UiState {
    pub fill_fraction: f32,
    pub flipped: bool,

    pub camera_mode: CameraMode,
    pub show_axes: bool,
    pub show_stats: bool,
    pub vsync_enabled: bool,

    pub fps_cap_enabled: bool,
    pub fps_cap: u32,

    pub scene_dirty: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            fill_fraction: 0.33,
            flipped: true,

            camera_mode: CameraMode::Orbital,
            show_axes: true,
            show_stats: true,
            vsync_enabled: true,

            fps_cap_enabled: false,
            fps_cap: 144,

            scene_dirty: true,
        }
    }
}
