use egui::{Color32, Context, RichText, ScrollArea, Ui};

use crate::geometry::presentation::LAYOUT;
use crate::geometry::{FillState, fill_level};
use crate::renderer::CameraMode;
use crate::ui::state::UiState;
use crate::ui::theme::*;

#[derive(Default)]
pub struct UiActions {
    pub reset_camera: bool,
}

pub fn draw_side_panel(
    ctx: &Context,
    state: &mut UiState,
    fps: f32,
    triangle_count: u32,
) -> UiActions {
    let mut actions = UiActions::default();

    egui::SidePanel::right("control_panel")
        .min_width(300.0)
        .max_width(380.0)
        .default_width(320.0)
        .frame(egui::Frame::default().fill(BG_PANEL).inner_margin(16.0))
        .show(ctx, |ui| {
            ScrollArea::vertical().show(ui, |ui| {
                ui.heading(RichText::new("Cone Volume Visualizer").strong());
                ui.add_space(4.0);
                ui.label(
                    RichText::new("Fill height vs orientation")
                        .color(TEXT_MUTED)
                        .size(11.0),
                );
                ui.add_space(8.0);
                ui.label(
                    RichText::new(
                        "Adjust the fill and flip the cone: the volume stays put, \
                         but the perceived fill height changes drastically.",
                    )
                    .color(TEXT_MUTED)
                    .size(11.0)
                    .italics(),
                );
                ui.add_space(16.0);
                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "LIQUID");
                let mut changed = false;
                ui.horizontal(|ui| {
                    ui.label("Fill:");
                    changed |= ui
                        .add(
                            egui::Slider::new(&mut state.fill_fraction, 0.01..=0.99)
                                .step_by(0.01)
                                .fixed_decimals(2),
                        )
                        .changed();
                });
                changed |= ui
                    .checkbox(&mut state.flipped, "Flip Cone (Tip Up)")
                    .changed();
                if changed {
                    state.scene_dirty = true;
                }
                ui.add_space(8.0);

                let level = fill_level(FillState {
                    fill_fraction: state.fill_fraction as f64,
                    flipped: state.flipped,
                });
                ui.horizontal(|ui| {
                    ui.label(RichText::new("Liquid level:").color(TEXT_MUTED));
                    ui.label(
                        RichText::new(format!("{level:.3}"))
                            .color(ACCENT_PALE)
                            .monospace(),
                    );
                });
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                section_header(ui, "VIEW");
                camera_controls(ui, &mut state.camera_mode);
                ui.horizontal(|ui| {
                    ui.checkbox(&mut state.show_axes, "Show Axes");
                    if ui.button("Reset View").clicked() {
                        actions.reset_camera = true;
                    }
                });
                ui.label(
                    RichText::new(format!(
                        "Axes: {} / {} / {}  (vertical {:.0}..{:.0})",
                        LAYOUT.axis_titles[0],
                        LAYOUT.axis_titles[1],
                        LAYOUT.axis_titles[2],
                        LAYOUT.height_range.0,
                        LAYOUT.height_range.1,
                    ))
                    .color(TEXT_MUTED)
                    .size(10.0),
                );
                ui.add_space(16.0);

                perf_controls(ui, state);
                ui.add_space(16.0);

                ui.separator();
                ui.add_space(12.0);

                if state.show_stats {
                    stats_panel(ui, state, fps, triangle_count);
                }
            });
        });

    actions
}

fn section_header(ui: &mut Ui, text: &str) {
    ui.label(RichText::new(text).color(TEXT_MUTED).size(11.0).strong());
    ui.add_space(4.0);
}

fn camera_controls(ui: &mut Ui, mode: &mut CameraMode) {
    ui.horizontal(|ui| {
        ui.label("Camera:");
        if ui.selectable_label(*mode == CameraMode::Free, "Free").clicked() {
            *mode = CameraMode::Free;
        }
        if ui
            .selectable_label(*mode == CameraMode::Orbital, "Orbital")
            .clicked()
        {
            *mode = CameraMode::Orbital;
        }
    });
}

fn perf_controls(ui: &mut Ui, state: &mut UiState) {
    section_header(ui, "PERFORMANCE");
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.vsync_enabled, "VSync");
        ui.checkbox(&mut state.show_stats, "Stats");
    });
    ui.horizontal(|ui| {
        ui.checkbox(&mut state.fps_cap_enabled, "FPS Cap:");
        ui.add_enabled(
            state.fps_cap_enabled,
            egui::DragValue::new(&mut state.fps_cap)
                .range(30..=500)
                .suffix(" fps"),
        );
    });
}

fn stats_panel(ui: &mut Ui, state: &UiState, fps: f32, triangle_count: u32) {
    section_header(ui, "STATISTICS");
    egui::Frame::default()
        .fill(BG_WIDGET)
        .stroke(egui::Stroke::new(1.0, BORDER_SUBTLE))
        .rounding(6.0)
        .inner_margin(12.0)
        .show(ui, |ui| {
            ui.style_mut().override_font_id =
                Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));

            let fps_color = if fps >= 60.0 {
                ACCENT_GREEN
            } else if fps >= 30.0 {
                ACCENT_ORANGE
            } else {
                ACCENT_RED
            };

            egui::Grid::new("stats")
                .num_columns(2)
                .spacing([20.0, 4.0])
                .show(ui, |ui| {
                    ui.label(RichText::new("FPS").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("{fps:.0}")).color(fps_color));
                    ui.end_row();

                    ui.label(RichText::new("Triangles").color(TEXT_MUTED));
                    ui.label(RichText::new(format!("{triangle_count}")).color(ACCENT_BLUE));
                    ui.end_row();

                    ui.label(RichText::new("Orientation").color(TEXT_MUTED));
                    let orientation = if state.flipped { "Tip Up" } else { "Tip Down" };
                    ui.label(RichText::new(orientation).color(TEXT_PRIMARY));
                    ui.end_row();
                });
        });
}

pub fn draw_help_overlay(ctx: &Context, pos: [f32; 3], speed: f32) {
    egui::Area::new(egui::Id::new("help_overlay"))
        .anchor(egui::Align2::LEFT_BOTTOM, egui::vec2(12.0, -12.0))
        .show(ctx, |ui| {
            egui::Frame::default()
                .fill(Color32::from_black_alpha(180))
                .rounding(6.0)
                .inner_margin(10.0)
                .show(ui, |ui| {
                    ui.style_mut().override_font_id =
                        Some(egui::FontId::new(11.0, egui::FontFamily::Monospace));
                    ui.label(
                        RichText::new("WASD - Move | RMB+Drag - Look | Scroll - Zoom")
                            .color(TEXT_MUTED),
                    );
                    ui.label(
                        RichText::new(format!(
                            "Pos: ({:.2}, {:.2}, {:.2}) | Speed: {:.1}",
                            pos[0], pos[1], pos[2], speed
                        ))
                        .color(TEXT_MUTED),
                    );
                });
        });
}
