use egui::color_picker::{Alpha, color_edit_button_srgba};
use egui::{Color32, RichText};
use serde::{Deserialize, Serialize};

use crate::config::{SurfaceConfig, parse_hex_color, to_hex_color};
use crate::element::ShapeKind;
use crate::surface::DrawingSurface;

/// UI state owned by the toolbar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolbarState {
    color: String,
}

impl Default for ToolbarState {
    fn default() -> Self {
        Self {
            color: "#000000".to_owned(),
        }
    }
}

impl ToolbarState {
    /// Remember the picked color.
    ///
    /// The value is only kept here: neither the brush nor any object reads it.
    pub fn pick_color(&mut self, value: impl Into<String>) {
        self.color = value.into();
        log::debug!("Picked color {}", self.color);
    }

    pub fn color(&self) -> &str {
        &self.color
    }
}

/// A toolbar click, applied to the surface by the app
#[derive(Debug, Clone, PartialEq)]
pub enum ToolbarAction {
    SetBrushWidth(f32),
    AddShape(&'static str),
    AddText,
    DeleteSelection,
    UploadImage,
}

impl ToolbarAction {
    /// Apply everything except the upload, which needs the file picker
    pub fn apply(&self, surface: &mut DrawingSurface) {
        match self {
            ToolbarAction::SetBrushWidth(width) => surface.set_brush_width(*width),
            ToolbarAction::AddShape(tag) => {
                surface.add_shape(tag);
            }
            ToolbarAction::AddText => {
                surface.add_text();
            }
            ToolbarAction::DeleteSelection => {
                surface.delete_selection();
            }
            ToolbarAction::UploadImage => surface.prepare_image_upload(),
        }
    }
}

pub fn tools_panel(
    ctx: &egui::Context,
    toolbar: &mut ToolbarState,
    config: &SurfaceConfig,
    surface: Option<&DrawingSurface>,
    pending_uploads: usize,
) -> Vec<ToolbarAction> {
    let mut actions = Vec::new();

    egui::SidePanel::left("tools_panel")
        .resizable(false)
        .default_width(160.0)
        .show(ctx, |ui| {
            ui.heading("Tools");
            ui.separator();

            ui.menu_button("Size ⏷", |ui| {
                for &width in &config.brush_presets {
                    if ui.button(format!("{width}px")).clicked() {
                        actions.push(ToolbarAction::SetBrushWidth(width));
                        ui.close_menu();
                    }
                }
            });

            ui.separator();
            ui.label("Shapes");
            ui.horizontal_wrapped(|ui| {
                for kind in ShapeKind::ALL {
                    let button = ui
                        .button(RichText::new(kind.icon()).size(20.0))
                        .on_hover_text(kind.tag());
                    if button.clicked() {
                        actions.push(ToolbarAction::AddShape(kind.tag()));
                    }
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                if ui
                    .button(RichText::new("A").size(20.0).strong())
                    .on_hover_text("Add text")
                    .clicked()
                {
                    actions.push(ToolbarAction::AddText);
                }
                if ui
                    .button(RichText::new("🗑").size(20.0))
                    .on_hover_text("Delete selection")
                    .clicked()
                {
                    actions.push(ToolbarAction::DeleteSelection);
                }
            });

            ui.separator();
            if ui.button("Upload an image").clicked() {
                actions.push(ToolbarAction::UploadImage);
            }
            if pending_uploads > 0 {
                ui.horizontal(|ui| {
                    ui.spinner();
                    ui.label(format!("Loading {pending_uploads}"));
                });
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Color:");
                let mut color = parse_hex_color(toolbar.color()).unwrap_or(Color32::BLACK);
                if color_edit_button_srgba(ui, &mut color, Alpha::Opaque).changed() {
                    toolbar.pick_color(to_hex_color(color));
                }
            });

            if let Some(surface) = surface {
                ui.separator();
                let mode = if surface.drawing_mode() { "Drawing" } else { "Select" };
                ui.label(format!("Mode: {mode}"));
                ui.label(format!("Brush: {} px", surface.brush().width));
                ui.label(format!("Objects: {}", surface.len()));
                ui.label(format!("Selected: {}", surface.selection().len()));
            }
        });

    actions
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_color_only_updates_toolbar() {
        let mut toolbar = ToolbarState::default();
        assert_eq!(toolbar.color(), "#000000");

        toolbar.pick_color("#ff0000");
        assert_eq!(toolbar.color(), "#ff0000");
    }

    #[test]
    fn test_actions_toggle_drawing_mode() {
        let mut surface = DrawingSurface::default();

        ToolbarAction::AddShape("circle").apply(&mut surface);
        assert!(!surface.drawing_mode());
        assert_eq!(surface.len(), 1);

        ToolbarAction::SetBrushWidth(3.0).apply(&mut surface);
        assert!(surface.drawing_mode());
        assert_eq!(surface.brush().width, 3.0);

        ToolbarAction::UploadImage.apply(&mut surface);
        assert!(!surface.drawing_mode());
        assert_eq!(surface.len(), 1);
    }
}
