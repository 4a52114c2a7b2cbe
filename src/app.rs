use crate::config::SurfaceConfig;
use crate::file_handler::FileDropHandler;
use crate::image_import::ImageUploader;
use crate::input::{InputHandler, InputRouter};
use crate::panels::{TextEditSession, ToolbarAction, ToolbarState, central_panel, tools_panel};
use crate::renderer::Renderer;
use crate::surface::DrawingSurface;

/// We derive Deserialize/Serialize so we can persist app state on shutdown.
///
/// Only the settings and the toolbar state survive a restart; the drawing does not.
#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
pub struct SketchApp {
    pub(crate) config: SurfaceConfig,
    pub(crate) toolbar: ToolbarState,

    #[serde(skip)]
    pub(crate) surface: Option<DrawingSurface>,
    #[serde(skip)]
    pub(crate) renderer: Renderer,
    #[serde(skip)]
    pub(crate) input: InputHandler,
    #[serde(skip)]
    pub(crate) router: InputRouter,
    #[serde(skip)]
    pub(crate) uploader: ImageUploader,
    #[serde(skip)]
    pub(crate) file_drops: FileDropHandler,
    #[serde(skip)]
    pub(crate) text_edit: Option<TextEditSession>,
}

impl Default for SketchApp {
    fn default() -> Self {
        Self {
            config: SurfaceConfig::default(),
            toolbar: ToolbarState::default(),
            surface: None,
            renderer: Renderer::new(),
            input: InputHandler::default(),
            router: InputRouter::new(),
            uploader: ImageUploader::new(),
            file_drops: FileDropHandler::new(),
            text_edit: None,
        }
    }
}

impl SketchApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut app: Self = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        app.surface = Some(DrawingSurface::from_config(&app.config));
        app
    }

    pub fn surface(&self) -> Option<&DrawingSurface> {
        self.surface.as_ref()
    }

    pub fn toolbar(&self) -> &ToolbarState {
        &self.toolbar
    }

    fn apply_toolbar_action(&mut self, ctx: &egui::Context, action: ToolbarAction) {
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        action.apply(surface);
        if action == ToolbarAction::UploadImage {
            let dialog = rfd::AsyncFileDialog::new()
                .set_title("Upload an image")
                .pick_file();
            self.uploader.start(ctx, async move {
                let file = dialog.await?;
                log::info!("Uploading {}", file.file_name());
                Some(file.read().await)
            });
        }
    }

    fn receive_files(&mut self, ctx: &egui::Context) {
        self.file_drops.preview_files_being_dropped(ctx);

        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        let dropped = self.file_drops.take_dropped_images(ctx);
        if !dropped.is_empty() {
            surface.prepare_image_upload();
        }
        for image in dropped {
            self.uploader.start_bytes(ctx, image.bytes);
        }

        self.uploader.poll(surface);
    }
}

impl eframe::App for SketchApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, eframe::APP_KEY, self);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.receive_files(ctx);

        let actions = tools_panel(
            ctx,
            &mut self.toolbar,
            &self.config,
            self.surface.as_ref(),
            self.uploader.pending(),
        );
        for action in actions {
            self.apply_toolbar_action(ctx, action);
        }

        central_panel(self, ctx);

        if let Some(surface) = self.surface.as_mut() {
            if surface.take_redraw_request() {
                ctx.request_repaint();
            }
        }
    }

    /// Release the surface explicitly instead of leaving it to process teardown
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.text_edit = None;
        if let Some(surface) = self.surface.take() {
            surface.teardown();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::App as _;

    #[test]
    fn test_on_exit_releases_surface() {
        let mut app = SketchApp::default();
        let mut surface = DrawingSurface::from_config(&app.config);
        surface.add_text();
        app.surface = Some(surface);

        app.on_exit(None);

        assert!(app.surface().is_none());
    }
}
