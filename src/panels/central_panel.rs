use egui::{FontId, Sense, Vec2};

use crate::SketchApp;
use crate::element::{Element, ElementId};
use crate::input::RouteOutcome;
use crate::surface::DrawingSurface;

/// Inline editor for a text object
#[derive(Debug, Clone, PartialEq)]
pub struct TextEditSession {
    pub id: ElementId,
    pub buffer: String,
    request_focus: bool,
}

impl TextEditSession {
    pub fn new(id: ElementId, buffer: String) -> Self {
        Self {
            id,
            buffer,
            request_focus: true,
        }
    }
}

pub fn central_panel(app: &mut SketchApp, ctx: &egui::Context) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let Some(surface) = app.surface.as_mut() else {
            ui.centered_and_justified(|ui| ui.label("Surface released"));
            return;
        };

        let (response, painter) = ui.allocate_painter(surface.size(), Sense::click_and_drag());
        let canvas_rect = response.rect;
        app.input.set_canvas_rect(canvas_rect);

        for event in app.input.process_input(ctx, &response) {
            if let Some(RouteOutcome::EditText(id)) = app.router.route_event(&event, surface) {
                let content = surface
                    .find_element(id)
                    .and_then(|element| element.as_text())
                    .map(|text| text.content().to_owned())
                    .unwrap_or_default();
                log::debug!("Editing text {}", id);
                app.text_edit = Some(TextEditSession::new(id, content));
            }
        }

        app.renderer
            .render(ctx, &painter, canvas_rect, surface, app.router.marquee());

        text_editor(ui, surface, &mut app.text_edit, canvas_rect.min.to_vec2());
    });
}

fn text_editor(
    ui: &mut egui::Ui,
    surface: &mut DrawingSurface,
    session: &mut Option<TextEditSession>,
    origin: Vec2,
) {
    let Some(edit) = session.as_mut() else {
        return;
    };

    // The object may have been deleted while being edited
    let Some((rect, font_size)) = surface
        .find_element(edit.id)
        .and_then(|element| element.as_text())
        .map(|text| (text.rect(), text.font_size()))
    else {
        *session = None;
        return;
    };

    let rect = rect.translate(origin).expand(2.0);
    let rect = rect.with_max_x(rect.max.x.max(rect.min.x + 120.0));
    let editor = egui::TextEdit::singleline(&mut edit.buffer).font(FontId::proportional(font_size));
    let response = ui.put(rect, editor);

    if edit.request_focus {
        response.request_focus();
        edit.request_focus = false;
    }
    if response.changed() {
        surface.set_text(edit.id, edit.buffer.clone());
    }
    if response.lost_focus() {
        *session = None;
    }
}
