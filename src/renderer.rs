use egui::{Color32, Painter, Rect, Stroke};

use crate::element::Element;
use crate::surface::DrawingSurface;

/// Paints a [`DrawingSurface`] into a region of the UI
#[derive(Debug, Clone)]
pub struct Renderer {
    selection_stroke: Stroke,
    selection_padding: f32,
    marquee_fill: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            selection_stroke: Stroke::new(1.0, Color32::from_rgb(102, 153, 255)),
            selection_padding: 3.0,
            marquee_fill: Color32::from_rgba_unmultiplied(100, 100, 255, 40),
        }
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Renders the surface into `canvas_rect`.
    ///
    /// Objects are painted in insertion order, then the stroke being drawn,
    /// then selection outlines and the marquee box (given in surface coordinates).
    pub fn render(
        &mut self,
        ctx: &egui::Context,
        painter: &Painter,
        canvas_rect: Rect,
        surface: &mut DrawingSurface,
        marquee: Option<Rect>,
    ) {
        surface.prepare_for_paint(ctx);

        let painter = painter.with_clip_rect(canvas_rect);
        let origin = canvas_rect.min.to_vec2();

        painter.rect_filled(canvas_rect, 0.0, surface.background());

        for element in surface.elements() {
            element.draw(&painter, origin);
        }

        if let Some(stroke) = surface.current_stroke() {
            stroke.draw_preview(&painter, origin);
        }

        for element in surface.active_objects() {
            let outline = element
                .rect()
                .translate(origin)
                .expand(self.selection_padding);
            painter.rect_stroke(outline, 0.0, self.selection_stroke);
        }

        if let Some(marquee) = marquee {
            let rect = marquee.translate(origin);
            painter.rect(rect, 0.0, self.marquee_fill, self.selection_stroke);
        }
    }
}
