use egui::{Align2, Color32, Context, FontId, Painter, Pos2, Rect, Vec2};

use super::{Element, ElementId};

/// Line height relative to the font size, used until the text has been laid out
const LINE_HEIGHT: f32 = 1.16;
/// Average glyph advance relative to the font size, used until the text has been laid out
const GLYPH_ADVANCE: f32 = 0.6;

/// Editable single-line text placed on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    id: ElementId,
    content: String,
    position: Pos2,
    font_size: f32,
    color: Color32,
    // Size of the last layout, cleared whenever the content changes
    measured: Option<Vec2>,
}

impl Text {
    pub fn new(id: ElementId, content: String, position: Pos2, font_size: f32, color: Color32) -> Self {
        Self {
            id,
            content,
            position,
            font_size,
            color,
            measured: None,
        }
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: String) {
        if self.content != content {
            self.content = content;
            self.measured = None;
        }
    }

    pub fn font_size(&self) -> f32 {
        self.font_size
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    fn font_id(&self) -> FontId {
        FontId::proportional(self.font_size)
    }

    /// Lay the text out with the real fonts so hit testing matches what is painted.
    ///
    /// Fonts only exist once egui has started a frame.
    pub fn measure(&mut self, ctx: &Context) {
        if self.measured.is_some() {
            return;
        }

        let galley = ctx.fonts(|fonts| {
            fonts.layout_no_wrap(self.content.clone(), self.font_id(), self.color)
        });
        // Empty text still needs a box that can be clicked
        let size = galley.size();
        self.measured = Some(Vec2::new(
            size.x.max(self.font_size * GLYPH_ADVANCE),
            size.y.max(self.font_size * LINE_HEIGHT),
        ));
    }

    fn size(&self) -> Vec2 {
        self.measured.unwrap_or_else(|| {
            let glyphs = self.content.chars().count().max(1) as f32;
            Vec2::new(
                glyphs * self.font_size * GLYPH_ADVANCE,
                self.font_size * LINE_HEIGHT,
            )
        })
    }
}

impl Element for Text {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "text"
    }

    fn rect(&self) -> Rect {
        Rect::from_min_size(self.position, self.size())
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        painter.text(
            self.position + origin,
            Align2::LEFT_TOP,
            &self.content,
            self.font_id(),
            self.color,
        );
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}
