use egui::{Context, Painter, Pos2, Rect, Vec2};
use uuid::Uuid;

mod common;
pub mod image;
pub mod shape;
pub mod stroke;
pub mod text;

pub use image::Image;
pub use shape::{SHAPE_PRESETS, Shape, ShapeGeometry, ShapeKind, ShapePreset, ShapeStyle};
pub use stroke::{MutableStroke, Stroke};
pub use text::Text;

/// Identifier of an object on a surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Uuid);

impl ElementId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Common trait for every object placed on the surface.
///
/// All geometry is in surface coordinates; `origin` maps it to the screen when painting.
pub trait Element {
    /// Get the unique identifier for this element
    fn id(&self) -> ElementId;

    /// Get the element type as a string
    fn element_type(&self) -> &'static str;

    /// Get the bounding rectangle for this element
    fn rect(&self) -> Rect;

    /// Draw the element, offset by the screen position of the surface origin
    fn draw(&self, painter: &Painter, origin: Vec2);

    /// Objects are picked by their bounding box
    fn hit_test(&self, pos: Pos2) -> bool {
        self.rect().contains(pos)
    }

    /// Translate the element by the given delta
    fn translate(&mut self, delta: Vec2);
}

/// Enumeration of all element types on the surface
#[derive(Debug, Clone)]
pub enum ElementType {
    Stroke(Stroke),
    Shape(Shape),
    Text(Text),
    Image(Image),
}

impl ElementType {
    /// The shape kind, if this is a primitive shape
    pub fn shape_kind(&self) -> Option<ShapeKind> {
        match self {
            ElementType::Shape(shape) => Some(shape.kind()),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&Text> {
        match self {
            ElementType::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_image(&self) -> Option<&Image> {
        match self {
            ElementType::Image(image) => Some(image),
            _ => None,
        }
    }

    /// Work that needs the egui context before painting: text layout and texture upload
    pub fn prepare_for_paint(&mut self, ctx: &Context) {
        match self {
            ElementType::Text(text) => text.measure(ctx),
            ElementType::Image(image) => image.ensure_texture(ctx),
            ElementType::Stroke(_) | ElementType::Shape(_) => {}
        }
    }
}

impl Element for ElementType {
    fn id(&self) -> ElementId {
        match self {
            ElementType::Stroke(s) => s.id(),
            ElementType::Shape(s) => s.id(),
            ElementType::Text(t) => t.id(),
            ElementType::Image(i) => i.id(),
        }
    }

    fn element_type(&self) -> &'static str {
        match self {
            ElementType::Stroke(s) => s.element_type(),
            ElementType::Shape(s) => s.element_type(),
            ElementType::Text(t) => t.element_type(),
            ElementType::Image(i) => i.element_type(),
        }
    }

    fn rect(&self) -> Rect {
        match self {
            ElementType::Stroke(s) => s.rect(),
            ElementType::Shape(s) => s.rect(),
            ElementType::Text(t) => t.rect(),
            ElementType::Image(i) => i.rect(),
        }
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        match self {
            ElementType::Stroke(s) => s.draw(painter, origin),
            ElementType::Shape(s) => s.draw(painter, origin),
            ElementType::Text(t) => t.draw(painter, origin),
            ElementType::Image(i) => i.draw(painter, origin),
        }
    }

    fn hit_test(&self, pos: Pos2) -> bool {
        match self {
            ElementType::Stroke(s) => s.hit_test(pos),
            ElementType::Shape(s) => s.hit_test(pos),
            ElementType::Text(t) => t.hit_test(pos),
            ElementType::Image(i) => i.hit_test(pos),
        }
    }

    fn translate(&mut self, delta: Vec2) {
        match self {
            ElementType::Stroke(s) => s.translate(delta),
            ElementType::Shape(s) => s.translate(delta),
            ElementType::Text(t) => t.translate(delta),
            ElementType::Image(i) => i.translate(delta),
        }
    }
}

/// Factory functions for creating elements
pub mod factory {
    use super::*;
    use crate::image_import::DecodedImage;
    use egui::Color32;

    /// Create a committed freehand stroke
    pub fn create_stroke(id: ElementId, points: Vec<Pos2>, thickness: f32, color: Color32) -> ElementType {
        ElementType::Stroke(Stroke::new(id, points, thickness, color))
    }

    /// Create a shape from its palette preset
    pub fn create_shape(id: ElementId, kind: ShapeKind, position: Pos2) -> ElementType {
        ElementType::Shape(Shape::from_preset(id, kind.preset(), position))
    }

    /// Create an editable text object
    pub fn create_text(
        id: ElementId,
        content: impl Into<String>,
        position: Pos2,
        font_size: f32,
        color: Color32,
    ) -> ElementType {
        ElementType::Text(Text::new(id, content.into(), position, font_size, color))
    }

    /// Create an image scaled to `width`
    pub fn create_image(id: ElementId, pixels: DecodedImage, position: Pos2, width: f32) -> ElementType {
        let mut image = Image::new(id, pixels, position);
        image.scale_to_width(width);
        ElementType::Image(image)
    }
}
