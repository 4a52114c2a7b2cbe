use egui::{Color32, Context, Pos2, Rect, Vec2};
use log::{debug, info};

use crate::config::SurfaceConfig;
use crate::element::{Element, ElementId, ElementType, MutableStroke, ShapeKind, factory};
use crate::image_import::DecodedImage;
use crate::selection::Selection;

/// Freehand brush settings
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Brush {
    pub width: f32,
    pub color: Color32,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            width: 1.0,
            color: Color32::BLACK,
        }
    }
}

/// The drawing canvas and its object graph.
///
/// Either freehand drawing or object placement/selection is active, tracked by
/// a single drawing-mode flag: every placement operation switches it off and
/// picking a brush size switches it back on. New objects are placed at the
/// surface origin.
#[derive(Debug)]
pub struct DrawingSurface {
    size: Vec2,
    background: Color32,
    drawing_mode: bool,
    brush: Brush,
    elements: Vec<ElementType>,
    selection: Selection,
    current_stroke: Option<MutableStroke>,

    default_text: String,
    text_size: f32,
    image_width: f32,

    needs_redraw: bool,
}

impl DrawingSurface {
    /// Create a surface of the given size with every other setting at its default
    pub fn new(width: f32, height: f32, background: Color32) -> Self {
        let config = SurfaceConfig::default();
        let mut surface = Self::from_config(&config);
        surface.size = Vec2::new(width, height);
        surface.background = background;
        surface
    }

    /// Create a surface with a width-1 brush and drawing mode on
    pub fn from_config(config: &SurfaceConfig) -> Self {
        info!(
            "Initializing drawing surface: {}x{}, background {}",
            config.width, config.height, config.background
        );

        Self {
            size: config.size(),
            background: config.background_color(),
            drawing_mode: true,
            brush: Brush::default(),
            elements: Vec::new(),
            selection: Selection::new(),
            current_stroke: None,
            default_text: config.default_text.clone(),
            text_size: config.text_size,
            image_width: config.image_width,
            needs_redraw: true,
        }
    }

    /// Release the surface and everything placed on it
    pub fn teardown(self) {
        info!(
            "Releasing drawing surface with {} objects",
            self.elements.len()
        );
    }

    pub fn size(&self) -> Vec2 {
        self.size
    }

    pub fn background(&self) -> Color32 {
        self.background
    }

    pub fn drawing_mode(&self) -> bool {
        self.drawing_mode
    }

    pub fn brush(&self) -> Brush {
        self.brush
    }

    pub fn elements(&self) -> &[ElementType] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn find_element(&self, id: ElementId) -> Option<&ElementType> {
        self.elements.iter().find(|element| element.id() == id)
    }

    fn exit_drawing_mode(&mut self) {
        if self.drawing_mode {
            debug!("Drawing mode off");
        }
        self.drawing_mode = false;
        self.current_stroke = None;
    }

    fn push(&mut self, element: ElementType) -> ElementId {
        let id = element.id();
        debug!("Adding {} {}", element.element_type(), id);
        self.elements.push(element);
        self.needs_redraw = true;
        id
    }

    /// Pick a brush size: drawing mode goes back on
    pub fn set_brush_width(&mut self, width: f32) {
        debug!("Brush width {} px", width);
        self.drawing_mode = true;
        self.brush.width = width;
        self.needs_redraw = true;
    }

    /// Add the default shape for a palette tag. Unknown tags add nothing.
    pub fn add_shape(&mut self, tag: &str) -> Option<ElementId> {
        self.exit_drawing_mode();
        match ShapeKind::from_tag(tag) {
            Some(kind) => Some(self.add_shape_kind(kind)),
            None => {
                debug!("Ignoring unknown shape tag {:?}", tag);
                None
            }
        }
    }

    pub fn add_shape_kind(&mut self, kind: ShapeKind) -> ElementId {
        self.exit_drawing_mode();
        self.push(factory::create_shape(ElementId::new(), kind, Pos2::ZERO))
    }

    /// Add an editable text object with the default content
    pub fn add_text(&mut self) -> ElementId {
        self.exit_drawing_mode();
        let text = factory::create_text(
            ElementId::new(),
            self.default_text.clone(),
            Pos2::ZERO,
            self.text_size,
            Color32::BLACK,
        );
        self.push(text)
    }

    /// Replace the content of a text object
    pub fn set_text(&mut self, id: ElementId, content: String) -> bool {
        let text = self.elements.iter_mut().find_map(|element| match element {
            ElementType::Text(text) if text.id() == id => Some(text),
            _ => None,
        });

        match text {
            Some(text) => {
                text.set_content(content);
                self.needs_redraw = true;
                true
            }
            None => false,
        }
    }

    /// Remove every selected object, returning how many were removed
    pub fn delete_selection(&mut self) -> usize {
        self.exit_drawing_mode();
        if self.selection.is_empty() {
            return 0;
        }

        let before = self.elements.len();
        let selection = std::mem::take(&mut self.selection);
        self.elements.retain(|element| !selection.contains(element.id()));

        let removed = before - self.elements.len();
        debug!("Removed {} selected objects", removed);
        self.needs_redraw = true;
        removed
    }

    /// Called when an image upload starts; the image itself arrives later through [`Self::add_image`]
    pub fn prepare_image_upload(&mut self) {
        self.exit_drawing_mode();
    }

    /// Place a decoded image, scaled to the configured width
    pub fn add_image(&mut self, pixels: DecodedImage) -> ElementId {
        let image = factory::create_image(ElementId::new(), pixels, Pos2::ZERO, self.image_width);
        self.push(image)
    }

    /// Start a freehand stroke. Ignored unless drawing mode is on.
    pub fn begin_stroke(&mut self, pos: Pos2) -> bool {
        if !self.drawing_mode {
            return false;
        }

        let mut stroke = MutableStroke::new(self.brush.color, self.brush.width);
        stroke.add_point(pos);
        self.current_stroke = Some(stroke);
        true
    }

    pub fn extend_stroke(&mut self, pos: Pos2) {
        if let Some(stroke) = &mut self.current_stroke {
            stroke.add_point(pos);
            self.needs_redraw = true;
        }
    }

    /// Commit the stroke being drawn; strokes with fewer than two points are dropped
    pub fn end_stroke(&mut self) -> Option<ElementId> {
        let stroke = self.current_stroke.take()?;
        if stroke.points().len() < 2 {
            return None;
        }

        Some(self.push(ElementType::Stroke(stroke.into_stroke(ElementId::new()))))
    }

    pub fn current_stroke(&self) -> Option<&MutableStroke> {
        self.current_stroke.as_ref()
    }

    /// Topmost object under `pos`
    pub fn element_at(&self, pos: Pos2) -> Option<ElementId> {
        self.elements
            .iter()
            .rev()
            .find(|element| element.hit_test(pos))
            .map(|element| element.id())
    }

    /// Select the topmost object under `pos`.
    ///
    /// Clicking a member of a multi-selection keeps the group so it can be dragged.
    /// With `additive` the object is toggled instead. Nothing is selectable in drawing mode.
    pub fn select_at(&mut self, pos: Pos2, additive: bool) -> Option<ElementId> {
        if self.drawing_mode {
            return None;
        }

        let hit = self.element_at(pos);
        match (hit, additive) {
            (Some(id), true) => self.selection.toggle(id),
            (Some(id), false) => {
                if !self.selection.contains(id) {
                    self.selection.select(id);
                }
            }
            (None, false) => self.selection.clear(),
            (None, true) => {}
        }

        debug!("Selection: {} objects", self.selection.len());
        self.needs_redraw = true;
        hit
    }

    /// Select every object whose bounds intersect `rect`
    pub fn select_in_rect(&mut self, rect: Rect) -> usize {
        if self.drawing_mode {
            return 0;
        }

        let hits: Vec<ElementId> = self
            .elements
            .iter()
            .filter(|element| element.rect().intersects(rect))
            .map(|element| element.id())
            .collect();
        self.selection.replace(hits);

        debug!("Marquee selected {} objects", self.selection.len());
        self.needs_redraw = true;
        self.selection.len()
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.needs_redraw = true;
        }
    }

    /// The selected object when exactly one is selected
    pub fn active_object(&self) -> Option<&ElementType> {
        self.selection.single().and_then(|id| self.find_element(id))
    }

    /// Every selected object, bottom to top
    pub fn active_objects(&self) -> Vec<&ElementType> {
        self.elements
            .iter()
            .filter(|element| self.selection.contains(element.id()))
            .collect()
    }

    /// Move every selected object by `delta`
    pub fn translate_selection(&mut self, delta: Vec2) {
        if delta == Vec2::ZERO {
            return;
        }

        for element in &mut self.elements {
            if self.selection.contains(element.id()) {
                element.translate(delta);
            }
        }
        self.needs_redraw = true;
    }

    /// Lay out text and upload textures before painting
    pub fn prepare_for_paint(&mut self, ctx: &Context) {
        for element in &mut self.elements {
            element.prepare_for_paint(ctx);
        }
    }

    /// Whether something changed since the last call
    pub fn take_redraw_request(&mut self) -> bool {
        std::mem::take(&mut self.needs_redraw)
    }
}

impl Default for DrawingSurface {
    fn default() -> Self {
        Self::from_config(&SurfaceConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_overrides_size_and_background() {
        let surface = DrawingSurface::new(640.0, 480.0, Color32::LIGHT_GRAY);
        assert_eq!(surface.size(), Vec2::new(640.0, 480.0));
        assert_eq!(surface.background(), Color32::LIGHT_GRAY);
        assert!(surface.drawing_mode());
        assert_eq!(surface.brush().width, 1.0);
    }

    #[test]
    fn test_redraw_request_is_consumed() {
        let mut surface = DrawingSurface::default();
        assert!(surface.take_redraw_request());
        assert!(!surface.take_redraw_request());

        surface.add_text();
        assert!(surface.take_redraw_request());
    }

    #[test]
    fn test_placement_discards_stroke_in_progress() {
        let mut surface = DrawingSurface::default();
        assert!(surface.begin_stroke(Pos2::new(1.0, 1.0)));
        surface.add_shape_kind(ShapeKind::Circle);
        assert!(surface.current_stroke().is_none());
        assert_eq!(surface.end_stroke(), None);
        assert_eq!(surface.len(), 1);
    }

    #[test]
    fn test_set_text_only_targets_text() {
        let mut surface = DrawingSurface::default();
        let shape = surface.add_shape_kind(ShapeKind::Rectangle);
        let text = surface.add_text();

        assert!(!surface.set_text(shape, "nope".to_owned()));
        assert!(surface.set_text(text, "Hello".to_owned()));
        let content = surface.find_element(text).and_then(|e| e.as_text()).map(|t| t.content());
        assert_eq!(content, Some("Hello"));
    }

    #[test]
    fn test_emptied_text_can_still_be_picked() {
        let ctx = Context::default();
        let mut surface = DrawingSurface::default();
        let text = surface.add_text();
        assert!(surface.set_text(text, String::new()));

        let _ = ctx.run(egui::RawInput::default(), |ctx| surface.prepare_for_paint(ctx));

        assert_eq!(surface.element_at(Pos2::new(1.0, 5.0)), Some(text));
        assert_eq!(surface.select_at(Pos2::new(1.0, 5.0), false), Some(text));
    }
}
