use egui::{Color32, Painter, Pos2, Rect, Shape as EguiShape, Stroke as EguiStroke, Vec2};

use super::{Element, ElementId};
use crate::element::common;

/// Freehand stroke committed to the surface
#[derive(Clone, Debug, PartialEq)]
pub struct Stroke {
    id: ElementId,
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

/// Stroke still being drawn by the brush
#[derive(Clone, Debug, PartialEq)]
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    pub fn new(id: ElementId, points: Vec<Pos2>, thickness: f32, color: Color32) -> Self {
        Self {
            id,
            points,
            color,
            thickness,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }
}

impl MutableStroke {
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        // Pointer events repeat the last position while the button is held still
        if self.points.last() != Some(&point) {
            self.points.push(point);
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Freeze into a surface element
    pub fn into_stroke(self, id: ElementId) -> Stroke {
        Stroke::new(id, self.points, self.thickness, self.color)
    }

    /// Paint the in-progress stroke as a preview
    pub fn draw_preview(&self, painter: &Painter, origin: Vec2) {
        draw_polyline(painter, origin, &self.points, self.thickness, self.color);
    }
}

impl Element for Stroke {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        "stroke"
    }

    fn rect(&self) -> Rect {
        common::calculate_bounds(&self.points, self.thickness / 2.0)
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        draw_polyline(painter, origin, &self.points, self.thickness, self.color);
    }

    fn translate(&mut self, delta: Vec2) {
        for point in &mut self.points {
            *point += delta;
        }
    }
}

fn draw_polyline(painter: &Painter, origin: Vec2, points: &[Pos2], thickness: f32, color: Color32) {
    if points.len() < 2 {
        return;
    }

    let screen_points = points.iter().map(|p| *p + origin).collect();
    painter.add(EguiShape::line(screen_points, EguiStroke::new(thickness, color)));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mutable_stroke_skips_repeated_points() {
        let mut stroke = MutableStroke::new(Color32::BLACK, 2.0);
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(1.0, 1.0));
        stroke.add_point(Pos2::new(2.0, 3.0));
        assert_eq!(stroke.points().len(), 2);

        let id = ElementId::new();
        let frozen = stroke.into_stroke(id);
        assert_eq!(frozen.id(), id);
        assert_eq!(frozen.thickness(), 2.0);
        assert_eq!(frozen.color(), Color32::BLACK);
    }

    #[test]
    fn test_stroke_rect_padded_by_half_thickness() {
        let stroke = Stroke::new(
            ElementId::new(),
            vec![Pos2::new(10.0, 10.0), Pos2::new(20.0, 30.0)],
            4.0,
            Color32::BLACK,
        );
        let rect = stroke.rect();
        assert_eq!(rect.min, Pos2::new(8.0, 8.0));
        assert_eq!(rect.max, Pos2::new(22.0, 32.0));
    }
}
