use egui::{Color32, Painter, Pos2, Rect, Shape as EguiShape, Stroke as EguiStroke, Vec2};

use super::{Element, ElementId};
use crate::element::common;

/// The primitive shapes offered by the shape palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Rectangle,
    Ellipse,
    Circle,
    Line,
    Triangle,
}

/// Geometry of a shape, relative to its position
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ShapeGeometry {
    Rect { size: Vec2 },
    Ellipse { radii: Vec2 },
    Circle { radius: f32 },
    Line { from: Pos2, to: Pos2 },
    Triangle { size: Vec2 },
}

/// Fill and outline of a shape
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeStyle {
    pub fill: Color32,
    pub stroke: Color32,
    pub stroke_width: f32,
}

/// A palette entry: the tag the palette sends and what it creates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePreset {
    pub tag: &'static str,
    pub kind: ShapeKind,
    pub geometry: ShapeGeometry,
    pub style: ShapeStyle,
}

const OUTLINED: ShapeStyle = ShapeStyle {
    fill: Color32::WHITE,
    stroke: Color32::BLACK,
    stroke_width: 1.0,
};

/// Default shapes, indexed by `ShapeKind as usize`.
///
/// Adding a shape means adding a `ShapeKind` variant and a row here.
pub const SHAPE_PRESETS: [ShapePreset; 5] = [
    ShapePreset {
        tag: "rectangle",
        kind: ShapeKind::Rectangle,
        geometry: ShapeGeometry::Rect {
            size: Vec2::new(100.0, 100.0),
        },
        style: OUTLINED,
    },
    // The palette has always sent this spelling
    ShapePreset {
        tag: "elipse",
        kind: ShapeKind::Ellipse,
        geometry: ShapeGeometry::Ellipse {
            radii: Vec2::new(100.0, 50.0),
        },
        style: OUTLINED,
    },
    ShapePreset {
        tag: "circle",
        kind: ShapeKind::Circle,
        geometry: ShapeGeometry::Circle { radius: 50.0 },
        style: OUTLINED,
    },
    ShapePreset {
        tag: "line",
        kind: ShapeKind::Line,
        geometry: ShapeGeometry::Line {
            from: Pos2::new(0.0, 0.0),
            to: Pos2::new(100.0, 150.0),
        },
        style: ShapeStyle {
            fill: Color32::BLACK,
            stroke: Color32::BLACK,
            stroke_width: 2.0,
        },
    },
    ShapePreset {
        tag: "triangle",
        kind: ShapeKind::Triangle,
        geometry: ShapeGeometry::Triangle {
            size: Vec2::new(50.0, 50.0),
        },
        style: OUTLINED,
    },
];

impl ShapeKind {
    pub const ALL: [ShapeKind; 5] = [
        ShapeKind::Rectangle,
        ShapeKind::Ellipse,
        ShapeKind::Circle,
        ShapeKind::Line,
        ShapeKind::Triangle,
    ];

    /// Look up the kind a palette tag stands for
    pub fn from_tag(tag: &str) -> Option<Self> {
        SHAPE_PRESETS
            .iter()
            .find(|preset| preset.tag == tag)
            .map(|preset| preset.kind)
    }

    pub fn preset(self) -> &'static ShapePreset {
        &SHAPE_PRESETS[self as usize]
    }

    pub fn tag(self) -> &'static str {
        self.preset().tag
    }

    /// Glyph shown on the palette button
    pub fn icon(self) -> &'static str {
        match self {
            ShapeKind::Rectangle => "▭",
            ShapeKind::Ellipse => "⬭",
            ShapeKind::Circle => "○",
            ShapeKind::Line => "╲",
            ShapeKind::Triangle => "△",
        }
    }
}

impl ShapeGeometry {
    /// Bounding box of the geometry with the shape placed at `position`
    fn bounds(&self, position: Pos2) -> Rect {
        match *self {
            ShapeGeometry::Rect { size } | ShapeGeometry::Triangle { size } => {
                Rect::from_min_size(position, size)
            }
            ShapeGeometry::Ellipse { radii } => Rect::from_min_size(position, radii * 2.0),
            ShapeGeometry::Circle { radius } => {
                Rect::from_min_size(position, Vec2::splat(radius * 2.0))
            }
            ShapeGeometry::Line { from, to } => {
                Rect::from_two_pos(from, to).translate(position.to_vec2())
            }
        }
    }
}

/// A primitive shape placed on the surface
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ElementId,
    kind: ShapeKind,
    position: Pos2,
    geometry: ShapeGeometry,
    style: ShapeStyle,
}

impl Shape {
    pub fn from_preset(id: ElementId, preset: &ShapePreset, position: Pos2) -> Self {
        Self {
            id,
            kind: preset.kind,
            position,
            geometry: preset.geometry,
            style: preset.style,
        }
    }

    pub fn kind(&self) -> ShapeKind {
        self.kind
    }

    pub fn position(&self) -> Pos2 {
        self.position
    }

    pub fn geometry(&self) -> &ShapeGeometry {
        &self.geometry
    }

    pub fn style(&self) -> &ShapeStyle {
        &self.style
    }
}

impl Element for Shape {
    fn id(&self) -> ElementId {
        self.id
    }

    fn element_type(&self) -> &'static str {
        self.kind.tag()
    }

    fn rect(&self) -> Rect {
        self.geometry.bounds(self.position)
    }

    fn draw(&self, painter: &Painter, origin: Vec2) {
        let outline = EguiStroke::new(self.style.stroke_width, self.style.stroke);
        let rect = self.rect().translate(origin);

        match self.geometry {
            ShapeGeometry::Rect { .. } => {
                painter.rect(rect, 0.0, self.style.fill, outline);
            }
            ShapeGeometry::Ellipse { radii } => {
                let points = common::ellipse_points(rect.center(), radii, common::ELLIPSE_SEGMENTS);
                painter.add(EguiShape::convex_polygon(points, self.style.fill, outline));
            }
            ShapeGeometry::Circle { radius } => {
                painter.circle(rect.center(), radius, self.style.fill, outline);
            }
            ShapeGeometry::Line { from, to } => {
                let offset = self.position.to_vec2() + origin;
                painter.line_segment([from + offset, to + offset], outline);
            }
            ShapeGeometry::Triangle { .. } => {
                let points = common::triangle_points(rect);
                painter.add(EguiShape::convex_polygon(points, self.style.fill, outline));
            }
        }
    }

    fn translate(&mut self, delta: Vec2) {
        self.position += delta;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_indexed_by_kind() {
        for kind in ShapeKind::ALL {
            assert_eq!(kind.preset().kind, kind);
            assert_eq!(ShapeKind::from_tag(kind.tag()), Some(kind));
        }
    }

    #[test]
    fn test_palette_tags() {
        assert_eq!(ShapeKind::from_tag("rectangle"), Some(ShapeKind::Rectangle));
        assert_eq!(ShapeKind::from_tag("elipse"), Some(ShapeKind::Ellipse));
        assert_eq!(ShapeKind::from_tag("ellipse"), None);
        assert_eq!(ShapeKind::from_tag("hexagon"), None);
    }

    #[test]
    fn test_default_bounds() {
        let bounds = |kind: ShapeKind| {
            Shape::from_preset(ElementId::new(), kind.preset(), Pos2::ZERO).rect()
        };

        assert_eq!(bounds(ShapeKind::Rectangle).size(), Vec2::new(100.0, 100.0));
        assert_eq!(bounds(ShapeKind::Ellipse).size(), Vec2::new(200.0, 100.0));
        assert_eq!(bounds(ShapeKind::Circle).size(), Vec2::new(100.0, 100.0));
        assert_eq!(bounds(ShapeKind::Line).size(), Vec2::new(100.0, 150.0));
        assert_eq!(bounds(ShapeKind::Triangle).size(), Vec2::new(50.0, 50.0));
    }

    #[test]
    fn test_translate_moves_bounds() {
        let mut shape = Shape::from_preset(ElementId::new(), ShapeKind::Line.preset(), Pos2::ZERO);
        shape.translate(Vec2::new(5.0, 10.0));
        assert_eq!(shape.rect().min, Pos2::new(5.0, 10.0));
        assert_eq!(shape.rect().max, Pos2::new(105.0, 160.0));
    }
}
