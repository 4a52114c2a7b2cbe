use egui::{Pos2, Rect, Vec2};

/// Segments used when an ellipse is flattened into a polygon
pub const ELLIPSE_SEGMENTS: usize = 64;

/// Calculate the bounding box for a set of points
pub(crate) fn calculate_bounds(points: &[Pos2], padding: f32) -> Rect {
    if points.is_empty() {
        return Rect::NOTHING;
    }

    let mut min_x = f32::INFINITY;
    let mut min_y = f32::INFINITY;
    let mut max_x = f32::NEG_INFINITY;
    let mut max_y = f32::NEG_INFINITY;

    for point in points {
        min_x = min_x.min(point.x);
        min_y = min_y.min(point.y);
        max_x = max_x.max(point.x);
        max_y = max_y.max(point.y);
    }

    Rect::from_min_max(
        Pos2::new(min_x - padding, min_y - padding),
        Pos2::new(max_x + padding, max_y + padding),
    )
}

/// Points around an axis-aligned ellipse, clockwise in screen space
pub(crate) fn ellipse_points(center: Pos2, radii: Vec2, segments: usize) -> Vec<Pos2> {
    let segments = segments.max(3);
    (0..segments)
        .map(|i| {
            let angle = std::f32::consts::TAU * i as f32 / segments as f32;
            Pos2::new(
                center.x + radii.x * angle.cos(),
                center.y + radii.y * angle.sin(),
            )
        })
        .collect()
}

/// Triangle inscribed in `rect` with its apex at the top-center
pub(crate) fn triangle_points(rect: Rect) -> Vec<Pos2> {
    vec![rect.center_top(), rect.right_bottom(), rect.left_bottom()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_of_points() {
        let rect = calculate_bounds(&[Pos2::new(10.0, 20.0), Pos2::new(30.0, 5.0)], 1.0);
        assert_eq!(rect.min, Pos2::new(9.0, 4.0));
        assert_eq!(rect.max, Pos2::new(31.0, 21.0));
        assert_eq!(calculate_bounds(&[], 1.0), Rect::NOTHING);
    }

    #[test]
    fn test_ellipse_points_stay_on_radii() {
        let points = ellipse_points(Pos2::new(100.0, 50.0), Vec2::new(100.0, 50.0), 16);
        assert_eq!(points.len(), 16);
        let bounds = calculate_bounds(&points, 0.0);
        assert!((bounds.width() - 200.0).abs() < 0.01);
        assert!((bounds.height() - 100.0).abs() < 0.01);
    }

    #[test]
    fn test_triangle_apex_is_top_center() {
        let rect = Rect::from_min_size(Pos2::ZERO, Vec2::new(50.0, 50.0));
        let points = triangle_points(rect);
        assert_eq!(points[0], Pos2::new(25.0, 0.0));
    }
}
