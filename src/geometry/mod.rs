use egui::{Color32, Pos2, Rect, Vec2};

pub mod hit_testing;

pub use hit_testing::{find_line_index, HIT_SAMPLES, HIT_TOLERANCE};

/// A straight segment drawn by a single finger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    pub begin: Pos2,
    pub end: Pos2,
    pub width: f32,
    pub color: Color32,
}

impl Line {
    /// A zero-length line at `point`, as created on touch-down.
    pub fn at(point: Pos2, width: f32, color: Color32) -> Self {
        debug_assert!(width > 0.0, "line width must be positive, got {width}");
        Self {
            begin: point,
            end: point,
            width,
            color,
        }
    }

    /// Angle of `begin -> end` in degrees, counter-clockwise from +x.
    ///
    /// Screen y grows downward, so the vertical component is negated and a
    /// line drawn "up" the screen has a positive angle. Range is (-180, 180].
    pub fn angle(&self) -> f32 {
        let delta = self.end - self.begin;
        (-delta.y).atan2(delta.x).to_degrees()
    }

    /// Point at parameter `t` along the segment (`0.0` is `begin`, `1.0` is `end`).
    pub fn point_at(&self, t: f32) -> Pos2 {
        self.begin + (self.end - self.begin) * t
    }

    pub fn translate(&mut self, delta: Vec2) {
        self.begin += delta;
        self.end += delta;
    }

    pub fn bounding_rect(&self) -> Rect {
        Rect::from_two_pos(self.begin, self.end)
    }
}

/// Ellipse inscribed in the bounding rectangle of two touch points.
///
/// The default value is degenerate and stands for "no active circle".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    rect: Rect,
}

impl Default for Circle {
    fn default() -> Self {
        Self { rect: Rect::ZERO }
    }
}

impl Circle {
    pub fn from_two_points(p1: Pos2, p2: Pos2) -> Self {
        let origin = Pos2::new(p1.x.min(p2.x), p1.y.min(p2.y));
        let size = Vec2::new((p1.x - p2.x).abs(), (p1.y - p2.y).abs());
        Self {
            rect: Rect::from_min_size(origin, size),
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn origin(&self) -> Pos2 {
        self.rect.min
    }

    pub fn size(&self) -> Vec2 {
        self.rect.size()
    }

    pub fn center(&self) -> Pos2 {
        self.rect.center()
    }

    /// Semi-axes of the inscribed ellipse.
    pub fn radius(&self) -> Vec2 {
        self.rect.size() / 2.0
    }

    pub fn is_degenerate(&self) -> bool {
        self.rect.width() == 0.0 && self.rect.height() == 0.0
    }
}

/// Angle ranges (degrees, half-open) and the color an in-progress line takes
/// while its angle falls inside the range.
const ANGLE_COLORS: [(f32, f32, Color32); 4] = [
    (0.0, 90.0, Color32::RED),
    (90.0, 180.0, Color32::BLUE),
    (-180.0, -90.0, Color32::YELLOW),
    (-90.0, 0.0, Color32::GREEN),
];

/// Looks up the preview color for an angle. Returns `None` for angles no
/// bucket covers (exactly 180 degrees).
pub fn color_for_angle(angle: f32) -> Option<Color32> {
    ANGLE_COLORS
        .iter()
        .find(|(start, end, _)| (*start..*end).contains(&angle))
        .map(|(_, _, color)| *color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(begin: (f32, f32), end: (f32, f32)) -> Line {
        Line {
            begin: Pos2::new(begin.0, begin.1),
            end: Pos2::new(end.0, end.1),
            width: 1.0,
            color: Color32::BLACK,
        }
    }

    #[test]
    fn test_angle_uses_screen_coordinates() {
        // Moving up the screen means y decreases.
        assert!((line((0.0, 0.0), (0.0, -10.0)).angle() - 90.0).abs() < 1e-4);
        assert!((line((0.0, 0.0), (10.0, 0.0)).angle()).abs() < 1e-4);
        assert!((line((0.0, 0.0), (0.0, 10.0)).angle() + 90.0).abs() < 1e-4);
        assert!((line((0.0, 0.0), (10.0, -10.0)).angle() - 45.0).abs() < 1e-4);
    }

    #[test]
    fn test_angle_invariant_under_scaling() {
        let original = line((5.0, 5.0), (8.0, 1.0));
        let scaled = Line {
            end: original.begin + (original.end - original.begin) * 3.5,
            ..original
        };
        assert!((original.angle() - scaled.angle()).abs() < 1e-3);
    }

    #[test]
    fn test_reversed_line_flips_by_half_turn() {
        let forward = line((1.0, 2.0), (7.0, -3.0));
        let reversed = line((7.0, -3.0), (1.0, 2.0));
        let diff = (forward.angle() - reversed.angle()).abs();
        assert!((diff - 180.0).abs() < 1e-3, "diff was {diff}");
    }

    #[test]
    fn test_circle_is_order_independent() {
        let a = Pos2::new(30.0, -4.0);
        let b = Pos2::new(-2.0, 17.5);
        assert_eq!(Circle::from_two_points(a, b), Circle::from_two_points(b, a));
        let circle = Circle::from_two_points(a, b);
        assert_eq!(circle.origin(), Pos2::new(-2.0, -4.0));
        assert_eq!(circle.size(), Vec2::new(32.0, 21.5));
    }

    #[test]
    fn test_circle_of_colinear_points_has_zero_height() {
        let circle = Circle::from_two_points(Pos2::new(10.0, 0.0), Pos2::new(0.0, 0.0));
        assert_eq!(circle.origin(), Pos2::ZERO);
        assert_eq!(circle.size(), Vec2::new(10.0, 0.0));
        assert!(!circle.is_degenerate());
        assert!(Circle::default().is_degenerate());
    }

    #[test]
    fn test_color_buckets() {
        assert_eq!(color_for_angle(0.0), Some(Color32::RED));
        assert_eq!(color_for_angle(45.0), Some(Color32::RED));
        assert_eq!(color_for_angle(90.0), Some(Color32::BLUE));
        assert_eq!(color_for_angle(-180.0), Some(Color32::YELLOW));
        assert_eq!(color_for_angle(-90.0), Some(Color32::GREEN));
        assert_eq!(color_for_angle(-0.5), Some(Color32::GREEN));
        assert_eq!(color_for_angle(180.0), None);
    }

    #[test]
    fn test_translate_moves_both_ends() {
        let mut l = line((0.0, 0.0), (4.0, 4.0));
        l.translate(Vec2::new(1.0, -2.0));
        assert_eq!(l.begin, Pos2::new(1.0, -2.0));
        assert_eq!(l.end, Pos2::new(5.0, 2.0));
    }
}
