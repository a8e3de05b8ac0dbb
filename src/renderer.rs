// src/renderer.rs
use eframe::egui::{self, Color32, Painter, Rect, Shape, Stroke};

use crate::geometry::{Circle, Line};
use crate::view::RenderSnapshot;

#[derive(Debug, Clone)]
pub struct Renderer {
    background: Color32,
    selected_color: Color32,
    circle_color: Color32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    pub fn new() -> Self {
        Self {
            background: Color32::WHITE,
            selected_color: Color32::GREEN,
            circle_color: Color32::BLACK,
        }
    }

    /// Paints one frame from `snapshot`.
    ///
    /// Order: finished lines, in-progress lines, the selected line on top,
    /// finished circles, then the circle being drawn in `current_color`.
    pub fn render(
        &self,
        painter: &Painter,
        rect: Rect,
        snapshot: &RenderSnapshot<'_>,
        current_color: Color32,
    ) {
        painter.rect_filled(rect, 0.0, self.background);

        for line in snapshot.finished_lines {
            stroke_line(painter, line, line.color);
        }

        for preview in &snapshot.in_progress_lines {
            stroke_line(painter, &preview.line, preview.color);
        }

        if let Some(line) = snapshot.selected_line() {
            stroke_line(painter, line, self.selected_color);
        }

        let circle_stroke = Stroke::new(snapshot.circle_line_width, self.circle_color);
        for circle in snapshot.finished_circles {
            stroke_circle(painter, circle, circle_stroke);
        }

        stroke_circle(
            painter,
            &snapshot.in_progress_circle,
            Stroke::new(1.0, current_color),
        );
    }
}

/// Straight segment with round caps.
fn stroke_line(painter: &Painter, line: &Line, color: Color32) {
    painter.line_segment([line.begin, line.end], Stroke::new(line.width, color));
    let cap = line.width / 2.0;
    painter.circle_filled(line.begin, cap, color);
    painter.circle_filled(line.end, cap, color);
}

fn stroke_circle(painter: &Painter, circle: &Circle, stroke: Stroke) {
    if let Some(shape) = circle_shape(circle, stroke) {
        painter.add(shape);
    }
}

/// Outline of the ellipse inscribed in the circle's rect.
fn circle_shape(circle: &Circle, stroke: Stroke) -> Option<Shape> {
    (!circle.is_degenerate())
        .then(|| Shape::ellipse_stroke(circle.center(), circle.radius(), stroke))
}
