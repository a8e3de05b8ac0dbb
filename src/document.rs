use std::collections::HashMap;

use egui::{Color32, Pos2};

use crate::geometry::{Circle, Line};
use crate::touch::TouchId;

/// Finished and in-progress shapes of one drawing surface.
#[derive(Debug, Default)]
pub struct Document {
    finished: Vec<Line>,
    in_progress: HashMap<TouchId, Line>,
    finished_circles: Vec<Circle>,
    current_circle: Circle,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a line for `touch_id` at `point`, or moves the end of the line
    /// that touch is already drawing.
    pub fn add_or_update_in_progress(
        &mut self,
        touch_id: TouchId,
        point: Pos2,
        width: f32,
        color: Color32,
    ) {
        self.in_progress
            .entry(touch_id)
            .and_modify(|line| line.end = point)
            .or_insert_with(|| Line::at(point, width, color));
    }

    /// Moves the end of the line drawn by `touch_id`. Returns `false` when the
    /// touch has no line, e.g. because it began while a selection was active.
    pub fn update_in_progress_end(&mut self, touch_id: TouchId, point: Pos2) -> bool {
        match self.in_progress.get_mut(&touch_id) {
            Some(line) => {
                line.end = point;
                true
            }
            None => false,
        }
    }

    /// Removes and returns the line drawn by `touch_id`.
    pub fn finalize_in_progress(&mut self, touch_id: TouchId) -> Option<Line> {
        self.in_progress.remove(&touch_id)
    }

    /// Drops the line drawn by `touch_id` without finishing it.
    pub fn discard_in_progress(&mut self, touch_id: TouchId) {
        self.in_progress.remove(&touch_id);
    }

    pub fn cancel_all_in_progress(&mut self) {
        self.in_progress.clear();
    }

    pub fn append_finished(&mut self, line: Line) {
        self.finished.push(line);
    }

    /// Removes the finished line at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range. Callers only pass indices obtained
    /// from hit testing against the current finished lines.
    pub fn remove_finished(&mut self, index: usize) -> Line {
        self.finished.remove(index)
    }

    pub fn finished(&self) -> &[Line] {
        &self.finished
    }

    pub fn finished_mut(&mut self, index: usize) -> Option<&mut Line> {
        self.finished.get_mut(index)
    }

    pub fn in_progress(&self) -> &HashMap<TouchId, Line> {
        &self.in_progress
    }

    pub fn current_circle(&self) -> Circle {
        self.current_circle
    }

    pub fn set_current_circle(&mut self, circle: Circle) {
        self.current_circle = circle;
    }

    /// Appends the current circle to the finished circles and resets it.
    pub fn commit_current_circle(&mut self) {
        self.finished_circles.push(self.current_circle);
        self.current_circle = Circle::default();
    }

    pub fn reset_current_circle(&mut self) {
        self.current_circle = Circle::default();
    }

    pub fn finished_circles(&self) -> &[Circle] {
        &self.finished_circles
    }

    /// Wipes every line, finished or not. Circles are kept.
    pub fn clear_lines(&mut self) {
        self.finished.clear();
        self.in_progress.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_progress_lifecycle() {
        let mut doc = Document::new();
        let id = TouchId(7);

        doc.add_or_update_in_progress(id, Pos2::new(1.0, 1.0), 3.0, Color32::RED);
        doc.add_or_update_in_progress(id, Pos2::new(5.0, 2.0), 9.0, Color32::BLUE);
        let line = doc.in_progress()[&id];
        assert_eq!(line.begin, Pos2::new(1.0, 1.0));
        assert_eq!(line.end, Pos2::new(5.0, 2.0));
        // Width and color stick from creation.
        assert_eq!(line.width, 3.0);
        assert_eq!(line.color, Color32::RED);

        assert!(!doc.update_in_progress_end(TouchId(8), Pos2::ZERO));
        assert_eq!(doc.finalize_in_progress(id), Some(line));
        assert_eq!(doc.finalize_in_progress(id), None);
    }

    #[test]
    #[should_panic]
    fn test_remove_out_of_range_panics() {
        let mut doc = Document::new();
        doc.remove_finished(0);
    }

    #[test]
    fn test_commit_circle_resets_current() {
        let mut doc = Document::new();
        doc.set_current_circle(Circle::from_two_points(Pos2::ZERO, Pos2::new(4.0, 4.0)));
        doc.commit_current_circle();
        assert_eq!(doc.finished_circles().len(), 1);
        assert!(doc.current_circle().is_degenerate());
    }

    #[test]
    fn test_clear_lines_keeps_circles() {
        let mut doc = Document::new();
        doc.add_or_update_in_progress(TouchId(1), Pos2::ZERO, 2.0, Color32::BLACK);
        doc.append_finished(Line::at(Pos2::new(3.0, 3.0), 2.0, Color32::BLACK));
        doc.set_current_circle(Circle::from_two_points(Pos2::ZERO, Pos2::new(4.0, 4.0)));
        doc.commit_current_circle();

        doc.clear_lines();

        assert!(doc.finished().is_empty());
        assert!(doc.in_progress().is_empty());
        assert_eq!(doc.finished_circles().len(), 1);
    }
}
