use egui::{Color32, Pos2, Rect, Vec2};
use log::{debug, trace};

use crate::command::{Command, CommandContext};
use crate::config::Config;
use crate::document::Document;
use crate::event::{CanvasEvent, EventBus, EventHandler};
use crate::geometry::{color_for_angle, Circle, Line};
use crate::palette::PaletteColor;
use crate::selection::Selection;
use crate::touch::{TouchBatch, TouchPhase, TouchPoint};
use crate::velocity::WidthMapper;

/// An in-progress line together with the color it is previewed in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PreviewLine {
    pub line: Line,
    pub color: Color32,
}

/// Everything a render pass needs, borrowed from the view.
#[derive(Debug, Clone)]
pub struct RenderSnapshot<'a> {
    pub finished_lines: &'a [Line],
    pub in_progress_lines: Vec<PreviewLine>,
    pub selected_index: Option<usize>,
    pub finished_circles: &'a [Circle],
    pub in_progress_circle: Circle,
    pub circle_line_width: f32,
}

impl RenderSnapshot<'_> {
    pub fn selected_line(&self) -> Option<&Line> {
        self.selected_index.and_then(|i| self.finished_lines.get(i))
    }
}

/// The drawing surface: turns touches and gestures into lines and circles.
///
/// All state is mutated from the `touches_*` and `on_*` handlers; hosts
/// subscribe to [`DrawView::events`] to learn when to repaint or show a menu.
#[derive(Debug)]
pub struct DrawView {
    config: Config,
    document: Document,
    selection: Selection,
    widths: WidthMapper,
    current_color: PaletteColor,
    events: EventBus,
    bounds: Rect,
}

impl Default for DrawView {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl DrawView {
    pub fn new(config: Config) -> Self {
        Self {
            widths: WidthMapper::new(config.min_line_width, config.max_line_width),
            current_color: config.initial_color,
            config,
            document: Document::new(),
            selection: Selection::default(),
            events: EventBus::new(),
            bounds: Rect::ZERO,
        }
    }

    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.events.subscribe(handler);
    }

    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Tells the view where it sits on screen; the palette is centered here.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selection.index()
    }

    pub fn current_color(&self) -> PaletteColor {
        self.current_color
    }

    pub fn width_mapper(&self) -> &WidthMapper {
        &self.widths
    }

    // ---- touches ----------------------------------------------------------

    /// Dispatches a batch to the handler for its phase.
    pub fn handle_touch_batch(&mut self, batch: &TouchBatch) {
        match batch.phase {
            TouchPhase::Began => self.touches_began(&batch.touches),
            TouchPhase::Moved => self.touches_moved(&batch.touches),
            TouchPhase::Ended => self.touches_ended(&batch.touches),
            TouchPhase::Cancelled => self.touches_cancelled(&batch.touches),
        }
    }

    pub fn touches_began(&mut self, touches: &[TouchPoint]) {
        debug!("touches began: {}", touches.len());

        if let [a, b] = touches {
            self.document
                .set_current_circle(Circle::from_two_points(a.pos, b.pos));
        } else if !self.selection.is_active() {
            let width = self.widths.width();
            let color = self.current_color.color32();
            for touch in touches {
                self.document
                    .add_or_update_in_progress(touch.id, touch.pos, width, color);
            }
        }

        self.request_redraw();
    }

    pub fn touches_moved(&mut self, touches: &[TouchPoint]) {
        trace!("touches moved: {}", touches.len());

        if let [a, b] = touches {
            self.document
                .set_current_circle(Circle::from_two_points(a.pos, b.pos));
        } else {
            for touch in touches {
                self.document.update_in_progress_end(touch.id, touch.pos);
            }
        }

        self.request_redraw();
    }

    pub fn touches_ended(&mut self, touches: &[TouchPoint]) {
        debug!("touches ended: {}", touches.len());

        if let [a, b] = touches {
            self.document
                .set_current_circle(Circle::from_two_points(a.pos, b.pos));
            self.document.commit_current_circle();
            // Keys never outlive their touch, even when the touch drew a circle.
            self.document.discard_in_progress(a.id);
            self.document.discard_in_progress(b.id);
        } else {
            let width = self.widths.width();
            for touch in touches {
                if let Some(mut line) = self.document.finalize_in_progress(touch.id) {
                    line.end = touch.pos;
                    line.width = width;
                    debug!(
                        "finished line {:?} -> {:?} width {:.1}",
                        line.begin, line.end, line.width
                    );
                    self.document.append_finished(line);
                }
            }
        }

        self.request_redraw();
    }

    pub fn touches_cancelled(&mut self, touches: &[TouchPoint]) {
        debug!("touches cancelled: {}", touches.len());
        self.document.cancel_all_in_progress();
        self.document.reset_current_circle();
        self.request_redraw();
    }

    // ---- gestures ---------------------------------------------------------

    pub fn on_tap(&mut self, point: Pos2) {
        self.execute(Command::SelectAt(point));
    }

    pub fn on_double_tap(&mut self) {
        self.execute(Command::ClearLines);
    }

    pub fn on_long_press_begin(&mut self, point: Pos2) {
        self.execute(Command::GrabAt(point));
    }

    pub fn on_long_press_end(&mut self) {
        self.execute(Command::ClearSelection);
    }

    /// `translation` is the movement since the previous pan update.
    pub fn on_pan_changed(&mut self, translation: Vec2, velocity: Vec2) {
        self.widths.record(velocity);
        self.execute(Command::MoveSelected(translation));
    }

    pub fn on_pan_ended(&mut self) {
        trace!("pan ended");
    }

    pub fn on_swipe_up_three_finger(&mut self) {
        self.execute(Command::ShowPalette);
    }

    // ---- commands ---------------------------------------------------------

    pub fn delete_selected(&mut self) {
        self.execute(Command::DeleteSelected);
    }

    pub fn move_selected(&mut self, translation: Vec2) {
        self.execute(Command::MoveSelected(translation));
    }

    pub fn set_current_color(&mut self, color: PaletteColor) {
        self.execute(Command::SetColor(color));
    }

    pub fn set_selection(&mut self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.document.finished().len());
        self.selection.set(index, &self.events);
        self.request_redraw();
    }

    pub fn find_line_index(&self, point: Pos2) -> Option<usize> {
        crate::geometry::find_line_index(
            self.document.finished(),
            point,
            self.config.hit_tolerance,
            self.config.hit_samples,
        )
    }

    pub fn execute(&mut self, command: Command) {
        let mut ctx = CommandContext {
            document: &mut self.document,
            selection: &mut self.selection,
            current_color: &mut self.current_color,
            events: &self.events,
            config: &self.config,
            bounds: self.bounds,
        };
        command.execute(&mut ctx);
    }

    // ---- rendering --------------------------------------------------------

    pub fn snapshot(&self) -> RenderSnapshot<'_> {
        let in_progress_lines = self
            .document
            .in_progress()
            .values()
            .map(|line| PreviewLine {
                line: *line,
                color: color_for_angle(line.angle()).unwrap_or(line.color),
            })
            .collect();

        RenderSnapshot {
            finished_lines: self.document.finished(),
            in_progress_lines,
            selected_index: self.selection.index(),
            finished_circles: self.document.finished_circles(),
            in_progress_circle: self.document.current_circle(),
            circle_line_width: self.config.circle_line_width,
        }
    }

    fn request_redraw(&self) {
        self.events.emit(CanvasEvent::RedrawRequested);
    }
}
