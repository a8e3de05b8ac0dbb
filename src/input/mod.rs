use std::collections::HashSet;

use egui::{Event, PointerButton, Pos2, Rect};

mod delay;
mod gestures;
mod pairing;
mod router;

pub use delay::TouchDelay;
pub use gestures::{Gesture, GestureConfig, GestureRecognizer};
pub use pairing::TouchPairing;
pub use router::route_gesture;

use crate::touch::{TouchBatch, TouchId, TouchPhase, TouchPoint};

/// Touch identity used for the mouse when no touch screen is present.
pub const MOUSE_TOUCH_ID: TouchId = TouchId(u64::MAX);

/// Handles converting raw egui input into touch batches for the canvas
#[derive(Debug, Default)]
pub struct InputHandler {
    canvas_rect: Option<Rect>,
    blocked_rect: Option<Rect>,
    active: HashSet<TouchId>,
    saw_touch: bool,
    mouse_down: bool,
}

impl InputHandler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update the canvas rectangle (e.g. if window is resized)
    pub fn set_canvas_rect(&mut self, rect: Rect) {
        self.canvas_rect = Some(rect);
    }

    /// Touches starting inside `rect` belong to an overlay (e.g. a menu)
    /// rather than the canvas.
    pub fn set_blocked_rect(&mut self, rect: Option<Rect>) {
        self.blocked_rect = rect;
    }

    fn in_canvas(&self, pos: Pos2) -> bool {
        self.canvas_rect.is_none_or(|rect| rect.contains(pos))
            && !self.blocked_rect.is_some_and(|rect| rect.contains(pos))
    }

    /// Groups touch events by phase: began, moved, ended, cancelled.
    ///
    /// Touches that start outside the canvas are ignored for their whole
    /// lifetime. Once a real touch has been seen, pointer events (which some
    /// platforms synthesize from touches) are ignored.
    pub fn process_events(&mut self, events: &[Event]) -> Vec<TouchBatch> {
        self.saw_touch |= events.iter().any(|e| matches!(e, Event::Touch { .. }));

        let mut began = Vec::new();
        let mut moved: Vec<TouchPoint> = Vec::new();
        let mut ended = Vec::new();
        let mut cancelled = Vec::new();

        for event in events {
            let (id, phase, pos) = match event {
                Event::Touch { id, phase, pos, .. } => {
                    (TouchId::from(*id), TouchPhase::from(*phase), *pos)
                }
                Event::PointerButton {
                    pos,
                    button: PointerButton::Primary,
                    pressed,
                    ..
                } if !self.saw_touch => {
                    self.mouse_down = *pressed;
                    let phase = if *pressed {
                        TouchPhase::Began
                    } else {
                        TouchPhase::Ended
                    };
                    (MOUSE_TOUCH_ID, phase, *pos)
                }
                Event::PointerMoved(pos) if !self.saw_touch && self.mouse_down => {
                    (MOUSE_TOUCH_ID, TouchPhase::Moved, *pos)
                }
                Event::PointerGone if !self.saw_touch && self.mouse_down => {
                    self.mouse_down = false;
                    (MOUSE_TOUCH_ID, TouchPhase::Cancelled, Pos2::ZERO)
                }
                _ => continue,
            };

            let touch = TouchPoint { id, pos };
            match phase {
                TouchPhase::Began => {
                    if self.in_canvas(pos) && self.active.insert(id) {
                        began.push(touch);
                    }
                }
                TouchPhase::Moved => {
                    if !self.active.contains(&id) {
                        continue;
                    }
                    match moved.iter_mut().find(|t| t.id == id) {
                        Some(existing) => existing.pos = pos,
                        None => moved.push(touch),
                    }
                }
                TouchPhase::Ended => {
                    if self.active.remove(&id) {
                        ended.push(touch);
                    }
                }
                TouchPhase::Cancelled => {
                    if self.active.remove(&id) {
                        cancelled.push(touch);
                    }
                }
            }
        }

        [
            (TouchPhase::Began, began),
            (TouchPhase::Moved, moved),
            (TouchPhase::Ended, ended),
            (TouchPhase::Cancelled, cancelled),
        ]
        .into_iter()
        .filter(|(_, touches)| !touches.is_empty())
        .map(|(phase, touches)| TouchBatch { phase, touches })
        .collect()
    }
}
