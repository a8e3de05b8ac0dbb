use std::collections::BTreeMap;

use egui::Pos2;

use crate::touch::{TouchBatch, TouchId, TouchPhase, TouchPoint};

#[derive(Debug, Clone, Copy)]
struct HeldTouch {
    start: TouchPoint,
    since: f64,
}

/// Holds back a lone touch-down until it is clearly not a tap.
///
/// A touch that lifts while held never reaches the drawing surface, so tapping
/// to select a line does not also leave a dot behind. A held touch is released
/// (its began batch forwarded) once it travels past `slop`, once `delay`
/// seconds pass, or once another touch joins it.
#[derive(Debug)]
pub struct TouchDelay {
    slop: f32,
    delay: f64,
    held: BTreeMap<TouchId, HeldTouch>,
    active: usize,
}

impl TouchDelay {
    pub fn new(slop: f32, delay: f64) -> Self {
        Self {
            slop,
            delay,
            held: BTreeMap::new(),
            active: 0,
        }
    }

    pub fn is_holding(&self) -> bool {
        !self.held.is_empty()
    }

    /// Filters one raw batch into the batches the drawing surface should see.
    pub fn filter(&mut self, batch: &TouchBatch, time: f64) -> Vec<TouchBatch> {
        let mut out = Vec::new();

        match batch.phase {
            TouchPhase::Began => {
                let lone = batch.touches.len() == 1 && self.active == 0 && self.held.is_empty();
                if lone {
                    let start = batch.touches[0];
                    self.held.insert(start.id, HeldTouch { start, since: time });
                } else {
                    self.release_all(&mut out);
                    self.active += batch.touches.len();
                    out.push(batch.clone());
                }
            }
            TouchPhase::Moved => {
                let escaped: Vec<TouchId> = batch
                    .touches
                    .iter()
                    .filter(|t| self.escapes(t.id, t.pos))
                    .map(|t| t.id)
                    .collect();
                for id in escaped {
                    self.release(id, &mut out);
                }

                let touches = self.visible(&batch.touches);
                if !touches.is_empty() {
                    out.push(TouchBatch {
                        phase: TouchPhase::Moved,
                        touches,
                    });
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                let touches = self.visible(&batch.touches);
                for touch in &batch.touches {
                    self.held.remove(&touch.id);
                }
                self.active = self.active.saturating_sub(touches.len());
                if !touches.is_empty() {
                    out.push(TouchBatch {
                        phase: batch.phase,
                        touches,
                    });
                }
            }
        }

        out
    }

    /// Releases touches that have been held longer than the delay.
    pub fn poll(&mut self, time: f64) -> Vec<TouchBatch> {
        let mut out = Vec::new();
        let expired: Vec<TouchId> = self
            .held
            .iter()
            .filter(|(_, held)| time - held.since >= self.delay)
            .map(|(id, _)| *id)
            .collect();
        for id in expired {
            self.release(id, &mut out);
        }
        out
    }

    fn escapes(&self, id: TouchId, pos: Pos2) -> bool {
        self.held
            .get(&id)
            .is_some_and(|held| held.start.pos.distance(pos) > self.slop)
    }

    fn visible(&self, touches: &[TouchPoint]) -> Vec<TouchPoint> {
        touches
            .iter()
            .filter(|t| !self.held.contains_key(&t.id))
            .copied()
            .collect()
    }

    fn release(&mut self, id: TouchId, out: &mut Vec<TouchBatch>) {
        if let Some(held) = self.held.remove(&id) {
            self.active += 1;
            out.push(TouchBatch {
                phase: TouchPhase::Began,
                touches: vec![held.start],
            });
        }
    }

    fn release_all(&mut self, out: &mut Vec<TouchBatch>) {
        let ids: Vec<TouchId> = self.held.keys().copied().collect();
        for id in ids {
            self.release(id, out);
        }
    }
}
