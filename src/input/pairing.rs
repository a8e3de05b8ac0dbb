use std::collections::BTreeMap;

use egui::Pos2;
use log::trace;

use crate::touch::{TouchBatch, TouchId, TouchPhase, TouchPoint};

/// Keeps the fingers of a multi-touch gesture together across frames.
///
/// The host reports whatever changed during one frame, so two fingers that
/// lift a frame apart arrive as two single-touch batches. While more than one
/// touch is down, every move batch carries all of them at their latest
/// positions. When one finger of a pair lifts alone, its end is held back
/// until the partner lifts or is cancelled, and both are reported in one
/// batch.
///
/// A gesture that ever had three or more fingers down is never a pair: any
/// two-touch batch it produces is split into single touches.
#[derive(Debug, Default)]
pub struct TouchPairing {
    down: BTreeMap<TouchId, Pos2>,
    lifted: Option<TouchPoint>,
    peak: usize,
}

impl TouchPairing {
    pub fn new() -> Self {
        Self::default()
    }

    /// A lifted touch waiting for its partner.
    pub fn waiting(&self) -> Option<TouchPoint> {
        self.lifted
    }

    pub fn process(&mut self, batch: &TouchBatch) -> Vec<TouchBatch> {
        let mut out = Vec::new();

        match batch.phase {
            TouchPhase::Began => {
                // A new finger breaks the pair; the waiting touch ends on its own.
                if let Some(lifted) = self.lifted.take() {
                    self.emit(&mut out, TouchPhase::Ended, vec![lifted]);
                }
                for touch in &batch.touches {
                    self.down.insert(touch.id, touch.pos);
                }
                self.peak = self.peak.max(self.down.len());
                self.emit(&mut out, TouchPhase::Began, batch.touches.clone());
            }
            TouchPhase::Moved => {
                for touch in &batch.touches {
                    if let Some(pos) = self.down.get_mut(&touch.id) {
                        *pos = touch.pos;
                    }
                }

                let touches = if self.down.len() + usize::from(self.lifted.is_some()) > 1 {
                    self.lifted
                        .into_iter()
                        .chain(self.down.iter().map(|(&id, &pos)| TouchPoint { id, pos }))
                        .collect()
                } else {
                    batch.touches.clone()
                };
                self.emit(&mut out, TouchPhase::Moved, touches);
            }
            TouchPhase::Ended => {
                for touch in &batch.touches {
                    self.down.remove(&touch.id);
                }

                if let Some(lifted) = self.lifted.take() {
                    let mut touches = vec![lifted];
                    touches.extend_from_slice(&batch.touches);
                    self.emit(&mut out, TouchPhase::Ended, touches);
                } else if let ([touch], 1, 2) =
                    (batch.touches.as_slice(), self.down.len(), self.peak)
                {
                    trace!("holding end of {:?} until its partner lifts", touch.id);
                    self.lifted = Some(*touch);
                } else {
                    self.emit(&mut out, TouchPhase::Ended, batch.touches.clone());
                }
            }
            TouchPhase::Cancelled => {
                for touch in &batch.touches {
                    self.down.remove(&touch.id);
                }

                let mut touches: Vec<TouchPoint> = self.lifted.take().into_iter().collect();
                touches.extend_from_slice(&batch.touches);
                self.emit(&mut out, TouchPhase::Cancelled, touches);
            }
        }

        if self.down.is_empty() && self.lifted.is_none() {
            self.peak = 0;
        }

        out
    }

    fn emit(&self, out: &mut Vec<TouchBatch>, phase: TouchPhase, touches: Vec<TouchPoint>) {
        if touches.is_empty() {
            return;
        }
        if touches.len() == 2 && self.peak > 2 {
            out.extend(touches.into_iter().map(|touch| TouchBatch {
                phase,
                touches: vec![touch],
            }));
        } else {
            out.push(TouchBatch { phase, touches });
        }
    }
}
