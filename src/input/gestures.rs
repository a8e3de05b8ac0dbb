use std::collections::BTreeMap;

use egui::{Pos2, Vec2};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::touch::{TouchBatch, TouchId, TouchPhase};

/// Represents a recognized gesture
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Gesture {
    /// Single tap, reported once the double-tap window has passed
    Tap { position: Pos2 },
    /// Two taps in quick succession
    DoubleTap,
    /// A single touch held still long enough
    LongPressBegan { position: Pos2 },
    /// The long-pressing touch lifted
    LongPressEnded,
    /// Touches moved; `translation` is relative to the previous update
    PanChanged { translation: Vec2, velocity: Vec2 },
    PanEnded,
    /// Three touches dragged upward together
    SwipeUpThreeFinger,
}

/// Configuration for gesture recognition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Maximum travel for a touch to still count as a tap or long press
    pub tap_slop: f32,
    /// Maximum time between taps for a double tap (seconds)
    pub multi_tap_time: f64,
    /// Time required for long press (seconds)
    pub long_press_time: f64,
    /// Minimum travel before a pan starts
    pub pan_threshold: f32,
    /// Minimum upward travel of every finger for the three-finger swipe
    pub swipe_distance: f32,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            tap_slop: 10.0,
            multi_tap_time: 0.3,
            long_press_time: 0.5,
            pan_threshold: 10.0,
            swipe_distance: 50.0,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct TrackedTouch {
    start_pos: Pos2,
    start_time: f64,
    last_pos: Pos2,
    last_time: f64,
}

/// Recognizes taps, long presses, pans and swipes from raw touch batches.
///
/// A gesture spans from the first touch going down to the last one lifting.
#[derive(Debug, Default)]
pub struct GestureRecognizer {
    config: GestureConfig,
    touches: BTreeMap<TouchId, TrackedTouch>,
    max_touches: usize,
    moved: bool,
    panning: bool,
    long_pressing: bool,
    long_press_fired: bool,
    swipe_fired: bool,
    pending_tap: Option<(Pos2, f64)>,
}

impl GestureRecognizer {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    /// Whether a timer is running that only [`Self::poll`] can complete.
    pub fn needs_poll(&self) -> bool {
        self.pending_tap.is_some() || (!self.touches.is_empty() && !self.long_press_fired)
    }

    /// Feed one touch batch observed at `time` (seconds).
    pub fn on_batch(&mut self, batch: &TouchBatch, time: f64) -> Vec<Gesture> {
        let mut gestures = Vec::new();

        match batch.phase {
            TouchPhase::Began => {
                for touch in &batch.touches {
                    self.touches.insert(
                        touch.id,
                        TrackedTouch {
                            start_pos: touch.pos,
                            start_time: time,
                            last_pos: touch.pos,
                            last_time: time,
                        },
                    );
                }
                self.max_touches = self.max_touches.max(self.touches.len());
            }
            TouchPhase::Moved => self.on_moved(batch, time, &mut gestures),
            TouchPhase::Ended => {
                let tap_position = self.tap_candidate(batch, time);
                for touch in &batch.touches {
                    self.touches.remove(&touch.id);
                }
                if self.touches.is_empty() {
                    self.finish_gesture(&mut gestures);
                    if let Some(position) = tap_position {
                        self.register_tap(position, time, &mut gestures);
                    }
                }
            }
            TouchPhase::Cancelled => {
                for touch in &batch.touches {
                    self.touches.remove(&touch.id);
                }
                if self.touches.is_empty() {
                    self.finish_gesture(&mut gestures);
                }
                self.pending_tap = None;
            }
        }

        gestures
    }

    /// Advance timers: fires long presses and single taps whose double-tap
    /// window has expired.
    pub fn poll(&mut self, time: f64) -> Vec<Gesture> {
        let mut gestures = Vec::new();

        if let Some((position, tapped_at)) = self.pending_tap {
            if time - tapped_at > self.config.multi_tap_time {
                self.pending_tap = None;
                debug!("tap at {:?}", position);
                gestures.push(Gesture::Tap { position });
            }
        }

        if self.max_touches == 1 && !self.moved && !self.long_press_fired {
            if let Some(touch) = self.touches.values().next() {
                if time - touch.start_time >= self.config.long_press_time {
                    self.long_press_fired = true;
                    self.long_pressing = true;
                    debug!("long press at {:?}", touch.start_pos);
                    gestures.push(Gesture::LongPressBegan {
                        position: touch.start_pos,
                    });
                }
            }
        }

        gestures
    }

    fn on_moved(&mut self, batch: &TouchBatch, time: f64, gestures: &mut Vec<Gesture>) {
        let mut translation = Vec2::ZERO;
        let mut dt = 0.0_f64;
        let mut count = 0;

        for touch in &batch.touches {
            let Some(tracked) = self.touches.get_mut(&touch.id) else {
                continue;
            };
            translation += touch.pos - tracked.last_pos;
            dt = dt.max(time - tracked.last_time);
            count += 1;
            tracked.last_pos = touch.pos;
            tracked.last_time = time;

            let travel = tracked.start_pos.distance(touch.pos);
            if travel > self.config.tap_slop {
                self.moved = true;
            }
            if travel > self.config.pan_threshold {
                self.panning = self.panning || self.max_touches < 3;
            }
        }

        if count == 0 {
            return;
        }

        if self.touches.len() >= 3 {
            if !self.swipe_fired && self.is_swipe_up() {
                self.swipe_fired = true;
                debug!("three finger swipe up");
                gestures.push(Gesture::SwipeUpThreeFinger);
            }
            return;
        }

        if self.panning && self.max_touches < 3 {
            let translation = translation / count as f32;
            let velocity = translation / dt.max(1e-3) as f32;
            gestures.push(Gesture::PanChanged {
                translation,
                velocity,
            });
        }
    }

    fn is_swipe_up(&self) -> bool {
        self.touches.values().all(|t| {
            let delta = t.last_pos - t.start_pos;
            -delta.y >= self.config.swipe_distance && delta.x.abs() < -delta.y
        })
    }

    /// Position of a tap if `batch` lifts the only touch of a short, still
    /// gesture.
    fn tap_candidate(&self, batch: &TouchBatch, time: f64) -> Option<Pos2> {
        if self.max_touches != 1 || self.moved || self.long_press_fired {
            return None;
        }
        let [touch] = batch.touches.as_slice() else {
            return None;
        };
        let tracked = self.touches.get(&touch.id)?;
        (time - tracked.start_time < self.config.long_press_time).then_some(touch.pos)
    }

    fn register_tap(&mut self, position: Pos2, time: f64, gestures: &mut Vec<Gesture>) {
        match self.pending_tap.take() {
            Some((_, first)) if time - first <= self.config.multi_tap_time => {
                debug!("double tap at {:?}", position);
                gestures.push(Gesture::DoubleTap);
            }
            Some((earlier, _)) => {
                // The earlier tap's window has passed without a poll; report it
                // before starting a new window.
                gestures.push(Gesture::Tap { position: earlier });
                self.pending_tap = Some((position, time));
            }
            None => self.pending_tap = Some((position, time)),
        }
    }

    fn finish_gesture(&mut self, gestures: &mut Vec<Gesture>) {
        if self.panning {
            gestures.push(Gesture::PanEnded);
        }
        if self.long_pressing {
            gestures.push(Gesture::LongPressEnded);
        }
        self.max_touches = 0;
        self.moved = false;
        self.panning = false;
        self.long_pressing = false;
        self.long_press_fired = false;
        self.swipe_fired = false;
    }
}
