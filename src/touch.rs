use egui::Pos2;

/// Stable handle for one physical contact, issued by the host when the touch
/// begins and retired when it ends or is cancelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TouchId(pub u64);

impl From<egui::TouchId> for TouchId {
    fn from(id: egui::TouchId) -> Self {
        Self(id.0)
    }
}

/// A touch already resolved to a point in canvas coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TouchPoint {
    pub id: TouchId,
    pub pos: Pos2,
}

impl TouchPoint {
    pub fn new(id: u64, pos: Pos2) -> Self {
        Self {
            id: TouchId(id),
            pos,
        }
    }
}

/// Phase of a touch interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TouchPhase {
    Began,
    Moved,
    Ended,
    Cancelled,
}

impl From<egui::TouchPhase> for TouchPhase {
    fn from(phase: egui::TouchPhase) -> Self {
        match phase {
            egui::TouchPhase::Start => Self::Began,
            egui::TouchPhase::Move => Self::Moved,
            egui::TouchPhase::End => Self::Ended,
            egui::TouchPhase::Cancel => Self::Cancelled,
        }
    }
}

/// All touches that changed phase together in one host event.
#[derive(Debug, Clone, PartialEq)]
pub struct TouchBatch {
    pub phase: TouchPhase,
    pub touches: Vec<TouchPoint>,
}

impl TouchBatch {
    /// The two locations of a two-finger batch, in reported order.
    pub fn pair(&self) -> Option<(Pos2, Pos2)> {
        match self.touches.as_slice() {
            [a, b] => Some((a.pos, b.pos)),
            _ => None,
        }
    }
}
