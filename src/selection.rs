use log::debug;

use crate::event::{CanvasEvent, EventBus};

/// The single finished line targeted for move and delete.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    index: Option<usize>,
}

impl Selection {
    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn is_active(&self) -> bool {
        self.index.is_some()
    }

    /// Replaces the selection. Clearing it always asks the host to hide the
    /// contextual menu, whatever the previous value was.
    pub fn set(&mut self, index: Option<usize>, events: &EventBus) {
        if self.index != index {
            debug!("selection {:?} -> {:?}", self.index, index);
        }
        self.index = index;
        if index.is_none() {
            events.emit(CanvasEvent::ContextMenuHidden);
        }
    }

    pub fn clear(&mut self, events: &EventBus) {
        self.set(None, events);
    }
}
