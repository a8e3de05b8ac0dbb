use std::cell::RefCell;
use std::rc::Rc;

use crate::event::{CanvasEvent, EventHandler};

/// A simple event bus for broadcasting canvas events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
        }
    }

    /// Subscribe a handler to receive events
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers
    pub fn emit(&self, event: CanvasEvent) {
        for handler in &mut *self.handlers.borrow_mut() {
            handler.handle_event(&event);
        }
    }
}

/// Handler that buffers events until the host drains them.
///
/// Clones share the same buffer, so one clone can be subscribed to a bus
/// while another is kept for draining.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    events: Rc<RefCell<Vec<CanvasEvent>>>,
}

impl EventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes every buffered event, oldest first.
    pub fn drain(&self) -> Vec<CanvasEvent> {
        std::mem::take(&mut *self.events.borrow_mut())
    }

    pub fn len(&self) -> usize {
        self.events.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.borrow().is_empty()
    }
}

impl EventHandler for EventQueue {
    fn handle_event(&mut self, event: &CanvasEvent) {
        self.events.borrow_mut().push(event.clone());
    }
}
