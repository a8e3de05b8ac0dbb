mod bus;
mod events;

pub use bus::{EventBus, EventQueue};
pub use events::{CanvasEvent, MenuItem};

/// Receives the requests the drawing surface sends to its host.
pub trait EventHandler {
    fn handle_event(&mut self, event: &CanvasEvent);
}
