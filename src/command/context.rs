use egui::Rect;

use crate::config::Config;
use crate::document::Document;
use crate::event::EventBus;
use crate::palette::PaletteColor;
use crate::selection::Selection;

/// Context for command execution, providing access to the document,
/// the selection and the event bus.
#[derive(Debug)]
pub struct CommandContext<'a> {
    pub document: &'a mut Document,
    pub selection: &'a mut Selection,
    pub current_color: &'a mut PaletteColor,
    pub events: &'a EventBus,
    pub config: &'a Config,
    /// Bounds of the drawing surface, used to place the palette menu.
    pub bounds: Rect,
}
