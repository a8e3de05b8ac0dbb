use egui::Rect;

use crate::palette::PaletteColor;

/// Entries the host can show in the contextual menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Delete,
    Color(PaletteColor),
}

impl MenuItem {
    pub fn title(&self) -> &'static str {
        match self {
            MenuItem::Delete => "Delete",
            MenuItem::Color(color) => color.label(),
        }
    }
}

/// Outbound requests from the drawing surface to its host.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// State changed; the host should repaint from a fresh snapshot.
    RedrawRequested,
    /// Show a menu with `items` pointing at `anchor`.
    ContextMenuRequested {
        anchor: Rect,
        items: Vec<MenuItem>,
    },
    /// Dismiss any visible menu.
    ContextMenuHidden,
}
