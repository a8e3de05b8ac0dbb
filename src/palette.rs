use egui::Color32;
use serde::{Deserialize, Serialize};

/// The fixed set of colors offered by the palette menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PaletteColor {
    #[default]
    Black,
    Gray,
    Red,
    Yellow,
    Blue,
}

impl PaletteColor {
    /// Palette order, as shown in the menu.
    pub const ALL: [PaletteColor; 5] = [
        PaletteColor::Black,
        PaletteColor::Gray,
        PaletteColor::Red,
        PaletteColor::Yellow,
        PaletteColor::Blue,
    ];

    pub fn color32(self) -> Color32 {
        match self {
            PaletteColor::Black => Color32::BLACK,
            PaletteColor::Gray => Color32::GRAY,
            PaletteColor::Red => Color32::RED,
            PaletteColor::Yellow => Color32::YELLOW,
            PaletteColor::Blue => Color32::BLUE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaletteColor::Black => "Black",
            PaletteColor::Gray => "Gray",
            PaletteColor::Red => "Red",
            PaletteColor::Yellow => "Yellow",
            PaletteColor::Blue => "Blue",
        }
    }
}
