#![warn(clippy::all, rust_2018_idioms)]

pub mod app;
pub mod command;
pub mod config;
pub mod document;
pub mod event;
pub mod geometry;
pub mod input;
pub mod palette;
pub mod renderer;
pub mod selection;
pub mod touch;
pub mod velocity;
pub mod view;

pub use app::TouchTrackerApp;
pub use command::Command;
pub use config::{Config, ConfigError};
pub use document::Document;
pub use event::{CanvasEvent, EventBus, EventHandler, EventQueue, MenuItem};
pub use geometry::{Circle, Line};
pub use palette::PaletteColor;
pub use renderer::Renderer;
pub use touch::{TouchBatch, TouchId, TouchPhase, TouchPoint};
pub use view::{DrawView, PreviewLine, RenderSnapshot};
