//! Interaction commands: what a recognized gesture or menu choice does to
//! the document and the selection.

mod commands;
mod context;

pub use commands::Command;
pub use context::CommandContext;
