use egui::{Pos2, Rect, Vec2};
use log::{debug, info};

use super::CommandContext;
use crate::event::{CanvasEvent, MenuItem};
use crate::geometry::find_line_index;
use crate::palette::PaletteColor;

/// Size of the rectangle a contextual menu points at.
const MENU_ANCHOR_SIZE: Vec2 = Vec2::new(2.0, 2.0);

/// Commands that can be executed against the drawing surface
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Select the line under a tap and offer to delete it
    SelectAt(Pos2),
    /// Select the line under a long press so it can be dragged
    GrabAt(Pos2),
    /// Drop the selection, e.g. when a long press ends
    ClearSelection,
    /// Remove the selected line
    DeleteSelected,
    /// Translate the selected line
    MoveSelected(Vec2),
    /// Wipe every line; circles stay
    ClearLines,
    /// Offer the color palette
    ShowPalette,
    /// Use a palette color for new lines
    SetColor(PaletteColor),
}

impl Command {
    pub fn execute(&self, ctx: &mut CommandContext<'_>) {
        debug!("executing {:?}", self);
        match *self {
            Command::SelectAt(point) => select_at(ctx, point),
            Command::GrabAt(point) => {
                let index = hit_test(ctx, point);
                ctx.selection.set(index, ctx.events);
                if index.is_some() {
                    ctx.document.cancel_all_in_progress();
                }
                ctx.events.emit(CanvasEvent::RedrawRequested);
            }
            Command::ClearSelection => {
                ctx.selection.clear(ctx.events);
                ctx.events.emit(CanvasEvent::RedrawRequested);
            }
            Command::DeleteSelected => delete_selected(ctx),
            Command::MoveSelected(translation) => move_selected(ctx, translation),
            Command::ClearLines => {
                ctx.selection.clear(ctx.events);
                ctx.document.clear_lines();
                ctx.events.emit(CanvasEvent::RedrawRequested);
            }
            Command::ShowPalette => {
                ctx.document.cancel_all_in_progress();
                ctx.document.reset_current_circle();
                ctx.events.emit(CanvasEvent::ContextMenuRequested {
                    anchor: Rect::from_center_size(ctx.bounds.center(), MENU_ANCHOR_SIZE),
                    items: PaletteColor::ALL.into_iter().map(MenuItem::Color).collect(),
                });
                ctx.events.emit(CanvasEvent::RedrawRequested);
            }
            Command::SetColor(color) => {
                info!("current color set to {}", color.label());
                *ctx.current_color = color;
                ctx.events.emit(CanvasEvent::ContextMenuHidden);
            }
        }
    }
}

fn hit_test(ctx: &CommandContext<'_>, point: Pos2) -> Option<usize> {
    find_line_index(
        ctx.document.finished(),
        point,
        ctx.config.hit_tolerance,
        ctx.config.hit_samples,
    )
}

fn select_at(ctx: &mut CommandContext<'_>, point: Pos2) {
    let index = hit_test(ctx, point);
    let previous = ctx.selection.index();
    if index.is_some() && previous.is_some() && previous != index {
        // Dismiss the old line's menu before offering one for the new line.
        ctx.events.emit(CanvasEvent::ContextMenuHidden);
    }
    ctx.selection.set(index, ctx.events);

    if index.is_some() {
        ctx.events.emit(CanvasEvent::ContextMenuRequested {
            anchor: Rect::from_min_size(point, MENU_ANCHOR_SIZE),
            items: vec![MenuItem::Delete],
        });
    }

    ctx.events.emit(CanvasEvent::RedrawRequested);
}

fn delete_selected(ctx: &mut CommandContext<'_>) {
    let Some(index) = ctx.selection.index() else {
        return;
    };

    let removed = ctx.document.remove_finished(index);
    info!("deleted line {} ({:?} -> {:?})", index, removed.begin, removed.end);
    ctx.selection.clear(ctx.events);
    ctx.events.emit(CanvasEvent::RedrawRequested);
}

fn move_selected(ctx: &mut CommandContext<'_>, translation: Vec2) {
    let Some(index) = ctx.selection.index() else {
        return;
    };

    ctx.events.emit(CanvasEvent::ContextMenuHidden);
    match ctx.document.finished_mut(index) {
        Some(line) => line.translate(translation),
        None => {
            log::warn!("selection {} points past the finished lines", index);
            ctx.selection.clear(ctx.events);
        }
    }
    ctx.events.emit(CanvasEvent::RedrawRequested);
}
