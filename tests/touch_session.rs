use egui::{pos2, Color32, Pos2, Vec2};
use touch_tracker::{
    CanvasEvent, Config, DrawView, EventQueue, PaletteColor, TouchBatch, TouchPhase, TouchPoint,
};

// Helper to create a view with an event queue attached
fn create_test_view() -> (DrawView, EventQueue) {
    let view = DrawView::new(Config::default());
    let queue = EventQueue::new();
    view.subscribe(Box::new(queue.clone()));
    (view, queue)
}

fn touch(id: u64, x: f32, y: f32) -> TouchPoint {
    TouchPoint::new(id, Pos2::new(x, y))
}

#[test]
fn test_tap_in_place_adds_one_zero_length_line() {
    let (mut view, _queue) = create_test_view();
    let p = pos2(12.0, 34.0);

    view.touches_began(&[touch(1, p.x, p.y)]);
    view.touches_ended(&[touch(1, p.x, p.y)]);

    let lines = view.document().finished();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0].begin, p);
    assert_eq!(lines[0].end, p);
    assert!(view.document().in_progress().is_empty());
}

#[test]
fn test_single_touch_draws_a_line() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_moved(&[touch(1, 10.0, 5.0)]);
    view.touches_moved(&[touch(1, 20.0, 10.0)]);

    let in_progress = view.document().in_progress();
    assert_eq!(in_progress.len(), 1);
    let line = in_progress.values().next().unwrap();
    assert_eq!(line.begin, pos2(0.0, 0.0));
    assert_eq!(line.end, pos2(20.0, 10.0));
    assert!(view.document().finished().is_empty());

    view.touches_ended(&[touch(1, 30.0, 15.0)]);
    let finished = view.document().finished();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].end, pos2(30.0, 15.0));
    assert_eq!(finished[0].color, Color32::BLACK);
}

#[test]
fn test_concurrent_touches_draw_independent_lines() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_began(&[touch(2, 100.0, 100.0)]);
    view.touches_moved(&[touch(2, 150.0, 100.0)]);
    view.touches_moved(&[touch(1, 0.0, 50.0)]);
    view.touches_ended(&[touch(2, 160.0, 100.0)]);

    assert_eq!(view.document().in_progress().len(), 1);
    assert_eq!(view.document().finished().len(), 1);
    assert_eq!(view.document().finished()[0].begin, pos2(100.0, 100.0));

    view.touches_ended(&[touch(1, 0.0, 60.0)]);
    assert_eq!(view.document().finished().len(), 2);
    assert_eq!(view.document().finished()[1].end, pos2(0.0, 60.0));
}

#[test]
fn test_move_without_mapping_is_ignored() {
    let (mut view, _queue) = create_test_view();

    view.touches_moved(&[touch(9, 5.0, 5.0)]);
    view.touches_ended(&[touch(9, 5.0, 5.0)]);

    assert!(view.document().finished().is_empty());
    assert!(view.document().in_progress().is_empty());
}

#[test]
fn test_two_touches_draw_a_circle() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0), touch(2, 4.0, 4.0)]);
    assert!(view.document().in_progress().is_empty());
    assert_eq!(view.document().current_circle().size(), Vec2::new(4.0, 4.0));

    view.touches_moved(&[touch(1, 2.0, 2.0), touch(2, 8.0, 12.0)]);
    let circle = view.document().current_circle();
    assert_eq!(circle.origin(), pos2(2.0, 2.0));
    assert_eq!(circle.size(), Vec2::new(6.0, 10.0));

    view.touches_ended(&[touch(1, 0.0, 0.0), touch(2, 10.0, 0.0)]);

    let circles = view.document().finished_circles();
    assert_eq!(circles.len(), 1);
    assert_eq!(circles[0].origin(), pos2(0.0, 0.0));
    // Bounding rectangle, not bounding square: colinear points give zero height.
    assert_eq!(circles[0].size(), Vec2::new(10.0, 0.0));
    assert!(view.document().current_circle().is_degenerate());
    assert!(view.document().finished().is_empty());
}

#[test]
fn test_two_touch_end_drops_their_lines() {
    let (mut view, _queue) = create_test_view();

    // Fingers landed separately, then lifted together.
    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_began(&[touch(2, 50.0, 50.0)]);
    view.touches_ended(&[touch(1, 0.0, 0.0), touch(2, 50.0, 50.0)]);

    assert!(view.document().in_progress().is_empty());
    assert!(view.document().finished().is_empty());
    assert_eq!(view.document().finished_circles().len(), 1);
}

#[test]
fn test_cancel_discards_everything_in_progress() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_began(&[touch(2, 5.0, 5.0), touch(3, 10.0, 20.0)]);
    view.touches_cancelled(&[touch(1, 3.0, 3.0)]);

    assert!(view.document().in_progress().is_empty());
    assert!(view.document().current_circle().is_degenerate());
    assert!(view.document().finished().is_empty());
    assert!(view.document().finished_circles().is_empty());

    // Ending the cancelled touch afterwards produces nothing.
    view.touches_ended(&[touch(1, 3.0, 3.0)]);
    assert!(view.document().finished().is_empty());
}

#[test]
fn test_each_touch_event_requests_one_redraw() {
    let (mut view, queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_moved(&[touch(1, 1.0, 0.0)]);
    view.touches_ended(&[touch(1, 2.0, 0.0)]);
    view.touches_cancelled(&[]);

    assert_eq!(queue.drain(), vec![CanvasEvent::RedrawRequested; 4]);
}

#[test]
fn test_no_new_line_while_selection_active() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_ended(&[touch(1, 100.0, 0.0)]);
    view.on_tap(pos2(50.0, 1.0));
    assert_eq!(view.selected_index(), Some(0));

    view.touches_began(&[touch(2, 200.0, 200.0)]);
    view.touches_moved(&[touch(2, 250.0, 200.0)]);
    view.touches_ended(&[touch(2, 300.0, 200.0)]);

    assert_eq!(view.document().finished().len(), 1);
    assert!(view.document().in_progress().is_empty());
}

#[test]
fn test_width_comes_from_pan_speed_at_finalization() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    // No variance yet: widest line.
    assert_eq!(view.document().in_progress().values().next().unwrap().width, 10.0);

    view.on_pan_changed(Vec2::new(1.0, 0.0), Vec2::new(10.0, 0.0));
    view.on_pan_changed(Vec2::new(1.0, 0.0), Vec2::new(110.0, 0.0));
    view.touches_ended(&[touch(1, 40.0, 0.0)]);

    let line = view.document().finished()[0];
    assert!((line.width - 1.0).abs() < 1e-4, "width was {}", line.width);
}

#[test]
fn test_new_lines_use_current_color() {
    let (mut view, _queue) = create_test_view();

    view.set_current_color(PaletteColor::Yellow);
    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_ended(&[touch(1, 10.0, 0.0)]);

    assert_eq!(view.document().finished()[0].color, Color32::YELLOW);
}

#[test]
fn test_preview_color_follows_angle() {
    let (mut view, _queue) = create_test_view();

    view.touches_began(&[touch(1, 0.0, 0.0)]);
    view.touches_moved(&[touch(1, 10.0, -10.0)]);
    assert_eq!(view.snapshot().in_progress_lines[0].color, Color32::RED);

    view.touches_moved(&[touch(1, -10.0, -10.0)]);
    assert_eq!(view.snapshot().in_progress_lines[0].color, Color32::BLUE);

    view.touches_moved(&[touch(1, -10.0, 10.0)]);
    assert_eq!(view.snapshot().in_progress_lines[0].color, Color32::YELLOW);

    view.touches_moved(&[touch(1, 10.0, 10.0)]);
    assert_eq!(view.snapshot().in_progress_lines[0].color, Color32::GREEN);
}

#[test]
fn test_batches_dispatch_by_phase() {
    let (mut view, _queue) = create_test_view();

    view.handle_touch_batch(&TouchBatch {
        phase: TouchPhase::Began,
        touches: vec![touch(1, 1.0, 1.0)],
    });
    view.handle_touch_batch(&TouchBatch {
        phase: TouchPhase::Moved,
        touches: vec![touch(1, 5.0, 1.0)],
    });
    view.handle_touch_batch(&TouchBatch {
        phase: TouchPhase::Ended,
        touches: vec![touch(1, 9.0, 1.0)],
    });

    assert_eq!(view.document().finished().len(), 1);
    assert_eq!(view.document().finished()[0].end, pos2(9.0, 1.0));
}
