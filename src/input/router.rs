use super::Gesture;
use crate::view::DrawView;

/// Routes a recognized gesture to the matching handler on the drawing surface
pub fn route_gesture(gesture: &Gesture, view: &mut DrawView) {
    match *gesture {
        Gesture::Tap { position } => view.on_tap(position),
        Gesture::DoubleTap => view.on_double_tap(),
        Gesture::LongPressBegan { position } => view.on_long_press_begin(position),
        Gesture::LongPressEnded => view.on_long_press_end(),
        Gesture::PanChanged {
            translation,
            velocity,
        } => view.on_pan_changed(translation, velocity),
        Gesture::PanEnded => view.on_pan_ended(),
        Gesture::SwipeUpThreeFinger => view.on_swipe_up_three_finger(),
    }
}
