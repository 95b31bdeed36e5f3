use bevy::prelude::*;
use bevy::window::PrimaryWindow;

/// Screen position (top-left origin, y down) of a press that started this frame.
pub fn just_pressed_screen_position(
    button_input: &ButtonInput<MouseButton>,
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    if button_input.just_pressed(MouseButton::Left) {
        windows.get_single().ok()?.cursor_position()
    } else {
        touch_input
            .iter_just_pressed()
            .next()
            .map(bevy::input::touch::Touch::position)
    }
}

/// Current pointer position: the mouse cursor, or the first active touch.
pub fn pointer_screen_position(
    touch_input: &Touches,
    windows: &Query<&Window, With<PrimaryWindow>>,
) -> Option<Vec2> {
    windows
        .get_single()
        .ok()
        .and_then(Window::cursor_position)
        .or_else(|| touch_input.iter().next().map(bevy::input::touch::Touch::position))
}

/// True when the primary pointer was released this frame.
pub fn pointer_just_released(button_input: &ButtonInput<MouseButton>, touch_input: &Touches) -> bool {
    button_input.just_released(MouseButton::Left) || touch_input.any_just_released()
}
