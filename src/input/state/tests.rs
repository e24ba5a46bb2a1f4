use super::*;
use crate::config::{Command, KeybindingsConfig};
use crate::draw::{Action, Color, color};
use crate::input::{Key, MouseButton, Tool};

fn create_test_input_state() -> InputState {
    let keybindings = KeybindingsConfig::default();
    let command_map = keybindings.build_command_map().unwrap();

    InputState::with_defaults(
        Color {
            r: 0.0,
            g: 0.0,
            b: 0.0,
            a: 1.0,
        }, // Black
        5.0, // width
        3.0, // quality
        command_map,
    )
}

#[test]
fn gesture_commits_pen_action_with_tool_snapshot() {
    let mut state = create_test_input_state();
    state.current_color = color::RED;
    state.current_width = 7.0;
    state.current_quality = 4.0;

    state.on_mouse_press(MouseButton::Left, 10.0, 10.0);
    assert_eq!(state.gesture, GestureState::Active);

    state.on_mouse_motion(20.0, 15.0);
    state.on_mouse_motion(30.0, 20.0);
    state.on_mouse_release(MouseButton::Left, 30.0, 20.0);

    assert_eq!(state.gesture, GestureState::Idle);
    assert_eq!(state.history.len(), 1);

    match &state.history.actions()[0] {
        Action::Pen {
            points,
            color,
            width,
            quality,
            timestamp_ms,
        } => {
            assert_eq!(points.len(), 3);
            assert_eq!(points[0].x, 10.0);
            assert_eq!(points[2].y, 20.0);
            assert_eq!(*color, color::RED);
            assert_eq!(*width, 7.0);
            assert_eq!(*quality, 4.0);
            assert!(*timestamp_ms > 0);
        }
        other => panic!("expected Pen action, got {other:?}"),
    }
}

#[test]
fn eraser_gesture_commits_eraser_action() {
    let mut state = create_test_input_state();
    state.current_tool = Tool::Eraser;

    state.on_mouse_press(MouseButton::Left, 5.0, 5.0);
    state.on_mouse_motion(6.0, 6.0);
    state.on_mouse_release(MouseButton::Left, 6.0, 6.0);

    assert_eq!(state.history.len(), 1);
    assert!(matches!(
        state.history.actions()[0],
        Action::Eraser { .. }
    ));
}

#[test]
fn single_click_commits_single_point_action() {
    let mut state = create_test_input_state();

    state.on_mouse_press(MouseButton::Left, 42.0, 17.0);
    state.on_mouse_release(MouseButton::Left, 42.0, 17.0);

    assert_eq!(state.history.len(), 1);
    match &state.history.actions()[0] {
        Action::Pen { points, .. } => assert_eq!(points.len(), 1),
        other => panic!("expected Pen action, got {other:?}"),
    }
}

#[test]
fn motion_while_idle_captures_nothing() {
    let mut state = create_test_input_state();

    state.on_mouse_motion(10.0, 10.0);
    state.on_mouse_motion(20.0, 20.0);

    assert!(state.capture.points().is_empty());
    assert!(state.history.is_empty());
}

#[test]
fn right_button_does_not_start_or_cancel_a_gesture() {
    let mut state = create_test_input_state();

    state.on_mouse_press(MouseButton::Right, 10.0, 10.0);
    assert_eq!(state.gesture, GestureState::Idle);

    state.on_mouse_press(MouseButton::Left, 10.0, 10.0);
    state.on_mouse_press(MouseButton::Right, 15.0, 15.0);
    assert_eq!(state.gesture, GestureState::Active);

    state.on_mouse_release(MouseButton::Right, 15.0, 15.0);
    assert_eq!(state.gesture, GestureState::Active);

    state.on_mouse_release(MouseButton::Left, 20.0, 20.0);
    assert_eq!(state.gesture, GestureState::Idle);
    assert_eq!(state.history.len(), 1);
}

#[test]
fn tool_switch_mid_gesture_applies_at_commit() {
    let mut state = create_test_input_state();

    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.handle_command(Command::SelectEraser);
    state.on_mouse_release(MouseButton::Left, 1.0, 1.0);

    // The snapshot is taken when the gesture commits.
    assert!(matches!(
        state.history.actions()[0],
        Action::Eraser { .. }
    ));
}

#[test]
fn width_never_drops_below_one() {
    let mut state = create_test_input_state();

    for _ in 0..50 {
        state.handle_command(Command::DecreaseWidth);
    }
    assert_eq!(state.current_width, 1.0);

    for _ in 0..50 {
        state.on_scroll(1);
    }
    assert_eq!(state.current_width, 1.0);
}

#[test]
fn width_is_capped_at_maximum() {
    let mut state = create_test_input_state();

    for _ in 0..100 {
        state.handle_command(Command::IncreaseWidth);
    }
    assert_eq!(state.current_width, 20.0);
}

#[test]
fn quality_has_no_upper_bound_but_a_floor() {
    let mut state = create_test_input_state();

    for _ in 0..200 {
        state.handle_command(Command::IncreaseQuality);
    }
    assert_eq!(state.current_quality, 203.0);

    for _ in 0..500 {
        state.handle_command(Command::DecreaseQuality);
    }
    assert_eq!(state.current_quality, 1.0);
}

#[test]
fn scroll_adjusts_width_in_both_directions() {
    let mut state = create_test_input_state();
    assert_eq!(state.current_width, 5.0);

    state.on_scroll(-1);
    assert_eq!(state.current_width, 6.0);

    state.on_scroll(1);
    state.on_scroll(1);
    assert_eq!(state.current_width, 4.0);
}

#[test]
fn clear_board_empties_history() {
    let mut state = create_test_input_state();

    state.on_mouse_press(MouseButton::Left, 0.0, 0.0);
    state.on_mouse_release(MouseButton::Left, 1.0, 1.0);
    state.on_mouse_press(MouseButton::Left, 5.0, 5.0);
    state.on_mouse_release(MouseButton::Left, 6.0, 6.0);
    assert_eq!(state.history.len(), 2);

    state.needs_redraw = false;
    state.handle_command(Command::ClearBoard);
    assert!(state.history.is_empty());
    assert!(state.needs_redraw);
}

#[test]
fn key_presses_drive_tool_selection_through_bindings() {
    let mut state = create_test_input_state();
    assert_eq!(state.current_tool, Tool::Pen);

    state.on_key_press(Key::Char('s'));
    assert_eq!(state.current_tool, Tool::Eraser);

    state.on_key_press(Key::Char('a'));
    assert_eq!(state.current_tool, Tool::Pen);
}

#[test]
fn shifted_binding_requires_shift() {
    let mut state = create_test_input_state();
    let initial = state.current_quality;

    // Plain Q increases quality.
    state.on_key_press(Key::Char('q'));
    assert_eq!(state.current_quality, initial + 1.0);

    // Shift+Q decreases it.
    state.on_key_press(Key::Shift);
    state.on_key_press(Key::Char('Q'));
    assert_eq!(state.current_quality, initial);

    state.on_key_release(Key::Shift);
    assert!(!state.modifiers.shift);
}

#[test]
fn plus_and_minus_keys_adjust_width() {
    let mut state = create_test_input_state();

    state.on_key_press(Key::Plus);
    assert_eq!(state.current_width, 6.0);

    state.on_key_press(Key::Minus);
    state.on_key_press(Key::Minus);
    assert_eq!(state.current_width, 4.0);
}

#[test]
fn f6_requests_click_through_toggle() {
    let mut state = create_test_input_state();
    assert!(!state.take_click_through_request());

    state.on_key_press(Key::F6);
    assert!(state.take_click_through_request());
    // The request is drained once taken.
    assert!(!state.take_click_through_request());
}

#[test]
fn escape_requests_exit() {
    let mut state = create_test_input_state();
    state.on_key_press(Key::Escape);
    assert!(state.should_exit);
}

#[test]
fn color_keys_change_current_color() {
    let mut state = create_test_input_state();

    state.on_key_press(Key::Char('r'));
    assert_eq!(state.current_color, color::RED);

    state.on_key_press(Key::Char('w'));
    assert_eq!(state.current_color, color::WHITE);
}
