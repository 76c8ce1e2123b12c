use super::*;

#[test]
fn move_without_press_is_ignored() {
    let mut d = DragController::new();
    assert!(!d.move_to(Point::new(40.0, 40.0)));
    assert!(!d.release());
    assert_eq!(d.offset(), Vec2::ZERO);
}

#[test]
fn offset_follows_pointer_delta() {
    let mut d = DragController::new();
    d.press(Point::new(100.0, 100.0));
    assert!(d.is_dragging());
    assert!(d.move_to(Point::new(130.0, 90.0)));
    assert_eq!(d.offset(), Vec2::new(30.0, -10.0));
    assert!(d.move_to(Point::new(150.0, 100.0)));
    assert_eq!(d.offset(), Vec2::new(50.0, 0.0));
    assert!(d.release());
    assert!(!d.is_dragging());
}

#[test]
fn second_drag_starts_from_previous_offset() {
    let mut d = DragController::new();
    d.press(Point::new(0.0, 0.0));
    d.move_to(Point::new(50.0, 0.0));
    d.release();

    d.press(Point::new(500.0, 500.0));
    d.move_to(Point::new(480.0, 500.0));
    d.release();
    assert_eq!(d.offset(), Vec2::new(30.0, 0.0));
}

#[test]
fn offsets_are_not_clamped() {
    let mut d = DragController::new();
    d.press(Point::new(10.0, 10.0));
    d.move_to(Point::new(-5_000.0, 9_000.0));
    assert_eq!(d.offset(), Vec2::new(-5_010.0, 8_990.0));
}

#[test]
fn moves_after_release_do_not_change_offset() {
    let mut d = DragController::new();
    d.press(Point::new(0.0, 0.0));
    d.move_to(Point::new(5.0, 5.0));
    d.release();
    assert!(!d.move_to(Point::new(100.0, 100.0)));
    assert_eq!(d.offset(), Vec2::new(5.0, 5.0));
}
