use super::*;
use crate::effects::catalog::FilterName;
use crate::foundation::core::Vec2;
use crate::foundation::random::ScriptedSource;
use crate::layout::engine::DRAGGING_Z_INDEX;
use image::Rgba;

// floor(v * (i + 1)) == i for every shuffle step, so display order == creation order.
const IDENTITY: f64 = 0.999_999;

fn controller(rng: ScriptedSource) -> PopupController {
    PopupController::new(
        ZoneTable::reference(),
        LayoutEngine::reference(),
        TimingConfig::default(),
        Viewport::default(),
        Box::new(rng),
    )
}

fn capture() -> Raster {
    Raster::from_pixel(480, 640, Rgba([150, 100, 90, 255]))
}

fn by_zone<'a>(c: &'a PopupController, zone: &str) -> &'a Popup {
    c.popups()
        .find(|p| p.zone_name() == zone)
        .unwrap_or_else(|| panic!("no popup for {zone}"))
}

#[test]
fn reconstruct_without_capture_is_a_no_op() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    assert!(!c.reconstruct(None));
    assert_eq!(c.state(), ControllerState::Idle);
    assert_eq!(c.pending_tasks(), 0);
    assert_eq!(c.generation(), Generation(0));
}

#[test]
fn timeline_segments_then_staggers_spawns() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    assert!(c.reconstruct(Some(&capture())));
    assert_eq!(c.state(), ControllerState::Segmenting);

    assert_eq!(c.advance_by(99), 0);
    assert!(c.is_empty());

    // Segment, first spawn and its decode all land at t=100.
    assert_eq!(c.advance_by(1), 3);
    assert_eq!(c.len(), 1);
    assert_eq!(c.state(), ControllerState::Spawning);

    c.advance_by(30);
    assert_eq!(c.len(), 2);

    let end = c.run_until_idle();
    assert_eq!(end, Millis(100 + 13 * 30));
    assert_eq!(c.len(), 14);
    assert_eq!(c.state(), ControllerState::Live);
    assert!(c.popups().all(Popup::is_ready));
}

#[test]
fn identity_shuffle_assigns_filters_in_creation_order() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();

    let first = by_zone(&c, "leftEye1");
    assert_eq!(first.display_index(), 0);
    assert_eq!(first.filter().name, FilterName::Saturate);
    assert_eq!(by_zone(&c, "leftEye2").filter().name, FilterName::Psychedelic);
    assert_eq!(by_zone(&c, "mouth").display_index(), 13);
}

#[test]
fn mouth_shuffled_first_gets_saturate() {
    // First swap moves the last zone (mouth) to the front, the rest keep their place.
    let mut script = vec![0.0];
    script.extend(std::iter::repeat_n(IDENTITY, 12));
    let mut c = controller(ScriptedSource::new(script));
    c.reconstruct(Some(&capture()));
    c.advance_by(100);

    assert_eq!(c.len(), 1);
    let mouth = by_zone(&c, "mouth");
    assert_eq!(mouth.display_index(), 0);
    assert_eq!(mouth.filter().name, FilterName::Saturate);
    assert_eq!(mouth.base_z_index(), 1040);
    assert_eq!(mouth.segment().creation_index, 13);

    c.run_until_idle();
    assert_eq!(by_zone(&c, "leftEye1").display_index(), 13);
}

#[test]
fn spawned_popups_respect_margins_and_size() {
    let mut c = controller(ScriptedSource::new(vec![0.0, 0.25, 0.5, 0.75, IDENTITY]));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();

    let vp = c.viewport();
    for p in c.popups() {
        let size = p.size();
        assert_eq!(size, c.layout().popup_size());
        let pos = p.base_position();
        assert!(pos.x >= 50.0 && pos.x <= vp.width - size.width - 50.0, "{pos:?}");
        assert!(pos.y >= 50.0 && pos.y <= vp.height - size.height - 50.0, "{pos:?}");
        assert_eq!(p.surface().map(|s| s.dimensions()), Some((200, 267)));
    }
}

#[test]
fn clear_all_cancels_pending_spawns() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.advance_by(100);
    assert_eq!(c.len(), 1);

    c.clear_all();
    assert!(c.is_empty());
    assert_eq!(c.state(), ControllerState::Idle);
    assert_eq!(c.pending_tasks(), 0);

    assert_eq!(c.advance_by(10_000), 0);
    assert!(c.is_empty());
}

#[test]
fn clear_all_is_idempotent() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();

    c.clear_all();
    let g = c.generation();
    c.clear_all();
    assert!(c.is_empty());
    assert_eq!(c.state(), ControllerState::Idle);
    assert!(c.generation() > g);
}

#[test]
fn second_reconstruct_supersedes_the_first() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    let img = capture();
    c.reconstruct(Some(&img));
    c.advance_by(130);
    assert_eq!(c.len(), 2);
    let first_gen = c.generation();

    c.reconstruct(Some(&img));
    assert!(c.is_empty());
    assert!(c.generation() > first_gen);
    c.run_until_idle();

    assert_eq!(c.len(), 14);
    let mut zones: Vec<_> = c.popups().map(|p| p.zone_name().to_string()).collect();
    zones.sort();
    zones.dedup();
    assert_eq!(zones.len(), 14);
    assert!(c.popups().all(|p| p.id() >= PopupId(2)));
}

#[test]
fn close_removes_one_popup_and_ignores_unknown_ids() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();

    let id = by_zone(&c, "nose").id();
    assert!(c.close(id));
    assert_eq!(c.len(), 13);
    assert!(c.get(id).is_none());
    assert!(!c.close(id));
    assert!(!c.close(PopupId(999)));
    assert_eq!(c.len(), 13);
    assert_eq!(c.state(), ControllerState::Live);
}

#[test]
fn closing_every_popup_returns_to_idle() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();

    let ids: Vec<_> = c.popups().map(Popup::id).collect();
    for id in ids {
        c.close(id);
    }
    assert_eq!(c.state(), ControllerState::Idle);
}

#[test]
fn drag_accumulates_and_restores_stacking() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();
    let id = by_zone(&c, "mouth").id();
    let base = c.get(id).unwrap().base_position();

    assert!(c.pointer_down(id, DragSurface::Header, Point::new(100.0, 100.0)));
    assert_eq!(c.get(id).unwrap().z_index(), DRAGGING_Z_INDEX);
    assert!(c.pointer_move(Point::new(150.0, 100.0)));
    assert!(c.pointer_up());
    assert_eq!(c.get(id).unwrap().z_index(), 1040);

    assert!(c.pointer_down(id, DragSurface::Image, Point::new(300.0, 300.0)));
    assert!(c.pointer_move(Point::new(280.0, 300.0)));
    assert!(c.pointer_up());

    let p = c.get(id).unwrap();
    assert_eq!(p.drag_offset(), Vec2::new(30.0, 0.0));
    assert_eq!(p.rendered_position(), base + Vec2::new(30.0, 0.0));
    assert_eq!(p.base_position(), base);
    assert_eq!(p.z_index(), 1040);
    assert!(!c.pointer_up());
}

#[test]
fn pointer_events_without_a_drag_are_ignored() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    assert!(!c.pointer_move(Point::new(1.0, 1.0)));
    assert!(!c.pointer_up());
    assert!(!c.pointer_down(PopupId(0), DragSurface::Header, Point::ZERO));
}

#[test]
fn closing_the_dragged_popup_ends_the_gesture() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();
    let id = by_zone(&c, "nose").id();

    c.pointer_down(id, DragSurface::Header, Point::ZERO);
    c.close(id);
    assert_eq!(c.active_drag(), None);
    assert!(!c.pointer_move(Point::new(5.0, 5.0)));
}

#[test]
fn ambient_marks_exactly_one_source() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    c.reconstruct(Some(&capture()));
    c.run_until_idle();
    let nose = by_zone(&c, "nose").id();
    let mouth = by_zone(&c, "mouth").id();

    let bmp = c
        .request_ambient(nose, AmbientEffect::RotatingCylinder)
        .unwrap()
        .unwrap();
    assert_eq!(bmp.source, nose);
    assert_eq!(bmp.raster.dimensions(), (200, 267));
    assert_eq!(c.popups().filter(|p| p.ambient_effect_active()).count(), 1);

    let bmp = c
        .request_ambient(mouth, AmbientEffect::ParticleFloat)
        .unwrap()
        .unwrap();
    assert_eq!(Some(&bmp.raster), c.get(mouth).unwrap().surface());
    let active: Vec<_> = c
        .popups()
        .filter(|p| p.ambient_effect_active())
        .map(Popup::id)
        .collect();
    assert_eq!(active, vec![mouth]);

    c.clear_ambient();
    assert!(c.popups().all(|p| !p.ambient_effect_active()));
}

#[test]
fn ambient_for_unknown_popup_yields_nothing() {
    let mut c = controller(ScriptedSource::constant(IDENTITY));
    let out = c
        .request_ambient(PopupId(3), AmbientEffect::RotatingCylinder)
        .unwrap();
    assert!(out.is_none());
}

#[test]
fn viewport_change_applies_to_later_spawns() {
    let mut c = controller(ScriptedSource::constant(0.5));
    assert!(c.set_viewport(Viewport { width: 0.0, height: 10.0 }).is_err());
    c.set_viewport(Viewport::new(800.0, 600.0).unwrap()).unwrap();
    c.reconstruct(Some(&capture()));
    c.run_until_idle();
    for p in c.popups() {
        assert!(p.base_position().x <= 800.0 - 200.0 - 50.0);
    }
}
