//! Integration tests: full stroke lifecycle through the public API.
//!
//! Drives a `StrokeSurface` with `ManualInput` and `ManualScheduler` the way
//! a browser would: events arrive between frames, frames drain the queue.

use pretty_assertions::assert_eq;
use strokeline_core::surface::SurfaceCall;
use strokeline_core::*;

type Surface = StrokeSurface<RecordingSurface, ManualScheduler>;

struct Harness {
    stroke: Surface,
    frames: ManualScheduler,
    input: ManualInput,
}

fn harness_at(offset: Point, options: ContextOptions) -> Harness {
    let _ = env_logger::builder().is_test(true).try_init();
    let frames = ManualScheduler::new();
    let mut input = ManualInput::new();
    let stroke = StrokeSurface::new(
        RecordingSurface::with_offset(offset),
        frames.clone(),
        &mut input,
        options,
    )
    .unwrap();
    Harness {
        stroke,
        frames,
        input,
    }
}

fn harness() -> Harness {
    harness_at(Point::ORIGIN, ContextOptions::new())
}

/// A DOM-style event at a client position.
fn at(kind: &str, x: f64, y: f64) -> InputEvent {
    InputEvent::from_dom(kind, Some(Point::new(x, y))).unwrap()
}

// ─── Drawing ────────────────────────────────────────────────────────────

#[test]
fn two_moves_in_one_frame_draw_two_segments() {
    let h = harness();
    h.stroke.start();
    h.input.dispatch(at("mousedown", 10.0, 10.0));
    h.input.dispatch(at("mousemove", 20.0, 10.0));
    h.input.dispatch(at("mousemove", 20.0, 20.0));

    assert_eq!(h.frames.advance(), 1);

    assert_eq!(
        h.stroke.surface().segments(),
        vec![
            Segment::new((10.0, 10.0), (20.0, 10.0)),
            Segment::new((20.0, 10.0), (20.0, 20.0)),
        ]
    );
    assert_eq!(h.stroke.last_point(), Point::new(20.0, 20.0));
    assert_eq!(h.stroke.pending_len(), 0);
}

#[test]
fn stroke_spanning_frames_stays_connected() {
    let h = harness();
    h.stroke.start();
    h.input.dispatch(at("mousedown", 0.0, 0.0));
    h.input.dispatch(at("mousemove", 5.0, 0.0));
    h.frames.advance();
    h.input.dispatch(at("mousemove", 5.0, 5.0));
    h.input.dispatch(at("mouseup", 5.0, 5.0));
    h.frames.advance();
    h.frames.advance();

    assert_eq!(
        h.stroke.surface().segments(),
        vec![
            Segment::new((0.0, 0.0), (5.0, 0.0)),
            Segment::new((5.0, 0.0), (5.0, 5.0)),
        ]
    );
}

#[test]
fn second_stroke_starts_at_its_own_pointer_down() {
    let h = harness();
    h.stroke.start();
    h.input.dispatch(at("mousedown", 0.0, 0.0));
    h.input.dispatch(at("mousemove", 1.0, 1.0));
    h.input.dispatch(at("mouseup", 1.0, 1.0));
    h.frames.advance();

    h.input.dispatch(at("mousedown", 50.0, 50.0));
    h.input.dispatch(at("mousemove", 60.0, 50.0));
    h.frames.advance();

    let segments = h.stroke.surface().segments();
    assert_eq!(segments.len(), 2);
    assert_eq!(segments[1], Segment::new((50.0, 50.0), (60.0, 50.0)));
}

#[test]
fn touch_input_maps_like_mouse_input() {
    let h = harness_at(Point::new(8.0, 16.0), ContextOptions::new());
    h.stroke.start();
    assert!(h.input.dispatch(at("touchstart", 18.0, 26.0)));
    assert!(h.input.dispatch(at("touchmove", 28.0, 26.0)));
    assert!(
        h.input
            .dispatch(InputEvent::from_dom("touchend", None).unwrap())
    );
    h.frames.advance();

    assert_eq!(
        h.stroke.surface().segments(),
        vec![Segment::new((10.0, 10.0), (20.0, 10.0))]
    );
    assert!(!h.stroke.is_drawing());
}

// ─── Coordinate mapping ─────────────────────────────────────────────────

#[test]
fn pointer_down_subtracts_surface_offset() {
    let h = harness_at(Point::new(40.0, 25.0), ContextOptions::new());
    h.stroke.start();
    h.input.dispatch(at("mousedown", 140.0, 75.0));
    assert_eq!(h.stroke.last_point(), Point::new(100.0, 50.0));
}

#[test]
fn offset_is_requeried_per_event() {
    let h = harness();
    h.stroke.start();
    h.input.dispatch(at("mousedown", 10.0, 10.0));
    h.input.dispatch(at("mousemove", 20.0, 10.0));
    h.frames.advance();

    // The page scrolls: the canvas moves up by 30px between events.
    h.stroke
        .with_surface_mut(|surface| surface.set_offset(Point::new(0.0, -30.0)));
    h.input.dispatch(at("mousemove", 20.0, 10.0));
    h.frames.advance();

    assert_eq!(h.stroke.last_point(), Point::new(20.0, 40.0));
}

// ─── Lifecycle ──────────────────────────────────────────────────────────

#[test]
fn events_before_start_change_nothing() {
    let h = harness();
    assert!(!h.input.dispatch(at("mousedown", 3.0, 3.0)));
    assert!(!h.input.dispatch(at("mousemove", 4.0, 4.0)));
    assert!(!h.input.dispatch(at("mouseup", 4.0, 4.0)));
    assert_eq!(h.stroke.state(), DrawState::default());
    assert_eq!(h.frames.pending(), 0);
}

#[test]
fn stop_then_start_matches_fresh_state() {
    let h = harness();
    h.stroke.start();
    h.input.dispatch(at("mousedown", 7.0, 7.0));
    h.input.dispatch(at("mousemove", 8.0, 9.0));
    h.stroke.set_mode(Mode::Erase);

    h.stroke.stop();
    h.stroke.start();

    assert_eq!(h.stroke.state(), DrawState::default());
    assert_eq!(h.stroke.mode(), Mode::Draw);
    assert!(h.stroke.is_running());
    assert_eq!(h.frames.pending(), 1);
}

#[test]
fn events_after_stop_are_swallowed() {
    let h = harness();
    h.stroke.start();
    h.stroke.stop();
    assert!(!h.input.dispatch(at("mousedown", 1.0, 1.0)));
    assert!(!h.stroke.is_drawing());
}

#[test]
fn clear_keeps_loop_running_and_drawing_resumes() {
    let h = harness_at(Point::ORIGIN, ContextOptions::new().with("lineWidth", 6));
    h.stroke.start();
    h.input.dispatch(at("mousedown", 1.0, 1.0));
    h.input.dispatch(at("mousemove", 2.0, 2.0));

    h.stroke.clear();
    h.frames.advance();
    assert!(h.stroke.surface().segments().is_empty());

    h.input.dispatch(at("mousedown", 3.0, 3.0));
    h.input.dispatch(at("mousemove", 4.0, 3.0));
    h.frames.advance();
    assert_eq!(
        h.stroke.surface().segments(),
        vec![Segment::new((3.0, 3.0), (4.0, 3.0))]
    );
}

#[test]
fn clear_drops_context_options_back_to_defaults() {
    let h = harness_at(
        Point::ORIGIN,
        ContextOptions::new().with("lineCap", "round").with("lineWidth", 8),
    );
    assert_eq!(h.stroke.surface().property("lineWidth"), Some(&serde_json::json!(8)));

    h.stroke.clear();

    let surface = h.stroke.surface();
    assert_eq!(surface.property("lineWidth"), None);
    assert_eq!(surface.property("lineCap"), None);
    assert_eq!(surface.composite_operation(), Some("source-over"));

    let calls = surface.calls();
    let repaint = calls
        .iter()
        .rposition(|call| *call == SurfaceCall::Repaint)
        .unwrap();
    assert_eq!(
        &calls[repaint + 1..],
        &[SurfaceCall::SetProperty {
            name: "globalCompositeOperation".into(),
            value: serde_json::json!("source-over"),
        }]
    );
}

// ─── Modes ──────────────────────────────────────────────────────────────

#[test]
fn erase_mode_persists_across_frames() {
    let h = harness();
    h.stroke.start();
    h.stroke.set_mode(Mode::parse("erase"));
    h.frames.advance();
    h.frames.advance();
    assert_eq!(h.stroke.mode(), Mode::Erase);
    assert_eq!(
        h.stroke.surface().composite_operation(),
        Some("destination-out")
    );

    h.stroke.set_mode(Mode::parse("pencil"));
    assert_eq!(h.stroke.surface().composite_operation(), Some("source-over"));
}

#[test]
fn export_returns_surface_data_uri() {
    let h = harness();
    h.stroke.with_surface_mut(|s| s.set_image("data:image/png;base64,iVBORw0KGgo="));
    assert_eq!(
        h.stroke.export_image().unwrap(),
        "data:image/png;base64,iVBORw0KGgo="
    );
}
