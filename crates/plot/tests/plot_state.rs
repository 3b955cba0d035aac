use foundation::math::Vec3;
use foundation::time::Time;
use plot::animation::Playback;
use plot::draw::DrawPrimitive;
use plot::{PlotConfig, PlotState};
use pretty_assertions::assert_eq;
use scene::components::{Color, Highlight, NodeClass};
use scene::entity::EntityId;
use scene::viewpoint::Viewport;

fn mounted(seed: u32) -> PlotState {
    let mut state = PlotState::new(PlotConfig::default(), seed).expect("default config is valid");
    state.rebuild(Viewport::new(900.0, 900.0), Time::ZERO);
    state
}

/// Pixel position of the tallest point, which the pointer can reliably hit.
fn tallest_point_px(state: &PlotState) -> (EntityId, foundation::math::Vec2) {
    let row = state
        .rows()
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))
        .expect("rows");
    let point = state.binder().point(row.id).expect("bound");
    let world = state.world();
    let center = world.to_world(point, Vec3::ZERO).expect("alive");
    let viewpoint = world.viewpoint().expect("viewpoint");
    (point, viewpoint.project(center, state.viewport()).px)
}

#[test]
fn timer_steps_rebind_nodes_onto_the_rows() {
    let mut state = mounted(42);
    assert_eq!(state.playback(), Playback::Paused);

    assert!(state.frame(Time(0.5)).is_none());
    let report = state.frame(Time(0.9)).expect("timer step");
    assert!(!report.points.is_structural());
    assert_eq!(report.points.updated, 121);

    state.toggle_playback(Time(1.0));
    for i in 0..40 {
        state.frame(Time(1.0 + i as f64 * 0.1));
    }
    assert_eq!(state.playback(), Playback::Playing);
    assert_eq!(state.toggle_playback(Time(5.0)), Playback::Paused);
    let paused = state.frame(Time(200.0)).expect("paused step still rebinds");
    assert!(!paused.points.is_structural());

    let scales = state.scales();
    for row in state.rows() {
        let point = state.binder().point(row.id).expect("bound");
        let t = state.world().transform(point).expect("transform");
        assert!((t.translation - scales.map_row(row)).length() < 1e-9);
        let stem = state.binder().stem(row.id).expect("bound");
        let s = state.world().transform(stem).expect("transform");
        assert!((s.scale.y - scales.map_row(row).y).abs() < 1e-9);
    }
    assert_eq!(state.world().entities_with_class(NodeClass::DataPoint).len(), 121);
    assert_eq!(state.world().entities_with_class(NodeClass::Stem).len(), 121);
}

#[test]
fn pointer_hover_click_and_clear() {
    let mut state = mounted(5);
    let (_, px) = tallest_point_px(&state);
    let picked = state.pick(px).expect("a point under the pointer");

    assert!(state.pointer_move(px));
    assert_eq!(state.hovered(), Some(picked));
    let color = |s: &PlotState| s.world().material(picked).and_then(|m| m.diffuse);
    assert_eq!(color(&state), Some(Color::YELLOW));

    assert_eq!(state.click(px), Some(Highlight::Clicked));
    assert!(state.pointer_leave());
    assert_eq!(color(&state), Some(Color::YELLOW));

    assert_eq!(state.clear_highlighting(), 121);
    assert_eq!(color(&state), Some(Color::DODGER_BLUE));
    assert_eq!(state.world().highlight(picked), Some(Highlight::Clicked));

    assert_eq!(state.click(px), Some(Highlight::Unclicked));
}

#[test]
fn clicked_colour_survives_timer_rebinds() {
    let mut state = mounted(8);
    let (_, px) = tallest_point_px(&state);
    let picked = state.pick(px).expect("a point under the pointer");
    state.click(px);
    state.frame(Time(0.9));
    assert_eq!(
        state.world().material(picked).and_then(|m| m.diffuse),
        Some(Color::YELLOW)
    );
}

#[test]
fn draw_list_covers_points_stems_and_labels() {
    let state = mounted(1);
    let items = state.draw_list();
    let ellipses = items
        .iter()
        .filter(|i| matches!(i.primitive, DrawPrimitive::Ellipse { .. }))
        .count();
    let texts: Vec<&str> = items
        .iter()
        .filter_map(|i| match &i.primitive {
            DrawPrimitive::Text { string, .. } => Some(string.as_str()),
            _ => None,
        })
        .collect();
    assert!(ellipses > 0 && ellipses <= 121);
    for label in ["x", "y", "z"] {
        assert!(texts.contains(&label), "missing axis label {label}");
    }
    assert!(items.windows(2).all(|w| w[0].depth >= w[1].depth));
}

#[test]
fn resize_rebuilds_without_losing_rows() {
    let mut state = mounted(2);
    state.toggle_playback(Time(0.2));
    let rows = state.rows().clone();
    state.rebuild(Viewport::new(300.0, 200.0), Time(0.3));
    assert_eq!(state.rows(), &rows);
    assert_eq!(state.binder().point_count(), rows.len());
    assert_eq!(state.playback(), Playback::Playing);
}
