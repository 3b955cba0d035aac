use foundation::math::Vec2;
use foundation::rng::Rng;
use foundation::time::Time;
use runtime::{Event, EventBus, Frame};
use scene::World;
use scene::components::{Highlight, NodeClass};
use scene::entity::EntityId;
use scene::picking::{PickOptions, pick_ray};
use scene::viewpoint::Viewport;
use tracing::{info, warn};

use crate::animation::{AnimationDriver, Playback};
use crate::binder::{BindReport, DataBinder};
use crate::builder::SceneBuilder;
use crate::config::{Palette, PlotConfig};
use crate::draw::{self, DrawItem};
use crate::error::PlotError;
use crate::grid::generate_grid;
use crate::interaction::{self, ClearMode, HoverTracker};
use crate::row::Rows;
use crate::scales::AxisScales;

pub const EVENT_EMPTY_ROWS: &str = "bind.empty_rows";
pub const EVENT_RENDERER_NOT_READY: &str = "animation.renderer_not_ready";

/// Everything one plot instance owns. Hosts drive it with time, pointer
/// positions and button presses, and paint [`PlotState::draw_list`].
#[derive(Debug)]
pub struct PlotState {
    config: PlotConfig,
    palette: Palette,
    world: World,
    rows: Rows,
    scales: AxisScales,
    builder: SceneBuilder,
    binder: DataBinder,
    driver: AnimationDriver,
    hover: HoverTracker,
    rng: Rng,
    bus: EventBus,
    frame: Frame,
    renderer_ready: bool,
    viewport: Viewport,
}

impl PlotState {
    /// Validates `config` and seeds the demo grid.
    pub fn new(config: PlotConfig, seed: u32) -> Result<Self, PlotError> {
        let mut rng = Rng::new(seed);
        let rows = generate_grid(&config.grid, &mut rng);
        Self::with_rng(config, rows, rng)
    }

    /// Plots caller-provided rows instead of the demo grid.
    pub fn with_rows(config: PlotConfig, rows: Rows, seed: u32) -> Result<Self, PlotError> {
        Self::with_rng(config, rows, Rng::new(seed))
    }

    fn with_rng(config: PlotConfig, rows: Rows, rng: Rng) -> Result<Self, PlotError> {
        config.validate()?;
        let palette = config.palette()?;
        Ok(Self {
            scales: AxisScales::from_config(&config),
            driver: AnimationDriver::new(&config),
            palette,
            world: World::new(),
            rows,
            builder: SceneBuilder::new(),
            binder: DataBinder::new(),
            hover: HoverTracker::new(),
            rng,
            bus: EventBus::new(),
            frame: Frame::first(Time::ZERO),
            renderer_ready: false,
            viewport: Viewport::new(1.0, 1.0),
            config,
        })
    }

    /// Builds the scene from scratch, binds the rows with the initial
    /// duration and (re)starts the timer.
    pub fn initialize(&mut self, now: Time) -> BindReport {
        self.frame = self.frame.next_at(now);
        self.world.clear();
        self.builder.forget();
        self.binder.forget();
        self.hover.reset();

        self.builder.build(
            &mut self.world,
            &mut self.scales,
            &self.config,
            &self.palette,
            now,
        );
        self.renderer_ready = true;
        let report = self.bind(self.config.initial_duration_s(), now);
        self.driver.start(now);
        info!(rows = self.rows.len(), nodes = self.world.len(), "plot initialized");
        report
    }

    /// Tear-down and rebuild for a new surface size. Rows are kept.
    pub fn rebuild(&mut self, viewport: Viewport, now: Time) -> BindReport {
        self.viewport = viewport;
        self.initialize(now)
    }

    /// Replaces the data and binds it with the default duration.
    pub fn set_rows(&mut self, rows: Rows, now: Time) -> BindReport {
        self.rows = rows;
        self.bind(self.config.default_duration_s(), now)
    }

    /// Per-frame tick: fires the timer step when due, then advances
    /// transitions. Returns the bind report of a step that ran.
    pub fn frame(&mut self, now: Time) -> Option<BindReport> {
        self.frame = self.frame.next_at(now);
        let report = if self.driver.poll(now) {
            self.update_step(now)
        } else {
            None
        };
        self.world.advance(now);
        report
    }

    /// Jumps every running transition to its target.
    pub fn settle(&mut self) {
        self.world.advance(Time(f64::MAX));
    }

    /// One timer step: advance the phase, move the rows if playing, rebind.
    pub fn update_step(&mut self, now: Time) -> Option<BindReport> {
        self.driver.advance_phase();
        if !self.renderer_ready {
            warn!("renderer not ready, skipping animation step");
            self.bus.emit(
                self.frame,
                EVENT_RENDERER_NOT_READY,
                "animation step skipped before the scene was built",
            );
            return None;
        }
        self.driver.animate_rows(&mut self.rows, &mut self.rng);
        Some(self.bind(self.config.default_duration_s(), now))
    }

    /// Flips play/pause; switching to playing runs one step immediately.
    pub fn toggle_playback(&mut self, now: Time) -> Playback {
        let playback = self.driver.toggle();
        info!(?playback, "playback toggled");
        if playback.is_playing() {
            self.update_step(now);
        }
        playback
    }

    /// Updates hover state for the pointer at `px`. Returns `true` when the
    /// hovered point changed.
    pub fn pointer_move(&mut self, px: Vec2) -> bool {
        let picked = self.pick(px);
        self.hover.update(&mut self.world, picked, &self.palette)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.hover.update(&mut self.world, None, &self.palette)
    }

    /// Toggles the point under `px`, if any.
    pub fn click(&mut self, px: Vec2) -> Option<Highlight> {
        let point = self.pick(px)?;
        interaction::click(&mut self.world, point, &self.palette)
    }

    pub fn clear_highlighting(&mut self) -> usize {
        let mode = ClearMode::from_flag(self.config.clear_resets_state);
        interaction::clear_highlighting(&mut self.world, &self.palette, mode)
    }

    /// Topmost data point under a pixel.
    pub fn pick(&self, px: Vec2) -> Option<EntityId> {
        let viewpoint = self.world.viewpoint()?;
        let ray = viewpoint.ray_through(px, self.viewport);
        let opts = PickOptions {
            class: Some(NodeClass::DataPoint),
            ..PickOptions::default()
        };
        pick_ray(&self.world, ray, opts).map(|hit| hit.entity)
    }

    pub fn draw_list(&self) -> Vec<DrawItem> {
        match self.world.viewpoint() {
            Some(viewpoint) => draw::draw_list(&self.world, viewpoint, self.viewport),
            None => Vec::new(),
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn rows(&self) -> &Rows {
        &self.rows
    }

    pub fn scales(&self) -> &AxisScales {
        &self.scales
    }

    pub fn builder(&self) -> &SceneBuilder {
        &self.builder
    }

    pub fn binder(&self) -> &DataBinder {
        &self.binder
    }

    pub fn playback(&self) -> Playback {
        self.driver.playback()
    }

    pub fn phase(&self) -> f64 {
        self.driver.phase()
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn hovered(&self) -> Option<EntityId> {
        self.hover.current()
    }

    pub fn events(&self) -> &[Event] {
        self.bus.events()
    }

    pub fn drain_events(&mut self) -> Vec<Event> {
        self.bus.drain()
    }

    fn bind(&mut self, duration_s: f64, now: Time) -> BindReport {
        if self.rows.is_empty() {
            self.bus.emit(self.frame, EVENT_EMPTY_ROWS, "no rows to plot");
        }
        let report = self.binder.bind(
            &mut self.world,
            &self.rows,
            &self.scales,
            &self.config,
            &self.palette,
            duration_s,
            now,
        );
        if let Some(hovered) = self.hover.current()
            && !self.world.is_alive(hovered)
        {
            self.hover.reset();
        }
        report
    }
}

#[cfg(test)]
mod tests {
    use super::{EVENT_EMPTY_ROWS, EVENT_RENDERER_NOT_READY, PlotState};
    use crate::animation::Playback;
    use crate::config::PlotConfig;
    use crate::row::Rows;
    use foundation::time::Time;
    use scene::viewpoint::Viewport;

    #[test]
    fn initialize_binds_the_demo_grid() {
        let mut state = PlotState::new(PlotConfig::default(), 7).expect("valid");
        let report = state.initialize(Time::ZERO);
        assert_eq!(report.rows, 121);
        assert_eq!(report.points.entered, 121);
        assert_eq!(state.binder().point_count(), 121);
        assert!(state.world().is_settled());
    }

    #[test]
    fn step_before_initialize_is_skipped_with_a_diagnostic() {
        let mut state = PlotState::new(PlotConfig::default(), 7).expect("valid");
        assert!(state.update_step(Time::ZERO).is_none());
        assert_eq!(state.events().len(), 1);
        assert_eq!(state.events()[0].kind, EVENT_RENDERER_NOT_READY);
        assert!(state.world().is_empty());
    }

    #[test]
    fn empty_rows_are_reported_not_fatal() {
        let mut state =
            PlotState::with_rows(PlotConfig::default(), Rows::new(), 1).expect("valid");
        let report = state.initialize(Time::ZERO);
        assert_eq!(report.rows, 0);
        assert_eq!(state.binder().point_count(), 0);
        let kinds: Vec<_> = state.drain_events().into_iter().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EVENT_EMPTY_ROWS]);
        assert!(state.events().is_empty());
    }

    #[test]
    fn toggling_on_runs_a_step_and_toggling_off_does_not() {
        let mut state = PlotState::new(PlotConfig::default(), 3).expect("valid");
        state.initialize(Time::ZERO);
        let before = state.rows().clone();

        assert_eq!(state.toggle_playback(Time(0.1)), Playback::Playing);
        assert_ne!(state.rows(), &before);
        let phase = state.phase();

        let moved = state.rows().clone();
        assert_eq!(state.toggle_playback(Time(0.2)), Playback::Paused);
        assert_eq!(state.phase(), phase);
        assert_eq!(state.rows(), &moved);
    }

    #[test]
    fn rebuild_keeps_rows_and_resets_nodes() {
        let mut state = PlotState::new(PlotConfig::default(), 11).expect("valid");
        state.initialize(Time::ZERO);
        let rows = state.rows().clone();
        let nodes = state.world().len();
        let before = state.binder().point_nodes();

        let report = state.rebuild(Viewport::new(640.0, 480.0), Time(1.0));
        assert_eq!(report.points.entered, 121);
        assert_eq!(state.rows(), &rows);
        assert_eq!(state.world().len(), nodes);
        assert_eq!(state.viewport(), Viewport::new(640.0, 480.0));
        assert!(before.iter().all(|e| !state.world().is_alive(*e)));
    }
}
