//! Hover preview, click-to-commit highlighting and "clear highlighting".
//!
//! Every handler ignores nodes that are not data points.

use scene::World;
use scene::components::{Color, Highlight, NodeClass};
use scene::entity::EntityId;

use crate::config::Palette;

/// What "clear highlighting" resets.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum ClearMode {
    /// Colours only; committed state survives.
    #[default]
    ColorOnly,
    ColorAndState,
}

impl ClearMode {
    pub fn from_flag(resets_state: bool) -> Self {
        if resets_state {
            ClearMode::ColorAndState
        } else {
            ClearMode::ColorOnly
        }
    }
}

fn is_point(world: &World, entity: EntityId) -> bool {
    world.class(entity) == Some(NodeClass::DataPoint)
}

fn is_clicked(world: &World, entity: EntityId) -> bool {
    world.highlight(entity).is_some_and(Highlight::is_clicked)
}

fn set_color(world: &mut World, entity: EntityId, color: Color) {
    if let Some(m) = world.material_mut(entity) {
        m.diffuse = Some(color);
    }
}

fn color_of(world: &World, entity: EntityId) -> Option<Color> {
    world.material(entity).and_then(|m| m.diffuse)
}

/// Preview: flips an unclicked point between the highlight and point colours.
pub fn pointer_enter(world: &mut World, entity: EntityId, palette: &Palette) {
    if !is_point(world, entity) || is_clicked(world, entity) {
        return;
    }
    let next = if color_of(world, entity) == Some(palette.highlight) {
        palette.point
    } else {
        palette.highlight
    };
    set_color(world, entity, next);
}

/// Ends a preview: an unclicked point returns to the point colour.
pub fn pointer_leave(world: &mut World, entity: EntityId, palette: &Palette) {
    if !is_point(world, entity) || is_clicked(world, entity) {
        return;
    }
    if color_of(world, entity) != Some(palette.point) {
        set_color(world, entity, palette.point);
    }
}

/// Toggles the committed state and paints it. Returns the new state.
pub fn click(world: &mut World, entity: EntityId, palette: &Palette) -> Option<Highlight> {
    if !is_point(world, entity) {
        return None;
    }
    let next = world.highlight(entity).unwrap_or_default().toggled();
    world.set_highlight(entity, next);
    let color = if next.is_clicked() {
        palette.highlight
    } else {
        palette.point
    };
    set_color(world, entity, color);
    Some(next)
}

/// Paints every point with the point colour. Returns how many points were touched.
pub fn clear_highlighting(world: &mut World, palette: &Palette, mode: ClearMode) -> usize {
    let points = world.entities_with_class(NodeClass::DataPoint);
    for &point in &points {
        set_color(world, point, palette.point);
        if mode == ClearMode::ColorAndState {
            world.set_highlight(point, Highlight::Unclicked);
        }
    }
    points.len()
}

/// Turns successive pick results into enter/leave calls.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct HoverTracker {
    current: Option<EntityId>,
}

impl HoverTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<EntityId> {
        self.current
    }

    /// Returns `true` when the hovered node changed.
    pub fn update(&mut self, world: &mut World, picked: Option<EntityId>, palette: &Palette) -> bool {
        if picked == self.current {
            return false;
        }
        if let Some(prev) = self.current.take()
            && world.is_alive(prev)
        {
            pointer_leave(world, prev, palette);
        }
        if let Some(next) = picked {
            pointer_enter(world, next, palette);
        }
        self.current = picked;
        true
    }

    /// Forgets the hovered node without touching it (used after a rebuild).
    pub fn reset(&mut self) {
        self.current = None;
    }
}
