//! Static scene: viewpoint, axis lines, axis labels, ticks and base grid lines.

use std::f64::consts::FRAC_PI_2;

use foundation::math::{Axis, Rotation, Vec2, Vec3};
use foundation::time::Time;
use scene::World;
use scene::components::{
    Ease, FontStyle, Justify, Material, NodeClass, Shape, Text, Transform,
};
use scene::entity::EntityId;
use tracing::debug;

use crate::config::{Palette, PlotConfig};
use crate::join::{Join, JoinReport};
use crate::scales::AxisScales;

/// Ticks and grid lines of one axis after a [`SceneBuilder::draw_axis`] pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct AxisReport {
    pub ticks: JoinReport,
    pub grid_lines: JoinReport,
}

/// Owns the tick and grid-line bindings so axes can be redrawn in place.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    ticks: [Join<usize>; 3],
    grid_lines: [Join<usize>; 3],
}

impl SceneBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Viewpoint plus all three axes. Call on an empty world.
    pub fn build(
        &mut self,
        world: &mut World,
        scales: &mut AxisScales,
        config: &PlotConfig,
        palette: &Palette,
        now: Time,
    ) {
        world.set_viewpoint(config.viewpoint.to_viewpoint());
        for axis in Axis::ALL {
            self.initialize_axis(world, scales, axis, config, palette, now);
        }
        debug!(nodes = world.len(), "built static scene");
    }

    /// Drops bindings after the world was cleared externally.
    pub fn forget(&mut self) {
        for join in self.ticks.iter_mut().chain(self.grid_lines.iter_mut()) {
            join.forget();
        }
    }

    pub fn tick_nodes(&self, axis: Axis) -> Vec<EntityId> {
        self.ticks[axis.index()].entities().collect()
    }

    pub fn grid_line_nodes(&self, axis: Axis) -> Vec<EntityId> {
        self.grid_lines[axis.index()].entities().collect()
    }

    /// Axis line and label, after drawing the axis' ticks.
    pub fn initialize_axis(
        &mut self,
        world: &mut World,
        scales: &mut AxisScales,
        axis: Axis,
        config: &PlotConfig,
        palette: &Palette,
        now: Time,
    ) {
        self.draw_axis(
            world,
            scales,
            axis,
            config.initial_duration_s(),
            now,
            config,
            palette,
        );
        let [min, max] = config.axis_range;

        // The line is laid along local X and rotated onto its axis.
        let line = world.spawn();
        world.set_class(line, NodeClass::AxisLine(axis));
        world.set_transform(line, Transform::identity().with_rotation(axis_rotation(axis)));
        world.set_shape(line, Shape::segment(Vec2::new(0.0, 0.0), Vec2::new(max, 0.0)));
        world.set_material(line, Material::emissive(palette.axis));

        let label = world.spawn();
        world.set_class(label, NodeClass::AxisLabel(axis));
        world.set_transform(
            label,
            Transform::translate(axis.vec_with(0.0, min + config.labels.offset_factor * (max - min))),
        );
        world.set_shape(
            label,
            Shape::Text(Text {
                string: axis.key().to_string(),
                font: FontStyle {
                    size: config.labels.font_size,
                    family: config.labels.font_family.clone(),
                    justify: [Justify::End, Justify::Middle],
                },
                billboard: true,
            }),
        );
        world.set_material(label, Material::diffuse(palette.label));
    }

    /// Recomputes the axis scale and reconciles its ticks (and, for X and Z,
    /// its base grid lines) against the scale's tick values.
    #[allow(clippy::too_many_arguments)]
    pub fn draw_axis(
        &mut self,
        world: &mut World,
        scales: &mut AxisScales,
        axis: Axis,
        duration_s: f64,
        now: Time,
        config: &PlotConfig,
        palette: &Palette,
    ) -> AxisReport {
        let scale = AxisScales::scale_for(config, axis);
        scales.set(axis, scale);
        let count = config.ticks.count;
        let ticks = scale.ticks(count);

        let tick_size = config.ticks.size;
        let font = FontStyle {
            size: config.ticks.font_size,
            family: config.ticks.font_family.clone(),
            justify: [Justify::End, Justify::Middle],
        };

        let tick_report = self.ticks[axis.index()].reconcile(
            world,
            ticks.iter().copied().enumerate(),
            |world, _, _| {
                let tick = world.spawn();
                world.set_class(tick, NodeClass::Tick(axis));
                world.set_transform(tick, Transform::identity());
                world.set_shape(tick, Shape::Box { size: tick_size });
                world.set_material(tick, Material::diffuse(palette.label));

                let label = world.spawn_child(tick);
                world.set_class(label, NodeClass::TickLabel(axis));
                world.set_transform(label, Transform::identity());
                world.set_shape(
                    label,
                    Shape::Text(Text {
                        string: String::new(),
                        font: font.clone(),
                        billboard: true,
                    }),
                );
                world.set_material(label, Material::diffuse(palette.label));
                tick
            },
            |world, _, value, tick| {
                let value = *value;
                let target = Transform::translate(axis.vec_with(0.0, scale.map(value)));
                world.animate_transform(tick, target, now, duration_s, Ease::CubicInOut);

                let text = scale.tick_format(count, value);
                for label in world.children(tick) {
                    if let Some(t) = world.shape_mut(label).and_then(Shape::text_mut) {
                        t.string = text.clone();
                    }
                }
            },
        );

        let grid_report = if axis == Axis::Y {
            JoinReport::default()
        } else {
            let [_, range_max] = config.axis_range;
            self.grid_lines[axis.index()].reconcile(
                world,
                ticks.iter().copied().enumerate(),
                |world, _, _| {
                    let line = world.spawn();
                    world.set_class(line, NodeClass::GridLine(axis));
                    world.set_transform(line, grid_line_transform(axis, 0.0));
                    world.set_shape(line, Shape::Polyline2D { points: Vec::new() });
                    world.set_material(line, Material::emissive(palette.grid));
                    line
                },
                |world, _, value, line| {
                    world.set_shape(
                        line,
                        Shape::segment(Vec2::new(0.0, 0.0), Vec2::new(range_max, 0.0)),
                    );
                    let target = grid_line_transform(axis, scale.map(*value));
                    world.animate_transform(line, target, now, duration_s, Ease::CubicInOut);
                },
            )
        };

        AxisReport {
            ticks: tick_report,
            grid_lines: grid_report,
        }
    }
}

/// Rotation that lays a local-X polyline along `axis`.
fn axis_rotation(axis: Axis) -> Rotation {
    match axis {
        Axis::X => Rotation::IDENTITY,
        Axis::Y => Rotation::new(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2),
        Axis::Z => Rotation::new(Vec3::new(0.0, 1.0, 0.0), -FRAC_PI_2),
    }
}

/// Base grid lines run across the floor: X lines are parallel to Z and vice versa.
fn grid_line_transform(axis: Axis, offset: f64) -> Transform {
    match axis {
        Axis::X => Transform::translate(Vec3::new(offset, 0.0, 0.0))
            .with_rotation(Rotation::new(Vec3::new(0.0, 1.0, 0.0), -FRAC_PI_2)),
        _ => Transform::translate(Vec3::new(0.0, 0.0, offset)),
    }
}

#[cfg(test)]
mod tests {
    use super::{SceneBuilder, axis_rotation};
    use crate::config::{Palette, PlotConfig};
    use crate::scales::AxisScales;
    use foundation::math::{Axis, Vec3};
    use foundation::time::Time;
    use scene::World;
    use scene::components::{NodeClass, Shape};

    fn built() -> (World, SceneBuilder, AxisScales) {
        let config = PlotConfig::default();
        let mut world = World::new();
        let mut builder = SceneBuilder::new();
        let mut scales = AxisScales::from_config(&config);
        builder.build(&mut world, &mut scales, &config, &Palette::default(), Time::ZERO);
        (world, builder, scales)
    }

    fn text_of(world: &World, e: scene::entity::EntityId) -> String {
        world
            .shape(e)
            .and_then(Shape::text)
            .map(|t| t.string.clone())
            .unwrap_or_default()
    }

    #[test]
    fn builds_axes_ticks_and_grid_lines() {
        let (world, builder, _) = built();
        assert!(world.viewpoint().is_some());
        for axis in Axis::ALL {
            assert_eq!(world.entities_with_class(NodeClass::AxisLine(axis)).len(), 1);
            assert_eq!(world.entities_with_class(NodeClass::AxisLabel(axis)).len(), 1);
            assert_eq!(builder.tick_nodes(axis).len(), 3);
        }
        assert_eq!(builder.grid_line_nodes(Axis::X).len(), 3);
        assert_eq!(builder.grid_line_nodes(Axis::Y).len(), 0);
        assert_eq!(builder.grid_line_nodes(Axis::Z).len(), 3);
    }

    #[test]
    fn ticks_sit_at_scaled_positions_with_labels() {
        let (world, builder, _) = built();
        let x_ticks = builder.tick_nodes(Axis::X);
        let positions: Vec<f64> = x_ticks
            .iter()
            .map(|t| world.transform(*t).map(|t| t.translation.x).unwrap_or(f64::NAN))
            .collect();
        assert_eq!(positions, vec![0.0, 5.0, 10.0]);

        let labels: Vec<String> = x_ticks
            .iter()
            .flat_map(|t| world.children(*t))
            .map(|l| text_of(&world, l))
            .collect();
        assert_eq!(labels, vec!["0", "0.5", "1"]);

        let y_labels: Vec<String> = builder
            .tick_nodes(Axis::Y)
            .iter()
            .flat_map(|t| world.children(*t))
            .map(|l| text_of(&world, l))
            .collect();
        assert_eq!(y_labels, vec!["0", "5", "10"]);
    }

    #[test]
    fn axis_label_is_past_the_end_of_the_axis() {
        let (world, _, _) = built();
        let label = world.entities_with_class(NodeClass::AxisLabel(Axis::Z))[0];
        let p = world.transform(label).map(|t| t.translation).unwrap_or_default();
        assert!((p - Vec3::new(0.0, 0.0, 11.0)).length() < 1e-9);
        assert_eq!(text_of(&world, label), "z");
    }

    #[test]
    fn axis_lines_are_rotated_onto_their_axis() {
        for axis in Axis::ALL {
            let end = axis_rotation(axis).apply(Vec3::new(10.0, 0.0, 0.0));
            assert!((end - axis.vec_with(0.0, 10.0)).length() < 1e-9);
        }
    }

    #[test]
    fn redrawing_an_axis_updates_in_place() {
        let config = PlotConfig::default();
        let (mut world, mut builder, mut scales) = built();
        let before = world.len();
        let report = builder.draw_axis(
            &mut world,
            &mut scales,
            Axis::X,
            0.9,
            Time(1.0),
            &config,
            &Palette::default(),
        );
        assert!(!report.ticks.is_structural());
        assert_eq!(report.ticks.updated, 3);
        assert_eq!(report.grid_lines.updated, 3);
        assert_eq!(world.len(), before);
    }
}
