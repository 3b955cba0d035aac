//! Binds rows to point spheres and stems.

use foundation::math::{Vec2, Vec3};
use foundation::time::Time;
use scene::World;
use scene::components::{Ease, Highlight, Material, NodeClass, Shape, Transform};
use scene::entity::EntityId;
use tracing::{debug, warn};

use crate::config::{Palette, PlotConfig};
use crate::join::{Join, JoinReport};
use crate::row::{RowId, Rows};
use crate::scales::AxisScales;

/// Outcome of one [`DataBinder::bind`] pass.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct BindReport {
    pub rows: usize,
    pub points: JoinReport,
    pub stems: JoinReport,
}

/// Keeps one point node and one stem node per row, keyed by [`RowId`].
#[derive(Debug, Default)]
pub struct DataBinder {
    points: Join<RowId>,
    stems: Join<RowId>,
}

impl DataBinder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn point(&self, row: RowId) -> Option<EntityId> {
        self.points.get(row)
    }

    pub fn stem(&self, row: RowId) -> Option<EntityId> {
        self.stems.get(row)
    }

    pub fn point_nodes(&self) -> Vec<EntityId> {
        self.points.entities().collect()
    }

    pub fn stem_nodes(&self) -> Vec<EntityId> {
        self.stems.entities().collect()
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn stem_count(&self) -> usize {
        self.stems.len()
    }

    /// Drops bindings after the world was cleared externally.
    pub fn forget(&mut self) {
        self.points.forget();
        self.stems.forget();
    }

    /// Reconciles point and stem nodes with `rows` and starts linear
    /// transitions towards each row's scaled position.
    ///
    /// An empty row set removes every node and logs a warning.
    #[allow(clippy::too_many_arguments)]
    pub fn bind(
        &mut self,
        world: &mut World,
        rows: &Rows,
        scales: &AxisScales,
        config: &PlotConfig,
        palette: &Palette,
        duration_s: f64,
        now: Time,
    ) -> BindReport {
        if rows.is_empty() {
            warn!("no rows to plot");
        }

        let anim = &config.animation;
        let points = self.points.reconcile(
            world,
            rows.iter().map(|row| (row.id, row)),
            |world, _, row| {
                let r = row.y.abs() / anim.point_size_divisor;
                let point = world.spawn();
                world.set_class(point, NodeClass::DataPoint);
                world.set_transform(
                    point,
                    Transform::identity().with_scale(Vec3::new(r, anim.point_thickness, r)),
                );
                world.set_shape(point, Shape::unit_sphere());
                world.set_material(point, Material::diffuse(palette.point));
                world.set_highlight(point, Highlight::Unclicked);
                point
            },
            |world, _, row, point| {
                if let Some(m) = world.material_mut(point) {
                    m.ambient_intensity = Some(1.0);
                    m.shininess = Some(1.0);
                    if m.diffuse != Some(palette.highlight) {
                        m.diffuse = Some(palette.point);
                    }
                }
                let mut target = world.target_transform(point).unwrap_or_default();
                target.translation = scales.map_row(row);
                world.animate_transform(point, target, now, duration_s, Ease::Linear);
            },
        );

        let stems = self.stems.reconcile(
            world,
            rows.iter().map(|row| (row.id, row)),
            |world, _, _| {
                let stem = world.spawn();
                world.set_class(stem, NodeClass::Stem);
                world.set_transform(stem, Transform::identity());
                world.set_shape(stem, Shape::segment(Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0)));
                world.set_material(stem, Material::emissive(palette.stem));
                stem
            },
            |world, _, row, stem| {
                let p = scales.map_row(row);
                let target = Transform::translate(Vec3::new(p.x, 0.0, p.z))
                    .with_scale(Vec3::new(1.0, p.y, 1.0));
                world.animate_transform(stem, target, now, duration_s, Ease::Linear);
            },
        );

        let report = BindReport {
            rows: rows.len(),
            points,
            stems,
        };
        debug!(
            rows = report.rows,
            entered = points.entered,
            exited = points.exited,
            "bound rows"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::{BindReport, DataBinder};
    use crate::config::{Palette, PlotConfig};
    use crate::join::JoinReport;
    use crate::row::Rows;
    use crate::scales::AxisScales;
    use foundation::math::Vec3;
    use foundation::time::Time;
    use pretty_assertions::assert_eq;
    use scene::World;
    use scene::components::{Color, Highlight, NodeClass};

    struct Fixture {
        world: World,
        binder: DataBinder,
        scales: AxisScales,
        config: PlotConfig,
        palette: Palette,
    }

    impl Fixture {
        fn new() -> Self {
            let config = PlotConfig::default();
            Self {
                world: World::new(),
                binder: DataBinder::new(),
                scales: AxisScales::from_config(&config),
                config,
                palette: Palette::default(),
            }
        }

        fn bind(&mut self, rows: &Rows, duration_s: f64, now: f64) -> BindReport {
            self.binder.bind(
                &mut self.world,
                rows,
                &self.scales,
                &self.config,
                &self.palette,
                duration_s,
                Time(now),
            )
        }
    }

    fn rows() -> Rows {
        Rows::from_points([[0.0, 3.0, 0.0], [0.5, 7.5, 1.0], [1.0, 0.0, 0.5]])
    }

    #[test]
    fn first_bind_creates_one_point_and_stem_per_row() {
        let mut f = Fixture::new();
        let report = f.bind(&rows(), 0.0, 0.0);
        let entered = JoinReport {
            entered: 3,
            updated: 3,
            exited: 0,
        };
        assert_eq!(report.points, entered);
        assert_eq!(report.stems, entered);
        assert_eq!(f.world.entities_with_class(NodeClass::DataPoint).len(), 3);
        assert_eq!(f.world.entities_with_class(NodeClass::Stem).len(), 3);
    }

    #[test]
    fn rebinding_same_rows_only_updates() {
        let mut f = Fixture::new();
        let rows = rows();
        f.bind(&rows, 0.0, 0.0);
        let nodes = f.binder.point_nodes();
        let report = f.bind(&rows, 0.9, 1.0);
        assert!(!report.points.is_structural());
        assert!(!report.stems.is_structural());
        assert_eq!(report.points.updated, 3);
        assert_eq!(f.binder.point_nodes(), nodes);
    }

    #[test]
    fn nodes_reach_scaled_targets_after_settling() {
        let mut f = Fixture::new();
        let rows = rows();
        f.bind(&rows, 0.0, 0.0);
        let id = rows.as_slice()[1].id;
        f.bind(&rows, 0.9, 10.0);

        f.world.advance(Time(10.45));
        let point = f.binder.point(id).expect("point");
        let mid = f.world.transform(point).expect("transform").translation;
        assert_eq!(mid, Vec3::new(5.0, 7.5, 10.0));

        f.world.advance(Time(11.0));
        assert!(f.world.is_settled());
        let stem = f.binder.stem(id).expect("stem");
        let t = f.world.transform(stem).expect("transform");
        assert_eq!(t.translation, Vec3::new(5.0, 0.0, 10.0));
        assert_eq!(t.scale, Vec3::new(1.0, 7.5, 1.0));
    }

    #[test]
    fn new_points_are_flattened_spheres_sized_by_elevation() {
        let mut f = Fixture::new();
        let rows = rows();
        f.bind(&rows, 0.0, 0.0);
        let point = f.binder.point(rows.as_slice()[1].id).expect("point");
        let scale = f.world.transform(point).expect("transform").scale;
        assert_eq!(scale, Vec3::new(0.5, 0.1, 0.5));
        assert_eq!(f.world.highlight(point), Some(Highlight::Unclicked));
        let m = f.world.material(point).expect("material");
        assert_eq!(m.diffuse, Some(Color::DODGER_BLUE));
        assert_eq!(m.ambient_intensity, Some(1.0));
    }

    #[test]
    fn removed_rows_lose_their_nodes_and_survivors_keep_theirs() {
        let mut f = Fixture::new();
        let mut rows = rows();
        f.bind(&rows, 0.0, 0.0);
        let survivor = rows.as_slice()[2].id;
        let survivor_node = f.binder.point(survivor);
        rows.remove(rows.as_slice()[0].id);
        rows.sort_by(|a, b| b.y.total_cmp(&a.y));

        let report = f.bind(&rows, 0.0, 1.0);
        assert_eq!(report.points.exited, 1);
        assert_eq!(report.stems.exited, 1);
        assert_eq!(f.binder.point(survivor), survivor_node);
        assert_eq!(f.binder.point_count(), 2);
        assert_eq!(f.binder.stem_count(), 2);
    }

    #[test]
    fn large_row_sets_pair_each_node_with_its_own_row() {
        let mut f = Fixture::new();
        let rows = Rows::from_points((0..4_000).map(|i| {
            let t = i as f64 / 4_000.0;
            [t, 10.0 * t, 1.0 - t]
        }));
        let report = f.bind(&rows, 0.0, 0.0);
        assert_eq!(report.points.entered, 4_000);
        for row in rows.iter().step_by(397) {
            let point = f.binder.point(row.id).expect("point");
            let t = f.world.transform(point).expect("transform");
            assert_eq!(t.translation, f.scales.map_row(row));
            assert_eq!(t.scale.x, row.y / f.config.animation.point_size_divisor);
        }
    }

    #[test]
    fn empty_rows_remove_everything() {
        let mut f = Fixture::new();
        f.bind(&rows(), 0.0, 0.0);
        let report = f.bind(&Rows::new(), 0.0, 1.0);
        assert_eq!(report.rows, 0);
        assert_eq!(report.points.exited, 3);
        assert!(f.world.is_empty());
    }

    #[test]
    fn highlight_colour_survives_rebind() {
        let mut f = Fixture::new();
        let rows = rows();
        f.bind(&rows, 0.0, 0.0);
        let point = f.binder.point_nodes()[0];
        if let Some(m) = f.world.material_mut(point) {
            m.diffuse = Some(Color::YELLOW);
        }
        let other = f.binder.point_nodes()[1];
        if let Some(m) = f.world.material_mut(other) {
            m.diffuse = Some(Color::BLACK);
        }
        f.bind(&rows, 0.0, 1.0);
        assert_eq!(f.world.material(point).and_then(|m| m.diffuse), Some(Color::YELLOW));
        assert_eq!(f.world.material(other).and_then(|m| m.diffuse), Some(Color::DODGER_BLUE));
    }
}
