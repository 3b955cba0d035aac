use foundation::math::Vec3;
use foundation::math::precision::stable_total_cmp_f64;

use crate::World;
use crate::components::{NodeClass, Shape};
use crate::entity::EntityId;

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self { origin, dir }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickHit {
    pub entity: EntityId,
    pub distance: f64,
    pub point: Vec3,
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PickOptions {
    pub max_distance: f64,
    /// Only nodes of this class are considered; `None` picks any sphere.
    pub class: Option<NodeClass>,
}

impl Default for PickOptions {
    fn default() -> Self {
        Self {
            max_distance: 1.0e30,
            class: None,
        }
    }
}

/// Deterministic ray picking against sphere shapes.
///
/// Ordering contract:
/// - If multiple nodes are hit at the same distance, the lower `EntityId::index()` wins.
/// - Otherwise, the closest hit along the (normalized) ray wins.
///
/// Notes:
/// - Spheres are intersected in each node's local space, so non-uniform
///   scale (ellipsoids) and parent transforms are honoured.
/// - Nodes with a zero scale component are ignored.
pub fn pick_ray(world: &World, ray: Ray, opts: PickOptions) -> Option<PickHit> {
    let dir = ray.dir.normalized()?;
    let mut best: Option<(f64, EntityId)> = None;

    for entity in world.entities() {
        if let Some(class) = opts.class
            && world.class(entity) != Some(class)
        {
            continue;
        }
        let Some(Shape::Sphere { radius }) = world.shape(entity) else {
            continue;
        };
        let Some(t) = ray_sphere_hit_t(world, entity, ray.origin, dir, *radius) else {
            continue;
        };
        if t > opts.max_distance {
            continue;
        }

        best = match best {
            None => Some((t, entity)),
            Some((bt, be)) => {
                let ord = stable_total_cmp_f64(t, bt).then_with(|| entity.index().cmp(&be.index()));
                if ord.is_lt() {
                    Some((t, entity))
                } else {
                    Some((bt, be))
                }
            }
        };
    }

    let (t, entity) = best?;
    Some(PickHit {
        entity,
        distance: t,
        point: ray.origin + dir * t,
    })
}

/// Distance along the world ray to the sphere's surface (0 when starting inside).
fn ray_sphere_hit_t(
    world: &World,
    entity: EntityId,
    origin: Vec3,
    dir: Vec3,
    radius: f64,
) -> Option<f64> {
    let mut o = origin;
    let mut d = dir;
    for t in world.transform_chain(entity)? {
        o = t.apply_inverse(o)?;
        d = t.apply_inverse_dir(d)?;
    }

    // |o + t d|^2 = r^2 in local space; t is shared with world space because
    // the mapping is affine.
    let a = d.dot(d);
    let b = 2.0 * o.dot(d);
    let c = o.dot(o) - radius * radius;
    if a <= 0.0 {
        return None;
    }
    let disc = b * b - 4.0 * a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = (-b - sq) / (2.0 * a);
    let t1 = (-b + sq) / (2.0 * a);
    if t1 < 0.0 {
        return None;
    }
    Some(t0.max(0.0))
}

#[cfg(test)]
mod tests {
    use super::{PickOptions, Ray, pick_ray};
    use crate::World;
    use crate::components::{NodeClass, Shape, Transform};
    use foundation::math::Vec3;

    fn sphere_at(world: &mut World, x: f64, class: NodeClass) -> crate::entity::EntityId {
        let e = world.spawn();
        world.set_transform(e, Transform::translate(Vec3::new(x, 0.0, 0.0)));
        world.set_shape(e, Shape::unit_sphere());
        world.set_class(e, class);
        e
    }

    #[test]
    fn ray_picks_nearest_hit() {
        let mut world = World::new();
        let a = sphere_at(&mut world, 5.0, NodeClass::DataPoint);
        let _b = sphere_at(&mut world, 10.0, NodeClass::DataPoint);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.entity, a);
        assert!((hit.distance - 4.0).abs() < 1e-9);
    }

    #[test]
    fn tie_breaks_by_entity_index() {
        let mut world = World::new();
        let first = sphere_at(&mut world, 5.0, NodeClass::DataPoint);
        let _second = sphere_at(&mut world, 5.0, NodeClass::DataPoint);

        let ray = Ray::new(Vec3::ZERO, Vec3::new(2.0, 0.0, 0.0));
        let hit = pick_ray(&world, ray, PickOptions::default()).expect("hit");
        assert_eq!(hit.entity, first);
    }

    #[test]
    fn class_filter_skips_other_nodes() {
        let mut world = World::new();
        let stem = sphere_at(&mut world, 3.0, NodeClass::Stem);
        let point = sphere_at(&mut world, 6.0, NodeClass::DataPoint);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));

        let opts = PickOptions {
            class: Some(NodeClass::DataPoint),
            ..PickOptions::default()
        };
        assert_eq!(pick_ray(&world, ray, opts).map(|h| h.entity), Some(point));

        assert_eq!(
            pick_ray(&world, ray, PickOptions::default()).map(|h| h.entity),
            Some(stem)
        );
    }

    #[test]
    fn flattened_ellipsoid_is_thin_vertically() {
        let mut world = World::new();
        let e = world.spawn();
        world.set_transform(
            e,
            Transform::translate(Vec3::new(0.0, 0.0, -5.0)).with_scale(Vec3::new(1.0, 0.1, 1.0)),
        );
        world.set_shape(e, Shape::unit_sphere());

        let down = Vec3::new(0.0, 0.0, -1.0);
        let miss = Ray::new(Vec3::new(0.0, 0.5, 0.0), down);
        assert!(pick_ray(&world, miss, PickOptions::default()).is_none());
        let hit = Ray::new(Vec3::new(0.0, 0.05, 0.0), down);
        assert_eq!(pick_ray(&world, hit, PickOptions::default()).map(|h| h.entity), Some(e));
    }

    #[test]
    fn zero_scale_is_unpickable() {
        let mut world = World::new();
        let e = world.spawn();
        world.set_transform(e, Transform::identity().with_scale(Vec3::new(0.0, 0.1, 0.0)));
        world.set_shape(e, Shape::unit_sphere());
        let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(pick_ray(&world, ray, PickOptions::default()).is_none());
    }
}
