//! Flattens the scene into depth-sorted 2D primitives for a canvas painter.

use foundation::math::precision::stable_total_cmp_f64;
use foundation::math::{Vec2, Vec3};
use scene::World;
use scene::components::{Color, Justify, Shape};
use scene::entity::EntityId;
use scene::viewpoint::{OrthoViewpoint, Viewport};

#[derive(Debug, Clone, PartialEq)]
pub enum DrawPrimitive {
    /// Screen-aligned ellipse covering a projected sphere.
    Ellipse {
        center: Vec2,
        radius_x: f64,
        radius_y: f64,
        color: Color,
    },
    /// Square tick marker.
    Rect { center: Vec2, half_size: f64, color: Color },
    Line { from: Vec2, to: Vec2, color: Color },
    Text {
        at: Vec2,
        string: String,
        /// Font size in pixels.
        size: f64,
        family: String,
        justify: [Justify; 2],
        color: Color,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub entity: EntityId,
    /// Distance from the camera plane; larger is farther.
    pub depth: f64,
    pub primitive: DrawPrimitive,
}

/// Projects every node that has both a shape and a material. Items are ordered far to near
/// (painter's order), ties broken by entity index.
pub fn draw_list(world: &World, viewpoint: &OrthoViewpoint, viewport: Viewport) -> Vec<DrawItem> {
    let ppu = viewpoint.pixels_per_unit(viewport);
    let mut items = Vec::new();

    for entity in world.entities() {
        let (Some(shape), Some(material)) = (world.shape(entity), world.material(entity)) else {
            continue;
        };
        let color = material.display_color();
        let Some(origin) = world.to_world(entity, Vec3::ZERO) else {
            continue;
        };
        let center = viewpoint.project(origin, viewport);

        let primitive = match shape {
            Shape::Sphere { radius } => {
                let (mut rx, mut ry) = (0.0f64, 0.0f64);
                for axis in [Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 0.0, 1.0)] {
                    let Some(p) = world.to_world(entity, axis * *radius) else {
                        continue;
                    };
                    let d = viewpoint.project(p, viewport).px - center.px;
                    rx = rx.max(d.x.abs());
                    ry = ry.max(d.y.abs());
                }
                if rx <= 0.0 || ry <= 0.0 {
                    continue;
                }
                DrawPrimitive::Ellipse {
                    center: center.px,
                    radius_x: rx,
                    radius_y: ry,
                    color,
                }
            }
            Shape::Box { size } => DrawPrimitive::Rect {
                center: center.px,
                half_size: 0.5 * size * ppu,
                color,
            },
            Shape::Polyline2D { points } => {
                let projected: Vec<Vec2> = points
                    .iter()
                    .filter_map(|p| world.to_world(entity, Vec3::new(p.x, p.y, 0.0)))
                    .map(|p| viewpoint.project(p, viewport).px)
                    .collect();
                for pair in projected.windows(2) {
                    items.push(DrawItem {
                        entity,
                        depth: center.depth,
                        primitive: DrawPrimitive::Line {
                            from: pair[0],
                            to: pair[1],
                            color,
                        },
                    });
                }
                continue;
            }
            Shape::Text(text) => {
                if text.string.is_empty() {
                    continue;
                }
                DrawPrimitive::Text {
                    at: center.px,
                    string: text.string.clone(),
                    size: text.font.size * ppu,
                    family: text.font.family.clone(),
                    justify: text.font.justify,
                    color,
                }
            }
        };
        items.push(DrawItem {
            entity,
            depth: center.depth,
            primitive,
        });
    }

    items.sort_by(|a, b| {
        stable_total_cmp_f64(b.depth, a.depth).then_with(|| a.entity.index().cmp(&b.entity.index()))
    });
    items
}
