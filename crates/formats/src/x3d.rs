//! X3D markup export of a scene, shaped like the document a browser-side
//! X3D runtime would render: one `transform` per node, shapes inside.

use std::fmt::Write;

use foundation::math::{Rotation, Vec3};
use scene::World;
use scene::components::{Color, Material, NodeClass, Shape, Text, Transform};
use scene::entity::EntityId;
use scene::viewpoint::OrthoViewpoint;

const INDENT: &str = "  ";

struct Markup {
    out: String,
    depth: usize,
}

impl Markup {
    fn new() -> Self {
        Self {
            out: String::new(),
            depth: 0,
        }
    }

    fn tag(&mut self, name: &str, attrs: &[(&str, String)], close: bool) {
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        self.out.push('<');
        self.out.push_str(name);
        for (key, value) in attrs {
            let _ = write!(self.out, " {key}=\"{}\"", escape(value));
        }
        self.out.push_str(if close { "/>\n" } else { ">\n" });
        if !close {
            self.depth += 1;
        }
    }

    fn open(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.tag(name, attrs, false);
    }

    fn empty(&mut self, name: &str, attrs: &[(&str, String)]) {
        self.tag(name, attrs, true);
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        for _ in 0..self.depth {
            self.out.push_str(INDENT);
        }
        let _ = writeln!(self.out, "</{name}>");
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

fn vec3(v: Vec3) -> String {
    format!("{} {} {}", v.x, v.y, v.z)
}

fn rotation(r: Rotation) -> String {
    format!("{} {}", vec3(r.axis), r.angle)
}

fn color(c: Color) -> String {
    format!("{} {} {}", c.r, c.g, c.b)
}

/// Serializes `world` as an `<x3d>` document.
pub fn to_x3d_string(world: &World) -> String {
    let mut m = Markup::new();
    m.open("x3d", &[]);
    m.open("scene", &[]);
    if let Some(vp) = world.viewpoint() {
        write_viewpoint(&mut m, vp);
    }
    for entity in world.entities() {
        if world.parent(entity).is_none() {
            write_node(&mut m, world, entity);
        }
    }
    m.close("scene");
    m.close("x3d");
    m.out
}

fn write_viewpoint(m: &mut Markup, vp: &OrthoViewpoint) {
    let fov = vp.field_of_view;
    m.empty(
        "orthoviewpoint",
        &[
            ("centerOfRotation", vec3(vp.center_of_rotation)),
            ("fieldOfView", format!("{} {} {} {}", fov[0], fov[1], fov[2], fov[3])),
            ("orientation", rotation(vp.orientation)),
            ("position", vec3(vp.position)),
        ],
    );
}

fn transform_attrs(class: Option<NodeClass>, t: Transform) -> Vec<(&'static str, String)> {
    let mut attrs = Vec::new();
    if let Some(name) = class.and_then(NodeClass::css_name) {
        attrs.push(("class", name));
    }
    if t.translation != Vec3::ZERO {
        attrs.push(("translation", vec3(t.translation)));
    }
    if !t.rotation.is_identity() {
        attrs.push(("rotation", rotation(t.rotation)));
    }
    if t.scale != Vec3::ONE {
        attrs.push(("scale", vec3(t.scale)));
    }
    attrs
}

fn write_node(m: &mut Markup, world: &World, entity: EntityId) {
    let class = world.class(entity);
    let transform = world.transform(entity).unwrap_or_default();
    m.open("transform", &transform_attrs(class, transform));

    if let Some(shape) = world.shape(entity) {
        let billboard = matches!(shape, Shape::Text(Text { billboard: true, .. }));
        if billboard {
            m.open("billboard", &[("axisOfRotation", "0 0 0".to_string())]);
        }
        let mut shape_attrs = Vec::new();
        if class == Some(NodeClass::DataPoint) {
            let state = world.highlight(entity).unwrap_or_default();
            shape_attrs.push(("data-state", state.as_str().to_string()));
            shape_attrs.push(("data-id", entity.index().to_string()));
        }
        m.open("shape", &shape_attrs);
        if let Some(material) = world.material(entity) {
            write_appearance(m, &material);
        }
        write_geometry(m, shape);
        m.close("shape");
        if billboard {
            m.close("billboard");
        }
    }

    for child in world.children(entity) {
        write_node(m, world, child);
    }
    m.close("transform");
}

fn write_appearance(m: &mut Markup, material: &Material) {
    let mut attrs = Vec::new();
    if let Some(c) = material.diffuse {
        attrs.push(("diffuseColor", color(c)));
    }
    if let Some(c) = material.emissive {
        attrs.push(("emissiveColor", color(c)));
    }
    if let Some(a) = material.ambient_intensity {
        attrs.push(("ambientIntensity", a.to_string()));
    }
    if let Some(s) = material.shininess {
        attrs.push(("shininess", s.to_string()));
    }
    m.open("appearance", &[]);
    m.empty("material", &attrs);
    m.close("appearance");
}

fn write_geometry(m: &mut Markup, shape: &Shape) {
    match shape {
        Shape::Sphere { radius } => {
            let attrs = if *radius == 1.0 {
                Vec::new()
            } else {
                vec![("radius", radius.to_string())]
            };
            m.empty("sphere", &attrs);
        }
        Shape::Box { size } => m.empty("box", &[("size", format!("{size} {size} {size}"))]),
        Shape::Polyline2D { points } => {
            let segments = points
                .iter()
                .map(|p| format!("{} {}", p.x, p.y))
                .collect::<Vec<_>>()
                .join(", ");
            m.empty("polyline2d", &[("lineSegments", segments)]);
        }
        Shape::Text(text) => {
            m.open(
                "text",
                &[("string", text.string.clone()), ("solid", "true".to_string())],
            );
            m.empty(
                "fontstyle",
                &[
                    ("size", text.font.size.to_string()),
                    ("family", text.font.family.clone()),
                    (
                        "justify",
                        format!(
                            "{} {}",
                            text.font.justify[0].as_str(),
                            text.font.justify[1].as_str()
                        ),
                    ),
                ],
            );
            m.close("text");
        }
    }
}
