use foundation::math::Vec2;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Justify {
    Begin,
    Middle,
    End,
}

impl Justify {
    pub fn as_str(self) -> &'static str {
        match self {
            Justify::Begin => "BEGIN",
            Justify::Middle => "MIDDLE",
            Justify::End => "END",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FontStyle {
    pub size: f64,
    pub family: String,
    /// Major (horizontal) then minor (vertical) justification.
    pub justify: [Justify; 2],
}

/// Text shape. Billboarded text always faces the viewer.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    pub string: String,
    pub font: FontStyle,
    pub billboard: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    Sphere { radius: f64 },
    Box { size: f64 },
    /// Open polyline in the node's local XY plane.
    Polyline2D { points: Vec<Vec2> },
    Text(Text),
}

impl Shape {
    pub fn unit_sphere() -> Self {
        Shape::Sphere { radius: 1.0 }
    }

    pub fn segment(from: Vec2, to: Vec2) -> Self {
        Shape::Polyline2D {
            points: vec![from, to],
        }
    }

    pub fn text(&self) -> Option<&Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }

    pub fn text_mut(&mut self) -> Option<&mut Text> {
        match self {
            Shape::Text(t) => Some(t),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Shape;
    use foundation::math::Vec2;

    #[test]
    fn segment_has_two_points() {
        let s = Shape::segment(Vec2::new(0.0, 1.0), Vec2::new(0.0, 0.0));
        assert!(matches!(s, Shape::Polyline2D { ref points } if points.len() == 2));
        assert!(s.text().is_none());
    }
}
