use super::Vec3;

/// Axis-angle rotation (radians, right-handed).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rotation {
    pub axis: Vec3,
    pub angle: f64,
}

impl Rotation {
    pub const IDENTITY: Rotation = Rotation {
        axis: Vec3::new(0.0, 0.0, 1.0),
        angle: 0.0,
    };

    pub fn new(axis: Vec3, angle: f64) -> Self {
        Self { axis, angle }
    }

    pub fn is_identity(&self) -> bool {
        self.angle == 0.0 || self.axis.normalized().is_none()
    }

    pub fn inverse(self) -> Self {
        Self::new(self.axis, -self.angle)
    }

    /// Rotate `v` (Rodrigues' formula). Degenerate axes leave `v` unchanged.
    pub fn apply(&self, v: Vec3) -> Vec3 {
        let Some(k) = self.axis.normalized() else {
            return v;
        };
        if self.angle == 0.0 {
            return v;
        }
        let (s, c) = self.angle.sin_cos();
        v * c + k.cross(v) * s + k * (k.dot(v) * (1.0 - c))
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}
