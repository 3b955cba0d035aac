use foundation::math::{Rotation, Vec3};

/// Local transform: `translation + rotation * (scale ⊙ p)`.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Rotation,
    pub scale: Vec3,
}

impl Transform {
    pub fn identity() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Rotation::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn translate(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::identity()
        }
    }

    pub fn with_rotation(mut self, rotation: Rotation) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn apply(&self, p: Vec3) -> Vec3 {
        self.translation + self.rotation.apply(p.mul_elem(self.scale))
    }

    /// Inverse of [`Transform::apply`] for points. `None` if any scale component is zero.
    pub fn apply_inverse(&self, p: Vec3) -> Option<Vec3> {
        let local = self.rotation.inverse().apply(p - self.translation);
        divide(local, self.scale)
    }

    /// Inverse for directions (translation ignored).
    pub fn apply_inverse_dir(&self, d: Vec3) -> Option<Vec3> {
        divide(self.rotation.inverse().apply(d), self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

fn divide(v: Vec3, s: Vec3) -> Option<Vec3> {
    if s.x == 0.0 || s.y == 0.0 || s.z == 0.0 {
        return None;
    }
    Some(Vec3::new(v.x / s.x, v.y / s.y, v.z / s.z))
}

#[cfg(test)]
mod tests {
    use super::Transform;
    use foundation::math::{Rotation, Vec3};
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn identity_is_origin() {
        let transform = Transform::identity();
        assert_eq!(transform.translation, Vec3::ZERO);
        assert_eq!(transform.apply(Vec3::ONE), Vec3::ONE);
    }

    #[test]
    fn scale_then_rotate_then_translate() {
        let t = Transform::translate(Vec3::new(1.0, 0.0, 0.0))
            .with_rotation(Rotation::new(Vec3::new(0.0, 0.0, 1.0), FRAC_PI_2))
            .with_scale(Vec3::new(2.0, 1.0, 1.0));
        let p = t.apply(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(1.0, 2.0, 0.0)).length() < 1e-9);
        let back = t.apply_inverse(p).expect("invertible");
        assert!((back - Vec3::new(1.0, 0.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn zero_scale_is_not_invertible() {
        let t = Transform::identity().with_scale(Vec3::new(0.0, 1.0, 1.0));
        assert!(t.apply_inverse(Vec3::ONE).is_none());
    }
}
