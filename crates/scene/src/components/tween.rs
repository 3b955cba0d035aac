use foundation::time::{Time, TimeSpan};

use super::Transform;

#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Ease {
    Linear,
    /// Symmetric cubic ease; the default for transitions that do not name one.
    #[default]
    CubicInOut,
}

impl Ease {
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::CubicInOut => {
                let t2 = t * 2.0;
                if t2 <= 1.0 {
                    t2 * t2 * t2 / 2.0
                } else {
                    let u = t2 - 2.0;
                    (u * u * u + 2.0) / 2.0
                }
            }
        }
    }
}

/// In-flight transform transition. Rotation snaps to the target.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Tween {
    pub from: Transform,
    pub to: Transform,
    pub span: TimeSpan,
    pub ease: Ease,
}

impl Tween {
    pub fn new(from: Transform, to: Transform, span: TimeSpan, ease: Ease) -> Self {
        Self {
            from,
            to,
            span,
            ease,
        }
    }

    pub fn sample(&self, now: Time) -> Transform {
        let k = self.ease.apply(self.span.progress(now));
        Transform {
            translation: self.from.translation.lerp(self.to.translation, k),
            rotation: self.to.rotation,
            scale: self.from.scale.lerp(self.to.scale, k),
        }
    }

    pub fn is_finished(&self, now: Time) -> bool {
        self.span.is_finished(now)
    }
}

#[cfg(test)]
mod tests {
    use super::{Ease, Tween};
    use crate::components::Transform;
    use foundation::math::Vec3;
    use foundation::time::{Time, TimeSpan};

    #[test]
    fn linear_tween_interpolates() {
        let tween = Tween::new(
            Transform::identity(),
            Transform::translate(Vec3::new(10.0, 0.0, 0.0)),
            TimeSpan::starting_at(Time(0.0), 1.0),
            Ease::Linear,
        );
        assert_eq!(tween.sample(Time(0.25)).translation, Vec3::new(2.5, 0.0, 0.0));
        assert!(!tween.is_finished(Time(0.5)));
        assert!(tween.is_finished(Time(1.0)));
    }

    #[test]
    fn cubic_is_symmetric() {
        assert_eq!(Ease::CubicInOut.apply(0.0), 0.0);
        assert_eq!(Ease::CubicInOut.apply(0.5), 0.5);
        assert_eq!(Ease::CubicInOut.apply(1.0), 1.0);
        assert!(Ease::CubicInOut.apply(0.25) < 0.25);
    }
}
