use foundation::rng::Rng;
use foundation::time::Time;
use runtime::Interval;

use crate::config::PlotConfig;
use crate::row::Rows;

/// Whether timer steps move the data.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub enum Playback {
    #[default]
    Paused,
    Playing,
}

impl Playback {
    pub fn toggled(self) -> Self {
        match self {
            Playback::Paused => Playback::Playing,
            Playback::Playing => Playback::Paused,
        }
    }

    pub fn is_playing(self) -> bool {
        self == Playback::Playing
    }
}

/// `|amplitude · noise · sin(frequency·x + t) · cos(frequency·z + t)|`.
pub fn elevation(x: f64, z: f64, t: f64, amplitude: f64, frequency: f64, noise: f64) -> f64 {
    (amplitude * noise * (frequency * x + t).sin() * (frequency * z + t).cos()).abs()
}

/// Phase, playback gate and the repeating timer behind the wave animation.
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationDriver {
    phase: f64,
    phase_step: f64,
    amplitude: f64,
    frequency: f64,
    playback: Playback,
    interval: Interval,
}

impl AnimationDriver {
    pub fn new(config: &PlotConfig) -> Self {
        Self {
            phase: 0.0,
            phase_step: config.animation.phase_step,
            amplitude: config.animation.amplitude,
            frequency: config.animation.frequency,
            playback: Playback::Paused,
            interval: Interval::new(config.interval_s()),
        }
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn playback(&self) -> Playback {
        self.playback
    }

    /// Flips the gate and returns the new value.
    pub fn toggle(&mut self) -> Playback {
        self.playback = self.playback.toggled();
        self.playback
    }

    pub fn start(&mut self, now: Time) {
        self.interval.start(now);
    }

    /// `true` when a timer step is due at `now`.
    pub fn poll(&mut self, now: Time) -> bool {
        self.interval.poll(now)
    }

    pub fn steps_fired(&self) -> u64 {
        self.interval.fired()
    }

    /// Advances the phase by one step. Happens on every step, paused or not.
    pub fn advance_phase(&mut self) -> f64 {
        self.phase += self.phase_step;
        self.phase
    }

    /// Recomputes every elevation at the current phase when playing.
    /// Returns whether rows changed.
    pub fn animate_rows(&self, rows: &mut Rows, rng: &mut Rng) -> bool {
        if !self.playback.is_playing() {
            return false;
        }
        for row in rows.iter_mut() {
            row.y = elevation(
                row.x,
                row.z,
                self.phase,
                self.amplitude,
                self.frequency,
                rng.next_f64(),
            );
        }
        true
    }
}
