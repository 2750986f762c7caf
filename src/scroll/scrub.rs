use crate::foundation::core::Progress;

/// Smoothed scrub: the displayed progress chases the raw scroll progress
/// instead of jumping to it.
///
/// Each tick moves the displayed value toward the target with an
/// exponential approach whose time constant is `lag_s`. Retargeting
/// mid-flight (a scroll reversal) continues from the current displayed
/// value, and once within epsilon the value snaps so the settled progress
/// is exactly the target.
#[derive(Clone, Copy, Debug)]
pub struct Scrub {
    current: f64,
    target: f64,
    lag_s: f64,
    epsilon: f64,
}

impl Scrub {
    /// `lag_s` is the approach time constant in seconds; `0` disables
    /// smoothing (the displayed value tracks the target exactly).
    pub fn new(lag_s: f64) -> Self {
        Self {
            current: 0.0,
            target: 0.0,
            lag_s: if lag_s.is_finite() { lag_s.max(0.0) } else { 0.0 },
            epsilon: 1e-4,
        }
    }

    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        if epsilon.is_finite() && epsilon >= 0.0 {
            self.epsilon = epsilon;
        }
        self
    }

    /// Snap both displayed and target values, e.g. after a route jump.
    pub fn jump_to(&mut self, progress: Progress) {
        self.current = progress.value();
        self.target = progress.value();
    }

    pub fn set_target(&mut self, progress: Progress) {
        self.target = progress.value();
    }

    pub fn target(&self) -> Progress {
        Progress::new(self.target)
    }

    pub fn current(&self) -> Progress {
        Progress::new(self.current)
    }

    pub fn settled(&self) -> bool {
        self.current == self.target
    }

    /// Advance the displayed value by `dt_s` seconds toward the target.
    pub fn advance(&mut self, dt_s: f64) -> Progress {
        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        if self.lag_s <= 0.0 {
            self.current = self.target;
        } else {
            let k = 1.0 - (-dt_s / self.lag_s).exp();
            self.current += (self.target - self.current) * k;
        }
        if (self.target - self.current).abs() <= self.epsilon {
            self.current = self.target;
        }
        Progress::new(self.current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_lag_tracks_exactly() {
        let mut scrub = Scrub::new(0.0);
        scrub.set_target(Progress::new(0.7));
        assert_eq!(scrub.advance(0.016).value(), 0.7);
        assert!(scrub.settled());
    }

    #[test]
    fn approaches_and_settles_exactly_on_target() {
        let mut scrub = Scrub::new(1.0);
        scrub.set_target(Progress::ONE);

        let first = scrub.advance(0.016).value();
        assert!(first > 0.0 && first < 1.0);

        // A few seconds of ticks is plenty to cross the snap threshold.
        for _ in 0..600 {
            scrub.advance(0.016);
        }
        assert_eq!(scrub.current(), Progress::ONE);
        assert!(scrub.settled());
    }

    #[test]
    fn retarget_continues_from_displayed_value() {
        let mut scrub = Scrub::new(1.0);
        scrub.set_target(Progress::ONE);
        let mid = scrub.advance(0.5).value();

        // Scroll direction reverses.
        scrub.set_target(Progress::ZERO);
        let next = scrub.advance(0.016).value();
        assert!(next < mid);
        assert!(next > 0.0);
    }

    #[test]
    fn jump_snaps_both_values() {
        let mut scrub = Scrub::new(1.0);
        scrub.set_target(Progress::ONE);
        scrub.advance(0.1);
        scrub.jump_to(Progress::new(0.4));
        assert!(scrub.settled());
        assert_eq!(scrub.current().value(), 0.4);
    }
}
