//! Scroll velocity estimation for the marquee rows.
//!
//! Velocity is sampled from successive scroll offsets, smoothed with a
//! spring-like exponential approach, and folded into a drift multiplier
//! that speeds marquee text up (and flips its direction) with the scroll.

/// Wrap `v` into the half-open band `[min, max)`.
pub fn wrap(min: f64, max: f64, v: f64) -> f64 {
    let range = max - min;
    if !(range > 0.0) || !v.is_finite() {
        return min;
    }
    min + (((v - min) % range) + range) % range
}

/// Spring-smoothed scroll velocity in px/s.
#[derive(Debug)]
pub struct VelocityTracker {
    last: Option<(f64, f64)>, // (offset, time_s)
    raw: f64,
    smoothed: f64,
    stiffness: f64,
    damping: f64,
}

impl Default for VelocityTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::with_spring(400.0, 50.0)
    }

    pub fn with_spring(stiffness: f64, damping: f64) -> Self {
        Self {
            last: None,
            raw: 0.0,
            smoothed: 0.0,
            stiffness: stiffness.max(0.0),
            damping: damping.max(0.0),
        }
    }

    /// Feed one scroll sample; returns the smoothed velocity. Out-of-order
    /// or duplicate timestamps leave the estimate unchanged.
    pub fn sample(&mut self, offset: f64, now_s: f64) -> f64 {
        if !offset.is_finite() || !now_s.is_finite() {
            return self.smoothed;
        }
        let Some((last_offset, last_t)) = self.last else {
            self.last = Some((offset, now_s));
            return self.smoothed;
        };
        let dt = now_s - last_t;
        if dt <= 0.0 {
            return self.smoothed;
        }
        self.last = Some((offset, now_s));
        self.raw = (offset - last_offset) / dt;

        let rate = self.stiffness / (1.0 + self.damping);
        let k = 1.0 - (-rate * dt).exp();
        self.smoothed += (self.raw - self.smoothed) * k;
        self.smoothed
    }

    pub fn smoothed(&self) -> f64 {
        self.smoothed
    }

    /// Drift multiplier: 1000 px/s of smoothed scroll maps to 5, unclamped,
    /// signed with scroll direction.
    pub fn factor(&self) -> f64 {
        self.smoothed / 200.0
    }
}

/// One marquee row drifting at a base velocity, accelerated by the scroll
/// velocity factor and direction-flipped when the scroll reverses.
#[derive(Clone, Copy, Debug)]
pub struct MarqueeRow {
    base_velocity: f64, // percent of row width per second
    direction: f64,
    offset: f64,
}

impl MarqueeRow {
    const WRAP_MIN: f64 = -45.0;
    const WRAP_MAX: f64 = -20.0;

    pub fn new(base_velocity: f64) -> Self {
        Self {
            base_velocity,
            direction: 1.0,
            offset: Self::WRAP_MIN,
        }
    }

    /// Advance the row by `dt_s` seconds under the given velocity factor
    /// and return the wrapped offset (percent).
    pub fn advance(&mut self, dt_s: f64, velocity_factor: f64) -> f64 {
        if velocity_factor < 0.0 {
            self.direction = -1.0;
        } else if velocity_factor > 0.0 {
            self.direction = 1.0;
        }

        let dt_s = if dt_s.is_finite() { dt_s.max(0.0) } else { 0.0 };
        let mut move_by = self.direction * self.base_velocity * dt_s;
        move_by += self.direction * move_by * velocity_factor;

        self.offset = wrap(Self::WRAP_MIN, Self::WRAP_MAX, self.offset + move_by);
        self.offset
    }

    pub fn offset(&self) -> f64 {
        self.offset
    }
}
