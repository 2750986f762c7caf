use crate::foundation::error::{ScrublineError, ScrublineResult};

pub use kurbo::Vec2;

/// Normalized position through a scroll-locked sequence.
///
/// `Progress` is the single source of truth for "how far through the
/// sequence we are". It is always a finite value in `[0, 1]`: the
/// constructor clamps, and non-finite input collapses to `0` so degenerate
/// geometry upstream can never poison downstream evaluation.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd, serde::Serialize, serde::Deserialize)]
#[serde(from = "f64", into = "f64")]
pub struct Progress(f64);

impl Progress {
    /// Progress before the pinned range is entered.
    pub const ZERO: Self = Self(0.0);
    /// Progress after the pinned range is exited.
    pub const ONE: Self = Self(1.0);

    /// Clamp `value` into `[0, 1]`. `NaN` and infinities map to `0`.
    pub fn new(value: f64) -> Self {
        if !value.is_finite() {
            return Self(0.0);
        }
        Self(value.clamp(0.0, 1.0))
    }

    pub fn value(self) -> f64 {
        self.0
    }

    /// True exactly at the entry or exit boundary.
    pub fn is_boundary(self) -> bool {
        self.0 == 0.0 || self.0 == 1.0
    }
}

impl From<f64> for Progress {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Progress> for f64 {
    fn from(progress: Progress) -> f64 {
        progress.0
    }
}

/// A sub-range of progress, `0 <= start < end <= 1`.
///
/// Spans are the placement unit for tracks and stagger windows: global
/// progress is mapped onto a clamped local `[0, 1]` within the span.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ProgressSpan {
    pub start: f64,
    pub end: f64,
}

impl ProgressSpan {
    /// The whole sequence.
    pub const FULL: Self = Self {
        start: 0.0,
        end: 1.0,
    };

    pub fn new(start: f64, end: f64) -> ScrublineResult<Self> {
        let span = Self { start, end };
        span.validate()?;
        Ok(span)
    }

    pub fn validate(self) -> ScrublineResult<()> {
        if !self.start.is_finite() || !self.end.is_finite() {
            return Err(ScrublineError::validation("span bounds must be finite"));
        }
        if self.start < 0.0 || self.end > 1.0 {
            return Err(ScrublineError::validation(
                "span must lie within [0, 1] progress",
            ));
        }
        if self.start >= self.end {
            return Err(ScrublineError::validation("span start must be < end"));
        }
        Ok(())
    }

    pub fn len(self) -> f64 {
        self.end - self.start
    }

    pub fn contains(self, progress: Progress) -> bool {
        self.start <= progress.value() && progress.value() <= self.end
    }

    /// Local progress within the span, clamped to `[0, 1]`.
    ///
    /// Outside the span this reports the boundary value (`0` before entry,
    /// `1` after exit), never a gap.
    pub fn local(self, progress: Progress) -> f64 {
        let len = self.end - self.start;
        if len <= 0.0 {
            // Unvalidated (deserialized) degenerate span: behave as a step.
            return if progress.value() < self.start { 0.0 } else { 1.0 };
        }
        ((progress.value() - self.start) / len).clamp(0.0, 1.0)
    }
}

/// Viewport dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> ScrublineResult<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return Err(ScrublineError::validation(
                "viewport width/height must be finite and > 0",
            ));
        }
        Ok(Self { width, height })
    }
}

/// Straight (non-premultiplied) RGBA color, the form style sinks consume.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self::opaque(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_clamps_and_rejects_non_finite() {
        assert_eq!(Progress::new(-0.5), Progress::ZERO);
        assert_eq!(Progress::new(1.5), Progress::ONE);
        assert_eq!(Progress::new(f64::NAN), Progress::ZERO);
        assert_eq!(Progress::new(f64::INFINITY), Progress::ZERO);
        assert_eq!(Progress::new(0.25).value(), 0.25);
    }

    #[test]
    fn progress_serde_clamps_on_deserialize() {
        let p: Progress = serde_json::from_str("3.0").unwrap();
        assert_eq!(p, Progress::ONE);
    }

    #[test]
    fn span_rejects_inverted_and_out_of_range() {
        assert!(ProgressSpan::new(0.5, 0.5).is_err());
        assert!(ProgressSpan::new(0.7, 0.2).is_err());
        assert!(ProgressSpan::new(-0.1, 0.5).is_err());
        assert!(ProgressSpan::new(0.0, 1.1).is_err());
        assert!(ProgressSpan::new(0.0, 1.0).is_ok());
    }

    #[test]
    fn span_local_reports_boundary_values_outside() {
        let span = ProgressSpan::new(0.2, 0.6).unwrap();
        assert_eq!(span.local(Progress::new(0.0)), 0.0);
        assert_eq!(span.local(Progress::new(0.2)), 0.0);
        assert_eq!(span.local(Progress::new(0.4)), 0.5);
        assert_eq!(span.local(Progress::new(0.6)), 1.0);
        assert_eq!(span.local(Progress::ONE), 1.0);
    }

    #[test]
    fn viewport_rejects_degenerate_dimensions() {
        assert!(Viewport::new(0.0, 1080.0).is_err());
        assert!(Viewport::new(1920.0, -1.0).is_err());
        assert!(Viewport::new(1920.0, 1080.0).is_ok());
    }
}
