use crate::foundation::core::{Progress, Viewport};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Measured geometry of a scroll-locked container.
///
/// `start_offset` is the scroll position where pinning begins and
/// `virtual_length` the scroll distance mapped onto progress `0 -> 1`.
/// A zero or negative `virtual_length` is representable on purpose: it is
/// what an unmeasured layout looks like, and it degrades to progress `0`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinRegion {
    pub start_offset: f64,
    pub virtual_length: f64,
}

impl PinRegion {
    pub fn new(start_offset: f64, virtual_length: f64) -> Self {
        Self {
            start_offset,
            virtual_length,
        }
    }

    /// True once the layout has produced usable geometry.
    pub fn is_measured(&self) -> bool {
        self.start_offset.is_finite()
            && self.virtual_length.is_finite()
            && self.virtual_length > 0.0
    }

    /// Scroll position where the pinned range ends.
    pub fn end_offset(&self) -> f64 {
        self.start_offset + self.virtual_length
    }

    /// Normalized progress for a raw scroll offset.
    ///
    /// Clamped to `[0, 1]` outside the pinned range; degenerate geometry or
    /// a non-finite offset reports `0` rather than dividing by zero.
    pub fn progress_at(&self, scroll_y: f64) -> Progress {
        if !self.is_measured() || !scroll_y.is_finite() {
            return Progress::ZERO;
        }
        Progress::new((scroll_y - self.start_offset) / self.virtual_length)
    }

    /// True while the container should remain visually fixed, i.e. progress
    /// is strictly inside `(0, 1)`. The fixing itself is the host layout's
    /// job; this only supplies the decision.
    pub fn pins(&self, scroll_y: f64) -> bool {
        let p = self.progress_at(scroll_y).value();
        p > 0.0 && p < 1.0
    }
}

/// The measurement seam between the host layout and the progress source.
///
/// The refresh coordinator calls this after layout-affecting events; hosts
/// with custom geometry (nested scrollers, offset headers) implement it
/// directly, while declarative scenes use [`PinSpec`].
pub trait MeasurePin {
    fn measure(&self, viewport: Viewport) -> PinRegion;
}

/// Declarative pin geometry: a fixed start offset plus a virtual length
/// expressed in viewport heights (the source sequence pins over four).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PinSpec {
    pub start_offset: f64,
    pub length_viewports: f64,
}

impl PinSpec {
    pub fn new(start_offset: f64, length_viewports: f64) -> ScrublineResult<Self> {
        let spec = Self {
            start_offset,
            length_viewports,
        };
        spec.validate()?;
        Ok(spec)
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if !self.start_offset.is_finite() {
            return Err(ScrublineError::validation("pin start_offset must be finite"));
        }
        if !self.length_viewports.is_finite() || self.length_viewports <= 0.0 {
            return Err(ScrublineError::validation(
                "pin length_viewports must be finite and > 0",
            ));
        }
        Ok(())
    }
}

impl MeasurePin for PinSpec {
    fn measure(&self, viewport: Viewport) -> PinRegion {
        PinRegion::new(self.start_offset, self.length_viewports * viewport.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn progress_is_clamped_outside_the_range() {
        let pin = PinRegion::new(100.0, 400.0);
        assert_eq!(pin.progress_at(0.0), Progress::ZERO);
        assert_eq!(pin.progress_at(100.0), Progress::ZERO);
        assert_eq!(pin.progress_at(300.0).value(), 0.5);
        assert_eq!(pin.progress_at(500.0), Progress::ONE);
        assert_eq!(pin.progress_at(9000.0), Progress::ONE);
    }

    #[test]
    fn zero_length_reports_zero_not_nan() {
        let pin = PinRegion::new(0.0, 0.0);
        assert_eq!(pin.progress_at(250.0), Progress::ZERO);

        let pin = PinRegion::new(0.0, -50.0);
        assert_eq!(pin.progress_at(250.0), Progress::ZERO);
        assert!(!pin.is_measured());
    }

    #[test]
    fn pins_only_strictly_inside() {
        let pin = PinRegion::new(0.0, 100.0);
        assert!(!pin.pins(0.0));
        assert!(pin.pins(50.0));
        assert!(!pin.pins(100.0));
    }

    #[test]
    fn spec_measures_against_viewport_height() {
        let spec = PinSpec::new(0.0, 4.0).unwrap();
        let vp = Viewport::new(1920.0, 800.0).unwrap();
        assert_eq!(spec.measure(vp), PinRegion::new(0.0, 3200.0));
    }

    #[test]
    fn spec_rejects_non_positive_length() {
        assert!(PinSpec::new(0.0, 0.0).is_err());
        assert!(PinSpec::new(0.0, -4.0).is_err());
        assert!(PinSpec::new(f64::NAN, 4.0).is_err());
    }
}
