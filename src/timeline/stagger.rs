use crate::foundation::core::{Progress, ProgressSpan};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Evenly distributed sub-animations across a shared progress window.
///
/// Item `m` of `M` activates at `window.start + (m/M) * window.len()`, so
/// activation points are strictly increasing in `m` and the reveal order is
/// always read order, regardless of scroll speed or direction. Each item's
/// reveal fraction ramps from `0` to `1` over `item_duration` progress
/// units after its activation point.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StaggerGroup {
    pub targets: Vec<String>,
    pub window: ProgressSpan,
    pub item_duration: f64,
}

impl StaggerGroup {
    pub fn new(
        targets: Vec<String>,
        window: ProgressSpan,
        item_duration: f64,
    ) -> ScrublineResult<Self> {
        let group = Self {
            targets,
            window,
            item_duration,
        };
        group.validate()?;
        Ok(group)
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.targets.is_empty() {
            return Err(ScrublineError::validation(
                "stagger group must have at least one target",
            ));
        }
        self.window.validate()?;
        if !self.item_duration.is_finite() || self.item_duration <= 0.0 {
            return Err(ScrublineError::validation(
                "stagger item_duration must be finite and > 0",
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Progress at which item `m` begins revealing.
    pub fn activation(&self, m: usize) -> f64 {
        self.window.start + (m as f64 / self.targets.len() as f64) * self.window.len()
    }

    /// Item `m`'s local reveal fraction at `progress`, in `[0, 1]`.
    pub fn reveal_fraction(&self, m: usize, progress: Progress) -> f64 {
        if self.item_duration <= 0.0 {
            // Unvalidated degenerate duration: behave as a step.
            return if progress.value() >= self.activation(m) {
                1.0
            } else {
                0.0
            };
        }
        ((progress.value() - self.activation(m)) / self.item_duration).clamp(0.0, 1.0)
    }

    /// Reveal fractions for every item, in target order.
    pub fn fractions(&self, progress: Progress) -> Vec<f64> {
        (0..self.targets.len())
            .map(|m| self.reveal_fraction(m, progress))
            .collect()
    }
}
