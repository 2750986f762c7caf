use std::collections::BTreeSet;

use crate::foundation::core::Progress;
use crate::foundation::error::{ScrublineError, ScrublineResult};
use crate::scroll::pin::PinSpec;
use crate::timeline::frames::FrameSet;
use crate::timeline::model::{EvaluatedValue, Timeline};
use crate::timeline::stagger::StaggerGroup;
use crate::timeline::track::{Property, PropertyRamp, Value};

/// A stagger group together with the per-item transitions its reveal
/// fraction feeds (the source sequence brightens, recolors, emboldens and
/// glows each word).
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct StaggerSpec {
    pub id: String,
    pub group: StaggerGroup,
    pub ramps: Vec<PropertyRamp>,
}

impl StaggerSpec {
    pub fn validate(&self) -> ScrublineResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScrublineError::validation("stagger id must be non-empty"));
        }
        self.group.validate()?;
        let mut properties = BTreeSet::new();
        for ramp in &self.ramps {
            ramp.validate()?;
            if !properties.insert(ramp.property) {
                return Err(ScrublineError::validation(format!(
                    "stagger '{}' has two ramps for {:?}",
                    self.id, ramp.property
                )));
            }
        }
        Ok(())
    }
}

/// Everything one scroll-locked sequence needs, as declarative data:
/// pin geometry, the element timeline, an optional frame sequence and any
/// stagger groups. Built at view mount, rebuilt (not mutated) on refresh,
/// serde round-trippable for fixtures and the CLI.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Scene {
    pub pin: PinSpec,
    pub timeline: Timeline,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frames: Option<FrameSet>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub staggers: Vec<StaggerSpec>,
}

impl Scene {
    pub fn validate(&self) -> ScrublineResult<()> {
        self.pin.validate()?;
        self.timeline.validate()?;
        if let Some(frames) = &self.frames {
            frames.validate()?;
        }
        let mut ids = BTreeSet::new();
        for stagger in &self.staggers {
            stagger.validate()?;
            if !ids.insert(stagger.id.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "duplicate stagger id '{}'",
                    stagger.id
                )));
            }
        }
        Ok(())
    }

    /// Validate, then evaluate the whole scene at `progress`.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, progress: Progress) -> ScrublineResult<EvaluatedScene> {
        self.validate()?;
        self.evaluate_unchecked(progress)
    }

    /// Evaluation without re-validating; callers must have validated the
    /// scene once (the orchestrator does so at construction).
    pub(crate) fn evaluate_unchecked(&self, progress: Progress) -> ScrublineResult<EvaluatedScene> {
        let timeline = self.timeline.evaluate(progress)?;

        let frame = match &self.frames {
            Some(frames) => {
                let index = frames.index_at(progress);
                let id = frames
                    .active(progress)
                    .ok_or_else(|| ScrublineError::evaluation("frame set is empty"))?
                    .to_string();
                Some(EvaluatedFrame { index, id })
            }
            None => None,
        };

        let mut items = Vec::new();
        for stagger in &self.staggers {
            for (index, target) in stagger.group.targets.iter().enumerate() {
                let fraction = stagger.group.reveal_fraction(index, progress);
                let values = stagger
                    .ramps
                    .iter()
                    .map(|ramp| {
                        Ok(ItemValue {
                            property: ramp.property,
                            value: ramp.sample(fraction)?,
                        })
                    })
                    .collect::<ScrublineResult<Vec<_>>>()?;
                items.push(EvaluatedItem {
                    stagger_id: stagger.id.clone(),
                    index,
                    target: target.clone(),
                    fraction,
                    values,
                });
            }
        }

        Ok(EvaluatedScene {
            progress,
            values: timeline.values,
            frame,
            items,
        })
    }
}

/// The active frame of the sequence player.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedFrame {
    pub index: usize,
    pub id: String,
}

/// One computed stagger item: its reveal fraction plus the property values
/// derived from it.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedItem {
    pub stagger_id: String,
    pub index: usize,
    pub target: String,
    pub fraction: f64,
    pub values: Vec<ItemValue>,
}

/// A property value computed for a stagger item.
#[derive(Clone, Debug, serde::Serialize)]
pub struct ItemValue {
    pub property: Property,
    pub value: Value,
}

/// Plain-data snapshot of the whole scene at one progress value; the
/// interface between compute (this crate) and apply (the host's sink).
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedScene {
    pub progress: Progress,
    pub values: Vec<EvaluatedValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<EvaluatedFrame>,
    pub items: Vec<EvaluatedItem>,
}
