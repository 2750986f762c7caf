use std::collections::BTreeSet;

use crate::foundation::core::Progress;
use crate::foundation::error::{ScrublineError, ScrublineResult};
use crate::timeline::track::{Property, Track, Value};

/// Ordered collection of animation tracks over the shared progress axis.
///
/// Multiple tracks may target the same element with different properties;
/// they are independent and commutative. Duplicate `(target, property)`
/// pairs are rejected at validation so evaluation order can never change
/// the result.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Timeline {
    pub tracks: Vec<Track>,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        let mut ids = BTreeSet::new();
        let mut channels = BTreeSet::new();
        for track in &self.tracks {
            track.validate()?;
            if !ids.insert(track.id.as_str()) {
                return Err(ScrublineError::validation(format!(
                    "duplicate track id '{}'",
                    track.id
                )));
            }
            if !channels.insert((track.target.as_str(), track.property())) {
                return Err(ScrublineError::validation(format!(
                    "tracks '{}' and another both drive {:?} on '{}'",
                    track.id,
                    track.property(),
                    track.target
                )));
            }
        }
        Ok(())
    }

    /// Evaluate every track at `progress`.
    ///
    /// Pure: the same progress yields bit-identical output. Results are
    /// sorted by `(target, property, track id)` so they are independent of
    /// track declaration order. Expects a validated timeline; an endpoint
    /// kind mismatch surfaces as an evaluation error.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn evaluate(&self, progress: Progress) -> ScrublineResult<EvaluatedTimeline> {
        let mut values = self
            .tracks
            .iter()
            .map(|track| {
                Ok(EvaluatedValue {
                    track_id: track.id.clone(),
                    target: track.target.clone(),
                    property: track.property(),
                    value: track.sample(progress)?,
                })
            })
            .collect::<ScrublineResult<Vec<_>>>()?;

        values.sort_by(|a, b| {
            (a.target.as_str(), a.property, a.track_id.as_str()).cmp(&(
                b.target.as_str(),
                b.property,
                b.track_id.as_str(),
            ))
        });

        Ok(EvaluatedTimeline { progress, values })
    }
}

/// Snapshot of all track outputs at one progress value.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedTimeline {
    pub progress: Progress,
    pub values: Vec<EvaluatedValue>,
}

impl EvaluatedTimeline {
    /// Look up the computed value for one element channel.
    pub fn get(&self, target: &str, property: Property) -> Option<&Value> {
        self.values
            .iter()
            .find(|v| v.target == target && v.property == property)
            .map(|v| &v.value)
    }
}

/// One computed element/property value.
#[derive(Clone, Debug, serde::Serialize)]
pub struct EvaluatedValue {
    pub track_id: String,
    pub target: String,
    pub property: Property,
    pub value: Value,
}

/// Incremental construction with validation at the end.
#[derive(Default)]
pub struct TimelineBuilder {
    tracks: Vec<Track>,
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn track(mut self, track: Track) -> Self {
        self.tracks.push(track);
        self
    }

    pub fn build(self) -> ScrublineResult<Timeline> {
        let timeline = Timeline {
            tracks: self.tracks,
        };
        timeline.validate()?;
        Ok(timeline)
    }
}
