use crate::animation::ease::Ease;
use crate::animation::lerp::Lerp;
use crate::foundation::core::{Progress, ProgressSpan, Rgba, Vec2};
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Animatable output channel of a visual element.
///
/// The set covers what the scroll sequence actually drives: reveal
/// channels (opacity, translate, scale, blur), typography channels
/// (letter-spacing, weight, glow, color). The discrete frame index is not a
/// property; it is handled by the frame-sequence player.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub enum Property {
    Opacity,
    Translate,
    Scale,
    Blur,
    LetterSpacing,
    Weight,
    Glow,
    Color,
}

impl Property {
    pub fn kind(self) -> ValueKind {
        match self {
            Self::Translate => ValueKind::Vec2,
            Self::Color => ValueKind::Color,
            _ => ValueKind::Scalar,
        }
    }
}

/// Shape of a [`Value`]; from/to endpoints of a ramp must agree with the
/// property's kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
    Scalar,
    Vec2,
    Color,
}

/// A single interpolated output value.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum Value {
    Scalar(f64),
    Vec2(Vec2),
    Color(Rgba),
}

impl Value {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Scalar(_) => ValueKind::Scalar,
            Self::Vec2(_) => ValueKind::Vec2,
            Self::Color(_) => ValueKind::Color,
        }
    }

    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Self::Scalar(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_vec2(&self) -> Option<Vec2> {
        match self {
            Self::Vec2(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Rgba> {
        match self {
            Self::Color(c) => Some(*c),
            _ => None,
        }
    }

    fn lerp(a: &Self, b: &Self, t: f64) -> ScrublineResult<Self> {
        match (a, b) {
            (Self::Scalar(a), Self::Scalar(b)) => Ok(Self::Scalar(<f64 as Lerp>::lerp(a, b, t))),
            (Self::Vec2(a), Self::Vec2(b)) => Ok(Self::Vec2(<Vec2 as Lerp>::lerp(a, b, t))),
            (Self::Color(a), Self::Color(b)) => Ok(Self::Color(<Rgba as Lerp>::lerp(a, b, t))),
            _ => Err(ScrublineError::evaluation(
                "cannot interpolate between values of different kinds",
            )),
        }
    }
}

/// Eased transition of one property between two endpoint values.
///
/// Ramps are sampled at a local `[0, 1]` parameter: a track feeds them its
/// span-local progress, the stagger engine feeds them per-item reveal
/// fractions.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct PropertyRamp {
    pub property: Property,
    pub from: Value,
    pub to: Value,
    pub ease: Ease,
}

impl PropertyRamp {
    pub fn scalar(property: Property, from: f64, to: f64, ease: Ease) -> ScrublineResult<Self> {
        let ramp = Self {
            property,
            from: Value::Scalar(from),
            to: Value::Scalar(to),
            ease,
        };
        ramp.validate()?;
        Ok(ramp)
    }

    pub fn translate(from: Vec2, to: Vec2, ease: Ease) -> ScrublineResult<Self> {
        let ramp = Self {
            property: Property::Translate,
            from: Value::Vec2(from),
            to: Value::Vec2(to),
            ease,
        };
        ramp.validate()?;
        Ok(ramp)
    }

    pub fn color(from: Rgba, to: Rgba, ease: Ease) -> ScrublineResult<Self> {
        let ramp = Self {
            property: Property::Color,
            from: Value::Color(from),
            to: Value::Color(to),
            ease,
        };
        ramp.validate()?;
        Ok(ramp)
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.from.kind() != self.property.kind() || self.to.kind() != self.property.kind() {
            return Err(ScrublineError::validation(format!(
                "ramp endpoints must match the {:?} property kind",
                self.property
            )));
        }
        Ok(())
    }

    /// Sample at local parameter `t` (clamped to `[0, 1]`), easing applied.
    pub fn sample(&self, t: f64) -> ScrublineResult<Value> {
        Value::lerp(&self.from, &self.to, self.ease.apply(t))
    }
}

/// Declarative mapping from a progress sub-range to a property transition
/// on one named element.
///
/// Tracks are immutable once the scene is built; outside their span they
/// report the boundary endpoint, never a gap.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct Track {
    pub id: String,
    pub target: String,
    pub span: ProgressSpan,
    pub ramp: PropertyRamp,
}

impl Track {
    pub fn new(
        id: impl Into<String>,
        target: impl Into<String>,
        span: ProgressSpan,
        ramp: PropertyRamp,
    ) -> ScrublineResult<Self> {
        let track = Self {
            id: id.into(),
            target: target.into(),
            span,
            ramp,
        };
        track.validate()?;
        Ok(track)
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.id.trim().is_empty() {
            return Err(ScrublineError::validation("track id must be non-empty"));
        }
        if self.target.trim().is_empty() {
            return Err(ScrublineError::validation(format!(
                "track '{}' target must be non-empty",
                self.id
            )));
        }
        self.span.validate()?;
        self.ramp.validate()
    }

    pub fn property(&self) -> Property {
        self.ramp.property
    }

    /// Pure sample at global progress.
    pub fn sample(&self, progress: Progress) -> ScrublineResult<Value> {
        self.ramp.sample(self.span.local(progress))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opacity_track() -> Track {
        Track::new(
            "header-opacity",
            "header",
            ProgressSpan::new(0.2, 0.6).unwrap(),
            PropertyRamp::scalar(Property::Opacity, 0.0, 1.0, Ease::Linear).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn boundary_values_outside_the_span() {
        let track = opacity_track();
        assert_eq!(
            track.sample(Progress::ZERO).unwrap(),
            Value::Scalar(0.0),
        );
        assert_eq!(track.sample(Progress::new(0.4)).unwrap(), Value::Scalar(0.5));
        assert_eq!(track.sample(Progress::ONE).unwrap(), Value::Scalar(1.0));
    }

    #[test]
    fn sampling_is_pure() {
        let track = opacity_track();
        let p = Progress::new(0.37);
        assert_eq!(track.sample(p).unwrap(), track.sample(p).unwrap());
    }

    #[test]
    fn kind_mismatch_is_rejected_at_validation() {
        let ramp = PropertyRamp {
            property: Property::Opacity,
            from: Value::Scalar(0.0),
            to: Value::Color(Rgba::WHITE),
            ease: Ease::Linear,
        };
        assert!(ramp.validate().is_err());

        let ramp = PropertyRamp {
            property: Property::Translate,
            from: Value::Scalar(0.0),
            to: Value::Scalar(1.0),
            ease: Ease::Linear,
        };
        assert!(ramp.validate().is_err());
    }

    #[test]
    fn eased_ramp_applies_curve_before_lerp() {
        let ramp = PropertyRamp::scalar(Property::Opacity, 0.0, 1.0, Ease::OutCubic).unwrap();
        let v = ramp.sample(0.5).unwrap().as_scalar().unwrap();
        assert_eq!(v, Ease::OutCubic.apply(0.5));
    }

    #[test]
    fn empty_names_are_rejected() {
        let ramp = PropertyRamp::scalar(Property::Opacity, 0.0, 1.0, Ease::Linear).unwrap();
        assert!(Track::new("", "header", ProgressSpan::FULL, ramp.clone()).is_err());
        assert!(Track::new("t", "  ", ProgressSpan::FULL, ramp).is_err());
    }
}
