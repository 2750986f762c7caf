//! Built-in scenes reproducing the portfolio site's choreography.
//!
//! Timing constants are expressed in the source timeline's scrub units and
//! normalized onto `[0, 1]` progress here, so the choreography survives any
//! physical scroll distance the pin measures out to.

use crate::animation::ease::Ease;
use crate::foundation::core::{ProgressSpan, Rgba, Vec2};
use crate::foundation::error::ScrublineResult;
use crate::foundation::math::Rng64;
use crate::scene::model::{Scene, StaggerSpec};
use crate::scroll::pin::PinSpec;
use crate::timeline::frames::FrameSet;
use crate::timeline::model::{Timeline, TimelineBuilder};
use crate::timeline::stagger::StaggerGroup;
use crate::timeline::track::{Property, PropertyRamp, Track};

/// The about-section copy, split into per-word reveal targets.
const PROFILE_PARAGRAPHS: [&str; 3] = [
    "I am an aspiring Full Stack Developer with a strong foundation in programming, problem-solving, and designing scalable applications. I enjoy building complete end-to-end web solutions, from developing responsive front-end interfaces to implementing efficient and secure back-end systems.",
    "Alongside full-stack development, I have hands-on experience integrating AI and machine learning components into real-world applications, working with data processing, model integration, and deploying intelligent features within web platforms. I have contributed to multiple AI-driven projects where I focused on transforming complex data into meaningful insights and creating intuitive, user-friendly interfaces.",
    "I am passionate about continuous learning, writing clean and maintainable code, and building impactful solutions that combine modern web technologies with intelligent systems.",
];

/// Scrub units: how many viewport heights the about section pins over.
const ABOUT_PIN_VIEWPORTS: f64 = 4.0;
/// Frame count of the exported about-section image sequence.
const ABOUT_FRAME_COUNT: usize = 49;

// Source timeline positions, in scrub units (1 unit = 1 scrub second).
const HEADER_START: f64 = 0.2;
const PANEL_START: f64 = 0.4;
const REVEAL_LEN: f64 = 1.5;
const PARALLAX_LEN: f64 = 4.0;
const WORDS_START: f64 = 0.5;
const WORDS_WINDOW: f64 = 3.5;
const WORD_LEN: f64 = 0.5;

/// The paragraphs backing the word targets, for hosts that lay out the
/// actual text.
pub fn profile_paragraphs() -> &'static [&'static str] {
    &PROFILE_PARAGRAPHS
}

fn word_targets() -> Vec<String> {
    PROFILE_PARAGRAPHS
        .iter()
        .enumerate()
        .flat_map(|(p, text)| {
            text.split_whitespace()
                .enumerate()
                .map(move |(w, _)| format!("word-{p}-{w}"))
        })
        .collect()
}

/// Map a `[start, start + len]` range in scrub units onto progress.
fn span_units(total: f64, start: f64, len: f64) -> ScrublineResult<ProgressSpan> {
    ProgressSpan::new(start / total, ((start + len) / total).min(1.0))
}

/// The scroll-driven about sequence: 49-frame scrub, header and portrait
/// reveals, copy parallax and the per-word highlight stagger.
///
/// The frame sequence spans the whole progress range (frame index is a
/// monotonic function of overall scroll progress); the element tracks keep
/// their relative placement from the source timeline.
pub fn about_scene() -> ScrublineResult<Scene> {
    let words = word_targets();
    let word_count = words.len() as f64;

    // Total length of the source timeline: the word stagger overshoots the
    // frame tween, so the last word finishes exactly at progress 1.
    let total = (WORDS_START + WORDS_WINDOW * (word_count - 1.0) / word_count + WORD_LEN)
        .max(PARALLAX_LEN);

    let header_span = span_units(total, HEADER_START, REVEAL_LEN)?;
    let panel_span = span_units(total, PANEL_START, REVEAL_LEN)?;
    let parallax_span = span_units(total, 0.0, PARALLAX_LEN)?;

    let timeline = add_header_tracks(Timeline::builder(), header_span)?
        .track(Track::new(
            "portrait-opacity",
            "portrait",
            panel_span,
            PropertyRamp::scalar(Property::Opacity, 0.0, 1.0, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "portrait-slide",
            "portrait",
            panel_span,
            PropertyRamp::translate(Vec2::new(-300.0, 30.0), Vec2::ZERO, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "portrait-scale",
            "portrait",
            panel_span,
            PropertyRamp::scalar(Property::Scale, 0.95, 1.0, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "copy-parallax",
            "copy",
            parallax_span,
            PropertyRamp::translate(Vec2::ZERO, Vec2::new(0.0, -20.0), Ease::Linear)?,
        )?)
        .build()?;

    let muted = Rgba::new(255, 255, 255, 128);
    let highlight = StaggerSpec {
        id: "word-highlight".to_string(),
        group: StaggerGroup::new(
            words,
            span_units(total, WORDS_START, WORDS_WINDOW)?,
            WORD_LEN / total,
        )?,
        ramps: vec![
            PropertyRamp::scalar(Property::Opacity, 0.3, 1.0, Ease::Linear)?,
            PropertyRamp::color(muted, Rgba::WHITE, Ease::Linear)?,
            PropertyRamp::scalar(Property::Weight, 400.0, 700.0, Ease::Linear)?,
            PropertyRamp::scalar(Property::Glow, 0.0, 10.0, Ease::Linear)?,
        ],
    };

    let scene = Scene {
        pin: PinSpec::new(0.0, ABOUT_PIN_VIEWPORTS)?,
        timeline,
        frames: Some(FrameSet::numbered(
            "/images/frames/ezgif-frame-",
            ".jpg",
            ABOUT_FRAME_COUNT,
        )?),
        staggers: vec![highlight],
    };
    scene.validate()?;
    Ok(scene)
}

fn add_header_tracks(
    builder: TimelineBuilder,
    span: ProgressSpan,
) -> ScrublineResult<TimelineBuilder> {
    Ok(builder
        .track(Track::new(
            "header-opacity",
            "header",
            span,
            PropertyRamp::scalar(Property::Opacity, 0.0, 1.0, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "header-scale",
            "header",
            span,
            PropertyRamp::scalar(Property::Scale, 0.9, 1.0, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "header-blur",
            "header",
            span,
            PropertyRamp::scalar(Property::Blur, 12.0, 0.0, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "header-tracking",
            "header",
            span,
            PropertyRamp::scalar(Property::LetterSpacing, 0.05, -0.02, Ease::OutCubic)?,
        )?)
        .track(Track::new(
            "header-lift",
            "header",
            span,
            PropertyRamp::translate(Vec2::new(0.0, 40.0), Vec2::ZERO, Ease::OutCubic)?,
        )?))
}

/// Number of shooting stars in the landing intro.
pub const INTRO_STAR_COUNT: usize = 6;

// Intro positions, in seconds.
const INTRO_BACKDROP_DELAY: f64 = 0.5;
const INTRO_BACKDROP_LEN: f64 = 2.0;
const INTRO_STARS_AT: f64 = 3.0;
const INTRO_STAR_TRAVEL_MIN: f64 = 3.0;
const INTRO_STAR_FADE: f64 = 0.2;
const INTRO_SEED: u64 = 0x5EED_0B57;

/// The landing intro as a time-driven timeline plus its wall-clock length,
/// to be advanced with a [`ClockDriver`](crate::timeline::clock::ClockDriver)
/// while a scroll-lock guard is held.
#[derive(Clone, Debug)]
pub struct IntroSpec {
    pub timeline: Timeline,
    pub duration_s: f64,
}

/// Video darken, then a deterministic shooting-star sweep. Star scatter is
/// seeded so every mount replays identically.
pub fn intro() -> ScrublineResult<IntroSpec> {
    let mut rng = Rng64::new(INTRO_SEED);

    struct Star {
        from: Vec2,
        scale: f64,
        travel_s: f64,
    }

    let stars: Vec<Star> = (0..INTRO_STAR_COUNT)
        .map(|_| Star {
            from: Vec2::new(
                -10.0 - rng.next_f64_01() * 20.0,
                -10.0 - rng.next_f64_01() * 20.0,
            ),
            scale: 0.5 + rng.next_f64_01() * 0.5,
            travel_s: INTRO_STAR_TRAVEL_MIN + rng.next_f64_01(),
        })
        .collect();

    let duration_s = stars
        .iter()
        .map(|s| INTRO_STARS_AT + s.travel_s + INTRO_STAR_FADE)
        .fold(INTRO_BACKDROP_DELAY + INTRO_BACKDROP_LEN, f64::max);

    let mut builder = Timeline::builder()
        .track(Track::new(
            "backdrop-dim",
            "backdrop",
            span_units(duration_s, INTRO_BACKDROP_DELAY, INTRO_BACKDROP_LEN)?,
            PropertyRamp::scalar(Property::Opacity, 1.0, 0.3, Ease::InOutQuad)?,
        )?)
        .track(Track::new(
            "backdrop-push",
            "backdrop",
            span_units(duration_s, INTRO_BACKDROP_DELAY, INTRO_BACKDROP_LEN)?,
            PropertyRamp::scalar(Property::Scale, 1.0, 1.05, Ease::InOutQuad)?,
        )?);

    for (i, star) in stars.iter().enumerate() {
        let target = format!("star-{i}");
        let travel = span_units(duration_s, INTRO_STARS_AT, star.travel_s)?;
        let fade = span_units(duration_s, INTRO_STARS_AT + star.travel_s, INTRO_STAR_FADE)?;

        builder = builder
            .track(Track::new(
                format!("star-{i}-sweep"),
                target.clone(),
                travel,
                PropertyRamp::translate(star.from, Vec2::new(120.0, 120.0), Ease::Linear)?,
            )?)
            .track(Track::new(
                format!("star-{i}-size"),
                target.clone(),
                travel,
                PropertyRamp::scalar(Property::Scale, star.scale, star.scale, Ease::Linear)?,
            )?)
            .track(Track::new(
                format!("star-{i}-fade"),
                target,
                fade,
                PropertyRamp::scalar(Property::Opacity, 1.0, 0.0, Ease::Linear)?,
            )?);
    }

    Ok(IntroSpec {
        timeline: builder.build()?,
        duration_s,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::core::Progress;

    #[test]
    fn about_scene_validates() {
        let scene = about_scene().unwrap();
        scene.validate().unwrap();
        assert_eq!(scene.frames.as_ref().unwrap().len(), 49);
        assert_eq!(scene.staggers.len(), 1);
        assert!(scene.staggers[0].group.len() > 100);
    }

    #[test]
    fn about_header_is_hidden_then_shown() {
        let scene = about_scene().unwrap();
        let start = scene.evaluate(Progress::ZERO).unwrap();
        let opacity = start
            .values
            .iter()
            .find(|v| v.track_id == "header-opacity")
            .unwrap();
        assert_eq!(opacity.value.as_scalar(), Some(0.0));

        let end = scene.evaluate(Progress::ONE).unwrap();
        let opacity = end
            .values
            .iter()
            .find(|v| v.track_id == "header-opacity")
            .unwrap();
        assert_eq!(opacity.value.as_scalar(), Some(1.0));
    }

    #[test]
    fn about_frames_scrub_the_full_range() {
        let scene = about_scene().unwrap();
        let mid = scene.evaluate(Progress::new(0.5)).unwrap();
        assert_eq!(mid.frame.as_ref().unwrap().index, 24);
        let end = scene.evaluate(Progress::ONE).unwrap();
        assert_eq!(end.frame.as_ref().unwrap().index, 48);
    }

    #[test]
    fn last_word_completes_at_the_end_of_the_scroll() {
        let scene = about_scene().unwrap();
        let group = &scene.staggers[0].group;
        let last = group.len() - 1;
        let fraction = group.reveal_fraction(last, Progress::ONE);
        assert!(fraction > 0.999, "last word fraction was {fraction}");
    }

    #[test]
    fn intro_is_deterministic() {
        let a = intro().unwrap();
        let b = intro().unwrap();
        assert_eq!(a.duration_s, b.duration_s);
        assert_eq!(
            serde_json::to_string(&a.timeline).unwrap(),
            serde_json::to_string(&b.timeline).unwrap()
        );
    }

    #[test]
    fn intro_covers_backdrop_and_stars() {
        let spec = intro().unwrap();
        spec.timeline.validate().unwrap();
        assert!(spec.duration_s > INTRO_STARS_AT + INTRO_STAR_TRAVEL_MIN);
        // Two backdrop tracks plus three per star.
        assert_eq!(spec.timeline.tracks.len(), 2 + 3 * INTRO_STAR_COUNT);
    }
}
