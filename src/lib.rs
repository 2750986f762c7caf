//! Scrubline is a deterministic scroll-synchronized animation timeline core.
//!
//! It turns a single continuous scroll signal into coordinated animation
//! state: a discrete frame-sequence index, staggered per-word reveal
//! fractions, and eased property values for a small set of named elements,
//! all anchored to one normalized progress scalar.
//!
//! # Pipeline overview
//!
//! 1. **Measure**: `PinSpec + Viewport -> PinRegion` (where pinning starts, how far it scrolls)
//! 2. **Project**: `ProgressSource` maps raw scroll offsets onto `Progress` in `[0, 1]`
//! 3. **Evaluate**: `Scene + Progress -> EvaluatedScene` (pure, order-independent)
//! 4. **Apply**: `Driver` pushes the evaluated state into a caller-supplied [`Stage`] sink
//!
//! The key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Deterministic-by-default**: evaluation is a pure function of progress.
//! - **No IO in the hot path**: frame assets are gated upstream via [`LoadGate`].
//! - **Degrade, don't fault**: unmeasured geometry and out-of-range inputs
//!   clamp to an inert state instead of producing `NaN` or panics.
#![forbid(unsafe_code)]

pub mod animation;
pub mod assets;
pub mod driver;
pub mod foundation;
pub mod scene;
pub mod scroll;
pub mod sequence;
pub mod timeline;

pub use animation::ease::Ease;
pub use animation::lerp::Lerp;
pub use assets::preload::LoadGate;
pub use driver::apply::Driver;
pub use driver::stage::{MemoryStage, Stage};
pub use foundation::core::{Progress, ProgressSpan, Rgba, Vec2, Viewport};
pub use foundation::error::{ScrublineError, ScrublineResult};
pub use scene::model::{
    EvaluatedFrame, EvaluatedItem, EvaluatedScene, ItemValue, Scene, StaggerSpec,
};
pub use scene::presets;
pub use scroll::lock::{ScrollLock, ScrollLockGuard};
pub use scroll::pin::{MeasurePin, PinRegion, PinSpec};
pub use scroll::scrub::Scrub;
pub use scroll::source::{DEFAULT_EPSILON, ProgressSource};
pub use scroll::velocity::{MarqueeRow, VelocityTracker, wrap};
pub use sequence::runner::ScrollSequence;
pub use timeline::clock::ClockDriver;
pub use timeline::frames::FrameSet;
pub use timeline::model::{EvaluatedTimeline, EvaluatedValue, Timeline, TimelineBuilder};
pub use timeline::stagger::StaggerGroup;
pub use timeline::track::{Property, PropertyRamp, Track, Value, ValueKind};
