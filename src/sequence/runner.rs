use crate::driver::apply::Driver;
use crate::driver::stage::Stage;
use crate::foundation::core::{Progress, Viewport};
use crate::foundation::error::ScrublineResult;
use crate::scene::model::{EvaluatedScene, Scene};
use crate::scroll::pin::MeasurePin as _;
use crate::scroll::source::ProgressSource;

/// One mounted scroll sequence: owns the progress source, caches the last
/// evaluated state, and coordinates refresh.
///
/// The host feeds it scroll samples and viewport changes and calls
/// [`invalidate`](Self::invalidate) after layout-affecting events (route
/// change, late image load). When the scene carries a frame sequence, the
/// runner holds evaluation at progress `0` until
/// [`set_ready`](Self::set_ready) opens the gate, so a half-loaded sequence
/// can never show a missing frame.
///
/// Teardown is by ownership: dropping the runner drops the progress source
/// and every subscriber with it, so no callback can fire after unmount.
pub struct ScrollSequence {
    scene: Scene,
    viewport: Viewport,
    source: ProgressSource,
    ready: bool,
    state: EvaluatedScene,
}

impl ScrollSequence {
    /// Validate the scene, measure the pin against `viewport` and compute
    /// the initial state.
    pub fn new(scene: Scene, viewport: Viewport) -> ScrublineResult<Self> {
        scene.validate()?;
        let source = ProgressSource::new(scene.pin.measure(viewport));
        let ready = scene.frames.is_none();
        let state = scene.evaluate_unchecked(Progress::ZERO)?;
        Ok(Self {
            scene,
            viewport,
            source,
            ready,
            state,
        })
    }

    /// Override the scroll coalescing threshold.
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.source.set_epsilon(epsilon);
        self
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The latest evaluated state; never stale relative to the last
    /// accepted input.
    pub fn state(&self) -> &EvaluatedScene {
        &self.state
    }

    pub fn current_progress(&self) -> Progress {
        self.effective_progress()
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    /// Open the frames-ready gate and evaluate at the real scroll position.
    pub fn set_ready(&mut self) -> ScrublineResult<&EvaluatedScene> {
        self.ready = true;
        self.reevaluate()
    }

    /// Subscribe to coalesced progress changes.
    pub fn on_progress_change(&mut self, callback: impl FnMut(Progress) + 'static) {
        self.source.on_progress_change(callback);
    }

    /// Detach every subscriber immediately.
    pub fn detach(&mut self) {
        self.source.detach_all();
    }

    /// Feed a scroll sample. Returns the fresh state when the move crossed
    /// the coalescing threshold, `None` when it was dropped. Before the
    /// ready gate opens the position is recorded but the state stays inert.
    pub fn on_scroll(&mut self, scroll_y: f64) -> ScrublineResult<Option<&EvaluatedScene>> {
        let moved = self.source.set_scroll(scroll_y);
        if !self.ready || moved.is_none() {
            return Ok(None);
        }
        self.reevaluate().map(Some)
    }

    /// Re-measure the pin against the current viewport, synchronously
    /// recompute progress and re-evaluate, so the cached state matches the
    /// new geometry with no stale tick in between. Idempotent: with no
    /// intervening layout change a second call is a no-op arriving at the
    /// same state.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn invalidate(&mut self) -> ScrublineResult<&EvaluatedScene> {
        self.source.set_pin(self.scene.pin.measure(self.viewport));
        self.source.recompute();
        self.reevaluate()
    }

    /// Viewport resize: store the new dimensions and invalidate.
    pub fn set_viewport(&mut self, viewport: Viewport) -> ScrublineResult<&EvaluatedScene> {
        self.viewport = viewport;
        self.invalidate()
    }

    /// Push the cached state into a sink.
    pub fn drive(&self, stage: &mut dyn Stage) {
        Driver::drive(&self.state, stage);
    }

    fn effective_progress(&self) -> Progress {
        if self.ready {
            self.source.current_progress()
        } else {
            Progress::ZERO
        }
    }

    fn reevaluate(&mut self) -> ScrublineResult<&EvaluatedScene> {
        self.state = self.scene.evaluate_unchecked(self.effective_progress())?;
        Ok(&self.state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::presets::about_scene;

    fn viewport(height: f64) -> Viewport {
        Viewport::new(1920.0, height).unwrap()
    }

    fn runner(height: f64) -> ScrollSequence {
        ScrollSequence::new(about_scene().unwrap(), viewport(height)).unwrap()
    }

    #[test]
    fn gate_holds_evaluation_at_zero_until_ready() {
        let mut seq = runner(800.0);
        assert!(!seq.is_ready());

        // Scroll is recorded but the state stays inert on frame 0.
        let out = seq.on_scroll(1600.0).unwrap();
        assert!(out.is_none());
        assert_eq!(seq.state().frame.as_ref().unwrap().index, 0);
        assert_eq!(seq.current_progress(), Progress::ZERO);

        // Opening the gate lands on the recorded position.
        let state = seq.set_ready().unwrap();
        assert_eq!(state.progress.value(), 0.5);
        assert_eq!(state.frame.as_ref().unwrap().index, 24);
    }

    #[test]
    fn scroll_updates_after_ready() {
        let mut seq = runner(800.0);
        seq.set_ready().unwrap();

        let state = seq.on_scroll(800.0).unwrap().unwrap();
        assert_eq!(state.progress.value(), 0.25);

        // A sub-epsilon wiggle is coalesced.
        assert!(seq.on_scroll(800.01).unwrap().is_none());
    }

    #[test]
    fn resize_recomputes_against_new_geometry() {
        let mut seq = runner(800.0);
        seq.set_ready().unwrap();

        // Pin length 4 x 800 = 3200; scroll to 30% of it.
        seq.on_scroll(960.0).unwrap();
        assert_eq!(seq.current_progress().value(), 0.3);

        // Taller viewport: same raw offset, longer virtual length.
        let state = seq.set_viewport(viewport(1000.0)).unwrap();
        assert_eq!(state.progress.value(), 0.24);
        assert_eq!(seq.current_progress().value(), 0.24);
    }

    #[test]
    fn invalidate_is_idempotent_without_layout_change() {
        let mut seq = runner(800.0);
        seq.set_ready().unwrap();
        seq.on_scroll(1234.0).unwrap();

        let once = serde_json::to_string(seq.invalidate().unwrap()).unwrap();
        let twice = serde_json::to_string(seq.invalidate().unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn detach_drops_subscribers() {
        use std::cell::RefCell;
        use std::rc::Rc;

        let seen: Rc<RefCell<Vec<f64>>> = Rc::default();
        let sink = Rc::clone(&seen);

        let mut seq = runner(800.0);
        seq.set_ready().unwrap();
        seq.on_progress_change(move |p| sink.borrow_mut().push(p.value()));
        seq.on_scroll(1600.0).unwrap();
        assert_eq!(seen.borrow().len(), 1);

        seq.detach();
        seq.on_scroll(2400.0).unwrap();
        assert_eq!(seen.borrow().len(), 1);
    }
}
