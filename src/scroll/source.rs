use crate::foundation::core::Progress;
use crate::scroll::pin::PinRegion;

/// Change threshold below which scroll samples are coalesced.
pub const DEFAULT_EPSILON: f64 = 1e-4;

type ProgressCallback = Box<dyn FnMut(Progress)>;

/// The single writer of [`Progress`].
///
/// Converts raw scroll offsets and pin geometry into the normalized
/// progress scalar and notifies subscribers when it moves. Notification is
/// epsilon-coalesced so rapid intermediate samples may be dropped, with two
/// exceptions: reaching an exact boundary (`0` or `1`) always notifies, and
/// a forced [`recompute`](Self::recompute) notifies on any change at all.
/// [`current_progress`](Self::current_progress) always reflects the latest
/// raw computation, so the value at rest settles exactly.
pub struct ProgressSource {
    pin: PinRegion,
    scroll_y: f64,
    progress: Progress,
    notified: Progress,
    epsilon: f64,
    subscribers: Vec<ProgressCallback>,
}

impl std::fmt::Debug for ProgressSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProgressSource")
            .field("pin", &self.pin)
            .field("scroll_y", &self.scroll_y)
            .field("progress", &self.progress)
            .field("epsilon", &self.epsilon)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl ProgressSource {
    pub fn new(pin: PinRegion) -> Self {
        let progress = pin.progress_at(0.0);
        Self {
            pin,
            scroll_y: 0.0,
            progress,
            notified: progress,
            epsilon: DEFAULT_EPSILON,
            subscribers: Vec::new(),
        }
    }

    /// Override the coalescing threshold. Non-finite or negative values are
    /// ignored; `0` disables coalescing entirely.
    pub fn set_epsilon(&mut self, epsilon: f64) {
        if epsilon.is_finite() && epsilon >= 0.0 {
            self.epsilon = epsilon;
        }
    }

    pub fn current_progress(&self) -> Progress {
        self.progress
    }

    pub fn scroll_offset(&self) -> f64 {
        self.scroll_y
    }

    pub fn pin(&self) -> PinRegion {
        self.pin
    }

    /// Subscribe to coalesced progress changes.
    pub fn on_progress_change(&mut self, callback: impl FnMut(Progress) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Drop every subscriber. Nothing registered before this call can fire
    /// afterwards.
    pub fn detach_all(&mut self) {
        self.subscribers.clear();
    }

    /// Feed a raw scroll sample. Returns the fresh progress when the move
    /// crossed the notification threshold, `None` when it was coalesced.
    /// Non-finite offsets are ignored and keep the previous position.
    pub fn set_scroll(&mut self, scroll_y: f64) -> Option<Progress> {
        if scroll_y.is_finite() {
            self.scroll_y = scroll_y;
        }
        self.refresh(false)
    }

    /// Replace the pin geometry. Takes effect on the next scroll sample or
    /// [`recompute`](Self::recompute).
    pub fn set_pin(&mut self, pin: PinRegion) {
        self.pin = pin;
    }

    /// Synchronously recompute progress from the stored scroll offset
    /// against current geometry, notifying on any change. Used by the
    /// refresh coordinator so new geometry is visible immediately.
    pub fn recompute(&mut self) -> Progress {
        self.refresh(true);
        self.progress
    }

    fn refresh(&mut self, force: bool) -> Option<Progress> {
        let next = self.pin.progress_at(self.scroll_y);
        // Latest raw value always wins, notified or not.
        self.progress = next;

        let delta = (next.value() - self.notified.value()).abs();
        let crossed = delta > self.epsilon || (next.is_boundary() && delta > 0.0);
        if crossed || (force && delta > 0.0) {
            self.notified = next;
            for callback in &mut self.subscribers {
                callback(next);
            }
            return Some(next);
        }
        None
    }
}
