use crate::foundation::core::Progress;
use crate::foundation::error::{ScrublineError, ScrublineResult};

/// Discrete frame-sequence player: an ordered set of frame identifiers of
/// which exactly one is active at any progress value.
///
/// The player holds no state beyond the identifiers; the active index is a
/// pure function of progress (`min(F-1, floor(p * (F-1)))`), so scrubbing
/// backward restores earlier frames with no replay cost. An empty set is a
/// constructor error; a single frame is always active.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct FrameSet {
    ids: Vec<String>,
}

impl FrameSet {
    pub fn new(ids: Vec<String>) -> ScrublineResult<Self> {
        let frames = Self { ids };
        frames.validate()?;
        Ok(frames)
    }

    /// Build `count` identifiers of the form `{prefix}{NNN}{suffix}` with a
    /// 1-based, zero-padded three digit number, matching the source site's
    /// exported frame naming.
    pub fn numbered(prefix: &str, suffix: &str, count: usize) -> ScrublineResult<Self> {
        Self::new(
            (1..=count)
                .map(|i| format!("{prefix}{i:03}{suffix}"))
                .collect(),
        )
    }

    pub fn validate(&self) -> ScrublineResult<()> {
        if self.ids.is_empty() {
            return Err(ScrublineError::validation(
                "frame set must contain at least one frame",
            ));
        }
        if self.ids.iter().any(|id| id.trim().is_empty()) {
            return Err(ScrublineError::validation(
                "frame identifiers must be non-empty",
            ));
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Active frame index at `progress`.
    pub fn index_at(&self, progress: Progress) -> usize {
        let last = self.ids.len().saturating_sub(1);
        ((progress.value() * last as f64).floor() as usize).min(last)
    }

    /// Active frame identifier, `None` only for an (unvalidated) empty set.
    pub fn active(&self, progress: Progress) -> Option<&str> {
        self.ids.get(self.index_at(progress)).map(String::as_str)
    }

    /// Whether frame `index` is the one visible frame at `progress`.
    pub fn is_active(&self, index: usize, progress: Progress) -> bool {
        !self.ids.is_empty() && index == self.index_at(progress)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_set_is_rejected() {
        assert!(FrameSet::new(Vec::new()).is_err());
    }

    #[test]
    fn numbered_matches_exported_naming() {
        let frames = FrameSet::numbered("/images/frames/ezgif-frame-", ".jpg", 49).unwrap();
        assert_eq!(frames.len(), 49);
        assert_eq!(frames.ids()[0], "/images/frames/ezgif-frame-001.jpg");
        assert_eq!(frames.ids()[48], "/images/frames/ezgif-frame-049.jpg");
    }

    #[test]
    fn midpoint_of_49_frames_is_24() {
        let frames = FrameSet::numbered("f-", ".jpg", 49).unwrap();
        assert_eq!(frames.index_at(Progress::new(0.5)), 24);
    }

    #[test]
    fn endpoints_hit_first_and_last() {
        let frames = FrameSet::numbered("f-", ".jpg", 49).unwrap();
        assert_eq!(frames.index_at(Progress::ZERO), 0);
        assert_eq!(frames.index_at(Progress::ONE), 48);
    }

    #[test]
    fn index_is_non_decreasing_in_progress() {
        let frames = FrameSet::numbered("f-", ".jpg", 49).unwrap();
        let mut prev = 0;
        for step in 0..=1000 {
            let p = Progress::new(step as f64 / 1000.0);
            let index = frames.index_at(p);
            assert!(index >= prev);
            prev = index;
        }
        assert_eq!(prev, 48);
    }

    #[test]
    fn single_frame_is_always_active() {
        let frames = FrameSet::new(vec!["only.jpg".to_string()]).unwrap();
        for p in [0.0, 0.3, 1.0] {
            assert_eq!(frames.index_at(Progress::new(p)), 0);
            assert!(frames.is_active(0, Progress::new(p)));
        }
    }

    #[test]
    fn exactly_one_frame_active() {
        let frames = FrameSet::numbered("f-", ".jpg", 8).unwrap();
        let p = Progress::new(0.42);
        let active: Vec<usize> = (0..frames.len())
            .filter(|&i| frames.is_active(i, p))
            .collect();
        assert_eq!(active.len(), 1);
    }
}
