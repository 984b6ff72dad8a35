//! Debounce and cooldown gating for gesture dispatch.
//!
//! Tracks, per input source, the last classified gesture and the time of
//! the last dispatched action. A gesture dispatches only when it maps to
//! an action, differs from the source's previously recorded gesture, and
//! the global cooldown window has elapsed. The cooldown is shared across
//! all sources so a hand and a face gesture landing in the same frame
//! cannot both fire.

use crate::gesture::{Action, GestureLabel};
use crate::landmarks::Handedness;
use std::time::{Duration, Instant};

/// Input source a gesture was observed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceKey {
    LeftHand,
    RightHand,
    Face,
}

impl SourceKey {
    /// Stable string form, matching the session log column
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LeftHand => "Left",
            Self::RightHand => "Right",
            Self::Face => "Face",
        }
    }
}

impl From<Handedness> for SourceKey {
    fn from(handedness: Handedness) -> Self {
        match handedness {
            Handedness::Left => Self::LeftHand,
            Handedness::Right => Self::RightHand,
        }
    }
}

/// Per-source debounce state
#[derive(Debug, Clone, Copy, Default)]
struct SourceState {
    last_label: Option<GestureLabel>,
    last_dispatch: Option<Instant>,
}

/// Stateful dispatch gate, one per capture session
#[derive(Debug)]
pub struct DebounceGate {
    cooldown: Duration,
    last_dispatch: Option<Instant>,
    left: SourceState,
    right: SourceState,
    face: SourceState,
}

impl DebounceGate {
    /// Create a gate that is immediately ready to dispatch
    #[must_use]
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            last_dispatch: None,
            left: SourceState::default(),
            right: SourceState::default(),
            face: SourceState::default(),
        }
    }

    fn source(&self, key: SourceKey) -> &SourceState {
        match key {
            SourceKey::LeftHand => &self.left,
            SourceKey::RightHand => &self.right,
            SourceKey::Face => &self.face,
        }
    }

    fn source_mut(&mut self, key: SourceKey) -> &mut SourceState {
        match key {
            SourceKey::LeftHand => &mut self.left,
            SourceKey::RightHand => &mut self.right,
            SourceKey::Face => &mut self.face,
        }
    }

    /// Decide whether a classified gesture may dispatch its action.
    ///
    /// Returns true only when an action is present, the label differs from
    /// the source's last recorded label, and the global cooldown has
    /// elapsed. On true, the source's label and both dispatch timestamps
    /// are updated; on false no state changes, so a gesture suppressed by
    /// cooldown stays eligible once the window reopens.
    pub fn should_dispatch(
        &mut self,
        source: SourceKey,
        label: GestureLabel,
        action: Option<Action>,
        now: Instant,
    ) -> bool {
        if action.is_none() {
            return false;
        }
        if self.source(source).last_label == Some(label) {
            return false;
        }
        if let Some(last) = self.last_dispatch {
            if now.duration_since(last) <= self.cooldown {
                return false;
            }
        }

        let state = self.source_mut(source);
        state.last_label = Some(label);
        state.last_dispatch = Some(now);
        self.last_dispatch = Some(now);
        true
    }

    /// Seconds since the source's previous dispatch, 0.0 if it has none.
    ///
    /// Query this before `should_dispatch` to get the duration column for
    /// the session log.
    #[must_use]
    pub fn seconds_since_dispatch(&self, source: SourceKey, now: Instant) -> f64 {
        self.source(source)
            .last_dispatch
            .map_or(0.0, |at| now.duration_since(at).as_secs_f64())
    }

    /// Time until the global gate reopens, zero when ready
    #[must_use]
    pub fn cooldown_remaining(&self, now: Instant) -> Duration {
        match self.last_dispatch {
            Some(last) => self.cooldown.saturating_sub(now.duration_since(last)),
            None => Duration::ZERO,
        }
    }

    /// Configured cooldown window
    #[must_use]
    pub const fn cooldown(&self) -> Duration {
        self.cooldown
    }

    /// Clear all per-source and global state
    pub fn reset(&mut self) {
        self.last_dispatch = None;
        self.left = SourceState::default();
        self.right = SourceState::default();
        self.face = SourceState::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(1500);

    #[test]
    fn test_dispatch_then_suppress_same_label() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.should_dispatch(SourceKey::RightHand, GestureLabel::Fist, Some(Action::MinimizeAll), t0));
        // Same label again within the window: suppressed
        assert!(!gate.should_dispatch(
            SourceKey::RightHand,
            GestureLabel::Fist,
            Some(Action::MinimizeAll),
            t0 + Duration::from_millis(100)
        ));
    }

    #[test]
    fn test_unchanged_label_blocked_even_after_cooldown() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.should_dispatch(SourceKey::Face, GestureLabel::Blink, Some(Action::PlayPauseMedia), t0));
        // Long after the window the label is still unchanged, so still blocked
        assert!(!gate.should_dispatch(
            SourceKey::Face,
            GestureLabel::Blink,
            Some(Action::PlayPauseMedia),
            t0 + Duration::from_secs(10)
        ));
    }

    #[test]
    fn test_no_action_never_dispatches() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();
        assert!(!gate.should_dispatch(SourceKey::LeftHand, GestureLabel::Fingers(3), None, t0));
        // The unmapped label must not poison the gate state either
        assert!(gate.should_dispatch(SourceKey::LeftHand, GestureLabel::Fist, Some(Action::MinimizeAll), t0));
    }

    #[test]
    fn test_cooldown_is_global_across_sources() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.should_dispatch(SourceKey::RightHand, GestureLabel::Fist, Some(Action::MinimizeAll), t0));
        // Different source, different label, but inside the shared window
        assert!(!gate.should_dispatch(
            SourceKey::Face,
            GestureLabel::Blink,
            Some(Action::PlayPauseMedia),
            t0 + Duration::from_millis(200)
        ));
        // Window elapsed: the face gesture goes through
        assert!(gate.should_dispatch(
            SourceKey::Face,
            GestureLabel::Blink,
            Some(Action::PlayPauseMedia),
            t0 + Duration::from_millis(1600)
        ));
    }

    #[test]
    fn test_label_change_within_window_stays_eligible() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert!(gate.should_dispatch(SourceKey::RightHand, GestureLabel::Fist, Some(Action::MinimizeAll), t0));
        // Open palm arrives inside the window and is suppressed
        let t1 = t0 + Duration::from_millis(500);
        assert!(!gate.should_dispatch(SourceKey::RightHand, GestureLabel::OpenPalm, Some(Action::PlayPauseMedia), t1));
        // Suppression did not record the label, so the sustained palm
        // dispatches once the window reopens
        let t2 = t0 + Duration::from_millis(1600);
        assert!(gate.should_dispatch(SourceKey::RightHand, GestureLabel::OpenPalm, Some(Action::PlayPauseMedia), t2));
    }

    #[test]
    fn test_seconds_since_dispatch() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();

        assert_eq!(gate.seconds_since_dispatch(SourceKey::RightHand, t0), 0.0);
        gate.should_dispatch(SourceKey::RightHand, GestureLabel::Fist, Some(Action::MinimizeAll), t0);

        let t1 = t0 + Duration::from_secs(2);
        assert!((gate.seconds_since_dispatch(SourceKey::RightHand, t1) - 2.0).abs() < 1e-9);
        // Other sources are unaffected
        assert_eq!(gate.seconds_since_dispatch(SourceKey::Face, t1), 0.0);
    }

    #[test]
    fn test_cooldown_remaining_counts_down() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();
        assert_eq!(gate.cooldown_remaining(t0), Duration::ZERO);

        gate.should_dispatch(SourceKey::RightHand, GestureLabel::Fist, Some(Action::MinimizeAll), t0);
        assert_eq!(gate.cooldown_remaining(t0 + Duration::from_millis(500)), Duration::from_millis(1000));
        assert_eq!(gate.cooldown_remaining(t0 + Duration::from_secs(5)), Duration::ZERO);
    }

    #[test]
    fn test_reset_clears_state() {
        let mut gate = DebounceGate::new(COOLDOWN);
        let t0 = Instant::now();

        gate.should_dispatch(SourceKey::Face, GestureLabel::Blink, Some(Action::PlayPauseMedia), t0);
        gate.reset();

        // Same label and timestamp dispatch again after reset
        assert!(gate.should_dispatch(SourceKey::Face, GestureLabel::Blink, Some(Action::PlayPauseMedia), t0));
    }

    #[test]
    fn test_source_key_from_handedness() {
        assert_eq!(SourceKey::from(Handedness::Left), SourceKey::LeftHand);
        assert_eq!(SourceKey::from(Handedness::Right), SourceKey::RightHand);
        assert_eq!(SourceKey::Face.as_str(), "Face");
    }
}
