//! Observable status of a coordinator instance.

use std::time::SystemTime;

/// Snapshot of a coordinator's save status, published through a `watch`
/// channel on every transition.
///
/// Obtain the current snapshot via [`AutosaveHandle::state`] or subscribe
/// to transitions via [`AutosaveHandle::subscribe`]. The fields are what a
/// UI needs to render "Saving…", "Unsaved changes", "Save failed", or
/// "Saved at \<time\>".
///
/// [`AutosaveHandle::state`]: crate::AutosaveHandle::state
/// [`AutosaveHandle::subscribe`]: crate::AutosaveHandle::subscribe
#[derive(Debug, Clone, Default)]
pub struct SaveState {
    /// A save invocation is currently outstanding.
    pub is_saving: bool,

    /// Wall-clock time of the most recent successful save, if any.
    pub last_saved: Option<SystemTime>,

    /// Content has changed since the last successful save.
    ///
    /// Not mutually exclusive with [`is_saving`](Self::is_saving): an edit
    /// arriving while a save is in flight keeps this true.
    pub has_unsaved_changes: bool,

    /// Message of the most recent failed save attempt.
    ///
    /// Cleared by the next successful save or the next content change.
    pub save_error: Option<String>,

    /// Consecutive failed attempts since the last success.
    ///
    /// Informational only: the coordinator never schedules retries from
    /// it. Callers wanting backoff can watch this and call
    /// [`save_now`](crate::AutosaveHandle::save_now) on their own policy.
    pub retry_count: u32,
}

impl SaveState {
    /// The coordinator phase implied by the current fields.
    pub fn phase(&self) -> SavePhase {
        if self.is_saving {
            SavePhase::Saving
        } else if self.save_error.is_some() {
            SavePhase::Failed
        } else if self.has_unsaved_changes {
            SavePhase::Pending
        } else {
            SavePhase::Idle
        }
    }
}

/// Coarse view of [`SaveState`] as a four-phase lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SavePhase {
    /// Nothing unsaved, nothing in flight.
    Idle,
    /// Unsaved changes exist; a quiet-period countdown may be running.
    Pending,
    /// A save invocation is outstanding.
    Saving,
    /// The most recent attempt failed; changes are still unsaved.
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_state_is_idle() {
        let state = SaveState::default();
        assert_eq!(state.phase(), SavePhase::Idle);
        assert!(!state.has_unsaved_changes);
        assert!(state.last_saved.is_none());
        assert!(state.save_error.is_none());
        assert_eq!(state.retry_count, 0);
    }

    #[test]
    fn unsaved_changes_mean_pending() {
        let state = SaveState {
            has_unsaved_changes: true,
            ..SaveState::default()
        };
        assert_eq!(state.phase(), SavePhase::Pending);
    }

    #[test]
    fn saving_wins_over_everything() {
        let state = SaveState {
            is_saving: true,
            has_unsaved_changes: true,
            save_error: Some("boom".into()),
            ..SaveState::default()
        };
        assert_eq!(state.phase(), SavePhase::Saving);
    }

    #[test]
    fn error_wins_over_pending() {
        let state = SaveState {
            has_unsaved_changes: true,
            save_error: Some("boom".into()),
            ..SaveState::default()
        };
        assert_eq!(state.phase(), SavePhase::Failed);
    }
}
