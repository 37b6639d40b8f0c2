//! Trailing-edge debounce for edit events
//!
//! Every edit notification arms (or re-arms) a single deadline; only once
//! the buffer has been quiet for the full interval does the deadline fall
//! due and the refresh run. A burst of keystrokes therefore costs one
//! refresh, computed from the buffer state after the last keystroke.
//!
//! The scheduler is a passive two-state machine — **Idle** (no deadline)
//! and **Pending** (deadline armed) — driven by explicit `Instant`s. The
//! host event loop reports edits with [`RefreshScheduler::note_edit`],
//! polls [`RefreshScheduler::fire_due`] each frame, and uses
//! [`RefreshScheduler::time_until_due`] to schedule its next wake-up.
//! Explicit buffer replacement (new/open/close) must call
//! [`RefreshScheduler::cancel`] *before* mutating the buffer so a stale
//! refresh cannot fire over fresh content.

// Allow dead code - the scheduler exposes its full state-machine API; the
// app polls only part of it
#![allow(dead_code)]

use std::time::{Duration, Instant};

/// Quiet interval a buffer must stay unedited before a refresh fires.
pub const REFRESH_QUIET_PERIOD: Duration = Duration::from_millis(300);

// ─────────────────────────────────────────────────────────────────────────────
// Refresh Scheduler
// ─────────────────────────────────────────────────────────────────────────────

/// Debounce state machine for preview refreshes.
///
/// Invariant: at most one deadline is armed at any moment; re-arming
/// replaces the previous deadline rather than queueing a second one.
#[derive(Debug, Clone)]
pub struct RefreshScheduler {
    /// Quiet interval between the last edit and the refresh
    quiet_period: Duration,
    /// Armed deadline; `None` means Idle
    deadline: Option<Instant>,
}

impl Default for RefreshScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl RefreshScheduler {
    /// Create a scheduler with the standard quiet interval.
    pub fn new() -> Self {
        Self::with_quiet_period(REFRESH_QUIET_PERIOD)
    }

    /// Create a scheduler with a custom quiet interval.
    pub fn with_quiet_period(quiet_period: Duration) -> Self {
        Self {
            quiet_period,
            deadline: None,
        }
    }

    /// Record an edit event, arming or re-arming the deadline.
    ///
    /// Idle → Pending, or Pending → Pending with a fresh deadline; either
    /// way the refresh will fire one quiet interval after `now`.
    pub fn note_edit(&mut self, now: Instant) {
        self.deadline = Some(now + self.quiet_period);
    }

    /// Whether a refresh deadline is armed.
    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Poll the deadline.
    ///
    /// Returns `true` exactly once per armed deadline, at the first poll at
    /// or after it falls due, transitioning back to Idle.
    pub fn fire_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    /// Drop any armed deadline without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Time remaining until the deadline, if one is armed.
    ///
    /// Zero when the deadline is already due; the host uses this to request
    /// a wake-up instead of spinning.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.deadline.map(|deadline| {
            deadline.saturating_duration_since(now)
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn test_starts_idle() {
        let mut scheduler = RefreshScheduler::new();
        assert!(!scheduler.is_pending());
        assert!(!scheduler.fire_due(Instant::now()));
    }

    #[test]
    fn test_edit_arms_deadline() {
        let mut scheduler = RefreshScheduler::new();
        let t0 = Instant::now();
        scheduler.note_edit(t0);
        assert!(scheduler.is_pending());
        assert!(!scheduler.fire_due(t0 + 100 * MS));
        assert!(scheduler.fire_due(t0 + 300 * MS));
        assert!(!scheduler.is_pending());
    }

    #[test]
    fn test_burst_coalesces_to_one_fire() {
        let mut scheduler = RefreshScheduler::new();
        let t0 = Instant::now();

        // Five edits, each 100ms apart — all inside the quiet interval of
        // their predecessor, so only the last one counts.
        let mut fires = 0;
        for i in 0..5u32 {
            let now = t0 + i * 100 * MS;
            if scheduler.fire_due(now) {
                fires += 1;
            }
            scheduler.note_edit(now);
        }
        assert_eq!(fires, 0);

        // Quiet period after the last edit (t0+400ms) expires at t0+700ms.
        assert!(!scheduler.fire_due(t0 + 600 * MS));
        assert!(scheduler.fire_due(t0 + 700 * MS));

        // Exactly one fire per burst.
        assert!(!scheduler.fire_due(t0 + 800 * MS));
    }

    #[test]
    fn test_reedit_rearms_deadline() {
        let mut scheduler = RefreshScheduler::new();
        let t0 = Instant::now();
        scheduler.note_edit(t0);
        scheduler.note_edit(t0 + 250 * MS);
        // The original deadline (t0+300ms) was replaced.
        assert!(!scheduler.fire_due(t0 + 300 * MS));
        assert!(scheduler.fire_due(t0 + 550 * MS));
    }

    #[test]
    fn test_cancel_discards_deadline() {
        let mut scheduler = RefreshScheduler::new();
        let t0 = Instant::now();
        scheduler.note_edit(t0);
        scheduler.cancel();
        assert!(!scheduler.is_pending());
        assert!(!scheduler.fire_due(t0 + Duration::from_secs(10)));
    }

    #[test]
    fn test_time_until_due() {
        let mut scheduler = RefreshScheduler::new();
        let t0 = Instant::now();
        assert_eq!(scheduler.time_until_due(t0), None);

        scheduler.note_edit(t0);
        assert_eq!(scheduler.time_until_due(t0 + 100 * MS), Some(200 * MS));
        // Saturates at zero once due.
        assert_eq!(
            scheduler.time_until_due(t0 + 400 * MS),
            Some(Duration::ZERO)
        );
    }

    #[test]
    fn test_custom_quiet_period() {
        let mut scheduler = RefreshScheduler::with_quiet_period(50 * MS);
        let t0 = Instant::now();
        scheduler.note_edit(t0);
        assert!(scheduler.fire_due(t0 + 50 * MS));
    }
}
