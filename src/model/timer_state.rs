use std::time::{Duration, SystemTime};

use serde_with::serde_as;
use serde_with::TimestampSeconds;

/// Wall-clock session timer with cumulative pause credit. Transitions
/// return a new value; the caller swaps it into the session.
#[serde_as]
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimerState {
    #[serde_as(as = "TimestampSeconds")]
    pub started: SystemTime,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub paused_at: Option<SystemTime>,
    pub paused_total: Duration,
    #[serde_as(as = "Option<TimestampSeconds>")]
    pub ended_at: Option<SystemTime>,
}

impl Default for TimerState {
    fn default() -> Self {
        Self {
            started: SystemTime::now(),
            paused_at: None,
            paused_total: Duration::ZERO,
            ended_at: None,
        }
    }
}

impl TimerState {
    pub fn is_paused(&self) -> bool {
        self.paused_at.is_some()
    }

    pub fn is_ended(&self) -> bool {
        self.ended_at.is_some()
    }

    /// Play time so far: frozen at `ended_at` once the game finished,
    /// frozen at `paused_at` while paused, live otherwise. Accumulated
    /// pause time never counts.
    pub fn elapsed(&self) -> Duration {
        let cutoff = self
            .ended_at
            .or(self.paused_at)
            .unwrap_or_else(SystemTime::now);
        cutoff
            .duration_since(self.started)
            .unwrap_or_default()
            .saturating_sub(self.paused_total)
    }

    pub fn paused(&self, now: SystemTime) -> TimerState {
        let mut next = self.clone();
        next.paused_at = Some(now);
        next
    }

    pub fn resumed(&self, now: SystemTime) -> TimerState {
        let mut next = self.clone();
        if let Some(paused_at) = next.paused_at.take() {
            let credit = now.duration_since(paused_at).unwrap_or_default();
            next.paused_total = next.paused_total.saturating_add(credit);
        }
        next
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut next = self.clone();
        next.ended_at = Some(now);
        next
    }
}
