use chrono::{DateTime, Duration, Utc};

/// A single deferred state transition: "after D, perform T"
///
/// The timer is owned by the session it drives. Scheduling replaces whatever
/// was pending, cancelling drops it, and a dropped session takes its timer with
/// it, so a stale transition can never fire against a finished game.
#[derive(Debug, Clone)]
pub struct Timer<T> {
    slot: Option<Pending<T>>,
}

#[derive(Debug, Clone)]
struct Pending<T> {
    due: DateTime<Utc>,
    transition: T,
}

impl<T> Default for Timer<T> {
    fn default() -> Self {
        Timer { slot: None }
    }
}

impl<T> Timer<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: DateTime<Utc>, after: Duration, transition: T) {
        self.slot = Some(Pending {
            due: now + after,
            transition,
        });
    }

    pub fn cancel(&mut self) -> Option<T> {
        self.slot.take().map(|pending| pending.transition)
    }

    pub fn is_pending(&self) -> bool {
        self.slot.is_some()
    }

    pub fn deadline(&self) -> Option<DateTime<Utc>> {
        self.slot.as_ref().map(|pending| pending.due)
    }

    /// Takes the pending transition if it is due at `now`
    pub fn poll(&mut self, now: DateTime<Utc>) -> Option<T> {
        if self.slot.as_ref().is_some_and(|pending| pending.due <= now) {
            self.cancel()
        } else {
            None
        }
    }
}
