use chrono::{DateTime, Duration, NaiveDate, Utc};
use std::sync::Mutex;

/// Source of "now" for profiles, results and game timers
///
/// Everything that stamps a date or measures elapsed play time asks a provider
/// instead of calling `Utc::now()` directly, so tests and `--override-date`
/// can steer the clock.
pub trait DateProvider: Send + Sync {
    fn get_current_time(&self) -> DateTime<Utc>;
}

/// Wall clock
pub struct SystemDateProvider;

impl DateProvider for SystemDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Wall clock shifted by whole days so that it reads `override_date` at
/// construction; it keeps ticking forward across midnight
pub struct OverrideDateProvider {
    offset: Duration,
}

impl OverrideDateProvider {
    pub fn new(override_date: NaiveDate) -> Self {
        let today = Utc::now().date_naive();
        Self {
            offset: override_date.signed_duration_since(today),
        }
    }
}

impl DateProvider for OverrideDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        Utc::now() + self.offset
    }
}

/// Clock that only moves when told to
pub struct ManualDateProvider {
    now: Mutex<DateTime<Utc>>,
}

impl ManualDateProvider {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now += by;
    }

    pub fn set(&self, to: DateTime<Utc>) {
        let mut now = self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *now = to;
    }
}

impl DateProvider for ManualDateProvider {
    fn get_current_time(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
