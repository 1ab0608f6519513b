use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset, NaiveDate, NaiveTime, Utc};

/// Injectable time source
///
/// Every service that needs the current time takes a `Clock` instead of
/// calling `Utc::now()` directly, so the deterministic daily pick and the
/// undo-window expiry can be tested with a controlled clock.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock backed by the system time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Settable clock for tests and simulations
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    pub fn set(&self, now: DateTime<Utc>) {
        if let Ok(mut guard) = self.now.lock() {
            *guard = now;
        }
    }

    pub fn advance(&self, by: Duration) {
        if let Ok(mut guard) = self.now.lock() {
            *guard += by;
        }
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        self.now.lock().map(|guard| *guard).unwrap_or_else(|e| *e.into_inner())
    }
}

/// The local calendar date for an instant in the given timezone
pub fn today_in(now: DateTime<Utc>, tz: FixedOffset) -> NaiveDate {
    now.with_timezone(&tz).date_naive()
}

/// The UTC instant of local midnight at the start of the given date
pub fn start_of_day(date: NaiveDate, tz: FixedOffset) -> DateTime<Utc> {
    let naive_midnight = date.and_time(NaiveTime::MIN);
    let utc_naive = naive_midnight - Duration::seconds(i64::from(tz.local_minus_utc()));
    DateTime::from_naive_utc_and_offset(utc_naive, Utc)
}

/// The UTC instant of the next local midnight after `now`
pub fn next_midnight(now: DateTime<Utc>, tz: FixedOffset) -> DateTime<Utc> {
    let tomorrow = today_in(now, tz) + Duration::days(1);
    start_of_day(tomorrow, tz)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Offset, TimeZone};

    fn tz_east(hours: i32) -> FixedOffset {
        FixedOffset::east_opt(hours * 3600).unwrap()
    }

    #[test]
    fn test_today_respects_offset() {
        // 23:30 UTC on Jan 1 is already Jan 2 at UTC+2
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 23, 30, 0).unwrap();
        assert_eq!(
            today_in(now, tz_east(2)),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()
        );
        assert_eq!(
            today_in(now, Utc.fix()),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn test_start_of_day_converts_back_to_utc() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
        // Midnight Jan 2 at UTC+2 is 22:00 UTC on Jan 1
        let start = start_of_day(date, tz_east(2));
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 1, 1, 22, 0, 0).unwrap());
    }

    #[test]
    fn test_next_midnight_is_after_now() {
        let now = Utc.with_ymd_and_hms(2024, 6, 15, 13, 45, 12).unwrap();
        let reset = next_midnight(now, tz_east(-5));
        assert!(reset > now);
        assert!(reset - now <= Duration::days(1));
    }

    #[test]
    fn test_manual_clock_advances() {
        let clock = ManualClock::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        clock.advance(Duration::seconds(31));
        assert_eq!(
            clock.now(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 31).unwrap()
        );
    }
}
