//! Countdown calculator for the author-reveal feature.
//!
//! Pure arithmetic over two instants; no clock access. The reveal gate in
//! [`crate::reveal`] composes this with an article's reveal date.

use serde::Serialize;

use crate::types::Timestamp;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: i64 = 60 * MS_PER_MINUTE;
const MS_PER_DAY: i64 = 24 * MS_PER_HOUR;

/// Time left until a target instant, broken into display units.
///
/// `days` through `seconds` are computed by successive integer division of
/// the millisecond delta, so reassembling them yields `total_milliseconds`
/// truncated to whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Remaining {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub total_milliseconds: i64,
}

/// Compute the time remaining until `target`.
///
/// Returns `None` when `target <= now` (the countdown is over).
pub fn remaining(target: Timestamp, now: Timestamp) -> Option<Remaining> {
    let delta = (target - now).num_milliseconds();
    if delta <= 0 {
        return None;
    }

    let days = delta / MS_PER_DAY;
    let rem = delta % MS_PER_DAY;
    let hours = rem / MS_PER_HOUR;
    let rem = rem % MS_PER_HOUR;
    let minutes = rem / MS_PER_MINUTE;
    let rem = rem % MS_PER_MINUTE;
    let seconds = rem / MS_PER_SECOND;

    Some(Remaining {
        days,
        hours,
        minutes,
        seconds,
        total_milliseconds: delta,
    })
}

impl Remaining {
    /// Long human-readable form: non-zero units largest to smallest,
    /// space separated and pluralized. Seconds are omitted entirely when
    /// at least one full day remains. Falls back to `"0 seconds"`.
    pub fn format_long(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if self.days > 0 {
            parts.push(plural(self.days, "day"));
        }
        if self.hours > 0 {
            parts.push(plural(self.hours, "hour"));
        }
        if self.minutes > 0 {
            parts.push(plural(self.minutes, "minute"));
        }
        if self.seconds > 0 && self.days == 0 {
            parts.push(plural(self.seconds, "second"));
        }

        if parts.is_empty() {
            "0 seconds".to_string()
        } else {
            parts.join(" ")
        }
    }

    /// Compact form with unit suffixes (`3d 4h 10m 2s`), zero units
    /// omitted. Falls back to `"0s"`.
    pub fn format_short(&self) -> String {
        let mut parts = Vec::with_capacity(4);
        if self.days > 0 {
            parts.push(format!("{}d", self.days));
        }
        if self.hours > 0 {
            parts.push(format!("{}h", self.hours));
        }
        if self.minutes > 0 {
            parts.push(format!("{}m", self.minutes));
        }
        if self.seconds > 0 {
            parts.push(format!("{}s", self.seconds));
        }

        if parts.is_empty() {
            "0s".to_string()
        } else {
            parts.join(" ")
        }
    }
}

fn plural(n: i64, unit: &str) -> String {
    if n == 1 {
        format!("1 {unit}")
    } else {
        format!("{n} {unit}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone, Utc};

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn none_when_target_in_the_past() {
        assert_eq!(remaining(now() - Duration::seconds(1), now()), None);
    }

    #[test]
    fn none_when_target_equals_now() {
        assert_eq!(remaining(now(), now()), None);
    }

    #[test]
    fn splits_delta_into_units() {
        let target = now()
            + Duration::days(2)
            + Duration::hours(3)
            + Duration::minutes(4)
            + Duration::seconds(5);
        let r = remaining(target, now()).unwrap();
        assert_eq!(r.days, 2);
        assert_eq!(r.hours, 3);
        assert_eq!(r.minutes, 4);
        assert_eq!(r.seconds, 5);
    }

    #[test]
    fn units_reassemble_to_whole_second_delta() {
        let target = now() + Duration::milliseconds(93_784_567);
        let r = remaining(target, now()).unwrap();
        let reassembled =
            ((r.days * 24 * 3600) + (r.hours * 3600) + (r.minutes * 60) + r.seconds) * 1000;
        assert_eq!(
            reassembled,
            r.total_milliseconds - (r.total_milliseconds % 1000)
        );
        assert_eq!(r.total_milliseconds, 93_784_567);
    }

    #[test]
    fn sub_second_delta_has_all_zero_units() {
        let r = remaining(now() + Duration::milliseconds(400), now()).unwrap();
        assert_eq!((r.days, r.hours, r.minutes, r.seconds), (0, 0, 0, 0));
        assert_eq!(r.total_milliseconds, 400);
    }

    #[test]
    fn long_form_lists_nonzero_units() {
        let target = now() + Duration::hours(3) + Duration::seconds(5);
        let r = remaining(target, now()).unwrap();
        assert_eq!(r.format_long(), "3 hours 5 seconds");
    }

    #[test]
    fn long_form_omits_seconds_when_days_remain() {
        let target = now() + Duration::days(1) + Duration::seconds(30);
        let r = remaining(target, now()).unwrap();
        assert_eq!(r.format_long(), "1 day");
    }

    #[test]
    fn long_form_singular_units() {
        let target = now() + Duration::minutes(1) + Duration::seconds(1);
        let r = remaining(target, now()).unwrap();
        assert_eq!(r.format_long(), "1 minute 1 second");
    }

    #[test]
    fn long_form_zero_fallback() {
        let r = remaining(now() + Duration::milliseconds(250), now()).unwrap();
        assert_eq!(r.format_long(), "0 seconds");
    }

    #[test]
    fn short_form_omits_zero_units() {
        let target = now() + Duration::days(2) + Duration::minutes(10);
        let r = remaining(target, now()).unwrap();
        assert_eq!(r.format_short(), "2d 10m");
    }

    #[test]
    fn short_form_zero_fallback() {
        let r = remaining(now() + Duration::milliseconds(900), now()).unwrap();
        assert_eq!(r.format_short(), "0s");
    }
}
