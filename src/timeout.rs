// Clear-at timestamp math for the "Delete status after" picker. Options are
// computed relative to the local clock at render time; a stored value that
// matches none of the fixed options gets a synthesized "custom" entry.

use std::fmt;

use chrono::{DateTime, Datelike, Local, LocalResult, NaiveTime, TimeZone, Timelike, Weekday};

const SECONDS_PER_DAY: i64 = 24 * 60 * 60;

pub const NEVER: &str = "never";
const THIRTY_MINUTES: &str = "30 minutes";
const ONE_HOUR: &str = "1 hour";
const FOUR_HOURS: &str = "4 hours";
const TODAY: &str = "today";
const THIS_WEEK: &str = "this week";

/// Keys accepted by `--timeout`, in picker order.
pub const TIMEOUT_KEYS: [&str; 6] = [NEVER, THIRTY_MINUTES, ONE_HOUR, FOUR_HOURS, TODAY, THIS_WEEK];

/// One entry of the timeout picker: a human label and the unix timestamp the
/// server receives as `clearAt` (0 means "never auto-clears").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeoutOption {
    pub label: String,
    pub value: i64,
}

/// Picker options relative to the current local time. `existing` is the
/// pre-fill value; when it matches no fixed option a `custom (<datetime>)`
/// entry is appended so the pre-fill stays selectable.
pub fn timeout_options(existing: Option<i64>) -> Vec<TimeoutOption> {
    timeout_options_at(&Local::now(), existing)
}

/// Resolve a `--timeout` key to its clear-at value, relative to now.
/// Returns `None` for keys outside [`TIMEOUT_KEYS`].
pub fn clear_at_for_key(key: &str) -> Option<i64> {
    clear_at_for_key_at(key, &Local::now())
}

pub(crate) fn timeout_options_at<Tz: TimeZone>(
    now: &DateTime<Tz>,
    existing: Option<i64>,
) -> Vec<TimeoutOption>
where
    Tz::Offset: fmt::Display,
{
    let now_ts = now.timestamp();
    let midnight = start_of_today(now);
    let days_until_sunday = days_until_end_of_sunday(now.weekday());

    let mut options = vec![
        TimeoutOption {
            label: NEVER.to_string(),
            value: 0,
        },
        TimeoutOption {
            label: THIRTY_MINUTES.to_string(),
            value: now_ts + 30 * 60,
        },
        TimeoutOption {
            label: ONE_HOUR.to_string(),
            value: now_ts + 60 * 60,
        },
        TimeoutOption {
            label: FOUR_HOURS.to_string(),
            value: now_ts + 4 * 60 * 60,
        },
        TimeoutOption {
            label: TODAY.to_string(),
            value: midnight + SECONDS_PER_DAY,
        },
        TimeoutOption {
            label: THIS_WEEK.to_string(),
            value: midnight + days_until_sunday * SECONDS_PER_DAY,
        },
    ];

    if let Some(value) = existing {
        if !options.iter().any(|option| option.value == value) {
            let label = match now.timezone().timestamp_opt(value, 0).single() {
                Some(when) => format!("custom ({})", when.format("%Y-%m-%d %H:%M:%S %z")),
                None => format!("custom ({value})"),
            };
            options.push(TimeoutOption { label, value });
        }
    }

    options
}

pub(crate) fn clear_at_for_key_at<Tz: TimeZone>(key: &str, now: &DateTime<Tz>) -> Option<i64>
where
    Tz::Offset: fmt::Display,
{
    timeout_options_at(now, None)
        .into_iter()
        .find(|option| option.label == key)
        .map(|option| option.value)
}

/// Days from today's midnight until the end of the coming Sunday, i.e. until
/// Monday 00:00. A status cleared "this week" survives through Sunday night.
pub(crate) fn days_until_end_of_sunday(weekday: Weekday) -> i64 {
    let weekday = i64::from(weekday.num_days_from_sunday());
    if weekday == 0 {
        1
    } else {
        7 - weekday + 1
    }
}

fn start_of_today<Tz: TimeZone>(now: &DateTime<Tz>) -> i64 {
    let midnight = now.date_naive().and_time(NaiveTime::MIN);
    match now.timezone().from_local_datetime(&midnight) {
        LocalResult::Single(start) => start.timestamp(),
        // A DST fall-back repeats midnight; take the earlier instant.
        LocalResult::Ambiguous(start, _) => start.timestamp(),
        // A DST spring-forward can skip midnight entirely.
        LocalResult::None => now.timestamp() - i64::from(now.time().num_seconds_from_midnight()),
    }
}
