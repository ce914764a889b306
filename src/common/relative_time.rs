use chrono::{DateTime, Utc};

const AVERAGE_MONTH_DAYS: f64 = 30.4375;

/// Humanized distance from `then` to `now`, e.g. "5 minutes ago".
///
/// Each unit is rounded before it is compared with the threshold for the next unit up.
/// Times after `now` read as "a few seconds ago".
pub fn from_now(
	then: DateTime<Utc>,
	now: DateTime<Utc>,
) -> String {
	let seconds = (now - then).num_milliseconds().max(0) as f64 / 1000.0;
	let in_units = |unit: f64| (seconds / unit).round() as i64;

	let elapsed_seconds = in_units(1.0);
	if elapsed_seconds <= 44 {
		return "a few seconds ago".to_string();
	}
	if elapsed_seconds <= 89 {
		return "a minute ago".to_string();
	}

	let minutes = in_units(60.0);
	if minutes <= 44 {
		return format!("{minutes} minutes ago");
	}
	if minutes <= 89 {
		return "an hour ago".to_string();
	}

	let hours = in_units(3_600.0);
	if hours <= 21 {
		return format!("{hours} hours ago");
	}
	if hours <= 35 {
		return "a day ago".to_string();
	}

	let days = in_units(86_400.0);
	if days <= 25 {
		return format!("{days} days ago");
	}
	if days <= 45 {
		return "a month ago".to_string();
	}

	let months = (days as f64 / AVERAGE_MONTH_DAYS).round() as i64;
	if months <= 10 {
		return format!("{months} months ago");
	}
	if months <= 17 {
		return "a year ago".to_string();
	}

	let years = (months as f64 / 12.0).round() as i64;
	format!("{years} years ago")
}
