//! Utility helpers for Podcastr
use chrono::{DateTime, Locale, Utc};

/// Formats whole seconds as `HH:MM:SS`, zero padded.
pub fn convert_duration_to_time_string(duration: u32) -> String {
    let hours = duration / 3600;
    let minutes = (duration % 3600) / 60;
    let seconds = duration % 60;

    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Today's date for the header, e.g. `sex, 8 janeiro`.
pub fn format_header_date(now: DateTime<Utc>) -> String {
    now.format_localized("%a, %-d %B", Locale::pt_BR).to_string()
}
