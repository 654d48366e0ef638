use super::ApiError;
use crate::utils::convert_duration_to_time_string;
use chrono::{DateTime, Locale, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Display format for publish dates, e.g. `8 jan 21`.
const PUBLISHED_AT_FORMAT: &str = "%-d %b %y";

/// Raw episode as served by `/episodes`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeRecord {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub description: String,
    pub file: EpisodeFile,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EpisodeFile {
    pub url: String,
    #[serde(default, rename = "type")]
    pub content_type: Option<String>,
    /// Seconds, sent either as a number or as a numeric string.
    #[serde(default)]
    pub duration: serde_json::Value,
}

/// Episode ready for display and playback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Episode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub members: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub duration: u32,
    #[serde(default)]
    pub duration_as_string: String,
    pub url: String,
    #[serde(default)]
    pub published_at: String,
    #[serde(default)]
    pub description: String,
}

impl TryFrom<EpisodeRecord> for Episode {
    type Error = ApiError;

    fn try_from(record: EpisodeRecord) -> Result<Self, Self::Error> {
        let duration = coerce_duration(&record.file.duration)?;
        let published_at = format_published_at(&record.published_at)?;

        Ok(Self {
            id: record.id,
            title: record.title,
            members: record.members,
            thumbnail: record.thumbnail,
            duration,
            duration_as_string: convert_duration_to_time_string(duration),
            url: record.file.url,
            published_at,
            description: record.description,
        })
    }
}

/// Turns `3600`, `3600.7` or `"3600"` into whole seconds.
pub fn coerce_duration(value: &serde_json::Value) -> Result<u32, ApiError> {
    let seconds = match value {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match seconds {
        Some(s) if s.is_finite() && s >= 0.0 && s <= u32::MAX as f64 => Ok(s.floor() as u32),
        _ => Err(ApiError::InvalidDuration(value.to_string())),
    }
}

fn parse_published_at(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

pub fn format_published_at(raw: &str) -> Result<String, ApiError> {
    let dt = parse_published_at(raw).ok_or_else(|| ApiError::InvalidDate(raw.to_string()))?;
    Ok(dt
        .format_localized(PUBLISHED_AT_FORMAT, Locale::pt_BR)
        .to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(duration: serde_json::Value) -> EpisodeRecord {
        serde_json::from_value(json!({
            "id": "a-importancia-da-contribuicao-em-open-source",
            "title": "A importância da contribuição em Open Source",
            "members": "Diego Fernandes, João Pedro, Diego Haz e Mayk Brito",
            "published_at": "2021-01-08 10:00:00",
            "thumbnail": "https://cdn.example/opensource.jpg",
            "description": "<p>Nesse episódio do Faladev...</p>",
            "file": {
                "url": "https://cdn.example/opensource.m4a",
                "type": "audio/x-m4a",
                "duration": duration
            }
        }))
        .expect("fixture should deserialize")
    }

    #[test]
    fn maps_record_with_string_duration() {
        let episode = Episode::try_from(record(json!("3981"))).expect("record should map");
        assert_eq!(episode.id, "a-importancia-da-contribuicao-em-open-source");
        assert_eq!(episode.duration, 3981);
        assert_eq!(episode.duration_as_string, "01:06:21");
        assert_eq!(episode.url, "https://cdn.example/opensource.m4a");
        assert_eq!(episode.published_at, "8 jan 21");
        assert_eq!(episode.description, "<p>Nesse episódio do Faladev...</p>");
    }

    #[test]
    fn maps_record_with_numeric_duration() {
        let episode = Episode::try_from(record(json!(125.9))).expect("record should map");
        assert_eq!(episode.duration, 125);
        assert_eq!(episode.duration_as_string, "00:02:05");
    }

    #[test]
    fn rejects_non_numeric_duration() {
        let err = Episode::try_from(record(json!("long"))).unwrap_err();
        assert!(matches!(err, ApiError::InvalidDuration(_)));
        assert!(matches!(
            coerce_duration(&json!(-4)),
            Err(ApiError::InvalidDuration(_))
        ));
        assert!(matches!(
            coerce_duration(&serde_json::Value::Null),
            Err(ApiError::InvalidDuration(_))
        ));
    }

    #[test]
    fn formats_dates_in_portuguese() {
        assert_eq!(format_published_at("2021-01-08 10:00:00").unwrap(), "8 jan 21");
        assert_eq!(format_published_at("2021-02-19T19:00:00Z").unwrap(), "19 fev 21");
        assert_eq!(format_published_at("2020-12-01").unwrap(), "1 dez 20");
        assert!(matches!(
            format_published_at("yesterday"),
            Err(ApiError::InvalidDate(_))
        ));
    }

    #[test]
    fn episode_round_trips_through_cache_json() {
        let episode = Episode::try_from(record(json!("60"))).expect("record should map");
        let bytes = serde_json::to_vec(&episode).expect("serialize");
        let back: Episode = serde_json::from_slice(&bytes).expect("deserialize");
        assert_eq!(back, episode);
    }
}
