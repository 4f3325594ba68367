//! Time and timestamp helpers.
//!
//! Hosts send timestamps in UTC. Labels are shown in the viewer's time zone
//! and language, so every label goes through a [`LabelFormat`].

use chrono::{DateTime, FixedOffset, Local, Locale};
use chrono_tz::Tz;

/// Timestamp as sent by the host, keeping the offset it was emitted with.
pub type Timestamp = DateTime<FixedOffset>;

/// Parse an RFC 3339 timestamp (`2024-05-01T06:12:00+02:00`).
///
/// Returns `None` for anything the host did not format as RFC 3339.
#[must_use]
pub fn parse(value: &str) -> Option<Timestamp> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// Locale for a host language tag (`fr`, `en-GB`, `de_DE`).
///
/// A bare language is tried as `xx_XX`; anything unknown gives `en_US`.
#[must_use]
pub fn locale(language: &str) -> Locale {
    let tag = language.trim().replace('-', "_");
    if let Ok(locale) = Locale::try_from(tag.as_str()) {
        return locale;
    }
    let lang = tag
        .split('_')
        .next()
        .unwrap_or_default()
        .to_ascii_lowercase();
    let guess = format!("{lang}_{}", lang.to_ascii_uppercase());
    Locale::try_from(guess.as_str()).unwrap_or(Locale::en_US)
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Zone {
    Named(Tz),
    /// The machine's own zone.
    Local,
}

/// Formats timestamps for display in one time zone and language.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LabelFormat {
    zone: Zone,
    locale: Locale,
}

impl LabelFormat {
    /// Format for `language` in the IANA zone `time_zone`.
    ///
    /// A missing or unknown zone falls back to the machine's local zone.
    #[must_use]
    pub fn new(language: &str, time_zone: Option<&str>) -> Self {
        let zone = time_zone
            .and_then(|name| name.parse::<Tz>().ok())
            .map_or(Zone::Local, Zone::Named);
        Self {
            zone,
            locale: locale(language),
        }
    }

    fn format(&self, ts: &Timestamp, pattern: &str) -> String {
        match self.zone {
            Zone::Named(tz) => ts
                .with_timezone(&tz)
                .format_localized(pattern, self.locale)
                .to_string(),
            Zone::Local => ts
                .with_timezone(&Local)
                .format_localized(pattern, self.locale)
                .to_string(),
        }
    }

    /// Two-digit `HH:MM` clock time.
    #[must_use]
    pub fn clock_time(&self, ts: &Timestamp) -> String {
        self.format(ts, "%H:%M")
    }

    /// Abbreviated weekday name (`Thu`, `jeu.`).
    #[must_use]
    pub fn short_weekday(&self, ts: &Timestamp) -> String {
        self.format(ts, "%a")
    }
}
