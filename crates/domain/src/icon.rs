//! Weather icons — condition code to animated SVG.

/// Icon set used when the card configuration does not override it.
pub const DEFAULT_ICON_BASE_URL: &str =
    "https://cdn.jsdelivr.net/gh/avee87/weather-card/dist/icons_new/";

/// Slug used for condition codes the icon set does not know.
pub const UNKNOWN_ICON: &str = "unknown";

fn day_slug(condition: &str) -> Option<&'static str> {
    let slug = match condition {
        "clear" | "sunny" => "clear-day",
        "clear-night" => "clear-night",
        "cloudy" => "cloudy",
        "fog" => "fog",
        "hail" => "hail",
        "lightning" => "thunderstorms",
        "lightning-rainy" => "thunderstorms-rain",
        "partlycloudy" => "partly-cloudy-day",
        "pouring" => "extreme-rain",
        "rainy" => "rain",
        "snowy" => "snow",
        "snowy-rainy" => "sleet",
        "windy" | "windy-variant" => "wind",
        "exceptional" => "!!",
        _ => return None,
    };
    Some(slug)
}

fn night_slug(condition: &str) -> Option<&'static str> {
    match condition {
        "clear" | "sunny" => Some("clear-night"),
        "partlycloudy" => Some("partly-cloudy-night"),
        other => day_slug(other),
    }
}

/// Icon slug for a condition code, without base URL or extension.
///
/// Codes are matched case-insensitively; unknown codes map to
/// [`UNKNOWN_ICON`].
#[must_use]
pub fn icon_slug(condition: &str, is_night: bool) -> &'static str {
    let condition = condition.to_lowercase();
    let slug = if is_night {
        night_slug(&condition)
    } else {
        day_slug(&condition)
    };
    slug.unwrap_or(UNKNOWN_ICON)
}

/// Full icon URL for a condition code.
///
/// `base_url` overrides [`DEFAULT_ICON_BASE_URL`] and is used verbatim, so it
/// must carry its own trailing slash.
#[must_use]
pub fn icon(condition: &str, is_night: bool, base_url: Option<&str>) -> String {
    format!(
        "{}{}.svg",
        base_url.unwrap_or(DEFAULT_ICON_BASE_URL),
        icon_slug(condition, is_night)
    )
}
