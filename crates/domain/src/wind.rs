//! Wind direction — bearings and the 16-point compass.

use serde::{Deserialize, Serialize};

/// Width of one compass sector in degrees.
const SECTOR_WIDTH: f64 = 22.5;

/// The sixteen compass labels, clockwise from north.
pub const COMPASS_LABELS: [&str; 16] = [
    "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW", "NW",
    "NNW",
];

/// One of the sixteen compass points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompassPoint(usize);

impl CompassPoint {
    /// Look up a compass point by its label (`"NNE"`).
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        COMPASS_LABELS
            .iter()
            .position(|candidate| *candidate == label)
            .map(Self)
    }

    /// Nearest compass point to a bearing in degrees.
    ///
    /// Any finite value is accepted: it is wrapped into `[0, 360)` first, so
    /// `359.9` and `-0.1` both land on north. Returns `None` for NaN and
    /// infinities.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "the wrapped value is in [0, 16.5) so the cast is exact"
    )]
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let wrapped = degrees.rem_euclid(360.0);
        let sector = ((wrapped + SECTOR_WIDTH / 2.0) / SECTOR_WIDTH) as usize;
        Some(Self(sector % COMPASS_LABELS.len()))
    }

    /// The label of this point (`"SW"`).
    #[must_use]
    pub fn label(self) -> &'static str {
        COMPASS_LABELS[self.0]
    }

    /// Centre of this point's sector in degrees.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn degrees(self) -> f64 {
        self.0 as f64 * SECTOR_WIDTH
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Wind bearing as weather providers report it: either degrees or a label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WindBearing {
    Degrees(f64),
    Label(String),
}

impl WindBearing {
    /// Nearest compass label for this bearing.
    ///
    /// Labels pass through unchanged. Numeric strings (`"190"`) are read as
    /// degrees. Anything else has no compass label.
    #[must_use]
    pub fn compass_label(&self) -> Option<&'static str> {
        self.compass_point().map(CompassPoint::label)
    }

    /// Rotation of the forecast wind arrow in degrees.
    #[must_use]
    pub fn rotation_degrees(&self) -> Option<f64> {
        match self {
            Self::Degrees(degrees) => degrees.is_finite().then_some(*degrees),
            Self::Label(label) => CompassPoint::from_label(label)
                .map(CompassPoint::degrees)
                .or_else(|| label.trim().parse::<f64>().ok().filter(|d| d.is_finite())),
        }
    }

    fn compass_point(&self) -> Option<CompassPoint> {
        match self {
            Self::Degrees(degrees) => CompassPoint::from_degrees(*degrees),
            Self::Label(label) => CompassPoint::from_label(label).or_else(|| {
                label
                    .trim()
                    .parse::<f64>()
                    .ok()
                    .and_then(CompassPoint::from_degrees)
            }),
        }
    }
}

impl From<f64> for WindBearing {
    fn from(degrees: f64) -> Self {
        Self::Degrees(degrees)
    }
}

impl From<&str> for WindBearing {
    fn from(label: &str) -> Self {
        Self::Label(label.to_string())
    }
}

/// Nearest 16-point compass label for `bearing`.
#[must_use]
pub fn compass_label(bearing: &WindBearing) -> Option<&'static str> {
    bearing.compass_label()
}
