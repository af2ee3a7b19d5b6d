//! Typed records produced from the ephemeris binary's output.
//!
//! Values stay as strings exactly as the binary printed them (after
//! quote/whitespace stripping). Numeric interpretation is left to clients.

use serde::{Deserialize, Serialize};

/// The three query kinds the service supports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecordKind {
    Planets,
    Houses,
    Star,
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            RecordKind::Planets => "planets",
            RecordKind::Houses => "houses",
            RecordKind::Star => "star",
        };
        f.write_str(name)
    }
}

/// Field layout of one output line.
#[derive(Debug, Clone, Copy)]
pub struct RecordLayout {
    pub kind: RecordKind,
    /// JSON field names, in column order. The length is the required field count.
    pub fields: &'static [&'static str],
    /// Column whose trailing unit marker is stripped, with the marker.
    pub unit_suffix: Option<(usize, char)>,
}

impl RecordLayout {
    pub fn width(&self) -> usize {
        self.fields.len()
    }
}

/// A record type that can be assembled from one parsed output line.
pub trait EphemerisRecord: Sized {
    const LAYOUT: RecordLayout;

    /// Build the record from exactly `LAYOUT.width()` cleaned values.
    fn from_fields(fields: Vec<String>) -> Self;
}

/// Position of one celestial body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanetRecord {
    pub name: String,
    pub longitude: String,
    pub latitude: String,
    pub daily_speed: String,
}

/// One house cusp or angle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRecord {
    pub name: String,
    pub longitude: String,
}

/// One fixed star lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarRecord {
    pub star_name: String,
    pub alt_name: String,
    pub longitude: String,
    pub latitude: String,
    pub speed: String,
    pub house: String,
    pub distance: String,
    /// Without the unit marker.
    pub magnitude: String,
}

/// Marker the binary appends to star magnitudes.
pub const MAGNITUDE_UNIT: char = 'm';

impl EphemerisRecord for PlanetRecord {
    const LAYOUT: RecordLayout = RecordLayout {
        kind: RecordKind::Planets,
        fields: &["name", "longitude", "latitude", "dailySpeed"],
        unit_suffix: None,
    };

    fn from_fields(fields: Vec<String>) -> Self {
        let [name, longitude, latitude, daily_speed] = take::<4>(fields);
        Self {
            name,
            longitude,
            latitude,
            daily_speed,
        }
    }
}

impl EphemerisRecord for HouseRecord {
    const LAYOUT: RecordLayout = RecordLayout {
        kind: RecordKind::Houses,
        fields: &["name", "longitude"],
        unit_suffix: None,
    };

    fn from_fields(fields: Vec<String>) -> Self {
        let [name, longitude] = take::<2>(fields);
        Self { name, longitude }
    }
}

impl EphemerisRecord for StarRecord {
    const LAYOUT: RecordLayout = RecordLayout {
        kind: RecordKind::Star,
        fields: &[
            "starName",
            "altName",
            "longitude",
            "latitude",
            "speed",
            "house",
            "distance",
            "magnitude",
        ],
        unit_suffix: Some((7, MAGNITUDE_UNIT)),
    };

    fn from_fields(fields: Vec<String>) -> Self {
        let [star_name, alt_name, longitude, latitude, speed, house, distance, magnitude] =
            take::<8>(fields);
        Self {
            star_name,
            alt_name,
            longitude,
            latitude,
            speed,
            house,
            distance,
            magnitude,
        }
    }
}

/// Move the parsed values into a fixed array. The parser guarantees the width,
/// missing trailing values would become empty strings.
fn take<const N: usize>(fields: Vec<String>) -> [String; N] {
    let mut iter = fields.into_iter();
    std::array::from_fn(|_| iter.next().unwrap_or_default())
}
