//! Data Transfer Objects for the HTTP API.
//!
//! Query structs take every parameter as optional so that a missing one
//! becomes a JSON `BAD_REQUEST` body instead of axum's plain-text rejection.

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::ephemeris::{ChartRequest, StarRequest};

/// Query parameters for `/run-planets` and `/run-houses`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartQuery {
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub utctime: Option<String>,
    #[serde(default)]
    pub latitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub altitude: Option<String>,
    #[serde(default)]
    pub housesystem: Option<String>,
}

impl ChartQuery {
    pub fn into_request(self) -> Result<ChartRequest, AppError> {
        Ok(ChartRequest {
            birthdate: required("birthdate", self.birthdate)?,
            utctime: required("utctime", self.utctime)?,
            latitude: required("latitude", self.latitude)?,
            longitude: required("longitude", self.longitude)?,
            altitude: required("altitude", self.altitude)?,
            housesystem: required("housesystem", self.housesystem)?,
        })
    }
}

/// Query parameters for `/run-star`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StarsQuery {
    #[serde(default)]
    pub birthdate: Option<String>,
    #[serde(default)]
    pub utctime: Option<String>,
    /// Comma-separated star names
    #[serde(default)]
    pub stars: Option<String>,
}

impl StarsQuery {
    pub fn into_request(self) -> Result<StarRequest, AppError> {
        Ok(StarRequest {
            birthdate: required("birthdate", self.birthdate)?,
            utctime: required("utctime", self.utctime)?,
            stars: required("stars", self.stars)?,
        })
    }
}

fn required(name: &str, value: Option<String>) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest(format!("missing query parameter '{}'", name)))
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Status of the service
    pub status: String,
    /// Crate version
    pub version: String,
    /// Ephemeris binary the service invokes
    pub binary: String,
}

const BIRTHDATE_DOC: &str =
    "string (required) - Birthdate in the format of 'dd.mm.yyyy', 'dd-mm-yyyy', or 'dd/mm/yyyy'.";
const UTCTIME_DOC: &str = "string (required) - UTC time in the format of 'hh:mm'.";

/// Body of `GET /options`: the endpoints and their parameters.
pub fn options_document() -> serde_json::Value {
    let chart_parameters = serde_json::json!({
        "birthdate": BIRTHDATE_DOC,
        "utctime": UTCTIME_DOC,
        "latitude": "string (required) - Latitude in decimal format.",
        "longitude": "string (required) - Longitude in decimal format.",
        "altitude": "string (required) - Altitude in meters.",
        "housesystem": "string (required) - House system (P for Placidus, R for Regiomontanus).",
    });

    serde_json::json!({
        "endpoints": {
            "/run-planets": {
                "description": "Planet positions (name, longitude, latitude, dailySpeed).",
                "parameters": chart_parameters.clone(),
            },
            "/run-houses": {
                "description": "House cusps (name, longitude).",
                "parameters": chart_parameters,
            },
            "/run-star": {
                "description": "Fixed star positions, one lookup per listed star, in request order.",
                "parameters": {
                    "birthdate": BIRTHDATE_DOC,
                    "utctime": UTCTIME_DOC,
                    "stars": "string (required) - Comma-separated list of stars.",
                },
            },
        }
    })
}
