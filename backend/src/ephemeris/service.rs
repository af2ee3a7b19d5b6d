//! Pipeline entry points: normalize, build, run, parse.
//!
//! The service holds no per-request state. Each call spawns its own
//! process(es) through the injected executor.

use std::sync::Arc;

use super::error::{EphemerisError, EphemerisResult};
use super::parser::{parse_houses, parse_planets, parse_stars};
use super::query::{
    houses_query, parse_star_list, planets_query, star_query, BirthMoment, BuildOptions,
    ChartSite, Location,
};
use super::records::{HouseRecord, PlanetRecord, StarRecord};
use super::runner::{run_query, ProcessExecutor};

/// Raw request values for the planets and houses queries.
#[derive(Debug, Clone, Default)]
pub struct ChartRequest {
    pub birthdate: String,
    pub utctime: String,
    pub latitude: String,
    pub longitude: String,
    pub altitude: String,
    pub housesystem: String,
}

/// Raw request values for a fixed star batch.
#[derive(Debug, Clone, Default)]
pub struct StarRequest {
    pub birthdate: String,
    pub utctime: String,
    /// Comma-separated star names.
    pub stars: String,
}

/// Runs ephemeris queries against one binary.
#[derive(Clone)]
pub struct EphemerisService {
    executor: Arc<dyn ProcessExecutor>,
    binary: String,
    options: BuildOptions,
}

impl EphemerisService {
    pub fn new(executor: Arc<dyn ProcessExecutor>, binary: impl Into<String>) -> Self {
        Self {
            executor,
            binary: binary.into(),
            options: BuildOptions::default(),
        }
    }

    pub fn with_options(mut self, options: BuildOptions) -> Self {
        self.options = options;
        self
    }

    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Planet positions for one chart.
    pub async fn planets(&self, request: &ChartRequest) -> EphemerisResult<Vec<PlanetRecord>> {
        let (moment, site) = chart_inputs(request)?;
        let query = planets_query(&moment, &site, self.options);
        let output = run_query(self.executor.as_ref(), &self.binary, &query).await?;
        parse_planets(&output)
    }

    /// House cusps for one chart.
    pub async fn houses(&self, request: &ChartRequest) -> EphemerisResult<Vec<HouseRecord>> {
        let (moment, site) = chart_inputs(request)?;
        let query = houses_query(&moment, &site, self.options);
        let output = run_query(self.executor.as_ref(), &self.binary, &query).await?;
        parse_houses(&output)
    }

    /// Look up every requested star in order and concatenate the rows.
    ///
    /// Stars run one after another. The first failure aborts the batch and
    /// nothing collected so far is returned.
    pub async fn stars(&self, request: &StarRequest) -> EphemerisResult<Vec<StarRecord>> {
        let moment = BirthMoment::new(&request.birthdate, &request.utctime)?;
        let names = parse_star_list(&request.stars)?;

        let mut records = Vec::new();
        for star in names {
            let rows = self
                .star(&moment, &star)
                .await
                .map_err(|source| EphemerisError::StarQuery {
                    star: star.clone(),
                    source: Box::new(source),
                })?;
            records.extend(rows);
        }
        Ok(records)
    }

    async fn star(&self, moment: &BirthMoment, star: &str) -> EphemerisResult<Vec<StarRecord>> {
        let query = star_query(moment, star, self.options);
        let output = run_query(self.executor.as_ref(), &self.binary, &query).await?;
        parse_stars(&output)
    }
}

fn chart_inputs(request: &ChartRequest) -> EphemerisResult<(BirthMoment, ChartSite)> {
    let moment = BirthMoment::new(&request.birthdate, &request.utctime)?;
    let location = Location::new(&request.latitude, &request.longitude, &request.altitude)?;
    let site = ChartSite::new(location, &request.housesystem)?;
    Ok((moment, site))
}
