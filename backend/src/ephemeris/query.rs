//! Flag string construction for the ephemeris binary.
//!
//! Builders are pure: they take already-validated values and produce a
//! [`QuerySpec`]. Validation happens when the value types are constructed,
//! because the runner splits the flag string on whitespace and a value with
//! an embedded space would corrupt the argument vector.

use super::date::normalize_birthdate;
use super::error::{EphemerisError, EphemerisResult};
use super::records::RecordKind;

/// Bodies requested for the planets query: Sun through Pluto plus the true node.
pub const PLANET_BODIES: &str = "0123456t789";

/// Field letters for the planets query: name, longitude, latitude, speed.
pub const PLANET_FIELDS: &str = "Plbs";

/// Field letters for the houses query: name, longitude.
pub const HOUSE_FIELDS: &str = "Pl";

/// Field letters for star lookups: name (two columns), longitude, latitude,
/// speed, house position, distance, magnitude.
pub const STAR_FIELDS: &str = "Plbsjw=";

/// Column separator argument.
const SEPARATOR_FLAG: &str = "-g\",\"";

/// Options that come from configuration rather than the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildOptions {
    /// Pass `-head` so the binary omits its header line.
    pub suppress_header: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            suppress_header: true,
        }
    }
}

impl BuildOptions {
    fn head_flag(&self) -> &'static str {
        if self.suppress_header {
            " -head"
        } else {
            ""
        }
    }
}

/// Date and time of the chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthMoment {
    /// Canonical `day.month.year`.
    date: String,
    utc_time: String,
}

impl BirthMoment {
    /// Normalize `birthdate` and check `utc_time` is usable as a flag value.
    pub fn new(birthdate: &str, utc_time: &str) -> EphemerisResult<Self> {
        Ok(Self {
            date: normalize_birthdate(birthdate)?,
            utc_time: flag_value("utctime", utc_time)?,
        })
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn utc_time(&self) -> &str {
        &self.utc_time
    }
}

/// Observer position. Values are passed to the binary as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    latitude: String,
    longitude: String,
    altitude: String,
}

impl Location {
    pub fn new(latitude: &str, longitude: &str, altitude: &str) -> EphemerisResult<Self> {
        Ok(Self {
            latitude: flag_value("latitude", latitude)?,
            longitude: flag_value("longitude", longitude)?,
            altitude: flag_value("altitude", altitude)?,
        })
    }

    /// `<lon>,<lat>,<alt>`, the order `-geopos` expects.
    fn geopos(&self) -> String {
        format!("{},{},{}", self.longitude, self.latitude, self.altitude)
    }
}

/// Observer-dependent parameters shared by the planets and houses queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChartSite {
    pub location: Location,
    /// Single-letter house system code, e.g. `P` for Placidus.
    pub house_system: String,
}

impl ChartSite {
    pub fn new(location: Location, house_system: &str) -> EphemerisResult<Self> {
        Ok(Self {
            location,
            house_system: flag_value("housesystem", house_system)?,
        })
    }
}

/// A complete flag string for one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuerySpec {
    pub kind: RecordKind,
    pub flags: String,
}

impl QuerySpec {
    /// Split the flag string into the argument vector.
    pub fn args(&self) -> Vec<String> {
        self.flags.split_whitespace().map(str::to_string).collect()
    }
}

/// Planet positions for the chart moment and site.
pub fn planets_query(moment: &BirthMoment, site: &ChartSite, options: BuildOptions) -> QuerySpec {
    QuerySpec {
        kind: RecordKind::Planets,
        flags: format!(
            "-b{} -utc{} -p{} -f{} -hsy{} -geopos{} {}{}",
            moment.date,
            moment.utc_time,
            PLANET_BODIES,
            PLANET_FIELDS,
            site.house_system,
            site.location.geopos(),
            SEPARATOR_FLAG,
            options.head_flag(),
        ),
    }
}

/// House cusps for the chart moment and site.
pub fn houses_query(moment: &BirthMoment, site: &ChartSite, options: BuildOptions) -> QuerySpec {
    QuerySpec {
        kind: RecordKind::Houses,
        flags: format!(
            "-house -p -f{} -b{} -utc{} -hsy{} -geopos{} {}{}",
            HOUSE_FIELDS,
            moment.date,
            moment.utc_time,
            site.house_system,
            site.location.geopos(),
            SEPARATOR_FLAG,
            options.head_flag(),
        ),
    }
}

/// Fixed star lookup for one star name (already validated by [`parse_star_list`]).
pub fn star_query(moment: &BirthMoment, star: &str, options: BuildOptions) -> QuerySpec {
    QuerySpec {
        kind: RecordKind::Star,
        flags: format!(
            "-b{} -utc{} -pf -f{} -xf{}{} {}",
            moment.date,
            moment.utc_time,
            STAR_FIELDS,
            star,
            options.head_flag(),
            SEPARATOR_FLAG,
        ),
    }
}

/// Split the `stars` parameter into names, keeping request order.
pub fn parse_star_list(stars: &str) -> EphemerisResult<Vec<String>> {
    if stars.trim().is_empty() {
        return Err(EphemerisError::invalid_parameter("stars", "no star names given"));
    }
    stars.split(',').map(|name| flag_value("stars", name)).collect()
}

/// Trim `value` and reject it if it is empty or still contains whitespace.
///
/// The content itself is not checked; a bad coordinate or house code is
/// the binary's to report. An empty value would leave a bare flag such as
/// `-utc` whose meaning depends on the binary, and a space would split one
/// value into two arguments, so both are refused before anything runs.
fn flag_value(name: &'static str, value: &str) -> EphemerisResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EphemerisError::invalid_parameter(name, "must not be empty"));
    }
    if value.chars().any(char::is_whitespace) {
        return Err(EphemerisError::invalid_parameter(
            name,
            format!("'{}' must not contain whitespace", value),
        ));
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moment() -> BirthMoment {
        BirthMoment::new("05/03/1990", "14:30").unwrap()
    }

    fn site() -> ChartSite {
        ChartSite::new(Location::new("52.52", "13.40", "34").unwrap(), "P").unwrap()
    }

    #[test]
    fn test_planets_flags() {
        let spec = planets_query(&moment(), &site(), BuildOptions::default());
        assert_eq!(spec.kind, RecordKind::Planets);
        assert_eq!(
            spec.flags,
            "-b5.3.1990 -utc14:30 -p0123456t789 -fPlbs -hsyP -geopos13.40,52.52,34 -g\",\" -head"
        );
    }

    #[test]
    fn test_houses_flags() {
        let spec = houses_query(&moment(), &site(), BuildOptions::default());
        assert_eq!(
            spec.flags,
            "-house -p -fPl -b5.3.1990 -utc14:30 -hsyP -geopos13.40,52.52,34 -g\",\" -head"
        );
    }

    #[test]
    fn test_star_flags() {
        let spec = star_query(&moment(), "Sirius", BuildOptions::default());
        assert_eq!(spec.kind, RecordKind::Star);
        assert_eq!(
            spec.flags,
            "-b5.3.1990 -utc14:30 -pf -fPlbsjw= -xfSirius -head -g\",\""
        );
    }

    #[test]
    fn test_header_flag_follows_options() {
        let options = BuildOptions {
            suppress_header: false,
        };
        let spec = planets_query(&moment(), &site(), options);
        assert!(!spec.flags.contains("-head"));
        assert!(spec.flags.ends_with("-g\",\""));
    }

    #[test]
    fn test_args_split_on_whitespace() {
        let spec = houses_query(&moment(), &site(), BuildOptions::default());
        let args = spec.args();
        assert_eq!(args.len(), 9);
        assert_eq!(args[0], "-house");
        assert_eq!(args[7], "-g\",\"");
        assert!(args.iter().all(|a| !a.contains(' ')));
    }

    #[test]
    fn test_whitespace_in_values_rejected() {
        assert!(matches!(
            BirthMoment::new("5.3.1990", "14:30 -xfSirius"),
            Err(EphemerisError::InvalidParameter { name: "utctime", .. })
        ));
        assert!(matches!(
            Location::new("52 .5", "13.4", "0"),
            Err(EphemerisError::InvalidParameter { name: "latitude", .. })
        ));
        assert!(matches!(
            ChartSite::new(Location::new("1", "2", "3").unwrap(), "P R"),
            Err(EphemerisError::InvalidParameter { name: "housesystem", .. })
        ));
    }

    #[test]
    fn test_empty_values_rejected() {
        assert!(matches!(
            BirthMoment::new("5.3.1990", "  "),
            Err(EphemerisError::InvalidParameter { name: "utctime", .. })
        ));
        assert!(matches!(
            Location::new("52.5", "13.4", ""),
            Err(EphemerisError::InvalidParameter { name: "altitude", .. })
        ));
    }

    #[test]
    fn test_value_content_passed_through() {
        let moment = BirthMoment::new("5.3.1990", "25:99").unwrap();
        let site = ChartSite::new(Location::new("north", "999", "-x").unwrap(), "Q").unwrap();
        let spec = houses_query(&moment, &site, BuildOptions::default());
        assert!(spec.flags.contains("-utc25:99"));
        assert!(spec.flags.contains("-hsyQ"));
        assert!(spec.flags.contains("-geopos999,north,-x"));
    }

    #[test]
    fn test_invalid_date_reported_before_time() {
        assert!(matches!(
            BirthMoment::new("13/13/1990", ""),
            Err(EphemerisError::InvalidDate { .. })
        ));
    }

    #[test]
    fn test_star_list_keeps_order() {
        assert_eq!(
            parse_star_list("Sirius, Polaris,Aldebaran").unwrap(),
            vec!["Sirius", "Polaris", "Aldebaran"]
        );
    }

    #[test]
    fn test_star_list_rejects_empty_entries() {
        assert!(parse_star_list("").is_err());
        assert!(parse_star_list("Sirius,,Polaris").is_err());
        assert!(parse_star_list("Alpha Centauri").is_err());
    }
}
