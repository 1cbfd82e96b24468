//! Site timezone lookup
//!
//! The weather service maps coordinates to an IANA timezone name. The UTC
//! offsets are then computed locally for two reference dates of the current
//! year: December 21 (standard time in the northern hemisphere) and June 21
//! (daylight time). Southern hemisphere zones therefore report their
//! summer offset as `standard_offset`.

use chrono::{Datelike, Local, NaiveDate, Offset, TimeZone};
use chrono_tz::Tz;
use networking::HttpClient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt::Display;

use crate::{Result, ServiceError};

/// Default weather service root
pub const WEATHER_SERVICE_ROOT: &str = "https://api.weather.gov";

/// Timezone of a site with its UTC offsets in hours
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimezoneInfo {
    /// IANA timezone name
    pub timezone: String,
    /// UTC offset on December 21
    pub standard_offset: f64,
    /// UTC offset on June 21
    pub daylight_offset: f64,
}

impl TimezoneInfo {
    /// Whether the zone shifts its offset between the reference dates
    pub fn observes_dst(&self) -> bool {
        self.standard_offset != self.daylight_offset
    }
}

/// Look up a site's timezone and UTC offsets from its coordinates
///
/// Coordinates are formatted with `Display` into the `points/{lat},{lon}`
/// path, so string coordinates pass through untouched. Unlike the guarded
/// GET, network and decode faults here are returned as errors.
pub async fn site_timezone_offset(
    client: &HttpClient,
    weather_service_root: &str,
    latitude: impl Display,
    longitude: impl Display,
) -> Result<TimezoneInfo> {
    let path = format!("points/{},{}", latitude, longitude);
    let target = networking::join_url(weather_service_root, Some(&path))?;

    let point: Value = client.get_json(target).await?;
    let tz_name = point
        .get("properties")
        .and_then(|properties| properties.get("timeZone"))
        .and_then(Value::as_str)
        .ok_or(ServiceError::MissingTimezone)?;

    zone_offsets(tz_name, Local::now().year())
}

/// Compute standard and daylight UTC offsets of a zone for a year
///
/// Offsets are taken at local midnight on December 21 and June 21.
pub fn zone_offsets(tz_name: &str, year: i32) -> Result<TimezoneInfo> {
    let tz: Tz = tz_name
        .parse()
        .map_err(|_| ServiceError::UnknownTimezone(tz_name.to_string()))?;

    Ok(TimezoneInfo {
        timezone: tz_name.to_string(),
        standard_offset: offset_hours(tz, year, 12, 21)?,
        daylight_offset: offset_hours(tz, year, 6, 21)?,
    })
}

/// UTC offset in hours at local midnight of a date
fn offset_hours(tz: Tz, year: i32, month: u32, day: u32) -> Result<f64> {
    let invalid = || ServiceError::InvalidLocalTime {
        timezone: tz.name().to_string(),
        date: format!("{:04}-{:02}-{:02}", year, month, day),
    };

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;

    // midnight can fall in a DST gap for zones that switch at 00:00
    let local = tz
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            date.and_hms_opt(1, 0, 0)
                .and_then(|one_am| tz.from_local_datetime(&one_am).earliest())
        })
        .ok_or_else(invalid)?;

    let seconds = local.offset().fix().local_minus_utc();
    Ok(f64::from(seconds) / 3600.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_with_dst() {
        let info = zone_offsets("America/New_York", 2024).unwrap();
        assert_eq!(info.timezone, "America/New_York");
        assert_eq!(info.standard_offset, -5.0);
        assert_eq!(info.daylight_offset, -4.0);
        assert!(info.observes_dst());
    }

    #[test]
    fn test_zone_without_dst() {
        let info = zone_offsets("America/Phoenix", 2024).unwrap();
        assert_eq!(info.standard_offset, -7.0);
        assert_eq!(info.daylight_offset, -7.0);
        assert!(!info.observes_dst());

        let info = zone_offsets("Pacific/Honolulu", 2024).unwrap();
        assert_eq!(info.standard_offset, -10.0);
        assert_eq!(info.daylight_offset, -10.0);
    }

    #[test]
    fn test_fractional_offsets() {
        let info = zone_offsets("Asia/Kolkata", 2024).unwrap();
        assert_eq!(info.standard_offset, 5.5);
        assert_eq!(info.daylight_offset, 5.5);

        let info = zone_offsets("America/St_Johns", 2024).unwrap();
        assert_eq!(info.standard_offset, -3.5);
        assert_eq!(info.daylight_offset, -2.5);
    }

    #[test]
    fn test_southern_hemisphere_reference_dates() {
        let info = zone_offsets("Australia/Sydney", 2024).unwrap();
        assert_eq!(info.standard_offset, 11.0);
        assert_eq!(info.daylight_offset, 10.0);
    }

    #[test]
    fn test_current_year_matches_dst_rule() {
        let year = Local::now().year();
        let info = zone_offsets("America/Chicago", year).unwrap();
        assert_eq!(info.standard_offset, -6.0);
        assert_eq!(info.daylight_offset, -5.0);
    }

    #[test]
    fn test_unknown_zone() {
        let result = zone_offsets("America/Atlantis", 2024);
        assert!(matches!(result, Err(ServiceError::UnknownTimezone(name)) if name == "America/Atlantis"));
    }

    #[test]
    fn test_serialized_field_names() {
        let info = zone_offsets("UTC", 2024).unwrap();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"timezone": "UTC", "standard_offset": 0.0, "daylight_offset": 0.0})
        );
    }
}
