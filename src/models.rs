//! Typed forecast records returned to callers.
//!
//! All multi-row records share the column/row assembly mechanism and
//! carry a `dt` Unix timestamp (seconds, UTC instant); they differ only
//! in which named fields they hold. Numeric readings are `f64` because
//! the pages render fractional values with a comma decimal separator.

use serde::{Deserialize, Serialize};

/// Current conditions at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp: f64,
    pub temp_feels: f64,
    pub wind_speed: f64,
    pub wind_dir: String,
    pub pressure: f64,
    pub humidity: f64,
    pub summary: String,
    /// Geomagnetic activity index; `0` when the page omits it.
    pub geomagnetic: f64,
    pub water_temp: f64,
    /// Sunrise today, Unix seconds.
    pub sunrise: i64,
    /// Sunset today, Unix seconds.
    pub sunset: i64,
    /// Background image url, when the page carries one.
    pub image: Option<String>,
}

/// One slot of an hourly page (today, tomorrow) or of the ten-day
/// 6-hour-granularity page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlyForecast {
    pub dt: i64,
    pub temp: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_dir: String,
    pub precipitation: f64,
    pub summary: String,
    /// `"unknown"` when the page has no road-condition row.
    pub road_condition: String,
    pub geomagnetic: f64,
    pub pollen_birch: f64,
    pub pollen_grass: f64,
    pub pollen_ragweed: f64,
}

/// One day of the two-week outlook.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyForecast {
    pub dt: i64,
    pub tmax: f64,
    pub tmin: f64,
    pub tavg: f64,
    pub humidity: f64,
    pub pressure: f64,
    pub wind_speed: f64,
    pub wind_gust: f64,
    pub wind_dir: String,
    pub precipitation: f64,
    pub summary: String,
    pub road_condition: String,
    pub geomagnetic: f64,
    pub pollen_birch: f64,
    pub pollen_grass: f64,
    pub pollen_ragweed: f64,
}

/// One cell of the 6-week monthly outlook grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyForecast {
    pub dt: i64,
    pub tmax: f64,
    pub tmin: f64,
}
