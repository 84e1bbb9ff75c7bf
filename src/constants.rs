//! Endpoints, selector templates and per-horizon field schemas.
//!
//! Selector templates may embed the `UNIT_TEMP` / `UNIT_PRESSURE` /
//! `UNIT_WIND` placeholders, resolved against the client's unit
//! selection before use (see [`crate::extract::selector`]).

use crate::extract::fields::{FieldDefault, FieldDescriptor};

// =============================================================================
// Endpoints
// =============================================================================

/// Base hosts, one per site language.
pub const BASE_RU: &str = "https://www.gismeteo.ru";
pub const BASE_EN: &str = "https://www.gismeteo.com/en";

/// City search endpoint; the city name and a result limit are appended.
pub const SEARCH: &str = "https://www.gismeteo.ru/mq/search/";

/// Number of candidates requested from the search endpoint.
pub const SEARCH_LIMIT: u8 = 9;

/// Per-horizon path suffixes appended to the city uri.
pub mod endpoint {
    pub const NOW: &str = "now/";
    pub const TODAY: &str = "";
    pub const TOMORROW: &str = "tomorrow/";
    pub const TEN_DAYS: &str = "10-days/";
    pub const TWO_WEEKS: &str = "2-weeks/";
    pub const MONTH: &str = "month/";
}

// =============================================================================
// Unit placeholders and date markers
// =============================================================================

/// Placeholders substituted by selector templating.
pub const UNIT_TEMP_PLACEHOLDER: &str = "UNIT_TEMP";
pub const UNIT_PRESSURE_PLACEHOLDER: &str = "UNIT_PRESSURE";
pub const UNIT_WIND_PLACEHOLDER: &str = "UNIT_WIND";

/// Separator phrases preceding the absolute timestamp inside hourly
/// `title` attributes, e.g. `"Местное время: 03:00, UTC: 2024-03-01 00:00:00"`.
pub const UTC_SEPARATORS: [&str; 2] = [", UTC: ", ", UTC "];

/// Layout of the timestamp that follows a UTC separator.
pub const UTC_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Delimiter between weekday and date in ten-day date labels ("сб, 30 янв").
pub const DATE_LABEL_DELIMITER: &str = ", ";

// =============================================================================
// Selector templates
// =============================================================================

/// Selectors for the current-conditions page.
pub mod now {
    pub const TEMP: &str = "div.now-weather span.unit.UNIT_TEMP";
    pub const TEMP_FEELS: &str = "div.now-feel span.unit.UNIT_TEMP";
    pub const WIND_SPEED: &str = "div.now-info-item.wind div.item-value span.unit.UNIT_WIND";
    pub const WIND_DIR: &str = "div.now-info-item.wind div.item-value span.unit.UNIT_WIND";
    pub const PRESSURE: &str = "div.now-info-item.pressure div.item-value span.unit.UNIT_PRESSURE";
    pub const HUMIDITY: &str = "div.now-info-item.humidity div.item-value";
    pub const SUMMARY: &str = "div.now-desc";
    pub const GEOMAGNETIC: &str = "div.now-info-item.geomagnetic div.item-value";
    pub const WATER: &str = "div.now-info-item.water span.unit.UNIT_TEMP";
    pub const SUNRISE: &str = "div.now-info-item.sunrise div.item-value";
    pub const SUNSET: &str = "div.now-info-item.sunset div.item-value";
    pub const IMAGE: &str = "div.now-bg";
}

/// Selectors shared by the hourly pages (today, tomorrow, ten days).
pub mod hourly {
    pub const TIME: &str = "div.widget-row-time > span";
    pub const DATE: &str = "div.widget-row-days-date > div.date";
    pub const TEMP: &str = "div.widget-row-chart-temperature-air span.unit.UNIT_TEMP";
    pub const PRESSURE: &str = "div.widget-row-pressure span.unit.UNIT_PRESSURE";
    pub const WIND_SPEED: &str = "div.widget-row-wind-speed span.unit.UNIT_WIND";
    pub const WIND_GUST: &str = "div.widget-row-wind-gust span.unit.UNIT_WIND";
    pub const WIND_DIR: &str = "div.widget-row-wind-direction div.direction";
    pub const PRECIPITATION: &str = "div.widget-row-precipitation-bars div.item-unit";
    pub const HUMIDITY: &str = "div.widget-row-humidity div.item-unit";
    pub const SUMMARY: &str = "div.widget-row-icon div.weather-icon";
    pub const GEOMAGNETIC: &str = "div.widget-row-geomagnetic div.item-unit";
    pub const ROADS: &str = "div.widget-row-roads div.road-condition";
    pub const POLLEN_BIRCH: &str = "div.widget-row-pollen-birch div.item-unit";
    pub const POLLEN_GRASS: &str = "div.widget-row-pollen-grass div.item-unit";
    pub const POLLEN_RAGWEED: &str = "div.widget-row-pollen-ragweed div.item-unit";
}

/// Selectors for the two-week daily page.
pub mod two_weeks {
    pub const DATE: &str = "div.widget-row-days-date > div.date";
    pub const TMAX: &str = "div.widget-row-chart-temperature-air div.maxt span.unit.UNIT_TEMP";
    pub const TMIN: &str = "div.widget-row-chart-temperature-air div.mint span.unit.UNIT_TEMP";
    pub const TAVG: &str = "div.widget-row-chart-temperature-avg span.unit.UNIT_TEMP";
    pub const PRESSURE: &str = "div.widget-row-pressure span.unit.UNIT_PRESSURE";
    pub const WIND_SPEED: &str = "div.widget-row-wind-speed span.unit.UNIT_WIND";
    pub const WIND_GUST: &str = "div.widget-row-wind-gust span.unit.UNIT_WIND";
    pub const WIND_DIR: &str = "div.widget-row-wind-direction div.direction";
    pub const PRECIPITATION: &str = "div.widget-row-precipitation-bars div.item-unit";
    pub const HUMIDITY: &str = "div.widget-row-humidity div.item-unit";
    pub const SUMMARY: &str = "div.widget-row-icon div.weather-icon";
    pub const GEOMAGNETIC: &str = "div.widget-row-geomagnetic div.item-unit";
    pub const ROADS: &str = "div.widget-row-roads div.road-condition";
    pub const POLLEN_BIRCH: &str = "div.widget-row-pollen-birch div.item-unit";
    pub const POLLEN_GRASS: &str = "div.widget-row-pollen-grass div.item-unit";
    pub const POLLEN_RAGWEED: &str = "div.widget-row-pollen-ragweed div.item-unit";
}

/// Selectors for the monthly outlook grid.
pub mod month {
    pub const DATE: &str = "div.widget-month div.date";
    pub const TMAX: &str = "div.widget-month div.maxt span.unit.UNIT_TEMP";
    pub const TMIN: &str = "div.widget-month div.mint span.unit.UNIT_TEMP";
}

// =============================================================================
// Field schemas
// =============================================================================

/// Columns extracted from an hourly page, in record field order
/// (the `dt` column is synthesized separately and comes first).
pub fn hourly_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("temp", hourly::TEMP),
        FieldDescriptor::text("pressure", hourly::PRESSURE),
        FieldDescriptor::text("wind_speed", hourly::WIND_SPEED),
        FieldDescriptor::text("wind_gust", hourly::WIND_GUST),
        FieldDescriptor::text("wind_dir", hourly::WIND_DIR),
        FieldDescriptor::text("precipitation", hourly::PRECIPITATION),
        FieldDescriptor::text("humidity", hourly::HUMIDITY),
        FieldDescriptor::attr("summary", hourly::SUMMARY, "data-text"),
        FieldDescriptor::text("geomagnetic", hourly::GEOMAGNETIC),
        FieldDescriptor::text_or("road_condition", hourly::ROADS, FieldDefault::Unknown),
        FieldDescriptor::text_or("pollen_birch", hourly::POLLEN_BIRCH, FieldDefault::Zero),
        FieldDescriptor::text_or("pollen_grass", hourly::POLLEN_GRASS, FieldDefault::Zero),
        FieldDescriptor::text_or(
            "pollen_ragweed",
            hourly::POLLEN_RAGWEED,
            FieldDefault::Zero,
        ),
    ]
}

/// Columns extracted from the two-week daily page.
pub fn two_weeks_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("tmax", two_weeks::TMAX),
        FieldDescriptor::text("tmin", two_weeks::TMIN),
        FieldDescriptor::text("tavg", two_weeks::TAVG),
        FieldDescriptor::text("pressure", two_weeks::PRESSURE),
        FieldDescriptor::text("wind_speed", two_weeks::WIND_SPEED),
        FieldDescriptor::text("wind_gust", two_weeks::WIND_GUST),
        FieldDescriptor::text("wind_dir", two_weeks::WIND_DIR),
        FieldDescriptor::text("precipitation", two_weeks::PRECIPITATION),
        FieldDescriptor::text("humidity", two_weeks::HUMIDITY),
        FieldDescriptor::attr("summary", two_weeks::SUMMARY, "data-text"),
        FieldDescriptor::text("geomagnetic", two_weeks::GEOMAGNETIC),
        FieldDescriptor::text_or("road_condition", two_weeks::ROADS, FieldDefault::Unknown),
        FieldDescriptor::text_or("pollen_birch", two_weeks::POLLEN_BIRCH, FieldDefault::Zero),
        FieldDescriptor::text_or("pollen_grass", two_weeks::POLLEN_GRASS, FieldDefault::Zero),
        FieldDescriptor::text_or(
            "pollen_ragweed",
            two_weeks::POLLEN_RAGWEED,
            FieldDefault::Zero,
        ),
    ]
}

/// Columns extracted from the monthly outlook.
pub fn month_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::text("tmax", month::TMAX),
        FieldDescriptor::text("tmin", month::TMIN),
    ]
}
