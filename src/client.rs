//! The gismeteo client: one public operation per forecast horizon.
//!
//! Each operation resolves the city name to its uri (single-slot
//! cache), fetches one page over the [`Transport`], then runs the pure
//! extraction pipeline: resolved selectors → columns → timestamps →
//! assembled typed rows. Extraction is all-or-nothing per horizon; the
//! only tolerated absences are the documented optional fields.

use std::sync::{LazyLock, Mutex};

use chrono::{Local, NaiveDate};
use regex::Regex;
use scraper::Html;
use serde::Deserialize;
use tracing::debug;

use crate::config::{GismeteoOptions, Lang, UnitSelection};
use crate::constants::{self, SEARCH, SEARCH_LIMIT, endpoint};
use crate::error::{GismeteoError, Result};
use crate::extract::{
    ColumnSet, ExtractMode, FieldDescriptor, Value, dates, fields, resolve_units,
};
use crate::models::{CurrentConditions, DailyForecast, HourlyForecast, MonthlyForecast};
use crate::transport::{HttpTransport, Transport};

/// Strips the `background-image: url('…')` wrapper around the
/// current-conditions backdrop url.
static IMAGE_URL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"url\('([^']+)'\)").expect("image url pattern"));

#[derive(Debug, Clone)]
struct CacheEntry {
    city: String,
    uri: String,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    data: Vec<SearchCandidate>,
}

#[derive(Deserialize)]
struct SearchCandidate {
    url: Option<String>,
}

/// Scraper client for gismeteo.com.
///
/// Unit selection and language are fixed at construction. The client is
/// cheap to share behind a reference; concurrent calls only contend on
/// the city-uri cache slot.
pub struct Gismeteo<T: Transport = HttpTransport> {
    transport: T,
    base_url: &'static str,
    units: UnitSelection,
    city_cache: Mutex<Option<CacheEntry>>,
}

impl Gismeteo<HttpTransport> {
    /// Build a client with the production HTTP transport.
    pub fn new(options: GismeteoOptions) -> Result<Self> {
        Ok(Self::with_transport(options, HttpTransport::new()?))
    }
}

impl<T: Transport> Gismeteo<T> {
    /// Build a client over a custom transport (tests, instrumentation).
    pub fn with_transport(options: GismeteoOptions, transport: T) -> Self {
        let base_url = match options.lang {
            Lang::Ru => constants::BASE_RU,
            Lang::En => constants::BASE_EN,
        };
        Self {
            transport,
            base_url,
            units: options.units(),
            city_cache: Mutex::new(None),
        }
    }

    /// Current conditions for a city.
    pub async fn get_now(&self, city: &str) -> Result<CurrentConditions> {
        let document = self.fetch_page(city, endpoint::NOW).await?;
        let today = Local::now().date_naive();
        self.extract_now(&document, today)
    }

    /// Hourly forecast for the rest of today; 8 rows on a well-formed page.
    pub async fn get_today(&self, city: &str) -> Result<Vec<HourlyForecast>> {
        let document = self.fetch_page(city, endpoint::TODAY).await?;
        self.extract_hourly(&document)
    }

    /// Hourly forecast for tomorrow; 8 rows on a well-formed page.
    pub async fn get_tomorrow(&self, city: &str) -> Result<Vec<HourlyForecast>> {
        let document = self.fetch_page(city, endpoint::TOMORROW).await?;
        self.extract_hourly(&document)
    }

    /// Ten-day forecast at 6-hour granularity, four slots per date label.
    pub async fn get_ten_days(&self, city: &str) -> Result<Vec<HourlyForecast>> {
        let document = self.fetch_page(city, endpoint::TEN_DAYS).await?;
        self.extract_ten_days(&document, Local::now().date_naive())
    }

    /// Two-week daily outlook; 14 rows on a well-formed page.
    pub async fn get_two_weeks(&self, city: &str) -> Result<Vec<DailyForecast>> {
        let document = self.fetch_page(city, endpoint::TWO_WEEKS).await?;
        self.extract_two_weeks(&document, Local::now().date_naive())
    }

    /// Monthly outlook grid; 42 rows on a well-formed page.
    pub async fn get_month(&self, city: &str) -> Result<Vec<MonthlyForecast>> {
        let document = self.fetch_page(city, endpoint::MONTH).await?;
        self.extract_month(&document, Local::now().date_naive())
    }

    // -------------------------------------------------------------------------
    // Location resolution
    // -------------------------------------------------------------------------

    /// Resolve a city name to its uri, via the single-slot cache.
    ///
    /// The slot holds the most recent (name, uri) pair only and is
    /// overwritten on every miss; the lock is never held across the
    /// resolver call.
    async fn city_uri(&self, city: &str) -> Result<String> {
        {
            let cache = self.city_cache.lock().expect("city cache lock poisoned");
            if let Some(entry) = cache.as_ref()
                && entry.city == city
            {
                debug!(city, "city uri served from cache");
                return Ok(entry.uri.clone());
            }
        }

        let url = format!("{SEARCH}{city}/{SEARCH_LIMIT}/");
        debug!(city, %url, "resolving city uri");
        let body = self.transport.get(&url).await?;
        let response: SearchResponse = serde_json::from_str(&body)?;

        let uri = response
            .data
            .into_iter()
            .next()
            .and_then(|candidate| candidate.url)
            .filter(|url| !url.is_empty())
            .ok_or_else(|| GismeteoError::city_not_found(city))?;
        let uri = format!("/{}/", uri.trim_matches('/'));

        let mut cache = self.city_cache.lock().expect("city cache lock poisoned");
        *cache = Some(CacheEntry {
            city: city.to_string(),
            uri: uri.clone(),
        });
        Ok(uri)
    }

    async fn fetch_page(&self, city: &str, endpoint: &str) -> Result<Html> {
        let uri = self.city_uri(city).await?;
        let url = format!("{}{}{}", self.base_url, uri, endpoint);
        debug!(%url, "fetching forecast page");
        let raw = self.transport.get(&url).await?;
        Ok(Html::parse_document(&prepare_html(&raw)))
    }

    // -------------------------------------------------------------------------
    // Per-horizon extraction
    // -------------------------------------------------------------------------

    fn extract_hourly(&self, document: &Html) -> Result<Vec<HourlyForecast>> {
        let titles = fields::select_strings(
            document,
            &self.resolve(constants::hourly::TIME),
            ExtractMode::Attr("title"),
        )?;
        let timestamps = titles
            .iter()
            .map(|title| dates::parse_utc_suffix(title))
            .collect::<Result<Vec<_>>>()?;

        let mut columns = ColumnSet::new();
        columns.push_timestamps("dt", timestamps);
        self.extract_columns(document, &constants::hourly_fields(), &mut columns)?;
        columns.into_records()
    }

    fn extract_ten_days(&self, document: &Html, today: NaiveDate) -> Result<Vec<HourlyForecast>> {
        let labels = fields::select_strings(
            document,
            &self.resolve(constants::hourly::DATE),
            ExtractMode::Text,
        )?;
        let timestamps = dates::quarter_days(&labels, today)?;

        let mut columns = ColumnSet::new();
        columns.push_timestamps("dt", timestamps);
        self.extract_columns(document, &constants::hourly_fields(), &mut columns)?;
        columns.into_records()
    }

    fn extract_two_weeks(&self, document: &Html, today: NaiveDate) -> Result<Vec<DailyForecast>> {
        let labels = fields::select_strings(
            document,
            &self.resolve(constants::two_weeks::DATE),
            ExtractMode::Text,
        )?;
        let timestamps = dates::sequential_days(&labels, today)?;

        let mut columns = ColumnSet::new();
        columns.push_timestamps("dt", timestamps);
        self.extract_columns(document, &constants::two_weeks_fields(), &mut columns)?;
        columns.into_records()
    }

    fn extract_month(&self, document: &Html, today: NaiveDate) -> Result<Vec<MonthlyForecast>> {
        let labels = fields::select_strings(
            document,
            &self.resolve(constants::month::DATE),
            ExtractMode::Text,
        )?;
        let timestamps = dates::sequential_days(&labels, today)?;

        let mut columns = ColumnSet::new();
        columns.push_timestamps("dt", timestamps);
        self.extract_columns(document, &constants::month_fields(), &mut columns)?;
        columns.into_records()
    }

    fn extract_now(&self, document: &Html, today: NaiveDate) -> Result<CurrentConditions> {
        let sunrise = self.require_text(document, constants::now::SUNRISE, "sunrise")?;
        let sunset = self.require_text(document, constants::now::SUNSET, "sunset")?;

        let image = fields::select_strings(
            document,
            &self.resolve(constants::now::IMAGE),
            ExtractMode::Attr("style"),
        )?
        .into_iter()
        .next()
        .and_then(|style| {
            IMAGE_URL
                .captures(&style)
                .map(|captures| captures[1].to_string())
        });

        Ok(CurrentConditions {
            temp: self.require_number(document, constants::now::TEMP, "temp")?,
            temp_feels: self.require_number(document, constants::now::TEMP_FEELS, "temp_feels")?,
            wind_speed: self.require_own_number(
                document,
                constants::now::WIND_SPEED,
                "wind_speed",
            )?,
            wind_dir: fields::last_text(document, &self.resolve(constants::now::WIND_DIR))?
                .ok_or_else(|| GismeteoError::parse("missing wind direction"))?,
            pressure: self.require_own_number(document, constants::now::PRESSURE, "pressure")?,
            humidity: self.require_number(document, constants::now::HUMIDITY, "humidity")?,
            summary: self.require_text(document, constants::now::SUMMARY, "summary")?,
            // back-filled to zero when the page omits the widget
            geomagnetic: self.number_or_zero(document, constants::now::GEOMAGNETIC)?,
            water_temp: self.number_or_zero(document, constants::now::WATER)?,
            sunrise: dates::clock_label_on(today, &sunrise)?,
            sunset: dates::clock_label_on(today, &sunset)?,
            image,
        })
    }

    // -------------------------------------------------------------------------
    // Shared extraction helpers
    // -------------------------------------------------------------------------

    /// Extract one column per descriptor; an empty result for an
    /// optional field registers its replicated default instead.
    fn extract_columns(
        &self,
        document: &Html,
        descriptors: &[FieldDescriptor],
        columns: &mut ColumnSet,
    ) -> Result<()> {
        for field in descriptors {
            let selector = self.resolve(field.selector);
            let values = fields::select_values(document, &selector, field.mode)?;
            match (field.default, values.is_empty()) {
                (Some(default), true) => columns.push_defaulted(field.name, default.value()),
                _ => columns.push(field.name, values),
            }
        }
        Ok(())
    }

    fn resolve(&self, template: &str) -> String {
        resolve_units(template, &self.units)
    }

    fn require_number(&self, document: &Html, template: &str, name: &str) -> Result<f64> {
        match fields::first_value(document, &self.resolve(template), ExtractMode::Text)? {
            Some(Value::Number(number)) => Ok(number),
            Some(Value::Text(text)) => Err(GismeteoError::parse(format!(
                "field '{name}' is not numeric: '{text}'"
            ))),
            None => Err(GismeteoError::parse(format!(
                "missing field '{name}' on current-conditions page"
            ))),
        }
    }

    /// Like [`Self::require_number`] but reads only the element's direct
    /// text nodes, for values that share a parent with their unit label.
    fn require_own_number(&self, document: &Html, template: &str, name: &str) -> Result<f64> {
        let text = fields::own_text(document, &self.resolve(template))?
            .ok_or_else(|| GismeteoError::parse(format!("missing field '{name}'")))?;
        fields::numeric_shaped(&text).ok_or_else(|| {
            GismeteoError::parse(format!("field '{name}' is not numeric: '{text}'"))
        })
    }

    fn require_text(&self, document: &Html, template: &str, name: &str) -> Result<String> {
        fields::select_strings(document, &self.resolve(template), ExtractMode::Text)?
            .into_iter()
            .next()
            .ok_or_else(|| GismeteoError::parse(format!("missing field '{name}'")))
    }

    fn number_or_zero(&self, document: &Html, template: &str) -> Result<f64> {
        match fields::first_value(document, &self.resolve(template), ExtractMode::Text)? {
            Some(Value::Number(number)) => Ok(number),
            _ => Ok(0.0),
        }
    }
}

/// Normalise raw page markup before parsing: gismeteo renders an em-dash
/// placeholder for calm wind, which would otherwise leave the wind
/// column short. It is replaced by explicit zero values for both wind
/// units, as the upstream page scripts do.
fn prepare_html(raw: &str) -> String {
    raw.replace(
        "<span>&mdash;</span>",
        "<span class=\"wind-unit unit unit_wind_m_s\">0</span>\
         <span class=\"wind-unit unit unit_wind_km_h\">0</span>",
    )
}
