//! End-to-end extraction tests over fixture forecast pages.
//!
//! A canned-response transport feeds the client complete pages shaped
//! like the live site, so every horizon runs its full pipeline: city
//! resolution, selector templating, field extraction, timestamp
//! reconstruction and row assembly into typed records.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{Datelike, Local, TimeZone, Utc};
use gismeteo::{
    Gismeteo, GismeteoError, GismeteoOptions, Result, TempUnit, Transport,
};

const SEARCH_URL: &str = "https://www.gismeteo.ru/mq/search/Moscow/9/";
const CITY_BASE: &str = "https://www.gismeteo.ru/weather-moscow-4368/";
const SEARCH_BODY: &str = r#"{"data":[{"url":"weather-moscow-4368"}]}"#;

struct FixtureTransport {
    pages: HashMap<String, String>,
    requests: Mutex<Vec<String>>,
}

impl FixtureTransport {
    fn new(pages: Vec<(String, String)>) -> Self {
        Self {
            pages: pages.into_iter().collect(),
            requests: Mutex::new(Vec::new()),
        }
    }
}

impl Transport for FixtureTransport {
    async fn get(&self, url: &str) -> Result<String> {
        self.requests.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| GismeteoError::parse(format!("no fixture for {url}")))
    }
}

fn client(pages: Vec<(String, String)>) -> Gismeteo<FixtureTransport> {
    let mut all = vec![(SEARCH_URL.to_string(), SEARCH_BODY.to_string())];
    all.extend(pages);
    Gismeteo::with_transport(GismeteoOptions::default(), FixtureTransport::new(all))
}

fn client_fahrenheit(pages: Vec<(String, String)>) -> Gismeteo<FixtureTransport> {
    let mut all = vec![(SEARCH_URL.to_string(), SEARCH_BODY.to_string())];
    all.extend(pages);
    Gismeteo::with_transport(
        GismeteoOptions::new().with_temp_unit(TempUnit::Fahrenheit),
        FixtureTransport::new(all),
    )
}

// -----------------------------------------------------------------------------
// Fixture page builders
// -----------------------------------------------------------------------------

fn repeat_spans(class: &str, value: &str, count: usize) -> String {
    format!("<span class=\"{class}\">{value}</span>").repeat(count)
}

fn repeat_divs(class: &str, value: &str, count: usize) -> String {
    format!("<div class=\"{class}\">{value}</div>").repeat(count)
}

/// Hourly page (today/tomorrow shape): 8 slots, absolute timestamps in
/// `title` attributes, no road or pollen rows.
fn hourly_page() -> String {
    let times: String = (0..8)
        .map(|i| {
            format!(
                "<span title=\"Местное время: {:02}:00, UTC: 2024-03-01 {:02}:00:00\">{:02}:00</span>",
                (i * 3 + 3) % 24,
                i * 3,
                (i * 3 + 3) % 24,
            )
        })
        .collect();

    format!(
        "<html><body>\
         <div class=\"widget-row-time\">{times}</div>\
         <div class=\"widget-row-chart-temperature-air\">{temp_c}{temp_f}</div>\
         <div class=\"widget-row-pressure\">{pressure}</div>\
         <div class=\"widget-row-wind-speed\">{wind}</div>\
         <div class=\"widget-row-wind-gust\">{gust}</div>\
         <div class=\"widget-row-wind-direction\">{dir}</div>\
         <div class=\"widget-row-precipitation-bars\">{precip}</div>\
         <div class=\"widget-row-humidity\">{humidity}</div>\
         <div class=\"widget-row-icon\">{icons}</div>\
         <div class=\"widget-row-geomagnetic\">{geo}</div>\
         </body></html>",
        temp_c = repeat_spans("unit unit_temperature_c", "-5", 8),
        temp_f = repeat_spans("unit unit_temperature_f", "23", 8),
        pressure = repeat_spans("unit unit_pressure_mm_hg_atm", "746", 8),
        wind = repeat_spans("unit unit_wind_m_s", "3,5", 8),
        gust = repeat_spans("unit unit_wind_m_s", "9", 8),
        dir = repeat_divs("direction", "СВ", 8),
        precip = repeat_divs("item-unit", "0,5", 8),
        humidity = repeat_divs("item-unit", "86", 8),
        icons = "<div class=\"weather-icon\" data-text=\"Пасмурно\"></div>".repeat(8),
        geo = repeat_divs("item-unit", "3", 8),
    )
}

/// Two-week page: 14 date labels, road conditions present, pollen absent.
fn two_weeks_page() -> String {
    let dates = "<div class=\"widget-row-days-date\">\
                 <div class=\"date\">30 янв</div>"
        .to_string()
        + &repeat_divs("date", "31", 13)
        + "</div>";

    let tmax = format!(
        "<div class=\"maxt\">{}</div>",
        repeat_spans("unit unit_temperature_c", "-2", 1)
    )
    .repeat(14);
    let tmin = format!(
        "<div class=\"mint\">{}</div>",
        repeat_spans("unit unit_temperature_c", "-8", 1)
    )
    .repeat(14);

    format!(
        "<html><body>\
         {dates}\
         <div class=\"widget-row-chart-temperature-air\">{tmax}{tmin}</div>\
         <div class=\"widget-row-chart-temperature-avg\">{tavg}</div>\
         <div class=\"widget-row-pressure\">{pressure}</div>\
         <div class=\"widget-row-wind-speed\">{wind}</div>\
         <div class=\"widget-row-wind-gust\">{gust}</div>\
         <div class=\"widget-row-wind-direction\">{dir}</div>\
         <div class=\"widget-row-precipitation-bars\">{precip}</div>\
         <div class=\"widget-row-humidity\">{humidity}</div>\
         <div class=\"widget-row-icon\">{icons}</div>\
         <div class=\"widget-row-geomagnetic\">{geo}</div>\
         <div class=\"widget-row-roads\">{roads}</div>\
         </body></html>",
        tavg = repeat_spans("unit unit_temperature_c", "-5", 14),
        pressure = repeat_spans("unit unit_pressure_mm_hg_atm", "752", 14),
        wind = repeat_spans("unit unit_wind_m_s", "4", 14),
        gust = repeat_spans("unit unit_wind_m_s", "11", 14),
        dir = repeat_divs("direction", "Ю", 14),
        precip = repeat_divs("item-unit", "1,2", 14),
        humidity = repeat_divs("item-unit", "79", 14),
        icons = "<div class=\"weather-icon\" data-text=\"Снег\"></div>".repeat(14),
        geo = repeat_divs("item-unit", "2", 14),
        roads = repeat_divs("road-condition", "Сухо", 14),
    )
}

/// Ten-day page: one date label per day, four 6-hour slots per label.
fn ten_days_page(days: usize) -> String {
    let slots = days * 4;
    let dates = "<div class=\"widget-row-days-date\">\
                 <div class=\"date\">чт, 30 янв</div>"
        .to_string()
        + &repeat_divs("date", "пт, 31 янв", days - 1)
        + "</div>";

    format!(
        "<html><body>\
         {dates}\
         <div class=\"widget-row-chart-temperature-air\">{temp}</div>\
         <div class=\"widget-row-pressure\">{pressure}</div>\
         <div class=\"widget-row-wind-speed\">{wind}</div>\
         <div class=\"widget-row-wind-gust\">{gust}</div>\
         <div class=\"widget-row-wind-direction\">{dir}</div>\
         <div class=\"widget-row-precipitation-bars\">{precip}</div>\
         <div class=\"widget-row-humidity\">{humidity}</div>\
         <div class=\"widget-row-icon\">{icons}</div>\
         <div class=\"widget-row-geomagnetic\">{geo}</div>\
         </body></html>",
        temp = repeat_spans("unit unit_temperature_c", "-4", slots),
        pressure = repeat_spans("unit unit_pressure_mm_hg_atm", "748", slots),
        wind = repeat_spans("unit unit_wind_m_s", "2", slots),
        gust = repeat_spans("unit unit_wind_m_s", "7", slots),
        dir = repeat_divs("direction", "З", slots),
        precip = repeat_divs("item-unit", "0", slots),
        humidity = repeat_divs("item-unit", "90", slots),
        icons = "<div class=\"weather-icon\" data-text=\"Облачно\"></div>".repeat(slots),
        geo = repeat_divs("item-unit", "1", slots),
    )
}

/// Monthly grid: 42 day cells, first carrying a full date label.
fn month_page() -> String {
    let first = "<div class=\"widget-month\">\
                 <div class=\"date\">29 янв</div>\
                 <div class=\"maxt\"><span class=\"unit unit_temperature_c\">-1</span></div>\
                 <div class=\"mint\"><span class=\"unit unit_temperature_c\">-6</span></div>\
                 </div>"
        .to_string();
    let rest = "<div class=\"widget-month\">\
                <div class=\"date\">30</div>\
                <div class=\"maxt\"><span class=\"unit unit_temperature_c\">0</span></div>\
                <div class=\"mint\"><span class=\"unit unit_temperature_c\">-5</span></div>\
                </div>"
        .repeat(41);
    format!("<html><body>{first}{rest}</body></html>")
}

/// Current-conditions page.
fn now_page() -> String {
    "<html><body>\
     <div class=\"now-weather\">\
       <span class=\"unit unit_temperature_c\">-7</span>\
       <span class=\"unit unit_temperature_f\">19</span>\
     </div>\
     <div class=\"now-feel\">\
       <span class=\"unit unit_temperature_c\">-12</span>\
       <span class=\"unit unit_temperature_f\">10</span>\
     </div>\
     <div class=\"now-desc\">Пасмурно, небольшой снег</div>\
     <div class=\"now-info-item wind\">\
       <div class=\"item-value\">\
         <span class=\"unit unit_wind_m_s\">5 <span>м/с</span></span>\
         <span class=\"unit unit_wind_m_s\">СВ</span>\
       </div>\
     </div>\
     <div class=\"now-info-item pressure\">\
       <div class=\"item-value\">\
         <span class=\"unit unit_pressure_mm_hg_atm\">745 <span>мм рт. ст.</span></span>\
       </div>\
     </div>\
     <div class=\"now-info-item humidity\"><div class=\"item-value\">86</div></div>\
     <div class=\"now-info-item geomagnetic\"><div class=\"item-value\">3</div></div>\
     <div class=\"now-info-item water\">\
       <span class=\"unit unit_temperature_c\">2,5</span>\
     </div>\
     <div class=\"now-info-item sunrise\"><div class=\"item-value\">8:36</div></div>\
     <div class=\"now-info-item sunset\"><div class=\"item-value\">17:22</div></div>\
     <div class=\"now-bg\" style=\"background-image: url('https://st.gismeteo.st/bg/snow.jpg')\"></div>\
     </body></html>"
        .to_string()
}

fn page(endpoint: &str, body: String) -> (String, String) {
    (format!("{CITY_BASE}{endpoint}"), body)
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[tokio::test]
async fn test_tomorrow_yields_eight_full_rows() {
    let client = client(vec![page("tomorrow/", hourly_page())]);
    let rows = client.get_tomorrow("Moscow").await.unwrap();

    assert_eq!(rows.len(), 8);
    for (i, row) in rows.iter().enumerate() {
        let expected = Utc
            .with_ymd_and_hms(2024, 3, 1, i as u32 * 3, 0, 0)
            .unwrap()
            .timestamp();
        assert_eq!(row.dt, expected);
        assert_eq!(row.temp, -5.0);
        assert_eq!(row.pressure, 746.0);
        assert_eq!(row.wind_speed, 3.5);
        assert_eq!(row.wind_gust, 9.0);
        assert_eq!(row.wind_dir, "СВ");
        assert_eq!(row.precipitation, 0.5);
        assert_eq!(row.humidity, 86.0);
        assert_eq!(row.summary, "Пасмурно");
        assert_eq!(row.geomagnetic, 3.0);
        // rows absent from the page come back defaulted, never missing
        assert_eq!(row.road_condition, "unknown");
        assert_eq!(row.pollen_birch, 0.0);
        assert_eq!(row.pollen_grass, 0.0);
        assert_eq!(row.pollen_ragweed, 0.0);
    }
}

#[tokio::test]
async fn test_today_uses_city_root_page() {
    let client = client(vec![page("", hourly_page())]);
    let rows = client.get_today("Moscow").await.unwrap();
    assert_eq!(rows.len(), 8);
}

#[tokio::test]
async fn test_fahrenheit_selection_changes_extracted_column() {
    let client = client_fahrenheit(vec![page("tomorrow/", hourly_page())]);
    let rows = client.get_tomorrow("Moscow").await.unwrap();
    assert!(rows.iter().all(|row| row.temp == 23.0));
}

#[tokio::test]
async fn test_two_weeks_yields_fourteen_daily_rows() {
    let client = client(vec![page("2-weeks/", two_weeks_page())]);
    let rows = client.get_two_weeks("Moscow").await.unwrap();

    assert_eq!(rows.len(), 14);

    // the first label anchors the run; each row advances one calendar day
    let year = Local::now().date_naive().year();
    let base = chrono::NaiveDate::from_ymd_opt(year, 1, 30).unwrap();
    for (i, row) in rows.iter().enumerate() {
        let date = Local.timestamp_opt(row.dt, 0).unwrap().date_naive();
        assert_eq!(date, base + chrono::Days::new(i as u64));
        assert_eq!(row.tmax, -2.0);
        assert_eq!(row.tmin, -8.0);
        assert_eq!(row.tavg, -5.0);
        assert_eq!(row.road_condition, "Сухо");
        assert_eq!(row.pollen_birch, 0.0);
    }

    // rows 1..3 crossed into February
    let feb = Local.timestamp_opt(rows[2].dt, 0).unwrap().date_naive();
    assert_eq!((feb.month(), feb.day()), (2, 1));
}

#[tokio::test]
async fn test_ten_days_emits_four_slots_per_label() {
    let client = client(vec![page("10-days/", ten_days_page(3))]);
    let rows = client.get_ten_days("Moscow").await.unwrap();

    assert_eq!(rows.len(), 12);
    for (i, row) in rows.iter().enumerate() {
        assert_eq!(row.dt - rows[0].dt, i as i64 * 6 * 3600);
        assert_eq!(row.temp, -4.0);
        assert_eq!(row.road_condition, "unknown");
    }
    // slot 4 opens the second day, 24 hours after slot 0
    assert_eq!(rows[4].dt - rows[0].dt, 24 * 3600);
}

#[tokio::test]
async fn test_month_yields_forty_two_rows() {
    let client = client(vec![page("month/", month_page())]);
    let rows = client.get_month("Moscow").await.unwrap();

    assert_eq!(rows.len(), 42);
    assert_eq!(rows[0].tmax, -1.0);
    assert_eq!(rows[0].tmin, -6.0);
    assert!(rows[1..].iter().all(|row| row.tmax == 0.0 && row.tmin == -5.0));
    // consecutive cells are consecutive days
    assert_eq!(rows[1].dt - rows[0].dt, 24 * 3600);
}

#[tokio::test]
async fn test_now_record_is_fully_populated() {
    let client = client(vec![page("now/", now_page())]);
    let now = client.get_now("Moscow").await.unwrap();

    assert_eq!(now.temp, -7.0);
    assert_eq!(now.temp_feels, -12.0);
    assert_eq!(now.wind_speed, 5.0);
    assert_eq!(now.wind_dir, "СВ");
    assert_eq!(now.pressure, 745.0);
    assert_eq!(now.humidity, 86.0);
    assert_eq!(now.summary, "Пасмурно, небольшой снег");
    assert_eq!(now.geomagnetic, 3.0);
    assert_eq!(now.water_temp, 2.5);
    assert_eq!(now.image.as_deref(), Some("https://st.gismeteo.st/bg/snow.jpg"));

    let sunrise = Local.timestamp_opt(now.sunrise, 0).unwrap();
    let sunset = Local.timestamp_opt(now.sunset, 0).unwrap();
    assert_eq!(sunrise.format("%H:%M").to_string(), "08:36");
    assert_eq!(sunset.format("%H:%M").to_string(), "17:22");
    assert_eq!(sunrise.date_naive(), Local::now().date_naive());
}

#[tokio::test]
async fn test_now_without_geomagnetic_backfills_zero() {
    let body = now_page().replace(
        "<div class=\"now-info-item geomagnetic\"><div class=\"item-value\">3</div></div>",
        "",
    );
    let client = client(vec![page("now/", body)]);
    let now = client.get_now("Moscow").await.unwrap();
    assert_eq!(now.geomagnetic, 0.0);
}

#[tokio::test]
async fn test_malformed_time_title_fails_whole_horizon() {
    let body = hourly_page().replacen(", UTC: 2024-03-01 00:00:00", " без метки", 1);
    let client = client(vec![page("tomorrow/", body)]);

    let error = client.get_tomorrow("Moscow").await.unwrap_err();
    assert!(matches!(error, GismeteoError::Parse { .. }));
}

#[tokio::test]
async fn test_unresolvable_city_surfaces_as_not_found() {
    let transport = FixtureTransport::new(vec![(
        "https://www.gismeteo.ru/mq/search/Atlantis/9/".to_string(),
        r#"{"data":[]}"#.to_string(),
    )]);
    let client = Gismeteo::with_transport(GismeteoOptions::default(), transport);

    let error = client.get_month("Atlantis").await.unwrap_err();
    assert!(error.is_city_not_found());
}

#[tokio::test]
async fn test_calm_wind_placeholder_reads_as_zero() {
    let body = hourly_page().replacen(
        "<span class=\"unit unit_wind_m_s\">3,5</span>",
        "<span>&mdash;</span>",
        1,
    );
    let client = client(vec![page("tomorrow/", body)]);
    let rows = client.get_tomorrow("Moscow").await.unwrap();
    assert_eq!(rows[0].wind_speed, 0.0);
}
