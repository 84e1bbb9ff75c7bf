//! Gismeteo scraper client
//!
//! An async Rust client for gismeteo.com that fetches forecast pages
//! for a named location and converts their markup into structured,
//! typed records.
//!
//! This library provides:
//! - Current conditions plus hourly, ten-day, two-week and monthly forecasts
//! - Unit-parameterized extraction (°C/°F, mmHg/hPa, m/s / km/h)
//! - City-name resolution with a single-slot result cache
//! - Timestamp reconstruction from the partial dates the pages publish
//!
//! ## Usage
//!
//! ```no_run
//! use gismeteo::{Gismeteo, GismeteoOptions, TempUnit};
//!
//! # async fn example() -> gismeteo::Result<()> {
//! let client = Gismeteo::new(GismeteoOptions::new().with_temp_unit(TempUnit::Celsius))?;
//!
//! let now = client.get_now("Москва").await?;
//! println!("{}: {}°, wind {} m/s", now.summary, now.temp, now.wind_speed);
//!
//! for day in client.get_two_weeks("Москва").await? {
//!     println!("{}: {}..{}°", day.dt, day.tmin, day.tmax);
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod constants;
pub mod error;
pub mod extract;
pub mod models;
pub mod transport;

// Re-export commonly used types
pub use client::Gismeteo;
pub use config::{GismeteoOptions, Lang, PressureUnit, TempUnit, WindUnit};
pub use error::{GismeteoError, Result};
pub use models::{CurrentConditions, DailyForecast, HourlyForecast, MonthlyForecast};
pub use transport::{HttpTransport, Transport};
