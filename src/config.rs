//! Client configuration: language and measurement units.
//!
//! Gismeteo renders one value element per measurement unit and hides the
//! inactive ones with CSS, so unit selection works by picking which
//! on-page token the field selectors target. The selection is fixed when
//! the client is built and never changes afterwards.

use serde::{Deserialize, Serialize};

/// Site language, which also picks the endpoint host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Lang {
    #[default]
    Ru,
    En,
}

/// Temperature display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TempUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

/// Atmospheric pressure display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PressureUnit {
    #[default]
    MmHg,
    HPa,
}

/// Wind speed display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WindUnit {
    #[default]
    Ms,
    Kmh,
}

impl TempUnit {
    /// CSS class gismeteo uses for values in this unit.
    pub fn token(&self) -> &'static str {
        match self {
            TempUnit::Celsius => "unit_temperature_c",
            TempUnit::Fahrenheit => "unit_temperature_f",
        }
    }
}

impl PressureUnit {
    pub fn token(&self) -> &'static str {
        match self {
            PressureUnit::MmHg => "unit_pressure_mm_hg_atm",
            PressureUnit::HPa => "unit_pressure_h_pa",
        }
    }
}

impl WindUnit {
    pub fn token(&self) -> &'static str {
        match self {
            WindUnit::Ms => "unit_wind_m_s",
            WindUnit::Kmh => "unit_wind_km_h",
        }
    }
}

/// One value per unit axis, immutable for the lifetime of a client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitSelection {
    pub temp: TempUnit,
    pub pressure: PressureUnit,
    pub wind: WindUnit,
}

/// Options accepted when constructing a [`crate::Gismeteo`] client.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GismeteoOptions {
    pub lang: Lang,
    pub unit_temp: TempUnit,
    pub unit_pressure: PressureUnit,
    pub unit_wind: WindUnit,
}

impl GismeteoOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    pub fn with_temp_unit(mut self, unit: TempUnit) -> Self {
        self.unit_temp = unit;
        self
    }

    pub fn with_pressure_unit(mut self, unit: PressureUnit) -> Self {
        self.unit_pressure = unit;
        self
    }

    pub fn with_wind_unit(mut self, unit: WindUnit) -> Self {
        self.unit_wind = unit;
        self
    }

    pub(crate) fn units(&self) -> UnitSelection {
        UnitSelection {
            temp: self.unit_temp,
            pressure: self.unit_pressure,
            wind: self.unit_wind,
        }
    }
}
