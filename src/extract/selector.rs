//! Unit-parameterized selector templating.
//!
//! Templates in [`crate::constants`] carry `UNIT_TEMP`, `UNIT_PRESSURE`
//! and `UNIT_WIND` placeholders; this resolves them to the on-page CSS
//! class of the client's chosen units. Pure substitution, templates
//! without placeholders pass through unchanged.

use crate::config::UnitSelection;
use crate::constants::{UNIT_PRESSURE_PLACEHOLDER, UNIT_TEMP_PLACEHOLDER, UNIT_WIND_PLACEHOLDER};

/// Resolve every unit placeholder in a selector template.
pub fn resolve_units(template: &str, units: &UnitSelection) -> String {
    template
        .replace(UNIT_TEMP_PLACEHOLDER, units.temp.token())
        .replace(UNIT_PRESSURE_PLACEHOLDER, units.pressure.token())
        .replace(UNIT_WIND_PLACEHOLDER, units.wind.token())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{PressureUnit, TempUnit, WindUnit};

    #[test]
    fn test_temperature_axis_substitution() {
        let units = UnitSelection::default();
        assert_eq!(
            resolve_units("span.unit.UNIT_TEMP", &units),
            "span.unit.unit_temperature_c"
        );

        let units = UnitSelection {
            temp: TempUnit::Fahrenheit,
            ..UnitSelection::default()
        };
        assert_eq!(
            resolve_units("span.unit.UNIT_TEMP", &units),
            "span.unit.unit_temperature_f"
        );
    }

    #[test]
    fn test_axes_resolve_independently() {
        let units = UnitSelection {
            temp: TempUnit::Celsius,
            pressure: PressureUnit::HPa,
            wind: WindUnit::Kmh,
        };
        let resolved = resolve_units("a.UNIT_TEMP b.UNIT_PRESSURE c.UNIT_WIND", &units);
        assert_eq!(
            resolved,
            "a.unit_temperature_c b.unit_pressure_h_pa c.unit_wind_km_h"
        );
    }

    #[test]
    fn test_placeholder_free_template_is_untouched() {
        let units = UnitSelection::default();
        assert_eq!(
            resolve_units("div.widget-row-humidity div.item-unit", &units),
            "div.widget-row-humidity div.item-unit"
        );
    }
}
