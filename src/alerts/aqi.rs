//! AQI derivation from PM2.5 concentration
//!
//! Piecewise-linear interpolation over the fixed PM2.5 breakpoint table,
//! producing a categorical index on the 0-500 scale.

/// Breakpoint tuples (pm_lo, pm_hi, aqi_lo, aqi_hi) covering 0-500 µg/m³
const BREAKPOINTS: [(f64, f64, u16, u16); 7] = [
    (0.0, 35.0, 0, 50),
    (35.0, 75.0, 50, 100),
    (75.0, 115.0, 100, 150),
    (115.0, 150.0, 150, 200),
    (150.0, 250.0, 200, 300),
    (250.0, 350.0, 300, 400),
    (350.0, 500.0, 400, 500),
];

/// Map a PM2.5 concentration (µg/m³) to an AQI value in [0, 500].
///
/// Concentrations beyond the last bracket clamp to 500. A value no bracket
/// covers maps to 0. Total function, no error conditions.
#[must_use]
pub fn aqi_from_pm25(pm25: f64) -> u16 {
    for (pm_lo, pm_hi, aqi_lo, aqi_hi) in BREAKPOINTS {
        if pm_lo <= pm25 && pm25 <= pm_hi {
            let aqi =
                f64::from(aqi_hi - aqi_lo) / (pm_hi - pm_lo) * (pm25 - pm_lo) + f64::from(aqi_lo);
            return aqi.round() as u16;
        }
    }

    if pm25 > 500.0 { 500 } else { 0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0.0, 0)]
    #[case(35.0, 50)]
    #[case(75.0, 100)]
    #[case(115.0, 150)]
    #[case(150.0, 200)]
    #[case(250.0, 300)]
    #[case(350.0, 400)]
    #[case(500.0, 500)]
    fn category_boundaries(#[case] pm25: f64, #[case] expected: u16) {
        assert_eq!(aqi_from_pm25(pm25), expected);
    }

    #[test]
    fn clamps_above_scale() {
        assert_eq!(aqi_from_pm25(600.0), 500);
        assert_eq!(aqi_from_pm25(500.1), 500);
    }

    #[test]
    fn interpolates_within_bracket() {
        // midpoint of the first bracket
        assert_eq!(aqi_from_pm25(17.5), 25);
        // 160 µg/m³ sits in the (150,250,200,300) bracket
        assert_eq!(aqi_from_pm25(160.0), 210);
    }

    #[test]
    fn first_bracket_stays_in_good_range() {
        let mut pm25 = 0.0;
        while pm25 <= 35.0 {
            let aqi = aqi_from_pm25(pm25);
            assert!(aqi <= 50, "pm25={pm25} gave aqi={aqi}");
            pm25 += 0.5;
        }
    }
}
