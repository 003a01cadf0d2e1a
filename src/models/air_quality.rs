//! Air quality sample model

use serde::{Deserialize, Serialize};

use crate::alerts::aqi::aqi_from_pm25;

/// One air-quality reading at fetch time. Only the PM2.5 concentration is
/// kept; the AQI is derived on demand rather than stored.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct AirQualitySample {
    /// PM2.5 concentration in µg/m³
    pub pm2_5: f64,
}

impl AirQualitySample {
    /// Derive the categorical AQI (0-500) from the PM2.5 concentration
    #[must_use]
    pub fn aqi(&self) -> u16 {
        aqi_from_pm25(self.pm2_5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aqi_is_derived_not_stored() {
        let sample = AirQualitySample { pm2_5: 160.0 };
        assert!(sample.aqi() > 200);

        let clean = AirQualitySample::default();
        assert_eq!(clean.aqi(), 0);
    }
}
