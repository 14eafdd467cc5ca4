//! Atmospheric forcing.
//!
//! An [`Atmosphere`] is one immutable weather record. Derived quantities are computed
//! once when the record is built from [`AtmosphereInputs`] and cached. A [`Weather`]
//! is an ordered, non-empty series of records.

use crate::constants::Constants;
use crate::errors::{LeafError, LeafResult};
use crate::physics;
use crate::FloatValue;
use serde::{Deserialize, Serialize};
use std::ops::Index;

fn default_co2() -> FloatValue {
    400.0
}

fn default_duration() -> FloatValue {
    1.0
}

/// Raw atmospheric record, as read by a weather loader.
///
/// Humidity is given either as a relative humidity or as a vapour pressure deficit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtmosphereInputs {
    /// Air temperature (°C)
    pub temperature: FloatValue,
    /// Wind speed (m s-1)
    pub wind: FloatValue,
    /// Air pressure (kPa)
    pub pressure: FloatValue,
    /// Relative humidity (0-1)
    #[serde(default)]
    pub relative_humidity: Option<FloatValue>,
    /// Vapour pressure deficit (kPa)
    #[serde(default)]
    pub vpd: Option<FloatValue>,
    /// Ambient CO2 concentration (ppm)
    #[serde(default = "default_co2")]
    pub co2: FloatValue,
    /// Incident shortwave radiation (W m-2)
    #[serde(default)]
    pub shortwave: Option<FloatValue>,
    /// Duration of the time-step (s)
    #[serde(default = "default_duration")]
    pub duration: FloatValue,
}

impl AtmosphereInputs {
    pub fn new(temperature: FloatValue, wind: FloatValue, pressure: FloatValue) -> Self {
        Self {
            temperature,
            wind,
            pressure,
            relative_humidity: None,
            vpd: None,
            co2: default_co2(),
            shortwave: None,
            duration: default_duration(),
        }
    }

    pub fn with_relative_humidity(mut self, relative_humidity: FloatValue) -> Self {
        self.relative_humidity = Some(relative_humidity);
        self
    }

    pub fn with_vpd(mut self, vpd: FloatValue) -> Self {
        self.vpd = Some(vpd);
        self
    }

    pub fn with_co2(mut self, co2: FloatValue) -> Self {
        self.co2 = co2;
        self
    }

    pub fn with_shortwave(mut self, shortwave: FloatValue) -> Self {
        self.shortwave = Some(shortwave);
        self
    }

    pub fn with_duration(mut self, duration: FloatValue) -> Self {
        self.duration = duration;
        self
    }

    /// Validate the record and compute the derived quantities.
    pub fn build(&self, constants: &Constants) -> LeafResult<Atmosphere> {
        let t = self.temperature;
        if t <= constants.k0 {
            return Err(LeafError::InvalidAtmosphere(format!(
                "temperature must be above absolute zero, got {} °C",
                t
            )));
        }
        if self.pressure <= 0.0 {
            return Err(LeafError::InvalidAtmosphere(format!(
                "pressure must be positive, got {} kPa",
                self.pressure
            )));
        }
        if self.wind < 0.0 {
            return Err(LeafError::InvalidAtmosphere(format!(
                "wind speed cannot be negative, got {} m s-1",
                self.wind
            )));
        }
        if self.co2 < 0.0 {
            return Err(LeafError::InvalidAtmosphere(format!(
                "CO2 concentration cannot be negative, got {} ppm",
                self.co2
            )));
        }

        let es = physics::e_sat(t);
        let (rh, e) = match (self.relative_humidity, self.vpd) {
            (Some(rh), _) => {
                if !(0.0..=1.0).contains(&rh) {
                    let hint = if rh > 1.0 && rh <= 100.0 {
                        " (it looks like a percentage, use a fraction instead)"
                    } else {
                        ""
                    };
                    return Err(LeafError::InvalidAtmosphere(format!(
                        "relative humidity must be between 0 and 1, got {}{}",
                        rh, hint
                    )));
                }
                (rh, physics::vapor_pressure(t, rh))
            }
            (None, Some(vpd)) => {
                if vpd < 0.0 || vpd > es {
                    return Err(LeafError::InvalidAtmosphere(format!(
                        "VPD must be between 0 and {:.3} kPa at {} °C, got {}",
                        es, t, vpd
                    )));
                }
                ((es - vpd) / es, es - vpd)
            }
            (None, None) => {
                return Err(LeafError::InvalidAtmosphere(
                    "either the relative humidity or the VPD must be given".to_string(),
                ))
            }
        };

        let lambda = physics::latent_heat_vaporization(t, constants);

        Ok(Atmosphere {
            temperature: t,
            wind: self.wind,
            pressure: self.pressure,
            relative_humidity: rh,
            co2: self.co2,
            shortwave: self.shortwave,
            duration: self.duration,
            e,
            es,
            vpd: es - e,
            rho: physics::air_density(t, self.pressure, constants),
            lambda,
            gamma: physics::psychrometer_constant(self.pressure, lambda, constants),
            epsilon: physics::atmosphere_emissivity(t, e, constants),
            delta: physics::e_sat_slope(t),
        })
    }
}

/// Immutable atmospheric conditions for one time-step.
#[derive(Debug, Clone, PartialEq)]
pub struct Atmosphere {
    temperature: FloatValue,
    wind: FloatValue,
    pressure: FloatValue,
    relative_humidity: FloatValue,
    co2: FloatValue,
    shortwave: Option<FloatValue>,
    duration: FloatValue,
    // Derived
    e: FloatValue,
    es: FloatValue,
    vpd: FloatValue,
    rho: FloatValue,
    lambda: FloatValue,
    gamma: FloatValue,
    epsilon: FloatValue,
    delta: FloatValue,
}

impl Atmosphere {
    /// Air temperature (°C)
    pub fn temperature(&self) -> FloatValue {
        self.temperature
    }

    /// Wind speed (m s-1)
    pub fn wind(&self) -> FloatValue {
        self.wind
    }

    /// Air pressure (kPa)
    pub fn pressure(&self) -> FloatValue {
        self.pressure
    }

    /// Relative humidity (0-1)
    pub fn relative_humidity(&self) -> FloatValue {
        self.relative_humidity
    }

    /// Ambient CO2 concentration (ppm)
    pub fn co2(&self) -> FloatValue {
        self.co2
    }

    /// Incident shortwave radiation (W m-2), if measured.
    pub fn shortwave(&self) -> Option<FloatValue> {
        self.shortwave
    }

    /// Time-step duration (s)
    pub fn duration(&self) -> FloatValue {
        self.duration
    }

    /// Actual vapour pressure (kPa)
    pub fn vapor_pressure(&self) -> FloatValue {
        self.e
    }

    /// Saturated vapour pressure (kPa)
    pub fn saturation_vapor_pressure(&self) -> FloatValue {
        self.es
    }

    /// Vapour pressure deficit (kPa)
    pub fn vpd(&self) -> FloatValue {
        self.vpd
    }

    /// Air density (kg m-3)
    pub fn air_density(&self) -> FloatValue {
        self.rho
    }

    /// Latent heat of vaporization (J kg-1)
    pub fn latent_heat_vaporization(&self) -> FloatValue {
        self.lambda
    }

    /// Psychrometer constant (kPa K-1)
    pub fn psychrometer_constant(&self) -> FloatValue {
        self.gamma
    }

    /// Clear-sky emissivity
    pub fn emissivity(&self) -> FloatValue {
        self.epsilon
    }

    /// Slope of the saturation vapour pressure curve (kPa K-1)
    pub fn saturation_slope(&self) -> FloatValue {
        self.delta
    }
}

/// Description of the site a weather series was measured at.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherMetadata {
    pub site: String,
    /// Latitude (degrees)
    pub latitude: Option<FloatValue>,
    /// Longitude (degrees)
    pub longitude: Option<FloatValue>,
    /// Altitude (m)
    pub altitude: Option<FloatValue>,
}

/// Ordered series of atmospheric records. The position of a record is its time-step.
#[derive(Debug, Clone, PartialEq)]
pub struct Weather {
    data: Vec<Atmosphere>,
    metadata: WeatherMetadata,
}

impl Weather {
    pub fn new(data: Vec<Atmosphere>, metadata: WeatherMetadata) -> LeafResult<Self> {
        if data.is_empty() {
            return Err(LeafError::EmptyWeather);
        }
        Ok(Self { data, metadata })
    }

    /// Build a series from raw records.
    pub fn from_inputs(
        inputs: &[AtmosphereInputs],
        metadata: WeatherMetadata,
        constants: &Constants,
    ) -> LeafResult<Self> {
        let data = inputs
            .iter()
            .map(|record| record.build(constants))
            .collect::<LeafResult<Vec<_>>>()?;
        Self::new(data, metadata)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn metadata(&self) -> &WeatherMetadata {
        &self.metadata
    }

    pub fn iter(&self) -> impl Iterator<Item = &Atmosphere> {
        self.data.iter()
    }
}

impl Index<usize> for Weather {
    type Output = Atmosphere;

    fn index(&self, index: usize) -> &Self::Output {
        &self.data[index]
    }
}
