// SPDX-License-Identifier: Apache-2.0
// Copyright 2025, 2026 Joe Pearson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The International Standard Atmosphere (ISA) within the troposphere.
//!
//! Two temperature models are exposed. The linear model of 1.98 °C per
//! 1000 ft is what pilots read from tables and is used for display and for
//! density altitude. The barometric model in meters and Kelvin is the one the
//! pressure relations are derived from.
//!
//! ```
//! # use navlog::fc::atmosphere::pressure_altitude;
//! # use navlog::measurements::Altitude;
//! // 10 hPa below standard raises the pressure altitude by roughly 270 ft
//! let pa = pressure_altitude(Altitude::ft(2000.0), 1003.0)?;
//! assert!((pa.altitude.feet() - 2277.0).abs() < 15.0);
//! assert!(pa.qnh_valid);
//! # Ok::<(), navlog::Error>(())
//! ```

use log::warn;

use crate::error::{Error, Result};
use crate::measurements::constants::{
    GAS_CONSTANT_AIR, GRAVITY, ISA_DENSITY_SL, ISA_LAPSE_RATE, ISA_PRESSURE_SL,
    ISA_TEMPERATURE_SL,
};
use crate::measurements::{Altitude, AltitudeUnit, Density, Pressure, PressureUnit, Temperature};

/// Temperature drop of the linear model in °C per 1000 ft.
const LAPSE_RATE_PER_1000FT: f32 = 1.98;

/// Feet of density altitude per °C of deviation from ISA.
const DENSITY_ALTITUDE_PER_DEGREE: f32 = 118.8;

/// Exponent of the ISA pressure relation g / (R·L).
fn pressure_exponent() -> f32 {
    GRAVITY / (GAS_CONSTANT_AIR * ISA_LAPSE_RATE)
}

/// The ISA temperature at the `altitude` from the linear lapse rate of
/// 1.98 °C per 1000 ft.
pub fn isa_temperature(altitude: Altitude) -> Temperature {
    Temperature::c(15.0 - LAPSE_RATE_PER_1000FT * altitude.feet() / 1000.0)
}

/// The ISA temperature at the `altitude` from the barometric lapse rate of
/// 6.5 K per km.
pub fn isa_temperature_barometric(altitude: Altitude) -> Temperature {
    Temperature::k(ISA_TEMPERATURE_SL - ISA_LAPSE_RATE * altitude.to_si())
}

/// The ISA pressure at the `altitude`.
pub fn isa_pressure(altitude: Altitude) -> Pressure {
    let ratio = isa_temperature_barometric(altitude).to_si() / ISA_TEMPERATURE_SL;
    Pressure::pa(ISA_PRESSURE_SL * ratio.powf(pressure_exponent()))
        .convert_to(PressureUnit::HectoPascal)
}

/// The ISA air density at the `altitude`.
pub fn isa_density(altitude: Altitude) -> Density {
    let ratio = isa_temperature_barometric(altitude).to_si() / ISA_TEMPERATURE_SL;
    // kg/m³ to kg/l
    Density::kg_per_l(ISA_DENSITY_SL * ratio.powf(pressure_exponent() - 1.0) / 1000.0)
}

/// Interprets a bare QNH value.
///
/// Values within 25 to 35 or below 870 are inches of mercury, anything else
/// is hectopascal.
pub fn qnh(value: f32) -> Pressure {
    if (25.0..=35.0).contains(&value) || value < 870.0 {
        Pressure::in_hg(value)
    } else {
        Pressure::h_pa(value)
    }
}

/// Returns `true` if the QNH is within the range that occurs in practice.
pub fn is_plausible_qnh(qnh: &Pressure) -> bool {
    match qnh.unit() {
        PressureUnit::InchesOfMercury => (26.5..=31.5).contains(qnh.value()),
        _ => {
            let hpa = qnh.convert_to(PressureUnit::HectoPascal);
            (900.0..=1050.0).contains(hpa.value())
        }
    }
}

/// The pressure altitude at the `elevation` with the altimeter set to `qnh`.
///
/// The QNH gives the actual pressure at the elevation along the ISA pressure
/// relation. Inverting the ISA relation for that pressure yields the altitude
/// of the standard atmosphere with the same pressure.
pub fn pressure_altitude_at(elevation: Altitude, qnh: Pressure) -> Altitude {
    let n = pressure_exponent();
    let l_over_t0 = ISA_LAPSE_RATE / ISA_TEMPERATURE_SL;

    let actual = qnh.to_si() * (1.0 - l_over_t0 * elevation.to_si()).powf(n);
    let pa = (1.0 - (actual / ISA_PRESSURE_SL).powf(1.0 / n)) / l_over_t0;

    Altitude::m(pa).convert_to(AltitudeUnit::Feet)
}

/// A pressure altitude together with the QNH it was derived from.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct PressureAltitude {
    pub altitude: Altitude,
    pub qnh: Pressure,

    /// `false` if the QNH is outside of 900 to 1050 hPa (26.5 to 31.5 inHg).
    /// The altitude is computed anyway.
    pub qnh_valid: bool,
}

/// The pressure altitude at the `elevation` for a QNH given as bare value in
/// either hPa or inHg.
///
/// # Errors
///
/// Returns [`InvalidInput`] if any input is not finite or the QNH is not
/// positive.
///
/// [`InvalidInput`]: Error::InvalidInput
pub fn pressure_altitude(elevation: Altitude, qnh_value: f32) -> Result<PressureAltitude> {
    if !elevation.is_finite() || !qnh_value.is_finite() || qnh_value <= 0.0 {
        return Err(Error::invalid(format!(
            "cannot derive pressure altitude at {elevation} with QNH {qnh_value}"
        )));
    }

    let qnh = qnh(qnh_value);
    let qnh_valid = is_plausible_qnh(&qnh);
    if !qnh_valid {
        warn!("QNH {qnh:.2} outside of plausible range");
    }

    Ok(PressureAltitude {
        altitude: pressure_altitude_at(elevation, qnh),
        qnh,
        qnh_valid,
    })
}

/// The density altitude: the pressure altitude corrected by 118.8 ft per °C
/// the actual temperature `oat` deviates from the `isa` temperature.
pub fn density_altitude(pa: Altitude, oat: Temperature, isa: Temperature) -> Altitude {
    Altitude::ft(pa.feet() + DENSITY_ALTITUDE_PER_DEGREE * (oat.celsius() - isa.celsius()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn isa_temperature_models() {
        assert_eq!(isa_temperature(Altitude::ft(0.0)).celsius(), 15.0);
        assert!((isa_temperature(Altitude::ft(5000.0)).celsius() - 5.1).abs() < 0.001);

        let t = isa_temperature_barometric(Altitude::m(1000.0));
        assert!((t.to_si() - 281.65).abs() < 0.01);
    }

    #[test]
    fn isa_pressure_at_sea_level_and_10000ft() {
        let p0 = isa_pressure(Altitude::ft(0.0));
        assert!((p0.value() - 1013.25).abs() < 0.01);

        // standard atmosphere tables give 696.8 hPa at 10000 ft
        let p = isa_pressure(Altitude::ft(10000.0));
        assert!((p.value() - 696.8).abs() < 0.5, "{p}");
    }

    #[test]
    fn isa_density_decreases() {
        let rho0 = isa_density(Altitude::ft(0.0));
        assert!((rho0.value() - 0.001225).abs() < 1e-6);
        assert!(isa_density(Altitude::ft(8000.0)) < rho0);
    }

    #[test]
    fn qnh_unit_detection() {
        assert_eq!(qnh(29.92).unit(), &PressureUnit::InchesOfMercury);
        assert_eq!(qnh(1013.0).unit(), &PressureUnit::HectoPascal);
        assert_eq!(qnh(850.0).unit(), &PressureUnit::InchesOfMercury);
        assert_eq!(qnh(950.0).unit(), &PressureUnit::HectoPascal);
    }

    #[test]
    fn standard_qnh_keeps_elevation() {
        let pa = pressure_altitude(Altitude::ft(2000.0), 1013.0).unwrap();
        assert!((pa.altitude.feet() - 2000.0).abs() < 10.0);

        let pa = pressure_altitude(Altitude::ft(2000.0), 29.92).unwrap();
        assert!((pa.altitude.feet() - 2000.0).abs() < 5.0);
    }

    #[test]
    fn low_qnh_is_nonlinear() {
        let pa = pressure_altitude(Altitude::ft(2000.0), 1003.0).unwrap();
        // the 27 ft/hPa rule would give 2270 ft
        assert!((pa.altitude.feet() - 2277.0).abs() < 15.0);
    }

    #[test]
    fn implausible_qnh_is_flagged_but_computed() {
        let pa = pressure_altitude(Altitude::ft(0.0), 1080.0).unwrap();
        assert!(!pa.qnh_valid);
        assert!(pa.altitude.feet() < -1500.0);

        let pa = pressure_altitude(Altitude::ft(0.0), 25.5).unwrap();
        assert!(!pa.qnh_valid);
    }

    #[test]
    fn pressure_altitude_rejects_nan() {
        assert!(matches!(
            pressure_altitude(Altitude::ft(f32::NAN), 1013.0),
            Err(Error::InvalidInput(_))
        ));
        assert!(pressure_altitude(Altitude::ft(0.0), 0.0).is_err());
    }

    #[test]
    fn density_altitude_on_hot_day() {
        let pa = Altitude::ft(2000.0);
        let isa = isa_temperature(pa);
        let da = density_altitude(pa, Temperature::c(isa.celsius() + 20.0), isa);
        assert!((da.feet() - 4376.0).abs() < 0.5);
    }
}
