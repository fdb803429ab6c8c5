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

use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::fc::atmosphere;
use crate::measurements::{Altitude, Pressure};

mod constants {
    pub const METER_IN_FEET: f32 = 3.28084;
}

/// A vertical distance as used for the cruise level of a plan.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum VerticalDistance {
    /// Height above ground level in feet.
    Agl(u16),

    /// Altitude in feet with reference to the local QNH.
    Altitude(u16),

    /// Pressure altitude in feet.
    PressureAltitude(i16),

    /// Flight level in hundreds of feet as altitude at standard air pressure.
    Fl(u16),

    /// Ground level.
    Gnd,

    /// True altitude as distance above mean sea level.
    Msl(u16),
}

impl VerticalDistance {
    /// Returns the pressure altitude at which the aircraft flies.
    ///
    /// Altitudes referenced to the QNH are converted with the ISA inversion of
    /// [`atmosphere::pressure_altitude`]. Heights above ground need the
    /// `elevation` of the ground below.
    pub fn to_pressure_altitude(&self, qnh: Pressure, elevation: Altitude) -> Altitude {
        match self {
            Self::Fl(fl) => Altitude::ft(*fl as f32 * 100.0),
            Self::PressureAltitude(pa) => Altitude::ft(*pa as f32),
            Self::Gnd => atmosphere::pressure_altitude_at(elevation, qnh),
            Self::Agl(h) => {
                atmosphere::pressure_altitude_at(elevation + Altitude::ft(*h as f32), qnh)
            }
            Self::Altitude(alt) | Self::Msl(alt) => {
                atmosphere::pressure_altitude_at(Altitude::ft(*alt as f32), qnh)
            }
        }
    }

    /// Returns the pressure altitude based on the elevation and the QNH.
    ///
    /// # Errors
    ///
    /// Will return [`ImplausibleValue`] if the QNH is implausible causing the
    /// pressure altitude to overflow.
    ///
    /// [`ImplausibleValue`]: Error::ImplausibleValue
    pub fn pa(elevation: Altitude, qnh: Pressure) -> Result<Self, Error> {
        let pa = atmosphere::pressure_altitude_at(elevation, qnh).feet().round();

        if pa.is_finite() && pa >= i16::MIN as f32 && pa <= i16::MAX as f32 {
            Ok(Self::PressureAltitude(pa as i16))
        } else {
            Err(Error::ImplausibleValue)
        }
    }
}

impl FromStr for VerticalDistance {
    type Err = Error;

    /// Parses a string `s` to return a VerticalDistance.
    ///
    /// The string should be according to ICAO Doc. 4444 Annex 2:
    /// - Flight level, expressed as F followed by 3 figures e.g. `F085`
    /// - Standard metric level in tens of metres, expressed by S followed by 4
    ///   figures e.g. `S1130`
    /// - Altitude in hundreds of feet, expressed as A followed by 3 figures
    ///   e.g. `A045`
    /// - Altitude in tens of metres, expressed as M followed by 4 figures e.g.
    ///   `M0840`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        macro_rules! value {
            ($s:expr, $index:expr, $len:expr) => {
                $s.get($index)
                    .filter(|_| $s.len() == $len)
                    .and_then(|s| s.parse::<u16>().ok())
                    .ok_or(Error::UnexpectedString)
            };
        }

        match s.get(0..1).unwrap_or_default() {
            "F" => Ok(Self::Fl(value!(s, 1..4, 4)?)),
            "S" => Ok(Self::Fl(
                // value in tens of meter or hundreds of feet
                (value!(s, 1..5, 5)? as f32 * constants::METER_IN_FEET / 10.0).round() as u16,
            )),
            "A" => Ok(Self::Altitude(value!(s, 1..4, 4)? * 100)),
            "M" => Ok(Self::Altitude(
                (value!(s, 1..5, 5)? as f32 * constants::METER_IN_FEET * 10.0).round() as u16,
            )),
            _ => Err(Error::UnexpectedString),
        }
    }
}

impl fmt::Display for VerticalDistance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VerticalDistance::Gnd => write!(f, "GND"),
            VerticalDistance::Fl(value) => write!(f, "FL{value:03}"),
            VerticalDistance::Agl(value) => write!(f, "{value} AGL"),
            VerticalDistance::Msl(value) => write!(f, "{value} MSL"),
            VerticalDistance::Altitude(value) => write!(f, "{value} ALT"),
            VerticalDistance::PressureAltitude(value) => write!(f, "PA {value}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertical_distance_from_str() {
        assert_eq!(
            "F085".parse::<VerticalDistance>(),
            Ok(VerticalDistance::Fl(85))
        );
        assert_eq!(
            "S1130".parse::<VerticalDistance>(),
            Ok(VerticalDistance::Fl(371))
        );
        assert_eq!(
            "A025".parse::<VerticalDistance>(),
            Ok(VerticalDistance::Altitude(2500))
        );
        assert_eq!(
            "M0762".parse::<VerticalDistance>(),
            Ok(VerticalDistance::Altitude(25000))
        );
        assert_eq!(
            "F08".parse::<VerticalDistance>(),
            Err(Error::UnexpectedString)
        );
    }

    #[test]
    fn pa_at_standard_qnh_equals_elevation() {
        assert_eq!(
            VerticalDistance::pa(Altitude::ft(1000.0), Pressure::STD),
            Ok(VerticalDistance::PressureAltitude(1000))
        );
    }

    #[test]
    fn flight_level_is_pressure_altitude() {
        let pa = VerticalDistance::Fl(65).to_pressure_altitude(Pressure::h_pa(990.0), Altitude::ft(0.0));
        assert_eq!(*pa.value(), 6500.0);
    }

    #[test]
    fn low_qnh_raises_pressure_altitude_of_msl_altitude() {
        let pa = VerticalDistance::Altitude(4500)
            .to_pressure_altitude(Pressure::h_pa(1003.0), Altitude::ft(0.0));
        assert!(pa.feet() > 4700.0 && pa.feet() < 4800.0, "{pa}");
    }
}
