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

//! The triangle of velocities.
//!
//! The wind correction angle (WCA) is signed. Positive values turn the
//! heading to the right of the course, which is what a wind from the right
//! requires:
//!
//! ```
//! # use navlog::core::{MagneticVariation, Wind};
//! # use navlog::fc::triangle::solve;
//! # use navlog::measurements::{Angle, Speed};
//! let wind = Wind::kt(270.0, 20.0);
//! let t = solve(Angle::t(360.0), Speed::kt(100.0), Some(&wind), MagneticVariation::East(0.0))?;
//!
//! // wind from the left, heading turns left
//! assert!((t.wca + 11.54).abs() < 0.05);
//! assert!((t.gs.knots() - 97.98).abs() < 0.05);
//! # Ok::<(), navlog::Error>(())
//! ```

use crate::core::{Fuel, FuelFlow, MagneticVariation, Wind};
use crate::error::{Error, Result};
use crate::measurements::{Angle, AngleUnit, Duration, Length, Speed, SpeedUnit};

/// The solved triangle of velocities.
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct WindTriangle {
    /// Wind correction angle in degrees within `(-90, 90)`.
    pub wca: f32,
    /// True heading.
    pub th: Angle,
    /// Magnetic heading.
    pub mh: Angle,
    /// Ground speed in knots.
    pub gs: Speed,
}

impl WindTriangle {
    /// The time to fly the `dist` at ground speed.
    pub fn ete(&self, dist: Length) -> Duration {
        dist / self.gs
    }

    /// The fuel burned with the fuel flow `ff` while flying the `dist`.
    pub fn fuel(&self, ff: &FuelFlow, dist: Length) -> Fuel {
        *ff * self.ete(dist)
    }
}

/// Solves the triangle of velocities for the true course `tc`.
///
/// Without `wind` the heading equals the course and the ground speed equals
/// the `tas`. The variation `var` turns the true into the magnetic heading.
///
/// # Errors
///
/// Returns [`InvalidInput`] if the TAS is not positive, any input is not
/// finite, the crosswind exceeds the TAS or the wind leaves no positive
/// ground speed.
///
/// [`InvalidInput`]: Error::InvalidInput
pub fn solve(
    tc: Angle,
    tas: Speed,
    wind: Option<&Wind>,
    var: MagneticVariation,
) -> Result<WindTriangle> {
    let tas_kt = tas.knots();

    if !tc.is_finite() || !tas_kt.is_finite() || !var.degrees().is_finite() {
        return Err(Error::invalid("course, TAS and variation must be finite"));
    }

    if tas_kt <= 0.0 {
        return Err(Error::invalid(format!("TAS must be positive, got {tas_kt} kt")));
    }

    let (wca, gs) = match wind {
        Some(wind) => {
            let ws = wind.speed.knots();
            if !ws.is_finite() || !wind.direction.is_finite() || ws < 0.0 {
                return Err(Error::invalid(format!("implausible wind {wind}")));
            }

            // angle between where the wind comes from and the course
            let rel = (wind.direction - tc.with_unit(*wind.direction.unit())).to_si();
            let sin_wca = ws * rel.sin() / tas_kt;

            if sin_wca.abs() > 1.0 {
                return Err(Error::invalid(format!(
                    "crosswind of wind {wind} exceeds TAS {tas_kt} kt"
                )));
            }

            let wca = sin_wca.asin();
            (wca.to_degrees(), tas_kt * wca.cos() - ws * rel.cos())
        }
        None => (0.0, tas_kt),
    };

    if gs <= 0.0 {
        return Err(Error::invalid(format!(
            "no positive ground speed with TAS {tas_kt} kt on course {tc}"
        )));
    }

    let th = Angle::new(tc.value() + wca, AngleUnit::TrueNorth);

    Ok(WindTriangle {
        wca,
        th,
        mh: th + var,
        gs: Speed::kt(gs).convert_to(SpeedUnit::Knots),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FuelType;
    use crate::core::FuelUnit;

    fn no_var() -> MagneticVariation {
        MagneticVariation::East(0.0)
    }

    #[test]
    fn calm_wind_keeps_course_and_speed() {
        let t = solve(Angle::t(90.0), Speed::kt(110.0), None, no_var()).unwrap();
        assert_eq!(t.wca, 0.0);
        assert_eq!(*t.th.value(), 90.0);
        assert_eq!(t.gs.knots(), 110.0);
    }

    #[test]
    fn wind_from_left_turns_heading_left() {
        let wind = Wind::kt(270.0, 20.0);
        let t = solve(Angle::t(360.0), Speed::kt(100.0), Some(&wind), no_var()).unwrap();

        assert!((t.wca + 11.537).abs() < 0.01, "{}", t.wca);
        assert!((t.th.value() - 348.46).abs() < 0.01);
        assert!((t.gs.knots() - 97.98).abs() < 0.01);
    }

    #[test]
    fn wind_from_right_turns_heading_right() {
        let wind = Wind::kt(180.0, 50.0);
        let t = solve(Angle::t(90.0), Speed::kt(100.0), Some(&wind), no_var()).unwrap();

        assert!((t.wca - 30.0).abs() < 0.01);
        assert_eq!(t.th.value().round(), 120.0);
        assert!((t.gs.knots() - 86.6).abs() < 0.05);
    }

    #[test]
    fn headwind_reduces_ground_speed() {
        let wind = Wind::kt(360.0, 20.0);
        let t = solve(Angle::t(0.0), Speed::kt(100.0), Some(&wind), no_var()).unwrap();
        assert!(t.wca.abs() < 1e-4);
        assert!((t.gs.knots() - 80.0).abs() < 1e-3);
    }

    #[test]
    fn east_variation_is_subtracted() {
        let t = solve(
            Angle::t(100.0),
            Speed::kt(100.0),
            None,
            MagneticVariation::East(4.0),
        )
        .unwrap();
        assert_eq!(t.mh.unit(), &AngleUnit::MagneticNorth);
        assert!((t.mh.value() - 96.0).abs() < 1e-4);
    }

    #[test]
    fn zero_tas_is_invalid() {
        let wind = Wind::kt(270.0, 20.0);
        assert!(matches!(
            solve(Angle::t(0.0), Speed::kt(0.0), Some(&wind), no_var()),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn wind_stronger_than_tas() {
        let across = Wind::kt(90.0, 120.0);
        assert!(solve(Angle::t(0.0), Speed::kt(100.0), Some(&across), no_var()).is_err());

        let ahead = Wind::kt(0.0, 120.0);
        assert!(solve(Angle::t(0.0), Speed::kt(100.0), Some(&ahead), no_var()).is_err());
    }

    #[test]
    fn ete_and_fuel() {
        let t = solve(Angle::t(0.0), Speed::kt(120.0), None, no_var()).unwrap();
        let ete = t.ete(Length::nm(60.0));
        assert!((ete.minutes() - 30.0).abs() < 1e-3);

        let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);
        let fuel = t.fuel(&ff, Length::nm(60.0));
        assert!((fuel.quantity(FuelUnit::Liters) - 15.0).abs() < 1e-3);
    }
}
