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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::ClimbPerformance;
use crate::core::FuelFlow;
use crate::error::{Error, Result};
use crate::measurements::{Altitude, Duration, Length, LengthUnit, Speed, SpeedUnit};

/// How to plan a descent without a descent table.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DescentPolicy {
    /// A rule of thumb rather than physics: descend with a constant `rate`,
    /// covering `dist_per_1000ft` per 1000 ft descended and burning
    /// `fuel_factor` times the cruise fuel flow.
    Approximation {
        rate: Speed,
        dist_per_1000ft: Length,
        fuel_factor: f32,
    },
}

impl Default for DescentPolicy {
    /// 500 ft/min, 3 NM per 1000 ft and half the cruise fuel flow.
    fn default() -> Self {
        Self::Approximation {
            rate: Speed::fpm(500.0),
            dist_per_1000ft: Length::nm(3.0),
            fuel_factor: 0.5,
        }
    }
}

impl DescentPolicy {
    /// Descent from `from` to `to` with the fuel flow in cruise `cruise_ff`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `to` is above `from` or the policy has
    /// no positive rate.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn descent(
        &self,
        from: Altitude,
        to: Altitude,
        cruise_ff: &FuelFlow,
    ) -> Result<ClimbPerformance> {
        let Self::Approximation {
            rate,
            dist_per_1000ft,
            fuel_factor,
        } = self;

        let ft = from.feet() - to.feet();
        if !ft.is_finite() || ft < 0.0 {
            return Err(Error::invalid(format!("can't descent from {from} to {to}")));
        }

        let fpm = *rate.convert_to(SpeedUnit::FeetPerMinute).value();
        if fpm <= 0.0 {
            return Err(Error::invalid("rate of descent must be positive"));
        }

        let time = Duration::min(ft / fpm);

        Ok(ClimbPerformance {
            time,
            dist: (*dist_per_1000ft * (ft / 1000.0)).convert_to(LengthUnit::NauticalMiles),
            fuel: (*cruise_ff * *fuel_factor) * time,
        })
    }

    /// The TAS implied by the policy.
    pub fn tas(&self) -> Speed {
        let Self::Approximation {
            rate,
            dist_per_1000ft,
            ..
        } = self;

        let per_1000ft = Duration::min(1000.0 / rate.convert_to(SpeedUnit::FeetPerMinute).value());
        (*dist_per_1000ft / per_1000ft).convert_to(SpeedUnit::Knots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FuelType, FuelUnit};

    #[test]
    fn default_approximation() {
        let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);
        let perf = DescentPolicy::default()
            .descent(Altitude::ft(5500.0), Altitude::ft(1000.0), &ff)
            .unwrap();

        assert!((perf.time.minutes() - 9.0).abs() < 1e-4);
        assert!((perf.dist.nautical_miles() - 13.5).abs() < 1e-4);
        // 15 l/h for 9 minutes
        assert!((perf.fuel.quantity(FuelUnit::Liters) - 2.25).abs() < 1e-3);
    }

    #[test]
    fn implied_tas() {
        assert!((DescentPolicy::default().tas().knots() - 90.0).abs() < 1e-3);
    }

    #[test]
    fn climbing_is_not_a_descent() {
        let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);
        assert!(DescentPolicy::default()
            .descent(Altitude::ft(1000.0), Altitude::ft(3000.0), &ff)
            .is_err());
    }
}
