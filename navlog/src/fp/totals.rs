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

use super::leg::{Leg, LegRole};
use crate::core::{Fuel, FuelType};
use crate::measurements::{Duration, DurationUnit, Length, LengthUnit};

/// Totals over the computed legs of a plan.
///
/// Fuel to the alternate is kept apart from the trip fuel. Reserves are
/// planned but not burned.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanTotals {
    pub dist: Length,
    pub ete: Duration,
    pub trip_fuel: Fuel,
    pub alternate_fuel: Fuel,
    pub reserve: Fuel,
    /// Fuel on board at the destination, if the fuel on board is known.
    pub on_landing: Option<Fuel>,
    fuel_on_board: Option<Fuel>,
}

impl PlanTotals {
    pub(super) fn new(legs: &[Leg], fuel_type: FuelType, fuel_on_board: Option<Fuel>) -> Self {
        let zero = Fuel::zero(fuel_type);
        let mut totals = Self {
            dist: Length::nm(0.0),
            ete: Duration::min(0.0),
            trip_fuel: zero,
            alternate_fuel: zero,
            reserve: zero,
            on_landing: None,
            fuel_on_board,
        };

        for leg in legs {
            let Some(output) = leg.output() else {
                continue;
            };

            totals.dist += leg.input().dist;
            totals.ete += output.ete;
            totals.reserve = totals.reserve + output.reserve;

            match leg.role() {
                LegRole::Alternate => totals.alternate_fuel = totals.alternate_fuel + output.fuel,
                _ => totals.trip_fuel = totals.trip_fuel + output.fuel,
            }
        }

        totals.dist = totals.dist.convert_to(LengthUnit::NauticalMiles);
        totals.ete = totals.ete.convert_to(DurationUnit::Minutes);
        totals.on_landing = fuel_on_board.map(|fob| fob - totals.trip_fuel);
        totals
    }

    /// Trip, alternate and reserve fuel.
    pub fn required(&self) -> Fuel {
        self.trip_fuel + self.alternate_fuel + self.reserve
    }

    /// Whether the fuel on board covers the required fuel. `None` if the
    /// fuel on board is unknown.
    pub fn is_sufficient(&self) -> Option<bool> {
        self.fuel_on_board
            .map(|fob| fob.mass >= self.required().mass)
    }
}
