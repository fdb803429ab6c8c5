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

use super::{constants, linear_unit, Measurement};

/// Length unit with _m_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LengthUnit {
    Meters,
    Kilometers,
    Feet,
    NauticalMiles,
}

linear_unit!(LengthUnit, Length, Meters, {
    Meters => ("m", 1.0),
    Kilometers => ("km", 1000.0),
    Feet => ("ft", constants::FEET_IN_METER),
    NauticalMiles => ("NM", constants::NAUTICAL_MILE_IN_METER),
});

pub type Length = Measurement<f32, LengthUnit>;

impl Length {
    pub fn m(value: f32) -> Self {
        Self::new(value, LengthUnit::Meters)
    }

    pub fn km(value: f32) -> Self {
        Self::new(value, LengthUnit::Kilometers)
    }

    pub fn ft(value: f32) -> Self {
        Self::new(value, LengthUnit::Feet)
    }

    pub fn nm(value: f32) -> Self {
        Self::new(value, LengthUnit::NauticalMiles)
    }

    /// Returns the length in nautical miles.
    pub fn nautical_miles(&self) -> f32 {
        *self.convert_to(LengthUnit::NauticalMiles).value()
    }
}
