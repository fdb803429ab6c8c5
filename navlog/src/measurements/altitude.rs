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

use super::{constants, linear_unit, Length, LengthUnit, Measurement};

/// Altitude unit with _m_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum AltitudeUnit {
    Feet,
    Meters,
}

linear_unit!(AltitudeUnit, Length, Meters, {
    Feet => ("ft", constants::FEET_IN_METER),
    Meters => ("m", 1.0),
});

/// Altitude above mean sea level (MSL) or, in a performance context, a
/// pressure altitude.
///
/// Unlike a [`Length`], which is a horizontal distance on a leg, an altitude is
/// a vertical position and is what the atmosphere model and the climb tables
/// are keyed by.
pub type Altitude = Measurement<f32, AltitudeUnit>;

impl Altitude {
    /// Creates an altitude in feet.
    pub fn ft(value: f32) -> Self {
        Self::new(value, AltitudeUnit::Feet)
    }

    /// Creates an altitude in meters.
    pub fn m(value: f32) -> Self {
        Self::new(value, AltitudeUnit::Meters)
    }

    /// Returns the altitude in feet.
    pub fn feet(&self) -> f32 {
        *self.convert_to(AltitudeUnit::Feet).value()
    }

    /// Returns the vertical distance as a length.
    pub fn to_length(&self) -> Length {
        Length::from_si(self.to_si(), LengthUnit::Feet)
    }
}

impl From<Length> for Altitude {
    fn from(value: Length) -> Self {
        Altitude::from_si(value.to_si(), AltitudeUnit::Feet)
    }
}
