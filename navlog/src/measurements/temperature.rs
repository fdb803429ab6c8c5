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

use super::{constants, Measurement, PhysicalQuantity, UnitOfMeasure};

/// Temperature unit with _K_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum TemperatureUnit {
    Celsius,
    Fahrenheit,
    Kelvin,
}

impl UnitOfMeasure<f32> for TemperatureUnit {
    fn quantity() -> PhysicalQuantity {
        PhysicalQuantity::Temperature
    }

    fn si() -> Self {
        Self::Kelvin
    }

    fn symbol(&self) -> &'static str {
        match self {
            Self::Celsius => "°C",
            Self::Fahrenheit => "°F",
            Self::Kelvin => "K",
        }
    }

    fn from_si(value: f32, to: &Self) -> f32 {
        match to {
            Self::Celsius => value - constants::KELVIN_IN_CELSIUS,
            Self::Fahrenheit => (value - constants::KELVIN_IN_CELSIUS) * 9.0 / 5.0 + 32.0,
            Self::Kelvin => value,
        }
    }

    fn to_si(&self, value: &f32) -> f32 {
        match self {
            Self::Celsius => value + constants::KELVIN_IN_CELSIUS,
            Self::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + constants::KELVIN_IN_CELSIUS,
            Self::Kelvin => *value,
        }
    }
}

/// An absolute temperature.
///
/// Subtracting two temperatures yields the difference expressed in the unit
/// of the left hand side, e.g. `Temperature::c(20.0) - Temperature::c(15.0)`
/// is a difference of 5 °C.
pub type Temperature = Measurement<f32, TemperatureUnit>;

impl Temperature {
    pub fn c(value: f32) -> Self {
        Self::new(value, TemperatureUnit::Celsius)
    }

    pub fn f(value: f32) -> Self {
        Self::new(value, TemperatureUnit::Fahrenheit)
    }

    pub fn k(value: f32) -> Self {
        Self::new(value, TemperatureUnit::Kelvin)
    }

    /// Returns the temperature in degree Celsius.
    pub fn celsius(&self) -> f32 {
        *self.convert_to(TemperatureUnit::Celsius).value()
    }
}
