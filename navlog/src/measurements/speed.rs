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

/// Speed unit with _m/s_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SpeedUnit {
    MetersPerSecond,
    Knots,
    KilometersPerHour,
    /// Vertical speed, as used for rates of climb and descent.
    FeetPerMinute,
}

linear_unit!(SpeedUnit, Speed, MetersPerSecond, {
    MetersPerSecond => ("m/s", 1.0),
    Knots => ("kt", 1.0 / constants::METER_PER_SECONDS_IN_KNOTS),
    KilometersPerHour => ("km/h", 1.0 / 3.6),
    FeetPerMinute => ("ft/min", constants::FEET_IN_METER / 60.0),
});

pub type Speed = Measurement<f32, SpeedUnit>;

impl Speed {
    pub fn mps(value: f32) -> Self {
        Self::new(value, SpeedUnit::MetersPerSecond)
    }

    pub fn kt(value: f32) -> Self {
        Self::new(value, SpeedUnit::Knots)
    }

    pub fn kph(value: f32) -> Self {
        Self::new(value, SpeedUnit::KilometersPerHour)
    }

    pub fn fpm(value: f32) -> Self {
        Self::new(value, SpeedUnit::FeetPerMinute)
    }

    /// Returns the speed in knots.
    pub fn knots(&self) -> f32 {
        *self.convert_to(SpeedUnit::Knots).value()
    }
}
