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

/// Volume unit with _l_ as reference unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VolumeUnit {
    Liter,
    USGallon,
}

// Liters are used as "SI" unit since fuel densities are given in kg/l.
linear_unit!(VolumeUnit, Volume, Liter, {
    Liter => ("l", 1.0),
    USGallon => ("gal", constants::US_GALLON_IN_QUBIC_METER * 1000.0),
});

pub type Volume = Measurement<f32, VolumeUnit>;

impl Volume {
    pub fn l(value: f32) -> Self {
        Self::new(value, VolumeUnit::Liter)
    }

    pub fn gal(value: f32) -> Self {
        Self::new(value, VolumeUnit::USGallon)
    }
}
