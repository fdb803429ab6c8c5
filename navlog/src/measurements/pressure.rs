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

/// Pressure unit with _Pa_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PressureUnit {
    Pascal,
    HectoPascal,
    InchesOfMercury,
}

linear_unit!(PressureUnit, Pressure, Pascal, {
    Pascal => ("Pa", 1.0),
    HectoPascal => ("hPa", 100.0),
    InchesOfMercury => ("inHg", constants::INCH_OF_MERCURY_IN_PASCAL),
});

pub type Pressure = Measurement<f32, PressureUnit>;

impl Pressure {
    /// The standard pressure at mean sea level (1013.25 hPa).
    pub const STD: Pressure = Pressure {
        value: 1013.25,
        unit: PressureUnit::HectoPascal,
    };

    pub fn pa(value: f32) -> Self {
        Self::new(value, PressureUnit::Pascal)
    }

    pub fn h_pa(value: f32) -> Self {
        Self::new(value, PressureUnit::HectoPascal)
    }

    pub fn in_hg(value: f32) -> Self {
        Self::new(value, PressureUnit::InchesOfMercury)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pressure_in_inches() {
        let std = Pressure::STD.convert_to(PressureUnit::InchesOfMercury);
        assert!((std.value() - 29.92).abs() < 0.01);
    }
}
