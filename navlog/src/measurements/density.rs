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

use super::{linear_unit, Measurement};

/// Density unit with _kg/l_ as reference unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DensityUnit {
    KilogramsPerLiter,
}

linear_unit!(DensityUnit, Density, KilogramsPerLiter, {
    KilogramsPerLiter => ("kg/l", 1.0),
});

pub type Density = Measurement<f32, DensityUnit>;

impl Density {
    pub const fn kg_per_l(value: f32) -> Self {
        Self {
            value,
            unit: DensityUnit::KilogramsPerLiter,
        }
    }
}
