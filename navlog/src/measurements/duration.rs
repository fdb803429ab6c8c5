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

/// Duration unit with _s_ as SI unit.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DurationUnit {
    Seconds,
    Minutes,
    Hours,
}

linear_unit!(DurationUnit, Duration, Seconds, {
    Seconds => ("s", 1.0),
    Minutes => ("min", 60.0),
    Hours => ("h", 3600.0),
});

pub type Duration = Measurement<f32, DurationUnit>;

impl Duration {
    pub fn s(value: f32) -> Self {
        Self::new(value, DurationUnit::Seconds)
    }

    pub fn min(value: f32) -> Self {
        Self::new(value, DurationUnit::Minutes)
    }

    pub fn h(value: f32) -> Self {
        Self::new(value, DurationUnit::Hours)
    }

    /// Returns the duration in minutes.
    pub fn minutes(&self) -> f32 {
        *self.convert_to(DurationUnit::Minutes).value()
    }

    /// Returns the duration in hours.
    pub fn hours(&self) -> f32 {
        *self.convert_to(DurationUnit::Hours).value()
    }
}

