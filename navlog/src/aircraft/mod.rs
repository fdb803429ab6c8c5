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

//! Aircraft profile with the performance data used in planning.
//!
//! Tables are only ever read by the calculations.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use log::trace;

mod climb;
mod cruise;
mod descent;
mod deviation;

pub use climb::{ClimbBand, ClimbGroup, ClimbPerformance, ClimbTable};
pub use cruise::{CruisePerformance, CruiseRow, CruiseTable};
pub use descent::DescentPolicy;
pub use deviation::{deviation, DeviationEntry, DeviationTable};

use crate::core::{FuelFlow, FuelType};
use crate::error::{Error, Result};
use crate::measurements::{Altitude, Temperature};

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Aircraft {
    pub registration: String,
    pub fuel_type: FuelType,
    pub deviation_table: Option<DeviationTable>,
    pub climb_table: Option<ClimbTable>,
    pub descent_table: Option<ClimbTable>,
    pub descent_policy: DescentPolicy,
    pub cruise_table: Option<CruiseTable>,
}

impl Aircraft {
    pub fn new(registration: impl Into<String>, fuel_type: FuelType) -> Self {
        Self {
            registration: registration.into(),
            fuel_type,
            ..Default::default()
        }
    }

    /// Climb performance from the climb table.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the aircraft has no climb table or the
    /// table doesn't cover the climb.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn climb(
        &self,
        from: Altitude,
        to: Altitude,
        oat: Option<Temperature>,
    ) -> Result<ClimbPerformance> {
        self.climb_table
            .as_ref()
            .ok_or_else(|| Error::invalid(format!("{} has no climb table", self.registration)))?
            .climb(from, to, oat)
    }

    /// Descent performance from the descent table or, without a table, from
    /// the descent policy.
    pub fn descent(
        &self,
        from: Altitude,
        to: Altitude,
        oat: Option<Temperature>,
        cruise_ff: &FuelFlow,
    ) -> Result<ClimbPerformance> {
        match &self.descent_table {
            Some(table) => table.descent(from, to, oat),
            None => {
                trace!(
                    "{} has no descent table, using {:?}",
                    self.registration,
                    self.descent_policy
                );
                self.descent_policy.descent(from, to, cruise_ff)
            }
        }
    }
}

/// Linear interpolation from `a` at 0 to `b` at 1.
pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}
