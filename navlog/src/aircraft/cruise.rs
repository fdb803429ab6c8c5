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

use super::lerp;
use crate::core::FuelFlow;
use crate::error::{Error, Result};
use crate::measurements::{Altitude, Speed};

/// TAS and fuel flow at an altitude and power setting.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CruiseRow {
    pub altitude: Altitude,
    /// Power in percent.
    pub power: f32,
    pub tas: Speed,
    pub ff: FuelFlow,
}

#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CruisePerformance {
    pub tas: Speed,
    pub ff: FuelFlow,
}

impl CruisePerformance {
    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            tas: Speed::kt(lerp(self.tas.knots(), other.tas.knots(), t)),
            ff: FuelFlow::PerHour(self.ff.hourly() * (1.0 - t) + other.ff.hourly() * t),
        }
    }
}

/// Cruise performance by pressure altitude and power.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CruiseTable {
    rows: Vec<CruiseRow>,
}

impl CruiseTable {
    pub fn new(mut rows: Vec<CruiseRow>) -> Result<Self> {
        if rows.is_empty() {
            return Err(Error::invalid("cruise table without rows"));
        }

        if rows
            .iter()
            .any(|r| !r.altitude.is_finite() || !r.power.is_finite() || !r.tas.is_finite())
        {
            return Err(Error::invalid("cruise table contains non-finite values"));
        }

        rows.sort_by(|a, b| {
            a.altitude
                .to_si()
                .total_cmp(&b.altitude.to_si())
                .then(a.power.total_cmp(&b.power))
        });

        Ok(Self { rows })
    }

    pub fn rows(&self) -> &[CruiseRow] {
        &self.rows
    }

    /// Bilinear interpolation over altitude and power. Values outside of the
    /// table are clamped to its edges.
    pub fn lookup(&self, altitude: Altitude, power: f32) -> Result<CruisePerformance> {
        if !altitude.is_finite() || !power.is_finite() {
            return Err(Error::invalid("cruise lookup with non-finite values"));
        }

        let mut altitudes: Vec<f32> = self.rows.iter().map(|r| r.altitude.feet()).collect();
        altitudes.dedup();

        let ft = altitude.feet();
        let (a0, a1) = bracket(&altitudes, ft);

        let p0 = self.at_altitude(a0, power)?;
        if a1 == a0 {
            return Ok(p0);
        }

        let p1 = self.at_altitude(a1, power)?;
        Ok(p0.interpolate(&p1, (ft - a0) / (a1 - a0)))
    }

    fn at_altitude(&self, ft: f32, power: f32) -> Result<CruisePerformance> {
        let rows: Vec<&CruiseRow> = self
            .rows
            .iter()
            .filter(|r| r.altitude.feet() == ft)
            .collect();

        let powers: Vec<f32> = rows.iter().map(|r| r.power).collect();
        let (p0, p1) = bracket(&powers, power);

        let find = |p: f32| {
            rows.iter()
                .find(|r| r.power == p)
                .map(|r| CruisePerformance {
                    tas: r.tas,
                    ff: r.ff,
                })
                .ok_or_else(|| Error::invalid("cruise table row vanished"))
        };

        let lo = find(p0)?;
        if p1 == p0 {
            return Ok(lo);
        }

        let hi = find(p1)?;
        Ok(lo.interpolate(&hi, (power - p0) / (p1 - p0)))
    }
}

// The values enclosing x in the sorted values, clamped to the first or last.
fn bracket(values: &[f32], x: f32) -> (f32, f32) {
    let first = values.first().copied().unwrap_or_default();
    let last = values.last().copied().unwrap_or_default();

    if x <= first {
        return (first, first);
    }
    if x >= last {
        return (last, last);
    }

    values
        .windows(2)
        .find(|w| w[0] <= x && x <= w[1])
        .map(|w| (w[0], w[1]))
        .unwrap_or((last, last))
}
