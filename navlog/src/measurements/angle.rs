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

use std::fmt;
use std::ops::{Add, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The north an angle is referenced to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AngleUnit {
    TrueNorth,
    MagneticNorth,
    /// The north indicated by the aircraft's compass.
    CompassNorth,
}

/// A direction in degrees within `[0, 360)`.
///
/// Adding and subtracting angles wraps around the circle. The reference of
/// the left hand side is kept:
///
/// ```
/// # use navlog::measurements::Angle;
/// assert_eq!((Angle::t(350.0) + Angle::t(20.0)).value().round(), 10.0);
/// assert_eq!((Angle::t(10.0) - Angle::t(20.0)).value().round(), 350.0);
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(from = "AngleRecord")
)]
pub struct Angle {
    value: f32,
    unit: AngleUnit,
}

// Stored angles are normalized again when read.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
struct AngleRecord {
    value: f32,
    unit: AngleUnit,
}

#[cfg(feature = "serde")]
impl From<AngleRecord> for Angle {
    fn from(record: AngleRecord) -> Self {
        Self::new(record.value, record.unit)
    }
}

impl Angle {
    /// Creates an angle referenced to true north.
    pub fn t(value: f32) -> Self {
        Self::new(value, AngleUnit::TrueNorth)
    }

    /// Creates an angle referenced to magnetic north.
    pub fn m(value: f32) -> Self {
        Self::new(value, AngleUnit::MagneticNorth)
    }

    /// Creates an angle referenced to the compass north.
    pub fn c(value: f32) -> Self {
        Self::new(value, AngleUnit::CompassNorth)
    }

    pub fn new(value: f32, unit: AngleUnit) -> Self {
        Self {
            value: normalize(value),
            unit,
        }
    }

    /// Creates an angle from radians.
    pub fn from_si(value: f32, unit: AngleUnit) -> Self {
        Self::new(value.to_degrees(), unit)
    }

    /// The angle in degrees within `[0, 360)`.
    pub fn value(&self) -> &f32 {
        &self.value
    }

    pub fn unit(&self) -> &AngleUnit {
        &self.unit
    }

    /// The angle in radians.
    pub fn to_si(&self) -> f32 {
        self.value.to_radians()
    }

    /// The angle in degrees within `(-180, 180]`.
    pub fn signed(&self) -> f32 {
        if self.value > 180.0 {
            self.value - 360.0
        } else {
            self.value
        }
    }

    /// Returns the same direction with another reference.
    pub fn with_unit(self, unit: AngleUnit) -> Self {
        Self { unit, ..self }
    }

    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }
}

impl Add for Angle {
    type Output = Angle;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.value + rhs.value, self.unit)
    }
}

impl Sub for Angle {
    type Output = Angle;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.value - rhs.value, self.unit)
    }
}

/// Adds signed degrees.
impl Add<f32> for Angle {
    type Output = Angle;

    fn add(self, rhs: f32) -> Self::Output {
        Self::new(self.value + rhs, self.unit)
    }
}

impl fmt::Display for Angle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let suffix = match self.unit {
            AngleUnit::TrueNorth => "T",
            AngleUnit::MagneticNorth => "M",
            AngleUnit::CompassNorth => "C",
        };

        // headings are written with three digits, 360 for north
        let deg = self.value.round() as u16;
        write!(f, "{:03}°{suffix}", if deg == 0 { 360 } else { deg })
    }
}

/// Normalizes degrees into `[0, 360)`.
pub fn normalize(deg: f32) -> f32 {
    let n = deg.rem_euclid(360.0);
    // rem_euclid may round up to exactly 360 for tiny negative inputs
    if n >= 360.0 {
        0.0
    } else {
        n
    }
}

/// Returns the signed shortest rotation in degrees from `from` to `to`.
///
/// The result is within `(-180, 180]`, positive values are clockwise.
pub fn shortest_angular_distance(from: f32, to: f32) -> f32 {
    let d = normalize(to - from);
    if d > 180.0 {
        d - 360.0
    } else {
        d
    }
}
