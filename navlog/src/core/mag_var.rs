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
use std::ops::Add;

use chrono::{Datelike, NaiveDate};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use world_magnetic_model::uom::si::angle::degree;
use world_magnetic_model::uom::si::f32::{Angle as WmmAngle, Length as WmmLength};
use world_magnetic_model::uom::si::length::meter;
use world_magnetic_model::GeomagneticField;

use crate::error::Error;
use crate::geom::Coordinate;
use crate::measurements::{Angle, AngleUnit};

/// The magnetic variation (declination) at a point.
///
/// The crate uses the convention of the World Magnetic Model: an easterly
/// variation is positive. Thus the magnetic north is east of the true north
/// and a magnetic direction is the true direction minus the easterly
/// variation.
///
/// Some older data stores the _magnetic deviation_ `md = -var`, which is
/// converted with [`MagneticVariation::from_legacy_md`] when read and never
/// used beyond that.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum MagneticVariation {
    East(f32),
    West(f32),
}

impl MagneticVariation {
    /// Creates the variation from signed degrees, positive to the east.
    pub fn from_degrees(deg: f32) -> Self {
        if deg < 0.0 {
            Self::West(-deg)
        } else {
            Self::East(deg)
        }
    }

    /// Creates the variation from the legacy magnetic deviation `md = -var`.
    pub fn from_legacy_md(md: f32) -> Self {
        Self::from_degrees(-md)
    }

    /// The signed variation in degrees, positive to the east.
    pub fn degrees(&self) -> f32 {
        match self {
            Self::East(deg) => *deg,
            Self::West(deg) => -deg,
        }
    }

    /// Computes the variation at the `coordinate` and `date` with the World
    /// Magnetic Model.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the date is outside the model's validity
    /// or the coordinate can't be evaluated.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn wmm(coordinate: &Coordinate, date: NaiveDate) -> Result<Self, Error> {
        let date = time::Date::from_ordinal_date(date.year(), date.ordinal() as u16)
            .map_err(|e| Error::invalid(format!("date for magnetic model: {e}")))?;

        let field = GeomagneticField::new(
            WmmLength::new::<meter>(0.0),
            WmmAngle::new::<degree>(coordinate.latitude as f32),
            WmmAngle::new::<degree>(coordinate.longitude as f32),
            date,
        )
        .map_err(|e| Error::invalid(format!("magnetic model: {e:?}")))?;

        Ok(Self::from_degrees(field.declination().get::<degree>()))
    }
}

impl Default for MagneticVariation {
    fn default() -> Self {
        Self::East(0.0)
    }
}

/// Turns a true direction into a magnetic direction.
impl Add<MagneticVariation> for Angle {
    type Output = Angle;

    fn add(self, var: MagneticVariation) -> Self::Output {
        Angle::new(*self.value() - var.degrees(), AngleUnit::MagneticNorth)
    }
}

impl fmt::Display for MagneticVariation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::East(deg) => write!(f, "{deg:.1}°E"),
            Self::West(deg) => write!(f, "{deg:.1}°W"),
        }
    }
}
