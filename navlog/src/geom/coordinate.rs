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

use std::fmt::{Display, Formatter};
use std::hash::{Hash, Hasher};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use geo::{Bearing, Distance, Geodesic};

use crate::measurements::{Angle, Length};

/// A position given by latitude and longitude in decimal degrees.
#[derive(Copy, Clone, PartialEq, PartialOrd, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub struct Coordinate {
    /// Latitude in the range from -90° (south) to 90° (north).
    pub latitude: f64,

    /// Longitude in the range from -180° (west) to 180° (east).
    pub longitude: f64,
}

impl Hash for Coordinate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.latitude.to_bits().hash(state);
        self.longitude.to_bits().hash(state);
    }
}

impl From<Coordinate> for geo::Point<f64> {
    fn from(c: Coordinate) -> Self {
        geo::Point::new(c.longitude, c.latitude)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(p: geo::Point<f64>) -> Self {
        Self {
            latitude: p.y(),
            longitude: p.x(),
        }
    }
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Returns `true` if latitude and longitude are within their ranges.
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }

    /// Returns the initial true bearing from this point to the `other`.
    ///
    /// Uses geodesic calculation on the WGS84 ellipsoid.
    pub fn bearing(&self, other: &Coordinate) -> Angle {
        let bearing = Geodesic.bearing((*self).into(), (*other).into());
        Angle::t(bearing as f32)
    }

    /// Returns the distance from this point to the `other`.
    ///
    /// Uses geodesic calculation on the WGS84 ellipsoid.
    pub fn dist(&self, other: &Coordinate) -> Length {
        let distance_m = Geodesic.distance((*self).into(), (*other).into());
        Length::m(distance_m as f32)
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.5}, {:.5})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::LengthUnit;

    // Hamburg (EDDH) and Luebeck (EDHL) airport reference points.
    const EDDH: Coordinate = coord!(53.63040161, 9.98822975);
    const EDHL: Coordinate = coord!(53.80540085, 10.71920013);

    #[test]
    fn bearing() {
        assert_eq!(EDDH.bearing(&EDHL).value().round(), 68.0);
    }

    #[test]
    fn dist() {
        let nm = EDDH.dist(&EDHL).convert_to(LengthUnit::NauticalMiles);
        assert_eq!(nm.value().round(), 28.0);
    }

    #[test]
    fn validity() {
        assert!(EDDH.is_valid());
        assert!(!coord!(91.0, 0.0).is_valid());
        assert!(!coord!(0.0, -180.5).is_valid());
    }
}
