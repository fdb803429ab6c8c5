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
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::measurements::{Angle, Speed, SpeedUnit};

/// Wind blowing _from_ a true direction with a speed.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Wind {
    /// The true direction the wind is coming from.
    pub direction: Angle,
    pub speed: Speed,
}

impl Wind {
    pub fn new(direction: Angle, speed: Speed) -> Self {
        Self { direction, speed }
    }

    /// Creates a wind from a true direction in degrees and a speed in knots.
    pub fn kt(direction: f32, speed: f32) -> Self {
        Self::new(Angle::t(direction), Speed::kt(speed))
    }

    /// No wind at all.
    pub fn calm() -> Self {
        Self::kt(0.0, 0.0)
    }

    pub fn is_calm(&self) -> bool {
        *self.speed.value() == 0.0
    }

    /// The wind component along the `heading`, positive values are headwind.
    pub fn headwind(&self, heading: &Angle) -> Speed {
        self.speed * (self.direction - *heading).to_si().cos()
    }

    /// The wind component across the `heading`, positive values blow from
    /// the right.
    pub fn crosswind(&self, heading: &Angle) -> Speed {
        self.speed * (self.direction - *heading).to_si().sin()
    }
}

impl FromStr for Wind {
    type Err = Error;

    /// Parses a METAR wind group like `27020KT`, `18010G20KT` or `09005MPS`.
    ///
    /// Gusts are ignored since planning uses the mean wind. Variable winds
    /// (`VRB03KT`) have no direction and are read as coming from north.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (body, unit) = if let Some(body) = s.strip_suffix("KT") {
            (body, SpeedUnit::Knots)
        } else if let Some(body) = s.strip_suffix("MPS") {
            (body, SpeedUnit::MetersPerSecond)
        } else if let Some(body) = s.strip_suffix("KMH") {
            (body, SpeedUnit::KilometersPerHour)
        } else {
            return Err(Error::UnexpectedString);
        };

        // strip gusts
        let body = body.split('G').next().unwrap_or_default();

        let direction = match body.get(0..3) {
            Some("VRB") => 0,
            Some(dir) => dir.parse::<u16>().map_err(|_| Error::UnexpectedString)?,
            None => return Err(Error::UnexpectedString),
        };

        if direction > 360 {
            return Err(Error::ImplausibleValue);
        }

        let speed = body
            .get(3..)
            .filter(|speed| (2..=3).contains(&speed.len()))
            .and_then(|speed| speed.parse::<u16>().ok())
            .ok_or(Error::UnexpectedString)?;

        Ok(Self {
            direction: Angle::t(direction as f32),
            speed: Speed::new(speed as f32, unit),
        })
    }
}

impl fmt::Display for Wind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dir = self.direction.value().round() as u16;
        write!(
            f,
            "{:03}{:02}KT",
            if dir == 0 && !self.is_calm() { 360 } else { dir },
            self.speed.knots().round() as u16
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_metar_groups() {
        assert_eq!("27020KT".parse::<Wind>(), Ok(Wind::kt(270.0, 20.0)));
        assert_eq!("18010G20KT".parse::<Wind>(), Ok(Wind::kt(180.0, 10.0)));
        assert_eq!("00000KT".parse::<Wind>(), Ok(Wind::calm()));
        assert_eq!(
            "09005MPS".parse::<Wind>(),
            Ok(Wind::new(Angle::t(90.0), Speed::mps(5.0)))
        );
        assert_eq!("VRB03KT".parse::<Wind>(), Ok(Wind::kt(0.0, 3.0)));
    }

    #[test]
    fn reject_malformed_groups() {
        assert_eq!("2702KT".parse::<Wind>(), Err(Error::UnexpectedString));
        assert_eq!("27020".parse::<Wind>(), Err(Error::UnexpectedString));
        assert_eq!("99020KT".parse::<Wind>(), Err(Error::ImplausibleValue));
    }

    #[test]
    fn components() {
        let wind = Wind::kt(90.0, 15.0);
        let heading = Angle::t(85.0);
        assert!((wind.headwind(&heading).knots() - 14.94).abs() < 0.01);
        assert!((wind.crosswind(&heading).knots() - 1.31).abs() < 0.01);
    }

    #[test]
    fn display_as_metar_group() {
        assert_eq!(Wind::kt(270.0, 20.0).to_string(), "27020KT");
        assert_eq!(Wind::kt(360.0, 5.0).to_string(), "36005KT");
    }
}
