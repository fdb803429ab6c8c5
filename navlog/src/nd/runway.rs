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

use log::{debug, warn};

use crate::core::Wind;
use crate::error::Error;
use crate::geom::Coordinate;
use crate::measurements::{Altitude, Angle, Length, LengthUnit, Speed};

/// Crosswind components within this band get no side label.
const CROSSWIND_DEAD_ZONE_KT: f32 = 0.5;

/// Surface category of a runway.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum RunwaySurface {
    /// Asphalt, concrete and alike in good condition.
    PavementGood,
    /// PSP mats or deteriorated pavement.
    PavementPoor,
    GrassGood,
    GrassFair,
    Gravel,
    /// Dirt, earth, clay or soil.
    Dirt,
    Sand,
    /// Water or ice.
    Water,
}

impl RunwaySurface {
    /// The two letter code of the category.
    pub fn code(&self) -> &'static str {
        match self {
            Self::PavementGood => "PG",
            Self::PavementPoor => "PP",
            Self::GrassGood => "GG",
            Self::GrassFair => "GF",
            Self::Gravel => "GV",
            Self::Dirt => "DT",
            Self::Sand => "SD",
            Self::Water => "WT",
        }
    }

    /// Categorizes a raw surface description as found in runway databases.
    ///
    /// The whole description is tried first, then its first three, two and
    /// one characters. Returns `None` if nothing matches.
    ///
    /// ```
    /// # use navlog::nd::RunwaySurface;
    /// assert_eq!(RunwaySurface::categorize("ASPH-G"), Some(RunwaySurface::PavementGood));
    /// assert_eq!(RunwaySurface::categorize("Grass/Dirt"), Some(RunwaySurface::GrassGood));
    /// assert_eq!(RunwaySurface::categorize("xyz"), None);
    /// ```
    pub fn categorize(raw: &str) -> Option<Self> {
        let s = raw.trim().to_uppercase();
        if s.is_empty() {
            return None;
        }

        raw_code(&s)
            .or_else(|| s.get(..3).and_then(raw_code))
            .or_else(|| s.get(..2).and_then(raw_code))
            .or_else(|| s.get(..1).and_then(raw_code))
    }
}

fn raw_code(s: &str) -> Option<RunwaySurface> {
    use RunwaySurface::*;

    let surface = match s {
        "A" | "ASP" | "ASF" | "ASPH" | "ASPH-G" | "C" | "CON" | "CONC" | "CONC-G" | "CG"
        | "TAR" | "BIT" | "MAC" | "PAV" | "AG" | "CCN" | "PFC" | "PEM" | "APS" | "ASB"
        | "C0N" | "BRI" | "LIM" | "B" | "OON" | "PAD" | "PAD/CON" | "ASPHALT" | "CONCRETE"
        | "BLACKTOP" | "BLA" | "'ASPHALT'" | "'CONCRETE'" | "'AS" | "'CO" => PavementGood,
        "RAI" | "PSP" | "M" | "MAT" | "MET" | "ALU" | "OIL" | "STE" | "PER" | "ROO" | "DEC"
        | "NEO" | "OLD" | "ROU" | "?ST" | "PCN" => PavementPoor,
        "T" | "TUR" | "TG" | "TURF" | "TURF-G" | "GR" | "GRS" | "GRA" | "GRASS" | "G" | "TRT"
        | "ERB" | "HER" | "PAD/GRASS" => GrassGood,
        "TF" | "TURF-F" | "SOD" | "SOF" => GrassFair,
        "GRE" | "GRV" | "GRR" | "GRVL" | "GVL" | "STO" | "ROC" | "COR" | "PIE" | "PIC"
        | "CRU" | "LOO" | "ROL" | "ZAH" | "OLI" | "PAC" | "YEL" | "BRO" | "RED" | "B/G" => {
            Gravel
        }
        "D" | "DIR" | "DIRT" | "EAR" | "SOI" | "CLA" | "SHA" | "VOL" | "TER" | "NAT" | "COM"
        | "UNP" | "MUR" | "LOA" | "HAR" | "EER" | "SIL" | "LAT" | "U" | "UNS" | "UNSEALED"
        | "NOT" => Dirt,
        "S" | "SAN" | "SAND" => Sand,
        "W" | "WAT" | "WATER" | "SEA" | "LAK" | "MAR" | "ICE" | "BLU" => Water,
        _ => return None,
    };

    Some(surface)
}

impl FromStr for RunwaySurface {
    type Err = Error;

    /// Parses the two letter category code.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PG" => Ok(Self::PavementGood),
            "PP" => Ok(Self::PavementPoor),
            "GG" => Ok(Self::GrassGood),
            "GF" => Ok(Self::GrassFair),
            "GV" => Ok(Self::Gravel),
            "DT" => Ok(Self::Dirt),
            "SD" => Ok(Self::Sand),
            "WT" => Ok(Self::Water),
            _ => Err(Error::UnexpectedString),
        }
    }
}

impl fmt::Display for RunwaySurface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One end of a runway, named by its designator.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunwayEnd {
    pub designator: String,
    pub coordinate: Option<Coordinate>,
    pub elevation: Option<Altitude>,
    /// True heading of the runway end.
    pub heading: Option<Angle>,
    pub displaced_threshold: Option<Length>,
}

impl RunwayEnd {
    pub fn new(designator: impl Into<String>, heading: Angle) -> Self {
        Self {
            designator: designator.into(),
            heading: Some(heading),
            ..Default::default()
        }
    }
}

#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Runway {
    pub length: Option<Length>,
    pub width: Option<Length>,
    pub surface: Option<RunwaySurface>,
    pub lighted: bool,
    pub closed: bool,
    /// The low numbered end.
    pub le: Option<RunwayEnd>,
    /// The high numbered end.
    pub he: Option<RunwayEnd>,
}

impl Runway {
    /// The runway's ends together with the opposite end.
    fn ends(&self) -> impl Iterator<Item = (&RunwayEnd, Option<&RunwayEnd>)> {
        let le = self.le.as_ref().map(|end| (end, self.he.as_ref()));
        let he = self.he.as_ref().map(|end| (end, self.le.as_ref()));
        le.into_iter().chain(he)
    }

    /// The slope in percent seen from `end`, positive uphill.
    fn slope(&self, end: &RunwayEnd, opposite: Option<&RunwayEnd>) -> Option<f32> {
        let length = self.length?.convert_to(LengthUnit::Feet);
        let from = end.elevation?;
        let to = opposite?.elevation?;

        (*length.value() > 0.0).then(|| (to.feet() - from.feet()) / length.value() * 100.0)
    }
}

/// The side the crosswind blows from.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum CrosswindSide {
    Left,
    Right,
}

impl CrosswindSide {
    fn of(crosswind: Speed) -> Option<Self> {
        let kt = crosswind.knots();
        if kt > CROSSWIND_DEAD_ZONE_KT {
            Some(Self::Right)
        } else if kt < -CROSSWIND_DEAD_ZONE_KT {
            Some(Self::Left)
        } else {
            None
        }
    }
}

impl fmt::Display for CrosswindSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Left => write!(f, "L"),
            Self::Right => write!(f, "R"),
        }
    }
}

/// The runway end best aligned with the wind.
#[derive(Clone, PartialEq, Debug)]
pub struct RunwaySelection {
    /// Index of the runway within the runways searched.
    pub runway: usize,
    pub designator: String,
    pub heading: Angle,
    /// Headwind component, negative for tailwind.
    pub headwind: Speed,
    /// Crosswind component, positive from the right.
    pub crosswind: Speed,
    pub crosswind_side: Option<CrosswindSide>,
    /// Slope in percent, positive uphill.
    pub slope: Option<f32>,
    /// Runway length less the displaced threshold of the end.
    pub available: Option<Length>,
}

/// Selects the runway end with the most headwind.
///
/// Ends without heading are skipped. On equal headwind the end found first
/// wins. Without wind, the first end with a heading is selected. Returns
/// `None` if no end has a heading.
pub fn select_runway(runways: &[Runway], wind: Option<&Wind>) -> Option<RunwaySelection> {
    let wind = match wind {
        Some(wind) => *wind,
        None => {
            warn!("selecting runway without wind");
            Wind::calm()
        }
    };

    let mut best: Option<RunwaySelection> = None;

    for (i, runway) in runways.iter().enumerate() {
        for (end, opposite) in runway.ends() {
            let Some(heading) = end.heading else {
                continue;
            };

            let headwind = wind.headwind(&heading);
            if best.as_ref().is_some_and(|b| headwind <= b.headwind) {
                continue;
            }

            let crosswind = wind.crosswind(&heading);
            let available = runway.length.map(|length| match end.displaced_threshold {
                Some(dt) => length - dt,
                None => length,
            });

            best = Some(RunwaySelection {
                runway: i,
                designator: end.designator.clone(),
                heading,
                headwind,
                crosswind,
                crosswind_side: CrosswindSide::of(crosswind),
                slope: runway.slope(end, opposite),
                available,
            });
        }
    }

    if let Some(selection) = &best {
        debug!(
            "selected runway {} with {:.1} headwind",
            selection.designator, selection.headwind
        );
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn runway(le: (&str, f32, f32), he: (&str, f32, f32), length_ft: f32) -> Runway {
        let end = |(designator, hdg, elev): (&str, f32, f32)| RunwayEnd {
            elevation: Some(Altitude::ft(elev)),
            ..RunwayEnd::new(designator, Angle::t(hdg))
        };

        Runway {
            length: Some(Length::ft(length_ft)),
            le: Some(end(le)),
            he: Some(end(he)),
            ..Default::default()
        }
    }

    #[test]
    fn selects_headwind_end() {
        let rwys = [runway(("09", 85.0, 50.0), ("27", 265.0, 60.0), 2000.0)];
        let wind = Wind::kt(90.0, 15.0);

        let sel = select_runway(&rwys, Some(&wind)).unwrap();
        assert_eq!(sel.designator, "09");
        assert!((sel.headwind.knots() - 14.94).abs() < 0.01);
        // wind from 090 on heading 085 blows from the right
        assert!((sel.crosswind.knots() - 1.307).abs() < 0.01);
        assert_eq!(sel.crosswind_side, Some(CrosswindSide::Right));
    }

    #[test]
    fn slope_and_available_length() {
        let mut rwys = [runway(("09", 85.0, 50.0), ("27", 265.0, 60.0), 2000.0)];
        rwys[0].le.as_mut().unwrap().displaced_threshold = Some(Length::ft(300.0));

        let sel = select_runway(&rwys, Some(&Wind::kt(90.0, 10.0))).unwrap();
        assert!((sel.slope.unwrap() - 0.5).abs() < 1e-4);
        assert_eq!(sel.available, Some(Length::ft(1700.0)));

        let sel = select_runway(&rwys, Some(&Wind::kt(270.0, 10.0))).unwrap();
        assert_eq!(sel.designator, "27");
        assert!((sel.slope.unwrap() + 0.5).abs() < 1e-4);
        assert_eq!(sel.available, Some(Length::ft(2000.0)));
    }

    #[test]
    fn no_wind_selects_first_end() {
        let rwys = [
            runway(("05", 50.0, 0.0), ("23", 230.0, 0.0), 1000.0),
            runway(("09", 90.0, 0.0), ("27", 270.0, 0.0), 1000.0),
        ];

        let sel = select_runway(&rwys, None).unwrap();
        assert_eq!(sel.runway, 0);
        assert_eq!(sel.designator, "05");
        assert_eq!(sel.crosswind_side, None);
    }

    #[test]
    fn ties_keep_first() {
        let rwys = [
            runway(("36", 0.0, 0.0), ("18", 180.0, 0.0), 1000.0),
            runway(("36R", 0.0, 0.0), ("18L", 180.0, 0.0), 1000.0),
        ];
        let sel = select_runway(&rwys, Some(&Wind::kt(0.0, 10.0))).unwrap();
        assert_eq!(sel.designator, "36");
    }

    #[test]
    fn crosswind_dead_zone() {
        assert_eq!(CrosswindSide::of(Speed::kt(0.4)), None);
        assert_eq!(CrosswindSide::of(Speed::kt(-0.4)), None);
        assert_eq!(CrosswindSide::of(Speed::kt(-0.6)), Some(CrosswindSide::Left));
    }

    #[test]
    fn ends_without_heading_are_skipped() {
        let rwys = [Runway {
            le: Some(RunwayEnd {
                designator: "H1".to_string(),
                ..Default::default()
            }),
            ..Default::default()
        }];
        assert!(select_runway(&rwys, Some(&Wind::kt(0.0, 5.0))).is_none());
    }

    #[test]
    fn categorize_surfaces() {
        assert_eq!(RunwaySurface::categorize("CONC"), Some(RunwaySurface::PavementGood));
        assert_eq!(RunwaySurface::categorize("turf-f"), Some(RunwaySurface::GrassFair));
        assert_eq!(RunwaySurface::categorize("GRAVEL"), Some(RunwaySurface::GrassGood));
        assert_eq!(RunwaySurface::categorize("GRVL-F"), Some(RunwaySurface::Gravel));
        assert_eq!(RunwaySurface::categorize("Water"), Some(RunwaySurface::Water));
        assert_eq!(RunwaySurface::categorize(""), None);
        assert_eq!("DT".parse::<RunwaySurface>(), Ok(RunwaySurface::Dirt));
    }
}
