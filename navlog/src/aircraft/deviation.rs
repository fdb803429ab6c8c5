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

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::measurements::{normalize, shortest_angular_distance, Angle, AngleUnit};

/// The heading to steer on the compass for a magnetic heading.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DeviationEntry {
    /// Magnetic heading in degrees.
    pub for_heading: f32,
    /// Compass heading in degrees.
    pub steer_heading: f32,
}

impl DeviationEntry {
    pub fn new(for_heading: f32, steer_heading: f32) -> Self {
        Self {
            for_heading,
            steer_heading,
        }
    }

    /// The deviation of this entry in degrees.
    pub fn deviation(&self) -> f32 {
        shortest_angular_distance(self.for_heading, self.steer_heading)
    }
}

/// A compass deviation card.
///
/// The table is periodic on 360°. Between two entries the compass heading is
/// interpolated along the shorter arc, which also holds for the pair of the
/// last and the first entry across north:
///
/// ```
/// # use navlog::aircraft::DeviationTable;
/// # use navlog::measurements::Angle;
/// let table = DeviationTable::from_pairs(&[(0.0, 2.0), (350.0, 348.0)])?;
/// let ch = table.steer(Angle::m(355.0))?;
/// assert!((ch.value() - 355.0).abs() < 0.001);
/// # Ok::<(), navlog::Error>(())
/// ```
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(try_from = "Vec<DeviationEntry>", into = "Vec<DeviationEntry>")
)]
pub struct DeviationTable {
    entries: Vec<DeviationEntry>,
}

impl DeviationTable {
    /// Creates a table from at least two entries.
    ///
    /// Headings are normalized and the entries ordered by magnetic heading.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if there are less than two entries or a
    /// heading is not finite.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn new(entries: Vec<DeviationEntry>) -> Result<Self> {
        if entries.len() < 2 {
            return Err(Error::invalid(format!(
                "deviation table needs at least two entries, got {}",
                entries.len()
            )));
        }

        if entries
            .iter()
            .any(|e| !e.for_heading.is_finite() || !e.steer_heading.is_finite())
        {
            return Err(Error::invalid("deviation table contains non-finite heading"));
        }

        let mut entries: Vec<DeviationEntry> = entries
            .into_iter()
            .map(|e| DeviationEntry::new(normalize(e.for_heading), e.steer_heading))
            .collect();
        entries.sort_by(|a, b| a.for_heading.total_cmp(&b.for_heading));

        Ok(Self { entries })
    }

    /// Creates a table from `(for, steer)` pairs.
    pub fn from_pairs(pairs: &[(f32, f32)]) -> Result<Self> {
        Self::new(
            pairs
                .iter()
                .map(|(for_heading, steer_heading)| DeviationEntry::new(*for_heading, *steer_heading))
                .collect(),
        )
    }

    pub fn entries(&self) -> &[DeviationEntry] {
        &self.entries
    }

    /// Returns the compass heading to steer for the magnetic heading `mh`.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the table has less than two entries or
    /// the heading is not finite.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn steer(&self, mh: Angle) -> Result<Angle> {
        if self.entries.len() < 2 {
            return Err(Error::invalid("deviation table needs at least two entries"));
        }

        if !mh.is_finite() {
            return Err(Error::invalid("magnetic heading is not finite"));
        }

        let heading = normalize(*mh.value());

        if let Some(entry) = self.entries.iter().find(|e| e.for_heading == heading) {
            return Ok(Angle::c(entry.steer_heading));
        }

        let (lower, upper) = self.bracket(heading);

        let span = normalize(upper.for_heading - lower.for_heading);
        let factor = if span == 0.0 {
            0.0
        } else {
            normalize(heading - lower.for_heading) / span
        };

        let delta = shortest_angular_distance(lower.steer_heading, upper.steer_heading);
        Ok(Angle::new(
            lower.steer_heading + factor * delta,
            AngleUnit::CompassNorth,
        ))
    }

    /// The deviation in degrees at the magnetic heading `mh`, positive if the
    /// compass heading is to the right.
    pub fn deviation_at(&self, mh: Angle) -> Result<f32> {
        let ch = self.steer(mh)?;
        Ok(deviation(&mh, &ch))
    }

    // Entries enclosing the heading. Headings before the first or after the
    // last entry are enclosed by the last and the first entry.
    fn bracket(&self, heading: f32) -> (&DeviationEntry, &DeviationEntry) {
        let n = self.entries.len();
        match self.entries.iter().position(|e| e.for_heading > heading) {
            Some(0) | None => (&self.entries[n - 1], &self.entries[0]),
            Some(i) => (&self.entries[i - 1], &self.entries[i]),
        }
    }
}

impl TryFrom<Vec<DeviationEntry>> for DeviationTable {
    type Error = Error;

    fn try_from(entries: Vec<DeviationEntry>) -> Result<Self> {
        Self::new(entries)
    }
}

impl From<DeviationTable> for Vec<DeviationEntry> {
    fn from(table: DeviationTable) -> Self {
        table.entries
    }
}

/// Writes the table as pair list, e.g. `000:002, 090:088`.
impl fmt::Display for DeviationTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.entries.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(
                f,
                "{:03}:{:03}",
                e.for_heading.round() as i32,
                normalize(e.steer_heading).round() as i32 % 360
            )?;
        }
        Ok(())
    }
}

/// The deviation between the `magnetic` and the `compass` heading in degrees.
pub fn deviation(magnetic: &Angle, compass: &Angle) -> f32 {
    shortest_angular_distance(*magnetic.value(), *compass.value())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card() -> DeviationTable {
        DeviationTable::from_pairs(&[
            (0.0, 2.0),
            (90.0, 88.0),
            (180.0, 183.0),
            (270.0, 268.0),
        ])
        .unwrap()
    }

    #[test]
    fn needs_two_entries() {
        assert!(matches!(
            DeviationTable::from_pairs(&[(0.0, 2.0)]),
            Err(Error::InvalidInput(_))
        ));
        assert!(DeviationTable::from_pairs(&[]).is_err());
        assert!(DeviationTable::from_pairs(&[(0.0, 2.0), (f32::NAN, 1.0)]).is_err());
    }

    #[test]
    fn exact_entry_is_returned() {
        assert_eq!(*card().steer(Angle::m(90.0)).unwrap().value(), 88.0);
        assert_eq!(card().steer(Angle::m(90.0)).unwrap().unit(), &AngleUnit::CompassNorth);
    }

    #[test]
    fn interpolates_between_entries() {
        let ch = card().steer(Angle::m(45.0)).unwrap();
        assert!((ch.value() - 45.0).abs() < 1e-4);

        let ch = card().steer(Angle::m(135.0)).unwrap();
        assert!((ch.value() - 135.5).abs() < 1e-4);
    }

    #[test]
    fn wraps_across_north() {
        // between 270 → 268 and 0 → 2
        let ch = card().steer(Angle::m(315.0)).unwrap();
        assert!((ch.value() - 315.0).abs() < 1e-4);

        let table = DeviationTable::from_pairs(&[(0.0, 2.0), (350.0, 348.0)]).unwrap();
        let ch = table.steer(Angle::m(355.0)).unwrap();
        assert!((ch.value() - 355.0).abs() < 1e-4);
    }

    #[test]
    fn negative_steer_headings() {
        let table = DeviationTable::from_pairs(&[(0.0, -5.0), (180.0, 175.0)]).unwrap();
        let ch = table.steer(Angle::m(0.0)).unwrap();
        assert_eq!(*ch.value(), 355.0);

        let ch = table.steer(Angle::m(10.0)).unwrap();
        assert!((ch.value() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn unordered_input_is_sorted() {
        let table = DeviationTable::from_pairs(&[(270.0, 268.0), (0.0, 2.0), (90.0, 88.0)]).unwrap();
        let headings: Vec<f32> = table.entries().iter().map(|e| e.for_heading).collect();
        assert_eq!(headings, vec![0.0, 90.0, 270.0]);
    }

    #[test]
    fn coinciding_headings_do_not_divide_by_zero() {
        let table = DeviationTable::from_pairs(&[(90.0, 92.0), (90.0, 88.0)]).unwrap();
        let ch = table.steer(Angle::m(100.0)).unwrap();
        assert!(ch.is_finite());
    }

    #[test]
    fn deviation_is_shortest_distance() {
        assert_eq!(deviation(&Angle::m(359.0), &Angle::c(1.0)), 2.0);
        assert_eq!(deviation(&Angle::m(90.0), &Angle::c(88.0)), -2.0);

        let dev = card().deviation_at(Angle::m(180.0)).unwrap();
        assert!((dev - 3.0).abs() < 1e-4);
    }

    #[test]
    fn display_pair_list() {
        assert_eq!(card().to_string(), "000:002, 090:088, 180:183, 270:268");
    }
}
