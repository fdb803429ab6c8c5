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

use log::trace;

use super::lerp;
use crate::core::{Fuel, FuelFlow};
use crate::error::{Error, Result};
use crate::measurements::{
    Altitude, Duration, DurationUnit, Length, LengthUnit, Speed, SpeedUnit, Temperature,
};

/// Performance within a band of pressure altitudes.
///
/// For a descent table the rate is the rate of descent.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimbBand {
    pub from: Altitude,
    pub to: Altitude,
    pub rate: Speed,
    pub tas: Speed,
    pub ff: FuelFlow,
}

impl ClimbBand {
    pub fn new(from: Altitude, to: Altitude, rate: Speed, tas: Speed, ff: FuelFlow) -> Self {
        Self {
            from,
            to,
            rate,
            tas,
            ff,
        }
    }
}

/// The bands of a table that apply at one outside air temperature.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimbGroup {
    /// The temperature this group applies to. A group without temperature
    /// applies to any.
    pub oat: Option<Temperature>,
    pub bands: Vec<ClimbBand>,
}

/// Time, still air distance and fuel to change altitude.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimbPerformance {
    pub time: Duration,
    pub dist: Length,
    pub fuel: Fuel,
}

impl ClimbPerformance {
    /// The average TAS over the whole climb or descent.
    pub fn avg_tas(&self) -> Option<Speed> {
        (self.time.to_si() > 0.0).then(|| self.dist / self.time)
    }

    fn interpolate(&self, other: &Self, t: f32) -> Self {
        Self {
            time: Duration::min(lerp(self.time.minutes(), other.time.minutes(), t)),
            dist: Length::nm(lerp(
                self.dist.nautical_miles(),
                other.dist.nautical_miles(),
                t,
            )),
            fuel: self.fuel * (1.0 - t) + other.fuel * t,
        }
    }
}

/// A climb (or descent) table of altitude bands, optionally grouped by OAT.
///
/// ```
/// # use navlog::aircraft::{ClimbBand, ClimbTable};
/// # use navlog::core::{FuelFlow, FuelType, FuelUnit};
/// # use navlog::measurements::{Altitude, Speed};
/// let ff = FuelFlow::per_hour(36.0, FuelUnit::Liters, FuelType::AvGas);
/// let table = ClimbTable::new(vec![
///     ClimbBand::new(Altitude::ft(0.0), Altitude::ft(4000.0), Speed::fpm(700.0), Speed::kt(80.0), ff),
///     ClimbBand::new(Altitude::ft(4000.0), Altitude::ft(8000.0), Speed::fpm(500.0), Speed::kt(80.0), ff),
/// ])?;
///
/// let climb = table.climb(Altitude::ft(1000.0), Altitude::ft(5000.0), None)?;
/// // 3000 ft at 700 fpm and 1000 ft at 500 fpm
/// assert!((climb.time.minutes() - 6.286).abs() < 0.01);
/// # Ok::<(), navlog::Error>(())
/// ```
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ClimbTable {
    groups: Vec<ClimbGroup>,
}

impl ClimbTable {
    /// Creates a table that applies at any temperature.
    pub fn new(bands: Vec<ClimbBand>) -> Result<Self> {
        Self::by_oat(vec![ClimbGroup { oat: None, bands }])
    }

    /// Creates a table with groups of bands for different temperatures.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if there is no band, a band has a zero or
    /// negative height or rate, or more than one group lacks a temperature.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn by_oat(mut groups: Vec<ClimbGroup>) -> Result<Self> {
        if groups.is_empty() || groups.iter().any(|g| g.bands.is_empty()) {
            return Err(Error::invalid("climb table without bands"));
        }

        if groups.len() > 1 && groups.iter().any(|g| g.oat.is_none()) {
            return Err(Error::invalid(
                "climb table with several groups needs a temperature per group",
            ));
        }

        for band in groups.iter().flat_map(|g| g.bands.iter()) {
            if !band.from.is_finite()
                || !band.to.is_finite()
                || band.to <= band.from
                || band.rate.to_si() <= 0.0
                || band.tas.to_si() < 0.0
            {
                return Err(Error::invalid(format!(
                    "implausible climb band from {} to {}",
                    band.from, band.to
                )));
            }
        }

        for group in groups.iter_mut() {
            group
                .bands
                .sort_by(|a, b| a.from.to_si().total_cmp(&b.from.to_si()));
        }
        groups.sort_by(|a, b| {
            let a = a.oat.map(|t| t.to_si()).unwrap_or_default();
            let b = b.oat.map(|t| t.to_si()).unwrap_or_default();
            a.total_cmp(&b)
        });

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[ClimbGroup] {
        &self.groups
    }

    /// Climb from the pressure altitude `from` to `to` at the `oat`.
    ///
    /// Between two temperature groups the result is interpolated linearly.
    /// Temperatures outside of the groups use the nearest group.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if `to` is below `from` or the altitudes
    /// are not covered by the table.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn climb(
        &self,
        from: Altitude,
        to: Altitude,
        oat: Option<Temperature>,
    ) -> Result<ClimbPerformance> {
        if to < from {
            return Err(Error::invalid(format!("can't climb from {from} down to {to}")));
        }
        self.transition(from, to, oat)
    }

    /// Descent from the pressure altitude `from` to `to` at the `oat`, where
    /// the table's rates are rates of descent.
    pub fn descent(
        &self,
        from: Altitude,
        to: Altitude,
        oat: Option<Temperature>,
    ) -> Result<ClimbPerformance> {
        if to > from {
            return Err(Error::invalid(format!("can't descent from {from} up to {to}")));
        }
        self.transition(to, from, oat)
    }

    fn transition(
        &self,
        low: Altitude,
        high: Altitude,
        oat: Option<Temperature>,
    ) -> Result<ClimbPerformance> {
        if !low.is_finite() || !high.is_finite() {
            return Err(Error::invalid("altitudes must be finite"));
        }

        let (first, last) = match (self.groups.first(), self.groups.last()) {
            (Some(first), Some(last)) => (first, last),
            _ => return Err(Error::invalid("climb table without bands")),
        };

        let oat = match oat {
            Some(oat) if self.groups.len() > 1 => oat,
            _ => return sum_bands(&first.bands, low, high),
        };

        let lower = self
            .groups
            .iter()
            .rev()
            .find(|g| g.oat.is_some_and(|t| t <= oat))
            .unwrap_or(first);
        let upper = self
            .groups
            .iter()
            .find(|g| g.oat.is_some_and(|t| t >= oat))
            .unwrap_or(last);

        let lo = sum_bands(&lower.bands, low, high)?;
        match (lower.oat, upper.oat) {
            (Some(t0), Some(t1)) if t1 > t0 => {
                let hi = sum_bands(&upper.bands, low, high)?;
                let t = (oat.to_si() - t0.to_si()) / (t1.to_si() - t0.to_si());
                trace!("interpolating climb between {t0} and {t1} at {t}");
                Ok(lo.interpolate(&hi, t))
            }
            _ => Ok(lo),
        }
    }
}

// Sums the contributions of all bands between low and high. Partial bands
// are prorated by the feet climbed within them.
fn sum_bands(bands: &[ClimbBand], low: Altitude, high: Altitude) -> Result<ClimbPerformance> {
    let (low_ft, high_ft) = (low.feet(), high.feet());
    let mut covered = 0.0;
    let mut minutes = 0.0;
    let mut dist = Length::nm(0.0);
    let mut fuel: Option<Fuel> = None;

    for band in bands {
        let overlap = high_ft.min(band.to.feet()) - low_ft.max(band.from.feet());
        if overlap <= 0.0 {
            continue;
        }

        let fpm = band.rate.convert_to(SpeedUnit::FeetPerMinute);
        let time = Duration::min(overlap / fpm.value());
        covered += overlap;
        minutes += time.minutes();
        dist += band.tas * time;

        let burned = band.ff * time;
        fuel = Some(fuel.map_or(burned, |f| f + burned));
    }

    if high_ft - low_ft - covered > 1.0 {
        return Err(Error::invalid(format!(
            "climb table doesn't cover {low} to {high}"
        )));
    }

    let fuel_type = bands
        .first()
        .map(|b| b.ff.hourly().fuel_type)
        .unwrap_or_default();

    Ok(ClimbPerformance {
        time: Duration::min(minutes).convert_to(DurationUnit::Minutes),
        dist: dist.convert_to(LengthUnit::NauticalMiles),
        fuel: fuel.unwrap_or_else(|| Fuel::zero(fuel_type)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FuelType, FuelUnit};

    fn ff(l: f32) -> FuelFlow {
        FuelFlow::per_hour(l, FuelUnit::Liters, FuelType::AvGas)
    }

    fn bands(rate: f32) -> Vec<ClimbBand> {
        vec![
            ClimbBand::new(
                Altitude::ft(0.0),
                Altitude::ft(4000.0),
                Speed::fpm(rate),
                Speed::kt(80.0),
                ff(36.0),
            ),
            ClimbBand::new(
                Altitude::ft(4000.0),
                Altitude::ft(8000.0),
                Speed::fpm(rate / 2.0),
                Speed::kt(75.0),
                ff(36.0),
            ),
        ]
    }

    #[test]
    fn climb_within_one_band() {
        let table = ClimbTable::new(bands(800.0)).unwrap();
        let perf = table.climb(Altitude::ft(0.0), Altitude::ft(2000.0), None).unwrap();

        assert!((perf.time.minutes() - 2.5).abs() < 1e-4);
        // 80 kt for 2.5 min
        assert!((perf.dist.nautical_miles() - 3.333).abs() < 1e-3);
        assert!((perf.fuel.quantity(FuelUnit::Liters) - 1.5).abs() < 1e-3);
    }

    #[test]
    fn climb_across_bands_prorates() {
        let table = ClimbTable::new(bands(800.0)).unwrap();
        let perf = table.climb(Altitude::ft(2000.0), Altitude::ft(6000.0), None).unwrap();

        // 2000 ft at 800 fpm and 2000 ft at 400 fpm
        assert!((perf.time.minutes() - 7.5).abs() < 1e-4);
        let nm = 80.0 * 2.5 / 60.0 + 75.0 * 5.0 / 60.0;
        assert!((perf.dist.nautical_miles() - nm).abs() < 1e-3);
    }

    #[test]
    fn level_climb_is_zero() {
        let table = ClimbTable::new(bands(800.0)).unwrap();
        let perf = table.climb(Altitude::ft(3000.0), Altitude::ft(3000.0), None).unwrap();
        assert_eq!(perf.time.minutes(), 0.0);
        assert!(perf.avg_tas().is_none());
    }

    #[test]
    fn beyond_coverage_is_invalid() {
        let table = ClimbTable::new(bands(800.0)).unwrap();
        assert!(matches!(
            table.climb(Altitude::ft(0.0), Altitude::ft(9000.0), None),
            Err(Error::InvalidInput(_))
        ));
        assert!(table.climb(Altitude::ft(5000.0), Altitude::ft(1000.0), None).is_err());
    }

    #[test]
    fn descent_uses_table_downwards() {
        let table = ClimbTable::new(bands(800.0)).unwrap();
        let perf = table.descent(Altitude::ft(2000.0), Altitude::ft(0.0), None).unwrap();
        assert!((perf.time.minutes() - 2.5).abs() < 1e-4);
        assert!(table.descent(Altitude::ft(0.0), Altitude::ft(2000.0), None).is_err());
    }

    #[test]
    fn interpolates_between_temperatures() {
        let table = ClimbTable::by_oat(vec![
            ClimbGroup {
                oat: Some(Temperature::c(30.0)),
                bands: bands(400.0),
            },
            ClimbGroup {
                oat: Some(Temperature::c(0.0)),
                bands: bands(800.0),
            },
        ])
        .unwrap();

        let climb = |oat: f32| {
            table
                .climb(Altitude::ft(0.0), Altitude::ft(2000.0), Some(Temperature::c(oat)))
                .unwrap()
                .time
                .minutes()
        };

        assert!((climb(0.0) - 2.5).abs() < 1e-4);
        assert!((climb(30.0) - 5.0).abs() < 1e-4);
        assert!((climb(15.0) - 3.75).abs() < 1e-3);
        // clamped outside of the groups
        assert!((climb(-20.0) - 2.5).abs() < 1e-4);
        assert!((climb(40.0) - 5.0).abs() < 1e-4);
    }

    #[test]
    fn rejects_empty_and_degenerate_tables() {
        assert!(ClimbTable::new(vec![]).is_err());
        assert!(ClimbTable::new(vec![ClimbBand::new(
            Altitude::ft(1000.0),
            Altitude::ft(1000.0),
            Speed::fpm(500.0),
            Speed::kt(80.0),
            ff(30.0),
        )])
        .is_err());
    }
}
