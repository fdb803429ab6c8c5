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

use chrono::NaiveTime;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::LegId;
use crate::aircraft::ClimbPerformance;
use crate::core::{Fuel, FuelFlow, FuelType, FuelUnit, MagneticVariation, Wind};
use crate::error::{Error, Result};
use crate::fc::triangle;
use crate::measurements::{Angle, Duration, DurationUnit, Length, LengthUnit, Speed, SpeedUnit};
use crate::nd::Waypoint;

/// What a leg is flown for.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum LegRole {
    #[default]
    Cruise,
    /// The leg climbs to the cruise level.
    Climb,
    /// The leg descents to the destination.
    Descent,
    /// The leg diverts to the alternate.
    Alternate,
}

impl LegRole {
    /// Infers the role of legs that were stored without one.
    ///
    /// A leg to the `alternate` is an alternate leg. Otherwise a descent or
    /// climb phase makes it a descent or climb leg.
    pub fn infer(input: &LegInput, alternate: Option<&Waypoint>) -> Self {
        let to_alternate = match (input.to.as_ref(), alternate) {
            (Some(to), Some(alternate)) => to.is_same(alternate),
            _ => false,
        };

        if to_alternate {
            Self::Alternate
        } else if input.descent.is_some() {
            Self::Descent
        } else if input.climb.is_some() {
            Self::Climb
        } else {
            Self::Cruise
        }
    }
}

/// A climb or descent flown within a leg.
///
/// The distance is the ground distance the phase takes out of the leg's
/// distance.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct VerticalPhase {
    pub tas: Speed,
    pub dist: Length,
    pub fuel: Fuel,
    /// The wind during the phase. The leg's wind applies if absent.
    pub wind: Option<Wind>,
}

pub type ClimbPhase = VerticalPhase;
pub type DescentPhase = VerticalPhase;

impl VerticalPhase {
    pub fn new(tas: Speed, dist: Length, fuel: Fuel, wind: Option<Wind>) -> Self {
        Self {
            tas,
            dist,
            fuel,
            wind,
        }
    }

    /// Creates the phase from the still air performance of a climb or descent
    /// flown on the true course `tc`.
    ///
    /// The ground distance follows from the phase's time and the ground speed
    /// at the average TAS.
    pub fn from_performance(
        perf: &ClimbPerformance,
        tc: Angle,
        wind: Option<Wind>,
    ) -> Result<Self> {
        let Some(tas) = perf.avg_tas() else {
            return Ok(Self::new(Speed::kt(0.0), Length::nm(0.0), perf.fuel, wind));
        };

        let t = triangle::solve(tc, tas, wind.as_ref(), MagneticVariation::default())?;

        Ok(Self {
            tas: tas.convert_to(SpeedUnit::Knots),
            dist: (t.gs * perf.time).convert_to(LengthUnit::NauticalMiles),
            fuel: perf.fuel,
            wind,
        })
    }
}

/// The values of a leg set by the user.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegInput {
    pub role: LegRole,
    /// True course.
    pub tc: Angle,
    /// Distance from point to point, including climb and descent.
    pub dist: Length,
    pub tas: Speed,
    pub var: MagneticVariation,
    pub wind: Option<Wind>,
    pub ff: FuelFlow,
    /// The unit fuel quantities of the leg are presented in.
    pub fuel_unit: FuelUnit,
    /// Departure time if the leg doesn't continue the previous leg's clock.
    pub departure_time: Option<NaiveTime>,
    pub climb: Option<ClimbPhase>,
    pub descent: Option<DescentPhase>,
    pub additional_fuel: Option<Fuel>,
    pub approach_landing_fuel: Option<Fuel>,
    pub from: Option<Waypoint>,
    pub to: Option<Waypoint>,
    pub checkpoints: Vec<Waypoint>,
}

impl LegInput {
    pub fn new(tc: Angle, dist: Length, tas: Speed, ff: FuelFlow) -> Self {
        Self {
            role: LegRole::Cruise,
            tc,
            dist,
            tas,
            var: MagneticVariation::default(),
            wind: None,
            ff,
            fuel_unit: FuelUnit::default(),
            departure_time: None,
            climb: None,
            descent: None,
            additional_fuel: None,
            approach_landing_fuel: None,
            from: None,
            to: None,
            checkpoints: Vec::new(),
        }
    }

    /// Creates the leg between two points with known coordinates. Course and
    /// distance are geodesic.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if a point has no coordinate.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn between(from: Waypoint, to: Waypoint, tas: Speed, ff: FuelFlow) -> Result<Self> {
        let (a, b) = match (from.coordinate, to.coordinate) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(Error::invalid(format!(
                    "leg from {from} to {to} needs coordinates"
                )))
            }
        };

        Ok(Self {
            from: Some(from),
            to: Some(to),
            ..Self::new(
                a.bearing(&b),
                a.dist(&b).convert_to(LengthUnit::NauticalMiles),
                tas,
                ff,
            )
        })
    }

    /// The fuel type the leg burns.
    pub fn fuel_type(&self) -> FuelType {
        self.ff.hourly().fuel_type
    }
}

/// Cumulative values of all legs before a leg.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CarryOver {
    pub elapsed: Duration,
    pub elapsed_dist: Length,
    pub fuel_used: Fuel,
    /// The time the clock was last set, by the plan or by a leg.
    pub departure_time: Option<NaiveTime>,
    /// The time elapsed since the departure time.
    pub since_departure: Duration,
}

impl CarryOver {
    /// The carry-over of the first leg.
    pub fn start(departure_time: Option<NaiveTime>, fuel_type: FuelType) -> Self {
        Self {
            elapsed: Duration::min(0.0),
            elapsed_dist: Length::nm(0.0),
            fuel_used: Fuel::zero(fuel_type),
            departure_time,
            since_departure: Duration::min(0.0),
        }
    }

    /// The carry-over of the leg following the leg with this carry-over, the
    /// `input` and its computed `output`.
    pub fn after(&self, input: &LegInput, output: &LegOutput) -> Self {
        let (departure_time, since_departure) = self.clock(input);
        Self {
            elapsed: (self.elapsed + output.ete).convert_to(DurationUnit::Minutes),
            elapsed_dist: (self.elapsed_dist + input.dist).convert_to(LengthUnit::NauticalMiles),
            fuel_used: self.fuel_used + output.fuel,
            departure_time,
            since_departure: (since_departure + output.ete).convert_to(DurationUnit::Minutes),
        }
    }

    /// The departure time a leg's clock runs from and the time elapsed since
    /// then when the leg starts. A leg's own departure time restarts the
    /// clock.
    pub(crate) fn clock(&self, input: &LegInput) -> (Option<NaiveTime>, Duration) {
        match input.departure_time {
            Some(t) => (Some(t), Duration::min(0.0)),
            None => (self.departure_time, self.since_departure),
        }
    }
}

/// The values derived for a leg.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegOutput {
    /// Ground speed in cruise.
    pub gs: Speed,
    /// Wind correction angle in degrees, positive right of course.
    pub wca: f32,
    pub th: Angle,
    pub mh: Angle,
    /// Compass heading to steer.
    pub ch: Angle,
    pub climb_time: Duration,
    pub cruise_time: Duration,
    pub descent_time: Duration,
    pub ete: Duration,
    pub cruise_dist: Length,
    /// Fuel burned on the leg.
    pub fuel: Fuel,
    /// Additional and approach/landing fuel planned for the leg, not burned.
    pub reserve: Fuel,
    /// Fuel on board at the end of the leg if the fuel on board is known.
    pub fuel_remaining: Option<Fuel>,
    pub arrival: Option<NaiveTime>,
    /// The cruise wind. `None` if the leg was computed without wind.
    pub wind: Option<Wind>,
}

impl LegOutput {
    /// The arrival time formatted as `HHMM`.
    pub fn arrival_hhmm(&self) -> Option<String> {
        self.arrival.map(|t| t.format("%H%M").to_string())
    }
}

/// A leg of a flight plan.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    pub(super) id: LegId,
    pub(super) index: usize,
    pub(super) input: LegInput,
    pub(super) carry: CarryOver,
    #[cfg_attr(feature = "serde", serde(skip))]
    pub(super) output: Option<LegOutput>,
}

impl Leg {
    pub(super) fn new(id: LegId, input: LegInput) -> Self {
        let fuel_type = input.fuel_type();
        Self {
            id,
            index: 0,
            input,
            carry: CarryOver::start(None, fuel_type),
            output: None,
        }
    }

    pub fn id(&self) -> LegId {
        self.id
    }

    /// The position of the leg within the plan.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn input(&self) -> &LegInput {
        &self.input
    }

    pub fn carry(&self) -> &CarryOver {
        &self.carry
    }

    /// The computed values, `None` until the plan is computed.
    pub fn output(&self) -> Option<&LegOutput> {
        self.output.as_ref()
    }

    pub fn role(&self) -> LegRole {
        self.input.role
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::measurements::AngleUnit;

    fn input() -> LegInput {
        LegInput::new(
            Angle::t(90.0),
            Length::nm(30.0),
            Speed::kt(100.0),
            FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas),
        )
    }

    #[test]
    fn infer_role() {
        let alternate = Waypoint::new("EDHL");

        let mut leg = input();
        assert_eq!(LegRole::infer(&leg, Some(&alternate)), LegRole::Cruise);

        leg.climb = Some(ClimbPhase::new(
            Speed::kt(75.0),
            Length::nm(5.0),
            Fuel::zero(FuelType::AvGas),
            None,
        ));
        assert_eq!(LegRole::infer(&leg, Some(&alternate)), LegRole::Climb);

        leg.descent = leg.climb;
        assert_eq!(LegRole::infer(&leg, None), LegRole::Descent);

        leg.to = Some(Waypoint::new("edhl"));
        assert_eq!(LegRole::infer(&leg, Some(&alternate)), LegRole::Alternate);
    }

    #[test]
    fn between_uses_geodesic_course() {
        let leg = LegInput::between(
            Waypoint::at("EDDH", coord!(53.63040161, 9.98822975)),
            Waypoint::at("EDHL", coord!(53.80540085, 10.71920013)),
            Speed::kt(100.0),
            FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas),
        )
        .unwrap();

        assert_eq!(leg.tc.unit(), &AngleUnit::TrueNorth);
        assert_eq!(leg.tc.value().round(), 68.0);
        assert_eq!(leg.dist.value().round(), 28.0);

        assert!(LegInput::between(
            Waypoint::new("A"),
            Waypoint::new("B"),
            Speed::kt(100.0),
            FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas),
        )
        .is_err());
    }

    #[test]
    fn phase_from_performance_in_headwind() {
        let perf = ClimbPerformance {
            time: Duration::min(6.0),
            dist: Length::nm(8.0),
            fuel: Fuel::from_quantity(3.0, FuelUnit::Liters, FuelType::AvGas),
        };

        // 80 kt average TAS against 20 kt headwind
        let phase =
            VerticalPhase::from_performance(&perf, Angle::t(0.0), Some(Wind::kt(0.0, 20.0)))
                .unwrap();
        assert!((phase.tas.knots() - 80.0).abs() < 1e-3);
        assert!((phase.dist.nautical_miles() - 6.0).abs() < 1e-3);
    }

    #[test]
    fn carry_after_accumulates() {
        let start = CarryOver::start(NaiveTime::from_hms_opt(9, 0, 0), FuelType::AvGas);
        let output = LegOutput {
            gs: Speed::kt(100.0),
            wca: 0.0,
            th: Angle::t(90.0),
            mh: Angle::m(90.0),
            ch: Angle::c(90.0),
            climb_time: Duration::min(0.0),
            cruise_time: Duration::min(18.0),
            descent_time: Duration::min(0.0),
            ete: Duration::min(18.0),
            cruise_dist: Length::nm(30.0),
            fuel: Fuel::from_quantity(9.0, FuelUnit::Liters, FuelType::AvGas),
            reserve: Fuel::zero(FuelType::AvGas),
            fuel_remaining: None,
            arrival: NaiveTime::from_hms_opt(9, 18, 0),
            wind: None,
        };

        let next = start.after(&input(), &output);
        assert_eq!(next.elapsed.minutes(), 18.0);
        assert_eq!(next.elapsed_dist.nautical_miles(), 30.0);
        assert!((next.fuel_used.quantity(FuelUnit::Liters) - 9.0).abs() < 1e-4);
        assert_eq!(next.departure_time, NaiveTime::from_hms_opt(9, 0, 0));
        assert_eq!(next.since_departure.minutes(), 18.0);
    }

    #[test]
    fn own_departure_time_restarts_clock() {
        let carry = CarryOver {
            elapsed: Duration::min(45.0),
            since_departure: Duration::min(45.0),
            ..CarryOver::start(NaiveTime::from_hms_opt(9, 0, 0), FuelType::AvGas)
        };

        let mut leg = input();
        assert_eq!(
            carry.clock(&leg),
            (NaiveTime::from_hms_opt(9, 0, 0), Duration::min(45.0))
        );

        leg.departure_time = NaiveTime::from_hms_opt(14, 0, 0);
        assert_eq!(
            carry.clock(&leg),
            (NaiveTime::from_hms_opt(14, 0, 0), Duration::min(0.0))
        );
    }
}
