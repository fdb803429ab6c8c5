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

//! Flight planning.
//!
//! A [`FlightPlan`] owns an ordered list of [`Leg`]s. Every change to the
//! legs recomputes the changed leg and all legs after it. The change is only
//! applied if all legs compute, otherwise the plan stays as it was.
//!
//! ```
//! # use navlog::prelude::*;
//! # use navlog::measurements::{Angle, Length, Speed};
//! let mut plan = FlightPlanBuilder::new().name("EDDH-EDHL").build()?;
//!
//! let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);
//! let (id, _) = plan.add_leg(LegInput::new(Angle::t(68.0), Length::nm(28.0), Speed::kt(112.0), ff))?;
//!
//! let output = plan.leg(id).and_then(|leg| leg.output()).unwrap();
//! assert!((output.ete.minutes() - 15.0).abs() < 0.01);
//! # Ok::<(), navlog::Error>(())
//! ```

use std::fmt;
use std::hash::{DefaultHasher, Hash, Hasher};
use std::ops::Range;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{NaiveDate, NaiveTime, Utc};
use log::{debug, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod builder;
pub mod calc;
mod leg;
mod totals;

pub use builder::FlightPlanBuilder;
pub use calc::{compute_leg, LegContext};
pub use leg::{
    CarryOver, ClimbPhase, DescentPhase, Leg, LegInput, LegOutput, LegRole, VerticalPhase,
};
pub use totals::PlanTotals;

use crate::aircraft::{Aircraft, CruisePerformance};
use crate::core::{Fuel, FuelFlow, FuelType, VerticalDistance, Wind};
use crate::error::{Error, Result};
use crate::fc::atmosphere;
use crate::measurements::{Altitude, Angle, Pressure, Temperature};
use crate::nd::Waypoint;

/// Identifier of a flight plan.
#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PlanId(String);

impl PlanId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates an identifier from the plan's `name` and the current time.
    pub fn generate(name: &str) -> Self {
        static COUNTER: AtomicU64 = AtomicU64::new(0);

        let mut hasher = DefaultHasher::new();
        name.hash(&mut hasher);
        Utc::now().timestamp_nanos_opt().hash(&mut hasher);
        COUNTER.fetch_add(1, Ordering::Relaxed).hash(&mut hasher);

        Self(format!("{:016x}", hasher.finish()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for PlanId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Identifier of a leg, unique within its plan.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegId(u32);

impl LegId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for LegId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A flight plan built by the [`FlightPlanBuilder`].
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FlightPlan {
    id: PlanId,
    name: String,
    date: Option<NaiveDate>,
    departure_time: Option<NaiveTime>,
    cruise_level: Option<VerticalDistance>,
    cruise_power: Option<f32>,
    departure: Option<Waypoint>,
    destination: Option<Waypoint>,
    alternate: Option<Waypoint>,
    fuel_type: FuelType,
    fuel_on_board: Option<Fuel>,
    aircraft: Option<Aircraft>,
    legs: Vec<Leg>,
    next_leg_id: u32,
}

impl FlightPlan {
    pub fn id(&self) -> &PlanId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    /// The time the first leg departs.
    pub fn departure_time(&self) -> Option<NaiveTime> {
        self.departure_time
    }

    pub fn cruise_level(&self) -> Option<&VerticalDistance> {
        self.cruise_level.as_ref()
    }

    /// Cruise power in percent.
    pub fn cruise_power(&self) -> Option<f32> {
        self.cruise_power
    }

    pub fn departure(&self) -> Option<&Waypoint> {
        self.departure.as_ref()
    }

    pub fn destination(&self) -> Option<&Waypoint> {
        self.destination.as_ref()
    }

    pub fn alternate(&self) -> Option<&Waypoint> {
        self.alternate.as_ref()
    }

    pub fn fuel_type(&self) -> FuelType {
        self.fuel_type
    }

    pub fn fuel_on_board(&self) -> Option<&Fuel> {
        self.fuel_on_board.as_ref()
    }

    pub fn aircraft(&self) -> Option<&Aircraft> {
        self.aircraft.as_ref()
    }

    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    pub fn leg(&self, id: LegId) -> Option<&Leg> {
        self.legs.iter().find(|leg| leg.id == id)
    }

    /// The index of the leg with the `id`.
    pub fn position(&self, id: LegId) -> Option<usize> {
        self.legs.iter().position(|leg| leg.id == id)
    }

    /// Returns `true` if every leg has its output computed.
    pub fn is_computed(&self) -> bool {
        self.legs.iter().all(|leg| leg.output.is_some())
    }

    /// The values all legs are computed with.
    pub fn context(&self) -> LegContext<'_> {
        LegContext {
            deviation: self
                .aircraft
                .as_ref()
                .and_then(|ac| ac.deviation_table.as_ref()),
            departure_time: self.departure_time,
            fuel_type: self.fuel_type,
            fuel_on_board: self.fuel_on_board,
        }
    }

    /// Appends a leg.
    ///
    /// Returns the new leg's identifier and the indices of the recomputed
    /// legs.
    pub fn add_leg(&mut self, input: LegInput) -> Result<(LegId, Range<usize>)> {
        self.insert_leg(self.legs.len(), input)
    }

    /// Inserts a leg at the `index`, shifting all legs after it.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the index is past the end of the legs or
    /// any leg from the index on fails to compute.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn insert_leg(&mut self, index: usize, input: LegInput) -> Result<(LegId, Range<usize>)> {
        if index > self.legs.len() {
            return Err(Error::invalid(format!(
                "can't insert leg at {index} into {} legs",
                self.legs.len()
            )));
        }

        let id = LegId(self.next_leg_id);
        let mut legs = self.legs.clone();
        legs.insert(index, Leg::new(id, input));

        let recomputed = self.commit(legs, index)?;
        self.next_leg_id += 1;

        debug!("inserted leg {id} at {index} into plan {}", self.id);
        Ok((id, recomputed))
    }

    /// Replaces the input of the leg with the `id`.
    ///
    /// # Errors
    ///
    /// Returns [`LegNotFound`] if there is no such leg. Nothing is
    /// recomputed then.
    ///
    /// [`LegNotFound`]: Error::LegNotFound
    pub fn update_leg(&mut self, id: LegId, input: LegInput) -> Result<Range<usize>> {
        let index = self.position(id).ok_or(Error::LegNotFound(id))?;

        let mut legs = self.legs.clone();
        legs[index].input = input;

        self.commit(legs, index)
    }

    /// Removes the leg with the `id`. The legs after it are recomputed.
    pub fn remove_leg(&mut self, id: LegId) -> Result<Range<usize>> {
        let index = self.position(id).ok_or(Error::LegNotFound(id))?;

        let mut legs = self.legs.clone();
        legs.remove(index);

        self.commit(legs, index)
    }

    /// Recomputes all legs.
    pub fn recompute(&mut self) -> Result<Range<usize>> {
        self.recompute_from(0)
    }

    /// Recomputes the legs from the index `from` on. Legs before it that were
    /// never computed are computed as well.
    pub fn recompute_from(&mut self, from: usize) -> Result<Range<usize>> {
        let legs = self.legs.clone();
        self.commit(legs, from)
    }

    /// The climb from an aerodrome at `elevation` to the plan's cruise level,
    /// flown on the true course `tc`.
    ///
    /// The performance is taken from the aircraft's climb table at the `oat`.
    /// The returned phase can be set as a leg's climb.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidInput`] if the plan has no aircraft or cruise level,
    /// the aircraft has no climb table, or the table doesn't cover the climb.
    ///
    /// [`InvalidInput`]: Error::InvalidInput
    pub fn climb_phase(
        &self,
        elevation: Altitude,
        qnh: Pressure,
        oat: Option<Temperature>,
        tc: Angle,
        wind: Option<Wind>,
    ) -> Result<ClimbPhase> {
        let from = atmosphere::pressure_altitude_at(elevation, qnh);
        let to = self.cruise_altitude(elevation, qnh)?;
        let perf = self.performance()?.climb(from, to, oat)?;

        debug!(
            "climb from {from:.0} to {to:.0}: {:.1}, {:.1}",
            perf.time, perf.fuel
        );
        VerticalPhase::from_performance(&perf, tc, wind)
    }

    /// The descent from the plan's cruise level to an aerodrome at
    /// `elevation`, flown on the true course `tc`.
    ///
    /// Without a descent table the aircraft's descent policy applies with the
    /// `cruise_ff`.
    pub fn descent_phase(
        &self,
        elevation: Altitude,
        qnh: Pressure,
        oat: Option<Temperature>,
        tc: Angle,
        wind: Option<Wind>,
        cruise_ff: &FuelFlow,
    ) -> Result<DescentPhase> {
        let from = self.cruise_altitude(elevation, qnh)?;
        let to = atmosphere::pressure_altitude_at(elevation, qnh);
        let perf = self.performance()?.descent(from, to, oat, cruise_ff)?;

        debug!(
            "descent from {from:.0} to {to:.0}: {:.1}, {:.1}",
            perf.time, perf.fuel
        );
        VerticalPhase::from_performance(&perf, tc, wind)
    }

    /// TAS and fuel flow at the plan's cruise level and power from the
    /// aircraft's cruise table.
    ///
    /// The cruise level is referenced to the ground at `elevation`.
    pub fn cruise_performance(&self, elevation: Altitude, qnh: Pressure) -> Result<CruisePerformance> {
        let power = self
            .cruise_power
            .ok_or_else(|| Error::invalid(format!("plan {} has no cruise power", self.id)))?;
        let table = self.performance()?.cruise_table.as_ref().ok_or_else(|| {
            Error::invalid(format!("plan {} has no cruise table", self.id))
        })?;

        table.lookup(self.cruise_altitude(elevation, qnh)?, power)
    }

    fn performance(&self) -> Result<&Aircraft> {
        self.aircraft
            .as_ref()
            .ok_or_else(|| Error::invalid(format!("plan {} has no aircraft", self.id)))
    }

    fn cruise_altitude(&self, elevation: Altitude, qnh: Pressure) -> Result<Altitude> {
        self.cruise_level
            .map(|level| level.to_pressure_altitude(qnh, elevation))
            .ok_or_else(|| Error::invalid(format!("plan {} has no cruise level", self.id)))
    }

    /// Totals over all computed legs.
    pub fn totals(&self) -> PlanTotals {
        PlanTotals::new(&self.legs, self.fuel_type, self.fuel_on_board)
    }

    // Computes the legs and replaces the plan's legs if all succeed.
    fn commit(&mut self, mut legs: Vec<Leg>, from: usize) -> Result<Range<usize>> {
        let from = legs
            .iter()
            .take(from)
            .position(|leg| leg.output.is_none())
            .unwrap_or(from);

        trace!("computing plan {} from leg {from}", self.id);
        let recomputed = calc::propagate(&mut legs, from, &self.context())?;

        self.legs = legs;
        Ok(recomputed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FuelFlow, FuelUnit, Wind};
    use crate::measurements::{Angle, Length, Speed};

    fn input(tc: f32, dist: f32) -> LegInput {
        LegInput {
            wind: Some(Wind::kt(270.0, 15.0)),
            ..LegInput::new(
                Angle::t(tc),
                Length::nm(dist),
                Speed::kt(110.0),
                FuelFlow::per_hour(28.0, FuelUnit::Liters, FuelType::AvGas),
            )
        }
    }

    fn plan() -> FlightPlan {
        FlightPlanBuilder::new()
            .name("test")
            .departure_time(NaiveTime::from_hms_opt(9, 0, 0).unwrap())
            .build()
            .unwrap()
    }

    #[test]
    fn generated_ids_differ() {
        assert_ne!(PlanId::generate("a"), PlanId::generate("a"));
        assert_eq!(PlanId::generate("a").as_str().len(), 16);
    }

    #[test]
    fn add_leg_assigns_ids_and_indices() {
        let mut plan = plan();
        let (a, r) = plan.add_leg(input(90.0, 20.0)).unwrap();
        assert_eq!(r, 0..1);
        let (b, r) = plan.add_leg(input(180.0, 20.0)).unwrap();
        assert_eq!(r, 1..2);

        assert_ne!(a, b);
        assert_eq!(plan.position(b), Some(1));
        assert_eq!(plan.legs()[1].index(), 1);
        assert!(plan.is_computed());
    }

    #[test]
    fn insert_shifts_following_legs() {
        let mut plan = plan();
        let (a, _) = plan.add_leg(input(90.0, 20.0)).unwrap();
        let (b, _) = plan.add_leg(input(180.0, 20.0)).unwrap();
        let (c, r) = plan.insert_leg(1, input(0.0, 10.0)).unwrap();

        assert_eq!(r, 1..3);
        let ids: Vec<LegId> = plan.legs().iter().map(|leg| leg.id()).collect();
        assert_eq!(ids, vec![a, c, b]);
        assert_eq!(plan.legs()[2].index(), 2);

        assert!(plan.insert_leg(9, input(0.0, 10.0)).is_err());
    }

    #[test]
    fn remove_recomputes_following_legs() {
        let mut plan = plan();
        let (a, _) = plan.add_leg(input(90.0, 20.0)).unwrap();
        plan.add_leg(input(180.0, 20.0)).unwrap();

        let r = plan.remove_leg(a).unwrap();
        assert_eq!(r, 0..1);
        assert_eq!(plan.legs()[0].index(), 0);
        assert_eq!(plan.legs()[0].carry().elapsed.minutes(), 0.0);

        assert_eq!(plan.remove_leg(a), Err(Error::LegNotFound(a)));
    }

    #[test]
    fn failed_update_keeps_plan() {
        let mut plan = plan();
        let (a, _) = plan.add_leg(input(90.0, 20.0)).unwrap();
        plan.add_leg(input(180.0, 20.0)).unwrap();
        let before = plan.clone();

        let mut broken = input(90.0, 20.0);
        broken.tas = Speed::kt(0.0);
        assert!(plan.update_leg(a, broken).is_err());
        assert_eq!(plan, before);

        // the leg id isn't consumed either
        let mut broken = input(90.0, 20.0);
        broken.tas = Speed::kt(0.0);
        assert!(plan.add_leg(broken).is_err());
        assert_eq!(plan, before);
    }

    #[test]
    fn update_of_unknown_leg() {
        let mut plan = plan();
        assert_eq!(
            plan.update_leg(LegId::new(7), input(0.0, 1.0)),
            Err(Error::LegNotFound(LegId::new(7)))
        );
    }

    #[test]
    fn uncomputed_legs_are_computed_first() {
        let mut plan = plan();
        plan.add_leg(input(90.0, 20.0)).unwrap();
        plan.add_leg(input(180.0, 20.0)).unwrap();

        for leg in plan.legs.iter_mut() {
            leg.output = None;
        }

        assert_eq!(plan.recompute_from(1).unwrap(), 0..2);
        assert!(plan.is_computed());
    }
}
