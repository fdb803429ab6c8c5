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

//! Computation of a leg and the propagation along the legs of a plan.
//!
//! A leg is a pure function of its input and its carry-over. Propagation
//! computes the legs in order, each leg's carry-over following from its
//! predecessor, in a single forward pass.

use std::ops::Range;

use chrono::{NaiveTime, TimeDelta};
use log::{debug, trace, warn};

use super::leg::{CarryOver, Leg, LegInput, LegOutput, VerticalPhase};
use crate::aircraft::DeviationTable;
use crate::core::{Fuel, FuelType};
use crate::error::{Error, Result};
use crate::fc::triangle;
use crate::measurements::{AngleUnit, Duration, DurationUnit, Length, LengthUnit};

/// Climb and descent may exceed the leg's distance by this amount in NM to
/// absorb rounding.
const DIST_TOLERANCE_NM: f32 = 0.001;

/// Arrival times are only computed for flights shorter than a year.
const MAX_ELAPSED_MIN: f32 = 366.0 * 24.0 * 60.0;

/// Plan wide values a leg is computed with.
#[derive(Copy, Clone, PartialEq, Debug, Default)]
pub struct LegContext<'a> {
    pub deviation: Option<&'a DeviationTable>,
    pub departure_time: Option<NaiveTime>,
    pub fuel_type: FuelType,
    pub fuel_on_board: Option<Fuel>,
}

/// Computes the output of a leg from its `input` and `carry` over.
///
/// # Errors
///
/// Returns [`InvalidInput`] if the wind triangle can't be solved for the leg
/// or a phase, a distance is negative or not finite, or climb and descent
/// are longer than the leg.
///
/// [`InvalidInput`]: Error::InvalidInput
pub fn compute_leg(input: &LegInput, carry: &CarryOver, ctx: &LegContext<'_>) -> Result<LegOutput> {
    let dist = input.dist.nautical_miles();
    if !dist.is_finite() || dist < 0.0 {
        return Err(Error::invalid(format!("leg distance {} is implausible", input.dist)));
    }

    let climb_time = phase_time(input.climb.as_ref(), input, "climb")?;
    let descent_time = phase_time(input.descent.as_ref(), input, "descent")?;

    if input.wind.is_none() {
        warn!("computing leg on {} without wind", input.tc);
    }

    let t = triangle::solve(input.tc, input.tas, input.wind.as_ref(), input.var)?;

    let ch = match ctx.deviation {
        Some(table) => table.steer(t.mh)?,
        None => t.mh.with_unit(AngleUnit::CompassNorth),
    };

    let phase_dist = |phase: &Option<VerticalPhase>| {
        phase.map_or(0.0, |p| p.dist.nautical_miles())
    };
    let cruise_dist = dist - phase_dist(&input.climb) - phase_dist(&input.descent);
    if cruise_dist < -DIST_TOLERANCE_NM {
        return Err(Error::invalid(format!(
            "climb and descent exceed the leg distance of {:.1}",
            input.dist.convert_to(LengthUnit::NauticalMiles)
        )));
    }
    let cruise_dist = Length::nm(cruise_dist.max(0.0));

    let cruise_time = t.ete(cruise_dist).convert_to(DurationUnit::Minutes);
    let ete = climb_time + cruise_time + descent_time;

    let fuel_type = input.fuel_type();
    let phase_fuel = |phase: &Option<VerticalPhase>| {
        phase.map_or(Fuel::zero(fuel_type), |p| p.fuel)
    };
    let fuel = phase_fuel(&input.climb) + input.ff * cruise_time + phase_fuel(&input.descent);

    let reserve = [input.additional_fuel, input.approach_landing_fuel]
        .into_iter()
        .flatten()
        .fold(Fuel::zero(fuel_type), |acc, f| acc + f);

    let (departure_time, since_departure) = carry.clock(input);
    let arrival = match departure_time {
        Some(t) => Some(t + elapsed(since_departure + ete)?),
        None => None,
    };

    let fuel_remaining = ctx
        .fuel_on_board
        .map(|fob| fob - (carry.fuel_used + fuel));

    trace!(
        "leg on {}: wca {:.1}, th {}, mh {}, ch {}",
        input.tc,
        t.wca,
        t.th,
        t.mh,
        ch
    );

    Ok(LegOutput {
        gs: t.gs,
        wca: t.wca,
        th: t.th,
        mh: t.mh,
        ch,
        climb_time,
        cruise_time,
        descent_time,
        ete,
        cruise_dist,
        fuel,
        reserve,
        fuel_remaining,
        arrival,
        wind: input.wind,
    })
}

// The duration rounded to whole minutes as offset to a time of day.
fn elapsed(duration: Duration) -> Result<TimeDelta> {
    let minutes = duration.minutes().round();
    if !minutes.is_finite() || minutes.abs() > MAX_ELAPSED_MIN {
        return Err(Error::invalid(format!("time en route of {duration:.0} is implausible")));
    }

    TimeDelta::try_minutes(minutes as i64)
        .ok_or_else(|| Error::invalid(format!("time en route of {duration:.0} is implausible")))
}

// Time of a climb or descent flown at the phase's TAS and wind.
fn phase_time(phase: Option<&VerticalPhase>, input: &LegInput, name: &str) -> Result<Duration> {
    let Some(phase) = phase else {
        return Ok(Duration::min(0.0));
    };

    let dist = phase.dist.nautical_miles();
    if !dist.is_finite() || dist < 0.0 {
        return Err(Error::invalid(format!("{name} distance {} is implausible", phase.dist)));
    }

    if dist == 0.0 {
        return Ok(Duration::min(0.0));
    }

    let wind = phase.wind.or(input.wind);
    let t = triangle::solve(input.tc, phase.tas, wind.as_ref(), input.var)
        .map_err(|e| match e {
            Error::InvalidInput(reason) => Error::InvalidInput(format!("{name}: {reason}")),
            e => e,
        })?;

    Ok(t.ete(phase.dist).convert_to(DurationUnit::Minutes))
}

/// Computes the legs from index `from` to the end.
///
/// The carry-over of `from` follows from its predecessor, which must have
/// been computed, or from the plan's start for the first leg. On error the
/// legs may be partially updated, callers work on a copy.
pub(super) fn propagate(legs: &mut [Leg], from: usize, ctx: &LegContext<'_>) -> Result<Range<usize>> {
    if from > legs.len() {
        return Err(Error::invalid(format!(
            "can't compute from leg {from} of {}",
            legs.len()
        )));
    }

    let mut carry = match from.checked_sub(1).map(|i| &legs[i]) {
        None => CarryOver::start(ctx.departure_time, ctx.fuel_type),
        Some(prev) => {
            let output = prev
                .output
                .as_ref()
                .ok_or_else(|| Error::invalid(format!("leg {} wasn't computed", prev.index)))?;
            prev.carry.after(&prev.input, output)
        }
    };

    for (i, leg) in legs.iter_mut().enumerate().skip(from) {
        let output = compute_leg(&leg.input, &carry, ctx).map_err(|e| match e {
            Error::InvalidInput(reason) => Error::InvalidInput(format!("leg {i}: {reason}")),
            e => e,
        })?;

        debug!(
            "leg {i} ({}): gs {:.0}, ete {:.1}, fuel {:.1}",
            leg.id, output.gs, output.ete, output.fuel
        );

        leg.index = i;
        leg.carry = carry;
        carry = carry.after(&leg.input, &output);
        leg.output = Some(output);
    }

    Ok(from..legs.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{FuelFlow, FuelUnit, Wind};
    use crate::measurements::{Angle, Speed};

    fn ff() -> FuelFlow {
        FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas)
    }

    fn input(dist: f32) -> LegInput {
        LegInput::new(Angle::t(90.0), Length::nm(dist), Speed::kt(120.0), ff())
    }

    fn liters(fuel: &Fuel) -> f32 {
        fuel.quantity(FuelUnit::Liters)
    }

    #[test]
    fn calm_cruise_leg() {
        let carry = CarryOver::start(NaiveTime::from_hms_opt(10, 0, 0), FuelType::AvGas);
        let out = compute_leg(&input(60.0), &carry, &LegContext::default()).unwrap();

        assert!((out.ete.minutes() - 30.0).abs() < 1e-3);
        assert!((liters(&out.fuel) - 15.0).abs() < 1e-3);
        assert_eq!(out.arrival, NaiveTime::from_hms_opt(10, 30, 0));
        assert_eq!(out.wind, None);
        assert_eq!(out.ch.unit(), &AngleUnit::CompassNorth);
        assert_eq!(*out.ch.value(), 90.0);
    }

    #[test]
    fn climb_and_descent_are_carved_out() {
        let mut leg = input(60.0);
        leg.climb = Some(VerticalPhase::new(
            Speed::kt(80.0),
            Length::nm(8.0),
            Fuel::from_quantity(3.0, FuelUnit::Liters, FuelType::AvGas),
            None,
        ));
        leg.descent = Some(VerticalPhase::new(
            Speed::kt(90.0),
            Length::nm(12.0),
            Fuel::from_quantity(2.0, FuelUnit::Liters, FuelType::AvGas),
            None,
        ));

        let carry = CarryOver::start(None, FuelType::AvGas);
        let out = compute_leg(&leg, &carry, &LegContext::default()).unwrap();

        assert!((out.cruise_dist.nautical_miles() - 40.0).abs() < 1e-3);
        assert!((out.climb_time.minutes() - 6.0).abs() < 1e-3);
        assert!((out.descent_time.minutes() - 8.0).abs() < 1e-3);
        assert!((out.cruise_time.minutes() - 20.0).abs() < 1e-3);
        assert!((out.ete.minutes() - 34.0).abs() < 1e-3);
        // 3 l climb, 10 l cruise, 2 l descent
        assert!((liters(&out.fuel) - 15.0).abs() < 1e-3);
        assert_eq!(out.arrival, None);
    }

    #[test]
    fn phase_wind_overrides_leg_wind() {
        let mut leg = input(60.0);
        leg.wind = Some(Wind::kt(270.0, 20.0));
        leg.climb = Some(VerticalPhase::new(
            Speed::kt(80.0),
            Length::nm(10.0),
            Fuel::zero(FuelType::AvGas),
            Some(Wind::kt(0.0, 0.0)),
        ));

        let carry = CarryOver::start(None, FuelType::AvGas);
        let out = compute_leg(&leg, &carry, &LegContext::default()).unwrap();

        // still air climb at 80 kt, cruise with 20 kt tailwind
        assert!((out.climb_time.minutes() - 7.5).abs() < 1e-3);
        assert!((out.gs.knots() - 140.0).abs() < 1e-3);
        assert!(out.wind.is_some());
    }

    #[test]
    fn reserves_are_not_burned() {
        let mut leg = input(60.0);
        leg.additional_fuel = Some(Fuel::from_quantity(20.0, FuelUnit::Liters, FuelType::AvGas));
        leg.approach_landing_fuel = Some(Fuel::from_quantity(5.0, FuelUnit::Liters, FuelType::AvGas));

        let carry = CarryOver::start(None, FuelType::AvGas);
        let out = compute_leg(&leg, &carry, &LegContext::default()).unwrap();

        assert!((liters(&out.fuel) - 15.0).abs() < 1e-3);
        assert!((liters(&out.reserve) - 25.0).abs() < 1e-3);
    }

    #[test]
    fn deviation_table_gives_compass_heading() {
        let table = DeviationTable::from_pairs(&[(0.0, 2.0), (90.0, 88.0), (180.0, 182.0)]).unwrap();
        let ctx = LegContext {
            deviation: Some(&table),
            ..Default::default()
        };

        let carry = CarryOver::start(None, FuelType::AvGas);
        let out = compute_leg(&input(60.0), &carry, &ctx).unwrap();
        assert_eq!(*out.ch.value(), 88.0);
    }

    #[test]
    fn arrival_wraps_past_midnight() {
        let carry = CarryOver {
            elapsed: Duration::min(40.0),
            since_departure: Duration::min(40.0),
            ..CarryOver::start(NaiveTime::from_hms_opt(23, 0, 0), FuelType::AvGas)
        };
        let out = compute_leg(&input(60.0), &carry, &LegContext::default()).unwrap();

        assert_eq!(out.arrival_hhmm().as_deref(), Some("0010"));
    }

    #[test]
    fn crawling_leg_has_no_arrival_time() {
        let mut leg = input(50_000.0);
        leg.tas = Speed::kt(1e-12);

        let carry = CarryOver::start(NaiveTime::from_hms_opt(9, 0, 0), FuelType::AvGas);
        assert!(matches!(
            compute_leg(&leg, &carry, &LegContext::default()),
            Err(Error::InvalidInput(_))
        ));

        let carry = CarryOver::start(None, FuelType::AvGas);
        let out = compute_leg(&leg, &carry, &LegContext::default()).unwrap();
        assert_eq!(out.arrival, None);
    }

    #[test]
    fn fuel_remaining_with_fuel_on_board() {
        let carry = CarryOver {
            fuel_used: Fuel::from_quantity(20.0, FuelUnit::Liters, FuelType::AvGas),
            ..CarryOver::start(None, FuelType::AvGas)
        };
        let ctx = LegContext {
            fuel_on_board: Some(Fuel::from_quantity(100.0, FuelUnit::Liters, FuelType::AvGas)),
            ..Default::default()
        };

        let out = compute_leg(&input(60.0), &carry, &ctx).unwrap();
        assert!((liters(&out.fuel_remaining.unwrap()) - 65.0).abs() < 1e-3);
    }

    #[test]
    fn degenerate_legs_fail() {
        let carry = CarryOver::start(None, FuelType::AvGas);
        let ctx = LegContext::default();

        let mut leg = input(60.0);
        leg.tas = Speed::kt(0.0);
        assert!(matches!(compute_leg(&leg, &carry, &ctx), Err(Error::InvalidInput(_))));

        let mut leg = input(10.0);
        leg.climb = Some(VerticalPhase::new(
            Speed::kt(80.0),
            Length::nm(12.0),
            Fuel::zero(FuelType::AvGas),
            None,
        ));
        assert!(matches!(compute_leg(&leg, &carry, &ctx), Err(Error::InvalidInput(_))));

        let leg = input(f32::NAN);
        assert!(compute_leg(&leg, &carry, &ctx).is_err());
    }
}
