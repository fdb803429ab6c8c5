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

//! Range checks at the boundary.
//!
//! Calculations reject degenerate values with [`Error::InvalidInput`] when
//! they hit them. Values coming from the outside are checked here first and
//! all violations are reported at once as [`Error::Validation`].

use chrono::NaiveTime;

use crate::core::{Fuel, Wind};
use crate::error::{Error, FieldError, Result};
use crate::fp::{FlightPlan, LegInput, VerticalPhase};
use crate::measurements::{Angle, Length, Speed};

pub const MAX_TAS_KT: f32 = 2000.0;
pub const MAX_DIST_NM: f32 = 50_000.0;
pub const MAX_WIND_KT: f32 = 250.0;
pub const MAX_VARIATION_DEG: f32 = 180.0;

/// Collects the violations of one input.
#[derive(Debug, Default)]
pub(crate) struct Violations {
    prefix: String,
    errors: Vec<FieldError>,
}

impl Violations {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn prefixed(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            errors: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors
            .push(FieldError::new(format!("{}{field}", self.prefix), message));
    }

    /// Checks that `value` is finite and within `min..=max`.
    pub(crate) fn range(&mut self, field: &str, value: f32, min: f32, max: f32) {
        if !value.is_finite() {
            self.push(field, "must be a finite number");
        } else if value < min || value > max {
            self.push(field, format!("must be within {min} and {max}"));
        }
    }

    /// Checks a direction in degrees to be within `0..360`.
    #[cfg_attr(not(feature = "serde"), allow(dead_code))]
    pub(crate) fn course(&mut self, field: &str, value: f32) {
        if !value.is_finite() {
            self.push(field, "must be a finite number");
        } else if !(0.0..360.0).contains(&value) {
            self.push(field, "must be within 0 and 360 (exclusive)");
        }
    }

    pub(crate) fn non_negative(&mut self, field: &str, value: f32) {
        self.range(field, value, 0.0, f32::MAX);
    }

    fn extend(&mut self, other: Violations) {
        self.errors.extend(other.errors);
    }

    pub(crate) fn into_result(self) -> Result<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(self.errors))
        }
    }
}

fn angle(v: &mut Violations, field: &str, angle: &Angle) {
    if !angle.is_finite() {
        v.push(field, "must be a finite number");
    }
}

fn speed(v: &mut Violations, field: &str, speed: &Speed, max: f32) {
    v.range(field, speed.knots(), 0.0, max);
}

fn dist(v: &mut Violations, field: &str, dist: &Length) {
    v.range(field, dist.nautical_miles(), 0.0, MAX_DIST_NM);
}

fn fuel(v: &mut Violations, field: &str, fuel: &Fuel) {
    v.non_negative(field, *fuel.mass.value());
}

fn wind(v: &mut Violations, field: &str, wind: &Wind) {
    angle(v, &format!("{field}.direction"), &wind.direction);
    speed(v, &format!("{field}.speed"), &wind.speed, MAX_WIND_KT);
}

fn phase(v: &mut Violations, field: &str, phase: &VerticalPhase) {
    speed(v, &format!("{field}.tas"), &phase.tas, MAX_TAS_KT);
    dist(v, &format!("{field}.dist"), &phase.dist);
    fuel(v, &format!("{field}.fuel"), &phase.fuel);
    if let Some(w) = &phase.wind {
        wind(v, &format!("{field}.wind"), w);
    }
}

fn check_leg(v: &mut Violations, input: &LegInput) {
    angle(v, "tc", &input.tc);
    speed(v, "tas", &input.tas, MAX_TAS_KT);
    dist(v, "dist", &input.dist);
    v.range(
        "var",
        input.var.degrees(),
        -MAX_VARIATION_DEG,
        MAX_VARIATION_DEG,
    );
    v.non_negative("ff", *input.ff.hourly().mass.value());

    if let Some(w) = &input.wind {
        wind(v, "wind", w);
    }
    if let Some(climb) = &input.climb {
        phase(v, "climb", climb);
    }
    if let Some(descent) = &input.descent {
        phase(v, "descent", descent);
    }
    if let Some(f) = &input.additional_fuel {
        fuel(v, "additional_fuel", f);
    }
    if let Some(f) = &input.approach_landing_fuel {
        fuel(v, "approach_landing_fuel", f);
    }
}

/// Validates the values of a leg.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every field out of its range.
pub fn leg(input: &LegInput) -> Result<()> {
    let mut v = Violations::new();
    check_leg(&mut v, input);
    v.into_result()
}

fn check_plan_leg(v: &mut Violations, plan: &FlightPlan, input: &LegInput) {
    check_leg(v, input);
    if input.fuel_type() != plan.fuel_type() {
        v.push("ff", format!("must burn {:?}", plan.fuel_type()));
    }
}

/// Validates a leg that is going to be part of the `plan`.
///
/// Besides the ranges of [`leg`] the leg must burn the plan's fuel type.
///
/// # Errors
///
/// Returns [`Error::Validation`] listing every field out of its range.
pub fn plan_leg(plan: &FlightPlan, input: &LegInput) -> Result<()> {
    let mut v = Violations::new();
    check_plan_leg(&mut v, plan, input);
    v.into_result()
}

/// Validates the plan's settings and all of its legs.
///
/// Leg fields are reported with their index, e.g. `legs[1].tas`.
pub fn plan(plan: &FlightPlan) -> Result<()> {
    let mut v = Violations::new();

    if plan.name().trim().is_empty() {
        v.push("name", "must not be empty");
    }
    if let Some(power) = plan.cruise_power() {
        if !(power > 0.0 && power <= 100.0) {
            v.push("cruise_power", "must be within 0 (exclusive) and 100");
        }
    }
    if let Some(fob) = plan.fuel_on_board() {
        fuel(&mut v, "fuel_on_board", fob);
    }

    for (i, leg) in plan.legs().iter().enumerate() {
        let mut lv = Violations::prefixed(format!("legs[{i}]."));
        check_plan_leg(&mut lv, plan, leg.input());
        v.extend(lv);
    }

    v.into_result()
}

/// Parses a time of the form `HHMM` or `HH:MM`.
///
/// # Errors
///
/// Returns [`Error::UnexpectedString`] if the string isn't a time of day.
///
/// ```
/// # use navlog::validate::parse_hhmm;
/// # use chrono::NaiveTime;
/// assert_eq!(parse_hhmm("0930")?, NaiveTime::from_hms_opt(9, 30, 0).unwrap());
/// assert!(parse_hhmm("2460").is_err());
/// # Ok::<(), navlog::Error>(())
/// ```
pub fn parse_hhmm(s: &str) -> Result<NaiveTime> {
    let s = s.trim();
    let digits: String = match s.split_once(':') {
        Some((h, m)) if h.len() == 2 && m.len() == 2 => format!("{h}{m}"),
        Some(_) => return Err(Error::UnexpectedString),
        None => s.to_string(),
    };

    if digits.len() != 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Error::UnexpectedString);
    }

    let hours: u32 = digits[..2].parse().map_err(|_| Error::UnexpectedString)?;
    let minutes: u32 = digits[2..].parse().map_err(|_| Error::UnexpectedString)?;

    NaiveTime::from_hms_opt(hours, minutes, 0).ok_or(Error::UnexpectedString)
}
