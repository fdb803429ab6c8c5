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

//! The flat JSON record legs were stored as.
//!
//! ```json
//! {
//!   "course": 10, "dist": 30, "tas": 100, "var": 3,
//!   "windDir": 90, "windSpeed": 20, "fuelFlow": 30, "fuelUnit": "l",
//!   "departureTime": "0930", "from": "EDDH", "to": "EDHL"
//! }
//! ```
//!
//! Older records carry the magnetic deviation `md` instead of the variation
//! `var`, with the inverse sign. Records have no role, it's inferred from
//! the leg's destination and phases.

use serde::{Deserialize, Serialize};

use crate::core::{Fuel, FuelFlow, FuelType, FuelUnit, MagneticVariation, Wind};
use crate::error::{Error, Result};
use crate::fp::{LegInput, LegRole, VerticalPhase};
use crate::measurements::{Angle, Length, Speed};
use crate::nd::Waypoint;
use crate::validate::{self, Violations, MAX_DIST_NM, MAX_TAS_KT, MAX_VARIATION_DEG, MAX_WIND_KT};

#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<LegRole>,
    pub course: f32,
    pub dist: f32,
    pub tas: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub var: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_dir: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wind_speed: Option<f32>,
    pub fuel_flow: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_tas: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_dist: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_fuel: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_wind_dir: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub climb_wind_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent_tas: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent_dist: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent_fuel: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent_wind_dir: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descent_wind_speed: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_fuel: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approach_landing_fuel: Option<f32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checkpoints: Vec<String>,
}

struct PhaseFields {
    name: &'static str,
    tas: Option<f32>,
    dist: Option<f32>,
    fuel: Option<f32>,
    wind_dir: Option<f32>,
    wind_speed: Option<f32>,
}

fn check_wind(v: &mut Violations, dir_field: &str, speed_field: &str, dir: Option<f32>, speed: Option<f32>) {
    match (dir, speed) {
        (Some(dir), Some(speed)) => {
            v.range(dir_field, dir, 0.0, 360.0);
            v.range(speed_field, speed, 0.0, MAX_WIND_KT);
        }
        (Some(_), None) => v.push(speed_field, "is required with the wind direction"),
        (None, Some(_)) => v.push(dir_field, "is required with the wind speed"),
        (None, None) => {}
    }
}

impl PhaseFields {
    fn is_present(&self) -> bool {
        self.tas.is_some() || self.dist.is_some() || self.fuel.is_some()
    }

    fn check(&self, v: &mut Violations) {
        if !self.is_present() {
            return;
        }

        let field = |suffix: &str| format!("{}{suffix}", self.name);
        match self.tas {
            Some(tas) => v.range(&field("Tas"), tas, 0.0, MAX_TAS_KT),
            None => v.push(&field("Tas"), "is required for the phase"),
        }
        match self.dist {
            Some(dist) => v.range(&field("Dist"), dist, 0.0, MAX_DIST_NM),
            None => v.push(&field("Dist"), "is required for the phase"),
        }
        if let Some(fuel) = self.fuel {
            v.non_negative(&field("Fuel"), fuel);
        }
        check_wind(v, &field("WindDir"), &field("WindSpeed"), self.wind_dir, self.wind_speed);
    }

    fn phase(&self, unit: FuelUnit, fuel_type: FuelType) -> Option<VerticalPhase> {
        let (tas, dist) = (self.tas?, self.dist?);
        Some(VerticalPhase::new(
            Speed::kt(tas),
            Length::nm(dist),
            Fuel::from_quantity(self.fuel.unwrap_or(0.0), unit, fuel_type),
            wind(self.wind_dir, self.wind_speed),
        ))
    }
}

fn wind(dir: Option<f32>, speed: Option<f32>) -> Option<Wind> {
    Some(Wind::kt(dir?, speed?))
}

fn waypoint(name: &Option<String>) -> Option<Waypoint> {
    name.as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(Waypoint::new)
}

impl LegRecord {
    fn climb(&self) -> PhaseFields {
        PhaseFields {
            name: "climb",
            tas: self.climb_tas,
            dist: self.climb_dist,
            fuel: self.climb_fuel,
            wind_dir: self.climb_wind_dir,
            wind_speed: self.climb_wind_speed,
        }
    }

    fn descent(&self) -> PhaseFields {
        PhaseFields {
            name: "descent",
            tas: self.descent_tas,
            dist: self.descent_dist,
            fuel: self.descent_fuel,
            wind_dir: self.descent_wind_dir,
            wind_speed: self.descent_wind_speed,
        }
    }

    /// Converts the record into a leg burning `fuel_type`.
    ///
    /// The `alternate` of the plan is used to infer the role of a record
    /// without one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with the record's field names if any
    /// value is out of range.
    pub fn to_input(&self, fuel_type: FuelType, alternate: Option<&Waypoint>) -> Result<LegInput> {
        let mut v = Violations::new();

        v.course("course", self.course);
        v.range("dist", self.dist, 0.0, MAX_DIST_NM);
        v.range("tas", self.tas, 0.0, MAX_TAS_KT);
        v.non_negative("fuelFlow", self.fuel_flow);
        if let Some(var) = self.var {
            v.range("var", var, -MAX_VARIATION_DEG, MAX_VARIATION_DEG);
        }
        if let Some(md) = self.md {
            v.range("md", md, -MAX_VARIATION_DEG, MAX_VARIATION_DEG);
        }
        check_wind(&mut v, "windDir", "windSpeed", self.wind_dir, self.wind_speed);
        self.climb().check(&mut v);
        self.descent().check(&mut v);
        if let Some(fuel) = self.additional_fuel {
            v.non_negative("additionalFuel", fuel);
        }
        if let Some(fuel) = self.approach_landing_fuel {
            v.non_negative("approachLandingFuel", fuel);
        }

        let unit = match self.fuel_unit.as_deref() {
            Some(unit) => unit.parse().unwrap_or_else(|_| {
                v.push("fuelUnit", format!("unknown unit {unit}"));
                FuelUnit::default()
            }),
            None => FuelUnit::default(),
        };

        let departure_time = match self.departure_time.as_deref().map(str::trim) {
            Some("") | None => None,
            Some(time) => validate::parse_hhmm(time)
                .map_err(|_| v.push("departureTime", "must be HHMM"))
                .ok(),
        };

        v.into_result()?;

        // var wins over the legacy md if both are present
        let var = match (self.var, self.md) {
            (Some(var), _) => MagneticVariation::from_degrees(var),
            (None, Some(md)) => MagneticVariation::from_legacy_md(md),
            (None, None) => MagneticVariation::default(),
        };

        let quantity = |q: Option<f32>| q.map(|q| Fuel::from_quantity(q, unit, fuel_type));

        let mut input = LegInput {
            var,
            wind: wind(self.wind_dir, self.wind_speed),
            fuel_unit: unit,
            departure_time,
            climb: self.climb().phase(unit, fuel_type),
            descent: self.descent().phase(unit, fuel_type),
            additional_fuel: quantity(self.additional_fuel),
            approach_landing_fuel: quantity(self.approach_landing_fuel),
            from: waypoint(&self.from),
            to: waypoint(&self.to),
            checkpoints: self
                .checkpoints
                .iter()
                .filter_map(|name| waypoint(&Some(name.clone())))
                .collect(),
            ..LegInput::new(
                Angle::t(self.course),
                Length::nm(self.dist),
                Speed::kt(self.tas),
                FuelFlow::per_hour(self.fuel_flow, unit, fuel_type),
            )
        };
        input.role = self.role.unwrap_or_else(|| LegRole::infer(&input, alternate));

        validate::leg(&input)?;
        Ok(input)
    }

    /// Writes the leg as a record. Fuel is given in the leg's fuel unit and
    /// the variation as `var`.
    pub fn from_input(input: &LegInput) -> Self {
        let unit = input.fuel_unit;
        let quantity = |fuel: &Fuel| fuel.quantity(unit);
        let name = |wp: &Option<Waypoint>| wp.as_ref().map(|wp| wp.name.clone());

        let mut record = Self {
            role: Some(input.role),
            course: *input.tc.value(),
            dist: input.dist.nautical_miles(),
            tas: input.tas.knots(),
            var: Some(input.var.degrees()),
            wind_dir: input.wind.map(|w| *w.direction.value()),
            wind_speed: input.wind.map(|w| w.speed.knots()),
            fuel_flow: quantity(&input.ff.hourly()),
            fuel_unit: Some(unit.symbol().to_string()),
            departure_time: input.departure_time.map(|t| t.format("%H%M").to_string()),
            additional_fuel: input.additional_fuel.as_ref().map(quantity),
            approach_landing_fuel: input.approach_landing_fuel.as_ref().map(quantity),
            from: name(&input.from),
            to: name(&input.to),
            checkpoints: input.checkpoints.iter().map(|wp| wp.name.clone()).collect(),
            ..Self::default()
        };

        if let Some(climb) = &input.climb {
            record.climb_tas = Some(climb.tas.knots());
            record.climb_dist = Some(climb.dist.nautical_miles());
            record.climb_fuel = Some(quantity(&climb.fuel));
            record.climb_wind_dir = climb.wind.map(|w| *w.direction.value());
            record.climb_wind_speed = climb.wind.map(|w| w.speed.knots());
        }
        if let Some(descent) = &input.descent {
            record.descent_tas = Some(descent.tas.knots());
            record.descent_dist = Some(descent.dist.nautical_miles());
            record.descent_fuel = Some(quantity(&descent.fuel));
            record.descent_wind_dir = descent.wind.map(|w| *w.direction.value());
            record.descent_wind_speed = descent.wind.map(|w| w.speed.knots());
        }

        record
    }
}

/// Reads a leg from its JSON record.
///
/// # Errors
///
/// Returns [`Error::UnexpectedString`] if the JSON doesn't describe a leg
/// and [`Error::Validation`] if a value is out of range.
pub fn parse_leg_json(json: &str, fuel_type: FuelType, alternate: Option<&Waypoint>) -> Result<LegInput> {
    let record: LegRecord = serde_json::from_str(json).map_err(|_| Error::UnexpectedString)?;
    record.to_input(fuel_type, alternate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    const RECORD: &str = r#"{
        "course": 10, "dist": 30, "tas": 100, "md": -3,
        "windDir": 90, "windSpeed": 20, "fuelFlow": 30, "fuelUnit": "l",
        "departureTime": "0930",
        "climbTas": 70, "climbDist": 5, "climbFuel": 3,
        "from": "EDDH", "to": "edhl", "checkpoints": ["Bad Oldesloe", ""]
    }"#;

    #[test]
    fn reads_legacy_record() {
        let input = parse_leg_json(RECORD, FuelType::AvGas, None).unwrap();

        assert_eq!(input.var, MagneticVariation::East(3.0));
        assert_eq!(input.wind, Some(Wind::kt(90.0, 20.0)));
        assert_eq!(input.departure_time, NaiveTime::from_hms_opt(9, 30, 0));
        assert_eq!(input.role, LegRole::Climb);
        assert_eq!(input.checkpoints, vec![Waypoint::new("Bad Oldesloe")]);

        let climb = input.climb.unwrap();
        assert_eq!(climb.wind, None);
        assert!((climb.fuel.quantity(FuelUnit::Liters) - 3.0).abs() < 1e-3);
    }

    #[test]
    fn infers_alternate_by_name() {
        let input = parse_leg_json(RECORD, FuelType::AvGas, Some(&Waypoint::new("EDHL"))).unwrap();
        assert_eq!(input.role, LegRole::Alternate);
    }

    #[test]
    fn reports_record_fields() {
        let json = r#"{
            "course": 360, "dist": -1, "tas": 100, "windDir": 90,
            "fuelFlow": 30, "climbTas": 70, "departureTime": "9:30"
        }"#;

        let Err(Error::Validation(errors)) = parse_leg_json(json, FuelType::AvGas, None) else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["course", "dist", "windSpeed", "climbDist", "departureTime"]);
    }

    #[test]
    fn rejects_malformed_json() {
        assert_eq!(
            parse_leg_json("{\"course\": 1}", FuelType::AvGas, None),
            Err(Error::UnexpectedString)
        );
    }

    #[test]
    fn writes_var_not_md() {
        let input = parse_leg_json(RECORD, FuelType::AvGas, None).unwrap();
        let record = LegRecord::from_input(&input);

        assert_eq!(record.var, Some(3.0));
        assert_eq!(record.md, None);
        assert_eq!(record.departure_time.as_deref(), Some("0930"));

        let read = record.to_input(FuelType::AvGas, None).unwrap();
        assert_eq!(read.tc, input.tc);
        assert_eq!(read.var, input.var);
        assert_eq!(read.wind, input.wind);
        assert_eq!(read.role, input.role);
        assert!((read.ff.hourly().quantity(FuelUnit::Liters) - 30.0).abs() < 1e-3);
    }
}
