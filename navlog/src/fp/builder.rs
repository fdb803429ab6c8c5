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

use chrono::{NaiveDate, NaiveTime};
use log::{info, warn};

use super::*;

use crate::aircraft::Aircraft;
use crate::error::FieldError;

/// Builds a [`FlightPlan`] from plan wide settings. The plan starts without
/// legs.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct FlightPlanBuilder {
    id: Option<PlanId>,
    name: Option<String>,
    date: Option<NaiveDate>,
    departure_time: Option<NaiveTime>,
    cruise_level: Option<VerticalDistance>,
    cruise_power: Option<f32>,
    departure: Option<Waypoint>,
    destination: Option<Waypoint>,
    alternate: Option<Waypoint>,
    fuel_type: Option<FuelType>,
    fuel_on_board: Option<Fuel>,
    aircraft: Option<Aircraft>,
}

impl FlightPlanBuilder {
    pub fn new() -> FlightPlanBuilder {
        Self::default()
    }

    /// Builds the flight plan.
    ///
    /// Without an explicit identifier, one is generated from the name. The
    /// fuel type defaults to the aircraft's fuel type.
    ///
    /// # Errors
    ///
    /// Returns [`Validation`] if the name is empty or the cruise power is not
    /// within 0 to 100 %.
    ///
    /// [`Validation`]: Error::Validation
    pub fn build(&self) -> Result<FlightPlan> {
        let name = self.name.clone().unwrap_or_default();
        let mut errors = Vec::new();

        if name.trim().is_empty() {
            errors.push(FieldError::new("name", "must not be empty"));
        }

        if let Some(power) = self.cruise_power {
            if !(power > 0.0 && power <= 100.0) {
                errors.push(FieldError::new("cruise_power", "must be within (0, 100] %"));
            }
        }

        if !errors.is_empty() {
            return Err(Error::Validation(errors));
        }

        let fuel_type = self
            .fuel_type
            .or(self.aircraft.as_ref().map(|ac| ac.fuel_type))
            .unwrap_or_default();

        if let Some(fob) = self.fuel_on_board {
            if fob.fuel_type != fuel_type {
                warn!(
                    "fuel on board is {:?} but the plan uses {:?}",
                    fob.fuel_type, fuel_type
                );
            }
        }

        let id = self.id.clone().unwrap_or_else(|| PlanId::generate(&name));
        info!("building flight plan {id} ({name})");

        Ok(FlightPlan {
            id,
            name,
            date: self.date,
            departure_time: self.departure_time,
            cruise_level: self.cruise_level,
            cruise_power: self.cruise_power,
            departure: self.departure.clone(),
            destination: self.destination.clone(),
            alternate: self.alternate.clone(),
            fuel_type,
            fuel_on_board: self.fuel_on_board,
            aircraft: self.aircraft.clone(),
            legs: Vec::new(),
            next_leg_id: 0,
        })
    }

    pub fn id(&mut self, id: PlanId) -> &mut Self {
        self.id = Some(id);
        self
    }

    pub fn name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = Some(name.into());
        self
    }

    pub fn date(&mut self, date: NaiveDate) -> &mut Self {
        self.date = Some(date);
        self
    }

    pub fn departure_time(&mut self, time: NaiveTime) -> &mut Self {
        self.departure_time = Some(time);
        self
    }

    pub fn cruise_level(&mut self, level: VerticalDistance) -> &mut Self {
        self.cruise_level = Some(level);
        self
    }

    /// Cruise power in percent.
    pub fn cruise_power(&mut self, power: f32) -> &mut Self {
        self.cruise_power = Some(power);
        self
    }

    pub fn departure(&mut self, departure: Waypoint) -> &mut Self {
        self.departure = Some(departure);
        self
    }

    pub fn destination(&mut self, destination: Waypoint) -> &mut Self {
        self.destination = Some(destination);
        self
    }

    pub fn alternate(&mut self, alternate: Waypoint) -> &mut Self {
        self.alternate = Some(alternate);
        self
    }

    pub fn fuel_type(&mut self, fuel_type: FuelType) -> &mut Self {
        self.fuel_type = Some(fuel_type);
        self
    }

    pub fn fuel_on_board(&mut self, fuel: Fuel) -> &mut Self {
        self.fuel_on_board = Some(fuel);
        self
    }

    pub fn aircraft(&mut self, aircraft: Aircraft) -> &mut Self {
        self.aircraft = Some(aircraft);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_is_required() {
        assert!(matches!(
            FlightPlanBuilder::new().build(),
            Err(Error::Validation(errors)) if errors[0].field == "name"
        ));
    }

    #[test]
    fn cruise_power_range() {
        let result = FlightPlanBuilder::new().name("x").cruise_power(120.0).build();
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn fuel_type_from_aircraft() {
        let plan = FlightPlanBuilder::new()
            .name("x")
            .id(PlanId::new("p1"))
            .aircraft(Aircraft::new("D-EFGH", FuelType::Diesel))
            .build()
            .unwrap();

        assert_eq!(plan.fuel_type(), FuelType::Diesel);
        assert_eq!(plan.id().as_str(), "p1");
        assert!(plan.legs().is_empty());
    }
}
