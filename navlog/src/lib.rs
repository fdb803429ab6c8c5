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

//! Navigation log engine.
//!
//! This crate computes the legs of a VFR navigation log. Each leg is solved
//! with the wind triangle for heading, ground speed, time and fuel. Legs are
//! chained: a leg continues the clock and the fuel of its predecessor, so a
//! change to one leg is propagated to all legs after it.
//!
//! ```
//! use navlog::prelude::*;
//! use navlog::measurements::{Angle, Length, Speed};
//!
//! let mut service = FlightPlanService::new(MemoryStore::new());
//! let plan = service.create_plan(FlightPlanBuilder::new().name("EDDH-EDHL"))?;
//!
//! let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);
//! let leg = LegInput {
//!     wind: Some(Wind::kt(270.0, 20.0)),
//!     ..LegInput::new(Angle::t(360.0), Length::nm(30.0), Speed::kt(100.0), ff)
//! };
//! let (id, result) = service.add_leg(plan.id(), leg)?;
//!
//! let plan = service.get_plan(plan.id())?;
//! let output = plan.leg(id).and_then(|leg| leg.output()).unwrap();
//! assert_eq!(output.gs.knots().round(), 98.0);
//! assert!(result.totals.ete.minutes() > 18.0);
//! # Ok::<(), navlog::Error>(())
//! ```
//!
//! The modules are layered bottom-up:
//!
//! - [`measurements`] and [`core`] hold quantities and value types,
//! - [`fc`] has the flight computer (atmosphere and wind triangle),
//! - [`aircraft`] the aircraft's deviation and performance tables,
//! - [`fp`] the legs of a plan and their propagation,
//! - [`fms`] the service that changes stored plans via a [`store`].
//!
//! Data from the outside is checked by [`validate`] and older encodings are
//! read by [`format`].

#![cfg_attr(docsrs, feature(doc_cfg))]

#[macro_use]
mod macros;

pub mod aircraft;
pub mod core;
pub mod error;
pub mod fc;
pub mod fms;
pub mod format;
pub mod fp;
#[cfg(feature = "geojson")]
mod geojson;
pub mod geom;
pub mod measurements;
pub mod nd;
pub mod store;
pub mod validate;

pub use error::Error;

/// The types needed to plan a flight.
pub mod prelude {
    pub use crate::aircraft::{Aircraft, ClimbTable, DeviationTable};
    pub use crate::core::{Fuel, FuelFlow, FuelType, FuelUnit, MagneticVariation, VerticalDistance, Wind};
    pub use crate::error::Error;
    pub use crate::fms::{FlightPlanService, RecomputeResult};
    pub use crate::fp::{FlightPlan, FlightPlanBuilder, LegId, LegInput, LegRole, PlanId, PlanTotals};
    pub use crate::geom::Coordinate;
    pub use crate::nd::{select_runway, Runway, RunwayEnd, Waypoint};
    pub use crate::store::{MemoryStore, PlanStore};
}
