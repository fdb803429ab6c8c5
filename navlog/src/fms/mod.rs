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

//! Flight plan service.
//!
//! [`FlightPlanService`] is the entry point for every change to a stored
//! plan. A change is validated, applied to a copy of the plan loaded from the
//! [`PlanStore`], and the affected legs are recomputed. Only if all of this
//! succeeds is the copy written back, so a failed change leaves the stored
//! plan as it was.
//!
//! ```
//! # use navlog::prelude::*;
//! # use navlog::measurements::{Angle, Length, Speed};
//! let mut service = FlightPlanService::new(MemoryStore::new());
//! let plan = service.create_plan(FlightPlanBuilder::new().name("EDDH-EDHL"))?;
//!
//! let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);
//! let leg = LegInput::new(Angle::t(68.0), Length::nm(28.0), Speed::kt(112.0), ff);
//! let (_, result) = service.add_leg(plan.id(), leg)?;
//!
//! assert_eq!(result.recomputed, 0..1);
//! assert!((result.totals.ete.minutes() - 15.0).abs() < 0.01);
//! # Ok::<(), navlog::Error>(())
//! ```

use std::ops::Range;

use log::{debug, info};

use crate::error::{Error, Result};
use crate::fp::{FlightPlan, FlightPlanBuilder, LegId, LegInput, PlanId, PlanTotals};
use crate::store::PlanStore;
use crate::validate;

/// The outcome of a change to a plan.
#[derive(Clone, PartialEq, Debug)]
pub struct RecomputeResult {
    pub plan_id: PlanId,
    /// The indices of the legs that were recomputed.
    pub recomputed: Range<usize>,
    /// The plan's totals after the change.
    pub totals: PlanTotals,
}

/// Manages the flight plans of a store.
///
/// See the [module documentation](self) for details.
#[derive(Debug, Default)]
pub struct FlightPlanService<S> {
    store: S,
}

impl<S: PlanStore> FlightPlanService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Builds a plan and stores it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] if the builder's settings are rejected.
    pub fn create_plan(&mut self, builder: &FlightPlanBuilder) -> Result<FlightPlan> {
        let plan = builder.build()?;
        validate::plan(&plan)?;

        self.store.put(&plan)?;
        info!("created plan {} ({})", plan.id(), plan.name());

        Ok(plan)
    }

    /// Returns the plan with all legs computed.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlanNotFound`] if the store has no such plan.
    pub fn get_plan(&self, id: &PlanId) -> Result<FlightPlan> {
        let mut plan = self.load(id)?;
        if !plan.is_computed() {
            plan.recompute()?;
        }
        Ok(plan)
    }

    /// Appends a leg to the plan.
    pub fn add_leg(&mut self, id: &PlanId, input: LegInput) -> Result<(LegId, RecomputeResult)> {
        let mut leg_id = None;
        let result = self.modify_plan(id, |plan| {
            validate::plan_leg(plan, &input)?;
            let (new_id, recomputed) = plan.add_leg(input)?;
            leg_id = Some(new_id);
            Ok(recomputed)
        })?;

        let leg_id = leg_id.ok_or_else(|| Error::invalid("no leg was added"))?;
        info!("added leg {leg_id} to plan {id}");
        Ok((leg_id, result))
    }

    /// Inserts a leg at the `index` of the plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if the index is past the plan's end.
    pub fn insert_leg(
        &mut self,
        id: &PlanId,
        index: usize,
        input: LegInput,
    ) -> Result<(LegId, RecomputeResult)> {
        let mut leg_id = None;
        let result = self.modify_plan(id, |plan| {
            validate::plan_leg(plan, &input)?;
            let (new_id, recomputed) = plan.insert_leg(index, input)?;
            leg_id = Some(new_id);
            Ok(recomputed)
        })?;

        let leg_id = leg_id.ok_or_else(|| Error::invalid("no leg was inserted"))?;
        info!("inserted leg {leg_id} at {index} into plan {id}");
        Ok((leg_id, result))
    }

    /// Replaces the values of a leg.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LegNotFound`] if the plan has no such leg.
    pub fn update_leg(&mut self, id: &PlanId, leg: LegId, input: LegInput) -> Result<RecomputeResult> {
        let result = self.modify_plan(id, |plan| {
            validate::plan_leg(plan, &input)?;
            plan.update_leg(leg, input)
        })?;
        info!("updated leg {leg} of plan {id}");
        Ok(result)
    }

    /// Removes a leg from the plan.
    pub fn remove_leg(&mut self, id: &PlanId, leg: LegId) -> Result<RecomputeResult> {
        let result = self.modify_plan(id, |plan| plan.remove_leg(leg))?;
        info!("removed leg {leg} from plan {id}");
        Ok(result)
    }

    /// Recomputes all legs of the plan.
    pub fn recompute(&mut self, id: &PlanId) -> Result<RecomputeResult> {
        self.modify_plan(id, FlightPlan::recompute)
    }

    /// Deletes the plan.
    ///
    /// # Errors
    ///
    /// Returns [`Error::PlanNotFound`] if the store has no such plan.
    pub fn delete_plan(&mut self, id: &PlanId) -> Result<()> {
        if self.store.delete(id)? {
            info!("deleted plan {id}");
            Ok(())
        } else {
            Err(Error::PlanNotFound(id.clone()))
        }
    }

    fn load(&self, id: &PlanId) -> Result<FlightPlan> {
        self.store
            .get(id)?
            .ok_or_else(|| Error::PlanNotFound(id.clone()))
    }

    /// Applies `f` to a copy of the plan and stores the copy if `f` succeeds.
    fn modify_plan<F>(&mut self, id: &PlanId, f: F) -> Result<RecomputeResult>
    where
        F: FnOnce(&mut FlightPlan) -> Result<Range<usize>>,
    {
        let mut plan = self.load(id)?;
        let recomputed = f(&mut plan)?;

        self.store.put(&plan)?;
        debug!("stored plan {id} after recomputing legs {recomputed:?}");

        Ok(RecomputeResult {
            plan_id: id.clone(),
            recomputed,
            totals: plan.totals(),
        })
    }
}
