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

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use log::trace;

use super::PlanStore;
use crate::error::Result;
use crate::fp::{FlightPlan, PlanId};

#[derive(Clone, Debug)]
struct Entry {
    plan: FlightPlan,
    expires: Option<DateTime<Utc>>,
}

impl Entry {
    fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires.is_some_and(|expires| expires <= now)
    }
}

/// Keeps plans in memory, optionally only for a time to live.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    plans: HashMap<PlanId, Entry>,
    ttl: Option<TimeDelta>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that forgets a plan once `ttl` passed since it was
    /// last written.
    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            plans: HashMap::new(),
            ttl: Some(ttl),
        }
    }

    /// The number of plans that haven't expired.
    pub fn len(&self) -> usize {
        let now = Utc::now();
        self.plans.values().filter(|e| !e.is_expired(now)).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops all expired plans.
    pub fn purge_expired(&mut self) {
        let now = Utc::now();
        self.plans.retain(|id, entry| {
            let keep = !entry.is_expired(now);
            if !keep {
                trace!("plan {id} expired");
            }
            keep
        });
    }
}

impl PlanStore for MemoryStore {
    fn get(&self, id: &PlanId) -> Result<Option<FlightPlan>> {
        let now = Utc::now();
        Ok(self
            .plans
            .get(id)
            .filter(|entry| !entry.is_expired(now))
            .map(|entry| entry.plan.clone()))
    }

    fn put(&mut self, plan: &FlightPlan) -> Result<()> {
        self.purge_expired();

        let expires = self.ttl.map(|ttl| Utc::now() + ttl);
        self.plans.insert(
            plan.id().clone(),
            Entry {
                plan: plan.clone(),
                expires,
            },
        );
        Ok(())
    }

    fn delete(&mut self, id: &PlanId) -> Result<bool> {
        let now = Utc::now();
        Ok(self
            .plans
            .remove(id)
            .is_some_and(|entry| !entry.is_expired(now)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fp::FlightPlanBuilder;

    fn plan(id: &str) -> FlightPlan {
        FlightPlanBuilder::new()
            .id(PlanId::new(id))
            .name("test")
            .build()
            .unwrap()
    }

    #[test]
    fn put_get_delete() {
        let mut store = MemoryStore::new();
        store.put(&plan("a")).unwrap();

        assert_eq!(store.get(&PlanId::new("a")).unwrap(), Some(plan("a")));
        assert_eq!(store.get(&PlanId::new("b")).unwrap(), None);
        assert_eq!(store.len(), 1);

        assert!(store.delete(&PlanId::new("a")).unwrap());
        assert!(!store.delete(&PlanId::new("a")).unwrap());
        assert!(store.is_empty());
    }

    #[test]
    fn expired_plans_are_gone() {
        let mut store = MemoryStore::with_ttl(TimeDelta::seconds(-1));
        store.put(&plan("a")).unwrap();

        assert_eq!(store.get(&PlanId::new("a")).unwrap(), None);
        store.purge_expired();
        assert!(store.plans.is_empty());
    }
}
