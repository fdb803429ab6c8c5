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

//! Persistence of flight plans.
//!
//! A store keeps whole plans by their identifier. Legs are written with their
//! inputs and carry-over only, the computed outputs are recomputed after a
//! plan is read.

mod memory;
#[cfg(feature = "sqlite")]
mod sqlite;

pub use memory::MemoryStore;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::fp::{FlightPlan, PlanId};

/// A key-value store of flight plans.
pub trait PlanStore {
    /// Returns the plan with the `id`, `None` if there is none.
    fn get(&self, id: &PlanId) -> Result<Option<FlightPlan>>;

    /// Writes the `plan`, replacing any plan with the same identifier.
    fn put(&mut self, plan: &FlightPlan) -> Result<()>;

    /// Deletes the plan with the `id`. Returns `false` if there was none.
    fn delete(&mut self, id: &PlanId) -> Result<bool>;
}
