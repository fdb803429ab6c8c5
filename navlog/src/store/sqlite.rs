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

use std::path::Path;

use log::debug;
use rusqlite::{params, Connection, OptionalExtension};
use rusqlite_migration::{Migrations, M};

use super::PlanStore;
use crate::error::Result;
use crate::fp::{FlightPlan, PlanId};

fn migrations() -> Migrations<'static> {
    Migrations::new(vec![M::up(
        "CREATE TABLE flight_plans (
            id TEXT PRIMARY KEY NOT NULL,
            name TEXT NOT NULL,
            document TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );",
    )])
}

/// Keeps plans as JSON documents in SQLite, one row per plan.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Opens or creates the database at `path` and migrates its schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::migrate(Connection::open(path)?)
    }

    /// Creates a database that lives in memory.
    pub fn open_in_memory() -> Result<Self> {
        Self::migrate(Connection::open_in_memory()?)
    }

    fn migrate(mut conn: Connection) -> Result<Self> {
        migrations().to_latest(&mut conn)?;
        Ok(Self { conn })
    }
}

impl PlanStore for SqliteStore {
    fn get(&self, id: &PlanId) -> Result<Option<FlightPlan>> {
        let document: Option<String> = self
            .conn
            .query_row(
                "SELECT document FROM flight_plans WHERE id = ?1",
                params![id.as_str()],
                |row| row.get(0),
            )
            .optional()?;

        match document {
            Some(document) => Ok(Some(serde_json::from_str(&document)?)),
            None => Ok(None),
        }
    }

    fn put(&mut self, plan: &FlightPlan) -> Result<()> {
        let document = serde_json::to_string(plan)?;

        self.conn.execute(
            "INSERT INTO flight_plans (id, name, document, updated_at)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                document = excluded.document,
                updated_at = excluded.updated_at",
            params![
                plan.id().as_str(),
                plan.name(),
                document,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;

        debug!("stored plan {} ({} bytes)", plan.id(), document.len());
        Ok(())
    }

    fn delete(&mut self, id: &PlanId) -> Result<bool> {
        let n = self
            .conn
            .execute("DELETE FROM flight_plans WHERE id = ?1", params![id.as_str()])?;
        Ok(n > 0)
    }
}
