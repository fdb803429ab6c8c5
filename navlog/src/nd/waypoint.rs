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

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::geom::Coordinate;

/// A named point, e.g. an aerodrome or a visual reporting point.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Waypoint {
    pub name: String,
    pub coordinate: Option<Coordinate>,
}

impl Waypoint {
    /// A point known by name only.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            coordinate: None,
        }
    }

    pub fn at(name: impl Into<String>, coordinate: Coordinate) -> Self {
        Self {
            name: name.into(),
            coordinate: Some(coordinate),
        }
    }

    /// Returns `true` if both points carry the same name, ignoring case and
    /// surrounding whitespace.
    pub fn is_same(&self, other: &Waypoint) -> bool {
        self.name.trim().eq_ignore_ascii_case(other.name.trim())
    }
}

impl fmt::Display for Waypoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_name_ignores_case() {
        let a = Waypoint::new("EDHL");
        let b = Waypoint::at(" edhl ", coord!(53.8054, 10.7192));
        assert!(a.is_same(&b));
        assert!(!a.is_same(&Waypoint::new("EDDH")));
    }
}
