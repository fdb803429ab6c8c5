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

//! Formats that data is exchanged in.
//!
//! Older encodings are read here and converted into the crate's types. The
//! calculations never see them.

pub mod deviation;
#[cfg(feature = "serde")]
pub mod leg;
#[cfg(feature = "serde")]
pub mod runways;

pub use deviation::parse_deviation_table;
#[cfg(feature = "serde")]
pub use leg::{parse_leg_json, LegRecord};
#[cfg(feature = "serde")]
pub use runways::parse_runways_json;
