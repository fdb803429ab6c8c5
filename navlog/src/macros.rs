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

/// Creates AvGas [`Fuel`] from the [`Volume`] at ISA conditions.
///
/// [`Fuel`]: crate::core::Fuel
/// [`Volume`]: crate::measurements::Volume
#[macro_export]
macro_rules! avgas {
    ($volume:expr) => {
        Fuel::from_volume($volume, FuelType::AvGas)
    };
}

/// Creates Diesel [`Fuel`] from the [`Volume`] at ISA conditions.
///
/// [`Fuel`]: crate::core::Fuel
/// [`Volume`]: crate::measurements::Volume
#[macro_export]
macro_rules! diesel {
    ($volume:expr) => {
        Fuel::from_volume($volume, FuelType::Diesel)
    };
}

/// Creates Jet-A [`Fuel`] from the [`Volume`] at ISA conditions.
///
/// [`Fuel`]: crate::core::Fuel
/// [`Volume`]: crate::measurements::Volume
#[macro_export]
macro_rules! jet_a {
    ($volume:expr) => {
        Fuel::from_volume($volume, FuelType::JetA)
    };
}

/// Creates a [`Coordinate`] from latitude and longitude.
///
/// ```
/// use navlog::coord;
///
/// let eddh = coord!(53.6304, 9.9882);
/// assert_eq!(eddh.latitude, 53.6304);
/// ```
///
/// [`Coordinate`]: crate::geom::Coordinate
#[macro_export]
macro_rules! coord {
    ($latitude:expr, $longitude:expr) => {
        $crate::geom::Coordinate::new($latitude, $longitude)
    };
}
