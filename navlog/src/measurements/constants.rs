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

pub const FEET_IN_METER: f32 = 0.3048;
pub const INCH_IN_METER: f32 = 0.0254;
pub const KELVIN_IN_CELSIUS: f32 = 273.15;
pub const METER_PER_SECONDS_IN_KNOTS: f32 = 1.943844;
pub const NAUTICAL_MILE_IN_METER: f32 = 1852.0;
pub const POUNDS_IN_KILOGRAMS: f32 = 0.4535924;
pub const US_GALLON_IN_QUBIC_METER: f32 = 0.003785412;
/// Pressure of one inch of mercury in Pa.
pub const INCH_OF_MERCURY_IN_PASCAL: f32 = 3386.389;

/// ISA sea-level pressure in Pa.
pub const ISA_PRESSURE_SL: f32 = 101_325.0;
/// ISA sea-level temperature in K.
pub const ISA_TEMPERATURE_SL: f32 = 288.15;
/// ISA sea-level density in kg/m³.
pub const ISA_DENSITY_SL: f32 = 1.225;
/// ISA temperature lapse rate in the troposphere in K/m.
pub const ISA_LAPSE_RATE: f32 = 0.0065;
/// Standard gravity in m/s².
pub const GRAVITY: f32 = 9.80665;
/// Specific gas constant of dry air in J/(kg·K).
pub const GAS_CONSTANT_AIR: f32 = 287.05287;
