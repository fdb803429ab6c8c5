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

use std::fmt::{Display, Formatter, Result};
use std::ops::{Add, Mul, Sub};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::measurements::{Density, Duration, Mass, MassUnit, Volume, VolumeUnit};

mod constants {
    use super::Density;

    pub const AVGAS_AT_ISA: Density = Density::kg_per_l(0.72);
    pub const DIESEL_AT_ISA: Density = Density::kg_per_l(0.838);
    pub const JET_A_AT_ISA: Density = Density::kg_per_l(0.8);
}

/// Type of fuel used by an aircraft.
///
/// Each fuel type has an associated density at ISA conditions used for
/// mass/volume conversions.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[repr(C)]
pub enum FuelType {
    /// Aviation gasoline (100LL) with density of 0.72 kg/L at ISA.
    #[default]
    AvGas,
    /// Diesel fuel with density of 0.838 kg/L at ISA.
    Diesel,
    /// Jet-A with density of 0.8 kg/L at ISA.
    JetA,
}

impl FuelType {
    /// Returns the density of the fuel type at ISA conditions.
    pub fn density(&self) -> Density {
        match self {
            Self::AvGas => constants::AVGAS_AT_ISA,
            Self::Diesel => constants::DIESEL_AT_ISA,
            Self::JetA => constants::JET_A_AT_ISA,
        }
    }
}

/// The unit in which a pilot enters and reads fuel quantities.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FuelUnit {
    #[default]
    Liters,
    UsGallons,
    Kilograms,
    Pounds,
}

impl FuelUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Self::Liters => "l",
            Self::UsGallons => "gal",
            Self::Kilograms => "kg",
            Self::Pounds => "lb",
        }
    }
}

impl FromStr for FuelUnit {
    type Err = Error;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "ltr" | "liter" | "liters" | "litre" | "litres" => Ok(Self::Liters),
            "gal" | "usg" | "usgal" | "gallons" => Ok(Self::UsGallons),
            "kg" | "kilograms" => Ok(Self::Kilograms),
            "lb" | "lbs" | "pounds" => Ok(Self::Pounds),
            _ => Err(Error::UnexpectedString),
        }
    }
}

/// Fuel quantity with a specific type and mass.
///
/// Fuel is tracked by mass so that quantities entered in different units
/// can be summed up. Volumes are converted at ISA density.
///
/// # Examples
///
/// ```
/// # use navlog::prelude::*;
/// # use navlog::measurements::Volume;
/// let total = Fuel::from_volume(Volume::l(50.0), FuelType::AvGas)
///     + Fuel::from_volume(Volume::gal(10.0), FuelType::AvGas);
/// assert!((total.quantity(FuelUnit::Liters) - 87.85).abs() < 0.01);
/// ```
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Fuel {
    pub fuel_type: FuelType,
    pub mass: Mass,
}

impl Fuel {
    /// Creates new fuel from mass.
    pub fn new(mass: Mass, fuel_type: FuelType) -> Self {
        Self { fuel_type, mass }
    }

    /// Creates new fuel from volume.
    ///
    /// The mass is calculated using the fuel type's density at ISA conditions.
    pub fn from_volume(v: Volume, fuel_type: FuelType) -> Self {
        Self {
            fuel_type,
            mass: v * fuel_type.density(),
        }
    }

    /// Creates new fuel from a quantity given in `unit`.
    pub fn from_quantity(quantity: f32, unit: FuelUnit, fuel_type: FuelType) -> Self {
        match unit {
            FuelUnit::Liters => Self::from_volume(Volume::l(quantity), fuel_type),
            FuelUnit::UsGallons => Self::from_volume(Volume::gal(quantity), fuel_type),
            FuelUnit::Kilograms => Self::new(Mass::kg(quantity), fuel_type),
            FuelUnit::Pounds => Self::new(Mass::lb(quantity), fuel_type),
        }
    }

    /// No fuel of the type.
    pub fn zero(fuel_type: FuelType) -> Self {
        Self::new(Mass::kg(0.0), fuel_type)
    }

    /// Returns the volume of fuel.
    pub fn volume(self) -> Volume {
        self.mass / self.fuel_type.density()
    }

    /// Returns the quantity expressed in `unit`.
    pub fn quantity(self, unit: FuelUnit) -> f32 {
        match unit {
            FuelUnit::Liters => *self.volume().convert_to(VolumeUnit::Liter).value(),
            FuelUnit::UsGallons => *self.volume().convert_to(VolumeUnit::USGallon).value(),
            FuelUnit::Kilograms => *self.mass.convert_to(MassUnit::Kilograms).value(),
            FuelUnit::Pounds => *self.mass.convert_to(MassUnit::Pounds).value(),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.mass.is_finite()
    }
}

impl Display for Fuel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result {
        let tmp = if let Some(precision) = f.precision() {
            format!("{:.precision$}", self.volume())
        } else {
            format!("{}", self.volume())
        };

        f.pad_integral(true, "", &tmp)
    }
}

// Fuel of different types never mixes in one aircraft, the planning keeps
// the type of the left hand side.
impl Add for Fuel {
    type Output = Fuel;

    fn add(self, rhs: Self) -> Self::Output {
        Fuel {
            fuel_type: self.fuel_type,
            mass: self.mass + rhs.mass,
        }
    }
}

impl Sub for Fuel {
    type Output = Fuel;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            fuel_type: self.fuel_type,
            mass: self.mass - rhs.mass,
        }
    }
}

impl Mul<f32> for Fuel {
    type Output = Fuel;

    fn mul(self, rhs: f32) -> Self {
        Self {
            fuel_type: self.fuel_type,
            mass: self.mass * rhs,
        }
    }
}

/// The fuel consumed per hour.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FuelFlow {
    PerHour(Fuel),
}

impl FuelFlow {
    /// Creates a fuel flow of `quantity` per hour given in `unit`.
    pub fn per_hour(quantity: f32, unit: FuelUnit, fuel_type: FuelType) -> Self {
        Self::PerHour(Fuel::from_quantity(quantity, unit, fuel_type))
    }

    /// The fuel consumed within one hour.
    pub fn hourly(&self) -> Fuel {
        match self {
            Self::PerHour(fuel) => *fuel,
        }
    }
}

impl Mul<Duration> for FuelFlow {
    type Output = Fuel;

    fn mul(self, rhs: Duration) -> Self::Output {
        match self {
            Self::PerHour(fuel) => fuel * rhs.hours(),
        }
    }
}

impl Mul<f32> for FuelFlow {
    type Output = FuelFlow;

    fn mul(self, rhs: f32) -> Self::Output {
        match self {
            Self::PerHour(fuel) => Self::PerHour(fuel * rhs),
        }
    }
}
