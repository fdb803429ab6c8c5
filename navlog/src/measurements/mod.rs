// SPDX-License-Identifier: Apache-2.0
// Copyright 2024, 2026 Joe Pearson
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

//! Physical quantities with units.
//!
//! Every quantity is a [`Measurement`] of a value and a unit. Measurements of
//! the same quantity can be added or subtracted regardless of their unit, the
//! right hand side is converted into the unit of the left hand side first:
//!
//! ```
//! # use navlog::measurements::{Length, LengthUnit};
//! let total = Length::nm(10.0) + Length::m(1852.0);
//! assert_eq!(total.unit(), &LengthUnit::NauticalMiles);
//! assert!((total.value() - 11.0).abs() < 0.001);
//! ```

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

mod altitude;
mod angle;
pub mod constants;
mod density;
mod duration;
mod length;
mod mass;
mod pressure;
mod speed;
mod temperature;
mod volume;

pub use altitude::{Altitude, AltitudeUnit};
pub use angle::{normalize, shortest_angular_distance, Angle, AngleUnit};
pub use density::{Density, DensityUnit};
pub use duration::{Duration, DurationUnit};
pub use length::{Length, LengthUnit};
pub use mass::{Mass, MassUnit};
pub use pressure::{Pressure, PressureUnit};
pub use speed::{Speed, SpeedUnit};
pub use temperature::{Temperature, TemperatureUnit};
pub use volume::{Volume, VolumeUnit};

/// The physical quantity a unit measures.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum PhysicalQuantity {
    Density,
    Duration,
    Length,
    Mass,
    Pressure,
    Speed,
    Temperature,
    Volume,
}

/// A unit of measure that converts its values from and to the SI unit of the
/// quantity.
pub trait UnitOfMeasure<T>: Copy + PartialEq + fmt::Debug {
    /// The quantity measured by the unit.
    fn quantity() -> PhysicalQuantity;

    /// The SI unit of the quantity.
    fn si() -> Self;

    /// The symbol used when displaying a value of this unit.
    fn symbol(&self) -> &'static str;

    /// Converts the `value` given in SI unit into the unit `to`.
    fn from_si(value: T, to: &Self) -> T;

    /// Converts the `value` given in this unit into the SI unit.
    fn to_si(&self, value: &T) -> T;
}

/// A value with a unit.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Measurement<T, U> {
    value: T,
    unit: U,
}

impl<U> Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    /// Creates a measurement from a value and unit.
    pub fn new(value: f32, unit: U) -> Self {
        Self { value, unit }
    }

    /// Creates a measurement of the SI `value` expressed in `unit`.
    pub fn from_si(value: f32, unit: U) -> Self {
        Self {
            value: U::from_si(value, &unit),
            unit,
        }
    }

    pub fn value(&self) -> &f32 {
        &self.value
    }

    pub fn unit(&self) -> &U {
        &self.unit
    }

    /// Returns the value in SI unit.
    pub fn to_si(&self) -> f32 {
        self.unit.to_si(&self.value)
    }

    /// Returns the same measurement expressed in another unit.
    pub fn convert_to(&self, unit: U) -> Self {
        if unit == self.unit {
            *self
        } else {
            Self::from_si(self.to_si(), unit)
        }
    }

    /// Returns `true` if the value is neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.value.is_finite()
    }

    pub fn abs(&self) -> Self {
        Self {
            value: self.value.abs(),
            unit: self.unit,
        }
    }

    /// Returns the smaller of both measurements in the unit of `self`.
    pub fn min(self, other: Self) -> Self {
        if other < self {
            other.convert_to(self.unit)
        } else {
            self
        }
    }

    /// Returns the larger of both measurements in the unit of `self`.
    pub fn max(self, other: Self) -> Self {
        if other > self {
            other.convert_to(self.unit)
        } else {
            self
        }
    }
}

impl<U> PartialEq for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    fn eq(&self, other: &Self) -> bool {
        self.value == other.convert_to(self.unit).value
    }
}

impl<U> PartialOrd for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.value.partial_cmp(&other.convert_to(self.unit).value)
    }
}

impl<U> Default for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    fn default() -> Self {
        Self {
            value: 0.0,
            unit: U::si(),
        }
    }
}

impl<U> fmt::Display for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match f.precision() {
            Some(precision) => write!(
                f,
                "{:.precision$} {}",
                self.value,
                self.unit.symbol(),
                precision = precision
            ),
            None => write!(f, "{} {}", self.value, self.unit.symbol()),
        }
    }
}

impl<U> Add for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value + rhs.convert_to(self.unit).value,
            unit: self.unit,
        }
    }
}

impl<U> AddAssign for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<U> Sub for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self {
            value: self.value - rhs.convert_to(self.unit).value,
            unit: self.unit,
        }
    }
}

impl<U> SubAssign for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<U> Neg for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            value: -self.value,
            unit: self.unit,
        }
    }
}

impl<U> Mul<f32> for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    type Output = Self;

    fn mul(self, rhs: f32) -> Self::Output {
        Self {
            value: self.value * rhs,
            unit: self.unit,
        }
    }
}

impl<U> Div<f32> for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    type Output = Self;

    fn div(self, rhs: f32) -> Self::Output {
        Self {
            value: self.value / rhs,
            unit: self.unit,
        }
    }
}

/// The ratio between two measurements of the same quantity.
impl<U> Div for Measurement<f32, U>
where
    U: UnitOfMeasure<f32>,
{
    type Output = f32;

    fn div(self, rhs: Self) -> Self::Output {
        self.value / rhs.convert_to(self.unit).value
    }
}

/// Implements a unit whose conversion to SI is a constant factor.
///
/// Each arm is `Variant => (symbol, factor)` where `factor` is the SI value
/// of one unit.
macro_rules! linear_unit {
    ($unit:ident, $quantity:ident, $si:ident, { $($variant:ident => ($symbol:expr, $factor:expr)),+ $(,)? }) => {
        impl $crate::measurements::UnitOfMeasure<f32> for $unit {
            fn quantity() -> $crate::measurements::PhysicalQuantity {
                $crate::measurements::PhysicalQuantity::$quantity
            }

            fn si() -> Self {
                Self::$si
            }

            fn symbol(&self) -> &'static str {
                match self {
                    $(Self::$variant => $symbol,)+
                }
            }

            fn from_si(value: f32, to: &Self) -> f32 {
                match to {
                    $(Self::$variant => value / $factor,)+
                }
            }

            fn to_si(&self, value: &f32) -> f32 {
                match self {
                    $(Self::$variant => value * $factor,)+
                }
            }
        }
    };
}

pub(crate) use linear_unit;

/////////////////////////////////////////////////////////////////////////////
// Operations across quantities
/////////////////////////////////////////////////////////////////////////////

impl Div<Speed> for Length {
    type Output = Duration;

    fn div(self, rhs: Speed) -> Self::Output {
        Duration::from_si(self.to_si() / rhs.to_si(), DurationUnit::Minutes)
    }
}

impl Mul<Duration> for Speed {
    type Output = Length;

    fn mul(self, rhs: Duration) -> Self::Output {
        Length::from_si(self.to_si() * rhs.to_si(), LengthUnit::NauticalMiles)
    }
}

impl Div<Duration> for Length {
    type Output = Speed;

    fn div(self, rhs: Duration) -> Self::Output {
        Speed::from_si(self.to_si() / rhs.to_si(), SpeedUnit::Knots)
    }
}

impl Mul<Density> for Volume {
    type Output = Mass;

    fn mul(self, rhs: Density) -> Self::Output {
        Mass::from_si(self.to_si() * rhs.to_si(), MassUnit::Kilograms)
    }
}

impl Div<Density> for Mass {
    type Output = Volume;

    fn div(self, rhs: Density) -> Self::Output {
        Volume::from_si(self.to_si() / rhs.to_si(), VolumeUnit::Liter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_converts_into_lhs_unit() {
        let sum = Length::ft(1000.0) + Length::m(304.8);
        assert_eq!(sum.unit(), &LengthUnit::Feet);
        assert!((sum.value() - 2000.0).abs() < 0.01);
    }

    #[test]
    fn length_over_speed_is_duration() {
        let ete = Length::nm(60.0) / Speed::kt(120.0);
        let minutes = ete.convert_to(DurationUnit::Minutes);
        assert!((minutes.value() - 30.0).abs() < 0.001);
    }

    #[test]
    fn speed_times_duration_is_length() {
        let dist = Speed::kt(90.0) * Duration::min(20.0);
        assert!((dist.convert_to(LengthUnit::NauticalMiles).value() - 30.0).abs() < 0.001);
    }

    #[test]
    fn compare_across_units() {
        assert!(Length::nm(1.0) > Length::m(1800.0));
        assert!(Length::km(1.853) > Length::nm(1.0));
    }

    #[test]
    fn display_with_precision() {
        assert_eq!(format!("{:.1}", Speed::kt(97.98)), "98.0 kt");
    }
}
