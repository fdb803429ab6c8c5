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

use navlog::aircraft::DeviationTable;
use navlog::fc::{pressure_altitude, solve};
use navlog::measurements::{Altitude, Angle, Length, Speed};
use navlog::nd::{select_runway, CrosswindSide, Runway, RunwayEnd};
use navlog::prelude::*;

#[test]
fn wind_from_the_left_on_northerly_course() {
    let t = solve(
        Angle::t(360.0),
        Speed::kt(100.0),
        Some(&Wind::kt(270.0, 20.0)),
        MagneticVariation::East(0.0),
    )
    .unwrap();

    // crab into the wind, left of course
    assert!((t.wca + 11.54).abs() < 0.01, "wca {}", t.wca);
    assert!((t.th.value() - 348.46).abs() < 0.01, "th {}", t.th);
    assert!((t.gs.knots() - 97.98).abs() < 0.01, "gs {}", t.gs);
}

#[test]
fn pressure_altitude_at_standard_and_low_qnh() {
    let standard = pressure_altitude(Altitude::ft(2000.0), 1013.0).unwrap();
    assert!((standard.altitude.feet() - 2000.0).abs() < 10.0);
    assert!(standard.qnh_valid);

    let low = pressure_altitude(Altitude::ft(2000.0), 1003.0).unwrap();
    assert!((low.altitude.feet() - 2270.0).abs() < 15.0, "pa {}", low.altitude);
}

#[test]
fn pressure_altitude_from_inches() {
    let pa = pressure_altitude(Altitude::ft(0.0), 29.92).unwrap();
    assert!(pa.altitude.feet().abs() < 5.0);
}

#[test]
fn deviation_interpolates_across_north() {
    let table = DeviationTable::from_pairs(&[(0.0, 2.0), (350.0, 348.0)]).unwrap();

    let ch = table.steer(Angle::m(355.0)).unwrap();
    assert!((ch.value() - 355.0).abs() < 0.01, "ch {ch}");

    for mh in [351.0, 353.0, 357.0, 359.0] {
        let ch = *table.steer(Angle::m(mh)).unwrap().value();
        let off = (ch - mh + 540.0) % 360.0 - 180.0;
        assert!(off.abs() <= 2.0, "{mh} steers {ch}");
    }
}

#[test]
fn deviation_table_needs_two_entries() {
    assert!(matches!(
        DeviationTable::from_pairs(&[(0.0, 2.0)]),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn runway_into_the_wind() {
    let runway = Runway {
        length: Some(Length::ft(3000.0)),
        le: Some(RunwayEnd::new("09", Angle::t(85.0))),
        he: Some(RunwayEnd::new("27", Angle::t(265.0))),
        ..Default::default()
    };

    let selection = select_runway(&[runway], Some(&Wind::kt(90.0, 15.0))).unwrap();

    assert_eq!(selection.designator, "09");
    assert!((selection.headwind.knots() - 14.94).abs() < 0.01);
    assert!((selection.crosswind.knots() - 1.31).abs() < 0.01);
    assert_eq!(selection.crosswind_side, Some(CrosswindSide::Right));
}
