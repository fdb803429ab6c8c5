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

//! The compact runway database.
//!
//! Runways are listed per aerodrome ident. Lengths and elevations are in
//! feet, headings are true:
//!
//! ```json
//! {"EDHL":[{"l":6903,"w":148,"s":"PG","lit":1,
//!   "le":{"id":"07","lat":53.8,"lon":10.7,"elev":47,"hdg":68.5},
//!   "he":{"id":"25","lat":53.81,"lon":10.73,"elev":53,"hdg":248.5,"dt":590}}]}
//! ```

use std::collections::HashMap;

use log::{debug, trace};
use serde::Deserialize;

use crate::error::{Error, Result};
use crate::geom::Coordinate;
use crate::measurements::{Altitude, Angle, Length};
use crate::nd::{Runway, RunwayEnd, RunwaySurface};

#[derive(Deserialize)]
struct RunwayRecord {
    l: Option<f32>,
    w: Option<f32>,
    s: Option<String>,
    #[serde(default)]
    lit: u8,
    #[serde(default)]
    cls: u8,
    le: Option<EndRecord>,
    he: Option<EndRecord>,
}

#[derive(Deserialize)]
struct EndRecord {
    id: String,
    lat: Option<f64>,
    lon: Option<f64>,
    elev: Option<f32>,
    hdg: Option<f32>,
    dt: Option<f32>,
}

impl From<EndRecord> for RunwayEnd {
    fn from(end: EndRecord) -> Self {
        let coordinate = match (end.lat, end.lon) {
            (Some(lat), Some(lon)) => Some(Coordinate::new(lat, lon)).filter(Coordinate::is_valid),
            _ => None,
        };

        Self {
            designator: end.id,
            coordinate,
            elevation: end.elev.map(Altitude::ft),
            heading: end.hdg.filter(|hdg| hdg.is_finite()).map(Angle::t),
            displaced_threshold: end.dt.filter(|dt| *dt > 0.0).map(Length::ft),
        }
    }
}

fn surface(raw: &str) -> Option<RunwaySurface> {
    raw.parse().ok().or_else(|| RunwaySurface::categorize(raw))
}

impl From<RunwayRecord> for Runway {
    fn from(rwy: RunwayRecord) -> Self {
        Self {
            length: rwy.l.map(Length::ft),
            width: rwy.w.map(Length::ft),
            surface: rwy.s.as_deref().and_then(surface),
            lighted: rwy.lit != 0,
            closed: rwy.cls != 0,
            le: rwy.le.map(RunwayEnd::from),
            he: rwy.he.map(RunwayEnd::from),
        }
    }
}

/// Reads the runways per aerodrome ident.
///
/// Runways without any end are dropped.
///
/// # Errors
///
/// Returns [`Error::UnexpectedString`] if the JSON isn't a runway database.
pub fn parse_runways_json(json: &str) -> Result<HashMap<String, Vec<Runway>>> {
    let records: HashMap<String, Vec<RunwayRecord>> =
        serde_json::from_str(json).map_err(|_| Error::UnexpectedString)?;

    let runways: HashMap<String, Vec<Runway>> = records
        .into_iter()
        .map(|(ident, rwys)| {
            let rwys: Vec<Runway> = rwys
                .into_iter()
                .filter(|rwy| rwy.le.is_some() || rwy.he.is_some())
                .map(Runway::from)
                .collect();
            trace!("{ident}: {} runways", rwys.len());
            (ident, rwys)
        })
        .collect();

    debug!("read runways of {} aerodromes", runways.len());
    Ok(runways)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Wind;
    use crate::nd::select_runway;

    const DB: &str = r#"{
        "EDHL": [{"l":6903,"w":148,"s":"PG","lit":1,
            "le":{"id":"07","lat":53.8,"lon":10.7,"elev":47,"hdg":68.5},
            "he":{"id":"25","lat":53.81,"lon":10.73,"elev":53,"hdg":248.5,"dt":590}}],
        "EDXY": [{"l":2000,"s":"GRS","cls":1,"le":{"id":"09"}}, {"l":1000}]
    }"#;

    #[test]
    fn reads_runways() {
        let db = parse_runways_json(DB).unwrap();

        let edhl = &db["EDHL"][0];
        assert_eq!(edhl.surface, Some(RunwaySurface::PavementGood));
        assert!(edhl.lighted && !edhl.closed);
        let he = edhl.he.as_ref().unwrap();
        assert_eq!(he.designator, "25");
        assert_eq!(he.displaced_threshold, Some(Length::ft(590.0)));

        let edxy = &db["EDXY"];
        assert_eq!(edxy.len(), 1);
        assert!(edxy[0].closed);
        assert_eq!(edxy[0].surface, Some(RunwaySurface::GrassGood));
        assert_eq!(edxy[0].le.as_ref().unwrap().heading, None);
    }

    #[test]
    fn selects_from_database() {
        let db = parse_runways_json(DB).unwrap();
        let selection = select_runway(&db["EDHL"], Some(&Wind::kt(240.0, 15.0))).unwrap();
        assert_eq!(selection.designator, "25");
    }

    #[test]
    fn rejects_other_json() {
        assert_eq!(parse_runways_json("[1, 2]"), Err(Error::UnexpectedString));
    }
}
