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

use geo::BoundingRect;
use geojson::{Feature, GeoJson, Geometry, JsonObject, JsonValue, Value};

use super::rect_to_bbox;
use crate::fp::FlightPlan;
use crate::geom::Coordinate;

impl FlightPlan {
    /// The points the legs pass, in order and without repeating the point
    /// where one leg ends and the next starts.
    ///
    /// Points without coordinate are left out.
    pub fn track(&self) -> Vec<Coordinate> {
        let mut track: Vec<Coordinate> = Vec::new();

        for leg in self.legs() {
            let input = leg.input();
            let points = input
                .from
                .iter()
                .chain(input.checkpoints.iter())
                .chain(input.to.iter())
                .filter_map(|wp| wp.coordinate);

            for point in points {
                if track.last() != Some(&point) {
                    track.push(point);
                }
            }
        }

        track
    }

    /// Returns the plan's track as GeoJSON with a line string geometry.
    #[cfg_attr(docsrs, doc(cfg(feature = "geojson")))]
    pub fn to_geojson(&self) -> GeoJson {
        let coords: Vec<geo::Coord<f64>> = self
            .track()
            .into_iter()
            .map(|c| geo::coord! { x: c.longitude, y: c.latitude })
            .collect();

        let line = geo::LineString::from(coords);

        let mut properties = JsonObject::new();
        properties.insert("id".to_string(), JsonValue::from(self.id().as_str()));
        properties.insert("name".to_string(), JsonValue::from(self.name()));
        properties.insert("legs".to_string(), JsonValue::from(self.legs().len()));

        GeoJson::Feature(Feature {
            bbox: line.bounding_rect().map(rect_to_bbox),
            geometry: Some(Geometry::new(Value::from(&line))),
            id: None,
            properties: Some(properties),
            foreign_members: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::core::{FuelFlow, FuelType, FuelUnit};
    use crate::fp::{FlightPlanBuilder, LegInput};
    use crate::measurements::Speed;
    use crate::nd::Waypoint;

    #[test]
    fn line_string_with_bbox() {
        let eddh = Waypoint::at("EDDH", coord!(53.63040161, 9.98822975));
        let edhl = Waypoint::at("EDHL", coord!(53.80540085, 10.71920013));
        let ff = FuelFlow::per_hour(30.0, FuelUnit::Liters, FuelType::AvGas);

        let mut plan = FlightPlanBuilder::new().name("EDDH-EDHL").build().unwrap();
        plan.add_leg(LegInput::between(eddh.clone(), edhl.clone(), Speed::kt(100.0), ff).unwrap())
            .unwrap();
        plan.add_leg(LegInput::between(edhl, eddh, Speed::kt(100.0), ff).unwrap())
            .unwrap();

        assert_eq!(plan.track().len(), 3);

        let geojson::GeoJson::Feature(feature) = plan.to_geojson() else {
            panic!("expected feature");
        };
        assert_eq!(
            feature.bbox,
            Some(vec![9.98822975, 53.63040161, 10.71920013, 53.80540085])
        );
        assert!(matches!(
            feature.geometry.map(|g| g.value),
            Some(geojson::Value::LineString(points)) if points.len() == 3
        ));
    }
}
