use geo::{Coord, LineString, Point};
use geojson::{Feature, FeatureCollection, Geometry, Value as GeoJsonValue};
use petgraph::graph::NodeIndex;
use serde_json::json;

use super::{Segment, StopRole};
use crate::Error;
use crate::model::CityGraph;
use crate::routing::Path;

impl Path {
    /// Converts the path to a `GeoJSON` `FeatureCollection`: one feature per
    /// segment followed by one point per boarding, alighting or transfer stop.
    pub fn to_geojson(&self, city: &CityGraph) -> Result<FeatureCollection, Error> {
        let mut features = Vec::new();

        if self.itinerary.is_empty() {
            // Keep the route drawable even without segmentation
            features.push(create_segment_feature(
                city,
                0,
                &Segment::Walk {
                    nodes: self.nodes(),
                },
            )?);
        } else {
            for (idx, segment) in self.itinerary.segments().iter().enumerate() {
                features.push(create_segment_feature(city, idx, segment)?);
            }
        }

        for (stop, role) in self.itinerary.stop_roles() {
            features.push(create_stop_feature(city, stop, role)?);
        }

        Ok(FeatureCollection {
            features,
            bbox: None,
            foreign_members: None,
        })
    }

    pub fn to_geojson_string(&self, city: &CityGraph) -> Result<String, Error> {
        serde_json::to_string(&self.to_geojson(city)?)
            .map_err(|e| Error::GeoJsonError(e.to_string()))
    }
}

fn create_segment_feature(
    city: &CityGraph,
    segment_idx: usize,
    segment: &Segment,
) -> Result<Feature, Error> {
    let coords = segment
        .nodes()
        .iter()
        .map(|&node| {
            city.node(node)
                .map(|n| Coord::from(n.geometry()))
                .ok_or(Error::InvalidNodeIndex)
        })
        .collect::<Result<Vec<Coord<f64>>, Error>>()?;

    let geometry = match coords.as_slice() {
        [single] => Geometry::new(GeoJsonValue::from(&Point::from(*single))),
        _ => Geometry::new(GeoJsonValue::from(&LineString::new(coords))),
    };

    let (leg_type, line) = match segment {
        Segment::Walk { .. } => ("walk", None),
        Segment::Ride { line, .. } => ("ride", Some(line.as_str())),
    };

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "leg_type": leg_type,
            "leg_index": segment_idx,
            "line": line,
            "node_count": segment.nodes().len(),
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

fn create_stop_feature(
    city: &CityGraph,
    node: NodeIndex,
    role: StopRole,
) -> Result<Feature, Error> {
    let stop = city.stop(node).ok_or(Error::InvalidNodeIndex)?;
    let geometry = Geometry::new(GeoJsonValue::from(&stop.geometry));

    let value = json!({
        "type": "Feature",
        "geometry": geometry,
        "properties": {
            "stop_role": role.as_str(),
            "stop_code": stop.code,
            "stop_name": stop.name,
            "lines": stop.lines,
        }
    });

    serde_json::from_value::<Feature>(value).map_err(|e| Error::GeoJsonError(e.to_string()))
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use crate::routing::find_path;
    use crate::test_support::{city_fixture, street_point};

    #[test]
    fn segments_and_tagged_stops_become_features() {
        let fixture = city_fixture(&["A"], &["C"]);
        let path = find_path(
            &fixture.streets,
            &fixture.city,
            &street_point(0),
            &street_point(10),
            &fixture.params,
        )
        .unwrap();

        let collection = serde_json::to_value(path.to_geojson(&fixture.city).unwrap()).unwrap();

        // walk, ride A, ride C, walk, then boarding, transfer and alighting stops
        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), 7);
        let roles: Vec<&str> = features[4..]
            .iter()
            .map(|feature| feature["properties"]["stop_role"].as_str().unwrap())
            .collect();
        assert_eq!(roles, vec!["boarding", "transfer", "alighting"]);
        assert_eq!(features[1]["properties"]["line"], Value::from("A"));
        assert_eq!(features[0]["properties"]["line"], Value::Null);
        assert_eq!(features[0]["geometry"]["type"], Value::from("LineString"));

        let json = path.to_geojson_string(&fixture.city).unwrap();
        assert!(json.contains("FeatureCollection"));
    }

    #[test]
    fn zero_length_path_is_a_point() {
        let fixture = city_fixture(&["A"], &["A"]);
        let path = find_path(
            &fixture.streets,
            &fixture.city,
            &street_point(3),
            &street_point(3),
            &fixture.params,
        )
        .unwrap();

        let collection = serde_json::to_value(path.to_geojson(&fixture.city).unwrap()).unwrap();

        let features = collection["features"].as_array().unwrap();
        assert_eq!(features.len(), 1);
        assert_eq!(features[0]["geometry"]["type"], Value::from("Point"));
    }
}
