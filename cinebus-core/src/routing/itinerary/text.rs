use petgraph::graph::NodeIndex;

use super::{Itinerary, Segment};
use crate::model::CityGraph;
use crate::routing::Path;

const NO_DIRECTIONS: &str = "No directions available";

impl Itinerary {
    /// One sentence per segment
    pub fn directions(&self, city: &CityGraph) -> Vec<String> {
        let last = self.segments.len().saturating_sub(1);
        self.segments
            .iter()
            .enumerate()
            .map(|(index, segment)| {
                let after_ride = index > 0 && self.segments[index - 1].is_ride();
                describe(city, segment, after_ride, index == last)
            })
            .collect()
    }
}

impl Path {
    /// Step-by-step directions followed by the total travel time
    pub fn directions(&self, city: &CityGraph) -> Vec<String> {
        let mut lines = if self.itinerary.is_empty() {
            vec![NO_DIRECTIONS.to_string()]
        } else {
            self.itinerary.directions(city)
        };
        lines.push(format!("Total travel time: {} min", self.minutes()));
        lines
    }
}

fn describe(city: &CityGraph, segment: &Segment, after_ride: bool, is_last: bool) -> String {
    match segment {
        Segment::Walk { nodes } if nodes.len() < 2 => "You are already there.".to_string(),
        Segment::Walk { nodes } => {
            let to = nodes.last().copied();
            match to.and_then(|node| stop_name(city, node)) {
                Some(name) if !is_last => format!("Walk to the {name} stop."),
                _ => "Walk to your destination.".to_string(),
            }
        }
        Segment::Ride { line, nodes } => {
            let from = nodes
                .first()
                .and_then(|&node| stop_name(city, node))
                .unwrap_or("?");
            let to = nodes
                .last()
                .and_then(|&node| stop_name(city, node))
                .unwrap_or("?");
            let hops = nodes.len().saturating_sub(1);
            let plural = if hops == 1 { "" } else { "s" };
            if after_ride {
                format!("At {from}, change to line {line} and ride {hops} stop{plural} to {to}.")
            } else {
                format!("Take line {line} at {from} and ride {hops} stop{plural} to {to}.")
            }
        }
    }
}

fn stop_name(city: &CityGraph, node: NodeIndex) -> Option<&str> {
    city.stop(node).map(|stop| stop.name.as_str())
}

#[cfg(test)]
mod tests {
    use crate::routing::find_path;
    use crate::test_support::{city_fixture, street_point};

    #[test]
    fn ride_with_transfer_is_announced() {
        let fixture = city_fixture(&["A"], &["C"]);
        let path = find_path(
            &fixture.streets,
            &fixture.city,
            &street_point(0),
            &street_point(10),
            &fixture.params,
        )
        .unwrap();

        let directions = path.directions(&fixture.city);

        assert_eq!(
            directions,
            vec![
                "Walk to the Stop S1 stop.".to_string(),
                "Take line A at Stop S1 and ride 1 stop to Stop S2.".to_string(),
                "At Stop S2, change to line C and ride 1 stop to Stop S3.".to_string(),
                "Walk to your destination.".to_string(),
                format!("Total travel time: {} min", path.minutes()),
            ]
        );
    }

    #[test]
    fn empty_itinerary_falls_back_to_placeholder() {
        let fixture = city_fixture(&["A"], &["A"]);
        let mut path = find_path(
            &fixture.streets,
            &fixture.city,
            &street_point(0),
            &street_point(2),
            &fixture.params,
        )
        .unwrap();
        path.itinerary = Default::default();

        assert_eq!(
            path.directions(&fixture.city),
            vec![
                "No directions available".to_string(),
                "Total travel time: 2 min".to_string()
            ]
        );
    }
}
