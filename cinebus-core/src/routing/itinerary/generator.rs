use log::warn;
use petgraph::graph::NodeIndex;

use super::{Itinerary, Segment};
use crate::ItineraryError;
use crate::model::{CityGraph, LineSet};

/// Scanner state between two consecutive path positions
#[derive(Debug)]
enum ScanState {
    Walking { since: usize },
    Riding { boarded_at: usize, lines: LineSet },
}

/// Segment a path into walks and rides, or an empty itinerary if the path is inconsistent
pub fn generate_itinerary(city: &CityGraph, nodes: &[NodeIndex]) -> Itinerary {
    try_generate_itinerary(city, nodes).unwrap_or_else(|e| {
        warn!("No directions available for a {}-node path: {e}", nodes.len());
        Itinerary::default()
    })
}

/// Segment a path into walks and rides
///
/// A ride starts on the first stop-to-stop hop and keeps the set of lines
/// serving every hop so far. When the next hop shares none of them, the
/// traveler changes line at the current stop.
///
/// # Errors
///
/// Returns an [`ItineraryError`] when consecutive nodes are not joined by an
/// edge, a node is not in `city`, or a stop-to-stop hop carries no lines.
pub fn try_generate_itinerary(
    city: &CityGraph,
    nodes: &[NodeIndex],
) -> Result<Itinerary, ItineraryError> {
    let Some(last) = nodes.len().checked_sub(1) else {
        return Ok(Itinerary::default());
    };

    let mut segments = Vec::new();
    let mut state = ScanState::Walking { since: 0 };

    for position in 0..last {
        let (from, to) = (nodes[position], nodes[position + 1]);
        let from_is_stop = city
            .node(from)
            .ok_or(ItineraryError::UnknownNode(position))?
            .is_stop();
        let to_is_stop = city
            .node(to)
            .ok_or(ItineraryError::UnknownNode(position + 1))?
            .is_stop();
        let edge = city
            .edge_between(from, to)
            .ok_or(ItineraryError::MissingEdge(position, position + 1))?;

        if !(from_is_stop && to_is_stop) {
            // Leaving the bus network ends any ride
            if let ScanState::Riding { boarded_at, lines } = &state {
                segments.push(ride(lines, &nodes[*boarded_at..=position]));
                state = ScanState::Walking { since: position };
            }
            continue;
        }

        let hop_lines = edge
            .lines()
            .ok_or(ItineraryError::NotTransitHop(position))?;
        if hop_lines.is_empty() {
            return Err(ItineraryError::EmptyHopLines(position));
        }

        state = match state {
            ScanState::Walking { since } => {
                if position > since {
                    segments.push(Segment::Walk {
                        nodes: nodes[since..=position].to_vec(),
                    });
                }
                ScanState::Riding {
                    boarded_at: position,
                    lines: hop_lines.clone(),
                }
            }
            ScanState::Riding { boarded_at, lines } => {
                let narrowed: LineSet = lines.intersection(hop_lines).cloned().collect();
                if narrowed.is_empty() {
                    segments.push(ride(&lines, &nodes[boarded_at..=position]));
                    ScanState::Riding {
                        boarded_at: position,
                        lines: hop_lines.clone(),
                    }
                } else {
                    ScanState::Riding {
                        boarded_at,
                        lines: narrowed,
                    }
                }
            }
        };
    }

    match state {
        ScanState::Walking { since } => {
            if since < last || segments.is_empty() {
                segments.push(Segment::Walk {
                    nodes: nodes[since..].to_vec(),
                });
            }
        }
        ScanState::Riding { boarded_at, lines } => {
            segments.push(ride(&lines, &nodes[boarded_at..]));
        }
    }

    Ok(Itinerary::new(segments))
}

/// Ride on one line of `lines`; the smallest identifier keeps the choice stable
fn ride(lines: &LineSet, nodes: &[NodeIndex]) -> Segment {
    Segment::Ride {
        line: lines.first().cloned().unwrap_or_default(),
        nodes: nodes.to_vec(),
    }
}
