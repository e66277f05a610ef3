//! Walk/ride segmentation of a path

mod generator;
mod text;
mod to_geojson;

pub use generator::{generate_itinerary, try_generate_itinerary};

use petgraph::graph::NodeIndex;

use crate::LineId;

/// Part of a path travelled in one mode. Consecutive segments share their boundary node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Walk {
        nodes: Vec<NodeIndex>,
    },
    Ride {
        line: LineId,
        /// Boarding stop, every stop passed, alighting stop
        nodes: Vec<NodeIndex>,
    },
}

impl Segment {
    pub fn nodes(&self) -> &[NodeIndex] {
        match self {
            Self::Walk { nodes } | Self::Ride { nodes, .. } => nodes,
        }
    }

    pub fn from(&self) -> Option<NodeIndex> {
        self.nodes().first().copied()
    }

    pub fn to(&self) -> Option<NodeIndex> {
        self.nodes().last().copied()
    }

    pub fn line(&self) -> Option<&str> {
        match self {
            Self::Ride { line, .. } => Some(line),
            Self::Walk { .. } => None,
        }
    }

    pub fn is_ride(&self) -> bool {
        matches!(self, Self::Ride { .. })
    }
}

/// Role of a stop in an itinerary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopRole {
    Boarding,
    Alighting,
    /// Alighting one line and boarding another at the same stop
    Transfer,
}

impl StopRole {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Boarding => "boarding",
            Self::Alighting => "alighting",
            Self::Transfer => "transfer",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Itinerary {
    segments: Vec<Segment>,
}

impl Itinerary {
    pub(crate) fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn rides(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter().filter(|segment| segment.is_ride())
    }

    /// Number of line changes without leaving the bus network
    pub fn transfer_count(&self) -> usize {
        self.segments
            .windows(2)
            .filter(|pair| pair[0].is_ride() && pair[1].is_ride())
            .count()
    }

    /// Node sequence covered by the itinerary, shared boundaries counted once
    pub fn nodes(&self) -> Vec<NodeIndex> {
        let mut nodes: Vec<NodeIndex> = Vec::new();
        for segment in &self.segments {
            let skip = usize::from(!nodes.is_empty() && nodes.last() == segment.nodes().first());
            nodes.extend_from_slice(&segment.nodes()[skip..]);
        }
        nodes
    }

    /// Stops where the traveler boards, alights or changes line, in travel order
    pub fn stop_roles(&self) -> Vec<(NodeIndex, StopRole)> {
        let mut roles: Vec<(NodeIndex, StopRole)> = Vec::new();
        for segment in self.rides() {
            let (Some(from), Some(to)) = (segment.from(), segment.to()) else {
                continue;
            };
            match roles.last_mut() {
                Some((stop, role)) if *stop == from && *role == StopRole::Alighting => {
                    *role = StopRole::Transfer;
                }
                _ => roles.push((from, StopRole::Boarding)),
            }
            roles.push((to, StopRole::Alighting));
        }
        roles
    }

    pub fn transfer_stops(&self) -> Vec<NodeIndex> {
        self.stop_roles()
            .into_iter()
            .filter(|(_, role)| *role == StopRole::Transfer)
            .map(|(stop, _)| stop)
            .collect()
    }
}
